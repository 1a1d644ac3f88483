use crate::error::SentenceError;
use crate::tokenizer::{owned_tokens, whitespace_tokenizer};

/// One sentence pair with its word alignment.
///
/// `aligned_to_target[t]` lists the source positions linked to target word `t`
/// in input order (duplicates kept); `aligned_count_source[s]` counts the links
/// touching source word `s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceAlignment {
    pub target: Vec<String>,
    pub source: Vec<String>,
    pub aligned_to_target: Vec<Vec<usize>>,
    pub aligned_count_source: Vec<usize>,
}

impl SentenceAlignment {
    pub fn build(
        target_text: &str,
        source_text: &str,
        alignment_text: &str,
        sentence_id: usize,
    ) -> Result<Self, SentenceError> {
        let target = owned_tokens(target_text);
        let source = owned_tokens(source_text);

        if target.is_empty() || source.is_empty() {
            return Err(SentenceError::EmptySentence {
                sentence_id,
                target_len: target.len(),
                source_len: source.len(),
            });
        }

        let mut aligned_to_target = vec![Vec::new(); target.len()];
        let mut aligned_count_source = vec![0usize; source.len()];

        for point in whitespace_tokenizer(alignment_text) {
            let (s, t) = parse_point(point).ok_or_else(|| SentenceError::MalformedAlignmentPoint {
                sentence_id,
                point: point.to_string(),
            })?;
            if s >= source.len() || t >= target.len() {
                return Err(SentenceError::AlignmentOutOfBounds {
                    sentence_id,
                    source_index: s,
                    target_index: t,
                    source_len: source.len(),
                    target_len: target.len(),
                });
            }
            aligned_to_target[t].push(s);
            aligned_count_source[s] += 1;
        }

        Ok(Self {
            target,
            source,
            aligned_to_target,
            aligned_count_source,
        })
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    pub fn alignment_point_count(&self) -> usize {
        self.aligned_to_target.iter().map(Vec::len).sum()
    }

    pub fn is_source_aligned(&self, source: usize) -> bool {
        self.aligned_count_source[source] > 0
    }

    /// Alignment test over the matrix padded with two sentinel corners:
    /// `(-1, -1)` and `(|source|, |target|)` count as aligned, every other
    /// coordinate outside the sentence does not.
    pub fn is_aligned(&self, source: isize, target: isize) -> bool {
        if source == -1 && target == -1 {
            return true;
        }
        if source < 0 || target < 0 {
            return false;
        }
        let (s, t) = (source as usize, target as usize);
        if s == self.source_len() && t == self.target_len() {
            return true;
        }
        if s >= self.source_len() || t >= self.target_len() {
            return false;
        }
        self.aligned_to_target[t].contains(&s)
    }
}

fn parse_point(token: &str) -> Option<(usize, usize)> {
    let (s, t) = token.split_once('-')?;
    if !is_decimal(s) || !is_decimal(t) {
        return None;
    }
    Some((s.parse().ok()?, t.parse().ok()?))
}

fn is_decimal(digits: &str) -> bool {
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
