use std::io::{BufRead, Split};

use log::{info, warn};

use crate::alignment::SentenceAlignment;
use crate::config::ExtractConfig;
use crate::emit::PhraseEmitter;
use crate::error::{ExtractError, SentenceError};
use crate::extract::extract_sentence;

const PROGRESS_INTERVAL: usize = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub sentences: usize,
    pub skipped: usize,
    pub phrases: usize,
}

/// Runs extraction over three line-aligned streams until the target stream
/// ends. A source or alignment stream that runs out early reads as empty
/// lines. Lines are read as bytes; a line that is not UTF-8 rejects only its
/// own sentence.
pub fn extract_corpus<T, S, A, E>(
    target: T,
    source: S,
    alignment: A,
    config: &ExtractConfig,
    emitter: &mut E,
) -> Result<CorpusStats, ExtractError>
where
    T: BufRead,
    S: BufRead,
    A: BufRead,
    E: PhraseEmitter + ?Sized,
{
    let mut source_lines = source.split(b'\n');
    let mut alignment_lines = alignment.split(b'\n');
    let mut stats = CorpusStats::default();

    for (line_no, target_line) in target.split(b'\n').enumerate() {
        let sentence_id = line_no + 1;
        let target_line =
            Line::decode(target_line.map_err(|e| ExtractError::io("reading target corpus", e))?);
        let source_line = next_line(&mut source_lines, "reading source corpus")?;
        let alignment_line = next_line(&mut alignment_lines, "reading alignment file")?;

        if sentence_id % PROGRESS_INTERVAL == 0 {
            info!("processing sentence: {}", sentence_id);
        }
        stats.sentences += 1;

        emitter.begin_sentence(&target_line.text, &source_line.text, &alignment_line.text)?;
        match build_sentence(sentence_id, &target_line, &source_line, &alignment_line) {
            Ok(sentence) => {
                for phrase in extract_sentence(&sentence, config) {
                    emitter.emit(&sentence, &phrase)?;
                    stats.phrases += 1;
                }
            }
            Err(err) => {
                warn!("{}\nT: {}\nS: {}", err, target_line.text, source_line.text);
                stats.skipped += 1;
            }
        }
        emitter.end_sentence()?;
    }

    emitter.finish()?;
    Ok(stats)
}

/// One input line without its terminator. Invalid UTF-8 is replaced for
/// display and remembered in `valid`.
struct Line {
    text: String,
    valid: bool,
}

impl Line {
    fn decode(mut bytes: Vec<u8>) -> Self {
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        match String::from_utf8(bytes) {
            Ok(text) => Self { text, valid: true },
            Err(err) => Self {
                text: String::from_utf8_lossy(err.as_bytes()).into_owned(),
                valid: false,
            },
        }
    }
}

fn next_line<B: BufRead>(
    lines: &mut Split<B>,
    context: &'static str,
) -> Result<Line, ExtractError> {
    match lines.next() {
        Some(line) => line
            .map(Line::decode)
            .map_err(|e| ExtractError::io(context, e)),
        None => Ok(Line::decode(Vec::new())),
    }
}

fn build_sentence(
    sentence_id: usize,
    target: &Line,
    source: &Line,
    alignment: &Line,
) -> Result<SentenceAlignment, SentenceError> {
    for (stream, line) in [("target", target), ("source", source), ("alignment", alignment)] {
        if !line.valid {
            return Err(SentenceError::InvalidEncoding {
                sentence_id,
                stream,
            });
        }
    }
    SentenceAlignment::build(&target.text, &source.text, &alignment.text, sentence_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::TableEmitter;

    fn run(
        target: &str,
        source: &str,
        alignment: &str,
        config: &ExtractConfig,
    ) -> (CorpusStats, String) {
        run_bytes(target.as_bytes(), source.as_bytes(), alignment.as_bytes(), config)
    }

    fn run_bytes(
        target: &[u8],
        source: &[u8],
        alignment: &[u8],
        config: &ExtractConfig,
    ) -> (CorpusStats, String) {
        let mut emitter: TableEmitter<Vec<u8>> =
            TableEmitter::new(Vec::new(), Vec::new(), None, config.effective_models());
        let stats = extract_corpus(target, source, alignment, config, &mut emitter).unwrap();
        let (forward, _, _) = emitter.into_inner();
        (stats, String::from_utf8(forward).unwrap())
    }

    #[test]
    fn bad_sentence_is_skipped() {
        let config = ExtractConfig::new(3).unwrap();
        let (stats, forward) = run("a\nb\nc\n", "x\ny\nz\n", "0-0\n1x2\n0-0\n", &config);
        assert_eq!(
            stats,
            CorpusStats {
                sentences: 3,
                skipped: 1,
                phrases: 2
            }
        );
        assert_eq!(forward, "x ||| a ||| 0-0\nz ||| c ||| 0-0\n");
    }

    #[test]
    fn short_companion_stream_reads_as_empty() {
        let config = ExtractConfig::new(3).unwrap();
        let (stats, forward) = run("a\nb\n", "x\n", "0-0\n0-0\n", &config);
        assert_eq!(stats.sentences, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(forward, "x ||| a ||| 0-0\n");
    }

    #[test]
    fn undecodable_line_skips_only_its_sentence() {
        let config = ExtractConfig::new(3).unwrap();
        let (stats, forward) = run_bytes(
            b"a\n\xff\xfe b\nc\n",
            b"x\ny\nz\n",
            b"0-0\n0-0\n0-0\n",
            &config,
        );
        assert_eq!(
            stats,
            CorpusStats {
                sentences: 3,
                skipped: 1,
                phrases: 2
            }
        );
        assert_eq!(forward, "x ||| a ||| 0-0\nz ||| c ||| 0-0\n");

        let (stats, forward) = run_bytes(b"a\nb\n", b"x\ny\xff\n", b"0-0\n0-0\n", &config);
        assert_eq!(stats.skipped, 1);
        assert_eq!(forward, "x ||| a ||| 0-0\n");
    }

    #[test]
    fn crlf_line_endings() {
        let config = ExtractConfig::new(3).unwrap();
        let (stats, forward) = run("a b\r\n", "x y\r\n", "0-0 1-1\r\n", &config);
        assert_eq!(stats.skipped, 0);
        assert_eq!(forward, "x ||| a ||| 0-0\nx y ||| a b ||| 0-0 1-1\ny ||| b ||| 0-0\n");
    }

    #[test]
    fn invalid_encoding_names_the_stream() {
        let line = Line::decode(b"0-0 \xff".to_vec());
        assert!(!line.valid);
        assert_eq!(line.text, "0-0 \u{FFFD}");

        let ok = Line::decode(b"a".to_vec());
        let err = build_sentence(4, &ok, &ok, &line).unwrap_err();
        assert_eq!(
            err,
            SentenceError::InvalidEncoding {
                sentence_id: 4,
                stream: "alignment"
            }
        );
    }

    #[test]
    fn empty_corpus() {
        let config = ExtractConfig::default();
        let (stats, forward) = run("", "", "", &config);
        assert_eq!(stats, CorpusStats::default());
        assert!(forward.is_empty());
    }
}
