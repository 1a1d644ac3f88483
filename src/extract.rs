use log::debug;

use crate::alignment::SentenceAlignment;
use crate::config::{ExtractConfig, ModelFamily, ReorderingModels};
use crate::orientation::{
    classify, CornerAnchors, Direction, Orientation, OrientationPair, PhraseOrientations, Probe,
    WordAnchors,
};
use crate::types::PhraseSpan;
use crate::vertices::SentenceVertices;

/// A phrase ready for the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedPhrase {
    pub span: PhraseSpan,
    pub orientations: Option<PhraseOrientations>,
}

/// Everything extraction learns about one sentence. Built fresh for every
/// sentence pair and dropped once its phrases are emitted.
#[derive(Debug)]
pub struct SentenceContext<'a> {
    sentence: &'a SentenceAlignment,
    phrases: Vec<PhraseSpan>,
    vertices: SentenceVertices,
}

impl<'a> SentenceContext<'a> {
    pub fn sentence(&self) -> &'a SentenceAlignment {
        self.sentence
    }

    /// Phrases kept for emission, in enumeration order.
    pub fn phrases(&self) -> &[PhraseSpan] {
        &self.phrases
    }

    pub fn vertices(&self) -> &SentenceVertices {
        &self.vertices
    }

    /// Second pass: attach orientations to every kept phrase. Orientations
    /// are only computed when the orientation table is being written.
    pub fn classify(&self, config: &ExtractConfig) -> Vec<ExtractedPhrase> {
        let models = config.effective_models();
        self.phrases
            .iter()
            .map(|&span| ExtractedPhrase {
                span,
                orientations: config
                    .orientation
                    .then(|| self.orientations(span, &models)),
            })
            .collect()
    }

    pub fn orientations(&self, span: PhraseSpan, models: &ReorderingModels) -> PhraseOrientations {
        let inbound = [&self.vertices.inbound];
        let both = [&self.vertices.inbound, &self.vertices.outbound];

        let word = models
            .word
            .map(|family| self.pair(span, |probe| classify(&WordAnchors, probe, family)));
        let phrase = models.phrase.map(|family| {
            self.pair(span, |probe| {
                classify(&CornerAnchors::phrase(&inbound), probe, family)
            })
        });
        let hierarchical = models.hierarchical.map(|family| {
            let (prev_fallback, next_fallback) =
                phrase.unwrap_or((Orientation::Unclassifiable, Orientation::Unclassifiable));
            self.pair(span, |probe| {
                let fallback = match probe.direction {
                    Direction::Previous => prev_fallback,
                    Direction::Next => next_fallback,
                };
                classify(&CornerAnchors::hierarchical(&both, fallback), probe, family)
            })
        });

        PhraseOrientations {
            word,
            phrase,
            hierarchical,
        }
    }

    fn pair(
        &self,
        span: PhraseSpan,
        orient: impl Fn(&Probe<'_>) -> Orientation,
    ) -> OrientationPair {
        (
            orient(&Probe::new(self.sentence, span, Direction::Previous)),
            orient(&Probe::new(self.sentence, span, Direction::Next)),
        )
    }
}

/// First pass: enumerate every phrase pair consistent with the alignment.
///
/// Without phrase or hierarchical models every consistent phrase within the
/// length limit is kept. With them, corners of every consistent phrase go
/// into the vertex index, and only phrases within the limit are kept; a
/// hierarchical model lifts the limit during enumeration so longer phrases
/// still contribute corners.
pub fn enumerate<'a>(
    sentence: &'a SentenceAlignment,
    config: &ExtractConfig,
) -> SentenceContext<'a> {
    let max_len = config.max_phrase_length;
    let relax_limit = config.hierarchical();
    let build_vertices = config.builds_vertices();

    let mut context = SentenceContext {
        sentence,
        phrases: Vec::new(),
        vertices: SentenceVertices::default(),
    };

    for start_target in 0..sentence.target_len() {
        for end_target in start_target..sentence.target_len() {
            if !relax_limit && end_target - start_target >= max_len {
                break;
            }
            let Some((min_source, max_source)) =
                consistent_footprint(sentence, start_target, end_target)
            else {
                continue;
            };
            if !relax_limit && max_source - min_source >= max_len {
                continue;
            }

            for start_source in (0..=min_source)
                .rev()
                .take_while(|&s| s == min_source || !sentence.is_source_aligned(s))
                .take_while(|&s| relax_limit || max_source - s < max_len)
            {
                for end_source in (max_source..sentence.source_len())
                    .take_while(|&e| e == max_source || !sentence.is_source_aligned(e))
                    .take_while(|&e| relax_limit || e - start_source < max_len)
                {
                    let span = PhraseSpan::new(start_source, end_source, start_target, end_target);
                    if !build_vertices {
                        context.phrases.push(span);
                        continue;
                    }
                    let inbound = span.is_within(max_len);
                    context.vertices.record(&span, inbound);
                    if inbound {
                        context.phrases.push(span);
                    }
                }
            }
        }
    }

    debug!(
        "{} phrases from {}x{} sentence",
        context.phrases.len(),
        sentence.source_len(),
        sentence.target_len()
    );
    context
}

/// Source range covered by the target span `[start_target, end_target]`,
/// or `None` when the span is unaligned or some source word in that range
/// is also linked to a target word outside the span.
fn consistent_footprint(
    sentence: &SentenceAlignment,
    start_target: usize,
    end_target: usize,
) -> Option<(usize, usize)> {
    let mut used = sentence.aligned_count_source.clone();
    let mut footprint: Option<(usize, usize)> = None;

    for source_indices in &sentence.aligned_to_target[start_target..=end_target] {
        for &s in source_indices {
            footprint = Some(match footprint {
                Some((min, max)) => (min.min(s), max.max(s)),
                None => (s, s),
            });
            used[s] -= 1;
        }
    }

    let (min_source, max_source) = footprint?;
    if used[min_source..=max_source].iter().any(|&count| count > 0) {
        return None;
    }
    Some((min_source, max_source))
}

/// Both passes for one sentence.
pub fn extract_sentence(
    sentence: &SentenceAlignment,
    config: &ExtractConfig,
) -> Vec<ExtractedPhrase> {
    enumerate(sentence, config).classify(config)
}

/// Orientation table column for `models`. With only the word level active
/// the column is `prev next`; once phrase or hierarchical levels are active
/// it becomes `word | phrase | hier`, disabled levels left blank.
pub fn render_orientations(orientations: &PhraseOrientations, models: &ReorderingModels) -> String {
    fn level(pair: Option<OrientationPair>, family: Option<ModelFamily>) -> String {
        match (pair, family) {
            (Some((prev, next)), Some(family)) => {
                format!("{} {}", prev.render(family), next.render(family))
            }
            _ => String::new(),
        }
    }

    let word = level(orientations.word, models.word);
    if !models.builds_vertices() {
        return word;
    }
    format!(
        "{} | {} | {}",
        word,
        level(orientations.phrase, models.phrase),
        level(orientations.hierarchical, models.hierarchical)
    )
}
