use std::io::Write;

use crate::alignment::SentenceAlignment;
use crate::config::ReorderingModels;
use crate::error::ExtractError;
use crate::extract::{render_orientations, ExtractedPhrase};
use crate::types::PhraseSpan;

/// Sink for extracted phrases. Sentence hooks bracket the phrases of each
/// input line, including lines that were rejected.
pub trait PhraseEmitter {
    fn begin_sentence(
        &mut self,
        _target: &str,
        _source: &str,
        _alignment: &str,
    ) -> Result<(), ExtractError> {
        Ok(())
    }

    fn emit(
        &mut self,
        sentence: &SentenceAlignment,
        phrase: &ExtractedPhrase,
    ) -> Result<(), ExtractError>;

    fn end_sentence(&mut self) -> Result<(), ExtractError> {
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExtractError>;
}

/// `src ||| tgt ||| s-t ...` with phrase-local indices.
pub fn forward_record(sentence: &SentenceAlignment, span: &PhraseSpan) -> String {
    let points: String = local_points(sentence, span)
        .map(|(s, t)| format!(" {s}-{t}"))
        .collect();
    format!(
        "{} ||| {} |||{}",
        source_words(sentence, span),
        target_words(sentence, span),
        points
    )
}

/// `tgt ||| src ||| t-s ...`
pub fn inverse_record(sentence: &SentenceAlignment, span: &PhraseSpan) -> String {
    let points: String = local_points(sentence, span)
        .map(|(s, t)| format!(" {t}-{s}"))
        .collect();
    format!(
        "{} ||| {} |||{}",
        target_words(sentence, span),
        source_words(sentence, span),
        points
    )
}

pub fn orientation_record(sentence: &SentenceAlignment, span: &PhraseSpan, tags: &str) -> String {
    format!(
        "{} ||| {} ||| {}",
        source_words(sentence, span),
        target_words(sentence, span),
        tags
    )
}

fn source_words(sentence: &SentenceAlignment, span: &PhraseSpan) -> String {
    sentence.source[span.start_source..=span.end_source].join(" ")
}

fn target_words(sentence: &SentenceAlignment, span: &PhraseSpan) -> String {
    sentence.target[span.start_target..=span.end_target].join(" ")
}

/// Alignment points inside the phrase as `(source, target)` offsets from its
/// top-left corner, ordered by target position.
fn local_points<'s>(
    sentence: &'s SentenceAlignment,
    span: &'s PhraseSpan,
) -> impl Iterator<Item = (usize, usize)> + 's {
    (span.start_target..=span.end_target).flat_map(move |t| {
        sentence.aligned_to_target[t]
            .iter()
            .map(move |&s| (s - span.start_source, t - span.start_target))
    })
}

/// Writes the forward, inverse and (optionally) orientation tables.
pub struct TableEmitter<W: Write> {
    forward: W,
    inverse: W,
    orientation: Option<W>,
    models: ReorderingModels,
}

impl<W: Write> TableEmitter<W> {
    pub fn new(forward: W, inverse: W, orientation: Option<W>, models: ReorderingModels) -> Self {
        Self {
            forward,
            inverse,
            orientation,
            models,
        }
    }

    pub fn into_inner(self) -> (W, W, Option<W>) {
        (self.forward, self.inverse, self.orientation)
    }
}

impl<W: Write> PhraseEmitter for TableEmitter<W> {
    fn emit(
        &mut self,
        sentence: &SentenceAlignment,
        phrase: &ExtractedPhrase,
    ) -> Result<(), ExtractError> {
        let span = &phrase.span;
        writeln!(self.forward, "{}", forward_record(sentence, span))
            .map_err(|e| ExtractError::io("writing extract table", e))?;
        writeln!(self.inverse, "{}", inverse_record(sentence, span))
            .map_err(|e| ExtractError::io("writing inverse extract table", e))?;

        if let Some(out) = self.orientation.as_mut() {
            let tags = phrase
                .orientations
                .map(|o| render_orientations(&o, &self.models))
                .unwrap_or_default();
            writeln!(out, "{}", orientation_record(sentence, span, &tags))
                .map_err(|e| ExtractError::io("writing orientation table", e))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExtractError> {
        self.forward
            .flush()
            .map_err(|e| ExtractError::io("flushing extract table", e))?;
        self.inverse
            .flush()
            .map_err(|e| ExtractError::io("flushing inverse extract table", e))?;
        if let Some(out) = self.orientation.as_mut() {
            out.flush()
                .map_err(|e| ExtractError::io("flushing orientation table", e))?;
        }
        Ok(())
    }
}

/// Diagnostic output: the raw input of each sentence followed by the four
/// boundaries `start_source end_source start_target end_target` of every
/// phrase.
pub struct SpanEmitter<W: Write> {
    out: W,
}

impl<W: Write> SpanEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PhraseEmitter for SpanEmitter<W> {
    fn begin_sentence(
        &mut self,
        target: &str,
        source: &str,
        alignment: &str,
    ) -> Result<(), ExtractError> {
        writeln!(
            self.out,
            "LOG: SRC: {source}\nLOG: TGT: {target}\nLOG: ALT: {alignment}\nLOG: PHRASES_BEGIN:"
        )
        .map_err(|e| ExtractError::io("writing span info", e))
    }

    fn emit(
        &mut self,
        _sentence: &SentenceAlignment,
        phrase: &ExtractedPhrase,
    ) -> Result<(), ExtractError> {
        let span = &phrase.span;
        writeln!(
            self.out,
            "{} {} {} {}",
            span.start_source, span.end_source, span.start_target, span.end_target
        )
        .map_err(|e| ExtractError::io("writing span info", e))
    }

    fn end_sentence(&mut self) -> Result<(), ExtractError> {
        writeln!(self.out, "LOG: PHRASES_END:")
            .map_err(|e| ExtractError::io("writing span info", e))
    }

    fn finish(&mut self) -> Result<(), ExtractError> {
        self.out
            .flush()
            .map_err(|e| ExtractError::io("flushing span info", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelFamily;
    use crate::orientation::{Orientation, PhraseOrientations};

    fn sentence() -> SentenceAlignment {
        SentenceAlignment::build("a b c", "x y", "0-0 1-1 1-2", 1).unwrap()
    }

    #[test]
    fn records_use_local_indices() {
        let s = sentence();
        let span = PhraseSpan::new(1, 1, 1, 2);
        assert_eq!(forward_record(&s, &span), "y ||| b c ||| 0-0 0-1");
        assert_eq!(inverse_record(&s, &span), "b c ||| y ||| 0-0 1-0");

        let span = PhraseSpan::new(0, 1, 0, 2);
        assert_eq!(forward_record(&s, &span), "x y ||| a b c ||| 0-0 1-1 1-2");
        assert_eq!(inverse_record(&s, &span), "a b c ||| x y ||| 0-0 1-1 2-1");
    }

    #[test]
    fn table_emitter_writes_all_channels() {
        let s = sentence();
        let models = ReorderingModels {
            word: Some(ModelFamily::Msd),
            ..ReorderingModels::default()
        };
        let mut emitter: TableEmitter<Vec<u8>> =
            TableEmitter::new(Vec::new(), Vec::new(), Some(Vec::new()), models);
        let phrase = ExtractedPhrase {
            span: PhraseSpan::new(0, 0, 0, 0),
            orientations: Some(PhraseOrientations {
                word: Some((Orientation::Monotone, Orientation::Unclassifiable)),
                ..PhraseOrientations::default()
            }),
        };
        emitter.emit(&s, &phrase).unwrap();
        emitter.finish().unwrap();

        let (forward, inverse, orientation) = emitter.into_inner();
        assert_eq!(String::from_utf8(forward).unwrap(), "x ||| a ||| 0-0\n");
        assert_eq!(String::from_utf8(inverse).unwrap(), "a ||| x ||| 0-0\n");
        assert_eq!(
            String::from_utf8(orientation.unwrap()).unwrap(),
            "x ||| a ||| mono other\n"
        );
    }

    #[test]
    fn span_emitter_brackets_sentences() {
        let s = sentence();
        let mut emitter: SpanEmitter<Vec<u8>> = SpanEmitter::new(Vec::new());
        emitter.begin_sentence("a b c", "x y", "0-0 1-1 1-2").unwrap();
        emitter
            .emit(
                &s,
                &ExtractedPhrase {
                    span: PhraseSpan::new(1, 1, 1, 2),
                    orientations: None,
                },
            )
            .unwrap();
        emitter.end_sentence().unwrap();

        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(
            out,
            "LOG: SRC: x y\nLOG: TGT: a b c\nLOG: ALT: 0-0 1-1 1-2\nLOG: PHRASES_BEGIN:\n\
             1 1 1 2\nLOG: PHRASES_END:\n"
        );
    }
}
