use thiserror::Error;

/// Reasons a single sentence pair is rejected. The corpus loop logs these and
/// moves on to the next sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentenceError {
    #[error("no target ({target_len}) or source ({source_len}) words in sentence {sentence_id}")]
    EmptySentence {
        sentence_id: usize,
        target_len: usize,
        source_len: usize,
    },
    #[error("{point} is a bad alignment point in sentence {sentence_id}")]
    MalformedAlignmentPoint { sentence_id: usize, point: String },
    #[error(
        "sentence {sentence_id} has alignment point ({source_index}, {target_index}) \
         out of bounds ({source_len}, {target_len})"
    )]
    AlignmentOutOfBounds {
        sentence_id: usize,
        source_index: usize,
        target_index: usize,
        source_len: usize,
        target_len: usize,
    },
    #[error("{stream} line of sentence {sentence_id} is not valid UTF-8")]
    InvalidEncoding {
        sentence_id: usize,
        stream: &'static str,
    },
}

/// Process-level failures: bad configuration or broken I/O.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
    #[error("unknown reordering model '{value}', expected <wbe|phrase|hier>-<msd|mslr|mono>")]
    InvalidModel { value: String },
}

impl ExtractError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_model(value: impl Into<String>) -> Self {
        Self::InvalidModel {
            value: value.into(),
        }
    }
}
