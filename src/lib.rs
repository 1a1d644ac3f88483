pub mod alignment;
pub mod config;
pub mod corpus;
pub mod emit;
pub mod error;
pub mod extract;
pub mod orientation;
pub mod tokenizer;
pub mod types;
pub mod vertices;

pub use alignment::SentenceAlignment;
pub use config::{ExtractConfig, ModelFamily, ModelLevel, ModelSpec, ReorderingModels};
pub use corpus::{extract_corpus, CorpusStats};
pub use emit::{PhraseEmitter, SpanEmitter, TableEmitter};
pub use error::{ExtractError, SentenceError};
pub use extract::{enumerate, extract_sentence, ExtractedPhrase, SentenceContext};
pub use orientation::{Direction, Orientation, PhraseOrientations};
pub use types::PhraseSpan;
pub use vertices::{Corner, CornerSet, SentenceVertices};
