use std::fmt;
use std::str::FromStr;

use crate::error::ExtractError;

/// Which orientation classes a reordering model distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// monotone vs. everything else
    Monotonicity,
    /// monotone, swap, discontinuous
    Msd,
    /// monotone, swap, discontinuous-left, discontinuous-right
    Mslr,
}

impl FromStr for ModelFamily {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "msd" => Ok(Self::Msd),
            "mslr" => Ok(Self::Mslr),
            "mono" | "monotonicity" => Ok(Self::Monotonicity),
            _ => Err(ExtractError::invalid_model(s)),
        }
    }
}

/// What a neighbouring unit is: a word, an extracted phrase, or any phrase
/// regardless of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLevel {
    Word,
    Phrase,
    Hierarchical,
}

impl FromStr for ModelLevel {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wbe" => Ok(Self::Word),
            "phrase" => Ok(Self::Phrase),
            "hier" => Ok(Self::Hierarchical),
            _ => Err(ExtractError::invalid_model(s)),
        }
    }
}

/// A `--model` argument such as `wbe-msd` or `hier-mslr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub level: ModelLevel,
    pub family: ModelFamily,
}

impl FromStr for ModelSpec {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (level, family) = s
            .split_once('-')
            .ok_or_else(|| ExtractError::invalid_model(s))?;
        let level: ModelLevel = level.parse().map_err(|_| ExtractError::invalid_model(s))?;
        let family: ModelFamily = family.parse().map_err(|_| ExtractError::invalid_model(s))?;
        Ok(Self { level, family })
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            ModelLevel::Word => "wbe",
            ModelLevel::Phrase => "phrase",
            ModelLevel::Hierarchical => "hier",
        };
        let family = match self.family {
            ModelFamily::Monotonicity => "mono",
            ModelFamily::Msd => "msd",
            ModelFamily::Mslr => "mslr",
        };
        write!(f, "{level}-{family}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderingModels {
    pub word: Option<ModelFamily>,
    pub phrase: Option<ModelFamily>,
    pub hierarchical: Option<ModelFamily>,
}

impl ReorderingModels {
    pub fn enable(&mut self, spec: ModelSpec) {
        let slot = match spec.level {
            ModelLevel::Word => &mut self.word,
            ModelLevel::Phrase => &mut self.phrase,
            ModelLevel::Hierarchical => &mut self.hierarchical,
        };
        *slot = Some(spec.family);
    }

    pub fn any(&self) -> bool {
        self.word.is_some() || self.phrase.is_some() || self.hierarchical.is_some()
    }

    /// Phrase and hierarchical models look at corners of other phrases, so
    /// the whole sentence has to be enumerated before anything is classified.
    pub fn builds_vertices(&self) -> bool {
        self.phrase.is_some() || self.hierarchical.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub max_phrase_length: usize,
    pub orientation: bool,
    pub models: ReorderingModels,
    pub only_output_span_info: bool,
}

impl ExtractConfig {
    pub const DEFAULT_MAX_PHRASE_LENGTH: usize = 7;

    pub fn new(max_phrase_length: usize) -> Result<Self, ExtractError> {
        if max_phrase_length == 0 {
            return Err(ExtractError::invalid_config(
                "maximum phrase length must be a positive integer",
            ));
        }
        Ok(Self {
            max_phrase_length,
            orientation: false,
            models: ReorderingModels::default(),
            only_output_span_info: false,
        })
    }

    pub fn with_orientation(mut self, orientation: bool) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_model(mut self, spec: ModelSpec) -> Self {
        self.models.enable(spec);
        self
    }

    pub fn with_only_output_span_info(mut self, only_output_span_info: bool) -> Self {
        self.only_output_span_info = only_output_span_info;
        self
    }

    /// Models in force. Asking for orientation without naming a model gets
    /// the word-based MSD model.
    pub fn effective_models(&self) -> ReorderingModels {
        let mut models = self.models;
        if self.orientation && !models.any() {
            models.word = Some(ModelFamily::Msd);
        }
        models
    }

    /// A hierarchical model lifts the length limit during enumeration.
    pub fn hierarchical(&self) -> bool {
        self.models.hierarchical.is_some()
    }

    pub fn builds_vertices(&self) -> bool {
        self.effective_models().builds_vertices()
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_phrase_length: Self::DEFAULT_MAX_PHRASE_LENGTH,
            orientation: false,
            models: ReorderingModels::default(),
            only_output_span_info: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_model_specs() {
        let spec: ModelSpec = "wbe-msd".parse().unwrap();
        assert_eq!(
            spec,
            ModelSpec {
                level: ModelLevel::Word,
                family: ModelFamily::Msd
            }
        );
        let spec: ModelSpec = "hier-monotonicity".parse().unwrap();
        assert_eq!(spec.level, ModelLevel::Hierarchical);
        assert_eq!(spec.family, ModelFamily::Monotonicity);
        assert_eq!(spec.to_string(), "hier-mono");
        assert_eq!("phrase-mslr".parse::<ModelSpec>().unwrap().to_string(), "phrase-mslr");
    }

    #[test]
    fn rejects_unknown_models() {
        for bad in ["wbe", "word-msd", "wbe-lr", "phrase-msd-6", ""] {
            let err = bad.parse::<ModelSpec>().unwrap_err();
            assert!(
                matches!(err, ExtractError::InvalidModel { ref value } if value == bad),
                "{bad}"
            );
        }
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(matches!(
            ExtractConfig::new(0),
            Err(ExtractError::InvalidConfig { .. })
        ));
        assert_eq!(ExtractConfig::new(3).unwrap().max_phrase_length, 3);
    }

    #[test]
    fn orientation_defaults_to_word_msd() {
        let config = ExtractConfig::new(7).unwrap().with_orientation(true);
        let models = config.effective_models();
        assert_eq!(models.word, Some(ModelFamily::Msd));
        assert!(!models.builds_vertices());

        let config = ExtractConfig::new(7)
            .unwrap()
            .with_orientation(true)
            .with_model("phrase-mslr".parse().unwrap());
        let models = config.effective_models();
        assert_eq!(models.word, None);
        assert_eq!(models.phrase, Some(ModelFamily::Mslr));
        assert!(config.builds_vertices());
        assert!(!config.hierarchical());
    }

    #[test]
    fn default_config() {
        let config = ExtractConfig::default();
        assert_eq!(config.max_phrase_length, ExtractConfig::DEFAULT_MAX_PHRASE_LENGTH);
        assert!(!config.orientation);
        assert!(!config.models.any());
        assert!(!config.only_output_span_info);
    }
}
