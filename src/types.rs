/// One extracted bi-phrase. All bounds are inclusive and 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhraseSpan {
    pub start_source: usize,
    pub end_source: usize,
    pub start_target: usize,
    pub end_target: usize,
}

impl PhraseSpan {
    pub fn new(
        start_source: usize,
        end_source: usize,
        start_target: usize,
        end_target: usize,
    ) -> Self {
        debug_assert!(start_source <= end_source && start_target <= end_target);
        Self {
            start_source,
            end_source,
            start_target,
            end_target,
        }
    }

    /// `end - start` on the source side, i.e. one less than the word count.
    pub fn source_extent(&self) -> usize {
        self.end_source - self.start_source
    }

    pub fn target_extent(&self) -> usize {
        self.end_target - self.start_target
    }

    /// Both sides stay under `max_phrase_length` words.
    pub fn is_within(&self, max_phrase_length: usize) -> bool {
        self.source_extent() < max_phrase_length && self.target_extent() < max_phrase_length
    }

    pub fn contains_source(&self, source: usize) -> bool {
        (self.start_source..=self.end_source).contains(&source)
    }

    pub fn contains_target(&self, target: usize) -> bool {
        (self.start_target..=self.end_target).contains(&target)
    }
}
