use std::collections::{BTreeMap, BTreeSet};

use crate::types::PhraseSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Target index -> source indices of every recorded corner of one kind.
pub type VertexMap = BTreeMap<usize, BTreeSet<usize>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CornerSet {
    top_left: VertexMap,
    top_right: VertexMap,
    bottom_left: VertexMap,
    bottom_right: VertexMap,
}

impl CornerSet {
    pub fn insert_phrase(&mut self, span: &PhraseSpan) {
        insert_vertex(&mut self.top_left, span.start_source, span.start_target);
        insert_vertex(&mut self.top_right, span.end_source, span.start_target);
        insert_vertex(&mut self.bottom_left, span.start_source, span.end_target);
        insert_vertex(&mut self.bottom_right, span.end_source, span.end_target);
    }

    /// Coordinates may fall outside the sentence; those are never present.
    pub fn contains(&self, corner: Corner, source: isize, target: isize) -> bool {
        let (Ok(source), Ok(target)) = (usize::try_from(source), usize::try_from(target)) else {
            return false;
        };
        self.map(corner)
            .get(&target)
            .is_some_and(|row| row.contains(&source))
    }

    pub fn map(&self, corner: Corner) -> &VertexMap {
        match corner {
            Corner::TopLeft => &self.top_left,
            Corner::TopRight => &self.top_right,
            Corner::BottomLeft => &self.bottom_left,
            Corner::BottomRight => &self.bottom_right,
        }
    }
}

fn insert_vertex(corners: &mut VertexMap, source: usize, target: usize) {
    corners.entry(target).or_default().insert(source);
}

/// Corners of every phrase accepted in the current sentence, split by
/// whether the phrase fits the length limit.
#[derive(Debug, Clone, Default)]
pub struct SentenceVertices {
    pub inbound: CornerSet,
    pub outbound: CornerSet,
}

impl SentenceVertices {
    pub fn record(&mut self, span: &PhraseSpan, inbound: bool) {
        if inbound {
            self.inbound.insert_phrase(span);
        } else {
            self.outbound.insert_phrase(span);
        }
    }
}
