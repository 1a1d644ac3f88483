//! Orientation of an extracted phrase relative to its neighbour.
//!
//! The three reordering levels share one decision procedure,
//! [`classify`], and differ only in what counts as a neighbouring anchor.
//! That difference lives behind [`AnchorLookup`]:
//!
//! * [`WordAnchors`] tests single alignment points,
//! * [`CornerAnchors`] over the inbound corner set gives the phrase level,
//! * [`CornerAnchors`] over inbound and outbound sets, seeded with the
//!   phrase-level result, gives the hierarchical level.
//!
//! Looking backwards ([`Direction::Previous`]) inspects the row just above
//! the phrase; looking forwards ([`Direction::Next`]) inspects the row just
//! below it with the source axis mirrored.

use crate::alignment::SentenceAlignment;
use crate::config::ModelFamily;
use crate::types::PhraseSpan;
use crate::vertices::{Corner, CornerSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Monotone,
    Swap,
    DiscontinuousRight,
    DiscontinuousLeft,
    Unclassifiable,
}

impl Orientation {
    /// Label written to the orientation table.
    ///
    /// Under MSLR an unclassifiable phrase is written as `dright`; existing
    /// reordering tables were built with that label.
    pub fn render(self, family: ModelFamily) -> &'static str {
        match self {
            Self::Monotone => "mono",
            Self::Swap => "swap",
            Self::DiscontinuousRight => "dright",
            Self::DiscontinuousLeft => "dleft",
            Self::Unclassifiable => match family {
                ModelFamily::Monotonicity => "nomono",
                ModelFamily::Msd => "other",
                ModelFamily::Mslr => "dright",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Previous, Direction::Next];

    /// Source-axis step pointing from the near edge towards the far edge.
    pub fn step(self) -> isize {
        match self {
            Self::Previous => 1,
            Self::Next => -1,
        }
    }

    /// Target row holding the neighbour.
    pub fn anchor_row(self, span: &PhraseSpan) -> isize {
        match self {
            Self::Previous => span.start_target as isize - 1,
            Self::Next => span.end_target as isize + 1,
        }
    }

    pub fn near_edge(self, span: &PhraseSpan) -> isize {
        match self {
            Self::Previous => span.start_source as isize,
            Self::Next => span.end_source as isize,
        }
    }

    pub fn far_edge(self, span: &PhraseSpan) -> isize {
        match self {
            Self::Previous => span.end_source as isize,
            Self::Next => span.start_source as isize,
        }
    }

    /// Corner a monotone neighbour leaves on the anchor row.
    pub fn monotone_corner(self) -> Corner {
        match self {
            Self::Previous => Corner::BottomRight,
            Self::Next => Corner::BottomLeft,
        }
    }

    pub fn swap_corner(self) -> Corner {
        match self {
            Self::Previous => Corner::BottomLeft,
            Self::Next => Corner::BottomRight,
        }
    }
}

/// One phrase looked at in one direction, with the word-level neighbour
/// tests already evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Probe<'a> {
    pub sentence: &'a SentenceAlignment,
    pub span: PhraseSpan,
    pub direction: Direction,
    /// The diagonal cell on the near side is aligned.
    pub left: bool,
    /// The diagonal cell on the far side is aligned.
    pub right: bool,
}

impl<'a> Probe<'a> {
    pub fn new(sentence: &'a SentenceAlignment, span: PhraseSpan, direction: Direction) -> Self {
        let row = direction.anchor_row(&span);
        let step = direction.step();
        let left = sentence.is_aligned(direction.near_edge(&span) - step, row);
        let right = sentence.is_aligned(direction.far_edge(&span) + step, row);
        Self {
            sentence,
            span,
            direction,
            left,
            right,
        }
    }

    pub fn row(&self) -> isize {
        self.direction.anchor_row(&self.span)
    }

    pub fn left_neighbour(&self) -> isize {
        self.direction.near_edge(&self.span) - self.direction.step()
    }

    pub fn right_neighbour(&self) -> isize {
        self.direction.far_edge(&self.span) + self.direction.step()
    }

    /// Source positions beyond the near-side neighbour, moving away from the
    /// phrase.
    fn left_scan(&self, ceiling: isize) -> impl Iterator<Item = isize> {
        let step = self.direction.step();
        walk(self.left_neighbour() - step, -step, ceiling)
    }

    fn right_scan(&self, ceiling: isize) -> impl Iterator<Item = isize> {
        let step = self.direction.step();
        walk(self.right_neighbour() + step, step, ceiling)
    }
}

fn walk(from: isize, step: isize, ceiling: isize) -> impl Iterator<Item = isize> {
    std::iter::successors(Some(from), move |index| Some(index + step))
        .take_while(move |index| (0..ceiling).contains(index))
}

/// What counts as a neighbouring anchor for one reordering level.
pub trait AnchorLookup {
    fn monotone_anchor(&self, probe: &Probe<'_>) -> bool;

    fn swap_anchor(&self, probe: &Probe<'_>) -> bool;

    /// Hit on the anchor row at `index` on the near side.
    fn left_hit(&self, probe: &Probe<'_>, index: isize) -> bool;

    fn right_hit(&self, probe: &Probe<'_>, index: isize) -> bool;

    /// Exclusive upper bound on scanned source positions.
    fn scan_ceiling(&self, probe: &Probe<'_>) -> isize;

    /// Sides already known to be anchored before scanning.
    fn scan_seed(&self, _probe: &Probe<'_>) -> (bool, bool) {
        (false, false)
    }

    /// Orientation computed by a lower level, consulted first.
    fn fallback(&self) -> Orientation {
        Orientation::Unclassifiable
    }
}

pub struct WordAnchors;

impl AnchorLookup for WordAnchors {
    fn monotone_anchor(&self, probe: &Probe<'_>) -> bool {
        probe.left && !probe.right
    }

    fn swap_anchor(&self, probe: &Probe<'_>) -> bool {
        !probe.left && probe.right
    }

    fn left_hit(&self, probe: &Probe<'_>, index: isize) -> bool {
        probe.sentence.is_aligned(index, probe.row())
    }

    fn right_hit(&self, probe: &Probe<'_>, index: isize) -> bool {
        probe.sentence.is_aligned(index, probe.row())
    }

    fn scan_ceiling(&self, probe: &Probe<'_>) -> isize {
        probe.sentence.source_len() as isize
    }

    fn scan_seed(&self, probe: &Probe<'_>) -> (bool, bool) {
        (probe.left, probe.right)
    }
}

/// Anchors are corners of other extracted phrases.
pub struct CornerAnchors<'a> {
    sets: &'a [&'a CornerSet],
    fallback: Orientation,
}

impl<'a> CornerAnchors<'a> {
    pub fn phrase(inbound: &'a [&'a CornerSet]) -> Self {
        Self {
            sets: inbound,
            fallback: Orientation::Unclassifiable,
        }
    }

    pub fn hierarchical(sets: &'a [&'a CornerSet], phrase_orientation: Orientation) -> Self {
        Self {
            sets,
            fallback: phrase_orientation,
        }
    }

    fn any_contains(&self, corner: Corner, source: isize, target: isize) -> bool {
        self.sets
            .iter()
            .any(|set| set.contains(corner, source, target))
    }
}

impl AnchorLookup for CornerAnchors<'_> {
    fn monotone_anchor(&self, probe: &Probe<'_>) -> bool {
        (probe.left && !probe.right)
            || self.any_contains(
                probe.direction.monotone_corner(),
                probe.left_neighbour(),
                probe.row(),
            )
    }

    fn swap_anchor(&self, probe: &Probe<'_>) -> bool {
        (!probe.left && probe.right)
            || self.any_contains(
                probe.direction.swap_corner(),
                probe.right_neighbour(),
                probe.row(),
            )
    }

    fn left_hit(&self, probe: &Probe<'_>, index: isize) -> bool {
        self.any_contains(probe.direction.monotone_corner(), index, probe.row())
    }

    fn right_hit(&self, probe: &Probe<'_>, index: isize) -> bool {
        self.any_contains(probe.direction.swap_corner(), index, probe.row())
    }

    // Corner coordinates are phrase boundaries, one unit short of the
    // word-level sentinel range.
    fn scan_ceiling(&self, probe: &Probe<'_>) -> isize {
        probe.sentence.source_len() as isize - 1
    }

    fn fallback(&self) -> Orientation {
        self.fallback
    }
}

pub fn classify(
    lookup: &impl AnchorLookup,
    probe: &Probe<'_>,
    family: ModelFamily,
) -> Orientation {
    let fallback = lookup.fallback();

    if fallback == Orientation::Monotone || lookup.monotone_anchor(probe) {
        return Orientation::Monotone;
    }
    if family == ModelFamily::Monotonicity {
        return Orientation::Unclassifiable;
    }
    if fallback == Orientation::Swap || lookup.swap_anchor(probe) {
        return Orientation::Swap;
    }
    if family == ModelFamily::Msd {
        return Orientation::Unclassifiable;
    }
    if fallback != Orientation::Unclassifiable {
        return fallback;
    }

    let ceiling = lookup.scan_ceiling(probe);
    let (mut left, mut right) = lookup.scan_seed(probe);
    if !left {
        left = probe.left_scan(ceiling).any(|index| lookup.left_hit(probe, index));
    }
    if !right {
        right = probe.right_scan(ceiling).any(|index| lookup.right_hit(probe, index));
    }
    match (left, right) {
        (true, false) => Orientation::DiscontinuousRight,
        (false, true) => Orientation::DiscontinuousLeft,
        _ => Orientation::Unclassifiable,
    }
}

/// `(previous, next)` orientation for one level.
pub type OrientationPair = (Orientation, Orientation);

/// Orientations of one phrase for every enabled level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhraseOrientations {
    pub word: Option<OrientationPair>,
    pub phrase: Option<OrientationPair>,
    pub hierarchical: Option<OrientationPair>,
}
