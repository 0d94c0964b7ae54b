use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use crate::{
    endpoints::EndpointIndex,
    geom::{Direction, Point, Segment},
    num::Float,
    segments::{SegIdx, Segments},
};

/// A chain of segments under construction.
///
/// Invariant: non-empty, and every segment's end point is the next segment's
/// start point.
#[derive(Clone, Debug)]
pub struct Chain {
    segs: VecDeque<SegIdx>,
}

impl Chain {
    pub fn new(root: SegIdx) -> Self {
        Chain {
            segs: VecDeque::from([root]),
        }
    }

    /// The segment at the given end of the chain.
    pub fn frontier(&self, direction: Direction) -> SegIdx {
        // unwrap: chains are never empty.
        match direction {
            Direction::Start => *self.segs.front().unwrap(),
            Direction::End => *self.segs.back().unwrap(),
        }
    }

    fn attach(&mut self, idx: SegIdx, direction: Direction) {
        match direction {
            Direction::Start => self.segs.push_front(idx),
            Direction::End => self.segs.push_back(idx),
        }
    }

    pub fn len(&self) -> usize {
        self.segs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = SegIdx> + '_ {
        self.segs.iter().copied()
    }

    /// Grows the chain in one direction for as long as there's something to attach.
    ///
    /// Every attached segment is taken out of `index` and `unassigned`, and oriented
    /// so that it continues the chain: when growing at the end it will start where the
    /// chain used to end, and when growing at the start it will end where the chain
    /// used to start.
    ///
    /// This stops when nothing is registered at the current frontier point. Since
    /// attached segments are gone from the index, nothing is ever attached twice, and
    /// so going around a closed loop stops once we're back where we started.
    ///
    /// Returns the number of segments attached.
    pub fn extend<F: Float>(
        &mut self,
        direction: Direction,
        segments: &mut Segments<F>,
        index: &mut EndpointIndex<F>,
        unassigned: &mut BTreeSet<SegIdx>,
    ) -> usize {
        let mut count = 0;
        loop {
            let key = segments.get(self.frontier(direction)).endpoint_key(direction);
            let Some(next) = index.pop_connected_at(segments, &key) else {
                break;
            };

            let seg = segments.get_mut(next);
            if seg.endpoint_key(direction.opposite()) != key {
                seg.reverse();
            }
            debug_assert_eq!(seg.endpoint_key(direction.opposite()), key);

            self.attach(next, direction);
            let was_unassigned = unassigned.remove(&next);
            debug_assert!(was_unassigned);
            count += 1;
        }
        count
    }
}

/// A connected run of segments sharing one stroke width.
///
/// The segments are aligned: each one ends where the next one starts. A polyline
/// always has at least one segment.
///
/// Polylines can be serialized but not deserialized: the only way to get one is
/// to build it from a [`Chain`], which is what guarantees the above.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Polyline<F: Float> {
    width: F,
    segments: Vec<Segment<F>>,
}

impl<F: Float> Polyline<F> {
    pub fn from_chain(chain: &Chain, segments: &Segments<F>, width: F) -> Self {
        Polyline {
            width,
            segments: chain.indices().map(|idx| segments.get(idx).clone()).collect(),
        }
    }

    pub fn width(&self) -> &F {
        &self.width
    }

    pub fn segments(&self) -> &[Segment<F>] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The points visited by this polyline, in order: the start of the first
    /// segment, followed by the end of every segment.
    pub fn points(&self) -> impl Iterator<Item = &Point<F>> + '_ {
        self.segments
            .first()
            .map(|s| s.start())
            .into_iter()
            .chain(self.segments.iter().map(|s| s.end()))
    }

    pub fn first_point(&self) -> Option<&Point<F>> {
        self.segments.first().map(|s| s.start())
    }

    pub fn last_point(&self) -> Option<&Point<F>> {
        self.segments.last().map(|s| s.end())
    }

    /// Does this polyline come back to where it started?
    ///
    /// A single segment never counts as closed, even if it has zero length.
    pub fn is_closed(&self) -> bool {
        self.segments.len() > 1 && self.first_point() == self.last_point()
    }
}
