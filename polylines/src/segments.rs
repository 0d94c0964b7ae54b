use crate::{
    geom::{Point, Segment},
    num::Float,
};

/// An index into our segment arena.
///
/// Throughout this library, we assign identities to segments, so that we may
/// consider segments as different even if they have the same start- and end-points.
///
/// This index is used to identify a segment, whose data can be retrieved by looking
/// it up in [`Segments`]. (Of course, this index-as-identifier breaks down if there are
/// multiple `Segments` in flight. Just be careful not to mix them up.)
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct SegIdx(pub usize);

impl std::fmt::Debug for SegIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s_{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Segments<F: Float> {
    segs: Vec<Segment<F>>,
}

impl<F: Float> Default for Segments<F> {
    fn default() -> Self {
        Self {
            segs: Default::default(),
        }
    }
}

impl<F: Float> Segments<F> {
    pub fn get(&self, idx: SegIdx) -> &Segment<F> {
        &self.segs[idx.0]
    }

    pub fn get_mut(&mut self, idx: SegIdx) -> &mut Segment<F> {
        &mut self.segs[idx.0]
    }

    pub fn indices(&self) -> impl Iterator<Item = SegIdx> {
        (0..self.segs.len()).map(SegIdx)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment<F>> {
        self.segs.iter()
    }

    pub fn len(&self) -> usize {
        self.segs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    pub fn push(&mut self, seg: Segment<F>) -> SegIdx {
        self.segs.push(seg);
        SegIdx(self.segs.len() - 1)
    }

    /// Adds the segments of an open path running through `ps`, all with the same width.
    ///
    /// The segments are added in path order, each pointing towards the next point.
    pub fn add_points<P: Into<Point<F>>>(&mut self, ps: impl IntoIterator<Item = P>, width: F) {
        let ps: Vec<Point<F>> = ps.into_iter().map(|p| p.into()).collect();
        for pair in ps.windows(2) {
            self.push(Segment::new(pair[0].clone(), pair[1].clone(), width.clone()));
        }
    }

    pub fn from_points<P: Into<Point<F>>>(ps: impl IntoIterator<Item = P>, width: F) -> Self {
        let mut ret = Self::default();
        ret.add_points(ps, width);
        ret
    }
}

impl<F: Float> FromIterator<Segment<F>> for Segments<F> {
    fn from_iter<I: IntoIterator<Item = Segment<F>>>(iter: I) -> Self {
        Self {
            segs: iter.into_iter().collect(),
        }
    }
}

impl<F: Float> IntoIterator for Segments<F> {
    type Item = Segment<F>;
    type IntoIter = std::vec::IntoIter<Segment<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segs.into_iter()
    }
}
