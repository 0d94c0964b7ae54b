use std::collections::HashMap;

use crate::{
    geom::EndpointKey,
    num::Float,
    segments::{SegIdx, Segments},
};

/// Maps each endpoint to the segments that are still waiting to be chained there.
///
/// Every segment is registered once under its start key and once under its end
/// key. (So a zero-length segment is registered twice under the same key.) As
/// segments get chained, they are removed; a key whose list becomes empty is
/// dropped entirely, so the presence of a key means there's something left to
/// connect to.
///
/// The index doesn't own the segments; it only stores their [`SegIdx`]s, and
/// looks up their keys in the [`Segments`] it was built from. Segments may be
/// reversed after they're removed from the index, but not before.
#[derive(Clone, Debug)]
pub struct EndpointIndex<F: Float> {
    endpoints: HashMap<EndpointKey<F>, Vec<SegIdx>>,
}

impl<F: Float> EndpointIndex<F> {
    pub fn new(segments: &Segments<F>) -> Self {
        let mut endpoints: HashMap<_, Vec<_>> = HashMap::new();
        for idx in segments.indices() {
            let seg = segments.get(idx);
            endpoints.entry(seg.start_key()).or_default().push(idx);
            endpoints.entry(seg.end_key()).or_default().push(idx);
        }
        Self { endpoints }
    }

    /// The number of distinct endpoints shared by at least two registrations.
    ///
    /// This is purely diagnostic.
    pub fn count_shared_endpoints(&self) -> usize {
        self.endpoints.values().filter(|segs| segs.len() > 1).count()
    }

    /// The number of endpoints that still have segments attached.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn contains(&self, key: &EndpointKey<F>) -> bool {
        self.endpoints.contains_key(key)
    }

    fn unregister(&mut self, key: &EndpointKey<F>, idx: SegIdx) {
        let Some(segs) = self.endpoints.get_mut(key) else {
            debug_assert!(false, "{idx:?} is not registered at {key:?}");
            return;
        };
        // `Vec::remove` rather than `swap_remove`, so that the remaining
        // segments stay in insertion order.
        match segs.iter().position(|s| *s == idx) {
            Some(pos) => {
                segs.remove(pos);
            }
            None => debug_assert!(false, "{idx:?} is not registered at {key:?}"),
        }
        if segs.is_empty() {
            self.endpoints.remove(key);
        }
    }

    /// Removes a segment from both of its endpoints.
    ///
    /// Each segment must be removed at most once.
    pub fn remove(&mut self, segments: &Segments<F>, idx: SegIdx) {
        let seg = segments.get(idx);
        let key = seg.start_key();
        self.unregister(&key, idx);
        self.unregister(&seg.other_key(&key), idx);
    }

    /// If some segment is still registered at `key`, removes it (from both of
    /// its endpoints) and returns it.
    ///
    /// When there are several candidates, the one that was registered first wins.
    pub fn pop_connected_at(
        &mut self,
        segments: &Segments<F>,
        key: &EndpointKey<F>,
    ) -> Option<SegIdx> {
        let idx = *self.endpoints.get(key)?.first()?;
        self.remove(segments, idx);
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::tests::{p, seg};

    fn star() -> Segments<ordered_float::NotNan<f64>> {
        // Three spokes meeting at the origin, plus one disconnected segment.
        [
            seg((0.0, 0.0), (1.0, 0.0), 1.0),
            seg((0.0, 1.0), (0.0, 0.0), 1.0),
            seg((-1.0, 0.0), (0.0, 0.0), 1.0),
            seg((5.0, 5.0), (6.0, 6.0), 1.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn build() {
        let segs = star();
        let index = EndpointIndex::new(&segs);
        assert_eq!(index.len(), 6);
        assert_eq!(index.count_shared_endpoints(), 1);
        assert!(index.contains(&p(0.0, 0.0)));
        assert!(!index.contains(&p(2.0, 0.0)));
    }

    #[test]
    fn remove_drops_empty_keys() {
        let segs = star();
        let mut index = EndpointIndex::new(&segs);
        index.remove(&segs, SegIdx(3));
        assert!(!index.contains(&p(5.0, 5.0)));
        assert!(!index.contains(&p(6.0, 6.0)));

        index.remove(&segs, SegIdx(0));
        assert!(!index.contains(&p(1.0, 0.0)));
        assert!(index.contains(&p(0.0, 0.0)));
        assert_eq!(index.count_shared_endpoints(), 1);

        index.remove(&segs, SegIdx(1));
        assert_eq!(index.count_shared_endpoints(), 0);
        index.remove(&segs, SegIdx(2));
        assert!(index.is_empty());
    }

    #[test]
    fn pop_in_insertion_order() {
        let segs = star();
        let mut index = EndpointIndex::new(&segs);
        let origin = p(0.0, 0.0);
        assert_eq!(index.pop_connected_at(&segs, &origin), Some(SegIdx(0)));
        assert!(!index.contains(&p(1.0, 0.0)));
        assert_eq!(index.pop_connected_at(&segs, &origin), Some(SegIdx(1)));
        assert_eq!(index.pop_connected_at(&segs, &origin), Some(SegIdx(2)));
        assert_eq!(index.pop_connected_at(&segs, &origin), None);
        assert_eq!(index.pop_connected_at(&segs, &p(7.0, 7.0)), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn degenerate() {
        let segs: Segments<_> = [
            seg((1.0, 1.0), (1.0, 1.0), 1.0),
            seg((1.0, 1.0), (2.0, 1.0), 1.0),
        ]
        .into_iter()
        .collect();
        let mut index = EndpointIndex::new(&segs);
        // The zero-length segment counts twice at its point.
        assert_eq!(index.count_shared_endpoints(), 1);

        index.remove(&segs, SegIdx(0));
        assert!(index.contains(&p(1.0, 1.0)));
        assert_eq!(index.count_shared_endpoints(), 0);
        assert_eq!(index.pop_connected_at(&segs, &p(1.0, 1.0)), Some(SegIdx(1)));
        assert!(index.is_empty());
    }
}
