//! Grouping segments by stroke width and chaining each group into polylines.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    chain::{Chain, Polyline},
    endpoints::EndpointIndex,
    error::Error,
    geom::{Direction, Segment},
    num::Float,
    segments::{SegIdx, Segments},
};

/// Knobs for [`polylinize`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options<F: Float> {
    /// If set, every endpoint is first rounded to a grid with this pitch, so
    /// endpoints that are within the same grid cell get connected.
    ///
    /// By default endpoints are only connected if they're exactly equal.
    pub tolerance: Option<F>,
    /// Process the stroke widths in parallel. This doesn't change the output.
    pub parallel: bool,
}

impl<F: Float> Default for Options<F> {
    fn default() -> Self {
        Self {
            tolerance: None,
            parallel: false,
        }
    }
}

impl<F: Float> Options<F> {
    pub fn with_tolerance(tolerance: F) -> Self {
        Self {
            tolerance: Some(tolerance),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        match &self.tolerance {
            Some(t) if !t.is_finite() || t.to_f64() <= 0.0 => {
                Err(Error::InvalidTolerance { value: t.to_f64() })
            }
            _ => Ok(()),
        }
    }
}

/// What happened to the segments of one stroke width.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketReport<F: Float> {
    pub width: F,
    pub segments: usize,
    /// Endpoints touched by more than one segment, before chaining started.
    pub shared_endpoints: usize,
    pub polylines: usize,
}

/// The output of [`polylinize`].
///
/// Polylines come grouped by stroke width, in increasing order of width.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Polylines<F: Float> {
    pub polylines: Vec<Polyline<F>>,
    pub buckets: Vec<BucketReport<F>>,
}

impl<F: Float> Polylines<F> {
    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polyline<F>> {
        self.polylines.iter()
    }

    /// The total number of segments, over all polylines.
    pub fn segment_count(&self) -> usize {
        self.polylines.iter().map(Polyline::len).sum()
    }
}

impl<F: Float> IntoIterator for Polylines<F> {
    type Item = Polyline<F>;
    type IntoIter = std::vec::IntoIter<Polyline<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.polylines.into_iter()
    }
}

impl<'a, F: Float> IntoIterator for &'a Polylines<F> {
    type Item = &'a Polyline<F>;
    type IntoIter = std::slice::Iter<'a, Polyline<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.polylines.iter()
    }
}

/// All the segments of one stroke width, together with the bookkeeping for
/// chaining them.
struct Bucket<F: Float> {
    width: F,
    segments: Segments<F>,
    index: EndpointIndex<F>,
    /// Segments that don't belong to a polyline yet.
    unassigned: BTreeSet<SegIdx>,
}

impl<F: Float> Bucket<F> {
    fn new(width: F, segments: Segments<F>) -> Self {
        let index = EndpointIndex::new(&segments);
        let unassigned = segments.indices().collect();
        Bucket {
            width,
            segments,
            index,
            unassigned,
        }
    }

    /// Starts a new polyline at the most recently added segment that's still
    /// unassigned, and grows it in both directions.
    fn next_polyline(&mut self) -> Option<Polyline<F>> {
        let root = self.unassigned.pop_last()?;
        self.index.remove(&self.segments, root);

        let mut chain = Chain::new(root);
        for direction in [Direction::Start, Direction::End] {
            chain.extend(
                direction,
                &mut self.segments,
                &mut self.index,
                &mut self.unassigned,
            );
        }
        debug!("chained {} segment(s) starting from {root:?}", chain.len());
        Some(Polyline::from_chain(
            &chain,
            &self.segments,
            self.width.clone(),
        ))
    }

    fn run(mut self) -> (BucketReport<F>, Vec<Polyline<F>>) {
        let segments = self.segments.len();
        let shared_endpoints = self.index.count_shared_endpoints();
        info!(
            "stroke width {:?}: {segments} line segments, {shared_endpoints} overlapping points",
            self.width
        );

        let polylines: Vec<_> = std::iter::from_fn(|| self.next_polyline()).collect();
        debug_assert!(self.index.is_empty());
        info!(
            "stroke width {:?}: {} polylines",
            self.width,
            polylines.len()
        );

        let report = BucketReport {
            width: self.width,
            segments,
            shared_endpoints,
            polylines: polylines.len(),
        };
        (report, polylines)
    }
}

/// Merges chains of segments that share endpoints into polylines.
///
/// Segments are first split up by stroke width, and only segments with exactly
/// the same width are ever merged. Within a width, we repeatedly pick a segment
/// that isn't part of a polyline yet and greedily extend it from both ends, by
/// attaching (and if necessary reversing) any unused segment that touches the
/// current end. Every input segment ends up in exactly one output polyline.
///
/// Where more than two segments meet at a point, the polyline passing through
/// that point takes the segment that came first in the input; the others will
/// start or end polylines of their own.
pub fn polylinize<F: Float>(
    segments: impl IntoIterator<Item = Segment<F>>,
    options: &Options<F>,
) -> Result<Polylines<F>, Error> {
    options.validate()?;

    let mut by_width: BTreeMap<F, Segments<F>> = BTreeMap::new();
    let mut total = 0;
    for seg in segments {
        let seg = match &options.tolerance {
            Some(pitch) => seg.snapped(pitch),
            None => seg,
        };
        by_width.entry(seg.width().clone()).or_default().push(seg);
        total += 1;
    }
    info!(
        "{total} line segments found, {} different stroke widths",
        by_width.len()
    );

    let buckets: Vec<_> = by_width
        .into_iter()
        .map(|(width, segs)| Bucket::new(width, segs))
        .collect();
    let results: Vec<_> = if options.parallel {
        buckets.into_par_iter().map(Bucket::run).collect()
    } else {
        buckets.into_iter().map(Bucket::run).collect()
    };

    let mut ret = Polylines {
        polylines: Vec::new(),
        buckets: Vec::with_capacity(results.len()),
    };
    for (report, polylines) in results {
        ret.buckets.push(report);
        ret.polylines.extend(polylines);
    }
    info!("{} polyline(s) found in total", ret.len());
    Ok(ret)
}
