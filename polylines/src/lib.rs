//! Reconstructs polylines out of disconnected line segments.
//!
//! Vector graphics exporters often write every straight piece of a path as its own
//! line element. [`polylinize`] glues such pieces back together: segments with the
//! same stroke width whose endpoints coincide are chained into a single [`Polyline`].

mod chain;
mod endpoints;
mod error;
mod geom;
mod num;
mod polylinize;
mod segments;

pub use chain::{Chain, Polyline};
pub use endpoints::EndpointIndex;
pub use error::Error;
pub use geom::{Direction, EndpointKey, Point, Segment};
pub use num::Float;
pub use polylinize::{polylinize, BucketReport, Options, Polylines};
pub use segments::{SegIdx, Segments};
