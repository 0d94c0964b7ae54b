use serde::{Deserialize, Serialize};

use crate::{error::Error, num::Float};

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> std::fmt::Debug for Point<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl<F: Float> Point<F> {
    pub fn new(x: F, y: F) -> Self {
        Point { x, y }
    }

    /// Rounds both coordinates to the nearest multiple of `pitch`.
    pub fn snapped(&self, pitch: &F) -> Self {
        Point {
            x: self.x.snap(pitch),
            y: self.y.snap(pitch),
        }
    }
}

impl<F: Float> From<(F, F)> for Point<F> {
    fn from((x, y): (F, F)) -> Self {
        Self { x, y }
    }
}

/// The key under which an endpoint is looked up.
///
/// Two endpoints are considered to be the same point exactly when their keys
/// are equal, which (since our numeric types compare exactly) means that their
/// coordinates are exactly equal. Endpoints that differ by a rounding error
/// will not be matched; see `Options::tolerance` for a way around that.
///
/// The one exception is the sign of zero: `-0.0` and `0.0` compare equal, so
/// `(-0.0, 1.0)` and `(0.0, 1.0)` are the same key. Tools that key points by
/// their textual form would keep those apart.
pub type EndpointKey<F> = Point<F>;

/// One of the two ends of a segment or of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Start,
    End,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Start => Direction::End,
            Direction::End => Direction::Start,
        }
    }
}

/// A straight line with a stroke width.
///
/// Unlike the segments in a sweep-line algorithm, these are not normalized: the
/// start point can be anywhere relative to the end point, and the only way the
/// orientation changes is through [`Segment::reverse`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment<F: Float> {
    start: Point<F>,
    end: Point<F>,
    width: F,
}

impl<F: Float> std::fmt::Debug for Segment<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?} (w {:?})", self.start, self.end, self.width)
    }
}

impl<F: Float> Segment<F> {
    pub fn new(start: impl Into<Point<F>>, end: impl Into<Point<F>>, width: F) -> Self {
        Segment {
            start: start.into(),
            end: end.into(),
            width,
        }
    }

    /// Builds a segment out of raw values, as they come out of a document parser.
    ///
    /// Fails if any value is NaN, or if the width is negative or infinite.
    pub fn try_new(x1: f64, y1: f64, x2: f64, y2: f64, width: f64) -> Result<Self, Error> {
        let coord = |field, value| {
            F::try_from_f64(value).ok_or(Error::MalformedSegment { field, value })
        };
        let start = Point::new(coord("x1", x1)?, coord("y1", y1)?);
        let end = Point::new(coord("x2", x2)?, coord("y2", y2)?);
        let width = coord("stroke-width", width)?;
        if !width.is_finite() || width.to_f64() < 0.0 {
            return Err(Error::MalformedSegment {
                field: "stroke-width",
                value: width.to_f64(),
            });
        }
        Ok(Segment { start, end, width })
    }

    pub fn start(&self) -> &Point<F> {
        &self.start
    }

    pub fn end(&self) -> &Point<F> {
        &self.end
    }

    pub fn width(&self) -> &F {
        &self.width
    }

    pub fn start_key(&self) -> EndpointKey<F> {
        self.start.clone()
    }

    pub fn end_key(&self) -> EndpointKey<F> {
        self.end.clone()
    }

    pub fn endpoint_key(&self, direction: Direction) -> EndpointKey<F> {
        match direction {
            Direction::Start => self.start_key(),
            Direction::End => self.end_key(),
        }
    }

    /// Given the key of one of our endpoints, returns the key of the other one.
    ///
    /// If we are degenerate (both endpoints the same), this is just `key` again.
    pub fn other_key(&self, key: &EndpointKey<F>) -> EndpointKey<F> {
        if &self.start == key {
            self.end_key()
        } else {
            self.start_key()
        }
    }

    /// Is this a zero-length segment?
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Swaps the start and end points.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    /// Returns a copy of this segment with both endpoints rounded to a grid of the
    /// given pitch. The width is left alone.
    pub fn snapped(&self, pitch: &F) -> Self {
        Segment {
            start: self.start.snapped(pitch),
            end: self.end.snapped(pitch),
            width: self.width.clone(),
        }
    }
}
