//! A thin abstraction over the different numerical types we support.

use std::hash::Hash;

use ordered_float::NotNan;

/// A trait for abstracting over the properties we need from numerical types.
///
/// This is implemented for `NotNan<f64>` and `NotNan<f32>`. Equality, ordering and
/// hashing are all exact: two values are "the same" only if they are bit-for-bit
/// the same number (except that `-0.0` and `0.0` are identified).
pub trait Float: Sized + Clone + std::fmt::Debug + Ord + Eq + Hash + Send + Sync + 'static {
    /// Converts a raw value, returning `None` if it is NaN.
    fn try_from_f64(x: f64) -> Option<Self>;

    fn to_f64(&self) -> f64;

    fn is_finite(&self) -> bool {
        self.to_f64().is_finite()
    }

    /// Rounds to the nearest multiple of `pitch`.
    ///
    /// `pitch` must be positive and finite.
    fn snap(&self, pitch: &Self) -> Self;
}

impl Float for NotNan<f32> {
    fn try_from_f64(x: f64) -> Option<Self> {
        NotNan::new(x as f32).ok()
    }

    fn to_f64(&self) -> f64 {
        f64::from(self.into_inner())
    }

    fn snap(&self, pitch: &Self) -> Self {
        let pitch = pitch.into_inner();
        NotNan::new((self.into_inner() / pitch).round() * pitch).unwrap_or(*self)
    }
}

impl Float for NotNan<f64> {
    fn try_from_f64(x: f64) -> Option<Self> {
        NotNan::new(x).ok()
    }

    fn to_f64(&self) -> f64 {
        self.into_inner()
    }

    fn snap(&self, pitch: &Self) -> Self {
        let pitch = pitch.into_inner();
        NotNan::new((self.into_inner() / pitch).round() * pitch).unwrap_or(*self)
    }
}
