/// Errors reported at the boundary of the library.
///
/// Chaining itself never fails: running out of connected segments is how a
/// chain ends, not an error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A raw coordinate or stroke width could not be turned into a segment.
    #[error("malformed segment: `{field}` is {value}")]
    MalformedSegment { field: &'static str, value: f64 },

    #[error("tolerance must be positive and finite, got {value}")]
    InvalidTolerance { value: f64 },
}
