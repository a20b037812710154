//! Errors for weighted selection.
//!
//! Every failure here is a caller error that is detected synchronously,
//! before any state changes. Nothing in this module is transient, so there is
//! nothing to retry.

use thiserror::Error;

/// Coarse classification of a [`SelectionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter was malformed (bad weight, zero count, inverted range).
    InvalidArgument,
    /// A count asked for more items than the population holds.
    OutOfRange,
    /// Sampling was attempted with no items present.
    EmptyPopulation,
}

/// Errors returned by [`WeightedSelector`](crate::WeightedSelector) and
/// [`RangeSelector`](crate::RangeSelector).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// Weight is not finite (NaN/inf).
    #[error("weight must be finite (got {0})")]
    NonFiniteWeight(f64),

    /// Weight is zero or negative.
    #[error("weight must be > 0 (got {0})")]
    NonPositiveWeight(f64),

    /// `select_multiple(0)`.
    #[error("count must be > 0")]
    ZeroCount,

    /// Asked for more distinct items than exist.
    #[error("cannot select {requested} distinct items from a population of {available}")]
    CountExceedsPopulation { requested: usize, available: usize },

    /// Range bounds with `min > max`.
    #[error("invalid range: min ({min}) > max ({max})")]
    InvalidRange { min: u32, max: u32 },

    /// A population size of zero was requested.
    #[error("population size must be >= 1")]
    EmptyPopulationSize,

    /// Weights are individually valid but their sum overflowed.
    #[error("total weight is not finite")]
    NonFiniteTotal,

    /// No items to sample from.
    #[error("cannot sample from an empty population")]
    EmptyPopulation,
}

impl SelectionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NonFiniteWeight(_)
            | Self::NonPositiveWeight(_)
            | Self::ZeroCount
            | Self::InvalidRange { .. }
            | Self::EmptyPopulationSize
            | Self::NonFiniteTotal => ErrorKind::InvalidArgument,
            Self::CountExceedsPopulation { .. } => ErrorKind::OutOfRange,
            Self::EmptyPopulation => ErrorKind::EmptyPopulation,
        }
    }
}

/// Check that `weight` is usable as a selection weight.
pub(crate) fn validate_weight(weight: f64) -> Result<(), SelectionError> {
    if !weight.is_finite() {
        return Err(SelectionError::NonFiniteWeight(weight));
    }
    if weight <= 0.0 {
        return Err(SelectionError::NonPositiveWeight(weight));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_weight_accepts_positive() {
        assert!(validate_weight(1.0).is_ok());
        assert!(validate_weight(1e-300).is_ok());
    }

    #[test]
    fn validate_weight_rejects_bad_values() {
        assert_eq!(
            validate_weight(0.0),
            Err(SelectionError::NonPositiveWeight(0.0))
        );
        assert_eq!(
            validate_weight(-2.5),
            Err(SelectionError::NonPositiveWeight(-2.5))
        );
        assert!(matches!(
            validate_weight(f64::NAN),
            Err(SelectionError::NonFiniteWeight(w)) if w.is_nan()
        ));
        assert_eq!(
            validate_weight(f64::INFINITY),
            Err(SelectionError::NonFiniteWeight(f64::INFINITY))
        );
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            SelectionError::NonPositiveWeight(-1.0).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(SelectionError::ZeroCount.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            SelectionError::InvalidRange { min: 10, max: 5 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            SelectionError::CountExceedsPopulation {
                requested: 3,
                available: 2
            }
            .kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            SelectionError::EmptyPopulation.kind(),
            ErrorKind::EmptyPopulation
        );
    }

    #[test]
    fn messages_are_descriptive() {
        let err = SelectionError::CountExceedsPopulation {
            requested: 6,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "cannot select 6 distinct items from a population of 5"
        );
        assert_eq!(
            SelectionError::NonPositiveWeight(-1.0).to_string(),
            "weight must be > 0 (got -1)"
        );
    }
}
