//! Selector pre-populated with a contiguous integer range.
//!
//! Models "student IDs `min..=max`, all equally likely unless overridden".
//! After construction a [`RangeSelector`] behaves exactly like a
//! [`WeightedSelector<u32>`]: it derefs to one, and any weight can be
//! overridden individually.

use std::ops::{Deref, DerefMut, RangeInclusive};

use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::{validate_weight, SelectionError};
use crate::selector::WeightedSelector;

/// Weight given to every member of the range unless told otherwise.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A [`WeightedSelector`] over `min..=max`.
#[derive(Debug, Clone)]
pub struct RangeSelector<R = StdRng> {
    min: u32,
    max: u32,
    inner: WeightedSelector<u32, R>,
}

impl RangeSelector<StdRng> {
    /// `min..=max`, each at [`DEFAULT_WEIGHT`], seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// [`SelectionError::InvalidRange`] if `min > max`.
    pub fn new(min: u32, max: u32) -> Result<Self, SelectionError> {
        Self::with_default_weight(min, max, DEFAULT_WEIGHT)
    }

    /// `min..=max`, each at `default_weight`.
    pub fn with_default_weight(
        min: u32,
        max: u32,
        default_weight: f64,
    ) -> Result<Self, SelectionError> {
        Self::with_rng(min, max, default_weight, StdRng::from_os_rng())
    }

    /// `1..=size` at [`DEFAULT_WEIGHT`].
    ///
    /// # Errors
    ///
    /// [`SelectionError::EmptyPopulationSize`] if `size == 0`.
    pub fn population(size: u32) -> Result<Self, SelectionError> {
        Self::population_with_weight(size, DEFAULT_WEIGHT)
    }

    /// `1..=size` at `default_weight`.
    pub fn population_with_weight(size: u32, default_weight: f64) -> Result<Self, SelectionError> {
        Self::population_with_rng(size, default_weight, StdRng::from_os_rng())
    }
}

impl<R: Rng> RangeSelector<R> {
    /// `min..=max`, each at `default_weight`, drawing from `rng`.
    ///
    /// Both arguments are validated before any item is created.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::InvalidRange`] if `min > max`.
    /// - [`SelectionError::NonPositiveWeight`] / [`SelectionError::NonFiniteWeight`]
    ///   for a bad `default_weight`.
    pub fn with_rng(
        min: u32,
        max: u32,
        default_weight: f64,
        rng: R,
    ) -> Result<Self, SelectionError> {
        if min > max {
            return Err(SelectionError::InvalidRange { min, max });
        }
        validate_weight(default_weight)?;

        let mut inner = WeightedSelector::with_rng(rng);
        for id in min..=max {
            inner.add_or_update_weight(id, default_weight)?;
        }
        debug!("range selector over {min}..={max} at weight {default_weight}");

        Ok(Self { min, max, inner })
    }

    /// `1..=size` at `default_weight`, drawing from `rng`.
    pub fn population_with_rng(
        size: u32,
        default_weight: f64,
        rng: R,
    ) -> Result<Self, SelectionError> {
        if size == 0 {
            return Err(SelectionError::EmptyPopulationSize);
        }
        Self::with_rng(1, size, default_weight, rng)
    }

    /// Lower bound the selector was built with.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound the selector was built with.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// The range the selector was built with.
    ///
    /// Items may since have been removed or added; this does not track them.
    pub fn bounds(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    /// Unwrap into the general selector.
    pub fn into_inner(self) -> WeightedSelector<u32, R> {
        self.inner
    }
}

impl<R> Deref for RangeSelector<R> {
    type Target = WeightedSelector<u32, R>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<R> DerefMut for RangeSelector<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
