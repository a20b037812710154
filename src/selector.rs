//! Weighted random selection over a mutable population.
//!
//! [`WeightedSelector`] keeps an authoritative `item -> weight` map plus the
//! insertion order of the items. Single draws use a prefix-sum (cumulative
//! weight) array and a binary search, so a draw is O(log n) once the array is
//! current. The array is a derived cache: every mutation marks it stale and the
//! next draw rebuilds it in O(n). Writes never rebuild it.
//!
//! Multi-draws sample **without replacement**: each successive draw is
//! proportional to weight among the items not yet drawn. For \(k>1\) this is the
//! successive-sampling (Plackett–Luce) distribution, not "top-k by one weighted
//! key".
//!
//! Notes:
//! - The generator is owned by the selector and injected through
//!   [`WeightedSelector::with_rng`] for deterministic testing.
//! - No internal locking. Callers that share a selector across threads must
//!   serialize access themselves.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use log::debug;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::{validate_weight, SelectionError};

/// A weighted population of distinct items.
///
/// Invariants:
/// - `items` and the keys of `weights` hold the same set, with no duplicates.
/// - every stored weight is finite and `> 0`.
/// - when `dirty` is false, `cumulative[i]` is the prefix sum of weights up to
///   `items[i]` and `total` equals its last entry.
#[derive(Clone)]
pub struct WeightedSelector<T, R = StdRng> {
    rng: R,
    weights: HashMap<T, f64>,
    items: Vec<T>,
    cumulative: Vec<f64>,
    total: f64,
    dirty: bool,
}

impl<T: Eq + Hash + Clone> WeightedSelector<T, StdRng> {
    /// Create an empty selector seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create an empty selector with a reproducible seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<T: Eq + Hash + Clone> Default for WeightedSelector<T, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone, R: Rng> WeightedSelector<T, R> {
    /// Create an empty selector that draws from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            weights: HashMap::new(),
            items: Vec::new(),
            cumulative: Vec::new(),
            total: 0.0,
            dirty: false,
        }
    }

    /// Insert `item` with `weight`, or overwrite the weight of an existing item.
    ///
    /// New items are appended to the iteration order. Updating an existing item
    /// keeps its position.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::NonPositiveWeight`] or
    /// [`SelectionError::NonFiniteWeight`] and leaves the selector untouched.
    pub fn add_or_update_weight(&mut self, item: T, weight: f64) -> Result<(), SelectionError> {
        validate_weight(weight)?;

        match self.weights.entry(item) {
            Entry::Occupied(mut slot) => {
                slot.insert(weight);
            }
            Entry::Vacant(slot) => {
                self.items.push(slot.key().clone());
                slot.insert(weight);
            }
        }

        self.dirty = true;
        Ok(())
    }

    /// Remove `item`, returning its weight if it was present.
    ///
    /// Removing an absent item is a no-op.
    pub fn remove<Q>(&mut self, item: &Q) -> Option<f64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let weight = self.weights.remove(item)?;
        if let Some(pos) = self.items.iter().position(|x| x.borrow() == item) {
            self.items.remove(pos);
        }
        self.dirty = true;
        Some(weight)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.weights.clear();
        self.items.clear();
        self.cumulative.clear();
        self.total = 0.0;
        self.dirty = false;
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `item` is a member.
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.weights.contains_key(item)
    }

    /// Current weight of `item`.
    pub fn weight<Q>(&self, item: &Q) -> Option<f64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.weights.get(item).copied()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        if self.dirty {
            self.iter().map(|(_, w)| w).sum()
        } else {
            self.total
        }
    }

    /// `(item, weight)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.items.iter().map(move |item| (item, self.weights[item]))
    }

    /// Rebuild the cumulative-weight cache if a mutation made it stale.
    fn refresh(&mut self) {
        if !self.dirty {
            return;
        }

        self.cumulative.clear();
        self.cumulative.reserve(self.items.len());

        let mut running = 0.0;
        for item in &self.items {
            running += self.weights[item];
            self.cumulative.push(running);
        }

        self.total = running;
        self.dirty = false;
        debug!(
            "recomputed cumulative weights: items={} total={}",
            self.items.len(),
            self.total
        );
    }

    /// Draw one item with probability `weight(item) / total_weight()`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::EmptyPopulation`] when there is nothing to draw,
    /// or [`SelectionError::NonFiniteTotal`] if the weights sum past `f64::MAX`.
    pub fn select_one(&mut self) -> Result<T, SelectionError> {
        if self.items.is_empty() {
            return Err(SelectionError::EmptyPopulation);
        }

        self.refresh();
        if !self.total.is_finite() {
            return Err(SelectionError::NonFiniteTotal);
        }

        let target = self.rng.random_range(0.0..self.total);
        // First cumulative entry >= target. The clamp only matters if rounding
        // pushed `target` onto the last boundary.
        let idx = self
            .cumulative
            .partition_point(|&c| c < target)
            .min(self.items.len() - 1);

        Ok(self.items[idx].clone())
    }

    /// Draw `count` distinct items without replacement.
    ///
    /// At each step the probability of picking a remaining item is its weight
    /// divided by the total weight still remaining. Validation is eager: the
    /// iterator is only returned once `count` is known to be satisfiable. The
    /// draws themselves happen lazily as the iterator is consumed, against a
    /// private copy of the population, so the selector's own weights are never
    /// modified by sampling.
    ///
    /// Calling this again performs fresh draws.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::EmptyPopulation`] if the selector is empty.
    /// - [`SelectionError::ZeroCount`] if `count == 0`.
    /// - [`SelectionError::CountExceedsPopulation`] if `count > self.len()`.
    pub fn select_multiple(
        &mut self,
        count: usize,
    ) -> Result<SelectMultiple<'_, T, R>, SelectionError> {
        let available = self.items.len();
        if available == 0 {
            return Err(SelectionError::EmptyPopulation);
        }
        if count == 0 {
            return Err(SelectionError::ZeroCount);
        }
        if count > available {
            return Err(SelectionError::CountExceedsPopulation {
                requested: count,
                available,
            });
        }
        if !self.total_weight().is_finite() {
            return Err(SelectionError::NonFiniteTotal);
        }

        let pool: Vec<(T, f64)> = self.iter().map(|(item, w)| (item.clone(), w)).collect();
        debug!("multi-draw: count={count} population={available}");

        Ok(SelectMultiple {
            rng: &mut self.rng,
            pool,
            remaining: count,
        })
    }
}

impl<T: fmt::Debug, R> fmt::Debug for WeightedSelector<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedSelector")
            .field("items", &self.items)
            .field("weights", &self.weights)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

/// Lazy sequence of draws produced by [`WeightedSelector::select_multiple`].
///
/// Yields exactly the requested number of distinct items.
pub struct SelectMultiple<'a, T, R> {
    rng: &'a mut R,
    pool: Vec<(T, f64)>,
    remaining: usize,
}

impl<T, R: Rng> Iterator for SelectMultiple<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 || self.pool.is_empty() {
            return None;
        }

        let total: f64 = self.pool.iter().map(|(_, w)| w).sum();
        let target = self.rng.random_range(0.0..total);

        // Linear scan: the pool is small and shrinks every step.
        let mut idx = self.pool.len() - 1;
        let mut running = 0.0;
        for (i, (_, w)) in self.pool.iter().enumerate() {
            running += w;
            if running >= target {
                idx = i;
                break;
            }
        }

        self.remaining -= 1;
        Some(self.pool.remove(idx).0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, R: Rng> ExactSizeIterator for SelectMultiple<'_, T, R> {}

impl<T, R: Rng> FusedIterator for SelectMultiple<'_, T, R> {}

impl<T: fmt::Debug, R> fmt::Debug for SelectMultiple<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectMultiple")
            .field("pool", &self.pool)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
