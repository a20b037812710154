//! Classroom roster: students `1..=size`, optional names, optional weight overrides.
//!
//! This is the file-facing layer around [`RangeSelector`]. It owns its own
//! error type so that file problems (missing file, malformed line) stay
//! distinct from selection errors.
//!
//! File formats:
//! - names: one name per line; line `i` names student `i`.
//! - weights: one `ID,weight` pair per line; blank lines and `#` comments are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::prelude::*;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::error::{validate_weight, SelectionError};
use crate::range::{RangeSelector, DEFAULT_WEIGHT};

/// Errors from building or drawing from a [`Roster`].
#[derive(Debug, Error)]
pub enum RosterError {
    /// A names or weights file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A weights line was not `ID,weight`.
    #[error("line {line}: expected `ID,weight`, got {content:?}")]
    MalformedLine { line: usize, content: String },

    /// A weight override named a student outside `1..=size`.
    #[error("student {id} is not on a roster of {size}")]
    UnknownStudent { id: u32, size: u32 },

    /// The names list does not have one entry per student.
    #[error("expected {expected} names, found {found}")]
    NameCountMismatch { expected: u32, found: usize },

    /// Names were requested but none were loaded.
    #[error("roster has no student names")]
    NoNames,

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Students `1..=size` with weights and optional display names.
#[derive(Debug, Clone)]
pub struct Roster<R = StdRng> {
    size: u32,
    selector: RangeSelector<R>,
    names: Option<Vec<String>>,
}

impl Roster<StdRng> {
    /// A roster of `size` equally weighted students, seeded from OS entropy.
    pub fn new(size: u32) -> Result<Self, RosterError> {
        Self::with_rng(size, DEFAULT_WEIGHT, StdRng::from_os_rng())
    }
}

impl<R: Rng> Roster<R> {
    /// A roster of `size` students at `default_weight`, drawing from `rng`.
    pub fn with_rng(size: u32, default_weight: f64, rng: R) -> Result<Self, RosterError> {
        let selector = RangeSelector::population_with_rng(size, default_weight, rng)?;
        Ok(Self {
            size,
            selector,
            names: None,
        })
    }

    /// Number of students.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether display names are loaded.
    pub fn has_names(&self) -> bool {
        self.names.is_some()
    }

    /// Display name of student `id`, if names are loaded.
    pub fn name(&self, id: u32) -> Option<&str> {
        let idx = usize::try_from(id.checked_sub(1)?).ok()?;
        self.names.as_ref()?.get(idx).map(String::as_str)
    }

    /// The underlying selector.
    pub fn selector(&self) -> &RangeSelector<R> {
        &self.selector
    }

    /// Mutable access to the underlying selector.
    pub fn selector_mut(&mut self) -> &mut RangeSelector<R> {
        &mut self.selector
    }

    /// Attach display names, one per student.
    ///
    /// # Errors
    ///
    /// [`RosterError::NameCountMismatch`] unless there are exactly `size` names.
    pub fn set_names(&mut self, names: Vec<String>) -> Result<(), RosterError> {
        if names.len() != self.size as usize {
            return Err(RosterError::NameCountMismatch {
                expected: self.size,
                found: names.len(),
            });
        }
        self.names = Some(names);
        Ok(())
    }

    /// Override the weight of student `id`.
    pub fn set_weight(&mut self, id: u32, weight: f64) -> Result<(), RosterError> {
        self.check_id(id)?;
        self.selector.add_or_update_weight(id, weight)?;
        Ok(())
    }

    /// Apply a batch of weight overrides.
    ///
    /// The whole batch is validated first; on error nothing is applied.
    pub fn apply_weights(&mut self, overrides: &[(u32, f64)]) -> Result<(), RosterError> {
        for &(id, weight) in overrides {
            self.check_id(id)?;
            validate_weight(weight)?;
        }
        for &(id, weight) in overrides {
            self.selector.add_or_update_weight(id, weight)?;
        }
        debug!("applied {} weight overrides", overrides.len());
        Ok(())
    }

    /// Read names from `path` (see [`parse_names`]) and attach them.
    pub fn load_names(&mut self, path: impl AsRef<Path>) -> Result<(), RosterError> {
        let path = path.as_ref();
        let names = parse_names(&read(path)?);
        self.set_names(names)?;
        info!("loaded {} names from {}", self.size, path.display());
        Ok(())
    }

    /// Read weight overrides from `path` (see [`parse_weights`]) and apply them.
    pub fn load_weights(&mut self, path: impl AsRef<Path>) -> Result<(), RosterError> {
        let path = path.as_ref();
        let overrides = parse_weights(&read(path)?)?;
        if overrides.is_empty() {
            warn!("{} contains no weight overrides", path.display());
        }
        self.apply_weights(&overrides)?;
        info!(
            "loaded {} weight overrides from {}",
            overrides.len(),
            path.display()
        );
        Ok(())
    }

    /// Draw `count` distinct students, returned in ascending ID order.
    pub fn draw_ids(&mut self, count: usize) -> Result<Vec<u32>, RosterError> {
        let mut ids: Vec<u32> = self.selector.select_multiple(count)?.collect();
        ids.sort_unstable();
        debug!("drew {ids:?}");
        Ok(ids)
    }

    /// Draw `count` distinct students as `"NN name"` labels, in ID order.
    ///
    /// # Errors
    ///
    /// [`RosterError::NoNames`] if no names are loaded.
    pub fn draw_names(&mut self, count: usize) -> Result<Vec<String>, RosterError> {
        if !self.has_names() {
            return Err(RosterError::NoNames);
        }
        let ids = self.draw_ids(count)?;
        Ok(ids.into_iter().map(|id| self.label(id)).collect())
    }

    /// Draw `count` students as display labels: names if loaded, otherwise
    /// zero-padded IDs.
    pub fn draw_labels(&mut self, count: usize) -> Result<Vec<String>, RosterError> {
        let ids = self.draw_ids(count)?;
        Ok(ids.into_iter().map(|id| self.label(id)).collect())
    }

    fn label(&self, id: u32) -> String {
        match self.name(id) {
            Some(name) => format!("{id:02} {name}"),
            None => format!("{id:02}"),
        }
    }

    fn check_id(&self, id: u32) -> Result<(), RosterError> {
        if (1..=self.size).contains(&id) {
            Ok(())
        } else {
            Err(RosterError::UnknownStudent {
                id,
                size: self.size,
            })
        }
    }
}

/// Parse a names file: one name per line, trailing blank lines dropped.
pub fn parse_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = text.lines().map(|l| l.trim().to_string()).collect();
    while names.last().is_some_and(|n| n.is_empty()) {
        names.pop();
    }
    names
}

/// Parse a weights file of `ID,weight` lines.
///
/// Weight validity (positive, finite) is checked when the overrides are
/// applied, not here.
pub fn parse_weights(text: &str) -> Result<Vec<(u32, f64)>, RosterError> {
    let mut out = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = || RosterError::MalformedLine {
            line: i + 1,
            content: raw.to_string(),
        };
        let (id, weight) = line.split_once(',').ok_or_else(malformed)?;
        let id: u32 = id.trim().parse().map_err(|_| malformed())?;
        let weight: f64 = weight.trim().parse().map_err(|_| malformed())?;
        out.push((id, weight));
    }
    Ok(out)
}

/// Zero-pad IDs to two digits and join them with `separator`.
pub fn format_ids(ids: &[u32], separator: &str) -> String {
    ids.iter()
        .map(|id| format!("{id:02}"))
        .collect::<Vec<_>>()
        .join(separator)
}

fn read(path: &Path) -> Result<String, RosterError> {
    fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })
}
