//! Run parameters, loadable from a TOML file.
//!
//! ```toml
//! grid_size = 1000
//! workers = 4
//! iterations = 500
//! ambient = 20.0
//!
//! [fireplace]
//! start = 300
//! end = 700
//! temperature = 300.0
//! ```
//!
//! Every key is optional except `iterations`, which may also come from the
//! command line.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::grid::{AMBIENT, FIREPLACE_TEMP, N};

/// Fixed-temperature span of global row 0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Fireplace {
    pub start: usize,
    pub end: usize,
    #[serde(default = "default_fireplace_temp")]
    pub temperature: f64,
}

impl Fireplace {
    /// The default span (30%..70% of the width) for a grid of `width` columns.
    pub fn scaled(width: usize) -> Self {
        Fireplace {
            start: width * 3 / 10,
            end: width * 7 / 10,
            temperature: FIREPLACE_TEMP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Zero means "not supplied" and fails validation.
    #[serde(default)]
    pub iterations: usize,
    #[serde(default = "default_ambient")]
    pub ambient: f64,
    /// Explicit heated span; `None` derives one from the grid size.
    #[serde(default)]
    pub fireplace: Option<Fireplace>,
    /// Set to false to run with no boundary source at all.
    #[serde(default = "default_true")]
    pub heat_source: bool,
    /// Collect an intermediate grid every k iterations.
    #[serde(default)]
    pub snapshot_every: Option<usize>,
}

fn default_grid_size() -> usize {
    N
}
fn default_workers() -> usize {
    4
}
fn default_ambient() -> f64 {
    AMBIENT
}
fn default_fireplace_temp() -> f64 {
    FIREPLACE_TEMP
}
fn default_true() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            workers: default_workers(),
            iterations: 0,
            ambient: default_ambient(),
            fireplace: None,
            heat_source: true,
            snapshot_every: None,
        }
    }
}

impl RunConfig {
    pub fn new(grid_size: usize, workers: usize, iterations: usize) -> Self {
        Self {
            grid_size,
            workers,
            iterations,
            ..Self::default()
        }
    }

    /// The boundary source in effect, if any.
    pub fn fireplace(&self) -> Option<Fireplace> {
        if !self.heat_source {
            return None;
        }
        Some(
            self.fireplace
                .unwrap_or_else(|| Fireplace::scaled(self.grid_size)),
        )
    }

    /// Rows owned by each worker.
    pub fn block_rows(&self) -> usize {
        self.grid_size / self.workers
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.workers < 2 {
            return Err(ConfigError::TooFewWorkers(self.workers));
        }
        self.validate_grid()?;
        if self.grid_size % self.workers != 0 {
            return Err(ConfigError::Indivisible {
                grid_size: self.grid_size,
                workers: self.workers,
            });
        }
        Ok(())
    }

    /// Checks that do not depend on the worker count.
    pub fn validate_grid(&self) -> std::result::Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if self.grid_size < 3 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if let Some(fp) = self.fireplace() {
            if fp.start >= fp.end || fp.end > self.grid_size {
                return Err(ConfigError::FireplaceOutOfRange {
                    start: fp.start,
                    end: fp.end,
                    width: self.grid_size,
                });
            }
        }
        Ok(())
    }
}

/// Load a TOML run configuration. The result is not validated yet.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: RunConfig = toml::from_str(&content)?;
    Ok(config)
}
