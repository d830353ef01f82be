//! Path sanitizer: rewrites path data so it satisfies the output format (one move, whitelisted
//! commands, normalized numbers, closed, bounded size).
//!
//! The work is split into an ordered list of [RepairStage]s. Each stage either repairs the working
//! copy (recording a [Repair]) or fails with a [SanitizeError]; [Sanitizer::run] reports which
//! stage failed. The pipeline is deterministic and idempotent on its output.
pub mod command;
pub mod extract;
mod stages;

pub use extract::ExtractionStrategy;
pub use stages::*;

use crate::{error::SanitizeError, path::SubPath};
use command::WorkingPath;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for [Sanitizer].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct SanitizeOptions {
    /// Maximum serialized size of path data in bytes.
    pub max_path_bytes: usize,
    /// Decimal places numbers are rounded to.
    pub decimal_places: u32,
    /// Values with a smaller magnitude (after rounding) are written as `0`, also used when
    /// comparing the first and last points for closure.
    pub near_zero_eps: f64,
    /// Number of commands kept by the bounded window extraction fallback.
    pub window_commands: usize,
    /// Substitute a minimal rectangle when no subpath can be extracted, otherwise fail with
    /// [SanitizeError::NoUsableSubpath].
    pub rectangle_fallback: bool,
}

impl SanitizeOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            max_path_bytes: 2048,
            decimal_places: 3,
            near_zero_eps: 5e-4,
            window_commands: 32,
            rectangle_fallback: true,
        }
    }
}

impl Default for SanitizeOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Stage of the sanitize pipeline, reported with failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SanitizeStage {
    MoveCheck,
    QuadraticRemoval,
    SingleSubpath,
    Closure,
    SizeLimit,
    Whitelist,
    NumericNormalization,
    FinalRecheck,
}

impl fmt::Display for SanitizeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SanitizeStage::MoveCheck => "move check",
            SanitizeStage::QuadraticRemoval => "quadratic removal",
            SanitizeStage::SingleSubpath => "single subpath",
            SanitizeStage::Closure => "closure",
            SanitizeStage::SizeLimit => "size limit",
            SanitizeStage::Whitelist => "whitelist",
            SanitizeStage::NumericNormalization => "numeric normalization",
            SanitizeStage::FinalRecheck => "final recheck",
        };
        f.write_str(s)
    }
}

/// Non-fatal change made while sanitizing.
#[derive(Debug, Clone, PartialEq)]
pub enum Repair {
    QuadraticRemoved {
        count: usize,
    },
    SubpathExtracted {
        strategy: ExtractionStrategy,
        discarded_moves: usize,
    },
    CloseAppended,
    CharactersStripped {
        count: usize,
    },
    NumbersNormalized {
        count: usize,
    },
}

/// Sanitized path data and the repairs that were needed.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedPath {
    pub d: String,
    pub repairs: Vec<Repair>,
}

impl SanitizedPath {
    /// True if the minimal rectangle replaced the geometry.
    pub fn used_rectangle_fallback(&self) -> bool {
        self.repairs.iter().any(|r| {
            matches!(
                r,
                Repair::SubpathExtracted {
                    strategy: ExtractionStrategy::MinimalRectangle,
                    ..
                }
            )
        })
    }
}

/// Sanitize failure with the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} stage failed: {source}")]
pub struct StageFailure {
    pub stage: SanitizeStage,
    #[source]
    pub source: SanitizeError,
}

/// Runs path data through the repair stages.
pub struct Sanitizer {
    options: SanitizeOptions,
    stages: Vec<Box<dyn RepairStage>>,
}

impl Sanitizer {
    /// Sanitizer with the standard stages in order.
    pub fn new(options: SanitizeOptions) -> Self {
        Self::with_stages(options, standard_stages())
    }

    pub fn with_stages(options: SanitizeOptions, stages: Vec<Box<dyn RepairStage>>) -> Self {
        Sanitizer { options, stages }
    }

    #[inline]
    pub fn options(&self) -> &SanitizeOptions {
        &self.options
    }

    pub fn run(&self, data: &str) -> Result<SanitizedPath, StageFailure> {
        let mut path = WorkingPath::tokenize(data);
        let mut repairs = Vec::new();
        for stage in self.stages.iter() {
            path = stage
                .apply(path, &self.options, &mut repairs)
                .map_err(|source| StageFailure {
                    stage: stage.stage(),
                    source,
                })?;
        }

        Ok(SanitizedPath {
            d: path.to_path_data(self.options.decimal_places),
            repairs,
        })
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(SanitizeOptions::new())
    }
}

/// Sanitize path data with the standard stages.
///
/// # Examples
///
/// ```
/// # use shape_boolean::sanitize::*;
/// let options = SanitizeOptions::new();
/// let result = sanitize("M0 0 L10.00049 0 L10 10 M50 50 L51 51", &options).unwrap();
/// assert_eq!(result.d, "M0 0 L10 0 L10 10 Z");
/// ```
pub fn sanitize(data: &str, options: &SanitizeOptions) -> Result<SanitizedPath, SanitizeError> {
    Sanitizer::new(*options)
        .run(data)
        .map_err(|failure| failure.source)
}

/// Sanitize a subpath by writing it as absolute path data first.
pub fn sanitize_subpath(
    subpath: &SubPath,
    options: &SanitizeOptions,
) -> Result<SanitizedPath, SanitizeError> {
    sanitize(&subpath.to_path_data(options.decimal_places), options)
}
