use crate::{
    error::BooleanError,
    path::{CompoundPath, FlattenOptions},
    polygon::BooleanOptions,
};
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operation requested between two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Operation {
    Union,
    Intersect,
    /// First shape with the second removed.
    Subtract,
    /// Symmetric difference.
    Exclude,
    /// Disjoint parts: first only, second only and the shared area.
    Fragment,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Union,
        Operation::Intersect,
        Operation::Subtract,
        Operation::Exclude,
        Operation::Fragment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Union => "union",
            Operation::Intersect => "intersect",
            Operation::Subtract => "subtract",
            Operation::Exclude => "exclude",
            Operation::Fragment => "fragment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = BooleanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == lower)
            .ok_or_else(|| BooleanError::input(format!("unknown operation '{s}'")))
    }
}

/// Result of a boolean operation, before sanitizing.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    /// No area remains.
    Empty,
    /// One connected region.
    Single(CompoundPath),
    /// Several disjoint regions.
    Fragments(Vec<CompoundPath>),
}

impl OperationResult {
    /// Classify result parts by count.
    pub fn from_parts(mut parts: Vec<CompoundPath>) -> Self {
        match parts.len() {
            0 => OperationResult::Empty,
            1 => OperationResult::Single(parts.remove(0)),
            _ => OperationResult::Fragments(parts),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, OperationResult::Empty)
    }

    #[inline]
    pub fn is_disconnected(&self) -> bool {
        matches!(self, OperationResult::Fragments(_))
    }

    pub fn parts(&self) -> &[CompoundPath] {
        match self {
            OperationResult::Empty => &[],
            OperationResult::Single(c) => std::slice::from_ref(c),
            OperationResult::Fragments(parts) => parts,
        }
    }

    /// Summed area of all parts.
    pub fn area(&self, options: &FlattenOptions) -> f64 {
        self.parts().iter().map(|c| c.area(options)).sum()
    }
}

/// Options for building compound paths and running operations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct EngineOptions {
    pub boolean: BooleanOptions<f64>,
    pub flatten: FlattenOptions,
}

impl EngineOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            boolean: BooleanOptions::new(),
            flatten: FlattenOptions::new(),
        }
    }
}

impl Default for EngineOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
