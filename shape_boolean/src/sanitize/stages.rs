//! Ordered repair stages of the sanitizer.

use super::{
    command::{arity, PathCommand, WorkingPath},
    extract::{
        extract_best_scoring, extract_with_fallbacks, ExtractionStrategy, MINIMAL_RECTANGLE,
    },
    Repair, SanitizeOptions, SanitizeStage,
};
use crate::error::SanitizeError;
use regex::Regex;
use std::sync::OnceLock;

/// Characters allowed in sanitized path data.
pub const WHITELIST_PATTERN: &str = r"^[MLHVCSAZmlhvcsaz0-9.,\s+-]*$";

fn whitelist_regex() -> &'static Regex {
    static WHITELIST: OnceLock<Regex> = OnceLock::new();
    WHITELIST.get_or_init(|| Regex::new(WHITELIST_PATTERN).expect("whitelist pattern is valid"))
}

/// One step of the sanitize pipeline. A stage either returns the (possibly repaired) path or a
/// failure that aborts the pipeline.
pub trait RepairStage {
    fn stage(&self) -> SanitizeStage;

    fn apply(
        &self,
        path: WorkingPath,
        options: &SanitizeOptions,
        repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError>;
}

/// The stages in pipeline order.
pub fn standard_stages() -> Vec<Box<dyn RepairStage>> {
    vec![
        Box::new(MoveCheck),
        Box::new(QuadraticRemoval),
        Box::new(SingleSubpath),
        Box::new(Closure),
        Box::new(SizeLimit),
        Box::new(Whitelist),
        Box::new(NumericNormalization),
        Box::new(FinalRecheck),
    ]
}

/// Path data must begin with a move that has a coordinate pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveCheck;

impl RepairStage for MoveCheck {
    fn stage(&self) -> SanitizeStage {
        SanitizeStage::MoveCheck
    }

    fn apply(
        &self,
        path: WorkingPath,
        _options: &SanitizeOptions,
        _repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError> {
        if path.leading_args > 0 || path.first_point().is_none() {
            return Err(SanitizeError::MissingMoveCommand);
        }
        Ok(path)
    }
}

/// Quadratic curve commands are deleted.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticRemoval;

impl RepairStage for QuadraticRemoval {
    fn stage(&self) -> SanitizeStage {
        SanitizeStage::QuadraticRemoval
    }

    fn apply(
        &self,
        mut path: WorkingPath,
        _options: &SanitizeOptions,
        repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError> {
        let before = path.commands.len();
        path.commands.retain(|c| !c.is_quadratic());
        let count = before - path.commands.len();
        if count > 0 {
            log::debug!("removed {count} quadratic curve command(s)");
            repairs.push(Repair::QuadraticRemoved { count });
        }
        Ok(path)
    }
}

/// Reduce path data with several moves to a single subpath: best scoring chunk first, then the
/// fallback strategies, then the minimal rectangle (if enabled).
fn reduce_to_single_subpath(
    path: WorkingPath,
    options: &SanitizeOptions,
    repairs: &mut Vec<Repair>,
) -> Result<WorkingPath, SanitizeError> {
    let discarded_moves = path.move_count().saturating_sub(1);
    if let Some(best) = extract_best_scoring(&path) {
        log::debug!("kept best scoring subpath, discarded {discarded_moves} other move(s)");
        repairs.push(Repair::SubpathExtracted {
            strategy: ExtractionStrategy::BestScore,
            discarded_moves,
        });
        return Ok(best);
    }

    if let Some((extracted, strategy)) = extract_with_fallbacks(&path, options.window_commands) {
        log::debug!("no subpath scored, extracted single subpath by {strategy}");
        repairs.push(Repair::SubpathExtracted {
            strategy,
            discarded_moves,
        });
        return Ok(extracted);
    }

    if !options.rectangle_fallback {
        return Err(SanitizeError::NoUsableSubpath);
    }

    log::warn!("no usable subpath in path data, substituting minimal rectangle");
    repairs.push(Repair::SubpathExtracted {
        strategy: ExtractionStrategy::MinimalRectangle,
        discarded_moves,
    });
    Ok(WorkingPath::tokenize(MINIMAL_RECTANGLE))
}

/// Only one move may remain.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSubpath;

impl RepairStage for SingleSubpath {
    fn stage(&self) -> SanitizeStage {
        SanitizeStage::SingleSubpath
    }

    fn apply(
        &self,
        path: WorkingPath,
        options: &SanitizeOptions,
        repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError> {
        if path.move_count() <= 1 {
            return Ok(path);
        }
        reduce_to_single_subpath(path, options, repairs)
    }
}

fn ensure_closed(mut path: WorkingPath, options: &SanitizeOptions, repairs: &mut Vec<Repair>) -> WorkingPath {
    if path.has_close() {
        return path;
    }

    let first = path.first_point();
    let last = path.end_points().last().copied();
    if let (Some(first), Some(last)) = (first, last) {
        if !first.fuzzy_eq_eps(last, options.near_zero_eps) {
            log::debug!("appending close command");
            path.commands.push(PathCommand::new('Z', Vec::new()));
            repairs.push(Repair::CloseAppended);
        }
    }

    path
}

/// Open paths whose end does not meet their start get a close command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Closure;

impl RepairStage for Closure {
    fn stage(&self) -> SanitizeStage {
        SanitizeStage::Closure
    }

    fn apply(
        &self,
        path: WorkingPath,
        options: &SanitizeOptions,
        repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError> {
        Ok(ensure_closed(path, options, repairs))
    }
}

/// Serialized size must not exceed the byte limit. Not repairable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeLimit;

impl RepairStage for SizeLimit {
    fn stage(&self) -> SanitizeStage {
        SanitizeStage::SizeLimit
    }

    fn apply(
        &self,
        path: WorkingPath,
        options: &SanitizeOptions,
        _repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError> {
        let size = path.serialized_len();
        if size > options.max_path_bytes {
            return Err(SanitizeError::PathTooComplex {
                size,
                limit: options.max_path_bytes,
            });
        }
        Ok(path)
    }
}

/// Strip stray symbols, then require every remaining character to be whitelisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Whitelist;

impl RepairStage for Whitelist {
    fn stage(&self) -> SanitizeStage {
        SanitizeStage::Whitelist
    }

    fn apply(
        &self,
        path: WorkingPath,
        _options: &SanitizeOptions,
        repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError> {
        let data = path.to_string();
        let stripped: String = data
            .chars()
            .filter(|&c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | ',' | '+' | '-'))
            .collect();
        let count = data.chars().count() - stripped.chars().count();
        if count > 0 {
            log::debug!("stripped {count} character(s) outside the command whitelist");
            repairs.push(Repair::CharactersStripped { count });
        }

        if !whitelist_regex().is_match(&stripped) {
            let mut found = String::new();
            for c in stripped.chars() {
                let allowed = "MLHVCSAZmlhvcsaz.,+-".contains(c) || c.is_ascii_digit() || c.is_whitespace();
                if !allowed && !found.contains(c) {
                    found.push(c);
                }
            }
            return Err(SanitizeError::UnsupportedCommand { found });
        }

        let mut path = if count == 0 {
            path
        } else {
            WorkingPath::tokenize(&stripped)
        };

        // lone signs or dots that did not scan as numbers
        let before = path.commands.len();
        path.commands.retain(|c| arity(c.letter).is_some());
        let dropped = before - path.commands.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} stray symbol(s) that are not path commands");
            repairs.push(Repair::CharactersStripped { count: dropped });
        }

        Ok(path)
    }
}

/// Round every number, collapsing near zero values to zero. Numbers that are not finite are
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericNormalization;

impl RepairStage for NumericNormalization {
    fn stage(&self) -> SanitizeStage {
        SanitizeStage::NumericNormalization
    }

    fn apply(
        &self,
        mut path: WorkingPath,
        options: &SanitizeOptions,
        repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError> {
        let factor = 10f64.powi(options.decimal_places as i32);
        let mut changed = 0;
        for arg in path.commands.iter_mut().flat_map(|c| c.args.iter_mut()) {
            if !arg.is_finite() {
                return Err(SanitizeError::UnsupportedCommand {
                    found: arg.to_string(),
                });
            }

            let scaled = *arg * factor;
            // too large to carry any decimals
            let mut value = if scaled.is_finite() {
                scaled.round() / factor
            } else {
                *arg
            };
            if value.abs() < options.near_zero_eps {
                value = 0.0;
            }

            if value.to_bits() != arg.to_bits() {
                *arg = value;
                changed += 1;
            }
        }

        if changed > 0 {
            log::trace!("normalized {changed} number(s)");
            repairs.push(Repair::NumbersNormalized { count: changed });
        }

        Ok(path)
    }
}

/// Last check on the finished path: a single leading move, closure and the size limit on the
/// normalized form.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinalRecheck;

impl RepairStage for FinalRecheck {
    fn stage(&self) -> SanitizeStage {
        SanitizeStage::FinalRecheck
    }

    fn apply(
        &self,
        path: WorkingPath,
        options: &SanitizeOptions,
        repairs: &mut Vec<Repair>,
    ) -> Result<WorkingPath, SanitizeError> {
        let leading_move = path.commands.first().map_or(false, |c| c.is_move());
        let path = if path.move_count() != 1 || !leading_move {
            log::warn!("multiple moves after repairs, extracting single subpath again");
            reduce_to_single_subpath(path, options, repairs)?
        } else {
            path
        };
        // endpoints may have been rounded apart
        let path = ensure_closed(path, options, repairs);

        let size = path.to_path_data(options.decimal_places).len();
        if size > options.max_path_bytes {
            return Err(SanitizeError::PathTooComplex {
                size,
                limit: options.max_path_bytes,
            });
        }

        Ok(path)
    }
}
