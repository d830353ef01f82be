//! Single subpath extraction strategies.

use super::command::{PathCommand, WorkingPath};
use std::fmt;

/// Path data used when no subpath can be recovered.
pub const MINIMAL_RECTANGLE: &str = "M0 0 L100 0 L100 100 L0 100 Z";

/// Strategy that produced the single subpath kept from path data with several moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Highest scoring subpath chunk.
    BestScore,
    /// Everything before the second move.
    TruncateAtSecondMove,
    /// From the first move up to and including the first close.
    FirstMoveToFirstClose,
    /// A bounded number of commands from the first move, later moves dropped and a close
    /// appended.
    BoundedWindow,
    /// Fixed 100 by 100 rectangle.
    MinimalRectangle,
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtractionStrategy::BestScore => "best score",
            ExtractionStrategy::TruncateAtSecondMove => "truncate at second move",
            ExtractionStrategy::FirstMoveToFirstClose => "first move to first close",
            ExtractionStrategy::BoundedWindow => "bounded window",
            ExtractionStrategy::MinimalRectangle => "minimal rectangle",
        };
        f.write_str(s)
    }
}

/// Split the commands into chunks, each starting at a move (the first chunk may not).
pub fn split_at_moves(path: &WorkingPath) -> Vec<(usize, WorkingPath)> {
    let mut chunks: Vec<(usize, WorkingPath)> = Vec::new();
    for (i, cmd) in path.commands.iter().enumerate() {
        if cmd.is_move() || chunks.is_empty() {
            chunks.push((i, WorkingPath::default()));
        }

        if let Some((_, chunk)) = chunks.last_mut() {
            chunk.commands.push(cmd.clone());
        }
    }

    chunks
}

/// Score of a chunk: serialized length plus 10 per drawing command. Chunks not starting with a
/// move or without drawing commands score zero.
pub fn score_chunk(chunk: &WorkingPath) -> usize {
    let starts_with_move = chunk.commands.first().map_or(false, |c| c.is_move());
    let drawing = chunk.drawing_count();
    if !starts_with_move || drawing == 0 {
        return 0;
    }

    chunk.serialized_len() + 10 * drawing
}

/// Make a chunk taken from the middle of a path stand alone: a leading relative move is rewritten
/// to an absolute move at the same position, implicit lines after it stay relative.
fn detach_chunk(path: &WorkingPath, start_index: usize, mut chunk: WorkingPath) -> WorkingPath {
    if start_index == 0 {
        return chunk;
    }

    let prev = path.end_points()[start_index - 1];
    let is_relative_move = chunk
        .commands
        .first()
        .map_or(false, |c| c.letter == 'm' && c.args.len() >= 2);
    if !is_relative_move {
        return chunk;
    }

    let first = chunk.commands.remove(0);
    let mut insert = vec![PathCommand::new(
        'M',
        vec![first.args[0] + prev.x, first.args[1] + prev.y],
    )];
    if first.args.len() > 2 {
        insert.push(PathCommand::new('l', first.args[2..].to_vec()));
    }
    chunk.commands.splice(0..0, insert);
    chunk
}

/// Keep the highest scoring chunk (earliest wins ties). `None` if no chunk scores above zero.
pub fn extract_best_scoring(path: &WorkingPath) -> Option<WorkingPath> {
    let mut best: Option<(usize, usize, WorkingPath)> = None;
    for (start_index, chunk) in split_at_moves(path) {
        let score = score_chunk(&chunk);
        if score == 0 {
            continue;
        }

        if best.as_ref().map_or(true, |(s, _, _)| score > *s) {
            best = Some((score, start_index, chunk));
        }
    }

    best.map(|(_, start_index, chunk)| detach_chunk(path, start_index, chunk))
}

/// Commands before the second move.
pub fn truncate_at_second_move(path: &WorkingPath) -> WorkingPath {
    let mut seen_move = false;
    let commands = path
        .commands
        .iter()
        .take_while(|c| {
            if c.is_move() {
                if seen_move {
                    return false;
                }
                seen_move = true;
            }
            true
        })
        .cloned()
        .collect();
    WorkingPath::from_commands(commands)
}

/// Commands from the first move through the first close (or the end if there is no close).
pub fn first_move_to_first_close(path: &WorkingPath) -> WorkingPath {
    let start = path
        .commands
        .iter()
        .position(|c| c.is_move())
        .unwrap_or(path.commands.len());
    let mut commands = Vec::new();
    for c in path.commands[start..].iter() {
        commands.push(c.clone());
        if c.is_close() {
            break;
        }
    }
    WorkingPath::from_commands(commands)
}

/// Up to `window` commands from the first move with later moves dropped, closed with a
/// synthetic close.
pub fn bounded_window(path: &WorkingPath, window: usize) -> WorkingPath {
    let start = path
        .commands
        .iter()
        .position(|c| c.is_move())
        .unwrap_or(path.commands.len());
    let mut commands: Vec<PathCommand> = path.commands[start..]
        .iter()
        .enumerate()
        .filter(|(i, c)| *i == 0 || !(c.is_move() || c.is_close()))
        .map(|(_, c)| c.clone())
        .take(window.max(1))
        .collect();
    commands.push(PathCommand::new('Z', Vec::new()));
    WorkingPath::from_commands(commands)
}

/// Run the fallback strategies in order, returning the first result with exactly one move and at
/// least one drawing command.
pub fn extract_with_fallbacks(
    path: &WorkingPath,
    window: usize,
) -> Option<(WorkingPath, ExtractionStrategy)> {
    let candidates = [
        (
            truncate_at_second_move(path),
            ExtractionStrategy::TruncateAtSecondMove,
        ),
        (
            first_move_to_first_close(path),
            ExtractionStrategy::FirstMoveToFirstClose,
        ),
        (bounded_window(path, window), ExtractionStrategy::BoundedWindow),
    ];

    candidates
        .into_iter()
        .find(|(candidate, _)| candidate.is_single_drawable())
}
