//! Lenient command level view of path data used by the repair stages.
//!
//! Unlike [parse_path_data](crate::path::parse_path_data) this never fails: unknown letters and
//! stray symbols are kept as pseudo commands so later stages can decide what to do with them.

use crate::path::{write::format_number, Point};
use std::fmt;

/// One command letter and the arguments that followed it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub letter: char,
    pub args: Vec<f64>,
}

impl PathCommand {
    pub fn new(letter: char, args: Vec<f64>) -> Self {
        PathCommand { letter, args }
    }

    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self.letter, 'M' | 'm')
    }

    #[inline]
    pub fn is_close(&self) -> bool {
        matches!(self.letter, 'Z' | 'z')
    }

    #[inline]
    pub fn is_quadratic(&self) -> bool {
        matches!(self.letter, 'Q' | 'q' | 'T' | 't')
    }

    /// Lines, curves and arcs.
    #[inline]
    pub fn is_drawing(&self) -> bool {
        matches!(
            self.letter.to_ascii_uppercase(),
            'L' | 'H' | 'V' | 'C' | 'S' | 'Q' | 'T' | 'A'
        )
    }

    #[inline]
    pub fn is_relative(&self) -> bool {
        self.letter.is_ascii_lowercase()
    }

    fn write_with<F>(&self, f: &mut fmt::Formatter<'_>, fmt_arg: F) -> fmt::Result
    where
        F: Fn(f64) -> String,
    {
        write!(f, "{}", self.letter)?;
        for (i, a) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", fmt_arg(*a))?;
        }
        Ok(())
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |a| a.to_string())
    }
}

/// Number of arguments per command group, `None` for letters that are not path commands.
pub fn arity(letter: char) -> Option<usize> {
    match letter.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'C' => Some(6),
        'S' | 'Q' => Some(4),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

/// Path data as a list of commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkingPath {
    pub commands: Vec<PathCommand>,
    /// Arguments found before the first command letter.
    pub leading_args: usize,
}

impl WorkingPath {
    #[inline]
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        WorkingPath {
            commands,
            leading_args: 0,
        }
    }

    /// Tokenize path data. Separators are whitespace and commas, arc flags may be written without
    /// separators, any other character that is not part of a number becomes a pseudo command.
    pub fn tokenize(data: &str) -> Self {
        let chars: Vec<char> = data.chars().collect();
        let mut result = WorkingPath::default();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() || c == ',' {
                i += 1;
                continue;
            }

            let in_arc_flag = result.commands.last().map_or(false, |cmd| {
                matches!(cmd.letter, 'A' | 'a') && matches!(cmd.args.len() % 7, 3 | 4)
            });
            if in_arc_flag && (c == '0' || c == '1') {
                if let Some(cmd) = result.commands.last_mut() {
                    cmd.args.push(if c == '1' { 1.0 } else { 0.0 });
                }
                i += 1;
                continue;
            }

            if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' {
                if let Some((value, next)) = scan_number(&chars, i) {
                    match result.commands.last_mut() {
                        Some(cmd) => cmd.args.push(value),
                        None => result.leading_args += 1,
                    }
                    i = next;
                    continue;
                }
            }

            result.commands.push(PathCommand::new(c, Vec::new()));
            i += 1;
        }

        result
    }

    pub fn move_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_move()).count()
    }

    /// Drawing commands, counting coordinate pairs after a move as the implicit lines they are.
    pub fn drawing_count(&self) -> usize {
        self.commands
            .iter()
            .map(|c| {
                if c.is_drawing() {
                    1
                } else if c.is_move() {
                    (c.args.len() / 2).saturating_sub(1)
                } else {
                    0
                }
            })
            .sum()
    }

    pub fn has_close(&self) -> bool {
        self.commands.iter().any(|c| c.is_close())
    }

    /// Exactly one move, first, followed by at least one drawing command.
    pub fn is_single_drawable(&self) -> bool {
        self.commands.first().map_or(false, |c| c.is_move())
            && self.move_count() == 1
            && self.drawing_count() > 0
    }

    /// Serialized length in bytes of the [fmt::Display] form.
    pub fn serialized_len(&self) -> usize {
        self.to_string().len()
    }

    /// Absolute current point after each command. Unknown letters do not move the current point.
    pub fn end_points(&self) -> Vec<Point> {
        let mut result = Vec::with_capacity(self.commands.len());
        let mut current = Point::zero();
        let mut subpath_start = Point::zero();
        for cmd in self.commands.iter() {
            let upper = cmd.letter.to_ascii_uppercase();
            match arity(cmd.letter) {
                Some(0) => current = subpath_start,
                Some(n) => {
                    for (g, group) in cmd.args.chunks_exact(n).enumerate() {
                        let origin = if cmd.is_relative() {
                            current
                        } else {
                            Point::zero()
                        };
                        current = match upper {
                            'H' => Point::new(group[0] + origin.x, current.y),
                            'V' => Point::new(current.x, group[0] + origin.y),
                            _ => Point::new(group[n - 2] + origin.x, group[n - 1] + origin.y),
                        };
                        if upper == 'M' && g == 0 {
                            subpath_start = current;
                        }
                    }
                }
                None => {}
            }

            result.push(current);
        }

        result
    }

    /// Absolute point of the first move, `None` if the path does not begin with a move.
    pub fn first_point(&self) -> Option<Point> {
        let first = self.commands.first()?;
        if !first.is_move() || first.args.len() < 2 {
            return None;
        }
        Some(Point::new(first.args[0], first.args[1]))
    }

    /// Serialize with numbers formatted to `decimal_places`.
    pub fn to_path_data(&self, decimal_places: u32) -> String {
        struct Normalized<'a>(&'a PathCommand, u32);
        impl fmt::Display for Normalized<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.write_with(f, |a| format_number(a, self.1))
            }
        }

        self.commands
            .iter()
            .map(|c| Normalized(c, decimal_places).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for WorkingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Scan a number starting at `start`, returning the value and the index after it.
fn scan_number(chars: &[char], start: usize) -> Option<(f64, usize)> {
    let mut i = start;
    let at = |i: usize| chars.get(i).copied();
    if matches!(at(i), Some('-' | '+')) {
        i += 1;
    }

    let mut digits = 0;
    while matches!(at(i), Some(c) if c.is_ascii_digit()) {
        i += 1;
        digits += 1;
    }
    if at(i) == Some('.') {
        i += 1;
        while matches!(at(i), Some(c) if c.is_ascii_digit()) {
            i += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(at(i), Some('e' | 'E')) {
        let mark = i;
        i += 1;
        if matches!(at(i), Some('-' | '+')) {
            i += 1;
        }
        let exp_start = i;
        while matches!(at(i), Some(c) if c.is_ascii_digit()) {
            i += 1;
        }
        if i == exp_start {
            i = mark;
        }
    }

    let text: String = chars[start..i].iter().collect();
    text.parse::<f64>().ok().map(|v| (v, i))
}
