use super::{Point, SubPath};
use crate::error::PathParseError;

/// Byte cursor over SVG path data.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a str) -> Self {
        Cursor {
            bytes: data.as_bytes(),
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.bytes.get(self.pos) {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | 0x0c) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_number_start(&mut self) -> bool {
        self.skip_separators();
        matches!(self.peek(), Some(b'0'..=b'9' | b'.' | b'-' | b'+'))
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self) -> Result<f64, PathParseError> {
        self.skip_separators();
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }

        let mut digit_count = self.digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            digit_count += self.digits();
        }

        if digit_count == 0 {
            return Err(PathParseError::InvalidNumber { position: start });
        }

        // exponent only consumed when digits follow
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'-' | b'+')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = mark;
            }
        }

        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or(PathParseError::InvalidNumber { position: start })
    }

    fn flag(&mut self) -> Result<bool, PathParseError> {
        self.skip_separators();
        let position = self.pos;
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(PathParseError::InvalidNumber { position }),
        }
    }

    fn point(&mut self) -> Result<Point, PathParseError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }
}

/// Parser state while walking path data commands.
struct PathBuilder {
    subpaths: Vec<SubPath>,
    current: Option<SubPath>,
    current_point: Point,
    subpath_start: Point,
    /// Second control point of the previous cubic, used to reflect `S` commands.
    last_cubic_ctrl: Option<Point>,
    quadratics_removed: usize,
    arcs_as_chords: usize,
}

impl PathBuilder {
    fn new() -> Self {
        PathBuilder {
            subpaths: Vec::new(),
            current: None,
            current_point: Point::zero(),
            subpath_start: Point::zero(),
            last_cubic_ctrl: None,
            quadratics_removed: 0,
            arcs_as_chords: 0,
        }
    }

    fn finish_current(&mut self) {
        if let Some(s) = self.current.take() {
            if s.drawing_segment_count() > 0 {
                self.subpaths.push(s);
            } else {
                log::trace!("dropping subpath without drawing segments");
            }
        }
    }

    fn move_to(&mut self, p: Point) {
        self.finish_current();
        self.current = Some(SubPath::new(p));
        self.current_point = p;
        self.subpath_start = p;
    }

    /// Subpath to draw into, drawing after a close continues from the close point in a new
    /// subpath.
    fn drawing_target(&mut self) -> &mut SubPath {
        if self.current.as_ref().map_or(true, |s| s.is_closed()) {
            let start = self.current_point;
            self.finish_current();
            self.subpath_start = start;
        }

        let start = self.subpath_start;
        self.current.get_or_insert_with(|| SubPath::new(start))
    }

    fn line_to(&mut self, p: Point) {
        self.drawing_target().line_to(p);
        self.current_point = p;
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.drawing_target().cubic_to(ctrl1, ctrl2, to);
        self.current_point = to;
    }

    fn close(&mut self) {
        if let Some(s) = self.current.as_mut() {
            s.close();
        }
        self.current_point = self.subpath_start;
    }

    fn finish(mut self) -> Vec<SubPath> {
        self.finish_current();
        if self.quadratics_removed > 0 {
            log::debug!(
                "removed {} quadratic curve command(s) from path data",
                self.quadratics_removed
            );
        }
        if self.arcs_as_chords > 0 {
            log::debug!(
                "imported {} arc command(s) as straight chords",
                self.arcs_as_chords
            );
        }
        self.subpaths
    }
}

/// Parse SVG path data into subpaths with absolute coordinates.
///
/// Every move starts a new subpath and subpaths without any drawing segment are dropped.
/// Quadratic curves (`Q`, `T`) are removed while the current point still advances to their end
/// point, elliptical arcs (`A`) are imported as a straight line to the arc end point and smooth
/// cubics (`S`) are expanded to full cubics.
///
/// # Examples
///
/// ```
/// # use shape_boolean::path::*;
/// let subpaths = parse_path_data("M0 0 h10 v10 H0 z m20 0 l5 5 5-5z").unwrap();
/// assert_eq!(subpaths.len(), 2);
/// assert!(subpaths[0].is_closed());
/// assert_eq!(subpaths[1].drawing_segment_count(), 2);
/// ```
pub fn parse_path_data(data: &str) -> Result<Vec<SubPath>, PathParseError> {
    let mut cursor = Cursor::new(data);
    let mut builder = PathBuilder::new();

    loop {
        cursor.skip_separators();
        let position = cursor.pos;
        let command = match cursor.peek() {
            None => break,
            Some(b) if b.is_ascii_alphabetic() => {
                cursor.pos += 1;
                b
            }
            Some(_) => {
                let character = data[position..].chars().next().unwrap_or('?');
                return Err(PathParseError::UnexpectedCharacter {
                    character,
                    position,
                });
            }
        };

        let relative = command.is_ascii_lowercase();
        let upper = command.to_ascii_uppercase();
        if upper == b'Z' {
            builder.close();
            builder.last_cubic_ctrl = None;
            continue;
        }

        if !matches!(
            upper,
            b'M' | b'L' | b'H' | b'V' | b'C' | b'S' | b'Q' | b'T' | b'A'
        ) {
            return Err(PathParseError::UnexpectedCharacter {
                character: command as char,
                position,
            });
        }

        if !cursor.at_number_start() {
            return Err(PathParseError::MissingArguments {
                command: command as char,
                position,
            });
        }

        let mut first_group = true;
        while cursor.at_number_start() {
            let origin = if relative {
                builder.current_point
            } else {
                Point::zero()
            };
            let offset = |p: Point| p + origin;

            match upper {
                b'M' => {
                    let p = offset(cursor.point()?);
                    if first_group {
                        builder.move_to(p);
                    } else {
                        // extra coordinate pairs after a move are implicit lines
                        builder.line_to(p);
                    }
                    builder.last_cubic_ctrl = None;
                }
                b'L' => {
                    let p = offset(cursor.point()?);
                    builder.line_to(p);
                    builder.last_cubic_ctrl = None;
                }
                b'H' => {
                    let x = cursor.number()? + origin.x;
                    builder.line_to(Point::new(x, builder.current_point.y));
                    builder.last_cubic_ctrl = None;
                }
                b'V' => {
                    let y = cursor.number()? + origin.y;
                    builder.line_to(Point::new(builder.current_point.x, y));
                    builder.last_cubic_ctrl = None;
                }
                b'C' => {
                    let ctrl1 = offset(cursor.point()?);
                    let ctrl2 = offset(cursor.point()?);
                    let to = offset(cursor.point()?);
                    builder.cubic_to(ctrl1, ctrl2, to);
                    builder.last_cubic_ctrl = Some(ctrl2);
                }
                b'S' => {
                    let ctrl2 = offset(cursor.point()?);
                    let to = offset(cursor.point()?);
                    let current = builder.current_point;
                    let ctrl1 = match builder.last_cubic_ctrl {
                        Some(prev) => current + (current - prev),
                        None => current,
                    };
                    builder.cubic_to(ctrl1, ctrl2, to);
                    builder.last_cubic_ctrl = Some(ctrl2);
                }
                b'Q' => {
                    let _ctrl = cursor.point()?;
                    builder.current_point = offset(cursor.point()?);
                    builder.quadratics_removed += 1;
                    builder.last_cubic_ctrl = None;
                }
                b'T' => {
                    builder.current_point = offset(cursor.point()?);
                    builder.quadratics_removed += 1;
                    builder.last_cubic_ctrl = None;
                }
                b'A' => {
                    let _rx = cursor.number()?;
                    let _ry = cursor.number()?;
                    let _rotation = cursor.number()?;
                    let _large_arc = cursor.flag()?;
                    let _sweep = cursor.flag()?;
                    let to = offset(cursor.point()?);
                    builder.line_to(to);
                    builder.arcs_as_chords += 1;
                    builder.last_cubic_ctrl = None;
                }
                _ => unreachable!("command letters are validated above"),
            }

            first_group = false;
        }
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;
    use crate::path::PathSegment;

    #[test]
    fn absolute_and_relative_lines() {
        let s = parse_path_data("M10,10 L20 10 l0 10 h-10 V10 Z").unwrap();
        assert_eq!(s.len(), 1);
        assert!(s[0].is_closed());
        assert_eq!(s[0].segments()[3], PathSegment::LineTo(vec2(10.0, 20.0)));
        assert_eq!(s[0].segments()[4], PathSegment::LineTo(vec2(10.0, 10.0)));
    }

    #[test]
    fn implicit_line_after_move() {
        let s = parse_path_data("m1 1 2 0 0 2z").unwrap();
        assert_eq!(s[0].drawing_segment_count(), 2);
        assert_eq!(s[0].segments()[2], PathSegment::LineTo(vec2(3.0, 3.0)));
    }

    #[test]
    fn compact_numbers() {
        let s = parse_path_data("M0-1.5.5.5L1e1 2E-1").unwrap();
        assert_eq!(s[0].start_point(), vec2(0.0, -1.5));
        assert_eq!(s[0].segments()[1], PathSegment::LineTo(vec2(0.5, 0.5)));
        assert_eq!(s[0].segments()[2], PathSegment::LineTo(vec2(10.0, 0.2)));
    }

    #[test]
    fn smooth_cubic_reflects_control() {
        let s = parse_path_data("M0 0 C0 10 10 10 10 0 S20 -10 20 0").unwrap();
        match s[0].segments()[2] {
            PathSegment::CubicCurveTo { ctrl1, .. } => assert_eq!(ctrl1, vec2(10.0, -10.0)),
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn quadratics_removed_and_arcs_become_chords() {
        let s = parse_path_data("M0 0 Q5 5 10 0 L10 10 A5 5 0 0110 20 Z").unwrap();
        let segs = s[0].segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1], PathSegment::LineTo(vec2(10.0, 10.0)));
        assert_eq!(segs[2], PathSegment::LineTo(vec2(10.0, 20.0)));
    }

    #[test]
    fn drawing_after_close_starts_new_subpath() {
        let s = parse_path_data("M0 0 L10 0 L10 10 Z L-5 0 L0 -5 Z").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[1].start_point(), vec2(0.0, 0.0));
    }

    #[test]
    fn errors_carry_position() {
        assert_eq!(
            parse_path_data("M0 0 L"),
            Err(PathParseError::MissingArguments {
                command: 'L',
                position: 5
            })
        );
        assert_eq!(
            parse_path_data("M0 0 #"),
            Err(PathParseError::UnexpectedCharacter {
                character: '#',
                position: 5
            })
        );
        assert_eq!(
            parse_path_data("10 10"),
            Err(PathParseError::UnexpectedCharacter {
                character: '1',
                position: 0
            })
        );
        assert!(matches!(
            parse_path_data("M0 0 L5"),
            Err(PathParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn move_only_subpaths_dropped() {
        let s = parse_path_data("M0 0 M5 5 L6 6 L5 6").unwrap();
        assert_eq!(s.len(), 1);
        assert!(parse_path_data("").unwrap().is_empty());
    }
}
