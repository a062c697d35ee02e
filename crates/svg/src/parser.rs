//! SVG path data parser.
//!
//! Supports the full path command set of the SVG specification: `M L H V Q T C S A Z` in
//! absolute and relative form, implicit command repetition, implicit line-to after a
//! move-to, and whitespace or comma separators. The arc x-axis rotation is read but not
//! applied since subpath arcs are axis-aligned.
//!
//! Smooth curves (`T` and `S`) are kept as smooth commands: the reflected control points
//! are computed when the subpath is flattened.

use crate::path::geom::ArcFlags;
use crate::path::math::{point, vector, Point};
use crate::path::{Path, Subpath};

extern crate thiserror;

use self::thiserror::Error;

/// What went wrong while parsing.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A move-to or a command following a close-path, in subpath mode.
    #[error("move not allowed in a single subpath")]
    SubpathMove,
    #[error("invalid command")]
    InvalidCommand,
    #[error("invalid number")]
    InvalidNumber,
    /// The input ended in the middle of a command.
    #[error("incomplete command")]
    Incomplete,
}

/// A parse error and the byte offset in the source where it occurred.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[error("path data error at byte {offset}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

/// Parse path data into a `Path`.
///
/// `start` is the current point before the first command. Commands that appear before
/// any move-to, or after a close-path without a move-to, begin a new subpath at the
/// current point. An empty source produces an empty path.
pub fn parse_path(src: &str, start: Point) -> Result<Path, ParseError> {
    let mut parser = PathParser::new(src, start, false);
    parser.parse()?;

    Ok(Path {
        subpaths: parser.subpaths,
    })
}

/// Parse path data that describes a single subpath.
///
/// `start` is the start of the subpath unless the data begins with a move-to. A move-to
/// anywhere else, or any command after a close-path, is a `SubpathMove` error.
pub fn parse_subpath(src: &str, start: Point) -> Result<Subpath, ParseError> {
    let mut parser = PathParser::new(src, start, true);
    parser.parse()?;

    Ok(parser
        .subpaths
        .pop()
        .unwrap_or_else(|| Subpath::new(start)))
}

// A byte cursor over the source.
struct Source<'l> {
    src: &'l str,
    position: usize,
}

impl<'l> Source<'l> {
    fn new(src: &'l str) -> Self {
        Source { src, position: 0 }
    }

    fn current(&self) -> Option<u8> {
        self.src.as_bytes().get(self.position).cloned()
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.position + offset).cloned()
    }

    fn advance(&mut self, n: usize) {
        self.position += n;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if !c.is_ascii_whitespace() && c != b',' {
                break;
            }
            self.advance(1);
        }
    }

    /// Skips separators if they are followed by the start of a number.
    fn next_is_number(&mut self) -> bool {
        let saved = self.position;
        self.skip_whitespace();
        match self.current() {
            Some(c) if starts_number(c) => true,
            _ => {
                self.position = saved;
                false
            }
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            offset: self.position,
        }
    }

    fn count_digits(&self, from: usize) -> usize {
        let mut n = 0;
        while let Some(c) = self.peek(from + n) {
            if !c.is_ascii_digit() {
                break;
            }
            n += 1;
        }

        n
    }

    fn parse_number(&mut self) -> Result<f32, ParseError> {
        self.skip_whitespace();

        let start = self.position;
        if self.current().is_none() {
            return Err(self.error(ParseErrorKind::Incomplete));
        }

        let mut len = 0;
        if let Some(b'-') | Some(b'+') = self.peek(len) {
            len += 1;
        }

        let integer_digits = self.count_digits(len);
        len += integer_digits;

        let mut fraction_digits = 0;
        if self.peek(len) == Some(b'.') {
            fraction_digits = self.count_digits(len + 1);
            len += 1 + fraction_digits;
        }

        if integer_digits + fraction_digits == 0 {
            return Err(self.error(ParseErrorKind::InvalidNumber));
        }

        // Only consume the exponent if it is well formed.
        if let Some(b'e') | Some(b'E') = self.peek(len) {
            let mut exponent = len + 1;
            if let Some(b'-') | Some(b'+') = self.peek(exponent) {
                exponent += 1;
            }
            let exponent_digits = self.count_digits(exponent);
            if exponent_digits > 0 {
                len = exponent + exponent_digits;
            }
        }

        match self.src[start..start + len].parse::<f32>() {
            Ok(value) => {
                self.advance(len);
                Ok(value)
            }
            Err(_) => Err(self.error(ParseErrorKind::InvalidNumber)),
        }
    }

    fn parse_flag(&mut self) -> Result<bool, ParseError> {
        self.skip_whitespace();
        match self.current() {
            Some(b'0') => {
                self.advance(1);
                Ok(false)
            }
            Some(b'1') => {
                self.advance(1);
                Ok(true)
            }
            Some(_) => Err(self.error(ParseErrorKind::InvalidNumber)),
            None => Err(self.error(ParseErrorKind::Incomplete)),
        }
    }
}

fn starts_number(c: u8) -> bool {
    c.is_ascii_digit() || c == b'-' || c == b'+' || c == b'.'
}

struct PathParser<'l> {
    src: Source<'l>,
    single_subpath: bool,
    subpaths: Vec<Subpath>,
    current_position: Point,
}

impl<'l> PathParser<'l> {
    fn new(src: &'l str, start: Point, single_subpath: bool) -> Self {
        PathParser {
            src: Source::new(src),
            single_subpath,
            subpaths: Vec::new(),
            current_position: start,
        }
    }

    fn parse(&mut self) -> Result<(), ParseError> {
        let mut first = true;

        loop {
            self.src.skip_whitespace();
            let offset = self.src.position;

            let cmd = match self.src.current() {
                Some(c) => c,
                None => break,
            };

            if !b"MLHVQTCSAZmlhvqtcsaz".contains(&cmd) {
                return Err(self.src.error(ParseErrorKind::InvalidCommand));
            }
            self.src.advance(1);

            let is_relative = cmd.is_ascii_lowercase();
            let after_close = self.subpaths.last().map_or(false, |s| s.closed);

            if cmd == b'M' || cmd == b'm' {
                if self.single_subpath && !first {
                    return Err(ParseError {
                        kind: ParseErrorKind::SubpathMove,
                        offset,
                    });
                }

                // A leading relative move-to is absolute.
                let to = self.parse_point(is_relative && !first)?;
                self.current_position = to;
                self.subpaths.push(Subpath::new(to));

                while self.src.next_is_number() {
                    let to = self.parse_point(is_relative)?;
                    self.current_position = to;
                    self.current_subpath().line_to(to);
                }

                first = false;
                continue;
            }

            if after_close && self.single_subpath {
                return Err(ParseError {
                    kind: ParseErrorKind::SubpathMove,
                    offset,
                });
            }

            if self.subpaths.is_empty() || after_close {
                let start = self.current_position;
                self.subpaths.push(Subpath::new(start));
            }

            if cmd == b'Z' || cmd == b'z' {
                let subpath = self.current_subpath();
                subpath.close();
                let start = subpath.start;
                self.current_position = start;
            } else {
                loop {
                    self.parse_command(cmd.to_ascii_uppercase(), is_relative)?;
                    if !self.src.next_is_number() {
                        break;
                    }
                }
            }

            first = false;
        }

        Ok(())
    }

    fn current_subpath(&mut self) -> &mut Subpath {
        if self.subpaths.is_empty() {
            self.subpaths.push(Subpath::new(self.current_position));
        }
        let last = self.subpaths.len() - 1;

        &mut self.subpaths[last]
    }

    fn parse_point(&mut self, is_relative: bool) -> Result<Point, ParseError> {
        let mut x = self.src.parse_number()?;
        let mut y = self.src.parse_number()?;

        if is_relative {
            x += self.current_position.x;
            y += self.current_position.y;
        }

        Ok(point(x, y))
    }

    // Parses the arguments of one drawing command and appends it to the current subpath.
    fn parse_command(&mut self, cmd: u8, is_relative: bool) -> Result<(), ParseError> {
        let from = self.current_position;
        let to = match cmd {
            b'L' => {
                let to = self.parse_point(is_relative)?;
                self.current_subpath().line_to(to);
                to
            }
            b'H' => {
                let mut x = self.src.parse_number()?;
                if is_relative {
                    x += from.x;
                }
                let to = point(x, from.y);
                self.current_subpath().line_to(to);
                to
            }
            b'V' => {
                let mut y = self.src.parse_number()?;
                if is_relative {
                    y += from.y;
                }
                let to = point(from.x, y);
                self.current_subpath().line_to(to);
                to
            }
            b'Q' => {
                let ctrl = self.parse_point(is_relative)?;
                let to = self.parse_point(is_relative)?;
                self.current_subpath().quadratic_bezier_to(ctrl, to);
                to
            }
            b'T' => {
                let to = self.parse_point(is_relative)?;
                self.current_subpath().smooth_quadratic_bezier_to(to);
                to
            }
            b'C' => {
                let ctrl1 = self.parse_point(is_relative)?;
                let ctrl2 = self.parse_point(is_relative)?;
                let to = self.parse_point(is_relative)?;
                self.current_subpath().cubic_bezier_to(ctrl1, ctrl2, to);
                to
            }
            b'S' => {
                let ctrl2 = self.parse_point(is_relative)?;
                let to = self.parse_point(is_relative)?;
                self.current_subpath().smooth_cubic_bezier_to(ctrl2, to);
                to
            }
            b'A' => {
                let rx = self.src.parse_number()?;
                let ry = self.src.parse_number()?;
                let _x_rotation = self.src.parse_number()?;
                let large_arc = self.src.parse_flag()?;
                let clockwise = self.src.parse_flag()?;
                let to = self.parse_point(is_relative)?;
                let flags = ArcFlags {
                    large_arc,
                    clockwise,
                };
                self.current_subpath().arc_to(vector(rx, ry), flags, to);
                to
            }
            _ => {
                return Err(self.src.error(ParseErrorKind::InvalidCommand));
            }
        };

        self.current_position = to;

        Ok(())
    }
}

#[cfg(test)]
use crate::path::Verb;

#[test]
fn lines() {
    let subpath = parse_subpath("M 100.0 100 L 200 200, 300 10", point(0.0, 0.0)).unwrap();

    assert_eq!(subpath.start, point(100.0, 100.0));
    assert!(!subpath.closed);
    assert_eq!(subpath.commands.len(), 2);
    assert_eq!(subpath.commands[0].to, point(200.0, 200.0));
    assert_eq!(subpath.commands[0].verb, Verb::Line);
    assert_eq!(subpath.commands[1].to, point(300.0, 10.0));
    assert_eq!(subpath.commands[1].verb, Verb::Line);
}

#[test]
fn smooth_quadratic() {
    let subpath = parse_subpath("Q 1e2 0 200 200 t 100,100", point(10.0, 10.0)).unwrap();

    assert_eq!(subpath.start, point(10.0, 10.0));
    assert!(!subpath.closed);
    assert_eq!(subpath.commands.len(), 2);
    assert_eq!(subpath.commands[0].to, point(200.0, 200.0));
    assert_eq!(
        subpath.commands[0].verb,
        Verb::Quadratic {
            ctrl: point(100.0, 0.0)
        }
    );
    assert_eq!(subpath.commands[1].to, point(300.0, 300.0));
    assert_eq!(subpath.commands[1].verb, Verb::SmoothQuadratic);
}

#[test]
fn relative_arc() {
    let subpath = parse_subpath("M300,200 h-150 a150,150 0 1,0 150,-150 z", point(0.0, 0.0))
        .unwrap();

    assert_eq!(subpath.start, point(300.0, 200.0));
    assert!(subpath.closed);
    assert_eq!(subpath.commands.len(), 2);
    assert_eq!(subpath.commands[0].to, point(150.0, 200.0));
    assert_eq!(subpath.commands[0].verb, Verb::Line);
    assert_eq!(subpath.commands[1].to, point(300.0, 50.0));
    assert_eq!(
        subpath.commands[1].verb,
        Verb::Arc {
            radii: vector(150.0, 150.0),
            flags: ArcFlags {
                large_arc: true,
                clockwise: false,
            },
        }
    );
}

#[test]
fn cubic_curves() {
    let subpath = parse_subpath("M0 0 C 0 10 10 10 10 0 s 10 -10 10 0", point(0.0, 0.0)).unwrap();

    assert_eq!(subpath.commands.len(), 2);
    assert_eq!(
        subpath.commands[0].verb,
        Verb::Cubic {
            ctrl1: point(0.0, 10.0),
            ctrl2: point(10.0, 10.0),
        }
    );
    assert_eq!(subpath.commands[1].to, point(20.0, 0.0));
    assert_eq!(
        subpath.commands[1].verb,
        Verb::SmoothCubic {
            ctrl2: point(20.0, -10.0)
        }
    );
}

#[test]
fn implicit_commands() {
    let subpath = parse_subpath("m 1 1 2 0 0 2 V 10 20 h1-1", point(5.0, 5.0)).unwrap();

    let targets: Vec<Point> = subpath.commands.iter().map(|cmd| cmd.to).collect();
    assert_eq!(subpath.start, point(1.0, 1.0));
    assert_eq!(
        targets,
        [
            point(3.0, 1.0),
            point(3.0, 3.0),
            point(3.0, 10.0),
            point(3.0, 20.0),
            point(4.0, 20.0),
            point(3.0, 20.0),
        ]
    );
}

#[test]
fn numbers() {
    let subpath = parse_subpath("M 0.6.5 L-1e1-.5 L 1E+1 2", point(0.0, 0.0)).unwrap();

    assert_eq!(subpath.start, point(0.6, 0.5));
    assert_eq!(subpath.commands[0].to, point(-10.0, -0.5));
    assert_eq!(subpath.commands[1].to, point(10.0, 2.0));
}

#[test]
fn paths() {
    let path = parse_path("M 10,10 L 20,20 M 30,3e1 h 10 z l10 10", point(0.0, 0.0)).unwrap();

    assert_eq!(path.subpaths.len(), 3);

    let s1 = &path.subpaths[0];
    assert_eq!(s1.start, point(10.0, 10.0));
    assert!(!s1.closed);
    assert_eq!(s1.commands.len(), 1);
    assert_eq!(s1.commands[0].to, point(20.0, 20.0));

    let s2 = &path.subpaths[1];
    assert_eq!(s2.start, point(30.0, 30.0));
    assert!(s2.closed);
    assert_eq!(s2.commands.len(), 1);
    assert_eq!(s2.commands[0].to, point(40.0, 30.0));

    // After a close-path the current point is the start of the closed subpath.
    let s3 = &path.subpaths[2];
    assert_eq!(s3.start, point(30.0, 30.0));
    assert!(!s3.closed);
    assert_eq!(s3.commands.len(), 1);
    assert_eq!(s3.commands[0].to, point(40.0, 40.0));
}

#[test]
fn path_without_move() {
    let path = parse_path("L 1 1 Z L 2 2", point(-1.0, 0.0)).unwrap();

    assert_eq!(path.subpaths.len(), 2);
    assert_eq!(path.subpaths[0].start, point(-1.0, 0.0));
    assert_eq!(path.subpaths[1].start, point(-1.0, 0.0));
    assert_eq!(path.subpaths[1].commands[0].to, point(2.0, 2.0));
}

#[test]
fn errors() {
    let error = |src: &str| parse_subpath(src, point(0.0, 0.0)).err();

    assert_eq!(
        error("M10,10Zh10"),
        Some(ParseError {
            kind: ParseErrorKind::SubpathMove,
            offset: 7
        })
    );
    assert_eq!(
        error("R"),
        Some(ParseError {
            kind: ParseErrorKind::InvalidCommand,
            offset: 0
        })
    );
    assert_eq!(
        error("L10Z"),
        Some(ParseError {
            kind: ParseErrorKind::InvalidNumber,
            offset: 3
        })
    );
    assert_eq!(
        error("L 10"),
        Some(ParseError {
            kind: ParseErrorKind::Incomplete,
            offset: 4
        })
    );
    assert_eq!(
        error("M 0 0 L 1 1 M 2 2"),
        Some(ParseError {
            kind: ParseErrorKind::SubpathMove,
            offset: 12
        })
    );
    assert_eq!(
        error("A 1 1 0 2 0 3 3"),
        Some(ParseError {
            kind: ParseErrorKind::InvalidNumber,
            offset: 8
        })
    );

    // Errors don't produce a partial path.
    assert!(parse_path("M 0 0 L 1 1 L 2", point(0.0, 0.0)).is_err());
}

#[test]
fn empty() {
    let subpath = parse_subpath("", point(1.0, 2.0)).unwrap();
    assert!(subpath.is_empty());
    assert_eq!(subpath.start, point(1.0, 2.0));

    assert!(parse_path("", point(0.0, 0.0)).unwrap().is_empty());
    assert!(parse_path(" \n\t", point(0.0, 0.0)).unwrap().is_empty());
}

#[test]
fn error_display() {
    let error = ParseError {
        kind: ParseErrorKind::InvalidCommand,
        offset: 3,
    };
    assert_eq!(
        error.to_string(),
        "path data error at byte 3: invalid command"
    );
}
