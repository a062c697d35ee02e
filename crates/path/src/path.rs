//! The path and subpath data structures.
//!

use crate::geom::ArcFlags;
use crate::math::*;

use std::slice;

/// The kind of a command along with its command-specific data.
///
/// The start and end points are not part of the verb: the end point is stored
/// in the [`Command`] and the start is the end of the previous command.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Verb {
    Line,
    Quadratic { ctrl: Point },
    /// A quadratic bézier curve whose control point is the reflection of the previous
    /// quadratic control point through the current position.
    SmoothQuadratic,
    Cubic { ctrl1: Point, ctrl2: Point },
    /// A cubic bézier curve whose first control point is the reflection of the previous
    /// cubic second control point through the current position.
    SmoothCubic { ctrl2: Point },
    /// An axis-aligned elliptic arc in SVG end-point notation.
    Arc { radii: Vector, flags: ArcFlags },
}

/// A single command of a subpath.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Command {
    pub to: Point,
    pub verb: Verb,
}

impl Command {
    #[inline]
    pub fn line(to: Point) -> Self {
        Command {
            to,
            verb: Verb::Line,
        }
    }
}

/// A continuous chain of commands starting at `start`.
///
/// If `closed` is true, an edge from the last command's end point back to `start`
/// is implied.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Subpath {
    pub start: Point,
    pub closed: bool,
    pub commands: Vec<Command>,
}

impl Subpath {
    /// Creates an empty open subpath.
    #[inline]
    pub fn new(start: Point) -> Self {
        Subpath {
            start,
            closed: false,
            commands: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Appends a command and returns a reference to it for in-place adjustments.
    pub fn push(&mut self, command: Command) -> &mut Command {
        let idx = self.commands.len();
        self.commands.push(command);
        &mut self.commands[idx]
    }

    pub fn line_to(&mut self, to: Point) -> &mut Command {
        self.push(Command::line(to))
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) -> &mut Command {
        self.push(Command {
            to,
            verb: Verb::Quadratic { ctrl },
        })
    }

    pub fn smooth_quadratic_bezier_to(&mut self, to: Point) -> &mut Command {
        self.push(Command {
            to,
            verb: Verb::SmoothQuadratic,
        })
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Command {
        self.push(Command {
            to,
            verb: Verb::Cubic { ctrl1, ctrl2 },
        })
    }

    pub fn smooth_cubic_bezier_to(&mut self, ctrl2: Point, to: Point) -> &mut Command {
        self.push(Command {
            to,
            verb: Verb::SmoothCubic { ctrl2 },
        })
    }

    pub fn arc_to(&mut self, radii: Vector, flags: ArcFlags, to: Point) -> &mut Command {
        self.push(Command {
            to,
            verb: Verb::Arc { radii, flags },
        })
    }

    /// Marks the subpath as closed.
    #[inline]
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn iter(&self) -> slice::Iter<Command> {
        self.commands.iter()
    }
}

impl<'l> IntoIterator for &'l Subpath {
    type Item = &'l Command;
    type IntoIter = slice::Iter<'l, Command>;

    fn into_iter(self) -> slice::Iter<'l, Command> {
        self.iter()
    }
}

/// A sequence of independent subpaths.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    pub subpaths: Vec<Subpath>,
}

impl Path {
    /// Creates an empty `Path`.
    #[inline]
    pub fn new() -> Self {
        Path {
            subpaths: Vec::new(),
        }
    }

    /// Starts a new subpath at `to` and returns it.
    pub fn move_to(&mut self, to: Point) -> &mut Subpath {
        self.push(Subpath::new(to))
    }

    pub fn push(&mut self, subpath: Subpath) -> &mut Subpath {
        let idx = self.subpaths.len();
        self.subpaths.push(subpath);
        &mut self.subpaths[idx]
    }

    #[inline]
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.subpaths.len()
    }

    pub fn iter(&self) -> slice::Iter<Subpath> {
        self.subpaths.iter()
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = &'l Subpath;
    type IntoIter = slice::Iter<'l, Subpath>;

    fn into_iter(self) -> slice::Iter<'l, Subpath> {
        self.iter()
    }
}

impl From<Subpath> for Path {
    fn from(subpath: Subpath) -> Self {
        Path {
            subpaths: vec![subpath],
        }
    }
}

#[test]
fn build_subpath() {
    let mut subpath = Subpath::new(point(1.0, 2.0));
    assert!(subpath.is_empty());

    subpath.line_to(point(3.0, 4.0));
    subpath.cubic_bezier_to(point(5.0, 5.0), point(6.0, 6.0), point(7.0, 7.0));
    subpath.close();

    assert_eq!(subpath.len(), 2);
    assert!(subpath.closed);
    assert_eq!(subpath.commands[0].verb, Verb::Line);
    assert_eq!(subpath.commands[1].to, point(7.0, 7.0));
}

#[test]
fn commands_are_mutable_in_place() {
    let mut subpath = Subpath::new(point(0.0, 0.0));
    subpath.line_to(point(1.0, 1.0)).to = point(2.0, 2.0);

    let cmd = subpath.quadratic_bezier_to(point(3.0, 0.0), point(4.0, 4.0));
    if let Verb::Quadratic { ref mut ctrl } = cmd.verb {
        *ctrl = point(3.0, 3.0);
    }

    assert_eq!(subpath.commands[0].to, point(2.0, 2.0));
    assert_eq!(
        subpath.commands[1].verb,
        Verb::Quadratic {
            ctrl: point(3.0, 3.0)
        }
    );
}

#[test]
fn build_path() {
    let mut path = Path::new();
    assert!(path.is_empty());

    path.move_to(point(0.0, 0.0)).line_to(point(1.0, 0.0));
    let second = path.move_to(point(10.0, 10.0));
    second.arc_to(vector(5.0, 5.0), ArcFlags::default(), point(20.0, 10.0));
    second.close();

    assert_eq!(path.len(), 2);
    assert_eq!(path.subpaths()[0].start, point(0.0, 0.0));
    assert!(!path.subpaths()[0].closed);
    assert!(path.subpaths()[1].closed);

    let starts: Vec<Point> = path.iter().map(|sub| sub.start).collect();
    assert_eq!(starts, vec![point(0.0, 0.0), point(10.0, 10.0)]);
}
