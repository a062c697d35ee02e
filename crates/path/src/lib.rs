#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures to describe paths (vector graphics) and turn them into polylines.
//!
//! A [`Path`] is a sequence of independent [`Subpath`]s. Each subpath has a start
//! point and a chain of [`Command`]s, every command carrying only its end point and
//! the data specific to its [`Verb`]. The start of a command is implicitly the end of
//! the previous one.
//!
//! This crate is reexported in `fringe`.
//!
//! # Examples
//!
//! ```
//! # extern crate fringe_path;
//! # fn main() {
//! use fringe_path::{Path, FlattenOptions};
//! use fringe_path::math::point;
//!
//! let mut path = Path::new();
//!
//! let subpath = path.move_to(point(0.0, 0.0));
//! subpath.line_to(point(10.0, 0.0));
//! subpath.quadratic_bezier_to(point(10.0, 10.0), point(0.0, 10.0));
//! subpath.close();
//!
//! for polyline in path.flattened(&FlattenOptions::default()) {
//!     println!("{:?}", polyline);
//! }
//! # }
//! ```
//!

pub use fringe_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod flatten;
pub mod path;

#[doc(inline)]
pub use crate::flatten::{flatten, flatten_into, FlattenOptions};
pub use crate::geom::ArcFlags;
#[doc(inline)]
pub use crate::path::{Command, Path, Subpath, Verb};

pub mod math {
    //! f32 version of the fringe_geom types used everywhere. Most other fringe crates
    //! reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }
}

/// The two possible orientations for the edges of a shape to be built in.
///
/// Positive winding corresponds to the positive orientation in trigonometry, which is
/// counter-clockwise in a y-up coordinate system. Negative winding is clockwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Winding {
    Positive,
    Negative,
}

impl Winding {
    /// The opposite orientation.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Winding::Positive => Winding::Negative,
            Winding::Negative => Winding::Positive,
        }
    }
}
