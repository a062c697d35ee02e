#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]
#![no_std]

//! Antialiased stroke and fill tessellation of 2D polylines.
//!
//! This crate is reexported in `fringe`.
//!
//! ## Overview
//!
//! The tessellators take flattened polylines (see `fringe_path::flatten`) and produce
//! vertices that carry, next to their position, an antialiasing coordinate (`aa`) and a
//! color. Shaders use the `aa` coordinate to ramp the coverage down to zero on the
//! outer edge of a thin band of geometry, the *fringe*, that surrounds the shape.
//!
//! The most interesting types and traits of this crate are:
//!
//! * [StrokeTessellator](struct.StrokeTessellator.html) - Turns a polyline into a
//!   triangle strip, optionally with antialiased caps.
//! * [FillTessellator](struct.FillTessellator.html) - Produces an antialiased fill, either
//!   as a pair of vertex streams (a triangle fan for the interior and a strip for the
//!   fringe band) or as a single indexed mesh.
//! * [`GeometryBuilder`](geometry_builder/trait.GeometryBuilder.html) - (See the documentation
//!   of the [geometry_builder module](geometry_builder/index.html)) which the above two are
//!   built on. This trait provides an interface for types that help with building and
//!   assembling the vertices and triangles that form the tessellation.
//!
//! Stroke and two-output fill vertices are emitted in strip or fan order without indices.
//! The functions of the [indices](indices/index.html) module generate the matching index
//! buffers when needed.
//!
//! ## Orientation
//!
//! The tessellators work in a y-up coordinate system where counter-clockwise polygons have
//! a positive area. Polylines of either orientation are handled: the extrusion is flipped
//! for clockwise input so that the fringe always ends up outside of the shape.
//!
//! ## Example
//!
//! ```
//! extern crate fringe_tessellation as tess;
//! use tess::{StrokeOptions, StrokeTessellator, Vertex};
//! use tess::math::point;
//!
//! let square = [
//!     point(0.0, 0.0),
//!     point(10.0, 0.0),
//!     point(10.0, 10.0),
//!     point(0.0, 10.0),
//!     point(0.0, 0.0),
//! ];
//!
//! let mut vertices: Vec<Vertex> = Vec::new();
//! StrokeTessellator::new().tessellate_polyline(
//!     &square,
//!     &[],
//!     &StrokeOptions::default().with_line_width(2.0),
//!     &mut vertices,
//! ).unwrap();
//!
//! // One pair of vertices per corner.
//! assert_eq!(vertices.len(), 8);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use fringe_path as path;

pub extern crate fringe_algorithms as algorithms;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod fill;
pub mod geometry_builder;
pub mod indices;
mod math_utils;
mod polyline;
mod stroke;

#[cfg(test)]
mod tessellation_tests;

pub use crate::path::geom;
pub use crate::path::math;

#[doc(inline)]
pub use crate::fill::*;

#[doc(inline)]
pub use crate::stroke::*;

#[doc(inline)]
pub use crate::geometry_builder::{
    simple_builder, BuffersBuilder, GeometryBuilder, GeometryBuilderError, IndexedGeometryBuilder,
    NoOutput, Positions, SimpleBuffersBuilder, Verbatim, VertexBuffers, VertexConstructor,
};

pub use crate::error::*;

#[doc(inline)]
pub use crate::indices::{
    closed_triangle_strip_indices, triangle_fan_indices, triangle_strip_indices,
};

use crate::math::{Point, Vector};

use core::ops::{Add, Sub};

/// An RGBA color with 8 bits per channel.
pub type Color = [u8; 4];

/// The color used for points that don't have one.
pub const OPAQUE_BLACK: Color = [0, 0, 0, 255];

/// The vertex produced by the tessellators.
///
/// The layout is stable: two `f32` for the position, two `f32` for the antialiasing
/// coordinate and four `u8` for the color, 20 bytes in total.
///
/// `aa.x` is `1.0` on the core of the shape and `0.0` on the far end of cap fringes.
/// `aa.y` is `1.0` on the outer edge of a band, `-1.0` on the inner edge of a stroke and
/// `0.0` on the inner edge of a fill fringe.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub position: Point,
    pub aa: Vector,
    pub color: Color,
}

impl Vertex {
    #[inline]
    pub fn new(position: Point, aa: Vector, color: Color) -> Self {
        Vertex {
            position,
            aa,
            color,
        }
    }
}

/// Parameters for the stroke tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeOptions {
    /// Line width
    ///
    /// Must be greater than zero.
    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// Treat the polyline as a closed ring even if its first and last points differ.
    ///
    /// Default value: `false`.
    pub looped: bool,

    /// Length of the antialiasing fringe added before the first and after the last point
    /// of open polylines. Zero disables the caps. Ignored for rings.
    ///
    /// Default value: `StrokeOptions::DEFAULT_CAP_FRINGE`.
    pub cap_fringe: f32,

    /// Width of the antialiasing fringe, split evenly between both sides of the stroke.
    ///
    /// Default value: `StrokeOptions::DEFAULT_FRINGE`.
    pub fringe: f32,

    /// Shifts the stroke relative to the polyline, in `[-1, 1]`.
    ///
    /// `0.0` centers the stroke on the polyline, `1.0` puts it entirely outside of the
    /// shape and `-1.0` entirely inside.
    ///
    /// Default value: `StrokeOptions::DEFAULT_EXTRUDE`.
    pub extrude: f32,
}

impl StrokeOptions {
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    pub const DEFAULT_CAP_FRINGE: f32 = 0.0;
    pub const DEFAULT_FRINGE: f32 = 0.0;
    pub const DEFAULT_EXTRUDE: f32 = 0.0;

    pub const DEFAULT: Self = StrokeOptions {
        line_width: Self::DEFAULT_LINE_WIDTH,
        looped: false,
        cap_fringe: Self::DEFAULT_CAP_FRINGE,
        fringe: Self::DEFAULT_FRINGE,
        extrude: Self::DEFAULT_EXTRUDE,
    };

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub const fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    #[inline]
    pub const fn with_cap_fringe(mut self, cap_fringe: f32) -> Self {
        self.cap_fringe = cap_fringe;
        self
    }

    #[inline]
    pub const fn with_fringe(mut self, fringe: f32) -> Self {
        self.fringe = fringe;
        self
    }

    #[inline]
    pub fn with_extrude(mut self, extrude: f32) -> Self {
        assert!((-1.0..=1.0).contains(&extrude));
        self.extrude = extrude;
        self
    }

    /// Distance between the polyline and the outer edge of the stroke, fringe included.
    #[inline]
    pub(crate) fn outer_width(&self) -> f32 {
        self.line_width * (0.5 + 0.5 * self.extrude) + self.fringe * 0.5
    }

    /// Distance between the polyline and the inner edge of the stroke, fringe included.
    #[inline]
    pub(crate) fn inner_width(&self) -> f32 {
        self.line_width * (0.5 - 0.5 * self.extrude) + self.fringe * 0.5
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters for the fill tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FillOptions {
    /// Width of the antialiasing band around the fill. Half of it lies inside the
    /// polygon, half outside.
    ///
    /// Must be greater than zero.
    /// Default value: `FillOptions::DEFAULT_FRINGE`.
    pub fringe: f32,

    /// Treat the polyline as a closed ring even if its first and last points differ.
    ///
    /// Only used by `FillTessellator::tessellate_polyline`, the combined fill always
    /// closes the polygon.
    ///
    /// Default value: `false`.
    pub looped: bool,
}

impl FillOptions {
    pub const DEFAULT_FRINGE: f32 = 1.0;

    pub const DEFAULT: Self = FillOptions {
        fringe: Self::DEFAULT_FRINGE,
        looped: false,
    };

    #[inline]
    pub fn fringe(fringe: f32) -> Self {
        Self::DEFAULT.with_fringe(fringe)
    }

    #[inline]
    pub const fn with_fringe(mut self, fringe: f32) -> Self {
        self.fringe = fringe;
        self
    }

    #[inline]
    pub const fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An indexed mesh containing both the interior and the antialiasing band of a fill.
pub type CombinedFill<OutputIndex = u32> = VertexBuffers<Vertex, OutputIndex>;

type Index = u32;

/// A virtual vertex offset in a geometry.
///
/// The `VertexId`s are only valid between `GeometryBuilder::begin_geometry` and
/// `GeometryBuilder::end_geometry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub Index);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);

    pub fn offset(self) -> Index {
        self.0
    }

    pub fn to_usize(self) -> usize {
        self.0 as usize
    }

    pub fn from_usize(v: usize) -> Self {
        VertexId(v as Index)
    }
}

impl Add<u32> for VertexId {
    type Output = Self;
    fn add(self, rhs: u32) -> Self {
        VertexId(self.0 + rhs)
    }
}

impl Sub<u32> for VertexId {
    type Output = Self;
    fn sub(self, rhs: u32) -> Self {
        VertexId(self.0 - rhs)
    }
}

impl From<u16> for VertexId {
    fn from(v: u16) -> Self {
        VertexId(v as Index)
    }
}
impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        VertexId(v)
    }
}
impl From<i32> for VertexId {
    fn from(v: i32) -> Self {
        VertexId(v as Index)
    }
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0 as u16
    }
}
impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}
impl From<VertexId> for i32 {
    fn from(v: VertexId) -> Self {
        v.0 as i32
    }
}
impl From<VertexId> for usize {
    fn from(v: VertexId) -> Self {
        v.0 as usize
    }
}

#[test]
fn vertex_layout() {
    assert_eq!(core::mem::size_of::<Vertex>(), 20);
}

#[test]
fn stroke_widths() {
    let options = StrokeOptions::default().with_line_width(4.0);
    assert_eq!(options.outer_width(), 2.0);
    assert_eq!(options.inner_width(), 2.0);

    let options = options.with_extrude(1.0).with_fringe(1.0);
    assert_eq!(options.outer_width(), 4.5);
    assert_eq!(options.inner_width(), 0.5);
}

#[test]
fn default_options() {
    assert_eq!(StrokeOptions::default().line_width, 1.0);
    assert_eq!(StrokeOptions::default().cap_fringe, 0.0);
    assert!(!StrokeOptions::default().looped);
    assert_eq!(FillOptions::default().fringe, 1.0);
    assert_eq!(FillOptions::fringe(2.0).fringe, 2.0);
}

#[test]
#[should_panic]
fn test_with_invalid_extrude() {
    let _ = StrokeOptions::default().with_extrude(1.5);
}
