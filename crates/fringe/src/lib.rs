#![deny(bare_trait_objects)]

//! Turn 2D vector paths into antialiased triangle geometry.
//!
//! # Crates
//!
//! This meta-crate (`fringe`) reexports the following sub-crates for convenience:
//!
//! * **fringe_tessellation** - Antialiased stroke and fill tessellation of polylines.
//! * **fringe_path** - The subpath command model and its flattening into polylines.
//! * **fringe_algorithms** - Polygon area and winding.
//! * **fringe_geom** - Quadratic and cubic bézier curves and elliptic arcs.
//! * **fringe_svg** - An SVG path data parser (behind the `svg` feature).
//!
//! Each `fringe_<name>` crate is reexported as a `<name>` module in `fringe`. For example:
//!
//! ```ignore
//! extern crate fringe_tessellation;
//! use fringe_tessellation::StrokeTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate fringe;
//! use fringe::tessellation::StrokeTessellator;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! The parser is disabled by default. It can be added with the `svg` feature flag.
//!
//! # Examples
//!
//! ## Stroking and filling a path
//!
//! ```
//! extern crate fringe;
//! use fringe::math::point;
//! use fringe::path::{FlattenOptions, Path};
//! use fringe::tessellation::*;
//!
//! fn main() {
//!     let mut path = Path::new();
//!     let subpath = path.move_to(point(0.0, 0.0));
//!     subpath.line_to(point(100.0, 0.0));
//!     subpath.quadratic_bezier_to(point(100.0, 100.0), point(0.0, 100.0));
//!     subpath.close();
//!
//!     let flatten_options = FlattenOptions::default();
//!
//!     // An outline with antialiased edges.
//!     let mut outline: VertexBuffers<Vertex, u16> = VertexBuffers::new();
//!     StrokeTessellator::new().tessellate_subpath(
//!         &path.subpaths()[0],
//!         &flatten_options,
//!         &[],
//!         &StrokeOptions::default().with_line_width(2.0).with_fringe(1.0),
//!         &mut simple_builder(&mut outline),
//!     ).unwrap();
//!     closed_triangle_strip_indices(outline.vertices.len(), &mut outline.indices);
//!
//!     // The interior with its antialiasing band, as one indexed mesh.
//!     let mut fill: VertexBuffers<Vertex, u32> = VertexBuffers::new();
//!     FillTessellator::new().tessellate_subpath(
//!         &path.subpaths()[0],
//!         &flatten_options,
//!         &[],
//!         &FillOptions::default(),
//!         &mut simple_builder(&mut fill),
//!     ).unwrap();
//!
//!     // The geometry is ready to be uploaded to the GPU.
//!     println!(" -- {} vertices {} indices", fill.vertices.len(), fill.indices.len());
//! }
//! ```
//!
//! ## Rendering the tessellated geometry
//!
//! fringe does not provide any GPU abstraction or rendering backend. Vertices have a
//! fixed `#[repr(C)]` layout (position, antialiasing coordinate, color) so that they can
//! be uploaded as they are. The fragment shader is expected to multiply the alpha by a
//! coverage derived from the interpolated antialiasing coordinate, for example
//! `aa.x * (1.0 - abs(aa.y))` for strokes and `aa.x * (1.0 - aa.y)` for fills.

pub extern crate fringe_algorithms;
#[cfg(feature = "svg")]
pub extern crate fringe_svg;
pub extern crate fringe_tessellation;

pub use fringe_algorithms as algorithms;
#[cfg(feature = "svg")]
pub use fringe_svg as svg;
pub use fringe_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::path;

pub use path::math;
