//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! The tessellators in this crate don't write into a particular buffer type. Instead they
//! hand each [`Vertex`](../struct.Vertex.html) they produce to a geometry builder, which
//! decides what to do with it: push it into a `Vec`, convert it into an application specific
//! vertex type, write it into a mapped GPU buffer, or simply count it.
//!
//! See:
//!
//! * [`GeometryBuilder`](trait.GeometryBuilder.html), implemented by all outputs. Strokes
//!   and the two-output fill only need this.
//! * [`IndexedGeometryBuilder`](trait.IndexedGeometryBuilder.html), for outputs that also
//!   accept triangles. The combined fill writes into these.
//!
//! It is very common to push vertices and indices into a pair of vectors, so to facilitate
//! this pattern this module also provides:
//!
//! * The struct [`VertexBuffers`](struct.VertexBuffers.html), a simple pair of vectors of
//!   indices and vertices (generic parameters).
//! * The struct [`BuffersBuilder`](struct.BuffersBuilder.html) which writes into a
//!   `VertexBuffers` and implements both builder traits. Producing the output vertices is
//!   delegated to a [`VertexConstructor`](trait.VertexConstructor.html).
//!
//! `Vec<Vertex>` also implements `GeometryBuilder` directly, which is handy for strokes.
//!
//! ## Examples
//!
//! ### Generating custom vertices
//!
//! ```
//! extern crate fringe_tessellation as tess;
//! use tess::{BuffersBuilder, StrokeOptions, StrokeTessellator, Vertex, VertexBuffers};
//! use tess::math::point;
//!
//! // Our custom vertex.
//! #[derive(Copy, Clone, Debug)]
//! pub struct MyVertex {
//!     position: [f32; 2],
//!     coverage: f32,
//! }
//!
//! fn main() {
//!     let mut output: VertexBuffers<MyVertex, u16> = VertexBuffers::new();
//!     let mut tessellator = StrokeTessellator::new();
//!
//!     tessellator.tessellate_polyline(
//!         &[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
//!         &[],
//!         &StrokeOptions::default().with_line_width(2.0),
//!         &mut BuffersBuilder::new(&mut output, |vertex: Vertex| MyVertex {
//!             position: vertex.position.to_array(),
//!             coverage: vertex.aa.x,
//!         }),
//!     ).unwrap();
//!
//!     assert_eq!(output.vertices.len(), 6);
//! }
//! ```
//!
//! ### Generating a completely custom output
//!
//! ```
//! extern crate fringe_tessellation as tess;
//! use tess::{GeometryBuilder, GeometryBuilderError, StrokeOptions, StrokeTessellator, Vertex, VertexId};
//! use tess::math::point;
//!
//! // A geometry builder that only tracks the bounds of the generated vertices.
//! pub struct Bounds {
//!     min_y: f32,
//!     max_y: f32,
//!     count: u32,
//! }
//!
//! impl GeometryBuilder for Bounds {
//!     fn begin_geometry(&mut self) {
//!         self.min_y = f32::MAX;
//!         self.max_y = f32::MIN;
//!         self.count = 0;
//!     }
//!
//!     fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexId, GeometryBuilderError> {
//!         self.min_y = self.min_y.min(vertex.position.y);
//!         self.max_y = self.max_y.max(vertex.position.y);
//!         self.count += 1;
//!         Ok(VertexId(self.count - 1))
//!     }
//! }
//!
//! fn main() {
//!     let mut bounds = Bounds { min_y: 0.0, max_y: 0.0, count: 0 };
//!     StrokeTessellator::new().tessellate_polyline(
//!         &[point(0.0, 0.0), point(10.0, 0.0)],
//!         &[],
//!         &StrokeOptions::default().with_line_width(4.0),
//!         &mut bounds,
//!     ).unwrap();
//!
//!     assert_eq!(bounds.count, 4);
//!     assert_eq!(bounds.min_y, -2.0);
//!     assert_eq!(bounds.max_y, 2.0);
//! }
//! ```
//!

pub use crate::error::GeometryBuilderError;
use crate::math::Point;
use crate::{Index, Vertex, VertexId};

use alloc::vec::Vec;
use core::convert::From;
use core::ops::Add;

/// An interface separating tessellators from the actual vertex storage.
///
/// See the [`geometry_builder`](index.html) module documentation for more detailed explanation.
pub trait GeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Called at the end of a generation.
    fn end_geometry(&mut self) {}

    /// Inserts a vertex and returns its id.
    ///
    /// The id is only valid between begin_geometry and end_geometry.
    fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexId, GeometryBuilderError>;

    /// abort_geometry is called instead of end_geometry if an error occurred while producing
    /// the geometry and we won't be able to finish.
    ///
    /// The implementation is expected to discard the geometry that was generated since the last
    /// time begin_geometry was called, and to remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// A geometry builder that also accepts triangles.
pub trait IndexedGeometryBuilder: GeometryBuilder {
    /// Insert a triangle made of vertices that were added after the last call to begin_geometry.
    ///
    /// This method can only be called between begin_geometry and end_geometry.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);
}

/// Structure that holds the vertex and index data.
///
/// Usually written into though temporary `BuffersBuilder` objects.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexBuffers<OutputVertex, OutputIndex> {
    pub vertices: Vec<OutputVertex>,
    pub indices: Vec<OutputIndex>,
}

impl<OutputVertex, OutputIndex> VertexBuffers<OutputVertex, OutputIndex> {
    /// Constructor
    pub fn new() -> Self {
        VertexBuffers::with_capacity(512, 1024)
    }

    /// Constructor
    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        VertexBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
        }
    }

    /// Empty the buffers without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

/// A temporary view on a `VertexBuffers` object which facilitate the population of vertex and index
/// data.
///
/// Vertex ids are positions in the vertex buffer. A constant offset can be added to all
/// emitted indices with `with_vertex_offset`, for example when the vertices are later
/// uploaded after some other geometry.
///
/// The `VertexConstructor` does the translation from [`Vertex`](../struct.Vertex.html) to
/// `OutputVertex`.
pub struct BuffersBuilder<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor> {
    buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>,
    first_vertex: Index,
    first_index: Index,
    vertex_offset: Index,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor>
    BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
{
    pub fn new(buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>, ctor: Ctor) -> Self {
        let first_vertex = buffers.vertices.len() as Index;
        let first_index = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            first_vertex,
            first_index,
            vertex_offset: 0,
            vertex_constructor: ctor,
        }
    }

    pub fn with_vertex_offset(mut self, offset: Index) -> Self {
        self.vertex_offset = offset;

        self
    }

    /// Consumes self and returns a builder with opposite triangle face winding.
    pub fn with_inverted_winding(self) -> InvertWinding<Self> {
        InvertWinding(self)
    }

    pub fn buffers<'a, 'b: 'a>(&'b self) -> &'a VertexBuffers<OutputVertex, OutputIndex> {
        self.buffers
    }
}

/// A wrapper for geometry builders that inverts the triangle face winding.
pub struct InvertWinding<B>(B);

impl<B: GeometryBuilder> GeometryBuilder for InvertWinding<B> {
    fn begin_geometry(&mut self) {
        self.0.begin_geometry();
    }

    fn end_geometry(&mut self) {
        self.0.end_geometry()
    }

    #[inline]
    fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexId, GeometryBuilderError> {
        self.0.add_vertex(vertex)
    }

    fn abort_geometry(&mut self) {
        self.0.abort_geometry();
    }
}

impl<B: IndexedGeometryBuilder> IndexedGeometryBuilder for InvertWinding<B> {
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        // Invert the triangle winding by flipping b and c.
        self.0.add_triangle(a, c, b);
    }
}

/// A trait specifying how to create vertex values.
pub trait VertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, vertex: Vertex) -> OutputVertex;
}

/// A simple vertex constructor that just takes the position.
pub struct Positions;

impl VertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, vertex: Vertex) -> Point {
        vertex.position
    }
}

/// A vertex constructor that keeps the tessellator's vertices as they are.
pub struct Verbatim;

impl VertexConstructor<Vertex> for Verbatim {
    fn new_vertex(&mut self, vertex: Vertex) -> Vertex {
        vertex
    }
}

impl<F, OutputVertex> VertexConstructor<OutputVertex> for F
where
    F: Fn(Vertex) -> OutputVertex,
{
    fn new_vertex(&mut self, vertex: Vertex) -> OutputVertex {
        self(vertex)
    }
}

/// A `BuffersBuilder` that stores the tessellator's vertices directly.
pub type SimpleBuffersBuilder<'l, OutputIndex = u16> =
    BuffersBuilder<'l, Vertex, OutputIndex, Verbatim>;

/// Creates a `SimpleBuffersBuilder`.
pub fn simple_builder<OutputIndex>(
    buffers: &mut VertexBuffers<Vertex, OutputIndex>,
) -> SimpleBuffersBuilder<OutputIndex> {
    BuffersBuilder::new(buffers, Verbatim)
}

impl<'l, OutputVertex, OutputIndex, Ctor> GeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: VertexConstructor<OutputVertex>,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffers.vertices.len() as Index;
        self.first_index = self.buffers.indices.len() as Index;
    }

    fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexId, GeometryBuilderError> {
        self.buffers
            .vertices
            .push(self.vertex_constructor.new_vertex(vertex));
        let len = self.buffers.vertices.len();
        if len > OutputIndex::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        Ok(VertexId((len - 1) as Index))
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.first_vertex as usize);
        self.buffers.indices.truncate(self.first_index as usize);
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> IndexedGeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: VertexConstructor<OutputVertex>,
{
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
        debug_assert!(a != VertexId::INVALID);
        debug_assert!(b != VertexId::INVALID);
        debug_assert!(c != VertexId::INVALID);
        self.buffers.indices.push((a + self.vertex_offset).into());
        self.buffers.indices.push((b + self.vertex_offset).into());
        self.buffers.indices.push((c + self.vertex_offset).into());
    }
}

/// Collects the vertices in order. Ids are positions in the vector.
impl GeometryBuilder for Vec<Vertex> {
    fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexId, GeometryBuilderError> {
        if self.len() >= u32::MAX as usize {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.push(vertex);
        Ok(VertexId::from_usize(self.len() - 1))
    }
}

/// A geometry builder that does not output any geometry.
///
/// Mostly useful for testing.
pub struct NoOutput {
    next_vertex: u32,
}

impl NoOutput {
    pub fn new() -> Self {
        NoOutput { next_vertex: 0 }
    }

    /// Number of vertices added since the last `begin_geometry`.
    pub fn vertex_count(&self) -> u32 {
        self.next_vertex
    }
}

impl Default for NoOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuilder for NoOutput {
    fn begin_geometry(&mut self) {
        self.next_vertex = 0;
    }

    fn add_vertex(&mut self, _vertex: Vertex) -> Result<VertexId, GeometryBuilderError> {
        if self.next_vertex == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.next_vertex += 1;
        Ok(VertexId(self.next_vertex - 1))
    }
}

impl IndexedGeometryBuilder for NoOutput {
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
    }
}

/// Provides the maximum value of an index.
///
/// This should be the maximum value representable by the index type up
/// to u32::MAX because the tessellators can't internally represent more
/// than u32::MAX indices.
pub trait MaxIndex {
    const MAX: usize;
}

impl MaxIndex for u16 {
    const MAX: usize = u16::MAX as usize;
}
impl MaxIndex for u32 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for i32 {
    const MAX: usize = i32::MAX as usize;
}
// The tessellators internally use u32 indices so we can't have more than u32::MAX
impl MaxIndex for usize {
    const MAX: usize = u32::MAX as usize;
}

#[cfg(test)]
use crate::math::{point, vector};

#[cfg(test)]
fn test_vertex(x: f32) -> Vertex {
    Vertex::new(point(x, 0.0), vector(1.0, 0.0), crate::OPAQUE_BLACK)
}

#[test]
fn buffers_builder_offsets() {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    buffers.vertices.push(point(-1.0, -1.0));

    let mut builder = BuffersBuilder::new(&mut buffers, Positions);
    builder.begin_geometry();
    let a = builder.add_vertex(test_vertex(0.0)).unwrap();
    let b = builder.add_vertex(test_vertex(1.0)).unwrap();
    let c = builder.add_vertex(test_vertex(2.0)).unwrap();
    assert_eq!((a, b, c), (VertexId(1), VertexId(2), VertexId(3)));
    builder.add_triangle(a, b, c);
    builder.end_geometry();

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices, [1, 2, 3]);

    let mut offset_buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut offset_buffers, Positions).with_vertex_offset(10);
    builder.begin_geometry();
    let a = builder.add_vertex(test_vertex(0.0)).unwrap();
    let b = builder.add_vertex(test_vertex(1.0)).unwrap();
    let c = builder.add_vertex(test_vertex(2.0)).unwrap();
    builder.add_triangle(a, b, c);
    builder.end_geometry();

    assert_eq!(offset_buffers.indices, [10, 11, 12]);
}

#[test]
fn abort_discards_geometry() {
    let mut buffers: VertexBuffers<Vertex, u32> = VertexBuffers::new();
    {
        let mut builder = simple_builder(&mut buffers);
        builder.begin_geometry();
        let a = builder.add_vertex(test_vertex(0.0)).unwrap();
        let b = builder.add_vertex(test_vertex(1.0)).unwrap();
        let c = builder.add_vertex(test_vertex(2.0)).unwrap();
        builder.add_triangle(a, b, c);
        builder.end_geometry();

        builder.begin_geometry();
        builder.add_vertex(test_vertex(3.0)).unwrap();
        builder.abort_geometry();
    }

    assert_eq!(buffers.vertices.len(), 3);
    assert_eq!(buffers.indices.len(), 3);
}

#[test]
fn inverted_winding() {
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers, Positions).with_inverted_winding();
    builder.begin_geometry();
    let a = builder.add_vertex(test_vertex(0.0)).unwrap();
    let b = builder.add_vertex(test_vertex(1.0)).unwrap();
    let c = builder.add_vertex(test_vertex(2.0)).unwrap();
    builder.add_triangle(a, b, c);
    builder.end_geometry();

    assert_eq!(buffers.indices, [0, 2, 1]);
}

#[test]
fn vec_output() {
    let mut vertices: Vec<Vertex> = Vec::new();
    assert_eq!(vertices.add_vertex(test_vertex(0.0)), Ok(VertexId(0)));
    assert_eq!(vertices.add_vertex(test_vertex(1.0)), Ok(VertexId(1)));
    assert_eq!(vertices[1].position, point(1.0, 0.0));
}
