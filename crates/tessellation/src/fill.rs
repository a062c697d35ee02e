use crate::algorithms::area::polygon_area;
use crate::geometry_builder::{simple_builder, GeometryBuilder, IndexedGeometryBuilder, MaxIndex};
use crate::math::*;
use crate::path::{flatten_into, FlattenOptions, Subpath};
use crate::polyline::{Corner, Ring};
use crate::{
    Color, CombinedFill, FillOptions, TessellationError, TessellationResult,
    UnsupportedParameter, Vertex, VertexBuffers, VertexId, OPAQUE_BLACK,
};

use alloc::vec::Vec;
use core::ops::Add;

/// A context object that can tessellate antialiased fills of simple polygons.
///
/// The polygon is extruded by half of the fringe on each side. The inner edge of the
/// fringe is the boundary of the opaque interior and the outer edge is where the coverage
/// reaches zero.
///
/// There are two ways to get the geometry out:
///
/// - [`tessellate_polyline`](#method.tessellate_polyline) writes the interior as a triangle
///   fan into one builder and the fringe as a triangle strip into another. No index is
///   produced, see the [indices](indices/index.html) module.
/// - [`tessellate_combined`](#method.tessellate_combined) writes both into a single indexed
///   mesh.
///
/// The interior is triangulated as a fan around the first point, which is only correct
/// for convex polygons or more generally polygons that are star-shaped around that point.
///
/// # Examples
///
/// ```
/// # extern crate fringe_tessellation as tess;
/// # use tess::math::*;
/// # use tess::*;
/// # fn main() {
/// let triangle = [point(0.0, 0.0), point(10.0, 0.0), point(5.0, 8.0)];
///
/// let mesh: CombinedFill<u16> = combined_fill(
///     &triangle,
///     &[[255, 0, 0, 255]; 3],
///     &FillOptions::fringe(1.5),
/// ).unwrap();
///
/// assert_eq!(mesh.vertices.len(), 6);
/// assert_eq!(mesh.indices.len(), 3 + 18);
/// # }
/// ```
#[derive(Default)]
pub struct FillTessellator {
    points: Vec<Point>,
}

impl FillTessellator {
    pub fn new() -> Self {
        FillTessellator { points: Vec::new() }
    }

    /// Compute the fill of a polyline as two separate vertex streams.
    ///
    /// For each point, one vertex on the inner edge of the fringe is added to `fill_output`
    /// with an `aa` coordinate of `(1, 0)`, and two vertices are added to `stroke_output`:
    /// the same inner vertex and one on the outer edge with an `aa` coordinate of `(1, 1)`.
    /// For rings the first pair is repeated at the end of the stroke output to close the
    /// strip.
    pub fn tessellate_polyline(
        &mut self,
        points: &[Point],
        colors: &[Color],
        options: &FillOptions,
        fill_output: &mut dyn GeometryBuilder,
        stroke_output: &mut dyn GeometryBuilder,
    ) -> TessellationResult {
        debug_assert!(options.fringe > 0.0);
        debug_assert!(colors.is_empty() || colors.len() == points.len());

        fill_output.begin_geometry();
        stroke_output.begin_geometry();

        let result = fill_polyline(points, colors, options, fill_output, stroke_output);

        match result {
            Ok(()) => {
                fill_output.end_geometry();
                stroke_output.end_geometry();
            }
            Err(_) => {
                fill_output.abort_geometry();
                stroke_output.abort_geometry();
            }
        }

        result
    }

    /// Compute the fill of a polyline as a single indexed mesh.
    ///
    /// The polyline is always closed. For each point an inner vertex (`aa = (1, 0)`) and an
    /// outer vertex (`aa = (1, 1)`) are added, in that order. The interior is a fan of
    /// inner vertices and the fringe is a band of two triangles per edge.
    ///
    /// A convex polygon with `n` distinct points produces `2 * n` vertices and
    /// `3 * (n - 2) + 6 * n` indices.
    pub fn tessellate_combined(
        &mut self,
        points: &[Point],
        colors: &[Color],
        options: &FillOptions,
        output: &mut dyn IndexedGeometryBuilder,
    ) -> TessellationResult {
        debug_assert!(options.fringe > 0.0);
        debug_assert!(colors.is_empty() || colors.len() == points.len());

        output.begin_geometry();

        let result = fill_combined(points, colors, options, output);

        match result {
            Ok(()) => output.end_geometry(),
            Err(_) => output.abort_geometry(),
        }

        result
    }

    /// Flatten a subpath and compute its fill as a single indexed mesh.
    ///
    /// The subpath is filled as if it was closed.
    pub fn tessellate_subpath(
        &mut self,
        subpath: &Subpath,
        flatten_options: &FlattenOptions,
        colors: &[Color],
        options: &FillOptions,
        output: &mut dyn IndexedGeometryBuilder,
    ) -> TessellationResult {
        let mut points = core::mem::take(&mut self.points);
        points.clear();
        flatten_into(subpath, flatten_options, &mut points);

        let result = self.tessellate_combined(&points, colors, options, output);

        self.points = points;

        result
    }
}

/// Compute the combined fill of a polyline into a new pair of vertex and index buffers.
pub fn combined_fill<OutputIndex>(
    points: &[Point],
    colors: &[Color],
    options: &FillOptions,
) -> Result<CombinedFill<OutputIndex>, TessellationError>
where
    OutputIndex: Add + From<VertexId> + MaxIndex,
{
    let mut buffers: VertexBuffers<Vertex, OutputIndex> = VertexBuffers::new();
    FillTessellator::new().tessellate_combined(
        points,
        colors,
        options,
        &mut simple_builder(&mut buffers),
    )?;

    Ok(buffers)
}

fn check_positions(points: &[Point]) -> TessellationResult {
    if points.iter().any(|p| p.x.is_nan() || p.y.is_nan()) {
        return Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN,
        ));
    }

    Ok(())
}

/// Half of the fringe, oriented so that adding it along the extrusion moves away from
/// the interior of the ring.
fn half_fringe(ring: &Ring, options: &FillOptions) -> f32 {
    let half = options.fringe * 0.5;
    if polygon_area(ring.points()) < 0.0 {
        -half
    } else {
        half
    }
}

fn fill_polyline(
    points: &[Point],
    colors: &[Color],
    options: &FillOptions,
    fill_output: &mut dyn GeometryBuilder,
    stroke_output: &mut dyn GeometryBuilder,
) -> TessellationResult {
    check_positions(points)?;

    let ring = Ring::new(points, options.looped);
    if ring.len() < 2 {
        return Ok(());
    }

    let fringe = half_fringe(&ring, options);

    let mut first_pair = None;
    for corner in ring.corners() {
        let (index, position, extrusion) = match corner {
            Corner::Joint {
                index,
                position,
                extrusion,
            } => (index, position, extrusion),
            Corner::Doubled { index, position } => {
                log::debug!("fill: skipping doubled point {:?} at {}", position, index);
                continue;
            }
        };

        let color = colors.get(index).cloned().unwrap_or(OPAQUE_BLACK);
        let inner = Vertex::new(position - extrusion * fringe, vector(1.0, 0.0), color);
        let outer = Vertex::new(position + extrusion * fringe, vector(1.0, 1.0), color);

        fill_output.add_vertex(inner)?;
        stroke_output.add_vertex(inner)?;
        stroke_output.add_vertex(outer)?;

        if first_pair.is_none() {
            first_pair = Some((inner, outer));
        }
    }

    if ring.is_looped() {
        if let Some((inner, outer)) = first_pair {
            stroke_output.add_vertex(inner)?;
            stroke_output.add_vertex(outer)?;
        }
    }

    Ok(())
}

fn fill_combined(
    points: &[Point],
    colors: &[Color],
    options: &FillOptions,
    output: &mut dyn IndexedGeometryBuilder,
) -> TessellationResult {
    check_positions(points)?;

    let ring = Ring::new(points, true);
    if ring.len() < 2 {
        return Ok(());
    }

    let fringe = half_fringe(&ring, options);

    // (inner, outer) vertex ids.
    let mut first: Option<(VertexId, VertexId)> = None;
    let mut previous: Option<(VertexId, VertexId)> = None;
    let mut triangles = 0;

    for corner in ring.corners() {
        let (index, position, extrusion) = match corner {
            Corner::Joint {
                index,
                position,
                extrusion,
            } => (index, position, extrusion),
            Corner::Doubled { index, position } => {
                log::debug!("fill: skipping doubled point {:?} at {}", position, index);
                continue;
            }
        };

        let color = colors.get(index).cloned().unwrap_or(OPAQUE_BLACK);
        let inner = output.add_vertex(Vertex::new(
            position - extrusion * fringe,
            vector(1.0, 0.0),
            color,
        ))?;
        let outer = output.add_vertex(Vertex::new(
            position + extrusion * fringe,
            vector(1.0, 1.0),
            color,
        ))?;

        if let (Some((first_inner, _)), Some((prev_inner, _))) = (first, previous) {
            if prev_inner != first_inner {
                output.add_triangle(first_inner, prev_inner, inner);
                triangles += 1;
            }
        }

        if let Some((prev_inner, prev_outer)) = previous {
            output.add_triangle(prev_inner, prev_outer, inner);
            output.add_triangle(prev_outer, outer, inner);
            triangles += 2;
        }

        if first.is_none() {
            first = Some((inner, outer));
        }
        previous = Some((inner, outer));
    }

    if let (Some((first_inner, first_outer)), Some((last_inner, last_outer))) = (first, previous) {
        if last_inner != first_inner {
            output.add_triangle(last_inner, last_outer, first_inner);
            output.add_triangle(last_outer, first_outer, first_inner);
            triangles += 2;
        }
    }

    log::trace!("fill: {} points, {} triangles", points.len(), triangles);

    Ok(())
}

#[cfg(test)]
use crate::geometry_builder::NoOutput;

#[cfg(test)]
fn square() -> [Point; 4] {
    [
        point(0.0, 0.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(0.0, 4.0),
    ]
}

#[test]
fn fill_and_fringe() {
    let mut fill: Vec<Vertex> = Vec::new();
    let mut fringe: Vec<Vertex> = Vec::new();
    FillTessellator::new()
        .tessellate_polyline(
            &square(),
            &[],
            &FillOptions::fringe(2.0).with_looped(true),
            &mut fill,
            &mut fringe,
        )
        .unwrap();

    assert_eq!(fill.len(), 4);
    assert_eq!(fringe.len(), 10);

    // The interior is inset by half of the fringe.
    assert!((fill[0].position - point(1.0, 1.0)).square_length() < 1e-5);
    assert_eq!(fill[0].aa, vector(1.0, 0.0));
    // The outer edge is outset by the same amount.
    assert!((fringe[1].position - point(-1.0, -1.0)).square_length() < 1e-5);
    assert_eq!(fringe[1].aa, vector(1.0, 1.0));
    // The strip is closed.
    assert_eq!(fringe[8], fringe[0]);
    assert_eq!(fringe[9], fringe[1]);
}

#[test]
fn open_fill_is_not_closed() {
    let mut fill = NoOutput::new();
    let mut fringe = NoOutput::new();
    FillTessellator::new()
        .tessellate_polyline(
            &square(),
            &[],
            &FillOptions::default(),
            &mut fill,
            &mut fringe,
        )
        .unwrap();

    assert_eq!(fill.vertex_count(), 4);
    assert_eq!(fringe.vertex_count(), 8);
}

#[test]
fn combined_square() {
    let mesh: CombinedFill<u32> =
        combined_fill(&square(), &[], &FillOptions::default()).unwrap();

    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.indices.len(), 3 * 2 + 6 * 4);

    // Band between the first two pairs, then the first fan triangle.
    assert_eq!(&mesh.indices[0..6], &[0, 1, 2, 1, 3, 2]);
    assert_eq!(&mesh.indices[6..9], &[0, 2, 4]);
    // The band is closed back to the first pair.
    let n = mesh.indices.len();
    assert_eq!(&mesh.indices[n - 6..], &[6, 7, 0, 7, 1, 0]);
}

#[test]
fn combined_fill_is_always_closed() {
    let looped: CombinedFill<u16> =
        combined_fill(&square(), &[], &FillOptions::default().with_looped(true)).unwrap();
    let open: CombinedFill<u16> =
        combined_fill(&square(), &[], &FillOptions::default().with_looped(false)).unwrap();

    assert_eq!(looped.indices, open.indices);
    assert_eq!(looped.vertices, open.vertices);
}

#[cfg(test)]
fn square_with_doubled_corner() -> ([Point; 5], [Color; 5]) {
    (
        [
            point(0.0, 0.0),
            point(4.0, 0.0),
            point(4.0, 0.0),
            point(4.0, 4.0),
            point(0.0, 4.0),
        ],
        [
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [255, 255, 0, 255],
            [0, 255, 255, 255],
        ],
    )
}

#[test]
fn fill_skips_doubled_points() {
    let (points, colors) = square_with_doubled_corner();

    let mut fill: Vec<Vertex> = Vec::new();
    let mut fringe: Vec<Vertex> = Vec::new();
    FillTessellator::new()
        .tessellate_polyline(
            &points,
            &colors,
            &FillOptions::fringe(2.0).with_looped(true),
            &mut fill,
            &mut fringe,
        )
        .unwrap();

    assert_eq!(fill.len(), 4);
    assert_eq!(fringe.len(), 10);

    // The first of the two equal points is dropped along with its color.
    let fill_colors: Vec<Color> = fill.iter().map(|v| v.color).collect();
    assert_eq!(fill_colors, [colors[0], colors[2], colors[3], colors[4]]);
    assert_eq!(fringe[2].color, colors[2]);
    assert_eq!(fringe[3].color, colors[2]);

    // Same geometry as the square without the duplicate.
    let mut plain: Vec<Vertex> = Vec::new();
    let mut plain_fringe: Vec<Vertex> = Vec::new();
    FillTessellator::new()
        .tessellate_polyline(
            &square(),
            &[],
            &FillOptions::fringe(2.0).with_looped(true),
            &mut plain,
            &mut plain_fringe,
        )
        .unwrap();
    for (a, b) in fill.iter().zip(plain.iter()) {
        assert!((a.position - b.position).square_length() < 1e-5);
    }
}

#[test]
fn combined_fill_skips_doubled_points() {
    let (points, colors) = square_with_doubled_corner();

    let mesh: CombinedFill<u16> = combined_fill(&points, &colors, &FillOptions::default()).unwrap();
    let plain: CombinedFill<u16> = combined_fill(&square(), &[], &FillOptions::default()).unwrap();

    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.indices.len(), 30);
    assert_eq!(mesh.indices, plain.indices);

    // Every vertex is referenced and no index points past the end.
    for i in 0..8u16 {
        assert!(mesh.indices.contains(&i));
    }
    assert!(mesh.indices.iter().all(|&i| i < 8));

    let emitted: Vec<Color> = mesh.vertices.iter().map(|v| v.color).collect();
    assert_eq!(
        emitted,
        [
            colors[0], colors[0], colors[2], colors[2], colors[3], colors[3], colors[4], colors[4]
        ]
    );
    for (a, b) in mesh.vertices.iter().zip(plain.vertices.iter()) {
        assert!((a.position - b.position).square_length() < 1e-5);
    }
}
