use crate::algorithms::area::polygon_area;
use crate::geometry_builder::GeometryBuilder;
use crate::math::*;
use crate::path::{flatten_into, FlattenOptions, Subpath};
use crate::polyline::{Corner, Ring};
use crate::{
    Color, StrokeOptions, TessellationError, TessellationResult, UnsupportedParameter, Vertex,
    OPAQUE_BLACK,
};

use alloc::vec::Vec;

/// A Context object that can tessellate stroke operations for polylines and subpaths.
///
/// The stroke is produced as a triangle strip: each point of the polyline yields a pair of
/// vertices, first on the outer side then on the inner side, and every two consecutive
/// pairs form a quad. No index is generated. Use
/// [`triangle_strip_indices`](fn.triangle_strip_indices.html) for open polylines and
/// [`closed_triangle_strip_indices`](fn.closed_triangle_strip_indices.html) for rings to
/// produce an index buffer.
///
/// The outer vertices carry an `aa` coordinate of `(1, 1)` and the inner ones `(1, -1)`.
///
/// Joins are miters without a limit: very sharp angles produce very long spikes.
///
/// See the [`geometry_builder` module documentation](geometry_builder/index.html)
/// for more details about how to output custom vertex layouts.
///
/// # Examples
///
/// ```
/// # extern crate fringe_tessellation as tess;
/// # use tess::math::*;
/// # use tess::*;
/// # fn main() {
/// let polyline = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
///
/// let mut buffers: VertexBuffers<Vertex, u16> = VertexBuffers::new();
/// {
///     let mut vertex_builder = simple_builder(&mut buffers);
///
///     let mut tessellator = StrokeTessellator::new();
///     tessellator.tessellate_polyline(
///         &polyline,
///         &[],
///         &StrokeOptions::default().with_line_width(2.0).with_fringe(1.0),
///         &mut vertex_builder,
///     ).unwrap();
/// }
///
/// triangle_strip_indices(buffers.vertices.len(), &mut buffers.indices);
///
/// assert_eq!(buffers.vertices.len(), 6);
/// assert_eq!(buffers.indices.len(), 12);
/// # }
/// ```
#[derive(Default)]
pub struct StrokeTessellator {
    points: Vec<Point>,
}

impl StrokeTessellator {
    pub fn new() -> Self {
        StrokeTessellator { points: Vec::new() }
    }

    /// Compute the tessellation of a stroked polyline.
    ///
    /// `colors` holds one color per point. It can be empty, in which case all vertices are
    /// opaque black.
    pub fn tessellate_polyline(
        &mut self,
        points: &[Point],
        colors: &[Color],
        options: &StrokeOptions,
        output: &mut dyn GeometryBuilder,
    ) -> TessellationResult {
        debug_assert!(options.line_width > 0.0);
        debug_assert!(options.fringe >= 0.0);
        debug_assert!((-1.0..=1.0).contains(&options.extrude));
        debug_assert!(colors.is_empty() || colors.len() == points.len());

        output.begin_geometry();

        let result = stroke_polyline(points, colors, options, output);

        match result {
            Ok(()) => output.end_geometry(),
            Err(_) => output.abort_geometry(),
        }

        result
    }

    /// Flatten a subpath and compute the tessellation of its stroke.
    ///
    /// Closed subpaths are stroked as rings.
    pub fn tessellate_subpath(
        &mut self,
        subpath: &Subpath,
        flatten_options: &FlattenOptions,
        colors: &[Color],
        options: &StrokeOptions,
        output: &mut dyn GeometryBuilder,
    ) -> TessellationResult {
        let mut points = core::mem::take(&mut self.points);
        points.clear();
        flatten_into(subpath, flatten_options, &mut points);

        let result = self.tessellate_polyline(&points, colors, options, output);

        self.points = points;

        result
    }
}

fn stroke_polyline(
    points: &[Point],
    colors: &[Color],
    options: &StrokeOptions,
    output: &mut dyn GeometryBuilder,
) -> TessellationResult {
    if points.iter().any(|p| p.x.is_nan() || p.y.is_nan()) {
        return Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN,
        ));
    }

    let ring = Ring::new(points, options.looped);
    if ring.len() < 2 {
        return Ok(());
    }

    let mut outer_width = options.outer_width();
    let mut inner_width = options.inner_width();
    if polygon_area(ring.points()) < 0.0 {
        outer_width = -outer_width;
        inner_width = -inner_width;
    }

    let caps = !ring.is_looped() && options.cap_fringe > 0.0;

    let mut emitted = 0;
    let mut last_joint = None;
    for corner in ring.corners() {
        let (index, position, extrusion) = match corner {
            Corner::Joint {
                index,
                position,
                extrusion,
            } => (index, position, extrusion),
            Corner::Doubled { index, position } => {
                log::debug!("stroke: skipping doubled point {:?} at {}", position, index);
                continue;
            }
        };

        let color = colors.get(index).cloned().unwrap_or(OPAQUE_BLACK);
        let outer = position + extrusion * outer_width;
        let inner = position - extrusion * inner_width;

        if caps && last_joint.is_none() {
            let backward = tangent(extrusion) * -options.cap_fringe;
            output.add_vertex(Vertex::new(outer + backward, vector(0.0, 1.0), color))?;
            output.add_vertex(Vertex::new(inner + backward, vector(0.0, -1.0), color))?;
            output.add_vertex(Vertex::new(outer, vector(1.0, 1.0), color))?;
            output.add_vertex(Vertex::new(inner, vector(1.0, -1.0), color))?;
        }

        output.add_vertex(Vertex::new(outer, vector(1.0, 1.0), color))?;
        output.add_vertex(Vertex::new(inner, vector(1.0, -1.0), color))?;
        emitted += 2;

        last_joint = Some((outer, inner, extrusion, color));
    }

    if caps {
        if let Some((outer, inner, extrusion, color)) = last_joint {
            let forward = tangent(extrusion) * options.cap_fringe;
            output.add_vertex(Vertex::new(outer, vector(1.0, 1.0), color))?;
            output.add_vertex(Vertex::new(inner, vector(1.0, -1.0), color))?;
            output.add_vertex(Vertex::new(outer + forward, vector(0.0, 1.0), color))?;
            output.add_vertex(Vertex::new(inner + forward, vector(0.0, -1.0), color))?;
            emitted += 8;
        }
    }

    log::trace!(
        "stroke: {} points, {} vertices, looped: {}",
        points.len(),
        emitted,
        ring.is_looped()
    );

    Ok(())
}

/// The direction of travel at a point, given its extrusion vector.
#[inline]
fn tangent(extrusion: Vector) -> Vector {
    vector(-extrusion.y, extrusion.x).normalize()
}

#[cfg(test)]
use crate::geometry_builder::NoOutput;

#[test]
fn two_points() {
    let mut vertices: Vec<Vertex> = Vec::new();
    StrokeTessellator::new()
        .tessellate_polyline(
            &[point(0.0, 0.0), point(10.0, 0.0)],
            &[],
            &StrokeOptions::default().with_line_width(2.0),
            &mut vertices,
        )
        .unwrap();

    let positions: Vec<Point> = vertices.iter().map(|v| v.position).collect();
    assert_eq!(
        positions,
        [
            point(0.0, -1.0),
            point(0.0, 1.0),
            point(10.0, -1.0),
            point(10.0, 1.0),
        ]
    );
    assert_eq!(vertices[0].aa, vector(1.0, 1.0));
    assert_eq!(vertices[1].aa, vector(1.0, -1.0));
    assert!(vertices.iter().all(|v| v.color == OPAQUE_BLACK));
}

#[test]
fn caps() {
    let mut vertices: Vec<Vertex> = Vec::new();
    StrokeTessellator::new()
        .tessellate_polyline(
            &[point(0.0, 0.0), point(10.0, 0.0)],
            &[],
            &StrokeOptions::default()
                .with_line_width(2.0)
                .with_cap_fringe(1.0),
            &mut vertices,
        )
        .unwrap();

    assert_eq!(vertices.len(), 12);

    assert_eq!(vertices[0].position, point(-1.0, -1.0));
    assert_eq!(vertices[1].position, point(-1.0, 1.0));
    assert_eq!(vertices[0].aa, vector(0.0, 1.0));
    assert_eq!(vertices[1].aa, vector(0.0, -1.0));

    assert_eq!(vertices[10].position, point(11.0, -1.0));
    assert_eq!(vertices[11].position, point(11.0, 1.0));
    assert_eq!(vertices[10].aa, vector(0.0, 1.0));
    assert_eq!(vertices[11].aa, vector(0.0, -1.0));

    for v in &vertices[2..10] {
        assert_eq!(v.aa.x, 1.0);
    }
}

#[test]
fn caps_are_ignored_for_rings() {
    let square = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];

    let mut output = NoOutput::new();
    StrokeTessellator::new()
        .tessellate_polyline(
            &square,
            &[],
            &StrokeOptions::default().with_looped(true).with_cap_fringe(1.0),
            &mut output,
        )
        .unwrap();

    assert_eq!(output.vertex_count(), 8);
}

#[test]
fn nan_position() {
    let mut vertices: Vec<Vertex> = Vec::new();
    let result = StrokeTessellator::new().tessellate_polyline(
        &[point(0.0, 0.0), point(f32::NAN, 1.0)],
        &[],
        &StrokeOptions::default(),
        &mut vertices,
    );

    assert_eq!(
        result,
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN
        ))
    );
    assert!(vertices.is_empty());
}

#[test]
fn subpath_stroke() {
    let mut subpath = Subpath::new(point(0.0, 0.0));
    subpath.line_to(point(4.0, 0.0));
    subpath.line_to(point(4.0, 4.0));
    subpath.close();

    let mut output = NoOutput::new();
    let mut tessellator = StrokeTessellator::new();
    tessellator
        .tessellate_subpath(
            &subpath,
            &FlattenOptions::default(),
            &[],
            &StrokeOptions::default(),
            &mut output,
        )
        .unwrap();

    assert_eq!(output.vertex_count(), 6);
}
