use crate::geometry_builder::*;
use crate::math::*;
use crate::path::{FlattenOptions, Subpath};
use crate::*;

use alloc::vec::Vec;
use fringe_svg::parse_subpath;

fn subpath(src: &str) -> Subpath {
    parse_subpath(src, point(0.0, 0.0)).unwrap()
}

fn flattened(src: &str) -> Vec<Point> {
    subpath(src).flattened(&FlattenOptions::default())
}

fn regular_polygon(n: usize, radius: f32) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = i as f32 * 2.0 * core::f32::consts::PI / n as f32;
            point(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn stroke(points: &[Point], colors: &[Color], options: &StrokeOptions) -> Vec<Vertex> {
    let mut vertices: Vec<Vertex> = Vec::new();
    StrokeTessellator::new()
        .tessellate_polyline(points, colors, options, &mut vertices)
        .unwrap();

    vertices
}

fn outside_of_square(p: Point, min: f32, max: f32) -> bool {
    p.x < min || p.x > max || p.y < min || p.y > max
}

#[test]
fn stroke_closed_square() {
    let points = flattened("M 0 0 L 10 0 L 10 10 L 0 10 Z");
    assert_eq!(points.len(), 5);

    let mut buffers: VertexBuffers<Vertex, u16> = VertexBuffers::new();
    StrokeTessellator::new()
        .tessellate_polyline(
            &points,
            &[],
            &StrokeOptions::default().with_line_width(2.0),
            &mut simple_builder(&mut buffers),
        )
        .unwrap();

    assert_eq!(buffers.vertices.len(), 8);

    closed_triangle_strip_indices(buffers.vertices.len(), &mut buffers.indices);
    assert_eq!(buffers.indices.len(), 24);
    assert!(buffers
        .indices
        .iter()
        .all(|&i| (i as usize) < buffers.vertices.len()));
}

#[test]
fn stroke_looped_option() {
    let open = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];

    let looped = stroke(&open, &[], &StrokeOptions::default().with_looped(true));
    assert_eq!(looped.len(), 8);

    let mut closed = open.to_vec();
    closed.push(open[0]);
    assert_eq!(stroke(&closed, &[], &StrokeOptions::default()), looped);
}

#[test]
fn stroke_straight_line() {
    let points = [point(0.0, 0.0), point(10.0, 0.0)];

    let plain = stroke(&points, &[], &StrokeOptions::default());
    assert_eq!(plain.len(), 4);

    let caps = stroke(&points, &[], &StrokeOptions::default().with_cap_fringe(0.5));
    assert_eq!(caps.len(), 4 + 8);

    let line = [point(0.0, 0.0), point(5.0, 0.0), point(10.0, 0.0)];
    assert_eq!(stroke(&line, &[], &StrokeOptions::default()).len(), 6);
}

#[test]
fn stroke_too_few_points() {
    assert!(stroke(&[], &[], &StrokeOptions::default()).is_empty());
    assert!(stroke(&[point(1.0, 1.0)], &[], &StrokeOptions::default()).is_empty());
    assert!(stroke(
        &[point(1.0, 1.0), point(1.0, 1.0)],
        &[],
        &StrokeOptions::default()
    )
    .is_empty());
}

#[test]
fn stroke_winding_independence() {
    let ccw = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ];
    let mut cw = ccw;
    cw.reverse();

    let options = StrokeOptions::default()
        .with_looped(true)
        .with_line_width(2.0)
        .with_extrude(1.0);

    for points in &[ccw, cw] {
        let vertices = stroke(points, &[], &options);
        assert_eq!(vertices.len(), 8);
        for v in &vertices {
            if v.aa.y > 0.0 {
                // Fully extruded outwards.
                assert!(outside_of_square(v.position, -0.1, 10.1));
            } else {
                // The inner edge stays on the polygon.
                assert!(ccw.contains(&v.position));
            }
        }
    }
}

#[test]
fn stroke_skips_doubled_points() {
    let points = [
        point(0.0, 0.0),
        point(5.0, 0.0),
        point(5.0, 0.0),
        point(5.0, 5.0),
    ];
    let vertices = stroke(&points, &[], &StrokeOptions::default());

    assert_eq!(vertices.len(), 6);
}

#[test]
fn stroke_colors() {
    let points = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
    let colors = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]];

    let vertices = stroke(&points, &colors, &StrokeOptions::default());
    let emitted: Vec<Color> = vertices.iter().map(|v| v.color).collect();
    assert_eq!(
        emitted,
        [colors[0], colors[0], colors[1], colors[1], colors[2], colors[2]]
    );

    let vertices = stroke(&points, &[], &StrokeOptions::default());
    assert!(vertices.iter().all(|v| v.color == OPAQUE_BLACK));
}

#[test]
fn stroke_subpath_with_curves() {
    let flatten_options = FlattenOptions::default();
    let subpath = subpath("M 0 0 Q 50 100 100 0 A 50 50 0 0 1 200 0 Z");
    let expected = 2 * subpath.flattened(&flatten_options).len() - 2;

    let mut output = NoOutput::new();
    StrokeTessellator::new()
        .tessellate_subpath(
            &subpath,
            &flatten_options,
            &[],
            &StrokeOptions::default(),
            &mut output,
        )
        .unwrap();

    // Closed subpaths are stroked as rings.
    assert_eq!(output.vertex_count() as usize, expected);
}

#[test]
fn fill_winding_independence() {
    let ccw = regular_polygon(16, 10.0);
    let mut cw = ccw.clone();
    cw.reverse();

    for points in &[ccw, cw] {
        let mut fill: Vec<Vertex> = Vec::new();
        let mut fringe: Vec<Vertex> = Vec::new();
        FillTessellator::new()
            .tessellate_polyline(
                points,
                &[],
                &FillOptions::fringe(2.0).with_looped(true),
                &mut fill,
                &mut fringe,
            )
            .unwrap();

        assert_eq!(fill.len(), 16);
        assert_eq!(fringe.len(), 34);

        for v in &fill {
            assert!(v.position.to_vector().length() < 10.0);
            assert_eq!(v.aa, vector(1.0, 0.0));
        }
        for v in fringe.iter().filter(|v| v.aa.y == 1.0) {
            assert!(v.position.to_vector().length() > 10.0);
        }
    }
}

#[test]
fn combined_fill_index_counts() {
    for n in 3..12 {
        let polygon = regular_polygon(n, 50.0);

        let mesh: CombinedFill<u16> = combined_fill(&polygon, &[], &FillOptions::default()).unwrap();
        assert_eq!(mesh.vertices.len(), 2 * n);
        assert_eq!(mesh.indices.len(), 3 * (n - 2) + 6 * n);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < 2 * n));

        let wide: CombinedFill<u32> = combined_fill(&polygon, &[], &FillOptions::default()).unwrap();
        assert_eq!(wide.indices.len(), mesh.indices.len());
    }
}

#[test]
fn combined_fill_of_subpath() {
    let subpath = subpath("M 0 0 h 10 v 10 h -10 z");

    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_subpath(
            &subpath,
            &FlattenOptions::default(),
            &[],
            &FillOptions::default(),
            &mut BuffersBuilder::new(&mut buffers, Positions),
        )
        .unwrap();

    assert_eq!(buffers.vertices.len(), 8);
    assert_eq!(buffers.indices.len(), 6 + 24);
}

#[test]
fn too_many_vertices() {
    let polygon = regular_polygon(40_000, 1000.0);

    let mut buffers: VertexBuffers<Vertex, u16> = VertexBuffers::new();
    let result = FillTessellator::new().tessellate_combined(
        &polygon,
        &[],
        &FillOptions::default(),
        &mut simple_builder(&mut buffers),
    );

    assert_eq!(
        result,
        Err(TessellationError::GeometryBuilder(
            GeometryBuilderError::TooManyVertices
        ))
    );
    assert!(buffers.vertices.is_empty());
    assert!(buffers.indices.is_empty());
}

#[test]
fn strip_and_fan_indices_match_streams() {
    let polygon = regular_polygon(6, 10.0);

    let mut fill: VertexBuffers<Vertex, u16> = VertexBuffers::new();
    let mut fringe: VertexBuffers<Vertex, u16> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_polyline(
            &polygon,
            &[],
            &FillOptions::default().with_looped(true),
            &mut simple_builder(&mut fill),
            &mut simple_builder(&mut fringe),
        )
        .unwrap();

    triangle_fan_indices(fill.vertices.len(), &mut fill.indices);
    triangle_strip_indices(fringe.vertices.len(), &mut fringe.indices);

    assert_eq!(fill.indices.len(), 3 * 4);
    assert_eq!(fringe.indices.len(), 3 * 12);
}
