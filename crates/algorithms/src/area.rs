//! Signed area of polygons.

use crate::math::Point;
use crate::path::{flatten, FlattenOptions, Subpath};

/// Compute the signed area of a polygon.
///
/// The polygon is implicitly closed. The area is positive if the points are in
/// counter-clockwise order in a y-up coordinate system (positive winding), negative
/// if they are clockwise. Fewer than three points have an area of zero.
pub fn polygon_area(points: &[Point]) -> f32 {
    let first = match points.first() {
        Some(p) => *p,
        None => return 0.0,
    };

    let mut double_area = 0.0;
    for pair in points.windows(2) {
        double_area += (pair[0] - first).cross(pair[1] - first);
    }

    double_area * 0.5
}

/// Compute the signed area of a subpath by flattening it first.
///
/// Open subpaths are treated as if they were closed.
pub fn subpath_area(subpath: &Subpath, options: &FlattenOptions) -> f32 {
    polygon_area(&flatten(subpath, options))
}

#[cfg(test)]
use crate::math::point;

#[test]
fn square_area() {
    let ccw = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    assert_eq!(polygon_area(&ccw), 1.0);

    let cw = [
        point(0.0, 0.0),
        point(0.0, 1.0),
        point(1.0, 1.0),
        point(1.0, 0.0),
    ];
    assert_eq!(polygon_area(&cw), -1.0);
}

#[test]
fn degenerate_polygons() {
    assert_eq!(polygon_area(&[]), 0.0);
    assert_eq!(polygon_area(&[point(1.0, 1.0)]), 0.0);
    assert_eq!(polygon_area(&[point(1.0, 1.0), point(2.0, 3.0)]), 0.0);
    assert_eq!(
        polygon_area(&[point(0.0, 0.0), point(1.0, 1.0), point(2.0, 2.0)]),
        0.0
    );
}

#[test]
fn explicit_closing_point() {
    // Repeating the first point doesn't change the area.
    let points = [
        point(0.0, 0.0),
        point(4.0, 0.0),
        point(4.0, 2.0),
        point(0.0, 2.0),
        point(0.0, 0.0),
    ];
    assert_eq!(polygon_area(&points), 8.0);
}

#[test]
fn subpath_signed_area() {
    let mut subpath = Subpath::new(point(0.0, 0.0));
    subpath.line_to(point(2.0, 0.0));
    subpath.line_to(point(2.0, 2.0));
    subpath.line_to(point(0.0, 2.0));
    subpath.close();

    assert_eq!(subpath_area(&subpath, &FlattenOptions::DEFAULT), 4.0);
    assert_eq!(
        subpath_area(&Subpath::new(point(3.0, 3.0)), &FlattenOptions::DEFAULT),
        0.0
    );
}
