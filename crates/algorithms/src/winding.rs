//! Compute and enforce the winding of polygons.

use crate::area::polygon_area;
use crate::math::Point;
use crate::path::Winding;

/// Compute the winding of a polygon.
///
/// The polygon is expected to have no self-intersections, otherwise the result is
/// unspecified. Returns `None` if the area is zero.
pub fn polygon_winding(points: &[Point]) -> Option<Winding> {
    let area = polygon_area(points);
    if area > 0.0 {
        Some(Winding::Positive)
    } else if area < 0.0 {
        Some(Winding::Negative)
    } else {
        None
    }
}

/// Reverse the polygon in place if its winding doesn't match the requested one.
///
/// `Winding::Negative` is clockwise in a y-up coordinate system. Returns the absolute
/// area of the polygon. Polygons with a zero area are left untouched.
pub fn enforce_winding(points: &mut [Point], winding: Winding) -> f32 {
    let area = polygon_area(points);
    let mismatch = match winding {
        Winding::Positive => area < 0.0,
        Winding::Negative => area > 0.0,
    };

    if mismatch {
        points.reverse();
    }

    if area < 0.0 {
        -area
    } else {
        area
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn winding_of_squares() {
    let mut square = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    assert_eq!(polygon_winding(&square), Some(Winding::Positive));

    square.reverse();
    assert_eq!(polygon_winding(&square), Some(Winding::Negative));

    assert_eq!(
        polygon_winding(&[point(0.0, 0.0), point(1.0, 0.0)]),
        None
    );
}

#[test]
fn enforce_clockwise() {
    let mut points = [
        point(0.0, 0.0),
        point(3.0, 0.0),
        point(3.0, 2.0),
        point(0.0, 2.0),
    ];

    assert_eq!(enforce_winding(&mut points, Winding::Negative), 6.0);
    assert!(polygon_area(&points) <= 0.0);
    assert_eq!(points[0], point(0.0, 2.0));

    // Idempotent.
    let before = points;
    assert_eq!(enforce_winding(&mut points, Winding::Negative), 6.0);
    assert_eq!(points, before);

    assert_eq!(enforce_winding(&mut points, Winding::Positive), 6.0);
    assert!(polygon_area(&points) > 0.0);
}

#[test]
fn reversed_winding() {
    assert_eq!(Winding::Positive.reversed(), Winding::Negative);
    assert_eq!(Winding::Negative.reversed(), Winding::Positive);
}
