//! Various math tools that are mostly useful for the tessellators.

use crate::math::*;

/// Returns the vector rotated by a quarter turn towards the right side of the direction
/// of travel, in a y-up coordinate system.
#[inline]
pub fn right_normal(v: Vector) -> Vector {
    vector(v.y, -v.x)
}

/// Compute the extrusion vector at a point P such that ```x ---e0----> P ---e1---> x```
/// where `n0` and `n1` are normals of `e0` and `e1` (not necessarily normalized).
///
/// The result is the average of the normalized normals divided by its own square length.
/// Extruding both edges by one unit along it yields parallel segments, which means the
/// vector gets very long at sharp angles. No miter limit is applied.
///
/// If the normals cancel out exactly (the path turns back on itself), the normalized `n1`
/// is returned.
pub fn miter_extrusion(n0: Vector, n1: Vector) -> Vector {
    let n1 = n1.normalize();
    let average = (n0.normalize() + n1) * 0.5;
    let square_length = average.square_length();

    if square_length == 0.0 {
        return n1;
    }

    let extrusion = average / square_length;
    if !(extrusion.x.is_finite() && extrusion.y.is_finite()) {
        return n1;
    }

    extrusion
}

#[test]
fn test_right_normal() {
    assert_eq!(right_normal(vector(1.0, 0.0)), vector(0.0, -1.0));
    assert_eq!(right_normal(vector(0.0, 2.0)), vector(2.0, 0.0));
}

#[test]
fn test_miter_extrusion() {
    fn assert_almost_eq(a: Vector, b: Vector) {
        if (a - b).square_length() > 0.00001 {
            panic!("assert almost equal: {:?} != {:?}", a, b);
        }
    }

    // Straight line.
    assert_almost_eq(
        miter_extrusion(vector(0.0, -1.0), vector(0.0, -3.0)),
        vector(0.0, -1.0),
    );

    // Right angle: the extrusion reaches the corner of the offset square.
    assert_almost_eq(
        miter_extrusion(vector(0.0, -1.0), vector(1.0, 0.0)),
        vector(1.0, -1.0),
    );

    // U-turn.
    assert_almost_eq(
        miter_extrusion(vector(0.0, -1.0), vector(0.0, 1.0)),
        vector(0.0, 1.0),
    );

    // Sharp angles are not clamped: the length is the inverse of the average length.
    let n0 = vector(0.0, -1.0);
    let n1 = right_normal(vector(-10.0, 0.5));
    let average = (n0 + n1.normalize()) * 0.5;
    let length = miter_extrusion(n0, n1).length();
    assert!(length > 35.0);
    assert!((length - 1.0 / average.length()).abs() < 0.01 * length);
}

#[test]
fn near_u_turn_miter_is_long() {
    // Turning back with a slope of 0.05 over 10 units.
    let n0 = vector(0.0, -1.0);
    let n1 = right_normal(vector(-10.0, 0.05));
    let e = miter_extrusion(n0, n1);

    assert!((e.length() - 400.0).abs() < 4.0);
    assert!((e.x - 400.0).abs() < 4.0);
}
