use crate::scalar::Scalar;
use crate::CubicBezierSegment;
use crate::{Point, Vector};

use num_traits::NumCast;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> QuadraticBezierSegment<NewS> {
        QuadraticBezierSegment {
            from: self.from.cast(),
            ctrl: self.ctrl.cast(),
            to: self.to.cast(),
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        (self.ctrl - self.from) * (S::TWO * one_t) + (self.to - self.ctrl) * (S::TWO * t)
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// Elevate this curve to a third order bézier.
    ///
    /// The conversion is exact: both control points sit two thirds of the way
    /// from an endpoint to the quadratic control point.
    pub fn to_cubic(&self) -> CubicBezierSegment<S> {
        let two_thirds = S::TWO / S::THREE;
        CubicBezierSegment {
            from: self.from,
            ctrl1: self.from + (self.ctrl - self.from) * two_thirds,
            ctrl2: self.to + (self.ctrl - self.to) * two_thirds,
            to: self.to,
        }
    }

    /// Approximate the curve with a sequence of line segments using recursive subdivision.
    ///
    /// The curve is elevated to a cubic and flattened with
    /// [`CubicBezierSegment::for_each_subdivided`], so both produce the exact same points.
    ///
    /// The end point of each segment is passed to the callback, the start of the curve is not.
    pub fn for_each_subdivided<F>(&self, max_depth: u32, min_deviation: S, cb: &mut F)
    where
        F: FnMut(Point<S>),
    {
        self.to_cubic()
            .for_each_subdivided(max_depth, min_deviation, cb);
    }
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use std::vec::Vec;

#[test]
fn to_cubic() {
    let quadratic = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(30.0, 60.0),
        to: point(90.0, 0.0),
    };

    let cubic = quadratic.to_cubic();
    assert_eq!(cubic.from, quadratic.from);
    assert_eq!(cubic.to, quadratic.to);
    assert!((cubic.ctrl1 - point(20.0, 40.0)).length() < 0.0001);
    assert!((cubic.ctrl2 - point(50.0, 40.0)).length() < 0.0001);

    // Degree elevation doesn't change the shape of the curve.
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!((quadratic.sample(t) - cubic.sample(t)).length() < 0.001);
    }
}

#[test]
fn flatten_matches_cubic() {
    let quadratic = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(50.0, 100.0),
        to: point(100.0, 0.0),
    };

    let mut from_quadratic = Vec::new();
    quadratic.for_each_subdivided(8, 0.001, &mut |p| from_quadratic.push(p));

    let mut from_cubic = Vec::new();
    quadratic
        .to_cubic()
        .for_each_subdivided(8, 0.001, &mut |p| from_cubic.push(p));

    assert_eq!(from_quadratic, from_cubic);
}

#[test]
fn flatten_arch() {
    let quadratic = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(50.0, 100.0),
        to: point(100.0, 0.0),
    };

    let mut points = Vec::new();
    quadratic.for_each_subdivided(8, 0.001, &mut |p| points.push(p));

    assert!(points.len() > 2);
    assert!(points[0].y > 0.0);
    assert!(points[0].y < 100.0);
    assert_eq!(*points.last().unwrap(), point(100.0, 0.0));

    // The points are emitted in curve order.
    for pair in points.windows(2) {
        assert!(pair[0].x < pair[1].x);
    }
}

#[test]
fn derivative() {
    let quadratic = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };

    assert_eq!(quadratic.derivative(0.0), Vector::new(2.0, 2.0));
    assert_eq!(quadratic.derivative(0.5), Vector::new(2.0, 0.0));
    assert_eq!(quadratic.derivative(1.0), Vector::new(2.0, -2.0));
    assert_eq!(quadratic.flip().from, point(2.0, 0.0));
}
