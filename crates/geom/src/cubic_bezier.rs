use crate::scalar::Scalar;
use crate::{Point, Vector};

use num_traits::NumCast;

#[cfg(test)]
use std::vec::Vec;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> CubicBezierSegment<NewS> {
        CubicBezierSegment {
            from: self.from.cast(),
            ctrl1: self.ctrl1.cast(),
            ctrl2: self.ctrl2.cast(),
            to: self.to.cast(),
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Returns true if both control points are close enough to the chord.
    ///
    /// The deviation is measured with the cross products of the control points
    /// (relative to `to`) and the chord, which avoids a square root:
    /// `(d1 + d2)² <= min_deviation * |chord|²`.
    pub fn is_flat(&self, min_deviation: S) -> bool {
        let chord: Vector<S> = self.to - self.from;
        let d1 = (self.ctrl1 - self.to).cross(chord).abs();
        let d2 = (self.ctrl2 - self.to).cross(chord).abs();
        let d = d1 + d2;

        d * d <= min_deviation * chord.square_length()
    }

    /// Approximate the curve with a sequence of line segments using recursive
    /// de Casteljau subdivision.
    ///
    /// The curve is split in halves until each piece passes [`is_flat`](Self::is_flat)
    /// or until `max_depth` levels of subdivision are exceeded. The end point of
    /// each piece is passed to the callback, in curve order. The start of the curve
    /// is not emitted.
    pub fn for_each_subdivided<F>(&self, max_depth: u32, min_deviation: S, cb: &mut F)
    where
        F: FnMut(Point<S>),
    {
        subdivide(self, 0, max_depth, min_deviation, cb);
    }
}

fn subdivide<S: Scalar, F>(
    curve: &CubicBezierSegment<S>,
    depth: u32,
    max_depth: u32,
    min_deviation: S,
    cb: &mut F,
) where
    F: FnMut(Point<S>),
{
    if depth > max_depth || curve.is_flat(min_deviation) {
        cb(curve.to);
        return;
    }

    let (left, right) = curve.split(S::HALF);
    subdivide(&left, depth + 1, max_depth, min_deviation, cb);
    subdivide(&right, depth + 1, max_depth, min_deviation, cb);
}

#[cfg(test)]
use crate::point;

#[test]
fn split() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(0.0, 100.0),
        ctrl2: point(100.0, 100.0),
        to: point(100.0, 0.0),
    };

    let (left, right) = curve.split(0.5);
    assert_eq!(left.from, curve.from);
    assert_eq!(right.to, curve.to);
    assert_eq!(left.to, right.from);
    assert_eq!(left.to, curve.sample(0.5));
    assert_eq!(left.to, point(50.0, 75.0));
}

#[test]
fn straight_line_is_flat() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(10.0, 0.0),
        ctrl2: point(20.0, 0.0),
        to: point(30.0, 0.0),
    };

    assert!(curve.is_flat(0.001));

    let mut points = Vec::new();
    curve.for_each_subdivided(10, 0.001, &mut |p| points.push(p));
    assert_eq!(points, std::vec![point(30.0, 0.0)]);
}

#[test]
fn subdivision_depth_is_bounded() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(0.0, 100.0),
        ctrl2: point(100.0, 100.0),
        to: point(100.0, 0.0),
    };

    // A threshold of zero never accepts a curved piece, so the depth limit
    // is the only thing stopping the recursion.
    let mut count = 0;
    curve.for_each_subdivided(3, 0.0, &mut |_| count += 1);
    assert_eq!(count, 16);

    let mut last = point(0.0, 0.0);
    curve.for_each_subdivided(3, 0.0, &mut |p| last = p);
    assert_eq!(last, curve.to);
}

#[test]
fn subdivided_points_lie_on_curve() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(20.0, 80.0),
        ctrl2: point(80.0, -40.0),
        to: point(100.0, 30.0),
    };

    let mut points = Vec::new();
    curve.for_each_subdivided(10, 0.001, &mut |p| points.push(p));

    assert!(points.len() > 4);
    assert_eq!(*points.last().unwrap(), curve.to);

    // Each emitted point is a subdivision point, so it is exactly on the curve
    // at a dyadic parameter. Check that it is close to some sample.
    for p in &points {
        let mut best = f32::MAX;
        for i in 0..=1024 {
            let t = i as f32 / 1024.0;
            best = best.min((curve.sample(t) - *p).length());
        }
        assert!(best < 0.01, "{:?} is {} away from the curve", p, best);
    }
}
