//! Elliptic arc related maths and tools.

use crate::scalar::{Float, Scalar};
use crate::{point, vector, Angle, Point, Vector};

use num_traits::NumCast;

/// An elliptic arc curve segment using the SVG's end-point notation.
///
/// Arcs are axis-aligned: rotated ellipses are not supported.
///
/// See: <https://www.w3.org/TR/SVG/implnote.html#ArcImplementationNotes>
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SvgArc<S> {
    pub from: Point<S>,
    pub to: Point<S>,
    pub radii: Vector<S>,
    pub flags: ArcFlags,
}

/// An elliptic arc curve segment described by its center and angles.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc<S> {
    pub center: Point<S>,
    pub radii: Vector<S>,
    pub start_angle: Angle<S>,
    pub sweep_angle: Angle<S>,
}

/// Flag parameters for arcs as described by the SVG specification.
///
/// For most situations using the SVG arc notation, there are four different arcs
/// (two different ellipses, each with two different arc sweeps) that satisfy the
/// arc parameters. The `large_arc` and `clockwise` flags indicate which one of the
/// four arcs are drawn, as follows:
///
/// - Of the four candidate arc sweeps, two will represent an arc sweep of greater
///   than or equal to 180 degrees (the "large-arc"), and two will represent an arc
///   sweep of less than or equal to 180 degrees (the "small arc"). If `large_arc`
///   is `true`, then one of the two larger arc sweeps will be chosen; otherwise,
///   one of the smaller arc sweeps will be chosen.
/// - If `clockwise` is `true`, the arc is drawn in a "positive-angle" direction
///   (clockwise in a y-down coordinate system). Otherwise the arc is drawn in
///   the "negative-angle" direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcFlags {
    pub large_arc: bool,
    pub clockwise: bool,
}

impl<S: Scalar> SvgArc<S> {
    pub fn cast<NewS: NumCast>(self) -> SvgArc<NewS> {
        SvgArc {
            from: self.from.cast(),
            to: self.to.cast(),
            radii: self.radii.cast(),
            flags: self.flags,
        }
    }

    /// Returns true if both end points are at the same position.
    ///
    /// SVG renderers omit such arcs entirely.
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }

    /// Converts this arc from end-point to center parameterization.
    ///
    /// Negative radii are made positive. Radii that are too small for the arc to
    /// connect both end points are scaled up uniformly until it does, and the
    /// returned arc carries the corrected radii.
    ///
    /// The sweep angle is in `(-2π, 2π)`, positive if and only if the `clockwise`
    /// flag is set.
    ///
    /// If both end points are equal the result is a zero sweep arc that starts and
    /// ends on `from`.
    pub fn to_arc(&self) -> Arc<S> {
        debug_assert!(!self.from.x.is_nan());
        debug_assert!(!self.from.y.is_nan());
        debug_assert!(!self.to.x.is_nan());
        debug_assert!(!self.to.y.is_nan());
        debug_assert!(!self.radii.x.is_nan());
        debug_assert!(!self.radii.y.is_nan());

        let mut rx = self.radii.x.abs();
        let mut ry = self.radii.y.abs();

        // F.6.5.1, without the rotation.
        let p = (self.from - self.to) * S::HALF;
        if p == vector(S::ZERO, S::ZERO) {
            return Arc {
                center: self.from - vector(rx, S::ZERO),
                radii: vector(rx, ry),
                start_angle: Angle::zero(),
                sweep_angle: Angle::zero(),
            };
        }

        let mut rx2 = rx * rx;
        let mut ry2 = ry * ry;
        let px2 = p.x * p.x;
        let py2 = p.y * p.y;

        // F.6.6.2
        let lambda = px2 / rx2 + py2 / ry2;
        if lambda > S::ONE {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
            rx2 = rx * rx;
            ry2 = ry * ry;
        }

        // F.6.5.2
        let num = rx2 * ry2 - rx2 * py2 - ry2 * px2;
        let den = rx2 * py2 + ry2 * px2;
        let sign = if self.flags.large_arc != self.flags.clockwise {
            S::ONE
        } else {
            -S::ONE
        };
        let coef = sign * (num / den).max(S::ZERO).sqrt();
        let center_prime = vector(coef * rx * p.y / ry, -coef * ry * p.x / rx);

        // F.6.5.3
        let mid = self.from.lerp(self.to, S::HALF);
        let center = mid + center_prime;

        // F.6.5.5 and F.6.5.6
        let v1 = vector((p.x - center_prime.x) / rx, (p.y - center_prime.y) / ry);
        let v2 = vector((-p.x - center_prime.x) / rx, (-p.y - center_prime.y) / ry);

        let start_angle = Angle::radians(Float::atan2(v1.y, v1.x));

        let two_pi = S::TWO * S::PI();
        let mut sweep = Float::atan2(v1.cross(v2), v1.dot(v2)) % two_pi;
        if !self.flags.clockwise && sweep > S::ZERO {
            sweep -= two_pi;
        } else if self.flags.clockwise && sweep < S::ZERO {
            sweep += two_pi;
        }

        Arc {
            center,
            radii: vector(rx, ry),
            start_angle,
            sweep_angle: Angle::radians(sweep),
        }
    }
}

impl<S: Scalar> Arc<S> {
    #[inline]
    pub fn end_angle(&self) -> Angle<S> {
        self.start_angle + self.sweep_angle
    }

    /// Sample the curve's angle at t (expecting t between 0 and 1).
    #[inline]
    pub fn get_angle(&self, t: S) -> Angle<S> {
        self.start_angle + Angle::radians(self.sweep_angle.get() * t)
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.point_at_angle(self.get_angle(t))
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.point_at_angle(self.start_angle)
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.point_at_angle(self.end_angle())
    }

    fn point_at_angle(&self, angle: Angle<S>) -> Point<S> {
        let (sin, cos) = Float::sin_cos(angle.get());
        point(
            self.center.x + self.radii.x.abs() * cos,
            self.center.y + self.radii.y.abs() * sin,
        )
    }

    /// Converts this arc from center to end-point parameterization.
    pub fn to_svg_arc(&self) -> SvgArc<S> {
        let sweep = self.sweep_angle.get();
        SvgArc {
            from: self.from(),
            to: self.to(),
            radii: self.radii,
            flags: ArcFlags {
                large_arc: sweep.abs() > S::PI(),
                clockwise: sweep > S::ZERO,
            },
        }
    }

    /// Approximate the arc with `step_count` line segments of equal angular span.
    ///
    /// The end point of each segment is passed to the callback: the start of the
    /// arc is not emitted and its end is the last point.
    pub fn for_each_sampled<F>(&self, step_count: u32, cb: &mut F)
    where
        F: FnMut(Point<S>),
    {
        if step_count == 0 {
            return;
        }

        let step = self.sweep_angle.get() / S::value(step_count as f32);
        for i in 1..=step_count {
            let angle = self.start_angle.get() + step * S::value(i as f32);
            cb(self.point_at_angle(Angle::radians(angle)));
        }
    }
}

impl<S: Scalar> From<SvgArc<S>> for Arc<S> {
    fn from(svg_arc: SvgArc<S>) -> Self {
        svg_arc.to_arc()
    }
}

#[cfg(test)]
use std::vec::Vec;

#[cfg(test)]
fn approx_eq(a: Point<f32>, b: Point<f32>) -> bool {
    (a - b).length() < 0.01
}

#[test]
fn half_circle_center() {
    let svg_arc = SvgArc {
        from: point(0.0f32, 0.0),
        to: point(100.0, 0.0),
        radii: vector(50.0, 50.0),
        flags: ArcFlags {
            large_arc: false,
            clockwise: true,
        },
    };

    let arc = svg_arc.to_arc();
    assert!(((arc.center - svg_arc.from).length() - 50.0).abs() < 0.001);
    assert!(((arc.center - svg_arc.to).length() - 50.0).abs() < 0.001);
    assert!(approx_eq(arc.center, point(50.0, 0.0)));
    assert!(arc.sweep_angle.get() > 0.0);
}

#[test]
fn round_trip_flags() {
    let from = point(10.0f32, 20.0);
    let to = point(60.0, 45.0);
    for &large_arc in &[false, true] {
        for &clockwise in &[false, true] {
            let svg_arc = SvgArc {
                from,
                to,
                radii: vector(80.0, 40.0),
                flags: ArcFlags {
                    large_arc,
                    clockwise,
                },
            };

            let back = svg_arc.to_arc().to_svg_arc();
            assert!(approx_eq(back.from, from), "{:?}", back);
            assert!(approx_eq(back.to, to), "{:?}", back);
            assert_eq!(back.flags, svg_arc.flags);
        }
    }
}

#[test]
fn radii_are_corrected() {
    // Too small to connect both endpoints.
    let svg_arc = SvgArc {
        from: point(0.0f32, 0.0),
        to: point(100.0, 0.0),
        radii: vector(10.0, 10.0),
        flags: ArcFlags::default(),
    };

    let arc = svg_arc.to_arc();
    assert!((arc.radii.x - 50.0).abs() < 0.001);
    assert!((arc.radii.y - 50.0).abs() < 0.001);
    assert!(approx_eq(arc.from(), svg_arc.from));
    assert!(approx_eq(arc.to(), svg_arc.to));
}

#[test]
fn negative_radii() {
    let svg_arc = SvgArc {
        from: point(0.0f32, 0.0),
        to: point(100.0, 0.0),
        radii: vector(-50.0, -50.0),
        flags: ArcFlags {
            large_arc: false,
            clockwise: true,
        },
    };

    let arc = svg_arc.to_arc();
    assert!(arc.radii.x > 0.0 && arc.radii.y > 0.0);
    assert!(approx_eq(arc.center, point(50.0, 0.0)));
}

#[test]
fn degenerate_endpoints() {
    let svg_arc = SvgArc {
        from: point(5.0f32, 5.0),
        to: point(5.0, 5.0),
        radii: vector(3.0, 3.0),
        flags: ArcFlags::default(),
    };

    assert!(svg_arc.is_degenerate());
    let arc = svg_arc.to_arc();
    assert_eq!(arc.sweep_angle.get(), 0.0);
    assert_eq!(arc.start_angle.get(), 0.0);
    assert!(approx_eq(arc.from(), svg_arc.from));
    assert!(approx_eq(arc.to(), svg_arc.from));
}

#[test]
fn sampled_points() {
    let arc = Arc {
        center: point(0.0f32, 0.0),
        radii: vector(10.0, 10.0),
        start_angle: Angle::zero(),
        sweep_angle: Angle::radians(core::f32::consts::FRAC_PI_2),
    };

    let mut points = Vec::new();
    arc.for_each_sampled(4, &mut |p| points.push(p));

    assert_eq!(points.len(), 4);
    assert!(approx_eq(points[3], point(0.0, 10.0)));
    for p in &points {
        assert!(((*p - arc.center).length() - 10.0).abs() < 0.001);
    }

    // The start point is excluded.
    assert!(!approx_eq(points[0], point(10.0, 0.0)));

    let mut count = 0;
    arc.for_each_sampled(0, &mut |_| count += 1);
    assert_eq!(count, 0);
}
