//! Approximate subpaths with polylines.
//!
//! Flattening walks the commands of a subpath in order and keeps track of the
//! current position as well as the last control point of each curve family, which
//! the smooth curve commands reflect through the current position.
//!
//! Quadratic and cubic curves are approximated by recursive subdivision, arcs are
//! sampled at a number of uniform angular steps proportional to their length.

use crate::geom::{CubicBezierSegment, QuadraticBezierSegment, SvgArc};
use crate::math::*;
use crate::path::{Path, Subpath, Verb};

/// Parameters for the flattening of subpaths.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FlattenOptions {
    /// Number of arc segments per unit of arc length.
    ///
    /// Default value: `FlattenOptions::DEFAULT_ARC_LENGTH_FACTOR`, roughly one segment
    /// every five units.
    pub arc_length_factor: f32,

    /// Default value: `FlattenOptions::DEFAULT_MIN_ARC_STEPS`.
    pub min_arc_steps: u32,

    /// Default value: `FlattenOptions::DEFAULT_MAX_ARC_STEPS`.
    pub max_arc_steps: u32,

    /// Maximum recursion depth when subdividing quadratic bézier curves.
    ///
    /// Default value: `FlattenOptions::DEFAULT_MAX_QUADRATIC_DEPTH`.
    pub max_quadratic_depth: u32,

    /// Subdivision stops when the control point deviation falls below this threshold.
    ///
    /// Default value: `FlattenOptions::DEFAULT_MIN_QUADRATIC_DEVIATION`.
    pub min_quadratic_deviation: f32,

    /// Maximum recursion depth when subdividing cubic bézier curves.
    ///
    /// Default value: `FlattenOptions::DEFAULT_MAX_CUBIC_DEPTH`.
    pub max_cubic_depth: u32,

    /// Default value: `FlattenOptions::DEFAULT_MIN_CUBIC_DEVIATION`.
    pub min_cubic_deviation: f32,
}

impl FlattenOptions {
    pub const DEFAULT_ARC_LENGTH_FACTOR: f32 = 0.2;
    pub const DEFAULT_MIN_ARC_STEPS: u32 = 4;
    pub const DEFAULT_MAX_ARC_STEPS: u32 = 256;
    pub const DEFAULT_MAX_QUADRATIC_DEPTH: u32 = 8;
    pub const DEFAULT_MIN_QUADRATIC_DEVIATION: f32 = 0.001;
    pub const DEFAULT_MAX_CUBIC_DEPTH: u32 = 10;
    pub const DEFAULT_MIN_CUBIC_DEVIATION: f32 = 0.001;

    pub const DEFAULT: Self = FlattenOptions {
        arc_length_factor: Self::DEFAULT_ARC_LENGTH_FACTOR,
        min_arc_steps: Self::DEFAULT_MIN_ARC_STEPS,
        max_arc_steps: Self::DEFAULT_MAX_ARC_STEPS,
        max_quadratic_depth: Self::DEFAULT_MAX_QUADRATIC_DEPTH,
        min_quadratic_deviation: Self::DEFAULT_MIN_QUADRATIC_DEVIATION,
        max_cubic_depth: Self::DEFAULT_MAX_CUBIC_DEPTH,
        min_cubic_deviation: Self::DEFAULT_MIN_CUBIC_DEVIATION,
    };

    #[inline]
    pub const fn with_arc_length_factor(mut self, factor: f32) -> Self {
        self.arc_length_factor = factor;
        self
    }

    #[inline]
    pub fn with_arc_steps(mut self, min: u32, max: u32) -> Self {
        assert!(min <= max);
        self.min_arc_steps = min;
        self.max_arc_steps = max;
        self
    }

    #[inline]
    pub const fn with_quadratic_subdivision(mut self, max_depth: u32, min_deviation: f32) -> Self {
        self.max_quadratic_depth = max_depth;
        self.min_quadratic_deviation = min_deviation;
        self
    }

    #[inline]
    pub const fn with_cubic_subdivision(mut self, max_depth: u32, min_deviation: f32) -> Self {
        self.max_cubic_depth = max_depth;
        self.min_cubic_deviation = min_deviation;
        self
    }

    /// Number of segments used to approximate an arc of the given sweep and radii.
    pub fn arc_step_count(&self, sweep_angle: Angle, radii: Vector) -> u32 {
        let mean_radius = (radii.x.abs() + radii.y.abs()) * 0.5;
        let steps = self.arc_length_factor * sweep_angle.radians.abs() * mean_radius;
        num_traits::clamp(
            steps,
            self.min_arc_steps as f32,
            self.max_arc_steps as f32,
        ) as u32
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Approximates a subpath with a polyline.
///
/// The first point of the polyline is the start of the subpath. If the subpath is
/// closed, its start is repeated at the end. A subpath without commands produces an
/// empty polyline.
pub fn flatten(subpath: &Subpath, options: &FlattenOptions) -> Vec<Point> {
    let mut output = Vec::with_capacity(subpath.commands.len() * 2);
    flatten_into(subpath, options, &mut output);

    output
}

/// Same as [`flatten`] but appends the points to an existing vector.
pub fn flatten_into(subpath: &Subpath, options: &FlattenOptions, output: &mut Vec<Point>) {
    if subpath.commands.is_empty() {
        return;
    }

    output.push(subpath.start);

    let mut current = subpath.start;
    let mut last_ctrl_quadratic = current;
    let mut last_ctrl_cubic = current;

    for cmd in &subpath.commands {
        let to = cmd.to;
        match cmd.verb {
            Verb::Line => {
                output.push(to);
                last_ctrl_quadratic = to;
                last_ctrl_cubic = to;
            }
            Verb::Quadratic { ctrl } => {
                flatten_quadratic(current, ctrl, to, options, output);
                last_ctrl_quadratic = ctrl;
                last_ctrl_cubic = to;
            }
            Verb::SmoothQuadratic => {
                let ctrl = reflect(last_ctrl_quadratic, current);
                flatten_quadratic(current, ctrl, to, options, output);
                last_ctrl_quadratic = ctrl;
                last_ctrl_cubic = to;
            }
            Verb::Cubic { ctrl1, ctrl2 } => {
                flatten_cubic(current, ctrl1, ctrl2, to, options, output);
                last_ctrl_quadratic = to;
                last_ctrl_cubic = ctrl2;
            }
            Verb::SmoothCubic { ctrl2 } => {
                let ctrl1 = reflect(last_ctrl_cubic, current);
                flatten_cubic(current, ctrl1, ctrl2, to, options, output);
                last_ctrl_quadratic = to;
                last_ctrl_cubic = ctrl2;
            }
            Verb::Arc { radii, flags } => {
                let arc = SvgArc {
                    from: current,
                    to,
                    radii,
                    flags,
                };

                if radii.x == 0.0 || radii.y == 0.0 {
                    // A zero radius turns the arc into a straight line.
                    output.push(to);
                } else if !arc.is_degenerate() {
                    let arc = arc.to_arc();
                    let steps = options.arc_step_count(arc.sweep_angle, arc.radii);
                    arc.for_each_sampled(steps, &mut |p| output.push(p));
                }

                last_ctrl_quadratic = to;
                last_ctrl_cubic = to;
            }
        }

        current = to;
    }

    if subpath.closed {
        output.push(subpath.start);
    }
}

fn reflect(ctrl: Point, around: Point) -> Point {
    around + (around - ctrl)
}

fn flatten_quadratic(
    from: Point,
    ctrl: Point,
    to: Point,
    options: &FlattenOptions,
    output: &mut Vec<Point>,
) {
    QuadraticBezierSegment { from, ctrl, to }.for_each_subdivided(
        options.max_quadratic_depth,
        options.min_quadratic_deviation,
        &mut |p| output.push(p),
    );
}

fn flatten_cubic(
    from: Point,
    ctrl1: Point,
    ctrl2: Point,
    to: Point,
    options: &FlattenOptions,
    output: &mut Vec<Point>,
) {
    CubicBezierSegment {
        from,
        ctrl1,
        ctrl2,
        to,
    }
    .for_each_subdivided(
        options.max_cubic_depth,
        options.min_cubic_deviation,
        &mut |p| output.push(p),
    );
}

impl Subpath {
    /// Approximates this subpath with a polyline.
    ///
    /// See [`flatten`].
    pub fn flattened(&self, options: &FlattenOptions) -> Vec<Point> {
        flatten(self, options)
    }
}

impl Path {
    /// Approximates each subpath with a polyline.
    ///
    /// Subpaths are independent, so the result has one polyline per subpath, in order.
    pub fn flattened(&self, options: &FlattenOptions) -> Vec<Vec<Point>> {
        self.subpaths
            .iter()
            .map(|subpath| flatten(subpath, options))
            .collect()
    }
}

#[cfg(test)]
use crate::geom::ArcFlags;

#[test]
fn empty_subpath() {
    let mut subpath = Subpath::new(point(1.0, 1.0));
    assert!(flatten(&subpath, &FlattenOptions::DEFAULT).is_empty());

    // Closing doesn't change anything without commands.
    subpath.close();
    assert!(flatten(&subpath, &FlattenOptions::DEFAULT).is_empty());
}

#[test]
fn lines() {
    let mut subpath = Subpath::new(point(100.0, 100.0));
    subpath.line_to(point(200.0, 200.0));
    subpath.line_to(point(300.0, 10.0));

    assert_eq!(
        flatten(&subpath, &FlattenOptions::DEFAULT),
        vec![point(100.0, 100.0), point(200.0, 200.0), point(300.0, 10.0)]
    );

    subpath.close();
    let points = flatten(&subpath, &FlattenOptions::DEFAULT);
    assert_eq!(points.len(), 4);
    assert_eq!(points.first(), points.last());
}

#[test]
fn flatten_into_appends() {
    let mut subpath = Subpath::new(point(0.0, 0.0));
    subpath.line_to(point(1.0, 0.0));

    let mut output = vec![point(-1.0, -1.0)];
    flatten_into(&subpath, &FlattenOptions::DEFAULT, &mut output);
    assert_eq!(
        output,
        vec![point(-1.0, -1.0), point(0.0, 0.0), point(1.0, 0.0)]
    );
}

#[test]
fn quadratic_curve() {
    let mut subpath = Subpath::new(point(0.0, 0.0));
    subpath.quadratic_bezier_to(point(50.0, 100.0), point(100.0, 0.0));

    let points = flatten(&subpath, &FlattenOptions::DEFAULT);
    assert!(points.len() > 3);
    assert_eq!(points[0], point(0.0, 0.0));
    assert!(points[1].y > 0.0 && points[1].y < 100.0);
    assert_eq!(*points.last().unwrap(), point(100.0, 0.0));

    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(50.0, 100.0),
        to: point(100.0, 0.0),
    };
    let mut expected = vec![curve.from];
    curve.for_each_subdivided(8, 0.001, &mut |p| expected.push(p));
    assert_eq!(points, expected);
}

#[test]
fn smooth_quadratic_reflects_previous_control() {
    let mut smooth = Subpath::new(point(0.0, 0.0));
    smooth.quadratic_bezier_to(point(10.0, 10.0), point(20.0, 0.0));
    smooth.smooth_quadratic_bezier_to(point(40.0, 0.0));

    let mut explicit = Subpath::new(point(0.0, 0.0));
    explicit.quadratic_bezier_to(point(10.0, 10.0), point(20.0, 0.0));
    explicit.quadratic_bezier_to(point(30.0, -10.0), point(40.0, 0.0));

    let options = FlattenOptions::DEFAULT;
    assert_eq!(flatten(&smooth, &options), flatten(&explicit, &options));

    // Chained smooth curves keep reflecting the synthesized control point.
    smooth.smooth_quadratic_bezier_to(point(60.0, 0.0));
    explicit.quadratic_bezier_to(point(50.0, 10.0), point(60.0, 0.0));
    assert_eq!(flatten(&smooth, &options), flatten(&explicit, &options));
}

#[test]
fn smooth_cubic_reflects_previous_control() {
    let mut smooth = Subpath::new(point(0.0, 0.0));
    smooth.cubic_bezier_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
    smooth.smooth_cubic_bezier_to(point(20.0, 10.0), point(20.0, 0.0));

    let mut explicit = Subpath::new(point(0.0, 0.0));
    explicit.cubic_bezier_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
    explicit.cubic_bezier_to(point(10.0, -10.0), point(20.0, 10.0), point(20.0, 0.0));

    let options = FlattenOptions::DEFAULT;
    assert_eq!(flatten(&smooth, &options), flatten(&explicit, &options));
}

#[test]
fn line_resets_reflection() {
    // After a line, the reflected control point is the current position itself.
    let mut smooth = Subpath::new(point(0.0, 0.0));
    smooth.cubic_bezier_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
    smooth.line_to(point(20.0, 0.0));
    smooth.smooth_cubic_bezier_to(point(30.0, 10.0), point(30.0, 0.0));

    let mut explicit = Subpath::new(point(0.0, 0.0));
    explicit.cubic_bezier_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
    explicit.line_to(point(20.0, 0.0));
    explicit.cubic_bezier_to(point(20.0, 0.0), point(30.0, 10.0), point(30.0, 0.0));

    let options = FlattenOptions::DEFAULT;
    assert_eq!(flatten(&smooth, &options), flatten(&explicit, &options));

    // A smooth quadratic after a cubic reflects the cubic's end point.
    let mut mixed = Subpath::new(point(0.0, 0.0));
    mixed.cubic_bezier_to(point(0.0, 10.0), point(10.0, 10.0), point(10.0, 0.0));
    mixed.smooth_quadratic_bezier_to(point(20.0, 0.0));
    let points = flatten(&mixed, &options);
    assert_eq!(*points.last().unwrap(), point(20.0, 0.0));
    // The second curve is a straight line: flat right away.
    assert_eq!(points[points.len() - 2], point(10.0, 0.0));
}

#[test]
fn arcs() {
    let options = FlattenOptions::DEFAULT;

    let mut subpath = Subpath::new(point(0.0, 0.0));
    subpath.arc_to(
        vector(50.0, 50.0),
        ArcFlags {
            large_arc: false,
            clockwise: true,
        },
        point(100.0, 0.0),
    );

    let points = flatten(&subpath, &options);
    // 0.2 * π * 50 ≈ 31.4 segments.
    assert_eq!(points.len(), 1 + 31);
    assert!((*points.last().unwrap() - point(100.0, 0.0)).length() < 0.001);
    for p in &points {
        assert!(((*p - point(50.0, 0.0)).length() - 50.0).abs() < 0.01);
    }
}

#[test]
fn arc_step_count_is_clamped() {
    let options = FlattenOptions::DEFAULT;
    assert_eq!(
        options.arc_step_count(Angle::radians(0.01), vector(1.0, 1.0)),
        FlattenOptions::DEFAULT_MIN_ARC_STEPS
    );
    assert_eq!(
        options.arc_step_count(Angle::radians(-6.0), vector(10000.0, 10000.0)),
        FlattenOptions::DEFAULT_MAX_ARC_STEPS
    );
    assert_eq!(
        options.arc_step_count(Angle::radians(-1.0), vector(50.0, 150.0)),
        20
    );
}

#[test]
fn degenerate_arcs() {
    let options = FlattenOptions::DEFAULT;

    let mut zero_radius = Subpath::new(point(0.0, 0.0));
    zero_radius.arc_to(vector(0.0, 0.0), ArcFlags::default(), point(10.0, 10.0));
    assert_eq!(
        flatten(&zero_radius, &options),
        vec![point(0.0, 0.0), point(10.0, 10.0)]
    );

    // A single zero radius is enough.
    let mut flat = Subpath::new(point(0.0, 0.0));
    flat.arc_to(vector(0.0, 50.0), ArcFlags::default(), point(100.0, 0.0));
    assert_eq!(
        flatten(&flat, &options),
        vec![point(0.0, 0.0), point(100.0, 0.0)]
    );

    let mut same_endpoints = Subpath::new(point(0.0, 0.0));
    same_endpoints.line_to(point(10.0, 0.0));
    same_endpoints.arc_to(vector(5.0, 5.0), ArcFlags::default(), point(10.0, 0.0));
    assert_eq!(
        flatten(&same_endpoints, &options),
        vec![point(0.0, 0.0), point(10.0, 0.0)]
    );
}

#[test]
fn path_flattened() {
    let mut path = Path::new();
    path.move_to(point(0.0, 0.0)).line_to(point(1.0, 0.0));
    path.move_to(point(5.0, 5.0));
    let third = path.move_to(point(10.0, 0.0));
    third.line_to(point(11.0, 0.0));
    third.line_to(point(11.0, 1.0));
    third.close();

    let polylines = path.flattened(&FlattenOptions::DEFAULT);
    assert_eq!(polylines.len(), 3);
    assert_eq!(polylines[0].len(), 2);
    assert!(polylines[1].is_empty());
    assert_eq!(polylines[2].len(), 4);
    assert_eq!(polylines[2][0], polylines[2][3]);
}
