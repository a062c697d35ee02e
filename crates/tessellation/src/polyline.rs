//! A cursor over the corners of a polyline, shared by the tessellators.

use crate::math::{Point, Vector};
use crate::math_utils::{miter_extrusion, right_normal};

/// A polyline seen either as an open chain or as a closed ring.
///
/// If the first and last points are equal the last one is dropped and the polyline is
/// treated as a ring, whatever the requested mode.
pub(crate) struct Ring<'l> {
    points: &'l [Point],
    looped: bool,
}

/// What the tessellators should do with a given point of a `Ring`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Corner {
    /// A regular point, extruded along `extrusion`.
    Joint {
        index: usize,
        position: Point,
        extrusion: Vector,
    },
    /// A point that coincides with its successor, or that has no distinct neighbour.
    /// No normal can be computed for it.
    Doubled { index: usize, position: Point },
}

impl<'l> Ring<'l> {
    pub fn new(points: &'l [Point], looped: bool) -> Self {
        let n = points.len();
        if n >= 2 && points[0] == points[n - 1] {
            return Ring {
                points: &points[..n - 1],
                looped: true,
            };
        }

        Ring { points, looped }
    }

    #[inline]
    pub fn points(&self) -> &'l [Point] {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_looped(&self) -> bool {
        self.looped
    }

    fn next_index(&self, index: usize) -> Option<usize> {
        if index + 1 < self.points.len() {
            Some(index + 1)
        } else if self.looped {
            Some(0)
        } else {
            None
        }
    }

    fn previous_index(&self, index: usize) -> Option<usize> {
        if index > 0 {
            Some(index - 1)
        } else if self.looped {
            Some(self.points.len() - 1)
        } else {
            None
        }
    }

    /// Walks backwards to the closest point that differs from the one at `index`.
    fn previous_distinct(&self, index: usize) -> Option<Point> {
        let position = self.points[index];
        let mut cursor = index;
        for _ in 1..self.points.len() {
            cursor = self.previous_index(cursor)?;
            let candidate = self.points[cursor];
            if candidate != position {
                return Some(candidate);
            }
        }

        None
    }

    pub fn corner(&self, index: usize) -> Corner {
        let position = self.points[index];
        let next = self.next_index(index).map(|i| self.points[i]);

        if next == Some(position) {
            return Corner::Doubled { index, position };
        }

        let incoming = self
            .previous_distinct(index)
            .map(|prev| right_normal(position - prev));
        let outgoing = next.map(|next| right_normal(next - position));

        let extrusion = match (incoming, outgoing) {
            (Some(n0), Some(n1)) => miter_extrusion(n0, n1),
            (Some(n), None) | (None, Some(n)) => n.normalize(),
            (None, None) => {
                return Corner::Doubled { index, position };
            }
        };

        Corner::Joint {
            index,
            position,
            extrusion,
        }
    }

    pub fn corners(&self) -> impl Iterator<Item = Corner> + '_ {
        (0..self.points.len()).map(move |i| self.corner(i))
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[cfg(test)]
fn extrusion(corner: Corner) -> Vector {
    match corner {
        Corner::Joint { extrusion, .. } => extrusion,
        Corner::Doubled { .. } => panic!("unexpected doubled corner"),
    }
}

#[test]
fn closing_point_makes_a_ring() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 0.0),
    ];
    let ring = Ring::new(&points, false);
    assert!(ring.is_looped());
    assert_eq!(ring.len(), 3);

    let open = Ring::new(&points[..3], false);
    assert!(!open.is_looped());
    assert_eq!(open.len(), 3);
}

#[test]
fn open_ends_use_the_adjacent_segment() {
    let points = [point(0.0, 0.0), point(2.0, 0.0), point(2.0, 2.0)];
    let ring = Ring::new(&points, false);

    assert_eq!(extrusion(ring.corner(0)), vector(0.0, -1.0));
    assert_eq!(extrusion(ring.corner(2)), vector(1.0, 0.0));
    let middle = extrusion(ring.corner(1));
    assert!((middle - vector(1.0, -1.0)).square_length() < 1e-5);
}

#[test]
fn rings_wrap_around() {
    let points = [
        point(0.0, 0.0),
        point(2.0, 0.0),
        point(2.0, 2.0),
        point(0.0, 2.0),
    ];
    let ring = Ring::new(&points, true);

    let first = extrusion(ring.corner(0));
    assert!((first - vector(-1.0, -1.0)).square_length() < 1e-5);
}

#[test]
fn doubled_points() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 0.0),
    ];
    let ring = Ring::new(&points, false);
    let corners: std::vec::Vec<Corner> = ring.corners().collect();

    assert_eq!(
        corners[1],
        Corner::Doubled {
            index: 1,
            position: point(1.0, 0.0)
        }
    );
    // The duplicate is skipped when looking for the previous point.
    assert_eq!(extrusion(corners[2]), vector(0.0, -1.0));
    assert_eq!(extrusion(corners[3]), vector(0.0, -1.0));
}

#[test]
fn single_distinct_point() {
    let points = [point(1.0, 1.0), point(1.0, 1.0), point(1.0, 1.0)];
    let ring = Ring::new(&points, false);
    assert!(ring
        .corners()
        .all(|corner| matches!(corner, Corner::Doubled { .. })));
}
