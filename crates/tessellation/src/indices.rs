//! Index buffers for the vertex streams produced without indices.
//!
//! Strokes and the fringe of two-output fills are triangle strips, fill interiors are
//! triangle fans. These functions append the matching triangle list indices to an index
//! buffer of any width that `VertexId` converts into.

use crate::VertexId;

use alloc::vec::Vec;

/// Appends the indices of a triangle fan of `count` vertices: `(0, i - 1, i)` for each
/// `i` in `2..count`.
///
/// Produces `3 * (count - 2)` indices, nothing if `count < 3`.
pub fn triangle_fan_indices<OutputIndex>(count: usize, output: &mut Vec<OutputIndex>)
where
    OutputIndex: From<VertexId>,
{
    if count < 3 {
        return;
    }

    output.reserve(3 * (count - 2));
    for i in 2..count {
        output.push(VertexId(0).into());
        output.push(VertexId::from_usize(i - 1).into());
        output.push(VertexId::from_usize(i).into());
    }
}

/// Appends the indices of a triangle strip of `count` vertices.
///
/// Every other triangle has its first two vertices swapped so that all triangles share
/// the orientation of the first one.
///
/// Produces `3 * (count - 2)` indices, nothing if `count < 3`.
pub fn triangle_strip_indices<OutputIndex>(count: usize, output: &mut Vec<OutputIndex>)
where
    OutputIndex: From<VertexId>,
{
    if count < 3 {
        return;
    }

    output.reserve(3 * (count - 2));
    for i in 2..count {
        let (a, b) = if i % 2 == 0 {
            (i - 2, i - 1)
        } else {
            (i - 1, i - 2)
        };
        output.push(VertexId::from_usize(a).into());
        output.push(VertexId::from_usize(b).into());
        output.push(VertexId::from_usize(i).into());
    }
}

/// Appends the indices of a triangle strip of `count` vertices that wraps around, as
/// produced when stroking a ring.
///
/// `count` must be even. Produces `3 * count` indices, nothing if `count < 4`.
pub fn closed_triangle_strip_indices<OutputIndex>(count: usize, output: &mut Vec<OutputIndex>)
where
    OutputIndex: From<VertexId>,
{
    debug_assert!(count % 2 == 0);
    if count < 4 {
        return;
    }

    triangle_strip_indices(count, output);

    output.push(VertexId::from_usize(count - 2).into());
    output.push(VertexId::from_usize(count - 1).into());
    output.push(VertexId(0).into());

    output.push(VertexId(0).into());
    output.push(VertexId::from_usize(count - 1).into());
    output.push(VertexId(1).into());
}

#[test]
fn fan() {
    let mut indices: Vec<u16> = Vec::new();
    triangle_fan_indices(5, &mut indices);
    assert_eq!(indices, [0, 1, 2, 0, 2, 3, 0, 3, 4]);

    let mut wide: Vec<usize> = Vec::new();
    triangle_fan_indices(2, &mut wide);
    assert!(wide.is_empty());
}

#[test]
fn strip() {
    let mut indices: Vec<u32> = Vec::new();
    triangle_strip_indices(5, &mut indices);
    assert_eq!(indices, [0, 1, 2, 2, 1, 3, 2, 3, 4]);

    let mut signed: Vec<i32> = Vec::new();
    triangle_strip_indices(0, &mut signed);
    assert!(signed.is_empty());
}

#[test]
fn closed_strip() {
    let mut indices: Vec<u16> = Vec::new();
    closed_triangle_strip_indices(6, &mut indices);
    assert_eq!(indices.len(), 18);
    assert_eq!(&indices[12..], &[4, 5, 0, 0, 5, 1]);
}

#[test]
fn index_count() {
    for count in 3..20 {
        let mut indices: Vec<u32> = Vec::new();
        triangle_fan_indices(count, &mut indices);
        triangle_strip_indices(count, &mut indices);
        assert_eq!(indices.len(), 6 * (count - 2));
    }
}
