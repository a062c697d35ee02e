#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![no_std]

//! 2d polygon algorithms used by the tessellators.
//!
//! This crate is reexported in `fringe`.

#[cfg(any(test, feature = "std"))]
extern crate std;

pub extern crate fringe_path as path;

pub mod area;
pub mod winding;

pub use crate::path::geom;
pub use crate::path::math;
