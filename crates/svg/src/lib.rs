#![deny(bare_trait_objects)]

//! Parse SVG path data into fringe paths.
//!
//! This crate is reexported in `fringe` behind the `svg` feature.
//!
//! # Examples
//!
//! ```
//! # extern crate fringe_svg;
//! use fringe_svg::{parse_subpath, ParseError, ParseErrorKind};
//! use fringe_svg::path::{FlattenOptions, Verb};
//! use fringe_svg::path::math::point;
//!
//! let subpath = parse_subpath("M300,200 h-150 a150,150 0 1,0 150,-150 z", point(0.0, 0.0)).unwrap();
//! assert!(subpath.closed);
//! assert!(matches!(subpath.commands[1].verb, Verb::Arc { .. }));
//!
//! let polyline = subpath.flattened(&FlattenOptions::default());
//! assert_eq!(polyline.first(), polyline.last());
//!
//! assert_eq!(
//!     parse_subpath("L 10", point(0.0, 0.0)),
//!     Err(ParseError { kind: ParseErrorKind::Incomplete, offset: 4 }),
//! );
//! ```

pub extern crate fringe_path as path;

pub use crate::path::math;

pub mod parser;

#[doc(inline)]
pub use crate::parser::{parse_path, parse_subpath, ParseError, ParseErrorKind};
