//! Binary format layer for WexBIM, the compact triangulated-geometry
//! interchange format produced by the Xbim toolchain.
//!
//! This crate owns the byte-exact grammar: the header and prelude tables
//! (regions, styles, products), the shape-instance and geometry-block
//! parsers, octahedral normal decoding, per-vertex normal accumulation, and
//! the fixed Z-up -> Y-up axis remap. It has no notion of a scene graph or
//! materials; [`wexbim_model`](https://docs.rs/wexbim_model) builds those on
//! top of [`DecodedFile`].
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // `decode` takes the full file contents and returns every parsed table
//! // plus the geometry blocks, in file order.
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod geometry;
pub mod header;
pub mod normal;
pub mod product;
pub mod region;
pub mod remap;
pub mod shape;
pub mod style;

pub use block::ParsedBlock;
pub use cursor::Cursor;
pub use decode::{decode, decode_streaming, DecodedFile};
pub use error::{BlockError, Diagnostic, FormatError};
pub use geometry::GeometryBlock;
pub use header::Header;
pub use product::{ProductRecord, ProductTable};
pub use region::Region;
pub use shape::ShapeInstance;
pub use style::{StyleRecord, StyleTable, OPENING_STYLE_ID, UNKNOWN_STYLE_ID};
