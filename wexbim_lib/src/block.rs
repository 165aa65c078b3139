//! One geometry block: a length-prefixed region containing a shape-instance
//! list followed by its triangle mesh. The length prefix is what lets the
//! decode loop isolate a corrupt block: the parent cursor always advances
//! past the declared length, whether or not parsing the block's contents
//! succeeds.

use crate::cursor::Cursor;
use crate::error::{BlockError, Diagnostic, FormatError};
use crate::geometry::{self, GeometryBlock};
use crate::product::ProductTable;
use crate::shape::{self, ShapeInstance};
use crate::style::StyleTable;

pub struct ParsedBlock {
    pub shapes: Vec<ShapeInstance>,
    pub geometry: GeometryBlock,
}

/// Read one block's length prefix and contents. Returns `Ok(None)` (plus a
/// diagnostic) for a block that fails to parse; returns `Ok(Some(_))` with
/// the block plus any non-fatal diagnostics (e.g. trailing bytes)
/// otherwise. Only a failure to read the length prefix itself (on the
/// parent cursor, outside the bounded sub-region) is fatal.
pub fn parse_block(
    cursor: &mut Cursor,
    version: u8,
    block_index: usize,
    products: &ProductTable,
    styles: &StyleTable,
) -> Result<(Option<ParsedBlock>, Vec<Diagnostic>), FormatError> {
    let byte_length = cursor.read_u32()? as usize;
    let mut sub = cursor.sub_cursor(byte_length)?;
    let mut diagnostics = Vec::new();

    let result: Result<ParsedBlock, BlockError> = (|| {
        let shapes = shape::parse_shapes(&mut sub, version, products, styles, &mut diagnostics)?;
        let geometry = geometry::parse_geometry(&mut sub)?;
        Ok(ParsedBlock { shapes, geometry })
    })();

    match result {
        Ok(block) => {
            if !sub.is_at_end() {
                diagnostics.push(Diagnostic::TrailingBytes {
                    block_index,
                    unread: sub.remaining(),
                });
            }
            Ok((Some(block), diagnostics))
        }
        Err(reason) => {
            log::warn!("dropping geometry block {block_index}: {reason}");
            diagnostics.push(Diagnostic::CorruptBlock {
                block_index,
                reason,
            });
            Ok((None, diagnostics))
        }
    }
}
