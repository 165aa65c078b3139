//! The top-level decode state machine, a single strict pass with no hidden
//! state beyond the per-block face-decode write head:
//! `Start -> Header -> Regions -> Styles -> Products -> (per region:
//! GeometryBlocks*) -> Done`.

use crate::block::{self, ParsedBlock};
use crate::cursor::Cursor;
use crate::error::{Diagnostic, FormatError};
use crate::header::Header;
use crate::product::ProductTable;
use crate::region::{self, Region};
use crate::style::StyleTable;

/// Everything produced by a single linear pass over a WexBIM byte buffer:
/// the immutable prelude tables, the geometry blocks in file order, and any
/// non-fatal diagnostics collected along the way.
pub struct DecodedFile {
    pub header: Header,
    pub regions: Vec<Region>,
    pub styles: StyleTable,
    pub products: ProductTable,
    /// One entry per geometry block that parsed successfully, in file
    /// order. Blocks dropped as corrupt are absent; see `diagnostics`.
    pub blocks: Vec<ParsedBlock>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode the whole buffer synchronously.
pub fn decode(bytes: &[u8]) -> Result<DecodedFile, FormatError> {
    decode_streaming(bytes, |_, _| {})
}

/// Decode the whole buffer, invoking `on_progress(bytes_consumed,
/// bytes_total)` once per fully-parsed geometry block. This is the only
/// suspension point a cooperative host can hook into: it never fires mid
/// record, and resuming (i.e. simply calling this function) never re-reads
/// bytes already consumed, since the whole buffer is decoded in one pass.
pub fn decode_streaming(
    bytes: &[u8],
    mut on_progress: impl FnMut(usize, usize),
) -> Result<DecodedFile, FormatError> {
    let total = bytes.len();
    let mut cursor = Cursor::new(bytes);

    let header = Header::parse(&mut cursor)?;
    let regions = Region::parse_list(&mut cursor, header.num_regions)?;
    let styles = StyleTable::parse(&mut cursor, header.num_styles)?;
    let products = ProductTable::parse(&mut cursor, header.num_products)?;

    let mut blocks = Vec::new();
    let mut diagnostics = Vec::new();
    let mut block_index = 0usize;

    for _region in &regions {
        let geometry_block_count = region::read_geometry_block_count(&mut cursor)?;
        for _ in 0..geometry_block_count.max(0) {
            let (parsed, mut block_diagnostics) =
                block::parse_block(&mut cursor, header.version, block_index, &products, &styles)?;
            diagnostics.append(&mut block_diagnostics);
            if let Some(parsed) = parsed {
                blocks.push(parsed);
            }
            block_index += 1;
            on_progress(cursor.position() as usize, total);
        }
    }

    if !cursor.is_at_end() {
        diagnostics.push(Diagnostic::TrailingFileBytes {
            unread: cursor.remaining(),
        });
    }

    Ok(DecodedFile {
        header,
        regions,
        styles,
        products,
        blocks,
        diagnostics,
    })
}
