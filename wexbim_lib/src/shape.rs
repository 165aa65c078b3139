use glam::Mat4;

use crate::cursor::Cursor;
use crate::error::{BlockError, Diagnostic};
use crate::product::{self, ProductTable};
use crate::remap;
use crate::style::{StyleTable, OPENING_STYLE_ID, UNKNOWN_STYLE_ID};

/// One appearance of a product in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInstance {
    pub product_label: i32,
    pub instance_type: i16,
    pub instance_label: i32,
    /// The style id as stored in the file.
    pub style_id: i32,
    /// The resolved style id after the opening/space override and the
    /// unknown-style fallback are applied.
    pub effective_style_id: i32,
    /// Present only when the enclosing block's repetition is `> 1`.
    /// Absent in file means identity at emit-time, not a stored identity.
    pub transform: Option<Mat4>,
}

/// Parse the repetition count and that many shape-instance records.
/// Repetition 1 carries no stored transform; repetition >= 2 stores one
/// transform per instance (f32 matrix elements in v1, f64 in v>=2).
pub fn parse_shapes(
    cursor: &mut Cursor,
    version: u8,
    products: &ProductTable,
    styles: &StyleTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<ShapeInstance>, BlockError> {
    let repetition = cursor.read_i32()?;
    if repetition < 0 {
        return Err(BlockError::CountMismatch {
            written: 0,
            expected: repetition.max(0) as usize,
        });
    }
    let repetition = repetition as usize;

    let mut shapes = Vec::with_capacity(repetition);
    for _ in 0..repetition {
        let product_label = cursor.read_i32()?;
        let instance_type = cursor.read_i16()?;
        let instance_label = cursor.read_i32()?;
        let style_id = cursor.read_i32()?;

        let transform = if repetition > 1 {
            Some(read_transform(cursor, version)?)
        } else {
            None
        };

        let product_type = products.get(product_label).map(|p| p.product_type);
        if product_type.is_none() {
            diagnostics.push(Diagnostic::UnknownProduct { product_label });
        }

        let effective_style_id = effective_style(style_id, product_type, styles);

        shapes.push(ShapeInstance {
            product_label,
            instance_type,
            instance_label,
            style_id,
            effective_style_id,
            transform,
        });
    }

    Ok(shapes)
}

fn effective_style(style_id: i32, product_type: Option<i16>, styles: &StyleTable) -> i32 {
    match product_type {
        Some(t) if product::is_opening_or_space(t) => OPENING_STYLE_ID,
        _ if styles.contains(style_id) => style_id,
        _ => UNKNOWN_STYLE_ID,
    }
}

fn read_transform(cursor: &mut Cursor, version: u8) -> Result<Mat4, BlockError> {
    let mut elements = [0f32; 16];
    if version >= 2 {
        for slot in &mut elements {
            *slot = cursor.read_f64()? as f32;
        }
    } else {
        for slot in &mut elements {
            *slot = cursor.read_f32()?;
        }
    }
    Ok(remap::axis_remap_mat4(Mat4::from_cols_array(&elements)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_tables() -> (ProductTable, StyleTable) {
        let bytes: [u8; 0] = [];
        let mut c = Cursor::new(&bytes);
        let products = ProductTable::parse(&mut c, 0).unwrap();
        let mut c = Cursor::new(&bytes);
        let styles = StyleTable::parse(&mut c, 0).unwrap();
        (products, styles)
    }

    #[test]
    fn repetition_one_has_no_transform() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes()); // repetition
        bytes.extend_from_slice(&100i32.to_le_bytes()); // product label
        bytes.extend_from_slice(&1i16.to_le_bytes()); // instance type
        bytes.extend_from_slice(&1i32.to_le_bytes()); // instance label
        bytes.extend_from_slice(&7i32.to_le_bytes()); // style id

        let (products, styles) = empty_tables();
        let mut diagnostics = Vec::new();
        let mut c = Cursor::new(&bytes);
        let shapes = parse_shapes(&mut c, 4, &products, &styles, &mut diagnostics).unwrap();

        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].transform.is_none());
        assert_eq!(shapes[0].effective_style_id, UNKNOWN_STYLE_ID);
        assert_eq!(diagnostics.len(), 1); // product 100 unknown
    }

    #[test]
    fn repetition_two_reads_two_transforms() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&2i32.to_le_bytes());
        for _ in 0..2 {
            bytes.extend_from_slice(&100i32.to_le_bytes());
            bytes.extend_from_slice(&1i16.to_le_bytes());
            bytes.extend_from_slice(&1i32.to_le_bytes());
            bytes.extend_from_slice(&7i32.to_le_bytes());
            let identity = glam::Mat4::IDENTITY.to_cols_array();
            for f in identity {
                bytes.extend_from_slice(&(f as f64).to_le_bytes());
            }
        }

        let (products, styles) = empty_tables();
        let mut diagnostics = Vec::new();
        let mut c = Cursor::new(&bytes);
        let shapes = parse_shapes(&mut c, 4, &products, &styles, &mut diagnostics).unwrap();

        assert_eq!(shapes.len(), 2);
        assert!(shapes[0].transform.is_some());
        assert_eq!(shapes[0].transform.unwrap(), glam::Mat4::IDENTITY);
    }
}
