use glam::Vec3;
use indexmap::IndexMap;

use crate::cursor::Cursor;
use crate::error::FormatError;
use crate::remap;

/// IFC product type code for openings.
pub const OPENING_PRODUCT_TYPE: i16 = 3;
/// IFC product type code for spaces.
pub const SPACE_PRODUCT_TYPE: i16 = 4;

pub fn is_opening_or_space(product_type: i16) -> bool {
    product_type == OPENING_PRODUCT_TYPE || product_type == SPACE_PRODUCT_TYPE
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductRecord {
    pub label: i32,
    pub product_type: i16,
    pub bbox_min: Vec3,
    pub bbox_max: Vec3,
    /// 1-based index in parse order.
    pub render_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ProductTable {
    by_label: IndexMap<i32, ProductRecord>,
}

impl ProductTable {
    pub fn parse(cursor: &mut Cursor, count: i32) -> Result<Self, FormatError> {
        if count < 0 {
            return Err(FormatError::NegativeCount {
                field: "numProducts",
                value: count,
            });
        }
        let mut by_label = IndexMap::with_capacity(count as usize);

        for i in 0..count {
            let label = cursor.read_i32()?;
            let product_type = cursor.read_i16()?;
            let min = Vec3::new(
                cursor.read_f32()?,
                cursor.read_f32()?,
                cursor.read_f32()?,
            );
            let max = Vec3::new(
                cursor.read_f32()?,
                cursor.read_f32()?,
                cursor.read_f32()?,
            );
            let (bbox_min, bbox_max) = remap::axis_remap_bbox(min, max);

            by_label.insert(
                label,
                ProductRecord {
                    label,
                    product_type,
                    bbox_min,
                    bbox_max,
                    render_id: i + 1,
                },
            );
        }

        Ok(Self { by_label })
    }

    pub fn get(&self, label: i32) -> Option<&ProductRecord> {
        self.by_label.get(&label)
    }
}
