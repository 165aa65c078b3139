use glam::Vec3;

use crate::cursor::Cursor;
use crate::error::FormatError;
use crate::remap;

/// A spatial partition. `bbox_min <= bbox_max` componentwise after remap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub population: i32,
    pub centre: Vec3,
    pub bbox_min: Vec3,
    pub bbox_max: Vec3,
}

impl Region {
    fn parse(cursor: &mut Cursor) -> Result<Self, FormatError> {
        let population = cursor.read_i32()?;
        let centre = remap::axis_remap_vec3(read_vec3(cursor)?);
        let min = read_vec3(cursor)?;
        let max = read_vec3(cursor)?;
        let (bbox_min, bbox_max) = remap::axis_remap_bbox(min, max);
        Ok(Self {
            population,
            centre,
            bbox_min,
            bbox_max,
        })
    }

    pub fn parse_list(cursor: &mut Cursor, count: i16) -> Result<Vec<Self>, FormatError> {
        if count < 0 {
            return Err(FormatError::NegativeCount {
                field: "numRegions",
                value: count as i32,
            });
        }
        (0..count).map(|_| Self::parse(cursor)).collect()
    }
}

fn read_vec3(cursor: &mut Cursor) -> Result<Vec3, FormatError> {
    Ok(Vec3::new(
        cursor.read_f32()?,
        cursor.read_f32()?,
        cursor.read_f32()?,
    ))
}

/// Read the per-region geometry block count that precedes that region's
/// shape-instance/geometry blocks: each region is the container for a list
/// of geometry blocks, applied uniformly across versions 1-4 (see
/// DESIGN.md for the version-gating rationale).
pub fn read_geometry_block_count(cursor: &mut Cursor) -> Result<i32, FormatError> {
    cursor.read_i32()
}
