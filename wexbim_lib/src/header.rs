use crate::cursor::Cursor;
use crate::error::FormatError;

pub const MAGIC: i32 = 94_132_117;

/// The fixed-layout WexBIM header. Fully determines the shape of every
/// section that follows: region/style/product counts gate those tables'
/// loops, `version` gates the world-origin triplet here and the shape
/// transform element width later (§4.3).
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub version: u8,
    pub num_shapes: i32,
    pub num_vertices: i32,
    pub num_triangles: i32,
    pub num_matrices: i32,
    pub num_products: i32,
    pub num_styles: i32,
    pub meter: f32,
    /// Double-precision local world origin; zero when `version <= 3`.
    pub world_origin: [f64; 3],
    pub num_regions: i16,
}

impl Header {
    pub fn parse(cursor: &mut Cursor) -> Result<Self, FormatError> {
        let magic = cursor.read_i32()?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic {
                expected: MAGIC,
                found: magic,
            });
        }

        let version = cursor.read_u8()?;
        if version == 0 || version > 4 {
            return Err(FormatError::UnsupportedVersion { found: version });
        }

        let num_shapes = cursor.read_i32()?;
        let num_vertices = cursor.read_i32()?;
        let num_triangles = cursor.read_i32()?;
        let num_matrices = cursor.read_i32()?;
        let num_products = cursor.read_i32()?;
        let num_styles = cursor.read_i32()?;
        let meter = cursor.read_f32()?;

        let world_origin = if version > 3 {
            [cursor.read_f64()?, cursor.read_f64()?, cursor.read_f64()?]
        } else {
            [0.0; 3]
        };

        let num_regions = cursor.read_i16()?;

        Ok(Self {
            version,
            num_shapes,
            num_vertices,
            num_triangles,
            num_matrices,
            num_products,
            num_styles,
            meter,
            world_origin,
            num_regions,
        })
    }
}
