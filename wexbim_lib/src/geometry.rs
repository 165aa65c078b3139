use glam::Vec3;

use crate::cursor::Cursor;
use crate::error::BlockError;
use crate::normal::{self, NormalAccumulator};
use crate::remap;

/// Index width is a closed set of three readers, chosen once per block from
/// the vertex count and then driven in a tight loop rather than dispatched
/// per index.
#[derive(Debug, Clone, Copy)]
enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    fn for_vertex_count(n: usize) -> Self {
        if n <= 0xFF {
            IndexWidth::U8
        } else if n <= 0xFFFF {
            IndexWidth::U16
        } else {
            IndexWidth::U32
        }
    }

    fn read(self, cursor: &mut Cursor) -> Result<u32, BlockError> {
        Ok(match self {
            IndexWidth::U8 => cursor.read_u8()? as u32,
            IndexWidth::U16 => cursor.read_u16()? as u32,
            IndexWidth::U32 => cursor.read_u32()?,
        })
    }
}

/// A fully decoded triangle mesh: positions and smooth per-vertex normals in
/// the consumer's Y-up space, plus a flat triangle index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBlock {
    pub sub_version: u8,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

pub fn parse_geometry(cursor: &mut Cursor) -> Result<GeometryBlock, BlockError> {
    let sub_version = cursor.read_u8()?;
    let vertex_count = non_negative(cursor.read_i32()?)?;
    let triangle_count = non_negative(cursor.read_i32()?)?;

    let mut positions = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        let v = Vec3::new(
            cursor.read_f32()?,
            cursor.read_f32()?,
            cursor.read_f32()?,
        );
        positions.push(remap::axis_remap_vec3(v));
    }

    let index_width = IndexWidth::for_vertex_count(vertex_count);
    let expected_indices = 3 * triangle_count;

    let face_count = non_negative(cursor.read_i32()?)?;
    let mut indices = Vec::with_capacity(expected_indices);
    let mut accumulator = NormalAccumulator::new(vertex_count);

    for _ in 0..face_count {
        let k_raw = cursor.read_i32()?;
        if k_raw == 0 {
            continue;
        }
        let planar = k_raw > 0;
        let k = k_raw.unsigned_abs() as usize;

        if planar {
            let u = cursor.read_u8()?;
            let v = cursor.read_u8()?;
            let face_normal = normal::decode_octahedral(u, v);

            for _ in 0..(3 * k) {
                let index = index_width.read(cursor)?;
                check_index(index, vertex_count)?;
                indices.push(index);
                accumulator.add(index, face_normal);
            }
        } else {
            for _ in 0..k {
                for _ in 0..3 {
                    let index = index_width.read(cursor)?;
                    let u = cursor.read_u8()?;
                    let v = cursor.read_u8()?;
                    check_index(index, vertex_count)?;
                    let corner_normal = normal::decode_octahedral(u, v);
                    indices.push(index);
                    accumulator.add(index, corner_normal);
                }
            }
        }
    }

    if indices.len() != expected_indices {
        return Err(BlockError::CountMismatch {
            written: indices.len(),
            expected: expected_indices,
        });
    }

    Ok(GeometryBlock {
        sub_version,
        positions,
        normals: accumulator.finish(),
        indices,
    })
}

fn non_negative(value: i32) -> Result<usize, BlockError> {
    if value < 0 {
        Err(BlockError::CountMismatch {
            written: 0,
            expected: 0,
        })
    } else {
        Ok(value as usize)
    }
}

fn check_index(index: u32, vertex_count: usize) -> Result<(), BlockError> {
    if index as usize >= vertex_count {
        Err(BlockError::IndexOutOfRange {
            index,
            bound: vertex_count as u32,
        })
    } else {
        Ok(())
    }
}
