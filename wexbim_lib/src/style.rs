use indexmap::IndexMap;

use crate::cursor::Cursor;
use crate::error::FormatError;

/// Sentinel style id for any style id not present in the file.
pub const UNKNOWN_STYLE_ID: i32 = -1;
/// Sentinel style id forced for opening/space product types (3, 4).
pub const OPENING_STYLE_ID: i32 = -2;

const UNKNOWN_RGBA: [f32; 4] = [0.65, 0.65, 0.65, 1.0];
const OPENING_RGBA: [f32; 4] = [0.3, 0.3, 0.3, 0.2];

/// `id` (file key), `index` (dense position in palette order, including the
/// two sentinels), RGBA in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRecord {
    pub id: i32,
    pub index: usize,
    pub rgba: [f32; 4],
}

impl StyleRecord {
    /// Unnormalized cutoff, matching the source exactly rather than 1.0.
    pub fn transparent(&self) -> bool {
        self.rgba[3] < 254.0 / 255.0
    }

    pub fn opacity(&self) -> f32 {
        self.rgba[3]
    }
}

/// Dense palette plus a sparse id -> index map. Lookup is total: any id
/// absent from the file resolves to the `-1` sentinel.
#[derive(Debug, Clone)]
pub struct StyleTable {
    styles: Vec<StyleRecord>,
    by_id: IndexMap<i32, usize>,
}

impl StyleTable {
    pub fn parse(cursor: &mut Cursor, count: i32) -> Result<Self, FormatError> {
        if count < 0 {
            return Err(FormatError::NegativeCount {
                field: "numStyles",
                value: count,
            });
        }
        let mut styles = Vec::with_capacity(count as usize + 2);
        let mut by_id = IndexMap::with_capacity(styles.capacity());

        for _ in 0..count {
            let id = cursor.read_i32()?;
            let rgba = [
                cursor.read_f32()?,
                cursor.read_f32()?,
                cursor.read_f32()?,
                cursor.read_f32()?,
            ];
            push(&mut styles, &mut by_id, id, rgba);
        }

        push(&mut styles, &mut by_id, UNKNOWN_STYLE_ID, UNKNOWN_RGBA);
        push(&mut styles, &mut by_id, OPENING_STYLE_ID, OPENING_RGBA);

        Ok(Self { styles, by_id })
    }

    /// True if `id` resolves to a file-provided or sentinel entry (used by
    /// the shape-instance parser to decide "style id unknown").
    pub fn contains(&self, id: i32) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Total lookup: unknown ids fall back to the `-1` sentinel, which is
    /// always present.
    pub fn lookup(&self, id: i32) -> &StyleRecord {
        match self.by_id.get(&id) {
            Some(&index) => &self.styles[index],
            None => self.lookup(UNKNOWN_STYLE_ID),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleRecord> {
        self.styles.iter()
    }
}

fn push(styles: &mut Vec<StyleRecord>, by_id: &mut IndexMap<i32, usize>, id: i32, rgba: [f32; 4]) {
    let index = styles.len();
    by_id.insert(id, index);
    styles.push(StyleRecord { id, index, rgba });
}
