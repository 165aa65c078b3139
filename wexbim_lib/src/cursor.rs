//! Little-endian cursor over an immutable byte slice.
//!
//! Every read advances the cursor by its exact natural width; reads past the
//! end of the visible slice fail with [`FormatError::UnexpectedEof`] rather
//! than panicking. [`Cursor::sub_cursor`] carves an independent, bounded
//! cursor for a length-prefixed region: the parent always advances past the
//! declared length regardless of how much of it the sub-cursor's caller
//! actually consumes, so a corrupt inner record can never desynchronize the
//! rest of the file.

use std::io::Cursor as IoCursor;

use binrw::BinReaderExt;

use crate::error::FormatError;

pub struct Cursor<'a> {
    inner: IoCursor<&'a [u8]>,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: IoCursor::new(data),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        self.inner.read_le().map_err(Into::into)
    }

    pub fn read_u16(&mut self) -> Result<u16, FormatError> {
        self.inner.read_le().map_err(Into::into)
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        self.inner.read_le().map_err(Into::into)
    }

    pub fn read_i16(&mut self) -> Result<i16, FormatError> {
        self.inner.read_le().map_err(Into::into)
    }

    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        self.inner.read_le().map_err(Into::into)
    }

    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        self.inner.read_le().map_err(Into::into)
    }

    pub fn read_f64(&mut self) -> Result<f64, FormatError> {
        self.inner.read_le().map_err(Into::into)
    }

    pub fn read_f32_array(&mut self, count: usize) -> Result<Vec<f32>, FormatError> {
        (0..count).map(|_| self.read_f32()).collect()
    }

    pub fn read_f64_array(&mut self, count: usize) -> Result<Vec<f64>, FormatError> {
        (0..count).map(|_| self.read_f64()).collect()
    }

    /// Borrow `count` bytes without copying, advancing past them.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], FormatError> {
        let data = *self.inner.get_ref();
        let pos = self.inner.position() as usize;
        let end = pos
            .checked_add(count)
            .filter(|&end| end <= data.len())
            .ok_or(FormatError::UnexpectedEof)?;
        self.inner.set_position(end as u64);
        Ok(&data[pos..end])
    }

    /// Carve an independent cursor over the next `len` bytes and advance past
    /// them in this cursor, whether or not the sub-cursor is ever read.
    pub fn sub_cursor(&mut self, len: usize) -> Result<Cursor<'a>, FormatError> {
        let slice = self.read_bytes(len)?;
        Ok(Cursor::new(slice))
    }

    pub fn is_at_end(&self) -> bool {
        self.remaining() == 0
    }

    pub fn remaining(&self) -> usize {
        let data = self.inner.get_ref();
        data.len().saturating_sub(self.inner.position() as usize)
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }
}
