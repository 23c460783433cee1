//! Sequential read/write cursors over NDR stub data
//!
//! [`NdrWriter`] and [`NdrReader`] pair a buffer with an [`NdrContext`] and a
//! running byte position. Every read checks the remaining length first, so a
//! truncated stub surfaces as [`NdrError::BufferUnderflow`] instead of a
//! panic inside `bytes`.

use crate::error::{NdrError, Result};
use crate::{NdrContext, NdrDecode, NdrEncode};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::Write;

/// Write cursor for NDR stub data
#[derive(Debug)]
pub struct NdrWriter<B = BytesMut> {
    buf: B,
    ctx: NdrContext,
    position: usize,
}

impl NdrWriter<BytesMut> {
    /// Create a little-endian writer over a growable buffer
    pub fn new() -> Self {
        Self::from_buf(BytesMut::new(), NdrContext::new())
    }

    /// Create a little-endian writer with preallocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_buf(BytesMut::with_capacity(capacity), NdrContext::new())
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish writing and return the encoded stub
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    /// Move the buffered bytes into an I/O sink.
    ///
    /// The position keeps counting from the start of the stub, so alignment
    /// stays correct across flushes.
    pub fn flush_into<W: Write>(&mut self, sink: &mut W) -> Result<()> {
        sink.write_all(&self.buf)?;
        sink.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Default for NdrWriter<BytesMut> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BufMut> NdrWriter<B> {
    /// Create a writer over an arbitrary buffer
    pub fn from_buf(buf: B, ctx: NdrContext) -> Self {
        Self { buf, ctx, position: 0 }
    }

    /// Encoding context (byte order)
    pub fn context(&self) -> &NdrContext {
        &self.ctx
    }

    /// Byte offset from the start of the stub
    pub fn position(&self) -> usize {
        self.position
    }

    /// Encode any fixed-width NDR value
    pub fn write<T: NdrEncode>(&mut self, value: &T) -> Result<()> {
        value.ndr_encode(&mut self.buf, &self.ctx, &mut self.position)
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write(&value)
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write(&value)
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write(&value)
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write(&value)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write(&value)
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write(&value)
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write(&value)
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write(&value)
    }

    /// Append raw bytes verbatim, without a length prefix
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.buf.remaining_mut() < bytes.len() {
            return Err(NdrError::BufferOverflow {
                needed: bytes.len(),
                have: self.buf.remaining_mut(),
            });
        }
        self.buf.put_slice(bytes);
        self.position += bytes.len();
        Ok(())
    }

    /// Insert zero padding up to the given alignment, returning the pad length
    pub fn write_align(&mut self, alignment: usize) -> Result<usize> {
        let padding = self.ctx.write_align(&mut self.buf, self.position, alignment)?;
        self.position += padding;
        Ok(padding)
    }

    pub fn into_inner(self) -> B {
        self.buf
    }
}

/// Read cursor for NDR stub data
#[derive(Debug)]
pub struct NdrReader<B> {
    buf: B,
    ctx: NdrContext,
    position: usize,
}

impl<B: Buf> NdrReader<B> {
    /// Create a little-endian reader
    pub fn new(buf: B) -> Self {
        Self::with_context(buf, NdrContext::new())
    }

    /// Create a reader with an explicit context
    pub fn with_context(buf: B, ctx: NdrContext) -> Self {
        Self { buf, ctx, position: 0 }
    }

    pub fn context(&self) -> &NdrContext {
        &self.ctx
    }

    /// Byte offset from the start of the stub
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Decode any fixed-width NDR value
    pub fn read<T: NdrDecode>(&mut self) -> Result<T> {
        T::ndr_decode(&mut self.buf, &self.ctx, &mut self.position)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read()
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.read()
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read()
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read()
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read()
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read()
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read()
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read()
    }

    /// Read exactly `N` raw bytes
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.read()
    }

    /// Read exactly `len` raw bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        if self.buf.remaining() < len {
            return Err(NdrError::BufferUnderflow {
                needed: len,
                have: self.buf.remaining(),
            });
        }
        self.position += len;
        Ok(self.buf.copy_to_bytes(len))
    }

    /// Skip padding up to the given alignment, returning the pad length
    pub fn read_align(&mut self, alignment: usize) -> Result<usize> {
        let padding = self.ctx.read_align(&mut self.buf, self.position, alignment)?;
        self.position += padding;
        Ok(padding)
    }

    /// Check that the stub was consumed exactly
    pub fn finish(self) -> Result<()> {
        match self.buf.remaining() {
            0 => Ok(()),
            remaining => Err(NdrError::TrailingData { remaining }),
        }
    }
}
