//! NDR decoding trait

use crate::{NdrContext, Result};
use bytes::Buf;

/// Trait for fixed-width values that can be decoded from NDR format
pub trait NdrDecode: Sized {
    /// Decode a value from the buffer at the current position.
    ///
    /// Fails with [`NdrError::BufferUnderflow`](crate::NdrError::BufferUnderflow)
    /// when fewer bytes remain than the value's width; nothing is consumed
    /// in that case.
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self>;
}
