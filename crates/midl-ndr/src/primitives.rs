//! NDR primitive type implementations
//!
//! | MIDL Type      | Rust Type | Size |
//! |----------------|-----------|------|
//! | byte/char      | u8        | 1    |
//! | small          | i8        | 1    |
//! | short          | i16       | 2    |
//! | long/int       | i32       | 4    |
//! | hyper          | i64       | 8    |
//! | unsigned short | u16       | 2    |
//! | unsigned long  | u32       | 4    |
//! | unsigned hyper | u64       | 8    |
//! | byte[N]        | [u8; N]   | N    |
//!
//! Values are written at the current position with no alignment padding.

use crate::error::NdrError;
use crate::{NdrContext, NdrDecode, NdrEncode, Result};
use bytes::{Buf, BufMut};

macro_rules! impl_ndr_primitive {
    ($ty:ty, $size:expr, $put:ident, $get:ident) => {
        impl NdrEncode for $ty {
            fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
                if buf.remaining_mut() < $size {
                    return Err(NdrError::BufferOverflow {
                        needed: $size,
                        have: buf.remaining_mut(),
                    });
                }
                ctx.$put(buf, *self);
                *position += $size;
                Ok(())
            }

            fn ndr_size(&self) -> usize {
                $size
            }
        }

        impl NdrDecode for $ty {
            fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
                if buf.remaining() < $size {
                    return Err(NdrError::BufferUnderflow {
                        needed: $size,
                        have: buf.remaining(),
                    });
                }
                let value = ctx.$get(buf);
                *position += $size;
                Ok(value)
            }
        }
    };
}

impl_ndr_primitive!(u8, 1, put_u8, get_u8);
impl_ndr_primitive!(i8, 1, put_i8, get_i8);
impl_ndr_primitive!(u16, 2, put_u16, get_u16);
impl_ndr_primitive!(i16, 2, put_i16, get_i16);
impl_ndr_primitive!(u32, 4, put_u32, get_u32);
impl_ndr_primitive!(i32, 4, put_i32, get_i32);
impl_ndr_primitive!(u64, 8, put_u64, get_u64);
impl_ndr_primitive!(i64, 8, put_i64, get_i64);

/// Fixed-size opaque byte blob, copied verbatim (no length prefix)
impl<const N: usize> NdrEncode for [u8; N] {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, _ctx: &NdrContext, position: &mut usize) -> Result<()> {
        if buf.remaining_mut() < N {
            return Err(NdrError::BufferOverflow {
                needed: N,
                have: buf.remaining_mut(),
            });
        }
        buf.put_slice(self);
        *position += N;
        Ok(())
    }

    fn ndr_size(&self) -> usize {
        N
    }
}

impl<const N: usize> NdrDecode for [u8; N] {
    fn ndr_decode<B: Buf>(buf: &mut B, _ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        if buf.remaining() < N {
            return Err(NdrError::BufferUnderflow {
                needed: N,
                have: buf.remaining(),
            });
        }
        let mut value = [0u8; N];
        buf.copy_to_slice(&mut value);
        *position += N;
        Ok(value)
    }
}
