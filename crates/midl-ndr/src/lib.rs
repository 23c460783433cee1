//! NDR (Network Data Representation) byte cursors
//!
//! This crate provides the primitive codec used to marshal fixed-layout
//! DCE RPC stub data, following the NDR transfer syntax as specified in
//! DCE 1.1 RPC and MS-RPCE.
//!
//! # Scope
//!
//! Only the fixed-width, non-pointer subset of NDR is covered:
//! - Integers of width 1, 2, 4 and 8 bytes, little-endian by default
//! - Raw byte blobs of a fixed length (context handles, UUIDs)
//!
//! The cursors never insert alignment padding on their own. A message that
//! needs padding asks for it explicitly with [`NdrWriter::write_align`] and
//! [`NdrReader::read_align`].
//!
//! # Example
//!
//! ```
//! use midl_ndr::{NdrReader, NdrWriter};
//!
//! let mut writer = NdrWriter::new();
//! writer.write_bytes(&[0xAA; 4]).unwrap();
//! writer.write_u16(21).unwrap();
//! let stub = writer.freeze();
//! assert_eq!(stub.as_ref(), &[0xAA, 0xAA, 0xAA, 0xAA, 0x15, 0x00]);
//!
//! let mut reader = NdrReader::new(stub);
//! assert_eq!(reader.read_array::<4>().unwrap(), [0xAA; 4]);
//! assert_eq!(reader.read_u16().unwrap(), 21);
//! reader.finish().unwrap();
//! ```

mod context;
mod cursor;
mod decode;
mod encode;
mod error;
mod primitives;

pub use context::NdrContext;
pub use cursor::{NdrReader, NdrWriter};
pub use decode::NdrDecode;
pub use encode::NdrEncode;
pub use error::{NdrError, Result};

/// Re-export bytes for convenience
pub use bytes::{Buf, BufMut, Bytes, BytesMut};
