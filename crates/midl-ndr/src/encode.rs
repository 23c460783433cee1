//! NDR encoding trait

use crate::{NdrContext, Result};
use bytes::BufMut;

/// Trait for fixed-width values that can be encoded to NDR format
pub trait NdrEncode {
    /// Encode this value to the buffer at the current position.
    ///
    /// The `position` parameter tracks the current byte offset from the start
    /// of the stub data. Implementations advance it by exactly the number of
    /// bytes written and never insert padding.
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()>;

    /// Encoded size in bytes
    fn ndr_size(&self) -> usize;
}
