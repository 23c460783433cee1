//! Typed remote operations
//!
//! An interface crate describes each remote procedure as a request type
//! implementing [`RpcRequest`] and a response type implementing
//! [`RpcResponse`]. The request owns its opnum and marshal logic; the
//! response owns its unmarshal logic. Unmarshal builds a complete value
//! from the stub rather than filling in a half-initialized one.

use bytes::{Buf, BufMut, Bytes};
use midl_ndr::{NdrContext, NdrReader, NdrWriter, Result};

/// Request half of a remote operation
pub trait RpcRequest {
    /// Operation number within the interface
    const OPNUM: u16;

    /// Response type paired with this request
    type Response: RpcResponse;

    /// Write the `[in]` parameters in declaration order
    fn marshal<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> Result<()>;

    fn opnum(&self) -> u16 {
        Self::OPNUM
    }

    /// Fresh, default-valued response of the matching shape
    fn response_object(&self) -> Self::Response {
        Self::Response::default()
    }

    /// Marshal into a standalone little-endian stub
    fn to_stub(&self) -> Result<Bytes> {
        let mut writer = NdrWriter::new();
        self.marshal(&mut writer)?;
        Ok(writer.freeze())
    }
}

/// Response half of a remote operation
pub trait RpcResponse: Default + Sized {
    /// Read the `[out]` parameters in the order the server writes them
    fn unmarshal<B: Buf>(reader: &mut NdrReader<B>) -> Result<Self>;

    /// The operation's 32-bit return status (0 on success)
    fn return_value(&self) -> u32;

    /// Decode a complete little-endian stub, rejecting trailing bytes
    fn from_stub(stub: &[u8]) -> Result<Self> {
        Self::from_stub_with_context(stub, NdrContext::new())
    }

    /// Decode a complete stub in the given byte order, rejecting trailing bytes
    fn from_stub_with_context(stub: &[u8], ctx: NdrContext) -> Result<Self> {
        let mut reader = NdrReader::with_context(stub, ctx);
        let response = Self::unmarshal(&mut reader)?;
        reader.finish()?;
        Ok(response)
    }
}
