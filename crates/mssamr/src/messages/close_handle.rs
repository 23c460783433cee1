//! SamrCloseHandle (opnum 1)

use super::opnum;
use crate::handle::ContextHandle;
use bytes::{Buf, BufMut};
use dcerpc::{RpcRequest, RpcResponse};
use midl_ndr::{NdrReader, NdrWriter, Result};

/// Release any SAMR handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamrCloseHandleRequest {
    pub handle: ContextHandle,
}

impl SamrCloseHandleRequest {
    /// Encoded request size
    pub const SIZE: usize = ContextHandle::SIZE;

    pub fn new(handle: impl Into<ContextHandle>) -> Self {
        Self {
            handle: handle.into(),
        }
    }
}

impl RpcRequest for SamrCloseHandleRequest {
    const OPNUM: u16 = opnum::CLOSE_HANDLE;
    type Response = SamrCloseHandleResponse;

    fn marshal<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> Result<()> {
        self.handle.encode(writer)
    }
}

/// Closed handle (zeroed by the server on success) and status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamrCloseHandleResponse {
    pub handle: ContextHandle,
    pub return_value: u32,
}

impl SamrCloseHandleResponse {
    /// Encoded response size
    pub const SIZE: usize = ContextHandle::SIZE + 4;
}

impl RpcResponse for SamrCloseHandleResponse {
    fn unmarshal<B: Buf>(reader: &mut NdrReader<B>) -> Result<Self> {
        Ok(Self {
            handle: ContextHandle::decode(reader)?,
            return_value: reader.read_u32()?,
        })
    }

    fn return_value(&self) -> u32 {
        self.return_value
    }
}
