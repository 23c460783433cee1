//! SamrDeleteUser (opnum 35)

use super::opnum;
use crate::handle::{ContextHandle, UserHandle};
use bytes::{Buf, BufMut};
use dcerpc::{RpcRequest, RpcResponse};
use midl_ndr::{NdrReader, NdrWriter, Result};

/// Delete the account behind an open user handle
///
/// On success the server also invalidates the handle, so it must not be
/// closed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamrDeleteUserRequest {
    pub user_handle: UserHandle,
}

impl SamrDeleteUserRequest {
    /// Encoded request size
    pub const SIZE: usize = ContextHandle::SIZE;

    pub fn new(user_handle: UserHandle) -> Self {
        Self { user_handle }
    }
}

impl RpcRequest for SamrDeleteUserRequest {
    const OPNUM: u16 = opnum::DELETE_USER;
    type Response = SamrDeleteUserResponse;

    fn marshal<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> Result<()> {
        self.user_handle.context_handle().encode(writer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamrDeleteUserResponse {
    pub user_handle: UserHandle,
    pub return_value: u32,
}

impl SamrDeleteUserResponse {
    /// Encoded response size
    pub const SIZE: usize = ContextHandle::SIZE + 4;
}

impl RpcResponse for SamrDeleteUserResponse {
    fn unmarshal<B: Buf>(reader: &mut NdrReader<B>) -> Result<Self> {
        Ok(Self {
            user_handle: UserHandle::new(ContextHandle::decode(reader)?),
            return_value: reader.read_u32()?,
        })
    }

    fn return_value(&self) -> u32 {
        self.return_value
    }
}
