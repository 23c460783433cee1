//! SamrAddMemberToGroup (opnum 22) and SamrRemoveMemberFromGroup (opnum 24)

use super::{opnum, StatusResponse};
use crate::handle::{ContextHandle, GroupHandle};
use bytes::BufMut;
use dcerpc::RpcRequest;
use midl_ndr::{NdrWriter, Result};

/// Attribute bits for a group membership (SE_GROUP_*)
pub mod attributes {
    pub const SE_GROUP_MANDATORY: u32 = 0x0000_0001;
    pub const SE_GROUP_ENABLED_BY_DEFAULT: u32 = 0x0000_0002;
    pub const SE_GROUP_ENABLED: u32 = 0x0000_0004;

    /// What Windows assigns to ordinary memberships
    pub const DEFAULT: u32 = SE_GROUP_MANDATORY | SE_GROUP_ENABLED_BY_DEFAULT | SE_GROUP_ENABLED;
}

/// Add the account with relative id `member_id` to a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamrAddMemberToGroupRequest {
    pub group_handle: GroupHandle,
    pub member_id: u32,
    pub attributes: u32,
}

impl SamrAddMemberToGroupRequest {
    /// Encoded request size
    pub const SIZE: usize = ContextHandle::SIZE + 4 + 4;

    pub fn new(group_handle: GroupHandle, member_id: u32, attributes: u32) -> Self {
        Self {
            group_handle,
            member_id,
            attributes,
        }
    }
}

impl RpcRequest for SamrAddMemberToGroupRequest {
    const OPNUM: u16 = opnum::ADD_MEMBER_TO_GROUP;
    type Response = StatusResponse;

    fn marshal<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> Result<()> {
        self.group_handle.context_handle().encode(writer)?;
        writer.write_u32(self.member_id)?;
        writer.write_u32(self.attributes)
    }
}

/// Remove the account with relative id `member_id` from a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamrRemoveMemberFromGroupRequest {
    pub group_handle: GroupHandle,
    pub member_id: u32,
}

impl SamrRemoveMemberFromGroupRequest {
    /// Encoded request size
    pub const SIZE: usize = ContextHandle::SIZE + 4;

    pub fn new(group_handle: GroupHandle, member_id: u32) -> Self {
        Self {
            group_handle,
            member_id,
        }
    }
}

impl RpcRequest for SamrRemoveMemberFromGroupRequest {
    const OPNUM: u16 = opnum::REMOVE_MEMBER_FROM_GROUP;
    type Response = StatusResponse;

    fn marshal<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> Result<()> {
        self.group_handle.context_handle().encode(writer)?;
        writer.write_u32(self.member_id)
    }
}
