//! SAMR request and response messages
//!
//! One request/response pair per remote operation, each implementing the
//! [`RpcRequest`]/[`RpcResponse`] traits. [`SamrRequest`] and
//! [`SamrResponse`] close the family into tagged enums so a caller can
//! hold "any SAMR call" and still decode its reply with the right layout.

mod close_handle;
mod delete_user;
mod group_membership;
mod query_information_user;

pub use close_handle::{SamrCloseHandleRequest, SamrCloseHandleResponse};
pub use delete_user::{SamrDeleteUserRequest, SamrDeleteUserResponse};
pub use group_membership::{attributes, SamrAddMemberToGroupRequest, SamrRemoveMemberFromGroupRequest};
pub use query_information_user::{SamrQueryInformationUserRequest, SamrQueryInformationUserResponse};

use crate::error::{check_status, Result};
use bytes::{Buf, BufMut, Bytes};
use dcerpc::{RpcRequest, RpcResponse, SyntaxId, Uuid};
use midl_ndr::{NdrContext, NdrReader, NdrWriter};

/// SAMR interface UUID: 12345778-1234-abcd-ef00-0123456789ac
pub const SAMR_INTERFACE_UUID: Uuid = Uuid {
    time_low: 0x1234_5778,
    time_mid: 0x1234,
    time_hi_and_version: 0xabcd,
    clock_seq_hi_and_reserved: 0xef,
    clock_seq_low: 0x00,
    node: [0x01, 0x23, 0x45, 0x67, 0x89, 0xac],
};

/// SAMR interface version (major, minor)
pub const SAMR_VERSION: (u16, u16) = (1, 0);

/// Abstract syntax to present when binding to SAMR
pub const SAMR_SYNTAX: SyntaxId = SyntaxId {
    uuid: SAMR_INTERFACE_UUID,
    version: SAMR_VERSION.0 as u32 | ((SAMR_VERSION.1 as u32) << 16),
};

/// SAMR operation numbers
pub mod opnum {
    pub const CLOSE_HANDLE: u16 = 1;
    pub const ADD_MEMBER_TO_GROUP: u16 = 22;
    pub const REMOVE_MEMBER_FROM_GROUP: u16 = 24;
    pub const DELETE_USER: u16 = 35;
    pub const QUERY_INFORMATION_USER: u16 = 36;
}

/// Response of operations whose only `[out]` value is the NTSTATUS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusResponse {
    pub return_value: u32,
}

impl StatusResponse {
    /// Encoded response size
    pub const SIZE: usize = 4;
}

impl RpcResponse for StatusResponse {
    fn unmarshal<B: Buf>(reader: &mut NdrReader<B>) -> midl_ndr::Result<Self> {
        Ok(Self {
            return_value: reader.read_u32()?,
        })
    }

    fn return_value(&self) -> u32 {
        self.return_value
    }
}

/// Any supported SAMR request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamrRequest {
    CloseHandle(SamrCloseHandleRequest),
    AddMemberToGroup(SamrAddMemberToGroupRequest),
    RemoveMemberFromGroup(SamrRemoveMemberFromGroupRequest),
    DeleteUser(SamrDeleteUserRequest),
    QueryInformationUser(SamrQueryInformationUserRequest),
}

/// Response matching a [`SamrRequest`] variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamrResponse {
    CloseHandle(SamrCloseHandleResponse),
    AddMemberToGroup(StatusResponse),
    RemoveMemberFromGroup(StatusResponse),
    DeleteUser(SamrDeleteUserResponse),
    QueryInformationUser(SamrQueryInformationUserResponse),
}

impl SamrRequest {
    pub fn opnum(&self) -> u16 {
        match self {
            SamrRequest::CloseHandle(r) => r.opnum(),
            SamrRequest::AddMemberToGroup(r) => r.opnum(),
            SamrRequest::RemoveMemberFromGroup(r) => r.opnum(),
            SamrRequest::DeleteUser(r) => r.opnum(),
            SamrRequest::QueryInformationUser(r) => r.opnum(),
        }
    }

    /// MS-SAMR name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            SamrRequest::CloseHandle(_) => "SamrCloseHandle",
            SamrRequest::AddMemberToGroup(_) => "SamrAddMemberToGroup",
            SamrRequest::RemoveMemberFromGroup(_) => "SamrRemoveMemberFromGroup",
            SamrRequest::DeleteUser(_) => "SamrDeleteUser",
            SamrRequest::QueryInformationUser(_) => "SamrQueryInformationUser",
        }
    }

    pub fn marshal<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> midl_ndr::Result<()> {
        match self {
            SamrRequest::CloseHandle(r) => r.marshal(writer),
            SamrRequest::AddMemberToGroup(r) => r.marshal(writer),
            SamrRequest::RemoveMemberFromGroup(r) => r.marshal(writer),
            SamrRequest::DeleteUser(r) => r.marshal(writer),
            SamrRequest::QueryInformationUser(r) => r.marshal(writer),
        }
    }

    pub fn to_stub(&self) -> midl_ndr::Result<Bytes> {
        let mut writer = NdrWriter::new();
        self.marshal(&mut writer)?;
        Ok(writer.freeze())
    }

    /// Fresh, default-valued response of the matching variant
    pub fn response_object(&self) -> SamrResponse {
        match self {
            SamrRequest::CloseHandle(r) => SamrResponse::CloseHandle(r.response_object()),
            SamrRequest::AddMemberToGroup(r) => SamrResponse::AddMemberToGroup(r.response_object()),
            SamrRequest::RemoveMemberFromGroup(r) => {
                SamrResponse::RemoveMemberFromGroup(r.response_object())
            }
            SamrRequest::DeleteUser(r) => SamrResponse::DeleteUser(r.response_object()),
            SamrRequest::QueryInformationUser(r) => {
                SamrResponse::QueryInformationUser(r.response_object())
            }
        }
    }

    /// Decode a little-endian response stub with this request's layout
    pub fn decode_response(&self, stub: &[u8]) -> midl_ndr::Result<SamrResponse> {
        self.decode_response_with_context(stub, NdrContext::new())
    }

    pub fn decode_response_with_context(&self, stub: &[u8], ctx: NdrContext) -> midl_ndr::Result<SamrResponse> {
        Ok(match self {
            SamrRequest::CloseHandle(_) => {
                SamrResponse::CloseHandle(SamrCloseHandleResponse::from_stub_with_context(stub, ctx)?)
            }
            SamrRequest::AddMemberToGroup(_) => {
                SamrResponse::AddMemberToGroup(StatusResponse::from_stub_with_context(stub, ctx)?)
            }
            SamrRequest::RemoveMemberFromGroup(_) => {
                SamrResponse::RemoveMemberFromGroup(StatusResponse::from_stub_with_context(stub, ctx)?)
            }
            SamrRequest::DeleteUser(_) => {
                SamrResponse::DeleteUser(SamrDeleteUserResponse::from_stub_with_context(stub, ctx)?)
            }
            SamrRequest::QueryInformationUser(_) => SamrResponse::QueryInformationUser(
                SamrQueryInformationUserResponse::from_stub_with_context(stub, ctx)?,
            ),
        })
    }
}

impl SamrResponse {
    /// The NTSTATUS returned by the server
    pub fn return_value(&self) -> u32 {
        match self {
            SamrResponse::CloseHandle(r) => r.return_value(),
            SamrResponse::AddMemberToGroup(r) => r.return_value(),
            SamrResponse::RemoveMemberFromGroup(r) => r.return_value(),
            SamrResponse::DeleteUser(r) => r.return_value(),
            SamrResponse::QueryInformationUser(r) => r.return_value(),
        }
    }

    /// Opnum of the operation this response belongs to
    pub fn opnum(&self) -> u16 {
        match self {
            SamrResponse::CloseHandle(_) => opnum::CLOSE_HANDLE,
            SamrResponse::AddMemberToGroup(_) => opnum::ADD_MEMBER_TO_GROUP,
            SamrResponse::RemoveMemberFromGroup(_) => opnum::REMOVE_MEMBER_FROM_GROUP,
            SamrResponse::DeleteUser(_) => opnum::DELETE_USER,
            SamrResponse::QueryInformationUser(_) => opnum::QUERY_INFORMATION_USER,
        }
    }

    /// MS-SAMR name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            SamrResponse::CloseHandle(_) => "SamrCloseHandle",
            SamrResponse::AddMemberToGroup(_) => "SamrAddMemberToGroup",
            SamrResponse::RemoveMemberFromGroup(_) => "SamrRemoveMemberFromGroup",
            SamrResponse::DeleteUser(_) => "SamrDeleteUser",
            SamrResponse::QueryInformationUser(_) => "SamrQueryInformationUser",
        }
    }

    /// Pass the response through if its NTSTATUS is success
    pub fn check(self) -> Result<Self> {
        check_status(self.name(), self.return_value())?;
        Ok(self)
    }
}

macro_rules! impl_from_request {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for SamrRequest {
                fn from(request: $ty) -> Self {
                    SamrRequest::$variant(request)
                }
            }
        )*
    };
}

impl_from_request! {
    CloseHandle(SamrCloseHandleRequest),
    AddMemberToGroup(SamrAddMemberToGroupRequest),
    RemoveMemberFromGroup(SamrRemoveMemberFromGroupRequest),
    DeleteUser(SamrDeleteUserRequest),
    QueryInformationUser(SamrQueryInformationUserRequest),
}
