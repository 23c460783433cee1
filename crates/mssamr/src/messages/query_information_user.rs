//! SamrQueryInformationUser (opnum 36)

use super::opnum;
use crate::handle::{ContextHandle, UserHandle};
use crate::info_class::UserInformationClass;
use bytes::{Buf, BufMut, Bytes};
use dcerpc::{RpcRequest, RpcResponse};
use midl_ndr::{NdrError, NdrReader, NdrWriter, Result};

/// Read one information class of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamrQueryInformationUserRequest {
    pub user_handle: UserHandle,
    pub information_class: UserInformationClass,
}

impl SamrQueryInformationUserRequest {
    /// Encoded request size
    pub const SIZE: usize = ContextHandle::SIZE + 2;

    pub fn new(user_handle: UserHandle, information_class: UserInformationClass) -> Self {
        Self {
            user_handle,
            information_class,
        }
    }

    /// Query `UserAllInformation` (21)
    pub fn user_all_information(user_handle: UserHandle) -> Self {
        Self::new(user_handle, UserInformationClass::UserAllInformation)
    }

    /// Query `UserGeneralInformation` (1)
    pub fn user_general_information(user_handle: UserHandle) -> Self {
        Self::new(user_handle, UserInformationClass::UserGeneralInformation)
    }

    /// Query `UserControlInformation` (16), the account control bits
    pub fn user_control_information(user_handle: UserHandle) -> Self {
        Self::new(user_handle, UserInformationClass::UserControlInformation)
    }
}

impl RpcRequest for SamrQueryInformationUserRequest {
    const OPNUM: u16 = opnum::QUERY_INFORMATION_USER;
    type Response = SamrQueryInformationUserResponse;

    fn marshal<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> Result<()> {
        self.user_handle.context_handle().encode(writer)?;
        writer.write_u16(self.information_class.value())
    }
}

/// Information buffer and status
///
/// `buffer` holds the marshalled `PSAMPR_USER_INFO_BUFFER` (referent id,
/// union discriminant and arm) exactly as received. Every byte before the
/// trailing 32-bit status belongs to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SamrQueryInformationUserResponse {
    pub buffer: Bytes,
    pub return_value: u32,
}

impl SamrQueryInformationUserResponse {
    /// Whether the server returned a NULL buffer pointer
    pub fn is_null_buffer(&self) -> bool {
        self.buffer.len() < 4 || self.buffer[..4] == [0, 0, 0, 0]
    }
}

impl RpcResponse for SamrQueryInformationUserResponse {
    fn unmarshal<B: Buf>(reader: &mut NdrReader<B>) -> Result<Self> {
        let remaining = reader.remaining();
        if remaining < 4 {
            return Err(NdrError::BufferUnderflow {
                needed: 4,
                have: remaining,
            });
        }
        Ok(Self {
            buffer: reader.read_bytes(remaining - 4)?,
            return_value: reader.read_u32()?,
        })
    }

    fn return_value(&self) -> u32 {
        self.return_value
    }
}
