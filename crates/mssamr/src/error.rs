//! SAMR error types

use dcerpc::RpcError;
use midl_ndr::NdrError;
use thiserror::Error;

/// Result type for SAMR operations
pub type Result<T> = std::result::Result<T, SamrError>;

/// SAMR-specific errors
#[derive(Error, Debug)]
pub enum SamrError {
    /// Underlying DCE RPC error (transport, fault PDU)
    #[error("DCE RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Stub data could not be marshalled or unmarshalled
    #[error("NDR error: {0}")]
    Ndr(#[from] NdrError),

    /// The call completed but returned a non-zero NTSTATUS
    #[error("{operation} failed: NTSTATUS 0x{status:08x}")]
    Status { operation: &'static str, status: u32 },
}

impl SamrError {
    /// Returned NTSTATUS, if the call itself completed
    pub fn status(&self) -> Option<u32> {
        match self {
            SamrError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// NTSTATUS codes commonly returned by SAMR
pub mod ntstatus {
    /// Operation successful
    pub const STATUS_SUCCESS: u32 = 0x0000_0000;
    /// Unknown information class
    pub const STATUS_INVALID_INFO_CLASS: u32 = 0xC000_0003;
    /// Handle is not valid or has been closed
    pub const STATUS_INVALID_HANDLE: u32 = 0xC000_0008;
    /// Access denied
    pub const STATUS_ACCESS_DENIED: u32 = 0xC000_0022;
    /// No user with the given RID
    pub const STATUS_NO_SUCH_USER: u32 = 0xC000_0064;
    /// No group with the given RID
    pub const STATUS_NO_SUCH_GROUP: u32 = 0xC000_0066;
    /// Member is already in the group
    pub const STATUS_MEMBER_IN_GROUP: u32 = 0xC000_0067;
    /// Member is not in the group
    pub const STATUS_MEMBER_NOT_IN_GROUP: u32 = 0xC000_0068;
}

/// Fail with [`SamrError::Status`] unless `status` is success
pub(crate) fn check_status(operation: &'static str, status: u32) -> Result<()> {
    if status == ntstatus::STATUS_SUCCESS {
        Ok(())
    } else {
        Err(SamrError::Status { operation, status })
    }
}
