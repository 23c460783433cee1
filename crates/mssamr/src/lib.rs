//! MS-SAMR (Security Account Manager Remote) messages
//!
//! Typed request/response messages for a subset of the SAMR interface,
//! marshalled with `midl-ndr` and carried by `dcerpc`. The subset covers
//! handle cleanup, group membership, user deletion and user queries:
//!
//! | Operation | Opnum |
//! |---|---|
//! | `SamrCloseHandle` | 1 |
//! | `SamrAddMemberToGroup` | 22 |
//! | `SamrRemoveMemberFromGroup` | 24 |
//! | `SamrDeleteUser` | 35 |
//! | `SamrQueryInformationUser` | 36 |
//!
//! # Example
//!
//! ```
//! use dcerpc::RpcRequest;
//! use mssamr::{SamrQueryInformationUserRequest, UserHandle};
//!
//! let mut bytes = [0u8; 20];
//! for (i, b) in bytes.iter_mut().enumerate() {
//!     *b = i as u8 + 1;
//! }
//! let request = SamrQueryInformationUserRequest::user_all_information(UserHandle::from_bytes(bytes));
//! let stub = request.to_stub().unwrap();
//! assert_eq!(&stub[20..], &[0x15, 0x00]);
//! ```

pub mod client;
pub mod error;
pub mod handle;
pub mod info_class;
pub mod messages;

pub use client::{SamrClient, SamrClientBuilder};
pub use error::{ntstatus, Result, SamrError};
pub use handle::{AliasHandle, ContextHandle, DomainHandle, GroupHandle, ServerHandle, UserHandle};
pub use info_class::UserInformationClass;
pub use messages::{
    attributes, opnum, SamrAddMemberToGroupRequest, SamrCloseHandleRequest, SamrCloseHandleResponse,
    SamrDeleteUserRequest, SamrDeleteUserResponse, SamrQueryInformationUserRequest,
    SamrQueryInformationUserResponse, SamrRemoveMemberFromGroupRequest, SamrRequest, SamrResponse,
    StatusResponse, SAMR_INTERFACE_UUID, SAMR_SYNTAX, SAMR_VERSION,
};
