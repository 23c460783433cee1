//! SAMR client
//!
//! Thin typed layer over [`DceRpcClient`]. Each method marshals one SAMR
//! request, performs the call and returns the decoded response. A non-zero
//! NTSTATUS is data, not an error: inspect `return_value` or call
//! [`SamrResponse::check`]. RPC faults and decoding failures are errors.

use crate::error::Result;
use crate::handle::{ContextHandle, GroupHandle, UserHandle};
use crate::info_class::UserInformationClass;
use crate::messages::*;
use dcerpc::{
    DataRepresentation, DceRpcClient, DceRpcClientBuilder, DceRpcTransport, RpcRequest, RpcTransport,
    DEFAULT_MAX_PDU_SIZE,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

/// Client for the SAMR interface on an already bound connection
pub struct SamrClient<T> {
    client: DceRpcClient<T>,
}

impl<T: RpcTransport> SamrClient<T> {
    /// Wrap a DCE RPC client whose presentation context is SAMR
    pub fn new(client: DceRpcClient<T>) -> Self {
        Self { client }
    }

    pub fn rpc_client(&self) -> &DceRpcClient<T> {
        &self.client
    }

    /// Close any SAMR handle
    pub async fn close_handle(&self, handle: impl Into<ContextHandle>) -> Result<SamrCloseHandleResponse> {
        let request = SamrCloseHandleRequest::new(handle);
        debug!("SamrCloseHandle: handle={}", request.handle);
        self.invoke("SamrCloseHandle", &request).await
    }

    /// Add account `member_id` to a group with the given SE_GROUP_* attributes
    pub async fn add_member_to_group(
        &self,
        group_handle: &GroupHandle,
        member_id: u32,
        attributes: u32,
    ) -> Result<StatusResponse> {
        debug!(
            "SamrAddMemberToGroup: member_id={}, attributes=0x{:08x}",
            member_id, attributes
        );
        let request = SamrAddMemberToGroupRequest::new(*group_handle, member_id, attributes);
        self.invoke("SamrAddMemberToGroup", &request).await
    }

    /// Remove account `member_id` from a group
    pub async fn remove_member_from_group(&self, group_handle: &GroupHandle, member_id: u32) -> Result<StatusResponse> {
        debug!("SamrRemoveMemberFromGroup: member_id={}", member_id);
        let request = SamrRemoveMemberFromGroupRequest::new(*group_handle, member_id);
        self.invoke("SamrRemoveMemberFromGroup", &request).await
    }

    /// Delete the account behind `user_handle`
    pub async fn delete_user(&self, user_handle: UserHandle) -> Result<SamrDeleteUserResponse> {
        debug!("SamrDeleteUser: handle={}", user_handle);
        self.invoke("SamrDeleteUser", &SamrDeleteUserRequest::new(user_handle)).await
    }

    /// Read one information class of a user account
    pub async fn query_information_user(
        &self,
        user_handle: &UserHandle,
        information_class: UserInformationClass,
    ) -> Result<SamrQueryInformationUserResponse> {
        debug!("SamrQueryInformationUser: class={}", information_class);
        let request = SamrQueryInformationUserRequest::new(*user_handle, information_class);
        self.invoke("SamrQueryInformationUser", &request).await
    }

    /// Perform any supported request and decode the matching response
    pub async fn execute(&self, request: impl Into<SamrRequest>) -> Result<SamrResponse> {
        let request = request.into();
        let stub = request.to_stub()?;
        let pdu = self.client.call_pdu(request.opnum(), stub).await?;
        let ctx = pdu.header.data_rep.ndr_context();
        let response = request.decode_response_with_context(&pdu.stub_data, ctx)?;
        log_status(request.name(), response.return_value());
        Ok(response)
    }

    async fn invoke<R: RpcRequest>(&self, name: &'static str, request: &R) -> Result<R::Response> {
        use dcerpc::RpcResponse;

        let response = self.client.invoke(request).await?;
        log_status(name, response.return_value());
        Ok(response)
    }
}

fn log_status(name: &str, status: u32) {
    if status != 0 {
        warn!("{} returned NTSTATUS 0x{:08x}", name, status);
    }
}

/// Builder for SAMR clients over a byte stream
#[derive(Debug, Clone)]
pub struct SamrClientBuilder {
    rpc: DceRpcClientBuilder,
    max_pdu_size: usize,
}

impl Default for SamrClientBuilder {
    fn default() -> Self {
        Self {
            rpc: DceRpcClientBuilder::new(),
            max_pdu_size: DEFAULT_MAX_PDU_SIZE,
        }
    }
}

impl SamrClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presentation context id under which SAMR was bound
    pub fn context_id(mut self, context_id: u16) -> Self {
        self.rpc = self.rpc.context_id(context_id);
        self
    }

    /// Largest request fragment the server accepts
    pub fn max_xmit_frag(mut self, size: u16) -> Self {
        self.rpc = self.rpc.max_xmit_frag(size);
        self
    }

    /// Largest response PDU accepted from the server
    pub fn max_pdu_size(mut self, size: usize) -> Self {
        self.max_pdu_size = size;
        self
    }

    pub fn data_representation(mut self, data_rep: DataRepresentation) -> Self {
        self.rpc = self.rpc.data_representation(data_rep);
        self
    }

    /// Build over a stream that has already been bound to SAMR
    pub fn build<S>(self, stream: S) -> SamrClient<DceRpcTransport<S>>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send,
    {
        let transport = DceRpcTransport::new(stream).with_max_pdu_size(self.max_pdu_size);
        self.build_with_transport(transport)
    }

    /// Build over any transport; `max_pdu_size` is left to the transport
    pub fn build_with_transport<T: RpcTransport>(self, transport: T) -> SamrClient<T> {
        SamrClient::new(self.rpc.build(transport))
    }
}
