//! DCE RPC Client
//!
//! Issues calls over an already bound [`RpcTransport`]. Each call is a
//! single request fragment answered by a single response or fault fragment;
//! the transport lock is held from send to receive so that concurrent
//! callers never see each other's replies.

use crate::dcerpc::{DataRepresentation, Pdu, RequestPdu, ResponsePdu};
use crate::dcerpc_transport::RpcTransport;
use crate::error::{Result, RpcError};
use crate::operation::{RpcRequest, RpcResponse};
use bytes::Bytes;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

/// Default maximum transmit fragment size
pub const DEFAULT_MAX_XMIT_FRAG: u16 = 4280;

/// Client call settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcClientConfig {
    /// Presentation context negotiated at bind time
    pub context_id: u16,
    /// Largest request PDU the server accepts
    pub max_xmit_frag: u16,
    /// Byte order and formats for outgoing PDUs
    pub data_rep: DataRepresentation,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            context_id: 0,
            max_xmit_frag: DEFAULT_MAX_XMIT_FRAG,
            data_rep: DataRepresentation::ndr(),
        }
    }
}

/// DCE RPC Client for making calls to a DCE RPC server
pub struct DceRpcClient<T> {
    transport: Mutex<T>,
    call_id_counter: AtomicU32,
    config: RpcClientConfig,
}

impl<T: RpcTransport> DceRpcClient<T> {
    /// Create a client with default settings over a bound transport
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, RpcClientConfig::default())
    }

    pub fn with_config(transport: T, config: RpcClientConfig) -> Self {
        Self {
            transport: Mutex::new(transport),
            call_id_counter: AtomicU32::new(1),
            config,
        }
    }

    pub fn config(&self) -> &RpcClientConfig {
        &self.config
    }

    /// Make an RPC call
    ///
    /// # Arguments
    /// * `opnum` - The operation number to call
    /// * `stub_data` - The marshalled arguments (in NDR format)
    ///
    /// # Returns
    /// The stub data from the response (in NDR format)
    pub async fn call(&self, opnum: u16, stub_data: Bytes) -> Result<Bytes> {
        Ok(self.call_pdu(opnum, stub_data).await?.stub_data)
    }

    /// Marshal a typed request, call it, and unmarshal the typed response
    pub async fn invoke<R: RpcRequest>(&self, request: &R) -> Result<R::Response> {
        let stub = request.to_stub()?;
        let response = self.call_pdu(R::OPNUM, stub).await?;
        let ctx = response.header.data_rep.ndr_context();
        Ok(R::Response::from_stub_with_context(&response.stub_data, ctx)?)
    }

    /// Make an RPC call and return the whole response PDU
    ///
    /// Callers that decode the stub themselves need the response header's
    /// data representation to pick the byte order.
    pub async fn call_pdu(&self, opnum: u16, stub_data: Bytes) -> Result<ResponsePdu> {
        let call_id = self.call_id_counter.fetch_add(1, Ordering::SeqCst);

        let mut request = RequestPdu::new(call_id, opnum, stub_data);
        request.context_id = self.config.context_id;
        request.header.data_rep = self.config.data_rep;
        let encoded = request.encode()?;

        // Fragmentation belongs to the transport layer
        if encoded.len() > self.config.max_xmit_frag as usize {
            return Err(RpcError::PduTooLarge {
                size: encoded.len(),
                max: self.config.max_xmit_frag as usize,
            });
        }

        debug!(
            "Sending request: call_id={}, opnum={}, stub_len={}",
            call_id,
            opnum,
            request.stub_data.len()
        );

        let mut transport = self.transport.lock().await;
        transport.send_pdu(encoded).await?;
        let reply = transport.recv_pdu().await?;
        drop(transport);

        match Pdu::decode(&reply)? {
            Pdu::Response(response) => {
                if response.header.call_id != call_id {
                    return Err(RpcError::CallIdMismatch {
                        expected: call_id,
                        got: response.header.call_id,
                    });
                }
                let flags = response.header.packet_flags;
                if !(flags.is_first_frag() && flags.is_last_frag()) {
                    return Err(RpcError::InvalidPduData(
                        "fragmented response not supported".to_string(),
                    ));
                }
                trace!("Call succeeded: {} bytes result", response.stub_data.len());
                Ok(response)
            }
            Pdu::Fault(fault) => {
                if fault.header.call_id != call_id {
                    return Err(RpcError::CallIdMismatch {
                        expected: call_id,
                        got: fault.header.call_id,
                    });
                }
                let code = fault.fault_code();
                warn!(
                    "Call faulted: call_id={}, opnum={}, status=0x{:08x} ({}), did_not_execute={}",
                    call_id,
                    opnum,
                    fault.status,
                    code,
                    fault.header.packet_flags.did_not_execute()
                );
                Err(RpcError::Fault {
                    status: fault.status,
                    code,
                })
            }
            Pdu::Request(_) => Err(RpcError::InvalidMessageType(0)),
        }
    }
}

/// Builder for DCE RPC clients
#[derive(Debug, Clone, Default)]
pub struct DceRpcClientBuilder {
    config: RpcClientConfig,
}

impl DceRpcClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presentation context id accepted in the bind ack
    pub fn context_id(mut self, context_id: u16) -> Self {
        self.config.context_id = context_id;
        self
    }

    /// Maximum transmit fragment size from the bind ack
    pub fn max_xmit_frag(mut self, size: u16) -> Self {
        self.config.max_xmit_frag = size;
        self
    }

    pub fn data_representation(mut self, data_rep: DataRepresentation) -> Self {
        self.config.data_rep = data_rep;
        self
    }

    pub fn build<T: RpcTransport>(self, transport: T) -> DceRpcClient<T> {
        DceRpcClient::with_config(transport, self.config)
    }
}
