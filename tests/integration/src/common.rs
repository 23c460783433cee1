//! Common test utilities
//!
//! Logging setup, fixtures and an in-memory SAM peer that answers SAMR
//! requests over a `tokio::io::duplex` pipe.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Once;

use bytes::{BufMut, Bytes, BytesMut};
use dcerpc::{DceRpcTransport, FaultCode, FaultPdu, Pdu, RequestPdu, ResponsePdu, RpcError, RpcTransport};
use midl_ndr::{NdrError, NdrReader};
use mssamr::{ntstatus, opnum, ContextHandle, SamrClient, SamrClientBuilder, UserInformationClass};
use tokio::io::DuplexStream;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize test logging (honours `RUST_LOG`)
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_test_writer()
            .try_init();
    });
}

/// Handle bytes 0x01..=0x14
pub fn sequential_handle() -> [u8; 20] {
    let mut bytes = [0u8; 20];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = i as u8 + 1;
    }
    bytes
}

/// Handle filled with a single byte
pub fn filled_handle(byte: u8) -> [u8; 20] {
    [byte; 20]
}

pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Referent id used for the top-level `[out]` pointer
pub const REFERENT_ID: u32 = 0x0002_0000;

/// Objects known to the in-memory SAM
#[derive(Debug, Default)]
pub struct SamState {
    /// Open user handles and the RID behind each
    pub users: HashMap<[u8; 20], u32>,
    /// Open group handles and their member RIDs
    pub groups: HashMap<[u8; 20], HashSet<u32>>,
    /// Opnums in the order they were received
    pub calls: Vec<u16>,
}

impl SamState {
    pub fn with_user(mut self, handle: [u8; 20], rid: u32) -> Self {
        self.users.insert(handle, rid);
        self
    }

    pub fn with_group(mut self, handle: [u8; 20], members: &[u32]) -> Self {
        self.groups.insert(handle, members.iter().copied().collect());
        self
    }

    /// Produce the reply PDU for one request
    fn answer(&mut self, request: &RequestPdu) -> Bytes {
        let call_id = request.header.call_id;
        self.calls.push(request.opnum);

        let stub = match self.dispatch(request.opnum, &request.stub_data) {
            Ok(stub) => stub,
            Err(code) => {
                debug!("Faulting opnum {} with {}", request.opnum, code);
                return encode(FaultPdu::new(call_id, code.value()).encode());
            }
        };
        encode(ResponsePdu::new(call_id, stub).encode())
    }

    fn dispatch(&mut self, op: u16, stub: &[u8]) -> Result<Bytes, FaultCode> {
        let mut reader = NdrReader::new(stub);
        let mut out = BytesMut::new();
        let ndr = |_: NdrError| FaultCode::NcaSFaultNdr;

        match op {
            opnum::CLOSE_HANDLE => {
                let handle = ContextHandle::decode(&mut reader).map_err(ndr)?;
                reader.finish().map_err(ndr)?;
                let key = handle.to_bytes();
                let known = self.users.remove(&key).is_some() || self.groups.remove(&key).is_some();
                if known {
                    out.put_slice(ContextHandle::NIL.as_bytes());
                    out.put_u32_le(ntstatus::STATUS_SUCCESS);
                } else {
                    out.put_slice(handle.as_bytes());
                    out.put_u32_le(ntstatus::STATUS_INVALID_HANDLE);
                }
            }
            opnum::ADD_MEMBER_TO_GROUP => {
                let handle = ContextHandle::decode(&mut reader).map_err(ndr)?;
                let member_id = reader.read_u32().map_err(ndr)?;
                let _attributes = reader.read_u32().map_err(ndr)?;
                reader.finish().map_err(ndr)?;
                let status = match self.groups.get_mut(&handle.to_bytes()) {
                    None => ntstatus::STATUS_INVALID_HANDLE,
                    Some(members) => {
                        if members.insert(member_id) {
                            ntstatus::STATUS_SUCCESS
                        } else {
                            ntstatus::STATUS_MEMBER_IN_GROUP
                        }
                    }
                };
                out.put_u32_le(status);
            }
            opnum::REMOVE_MEMBER_FROM_GROUP => {
                let handle = ContextHandle::decode(&mut reader).map_err(ndr)?;
                let member_id = reader.read_u32().map_err(ndr)?;
                reader.finish().map_err(ndr)?;
                let status = match self.groups.get_mut(&handle.to_bytes()) {
                    None => ntstatus::STATUS_INVALID_HANDLE,
                    Some(members) => {
                        if members.remove(&member_id) {
                            ntstatus::STATUS_SUCCESS
                        } else {
                            ntstatus::STATUS_MEMBER_NOT_IN_GROUP
                        }
                    }
                };
                out.put_u32_le(status);
            }
            opnum::DELETE_USER => {
                let handle = ContextHandle::decode(&mut reader).map_err(ndr)?;
                reader.finish().map_err(ndr)?;
                if self.users.remove(&handle.to_bytes()).is_some() {
                    out.put_slice(ContextHandle::NIL.as_bytes());
                    out.put_u32_le(ntstatus::STATUS_SUCCESS);
                } else {
                    out.put_slice(handle.as_bytes());
                    out.put_u32_le(ntstatus::STATUS_INVALID_HANDLE);
                }
            }
            opnum::QUERY_INFORMATION_USER => {
                let handle = ContextHandle::decode(&mut reader).map_err(ndr)?;
                let class = reader.read_u16().map_err(ndr)?;
                reader.finish().map_err(ndr)?;
                match (self.users.get(&handle.to_bytes()), UserInformationClass::from_u16(class)) {
                    (None, _) => {
                        out.put_u32_le(0);
                        out.put_u32_le(ntstatus::STATUS_INVALID_HANDLE);
                    }
                    (Some(_), None) => {
                        out.put_u32_le(0);
                        out.put_u32_le(ntstatus::STATUS_INVALID_INFO_CLASS);
                    }
                    (Some(rid), Some(class)) => {
                        out.put_u32_le(REFERENT_ID);
                        out.put_u16_le(class.value());
                        out.put_u16_le(0);
                        out.put_u32_le(*rid);
                        out.put_u32_le(ntstatus::STATUS_SUCCESS);
                    }
                }
            }
            _ => return Err(FaultCode::NcaOpRngError),
        }

        Ok(out.freeze())
    }
}

fn encode(result: dcerpc::Result<Bytes>) -> Bytes {
    result.unwrap_or_else(|e| panic!("failed to encode reply: {}", e))
}

pub type TestClient = SamrClient<DceRpcTransport<DuplexStream>>;

/// Start an in-memory SAM peer and a client connected to it
///
/// The peer runs until the client is dropped and then hands back its state.
pub fn start_sam(state: SamState) -> (TestClient, JoinHandle<SamState>) {
    start_sam_with(SamrClientBuilder::new(), state)
}

pub fn start_sam_with(builder: SamrClientBuilder, mut state: SamState) -> (TestClient, JoinHandle<SamState>) {
    let (client_io, server_io) = tokio::io::duplex(64 * 1024);

    let server = tokio::spawn(async move {
        let mut transport = DceRpcTransport::new(server_io);
        loop {
            let pdu = match transport.recv_pdu().await {
                Ok(pdu) => pdu,
                Err(RpcError::ConnectionClosed) => break,
                Err(e) => panic!("peer receive failed: {}", e),
            };
            let request = match Pdu::decode(&pdu) {
                Ok(Pdu::Request(request)) => request,
                other => panic!("peer expected a request PDU, got {:?}", other),
            };
            let reply = state.answer(&request);
            if transport.send_pdu(reply).await.is_err() {
                break;
            }
        }
        info!("SAM peer finished after {} calls", state.calls.len());
        state
    });

    (builder.build(client_io), server)
}
