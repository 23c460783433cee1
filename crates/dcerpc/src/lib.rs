//! DCE RPC (MS-RPC) call-path encoding
//!
//! This crate provides the client side of a DCE RPC call once a transport
//! is bound: request/response/fault PDU framing as specified in DCE 1.1 RPC
//! (C706) and MS-RPCE, the fault status table, and the traits an interface
//! crate implements to describe its operations.
//!
//! # Features
//!
//! - Connection-oriented request, response and fault PDUs
//! - Total classification of fault/reject status codes ([`FaultCode`])
//! - Typed operations through [`RpcRequest`] / [`RpcResponse`]
//! - A transport boundary ([`RpcTransport`]) with a stream implementation
//!
//! # Example
//!
//! ```no_run
//! use dcerpc::{DceRpcClientBuilder, DceRpcTransport};
//! use bytes::Bytes;
//!
//! # async fn run(stream: tokio::net::TcpStream) -> dcerpc::Result<()> {
//! // `stream` has already been bound to the interface
//! let client = DceRpcClientBuilder::new()
//!     .context_id(0)
//!     .build(DceRpcTransport::new(stream));
//!
//! match client.call(1, Bytes::from_static(&[0u8; 20])).await {
//!     Ok(stub) => println!("{} bytes", stub.len()),
//!     Err(err) => println!("fault: {:?}", err.fault_code()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fault;
pub mod operation;

pub mod dcerpc;
pub mod dcerpc_client;
pub mod dcerpc_transport;

pub use error::{Result, RpcError};
pub use fault::FaultCode;
pub use operation::{RpcRequest, RpcResponse};

pub use dcerpc::{
    CharRep, DataRepresentation, FaultPdu, FloatRep, IntRep, PacketFlags, PacketType, Pdu,
    PduHeader, RequestPdu, ResponsePdu, SyntaxId, Uuid, DCE_RPC_VERSION, DCE_RPC_VERSION_MINOR,
};
pub use dcerpc_client::{DceRpcClient, DceRpcClientBuilder, RpcClientConfig, DEFAULT_MAX_XMIT_FRAG};
pub use dcerpc_transport::{DceRpcTransport, RpcTransport, DEFAULT_MAX_PDU_SIZE};
