//! Error types for DCE RPC

use crate::fault::FaultCode;
use midl_ndr::NdrError;
use thiserror::Error;

/// RPC error types
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stub data or PDU could not be decoded
    #[error("NDR error: {0}")]
    Ndr(#[from] NdrError),

    #[error("DCE RPC version mismatch: expected {expected}, got {got}")]
    VersionMismatch { expected: u8, got: u8 },

    #[error("invalid message type: {0}")]
    InvalidMessageType(i32),

    #[error("invalid PDU: {0}")]
    InvalidPduData(String),

    #[error("connection closed")]
    ConnectionClosed,

    /// The server answered with a fault PDU
    #[error("fault: {code} (status 0x{status:08x})")]
    Fault { status: u32, code: FaultCode },

    #[error("call ID mismatch: expected {expected}, got {got}")]
    CallIdMismatch { expected: u32, got: u32 },

    #[error("PDU too large: {size} bytes exceeds maximum {max}")]
    PduTooLarge { size: usize, max: usize },
}

impl RpcError {
    /// Fault classification, if this error came from a fault PDU
    pub fn fault_code(&self) -> Option<FaultCode> {
        match self {
            RpcError::Fault { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RpcError>;
