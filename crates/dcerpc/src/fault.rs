//! Fault and reject status codes
//!
//! Both reject PDUs and connection-oriented fault PDUs carry a 32-bit field
//! that says why a server refused or failed a call (C706 Appendix E,
//! `fault_status`). It is the body of a reject PDU and the `status` field of
//! a fault PDU. Reject and fault codes do not overlap, so a single table
//! covers both, together with the Microsoft-specific HRESULT and CBA codes
//! seen in practice.
//!
//! The table is generated at compile time: a duplicate value is a duplicate
//! enum discriminant and fails the build. Lookup through
//! [`FaultCode::from_value`] is total; unlisted codes map to
//! [`FaultCode::Unknown`].

use crate::error::Result;
use bytes::Buf;
use midl_ndr::NdrReader;
use std::fmt;

macro_rules! fault_codes {
    ($( $(#[$meta:meta])* $variant:ident = $value:literal => $symbol:literal, )*) => {
        /// Symbolic fault/reject status
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum FaultCode {
            $( $(#[$meta])* $variant = $value, )*
        }

        impl FaultCode {
            /// Every entry of the table, in declaration order
            pub const ALL: &'static [FaultCode] = &[ $( FaultCode::$variant, )* ];

            /// Classify a raw status value
            pub fn from_value(value: u32) -> Self {
                match value {
                    $( $value => FaultCode::$variant, )*
                    _ => FaultCode::Unknown,
                }
            }

            /// Table symbol, as it appears in C706 and MS-RPCE
            pub fn symbol(&self) -> &'static str {
                match self {
                    $( FaultCode::$variant => $symbol, )*
                }
            }
        }
    };
}

fault_codes! {
    /// Sentinel for any status missing from the table
    Unknown = 0x0000_0000 => "UNKNOWN",

    // DCE RPC
    NcaSFaultOther = 0x0000_0001 => "NCA_S_FAULT_OTHER",
    NcaSFaultAccessDenied = 0x0000_0005 => "NCA_S_FAULT_ACCESS_DENIED",
    NcaSFaultNdr = 0x0000_06F7 => "NCA_S_FAULT_NDR",
    NcaSFaultCantPerform = 0x0000_06D8 => "NCA_S_FAULT_CANT_PERFORM",
    NcaSFaultIntDivByZero = 0x1C00_0001 => "NCA_S_FAULT_INT_DIV_BY_ZERO",
    NcaSFaultAddrError = 0x1C00_0002 => "NCA_S_FAULT_ADDR_ERROR",
    NcaSFaultFpDivZero = 0x1C00_0003 => "NCA_S_FAULT_FP_DIV_ZERO",
    NcaSFaultFpUnderflow = 0x1C00_0004 => "NCA_S_FAULT_FP_UNDERFLOW",
    NcaSFaultFpOverflow = 0x1C00_0005 => "NCA_S_FAULT_FP_OVERFLOW",
    NcaSFaultInvalidTag = 0x1C00_0006 => "NCA_S_FAULT_INVALID_TAG",
    NcaSFaultInvalidBound = 0x1C00_0007 => "NCA_S_FAULT_INVALID_BOUND",
    NcaRpcVersionMismatch = 0x1C00_0008 => "NCA_RPC_VERSION_MISMATCH",
    NcaUnspecReject = 0x1C00_0009 => "NCA_UNSPEC_REJECT",
    NcaSBadActid = 0x1C00_000A => "NCA_S_BAD_ACTID",
    NcaWhoAreYouFailed = 0x1C00_000B => "NCA_WHO_ARE_YOU_FAILED",
    NcaManagerNotEntered = 0x1C00_000C => "NCA_MANAGER_NOT_ENTERED",
    NcaSFaultCancel = 0x1C00_000D => "NCA_S_FAULT_CANCEL",
    NcaSFaultIllInst = 0x1C00_000E => "NCA_S_FAULT_ILL_INST",
    NcaSFaultFpError = 0x1C00_000F => "NCA_S_FAULT_FP_ERROR",
    NcaSFaultIntOverflow = 0x1C00_0010 => "NCA_S_FAULT_INT_OVERFLOW",
    NcaSFaultPipeEmpty = 0x1C00_0014 => "NCA_S_FAULT_PIPE_EMPTY",
    NcaSFaultPipeClosed = 0x1C00_0015 => "NCA_S_FAULT_PIPE_CLOSED",
    NcaSFaultPipeOrder = 0x1C00_0016 => "NCA_S_FAULT_PIPE_ORDER",
    NcaSFaultPipeDiscipline = 0x1C00_0017 => "NCA_S_FAULT_PIPE_DISCIPLINE",
    NcaSFaultPipeCommError = 0x1C00_0018 => "NCA_S_FAULT_PIPE_COMM_ERROR",
    NcaSFaultPipeMemory = 0x1C00_0019 => "NCA_S_FAULT_PIPE_MEMORY",
    NcaSFaultContextMismatch = 0x1C00_001A => "NCA_S_FAULT_CONTEXT_MISMATCH",
    NcaSFaultRemoteNoMemory = 0x1C00_001B => "NCA_S_FAULT_REMOTE_NO_MEMORY",
    NcaInvalidPresContextId = 0x1C00_001C => "NCA_INVALID_PRES_CONTEXT_ID",
    NcaUnsupportedAuthnLevel = 0x1C00_001D => "NCA_UNSUPPORTED_AUTHN_LEVEL",
    NcaInvalidChecksum = 0x1C00_001F => "NCA_INVALID_CHECKSUM",
    NcaInvalidCrc = 0x1C00_0020 => "NCA_INVALID_CRC",
    NcaSFaultUserDefined = 0x1C00_0021 => "NCA_S_FAULT_USER_DEFINED",
    NcaSFaultTxOpenFailed = 0x1C00_0022 => "NCA_S_FAULT_TX_OPEN_FAILED",
    NcaSFaultCodesetConvError = 0x1C00_0023 => "NCA_S_FAULT_CODESET_CONV_ERROR",
    NcaSFaultObjectNotFound = 0x1C00_0024 => "NCA_S_FAULT_OBJECT_NOT_FOUND",
    NcaSFaultNoClientStub = 0x1C00_0025 => "NCA_S_FAULT_NO_CLIENT_STUB",
    NcaOpRngError = 0x1C01_0002 => "NCA_OP_RNG_ERROR",
    NcaUnkIf = 0x1C01_0003 => "NCA_UNK_IF",
    NcaWrongBootTime = 0x1C01_0006 => "NCA_WRONG_BOOT_TIME",
    NcaSYouCrashed = 0x1C01_0009 => "NCA_S_YOU_CRASHED",
    NcaProtoError = 0x1C01_000B => "NCA_PROTO_ERROR",
    NcaOutArgsTooBig = 0x1C01_0013 => "NCA_OUT_ARGS_TOO_BIG",
    NcaServerTooBusy = 0x1C01_0014 => "NCA_SERVER_TOO_BUSY",
    NcaUnsupportedType = 0x1C01_0017 => "NCA_UNSUPPORTED_TYPE",

    // Microsoft specific
    ENotImpl = 0x8000_4001 => "E_NOTIMPL",
    EPointer = 0x8000_4003 => "E_POINTER",
    // Standard HRESULT name; older tables misspell it E_AOBRT
    EAbort = 0x8000_4004 => "E_ABORT",
    EUnexpected = 0x8000_FFFF => "E_UNEXPECTED",
    RpcEServerFault = 0x8001_0105 => "RPC_E_SERVERFAULT",
    RpcEDisconnected = 0x8001_0108 => "RPC_E_DISCONNECTED",
    RpcEInvalidIpid = 0x8001_0113 => "RPC_E_INVALID_IPID",
    RpcETimeout = 0x8001_011F => "RPC_E_TIMEOUT",
    DispEMemberNotFound = 0x8002_0003 => "DISP_E_MEMBERNOTFOUND",
    DispEUnknownName = 0x8002_0006 => "DISP_E_UNKNOWNNAME",
    DispEBadParamCount = 0x8002_000E => "DISP_E_BADPARAMCOUNT",
    CbaEMalformed = 0x8004_CB00 => "CBA_E_MALFORMED",
    CbaEUnknownObject = 0x8004_CB01 => "CBA_E_UNKNOWNOBJECT",
    CbaEInvalidId = 0x8004_CB05 => "CBA_E_INVALIDID",
    CbaEInvalidCookie = 0x8004_CB09 => "CBA_E_INVALIDCOOKIE",
    CbaEQosTypeUnsupported = 0x8004_CB0B => "CBA_E_QOSTYPEUNSUPPORTED",
    CbaEQosValueUnsupported = 0x8004_CB0C => "CBA_E_QOSVALUEUNSUPPORTED",
    CbaENotApplicable = 0x8004_CB0F => "CBA_E_NOTAPPLICABLE",
    CbaELimitViolation = 0x8004_CB12 => "CBA_E_LIMITVIOLATION",
    CbaEQosTypeNotApplicable = 0x8004_CB13 => "CBA_E_QOSTYPENOTAPPLICABLE",
    CbaEOutOfPartnerAccos = 0x8004_CB18 => "CBA_E_OUTOFPARTNERACCOS",
    CbaEFlagUnsupported = 0x8004_CB1C => "CBA_E_FLAGUNSUPPORTED",
    CbaEFrameCountUnsupported = 0x8004_CB23 => "CBA_E_FRAMECOUNTUNSUPPORTED",
    CbaEModeChange = 0x8004_CB25 => "CBA_E_MODECHANGE",
    EOutOfMemory = 0x8007_000E => "E_OUTOFMEMORY",
    EInvalidArg = 0x8007_0057 => "E_INVALIDARG",
    RpcSProcnumOutOfRange = 0x8007_06D1 => "RPC_S_PROCNUM_OUT_OF_RANGE",
    OrInvalidOxid = 0x8007_0776 => "OR_INVALID_OXID",
}

impl FaultCode {
    /// Numeric status value
    pub fn value(&self) -> u32 {
        *self as u32
    }

    pub fn is_unknown(&self) -> bool {
        *self == FaultCode::Unknown
    }

    /// Decode the 32-bit status carried as a reject PDU body
    pub fn from_reject_body<B: Buf>(body: B) -> Result<Self> {
        let mut reader = NdrReader::new(body);
        Ok(Self::from_value(reader.read_u32()?))
    }
}

impl From<u32> for FaultCode {
    fn from(value: u32) -> Self {
        Self::from_value(value)
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol().to_ascii_lowercase())
    }
}
