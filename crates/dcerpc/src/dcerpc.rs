//! DCE RPC PDU (Protocol Data Unit) types
//!
//! Connection-oriented PDUs as defined in:
//! - DCE 1.1: Remote Procedure Call (C706), chapter 12
//! - MS-RPCE: Remote Procedure Call Protocol Extensions, section 2.2.2
//!
//! Only the single-fragment, unauthenticated call path is covered here:
//! request, response and fault. Bind negotiation, fragmentation and auth
//! verifiers are handled by the transport layer.
//!
//! Common header:
//! ```text
//! +--------+--------+--------+--------+
//! |  vers  |vers_min| ptype  | pflags |
//! +--------+--------+--------+--------+
//! |        data representation        |
//! +--------+--------+--------+--------+
//! |   frag_len      |   auth_len      |
//! +--------+--------+--------+--------+
//! |             call_id               |
//! +--------+--------+--------+--------+
//! ```

use crate::error::{Result, RpcError};
use crate::fault::FaultCode;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use midl_ndr::{NdrContext, NdrReader, NdrWriter};

/// DCE RPC protocol version
pub const DCE_RPC_VERSION: u8 = 5;
/// DCE RPC protocol minor version
pub const DCE_RPC_VERSION_MINOR: u8 = 0;

/// DCE RPC packet types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketType {
    Request = 0,
    Ping = 1,
    Response = 2,
    Fault = 3,
    Working = 4,
    Nocall = 5,
    Reject = 6,
    Ack = 7,
    ClCancel = 8,
    Fack = 9,
    CancelAck = 10,
    Bind = 11,
    BindAck = 12,
    BindNak = 13,
    AlterContext = 14,
    AlterContextResp = 15,
    Auth3 = 16,
    Shutdown = 17,
    CoCancel = 18,
    Orphaned = 19,
}

impl PacketType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Request),
            1 => Some(Self::Ping),
            2 => Some(Self::Response),
            3 => Some(Self::Fault),
            4 => Some(Self::Working),
            5 => Some(Self::Nocall),
            6 => Some(Self::Reject),
            7 => Some(Self::Ack),
            8 => Some(Self::ClCancel),
            9 => Some(Self::Fack),
            10 => Some(Self::CancelAck),
            11 => Some(Self::Bind),
            12 => Some(Self::BindAck),
            13 => Some(Self::BindNak),
            14 => Some(Self::AlterContext),
            15 => Some(Self::AlterContextResp),
            16 => Some(Self::Auth3),
            17 => Some(Self::Shutdown),
            18 => Some(Self::CoCancel),
            19 => Some(Self::Orphaned),
            _ => None,
        }
    }
}

/// Packet flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketFlags(u8);

impl PacketFlags {
    /// First fragment
    pub const FIRST_FRAG: u8 = 0x01;
    /// Last fragment
    pub const LAST_FRAG: u8 = 0x02;
    /// Did not execute
    pub const DID_NOT_EXECUTE: u8 = 0x20;
    /// Object UUID present
    pub const OBJECT_UUID: u8 = 0x80;

    /// Flags for a complete (non-fragmented) PDU
    pub fn complete() -> Self {
        Self(Self::FIRST_FRAG | Self::LAST_FRAG)
    }

    pub fn is_first_frag(&self) -> bool {
        (self.0 & Self::FIRST_FRAG) != 0
    }

    pub fn is_last_frag(&self) -> bool {
        (self.0 & Self::LAST_FRAG) != 0
    }

    pub fn did_not_execute(&self) -> bool {
        (self.0 & Self::DID_NOT_EXECUTE) != 0
    }

    pub fn has_object_uuid(&self) -> bool {
        (self.0 & Self::OBJECT_UUID) != 0
    }

    pub fn with(self, flag: u8) -> Self {
        Self(self.0 | flag)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn from_u8(value: u8) -> Self {
        Self(value)
    }
}

/// Integer representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntRep {
    BigEndian = 0,
    LittleEndian = 1,
}

/// Character representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharRep {
    Ascii = 0,
    Ebcdic = 1,
}

/// Floating point representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatRep {
    Ieee = 0,
    Vax = 1,
    Cray = 2,
    Ibm = 3,
}

/// Data Representation Format Label (MS-RPCE 2.2.2.3)
///
/// - Byte 0: bits 0-3 = character rep, bits 4-7 = integer rep
/// - Byte 1: floating point representation
/// - Bytes 2-3: reserved (zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRepresentation {
    pub int_rep: IntRep,
    pub char_rep: CharRep,
    pub float_rep: FloatRep,
}

impl DataRepresentation {
    /// NDR default: little-endian, ASCII, IEEE
    pub fn ndr() -> Self {
        Self {
            int_rep: IntRep::LittleEndian,
            char_rep: CharRep::Ascii,
            float_rep: FloatRep::Ieee,
        }
    }

    pub fn big_endian() -> Self {
        Self {
            int_rep: IntRep::BigEndian,
            ..Self::ndr()
        }
    }

    /// For little-endian ASCII IEEE: [0x10, 0x00, 0x00, 0x00]
    pub fn encode(&self) -> [u8; 4] {
        let byte0 = (self.char_rep as u8) | ((self.int_rep as u8) << 4);
        [byte0, self.float_rep as u8, 0, 0]
    }

    pub fn decode(data: [u8; 4]) -> Self {
        let int_rep = if (data[0] & 0xF0) == 0 {
            IntRep::BigEndian
        } else {
            IntRep::LittleEndian
        };
        let char_rep = if (data[0] & 0x0F) == 0 {
            CharRep::Ascii
        } else {
            CharRep::Ebcdic
        };
        let float_rep = match data[1] {
            0 => FloatRep::Ieee,
            1 => FloatRep::Vax,
            2 => FloatRep::Cray,
            _ => FloatRep::Ibm,
        };
        Self {
            int_rep,
            char_rep,
            float_rep,
        }
    }

    pub fn is_little_endian(&self) -> bool {
        self.int_rep == IntRep::LittleEndian
    }

    /// NDR context matching this label's byte order
    pub fn ndr_context(&self) -> NdrContext {
        NdrContext::with_byte_order(self.is_little_endian())
    }
}

impl Default for DataRepresentation {
    fn default() -> Self {
        Self::ndr()
    }
}

/// UUID structure (128 bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Uuid {
    pub time_low: u32,
    pub time_mid: u16,
    pub time_hi_and_version: u16,
    pub clock_seq_hi_and_reserved: u8,
    pub clock_seq_low: u8,
    pub node: [u8; 6],
}

impl Uuid {
    /// Encoded size in bytes
    pub const SIZE: usize = 16;

    /// Nil UUID (all zeros)
    pub const NIL: Self = Self {
        time_low: 0,
        time_mid: 0,
        time_hi_and_version: 0,
        clock_seq_hi_and_reserved: 0,
        clock_seq_low: 0,
        node: [0; 6],
    };

    /// Parse from string format "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != 36 || !s.is_ascii() {
            return None;
        }
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 5 || parts[4].len() != 12 {
            return None;
        }

        let time_low = u32::from_str_radix(parts[0], 16).ok()?;
        let time_mid = u16::from_str_radix(parts[1], 16).ok()?;
        let time_hi_and_version = u16::from_str_radix(parts[2], 16).ok()?;
        let clock = u16::from_str_radix(parts[3], 16).ok()?;

        let mut node = [0u8; 6];
        for (i, byte) in node.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&parts[4][i * 2..i * 2 + 2], 16).ok()?;
        }

        Some(Self {
            time_low,
            time_mid,
            time_hi_and_version,
            clock_seq_hi_and_reserved: (clock >> 8) as u8,
            clock_seq_low: clock as u8,
            node,
        })
    }

    /// Encode in wire format (integer fields follow the writer's byte order)
    pub fn encode<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> midl_ndr::Result<()> {
        writer.write_u32(self.time_low)?;
        writer.write_u16(self.time_mid)?;
        writer.write_u16(self.time_hi_and_version)?;
        writer.write_u8(self.clock_seq_hi_and_reserved)?;
        writer.write_u8(self.clock_seq_low)?;
        writer.write_bytes(&self.node)
    }

    pub fn decode<B: Buf>(reader: &mut NdrReader<B>) -> midl_ndr::Result<Self> {
        Ok(Self {
            time_low: reader.read_u32()?,
            time_mid: reader.read_u16()?,
            time_hi_and_version: reader.read_u16()?,
            clock_seq_hi_and_reserved: reader.read_u8()?,
            clock_seq_low: reader.read_u8()?,
            node: reader.read_array()?,
        })
    }
}

impl std::fmt::Display for Uuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.time_low,
            self.time_mid,
            self.time_hi_and_version,
            self.clock_seq_hi_and_reserved,
            self.clock_seq_low,
            self.node[0],
            self.node[1],
            self.node[2],
            self.node[3],
            self.node[4],
            self.node[5]
        )
    }
}

/// Syntax ID - interface UUID with version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxId {
    pub uuid: Uuid,
    /// Major in lower 16 bits, minor in upper 16 bits
    pub version: u32,
}

impl SyntaxId {
    pub fn new(uuid: Uuid, major: u16, minor: u16) -> Self {
        Self {
            uuid,
            version: (major as u32) | ((minor as u32) << 16),
        }
    }

    pub fn major_version(&self) -> u16 {
        self.version as u16
    }

    pub fn minor_version(&self) -> u16 {
        (self.version >> 16) as u16
    }
}

/// Common PDU header (16 bytes)
#[derive(Debug, Clone)]
pub struct PduHeader {
    pub version: u8,
    pub version_minor: u8,
    pub packet_type: PacketType,
    pub packet_flags: PacketFlags,
    pub data_rep: DataRepresentation,
    /// Total length of the PDU fragment
    pub frag_length: u16,
    pub auth_length: u16,
    pub call_id: u32,
}

impl PduHeader {
    /// PDU header size in bytes
    pub const SIZE: usize = 16;

    pub fn new(packet_type: PacketType, call_id: u32) -> Self {
        Self {
            version: DCE_RPC_VERSION,
            version_minor: DCE_RPC_VERSION_MINOR,
            packet_type,
            packet_flags: PacketFlags::complete(),
            data_rep: DataRepresentation::ndr(),
            frag_length: 0, // set when encoding
            auth_length: 0,
            call_id,
        }
    }

    /// Encode the header; frag_length, auth_length and call_id follow data_rep
    pub fn encode(&self, buf: &mut BytesMut) -> Result<()> {
        let mut writer = NdrWriter::from_buf(buf, self.data_rep.ndr_context());
        writer.write_u8(self.version)?;
        writer.write_u8(self.version_minor)?;
        writer.write_u8(self.packet_type as u8)?;
        writer.write_u8(self.packet_flags.as_u8())?;
        writer.write_bytes(&self.data_rep.encode())?;
        writer.write_u16(self.frag_length)?;
        writer.write_u16(self.auth_length)?;
        writer.write_u32(self.call_id)?;
        Ok(())
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = NdrReader::new(data);
        let version = reader.read_u8()?;
        if version != DCE_RPC_VERSION {
            return Err(RpcError::VersionMismatch {
                expected: DCE_RPC_VERSION,
                got: version,
            });
        }
        let version_minor = reader.read_u8()?;
        let ptype = reader.read_u8()?;
        let packet_type =
            PacketType::from_u8(ptype).ok_or(RpcError::InvalidMessageType(ptype as i32))?;
        let packet_flags = PacketFlags::from_u8(reader.read_u8()?);
        let data_rep = DataRepresentation::decode(reader.read_array()?);

        // The rest of the header uses the sender's byte order
        let mut reader = NdrReader::with_context(&data[8..], data_rep.ndr_context());
        let frag_length = reader.read_u16()?;
        let auth_length = reader.read_u16()?;
        let call_id = reader.read_u32()?;

        Ok(Self {
            version,
            version_minor,
            packet_type,
            packet_flags,
            data_rep,
            frag_length,
            auth_length,
            call_id,
        })
    }

    /// Write the header at the front of an encoded PDU, filling in frag_length
    fn finish(&self, mut pdu: BytesMut) -> Result<Bytes> {
        let frag_length = u16::try_from(pdu.len()).map_err(|_| RpcError::PduTooLarge {
            size: pdu.len(),
            max: u16::MAX as usize,
        })?;
        let mut header = self.clone();
        header.frag_length = frag_length;

        let mut header_buf = BytesMut::with_capacity(Self::SIZE);
        header.encode(&mut header_buf)?;
        pdu[..Self::SIZE].copy_from_slice(&header_buf);
        Ok(pdu.freeze())
    }

    /// Check the packet type and return the fragment body (after the header)
    fn body<'a>(&self, data: &'a [u8], expected: PacketType) -> Result<&'a [u8]> {
        if self.packet_type != expected {
            return Err(RpcError::InvalidMessageType(self.packet_type as i32));
        }
        if self.auth_length != 0 {
            return Err(RpcError::InvalidPduData(format!(
                "unexpected auth verifier of {} bytes",
                self.auth_length
            )));
        }
        let frag_length = self.frag_length as usize;
        if frag_length < Self::SIZE {
            return Err(RpcError::InvalidPduData(format!(
                "fragment length {} shorter than header",
                frag_length
            )));
        }
        if data.len() < frag_length {
            return Err(midl_ndr::NdrError::BufferUnderflow {
                needed: frag_length,
                have: data.len(),
            }
            .into());
        }
        Ok(&data[Self::SIZE..frag_length])
    }
}

/// Request PDU
#[derive(Debug, Clone)]
pub struct RequestPdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub opnum: u16,
    pub object_uuid: Option<Uuid>,
    pub stub_data: Bytes,
}

impl RequestPdu {
    /// alloc_hint(4) + context_id(2) + opnum(2)
    pub const BODY_HEADER_SIZE: usize = 8;

    pub fn new(call_id: u32, opnum: u16, stub_data: Bytes) -> Self {
        Self {
            header: PduHeader::new(PacketType::Request, call_id),
            alloc_hint: stub_data.len() as u32,
            context_id: 0,
            opnum,
            object_uuid: None,
            stub_data,
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        let capacity = PduHeader::SIZE + Self::BODY_HEADER_SIZE + Uuid::SIZE + self.stub_data.len();
        let mut writer =
            NdrWriter::from_buf(BytesMut::with_capacity(capacity), self.header.data_rep.ndr_context());

        // Reserve space for header
        writer.write_bytes(&[0u8; PduHeader::SIZE])?;
        writer.write_u32(self.alloc_hint)?;
        writer.write_u16(self.context_id)?;
        writer.write_u16(self.opnum)?;
        if let Some(ref uuid) = self.object_uuid {
            uuid.encode(&mut writer)?;
        }
        writer.write_bytes(&self.stub_data)?;

        let mut header = self.header.clone();
        if self.object_uuid.is_some() {
            header.packet_flags = header.packet_flags.with(PacketFlags::OBJECT_UUID);
        }
        header.finish(writer.into_inner())
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = PduHeader::decode(data)?;
        let body = header.body(data, PacketType::Request)?;
        let mut reader = NdrReader::with_context(body, header.data_rep.ndr_context());

        let alloc_hint = reader.read_u32()?;
        let context_id = reader.read_u16()?;
        let opnum = reader.read_u16()?;
        let object_uuid = if header.packet_flags.has_object_uuid() {
            Some(Uuid::decode(&mut reader)?)
        } else {
            None
        };
        let stub_data = reader.read_bytes(reader.remaining())?;

        Ok(Self {
            header,
            alloc_hint,
            context_id,
            opnum,
            object_uuid,
            stub_data,
        })
    }
}

/// Response PDU
#[derive(Debug, Clone)]
pub struct ResponsePdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub cancel_count: u8,
    pub stub_data: Bytes,
}

impl ResponsePdu {
    /// alloc_hint(4) + context_id(2) + cancel_count(1) + reserved(1)
    pub const BODY_HEADER_SIZE: usize = 8;

    pub fn new(call_id: u32, stub_data: Bytes) -> Self {
        Self {
            header: PduHeader::new(PacketType::Response, call_id),
            alloc_hint: stub_data.len() as u32,
            context_id: 0,
            cancel_count: 0,
            stub_data,
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        let capacity = PduHeader::SIZE + Self::BODY_HEADER_SIZE + self.stub_data.len();
        let mut writer =
            NdrWriter::from_buf(BytesMut::with_capacity(capacity), self.header.data_rep.ndr_context());

        writer.write_bytes(&[0u8; PduHeader::SIZE])?;
        writer.write_u32(self.alloc_hint)?;
        writer.write_u16(self.context_id)?;
        writer.write_u8(self.cancel_count)?;
        writer.write_u8(0)?; // reserved
        writer.write_bytes(&self.stub_data)?;

        self.header.finish(writer.into_inner())
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = PduHeader::decode(data)?;
        let body = header.body(data, PacketType::Response)?;
        let mut reader = NdrReader::with_context(body, header.data_rep.ndr_context());

        let alloc_hint = reader.read_u32()?;
        let context_id = reader.read_u16()?;
        let cancel_count = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        let stub_data = reader.read_bytes(reader.remaining())?;

        Ok(Self {
            header,
            alloc_hint,
            context_id,
            cancel_count,
            stub_data,
        })
    }
}

/// Fault PDU
#[derive(Debug, Clone)]
pub struct FaultPdu {
    pub header: PduHeader,
    pub alloc_hint: u32,
    pub context_id: u16,
    pub cancel_count: u8,
    /// Raw fault status as received
    pub status: u32,
}

impl FaultPdu {
    /// alloc_hint(4) + context_id(2) + cancel_count(1) + reserved(1) + status(4) + reserved(4)
    pub const BODY_SIZE: usize = 16;

    pub fn new(call_id: u32, status: u32) -> Self {
        Self {
            header: PduHeader::new(PacketType::Fault, call_id),
            alloc_hint: 0,
            context_id: 0,
            cancel_count: 0,
            status,
        }
    }

    /// Classify the status through the fault table
    pub fn fault_code(&self) -> FaultCode {
        FaultCode::from_value(self.status)
    }

    pub fn encode(&self) -> Result<Bytes> {
        let mut writer = NdrWriter::from_buf(
            BytesMut::with_capacity(PduHeader::SIZE + Self::BODY_SIZE),
            self.header.data_rep.ndr_context(),
        );

        writer.write_bytes(&[0u8; PduHeader::SIZE])?;
        writer.write_u32(self.alloc_hint)?;
        writer.write_u16(self.context_id)?;
        writer.write_u8(self.cancel_count)?;
        writer.write_u8(0)?; // reserved
        writer.write_u32(self.status)?;
        writer.write_u32(0)?; // reserved

        self.header.finish(writer.into_inner())
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = PduHeader::decode(data)?;
        let body = header.body(data, PacketType::Fault)?;
        let mut reader = NdrReader::with_context(body, header.data_rep.ndr_context());

        let alloc_hint = reader.read_u32()?;
        let context_id = reader.read_u16()?;
        let cancel_count = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        let status = reader.read_u32()?;
        // Anything after the status (reserved word, extended error info) is ignored

        Ok(Self {
            header,
            alloc_hint,
            context_id,
            cancel_count,
            status,
        })
    }
}

/// PDUs exchanged on the call path
#[derive(Debug, Clone)]
pub enum Pdu {
    Request(RequestPdu),
    Response(ResponsePdu),
    Fault(FaultPdu),
}

impl Pdu {
    /// Decode a PDU from raw bytes
    pub fn decode(data: &[u8]) -> Result<Self> {
        let header = PduHeader::decode(data)?;
        match header.packet_type {
            PacketType::Request => Ok(Pdu::Request(RequestPdu::decode(data)?)),
            PacketType::Response => Ok(Pdu::Response(ResponsePdu::decode(data)?)),
            PacketType::Fault => Ok(Pdu::Fault(FaultPdu::decode(data)?)),
            other => Err(RpcError::InvalidMessageType(other as i32)),
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        match self {
            Pdu::Request(pdu) => pdu.encode(),
            Pdu::Response(pdu) => pdu.encode(),
            Pdu::Fault(pdu) => pdu.encode(),
        }
    }

    pub fn header(&self) -> &PduHeader {
        match self {
            Pdu::Request(pdu) => &pdu.header,
            Pdu::Response(pdu) => &pdu.header,
            Pdu::Fault(pdu) => &pdu.header,
        }
    }

    pub fn call_id(&self) -> u32 {
        self.header().call_id
    }
}
