//! DCE RPC transport boundary
//!
//! The call path only needs "send these bytes, receive these bytes" from
//! whatever carries the PDUs (TCP, SMB named pipe, an in-memory pipe in
//! tests). [`RpcTransport`] is that boundary. [`DceRpcTransport`] implements
//! it for any byte stream, using the `frag_length` field of the common
//! header to delimit connection-oriented PDUs.

use crate::dcerpc::PduHeader;
use crate::error::{Result, RpcError};
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

/// Maximum PDU size (64 KB default, typical DCE RPC limit)
pub const DEFAULT_MAX_PDU_SIZE: usize = 65536;

/// Carrier for encoded PDUs, bound and authenticated by the caller
#[async_trait]
pub trait RpcTransport: Send {
    /// Send one complete, encoded PDU
    async fn send_pdu(&mut self, pdu: Bytes) -> Result<()>;

    /// Receive one complete, encoded PDU
    async fn recv_pdu(&mut self) -> Result<Bytes>;
}

/// Stream transport framing PDUs by their header
pub struct DceRpcTransport<T> {
    inner: T,
    max_pdu_size: usize,
    read_buf: BytesMut,
}

impl<T> DceRpcTransport<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            max_pdu_size: DEFAULT_MAX_PDU_SIZE,
            read_buf: BytesMut::with_capacity(8192),
        }
    }

    pub fn with_max_pdu_size(mut self, max_size: usize) -> Self {
        self.max_pdu_size = max_size;
        self
    }

    pub fn max_pdu_size(&self) -> usize {
        self.max_pdu_size
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }
}

impl<T: AsyncRead + Unpin> DceRpcTransport<T> {
    /// Read a complete DCE RPC PDU
    pub async fn read_pdu(&mut self) -> Result<Bytes> {
        while self.read_buf.len() < PduHeader::SIZE {
            if self.fill_buf().await? == 0 {
                if self.read_buf.is_empty() {
                    return Err(RpcError::ConnectionClosed);
                }
                return Err(RpcError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "incomplete PDU header",
                )));
            }
        }

        // No PDU boundary can be recovered after a bad header; drop the buffer
        let header = match PduHeader::decode(&self.read_buf) {
            Ok(header) => header,
            Err(e) => {
                self.discard_buffered();
                return Err(e);
            }
        };
        let frag_length = header.frag_length as usize;

        if frag_length < PduHeader::SIZE {
            self.discard_buffered();
            return Err(RpcError::InvalidPduData(format!(
                "invalid fragment length: {} < header size",
                frag_length
            )));
        }
        if frag_length > self.max_pdu_size {
            self.discard_buffered();
            return Err(RpcError::PduTooLarge {
                size: frag_length,
                max: self.max_pdu_size,
            });
        }

        while self.read_buf.len() < frag_length {
            if self.fill_buf().await? == 0 {
                return Err(RpcError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!(
                        "incomplete PDU: expected {} bytes, got {}",
                        frag_length,
                        self.read_buf.len()
                    ),
                )));
            }
        }

        trace!(
            "Read PDU: type={:?}, call_id={}, frag_length={}",
            header.packet_type,
            header.call_id,
            frag_length
        );
        Ok(self.read_buf.split_to(frag_length).freeze())
    }

    fn discard_buffered(&mut self) {
        debug!("Discarding {} unframed bytes", self.read_buf.len());
        self.read_buf.clear();
    }

    async fn fill_buf(&mut self) -> Result<usize> {
        if self.read_buf.capacity() - self.read_buf.len() < 4096 {
            self.read_buf.reserve(8192);
        }
        Ok(self.inner.read_buf(&mut self.read_buf).await?)
    }
}

impl<T: AsyncWrite + Unpin> DceRpcTransport<T> {
    /// Write a complete DCE RPC PDU (already encoded)
    pub async fn write_pdu(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data).await?;
        self.inner.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<T> RpcTransport for DceRpcTransport<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send_pdu(&mut self, pdu: Bytes) -> Result<()> {
        self.write_pdu(&pdu).await
    }

    async fn recv_pdu(&mut self) -> Result<Bytes> {
        self.read_pdu().await
    }
}
