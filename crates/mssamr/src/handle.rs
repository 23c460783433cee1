//! SAMR context handles
//!
//! A context handle is the 20-byte token a server returns from an open-style
//! call (`SamrConnect`, `SamrOpenDomain`, `SamrOpenUser`, ...) and that the
//! client echoes back, byte for byte, on every later call against the same
//! object. The client never interprets its contents.

use bytes::{Buf, BufMut};
use midl_ndr::{NdrContext, NdrDecode, NdrEncode, NdrError, NdrReader, NdrWriter};
use std::fmt;

const HANDLE_SIZE: usize = 20;

/// Raw RPC context handle (`ndr_context_handle`, 20 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContextHandle([u8; HANDLE_SIZE]);

impl ContextHandle {
    /// Encoded size in bytes
    pub const SIZE: usize = HANDLE_SIZE;

    /// All-zero handle, as returned by a successful close
    pub const NIL: Self = Self([0; Self::SIZE]);

    pub const fn from_bytes(bytes: [u8; HANDLE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy a handle out of the first 20 bytes of `data`
    pub fn from_slice(data: &[u8]) -> midl_ndr::Result<Self> {
        if data.len() < Self::SIZE {
            return Err(NdrError::BufferUnderflow {
                needed: Self::SIZE,
                have: data.len(),
            });
        }
        let mut bytes = [0u8; Self::SIZE];
        bytes.copy_from_slice(&data[..Self::SIZE]);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; HANDLE_SIZE] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; HANDLE_SIZE] {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0 == [0; Self::SIZE]
    }

    pub fn encode<B: BufMut>(&self, writer: &mut NdrWriter<B>) -> midl_ndr::Result<()> {
        writer.write_bytes(&self.0)
    }

    pub fn decode<B: Buf>(reader: &mut NdrReader<B>) -> midl_ndr::Result<Self> {
        Ok(Self(reader.read_array()?))
    }
}

impl NdrEncode for ContextHandle {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> midl_ndr::Result<()> {
        self.0.ndr_encode(buf, ctx, position)
    }

    fn ndr_size(&self) -> usize {
        Self::SIZE
    }
}

impl NdrDecode for ContextHandle {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> midl_ndr::Result<Self> {
        Ok(Self(<[u8; HANDLE_SIZE]>::ndr_decode(buf, ctx, position)?))
    }
}

impl From<[u8; HANDLE_SIZE]> for ContextHandle {
    fn from(bytes: [u8; HANDLE_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextHandle({})", self)
    }
}

/// Declare a handle type bound to one kind of SAMR object
///
/// The wrappers only exist so that a user handle cannot be passed where a
/// group handle is expected; on the wire they are plain context handles.
macro_rules! typed_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(ContextHandle);

        impl $name {
            pub const fn new(handle: ContextHandle) -> Self {
                Self(handle)
            }

            pub const fn from_bytes(bytes: [u8; HANDLE_SIZE]) -> Self {
                Self(ContextHandle::from_bytes(bytes))
            }

            pub fn from_slice(data: &[u8]) -> midl_ndr::Result<Self> {
                ContextHandle::from_slice(data).map(Self)
            }

            pub fn context_handle(&self) -> &ContextHandle {
                &self.0
            }

            pub fn as_bytes(&self) -> &[u8; HANDLE_SIZE] {
                self.0.as_bytes()
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl From<ContextHandle> for $name {
            fn from(handle: ContextHandle) -> Self {
                Self(handle)
            }
        }

        impl From<$name> for ContextHandle {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_handle!(
    /// Handle to the SAM server (from `SamrConnect`)
    ServerHandle
);
typed_handle!(
    /// Handle to a domain (from `SamrOpenDomain`)
    DomainHandle
);
typed_handle!(
    /// Handle to a user account (from `SamrOpenUser` or `SamrCreateUserInDomain`)
    UserHandle
);
typed_handle!(
    /// Handle to a group (from `SamrOpenGroup` or `SamrCreateGroupInDomain`)
    GroupHandle
);
typed_handle!(
    /// Handle to an alias (from `SamrOpenAlias` or `SamrCreateAliasInDomain`)
    AliasHandle
);
