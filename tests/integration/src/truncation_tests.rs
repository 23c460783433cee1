//! Truncation Tests
//!
//! Every response layout must reject every strict prefix of a valid stub
//! with an underflow, and fixed layouts must reject trailing bytes.

mod common;

use bytes::Bytes;
use common::*;
use dcerpc::{Pdu, ResponsePdu, RpcError, RpcRequest};
use midl_ndr::NdrError;
use mssamr::*;

/// A request of each variant with a valid, fixed-layout response stub
fn fixed_layout_cases() -> Vec<(SamrRequest, Vec<u8>)> {
    let user = UserHandle::from_bytes(sequential_handle());
    let group = GroupHandle::from_bytes(sequential_handle());

    let mut with_handle = sequential_handle().to_vec();
    with_handle.extend_from_slice(&ntstatus::STATUS_SUCCESS.to_le_bytes());

    vec![
        (SamrCloseHandleRequest::new(user).into(), with_handle.clone()),
        (SamrAddMemberToGroupRequest::new(group, 1, 7).into(), vec![0, 0, 0, 0]),
        (SamrRemoveMemberFromGroupRequest::new(group, 1).into(), vec![0, 0, 0, 0]),
        (SamrDeleteUserRequest::new(user).into(), with_handle),
    ]
}

#[test]
fn test_every_prefix_underflows() {
    init_logging();

    for (request, stub) in fixed_layout_cases() {
        assert!(request.decode_response(&stub).is_ok(), "{}", request.name());

        for len in 0..stub.len() {
            match request.decode_response(&stub[..len]) {
                Err(NdrError::BufferUnderflow { needed, have }) => {
                    assert!(have < needed, "{} at {}", request.name(), len);
                }
                other => panic!("{} truncated to {} bytes decoded as {:?}", request.name(), len, other),
            }
        }
    }
}

#[test]
fn test_trailing_bytes_rejected() {
    for (request, mut stub) in fixed_layout_cases() {
        stub.push(0xEE);
        assert!(
            matches!(request.decode_response(&stub), Err(NdrError::TrailingData { remaining: 1 })),
            "{}",
            request.name()
        );
    }
}

#[test]
fn test_query_information_needs_status() {
    let request: SamrRequest =
        SamrQueryInformationUserRequest::user_all_information(UserHandle::from_bytes(sequential_handle())).into();

    for len in 0..4 {
        assert!(matches!(
            request.decode_response(&vec![0u8; len]),
            Err(NdrError::BufferUnderflow { needed: 4, .. })
        ));
    }

    // Anything before the status belongs to the opaque buffer
    let stub = [0x00, 0x00, 0x02, 0x00, 0x15, 0x00, 0x00, 0x00, 0x22, 0x00, 0x00, 0xC0];
    match request.decode_response(&stub).unwrap() {
        SamrResponse::QueryInformationUser(response) => {
            assert_eq!(response.buffer.len(), 8);
            assert_eq!(response.return_value, ntstatus::STATUS_ACCESS_DENIED);
        }
        other => panic!("unexpected response {:?}", other),
    }
}

#[test]
fn test_truncated_response_pdu() {
    let stub = SamrCloseHandleRequest::new(UserHandle::from_bytes(sequential_handle()))
        .to_stub()
        .unwrap();
    let wire = ResponsePdu::new(3, Bytes::from(stub.to_vec())).encode().unwrap();

    assert!(Pdu::decode(&wire).is_ok());
    for len in 0..wire.len() {
        assert!(
            matches!(
                Pdu::decode(&wire[..len]),
                Err(RpcError::Ndr(_)) | Err(RpcError::InvalidPduData(_))
            ),
            "PDU truncated to {} bytes decoded",
            len
        );
    }
}
