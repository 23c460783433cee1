//! Client Flow Tests
//!
//! Full calls through `SamrClient` against an in-memory SAM peer: status
//! codes come back as data, faults come back as errors, and handles are
//! echoed unmodified.

mod common;

use std::sync::Arc;

use common::*;
use dcerpc::{FaultCode, RpcError, RpcResponse};
use mssamr::*;

const ALICE: [u8; 20] = [0xA1; 20];
const ADMINS: [u8; 20] = [0xD0; 20];

#[tokio::test]
async fn test_group_membership_lifecycle() {
    init_logging();

    let (client, server) = start_sam(SamState::default().with_group(ADMINS, &[500]));
    let group = GroupHandle::from_bytes(ADMINS);

    let added = client
        .add_member_to_group(&group, 1105, attributes::DEFAULT)
        .await
        .unwrap();
    assert_eq!(added.return_value, ntstatus::STATUS_SUCCESS);

    let again = client
        .add_member_to_group(&group, 1105, attributes::DEFAULT)
        .await
        .unwrap();
    assert_eq!(again.return_value, ntstatus::STATUS_MEMBER_IN_GROUP);

    let removed = client.remove_member_from_group(&group, 1105).await.unwrap();
    assert_eq!(removed.return_value, ntstatus::STATUS_SUCCESS);

    let missing = client.remove_member_from_group(&group, 1105).await.unwrap();
    assert_eq!(missing.return_value, ntstatus::STATUS_MEMBER_NOT_IN_GROUP);

    let closed = client.close_handle(group).await.unwrap();
    assert!(closed.handle.is_nil());
    assert_eq!(closed.return_value, ntstatus::STATUS_SUCCESS);

    drop(client);
    let state = server.await.unwrap();
    assert!(state.groups.is_empty());
    assert_eq!(
        state.calls,
        vec![
            opnum::ADD_MEMBER_TO_GROUP,
            opnum::ADD_MEMBER_TO_GROUP,
            opnum::REMOVE_MEMBER_FROM_GROUP,
            opnum::REMOVE_MEMBER_FROM_GROUP,
            opnum::CLOSE_HANDLE,
        ]
    );
}

#[tokio::test]
async fn test_query_then_delete_user() {
    init_logging();

    let (client, server) = start_sam(SamState::default().with_user(ALICE, 1105));
    let user = UserHandle::from_bytes(ALICE);

    let info = client
        .query_information_user(&user, UserInformationClass::UserAllInformation)
        .await
        .unwrap();
    assert_eq!(info.return_value, ntstatus::STATUS_SUCCESS);
    assert!(!info.is_null_buffer());
    assert_eq!(&info.buffer[..4], &REFERENT_ID.to_le_bytes());
    assert_eq!(&info.buffer[4..6], &21u16.to_le_bytes());
    assert_eq!(&info.buffer[8..], &1105u32.to_le_bytes());

    let deleted = client.delete_user(user).await.unwrap();
    assert_eq!(deleted.return_value, ntstatus::STATUS_SUCCESS);
    assert!(deleted.user_handle.is_nil());

    // The handle died with the account
    let stale = client
        .query_information_user(&user, UserInformationClass::UserGeneralInformation)
        .await
        .unwrap();
    assert_eq!(stale.return_value, ntstatus::STATUS_INVALID_HANDLE);
    assert!(stale.is_null_buffer());

    drop(client);
    let state = server.await.unwrap();
    assert!(state.users.is_empty());
}

#[tokio::test]
async fn test_execute_and_check() {
    init_logging();

    let (client, server) = start_sam(SamState::default().with_user(ALICE, 1105));

    let response = client
        .execute(SamrDeleteUserRequest::new(UserHandle::from_bytes([0x99; 20])))
        .await
        .unwrap();
    match &response {
        SamrResponse::DeleteUser(delete) => assert_eq!(delete.user_handle.as_bytes(), &[0x99; 20]),
        other => panic!("unexpected response {:?}", other),
    }
    match response.check() {
        Err(SamrError::Status { operation, status }) => {
            assert_eq!(operation, "SamrDeleteUser");
            assert_eq!(status, ntstatus::STATUS_INVALID_HANDLE);
        }
        other => panic!("expected status error, got {:?}", other),
    }

    let response = client
        .execute(SamrCloseHandleRequest::new(UserHandle::from_bytes(ALICE)))
        .await
        .unwrap()
        .check()
        .unwrap();
    assert_eq!(response.opnum(), opnum::CLOSE_HANDLE);

    drop(client);
    server.await.unwrap();
}

#[tokio::test]
async fn test_malformed_stub_faults() {
    init_logging();

    let (client, server) = start_sam(SamState::default());

    // A group request whose stub is one byte short of the handle
    let err = client
        .rpc_client()
        .call(opnum::ADD_MEMBER_TO_GROUP, bytes::Bytes::from(vec![0u8; 19]))
        .await
        .unwrap_err();
    assert_eq!(err.fault_code(), Some(FaultCode::NcaSFaultNdr));

    // An opnum outside the served range
    let err = client
        .rpc_client()
        .call(99, bytes::Bytes::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RpcError::Fault {
            code: FaultCode::NcaOpRngError,
            status: 0x1C01_0002
        }
    ));

    drop(client);
    server.await.unwrap();
}

#[tokio::test]
async fn test_unknown_class_is_status() {
    init_logging();

    let (client, server) = start_sam(SamState::default().with_user(ALICE, 500));

    // Class 22 is a gap in the USER_INFORMATION_CLASS numbering
    let stub = {
        let mut stub = ALICE.to_vec();
        stub.extend_from_slice(&22u16.to_le_bytes());
        bytes::Bytes::from(stub)
    };
    let reply = client
        .rpc_client()
        .call(opnum::QUERY_INFORMATION_USER, stub)
        .await
        .unwrap();
    let response = SamrQueryInformationUserResponse::from_stub(&reply).unwrap();
    assert_eq!(response.return_value, ntstatus::STATUS_INVALID_INFO_CLASS);

    drop(client);
    server.await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_one_connection() {
    init_logging();

    const CALLERS: u32 = 16;

    let (client, server) = start_sam(SamState::default().with_group(ADMINS, &[]));
    let client = Arc::new(client);

    let mut tasks = Vec::new();
    for rid in 0..CALLERS {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client
                .add_member_to_group(&GroupHandle::from_bytes(ADMINS), 1000 + rid, attributes::DEFAULT)
                .await
                .unwrap()
                .return_value
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), ntstatus::STATUS_SUCCESS);
    }

    drop(client);
    let state = server.await.unwrap();
    let members = &state.groups[&ADMINS];
    assert_eq!(members.len(), CALLERS as usize);
    assert!((1000..1000 + CALLERS).all(|rid| members.contains(&rid)));
}

#[tokio::test]
async fn test_oversized_request_is_refused_locally() {
    init_logging();

    let builder = SamrClientBuilder::new().max_xmit_frag(40);
    let (client, server) = start_sam_with(builder, SamState::default().with_user(ALICE, 1));

    // 16 header + 8 request body + 22 stub = 46 bytes
    let err = client
        .query_information_user(&UserHandle::from_bytes(ALICE), UserInformationClass::UserAllInformation)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SamrError::Rpc(RpcError::PduTooLarge { size: 46, max: 40 })
    ));

    drop(client);
    let state = server.await.unwrap();
    assert!(state.calls.is_empty());
}
