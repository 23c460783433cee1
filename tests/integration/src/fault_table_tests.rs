//! Fault Table Tests
//!
//! Classification of fault and reject status codes.

mod common;

use std::collections::HashSet;

use common::*;
use dcerpc::{FaultCode, FaultPdu, Pdu};

#[test]
fn test_known_and_unknown_codes() {
    init_logging();

    assert_eq!(FaultCode::from_value(0x0000_06F7), FaultCode::NcaSFaultNdr);
    assert_eq!(FaultCode::from_value(0xFFFF_FFFF), FaultCode::Unknown);
    assert_eq!(FaultCode::from_value(0x1C01_0002), FaultCode::NcaOpRngError);
    assert_eq!(FaultCode::from_value(0x8007_06D1), FaultCode::RpcSProcnumOutOfRange);
}

#[test]
fn test_table_is_a_bijection() {
    let values: HashSet<u32> = FaultCode::ALL.iter().map(FaultCode::value).collect();
    assert_eq!(values.len(), FaultCode::ALL.len());

    let symbols: HashSet<&str> = FaultCode::ALL.iter().map(FaultCode::symbol).collect();
    assert_eq!(symbols.len(), FaultCode::ALL.len());

    for code in FaultCode::ALL {
        assert_eq!(FaultCode::from_value(code.value()), *code);
        assert_eq!(code.to_string(), code.symbol().to_lowercase());
    }
}

#[test]
fn test_lookup_is_total() {
    let known: HashSet<u32> = FaultCode::ALL.iter().map(FaultCode::value).collect();

    // Walk a spread of values with a simple LCG
    let mut value: u32 = 0x1234_5678;
    for _ in 0..100_000 {
        value = value.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let code = FaultCode::from_value(value);
        if known.contains(&value) {
            assert_eq!(code.value(), value);
        } else {
            assert!(code.is_unknown(), "0x{:08x} classified as {}", value, code);
        }
    }
}

#[test]
fn test_reject_body() {
    assert_eq!(
        FaultCode::from_reject_body(&[0x03, 0x00, 0x01, 0x1C][..]).unwrap(),
        FaultCode::NcaUnkIf
    );
    assert_eq!(
        FaultCode::from_reject_body(&[0xEF, 0xBE, 0xAD, 0xDE][..]).unwrap(),
        FaultCode::Unknown
    );
    assert!(FaultCode::from_reject_body(&[0x03, 0x00, 0x01][..]).is_err());
}

#[test]
fn test_fault_pdu_status_is_classified() {
    for code in [FaultCode::NcaSFaultNdr, FaultCode::EInvalidArg, FaultCode::NcaUnkIf] {
        let wire = FaultPdu::new(9, code.value()).encode().unwrap();
        match Pdu::decode(&wire).unwrap() {
            Pdu::Fault(fault) => {
                assert_eq!(fault.header.call_id, 9);
                assert_eq!(fault.fault_code(), code);
            }
            other => panic!("expected fault PDU, got {:?}", other),
        }
    }
}
