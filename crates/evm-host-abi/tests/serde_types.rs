//! Serde round-trips for the plain-data boundary types.

use evm_host_abi::{
    AccessStatus, Address, Bytes32, CallKind, StatusCode, StorageStatus, TxContext, Uint256Be,
};

#[test]
fn tx_context_round_trips() {
    let ctx = TxContext {
        tx_gas_price: Uint256Be::from_u64(30_000_000_000),
        tx_origin: Address::from_u64(0xa),
        block_coinbase: Address::from_u64(0xb),
        block_number: 19_000_000,
        block_timestamp: 1_700_000_000,
        block_gas_limit: 30_000_000,
        block_prev_randao: Bytes32::from_u64(0xd),
        chain_id: Uint256Be::from_u64(1),
        block_base_fee: Uint256Be::from_u64(7),
    };
    let json = serde_json::to_string(&ctx).unwrap();
    let back: TxContext = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ctx);
}

#[test]
fn enums_round_trip() {
    for status in [
        StatusCode::Success,
        StatusCode::Revert,
        StatusCode::CallDepthExceeded,
        StatusCode::InternalError,
        StatusCode::OutOfMemory,
    ] {
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(serde_json::from_str::<StatusCode>(&json).unwrap(), status);
    }
    for storage in [
        StorageStatus::Unchanged,
        StorageStatus::Modified,
        StorageStatus::ModifiedAgain,
        StorageStatus::Added,
        StorageStatus::Deleted,
    ] {
        let json = serde_json::to_string(&storage).unwrap();
        assert_eq!(serde_json::from_str::<StorageStatus>(&json).unwrap(), storage);
    }
    for access in [AccessStatus::Cold, AccessStatus::Warm] {
        let json = serde_json::to_string(&access).unwrap();
        assert_eq!(serde_json::from_str::<AccessStatus>(&json).unwrap(), access);
    }
    for kind in [CallKind::Call, CallKind::DelegateCall, CallKind::Create2] {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(serde_json::from_str::<CallKind>(&json).unwrap(), kind);
    }
}
