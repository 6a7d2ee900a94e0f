//! Tests driving a toy engine through the [`Vm`] entry seam, to check that
//! the boundary types compose: host queries, static-mode policing, gas
//! exhaustion and owned outputs all flow through the trait surface.

use evm_host_abi::{
    Address, Bytes32, CallKind, ExecutionResult, Host, Message, MessageFlags, Output, StatusCode,
    Vm,
};
use evm_host_abi::test_utils::MemoryHost;

/// A single-instruction engine: byte 0x54 loads the slot named by the low
/// bytes of the input key and returns it, byte 0x55 stores the message value
/// into that slot. Charges a flat 100 gas.
struct OneShotVm;

const FLAT_COST: i64 = 100;

impl Vm for OneShotVm {
    fn execute(&self, host: &mut dyn Host, msg: &Message<'_>, code: &[u8]) -> ExecutionResult {
        if msg.gas < FLAT_COST {
            return ExecutionResult::failure(StatusCode::OutOfGas);
        }
        let gas_left = msg.gas - FLAT_COST;
        let key = Bytes32::new(msg.input.try_into().unwrap_or([0u8; 32]));
        match code.first() {
            Some(0x54) => {
                host.access_storage(&msg.recipient, &key);
                let value = host.get_storage(&msg.recipient, &key);
                ExecutionResult::from_owned(StatusCode::Success, gas_left, value.0.to_vec())
            }
            Some(0x55) => {
                if msg.is_static() {
                    return ExecutionResult::failure(StatusCode::StaticModeViolation);
                }
                host.access_storage(&msg.recipient, &key);
                host.set_storage(&msg.recipient, &key, &msg.value);
                ExecutionResult::success(gas_left, Output::Empty)
            }
            _ => ExecutionResult::failure(StatusCode::UndefinedInstruction),
        }
    }
}

fn message(gas: i64, flags: MessageFlags, input: &[u8], value: Bytes32) -> Message<'_> {
    Message {
        kind: CallKind::Call,
        flags,
        depth: 0,
        gas,
        recipient: Address::from_u64(0x1001),
        sender: Address::from_u64(0x1000),
        input,
        value,
        create2_salt: Bytes32::ZERO,
        code_address: Address::from_u64(0x1001),
    }
}

#[test]
fn store_then_load_round_trips_through_the_host() {
    let mut host = MemoryHost::new();
    let vm = OneShotVm;
    let key = Bytes32::from_u64(3);

    let store = vm.execute(
        &mut host,
        &message(1_000, MessageFlags::empty(), key.as_slice(), Bytes32::from_u64(77)),
        &[0x55],
    );
    assert_eq!(store.status_code, StatusCode::Success);
    assert_eq!(store.gas_left, 900);

    let load = vm.execute(
        &mut host,
        &message(1_000, MessageFlags::empty(), key.as_slice(), Bytes32::ZERO),
        &[0x54],
    );
    assert_eq!(load.status_code, StatusCode::Success);
    assert_eq!(load.output(), Bytes32::from_u64(77).as_slice());
}

#[test]
fn static_frames_cannot_write() {
    let mut host = MemoryHost::new();
    let key = Bytes32::from_u64(3);
    let result = OneShotVm.execute(
        &mut host,
        &message(1_000, MessageFlags::STATIC, key.as_slice(), Bytes32::from_u64(1)),
        &[0x55],
    );
    assert_eq!(result.status_code, StatusCode::StaticModeViolation);
    assert_eq!(result.gas_refundable(), 0);
    // The write never happened.
    assert_eq!(host.get_storage(&Address::from_u64(0x1001), &key), Bytes32::ZERO);
}

#[test]
fn gas_exhaustion_fails_fast_and_forfeits() {
    let mut host = MemoryHost::new();
    let result = OneShotVm.execute(
        &mut host,
        &message(FLAT_COST - 1, MessageFlags::empty(), &[], Bytes32::ZERO),
        &[0x54],
    );
    assert_eq!(result.status_code, StatusCode::OutOfGas);
    assert_eq!(result.gas_left, 0);
    assert_eq!(result.gas_refundable(), 0);
}

#[test]
fn unknown_code_is_an_ordinary_outcome_not_a_process_failure() {
    let mut host = MemoryHost::new();
    let result = OneShotVm.execute(
        &mut host,
        &message(1_000, MessageFlags::empty(), &[], Bytes32::ZERO),
        &[0xf9],
    );
    assert_eq!(result.status_code, StatusCode::UndefinedInstruction);
    assert!(!result.status_code.is_internal());
}
