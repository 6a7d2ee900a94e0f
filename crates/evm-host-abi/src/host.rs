//! The capability set the VM depends on to read and mutate blockchain state.

use auto_impl::auto_impl;

use crate::{
    AccessStatus, Address, Bytes32, ExecutionResult, Message, StorageStatus, Uint256Be,
};

/// A read-only snapshot of transaction- and block-level parameters, owned by
/// the host and handed to the VM by value. Immutable for the lifetime of one
/// transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxContext {
    /// The effective gas price of the transaction.
    pub tx_gas_price: Uint256Be,
    /// The externally owned account that signed the transaction.
    pub tx_origin: Address,
    /// The beneficiary of the block's fees (COINBASE).
    pub block_coinbase: Address,
    /// The block number.
    pub block_number: i64,
    /// The block timestamp.
    pub block_timestamp: i64,
    /// The block gas limit.
    pub block_gas_limit: i64,
    /// The previous block's RANDAO mix (EIP-4399).
    pub block_prev_randao: Bytes32,
    /// The chain id.
    pub chain_id: Uint256Be,
    /// The block base fee per gas (EIP-1559, EIP-3198).
    pub block_base_fee: Uint256Be,
}

/// The state capabilities a host provides to the VM.
///
/// The VM is written generically against this trait and owns no blockchain
/// state of its own. Every method is synchronous and infallible at this
/// boundary: a host backed by network or disk state applies its own timeout
/// policy internally, and faults it cannot absorb are folded into the result
/// of [`call`](Self::call) through the negative
/// [`StatusCode`](crate::StatusCode)s rather than surfacing as a separate
/// error channel.
///
/// The hot-path queries (`get_storage`, `access_storage`) run once per
/// relevant opcode, so implementations should answer them without
/// per-call allocation.
#[auto_impl(&mut, Box)]
pub trait Host {
    /// Whether an account exists. Pure query, no side effect.
    fn account_exists(&self, address: &Address) -> bool;

    /// Reads one 32-byte storage slot, zero if never written.
    fn get_storage(&self, address: &Address, key: &Bytes32) -> Bytes32;

    /// Writes one 32-byte storage slot and classifies the write against the
    /// slot history the host alone tracks (see
    /// [`StorageStatus::classify`]). Gas-refund side effects derived from
    /// the status are the host's internal business.
    fn set_storage(&mut self, address: &Address, key: &Bytes32, value: &Bytes32)
        -> StorageStatus;

    /// The balance of an account in wei.
    fn get_balance(&self, address: &Address) -> Uint256Be;

    /// The size of an account's code.
    fn get_code_size(&self, address: &Address) -> usize;

    /// The hash of an account's code.
    fn get_code_hash(&self, address: &Address) -> Bytes32;

    /// Copies account code starting at `code_offset` into `buffer`, never
    /// writing past its end, and returns the number of bytes copied
    /// (`<= buffer.len()`).
    fn copy_code(&self, address: &Address, code_offset: usize, buffer: &mut [u8]) -> usize;

    /// Marks `address` for destruction, transferring its balance to
    /// `beneficiary`. Whether destruction takes effect immediately or at the
    /// end of the transaction follows chain semantics and is the host's
    /// responsibility.
    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address);

    /// Executes a nested message synchronously, on the same logical thread,
    /// re-entering the VM or dispatching to a precompile, and returns the
    /// owned result. Must enforce
    /// [`CALL_DEPTH_LIMIT`](crate::constants::CALL_DEPTH_LIMIT), answering
    /// [`StatusCode::CallDepthExceeded`](crate::StatusCode) instead of
    /// recursing unboundedly.
    fn call(&mut self, msg: &Message<'_>) -> ExecutionResult;

    /// The transaction context snapshot.
    fn get_tx_context(&self) -> TxContext;

    /// The hash of a historical block, or zero when unavailable or out of
    /// range.
    fn get_block_hash(&self, block_number: i64) -> Bytes32;

    /// Records a log with up to
    /// [`MAX_LOG_TOPICS`](crate::constants::MAX_LOG_TOPICS) topics.
    /// Append-only, ordered, never fails.
    fn emit_log(&mut self, address: &Address, data: &[u8], topics: &[Bytes32]);

    /// Returns whether `address` was cold before this access and marks it
    /// warm for the rest of the transaction.
    fn access_account(&mut self, address: &Address) -> AccessStatus;

    /// Returns whether the `(address, key)` slot was cold before this access
    /// and marks it warm for the rest of the transaction.
    fn access_storage(&mut self, address: &Address, key: &Bytes32) -> AccessStatus;
}
