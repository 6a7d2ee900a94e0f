use core::cell::RefCell;
use core::fmt;
use std::collections::HashMap;

use delegate::delegate;

use crate::{
    constants::{CALL_DEPTH_LIMIT, MAX_LOG_TOPICS},
    AccessStatus, AccessTracker, Address, Bytes32, ExecutionResult, Host, Message, StatusCode,
    StorageSlot, StorageStatus, TxContext, Uint256Be,
};

/// One account of the in-memory world state.
#[derive(Clone, Debug, Default)]
struct Account {
    balance: Uint256Be,
    code: Vec<u8>,
    code_hash: Bytes32,
    storage: HashMap<Bytes32, StorageSlot>,
}

/// A log record captured by [`MemoryHost::emit_log`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    /// The emitting account.
    pub address: Address,
    /// The opaque log payload.
    pub data: Vec<u8>,
    /// The indexed topics, at most four.
    pub topics: Vec<Bytes32>,
}

/// Handler a test installs to answer nested calls, simulating a VM re-entry
/// or a precompile. Receives the host itself and stays installed while it
/// runs, so the handler can re-enter [`Host::call`] reentrantly.
pub type CallHandler = fn(&mut MemoryHost, &Message<'_>) -> ExecutionResult;

/// An in-memory [`Host`] for tests, with builder-style state setup.
pub struct MemoryHost {
    accounts: HashMap<Address, Account>,
    block_hashes: HashMap<i64, Bytes32>,
    tx_context: TxContext,
    access: AccessTracker,
    logs: Vec<LogRecord>,
    selfdestructs: Vec<(Address, Address)>,
    depth_limit: i32,
    call_handler: Option<CallHandler>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            block_hashes: HashMap::new(),
            tx_context: TxContext::default(),
            access: AccessTracker::new(),
            logs: Vec::new(),
            selfdestructs: Vec::new(),
            depth_limit: CALL_DEPTH_LIMIT,
            call_handler: None,
        }
    }
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHost")
            .field("accounts", &self.accounts.len())
            .field("logs", &self.logs.len())
            .field("depth_limit", &self.depth_limit)
            .finish_non_exhaustive()
    }
}

impl MemoryHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the balance of an account.
    pub fn set_account_balance(&mut self, address: Address, balance: Uint256Be) {
        self.accounts.entry(address).or_default().balance = balance;
    }

    /// Sets the balance of an account.
    pub fn account_balance(mut self, address: Address, balance: Uint256Be) -> Self {
        self.set_account_balance(address, balance);
        self
    }

    /// Sets the code of an account.
    pub fn set_account_code(&mut self, address: Address, code: impl Into<Vec<u8>>) {
        self.accounts.entry(address).or_default().code = code.into();
    }

    /// Sets the code of an account.
    pub fn account_code(mut self, address: Address, code: impl Into<Vec<u8>>) -> Self {
        self.set_account_code(address, code);
        self
    }

    /// Sets the code hash of an account. Hashing itself is outside this
    /// crate, so tests pick the value.
    pub fn set_account_code_hash(&mut self, address: Address, hash: Bytes32) {
        self.accounts.entry(address).or_default().code_hash = hash;
    }

    /// Sets the code hash of an account.
    pub fn account_code_hash(mut self, address: Address, hash: Bytes32) -> Self {
        self.set_account_code_hash(address, hash);
        self
    }

    /// Sets a storage slot, as committed state (original == current).
    pub fn set_account_storage(&mut self, address: Address, key: Bytes32, value: Bytes32) {
        self.accounts
            .entry(address)
            .or_default()
            .storage
            .insert(key, StorageSlot::new(value));
    }

    /// Sets a storage slot, as committed state (original == current).
    pub fn account_storage(mut self, address: Address, key: Bytes32, value: Bytes32) -> Self {
        self.set_account_storage(address, key, value);
        self
    }

    /// Sets the hash answered for a historical block number.
    pub fn set_block_hash(&mut self, number: i64, hash: Bytes32) {
        self.block_hashes.insert(number, hash);
    }

    /// Sets the transaction context.
    pub fn with_tx_context(mut self, tx_context: TxContext) -> Self {
        self.tx_context = tx_context;
        self
    }

    /// Overrides the call-depth limit, for tests that exercise the limit
    /// without building 1024 frames.
    pub fn with_depth_limit(mut self, depth_limit: i32) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Installs the handler answering nested calls.
    pub fn with_call_handler(mut self, handler: CallHandler) -> Self {
        self.call_handler = Some(handler);
        self
    }

    /// The logs recorded so far, in emission order.
    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    /// The selfdestructs recorded so far, as `(destroyed, beneficiary)`.
    pub fn selfdestructs(&self) -> &[(Address, Address)] {
        &self.selfdestructs
    }

    /// The access tracker, for pre-warming and assertions.
    pub fn access_tracker_mut(&mut self) -> &mut AccessTracker {
        &mut self.access
    }

    /// Moves to the next transaction: forgets warmed entries and re-bases
    /// every storage slot so current values become original values.
    pub fn begin_transaction(&mut self) {
        self.access.reset();
        for account in self.accounts.values_mut() {
            for slot in account.storage.values_mut() {
                slot.rebase();
            }
        }
    }
}

/// Big-endian wrapping addition, for the balance transfer in
/// [`Host::selfdestruct`].
fn wrapping_add_be(a: &Uint256Be, b: &Uint256Be) -> Uint256Be {
    let mut out = [0u8; 32];
    let mut carry = 0u16;
    for i in (0..32).rev() {
        let sum = u16::from(a.0[i]) + u16::from(b.0[i]) + carry;
        out[i] = (sum & 0xff) as u8;
        carry = sum >> 8;
    }
    Uint256Be::new(out)
}

impl Host for MemoryHost {
    fn account_exists(&self, address: &Address) -> bool {
        self.accounts.contains_key(address)
    }

    fn get_storage(&self, address: &Address, key: &Bytes32) -> Bytes32 {
        self.accounts
            .get(address)
            .and_then(|account| account.storage.get(key))
            .map_or(Bytes32::ZERO, |slot| slot.current)
    }

    fn set_storage(
        &mut self,
        address: &Address,
        key: &Bytes32,
        value: &Bytes32,
    ) -> StorageStatus {
        self.accounts
            .entry(*address)
            .or_default()
            .storage
            .entry(*key)
            .or_insert_with(|| StorageSlot::new(Bytes32::ZERO))
            .store(*value)
    }

    fn get_balance(&self, address: &Address) -> Uint256Be {
        self.accounts.get(address).map_or(Uint256Be::ZERO, |account| account.balance)
    }

    fn get_code_size(&self, address: &Address) -> usize {
        self.accounts.get(address).map_or(0, |account| account.code.len())
    }

    fn get_code_hash(&self, address: &Address) -> Bytes32 {
        self.accounts.get(address).map_or(Bytes32::ZERO, |account| account.code_hash)
    }

    fn copy_code(&self, address: &Address, code_offset: usize, buffer: &mut [u8]) -> usize {
        let Some(account) = self.accounts.get(address) else { return 0 };
        let Some(remaining) = account.code.len().checked_sub(code_offset) else { return 0 };
        let count = remaining.min(buffer.len());
        buffer[..count].copy_from_slice(&account.code[code_offset..code_offset + count]);
        count
    }

    fn selfdestruct(&mut self, address: &Address, beneficiary: &Address) {
        let balance = match self.accounts.get_mut(address) {
            Some(account) => core::mem::take(&mut account.balance),
            None => Uint256Be::ZERO,
        };
        let target = self.accounts.entry(*beneficiary).or_default();
        target.balance = wrapping_add_be(&target.balance, &balance);
        // Destruction itself is deferred to the end of the transaction; the
        // record is what tests assert on.
        self.selfdestructs.push((*address, *beneficiary));
    }

    fn call(&mut self, msg: &Message<'_>) -> ExecutionResult {
        if msg.depth >= self.depth_limit {
            return ExecutionResult::failure(StatusCode::CallDepthExceeded);
        }
        match self.call_handler {
            Some(handler) => handler(self, msg),
            // No VM wired in: succeed, echoing the frame's gas back.
            None => ExecutionResult::success(msg.gas, crate::Output::Empty),
        }
    }

    fn get_tx_context(&self) -> TxContext {
        self.tx_context
    }

    fn get_block_hash(&self, block_number: i64) -> Bytes32 {
        self.block_hashes.get(&block_number).copied().unwrap_or(Bytes32::ZERO)
    }

    fn emit_log(&mut self, address: &Address, data: &[u8], topics: &[Bytes32]) {
        debug_assert!(topics.len() <= MAX_LOG_TOPICS);
        self.logs.push(LogRecord {
            address: *address,
            data: data.to_vec(),
            topics: topics.to_vec(),
        });
    }

    fn access_account(&mut self, address: &Address) -> AccessStatus {
        self.access.access_account(address)
    }

    fn access_storage(&mut self, address: &Address, key: &Bytes32) -> AccessStatus {
        self.access.access_storage(address, key)
    }
}

/// Invocation counts of the hot-path host operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostCallCounts {
    /// `get_storage` invocations.
    pub storage_reads: usize,
    /// `set_storage` invocations.
    pub storage_writes: usize,
    /// `access_account` invocations.
    pub account_accesses: usize,
    /// `access_storage` invocations.
    pub storage_accesses: usize,
    /// `call` invocations.
    pub calls: usize,
}

/// A pass-through [`Host`] wrapper counting hot-path invocations.
#[derive(Debug)]
pub struct CountingHost<H> {
    inner: H,
    counts: RefCell<HostCallCounts>,
}

impl<H: Host> CountingHost<H> {
    /// Wraps `inner` with zeroed counters.
    pub fn new(inner: H) -> Self {
        Self { inner, counts: RefCell::new(HostCallCounts::default()) }
    }

    /// The counts recorded so far.
    pub fn counts(&self) -> HostCallCounts {
        *self.counts.borrow()
    }

    /// The wrapped host.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Unwraps the inner host.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: Host> Host for CountingHost<H> {
    delegate! {
        to self.inner {
            fn account_exists(&self, address: &Address) -> bool;
            fn get_balance(&self, address: &Address) -> Uint256Be;
            fn get_code_size(&self, address: &Address) -> usize;
            fn get_code_hash(&self, address: &Address) -> Bytes32;
            fn copy_code(&self, address: &Address, code_offset: usize, buffer: &mut [u8]) -> usize;
            fn selfdestruct(&mut self, address: &Address, beneficiary: &Address);
            fn get_tx_context(&self) -> TxContext;
            fn get_block_hash(&self, block_number: i64) -> Bytes32;
            fn emit_log(&mut self, address: &Address, data: &[u8], topics: &[Bytes32]);
        }
    }

    fn get_storage(&self, address: &Address, key: &Bytes32) -> Bytes32 {
        self.counts.borrow_mut().storage_reads += 1;
        self.inner.get_storage(address, key)
    }

    fn set_storage(
        &mut self,
        address: &Address,
        key: &Bytes32,
        value: &Bytes32,
    ) -> StorageStatus {
        self.counts.borrow_mut().storage_writes += 1;
        self.inner.set_storage(address, key, value)
    }

    fn call(&mut self, msg: &Message<'_>) -> ExecutionResult {
        self.counts.borrow_mut().calls += 1;
        self.inner.call(msg)
    }

    fn access_account(&mut self, address: &Address) -> AccessStatus {
        self.counts.borrow_mut().account_accesses += 1;
        self.inner.access_account(address)
    }

    fn access_storage(&mut self, address: &Address, key: &Bytes32) -> AccessStatus {
        self.counts.borrow_mut().storage_accesses += 1;
        self.inner.access_storage(address, key)
    }
}
