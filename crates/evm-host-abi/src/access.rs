//! Cold/warm access classification for addresses and storage slots
//! (EIP-2929).

#[cfg(feature = "std")]
use std::collections::HashSet;

#[cfg(feature = "std")]
use crate::{Address, Bytes32};

/// Whether an address or storage slot is touched for the first time within
/// the current transaction.
///
/// Monotonic per transaction: once warm, never cold again until the host
/// resets its tracking at the transaction boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AccessStatus {
    /// First touch this transaction; charged the cold access cost.
    Cold = 0,
    /// Already touched this transaction.
    Warm = 1,
}

/// Transaction-scoped tracking of warmed addresses and storage slots.
///
/// One tracker per in-flight transaction; the sets must not be shared across
/// transactions executing concurrently.
#[cfg(feature = "std")]
#[derive(Clone, Debug, Default)]
pub struct AccessTracker {
    warm_accounts: HashSet<Address>,
    warm_slots: HashSet<(Address, Bytes32)>,
}

#[cfg(feature = "std")]
impl AccessTracker {
    /// Creates a tracker with nothing warmed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the prior status of `address` and marks it warm.
    pub fn access_account(&mut self, address: &Address) -> AccessStatus {
        if self.warm_accounts.insert(*address) {
            AccessStatus::Cold
        } else {
            AccessStatus::Warm
        }
    }

    /// Returns the prior status of the `(address, key)` slot and marks it
    /// warm.
    pub fn access_storage(&mut self, address: &Address, key: &Bytes32) -> AccessStatus {
        if self.warm_slots.insert((*address, *key)) {
            AccessStatus::Cold
        } else {
            AccessStatus::Warm
        }
    }

    /// Pre-warms `address` without reporting an access, for the entries that
    /// start a transaction warm (sender, recipient, precompiles, access-list
    /// entries).
    pub fn warm_account(&mut self, address: Address) {
        self.warm_accounts.insert(address);
    }

    /// Pre-warms a storage slot without reporting an access.
    pub fn warm_slot(&mut self, address: Address, key: Bytes32) {
        self.warm_slots.insert((address, key));
    }

    /// Whether `address` is already warm.
    pub fn is_warm_account(&self, address: &Address) -> bool {
        self.warm_accounts.contains(address)
    }

    /// Whether the `(address, key)` slot is already warm.
    pub fn is_warm_slot(&self, address: &Address, key: &Bytes32) -> bool {
        self.warm_slots.contains(&(*address, *key))
    }

    /// Forgets all warmed entries, to be called at the transaction boundary.
    pub fn reset(&mut self) {
        self.warm_accounts.clear();
        self.warm_slots.clear();
    }
}
