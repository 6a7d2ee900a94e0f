//! Classification of storage writes for gas cost and refund accounting.

use crate::Bytes32;

/// The effect of a storage write relative to the slot's pre-transaction
/// (*original*) and pre-write (*current*) values.
///
/// The classification is keyed by values, not by the write operation alone:
/// only the host knows the original value, so the VM calls
/// [`Host::set_storage`](crate::Host::set_storage) and trusts the returned
/// status. Getting this wrong is a consensus bug, since SSTORE gas and
/// refunds (EIP-2200/3529) are derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum StorageStatus {
    /// The write is a no-op: the new value equals the current value.
    Unchanged = 0,
    /// First change of the slot this transaction, non-zero to non-zero.
    Modified = 1,
    /// Any further change to a slot already dirtied this transaction,
    /// including changes back toward the original value.
    ModifiedAgain = 2,
    /// First change of the slot this transaction, zero to non-zero.
    Added = 3,
    /// First change of the slot this transaction, non-zero to zero.
    Deleted = 4,
}

impl StorageStatus {
    /// Classifies writing `new_value` to a slot whose committed value at the
    /// start of the transaction was `original` and whose value before this
    /// write is `current`.
    ///
    /// Total over all inputs. Once `current != original`, every non-no-op
    /// write is [`Self::ModifiedAgain`]; equality of `new_value` with the
    /// original is deliberately irrelevant at that point.
    pub fn classify(original: &Bytes32, current: &Bytes32, new_value: &Bytes32) -> Self {
        if new_value == current {
            return Self::Unchanged;
        }
        if current != original {
            return Self::ModifiedAgain;
        }
        if original.is_zero() && !new_value.is_zero() {
            Self::Added
        } else if new_value.is_zero() {
            Self::Deleted
        } else {
            Self::Modified
        }
    }
}

/// Per-transaction bookkeeping for one storage slot, as a host tracks it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageSlot {
    /// The committed value at the start of the transaction.
    pub original: Bytes32,
    /// The value as of the latest write this transaction.
    pub current: Bytes32,
}

impl StorageSlot {
    /// A slot whose committed and current values are both `value`, the state
    /// every slot is in when a transaction begins.
    pub const fn new(value: Bytes32) -> Self {
        Self { original: value, current: value }
    }

    /// Classifies and commits a write.
    pub fn store(&mut self, new_value: Bytes32) -> StorageStatus {
        let status = StorageStatus::classify(&self.original, &self.current, &new_value);
        self.current = new_value;
        status
    }

    /// Re-bases the slot at a transaction boundary: the current value becomes
    /// the next transaction's original.
    pub fn rebase(&mut self) {
        self.original = self.current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(value: u64) -> Bytes32 {
        Bytes32::from_u64(value)
    }

    #[test]
    fn classify_scenarios() {
        assert_eq!(
            StorageStatus::classify(&word(0), &word(0), &word(5)),
            StorageStatus::Added
        );
        assert_eq!(
            StorageStatus::classify(&word(5), &word(5), &word(0)),
            StorageStatus::Deleted
        );
        assert_eq!(
            StorageStatus::classify(&word(5), &word(5), &word(7)),
            StorageStatus::Modified
        );
        assert_eq!(
            StorageStatus::classify(&word(5), &word(3), &word(7)),
            StorageStatus::ModifiedAgain
        );
        assert_eq!(
            StorageStatus::classify(&word(5), &word(5), &word(5)),
            StorageStatus::Unchanged
        );
    }

    #[test]
    fn noop_write_is_unchanged_for_all_histories() {
        for original in [0u64, 1, 5, u64::MAX] {
            for current in [0u64, 1, 5, u64::MAX] {
                assert_eq!(
                    StorageStatus::classify(&word(original), &word(current), &word(current)),
                    StorageStatus::Unchanged,
                );
            }
        }
    }

    #[test]
    fn dirty_slot_never_reports_unchanged_on_revert_to_original() {
        // current != original, writing the original value back is still a
        // change to the dirtied slot.
        assert_eq!(
            StorageStatus::classify(&word(5), &word(3), &word(5)),
            StorageStatus::ModifiedAgain
        );
    }

    #[test]
    fn slot_write_sequence() {
        let mut slot = StorageSlot::new(word(0));
        assert_eq!(slot.store(word(5)), StorageStatus::Added);
        assert_eq!(slot.store(word(7)), StorageStatus::ModifiedAgain);
        assert_eq!(slot.store(word(7)), StorageStatus::Unchanged);
        assert_eq!(slot.store(word(0)), StorageStatus::ModifiedAgain);

        slot.rebase();
        assert_eq!(slot, StorageSlot::new(word(0)));
        assert_eq!(slot.store(word(9)), StorageStatus::Added);
    }
}
