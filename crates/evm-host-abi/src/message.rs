//! The call/create request passed from a caller into the VM.

use bitflags::bitflags;

use crate::{Address, Bytes32, Uint256Be};

/// The kind of a call-like message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CallKind {
    /// Plain message call.
    Call = 0,
    /// Call executing the callee's code in the caller's context, forwarding
    /// sender and value (EIP-7).
    DelegateCall = 1,
    /// Legacy variant of [`Self::DelegateCall`] that substitutes only the
    /// code, keeping the message sender and value of the outer call.
    CallCode = 2,
    /// Contract creation.
    Create = 3,
    /// Contract creation with a caller-chosen salt (EIP-1014).
    Create2 = 4,
}

impl CallKind {
    /// Whether this message creates a new contract.
    pub const fn is_create(self) -> bool {
        matches!(self, Self::Create | Self::Create2)
    }
}

bitflags! {
    /// Additional properties of a message.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MessageFlags: u32 {
        /// The call must not modify state (STATICCALL).
        const STATIC = 1 << 0;
    }
}

/// An immutable description of one call/create request.
///
/// The input is a borrowed byte range whose lifetime is guaranteed by the
/// caller for the duration of the call only; a callee cannot retain it past
/// return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message<'a> {
    /// The kind of the call.
    pub kind: CallKind,
    /// Additional flags of the call.
    pub flags: MessageFlags,
    /// The current call-stack depth, starting at 0 for the top-level frame.
    pub depth: i32,
    /// The remaining gas budget for this frame.
    pub gas: i64,
    /// The recipient of the call, which provides the storage context.
    pub recipient: Address,
    /// The sender of the call.
    pub sender: Address,
    /// The call input data, borrowed from the caller.
    pub input: &'a [u8],
    /// The amount of wei transferred with the call.
    pub value: Uint256Be,
    /// The salt for [`CallKind::Create2`]; ignored for every other kind.
    pub create2_salt: Bytes32,
    /// The address whose code is executed. Differs from `recipient` for
    /// [`CallKind::DelegateCall`] and [`CallKind::CallCode`].
    pub code_address: Address,
}

impl Message<'_> {
    /// Whether the call runs in static (read-only) mode.
    pub const fn is_static(&self) -> bool {
        self.flags.contains(MessageFlags::STATIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(kind: CallKind, flags: MessageFlags) -> Message<'static> {
        Message {
            kind,
            flags,
            depth: 0,
            gas: 50_000,
            recipient: Address::from_u64(2),
            sender: Address::from_u64(1),
            input: &[],
            value: Uint256Be::ZERO,
            create2_salt: Bytes32::ZERO,
            code_address: Address::from_u64(2),
        }
    }

    #[test]
    fn static_flag() {
        assert!(!message(CallKind::Call, MessageFlags::empty()).is_static());
        assert!(message(CallKind::Call, MessageFlags::STATIC).is_static());
    }

    #[test]
    fn create_kinds() {
        assert!(CallKind::Create.is_create());
        assert!(CallKind::Create2.is_create());
        assert!(!CallKind::DelegateCall.is_create());
        assert!(!CallKind::CallCode.is_create());
        assert!(!CallKind::Call.is_create());
    }
}
