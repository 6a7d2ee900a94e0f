//! The outcome of executing a [`Message`](crate::Message), with an explicit
//! output-ownership protocol.
//!
//! Ownership of a result's output is encoded in the type system instead of a
//! manually fired release callback: an [`Output`] is either empty, borrowed
//! from `'static` storage, or an [`OwnedOutput`] that reclaims its resources
//! exactly once when dropped. Moving a result transfers the obligation,
//! cloning duplicates the bytes but never the obligation, and
//! [`ExecutionResult::release_raw`] hands out a view that provably carries no
//! obligation at all.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;
use core::fmt;

use crate::Address;

/// The outcome category of a call frame.
///
/// Non-negative codes are bytecode-level outcomes and are ordinary values,
/// not process failures. The negative codes are infrastructure failures: the
/// VM or host could not even attempt execution, the output is absent and
/// `gas_left` is not meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum StatusCode {
    /// Execution finished with success.
    Success = 0,
    /// Generic execution failure.
    Failure = 1,
    /// Execution terminated with REVERT. Remaining gas is preserved.
    Revert = 2,
    /// Execution ran out of gas.
    OutOfGas = 3,
    /// The INVALID instruction (0xfe) was executed.
    InvalidInstruction = 4,
    /// An undefined instruction was encountered.
    UndefinedInstruction = 5,
    /// The stack grew past its limit.
    StackOverflow = 6,
    /// An instruction popped from an empty stack.
    StackUnderflow = 7,
    /// A jump targeted a position that is not a JUMPDEST.
    BadJumpDestination = 8,
    /// A memory access was outside the addressable range.
    InvalidMemoryAccess = 9,
    /// A nested call exceeded [`CALL_DEPTH_LIMIT`](crate::constants::CALL_DEPTH_LIMIT).
    CallDepthExceeded = 10,
    /// A state-modifying operation ran inside a static call.
    StaticModeViolation = 11,
    /// A precompiled contract rejected its input.
    PrecompileFailure = 12,
    /// Contract validation failed (deploy code analysis).
    ContractValidationFailure = 13,
    /// An argument was outside the range an instruction supports.
    ArgumentOutOfRange = 14,
    /// The UNREACHABLE instruction was executed (WASM execution mode).
    UnreachableInstruction = 15,
    /// A trap was raised (WASM execution mode).
    Trap = 16,
    /// The sender balance does not cover the transferred value.
    InsufficientBalance = 17,
    /// The VM or host failed for a reason unrelated to the bytecode.
    InternalError = -1,
    /// The execution request was malformed and was not attempted.
    Rejected = -2,
    /// The VM failed to allocate memory needed for execution.
    OutOfMemory = -3,
}

impl StatusCode {
    /// Whether this is the success outcome.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether this is the revert outcome, which preserves remaining gas.
    pub const fn is_revert(self) -> bool {
        matches!(self, Self::Revert)
    }

    /// Whether this is an infrastructure failure (negative code) rather than
    /// a bytecode-level outcome.
    pub const fn is_internal(self) -> bool {
        (self as i32) < 0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Revert => "revert",
            Self::OutOfGas => "out of gas",
            Self::InvalidInstruction => "invalid instruction",
            Self::UndefinedInstruction => "undefined instruction",
            Self::StackOverflow => "stack overflow",
            Self::StackUnderflow => "stack underflow",
            Self::BadJumpDestination => "bad jump destination",
            Self::InvalidMemoryAccess => "invalid memory access",
            Self::CallDepthExceeded => "call depth exceeded",
            Self::StaticModeViolation => "static mode violation",
            Self::PrecompileFailure => "precompile failure",
            Self::ContractValidationFailure => "contract validation failure",
            Self::ArgumentOutOfRange => "argument out of range",
            Self::UnreachableInstruction => "unreachable instruction",
            Self::Trap => "trap",
            Self::InsufficientBalance => "insufficient balance",
            Self::InternalError => "internal error",
            Self::Rejected => "rejected",
            Self::OutOfMemory => "out of memory",
        };
        f.write_str(name)
    }
}

/// Hook reclaiming the resources backing an [`OwnedOutput`]. Invoked with the
/// buffer contents, at most once, when the output is dropped.
pub type ReleaseFn = Box<dyn FnOnce(&[u8]) + Send>;

/// An output buffer owned by its result.
///
/// The optional release hook exists for hosts that hand out buffers carved
/// from pools and need to be told when the bytes die; exactly-once invocation
/// is structural (`Option::take` in `Drop`), not a calling convention.
pub struct OwnedOutput {
    data: Box<[u8]>,
    release: Option<ReleaseFn>,
}

impl OwnedOutput {
    /// Takes ownership of `data` with no release hook; dropping the buffer is
    /// the whole release.
    pub fn new(data: impl Into<Box<[u8]>>) -> Self {
        Self { data: data.into(), release: None }
    }

    /// Takes ownership of `data` and arranges for `release` to run exactly
    /// once when the output is dropped.
    pub fn with_release(
        data: impl Into<Box<[u8]>>,
        release: impl FnOnce(&[u8]) + Send + 'static,
    ) -> Self {
        Self { data: data.into(), release: Some(Box::new(release)) }
    }

    /// The buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Whether a release hook is still armed.
    pub fn has_release(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for OwnedOutput {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(&self.data);
        }
    }
}

impl Clone for OwnedOutput {
    /// Deep-clones the bytes. The release obligation stays with the original;
    /// the clone reclaims nothing beyond its own allocation.
    fn clone(&self) -> Self {
        Self { data: self.data.clone(), release: None }
    }
}

impl fmt::Debug for OwnedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedOutput")
            .field("len", &self.data.len())
            .field("release", &self.release.is_some())
            .finish()
    }
}

/// The output bytes of a result and who is responsible for them.
#[derive(Clone, Debug, Default)]
pub enum Output {
    /// No output.
    #[default]
    Empty,
    /// Output borrowed from storage outliving every result, e.g. a static
    /// error selector. Nothing to release.
    Static(&'static [u8]),
    /// Output owned by the result; released exactly once on drop.
    Owned(OwnedOutput),
}

impl Output {
    /// The output bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Static(bytes) => bytes,
            Self::Owned(owned) => owned.as_slice(),
        }
    }

    /// Whether there are no output bytes.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// The number of output bytes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }
}

impl From<OwnedOutput> for Output {
    fn from(owned: OwnedOutput) -> Self {
        Self::Owned(owned)
    }
}

/// A result construction rejected by validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResultError {
    /// A success-class result must return a non-negative gas budget to its
    /// caller; negative gas is only a transient accounting state that must
    /// end in [`StatusCode::OutOfGas`].
    #[error("status {status} returned with negative gas_left {gas_left}")]
    NegativeGasLeft {
        /// The offending status.
        status: StatusCode,
        /// The negative remaining gas.
        gas_left: i64,
    },
    /// Infrastructure failures carry no output; their `gas_left` and buffer
    /// fields are not meaningful.
    #[error("internal status {status} must not carry output")]
    OutputOnInternalStatus {
        /// The offending status.
        status: StatusCode,
    },
}

/// The owned outcome of executing a message.
///
/// A result is moved, never implicitly copied; whichever side holds it last
/// releases the output, once, on drop.
#[derive(Clone, Debug)]
pub struct ExecutionResult {
    /// The outcome category.
    pub status_code: StatusCode,
    /// Remaining gas returned to the caller. May be negative only transiently
    /// during accounting; see [`ExecutionResult::try_new`].
    pub gas_left: i64,
    output: Output,
    /// The address of the created contract. Only meaningful when the status
    /// is [`StatusCode::Success`] and the message kind was a create.
    pub create_address: Option<Address>,
}

impl ExecutionResult {
    /// Creates a result. The output carries its own release semantics, so no
    /// further obligation attaches to the caller beyond dropping the value.
    pub fn new(status_code: StatusCode, gas_left: i64, output: Output) -> Self {
        Self { status_code, gas_left, output, create_address: None }
    }

    /// Creates a result, rejecting combinations that violate the boundary
    /// contract: success with negative gas, or an infrastructure code with
    /// output attached.
    pub fn try_new(
        status_code: StatusCode,
        gas_left: i64,
        output: Output,
    ) -> Result<Self, ResultError> {
        if status_code.is_success() && gas_left < 0 {
            return Err(ResultError::NegativeGasLeft { status: status_code, gas_left });
        }
        if status_code.is_internal() && !output.is_empty() {
            return Err(ResultError::OutputOnInternalStatus { status: status_code });
        }
        Ok(Self::new(status_code, gas_left, output))
    }

    /// Creates a successful result.
    pub fn success(gas_left: i64, output: Output) -> Self {
        debug_assert!(gas_left >= 0);
        Self::new(StatusCode::Success, gas_left, output)
    }

    /// Creates a revert result, preserving the remaining gas for the caller.
    pub fn revert(gas_left: i64, output: Output) -> Self {
        Self::new(StatusCode::Revert, gas_left, output)
    }

    /// Creates a failure result with no output. Every failure-class code
    /// except revert forfeits the remaining gas.
    pub fn failure(status_code: StatusCode) -> Self {
        debug_assert!(!status_code.is_success());
        Self::new(status_code, 0, Output::Empty)
    }

    /// Creates a result owning `data`, to be freed when the result is
    /// dropped.
    pub fn from_owned(status_code: StatusCode, gas_left: i64, data: impl Into<Box<[u8]>>) -> Self {
        Self::new(status_code, gas_left, Output::Owned(OwnedOutput::new(data)))
    }

    /// Creates a result owning `data` with a release hook that runs exactly
    /// once when the result is dropped.
    pub fn from_owned_with_release(
        status_code: StatusCode,
        gas_left: i64,
        data: impl Into<Box<[u8]>>,
        release: impl FnOnce(&[u8]) + Send + 'static,
    ) -> Self {
        Self::new(status_code, gas_left, Output::Owned(OwnedOutput::with_release(data, release)))
    }

    /// Attaches the address of a created contract.
    pub fn with_create_address(mut self, address: Address) -> Self {
        self.create_address = Some(address);
        self
    }

    /// The output bytes.
    pub fn output(&self) -> &[u8] {
        self.output.as_slice()
    }

    /// The output together with its ownership state.
    pub fn into_output(self) -> Output {
        self.output
    }

    /// The gas returned to the caller's budget under the forfeiture rule:
    /// success and revert hand back `gas_left`, every other outcome forfeits
    /// it (infrastructure codes carry no meaningful gas at all).
    pub fn gas_refundable(&self) -> i64 {
        if self.status_code.is_success() || self.status_code.is_revert() {
            self.gas_left
        } else {
            0
        }
    }

    /// A view of the status/gas/output fields carrying no release
    /// obligation, for layers that inspect a result without taking
    /// responsibility for its buffer.
    pub fn release_raw(&self) -> RawResult<'_> {
        RawResult {
            status_code: self.status_code,
            gas_left: self.gas_left,
            output: self.output.as_slice(),
            create_address: self.create_address,
        }
    }
}

/// A borrowed, obligation-free view of an [`ExecutionResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawResult<'a> {
    /// The outcome category.
    pub status_code: StatusCode,
    /// Remaining gas returned to the caller.
    pub gas_left: i64,
    /// The output bytes, borrowed from the owning result.
    pub output: &'a [u8],
    /// The address of the created contract, if any.
    pub create_address: Option<Address>,
}
