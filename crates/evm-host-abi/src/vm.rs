//! The execution entry point a conforming VM exposes.

use crate::{ExecutionResult, Host, Message};

/// A bytecode execution engine for a single call frame.
///
/// An invocation runs to completion on the caller's thread; there is no
/// cooperative suspension, and cancellation is expressed only through gas
/// exhaustion. The VM may call back into `host` any number of times,
/// including nested [`Host::call`]s that recursively re-enter the same VM
/// with `msg.depth + 1`.
pub trait Vm {
    /// Executes `code` for `msg` against `host` and returns the owned
    /// outcome. Transaction context is reachable through
    /// [`Host::get_tx_context`].
    fn execute(&self, host: &mut dyn Host, msg: &Message<'_>, code: &[u8]) -> ExecutionResult;
}
