//! Constants shared by conforming VMs and hosts.

/// The maximum nesting depth of message calls. A host's `call` implementation
/// must report [`StatusCode::CallDepthExceeded`](crate::StatusCode) instead of
/// recursing past this depth.
pub const CALL_DEPTH_LIMIT: i32 = 1024;

/// The maximum number of topics a single log record may carry (LOG0..LOG4).
pub const MAX_LOG_TOPICS: usize = 4;
