//! The boundary ABI between an EVM bytecode engine and its state host.
//!
//! The VM executes a single call frame of bytecode and asks the host, through
//! the [`Host`] trait, for balances, storage, code and block context; the host
//! in turn re-enters the VM for nested calls. This crate defines the message
//! and result data model crossing that boundary, the per-slot storage
//! mutation taxonomy, and the cold/warm access-list semantics gas metering
//! depends on. It deliberately contains no interpreter, gas schedule or state
//! database; those live behind the [`Host`] and [`Vm`] seams.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

pub mod constants;

mod access;
pub use access::*;

mod host;
pub use host::*;

mod message;
pub use message::*;

mod result;
pub use result::*;

mod storage;
pub use storage::*;

mod types;
pub use types::*;

mod vm;
pub use vm::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
