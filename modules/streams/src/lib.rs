#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::print_stdout, clippy::dbg_macro)]
#![deny(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![deny(unreachable_pub)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Push-based producer/consumer stream core for rivulet.
//!
//! Producers push items synchronously into their single bound consumer until the consumer
//! suspends them. Everything runs on one [`core::Eventloop`] thread; there is no locking.

extern crate alloc;

/// Stream contracts, endpoints, composition primitives and operators.
pub mod core;
