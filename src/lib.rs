#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

//! Facade crate for the rivulet stream core.
//!
//! The stream core lives in [`streams`]; see `rivulet_streams_rs::core` for the endpoint
//! contracts, composition primitives and operators.


pub use rivulet_streams_rs as streams;

/// Returns the version of this facade crate.
#[must_use]
pub const fn crate_version() -> &'static str {
  env!("CARGO_PKG_VERSION")
}
