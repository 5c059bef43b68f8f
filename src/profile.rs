//! Provider profile handling: raw record (data), normalizer (pure logic), and fetcher (I/O).
//!
//! `record` defines the deserialized Box user shape and the provider-agnostic
//! [`NormalizedProfile`]. `normalizer` turns one into the other without I/O or failure modes.
//! `fetcher` performs the single authenticated GET against the "current user" endpoint and
//! surfaces transport/parse failures as typed errors.

pub mod fetcher;
pub mod normalizer;
pub mod record;

pub use fetcher::*;
pub use normalizer::*;
pub use record::*;
