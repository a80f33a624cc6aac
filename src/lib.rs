//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one `blockfall::{core,engine,input,term,types}`
//! path so the binary, integration tests and benches share a single import root.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
