//! Data models for the resolver
//!
//! Each sub-module covers one piece of the routing decision: the resolved object,
//! the presets it is compiled from, the pipeline they compile into, and the
//! storages it can be served from.

mod object;
mod preset;
mod storage;
mod transforms;

pub use object::*;
pub use preset::*;
pub use storage::*;
pub use transforms::*;
