//! Data Transfer Objects for the Nomad HTTP API
//!
//! Field names follow Nomad's JSON encoding (PascalCase, with upper-case
//! acronyms such as `ID` and `MemoryMB`). Response types ignore fields they
//! do not model and default the ones the server omits.

pub mod endpoint;
pub mod job;
