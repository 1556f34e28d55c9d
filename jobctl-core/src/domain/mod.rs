//! Core domain types
//!
//! Plain records describing a desired workload. They are built per
//! invocation and translated into the Nomad job representation
//! (see [`crate::dto`]) right before submission.

pub mod job;
