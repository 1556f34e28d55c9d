//! jobctl Core
//!
//! Core types for the jobctl Nomad client.
//!
//! This crate contains:
//! - Domain types: the job specification as this program builds it (Job, TaskGroup, Task)
//! - DTOs: Nomad's wire representation of jobs and the job endpoint payloads

pub mod domain;
pub mod dto;
