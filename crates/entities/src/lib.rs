//! Core entity definitions for taskman.
//!
//! Plain records with store-assigned integer identifiers. All behavior lives
//! behind the storage port in the `task_store` crate; these types only carry
//! data between the shell and a backend.

mod label;
mod task;
mod user;

pub use label::*;
pub use task::*;
pub use user::*;
