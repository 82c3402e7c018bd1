//! Storage abstraction for taskman.
//!
//! This crate defines the storage port, the [`TaskStore`] trait listing
//! every persistence operation the shell may perform, and its two
//! implementations: [`PgStore`] against PostgreSQL and [`MemoryStore`] for
//! testing and offline use. The backend is chosen once at startup; callers
//! only ever see `Arc<dyn TaskStore>`.

mod error;
mod memory;
mod postgres;
mod traits;

pub use error::*;
pub use memory::*;
pub use postgres::*;
pub use traits::*;
