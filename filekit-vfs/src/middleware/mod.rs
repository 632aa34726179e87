//! Store Middleware System
//!
//! Provides a composable middleware layer around any `FileStore`.

mod middleware;
mod builder;
mod layered;

// Re-export core types
pub use middleware::{Middleware, Next, Stage};
pub use builder::StoreBuilder;
pub use layered::LayeredStore;

// Re-export built-in middlewares
pub mod logged;
pub mod readonly;

pub use logged::LoggedLayer;
pub use readonly::ReadOnlyLayer;
