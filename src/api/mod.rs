//! Backend API
//!
//! REST bindings, organized by concern.

mod cases;
mod client;
mod error;
mod resources;
mod session;

pub use client::ApiClient;
pub use error::ApiError;
pub use resources::{CollectionPages, Resource};
pub use session::{BrowserSession, Session};

#[cfg(test)]
pub use session::MemorySession;
