//! Feed client: backend API calls and their runtime handle.
mod client;
mod error;
mod handle;

pub use client::{ApiClient, ClientSettings, FeedApi};
pub use error::ApiError;
pub use handle::{ClientCommander, ClientEvent, ClientHandle};
