//! Client for the Real Estate Co-Pilot backend.
//!
//! Wraps the remote search/chat/insights API behind typed operations,
//! degrades to a sample catalog when the backend is unreachable, caches
//! identical search requests for five minutes, and re-filters server
//! results against the user's query before display.

pub mod api;
pub mod format;
pub mod models;
pub mod refine;

pub use api::{ApiClient, ApiError, BackendStatus, ClientConfig, Sourced};
pub use models::{Property, SearchQuery, SearchType};
pub use refine::{refine, RefinedResults};
