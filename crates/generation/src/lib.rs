//! Streaming client for the LM backend and the fallback/phase supervisor
//! that drives it.

mod backend;
mod error;
mod http_client;
mod phases;
mod supervisor;

pub use backend::{BackendClient, BackendConfig, GenerateChunk};
pub use error::{GenerationError, Result};
pub use phases::Phase;
pub use supervisor::{RetryReason, Supervisor, SupervisorEvent};
