//! Backend API layer
//!
//! [`ApiClient`] speaks HTTP; [`ApiWorker`] runs it off the UI thread.

pub mod client;
pub mod types;
pub mod worker;

pub use client::{normalize_error, ApiClient, Endpoint};
pub use types::{mime_for_file, AudioUpload, ChatResponse};
pub use worker::{ApiCommand, ApiEvent, ApiWorker};
