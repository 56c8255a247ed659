//! Design tool synchronisation.
//!
//! This crate connects the synchronous graft pipeline to the outside world:
//! - [`HttpDesignApi`]: the design tool's file and variables endpoints over HTTPS
//! - [`CredentialProvider`] and [`SingleFlight`]: bearer tokens with per-identity
//!   serialised refresh
//! - [`with_refresh_retry`]: retry once after a 401/403
//! - [`SyncService`]: fetch, then import tokens, diff tokens or import components
//!
//! # Example
//!
//! ```no_run
//! use graft_core::MemoryTokenStore;
//! use graft_sync::{StaticToken, SyncConfig, SyncRequest, SyncService};
//!
//! # async fn run() -> graft_sync::Result<()> {
//! let service = SyncService::from_config(SyncConfig::from_env()?, StaticToken("secret".into()))?;
//! let mut store = MemoryTokenStore::new();
//! let report = service
//!     .sync_variables(&SyncRequest::new("me", "project-1", "FILE_KEY"), &mut store)
//!     .await?;
//! println!("{} imported, {} updated", report.imported.len(), report.updated.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod components;
pub mod config;
pub mod credentials;
pub mod error;
pub mod retry;
pub mod service;

pub use client::{DesignApi, HttpDesignApi};
pub use components::store_components;
pub use config::SyncConfig;
pub use credentials::{CredentialProvider, SingleFlight, StaticToken};
pub use error::{Result, SyncError};
pub use retry::with_refresh_retry;
pub use service::{ComponentImport, SyncRequest, SyncService};
