//! kf Core Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library holds the resource operations behind the `kf` CLI: creating,
//! deleting and listing service instances, apps and secrets. Each operation
//! resolves its configuration from a replayable option sequence, obtains a
//! client from a factory handed in at construction, and issues a single
//! remote call.
//!
//! # Example
//!
//! ```rust,no_run
//! use kf_core::cluster::KubeClients;
//! use kf_core::services::{with_create_service_namespace, ServicesClient};
//!
//! # async fn run() -> Result<(), kf_core::KfError> {
//! let services = ServicesClient::new(KubeClients::new());
//! let instance = services
//!     .create_service("db-service", "free", "mydb", &[with_create_service_namespace("dev")])
//!     .await?;
//! println!("created {}", instance.name);
//! # Ok(())
//! # }
//! ```

pub mod apps;
pub mod client;
pub mod cluster;
pub mod error;
pub mod namespace;
pub mod options;
pub mod params;
pub mod resources;
pub mod secrets;
pub mod services;

#[cfg(any(test, feature = "test_utils"))]
pub mod fake;

// Re-export error types for public API
pub use error::{ClientError, ErrorKind, KfError, KfResult};
pub use namespace::DEFAULT_NAMESPACE;
pub use options::{ConfigOption, Options};
