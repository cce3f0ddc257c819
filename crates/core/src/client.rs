/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Client capability traits and the factories that produce them.
 *
 * Executors never hold a client. They hold a factory and ask it for a fresh
 * client on every invocation, so construction failures surface only when an
 * operation actually runs. Plain closures implement the factory traits,
 * which is how tests inject doubles.
 */

use crate::error::ClientError;
use crate::resources::{App, ProvisionRequest, Secret, ServiceInstance};
use async_trait::async_trait;
use std::sync::Arc;

/// Service-catalog operations on `ServiceInstance`s.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn provision(&self, request: &ProvisionRequest) -> Result<ServiceInstance, ClientError>;

    async fn deprovision(&self, namespace: &str, instance_name: &str) -> Result<(), ClientError>;

    async fn list_instances(&self, namespace: &str) -> Result<Vec<ServiceInstance>, ClientError>;
}

/// Serving-platform operations on application `Service`s.
#[async_trait]
pub trait ServingApi: Send + Sync {
    async fn delete_service(&self, namespace: &str, name: &str) -> Result<(), ClientError>;

    /// An empty `label_selector` lists everything in the namespace.
    async fn list_services(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<App>, ClientError>;
}

/// Core operations on `Secret`s.
#[async_trait]
pub trait SecretsApi: Send + Sync {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, ClientError>;

    /// An empty `label_selector` lists everything in the namespace.
    async fn list_secrets(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Secret>, ClientError>;

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ClientError>;
}

/// Produces a catalog client scoped to a namespace.
#[async_trait]
pub trait CatalogFactory: Send + Sync {
    async fn catalog(&self, namespace: &str) -> Result<Arc<dyn CatalogApi>, ClientError>;
}

/// Produces a serving client. Takes no arguments so it can be deferred
/// until a call is actually made.
#[async_trait]
pub trait ServingFactory: Send + Sync {
    async fn serving(&self) -> Result<Arc<dyn ServingApi>, ClientError>;
}

/// Produces a secrets client scoped to a namespace.
#[async_trait]
pub trait SecretsFactory: Send + Sync {
    async fn secrets(&self, namespace: &str) -> Result<Arc<dyn SecretsApi>, ClientError>;
}

#[async_trait]
impl<F> CatalogFactory for F
where
    F: Fn(&str) -> Result<Arc<dyn CatalogApi>, ClientError> + Send + Sync,
{
    async fn catalog(&self, namespace: &str) -> Result<Arc<dyn CatalogApi>, ClientError> {
        (self)(namespace)
    }
}

#[async_trait]
impl<F> ServingFactory for F
where
    F: Fn() -> Result<Arc<dyn ServingApi>, ClientError> + Send + Sync,
{
    async fn serving(&self) -> Result<Arc<dyn ServingApi>, ClientError> {
        (self)()
    }
}

#[async_trait]
impl<F> SecretsFactory for F
where
    F: Fn(&str) -> Result<Arc<dyn SecretsApi>, ClientError> + Send + Sync,
{
    async fn secrets(&self, namespace: &str) -> Result<Arc<dyn SecretsApi>, ClientError> {
        (self)(namespace)
    }
}
