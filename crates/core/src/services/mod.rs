/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Managed-service instance operations backed by the service catalog.
 */

pub mod options;

pub use options::*;

use crate::client::CatalogFactory;
use crate::error::{KfError, KfResult};
use crate::namespace::{resolve_namespace, DEFAULT_NAMESPACE};
use crate::options::Options;
use crate::resources::{ProvisionRequest, ServiceInstance};

/// Creates, deletes and lists service instances.
pub struct ServicesClient {
    factory: Box<dyn CatalogFactory>,
    default_namespace: String,
}

impl ServicesClient {
    pub fn new<F>(factory: F) -> Self
    where
        F: CatalogFactory + 'static,
    {
        Self {
            factory: Box::new(factory),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Namespace used when no option sets one.
    #[must_use]
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Provision a new instance of `class_name` on `plan_name`.
    ///
    /// Issues exactly one provision call. Remote errors are returned with
    /// their message untouched.
    pub async fn create_service(
        &self,
        class_name: &str,
        plan_name: &str,
        instance_name: &str,
        opts: &[CreateServiceOption],
    ) -> KfResult<ServiceInstance> {
        require("service class", class_name)?;
        require("plan", plan_name)?;
        require("instance name", instance_name)?;

        let cfg = create_service_option_defaults_in(&self.default_namespace)
            .extend(&Options::from(opts))
            .to_config();
        let namespace = resolve_namespace(&cfg.namespace, &self.default_namespace)?;

        let client = self
            .factory
            .catalog(&namespace)
            .await
            .map_err(KfError::ClientConstruction)?;

        tracing::debug!(
            namespace = %namespace,
            instance = instance_name,
            class = class_name,
            plan = plan_name,
            "provisioning service instance"
        );

        let request = ProvisionRequest {
            instance_name: instance_name.to_string(),
            class_name: class_name.to_string(),
            plan_name: plan_name.to_string(),
            namespace,
            params: cfg.params,
        };
        client.provision(&request).await.map_err(KfError::Remote)
    }

    /// Deprovision the named instance.
    pub async fn delete_service(
        &self,
        instance_name: &str,
        opts: &[DeleteServiceOption],
    ) -> KfResult<()> {
        require("instance name", instance_name)?;

        let cfg = delete_service_option_defaults_in(&self.default_namespace)
            .extend(&Options::from(opts))
            .to_config();
        let namespace = resolve_namespace(&cfg.namespace, &self.default_namespace)?;

        let client = self
            .factory
            .catalog(&namespace)
            .await
            .map_err(KfError::ClientConstruction)?;

        tracing::debug!(
            namespace = %namespace,
            instance = instance_name,
            "deprovisioning service instance"
        );
        client
            .deprovision(&namespace, instance_name)
            .await
            .map_err(KfError::Remote)
    }

    pub async fn list_services(
        &self,
        opts: &[ListServicesOption],
    ) -> KfResult<Vec<ServiceInstance>> {
        let cfg = list_services_option_defaults_in(&self.default_namespace)
            .extend(&Options::from(opts))
            .to_config();
        let namespace = resolve_namespace(&cfg.namespace, &self.default_namespace)?;

        let client = self
            .factory
            .catalog(&namespace)
            .await
            .map_err(KfError::ClientConstruction)?;

        tracing::debug!(namespace = %namespace, "listing service instances");
        client.list_instances(&namespace).await.map_err(KfError::Remote)
    }
}

fn require(what: &str, value: &str) -> KfResult<()> {
    if value.is_empty() {
        return Err(KfError::Validation(format!("invalid {what}")));
    }
    Ok(())
}
