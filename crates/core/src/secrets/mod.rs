/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Secret read and delete operations.
 */

pub mod options;

pub use options::*;

use crate::client::SecretsFactory;
use crate::error::{KfError, KfResult};
use crate::namespace::{resolve_namespace, DEFAULT_NAMESPACE};
use crate::options::Options;
use crate::resources::Secret;

pub struct SecretsClient {
    factory: Box<dyn SecretsFactory>,
    default_namespace: String,
}

impl SecretsClient {
    pub fn new<F>(factory: F) -> Self
    where
        F: SecretsFactory + 'static,
    {
        Self {
            factory: Box::new(factory),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    #[must_use]
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// List secrets matching the configured label selector. An empty
    /// selector lists everything in the namespace.
    pub async fn list(&self, opts: &[ListOption]) -> KfResult<Vec<Secret>> {
        let cfg = list_option_defaults_in(&self.default_namespace)
            .extend(&Options::from(opts))
            .to_config();
        let namespace = resolve_namespace(&cfg.namespace, &self.default_namespace)?;

        let client = self
            .factory
            .secrets(&namespace)
            .await
            .map_err(KfError::ClientConstruction)?;

        tracing::debug!(namespace = %namespace, selector = %cfg.label_selector, "listing secrets");
        client
            .list_secrets(&namespace, &cfg.label_selector)
            .await
            .map_err(KfError::Remote)
    }

    pub async fn get(&self, name: &str, opts: &[GetOption]) -> KfResult<Secret> {
        if name.is_empty() {
            return Err(KfError::Validation("invalid secret name".to_string()));
        }

        let cfg = get_option_defaults_in(&self.default_namespace)
            .extend(&Options::from(opts))
            .to_config();
        let namespace = resolve_namespace(&cfg.namespace, &self.default_namespace)?;

        let client = self
            .factory
            .secrets(&namespace)
            .await
            .map_err(KfError::ClientConstruction)?;

        tracing::debug!(namespace = %namespace, secret = name, "getting secret");
        client
            .get_secret(&namespace, name)
            .await
            .map_err(KfError::Remote)
    }

    pub async fn delete(&self, name: &str, opts: &[DeleteOption]) -> KfResult<()> {
        if name.is_empty() {
            return Err(KfError::Validation("invalid secret name".to_string()));
        }

        let cfg = delete_option_defaults_in(&self.default_namespace)
            .extend(&Options::from(opts))
            .to_config();
        let namespace = resolve_namespace(&cfg.namespace, &self.default_namespace)?;

        let client = self
            .factory
            .secrets(&namespace)
            .await
            .map_err(KfError::ClientConstruction)?;

        tracing::debug!(namespace = %namespace, secret = name, "deleting secret");
        client
            .delete_secret(&namespace, name)
            .await
            .map_err(KfError::Remote)
    }
}
