/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Application operations backed by the serving platform.
 */

pub mod options;

pub use options::*;

use crate::client::ServingFactory;
use crate::error::{KfError, KfResult};
use crate::namespace::{resolve_namespace, DEFAULT_NAMESPACE};
use crate::options::Options;
use crate::resources::App;

/// Deletes apps.
///
/// The factory is only invoked when a delete is attempted, so a cluster that
/// cannot be reached does not fail construction.
pub struct Deleter {
    factory: Box<dyn ServingFactory>,
    default_namespace: String,
}

impl Deleter {
    pub fn new<F>(factory: F) -> Self
    where
        F: ServingFactory + 'static,
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

    /// Delete `app_name`. Validation failures and factory errors issue no
    /// remote call.
    pub async fn delete(&self, app_name: &str, opts: &[DeleteOption]) -> KfResult<()> {
        if app_name.is_empty() {
            return Err(KfError::Validation("invalid app name".to_string()));
        }

        let cfg = delete_option_defaults_in(&self.default_namespace)
            .extend(&Options::from(opts))
            .to_config();
        let namespace = resolve_namespace(&cfg.namespace, &self.default_namespace)?;

        let client = self
            .factory
            .serving()
            .await
            .map_err(KfError::ClientConstruction)?;

        tracing::debug!(namespace = %namespace, app = app_name, "deleting app");
        client
            .delete_service(&namespace, app_name)
            .await
            .map_err(KfError::Remote)
    }
}

/// Lists apps.
pub struct Lister {
    factory: Box<dyn ServingFactory>,
    default_namespace: String,
}

impl Lister {
    pub fn new<F>(factory: F) -> Self
    where
        F: ServingFactory + 'static,
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

    pub async fn list(&self, opts: &[ListOption]) -> KfResult<Vec<App>> {
        let cfg = list_option_defaults_in(&self.default_namespace)
            .extend(&Options::from(opts))
            .to_config();
        let namespace = resolve_namespace(&cfg.namespace, &self.default_namespace)?;

        let client = self
            .factory
            .serving()
            .await
            .map_err(KfError::ClientConstruction)?;

        tracing::debug!(
            namespace = %namespace,
            selector = %cfg.label_selector,
            "listing apps"
        );
        client
            .list_services(&namespace, &cfg.label_selector)
            .await
            .map_err(KfError::Remote)
    }
}
