/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * In-memory cluster double for tests.
 */

use crate::client::{CatalogApi, SecretsApi, ServingApi};
use crate::error::ClientError;
use crate::resources::{App, ProvisionRequest, Secret, ServiceInstance};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// A remote call recorded by [`FakeCluster`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Provision(ProvisionRequest),
    Deprovision { namespace: String, name: String },
    ListInstances { namespace: String },
    DeleteApp { namespace: String, name: String },
    ListApps { namespace: String, label_selector: String },
    GetSecret { namespace: String, name: String },
    ListSecrets { namespace: String, label_selector: String },
    DeleteSecret { namespace: String, name: String },
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    instances: Vec<ServiceInstance>,
    apps: Vec<App>,
    secrets: Vec<Secret>,
}

/// Records every call it receives and answers from seeded in-memory state.
///
/// When built with [`FakeCluster::with_error`] every call is still recorded
/// but fails with the programmed message.
#[derive(Debug, Default)]
pub struct FakeCluster {
    state: Mutex<State>,
    error: Option<String>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_instances(self, instances: Vec<ServiceInstance>) -> Self {
        self.lock().instances = instances;
        self
    }

    #[must_use]
    pub fn with_apps(self, apps: Vec<App>) -> Self {
        self.lock().apps = apps;
        self
    }

    #[must_use]
    pub fn with_secrets(self, secrets: Vec<Secret>) -> Self {
        self.lock().secrets = secrets;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record `call`, then fail if an error was programmed.
    fn record(&self, call: Call) -> Result<MutexGuard<'_, State>, ClientError> {
        let mut state = self.lock();
        state.calls.push(call);
        match &self.error {
            Some(message) => Err(ClientError::new(message.clone())),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCluster {
    async fn provision(&self, request: &ProvisionRequest) -> Result<ServiceInstance, ClientError> {
        let mut state = self.record(Call::Provision(request.clone()))?;
        let instance = ServiceInstance {
            name: request.instance_name.clone(),
            namespace: request.namespace.clone(),
            class_name: request.class_name.clone(),
            plan_name: request.plan_name.clone(),
            params: request.params.clone(),
            status: None,
            created: None,
        };
        state.instances.push(instance.clone());
        Ok(instance)
    }

    async fn deprovision(&self, namespace: &str, instance_name: &str) -> Result<(), ClientError> {
        let mut state = self.record(Call::Deprovision {
            namespace: namespace.to_string(),
            name: instance_name.to_string(),
        })?;
        state
            .instances
            .retain(|i| !(i.namespace == namespace && i.name == instance_name));
        Ok(())
    }

    async fn list_instances(&self, namespace: &str) -> Result<Vec<ServiceInstance>, ClientError> {
        let state = self.record(Call::ListInstances {
            namespace: namespace.to_string(),
        })?;
        Ok(state
            .instances
            .iter()
            .filter(|i| i.namespace == namespace)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ServingApi for FakeCluster {
    async fn delete_service(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        let mut state = self.record(Call::DeleteApp {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })?;
        state
            .apps
            .retain(|a| !(a.namespace == namespace && a.name == name));
        Ok(())
    }

    async fn list_services(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<App>, ClientError> {
        let state = self.record(Call::ListApps {
            namespace: namespace.to_string(),
            label_selector: label_selector.to_string(),
        })?;
        // Apps carry no labels in memory, so only the namespace filters.
        Ok(state
            .apps
            .iter()
            .filter(|a| a.namespace == namespace)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SecretsApi for FakeCluster {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, ClientError> {
        let state = self.record(Call::GetSecret {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })?;
        state
            .secrets
            .iter()
            .find(|s| s.namespace == namespace && s.name == name)
            .cloned()
            .ok_or_else(|| ClientError::new(format!("secrets \"{name}\" not found")))
    }

    async fn list_secrets(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Secret>, ClientError> {
        let state = self.record(Call::ListSecrets {
            namespace: namespace.to_string(),
            label_selector: label_selector.to_string(),
        })?;
        Ok(state
            .secrets
            .iter()
            .filter(|s| s.namespace == namespace && selector_matches(label_selector, &s.labels))
            .cloned()
            .collect())
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        let mut state = self.record(Call::DeleteSecret {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })?;
        state
            .secrets
            .retain(|s| !(s.namespace == namespace && s.name == name));
        Ok(())
    }
}

/// Equality-based label selector matching: `k=v`, `k==v`, `k!=v`, `k`, `!k`.
fn selector_matches(selector: &str, labels: &BTreeMap<String, String>) -> bool {
    selector
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .all(|term| {
            if let Some((key, value)) = term.split_once("!=") {
                labels.get(key.trim()).map(String::as_str) != Some(value.trim())
            } else if let Some((key, value)) =
                term.split_once("==").or_else(|| term.split_once('='))
            {
                labels.get(key.trim()).map(String::as_str) == Some(value.trim())
            } else if let Some(key) = term.strip_prefix('!') {
                !labels.contains_key(key)
            } else {
                labels.contains_key(term)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_selector_matches() {
        let l = labels(&[("env", "prod"), ("tier", "db")]);
        assert!(selector_matches("", &l));
        assert!(selector_matches("env=prod", &l));
        assert!(selector_matches("env==prod,tier=db", &l));
        assert!(!selector_matches("env=dev", &l));
        assert!(selector_matches("env!=dev", &l));
        assert!(selector_matches("tier", &l));
        assert!(!selector_matches("!tier", &l));
        assert!(selector_matches("!owner", &l));
    }

    #[tokio::test]
    async fn test_programmed_error_still_records() {
        let fake = FakeCluster::new().with_error("boom");
        let err = fake.delete_service("ns", "app").await.unwrap_err();
        assert_eq!(err.message(), "boom");
        assert_eq!(fake.call_count(), 1);
    }
}
