/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Production clients backed by the Kubernetes API.
 */

use crate::client::{
    CatalogApi, CatalogFactory, SecretsApi, SecretsFactory, ServingApi, ServingFactory,
};
use crate::error::ClientError;
use crate::resources::{App, ProvisionRequest, Secret, ServiceInstance};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret as CoreSecret;
use kube::api::{
    Api, ApiResource, DeleteParams, DynamicObject, GroupVersionKind, ListParams, PostParams,
};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Builds a fresh [`kube::Client`] for every invocation.
///
/// Nothing is cached: an unreachable or misconfigured cluster shows up as a
/// factory error on the operation that needed it.
#[derive(Debug, Clone, Default)]
pub struct KubeClients {
    kube_config_file: Option<PathBuf>,
    context: Option<String>,
}

impl KubeClients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load this kubeconfig instead of inferring one from the environment.
    #[must_use]
    pub fn with_kube_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.kube_config_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    async fn connect(&self) -> Result<Client, ClientError> {
        let options = KubeConfigOptions {
            context: self.context.clone(),
            ..KubeConfigOptions::default()
        };

        let config = match (&self.kube_config_file, &self.context) {
            (Some(path), _) => {
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    ClientError::new(format!(
                        "couldn't load kubeconfig {}: {e}",
                        path.display()
                    ))
                })?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(|e| ClientError::new(e.to_string()))?
            }
            (None, Some(_)) => Config::from_kubeconfig(&options)
                .await
                .map_err(|e| ClientError::new(e.to_string()))?,
            (None, None) => Config::infer()
                .await
                .map_err(|e| ClientError::new(e.to_string()))?,
        };

        tracing::trace!(cluster = %config.cluster_url, "connecting to cluster");
        Ok(Client::try_from(config)?)
    }
}

#[async_trait]
impl CatalogFactory for KubeClients {
    async fn catalog(&self, _namespace: &str) -> Result<Arc<dyn CatalogApi>, ClientError> {
        let client = self.connect().await?;
        Ok(Arc::new(KubeCatalog { client }))
    }
}

#[async_trait]
impl ServingFactory for KubeClients {
    async fn serving(&self) -> Result<Arc<dyn ServingApi>, ClientError> {
        let client = self.connect().await?;
        Ok(Arc::new(KubeServing { client }))
    }
}

#[async_trait]
impl SecretsFactory for KubeClients {
    async fn secrets(&self, _namespace: &str) -> Result<Arc<dyn SecretsApi>, ClientError> {
        let client = self.connect().await?;
        Ok(Arc::new(KubeSecrets { client }))
    }
}

fn service_instance_resource() -> ApiResource {
    ApiResource::from_gvk(&GroupVersionKind::gvk(
        "servicecatalog.k8s.io",
        "v1beta1",
        "ServiceInstance",
    ))
}

fn serving_service_resource() -> ApiResource {
    ApiResource::from_gvk(&GroupVersionKind::gvk(
        "serving.knative.dev",
        "v1alpha1",
        "Service",
    ))
}

fn list_params(label_selector: &str) -> ListParams {
    let params = ListParams::default();
    if label_selector.is_empty() {
        params
    } else {
        params.labels(label_selector)
    }
}

struct KubeCatalog {
    client: Client,
}

impl KubeCatalog {
    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &service_instance_resource())
    }
}

#[async_trait]
impl CatalogApi for KubeCatalog {
    async fn provision(&self, request: &ProvisionRequest) -> Result<ServiceInstance, ClientError> {
        let object = service_instance_object(request);
        let created = self
            .api(&request.namespace)
            .create(&PostParams::default(), &object)
            .await?;
        Ok(instance_from_object(&created))
    }

    async fn deprovision(&self, namespace: &str, instance_name: &str) -> Result<(), ClientError> {
        self.api(namespace)
            .delete(instance_name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    async fn list_instances(&self, namespace: &str) -> Result<Vec<ServiceInstance>, ClientError> {
        let list = self.api(namespace).list(&ListParams::default()).await?;
        Ok(list.items.iter().map(instance_from_object).collect())
    }
}

struct KubeServing {
    client: Client,
}

impl KubeServing {
    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &serving_service_resource())
    }
}

#[async_trait]
impl ServingApi for KubeServing {
    async fn delete_service(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }

    async fn list_services(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<App>, ClientError> {
        let list = self.api(namespace).list(&list_params(label_selector)).await?;
        Ok(list.items.iter().map(app_from_object).collect())
    }
}

struct KubeSecrets {
    client: Client,
}

impl KubeSecrets {
    fn api(&self, namespace: &str) -> Api<CoreSecret> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl SecretsApi for KubeSecrets {
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, ClientError> {
        let secret = self.api(namespace).get(name).await?;
        Ok(secret_from_object(&secret))
    }

    async fn list_secrets(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<Secret>, ClientError> {
        let list = self.api(namespace).list(&list_params(label_selector)).await?;
        Ok(list.items.iter().map(secret_from_object).collect())
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}

fn service_instance_object(request: &ProvisionRequest) -> DynamicObject {
    let mut object = DynamicObject::new(&request.instance_name, &service_instance_resource())
        .within(&request.namespace);
    object.data = json!({
        "spec": {
            "serviceClassExternalName": request.class_name,
            "servicePlanExternalName": request.plan_name,
            "parameters": request.params,
        }
    });
    object
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .and_then(Value::as_str)
}

/// Field `field` of the status condition with `type == Ready`.
fn ready_condition(data: &Value, field: &str) -> Option<String> {
    data.get("status")?
        .get("conditions")?
        .as_array()?
        .iter()
        .find(|c| c.get("type").and_then(Value::as_str) == Some("Ready"))
        .and_then(|c| c.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn instance_from_object(object: &DynamicObject) -> ServiceInstance {
    let data = &object.data;
    let class_name = str_at(data, &["spec", "serviceClassExternalName"])
        .or_else(|| str_at(data, &["spec", "clusterServiceClassExternalName"]))
        .unwrap_or_default();
    let plan_name = str_at(data, &["spec", "servicePlanExternalName"])
        .or_else(|| str_at(data, &["spec", "clusterServicePlanExternalName"]))
        .unwrap_or_default();
    let params = data
        .get("spec")
        .and_then(|spec| spec.get("parameters"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_else(Map::new);

    ServiceInstance {
        name: object.metadata.name.clone().unwrap_or_default(),
        namespace: object.metadata.namespace.clone().unwrap_or_default(),
        class_name: class_name.to_string(),
        plan_name: plan_name.to_string(),
        params,
        status: ready_condition(data, "reason"),
        created: object.metadata.creation_timestamp.as_ref().map(|t| t.0),
    }
}

fn app_from_object(object: &DynamicObject) -> App {
    App {
        name: object.metadata.name.clone().unwrap_or_default(),
        namespace: object.metadata.namespace.clone().unwrap_or_default(),
        url: str_at(&object.data, &["status", "url"])
            .or_else(|| str_at(&object.data, &["status", "domain"]))
            .map(str::to_string),
        ready: ready_condition(&object.data, "status"),
        created: object.metadata.creation_timestamp.as_ref().map(|t| t.0),
    }
}

fn secret_from_object(secret: &CoreSecret) -> Secret {
    let mut keys: Vec<String> = secret
        .data
        .iter()
        .flat_map(|data| data.keys().cloned())
        .chain(secret.string_data.iter().flat_map(|data| data.keys().cloned()))
        .collect();
    keys.sort();
    keys.dedup();

    Secret {
        name: secret.metadata.name.clone().unwrap_or_default(),
        namespace: secret.metadata.namespace.clone().unwrap_or_default(),
        secret_type: secret.type_.clone(),
        keys,
        labels: secret.metadata.labels.clone().unwrap_or_default(),
        created: secret.metadata.creation_timestamp.as_ref().map(|t| t.0),
    }
}
