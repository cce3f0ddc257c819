/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use crate::namespace::DEFAULT_NAMESPACE;
use crate::options::{ConfigOption, Options};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateServiceConfig {
    /// Namespace is the Kubernetes namespace to use
    pub namespace: String,
    /// Params is the service instance parameters passed to the broker
    pub params: Map<String, Value>,
}

pub type CreateServiceOption = ConfigOption<CreateServiceConfig>;
pub type CreateServiceOptions = Options<CreateServiceConfig>;

impl Options<CreateServiceConfig> {
    /// The last set value for namespace, or empty.
    pub fn namespace(&self) -> String {
        self.to_config().namespace
    }

    /// The last set value for params, or an empty map.
    pub fn params(&self) -> Map<String, Value> {
        self.to_config().params
    }
}

pub fn with_create_service_namespace(val: impl Into<String>) -> CreateServiceOption {
    let val = val.into();
    ConfigOption::new(move |cfg: &mut CreateServiceConfig| cfg.namespace = val.clone())
}

pub fn with_create_service_params(val: Map<String, Value>) -> CreateServiceOption {
    ConfigOption::new(move |cfg: &mut CreateServiceConfig| cfg.params = val.clone())
}

/// Default values for `create_service`.
pub fn create_service_option_defaults() -> CreateServiceOptions {
    create_service_option_defaults_in(DEFAULT_NAMESPACE)
}

/// Same as [`create_service_option_defaults`] with `namespace` as the baseline namespace.
pub fn create_service_option_defaults_in(namespace: &str) -> CreateServiceOptions {
    Options::new().with(with_create_service_namespace(namespace))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteServiceConfig {
    /// Namespace is the Kubernetes namespace to use
    pub namespace: String,
}

pub type DeleteServiceOption = ConfigOption<DeleteServiceConfig>;
pub type DeleteServiceOptions = Options<DeleteServiceConfig>;

impl Options<DeleteServiceConfig> {
    pub fn namespace(&self) -> String {
        self.to_config().namespace
    }
}

pub fn with_delete_service_namespace(val: impl Into<String>) -> DeleteServiceOption {
    let val = val.into();
    ConfigOption::new(move |cfg: &mut DeleteServiceConfig| cfg.namespace = val.clone())
}

pub fn delete_service_option_defaults() -> DeleteServiceOptions {
    delete_service_option_defaults_in(DEFAULT_NAMESPACE)
}

/// Same as [`delete_service_option_defaults`] with `namespace` as the baseline namespace.
pub fn delete_service_option_defaults_in(namespace: &str) -> DeleteServiceOptions {
    Options::new().with(with_delete_service_namespace(namespace))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListServicesConfig {
    /// Namespace is the Kubernetes namespace to use
    pub namespace: String,
}

pub type ListServicesOption = ConfigOption<ListServicesConfig>;
pub type ListServicesOptions = Options<ListServicesConfig>;

impl Options<ListServicesConfig> {
    pub fn namespace(&self) -> String {
        self.to_config().namespace
    }
}

pub fn with_list_services_namespace(val: impl Into<String>) -> ListServicesOption {
    let val = val.into();
    ConfigOption::new(move |cfg: &mut ListServicesConfig| cfg.namespace = val.clone())
}

pub fn list_services_option_defaults() -> ListServicesOptions {
    list_services_option_defaults_in(DEFAULT_NAMESPACE)
}

/// Same as [`list_services_option_defaults`] with `namespace` as the baseline namespace.
pub fn list_services_option_defaults_in(namespace: &str) -> ListServicesOptions {
    Options::new().with(with_list_services_namespace(namespace))
}
