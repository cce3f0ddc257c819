/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use crate::namespace::DEFAULT_NAMESPACE;
use crate::options::{ConfigOption, Options};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListConfig {
    /// LabelSelector filters results to only labels matching the filter
    pub label_selector: String,
    /// Namespace is the Kubernetes namespace to use
    pub namespace: String,
}

pub type ListOption = ConfigOption<ListConfig>;
pub type ListOptions = Options<ListConfig>;

impl Options<ListConfig> {
    /// The last set value for label selector, or empty if not set.
    pub fn label_selector(&self) -> String {
        self.to_config().label_selector
    }

    /// The last set value for namespace, or empty if not set.
    pub fn namespace(&self) -> String {
        self.to_config().namespace
    }
}

/// Only list secrets whose labels match `val`.
pub fn with_list_label_selector(val: impl Into<String>) -> ListOption {
    let val = val.into();
    ConfigOption::new(move |cfg: &mut ListConfig| cfg.label_selector = val.clone())
}

pub fn with_list_namespace(val: impl Into<String>) -> ListOption {
    let val = val.into();
    ConfigOption::new(move |cfg: &mut ListConfig| cfg.namespace = val.clone())
}

/// Default values for `list`.
pub fn list_option_defaults() -> ListOptions {
    list_option_defaults_in(DEFAULT_NAMESPACE)
}

/// Same as [`list_option_defaults`] with `namespace` as the baseline namespace.
pub fn list_option_defaults_in(namespace: &str) -> ListOptions {
    Options::new().with(with_list_namespace(namespace))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetConfig {
    pub namespace: String,
}

pub type GetOption = ConfigOption<GetConfig>;
pub type GetOptions = Options<GetConfig>;

impl Options<GetConfig> {
    pub fn namespace(&self) -> String {
        self.to_config().namespace
    }
}

pub fn with_get_namespace(val: impl Into<String>) -> GetOption {
    let val = val.into();
    ConfigOption::new(move |cfg: &mut GetConfig| cfg.namespace = val.clone())
}

pub fn get_option_defaults() -> GetOptions {
    get_option_defaults_in(DEFAULT_NAMESPACE)
}

/// Same as [`get_option_defaults`] with `namespace` as the baseline namespace.
pub fn get_option_defaults_in(namespace: &str) -> GetOptions {
    Options::new().with(with_get_namespace(namespace))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteConfig {
    pub namespace: String,
}

pub type DeleteOption = ConfigOption<DeleteConfig>;
pub type DeleteOptions = Options<DeleteConfig>;

impl Options<DeleteConfig> {
    pub fn namespace(&self) -> String {
        self.to_config().namespace
    }
}

pub fn with_delete_namespace(val: impl Into<String>) -> DeleteOption {
    let val = val.into();
    ConfigOption::new(move |cfg: &mut DeleteConfig| cfg.namespace = val.clone())
}

pub fn delete_option_defaults() -> DeleteOptions {
    delete_option_defaults_in(DEFAULT_NAMESPACE)
}

/// Same as [`delete_option_defaults`] with `namespace` as the baseline namespace.
pub fn delete_option_defaults_in(namespace: &str) -> DeleteOptions {
    Options::new().with(with_delete_namespace(namespace))
}
