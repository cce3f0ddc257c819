/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use crate::error::{KfError, KfResult};

/// Namespace used when nothing else is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Resolve the namespace for a single invocation.
///
/// The configured value wins; otherwise the fallback handed to the executor
/// at construction is used. An empty result is an error.
pub fn resolve_namespace(configured: &str, fallback: &str) -> KfResult<String> {
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    if !fallback.is_empty() {
        return Ok(fallback.to_string());
    }
    Err(KfError::empty_namespace())
}
