/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

/// Message returned when no namespace could be resolved for an operation.
pub const EMPTY_NAMESPACE_ERROR: &str = "no namespace specified";

/// An opaque error reported by a remote client or client factory.
///
/// The message is kept exactly as the collaborator produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    message: String,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<kube::Error> for ClientError {
    fn from(err: kube::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Broad classification of a [`KfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input caught before any remote interaction.
    Validation,
    /// The `--config` payload could not be read or parsed.
    ConfigPayload,
    /// The client factory failed to produce a client.
    ClientConstruction,
    /// The remote call itself failed.
    Remote,
}

/// Top-level error type for resource operations
///
/// Every variant displays its message verbatim so the CLI can surface
/// remote messages unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KfError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    ConfigPayload(String),

    #[error("{0}")]
    ClientConstruction(ClientError),

    #[error("{0}")]
    Remote(ClientError),
}

impl KfError {
    pub fn empty_namespace() -> Self {
        Self::Validation(EMPTY_NAMESPACE_ERROR.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::ConfigPayload(_) => ErrorKind::ConfigPayload,
            Self::ClientConstruction(_) => ErrorKind::ClientConstruction,
            Self::Remote(_) => ErrorKind::Remote,
        }
    }
}

pub type KfResult<T> = Result<T, KfError>;
