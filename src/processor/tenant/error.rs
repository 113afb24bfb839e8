// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors that reject a batch in the tenant processor. Either one drops the
/// whole batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenantError {
    /// No tenant identifier could be derived from the request metadata
    #[error("tenant header was not present on request (metadata key: {key})")]
    MissingTenant { key: String },

    /// A resource already carried the tenant attribute
    #[error("invalid tenant attribute '{key}={value}' present in data")]
    ConflictingTenant { key: String, value: String },
}

impl TenantError {
    /// Stable label for metric tags
    pub fn reason(&self) -> &'static str {
        match self {
            TenantError::MissingTenant { .. } => "missing_tenant",
            TenantError::ConflictingTenant { .. } => "conflicting_tenant",
        }
    }
}

pub type Result<T> = std::result::Result<T, TenantError>;
