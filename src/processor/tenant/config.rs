// SPDX-License-Identifier: Apache-2.0

use http::HeaderName;

/// Request metadata key carrying the tenant identifier. The api-gateway in
/// front of the collector authenticates callers and sets this header.
pub const TENANT_METADATA_KEY: &str = "X-ORGANIZATION-ID";

/// Resource attribute the tenant identifier is written to
pub const TENANT_ATTRIBUTE_KEY: &str = "organization";

/// Separator used when the metadata key carries more than one value
pub const TENANT_VALUE_SEPARATOR: &str = ";";

/// Configuration for the tenant processor
#[derive(Debug, Clone, PartialEq)]
pub struct TenantProcessorConfig {
    /// Metadata key to read the tenant identifier from. Matched case-insensitively.
    pub metadata_key: String,

    /// Resource attribute key to stamp
    pub attribute_key: String,
}

impl Default for TenantProcessorConfig {
    fn default() -> Self {
        Self {
            metadata_key: TENANT_METADATA_KEY.to_string(),
            attribute_key: TENANT_ATTRIBUTE_KEY.to_string(),
        }
    }
}

impl TenantProcessorConfig {
    pub fn with_metadata_key(mut self, metadata_key: impl Into<String>) -> Self {
        self.metadata_key = metadata_key.into();
        self
    }

    pub fn with_attribute_key(mut self, attribute_key: impl Into<String>) -> Self {
        self.attribute_key = attribute_key.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.metadata_key.is_empty() {
            return Err("Tenant metadata key must not be empty".to_string());
        }

        if HeaderName::from_bytes(self.metadata_key.as_bytes()).is_err() {
            return Err(format!(
                "Tenant metadata key {} is not a valid header name",
                self.metadata_key
            ));
        }

        if self.attribute_key.is_empty() {
            return Err("Tenant attribute key must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TenantProcessorConfig::default();
        assert_eq!(config.metadata_key, "X-ORGANIZATION-ID");
        assert_eq!(config.attribute_key, "organization");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = TenantProcessorConfig::default()
            .with_metadata_key("x-tenant")
            .with_attribute_key("tenant.id");

        assert_eq!(config.metadata_key, "x-tenant");
        assert_eq!(config.attribute_key, "tenant.id");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_keys() {
        let config = TenantProcessorConfig::default().with_metadata_key("");
        assert_eq!(
            config.validate(),
            Err("Tenant metadata key must not be empty".to_string())
        );

        let config = TenantProcessorConfig::default().with_attribute_key("");
        assert_eq!(
            config.validate(),
            Err("Tenant attribute key must not be empty".to_string())
        );
    }

    #[test]
    fn test_validate_invalid_header_name() {
        let config = TenantProcessorConfig::default().with_metadata_key("x tenant");
        assert_eq!(
            config.validate(),
            Err("Tenant metadata key x tenant is not a valid header name".to_string())
        );
    }
}
