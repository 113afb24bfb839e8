// SPDX-License-Identifier: Apache-2.0

//! Tenant processor.
//!
//! Reads the tenant identifier from the request metadata and stamps it on the
//! resource of every resource group in a batch. Producers never know their
//! tenant, so a resource that already carries the tenant attribute rejects
//! the whole batch.

pub mod config;
pub mod error;

pub use config::{
    TENANT_ATTRIBUTE_KEY, TENANT_METADATA_KEY, TENANT_VALUE_SEPARATOR, TenantProcessorConfig,
};
pub use error::{Result, TenantError};

use crate::processor::ResourceGroup;
use crate::topology::payload::RequestContext;
use opentelemetry_proto::tonic::common::v1::any_value::Value;
use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue};
use opentelemetry_proto::tonic::logs::v1::ResourceLogs;
use opentelemetry_proto::tonic::metrics::v1::ResourceMetrics;
use opentelemetry_proto::tonic::trace::v1::ResourceSpans;
use tracing::{error, warn};

/// What a processor advertises to the pipeline about how it handles data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// The processor modifies the batch it is handed. Callers give up the
    /// batch when they invoke it.
    pub mutates_data: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TenantProcessor {
    config: TenantProcessorConfig,
}

impl TenantProcessor {
    pub fn new(config: TenantProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TenantProcessorConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities { mutates_data: true }
    }

    /// Derive the tenant identifier from the request metadata. Multiple values
    /// are joined with `;` in the order they were received.
    pub fn tenant_id(&self, ctx: Option<&RequestContext>) -> Result<String> {
        let tenant = ctx
            .map(|ctx| {
                ctx.metadata()
                    .get(&self.config.metadata_key)
                    .join(TENANT_VALUE_SEPARATOR)
            })
            .unwrap_or_default();

        if tenant.is_empty() {
            error!(
                metadata.key = self.config.metadata_key.as_str(),
                "Tenant metadata not present on request"
            );
            return Err(TenantError::MissingTenant {
                key: self.config.metadata_key.clone(),
            });
        }

        Ok(tenant)
    }

    /// Stamp the tenant attribute on every resource group of the batch.
    ///
    /// The batch is consumed. On error it is dropped in full, including groups
    /// that were already stamped before a conflicting group was found.
    pub fn process<T: ResourceGroup>(
        &self,
        ctx: Option<&RequestContext>,
        mut batch: Vec<T>,
    ) -> Result<Vec<T>> {
        let tenant = self.tenant_id(ctx)?;
        let attr_key = self.config.attribute_key.as_str();

        for group in batch.iter_mut() {
            if let Some(existing) = group
                .resource_attributes()
                .iter()
                .find(|kv| kv.key == attr_key)
            {
                let value = display_value(existing.value.as_ref());
                warn!(
                    signal = T::SIGNAL,
                    attribute = attr_key,
                    value = value.as_str(),
                    tenant = tenant.as_str(),
                    "Resource already includes the tenant information, dropping"
                );
                return Err(TenantError::ConflictingTenant {
                    key: attr_key.to_string(),
                    value,
                });
            }

            group.resource_attributes_mut().push(KeyValue {
                key: attr_key.to_string(),
                value: Some(AnyValue {
                    value: Some(Value::StringValue(tenant.clone())),
                }),
            });
        }

        Ok(batch)
    }

    pub fn process_spans(
        &self,
        ctx: Option<&RequestContext>,
        spans: Vec<ResourceSpans>,
    ) -> Result<Vec<ResourceSpans>> {
        self.process(ctx, spans)
    }

    pub fn process_metrics(
        &self,
        ctx: Option<&RequestContext>,
        metrics: Vec<ResourceMetrics>,
    ) -> Result<Vec<ResourceMetrics>> {
        self.process(ctx, metrics)
    }

    pub fn process_logs(
        &self,
        ctx: Option<&RequestContext>,
        logs: Vec<ResourceLogs>,
    ) -> Result<Vec<ResourceLogs>> {
        self.process(ctx, logs)
    }
}

// Only used to report an offending value, so nested values fall back to Debug
fn display_value(value: Option<&AnyValue>) -> String {
    match value.and_then(|v| v.value.as_ref()) {
        None => String::new(),
        Some(Value::StringValue(s)) => s.clone(),
        Some(Value::BoolValue(b)) => b.to_string(),
        Some(Value::IntValue(i)) => i.to_string(),
        Some(Value::DoubleValue(d)) => d.to_string(),
        Some(v) => format!("{:?}", v),
    }
}
