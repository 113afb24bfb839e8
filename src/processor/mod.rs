// SPDX-License-Identifier: Apache-2.0

pub mod tenant;

use opentelemetry_proto::tonic::common::v1::KeyValue;
use opentelemetry_proto::tonic::logs::v1::ResourceLogs;
use opentelemetry_proto::tonic::metrics::v1::ResourceMetrics;
use opentelemetry_proto::tonic::resource::v1::Resource;
use opentelemetry_proto::tonic::trace::v1::ResourceSpans;

/// Access to the resource of one resource group in an OTLP batch.
///
/// Processors working at the resource level only need the attribute list,
/// so the nested scope and signal data stays opaque.
pub trait ResourceGroup {
    /// Signal name used in logs and metric tags
    const SIGNAL: &'static str;

    fn resource_attributes(&self) -> &[KeyValue];

    /// Mutable resource attributes, creating an empty resource if there is none.
    fn resource_attributes_mut(&mut self) -> &mut Vec<KeyValue>;
}

fn attributes_of(resource: &Option<Resource>) -> &[KeyValue] {
    resource
        .as_ref()
        .map(|r| r.attributes.as_slice())
        .unwrap_or(&[])
}

impl ResourceGroup for ResourceSpans {
    const SIGNAL: &'static str = "traces";

    fn resource_attributes(&self) -> &[KeyValue] {
        attributes_of(&self.resource)
    }

    fn resource_attributes_mut(&mut self) -> &mut Vec<KeyValue> {
        &mut self.resource.get_or_insert_with(Resource::default).attributes
    }
}

impl ResourceGroup for ResourceMetrics {
    const SIGNAL: &'static str = "metrics";

    fn resource_attributes(&self) -> &[KeyValue] {
        attributes_of(&self.resource)
    }

    fn resource_attributes_mut(&mut self) -> &mut Vec<KeyValue> {
        &mut self.resource.get_or_insert_with(Resource::default).attributes
    }
}

impl ResourceGroup for ResourceLogs {
    const SIGNAL: &'static str = "logs";

    fn resource_attributes(&self) -> &[KeyValue] {
        attributes_of(&self.resource)
    }

    fn resource_attributes_mut(&mut self) -> &mut Vec<KeyValue> {
        &mut self.resource.get_or_insert_with(Resource::default).attributes
    }
}
