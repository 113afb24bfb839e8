// SPDX-License-Identifier: Apache-2.0

use crate::processor::ResourceGroup;
use crate::processor::tenant::TenantProcessor;
use crate::telemetry::{Counter, ProcessorCounter, get_meter};
use crate::topology::payload::Message;
use opentelemetry::KeyValue;
use tracing::debug;

/// Pipeline stage that runs the tenant processor on each message.
///
/// Messages the processor rejects are dropped here and never reach the
/// exporters.
pub struct TenantStage<C = ProcessorCounter<u64>> {
    processor: TenantProcessor,
    accepted_resources: C,
    refused_resources: C,
}

impl TenantStage {
    pub fn new(processor: TenantProcessor) -> Self {
        Self {
            processor,
            accepted_resources: ProcessorCounter::OTELCounter(
                get_meter()
                    .u64_counter("rotel_processor_tenant_accepted_resources")
                    .with_description("Number of resources stamped with a tenant identifier")
                    .with_unit("resources")
                    .build(),
            ),
            refused_resources: ProcessorCounter::OTELCounter(
                get_meter()
                    .u64_counter("rotel_processor_tenant_refused_resources")
                    .with_description(
                        "Number of resources dropped because the tenant could not be applied",
                    )
                    .with_unit("resources")
                    .build(),
            ),
        }
    }
}

impl<C: Counter<u64>> TenantStage<C> {
    pub fn with_counters(processor: TenantProcessor, accepted: C, refused: C) -> Self {
        Self {
            processor,
            accepted_resources: accepted,
            refused_resources: refused,
        }
    }

    pub fn processor(&self) -> &TenantProcessor {
        &self.processor
    }

    /// Run the processor on a message, returning `None` when it was dropped.
    pub fn run<T: ResourceGroup>(&self, message: Message<T>) -> Option<Message<T>> {
        let Message {
            request_context,
            payload,
        } = message;
        let count = payload.len() as u64;

        match self.processor.process(request_context.as_ref(), payload) {
            Ok(payload) => {
                self.accepted_resources
                    .add(count, &[KeyValue::new("signal", T::SIGNAL)]);
                Some(Message {
                    request_context,
                    payload,
                })
            }
            Err(e) => {
                debug!(
                    signal = T::SIGNAL,
                    resources = count,
                    error = e.to_string(),
                    "Dropping message rejected by tenant processor"
                );
                self.refused_resources.add(
                    count,
                    &[
                        KeyValue::new("signal", T::SIGNAL),
                        KeyValue::new("reason", e.reason()),
                    ],
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::tenant::{TENANT_ATTRIBUTE_KEY, TENANT_METADATA_KEY};
    use crate::topology::payload::{HttpContext, Metadata, RequestContext};
    use opentelemetry_proto::tonic::metrics::v1::ResourceMetrics;
    use opentelemetry_proto::tonic::trace::v1::ResourceSpans;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingCounter {
        adds: Arc<Mutex<Vec<(u64, Vec<KeyValue>)>>>,
    }

    impl Counter<u64> for RecordingCounter {
        fn add(&self, value: u64, attributes: &[KeyValue]) {
            self.adds.lock().unwrap().push((value, attributes.to_vec()));
        }
    }

    fn tenant_ctx(tenant: &str) -> Option<RequestContext> {
        let md: Metadata = [(TENANT_METADATA_KEY, tenant)].into_iter().collect();
        Some(RequestContext::Http(HttpContext { headers: md }))
    }

    #[test]
    fn forwards_stamped_message() {
        let accepted = RecordingCounter::default();
        let refused = RecordingCounter::default();
        let stage = TenantStage::with_counters(
            TenantProcessor::default(),
            accepted.clone(),
            refused.clone(),
        );

        let msg = Message::new(
            tenant_ctx("someone"),
            vec![ResourceSpans::default(), ResourceSpans::default()],
        );
        let out = stage.run(msg).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out.request_context, tenant_ctx("someone"));
        for rs in &out.payload {
            assert_eq!(rs.resource_attributes()[0].key, TENANT_ATTRIBUTE_KEY);
        }

        assert_eq!(
            *accepted.adds.lock().unwrap(),
            vec![(2, vec![KeyValue::new("signal", "traces")])]
        );
        assert!(refused.adds.lock().unwrap().is_empty());
    }

    #[test]
    fn drops_message_without_tenant() {
        let accepted = RecordingCounter::default();
        let refused = RecordingCounter::default();
        let stage = TenantStage::with_counters(
            TenantProcessor::default(),
            accepted.clone(),
            refused.clone(),
        );

        let msg = Message::new(None, vec![ResourceMetrics::default()]);
        assert!(stage.run(msg).is_none());

        assert!(accepted.adds.lock().unwrap().is_empty());
        assert_eq!(
            *refused.adds.lock().unwrap(),
            vec![(
                1,
                vec![
                    KeyValue::new("signal", "metrics"),
                    KeyValue::new("reason", "missing_tenant"),
                ]
            )]
        );
    }

    #[test]
    fn drops_message_with_conflict() {
        let refused = RecordingCounter::default();
        let stage = TenantStage::with_counters(
            TenantProcessor::default(),
            RecordingCounter::default(),
            refused.clone(),
        );

        let msg = Message::new(tenant_ctx("someone"), vec![ResourceSpans::default()]);
        let stamped = stage.run(msg).unwrap();

        // Running the stage twice is not a no-op
        assert!(stage.run(stamped).is_none());
        assert_eq!(
            refused.adds.lock().unwrap()[0].1[1],
            KeyValue::new("reason", "conflicting_tenant")
        );
    }

    #[test]
    fn noop_counters() {
        let stage = TenantStage::with_counters(
            TenantProcessor::default(),
            ProcessorCounter::NoOpCounter,
            ProcessorCounter::NoOpCounter,
        );
        let msg = Message::new(tenant_ctx("someone"), vec![ResourceSpans::default()]);
        assert!(stage.run(msg).is_some());
    }
}
