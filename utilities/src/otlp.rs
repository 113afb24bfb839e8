use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::common::v1::any_value::Value::StringValue;
use opentelemetry_proto::tonic::common::v1::{AnyValue, InstrumentationScope, KeyValue};
use opentelemetry_proto::tonic::logs::v1::{LogRecord, ResourceLogs, ScopeLogs};
use opentelemetry_proto::tonic::metrics::v1::metric::Data;
use opentelemetry_proto::tonic::metrics::v1::number_data_point::Value;
use opentelemetry_proto::tonic::metrics::v1::{
    Gauge, Metric, NumberDataPoint, ResourceMetrics, ScopeMetrics,
};
use opentelemetry_proto::tonic::resource::v1::Resource;
use opentelemetry_proto::tonic::trace::v1::span::SpanKind;
use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span, Status};

const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.21.0";

// Fixed so that fixtures built separately compare equal
const TIMESTAMP_NS: u64 = 1_581_452_772_000_000_321;

/// Test fixtures for OTLP payloads.
///
/// Every resource group holds one scope with one signal record. Attributes
/// passed in are the only resource attributes; `None` leaves the resource unset.
pub struct FakeOTLP;

impl FakeOTLP {
    pub fn trace_service_request_with_resources(num_resources: usize) -> ExportTraceServiceRequest {
        ExportTraceServiceRequest {
            resource_spans: (0..num_resources)
                .map(|i| {
                    let name = service_name(i);
                    Self::resource_spans(Some(&[("service.name", name.as_str())]))
                })
                .collect(),
        }
    }

    pub fn metrics_service_request_with_resources(
        num_resources: usize,
    ) -> ExportMetricsServiceRequest {
        ExportMetricsServiceRequest {
            resource_metrics: (0..num_resources)
                .map(|i| {
                    let name = service_name(i);
                    Self::resource_metrics(Some(&[("service.name", name.as_str())]))
                })
                .collect(),
        }
    }

    pub fn logs_service_request_with_resources(num_resources: usize) -> ExportLogsServiceRequest {
        ExportLogsServiceRequest {
            resource_logs: (0..num_resources)
                .map(|i| {
                    let name = service_name(i);
                    Self::resource_logs(Some(&[("service.name", name.as_str())]))
                })
                .collect(),
        }
    }

    pub fn resource_spans(attrs: Option<&[(&str, &str)]>) -> ResourceSpans {
        let span = Span {
            trace_id: vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            span_id: vec![2, 2, 2, 2, 2, 2, 2, 2],
            trace_state: "".to_string(),
            parent_span_id: vec![],
            flags: 0,
            name: "operationA".to_string(),
            kind: SpanKind::Internal.into(),
            start_time_unix_nano: TIMESTAMP_NS,
            end_time_unix_nano: TIMESTAMP_NS + 1_000_000,
            attributes: vec![string_attr("http.method", "GET")],
            dropped_attributes_count: 0,
            events: vec![],
            dropped_events_count: 0,
            links: vec![],
            dropped_links_count: 0,
            status: Some(Status::default()),
        };

        ResourceSpans {
            resource: resource(attrs),
            scope_spans: vec![ScopeSpans {
                scope: Some(scope()),
                spans: vec![span],
                schema_url: SCHEMA_URL.to_string(),
            }],
            schema_url: SCHEMA_URL.to_string(),
        }
    }

    pub fn resource_metrics(attrs: Option<&[(&str, &str)]>) -> ResourceMetrics {
        let metric = Metric {
            name: "test-metric".to_string(),
            description: "An example OTLP Metric".to_string(),
            unit: "".to_string(),
            metadata: vec![],
            data: Some(Data::Gauge(Gauge {
                data_points: vec![NumberDataPoint {
                    attributes: vec![],
                    start_time_unix_nano: TIMESTAMP_NS,
                    time_unix_nano: TIMESTAMP_NS,
                    exemplars: vec![],
                    flags: 0,
                    value: Some(Value::AsInt(123)),
                }],
            })),
        };

        ResourceMetrics {
            resource: resource(attrs),
            scope_metrics: vec![ScopeMetrics {
                scope: Some(scope()),
                metrics: vec![metric],
                schema_url: SCHEMA_URL.to_string(),
            }],
            schema_url: SCHEMA_URL.to_string(),
        }
    }

    pub fn resource_logs(attrs: Option<&[(&str, &str)]>) -> ResourceLogs {
        let log = LogRecord {
            time_unix_nano: TIMESTAMP_NS,
            observed_time_unix_nano: TIMESTAMP_NS,
            severity_number: 9,
            severity_text: "Info".to_string(),
            body: Some(AnyValue {
                value: Some(StringValue("This is a log message".to_string())),
            }),
            attributes: vec![],
            dropped_attributes_count: 0,
            flags: 0,
            trace_id: vec![],
            span_id: vec![],
            event_name: "".to_string(),
        };

        ResourceLogs {
            resource: resource(attrs),
            scope_logs: vec![ScopeLogs {
                scope: Some(scope()),
                log_records: vec![log],
                schema_url: SCHEMA_URL.to_string(),
            }],
            schema_url: SCHEMA_URL.to_string(),
        }
    }
}

pub fn string_attr(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(StringValue(value.to_string())),
        }),
    }
}

fn resource(attrs: Option<&[(&str, &str)]>) -> Option<Resource> {
    attrs.map(|attrs| Resource {
        attributes: attrs.iter().map(|(k, v)| string_attr(k, v)).collect(),
        dropped_attributes_count: 0,
    })
}

fn scope() -> InstrumentationScope {
    InstrumentationScope {
        name: "scope".to_string(),
        version: "0.0.1".to_string(),
        attributes: vec![],
        dropped_attributes_count: 0,
    }
}

fn service_name(i: usize) -> String {
    format!("service-{}", i)
}
