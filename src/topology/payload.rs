// SPDX-License-Identifier: Apache-2.0

use http::HeaderMap;
use std::collections::{BTreeMap, HashMap};
use tonic::metadata::{KeyAndValueRef, MetadataMap};

#[derive(Clone, Debug, PartialEq)]
pub struct Message<T> {
    pub request_context: Option<RequestContext>,
    pub payload: Vec<T>,
}

impl<T> Message<T> {
    pub fn new(request_context: Option<RequestContext>, payload: Vec<T>) -> Self {
        Self {
            request_context,
            payload,
        }
    }

    // Used in testing
    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.payload.len()
    }
}

/// Request metadata captured by a receiver before the payload enters the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestContext {
    Http(HttpContext),
    Grpc(GrpcContext),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HttpContext {
    pub headers: Metadata,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrpcContext {
    pub metadata: Metadata,
}

impl RequestContext {
    pub fn from_http_headers(headers: &HeaderMap) -> Self {
        RequestContext::Http(HttpContext {
            headers: Metadata::from_headers(headers),
        })
    }

    pub fn from_grpc_metadata(metadata: &MetadataMap) -> Self {
        RequestContext::Grpc(GrpcContext {
            metadata: Metadata::from_grpc(metadata),
        })
    }

    /// Metadata for the request, independent of the transport it arrived on.
    pub fn metadata(&self) -> &Metadata {
        match self {
            RequestContext::Http(ctx) => &ctx.headers,
            RequestContext::Grpc(ctx) => &ctx.metadata,
        }
    }
}

/// Multi-valued request metadata.
///
/// Keys keep the casing they were added with. Lookups try the exact key
/// first and fall back to a case-insensitive match, the same way the
/// collector's client metadata behaves; HTTP/2 and gRPC deliver header names
/// lowercase. Keys are kept sorted so the fallback match is deterministic.
/// Values for a key keep the order they were added in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<String>>,
}

impl Metadata {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Build metadata from every header in the map. Values that are not
    /// visible ASCII are skipped.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut md = Metadata::default();
        for name in headers.keys() {
            for value in headers.get_all(name).iter() {
                if let Ok(value_str) = value.to_str() {
                    md.append(name.as_str(), value_str);
                }
            }
        }
        md
    }

    /// Build metadata from the ASCII entries of gRPC metadata. Binary
    /// (`-bin`) entries are skipped.
    pub fn from_grpc(metadata: &MetadataMap) -> Self {
        let mut md = Metadata::default();
        for entry in metadata.iter() {
            if let KeyAndValueRef::Ascii(key, value) = entry {
                if let Ok(value_str) = value.to_str() {
                    md.append(key.as_str(), value_str);
                }
            }
        }
        md
    }

    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .push(value.into());
    }

    /// All values for `key` in arrival order, empty when the key is absent.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries
            .get(key)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(key))
                    .map(|(_, v)| v)
            })
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut md = Metadata::default();
        for (k, v) in iter {
            md.append(k.as_ref(), v);
        }
        md
    }
}
