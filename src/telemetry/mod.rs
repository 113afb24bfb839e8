// SPDX-License-Identifier: Apache-2.0

use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::metrics::Meter;

pub fn get_meter() -> Meter {
    global::meter("processors")
}

pub trait Counter<T> {
    fn add(&self, value: T, attributes: &[KeyValue]);
}

#[derive(Clone)]
pub enum ProcessorCounter<T> {
    OTELCounter(opentelemetry::metrics::Counter<T>),
    NoOpCounter,
}

impl<T> Counter<T> for ProcessorCounter<T> {
    fn add(&self, value: T, attributes: &[KeyValue]) {
        match self {
            ProcessorCounter::OTELCounter(c) => c.add(value, attributes),
            ProcessorCounter::NoOpCounter => {}
        }
    }
}
