// SPDX-License-Identifier: Apache-2.0

pub mod init;
pub mod processor;
pub mod telemetry;
pub mod topology;
