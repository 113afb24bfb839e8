// SPDX-License-Identifier: Apache-2.0

use crate::processor::tenant::{
    TENANT_ATTRIBUTE_KEY, TENANT_METADATA_KEY, TenantProcessor, TenantProcessorConfig,
};
use clap::Args;

// Tenant processor settings
#[derive(Debug, Clone, Args)]
pub struct TenantProcessorArgs {
    /// Request metadata key (HTTP header or gRPC metadata) carrying the tenant identifier
    #[arg(long, env = "ROTEL_TENANT_METADATA_KEY", default_value = TENANT_METADATA_KEY)]
    pub tenant_metadata_key: String,

    /// Resource attribute the tenant identifier is written to
    #[arg(long, env = "ROTEL_TENANT_ATTRIBUTE_KEY", default_value = TENANT_ATTRIBUTE_KEY)]
    pub tenant_attribute_key: String,
}

pub fn build_tenant_processor_config(
    args: TenantProcessorArgs,
) -> Result<TenantProcessorConfig, String> {
    let config = TenantProcessorConfig::default()
        .with_metadata_key(args.tenant_metadata_key)
        .with_attribute_key(args.tenant_attribute_key);
    config.validate()?;
    Ok(config)
}

pub fn build_tenant_processor(args: TenantProcessorArgs) -> Result<TenantProcessor, String> {
    build_tenant_processor_config(args).map(TenantProcessor::new)
}
