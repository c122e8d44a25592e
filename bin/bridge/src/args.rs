//! The command line arguments of the bridge tools.

use crate::{commands::Command, constants};
use std::{path::PathBuf, time::Duration};

use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use alloy_transport::layers::RetryBackoffLayer;
use bridge_primitives::{ArbitrumNetwork, NetworkRegistry};
use bridge_providers::AlloyChainReader;
use clap::Parser;

/// Utilities to inspect and prepare transfers over an Arbitrum bridge.
#[derive(Debug, Parser)]
#[command(name = "bridge", version)]
pub(crate) struct Cli {
    /// The network to operate on.
    #[command(flatten)]
    pub(crate) network: NetworkArgs,
    /// The parent chain provider.
    #[command(flatten)]
    pub(crate) l1: L1ProviderArgs,
    /// The child chain provider.
    #[command(flatten)]
    pub(crate) l2: L2ProviderArgs,
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// The arguments selecting the Arbitrum network.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct NetworkArgs {
    /// The chain id of the child chain.
    #[arg(long = "network.chain-id", id = "network_chain_id", value_name = "CHAIN_ID", default_value_t = constants::DEFAULT_CHAIN_ID)]
    pub(crate) chain_id: u64,
    /// A JSON file holding an array of custom network definitions.
    #[arg(long = "network.custom-file", id = "network_custom_file", value_name = "FILE")]
    pub(crate) custom_file: Option<PathBuf>,
}

impl NetworkArgs {
    /// Returns the selected network, registering the custom networks first.
    pub(crate) fn network(&self) -> eyre::Result<ArbitrumNetwork> {
        let registry = NetworkRegistry::with_default_networks();
        if let Some(path) = &self.custom_file {
            let json = std::fs::read_to_string(path)?;
            let chain_ids = registry.load_custom_networks_json(&json, true)?;
            tracing::debug!(target: "bridge::cli", ?chain_ids, "loaded custom networks");
        }
        Ok(registry.get(self.chain_id)?)
    }
}

/// The arguments for the L1 provider.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct L1ProviderArgs {
    /// The URL for the L1 RPC.
    #[arg(long = "l1.url", id = "l1_url", value_name = "L1_URL")]
    pub(crate) url: Option<reqwest::Url>,
    /// The compute units per second for the provider.
    #[arg(long = "l1.cups", id = "l1_compute_units_per_second", value_name = "L1_COMPUTE_UNITS_PER_SECOND", default_value_t = constants::PROVIDER_COMPUTE_UNITS_PER_SECOND)]
    pub(crate) compute_units_per_second: u64,
    /// The max amount of retries for the provider.
    #[arg(long = "l1.max-retries", id = "l1_max_retries", value_name = "L1_MAX_RETRIES", default_value_t = constants::PROVIDER_MAX_RETRIES)]
    pub(crate) max_retries: u32,
    /// The initial backoff for the provider.
    #[arg(long = "l1.initial-backoff", id = "l1_initial_backoff", value_name = "L1_INITIAL_BACKOFF", default_value_t = constants::PROVIDER_INITIAL_BACKOFF)]
    pub(crate) initial_backoff: u64,
    /// The timeout of a single request, in seconds.
    #[arg(long = "l1.request-timeout", id = "l1_request_timeout", value_name = "L1_REQUEST_TIMEOUT", default_value_t = constants::PROVIDER_REQUEST_TIMEOUT_SECONDS)]
    pub(crate) request_timeout: u64,
}

impl L1ProviderArgs {
    /// Returns a reader of the parent chain.
    pub(crate) fn reader(&self) -> eyre::Result<AlloyChainReader<DynProvider>> {
        let url = self.url.clone().ok_or_else(|| eyre::eyre!("missing --l1.url"))?;
        let provider =
            provider(url, self.max_retries, self.initial_backoff, self.compute_units_per_second);
        Ok(AlloyChainReader::new(provider)
            .with_request_timeout(Duration::from_secs(self.request_timeout)))
    }
}

/// The arguments for the L2 provider.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct L2ProviderArgs {
    /// The URL for the L2 RPC.
    #[arg(long = "l2.url", id = "l2_url", value_name = "L2_URL")]
    pub(crate) url: Option<reqwest::Url>,
    /// The compute units per second for the provider.
    #[arg(long = "l2.cups", id = "l2_compute_units_per_second", value_name = "L2_COMPUTE_UNITS_PER_SECOND", default_value_t = constants::PROVIDER_COMPUTE_UNITS_PER_SECOND)]
    pub(crate) compute_units_per_second: u64,
    /// The max amount of retries for the provider.
    #[arg(long = "l2.max-retries", id = "l2_max_retries", value_name = "L2_MAX_RETRIES", default_value_t = constants::PROVIDER_MAX_RETRIES)]
    pub(crate) max_retries: u32,
    /// The initial backoff for the provider.
    #[arg(long = "l2.initial-backoff", id = "l2_initial_backoff", value_name = "L2_INITIAL_BACKOFF", default_value_t = constants::PROVIDER_INITIAL_BACKOFF)]
    pub(crate) initial_backoff: u64,
    /// The timeout of a single request, in seconds.
    #[arg(long = "l2.request-timeout", id = "l2_request_timeout", value_name = "L2_REQUEST_TIMEOUT", default_value_t = constants::PROVIDER_REQUEST_TIMEOUT_SECONDS)]
    pub(crate) request_timeout: u64,
}

impl L2ProviderArgs {
    /// Returns a reader of the child chain, decoding the L1 block number of its headers.
    pub(crate) fn reader(&self) -> eyre::Result<AlloyChainReader<DynProvider>> {
        let url = self.url.clone().ok_or_else(|| eyre::eyre!("missing --l2.url"))?;
        let provider =
            provider(url, self.max_retries, self.initial_backoff, self.compute_units_per_second);
        Ok(AlloyChainReader::nitro(provider)
            .with_request_timeout(Duration::from_secs(self.request_timeout)))
    }
}

/// Returns an http provider retrying failed requests with backoff.
fn provider(
    url: reqwest::Url,
    max_retries: u32,
    initial_backoff: u64,
    compute_units_per_second: u64,
) -> DynProvider {
    let client = RpcClient::builder()
        .layer(RetryBackoffLayer::new(max_retries, initial_backoff, compute_units_per_second))
        .http(url);
    ProviderBuilder::new().connect_client(client).erased()
}
