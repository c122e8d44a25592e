use super::ArbitrumNetwork;
use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

/// An error occurring in the [`NetworkRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No network is registered for the chain id.
    #[error("unrecognized network {chain_id}")]
    NotFound {
        /// The requested chain id.
        chain_id: u64,
    },
    /// The chain id reported by a provider does not match the expected network.
    #[error("network mismatch: expected chain id {expected}, provider reported {actual}")]
    NetworkMismatch {
        /// The chain id of the network the caller targets.
        expected: u64,
        /// The chain id reported by the provider.
        actual: u64,
    },
    /// A network with the same chain id is already registered.
    #[error("network {chain_id} already registered")]
    AlreadyRegistered {
        /// The conflicting chain id.
        chain_id: u64,
    },
    /// The custom network definition could not be parsed.
    #[error("invalid network definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// A registry of Arbitrum networks indexed by L2 chain id.
///
/// The registry is cheap to clone and safe to read concurrently. Custom networks are expected to
/// be registered once at startup.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: Arc<RwLock<HashMap<u64, ArbitrumNetwork>>>,
}

impl NetworkRegistry {
    /// Returns an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a registry containing Arbitrum One, Nova and Sepolia.
    pub fn with_default_networks() -> Self {
        let registry = Self::empty();
        {
            let mut networks = registry.networks.write();
            for network in [
                ArbitrumNetwork::arbitrum_one(),
                ArbitrumNetwork::arbitrum_nova(),
                ArbitrumNetwork::arbitrum_sepolia(),
            ] {
                networks.insert(network.chain_id, network);
            }
        }
        registry
    }

    /// Returns the network registered for the chain id.
    pub fn get(&self, chain_id: u64) -> Result<ArbitrumNetwork, RegistryError> {
        self.networks.read().get(&chain_id).cloned().ok_or(RegistryError::NotFound { chain_id })
    }

    /// Returns the network registered for the chain id after checking it matches the chain id a
    /// provider reported.
    pub fn get_checked(
        &self,
        chain_id: u64,
        reported_chain_id: u64,
    ) -> Result<ArbitrumNetwork, RegistryError> {
        ensure_chain_id(chain_id, reported_chain_id)?;
        self.get(chain_id)
    }

    /// Registers a custom network. Fails if the chain id is taken, unless `overwrite` is set.
    pub fn register_custom_network(
        &self,
        mut network: ArbitrumNetwork,
        overwrite: bool,
    ) -> Result<(), RegistryError> {
        let mut networks = self.networks.write();
        if !overwrite && networks.contains_key(&network.chain_id) {
            return Err(RegistryError::AlreadyRegistered { chain_id: network.chain_id });
        }

        tracing::info!(
            target: "bridge::registry",
            chain_id = network.chain_id,
            name = %network.name,
            "registering custom network"
        );
        network.is_custom = true;
        networks.insert(network.chain_id, network);

        Ok(())
    }

    /// Registers the custom networks contained in a JSON array and returns their chain ids.
    pub fn load_custom_networks_json(
        &self,
        json: &str,
        overwrite: bool,
    ) -> Result<Vec<u64>, RegistryError> {
        let networks: Vec<ArbitrumNetwork> = serde_json::from_str(json)?;
        let mut chain_ids = Vec::with_capacity(networks.len());
        for network in networks {
            chain_ids.push(network.chain_id);
            self.register_custom_network(network, overwrite)?;
        }
        Ok(chain_ids)
    }
}

/// Checks the chain id reported by a provider matches the expected one.
pub fn ensure_chain_id(expected: u64, actual: u64) -> Result<(), RegistryError> {
    if expected != actual {
        return Err(RegistryError::NetworkMismatch { expected, actual });
    }
    Ok(())
}
