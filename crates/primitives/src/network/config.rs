use alloy_chains::NamedChain;
use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// The address of the Arbitrum One bridge contract on Mainnet.
pub const ARBITRUM_ONE_BRIDGE_ADDRESS: Address =
    address!("0x8315177aB297bA92A06054cE80a67Ed4DBd7ed3a");

/// The address of the Arbitrum One inbox contract on Mainnet.
pub const ARBITRUM_ONE_INBOX_ADDRESS: Address =
    address!("0x4Dbd4fc535Ac27206064B68FfCf827b0A60BAB3f");

/// The address of the Arbitrum One sequencer inbox contract on Mainnet.
pub const ARBITRUM_ONE_SEQUENCER_INBOX_ADDRESS: Address =
    address!("0x1c479675ad559DC151F6Ec7ed3FbF8ceE79582B6");

/// The address of the Arbitrum One outbox contract on Mainnet.
pub const ARBITRUM_ONE_OUTBOX_ADDRESS: Address =
    address!("0x0B9857ae2D4A3DBe74ffE1d7DF045bb7F96E4840");

/// The address of the Arbitrum One rollup contract on Mainnet.
pub const ARBITRUM_ONE_ROLLUP_ADDRESS: Address =
    address!("0x5eF0D09d1E6204141B4d37530808eD19f60FBa35");

/// The first Arbitrum One block produced by Nitro.
pub const ARBITRUM_ONE_NITRO_GENESIS_BLOCK: u64 = 22_207_817;

/// The Mainnet block at which Arbitrum One migrated to Nitro.
pub const ARBITRUM_ONE_NITRO_GENESIS_L1_BLOCK: u64 = 15_447_158;

/// The address of the Arbitrum Nova bridge contract on Mainnet.
pub const ARBITRUM_NOVA_BRIDGE_ADDRESS: Address =
    address!("0xC1Ebd02f738644983b6C4B2d440b8e77DdE276Bd");

/// The address of the Arbitrum Nova inbox contract on Mainnet.
pub const ARBITRUM_NOVA_INBOX_ADDRESS: Address =
    address!("0xc4448b71118c9071Bcb9734A0EAc55D18A153949");

/// The address of the Arbitrum Nova sequencer inbox contract on Mainnet.
pub const ARBITRUM_NOVA_SEQUENCER_INBOX_ADDRESS: Address =
    address!("0x211E1c4c7f1bF5351Ac850Ed10FD68CFfCF6c21b");

/// The address of the Arbitrum Nova outbox contract on Mainnet.
pub const ARBITRUM_NOVA_OUTBOX_ADDRESS: Address =
    address!("0xD4B80C3D7240325D18E645B49e6535A3Bf95cc58");

/// The address of the Arbitrum Nova rollup contract on Mainnet.
pub const ARBITRUM_NOVA_ROLLUP_ADDRESS: Address =
    address!("0xFb209827c58283535b744575e11953DCC4bEAD88");

/// The address of the Arbitrum Sepolia bridge contract on Sepolia.
pub const ARBITRUM_SEPOLIA_BRIDGE_ADDRESS: Address =
    address!("0x38f918D0E9F1b721EDaA41302E399fa1B79333a9");

/// The address of the Arbitrum Sepolia inbox contract on Sepolia.
pub const ARBITRUM_SEPOLIA_INBOX_ADDRESS: Address =
    address!("0xaAe29B0366299461418F5324a79Afc425BE5ae21");

/// The address of the Arbitrum Sepolia sequencer inbox contract on Sepolia.
pub const ARBITRUM_SEPOLIA_SEQUENCER_INBOX_ADDRESS: Address =
    address!("0x6c97864CE4bEf387dE0b3310A44230f7E3F1be0D");

/// The address of the Arbitrum Sepolia outbox contract on Sepolia.
pub const ARBITRUM_SEPOLIA_OUTBOX_ADDRESS: Address =
    address!("0x65f07C7D521164a4d5DaC6eB8Fac8DA067A3B78F");

/// The address of the Arbitrum Sepolia rollup contract on Sepolia.
pub const ARBITRUM_SEPOLIA_ROLLUP_ADDRESS: Address =
    address!("0xd80810638dbDF9081b72C1B33c65375e807281C8");

/// The confirmation period of assertions on the production networks, in L1 blocks.
pub const MAINNET_CONFIRM_PERIOD_BLOCKS: u64 = 45_818;

/// The confirmation period of assertions on Arbitrum Sepolia, in L1 blocks.
pub const SEPOLIA_CONFIRM_PERIOD_BLOCKS: u64 = 20;

/// The default maximum delay before a delayed message can be force included, in L1 blocks.
pub const DEFAULT_MAX_DELAY_BLOCKS: u64 = 5_760;

/// The default maximum delay before a delayed message can be force included, in seconds.
pub const DEFAULT_MAX_DELAY_SECONDS: u64 = 86_400;

/// The addresses of the bridge contracts deployed on the parent chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthBridge {
    /// The bridge contract, holding the delayed inbox.
    pub bridge: Address,
    /// The inbox contract, entry point for retryable tickets.
    pub inbox: Address,
    /// The sequencer inbox contract.
    pub sequencer_inbox: Address,
    /// The outbox contract, executing L2 to L1 messages.
    pub outbox: Address,
    /// The rollup contract.
    pub rollup: Address,
}

/// The configuration of an Arbitrum chain and of its bridge to the parent chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrumNetwork {
    /// The chain id of the L2.
    pub chain_id: u64,
    /// The chain id of the parent chain.
    pub parent_chain_id: u64,
    /// A human readable name.
    pub name: String,
    /// The first L2 block emitting Nitro era events. Zero for chains born on Nitro.
    #[serde(default)]
    pub nitro_genesis_block: u64,
    /// The parent chain block at which the chain migrated to Nitro.
    #[serde(default)]
    pub nitro_genesis_l1_block: u64,
    /// The bridge contracts.
    pub eth_bridge: EthBridge,
    /// The assertion confirmation period, in parent chain blocks.
    pub confirm_period_blocks: u64,
    /// The maximum delay before force inclusion, in parent chain blocks.
    #[serde(default = "default_max_delay_blocks")]
    pub max_delay_blocks: u64,
    /// The maximum delay before force inclusion, in seconds.
    #[serde(default = "default_max_delay_seconds")]
    pub max_delay_seconds: u64,
    /// Whether the network was registered at runtime.
    #[serde(default)]
    pub is_custom: bool,
}

const fn default_max_delay_blocks() -> u64 {
    DEFAULT_MAX_DELAY_BLOCKS
}

const fn default_max_delay_seconds() -> u64 {
    DEFAULT_MAX_DELAY_SECONDS
}

impl ArbitrumNetwork {
    /// Returns the configuration for Arbitrum One.
    pub fn arbitrum_one() -> Self {
        Self {
            chain_id: NamedChain::Arbitrum as u64,
            parent_chain_id: NamedChain::Mainnet as u64,
            name: "Arbitrum One".to_string(),
            nitro_genesis_block: ARBITRUM_ONE_NITRO_GENESIS_BLOCK,
            nitro_genesis_l1_block: ARBITRUM_ONE_NITRO_GENESIS_L1_BLOCK,
            eth_bridge: EthBridge {
                bridge: ARBITRUM_ONE_BRIDGE_ADDRESS,
                inbox: ARBITRUM_ONE_INBOX_ADDRESS,
                sequencer_inbox: ARBITRUM_ONE_SEQUENCER_INBOX_ADDRESS,
                outbox: ARBITRUM_ONE_OUTBOX_ADDRESS,
                rollup: ARBITRUM_ONE_ROLLUP_ADDRESS,
            },
            confirm_period_blocks: MAINNET_CONFIRM_PERIOD_BLOCKS,
            max_delay_blocks: DEFAULT_MAX_DELAY_BLOCKS,
            max_delay_seconds: DEFAULT_MAX_DELAY_SECONDS,
            is_custom: false,
        }
    }

    /// Returns the configuration for Arbitrum Nova.
    pub fn arbitrum_nova() -> Self {
        Self {
            chain_id: NamedChain::ArbitrumNova as u64,
            parent_chain_id: NamedChain::Mainnet as u64,
            name: "Arbitrum Nova".to_string(),
            nitro_genesis_block: 0,
            nitro_genesis_l1_block: 0,
            eth_bridge: EthBridge {
                bridge: ARBITRUM_NOVA_BRIDGE_ADDRESS,
                inbox: ARBITRUM_NOVA_INBOX_ADDRESS,
                sequencer_inbox: ARBITRUM_NOVA_SEQUENCER_INBOX_ADDRESS,
                outbox: ARBITRUM_NOVA_OUTBOX_ADDRESS,
                rollup: ARBITRUM_NOVA_ROLLUP_ADDRESS,
            },
            confirm_period_blocks: MAINNET_CONFIRM_PERIOD_BLOCKS,
            max_delay_blocks: DEFAULT_MAX_DELAY_BLOCKS,
            max_delay_seconds: DEFAULT_MAX_DELAY_SECONDS,
            is_custom: false,
        }
    }

    /// Returns the configuration for Arbitrum Sepolia.
    pub fn arbitrum_sepolia() -> Self {
        Self {
            chain_id: NamedChain::ArbitrumSepolia as u64,
            parent_chain_id: NamedChain::Sepolia as u64,
            name: "Arbitrum Sepolia".to_string(),
            nitro_genesis_block: 0,
            nitro_genesis_l1_block: 0,
            eth_bridge: EthBridge {
                bridge: ARBITRUM_SEPOLIA_BRIDGE_ADDRESS,
                inbox: ARBITRUM_SEPOLIA_INBOX_ADDRESS,
                sequencer_inbox: ARBITRUM_SEPOLIA_SEQUENCER_INBOX_ADDRESS,
                outbox: ARBITRUM_SEPOLIA_OUTBOX_ADDRESS,
                rollup: ARBITRUM_SEPOLIA_ROLLUP_ADDRESS,
            },
            confirm_period_blocks: SEPOLIA_CONFIRM_PERIOD_BLOCKS,
            max_delay_blocks: DEFAULT_MAX_DELAY_BLOCKS,
            max_delay_seconds: DEFAULT_MAX_DELAY_SECONDS,
            is_custom: false,
        }
    }

    /// Returns true if the L2 block predates the Nitro migration.
    pub const fn is_classic_block(&self, block_number: u64) -> bool {
        block_number < self.nitro_genesis_block
    }
}
