//! The commands of the bridge tools.

use crate::args::Cli;

use alloy_primitives::{Address, U256};
use bridge_event_scanner::{BlockRange, EraAwareEventScanner};
use bridge_gas_estimator::{GasEstimationProbe, ParentToChildRequest, RetryableTicketCall};
use bridge_primitives::{
    alias_str, network::ensure_chain_id, AliasDirection, ArbitrumNetwork, CallRequest,
};
use bridge_providers::{ChainReader, NodeInterfaceGasOracle};
use bridge_search::{BlockCorrelationSearch, InclusionRangeSearch, SearchWindow};

/// A bridge command.
#[derive(Debug, Clone, clap::Subcommand)]
pub(crate) enum Command {
    /// Prints the L2 alias of an L1 contract address.
    Alias {
        /// The L1 address.
        address: String,
    },
    /// Prints the L1 address behind an L2 alias.
    UndoAlias {
        /// The aliased L2 address.
        address: String,
    },
    /// Lists the messages sent from the child chain to the parent chain.
    ChildToParentEvents {
        /// The first child chain block scanned.
        #[arg(long, default_value_t = 0)]
        from: u64,
        /// The last child chain block scanned, the head if omitted.
        #[arg(long)]
        to: Option<u64>,
        /// Only list the messages sent to this parent chain address.
        #[arg(long)]
        destination: Option<Address>,
    },
    /// Prints the child chain blocks produced under an L1 block.
    L1BlockRange {
        /// The L1 block number.
        l1_block: u64,
        /// The first child chain block searched, the Nitro genesis block if omitted.
        #[arg(long)]
        min: Option<u64>,
        /// The last child chain block searched, the head if omitted.
        #[arg(long)]
        max: Option<u64>,
        /// Only print the first block of the range.
        #[arg(long)]
        first: bool,
        /// Fall back to the first block produced under a later L1 block.
        #[arg(long, requires = "first")]
        allow_greater: bool,
    },
    /// Finds the latest delayed message which can be force included.
    ForceInclusion,
    /// Estimates the retryable ticket depositing ETH to the child chain.
    EstimateDeposit {
        /// The parent chain sender.
        #[arg(long)]
        from: Address,
        /// The child chain recipient.
        #[arg(long)]
        to: Address,
        /// The deposited amount, in wei.
        #[arg(long)]
        amount: U256,
    },
}

impl Command {
    /// Runs the command.
    pub(crate) async fn execute(&self, cli: &Cli) -> eyre::Result<()> {
        match self {
            Self::Alias { address } => {
                println!("{}", alias_str(address, AliasDirection::Apply)?);
            }
            Self::UndoAlias { address } => {
                println!("{}", alias_str(address, AliasDirection::Undo)?);
            }
            Self::ChildToParentEvents { from, to, destination } => {
                let network = cli.network.network()?;
                let range = match to {
                    Some(to) => BlockRange::from(*from..=*to),
                    None => BlockRange::from_block(*from),
                };
                child_to_parent_events(cli, &network, *destination, range).await?;
            }
            Self::L1BlockRange { l1_block, min, max, first, allow_greater } => {
                let network = cli.network.network()?;
                let search = BlockCorrelationSearch::new(cli.l2.reader()?, &network);
                let window = SearchWindow { min_l2_block: *min, max_l2_block: *max };
                if *first {
                    let block =
                        search.get_first_block_for_l1_block(*l1_block, *allow_greater, window);
                    match block.await? {
                        Some(block) => println!("{block}"),
                        None => println!("no block found for l1 block {l1_block}"),
                    }
                } else {
                    let range = search.get_block_ranges_for_l1_block(*l1_block, window).await?;
                    println!("{range}");
                }
            }
            Self::ForceInclusion => force_inclusion(cli).await?,
            Self::EstimateDeposit { from, to, amount } => {
                estimate_deposit(cli, *from, *to, *amount).await?;
            }
        }

        Ok(())
    }
}

async fn child_to_parent_events(
    cli: &Cli,
    network: &ArbitrumNetwork,
    destination: Option<Address>,
    range: BlockRange,
) -> eyre::Result<()> {
    let scanner = EraAwareEventScanner::new(cli.l2.reader()?);
    let events = scanner.fetch_child_to_parent_events(network, destination, range).await?;
    tracing::info!(target: "bridge::cli", count = events.len(), "fetched child to parent events");

    for event in events {
        let era = if event.event.is_classic() { "classic" } else { "nitro" };
        println!(
            "block={} log_index={} era={era} position={} caller={} destination={} value={}",
            event.block_number,
            event.log_index,
            event.event.position(),
            event.event.caller(),
            event.event.destination(),
            event.event.callvalue(),
        );
    }

    Ok(())
}

async fn force_inclusion(cli: &Cli) -> eyre::Result<()> {
    let network = cli.network.network()?;
    let reader = cli.l1.reader()?;
    ensure_chain_id(network.parent_chain_id, reader.chain_id().await?)?;

    let search = InclusionRangeSearch::new(reader, network.clone());
    let Some(params) = search.find_force_includable().await? else {
        println!("no delayed message to force include");
        return Ok(());
    };

    let event = &params.event;
    println!("message index:       {}", event.message_index);
    println!("parent block:        {}", event.block_number);
    println!("timestamp:           {}", event.timestamp);
    println!("delayed acc:         {}", params.delayed_acc);
    print_call(&CallRequest::new(
        network.eth_bridge.sequencer_inbox,
        params.force_inclusion_calldata(),
        U256::ZERO,
    ));

    Ok(())
}

async fn estimate_deposit(cli: &Cli, from: Address, to: Address, amount: U256) -> eyre::Result<()> {
    let network = cli.network.network()?;
    let (l1, l2) = (cli.l1.reader()?, cli.l2.reader()?);
    let (l1_chain_id, l2_chain_id) = tokio::try_join!(l1.chain_id(), l2.chain_id())?;
    ensure_chain_id(network.parent_chain_id, l1_chain_id)?;
    ensure_chain_id(network.chain_id, l2_chain_id)?;

    let probe = GasEstimationProbe::new(l1.clone(), NodeInterfaceGasOracle::new(l1, l2));
    let request = ParentToChildRequest::retryable_ticket(RetryableTicketCall::eth_deposit(
        network.eth_bridge.inbox,
        from,
        to,
        amount,
    ));
    let retryable = probe.estimate(&request).await?;

    let estimate = retryable.estimate();
    println!("gas limit:           {}", estimate.gas_limit());
    println!("max fee per gas:     {}", estimate.max_fee_per_gas());
    println!("max submission cost: {}", estimate.max_submission_cost());
    println!("deposit:             {}", estimate.deposit());
    print_call(&retryable.call());

    if !retryable.is_valid().await {
        tracing::warn!(target: "bridge::cli", "estimate outdated by the time it was revalidated");
    }

    Ok(())
}

fn print_call(call: &CallRequest) {
    if let Some(from) = call.from {
        println!("from:                {from}");
    }
    println!("to:                  {}", call.to);
    println!("value:               {}", call.value);
    println!("data:                {}", call.data);
}
