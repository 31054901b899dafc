//! Core Fairpot struct and initialization - no business logic.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::BaseConfig;
use crate::coordinator::UpkeepCoordinator;
use crate::entries::EntrySourceVariant;
use crate::events::EventSinkVariant;
use crate::ledger::RoundLedger;
use crate::oracle::OracleVariant;
use crate::payout::PayoutVariant;

/// Main application orchestrator for the lottery engine.
pub struct Fairpot {
    /// Source of participant entries.
    pub entries: EntrySourceVariant,

    /// Randomness provider boundary.
    pub oracle: OracleVariant,

    /// Transfer rail for the winner payout.
    pub payout: PayoutVariant,

    /// Sink for lottery event notifications.
    pub events: EventSinkVariant,

    /// Global/base configuration.
    pub config: BaseConfig,

    /// Authoritative round state. One lock mutex serializes every mutating
    /// operation, which is the concurrency model the round logic assumes.
    pub ledger: Arc<tokio::sync::Mutex<RoundLedger>>,

    /// Close gating and pending-request bookkeeping.
    pub coordinator: Arc<tokio::sync::Mutex<UpkeepCoordinator>>,
}

impl Fairpot {
    /// Create a new Fairpot with explicit collaborators.
    pub fn new(
        entries: EntrySourceVariant,
        oracle: OracleVariant,
        payout: PayoutVariant,
        events: EventSinkVariant,
        config: BaseConfig,
    ) -> Self {
        let now = crate::lottery::tasks::now_secs();
        let ledger = Arc::new(tokio::sync::Mutex::new(RoundLedger::new(
            config.entrance_fee,
            now,
        )));
        let coordinator = Arc::new(tokio::sync::Mutex::new(UpkeepCoordinator::new(
            config.round_interval_secs,
        )));

        Self {
            entries,
            oracle,
            payout,
            events,
            config,
            ledger,
            coordinator,
        }
    }

    /// Initialize Fairpot with the collaborator types named in the config.
    pub fn initialize(config: BaseConfig) -> Result<Self> {
        config.validate()?;

        let entries = EntrySourceVariant::new(config.entries_type);
        let oracle = OracleVariant::new(config.oracle_type);
        let payout = PayoutVariant::new(config.payout_type);
        let events = EventSinkVariant::new(config.events_type);

        info!(
            entrance_fee = config.entrance_fee,
            round_interval_secs = config.round_interval_secs,
            "Fairpot initialized"
        );

        Ok(Self::new(entries, oracle, payout, events, config))
    }
}
