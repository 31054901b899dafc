use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Base configuration for the app.
/// Parsed from CLI arguments by `main`, constructed directly in tests.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "fairpot", about = "Periodic verifiably-fair lottery engine")]
pub struct BaseConfig {
    /// Minimum payment required to enter the current round. Immutable for
    /// the lifetime of the process.
    #[arg(long, default_value_t = 1_000)]
    pub entrance_fee: u64,

    /// Seconds a round must accrue before it is eligible to close
    /// (e.g. 86400 for one drawing per day).
    #[arg(long, default_value_t = 86_400)]
    pub round_interval_secs: u64,

    /// Seconds between eligibility polls by the upkeep task.
    #[arg(long, default_value_t = 5)]
    pub upkeep_poll_secs: u64,

    /// Whether the upkeep task triggers closes automatically.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub auto_upkeep: bool,

    /// Randomness provider backing the oracle boundary.
    #[arg(long, value_enum, default_value_t = OracleType::Noop)]
    pub oracle_type: OracleType,

    /// Payout rail used to transfer the pool to the winner.
    #[arg(long, value_enum, default_value_t = PayoutType::Bank)]
    pub payout_type: PayoutType,

    /// Source of participant entries.
    #[arg(long, value_enum, default_value_t = EntriesType::Noop)]
    pub entries_type: EntriesType,

    /// Sink for lottery event notifications.
    #[arg(long, value_enum, default_value_t = EventsType::Blackhole)]
    pub events_type: EventsType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OracleType {
    Mock,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum PayoutType {
    Bank,
    Mock,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum EntriesType {
    Mock,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum EventsType {
    Blackhole,
    Mock,
}

impl BaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.entrance_fee == 0 {
            bail!("entrance_fee must be positive");
        }
        if self.round_interval_secs == 0 {
            bail!("round_interval_secs must be positive");
        }
        Ok(())
    }
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            entrance_fee: 1_000,
            round_interval_secs: 86_400, // 1 day
            upkeep_poll_secs: 5,
            auto_upkeep: true,
            oracle_type: OracleType::Noop,
            payout_type: PayoutType::Bank,
            entries_type: EntriesType::Noop,
            events_type: EventsType::Blackhole,
        }
    }
}
