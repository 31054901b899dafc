// Library exports for testing and external use

pub mod config;
pub mod coordinator;
pub mod entries;
pub mod error;
pub mod events;
pub mod ledger;
pub mod lottery;
pub mod oracle;
pub mod payout;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use config::{BaseConfig, EntriesType, EventsType, OracleType, PayoutType};
pub use coordinator::{EligibilityReport, PendingRequest, UpkeepCoordinator};
pub use error::LotteryError;
pub use ledger::{CloseSnapshot, RoundLedger};
pub use lottery::Fairpot;
pub use traits::{EntrySource, EventSink, PayoutSink, RandomnessOracle};
pub use types::{
    Address, EntryRequest, Fulfillment, LotteryEvent, Payout, RandomnessCorrelation, RequestId,
    RoundState, Settlement,
};

// Re-export variant enums for convenience
pub use entries::{EntrySourceVariant, MockEntries};
pub use events::{EventSinkVariant, MockSink};
pub use oracle::{MockOracle, NoopOracle, OracleVariant};
pub use payout::{MemoryBank, MockPayout, PayoutVariant};
