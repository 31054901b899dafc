pub mod entries;
pub mod events;
pub mod oracle;
pub mod payout;

pub use entries::EntrySource;
pub use events::EventSink;
pub use oracle::RandomnessOracle;
pub use payout::PayoutSink;
