pub mod channel;
pub mod mock;
pub mod noop;
pub mod variant;

pub use channel::ChannelEntries;
pub use mock::MockEntries;
pub use noop::NoopEntries;
pub use variant::EntrySourceVariant;
