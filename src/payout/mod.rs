pub mod bank;
pub mod mock;
pub mod noop;
pub mod variant;

pub use bank::MemoryBank;
pub use mock::MockPayout;
pub use noop::NoopPayout;
pub use variant::PayoutVariant;
