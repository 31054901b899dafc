pub mod channel;
pub mod mock;
pub mod noop;
pub mod variant;

pub use channel::ChannelOracle;
pub use mock::MockOracle;
pub use noop::NoopOracle;
pub use variant::OracleVariant;
