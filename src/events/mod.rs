pub mod blackhole;
pub mod channel;
pub mod mock;
pub mod variant;

pub use blackhole::BlackholeSink;
pub use channel::ChannelSink;
pub use mock::MockSink;
pub use variant::EventSinkVariant;
