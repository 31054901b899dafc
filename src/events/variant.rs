use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use super::blackhole::BlackholeSink;
use super::channel::ChannelSink;
use super::mock::MockSink;
use crate::config::EventsType;
use crate::traits::EventSink;
use crate::types::LotteryEvent;

/// Enum representing all possible event sink implementations.
pub enum EventSinkVariant {
    Blackhole(BlackholeSink),
    Channel(ChannelSink),
    Mock(MockSink),
}

impl EventSinkVariant {
    /// Create a new event sink instance based on the specified type.
    pub fn new(events_type: EventsType) -> Self {
        match events_type {
            EventsType::Blackhole => EventSinkVariant::Blackhole(BlackholeSink::new()),
            EventsType::Mock => EventSinkVariant::Mock(MockSink::new()),
        }
    }

    /// Create a channel sink with a custom sender.
    pub fn new_channel(sender: AsyncSender<LotteryEvent>) -> Self {
        EventSinkVariant::Channel(ChannelSink::new(sender))
    }
}

#[async_trait]
impl EventSink for EventSinkVariant {
    fn name(&self) -> &'static str {
        match self {
            EventSinkVariant::Blackhole(inner) => inner.name(),
            EventSinkVariant::Channel(inner) => inner.name(),
            EventSinkVariant::Mock(inner) => inner.name(),
        }
    }

    async fn publish(&self, event: &LotteryEvent) -> Result<()> {
        match self {
            EventSinkVariant::Blackhole(inner) => inner.publish(event).await,
            EventSinkVariant::Channel(inner) => inner.publish(event).await,
            EventSinkVariant::Mock(inner) => inner.publish(event).await,
        }
    }
}
