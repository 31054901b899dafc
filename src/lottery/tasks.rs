//! Async task orchestration with tokio::spawn - drives the round logic in
//! the ledger and coordinator.
//!
//! The mutating operations (enter, request close, apply fulfillment) all
//! serialize through the coordinator/ledger mutexes, so each executes to
//! completion without interleaving with any other mutating operation. The
//! only asynchrony is the gap between a close request and its eventual
//! fulfillment, during which the round is Closing and rejects entries.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use kanal::unbounded_async;
use tokio::sync::Mutex;
use tracing::{debug, error, info, span, warn, Instrument, Level};

use crate::coordinator::UpkeepCoordinator;
use crate::error::LotteryError;
use crate::events::EventSinkVariant;
use crate::ledger::RoundLedger;
use crate::oracle::OracleVariant;
use crate::payout::PayoutVariant;
use crate::traits::{EntrySource, EventSink, PayoutSink, RandomnessOracle};
use crate::types::{EntryRequest, Fulfillment, LotteryEvent, RequestId, Settlement};

use super::core::Fairpot;

/// Current unix time in seconds.
pub fn now_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl Fairpot {
    /// Run the application: spawn all tasks and orchestrate the system.
    pub async fn run(self) -> Result<()> {
        info!(
            "Starting fairpot with entrance_fee={} round_interval_secs={}",
            self.config.entrance_fee, self.config.round_interval_secs
        );

        let (entry_tx, entry_rx) = unbounded_async::<EntryRequest>();
        // Channel the oracle binding delivers fulfillments on.
        let (fulfillment_tx, fulfillment_rx) = unbounded_async::<Fulfillment>();

        // Destructure self so we can move individual fields into tasks.
        let Fairpot {
            mut entries,
            mut oracle,
            payout,
            events,
            config,
            ledger,
            coordinator,
        } = self;

        entries.open(entry_tx).await?;
        oracle.open(fulfillment_tx).await?;

        let oracle = Arc::new(Mutex::new(oracle));
        let payout = Arc::new(Mutex::new(payout));
        let events = Arc::new(events);

        // === Entry task: admit participants while the round is open ===
        let entry_handle = {
            let ledger = Arc::clone(&ledger);
            let events = Arc::clone(&events);
            tokio::spawn(
                async move {
                    info!("Entry task started");

                    while let Ok(request) = entry_rx.recv().await {
                        // Rejection is immediate and final for that attempt;
                        // there is no queuing while the round is closing.
                        if let Err(e) = Fairpot::entry_once(&ledger, &events, &request).await {
                            warn!("Entry rejected: {}", e);
                        }
                    }

                    info!("Entry task finished (channel closed)");
                    Ok::<(), anyhow::Error>(())
                }
                .instrument(span!(Level::INFO, "entry_task")),
            )
        };

        // === Upkeep task: poll eligibility and trigger closes ===
        let upkeep_handle = {
            let ledger = Arc::clone(&ledger);
            let coordinator = Arc::clone(&coordinator);
            let oracle = Arc::clone(&oracle);
            let events = Arc::clone(&events);
            let config_clone = config.clone();

            tokio::spawn(
                async move {
                    if !config_clone.auto_upkeep {
                        info!("Auto upkeep disabled; close requests must come from an external trigger");
                        return Ok::<(), anyhow::Error>(());
                    }

                    info!(
                        "Upkeep task started (upkeep_poll_secs={})",
                        config_clone.upkeep_poll_secs
                    );

                    loop {
                        tokio::time::sleep(Duration::from_secs(config_clone.upkeep_poll_secs))
                            .await;

                        match Fairpot::upkeep_once(&coordinator, &ledger, &oracle, &events).await {
                            Ok(Some(request_id)) => {
                                info!(request_id, "Close requested");
                            }
                            Ok(None) => {
                                // Not eligible yet; keep polling.
                            }
                            Err(e) => {
                                error!("Upkeep failed: {}", e);
                            }
                        }
                    }
                }
                .instrument(span!(Level::INFO, "upkeep_task")),
            )
        };

        // === Fulfillment task: consume oracle deliveries and settle ===
        let fulfillment_handle = {
            let ledger = Arc::clone(&ledger);
            let coordinator = Arc::clone(&coordinator);
            let payout = Arc::clone(&payout);
            let events = Arc::clone(&events);

            tokio::spawn(
                async move {
                    info!("Fulfillment task started");

                    while let Ok(fulfillment) = fulfillment_rx.recv().await {
                        match Fairpot::fulfillment_once(
                            &coordinator,
                            &ledger,
                            &payout,
                            &events,
                            &fulfillment,
                        )
                        .await
                        {
                            Ok(settlement) => {
                                info!(
                                    request_id = settlement.request_id,
                                    winner = %hex::encode(settlement.winner),
                                    amount = settlement.amount,
                                    "Round settled"
                                );
                            }
                            Err(LotteryError::UnknownRequest { request_id }) => {
                                warn!(request_id, "Ignoring fulfillment for unknown request");
                            }
                            Err(e @ LotteryError::PayoutFailed { .. }) => {
                                // State has already advanced past Closing;
                                // this is unrecoverable here and must reach
                                // the operator.
                                error!("Fatal: {}", e);
                                return Err(anyhow::Error::from(e));
                            }
                            Err(e) => {
                                error!("Fulfillment failed: {}", e);
                            }
                        }
                    }

                    info!("Fulfillment task finished (channel closed)");
                    Ok::<(), anyhow::Error>(())
                }
                .instrument(span!(Level::INFO, "fulfillment_task")),
            )
        };

        let (entry_res, upkeep_res, fulfillment_res) =
            tokio::try_join!(entry_handle, upkeep_handle, fulfillment_handle)?;
        entry_res?;
        upkeep_res?;
        fulfillment_res?;
        Ok(())
    }

    /// Admit one entry and publish the entered event.
    pub async fn entry_once(
        ledger: &Arc<Mutex<RoundLedger>>,
        events: &Arc<EventSinkVariant>,
        request: &EntryRequest,
    ) -> Result<(), LotteryError> {
        let (pool, participant_count) = {
            let mut ledger = ledger.lock().await;
            ledger.enter(request.participant, request.fee_paid)?;
            (ledger.pool(), ledger.participant_count())
        };

        debug!(
            participant = %hex::encode(request.participant),
            fee_paid = request.fee_paid,
            pool,
            "Participant entered"
        );

        let event = LotteryEvent::Entered {
            participant: request.participant,
            fee_paid: request.fee_paid,
            pool,
            participant_count,
        };
        if let Err(e) = events.publish(&event).await {
            error!("Failed to publish entered event: {}", e);
        }
        Ok(())
    }

    /// One eligibility poll. Requests a close when the round qualifies.
    ///
    /// The probe result is only a hint: `request_close` re-validates
    /// eligibility under the same locks before acting.
    pub async fn upkeep_once(
        coordinator: &Arc<Mutex<UpkeepCoordinator>>,
        ledger: &Arc<Mutex<RoundLedger>>,
        oracle: &Arc<Mutex<OracleVariant>>,
        events: &Arc<EventSinkVariant>,
    ) -> Result<Option<RequestId>, LotteryError> {
        let now = now_secs();

        let pending = {
            // Lock order: coordinator, then ledger, then oracle.
            let mut coordinator = coordinator.lock().await;
            let mut ledger = ledger.lock().await;

            let report = coordinator.check_eligibility(&ledger, now);
            if !report.eligible {
                if let Ok(report_json) = serde_json::to_string(&report) {
                    debug!(report = %report_json, "Round not eligible");
                }
                return Ok(None);
            }

            let mut oracle = oracle.lock().await;
            coordinator
                .request_close(&mut ledger, &mut oracle, now)
                .await?
        };

        let event = LotteryEvent::CloseRequested {
            request_id: pending.request_id,
            pool: pending.pool,
            participant_count: pending.participant_count,
        };
        if let Err(e) = events.publish(&event).await {
            error!("Failed to publish close-requested event: {}", e);
        }
        Ok(Some(pending.request_id))
    }

    /// Apply one oracle fulfillment: validate, settle, then pay out.
    ///
    /// The ledger lock is released between the committed state reset and
    /// the external transfer, so the payout rail can only ever observe the
    /// already reset round.
    pub async fn fulfillment_once(
        coordinator: &Arc<Mutex<UpkeepCoordinator>>,
        ledger: &Arc<Mutex<RoundLedger>>,
        payout: &Arc<Mutex<PayoutVariant>>,
        events: &Arc<EventSinkVariant>,
        fulfillment: &Fulfillment,
    ) -> Result<Settlement, LotteryError> {
        let now = now_secs();

        let settlement = {
            let mut coordinator = coordinator.lock().await;
            let mut ledger = ledger.lock().await;
            coordinator.on_randomness_received(&mut ledger, fulfillment, now)?
        };

        {
            let mut payout = payout.lock().await;
            payout
                .transfer(settlement.winner, settlement.amount)
                .await
                .map_err(|e| LotteryError::PayoutFailed {
                    winner: settlement.winner,
                    amount: settlement.amount,
                    reason: e.to_string(),
                })?;
        }

        let event = LotteryEvent::WinnerPicked {
            request_id: settlement.request_id,
            winner: settlement.winner,
            winner_index: settlement.winner_index,
            amount: settlement.amount,
        };
        if let Err(e) = events.publish(&event).await {
            error!("Failed to publish winner-picked event: {}", e);
        }

        Ok(settlement)
    }
}
