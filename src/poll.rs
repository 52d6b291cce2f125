//! The poll loop: fetch, validate, extract, notify, sleep, repeat.
//!
//! One cycle runs to completion before the next begins. Every failure inside
//! a cycle is caught here, logged, and reported to the chat on a best-effort
//! basis; the loop then sleeps the full interval and tries again. The only way
//! out is `max_cycles` or process termination.
//!
//! The `from_date` watermark moves forward only at the end of a cycle that
//! succeeded (status delivered, or nothing new) and only to a `current_date`
//! the server actually reported. A failed cycle leaves it in place so the next
//! cycle asks for the same window again.
use crate::api::StatusSource;
use crate::error::CycleError;
use crate::notify::Notifier;
use crate::response::{self, Homeworks};
use crate::status::parse_status;
use std::time::Duration;

/// Prefix of the failure report sent to the chat.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Where the driver is within the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Polling,
    Validating,
    Extracting,
    Notifying,
    Sleeping,
}

/// What a single cycle achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was delivered to the chat.
    Notified { message: String },
    /// The response was well formed but carried no homeworks.
    NoUpdates,
    /// The cycle aborted; `report` is the text sent (or attempted) to the chat.
    Failed { report: String },
}

pub struct PollDriver<'a, S, N> {
    source: &'a S,
    notifier: &'a N,
    interval: Duration,
    watermark: i64,
    state: CycleState,
}

impl<'a, S, N> PollDriver<'a, S, N>
where
    S: StatusSource,
    N: Notifier,
{
    pub fn new(source: &'a S, notifier: &'a N, interval: Duration, from_date: i64) -> Self {
        Self {
            source,
            notifier,
            interval,
            watermark: from_date,
            state: CycleState::Idle,
        }
    }

    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Run cycles forever, or until `max_cycles` have completed.
    ///
    /// Every cycle is followed by one call to `sleep` with the fixed interval,
    /// whatever the outcome. Returns the number of cycles run.
    pub fn run<F>(&mut self, max_cycles: Option<u64>, mut sleep: F) -> u64
    where
        F: FnMut(Duration),
    {
        let mut completed = 0u64;
        loop {
            let outcome = self.run_cycle();
            completed += 1;
            tracing::debug!(cycle = completed, ?outcome, "poll cycle finished");

            self.state = CycleState::Sleeping;
            tracing::debug!(interval_secs = self.interval.as_secs(), "sleeping");
            sleep(self.interval);

            if max_cycles.is_some_and(|max| completed >= max) {
                return completed;
            }
        }
    }

    /// Run one fetch/validate/extract/notify pass, absorbing any failure.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once() {
            Ok(outcome) => outcome,
            Err(err) => self.report_failure(err),
        }
    }

    fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        self.state = CycleState::Polling;
        tracing::info!(from_date = self.watermark, "poll cycle start");
        let response = self.source.fetch(self.watermark)?;

        self.state = CycleState::Validating;
        let item = match response::validate(&response)? {
            Homeworks::Empty => {
                tracing::debug!("no new statuses");
                self.advance(response::current_date(&response));
                return Ok(CycleOutcome::NoUpdates);
            }
            Homeworks::Latest(item) => item,
        };

        self.state = CycleState::Extracting;
        let message = parse_status(item)?;

        self.state = CycleState::Notifying;
        self.notifier.notify(&message)?;
        tracing::info!(%message, "status message sent");

        self.advance(response::current_date(&response));
        Ok(CycleOutcome::Notified { message })
    }

    fn advance(&mut self, reported: Option<i64>) {
        match reported {
            Some(current_date) if current_date >= self.watermark => {
                self.watermark = current_date;
            }
            Some(current_date) => {
                tracing::warn!(
                    current_date,
                    watermark = self.watermark,
                    "ignoring current_date older than watermark"
                );
            }
            None => {
                tracing::debug!(
                    watermark = self.watermark,
                    "response has no current_date; watermark unchanged"
                );
            }
        }
    }

    fn report_failure(&mut self, err: CycleError) -> CycleOutcome {
        let report = format!("{FAILURE_PREFIX}: {err}");
        tracing::error!(stage = ?self.state, error = %err, "poll cycle failed");

        // Delivery failures are not reported back through the failing channel.
        if !matches!(err, CycleError::Delivery(_)) {
            if let Err(delivery) = self.notifier.notify(&report) {
                tracing::error!(error = %delivery, "failed to deliver failure report");
            }
        }
        CycleOutcome::Failed { report }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
