//! Minute driver / range-RAPTOR outer loop (spec component **C9**).
//!
//! Steps backward over the departure window one minute at a time, reusing
//! round-state arrays across minutes (never reallocating them) so a later
//! (larger) minute's results act as an upper bound for an earlier one.
//! Within a minute, each round first inherits the previous round via
//! [`RoundState::min`], then runs the scheduled round (C5) and transfer
//! relaxation (C6); frequency service is then overlaid per Monte Carlo
//! draw (C7/C8) on cloned copies of the scheduled result, since frequency
//! phases are randomized per draw but the scheduled baseline is not.
//!
//! Grounded in the teacher's `routing/raptor/range_raptor.rs` minute-stepping
//! convention, generalized with the service calendar, frequency overlay,
//! and Monte Carlo sub-iteration loop the teacher's schedule-only engine
//! never needed.

use crate::constants::DEPARTURE_STEP;
use crate::error::RaptorError;
use crate::model::{Network, ServiceId, Time};
use crate::request::Request;

use super::frequency::{run_frequency_round, FrequencyOffsets};
use super::prefilter::PatternPrefilter;
use super::scheduled::run_scheduled_round;
use super::state::RoundState;
use super::transfers::relax_transfers;

/// One minute/draw pair's output (spec §4.5 step 3).
#[derive(Debug, Clone)]
pub struct MinuteResult {
    pub departure_time: Time,
    pub draw: u32,
    /// Clock-time arrival at every stop in the final round (`UNREACHED`
    /// where no path was found within budget). Includes transfer-extended
    /// reach, not just vehicle-alighting arrivals — see `DESIGN.md` for
    /// why this differs from a literal reading of the "emit
    /// bestNonTransferTimes" wording in the minute driver's spec.
    pub arrivals: Vec<Time>,
    /// Present iff the request asked for path retention: a full snapshot
    /// of every round as it stood at the end of this minute/draw, for
    /// [`super::path::reconstruct_path`].
    pub rounds: Option<Vec<RoundState>>,
}

impl MinuteResult {
    /// Travel times (arrival minus this minute's departure), per spec
    /// §4.5 step 3 ("optionally converted to travel times").
    #[must_use]
    pub fn travel_times(&self) -> Vec<Time> {
        self.arrivals
            .iter()
            .map(|&arrival| {
                if arrival == crate::constants::UNREACHED {
                    crate::constants::UNREACHED
                } else {
                    arrival - self.departure_time
                }
            })
            .collect()
    }
}

/// One RAPTOR search over a fixed network, date, and departure window.
pub struct Search<'a> {
    network: &'a Network,
    request: &'a Request,
    prefilter: PatternPrefilter,
    rounds: Vec<RoundState>,
}

impl<'a> Search<'a> {
    pub fn new(network: &'a Network, request: &'a Request) -> Result<Self, RaptorError> {
        request.validate()?;
        for (stop, _) in request.access_stops() {
            network.validate_stop(stop)?;
        }

        let prefilter = PatternPrefilter::build(network, request);
        let rounds = (0..request.max_rounds())
            .map(|_| RoundState::new(network.stop_count()))
            .collect();

        Ok(Search {
            network,
            request,
            prefilter,
            rounds,
        })
    }

    /// Run the full minute-stepping search, producing one [`MinuteResult`]
    /// per minute/draw pair, latest-minute-first then by draw index (spec
    /// §6 "Produced").
    pub fn run(&mut self) -> Vec<MinuteResult> {
        let active_services = self.network.active_services(self.request.date);
        let mut results = Vec::new();

        let mut minute = self.request.to_time - DEPARTURE_STEP;
        let mut minute_index: u64 = 0;
        while minute >= self.request.from_time {
            log::trace!("range-raptor: processing minute {minute}");
            self.begin_minute(minute);

            let max_allowed = minute.saturating_add(self.request.max_duration_seconds());
            self.run_scheduled_rounds(active_services, max_allowed);

            for draw in 0..self.request.monte_carlo_draws_per_minute {
                let result = if self.prefilter.has_frequency_patterns() {
                    self.run_frequency_draw(active_services, max_allowed, minute, draw, minute_index)
                } else {
                    self.emit_scheduled_result(minute, draw)
                };
                results.push(result);
            }

            minute_index += 1;
            minute -= DEPARTURE_STEP;
        }

        results
    }

    fn begin_minute(&mut self, minute: Time) {
        for round in &mut self.rounds {
            round.set_departure_time(minute);
            round.clear_touched();
        }
        for (stop, walk_time) in self.request.access_stops() {
            self.rounds[0].set_initial_time(stop, minute.saturating_add(walk_time));
        }
    }

    fn run_scheduled_rounds(&mut self, active_services: &[ServiceId], max_allowed: Time) {
        for k in 1..self.rounds.len() {
            let (before, after) = self.rounds.split_at_mut(k);
            let prev = &before[k - 1];
            let curr = &mut after[0];
            curr.min(prev);
            run_scheduled_round(self.network, active_services, &self.prefilter, prev, curr, max_allowed);
            relax_transfers(
                self.network,
                curr,
                self.request.max_walk_seconds(),
                self.request.walk_speed_m_per_s,
                max_allowed,
            );
        }
        log::debug!(
            "scheduled rounds complete for minute {}",
            self.rounds[0].departure_time
        );
    }

    fn emit_scheduled_result(&self, minute: Time, draw: u32) -> MinuteResult {
        let final_round = self.rounds.last().expect("at least round 0 always exists");
        MinuteResult {
            departure_time: minute,
            draw,
            arrivals: final_round.best_times().to_vec(),
            rounds: self.request.retain_paths.then(|| self.rounds.iter().map(RoundState::deep_copy).collect()),
        }
    }

    fn run_frequency_draw(
        &self,
        active_services: &[ServiceId],
        max_allowed: Time,
        minute: Time,
        draw: u32,
        minute_index: u64,
    ) -> MinuteResult {
        let draw_key = minute_index.wrapping_mul(u64::from(self.request.monte_carlo_draws_per_minute)) + u64::from(draw);
        let offsets = FrequencyOffsets::draw(self.network, &self.prefilter, self.request.seed, draw_key);

        let mut draw_rounds: Vec<RoundState> = self.rounds.iter().map(RoundState::deep_copy).collect();
        for k in 1..draw_rounds.len() {
            let (before, after) = draw_rounds.split_at_mut(k);
            let prev = &before[k - 1];
            let curr = &mut after[0];
            run_frequency_round(self.network, active_services, &self.prefilter, &offsets, prev, curr, max_allowed);
            relax_transfers(
                self.network,
                curr,
                self.request.max_walk_seconds(),
                self.request.walk_speed_m_per_s,
                max_allowed,
            );
        }

        let arrivals = draw_rounds.last().expect("at least round 0 always exists").best_times().to_vec();
        MinuteResult {
            departure_time: minute,
            draw,
            arrivals,
            rounds: self.request.retain_paths.then_some(draw_rounds),
        }
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.network.stop_count()
    }
}
