//! Results screen: per-candidate tallies, comments and recommendations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{
    protocol::{EventView, ParticipantEntry, Restaurant},
    routes::ScreenParams,
};
use tracing::{error, info, warn};

use crate::{api::EventsApi, error::FlowError, screen::ScreenState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailabilityCount {
    pub count: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTally {
    pub index: usize,
    pub datetime: DateTime<Utc>,
    pub availability: AvailabilityCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendations<'a> {
    Pending,
    Ready(&'a [Restaurant]),
}

/// Counts responses marked available at `candidate_index`. The percentage is
/// `0` when nobody has answered yet.
pub fn tally_candidate(participants: &[ParticipantEntry], candidate_index: usize) -> AvailabilityCount {
    let count = participants
        .iter()
        .filter(|participant| participant.is_available_for(candidate_index))
        .count();
    let total = participants.len();
    let percentage = if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    };

    AvailabilityCount {
        count,
        total,
        percentage,
    }
}

pub struct ResultsFlow {
    api: Arc<dyn EventsApi>,
    params: ScreenParams,
    state: ScreenState,
    event: Option<EventView>,
}

impl ResultsFlow {
    pub fn new(api: Arc<dyn EventsApi>, params: ScreenParams) -> Self {
        Self {
            api,
            params,
            state: ScreenState::Loading,
            event: None,
        }
    }

    /// Failures are logged and returned but leave the screen loading; no
    /// notice is raised here.
    pub async fn mount(&mut self) -> Result<(), FlowError> {
        let Some((event_id, token)) = self.params.complete() else {
            warn!("results screen opened without event id or token");
            return Err(FlowError::InvalidParameters);
        };

        match self.api.fetch_event(event_id, token).await {
            Ok(event) => {
                info!(
                    %event_id,
                    responses = event.participants.len(),
                    restaurants = event.recommended_restaurants.len(),
                    "results loaded"
                );
                self.event = Some(event);
                self.state = ScreenState::Ready;
                Ok(())
            }
            Err(err) => {
                error!(%event_id, error = %err, "failed to fetch event results");
                Err(err.into())
            }
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn event(&self) -> Option<&EventView> {
        self.event.as_ref()
    }

    pub fn station_name(&self) -> Option<&str> {
        self.event.as_ref()?.station_name.as_deref()
    }

    fn participants(&self) -> &[ParticipantEntry] {
        self.event
            .as_ref()
            .map(|event| event.participants.as_slice())
            .unwrap_or_default()
    }

    pub fn response_count(&self) -> usize {
        self.participants().len()
    }

    pub fn availability_for(&self, candidate_index: usize) -> AvailabilityCount {
        tally_candidate(self.participants(), candidate_index)
    }

    pub fn tallies(&self) -> Vec<CandidateTally> {
        let Some(event) = &self.event else {
            return Vec::new();
        };

        event
            .candidate_datetimes
            .iter()
            .enumerate()
            .map(|(index, candidate)| CandidateTally {
                index,
                datetime: candidate.datetime,
                availability: tally_candidate(&event.participants, index),
            })
            .collect()
    }

    /// Non-empty comments in the order the backend returned them.
    pub fn comments(&self) -> Vec<&str> {
        self.participants()
            .iter()
            .filter_map(ParticipantEntry::visible_comment)
            .collect()
    }

    pub fn recommendations(&self) -> Recommendations<'_> {
        match &self.event {
            Some(event) if !event.recommended_restaurants.is_empty() => {
                Recommendations::Ready(&event.recommended_restaurants)
            }
            _ => Recommendations::Pending,
        }
    }
}

#[cfg(test)]
#[path = "tests/results_tests.rs"]
mod tests;
