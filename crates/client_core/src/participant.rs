//! Participant screen: one availability answer per candidate plus an
//! optional comment.

use std::sync::Arc;

use shared::{
    domain::{Availability, EventId},
    protocol::{CandidateDateTime, EventView, SubmitAvailabilityRequest},
    routes::{Route, ScreenParams},
};
use tracing::{error, info, warn};

use crate::{
    api::EventsApi,
    error::FlowError,
    notify::{messages, Notifier},
    screen::ScreenState,
};

pub struct ParticipantFlow {
    api: Arc<dyn EventsApi>,
    notifier: Arc<dyn Notifier>,
    params: ScreenParams,
    state: ScreenState,
    event: Option<EventView>,
    selections: Vec<Availability>,
    comment: String,
}

impl ParticipantFlow {
    pub fn new(api: Arc<dyn EventsApi>, notifier: Arc<dyn Notifier>, params: ScreenParams) -> Self {
        Self {
            api,
            notifier,
            params,
            state: ScreenState::Loading,
            event: None,
            selections: Vec::new(),
            comment: String::new(),
        }
    }

    pub async fn mount(&mut self) -> Result<(), FlowError> {
        let Some((event_id, token)) = self.params.complete() else {
            warn!("participant screen opened without event id or token");
            self.state = ScreenState::NotFound;
            self.notifier.error(messages::EVENT_FETCH_FAILED);
            return Err(FlowError::InvalidParameters);
        };

        match self.api.fetch_event(event_id, token).await {
            Ok(event) => {
                info!(
                    %event_id,
                    candidates = event.candidate_datetimes.len(),
                    "participant screen loaded"
                );
                self.selections = vec![Availability::default(); event.candidate_datetimes.len()];
                self.event = Some(event);
                self.state = ScreenState::Ready;
                Ok(())
            }
            Err(err) => {
                error!(%event_id, error = %err, "failed to fetch event");
                self.state = ScreenState::NotFound;
                self.notifier.error(messages::EVENT_FETCH_FAILED);
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

    pub fn candidates(&self) -> &[CandidateDateTime] {
        self.event
            .as_ref()
            .map(|event| event.candidate_datetimes.as_slice())
            .unwrap_or_default()
    }

    pub fn selections(&self) -> &[Availability] {
        &self.selections
    }

    pub fn set_availability(&mut self, index: usize, choice: Availability) -> Result<(), FlowError> {
        let len = self.selections.len();
        let slot = self
            .selections
            .get_mut(index)
            .ok_or(FlowError::CandidateIndex { index, len })?;
        *slot = choice;
        Ok(())
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Validates the form and maps it onto the wire request.
    pub fn build_submission(&self) -> Result<(EventId, SubmitAvailabilityRequest), FlowError> {
        let (event_id, token) = self
            .params
            .complete()
            .ok_or(FlowError::InvalidParameters)?;
        let event = self.event.as_ref().ok_or(FlowError::NotReady)?;

        let expected = event.candidate_datetimes.len();
        if self.selections.len() != expected {
            return Err(FlowError::CandidateCountMismatch {
                expected,
                actual: self.selections.len(),
            });
        }

        Ok((
            event_id.clone(),
            SubmitAvailabilityRequest {
                token: token.clone(),
                availabilities: self
                    .selections
                    .iter()
                    .map(|choice| choice.as_submitted())
                    .collect(),
                comment: self.comment.clone(),
            },
        ))
    }

    /// Posts the answers and returns the results screen for the same event
    /// and token. The form is left untouched on failure.
    pub async fn submit(&mut self) -> Result<Route, FlowError> {
        let (event_id, request) = match self.build_submission() {
            Ok(submission) => submission,
            Err(err) => {
                warn!(error = %err, "availability form is not submittable");
                self.notifier.error(messages::RESPONSE_FAILED);
                return Err(err);
            }
        };

        match self.api.submit_availability(&event_id, &request).await {
            Ok(response) => {
                info!(
                    %event_id,
                    participant_id = response.participant_id.as_deref().unwrap_or("-"),
                    "availability submitted"
                );
                self.notifier.success(messages::RESPONSE_SENT);
                Ok(Route::Results(ScreenParams::new(event_id, request.token)))
            }
            Err(err) => {
                error!(%event_id, error = %err, "failed to submit availability");
                self.notifier.error(messages::RESPONSE_FAILED);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/participant_tests.rs"]
mod tests;
