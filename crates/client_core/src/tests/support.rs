use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use shared::{
    domain::{AccessToken, EventId},
    error::ErrorCode,
    protocol::{
        CandidateDateTime, CreateEventRequest, CreateEventResponse, EventView, ParticipantEntry,
        SubmitAvailabilityRequest, SubmitAvailabilityResponse,
    },
};

use crate::{
    api::EventsApi,
    error::ClientError,
    notify::{Clipboard, Notice, NoticeLevel, Notifier},
};

pub struct FakeEventsApi {
    fail_status: Option<u16>,
    event: Option<EventView>,
    pub created: Mutex<Vec<CreateEventRequest>>,
    pub fetched: Mutex<Vec<(EventId, AccessToken)>>,
    pub submitted: Mutex<Vec<(EventId, SubmitAvailabilityRequest)>>,
}

impl FakeEventsApi {
    pub fn ok() -> Self {
        Self {
            fail_status: None,
            event: None,
            created: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn serving(event: EventView) -> Self {
        let mut api = Self::ok();
        api.event = Some(event);
        api
    }

    pub fn failing(status: u16) -> Self {
        let mut api = Self::ok();
        api.fail_status = Some(status);
        api
    }

    fn failure(&self) -> Option<ClientError> {
        self.fail_status.map(|status| ClientError::Status {
            status,
            code: ErrorCode::from_status(status),
            detail: Some("simulated failure".into()),
        })
    }

    pub fn network_calls(&self) -> usize {
        self.created.lock().expect("lock").len()
            + self.fetched.lock().expect("lock").len()
            + self.submitted.lock().expect("lock").len()
    }
}

#[async_trait]
impl EventsApi for FakeEventsApi {
    async fn create_event(
        &self,
        request: &CreateEventRequest,
    ) -> Result<CreateEventResponse, ClientError> {
        self.created.lock().expect("lock").push(request.clone());
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(CreateEventResponse {
            event_id: EventId::new("evt-1"),
            organizer_token: AccessToken::new("org-token"),
            participant_token: AccessToken::new("part-token"),
        })
    }

    async fn fetch_event(
        &self,
        event_id: &EventId,
        token: &AccessToken,
    ) -> Result<EventView, ClientError> {
        self.fetched
            .lock()
            .expect("lock")
            .push((event_id.clone(), token.clone()));
        if let Some(err) = self.failure() {
            return Err(err);
        }
        self.event.clone().ok_or(ClientError::Status {
            status: 404,
            code: ErrorCode::NotFound,
            detail: Some("Event not found or invalid token".into()),
        })
    }

    async fn submit_availability(
        &self,
        event_id: &EventId,
        request: &SubmitAvailabilityRequest,
    ) -> Result<SubmitAvailabilityResponse, ClientError> {
        self.submitted
            .lock()
            .expect("lock")
            .push((event_id.clone(), request.clone()));
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(SubmitAvailabilityResponse {
            participant_id: Some("participant-1".into()),
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("lock").clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().expect("lock").last().cloned()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.level == NoticeLevel::Error)
            .map(|notice| notice.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("lock").push(notice);
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub written: Vec<String>,
    pub fail: bool,
}

impl Clipboard for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            return Err(anyhow!("clipboard unavailable"));
        }
        self.written.push(text.to_string());
        Ok(())
    }
}

/// Event with one candidate per given UTC hour on 2025-01-10.
pub fn event_with(hours: &[u32], participants: Vec<ParticipantEntry>) -> EventView {
    EventView {
        event_id: Some(EventId::new("evt-1")),
        station_name: Some("新宿駅".into()),
        candidate_datetimes: hours
            .iter()
            .map(|hour| {
                CandidateDateTime::new(
                    Utc.with_ymd_and_hms(2025, 1, 10, *hour, 0, 0)
                        .single()
                        .expect("ts"),
                )
            })
            .collect(),
        participants,
        recommended_restaurants: Vec::new(),
    }
}

pub fn response(availabilities: &[bool], comment: &str) -> ParticipantEntry {
    ParticipantEntry {
        participant_id: None,
        availabilities: availabilities.to_vec(),
        comment: Some(comment.to_string()),
    }
}
