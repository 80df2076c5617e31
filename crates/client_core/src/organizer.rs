//! Organizer screen: collects a station and candidate times, creates the
//! event and hands out the two share links.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveTime, Utc};
use shared::{
    domain::{
        AccessToken, EventId, ViewerRole, DEFAULT_CANDIDATE_HOUR, MAX_CANDIDATES, MIN_CANDIDATES,
    },
    protocol::{CandidateDateTime, CreateEventRequest, CreateEventResponse},
    routes::Route,
};
use tracing::{error, info};
use url::Url;

use crate::{
    api::EventsApi,
    error::FlowError,
    notify::{messages, Clipboard, Notifier},
};

pub type Clock = fn() -> DateTime<FixedOffset>;

pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// 19:00 on the same local day as `now`.
pub fn default_candidate_at(now: DateTime<FixedOffset>) -> DateTime<Utc> {
    NaiveTime::from_hms_opt(DEFAULT_CANDIDATE_HOUR, 0, 0)
        .and_then(|time| {
            now.date_naive()
                .and_time(time)
                .and_local_timezone(*now.offset())
                .single()
        })
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}

/// Where share links point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBase {
    pub origin: Url,
    pub hash_routing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub event_id: EventId,
    pub organizer: Url,
    pub participant: Url,
}

impl ShareLinks {
    pub fn build(created: &CreateEventResponse, base: &LinkBase) -> Result<Self, FlowError> {
        let link = |role, token: &AccessToken| {
            Route::for_role(role, created.event_id.clone(), token.clone())
                .share_url(&base.origin, base.hash_routing)
        };
        Ok(Self {
            event_id: created.event_id.clone(),
            organizer: link(ViewerRole::Organizer, &created.organizer_token)?,
            participant: link(ViewerRole::Participant, &created.participant_token)?,
        })
    }

    pub fn for_role(&self, role: ViewerRole) -> &Url {
        match role {
            ViewerRole::Organizer => &self.organizer,
            ViewerRole::Participant => &self.participant,
        }
    }
}

pub struct OrganizerFlow {
    api: Arc<dyn EventsApi>,
    notifier: Arc<dyn Notifier>,
    link_base: LinkBase,
    clock: Clock,
    station: String,
    candidates: Vec<DateTime<Utc>>,
    share_links: Option<ShareLinks>,
    submitting: bool,
}

impl OrganizerFlow {
    pub fn new(api: Arc<dyn EventsApi>, notifier: Arc<dyn Notifier>, link_base: LinkBase) -> Self {
        Self::with_clock(api, notifier, link_base, local_now)
    }

    pub fn with_clock(
        api: Arc<dyn EventsApi>,
        notifier: Arc<dyn Notifier>,
        link_base: LinkBase,
        clock: Clock,
    ) -> Self {
        Self {
            api,
            notifier,
            link_base,
            clock,
            station: String::new(),
            candidates: vec![default_candidate_at(clock())],
            share_links: None,
            submitting: false,
        }
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn set_station(&mut self, station: impl Into<String>) {
        self.station = station.into();
    }

    pub fn candidates(&self) -> &[DateTime<Utc>] {
        &self.candidates
    }

    /// Replaces every candidate at once; the count must stay within limits.
    pub fn set_candidates(&mut self, candidates: Vec<DateTime<Utc>>) -> Result<(), FlowError> {
        if !(MIN_CANDIDATES..=MAX_CANDIDATES).contains(&candidates.len()) {
            return Err(FlowError::CandidateLimit {
                min: MIN_CANDIDATES,
                max: MAX_CANDIDATES,
                actual: candidates.len(),
            });
        }
        self.candidates = candidates;
        Ok(())
    }

    pub fn can_add_candidate(&self) -> bool {
        self.candidates.len() < MAX_CANDIDATES
    }

    pub fn can_remove_candidate(&self) -> bool {
        self.candidates.len() > MIN_CANDIDATES
    }

    /// Appends a 19:00-today candidate. Returns `false` when already full.
    pub fn add_candidate(&mut self) -> bool {
        if !self.can_add_candidate() {
            return false;
        }
        self.candidates.push(default_candidate_at((self.clock)()));
        true
    }

    /// Returns `false` when the last candidate would be removed or the index
    /// does not exist.
    pub fn remove_candidate(&mut self, index: usize) -> bool {
        if !self.can_remove_candidate() || index >= self.candidates.len() {
            return false;
        }
        self.candidates.remove(index);
        true
    }

    pub fn set_candidate_datetime(
        &mut self,
        index: usize,
        value: DateTime<Utc>,
    ) -> Result<(), FlowError> {
        let len = self.candidates.len();
        let slot = self
            .candidates
            .get_mut(index)
            .ok_or(FlowError::CandidateIndex { index, len })?;
        *slot = value;
        Ok(())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn share_links(&self) -> Option<&ShareLinks> {
        self.share_links.as_ref()
    }

    pub fn build_request(&self) -> Result<CreateEventRequest, FlowError> {
        let station = self.station.trim();
        if station.is_empty() {
            return Err(FlowError::MissingStation);
        }

        Ok(CreateEventRequest {
            station_name: station.to_string(),
            candidate_datetimes: self
                .candidates
                .iter()
                .copied()
                .map(CandidateDateTime::new)
                .collect(),
        })
    }

    /// Validates the form and creates an event from it. Every call sends a
    /// new creation request; the latest links replace earlier ones.
    pub async fn submit(&mut self) -> Result<ShareLinks, FlowError> {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                self.notifier.error(messages::STATION_REQUIRED);
                return Err(err);
            }
        };

        self.submitting = true;
        let created = self.api.create_event(&request).await;
        self.submitting = false;

        let links = created
            .map_err(FlowError::from)
            .and_then(|created| ShareLinks::build(&created, &self.link_base));

        match links {
            Ok(links) => {
                info!(event_id = %links.event_id, "event created");
                self.share_links = Some(links.clone());
                self.notifier.success(messages::EVENT_CREATED);
                Ok(links)
            }
            Err(err) => {
                error!(error = %err, "failed to create event");
                self.notifier.error(messages::EVENT_CREATE_FAILED);
                Err(err)
            }
        }
    }

    pub fn copy_link(
        &self,
        role: ViewerRole,
        clipboard: &mut dyn Clipboard,
    ) -> Result<(), FlowError> {
        let links = self.share_links.as_ref().ok_or(FlowError::NotReady)?;

        match clipboard.write_text(links.for_role(role).as_str()) {
            Ok(()) => {
                self.notifier.success(&messages::link_copied(role));
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to copy share link");
                self.notifier.error(messages::COPY_FAILED);
                Err(FlowError::Clipboard(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/organizer_tests.rs"]
mod tests;
