//! Client-side screen routes and the shareable links built from them.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;
use url::{form_urlencoded, Url};

use crate::domain::{AccessToken, EventId, ViewerRole};

const PARTICIPATE_SEGMENT: &str = "participate";
const RESULTS_SEGMENT: &str = "results";

/// Characters left as-is inside the event id path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unknown screen path '{0}'")]
    UnknownScreen(String),
    #[error("origin '{0}' cannot carry a path")]
    OpaqueOrigin(String),
}

/// Event id and token as carried by a screen URL. Either may be absent when
/// the link was truncated or hand-edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenParams {
    pub event_id: Option<EventId>,
    pub token: Option<AccessToken>,
}

impl ScreenParams {
    pub fn new(event_id: EventId, token: AccessToken) -> Self {
        Self {
            event_id: Some(event_id),
            token: Some(token),
        }
    }

    /// Both parameters, or `None` if either is missing.
    pub fn complete(&self) -> Option<(&EventId, &AccessToken)> {
        Some((self.event_id.as_ref()?, self.token.as_ref()?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Organizer,
    Participate(ScreenParams),
    Results(ScreenParams),
}

impl Route {
    pub fn for_role(role: ViewerRole, event_id: EventId, token: AccessToken) -> Self {
        let params = ScreenParams::new(event_id, token);
        match role {
            ViewerRole::Organizer => Route::Results(params),
            ViewerRole::Participant => Route::Participate(params),
        }
    }

    pub fn params(&self) -> Option<&ScreenParams> {
        match self {
            Route::Organizer => None,
            Route::Participate(params) | Route::Results(params) => Some(params),
        }
    }

    /// Path plus query, e.g. `/results/{id}?token={token}`.
    pub fn path(&self) -> String {
        let (segment, params) = match self {
            Route::Organizer => return "/".to_string(),
            Route::Participate(params) => (PARTICIPATE_SEGMENT, params),
            Route::Results(params) => (RESULTS_SEGMENT, params),
        };

        let mut path = format!("/{segment}/");
        if let Some(event_id) = &params.event_id {
            path.extend(utf8_percent_encode(event_id.as_str(), SEGMENT));
        }
        if let Some(token) = &params.token {
            let encoded: String = form_urlencoded::byte_serialize(token.as_str().as_bytes()).collect();
            path.push_str("?token=");
            path.push_str(&encoded);
        }
        path
    }

    /// Absolute link under `origin`, keeping any path prefix the origin
    /// carries. With hash routing the screen path is carried in the
    /// fragment (`/#/results/...`).
    pub fn share_url(&self, origin: &Url, hash_routing: bool) -> Result<Url, RouteError> {
        if origin.cannot_be_a_base() {
            return Err(RouteError::OpaqueOrigin(origin.to_string()));
        }

        let mut base = origin.clone();
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }

        if hash_routing {
            base.set_fragment(Some(&self.path()));
            return Ok(base);
        }

        Ok(base.join(self.path().trim_start_matches('/'))?)
    }

    /// Parses a full share link or a bare path. Hash-routed links are
    /// accepted as well.
    pub fn parse(input: &str) -> Result<Route, RouteError> {
        let input = input.trim();
        let mut url = match Url::parse(input) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse("http://localhost/")?.join(input)?
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(fragment) = url.fragment().filter(|fragment| fragment.starts_with('/')) {
            let fragment = fragment.to_string();
            url = url.join(&fragment)?;
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();

        let token = AccessToken::from_param(
            url.query_pairs()
                .find(|(key, _)| key == "token")
                .map(|(_, value)| value)
                .as_deref(),
        );

        let is_screen = |segment: &str| matches!(segment, PARTICIPATE_SEGMENT | RESULTS_SEGMENT);
        // Anything before the screen segment is a deployment prefix.
        let (screen, event_id) = match segments.as_slice() {
            [] => return Ok(Route::Organizer),
            [.., screen, event_id] if is_screen(*screen) => (*screen, Some(*event_id)),
            [.., screen] if is_screen(*screen) => (*screen, None),
            _ => return Err(RouteError::UnknownScreen(url.path().to_string())),
        };

        let event_id = event_id.map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned());
        let params = ScreenParams {
            event_id: EventId::from_param(event_id.as_deref()),
            token,
        };
        if screen == PARTICIPATE_SEGMENT {
            Ok(Route::Participate(params))
        } else {
            Ok(Route::Results(params))
        }
    }
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;
