//! Headless client for the drinking-party coordinator backend.
//!
//! Each screen of the web front end is a flow here: [`OrganizerFlow`],
//! [`ParticipantFlow`] and [`ResultsFlow`]. Flows talk to the backend through
//! [`EventsApi`] and report to the user through [`Notifier`].

pub mod api;
pub mod error;
pub mod notify;
pub mod organizer;
pub mod participant;
pub mod results;
pub mod screen;
pub mod settings;

pub use api::{EventsApi, HttpEventsClient};
pub use error::{ClientError, FlowError};
pub use notify::{Clipboard, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use organizer::{LinkBase, OrganizerFlow, ShareLinks};
pub use participant::ParticipantFlow;
pub use results::{AvailabilityCount, CandidateTally, Recommendations, ResultsFlow};
pub use screen::ScreenState;
pub use settings::{load_settings, ClientSettings};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
