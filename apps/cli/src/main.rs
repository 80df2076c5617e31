use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use client_core::{
    notify::messages, Clipboard, EventsApi, HttpEventsClient, LinkBase, Notice,
    NoticeLevel, Notifier, OrganizerFlow, ParticipantFlow, ResultsFlow, ScreenState,
};
use shared::{
    domain::{AccessToken, Availability, EventId, ViewerRole},
    routes::{Route, ScreenParams},
};
use tracing::info;

mod render;

#[derive(Parser, Debug)]
#[command(name = "nomikai", about = "Plan a drinking party from the terminal")]
struct Cli {
    /// Backend base URL; overrides nomikai.toml and the environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Origin share links point to.
    #[arg(long, global = true)]
    public_origin: Option<String>,
    #[arg(long, global = true)]
    hash_routing: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an event and print the organizer and participant links.
    Create {
        #[arg(long)]
        station: String,
        /// Candidate start, `2025-01-10T19:00` in local time or RFC 3339.
        #[arg(long = "at", value_parser = parse_candidate)]
        candidates: Vec<DateTime<Utc>>,
        /// Copy one of the links to the clipboard.
        #[arg(long)]
        copy: Option<ViewerRole>,
    },
    /// Answer availability for each candidate in order.
    Respond {
        event_id: String,
        #[arg(long)]
        token: String,
        #[arg(long = "choice", value_delimiter = ',')]
        choices: Vec<Availability>,
        #[arg(long, default_value = "")]
        comment: String,
    },
    Results {
        event_id: String,
        #[arg(long)]
        token: String,
    },
    /// Open a share link or screen path.
    Open { link: String },
    Health,
}

/// Prints notices to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => eprintln!("✔ {}", notice.message),
            NoticeLevel::Error => eprintln!("✘ {}", notice.message),
        }
    }
}

struct SystemClipboard(arboard::Clipboard);

impl SystemClipboard {
    fn open() -> Result<Self> {
        Ok(Self(arboard::Clipboard::new()?))
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.0.set_text(text.to_owned())?;
        Ok(())
    }
}

fn parse_candidate(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .map_err(|err| format!("invalid date-time '{raw}': {err}"))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| format!("'{raw}' is ambiguous in the local time zone"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = client_core::load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(origin) = cli.public_origin {
        settings.public_origin = origin;
    }
    settings.hash_routing |= cli.hash_routing;
    info!(api = %settings.api_base_url, "settings loaded");

    let client = HttpEventsClient::from_settings(&settings)?;
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    match cli.command {
        Command::Health => {
            let health = client.health().await?;
            println!("{}: {}", client.base_url(), health.status);
        }
        Command::Create {
            station,
            candidates,
            copy,
        } => {
            let link_base = LinkBase {
                origin: settings.public_origin_url()?,
                hash_routing: settings.hash_routing,
            };
            let mut flow = OrganizerFlow::new(Arc::new(client), notifier, link_base);
            flow.set_station(station);
            if !candidates.is_empty() {
                flow.set_candidates(candidates)?;
            }
            let links = flow.submit().await?;
            println!("{}", render::share_links(&links));

            if let Some(role) = copy {
                let mut clipboard = SystemClipboard::open()?;
                flow.copy_link(role, &mut clipboard)?;
            }
        }
        Command::Respond {
            event_id,
            token,
            choices,
            comment,
        } => {
            let params = ScreenParams {
                event_id: EventId::from_param(Some(&event_id)),
                token: AccessToken::from_param(Some(&token)),
            };
            respond(Arc::new(client), notifier, params, choices, comment).await?;
        }
        Command::Results { event_id, token } => {
            let params = ScreenParams {
                event_id: EventId::from_param(Some(&event_id)),
                token: AccessToken::from_param(Some(&token)),
            };
            show_results(Arc::new(client), params).await?;
        }
        Command::Open { link } => match Route::parse(&link)? {
            Route::Organizer => {
                println!("organizer screen: run `nomikai create --station <name> --at <time>`");
            }
            Route::Participate(params) => {
                let mut flow = ParticipantFlow::new(Arc::new(client), notifier, params);
                mount_participant(&mut flow).await?;
                println!("{}", render::participant_form(&flow));
            }
            Route::Results(params) => show_results(Arc::new(client), params).await?,
        },
    }

    Ok(())
}

async fn mount_participant(flow: &mut ParticipantFlow) -> Result<()> {
    match flow.mount().await {
        Ok(()) => Ok(()),
        Err(err) if flow.state() == ScreenState::NotFound => {
            Err(anyhow!(err).context(messages::EVENT_NOT_FOUND))
        }
        Err(err) => Err(err.into()),
    }
}

async fn respond(
    api: Arc<dyn EventsApi>,
    notifier: Arc<dyn Notifier>,
    params: ScreenParams,
    choices: Vec<Availability>,
    comment: String,
) -> Result<()> {
    let mut flow = ParticipantFlow::new(api.clone(), notifier, params);
    mount_participant(&mut flow).await?;

    let expected = flow.candidates().len();
    if choices.len() > expected {
        bail!("{} answers given but the event has {expected} candidates", choices.len());
    }
    for (index, choice) in choices.into_iter().enumerate() {
        flow.set_availability(index, choice)?;
    }
    flow.set_comment(comment);
    print!("{}", render::participant_form(&flow));

    let route = flow.submit().await?;
    match route.params() {
        Some(params) => show_results(api, params.clone()).await,
        None => Ok(()),
    }
}

async fn show_results(api: Arc<dyn EventsApi>, params: ScreenParams) -> Result<()> {
    let mut flow = ResultsFlow::new(api, params);
    flow.mount().await.context(messages::EVENT_FETCH_FAILED)?;
    println!("{}", render::results(&flow));
    Ok(())
}
