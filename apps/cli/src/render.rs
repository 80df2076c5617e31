//! Plain-text rendering of the screens.

use chrono::Local;
use client_core::{notify::messages, ParticipantFlow, Recommendations, ResultsFlow, ShareLinks};
use shared::display::{
    format_candidate, format_percentage, restaurant_features, restaurant_location,
    restaurant_price,
};

pub fn share_links(links: &ShareLinks) -> String {
    format!(
        "event: {}\n主催者用URL: {}\n参加者用URL: {}",
        links.event_id, links.organizer, links.participant
    )
}

pub fn participant_form(flow: &ParticipantFlow) -> String {
    let mut out = String::new();
    if let Some(station) = flow.event().and_then(|event| event.station_name.as_deref()) {
        out.push_str(&format!("{station}\n"));
    }
    for (index, (candidate, choice)) in flow
        .candidates()
        .iter()
        .zip(flow.selections())
        .enumerate()
    {
        out.push_str(&format!(
            "  [{}] {}  {}\n",
            index + 1,
            format_candidate(&candidate.datetime, &Local),
            choice.label()
        ));
    }
    out
}

pub fn results(flow: &ResultsFlow) -> String {
    let mut out = String::new();
    if let Some(station) = flow.station_name() {
        out.push_str(&format!("{station}\n"));
    }
    out.push_str(&format!("回答数: {}\n\n", flow.response_count()));

    for tally in flow.tallies() {
        out.push_str(&format!(
            "  {}  {}/{} ({})\n",
            format_candidate(&tally.datetime, &Local),
            tally.availability.count,
            tally.availability.total,
            format_percentage(tally.availability.percentage)
        ));
    }

    let comments = flow.comments();
    if !comments.is_empty() {
        out.push_str("\nコメント:\n");
        for comment in comments {
            out.push_str(&format!("  - {comment}\n"));
        }
    }

    out.push('\n');
    match flow.recommendations() {
        Recommendations::Pending => out.push_str(messages::NO_RECOMMENDATIONS),
        Recommendations::Ready(restaurants) => {
            out.push_str("おすすめの店舗:\n");
            for restaurant in restaurants {
                out.push_str(&format!(
                    "  {} [{}]\n    {}\n    {}\n    {}\n",
                    restaurant.name,
                    restaurant.genre,
                    restaurant_location(restaurant),
                    restaurant_price(restaurant),
                    restaurant_features(restaurant)
                ));
                if let Some(url) = &restaurant.url {
                    out.push_str(&format!("    {url}\n"));
                }
            }
        }
    }
    out
}
