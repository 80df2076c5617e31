//! Human-readable renderings shared by every front end.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::protocol::Restaurant;

/// Renders a candidate in the viewer's zone as `2025年1月10日 19:00`.
pub fn format_candidate<Tz: TimeZone>(datetime: &DateTime<Utc>, viewer: &Tz) -> String {
    let local = datetime.with_timezone(viewer);
    format!(
        "{}年{}月{}日 {:02}:{:02}",
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute()
    )
}

pub fn format_percentage(percentage: f64) -> String {
    if percentage.is_finite() {
        format!("{percentage:.0}%")
    } else {
        "0%".to_string()
    }
}

pub fn restaurant_location(restaurant: &Restaurant) -> String {
    format!(
        "{} ({})",
        restaurant.address, restaurant.distance_from_station
    )
}

pub fn restaurant_features(restaurant: &Restaurant) -> String {
    restaurant.features.join("、")
}

pub fn restaurant_price(restaurant: &Restaurant) -> String {
    format!("{}円", restaurant.price_range)
}
