use super::*;
use chrono::TimeZone;
use serde_json::json;

#[test]
fn create_request_encodes_iso_timestamps_in_utc_millis() {
    let request = CreateEventRequest {
        station_name: "新宿駅".into(),
        candidate_datetimes: vec![CandidateDateTime::new(
            Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).single().expect("ts"),
        )],
    };

    let value = serde_json::to_value(&request).expect("serialize");
    assert_eq!(
        value,
        json!({
            "station_name": "新宿駅",
            "candidate_datetimes": [{ "datetime": "2025-01-10T10:00:00.000Z" }],
        })
    );
}

#[test]
fn event_view_accepts_offset_less_timestamps_as_utc() {
    let view: EventView = serde_json::from_value(json!({
        "candidate_datetimes": [
            { "datetime": "2025-01-10T10:00:00", "participant_count": 2 },
            { "datetime": "2025-01-11T10:00:00+09:00" },
        ],
    }))
    .expect("decode");

    assert_eq!(
        view.candidate_datetimes[0].datetime,
        Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).single().expect("ts")
    );
    assert_eq!(view.candidate_datetimes[0].participant_count, Some(2));
    assert_eq!(
        view.candidate_datetimes[1].datetime,
        Utc.with_ymd_and_hms(2025, 1, 11, 1, 0, 0).single().expect("ts")
    );
    assert!(view.participants.is_empty());
    assert!(view.recommended_restaurants.is_empty());
}

#[test]
fn event_view_treats_null_lists_as_empty_and_accepts_restaurants_alias() {
    let view: EventView = serde_json::from_value(json!({
        "event_id": "e-1",
        "station_name": "新宿",
        "candidate_datetimes": [{ "datetime": "2025-01-10T10:00:00.000Z" }],
        "participants": null,
        "restaurants": [{
            "name": "ビアホール麦酒",
            "address": "東京都新宿区西新宿1-1-1",
            "distance_from_station": "徒歩2分",
            "genre": "ビアホール",
            "features": ["ビール", "洋食"],
            "price_range": "3000-4000",
            "url": "https://example.com/bakushu",
            "matching_comments": ["ビールが飲みたい"],
        }],
    }))
    .expect("decode");

    assert_eq!(view.event_id, Some(EventId::new("e-1")));
    assert!(view.participants.is_empty());
    assert_eq!(view.recommended_restaurants.len(), 1);
    assert_eq!(
        view.recommended_restaurants[0].url.as_deref(),
        Some("https://example.com/bakushu")
    );
}

#[test]
fn participant_availabilities_accept_flags_and_status_objects() {
    let view: EventView = serde_json::from_value(json!({
        "candidate_datetimes": [
            { "datetime": "2025-01-10T10:00:00Z" },
            { "datetime": "2025-01-11T10:00:00Z" },
        ],
        "participants": [
            { "availabilities": [true, false], "comment": "個室希望" },
            {
                "participant_id": "p-2",
                "availabilities": [
                    { "datetime": "2025-01-10T10:00:00", "status": "AVAILABLE" },
                    { "datetime": "2025-01-11T10:00:00", "status": "MAYBE" },
                ],
                "comment": null,
            },
        ],
    }))
    .expect("decode");

    assert_eq!(view.participants[0].availabilities, vec![true, false]);
    assert_eq!(view.participants[1].availabilities, vec![true, false]);
    assert_eq!(view.participants[0].visible_comment(), Some("個室希望"));
    assert_eq!(view.participants[1].visible_comment(), None);
}

#[test]
fn event_view_without_candidates_is_rejected() {
    let err = serde_json::from_value::<EventView>(json!({ "participants": [] }))
        .expect_err("candidate list is required");
    assert!(err.to_string().contains("candidate_datetimes"));
}

#[test]
fn missing_flag_reads_as_unavailable() {
    let entry = ParticipantEntry {
        participant_id: None,
        availabilities: vec![true],
        comment: Some("   ".into()),
    };
    assert!(entry.is_available_for(0));
    assert!(!entry.is_available_for(2));
    assert_eq!(entry.visible_comment(), Some("   "));

    let silent = ParticipantEntry {
        comment: Some(String::new()),
        ..entry.clone()
    };
    assert_eq!(silent.visible_comment(), None);
    let absent = ParticipantEntry {
        comment: None,
        ..entry
    };
    assert_eq!(absent.visible_comment(), None);
}

#[test]
fn api_routes_embed_event_id() {
    let event_id = EventId::new("abc");
    assert_eq!(events_route(), "/api/events");
    assert_eq!(event_route(&event_id), "/api/events/abc");
    assert_eq!(participants_route(&event_id), "/api/events/abc/participants");
}
