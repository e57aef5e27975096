#![no_main]
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use challenge_status_core::challenge::parse_challenge;
use challenge_status_core::config::StatusConfig;
use challenge_status_engine::card::{build_card, CardOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(challenge) = parse_challenge(text, "fuzz.json") {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let _ = build_card(&challenge, &CardOptions::default(), &StatusConfig::default(), now);
    }
});
