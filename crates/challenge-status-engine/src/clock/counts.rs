use challenge_status_core::types::CountNoun;

/// Tooltip text for registrant/submission counts.
pub fn describe_count(n: u64, noun: CountNoun) -> String {
    let noun = noun.as_str();
    match n {
        0 => format!("No {noun}s"),
        1 => format!("1 total {noun}"),
        _ => format!("{n} total {noun}s"),
    }
}
