/// Keywords that mark a message as a warm lead.
const LEAD_KEYWORDS: [&str; 5] = ["buy", "need", "service", "price", "help"];

/// Fraction of the lead keyword set present in the message, in [0, 1].
/// Hosts use this to rank inbound leads; the routing pipeline itself does
/// not consume the score.
pub fn score_lead(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let hits = LEAD_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count();
    hits as f64 / LEAD_KEYWORDS.len() as f64
}
