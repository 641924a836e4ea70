// Lightweight keyword-driven bias inference — no ML.
//
// Maps the bias keyword hits from a pattern scan to a single bias
// category/target/type. Tie-break is fully deterministic: the category
// with the most keyword hits wins, and exact ties fall back to the fixed
// priority order political > ethnic > religious > regional.

use serde::{Deserialize, Serialize};

use crate::patterns::{KeywordHit, PatternReport};

/// Recognized "nothing found" marker. Downstream consumers treat this as
/// absent, not as a real finding.
pub const NO_PATTERNS_SENTINEL: &str = "No specific patterns detected";

/// Fixed category priority used to break exact count ties.
const CATEGORY_PRIORITY: [&str; 4] = ["political", "ethnic", "religious", "regional"];

/// Sentiment cue words used to infer bias direction around a term.
const NEGATIVE_CUES: [&str; 9] = [
    "bad", "terrible", "corrupt", "evil", "worst", "hate", "destroy", "useless", "incompetent",
];
const POSITIVE_CUES: [&str; 8] = [
    "good", "great", "best", "love", "excellent", "amazing", "support", "vote",
];

/// Bias assessment derived purely from pattern-scan keyword hits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiasAssessment {
    pub inferred_bias_type: Option<String>,
    pub bias_category: Option<String>,
    pub bias_target: Option<String>,
    /// Deduplicated matched terms, in table order.
    pub matched_keywords: Vec<String>,
}

impl BiasAssessment {
    pub fn detected(&self) -> bool {
        self.bias_category.is_some()
    }

    /// The inferred type, or the sentinel when nothing matched.
    pub fn display_type(&self) -> &str {
        self.inferred_bias_type
            .as_deref()
            .unwrap_or(NO_PATTERNS_SENTINEL)
    }
}

/// Infer a bias assessment from a pattern report.
///
/// `text` is only consulted for the ±3-word sentiment window that decides
/// Anti-/Pro- direction for political targets; all detection comes from
/// the report's keyword hits.
pub fn infer(report: &PatternReport, text: &str) -> BiasAssessment {
    if report.keyword_hits.is_empty() {
        return BiasAssessment::default();
    }

    let matched_keywords = dedup_terms(&report.keyword_hits);
    let winner = winning_category(&report.keyword_hits);

    // First hit in the winning category, in table order.
    let hit = report
        .keyword_hits
        .iter()
        .find(|h| h.category == winner)
        .expect("winning category always has at least one hit");

    let (bias_type, target) = match winner {
        "political" => political_bias(hit.term, text),
        "ethnic" => ethnic_bias(hit.term),
        "religious" => religious_bias(hit.term),
        _ => regional_bias(hit.term),
    };

    BiasAssessment {
        inferred_bias_type: Some(bias_type),
        bias_category: Some(winner.to_string()),
        bias_target: Some(target),
        matched_keywords,
    }
}

fn dedup_terms(hits: &[KeywordHit]) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for hit in hits {
        if !terms.iter().any(|t| t == hit.term) {
            terms.push(hit.term.to_string());
        }
    }
    terms
}

/// Highest hit count wins; exact ties break by CATEGORY_PRIORITY order.
fn winning_category(hits: &[KeywordHit]) -> &'static str {
    let mut best: &'static str = CATEGORY_PRIORITY[0];
    let mut best_count = 0usize;
    for &category in &CATEGORY_PRIORITY {
        let count = hits.iter().filter(|h| h.category == category).count();
        if count > best_count {
            best = category;
            best_count = count;
        }
    }
    best
}

fn political_bias(term: &str, text: &str) -> (String, String) {
    let target = term.to_uppercase();
    let bias_type = match bias_direction(text, term) {
        Direction::Negative => format!("Anti-{target} political bias"),
        Direction::Positive => format!("Pro-{target} political bias"),
        Direction::Neutral => format!("{target} political bias"),
    };
    (bias_type, target)
}

fn ethnic_bias(term: &str) -> (String, String) {
    // Derogatory terms imply a target group distinct from the slur itself.
    let bias_type = match term {
        "aboki" => "Anti-Northern ethnic bias".to_string(),
        "nyamiri" => "Anti-Igbo ethnic bias".to_string(),
        "gambari" => "Anti-Hausa ethnic bias".to_string(),
        _ => format!("Anti-{} ethnic bias", capitalize(term)),
    };
    (bias_type, capitalize(term))
}

fn religious_bias(term: &str) -> (String, String) {
    let bias_type = match term {
        "christian" | "catholic" | "pentecostal" | "orthodox" | "crusade" | "crusader" => {
            "Anti-Christian religious bias".to_string()
        }
        "muslim" | "sharia" | "jihad" | "jihadist" | "sunni" | "shia" => {
            "Anti-Muslim religious bias".to_string()
        }
        "infidel" | "kafir" | "pagan" | "fundamentalist" => {
            "Religious intolerance bias".to_string()
        }
        _ => "Religious bias".to_string(),
    };
    (bias_type, capitalize(term))
}

fn regional_bias(term: &str) -> (String, String) {
    let bias_type = match term {
        "arewa" => "Pro-Northern regional bias".to_string(),
        "biafra" => "Pro-Biafran regional bias".to_string(),
        "northerner" | "core north" => "Anti-Northern regional bias".to_string(),
        "southerner" => "Anti-Southern regional bias".to_string(),
        _ => format!("{} regional bias", capitalize(term)),
    };
    (bias_type, capitalize(term))
}

enum Direction {
    Negative,
    Positive,
    Neutral,
}

/// Look at the ±3-word window around the term and count sentiment cues.
fn bias_direction(text: &str, term: &str) -> Direction {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let head = term.split_whitespace().next().unwrap_or(term);

    let Some(idx) = words.iter().position(|w| w.contains(head)) else {
        return Direction::Neutral;
    };

    let start = idx.saturating_sub(3);
    let end = (idx + 4).min(words.len());
    let window = &words[start..end];

    let negative = window
        .iter()
        .filter(|w| NEGATIVE_CUES.iter().any(|cue| w.contains(cue)))
        .count();
    let positive = window
        .iter()
        .filter(|w| POSITIVE_CUES.iter().any(|cue| w.contains(cue)))
        .count();

    if negative > positive {
        Direction::Negative
    } else if positive > negative {
        Direction::Positive
    } else {
        Direction::Neutral
    }
}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternSet;

    fn assess(text: &str) -> BiasAssessment {
        let set = PatternSet::compile().unwrap();
        infer(&set.scan(text), text)
    }

    #[test]
    fn no_keywords_yields_empty_assessment() {
        let a = assess("The weather was mild across the coast this weekend.");
        assert!(!a.detected());
        assert_eq!(a.display_type(), NO_PATTERNS_SENTINEL);
        assert!(a.matched_keywords.is_empty());
    }

    #[test]
    fn political_term_with_negative_window_is_anti() {
        let a = assess("The corrupt APC leadership has ruined everything");
        assert_eq!(a.bias_category.as_deref(), Some("political"));
        assert_eq!(a.bias_target.as_deref(), Some("APC"));
        assert_eq!(a.inferred_bias_type.as_deref(), Some("Anti-APC political bias"));
    }

    #[test]
    fn political_term_with_positive_window_is_pro() {
        let a = assess("Vote Tinubu, the best choice for the country");
        assert_eq!(a.inferred_bias_type.as_deref(), Some("Pro-TINUBU political bias"));
    }

    #[test]
    fn higher_count_category_wins() {
        // Two ethnic hits vs one religious hit: ethnic must win.
        let a = assess("The yoruba and igbo communities criticized the christian leadership");
        assert_eq!(a.bias_category.as_deref(), Some("ethnic"));
    }

    #[test]
    fn exact_tie_breaks_by_priority_order() {
        // One ethnic hit and one religious hit: ethnic outranks religious.
        let a = assess("A yoruba man and a muslim trader met at the border");
        assert_eq!(a.bias_category.as_deref(), Some("ethnic"));
    }

    #[test]
    fn derogatory_term_maps_to_target_group() {
        let a = assess("They keep calling him nyamiri in the market");
        assert_eq!(a.inferred_bias_type.as_deref(), Some("Anti-Igbo ethnic bias"));
        assert_eq!(a.bias_category.as_deref(), Some("ethnic"));
    }
}
