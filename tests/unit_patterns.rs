// Unit tests for the rule-based pattern scanner.
//
// Tests isolated pure behavior: RiskLevel boundary conditions, density
// math, fake-news detection rules, and keyword scan ordering. No ML,
// no network, no filesystem.

use litmus::patterns::{PatternSet, RiskLevel};

// ============================================================
// RiskLevel — boundary conditions
// ============================================================

#[test]
fn risk_zero_matches_is_low() {
    assert_eq!(RiskLevel::from_count(0), RiskLevel::Low);
}

#[test]
fn risk_one_match_is_medium() {
    assert_eq!(RiskLevel::from_count(1), RiskLevel::Medium);
}

#[test]
fn risk_two_matches_is_medium() {
    assert_eq!(RiskLevel::from_count(2), RiskLevel::Medium);
}

#[test]
fn risk_three_matches_is_high() {
    assert_eq!(RiskLevel::from_count(3), RiskLevel::High);
}

#[test]
fn risk_many_matches_is_high() {
    assert_eq!(RiskLevel::from_count(50), RiskLevel::High);
}

#[test]
fn combined_risk_single_flag_stays_low() {
    // Fake news uses the combined scale: one flag alone is not enough
    // to escalate past Low.
    assert_eq!(RiskLevel::from_combined_count(0), RiskLevel::Low);
    assert_eq!(RiskLevel::from_combined_count(1), RiskLevel::Low);
    assert_eq!(RiskLevel::from_combined_count(2), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_combined_count(3), RiskLevel::High);
}

#[test]
fn risk_levels_are_ordered() {
    assert!(RiskLevel::Low < RiskLevel::Medium);
    assert!(RiskLevel::Medium < RiskLevel::High);
}

// ============================================================
// Scanning — category detection
// ============================================================

#[test]
fn clean_text_has_zero_flags() {
    let set = PatternSet::compile().unwrap();
    let report = set.scan("The committee published its quarterly report on schedule.");
    assert_eq!(report.total_flags(), 0);
    assert!(!report.triggers.detected());
    assert!(!report.clickbait.detected());
    assert!(!report.fake_news.detected());
    assert!(!report.viral.detected());
    assert!(report.keyword_hits.is_empty());
}

#[test]
fn clickbait_phrases_are_detected_case_insensitively() {
    let set = PatternSet::compile().unwrap();
    let report = set.scan("YOU WON'T BELIEVE what happened next in this viral video");
    assert!(report.clickbait.detected());
    assert!(report.clickbait.matches.len() >= 3);
}

#[test]
fn trigger_phrases_include_pidgin_expressions() {
    let set = PatternSet::compile().unwrap();
    let report = set.scan("Na wa o, see wetin dey happen for this country");
    assert!(report.triggers.detected());
    assert!(report.triggers.matches.len() >= 2);
}

#[test]
fn single_fake_marker_alone_is_detected_at_low_risk() {
    let set = PatternSet::compile().unwrap();
    let report = set.scan("This scandal has surprised many observers.");
    assert!(report.fake_news.detected());
    assert_eq!(report.fake_news.risk_level(), RiskLevel::Low);
}

#[test]
fn single_credibility_flag_alone_is_not_fake_news() {
    // One vague attribution with no sensationalist language is normal
    // journalistic shorthand, not a detection.
    let set = PatternSet::compile().unwrap();
    let report = set.scan("Experts say inflation may slow later this year.");
    assert!(report.fake_news.fake_matches.is_empty());
    assert_eq!(report.fake_news.credibility_flags.len(), 1);
    assert!(!report.fake_news.detected());
}

#[test]
fn fake_marker_plus_credibility_flags_escalates_risk() {
    let set = PatternSet::compile().unwrap();
    let report = set.scan(
        "SHOCKING: according to sources, insider reveals the leaked document experts say is real",
    );
    assert!(report.fake_news.detected());
    assert_eq!(report.fake_news.risk_level(), RiskLevel::High);
}

#[test]
fn viral_urgency_patterns_are_detected() {
    let set = PatternSet::compile().unwrap();
    let report = set.scan("URGENT: share this before they delete this, it's going viral");
    assert!(report.viral.detected());
    assert!(report.viral.matches.len() >= 3);
    assert_eq!(report.viral.risk_level(), RiskLevel::High);
}

// ============================================================
// Density — matches per 100 words
// ============================================================

#[test]
fn density_is_matches_per_hundred_words() {
    let set = PatternSet::compile().unwrap();
    // 10 words, 1 clickbait match ("you won't believe") -> 10 per 100.
    let report = set.scan("you won't believe the story behind the harvest this year");
    assert_eq!(report.clickbait.matches.len(), 1);
    assert!((report.clickbait.density - 10.0).abs() < 1e-9);
}

#[test]
fn empty_scan_is_safe() {
    // Word count is floored at 1 so density math never divides by zero.
    let set = PatternSet::compile().unwrap();
    let report = set.scan("");
    assert_eq!(report.total_flags(), 0);
    assert_eq!(report.triggers.density, 0.0);
}

// ============================================================
// Keyword scan — table order and dedup inputs
// ============================================================

#[test]
fn keyword_hits_follow_table_order() {
    let set = PatternSet::compile().unwrap();
    // Ethnic group appears before the political party in the text, but
    // the scan walks the tables, so political comes out first.
    let report = set.scan("igbo voters largely backed apc this cycle");
    let categories: Vec<&str> = report.keyword_hits.iter().map(|h| h.category).collect();
    assert_eq!(categories, vec!["political", "ethnic"]);
}

#[test]
fn keyword_matching_is_lowercase_substring() {
    let set = PatternSet::compile().unwrap();
    let report = set.scan("TINUBU addressed the nation yesterday");
    assert_eq!(report.keyword_hits.len(), 1);
    assert_eq!(report.keyword_hits[0].term, "tinubu");
    assert_eq!(report.keyword_hits[0].subcategory, "parties");
}

#[test]
fn report_carries_the_table_version() {
    let set = PatternSet::compile().unwrap();
    let report = set.scan("anything");
    assert!(!report.table_version.is_empty());
}

// ============================================================
// Flattened match view
// ============================================================

#[test]
fn matches_flatten_one_entry_per_triggered_category() {
    use litmus::patterns::PatternCategory;

    let set = PatternSet::compile().unwrap();
    let report = set.scan("BREAKING: you won't believe this, share this now!");

    let matches = report.matches();
    let categories: Vec<PatternCategory> = matches.iter().map(|m| m.category).collect();
    assert_eq!(
        categories,
        vec![
            PatternCategory::Trigger,
            PatternCategory::Clickbait,
            PatternCategory::FakeNews,
            PatternCategory::Viral,
        ]
    );
    assert!(matches.iter().all(|m| !m.matched_terms.is_empty()));
}

// ============================================================
// Determinism
// ============================================================

#[test]
fn scanning_is_deterministic() {
    let set = PatternSet::compile().unwrap();
    let text = "BREAKING: you won't believe this scandal, share this now, urgent!";
    let a = set.scan(text);
    let b = set.scan(text);
    assert_eq!(a.total_flags(), b.total_flags());
    assert_eq!(a.triggers.matches, b.triggers.matches);
    assert_eq!(a.fake_news.fake_matches, b.fake_news.fake_matches);
    assert_eq!(a.keyword_hits, b.keyword_hits);
}
