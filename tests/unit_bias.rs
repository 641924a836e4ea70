// Unit tests for keyword-driven bias inference.
//
// Exercises the deterministic tie-break (hit count first, then the fixed
// category priority order), direction inference from the sentiment cue
// window, and the no-detection sentinel.

use litmus::bias::{self, NO_PATTERNS_SENTINEL};
use litmus::patterns::PatternSet;

fn infer(text: &str) -> bias::BiasAssessment {
    let set = PatternSet::compile().unwrap();
    let report = set.scan(text);
    bias::infer(&report, text)
}

// ============================================================
// No detection
// ============================================================

#[test]
fn neutral_text_yields_no_assessment() {
    let assessment = infer("The central bank raised interest rates by 0.5% on Tuesday.");
    assert!(!assessment.detected());
    assert!(assessment.bias_category.is_none());
    assert!(assessment.bias_target.is_none());
    assert!(assessment.matched_keywords.is_empty());
    assert_eq!(assessment.display_type(), NO_PATTERNS_SENTINEL);
}

// ============================================================
// Category tie-break
// ============================================================

#[test]
fn higher_hit_count_beats_priority_order() {
    // Two ethnic hits against one political hit: ethnic wins even though
    // political outranks it in the priority order.
    let assessment = infer("The yoruba and igbo communities both criticised tinubu");
    assert_eq!(assessment.bias_category.as_deref(), Some("ethnic"));
}

#[test]
fn exact_tie_falls_back_to_priority_order() {
    // One political hit, one ethnic hit: political wins the tie.
    let assessment = infer("tinubu met with igbo leaders yesterday");
    assert_eq!(assessment.bias_category.as_deref(), Some("political"));
    assert_eq!(assessment.bias_target.as_deref(), Some("TINUBU"));
}

#[test]
fn first_table_hit_in_winning_category_names_the_target() {
    // Both parties appear; "apc" precedes "pdp" in the table, so it is
    // the named target regardless of text order.
    let assessment = infer("supporters of pdp and apc clashed in the capital");
    assert_eq!(assessment.bias_category.as_deref(), Some("political"));
    assert_eq!(assessment.bias_target.as_deref(), Some("APC"));
}

// ============================================================
// Direction inference (political)
// ============================================================

#[test]
fn negative_cue_near_party_reads_as_anti() {
    let assessment = infer("apc is corrupt and has ruined everything");
    assert_eq!(
        assessment.inferred_bias_type.as_deref(),
        Some("Anti-APC political bias")
    );
}

#[test]
fn positive_cue_near_party_reads_as_pro() {
    let assessment = infer("vote apc for a better tomorrow");
    assert_eq!(
        assessment.inferred_bias_type.as_deref(),
        Some("Pro-APC political bias")
    );
}

#[test]
fn no_cue_near_party_reads_as_plain_bias() {
    let assessment = infer("apc announced its primary schedule today");
    assert_eq!(
        assessment.inferred_bias_type.as_deref(),
        Some("APC political bias")
    );
}

#[test]
fn cues_outside_the_window_do_not_flip_direction() {
    // "corrupt" sits more than three words away from the party mention.
    let assessment = infer("apc held a long meeting while others called the process corrupt");
    assert_eq!(
        assessment.inferred_bias_type.as_deref(),
        Some("APC political bias")
    );
}

// ============================================================
// Ethnic / religious / regional mappings
// ============================================================

#[test]
fn derogatory_ethnic_terms_map_to_their_target_group() {
    let assessment = infer("they keep calling him nyamiri online");
    assert_eq!(assessment.bias_category.as_deref(), Some("ethnic"));
    assert_eq!(
        assessment.inferred_bias_type.as_deref(),
        Some("Anti-Igbo ethnic bias")
    );
}

#[test]
fn religious_terms_map_to_intolerance_types() {
    let assessment = infer("he dismissed them all as infidel outsiders");
    assert_eq!(assessment.bias_category.as_deref(), Some("religious"));
    assert_eq!(
        assessment.inferred_bias_type.as_deref(),
        Some("Religious intolerance bias")
    );
}

#[test]
fn regional_terms_map_to_regional_bias() {
    let assessment = infer("the biafra question resurfaced in the debate");
    assert_eq!(assessment.bias_category.as_deref(), Some("regional"));
    assert_eq!(
        assessment.inferred_bias_type.as_deref(),
        Some("Pro-Biafran regional bias")
    );
}

// ============================================================
// Matched keywords
// ============================================================

#[test]
fn matched_keywords_are_deduplicated_in_table_order() {
    let assessment = infer("apc apc apc and the igbo community");
    assert_eq!(assessment.matched_keywords, vec!["apc", "igbo"]);
}

#[test]
fn inference_is_deterministic() {
    let text = "tinubu met with igbo and hausa leaders near arewa house";
    let a = infer(text);
    let b = infer(text);
    assert_eq!(a.bias_category, b.bias_category);
    assert_eq!(a.inferred_bias_type, b.inferred_bias_type);
    assert_eq!(a.matched_keywords, b.matched_keywords);
}
