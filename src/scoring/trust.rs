// Trust score engine — the weighted deduction model.
//
// Starts from 100 and subtracts a deduction per detected negative signal,
// then clamps to [0, 100]. Quick and deep mode run through this exact
// function with the same weights; they differ only in which signals are
// populated. The engine never errors for well-formed signals: malformed
// confidences are clamped on the way in, errored signals contribute zero
// deduction plus a trailing degradation note, and skipped signals
// contribute nothing at all.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::bias::BiasAssessment;
use crate::patterns::{PatternReport, RiskLevel};
use crate::providers::{SignalKind, SignalSet, SubSignal};

/// Coarse trust tier, a pure function of the score (70/40 thresholds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustIndicator {
    Trustworthy,
    Caution,
    LowTrust,
}

impl TrustIndicator {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            TrustIndicator::Trustworthy
        } else if score >= 40 {
            TrustIndicator::Caution
        } else {
            TrustIndicator::LowTrust
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustIndicator::Trustworthy => "trustworthy",
            TrustIndicator::Caution => "caution",
            TrustIndicator::LowTrust => "low_trust",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            TrustIndicator::Trustworthy => "🟢",
            TrustIndicator::Caution => "🟡",
            TrustIndicator::LowTrust => "🔴",
        }
    }
}

/// Finer six-band categorization, also pure in the score.
pub fn trust_level(score: u8) -> &'static str {
    match score {
        85..=100 => "highly_trusted",
        70..=84 => "trusted",
        55..=69 => "moderate_caution",
        40..=54 => "high_caution",
        25..=39 => "risky",
        _ => "highly_risky",
    }
}

/// One-sentence summary per score band.
pub fn summary_for(score: u8) -> &'static str {
    match score {
        85..=100 => "This content appears highly trustworthy with minimal bias or manipulation.",
        70..=84 => "This content appears generally trustworthy but exercise normal caution.",
        55..=69 => "This content shows some concerning patterns - verify from other sources.",
        40..=54 => "This content has multiple red flags - approach with significant caution.",
        25..=39 => "This content appears risky with several manipulation indicators.",
        _ => "This content shows strong signs of bias, manipulation, or misinformation.",
    }
}

/// Emotional-manipulation risk derived from an emotion label+confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManipulationRisk {
    High,
    Medium,
    Low,
    Minimal,
}

const HIGH_RISK_EMOTIONS: [&str; 2] = ["anger", "fear"];
const MEDIUM_RISK_EMOTIONS: [&str; 1] = ["sadness"];
/// Intense but not inherently manipulative emotions still count as
/// emotionally charged when predicted with high confidence.
const INTENSE_EMOTIONS: [&str; 4] = ["anger", "fear", "sadness", "surprise"];

pub fn manipulation_risk(label: &str, confidence: f64) -> ManipulationRisk {
    let high = HIGH_RISK_EMOTIONS.contains(&label);
    let medium = MEDIUM_RISK_EMOTIONS.contains(&label);

    if high && confidence > 0.7 {
        ManipulationRisk::High
    } else if medium && confidence > 0.6 {
        ManipulationRisk::Medium
    } else if high || (medium && confidence > 0.4) {
        ManipulationRisk::Low
    } else {
        ManipulationRisk::Minimal
    }
}

/// An intense emotion predicted with high confidence.
pub fn is_emotionally_charged(label: &str, confidence: f64) -> bool {
    confidence > 0.7 && INTENSE_EMOTIONS.contains(&label)
}

/// Configurable deduction weights. Defaults are fixed policy constants —
/// the binding invariants are monotonicity and boundedness, not the exact
/// magnitudes.
pub struct TrustWeights {
    pub bias_high_confidence: f64,
    pub bias_moderate: f64,
    /// Deduction when only the keyword bias assessment fires. Never
    /// stacked with the ML deduction — the larger single value applies.
    pub bias_keyword: f64,
    /// ML bias confidence at or above this uses the high band.
    pub bias_high_band: f64,
    pub emotion_high: f64,
    pub emotion_medium: f64,
    pub emotion_charged: f64,
    pub sentiment_bias_indicator: f64,
    pub sentiment_negative: f64,
    pub sentiment_positive: f64,
    /// Negative sentiment confidence above this counts as a bias indicator.
    pub sentiment_bias_band: f64,
    pub trigger_cap: f64,
    pub trigger_density_factor: f64,
    pub clickbait_cap: f64,
    pub clickbait_density_factor: f64,
    pub fake_high: f64,
    pub fake_medium: f64,
    pub fake_low: f64,
    pub viral_high: f64,
    pub viral_medium: f64,
    pub balanced_bonus: f64,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            bias_high_confidence: 35.0,
            bias_moderate: 20.0,
            bias_keyword: 20.0,
            bias_high_band: 0.8,
            emotion_high: 30.0,
            emotion_medium: 20.0,
            emotion_charged: 15.0,
            sentiment_bias_indicator: 15.0,
            sentiment_negative: 10.0,
            sentiment_positive: 3.0,
            sentiment_bias_band: 0.8,
            trigger_cap: 20.0,
            trigger_density_factor: 2.0,
            clickbait_cap: 15.0,
            clickbait_density_factor: 3.0,
            fake_high: 25.0,
            fake_medium: 15.0,
            fake_low: 8.0,
            viral_high: 20.0,
            viral_medium: 12.0,
            balanced_bonus: 5.0,
        }
    }
}

/// The bounded, explainable verdict.
#[derive(Debug, Clone, Serialize)]
pub struct TrustScoreResult {
    pub score: u8,
    pub indicator: TrustIndicator,
    pub trust_level: &'static str,
    /// Findings in fixed priority order: score-impacting first,
    /// informational next, degradation notes last.
    pub explanation: Vec<String>,
    pub tip: String,
    pub primary_bias_type: Option<String>,
    pub risk_factors: Vec<&'static str>,
    pub summary: &'static str,
}

/// Compute the trust score from every available signal.
///
/// Pure aggregation: same inputs, same output, regardless of the order
/// providers completed in. `headline_mismatch` adds an informational
/// finding only — it never changes the score.
pub fn compute_trust_score(
    signals: &SignalSet,
    report: &PatternReport,
    assessment: &BiasAssessment,
    headline_mismatch: bool,
    weights: &TrustWeights,
) -> TrustScoreResult {
    let mut deductions = 0.0;
    let mut explanation: Vec<String> = Vec::new();
    let mut risk_factors: Vec<&'static str> = Vec::new();

    // --- Bias: ML toxicity signal vs keyword assessment, never both.
    // The same underlying evidence (biased language) must not be
    // double-counted, so the larger single deduction wins.
    let ml_bias = bias_deduction(&signals.toxicity, weights);
    let keyword_bias = if assessment.detected() {
        Some((
            weights.bias_keyword,
            "Bias-indicative keywords detected in the text.",
            "keyword_bias",
        ))
    } else {
        None
    };

    let applied_bias = match (ml_bias, keyword_bias) {
        (Some(ml), Some(kw)) => Some(if ml.0 >= kw.0 { ml } else { kw }),
        (ml, kw) => ml.or(kw),
    };

    if let Some((amount, text, factor)) = applied_bias {
        deductions += amount;
        explanation.push(text.to_string());
        risk_factors.push(factor);
    }

    // --- Bias type (informational): prefer the zero-shot signal, fall
    // back to the keyword assessment.
    let primary_bias_type = resolve_bias_type(signals, assessment, applied_bias.is_some());
    if applied_bias.is_some() {
        match primary_bias_type.as_deref() {
            Some("neutral") => {
                explanation.push("Bias type analysis indicates neutrality.".to_string());
            }
            Some(bias_type) => {
                explanation.push(format!(
                    "Dominant bias type identified: {}.",
                    title_case(bias_type)
                ));
            }
            None => {}
        }
    }

    // --- Emotion
    if signals.emotion.is_usable() {
        let emotion = &signals.emotion;
        match manipulation_risk(&emotion.label, emotion.confidence) {
            ManipulationRisk::High => {
                deductions += weights.emotion_high;
                explanation.push("Content uses highly manipulative emotional language.".to_string());
                risk_factors.push("emotional_manipulation");
            }
            ManipulationRisk::Medium => {
                deductions += weights.emotion_medium;
                explanation.push("Content shows signs of emotional manipulation.".to_string());
                risk_factors.push("moderate_emotion");
            }
            _ if is_emotionally_charged(&emotion.label, emotion.confidence) => {
                deductions += weights.emotion_charged;
                explanation.push("Content is emotionally charged.".to_string());
                risk_factors.push("emotional_content");
            }
            _ => {}
        }
    }

    // --- Sentiment
    if signals.sentiment.is_usable() {
        let sentiment = &signals.sentiment;
        if sentiment.label == "negative" && sentiment.confidence > weights.sentiment_bias_band {
            deductions += weights.sentiment_bias_indicator;
            explanation.push("Sentiment analysis indicates potential bias.".to_string());
            risk_factors.push("sentiment_bias");
        } else if sentiment.label == "negative" {
            deductions += weights.sentiment_negative;
            explanation.push("Text expresses a negative tone.".to_string());
            risk_factors.push("negative_sentiment");
        } else if sentiment.label == "positive" {
            deductions += weights.sentiment_positive;
            explanation.push("Text expresses a positive tone.".to_string());
        }
    }

    // --- Pattern analysis
    if report.triggers.detected() {
        deductions += (report.triggers.density * weights.trigger_density_factor).min(weights.trigger_cap);
        explanation
            .push("Contains regional expressions commonly used in misleading content.".to_string());
        risk_factors.push("regional_triggers");
    }

    if report.clickbait.detected() {
        deductions +=
            (report.clickbait.density * weights.clickbait_density_factor).min(weights.clickbait_cap);
        explanation.push("Contains clickbait patterns designed to attract clicks.".to_string());
        risk_factors.push("clickbait");
    }

    if report.fake_news.detected() {
        let (amount, text, factor) = match report.fake_news.risk_level() {
            RiskLevel::High => (
                weights.fake_high,
                "High risk of fake news based on language patterns.",
                "high_fake_risk",
            ),
            RiskLevel::Medium => (
                weights.fake_medium,
                "Medium risk of fake news based on language patterns.",
                "medium_fake_risk",
            ),
            RiskLevel::Low => (
                weights.fake_low,
                "Some suspicious patterns detected.",
                "low_fake_risk",
            ),
        };
        deductions += amount;
        explanation.push(text.to_string());
        risk_factors.push(factor);

        let phrases = top_phrases(&report.fake_news.fake_matches, 3);
        if !phrases.is_empty() {
            explanation.push(format!("Suspicious phrases: {}", phrases.join(", ")));
        }
    }

    if report.viral.detected() {
        match report.viral.risk_level() {
            RiskLevel::High => {
                deductions += weights.viral_high;
                explanation
                    .push("Contains patterns designed to manipulate viral sharing.".to_string());
                risk_factors.push("viral_manipulation");
            }
            RiskLevel::Medium => {
                deductions += weights.viral_medium;
                explanation.push("Shows some viral manipulation tactics.".to_string());
                risk_factors.push("mild_viral_manipulation");
            }
            RiskLevel::Low => {}
        }
    }

    // --- Bonus for neutral, well-balanced content
    let mut bonus = 0.0;
    if risk_factors.is_empty()
        && signals.sentiment.is_usable()
        && signals.sentiment.label == "neutral"
    {
        bonus = weights.balanced_bonus;
        explanation.push("Content appears balanced and factual.".to_string());
    }

    // --- Informational findings
    if headline_mismatch {
        explanation
            .push("Headline sentiment differs notably from the content.".to_string());
    }

    // --- Degradation notes, always last
    for kind in signals.degraded() {
        explanation.push(degradation_note(kind));
    }

    let raw = 100.0 - deductions + bonus;
    if raw > 100.0 + weights.balanced_bonus || deductions < 0.0 {
        // Should be unreachable while the weights stay non-negative.
        warn!(raw, deductions, "trust score outside expected range, clamping");
    }
    let score = raw.clamp(0.0, 100.0).round() as u8;

    let indicator = TrustIndicator::from_score(score);

    TrustScoreResult {
        score,
        indicator,
        trust_level: trust_level(score),
        tip: select_tip(&risk_factors, indicator),
        explanation,
        primary_bias_type,
        risk_factors,
        summary: summary_for(score),
    }
}

/// ML bias deduction from the toxicity signal, if it fired.
fn bias_deduction(
    toxicity: &SubSignal,
    weights: &TrustWeights,
) -> Option<(f64, &'static str, &'static str)> {
    if !toxicity.is_usable() || !toxicity.detected {
        return None;
    }
    if toxicity.confidence >= weights.bias_high_band {
        Some((
            weights.bias_high_confidence,
            "High confidence bias detected in language patterns.",
            "high_bias",
        ))
    } else {
        Some((
            weights.bias_moderate,
            "Potential bias detected in language patterns.",
            "moderate_bias",
        ))
    }
}

/// Pick the primary bias type: zero-shot classifier first, keyword
/// assessment second. Only meaningful when a bias deduction applied.
fn resolve_bias_type(
    signals: &SignalSet,
    assessment: &BiasAssessment,
    bias_applied: bool,
) -> Option<String> {
    if !bias_applied {
        return None;
    }
    if signals.bias_type.is_usable() {
        let label = &signals.bias_type.label;
        if signals.bias_type.detected || label == "neutral" {
            return Some(label.clone());
        }
    }
    assessment.inferred_bias_type.clone()
}

/// First `limit` distinct phrases, lowercased for stable dedup.
fn top_phrases(matches: &[String], limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for m in matches {
        let lower = m.to_lowercase();
        if !seen.contains(&lower) {
            seen.push(lower);
            if seen.len() == limit {
                break;
            }
        }
    }
    seen
}

fn degradation_note(kind: SignalKind) -> String {
    format!(
        "Note: {} analysis was unavailable — this dimension was not scored.",
        kind.as_str().replace('_', " ")
    )
}

/// Contextual tips keyed by the highest-priority risk factor present.
/// Fully deterministic: fixed priority order, fixed per-tier fallback.
fn select_tip(risk_factors: &[&'static str], indicator: TrustIndicator) -> String {
    const TIPS: [(&[&str], &str); 6] = [
        (
            &["high_bias", "moderate_bias", "keyword_bias"],
            "Always check if an article presents multiple perspectives on controversial topics.",
        ),
        (
            &["emotional_manipulation", "moderate_emotion"],
            "Be extra cautious of content that makes you feel strong emotions like anger or fear.",
        ),
        (
            &["viral_manipulation", "mild_viral_manipulation"],
            "Content asking you to share urgently is often trying to spread misinformation quickly.",
        ),
        (
            &["high_fake_risk", "medium_fake_risk", "low_fake_risk"],
            "Look for specific dates, sources, and verifiable facts in news articles.",
        ),
        (
            &["regional_triggers"],
            "Local expressions can be used to make fake news seem more authentic and relatable.",
        ),
        (
            &["clickbait"],
            "Headlines designed to get clicks often don't match the actual content of the article.",
        ),
    ];

    for (factors, tip) in TIPS {
        if factors.iter().any(|f| risk_factors.contains(f)) {
            return tip.to_string();
        }
    }

    match indicator {
        TrustIndicator::Trustworthy => {
            "Real news rarely needs excessive exclamation marks or ALL CAPS.".to_string()
        }
        TrustIndicator::Caution => {
            "If something sounds too shocking to be true, verify it from multiple sources."
                .to_string()
        }
        TrustIndicator::LowTrust => {
            "Biased content often presents only one side of a complex issue.".to_string()
        }
    }
}

/// "political bias" -> "Political Bias"
fn title_case(s: &str) -> String {
    s.split(&['_', ' '][..])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
