// Rule-based pattern scanner — the fast path.
//
// Scans text against fixed, versioned phrase tables (trigger phrases,
// clickbait templates, fake-news markers, credibility red flags, viral
// manipulation) plus bias keyword groups. Pure string matching, no ML,
// deterministic given the same text and table version. Target cost is
// microseconds to low milliseconds so it can back quick mode alone.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LitmusError;

pub mod tables;

/// Coarse risk tier for a pattern category, monotonic in match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Tier for trigger/clickbait/viral categories: 1-2 matches is Medium,
    /// 3 or more is High. Zero matches never produces a PatternMatch, so
    /// Low only appears through `from_combined_count`.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1..=2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    /// Tier for the fake-news category, where marker matches and
    /// credibility flags combine: 1 is Low, 2 is Medium, 3+ is High.
    pub fn from_combined_count(count: usize) -> Self {
        match count {
            0 | 1 => RiskLevel::Low,
            2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Which table a set of matches came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Trigger,
    Clickbait,
    FakeNews,
    Viral,
}

impl PatternCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternCategory::Trigger => "trigger",
            PatternCategory::Clickbait => "clickbait",
            PatternCategory::FakeNews => "fake_news",
            PatternCategory::Viral => "viral",
        }
    }
}

/// One triggered pattern category with its ordered matched terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternMatch {
    pub category: PatternCategory,
    pub matched_terms: Vec<String>,
    pub risk_level: RiskLevel,
}

/// Matches for a single simple category (triggers, clickbait, viral).
/// `density` is matches per 100 words, used to scale deductions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryHits {
    pub matches: Vec<String>,
    pub density: f64,
}

impl CategoryHits {
    pub fn detected(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_count(self.matches.len())
    }
}

/// Fake-news scan result: language markers plus credibility red flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FakeNewsReport {
    pub fake_matches: Vec<String>,
    pub credibility_flags: Vec<String>,
    pub fake_density: f64,
    pub credibility_density: f64,
}

impl FakeNewsReport {
    /// A single vague attribution alone is not suspicious; any marker
    /// match or more than one credibility flag is.
    pub fn detected(&self) -> bool {
        !self.fake_matches.is_empty() || self.credibility_flags.len() > 1
    }

    pub fn total_flags(&self) -> usize {
        self.fake_matches.len() + self.credibility_flags.len()
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_combined_count(self.total_flags())
    }
}

/// One bias keyword hit, tied back to its table group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub term: &'static str,
}

/// Everything one scan produced. Deterministic given the same text and
/// `table_version`.
#[derive(Debug, Clone, Serialize)]
pub struct PatternReport {
    pub table_version: &'static str,
    pub triggers: CategoryHits,
    pub clickbait: CategoryHits,
    pub fake_news: FakeNewsReport,
    pub viral: CategoryHits,
    /// Bias keyword hits in table order, feeding the lightweight
    /// bias inference.
    pub keyword_hits: Vec<KeywordHit>,
}

impl PatternReport {
    /// Flatten to the generic match view: one entry per triggered category.
    pub fn matches(&self) -> Vec<PatternMatch> {
        let mut out = Vec::new();
        if self.triggers.detected() {
            out.push(PatternMatch {
                category: PatternCategory::Trigger,
                matched_terms: self.triggers.matches.clone(),
                risk_level: self.triggers.risk_level(),
            });
        }
        if self.clickbait.detected() {
            out.push(PatternMatch {
                category: PatternCategory::Clickbait,
                matched_terms: self.clickbait.matches.clone(),
                risk_level: self.clickbait.risk_level(),
            });
        }
        if self.fake_news.detected() {
            let mut terms = self.fake_news.fake_matches.clone();
            terms.extend(self.fake_news.credibility_flags.clone());
            out.push(PatternMatch {
                category: PatternCategory::FakeNews,
                matched_terms: terms,
                risk_level: self.fake_news.risk_level(),
            });
        }
        if self.viral.detected() {
            out.push(PatternMatch {
                category: PatternCategory::Viral,
                matched_terms: self.viral.matches.clone(),
                risk_level: self.viral.risk_level(),
            });
        }
        out
    }

    pub fn total_flags(&self) -> usize {
        self.triggers.matches.len()
            + self.clickbait.matches.len()
            + self.fake_news.total_flags()
            + self.viral.matches.len()
    }
}

/// Compiled pattern tables. Built once at startup; a malformed table is a
/// fatal configuration error, never a per-request failure.
pub struct PatternSet {
    triggers: Regex,
    clickbait: Regex,
    fake_news: Regex,
    credibility: Regex,
    viral: Regex,
}

impl PatternSet {
    /// Compile all tables into case-insensitive alternations.
    pub fn compile() -> Result<Self, LitmusError> {
        Ok(Self {
            triggers: compile_table("triggers", tables::TRIGGER_PHRASES)?,
            clickbait: compile_table("clickbait", tables::CLICKBAIT_PATTERNS)?,
            fake_news: compile_table("fake_news", tables::FAKE_NEWS_PATTERNS)?,
            credibility: compile_table("credibility", tables::CREDIBILITY_RED_FLAGS)?,
            viral: compile_table("viral", tables::VIRAL_PATTERNS)?,
        })
    }

    /// Scan text against every table. Pure and allocation-light; safe to
    /// call on every request.
    pub fn scan(&self, text: &str) -> PatternReport {
        let word_count = text.split_whitespace().count().max(1);

        let triggers = scan_category(&self.triggers, text, word_count);
        let clickbait = scan_category(&self.clickbait, text, word_count);
        let viral = scan_category(&self.viral, text, word_count);

        let fake_matches = find_all(&self.fake_news, text);
        let credibility_flags = find_all(&self.credibility, text);
        let fake_news = FakeNewsReport {
            fake_density: density(fake_matches.len(), word_count),
            credibility_density: density(credibility_flags.len(), word_count),
            fake_matches,
            credibility_flags,
        };

        PatternReport {
            table_version: tables::TABLE_VERSION,
            triggers,
            clickbait,
            fake_news,
            viral,
            keyword_hits: scan_keywords(text),
        }
    }
}

fn compile_table(name: &str, patterns: &[&str]) -> Result<Regex, LitmusError> {
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){joined}"))
        .map_err(|e| LitmusError::Configuration(format!("bad {name} pattern table: {e}")))
}

fn find_all(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

fn scan_category(re: &Regex, text: &str, word_count: usize) -> CategoryHits {
    let matches = find_all(re, text);
    CategoryHits {
        density: density(matches.len(), word_count),
        matches,
    }
}

/// Matches per 100 words, rounded to two decimals.
fn density(count: usize, word_count: usize) -> f64 {
    (count as f64 / word_count as f64 * 100.0 * 100.0).round() / 100.0
}

/// Plain lowercase substring scan over the bias keyword groups, in
/// table order so downstream tie-breaks stay deterministic.
fn scan_keywords(text: &str) -> Vec<KeywordHit> {
    let lower = text.to_lowercase();
    let mut hits = Vec::new();
    for group in tables::BIAS_KEYWORD_GROUPS {
        for &term in group.terms {
            if lower.contains(term) {
                hits.push(KeywordHit {
                    category: group.category,
                    subcategory: group.subcategory,
                    term,
                });
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_compile() {
        PatternSet::compile().expect("pattern tables should compile");
    }

    #[test]
    fn clean_text_produces_no_matches() {
        let set = PatternSet::compile().unwrap();
        let report = set.scan("The central bank raised interest rates by 0.5% on Tuesday.");
        assert_eq!(report.total_flags(), 0);
        assert!(report.matches().is_empty());
        assert!(report.keyword_hits.is_empty());
    }

    #[test]
    fn clickbait_is_case_insensitive() {
        let set = PatternSet::compile().unwrap();
        let report = set.scan("YOU WON'T BELIEVE what happened next");
        assert!(report.clickbait.detected());
        assert_eq!(report.clickbait.matches.len(), 2);
        assert_eq!(report.clickbait.risk_level(), RiskLevel::Medium);
    }

    #[test]
    fn scan_is_deterministic() {
        let set = PatternSet::compile().unwrap();
        let text = "BREAKING: shocking truth they don't want you to know! Share before they delete this!";
        let a = set.scan(text);
        let b = set.scan(text);
        assert_eq!(a.triggers.matches, b.triggers.matches);
        assert_eq!(a.fake_news.fake_matches, b.fake_news.fake_matches);
        assert_eq!(a.viral.matches, b.viral.matches);
    }

    #[test]
    fn single_credibility_flag_is_not_suspicious() {
        let set = PatternSet::compile().unwrap();
        let report = set.scan("Experts say the policy is working as intended.");
        assert_eq!(report.fake_news.credibility_flags.len(), 1);
        assert!(!report.fake_news.detected());
    }

    #[test]
    fn risk_level_is_monotonic_in_count() {
        let mut prev = RiskLevel::Low;
        for n in 0..6 {
            let level = RiskLevel::from_count(n);
            assert!(level >= prev, "risk must not decrease as matches grow");
            prev = level;
        }
    }
}
