// Colored terminal output for analysis reports.
//
// This module handles all terminal-specific formatting. The main.rs
// display code delegates here.

use colored::Colorize;

use crate::analyzer::{Analysis, QuickAnalysis};
use crate::patterns::RiskLevel;
use crate::scoring::trust::{TrustIndicator, TrustScoreResult};

/// Display a deep-mode analysis report.
pub fn display_analysis(analysis: &Analysis) {
    display_verdict(&analysis.trust);

    let pattern_matches = analysis.report.matches();
    if !pattern_matches.is_empty() {
        println!("{}", "Pattern flags:".bold());
        for m in &pattern_matches {
            println!(
                "  {} [{}]: {}",
                m.category.as_str(),
                colorize_risk(m.risk_level),
                m.matched_terms.join(", ")
            );
        }
        println!();
    }

    let degraded = analysis.signals.degraded();
    if !degraded.is_empty() {
        println!(
            "  {}",
            format!(
                "degraded dimensions: {}",
                degraded
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
            .yellow()
        );
    }

    println!(
        "  {}",
        format!("analyzed in {:.1} ms", analysis.metadata.overall_ms).dimmed()
    );
    println!();
}

/// Display a quick-mode report.
pub fn display_quick(analysis: &QuickAnalysis) {
    display_verdict(&analysis.trust);
    if analysis.assessment.detected() {
        println!(
            "  {} {}",
            "Bias pattern:".bold(),
            analysis.assessment.display_type()
        );
    }
    println!();
}

fn display_verdict(trust: &TrustScoreResult) {
    println!();
    println!(
        "{} {}  {}",
        trust.indicator.glyph(),
        format!("Trust score: {}/100", trust.score).bold(),
        colorize_indicator(trust.indicator),
    );
    println!("  {}", trust.summary);
    println!();

    if !trust.explanation.is_empty() {
        println!("{}", "Findings:".bold());
        for line in &trust.explanation {
            println!("  - {line}");
        }
        println!();
    }

    println!("{} {}", "Tip:".bold(), trust.tip.italic());
}

fn colorize_risk(level: RiskLevel) -> colored::ColoredString {
    match level {
        RiskLevel::Low => level.as_str().green(),
        RiskLevel::Medium => level.as_str().yellow(),
        RiskLevel::High => level.as_str().red(),
    }
}

fn colorize_indicator(indicator: TrustIndicator) -> colored::ColoredString {
    match indicator {
        TrustIndicator::Trustworthy => indicator.as_str().green(),
        TrustIndicator::Caution => indicator.as_str().yellow(),
        TrustIndicator::LowTrust => indicator.as_str().red(),
    }
}

/// Truncate to at most `max_chars` characters, respecting UTF-8
/// boundaries, appending an ellipsis when truncated.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn truncate_respects_multibyte_chars() {
        let s = "naïve café — résumé";
        let t = truncate_chars(s, 8);
        assert!(t.chars().count() <= 9);
        assert!(t.ends_with('…'));
    }
}
