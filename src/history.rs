// Row shaping for the external `analysis_history` table.
//
// Persistence lives outside this crate — the API's consumer writes these
// rows to its own store. Litmus only guarantees the shape matches that
// schema.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzer::Analysis;

/// One `analysis_history` row, ready to serialize for the caller's store.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub user_id: String,
    pub original_text: String,
    pub trust_score: u8,
    pub sentiment: String,
    pub bias_type: Option<String>,
    pub emotional_language: Vec<String>,
    pub misinformation_flag: bool,
    pub explanation: String,
    pub ai_summary: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Build a history row from a finished deep analysis.
    pub fn from_analysis(user_id: impl Into<String>, text: &str, analysis: &Analysis) -> Self {
        let emotional_language = if analysis.signals.emotion.detected {
            vec![analysis.signals.emotion.label.clone()]
        } else {
            Vec::new()
        };

        Self {
            user_id: user_id.into(),
            original_text: text.to_string(),
            trust_score: analysis.trust.score,
            sentiment: analysis.signals.sentiment.label.clone(),
            bias_type: analysis.trust.primary_bias_type.clone(),
            emotional_language,
            misinformation_flag: analysis.report.fake_news.detected(),
            explanation: analysis.trust.explanation.join(" "),
            ai_summary: analysis.trust.summary.to_string(),
            created_at: analysis.metadata.analysis_timestamp,
        }
    }
}
