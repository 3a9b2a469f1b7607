//! Persona result record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{PersonaIntelligenceResult, RankedSection, SubsectionAnalysis};

/// Run metadata of a persona report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601 UTC
    pub timestamp: String,
    pub detected_persona_confidence: f64,
    pub total_sections_analyzed: usize,
}

/// The combined persona record written once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaReport {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<RankedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl PersonaReport {
    /// Build the record for a result produced at `timestamp`.
    pub fn new(result: PersonaIntelligenceResult, timestamp: DateTime<Utc>) -> Self {
        let metadata = ReportMetadata {
            total_sections_analyzed: result.section_count(),
            documents: result.documents,
            persona: result.persona,
            job_to_be_done: result.job_to_be_done,
            timestamp: format_timestamp(timestamp),
            detected_persona_confidence: result.confidence,
        };

        Self {
            metadata,
            extracted_sections: result.extracted_sections,
            subsection_analysis: result.subsection_analysis,
        }
    }

    /// Build the record stamped with the current time.
    pub fn now(result: PersonaIntelligenceResult) -> Self {
        Self::new(result, Utc::now())
    }
}

/// RFC 3339 timestamp with microseconds and a `Z` suffix.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result() -> PersonaIntelligenceResult {
        PersonaIntelligenceResult {
            documents: vec!["a.pdf".into()],
            persona: "Home Cook".into(),
            persona_id: "home_cook".into(),
            job_to_be_done: "Cook".into(),
            confidence: 12.5,
            extracted_sections: vec![RankedSection {
                document: "a.pdf".into(),
                page_number: 1,
                section_title: "Breakfast Ideas".into(),
                importance_rank: 1,
            }],
            subsection_analysis: vec![SubsectionAnalysis {
                document: "a.pdf".into(),
                page_number: 1,
                refined_text: "Eggs".into(),
                relevance_score: 12.0,
                matched_keywords: vec!["breakfast".into()],
            }],
            persona_scores: Vec::new(),
        }
    }

    #[test]
    fn test_report_shape() {
        let ts = Utc.with_ymd_and_hms(2025, 7, 1, 12, 30, 0).unwrap();
        let report = PersonaReport::new(result(), ts);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["metadata"]["timestamp"], "2025-07-01T12:30:00.000000Z");
        assert_eq!(value["metadata"]["persona"], "Home Cook");
        assert_eq!(value["metadata"]["total_sections_analyzed"], 1);
        assert_eq!(value["metadata"]["detected_persona_confidence"], 12.5);
        assert_eq!(value["extracted_sections"][0]["importance_rank"], 1);
        assert_eq!(value["subsection_analysis"][0]["matched_keywords"][0], "breakfast");
        assert!(value["extracted_sections"][0].get("matched_keywords").is_none());
        assert!(value.get("persona_scores").is_none());
    }
}
