//! External page-performance scores.

use serde::Serialize;

/// Outcome of one performance lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PerformanceResult {
    Measured {
        performance_score: u8,
        recommendations: Vec<String>,
    },
    Failed {
        error: String,
    },
}

impl PerformanceResult {
    /// Score clamped to `0..=100`, or `None` for a failed lookup.
    pub fn score(&self) -> Option<u8> {
        match self {
            PerformanceResult::Measured {
                performance_score, ..
            } => Some((*performance_score).min(100)),
            PerformanceResult::Failed { .. } => None,
        }
    }

    /// Lines this result adds to the report's recommendations: the provider's
    /// recommendations, or the error message for a failed lookup.
    pub fn report_lines(&self) -> Vec<String> {
        match self {
            PerformanceResult::Measured {
                recommendations, ..
            } => recommendations.clone(),
            PerformanceResult::Failed { error } => vec![error.clone()],
        }
    }
}

/// Source of page-performance scores (e.g. a PageSpeed-style API client).
pub trait PerformanceProvider: Send + Sync {
    fn performance(&self, url: &str) -> PerformanceResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_serializes_flat() {
        let result = PerformanceResult::Measured {
            performance_score: 87,
            recommendations: vec!["Compress images".into()],
        };
        assert_eq!(
            serde_json::to_value(&result).expect("serializable"),
            serde_json::json!({"performance_score": 87, "recommendations": ["Compress images"]})
        );
        assert_eq!(result.score(), Some(87));
    }

    #[test]
    fn test_failed_contributes_error_line() {
        let result = PerformanceResult::Failed {
            error: "Performance API quota exceeded".into(),
        };
        assert_eq!(result.score(), None);
        assert_eq!(result.report_lines(), vec!["Performance API quota exceeded"]);
        assert_eq!(
            serde_json::to_value(&result).expect("serializable"),
            serde_json::json!({"error": "Performance API quota exceeded"})
        );
    }

    #[test]
    fn test_out_of_range_score_clamped() {
        let result = PerformanceResult::Measured {
            performance_score: 250,
            recommendations: Vec::new(),
        };
        assert_eq!(result.score(), Some(100));
    }
}
