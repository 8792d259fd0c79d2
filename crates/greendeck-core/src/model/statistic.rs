use serde::Serialize;

/// Reviewer confidence attached to a verified statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One verified data point for the deck: a value (or range), its unit and
/// provenance, and optionally the previously published ("v2") value it
/// corrects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_range: Option<[f64; 2]>,
    pub unit: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Prior published value, present only for entries that correct v2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
}

impl Statistic {
    pub fn value(value: f64, unit: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            value_range: None,
            unit: unit.into(),
            description: description.into(),
            source: None,
            url: None,
            calculation: None,
            confidence: None,
            note: None,
            v2_value: None,
            correction: None,
        }
    }

    pub fn range(
        lo: f64,
        hi: f64,
        unit: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut s = Self::value(0.0, unit, description);
        s.value = None;
        s.value_range = Some([lo, hi]);
        s
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn calculation(mut self, calculation: impl Into<String>) -> Self {
        self.calculation = Some(calculation.into());
        self
    }

    pub fn confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn v2(mut self, prior: f64) -> Self {
        self.v2_value = Some(prior);
        self
    }

    pub fn correction(mut self, correction: impl Into<String>) -> Self {
        self.correction = Some(correction.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_statistic_serializes_compactly() {
        let s = Statistic::value(2.9, "trillion USD", "Green bonds outstanding (2024)")
            .source("BIS Quarterly Review March 2025")
            .confidence(Confidence::High)
            .v2(2.1);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"value\":2.9"));
        assert!(json.contains("\"v2_value\":2.1"));
        assert!(json.contains("\"confidence\":\"high\""));
        assert!(!json.contains("value_range"));
    }

    #[test]
    fn range_statistic_has_no_point_value() {
        let s = Statistic::range(1.0, 3.0, "basis points", "Advanced economy sovereigns");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"value_range\":[1.0,3.0]"));
        assert!(!json.contains("\"value\":"));
    }
}
