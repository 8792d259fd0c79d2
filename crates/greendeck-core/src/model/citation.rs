use serde::{Deserialize, Serialize};

/// A normalized bibliographic record, produced either by the OpenAlex
/// fetcher or by manual curation, and rendered into APA-style LaTeX lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Pre-formatted author string ("Zerbib, O.D." / "Tang, D.Y., \\& Zhang, Y.").
    pub authors: String,
    pub year: i32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Free-text annotation shown nowhere in the slide, kept for the JSON index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Citation {
    pub fn new(authors: impl Into<String>, year: i32, title: impl Into<String>) -> Self {
        Self {
            authors: authors.into(),
            year,
            title: title.into(),
            journal: None,
            volume: None,
            issue: None,
            pages: None,
            doi: None,
            url: None,
            note: None,
        }
    }

    pub fn journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    pub fn issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    pub fn pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_skips_absent_fields() {
        let c = Citation::new("Akerlof, G.A.", 1970, "The Market for Lemons")
            .journal("Quarterly Journal of Economics")
            .volume("84")
            .issue("3")
            .pages("488-500")
            .doi("10.2307/1879431");
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"doi\":\"10.2307/1879431\""));
        assert!(!json.contains("\"url\""));
        assert!(!json.contains("\"note\""));

        let back: Citation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
