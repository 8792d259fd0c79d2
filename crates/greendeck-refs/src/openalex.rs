//! Thin blocking client for the OpenAlex works API, plus the mapping from
//! an OpenAlex record to the crate's `Citation` model.

use std::time::Duration;

use greendeck_core::Citation;
use serde::Deserialize;
use thiserror::Error;

const BASE_URL: &str = "https://api.openalex.org/works";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("openalex request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One search per call, top hit only. The `mailto` parameter opts into the
/// OpenAlex polite pool.
pub struct OpenAlexClient {
    http: reqwest::blocking::Client,
    base_url: String,
    mailto: String,
}

impl OpenAlexClient {
    pub fn new(mailto: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            mailto: mailto.into(),
        })
    }

    pub fn search(&self, query: &str) -> Result<Option<Work>, FetchError> {
        let response: SearchResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("search", query),
                ("per_page", "1"),
                ("mailto", &self.mailto),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.results.into_iter().next())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Work>,
}

/// The subset of an OpenAlex work record the citation formatter reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Work {
    pub title: Option<String>,
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub authorships: Vec<Authorship>,
    pub primary_location: Option<Location>,
    #[serde(default)]
    pub biblio: Biblio,
    pub doi: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Authorship {
    pub author: Author,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub source: Option<Source>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Biblio {
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub first_page: Option<String>,
    pub last_page: Option<String>,
}

/// Author list formatting: 1 name as-is, 2 joined with "&", 3 with a serial
/// "&", more than 3 collapsed to "first, et al.".
pub fn format_authors(authorships: &[Authorship]) -> String {
    let names: Vec<&str> = authorships
        .iter()
        .take(4)
        .filter_map(|a| a.author.display_name.as_deref())
        .collect();
    match names.len() {
        0 => "Unknown".to_string(),
        1 => names[0].to_string(),
        2 => format!("{} \\& {}", names[0], names[1]),
        3 => format!("{}, {}, \\& {}", names[0], names[1], names[2]),
        _ => format!("{}, et al.", names[0]),
    }
}

/// Map a work record onto a `Citation`. Title and year are required; the
/// rest degrades gracefully.
pub fn extract_citation(work: &Work) -> Option<Citation> {
    let title = work.title.clone()?;
    let year = work.publication_year?;

    let journal = work
        .primary_location
        .as_ref()
        .and_then(|l| l.source.as_ref())
        .and_then(|s| s.display_name.clone())
        .unwrap_or_else(|| "Unknown Journal".to_string());

    let mut citation = Citation::new(format_authors(&work.authorships), year, title)
        .journal(journal);

    if let Some(volume) = non_empty(&work.biblio.volume) {
        citation = citation.volume(volume);
    }
    if let Some(issue) = non_empty(&work.biblio.issue) {
        citation = citation.issue(issue);
    }
    match (
        non_empty(&work.biblio.first_page),
        non_empty(&work.biblio.last_page),
    ) {
        (Some(first), Some(last)) => citation = citation.pages(format!("{first}-{last}")),
        (Some(first), None) => citation = citation.pages(first),
        _ => {}
    }
    if let Some(doi) = &work.doi {
        let doi = doi.trim_start_matches("https://doi.org/");
        if !doi.is_empty() {
            citation = citation.doi(doi);
        }
    }

    Some(citation)
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANNED_WORK: &str = r#"{
        "results": [{
            "title": "The Market for Lemons: Quality Uncertainty and the Market Mechanism",
            "publication_year": 1970,
            "authorships": [
                {"author": {"display_name": "George A. Akerlof"}}
            ],
            "primary_location": {
                "source": {"display_name": "Quarterly Journal of Economics"}
            },
            "biblio": {"volume": "84", "issue": "3", "first_page": "488", "last_page": "500"},
            "doi": "https://doi.org/10.2307/1879431"
        }]
    }"#;

    fn author(name: &str) -> Authorship {
        Authorship {
            author: Author {
                display_name: Some(name.to_string()),
            },
        }
    }

    #[test]
    fn canned_response_deserializes_and_extracts() {
        let response: SearchResponse = serde_json::from_str(CANNED_WORK).unwrap();
        let work = response.results.into_iter().next().unwrap();
        let citation = extract_citation(&work).unwrap();
        assert_eq!(citation.authors, "George A. Akerlof");
        assert_eq!(citation.year, 1970);
        assert_eq!(citation.journal.as_deref(), Some("Quarterly Journal of Economics"));
        assert_eq!(citation.volume.as_deref(), Some("84"));
        assert_eq!(citation.pages.as_deref(), Some("488-500"));
        assert_eq!(citation.doi.as_deref(), Some("10.2307/1879431"));
    }

    #[test]
    fn author_formatting_rules() {
        assert_eq!(format_authors(&[]), "Unknown");
        assert_eq!(format_authors(&[author("Zerbib, O.D.")]), "Zerbib, O.D.");
        assert_eq!(
            format_authors(&[author("Karpf, A."), author("Mandel, A.")]),
            "Karpf, A. \\& Mandel, A."
        );
        assert_eq!(
            format_authors(&[author("Fatica, S."), author("Panzica, R."), author("Rancan, M.")]),
            "Fatica, S., Panzica, R., \\& Rancan, M."
        );
        assert_eq!(
            format_authors(&[
                author("Baker, M."),
                author("Bergstresser, D."),
                author("Serafeim, G."),
                author("Wurgler, J."),
            ]),
            "Baker, M., et al."
        );
    }

    #[test]
    fn extraction_requires_title_and_year() {
        let work = Work {
            title: None,
            publication_year: Some(2024),
            authorships: vec![],
            primary_location: None,
            biblio: Biblio::default(),
            doi: None,
        };
        assert!(extract_citation(&work).is_none());
    }

    #[test]
    fn missing_journal_falls_back() {
        let work = Work {
            title: Some("How Large is the Sovereign Greenium?".into()),
            publication_year: Some(2024),
            authorships: vec![author("Sakai Ando"), author("Mark Greenwood-Nimmo")],
            primary_location: None,
            biblio: Biblio {
                first_page: Some("594".into()),
                ..Biblio::default()
            },
            doi: None,
        };
        let citation = extract_citation(&work).unwrap();
        assert_eq!(citation.journal.as_deref(), Some("Unknown Journal"));
        assert_eq!(citation.pages.as_deref(), Some("594"));
        assert!(citation.doi.is_none());
    }

    #[test]
    fn empty_results_deserialize_to_none() {
        let response: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
