//! APA-style LaTeX rendering shared by the fetched and curated reference
//! slides.

use greendeck_core::Citation;

/// One citation as an APA line: authors (year). Title. \textit{Journal},
/// volume(issue), pages. doi:... Available at: \url{...}
pub fn apa_line(citation: &Citation) -> String {
    let mut parts = vec![
        format!("{} ({}).", citation.authors, citation.year),
        format!("{}.", citation.title),
    ];

    if let Some(journal) = &citation.journal {
        let mut journal_part = format!("\\textit{{{journal}}}");
        if let Some(volume) = &citation.volume {
            journal_part.push_str(&format!(", {volume}"));
            if let Some(issue) = &citation.issue {
                journal_part.push_str(&format!("({issue})"));
            }
        }
        if let Some(pages) = &citation.pages {
            journal_part.push_str(&format!(", {pages}"));
        }
        journal_part.push('.');
        parts.push(journal_part);
    }

    if let Some(doi) = &citation.doi {
        parts.push(format!("doi:{doi}"));
    }
    if let Some(url) = &citation.url {
        parts.push(format!("Available at: \\url{{{url}}}"));
    }

    parts.join(" ")
}

/// Builds the beamer references frame: banner comment, grouped itemize
/// blocks, optional framebreaks between pages.
pub struct FrameBuilder {
    lines: Vec<String>,
}

impl FrameBuilder {
    pub fn new(banner: &str, generated: &str) -> Self {
        let rule = "% ".to_string() + &"=".repeat(60);
        Self {
            lines: vec![
                rule.clone(),
                format!("% {banner}"),
                format!("% Generated: {generated}"),
                rule,
                String::new(),
                "\\begin{frame}[t,allowframebreaks]{References}".to_string(),
                "\\tiny".to_string(),
                String::new(),
            ],
        }
    }

    pub fn group(mut self, heading: &str, citations: &[Citation]) -> Self {
        self.lines.push(format!("\\textbf{{{heading}:}}"));
        self.lines.push("\\begin{itemize}".to_string());
        for citation in citations {
            self.lines.push(format!("\\item {}", apa_line(citation)));
        }
        self.lines.push("\\end{itemize}".to_string());
        self.lines.push(String::new());
        self
    }

    pub fn framebreak(mut self) -> Self {
        self.lines.push("\\framebreak".to_string());
        self.lines.push(String::new());
        self
    }

    pub fn finish(mut self) -> String {
        self.lines.push("\\end{frame}".to_string());
        self.lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_citation_renders_every_field() {
        let c = Citation::new("Spence, M.", 1973, "Job Market Signaling")
            .journal("Quarterly Journal of Economics")
            .volume("87")
            .issue("3")
            .pages("355-374")
            .doi("10.2307/1882010");
        assert_eq!(
            apa_line(&c),
            "Spence, M. (1973). Job Market Signaling. \
             \\textit{Quarterly Journal of Economics}, 87(3), 355-374. doi:10.2307/1882010"
        );
    }

    #[test]
    fn url_only_citation_skips_journal_extras() {
        let c = Citation::new("ICMA", 2021, "Green Bond Principles")
            .journal("International Capital Market Association")
            .url("https://www.icmagroup.org/gbp/");
        let line = apa_line(&c);
        assert!(line.ends_with("Available at: \\url{https://www.icmagroup.org/gbp/}"));
        assert!(!line.contains("doi:"));
    }

    #[test]
    fn volume_without_issue_has_no_parentheses() {
        let c = Citation::new("Zerbib, O.D.", 2019, "T")
            .journal("Journal of Banking \\& Finance")
            .volume("98")
            .pages("39-60");
        assert!(apa_line(&c).contains("}, 98, 39-60."));
    }

    #[test]
    fn frame_structure_is_valid_beamer() {
        let c = Citation::new("Akerlof, G.A.", 1970, "The Market for Lemons");
        let tex = FrameBuilder::new("REFERENCES SLIDE", "2025-01-01 00:00")
            .group("Foundational Economic Theory", std::slice::from_ref(&c))
            .framebreak()
            .group("Standards and Guidelines", &[])
            .finish();
        assert!(tex.contains("\\begin{frame}[t,allowframebreaks]{References}"));
        assert!(tex.contains("\\textbf{Foundational Economic Theory:}"));
        assert!(tex.contains("\\framebreak"));
        assert!(tex.trim_end().ends_with("\\end{frame}"));
        assert_eq!(tex.matches("\\begin{itemize}").count(), 2);
        assert_eq!(tex.matches("\\end{itemize}").count(), 2);
    }
}
