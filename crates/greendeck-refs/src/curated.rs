//! The hand-verified reference set. Search-based lookups proved unreliable
//! for finance papers, so this is the maintained bibliography; the fetcher
//! remains available for drafting.

use greendeck_core::Citation;

use crate::latex::FrameBuilder;

pub struct ReferenceGroup {
    pub heading: &'static str,
    pub citations: Vec<Citation>,
}

pub fn reference_groups() -> Vec<ReferenceGroup> {
    vec![
        ReferenceGroup {
            heading: "Foundational Economic Theory",
            citations: vec![
                Citation::new(
                    "Akerlof, G.A.",
                    1970,
                    "The Market for Lemons: Quality Uncertainty and the Market Mechanism",
                )
                .journal("Quarterly Journal of Economics")
                .volume("84")
                .issue("3")
                .pages("488-500")
                .doi("10.2307/1879431"),
                Citation::new("Spence, M.", 1973, "Job Market Signaling")
                    .journal("Quarterly Journal of Economics")
                    .volume("87")
                    .issue("3")
                    .pages("355-374")
                    .doi("10.2307/1882010"),
            ],
        },
        ReferenceGroup {
            heading: "Green Bond Pricing and Greenium",
            citations: vec![
                Citation::new(
                    "Zerbib, O.D.",
                    2019,
                    "The Effect of Pro-Environmental Preferences on Bond Prices: Evidence from Green Bonds",
                )
                .journal("Journal of Banking \\& Finance")
                .volume("98")
                .pages("39-60")
                .doi("10.1016/j.jbankfin.2018.10.012")
                .note("Finds YTM 2 bps lower for green bonds"),
                Citation::new(
                    "Baker, M., Bergstresser, D., Serafeim, G., \\& Wurgler, J.",
                    2018,
                    "Financing the Response to Climate Change: The Pricing and Ownership of U.S. Green Bonds",
                )
                .journal("NBER Working Paper")
                .volume("25194")
                .doi("10.3386/w25194")
                .note("6 bps greenium in US municipal bonds"),
                Citation::new(
                    "Karpf, A., \\& Mandel, A.",
                    2018,
                    "The Changing Value of the 'Green' Label on the US Municipal Bond Market",
                )
                .journal("Nature Climate Change")
                .volume("8")
                .pages("161-165")
                .doi("10.1038/s41558-017-0062-0")
                .note("Time-varying greenium 5-9 bps"),
                Citation::new(
                    "Ando, S., \\& Greenwood-Nimmo, M.",
                    2024,
                    "How Large is the Sovereign Greenium?",
                )
                .journal("Oxford Bulletin of Economics and Statistics")
                .volume("86")
                .issue("3")
                .pages("594-621")
                .doi("10.1111/obes.12619")
                .note("11 bps for emerging markets"),
            ],
        },
        ReferenceGroup {
            heading: "Corporate Green Bonds",
            citations: vec![
                Citation::new("Flammer, C.", 2021, "Corporate Green Bonds")
                    .journal("Journal of Financial Economics")
                    .volume("142")
                    .issue("2")
                    .pages("499-516")
                    .doi("10.1016/j.jfineco.2021.01.010")
                    .note("Stock price response and additionality analysis"),
                Citation::new(
                    "Tang, D.Y., \\& Zhang, Y.",
                    2020,
                    "Do Shareholders Benefit from Green Bonds?",
                )
                .journal("Journal of Corporate Finance")
                .volume("61")
                .pages("101427")
                .doi("10.1016/j.jcorpfin.2018.12.001")
                .note("Shareholder wealth effects of green bond issuance"),
                Citation::new(
                    "Fatica, S., Panzica, R., \\& Rancan, M.",
                    2021,
                    "The Pricing of Green Bonds: Are Financial Institutions Special?",
                )
                .journal("Journal of Financial Stability")
                .volume("54")
                .pages("100873")
                .doi("10.1016/j.jfs.2021.100873")
                .note("Financial sector greenium differences"),
            ],
        },
        ReferenceGroup {
            heading: "Market Data and Reports",
            citations: vec![
                Citation::new(
                    "BIS",
                    2025,
                    "Growth of the Green Bond Market and Greenhouse Gas Emissions",
                )
                .journal("BIS Quarterly Review")
                .pages("March 2025")
                .url("https://www.bis.org/publ/qtrpdf/r\\_qt2503d.htm")
                .note("$3T outstanding green bonds"),
                Citation::new("World Bank", 2025, "Labeled Sustainable Bonds Market Update")
                    .journal("World Bank Group")
                    .pages("February 2025")
                    .url("https://thedocs.worldbank.org/en/doc/cd82b4033281dab2cb1a1c71eeb691e4-0340012025")
                    .note("$6.2T cumulative GSSS issuance"),
                Citation::new(
                    "OECD",
                    2024,
                    "Sustainable Bonds: Asia Capital Markets Report 2025",
                )
                .journal("OECD Publishing")
                .doi("10.1787/02172cdc-en")
                .note("81% corporate, 69% sovereign verification rates"),
                Citation::new("Amundi", 2024, "Emerging Market Green Bonds Report 2024")
                    .journal("Amundi Research Center")
                    .url("https://research-center.amundi.com/article/emerging-market-green-bonds-report-2024")
                    .note("1.2 bps greenium in 2024"),
            ],
        },
        ReferenceGroup {
            heading: "Standards and Guidelines",
            citations: vec![
                Citation::new(
                    "ICMA",
                    2021,
                    "Green Bond Principles: Voluntary Process Guidelines for Issuing Green Bonds",
                )
                .journal("International Capital Market Association")
                .url("https://www.icmagroup.org/sustainable-finance/the-principles-guidelines-and-handbooks/green-bond-principles-gbp/"),
                Citation::new(
                    "Climate Bonds Initiative",
                    2019,
                    "Climate Bonds Standard Version 3.0",
                )
                .journal("Climate Bonds Initiative")
                .url("https://www.climatebonds.net/standard/about"),
            ],
        },
    ]
}

/// The full curated slide: five groups over three beamer pages.
pub fn references_slide(generated: &str) -> String {
    let groups = reference_groups();
    FrameBuilder::new("REFERENCES SLIDE", generated)
        .group(groups[0].heading, &groups[0].citations)
        .group(groups[1].heading, &groups[1].citations)
        .framebreak()
        .group(groups[2].heading, &groups[2].citations)
        .group(groups[3].heading, &groups[3].citations)
        .framebreak()
        .group(groups[4].heading, &groups[4].citations)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curated_set_has_fifteen_references_in_five_groups() {
        let groups = reference_groups();
        assert_eq!(groups.len(), 5);
        let total: usize = groups.iter().map(|g| g.citations.len()).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn slide_pages_break_after_pricing_and_market_data() {
        let tex = references_slide("2025-01-01 00:00");
        assert_eq!(tex.matches("\\framebreak").count(), 2);
        assert_eq!(tex.matches("\\begin{itemize}").count(), 5);
        assert!(tex.contains("\\textbf{Standards and Guidelines:}"));
    }

    #[test]
    fn zerbib_line_renders_in_apa_form() {
        let tex = references_slide("2025-01-01 00:00");
        assert!(tex.contains(
            "\\item Zerbib, O.D. (2019). The Effect of Pro-Environmental Preferences on \
             Bond Prices: Evidence from Green Bonds. \
             \\textit{Journal of Banking \\& Finance}, 98, 39-60. \
             doi:10.1016/j.jbankfin.2018.10.012"
        ));
    }

    #[test]
    fn notes_never_leak_into_the_slide() {
        let tex = references_slide("2025-01-01 00:00");
        assert!(!tex.contains("Finds YTM 2 bps lower"));
        assert!(!tex.contains("11 bps for emerging markets"));
    }
}
