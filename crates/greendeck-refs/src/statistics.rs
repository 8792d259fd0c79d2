//! Verified empirical statistics for the deck, with provenance, plus the
//! three artifacts built from them: the JSON snapshot, the LaTeX data
//! macros, and the corrections report diffing current against previously
//! published values.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use greendeck_core::{Confidence, Statistic};
use serde_json::json;
use tracing::debug;

pub struct Category {
    pub name: &'static str,
    pub entries: Vec<(&'static str, Statistic)>,
}

/// Papers still to be resolved through the citation fetcher.
pub const CITATIONS_NEEDED: &[&str] = &[
    "Akerlof 1970 Market for Lemons",
    "Spence 1973 Job Market Signaling",
    "Flammer 2021 Corporate Green Bonds",
    "Baker 2018 Pricing US Green Bonds",
    "Zerbib 2019 Pro-Environmental Preferences Bond Prices",
    "Karpf 2018 Changing Value Green Label",
    "Tang 2020 Do Shareholders Benefit Green Bonds",
    "Fatica 2021 Pricing Green Bonds Financial Institutions",
    "Ando 2024 Sovereign Greenium Oxford Bulletin",
];

pub fn verified_data() -> Vec<Category> {
    vec![
        Category {
            name: "market_size",
            entries: vec![
                (
                    "green_bonds_2024",
                    Statistic::value(2.9, "trillion USD", "Green bonds outstanding (2024)")
                        .source("BIS Quarterly Review March 2025")
                        .url("https://www.bis.org/publ/qtrpdf/r_qt2503d.htm")
                        .confidence(Confidence::High)
                        .v2(2.1),
                ),
                (
                    "green_bonds_2015",
                    Statistic::value(0.3, "trillion USD", "Green bonds outstanding (2015)")
                        .source("Climate Bonds Initiative Historical Data")
                        .confidence(Confidence::High),
                ),
                (
                    "gsss_total_2024",
                    Statistic::value(
                        6.2,
                        "trillion USD",
                        "Total GSSS bonds (Green, Social, Sustainability, Sustainability-Linked)",
                    )
                    .source("World Bank Labeled Bond Update February 2025")
                    .url("https://thedocs.worldbank.org/en/doc/cd82b4033281dab2cb1a1c71eeb691e4-0340012025")
                    .note("Broader than green bonds alone"),
                ),
            ],
        },
        Category {
            name: "growth_metrics",
            entries: vec![
                (
                    "cagr_2015_2024",
                    Statistic::value(28.1, "percent", "CAGR for green bonds 2015-2024")
                        .calculation("(2900/300)^(1/9) - 1")
                        .v2(24.9)
                        .correction("Updated with correct 2024 market size"),
                ),
                (
                    "cagr_projected_2024_2030",
                    Statistic::range(
                        5.0,
                        11.2,
                        "percent",
                        "Projected CAGR 2024-2030 (market maturing)",
                    )
                    .source("Coherent Market Insights, Mordor Intelligence 2024"),
                ),
            ],
        },
        Category {
            name: "regional_distribution",
            entries: vec![
                (
                    "europe_emea",
                    Statistic::value(52.0, "percent", "Europe/EMEA market share (2024)")
                        .source("ICE Sustainable Bond Report 2024, LSEG 2024")
                        .v2(44.0),
                ),
                (
                    "asia_pacific",
                    Statistic::value(27.0, "percent", "Asia-Pacific market share (2024)")
                        .source("ICE Sustainable Bond Report 2024")
                        .v2(32.0),
                ),
                (
                    "americas",
                    Statistic::value(13.0, "percent", "Americas market share (2024)")
                        .source("ICE Sustainable Bond Report 2024")
                        .v2(20.0),
                ),
                (
                    "other",
                    Statistic::value(8.0, "percent", "Other regions (Middle East, Africa)")
                        .source("Calculated residual"),
                ),
            ],
        },
        Category {
            name: "sector_allocation",
            entries: vec![
                (
                    "energy_renewables",
                    Statistic::value(29.0, "percent", "Energy and renewable energy sector (2024)")
                        .source("Mordor Intelligence 2024")
                        .v2(38.0),
                ),
                (
                    "buildings",
                    Statistic::value(
                        25.0,
                        "percent",
                        "Buildings and energy efficiency (estimated)",
                    )
                    .confidence(Confidence::Medium)
                    .note("Specific 2024 breakdown not available, using 2023 estimate"),
                ),
                (
                    "transport",
                    Statistic::value(18.0, "percent", "Transport and mobility")
                        .confidence(Confidence::Medium),
                ),
            ],
        },
        Category {
            name: "verification_rates",
            entries: vec![
                (
                    "corporate_bonds",
                    Statistic::value(
                        81.0,
                        "percent",
                        "Corporate green bonds with second-party opinion",
                    )
                    .source("OECD Asia Capital Markets Report 2025")
                    .url("https://www.oecd.org/en/publications/asia-capital-markets-report-2025_02172cdc-en")
                    .v2(90.0)
                    .correction("More conservative, disaggregated by issuer type"),
                ),
                (
                    "official_sector",
                    Statistic::value(
                        69.0,
                        "percent",
                        "Sovereign/multilateral bonds with external review",
                    )
                    .source("OECD Asia Capital Markets Report 2025"),
                ),
                (
                    "overall_average",
                    Statistic::value(80.0, "percent", "Weighted average across all bond types")
                        .confidence(Confidence::High),
                ),
            ],
        },
        Category {
            name: "greenium",
            entries: vec![
                (
                    "advanced_sovereigns",
                    Statistic::range(
                        1.0,
                        3.0,
                        "basis points",
                        "Advanced economy sovereign green bonds (2024)",
                    )
                    .source("Robeco 2024, CEPR 2024, Amundi 2024")
                    .note("Examples: Euro government bonds, UK gilts"),
                ),
                (
                    "emerging_sovereigns",
                    Statistic::range(
                        11.0,
                        13.0,
                        "basis points",
                        "Emerging market sovereign green bonds (2024)",
                    )
                    .source("Ando (2024) Oxford Bulletin, Amundi EM Report 2024")
                    .note("Significantly higher due to supply constraints"),
                ),
                (
                    "corporate_repeat_issuers",
                    Statistic::value(
                        -57.0,
                        "basis points",
                        "Mature corporate issuers (negative greenium)",
                    )
                    .source("Flammer (2021) - some repeated issuers show negative premium")
                    .note("Counter-intuitive but real in highly competitive ESG markets"),
                ),
                (
                    "time_trend_2019",
                    Statistic::range(5.0, 7.0, "basis points", "Greenium in 2019 (early market)"),
                ),
                (
                    "time_trend_2024",
                    Statistic::range(1.0, 3.0, "basis points", "Greenium in 2024 (mature market)")
                        .note("Declining: supply elasticity increased, demand partially satisfied"),
                ),
            ],
        },
        Category {
            name: "investment_gap",
            entries: vec![
                (
                    "annual_gap_developing",
                    Statistic::value(
                        2.04,
                        "trillion USD",
                        "Annual investment gap for developing countries (excl. China) by 2030",
                    )
                    .source("McKinsey 2023, World Bank CCDR Methodology")
                    .url("https://www.mckinsey.com/capabilities/sustainability/our-insights/solving-the-climate-finance-equation-for-developing-countries")
                    .note("This is developing countries only, NOT global gap"),
                ),
                (
                    "annual_gap_global",
                    Statistic::range(
                        4.0,
                        5.0,
                        "trillion USD",
                        "Global annual investment gap for climate transition by 2030",
                    )
                    .source("IEA, IRENA 2024")
                    .note("Total global need significantly higher"),
                ),
                (
                    "current_investment_2023",
                    Statistic::value(
                        0.63,
                        "trillion USD",
                        "Current annual clean energy investment (2023)",
                    )
                    .source("IEA World Energy Investment 2024"),
                ),
            ],
        },
        Category {
            name: "esg_fund_flows",
            entries: vec![
                (
                    "aum_2024",
                    Statistic::value(
                        3.2,
                        "trillion USD",
                        "ESG fund assets under management (2024)",
                    )
                    .source("Morningstar Global ESG Fund Flows Q4 2024")
                    .v2(3.5)
                    .correction("Minor adjustment to verified figure"),
                ),
                (
                    "aum_2019",
                    Statistic::value(1.0, "trillion USD", "ESG fund AUM (2019, approximate)")
                        .confidence(Confidence::Medium),
                ),
            ],
        },
        Category {
            name: "france_green_bonds",
            entries: vec![
                (
                    "outstanding_2024",
                    Statistic::value(
                        72.5,
                        "billion EUR",
                        "France Green OAT outstanding (April 2024)",
                    )
                    .source("Agence France Trésor")
                    .url("https://www.aft.gouv.fr/en/green-oat"),
                ),
                (
                    "total_issuance_estimate",
                    Statistic::value(
                        85.0,
                        "billion USD equivalent",
                        "Cumulative issuance 2017-2024 (estimated)",
                    )
                    .confidence(Confidence::Medium)
                    .note("Based on €72.5B outstanding + maturities"),
                ),
            ],
        },
    ]
}

/// The snapshot: metadata, every category, and the outstanding citation
/// list.
pub fn statistics_json(created: &str) -> serde_json::Result<String> {
    let mut data = serde_json::Map::new();
    for category in verified_data() {
        let mut entries = serde_json::Map::new();
        for (key, stat) in &category.entries {
            entries.insert((*key).to_string(), serde_json::to_value(stat)?);
        }
        data.insert(category.name.to_string(), entries.into());
    }
    let doc = json!({
        "metadata": {
            "created": created,
            "purpose": "Verified empirical data for Green Finance Week 1",
            "version": "v3.1 (Academic Review Corrections)",
        },
        "data": data,
        "citations_needed": CITATIONS_NEEDED,
    });
    serde_json::to_string_pretty(&doc)
}

/// The fixed macro block the slide text includes via `\input`.
pub fn data_macros(generated: &str) -> String {
    let mut out = String::new();
    out.push_str("% Auto-generated data macros - DO NOT EDIT MANUALLY\n");
    let _ = writeln!(out, "% Generated: {generated}");
    out.push('\n');
    out.push_str("\\newcommand{\\marketSizeTwentyFour}{\\$2.9T}\n");
    out.push_str("\\newcommand{\\marketSizeTwentyFifteen}{\\$300B}\n");
    out.push_str("\\newcommand{\\marketCAGR}{28.1\\%}\n");
    out.push_str("\\newcommand{\\regionEurope}{52\\%}\n");
    out.push_str("\\newcommand{\\regionAPAC}{27\\%}\n");
    out.push_str("\\newcommand{\\regionAmericas}{13\\%}\n");
    out.push_str("\\newcommand{\\sectorEnergy}{29\\%}\n");
    out.push_str("\\newcommand{\\sectorBuildings}{25\\%}\n");
    out.push_str("\\newcommand{\\sectorTransport}{18\\%}\n");
    out.push_str("\\newcommand{\\verificationRate}{80\\%}\n");
    out.push_str("\\newcommand{\\greeniumAdvanced}{1-3 bps}\n");
    out.push_str("\\newcommand{\\greeniumEmerging}{11-13 bps}\n");
    out
}

/// One corrections line for an entry carrying a prior published value.
/// Percent-unit entries diff in percentage points; monetary entries diff as
/// relative change.
fn correction_line(stat: &Statistic) -> Option<String> {
    let value = stat.value?;
    let prior = stat.v2_value?;
    let line = if stat.unit.contains("percent") {
        format!(
            "{}: {prior}% \u{2192} {value}% ({:+.1}pp)",
            stat.description,
            value - prior
        )
    } else {
        format!(
            "{}: ${prior}T \u{2192} ${value}T ({:+.1}%)",
            stat.description,
            (value / prior - 1.0) * 100.0
        )
    };
    Some(line)
}

const SLIDES_TO_UPDATE: &[&str] = &[
    "Slide 16: Market growth chart - update to $2.9T (2024)",
    "Slide 17: CAGR calculation - update to 28.1%",
    "Slide 18: Regional distribution chart - update percentages",
    "Slide 19: Regional analysis text - update all percentages",
    "Slide 19A: Verification statistics - update to 80-81%",
    "Slide 21: Sector allocation chart - update energy to 29%",
    "Slide 28: Statistical summary - update all key statistics",
];

const CHARTS_TO_REGENERATE: &[&str] = &[
    "- market-growth-cagr (update 2024 value)",
    "- regional-share (update percentages)",
    "- sector-share (update energy percentage)",
    "- verification-stats (update to 81% corporate, 69% sovereign)",
];

/// The human-readable corrections report. Deltas are computed from the
/// entries, never hand-written.
pub fn corrections_report(generated: &str) -> String {
    let rule = "=".repeat(80);
    let mut lines: Vec<String> = vec![
        rule.clone(),
        "EMPIRICAL DATA CORRECTIONS REPORT".to_string(),
        "Week 1 v3.0 -> v3.1 Academic Enhancement".to_string(),
        format!("Generated: {generated}"),
        rule.clone(),
        String::new(),
        "CORRECTIONS SUMMARY:".to_string(),
        String::new(),
    ];

    let mut sources: BTreeSet<String> = BTreeSet::new();
    let mut index = 1;
    for category in verified_data() {
        for (key, stat) in &category.entries {
            if let Some(source) = &stat.source {
                sources.insert(source.clone());
            }
            match correction_line(stat) {
                Some(line) => {
                    lines.push(format!("{index}. {line}"));
                    index += 1;
                }
                None => debug!(category = category.name, key, "no prior value; skipped"),
            }
        }
    }

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push("SLIDES REQUIRING UPDATES:".to_string());
    lines.push(rule.clone());
    lines.push(String::new());
    lines.extend(SLIDES_TO_UPDATE.iter().map(|s| s.to_string()));
    lines.push(String::new());
    lines.push("CHARTS REQUIRING REGENERATION:".to_string());
    lines.extend(CHARTS_TO_REGENERATE.iter().map(|s| s.to_string()));
    lines.push(String::new());
    lines.push(rule.clone());
    lines.push("SOURCES:".to_string());
    lines.push(rule);
    lines.push(String::new());
    for (i, source) in sources.iter().enumerate() {
        lines.push(format!("{}. {source}", i + 1));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_covers_every_category() {
        let json = statistics_json("2025-01-01T00:00:00").unwrap();
        for name in [
            "market_size",
            "growth_metrics",
            "regional_distribution",
            "sector_allocation",
            "verification_rates",
            "greenium",
            "investment_gap",
            "esg_fund_flows",
            "france_green_bonds",
        ] {
            assert!(json.contains(name), "missing {name}");
        }
        assert!(json.contains("citations_needed"));
        assert!(json.contains("v3.1 (Academic Review Corrections)"));
        assert!(json.contains("\"value_range\""));
    }

    #[test]
    fn corrections_deltas_are_computed() {
        let report = corrections_report("2025-01-01 00:00");
        // 44% -> 52% is +8.0 percentage points.
        assert!(report.contains("52% (+8.0pp)"));
        // $2.1T -> $2.9T is +38.1% relative.
        assert!(report.contains("$2.9T (+38.1%)"));
        assert!(report.contains("27% (-5.0pp)"));
        assert!(report.contains("81% (-9.0pp)"));
    }

    #[test]
    fn sources_are_deduplicated_and_sorted() {
        let report = corrections_report("2025-01-01 00:00");
        let sources_section = report.split("SOURCES:").nth(1).unwrap();
        // The OECD report backs two entries but lists once.
        assert_eq!(
            sources_section
                .matches("OECD Asia Capital Markets Report 2025")
                .count(),
            1
        );
        let listed: Vec<&str> = sources_section
            .lines()
            .filter_map(|l| l.split_once(". ").map(|(_, s)| s))
            .collect();
        assert!(!listed.is_empty());
        assert!(listed.windows(2).all(|w| w[0] <= w[1]), "not sorted: {listed:?}");
    }

    #[test]
    fn entries_without_priors_are_absent_from_summary() {
        let report = corrections_report("2025-01-01 00:00");
        assert!(!report.contains("Calculated residual:"));
        assert!(!report.contains("France Green OAT outstanding (April 2024):"));
    }

    #[test]
    fn macro_block_is_stable() {
        let tex = data_macros("2025-01-01 00:00");
        assert!(tex.contains("\\newcommand{\\marketCAGR}{28.1\\%}"));
        assert!(tex.contains("\\newcommand{\\greeniumEmerging}{11-13 bps}"));
        assert_eq!(tex.matches("\\newcommand").count(), 12);
    }
}
