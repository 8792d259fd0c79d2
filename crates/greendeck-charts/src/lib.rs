//! The chart catalog: every figure of the week-1 deck, keyed by slug.
//!
//! Each entry is a pure builder returning a `Figure`; rendering and saving
//! happen in the CLI. Data literals are the published deck numbers, so the
//! catalog doubles as the single source of truth for the figures.

use greendeck_core::Figure;

pub mod pricing;
pub mod quantify;
pub mod survey;
pub mod topics;

/// One catalog entry: stable slug, display title, output file name, and the
/// figure builder.
pub struct ChartDef {
    pub slug: &'static str,
    pub title: &'static str,
    pub file_name: &'static str,
    pub build: fn() -> Figure,
}

pub const CATALOG: &[ChartDef] = &[
    // Survey charts
    ChartDef {
        slug: "market-growth",
        title: "Global green finance market growth 2015-2024",
        file_name: "market-growth.svg",
        build: survey::market_growth,
    },
    ChartDef {
        slug: "investment-gap",
        title: "Green investment gap by sector",
        file_name: "investment-gap.svg",
        build: survey::investment_gap,
    },
    ChartDef {
        slug: "issuer-mix",
        title: "Market share by issuer type (pie)",
        file_name: "issuer-mix.svg",
        build: survey::issuer_mix,
    },
    ChartDef {
        slug: "instrument-mix",
        title: "Market volume by instrument type",
        file_name: "instrument-mix.svg",
        build: survey::instrument_mix,
    },
    ChartDef {
        slug: "regional-issuance",
        title: "Issuance by region, 2024",
        file_name: "regional-issuance.svg",
        build: survey::regional_issuance,
    },
    ChartDef {
        slug: "risk-return",
        title: "Risk-return scatter, green vs conventional",
        file_name: "risk-return.svg",
        build: survey::risk_return,
    },
    ChartDef {
        slug: "yield-comparison",
        title: "Investment-grade yields, green vs conventional",
        file_name: "yield-comparison.svg",
        build: survey::yield_comparison,
    },
    ChartDef {
        slug: "sector-allocation",
        title: "Allocation by economic sector",
        file_name: "sector-allocation.svg",
        build: survey::sector_allocation,
    },
    ChartDef {
        slug: "market-growth-simple",
        title: "Market growth, plain green variant",
        file_name: "market-growth-simple.svg",
        build: survey::market_growth_simple,
    },
    ChartDef {
        slug: "instrument-breakdown",
        title: "Instrument share, pie plus bars",
        file_name: "instrument-breakdown.svg",
        build: survey::instrument_breakdown,
    },
    // Quantification charts
    ChartDef {
        slug: "market-growth-cagr",
        title: "Market growth with CAGR callout",
        file_name: "market-growth-cagr.svg",
        build: quantify::market_growth_cagr,
    },
    ChartDef {
        slug: "regional-share",
        title: "Regional issuance with computed shares",
        file_name: "regional-share.svg",
        build: quantify::regional_share,
    },
    ChartDef {
        slug: "instrument-sizes",
        title: "Instrument market sizes, 2024",
        file_name: "instrument-sizes.svg",
        build: quantify::instrument_sizes,
    },
    ChartDef {
        slug: "sector-share",
        title: "Sector allocation percentages, 2024",
        file_name: "sector-share.svg",
        build: quantify::sector_share,
    },
    // Pricing charts
    ChartDef {
        slug: "greenium-yields",
        title: "Yields with mean-greenium callout",
        file_name: "greenium-yields.svg",
        build: pricing::greenium_yields,
    },
    ChartDef {
        slug: "duration-premium",
        title: "Price premium vs duration for greenium levels",
        file_name: "duration-premium.svg",
        build: pricing::duration_premium,
    },
    ChartDef {
        slug: "risk-return-trend",
        title: "Risk-return scatter with fitted trend lines",
        file_name: "risk-return-trend.svg",
        build: pricing::risk_return_trend,
    },
    ChartDef {
        slug: "greenium-time",
        title: "Quarterly greenium 2019-2024",
        file_name: "greenium-time.svg",
        build: pricing::greenium_time,
    },
    // Topic charts
    ChartDef {
        slug: "investment-gap-detail",
        title: "Investment gap with per-sector gap labels",
        file_name: "investment-gap-detail.svg",
        build: topics::investment_gap_detail,
    },
    ChartDef {
        slug: "verification-stats",
        title: "External verification adoption and types",
        file_name: "verification-stats.svg",
        build: topics::verification_stats,
    },
    ChartDef {
        slug: "issuer-concentration",
        title: "Top green bond issuers 2015-2024",
        file_name: "issuer-concentration.svg",
        build: topics::issuer_concentration,
    },
    ChartDef {
        slug: "credit-ratings",
        title: "Credit rating distribution, green vs conventional",
        file_name: "credit-ratings.svg",
        build: topics::credit_ratings,
    },
    ChartDef {
        slug: "esg-fund-flows",
        title: "ESG fund inflows and assets under management",
        file_name: "esg-fund-flows.svg",
        build: topics::esg_fund_flows,
    },
    ChartDef {
        slug: "standardization",
        title: "Standards adoption and framework distribution",
        file_name: "standardization.svg",
        build: topics::standardization,
    },
];

/// Look up a chart by slug.
pub fn find(slug: &str) -> Option<&'static ChartDef> {
    CATALOG.iter().find(|c| c.slug == slug)
}

/// Owned strings from a label list.
pub(crate) fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_every_deck_chart() {
        assert_eq!(CATALOG.len(), 24);
    }

    #[test]
    fn slugs_and_file_names_are_unique() {
        let slugs: HashSet<_> = CATALOG.iter().map(|c| c.slug).collect();
        assert_eq!(slugs.len(), CATALOG.len());
        let files: HashSet<_> = CATALOG.iter().map(|c| c.file_name).collect();
        assert_eq!(files.len(), CATALOG.len());
        for c in CATALOG {
            assert!(c.file_name.ends_with(".svg"), "{}", c.slug);
            assert_eq!(c.file_name.trim_end_matches(".svg"), c.slug);
        }
    }

    #[test]
    fn every_chart_builds_a_valid_figure() {
        for c in CATALOG {
            let fig = (c.build)();
            fig.validate().unwrap_or_else(|e| panic!("{}: {e}", c.slug));
        }
    }

    #[test]
    fn every_chart_renders_deterministically() {
        for c in CATALOG {
            let a = (c.build)().render().unwrap();
            let b = (c.build)().render().unwrap();
            assert_eq!(a, b, "{} is not deterministic", c.slug);
            assert!(a.starts_with("<svg"), "{}", c.slug);
        }
    }

    #[test]
    fn find_resolves_known_slugs_only() {
        assert!(find("market-growth").is_some());
        assert!(find("greenium-time").is_some());
        assert!(find("no-such-chart").is_none());
    }
}
