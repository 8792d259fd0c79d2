//! Topic charts for the theory slides: investment gap, verification as a
//! signal, issuer concentration, credit quality, investor demand, and
//! standardization.

use greendeck_core::figure::{
    Annotation, BarGroup, Bars, Figure, GridAxis, GroupedBars, HBars, Legend, Line, Marker,
    Panel, Pie,
};
use greendeck_core::numeric;
use greendeck_core::style::Palette;

use crate::strs;

const P: Palette = Palette::DEFAULT;

pub fn investment_gap_detail() -> Figure {
    let sectors = strs(&[
        "Energy\nTransition",
        "Buildings\nEfficiency",
        "Sustainable\nTransport",
        "Nature-based\nSolutions",
        "Water\nInfrastructure",
    ]);
    let required = vec![1200.0, 680.0, 520.0, 340.0, 280.0];
    let current = vec![410.0, 210.0, 180.0, 85.0, 95.0];

    let mut panel = Panel::new()
        .title("Green Finance Investment Gap by Sector\nAnnual Investment Required vs Current (2024)")
        .x_label("Sector")
        .y_label("Annual Investment (USD Billions)")
        .grid(GridAxis::Y)
        .y_limits(0.0, 1400.0)
        .grouped_bars(GroupedBars::new(
            sectors,
            vec![
                BarGroup::new("Required Investment", P.warning, required.clone()),
                BarGroup::new("Current Investment", P.primary, current.clone()),
            ],
        ))
        .legend(Legend::UpperRight);

    for (i, (req, cur)) in required.iter().zip(&current).enumerate() {
        let gap = numeric::gap(*req, *cur);
        let pct = numeric::gap_pct(*req, *cur);
        panel = panel.annotate(Annotation::Text {
            x: i as f64,
            y: req + 110.0,
            text: format!("Gap: ${gap}B\n({pct:.0}%)"),
            color: P.neutral.into(),
            boxed: None,
        });
    }

    let total_required: f64 = required.iter().sum();
    let total_current: f64 = current.iter().sum();
    let total_gap = numeric::gap(total_required, total_current);
    let total_pct = numeric::gap_pct(total_required, total_current);
    panel = panel.annotate(Annotation::FracText {
        fx: 0.02,
        fy: 0.98,
        text: format!("Total Gap: ${total_gap}B/year ({total_pct:.1}%)"),
        color: P.warning.into(),
        border: P.warning.into(),
    });

    Figure::single(panel)
}

pub fn verification_stats() -> Figure {
    let years: Vec<f64> = (2015..=2024).map(f64::from).collect();
    let corporate = vec![68.0, 72.0, 75.0, 77.0, 79.0, 80.0, 80.0, 81.0, 81.0, 81.0];
    let sovereign = vec![55.0, 58.0, 60.0, 62.0, 64.0, 66.0, 67.0, 68.0, 69.0, 69.0];

    let adoption = Panel::new()
        .title("Verification Adoption by Issuer Type\n(OECD 2024)")
        .x_label("Year")
        .y_label("External Review Rate (%)")
        .grid(GridAxis::Both)
        .y_limits(50.0, 90.0)
        .line(
            Line::new(years.clone(), corporate, P.primary)
                .marker(Marker::Circle)
                .marker_size(5.0)
                .fill(0.15)
                .label("Corporate Bonds"),
        )
        .line(
            Line::new(years, sovereign, P.warning)
                .marker(Marker::Square)
                .marker_size(4.5)
                .fill(0.15)
                .label("Sovereign Bonds"),
        )
        .annotate(Annotation::HLine {
            y: 80.0,
            color: P.success.into(),
            dashed: true,
            label: None,
        })
        .annotate(Annotation::Text {
            x: 2016.3,
            y: 82.5,
            text: "80% benchmark".into(),
            color: P.success.into(),
            boxed: None,
        })
        .legend(Legend::LowerRight);

    let types = Panel::new().title("Verification Types (2024)").pie(
        Pie::new(
            strs(&[
                "Second Party\nOpinion",
                "Certification",
                "Green Bond\nRating",
                "Verification\nReport",
                "No External\nReview",
            ]),
            vec![62.0, 15.0, 5.0, 3.0, 15.0],
            strs(&[P.primary, P.secondary, P.success, P.warning, P.neutral]),
        )
        .explode(vec![0.05, 0.0, 0.0, 0.0, 0.05])
        .pct_decimals(0),
    );

    Figure::two_across(
        "External Verification in Green Bond Market\nEvidence of Signaling Theory",
        adoption,
        types,
    )
}

pub fn issuer_concentration() -> Figure {
    let issuers = strs(&[
        "European Investment Bank",
        "Republic of France",
        "Federal Republic of Germany",
        "Kingdom of Netherlands",
        "World Bank (IBRD)",
        "Fannie Mae",
        "Bank of China",
        "Industrial & Commercial Bank",
        "Kingdom of Sweden",
        "European Bank for Reconstruction",
        "Nordic Investment Bank",
        "KfW Development Bank",
        "Apple Inc.",
        "Agence France Tresor",
        "Others (1,185 issuers)",
    ]);
    let volumes = vec![
        85.0, 72.0, 68.0, 52.0, 48.0, 42.0, 38.0, 35.0, 32.0, 28.0, 26.0, 24.0, 22.0, 20.0,
        980.0,
    ];
    let labels: Vec<String> = volumes.iter().map(|v| format!("${v}B")).collect();
    // Top 10 in the headline purple, next 4 muted, the residual gray.
    let colors: Vec<String> = (0..volumes.len())
        .map(|i| {
            if i < 10 {
                P.primary.to_string()
            } else if i < 14 {
                P.secondary.to_string()
            } else {
                P.neutral.to_string()
            }
        })
        .collect();

    let top10 = numeric::top_n_share(&volumes, 10);
    let top14 = numeric::top_n_share(&volumes, 14);

    Figure::single(
        Panel::new()
            .title("Top Green Bond Issuers 2015-2024\nMarket Concentration and Repeat Issuers")
            .x_label("Cumulative Green Bond Issuance (USD Billions)")
            .grid(GridAxis::X)
            .hbars(
                HBars::new(issuers, volumes, P.primary)
                    .per_bar_colors(colors)
                    .value_labels(labels),
            )
            .annotate(Annotation::FracText {
                fx: 0.98,
                fy: 0.98,
                text: format!(
                    "Top 10: {top10:.1}% of market\nTop 50: {top14:.1}% of market"
                ),
                color: P.primary.into(),
                border: P.primary.into(),
            }),
    )
}

pub fn credit_ratings() -> Figure {
    let ratings = strs(&[
        "AAA", "AA+", "AA", "AA-", "A+", "A", "A-", "BBB+", "BBB", "BBB-", "Below\nBBB-",
    ]);
    let green = vec![28.0, 12.0, 15.0, 8.0, 10.0, 9.0, 7.0, 5.0, 4.0, 2.0, 0.0];
    let conventional = vec![18.0, 10.0, 12.0, 9.0, 11.0, 12.0, 10.0, 8.0, 6.0, 3.0, 1.0];

    let pct_labels = |values: &[f64]| -> Vec<String> {
        values
            .iter()
            .map(|v| if *v > 0.0 { format!("{v:.0}%") } else { String::new() })
            .collect()
    };

    let green_ig: f64 = green.iter().take(10).sum();
    let conv_ig: f64 = conventional.iter().take(10).sum();

    Figure::single(
        Panel::new()
            .title(
                "Credit Rating Distribution: Green vs Conventional Bonds\nGreen Bonds Show Higher Quality Profile",
            )
            .x_label("Credit Rating")
            .y_label("Market Share (%)")
            .grid(GridAxis::Y)
            .y_limits(0.0, 32.0)
            .grouped_bars(GroupedBars::new(
                ratings,
                vec![
                    BarGroup::new("Green Bonds", P.primary, green.clone())
                        .value_labels(pct_labels(&green)),
                    BarGroup::new("Conventional Bonds", P.neutral, conventional.clone())
                        .value_labels(pct_labels(&conventional)),
                ],
            ))
            .annotate(Annotation::VLine {
                x: 9.5,
                color: P.warning.into(),
                dashed: true,
            })
            .annotate(Annotation::Text {
                x: 9.5,
                y: 30.0,
                text: "Investment Grade Cutoff".into(),
                color: P.warning.into(),
                boxed: None,
            })
            .annotate(Annotation::FracText {
                fx: 0.02,
                fy: 0.98,
                text: format!(
                    "Investment Grade:\nGreen: {green_ig}%\nConventional: {conv_ig}%"
                ),
                color: P.primary.into(),
                border: P.success.into(),
            })
            .legend(Legend::UpperRight),
    )
}

pub fn esg_fund_flows() -> Figure {
    let quarter_labels = strs(&[
        "Q1\n2019", "Q2", "Q3", "Q4", "Q1\n2020", "Q2", "Q3", "Q4", "Q1\n2021", "Q2", "Q3",
        "Q4", "Q1\n2022", "Q2", "Q3", "Q4", "Q1\n2023", "Q2", "Q3", "Q4", "Q1\n2024", "Q2",
        "Q3", "Q4",
    ]);
    let inflows = vec![
        12.0, 15.0, 18.0, 22.0, 28.0, 45.0, 52.0, 61.0, 72.0, 85.0, 92.0, 105.0, 78.0, 65.0,
        58.0, 62.0, 68.0, 75.0, 82.0, 95.0, 102.0, 110.0, 118.0, 125.0,
    ];
    let x: Vec<f64> = (0..inflows.len()).map(|i| i as f64).collect();

    // 2024 quarters highlighted in green.
    let bar_colors: Vec<String> = (0..inflows.len())
        .map(|i| {
            if i >= 20 {
                P.success.to_string()
            } else {
                P.primary.to_string()
            }
        })
        .collect();

    let coeffs = numeric::polyfit2(&x, &inflows);
    let trend: Vec<f64> = x.iter().map(|&v| numeric::polyval(&coeffs, v)).collect();

    // Every other quarter on the axis.
    let ticks: Vec<(f64, String)> = quarter_labels
        .iter()
        .enumerate()
        .step_by(2)
        .map(|(i, l)| (i as f64, l.clone()))
        .collect();

    let flows = Panel::new()
        .title("ESG Fund Net Inflows 2019-2024\nQuarterly Data Showing Strong Investor Demand")
        .y_label("Net Inflows (USD Billions)")
        .grid(GridAxis::Y)
        .x_ticks(ticks)
        .bars(
            Bars::new(quarter_labels, inflows.clone(), P.primary).per_bar_colors(bar_colors),
        )
        .line(
            Line::new(x, trend, P.warning)
                .dashed()
                .label("Trend (Polynomial Fit)"),
        )
        .annotate(Annotation::VLine {
            x: 4.0,
            color: P.neutral.into(),
            dashed: true,
        })
        .annotate(Annotation::Text {
            x: 7.5,
            y: 120.0,
            text: "COVID-19 ESG Surge".into(),
            color: P.neutral.into(),
            boxed: None,
        })
        .legend(Legend::UpperLeft);

    let years: Vec<f64> = (2019..=2024).map(f64::from).collect();
    let aum = vec![1.2, 1.8, 2.7, 2.5, 2.9, 3.5];
    let aum_labels: Vec<String> = aum.iter().map(|v| format!("${v:.1}T")).collect();

    let total_inflows: f64 = inflows.iter().sum();
    let aum_cagr = numeric::cagr(aum[0], aum[aum.len() - 1], 5.0) * 100.0;

    let assets = Panel::new()
        .title("ESG Fund Assets Under Management")
        .x_label("Year")
        .y_label("Assets Under Management\n(USD Trillions)")
        .grid(GridAxis::Both)
        .y_limits(0.0, 4.0)
        .line(
            Line::new(years, aum.clone(), P.primary)
                .marker(Marker::Circle)
                .marker_size(6.0)
                .width(3.0)
                .fill(0.2)
                .point_labels(aum_labels),
        )
        .annotate(Annotation::FracText {
            fx: 0.98,
            fy: 0.95,
            text: format!(
                "Total Inflows (2019-2024): ${total_inflows:.0}B\nAUM CAGR (5-year): {aum_cagr:.1}%\nCurrent AUM: ${:.1} Trillion",
                aum[aum.len() - 1]
            ),
            color: P.primary.into(),
            border: P.success.into(),
        });

    Figure::two_down(flows, assets)
}

pub fn standardization() -> Figure {
    let years: Vec<f64> = (2015..=2024).map(f64::from).collect();
    let gbp = vec![42.0, 58.0, 68.0, 75.0, 81.0, 85.0, 88.0, 91.0, 93.0, 95.0];
    let cbi = vec![8.0, 12.0, 18.0, 24.0, 28.0, 32.0, 36.0, 39.0, 42.0, 45.0];
    let eu = vec![0.0, 0.0, 0.0, 0.0, 0.0, 5.0, 12.0, 22.0, 35.0, 48.0];

    let adoption = Panel::new()
        .title("Standards Adoption Over Time")
        .x_label("Year")
        .y_label("Market Share (%)")
        .grid(GridAxis::Both)
        .y_limits(0.0, 100.0)
        .line(
            Line::new(years.clone(), gbp, P.primary)
                .marker(Marker::Circle)
                .marker_size(5.0)
                .fill(0.1)
                .label("GBP-Aligned"),
        )
        .line(
            Line::new(years.clone(), cbi, P.success)
                .marker(Marker::Square)
                .marker_size(4.5)
                .fill(0.1)
                .label("CBI Certified"),
        )
        .line(
            Line::new(years, eu, P.warning)
                .marker(Marker::Triangle)
                .marker_size(4.5)
                .fill(0.1)
                .label("EU Taxonomy"),
        )
        .legend(Legend::UpperLeft);

    let shares = vec![45.0, 25.0, 18.0, 8.0, 4.0];
    let standardized: f64 = shares.iter().take(4).sum();
    let labels: Vec<String> = shares.iter().map(|v| format!("{v}%")).collect();

    let frameworks = Panel::new()
        .title("Framework Distribution (2024)")
        .x_label("Market Share (%)")
        .grid(GridAxis::X)
        .x_limits(0.0, 55.0)
        .hbars(
            HBars::new(
                strs(&[
                    "GBP-Aligned\nOnly",
                    "CBI Certified\n(with GBP)",
                    "EU Taxonomy\n(with GBP)",
                    "Multiple\nFrameworks",
                    "No Standard\nFramework",
                ]),
                shares,
                P.primary,
            )
            .per_bar_colors(strs(&[P.primary, P.success, P.warning, P.secondary, P.neutral]))
            .value_labels(labels),
        )
        .annotate(Annotation::FracText {
            fx: 0.98,
            fy: 0.02,
            text: format!("Standardized: {standardized}%\nLiquidity premium from standards"),
            color: P.primary.into(),
            border: P.success.into(),
        });

    Figure::two_across(
        "Standardization in Green Bond Market\nNetwork Effects and Liquidity Benefits",
        adoption,
        frameworks,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_labels_are_computed_per_sector() {
        let svg = investment_gap_detail().render().unwrap();
        assert!(svg.contains("Gap: $790B"));
        assert!(svg.contains("(66%)"));
        assert!(svg.contains("Total Gap: $2040B/year (67.5%)"));
    }

    #[test]
    fn concentration_shares_match_hand_arithmetic() {
        // Top 10 sum to 500 of a 1572 total.
        let svg = issuer_concentration().render().unwrap();
        assert!(svg.contains("Top 10: 31.8% of market"));
        assert!(svg.contains("Top 50: 37.7% of market"));
        assert!(svg.contains("Others (1,185 issuers)"));
    }

    #[test]
    fn credit_ratings_sums_investment_grade() {
        let svg = credit_ratings().render().unwrap();
        assert!(svg.contains("Green: 100%"));
        assert!(svg.contains("Conventional: 99%"));
        assert!(svg.contains("Investment Grade Cutoff"));
    }

    #[test]
    fn esg_fund_flows_summary_is_computed() {
        let svg = esg_fund_flows().render().unwrap();
        assert!(svg.contains("Total Inflows (2019-2024): $1645B"));
        assert!(svg.contains("AUM CAGR (5-year): 23.9%"));
        assert!(svg.contains("$3.5T"));
    }

    #[test]
    fn verification_panels_carry_both_views() {
        let fig = verification_stats();
        assert_eq!(fig.panels.len(), 2);
        let svg = fig.render().unwrap();
        assert!(svg.contains("80% benchmark"));
        assert!(svg.contains("Second Party"));
        assert!(svg.contains("62%"));
    }

    #[test]
    fn standardization_totals_the_standardized_share() {
        let svg = standardization().render().unwrap();
        assert!(svg.contains("Standardized: 96%"));
        assert!(svg.contains("EU Taxonomy"));
    }
}
