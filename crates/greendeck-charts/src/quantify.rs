//! Quantification charts: market size, regional shares, instrument sizes,
//! and sector allocation with computed percentage labels.

use greendeck_core::figure::{Annotation, Bars, Figure, GridAxis, Legend, Line, Marker, Panel};
use greendeck_core::style::Palette;

use crate::strs;
use crate::survey::MARKET_VOLUMES;

const P: Palette = Palette::DEFAULT;

pub fn market_growth_cagr() -> Figure {
    let years: Vec<f64> = (2015..=2024).map(f64::from).collect();
    let values = MARKET_VOLUMES.to_vec();
    // Labels on the endpoints and the 2020 midpoint only.
    let labels: Vec<String> = years
        .iter()
        .zip(&values)
        .map(|(&y, &v)| {
            if y == 2015.0 || y == 2020.0 || y == 2024.0 {
                format!("${v}B")
            } else {
                String::new()
            }
        })
        .collect();
    Figure::single(
        Panel::new()
            .title("Global Green Finance Market\n2015-2024 (USD Billions)")
            .x_label("Year")
            .y_label("Market Size (Billion USD)")
            .grid(GridAxis::Both)
            .line(
                Line::new(years, values, P.primary)
                    .marker(Marker::Circle)
                    .marker_size(6.0)
                    .label("Total Green Finance")
                    .fill(0.3)
                    .point_labels(labels),
            )
            .annotate(Annotation::Text {
                x: 2019.5,
                y: 1900.0,
                text: "CAGR: 24.9%".into(),
                color: "#333333".into(),
                boxed: Some(P.secondary.into()),
            })
            .legend(Legend::UpperLeft),
    )
}

pub fn regional_share() -> Figure {
    let values = vec![1508.0, 783.0, 377.0, 232.0];
    let total: f64 = values.iter().sum();
    let labels: Vec<String> = values
        .iter()
        .map(|v| format!("${v}B\n({:.1}%)", v / total * 100.0))
        .collect();
    Figure::single(
        Panel::new()
            .title("Green Finance by Region\n2024 Issuance (USD Billions)")
            .y_label("Annual Issuance (Billion USD)")
            .grid(GridAxis::Y)
            .bars(
                Bars::new(
                    strs(&[
                        "Europe\n(EMEA)",
                        "Asia-\nPacific",
                        "Americas",
                        "Middle East,\nAfrica,\nOther",
                    ]),
                    values,
                    P.primary,
                )
                .value_labels(labels),
            ),
    )
}

pub fn instrument_sizes() -> Figure {
    let values = vec![1600.0, 500.0, 300.0, 400.0, 200.0];
    let labels: Vec<String> = values.iter().map(|v| format!("${v}B")).collect();
    Figure::single(
        Panel::new()
            .title("Green Finance by Instrument\n2024 Market Size")
            .y_label("Market Size (Billion USD)")
            .grid(GridAxis::Y)
            .bars(
                Bars::new(
                    strs(&[
                        "Green\nBonds",
                        "Sustainability-\nLinked Bonds",
                        "Green\nLoans",
                        "Green\nEquity",
                        "Carbon\nMarkets",
                    ]),
                    values,
                    P.success,
                )
                .value_labels(labels),
            ),
    )
}

pub fn sector_share() -> Figure {
    let values = vec![38.0, 24.0, 18.0, 12.0, 5.0, 3.0];
    let labels: Vec<String> = values.iter().map(|v| format!("{v}%")).collect();
    Figure::single(
        Panel::new()
            .title("Green Finance by Sector\n2024 Allocation (%)")
            .y_label("Allocation (%)")
            .grid(GridAxis::Y)
            .bars(
                Bars::new(
                    strs(&[
                        "Energy",
                        "Buildings",
                        "Transport",
                        "Industry",
                        "Agriculture",
                        "Water",
                    ]),
                    values,
                    P.success,
                )
                .value_labels(labels),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regional_shares_are_computed_from_totals() {
        let svg = regional_share().render().unwrap();
        // 1508 + 783 + 377 + 232 = 2900, so Europe is exactly 52%.
        assert!(svg.contains("$1508B"));
        assert!(svg.contains("(52.0%)"));
        assert!(svg.contains("(8.0%)"));
    }

    #[test]
    fn cagr_callout_is_present() {
        let svg = market_growth_cagr().render().unwrap();
        assert!(svg.contains("CAGR: 24.9%"));
        assert!(svg.contains("$1300B"));
        // Unlabeled points stay unlabeled.
        assert!(!svg.contains("$1750B"));
    }

    #[test]
    fn sector_share_percentages_sum_to_hundred() {
        let values = [38.0, 24.0, 18.0, 12.0, 5.0, 3.0];
        assert_eq!(values.iter().sum::<f64>(), 100.0);
    }
}
