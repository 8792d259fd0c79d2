//! Week-1 survey charts: market size, composition, and first pricing looks.

use greendeck_core::figure::{
    Bars, Figure, GridAxis, GroupedBars, BarGroup, Layout, Legend, Line, Marker, Panel, Pie,
    Scatter,
};
use greendeck_core::numeric::NormalSampler;
use greendeck_core::style::{Palette, GREEN_RAMP};

use crate::strs;

const P: Palette = Palette::DEFAULT;

fn years(from: i32, to: i32) -> Vec<f64> {
    (from..=to).map(f64::from).collect()
}

/// Annual green finance volume 2015-2024 (billion USD).
pub(crate) const MARKET_VOLUMES: [f64; 10] = [
    300.0, 420.0, 580.0, 850.0, 1150.0, 1300.0, 1650.0, 1450.0, 1750.0, 2100.0,
];

pub fn market_growth() -> Figure {
    let values = MARKET_VOLUMES.to_vec();
    let labels: Vec<String> = values.iter().map(|v| format!("${v}B")).collect();
    Figure::single(
        Panel::new()
            .title("Global Green Finance Market Growth\n2015-2024")
            .x_label("Year")
            .y_label("Volume (Billion USD)")
            .grid(GridAxis::Both)
            .line(
                Line::new(years(2015, 2024), values, P.primary)
                    .marker(Marker::Circle)
                    .marker_size(6.0)
                    .label("Total Green Finance Volume")
                    .fill(0.3)
                    .point_labels(labels),
            ),
    )
}

pub fn investment_gap() -> Figure {
    let sectors = strs(&[
        "Renewable\nEnergy",
        "Green\nBuildings",
        "Sustainable\nTransport",
        "Water &\nWaste",
        "Agriculture",
    ]);
    Figure::single(
        Panel::new()
            .title("Green Investment Gap by Sector\n(Billions USD Annual)")
            .x_label("Sector")
            .y_label("Annual Investment (Billion USD)")
            .grid(GridAxis::Y)
            .grouped_bars(GroupedBars::new(
                sectors,
                vec![
                    BarGroup::new(
                        "Investment Needed",
                        P.warning,
                        vec![850.0, 620.0, 480.0, 350.0, 290.0],
                    ),
                    BarGroup::new(
                        "Current Investment",
                        P.success,
                        vec![520.0, 280.0, 210.0, 150.0, 90.0],
                    ),
                ],
            ))
            .legend(Legend::UpperRight),
    )
}

pub fn issuer_mix() -> Figure {
    Figure::single(
        Panel::new()
            .title("Green Finance Market by Issuer Type\n2024 (USD 2.1T)")
            .pie(Pie::new(
                strs(&[
                    "Corporates",
                    "Financial\nInstitutions",
                    "Sovereigns",
                    "Supranationals",
                    "Municipalities",
                ]),
                vec![42.0, 28.0, 18.0, 8.0, 4.0],
                strs(&[P.primary, P.secondary, P.light, P.lighter, P.lightest]),
            )),
    )
}

pub fn instrument_mix() -> Figure {
    let values = vec![1600.0, 300.0, 500.0, 400.0, 300.0];
    let labels: Vec<String> = values.iter().map(|v| format!("${v}B")).collect();
    Figure::single(
        Panel::new()
            .title("Green Finance by Instrument Type\n2024 Market Volume")
            .y_label("Volume (Billion USD)")
            .grid(GridAxis::Y)
            .bars(
                Bars::new(
                    strs(&[
                        "Green\nBonds",
                        "Green\nLoans",
                        "SL Bonds",
                        "Green\nEquity",
                        "Carbon\nCredits",
                    ]),
                    values,
                    P.success,
                )
                .value_labels(labels),
            ),
    )
}

pub fn regional_issuance() -> Figure {
    let values = vec![920.0, 680.0, 420.0, 58.0, 22.0];
    let labels: Vec<String> = values.iter().map(|v| format!("${v}B")).collect();
    Figure::single(
        Panel::new()
            .title("Green Finance Issuance by Region\n2024 (Billions USD)")
            .y_label("Issuance (Billion USD)")
            .grid(GridAxis::Y)
            .bars(
                Bars::new(
                    strs(&[
                        "Europe",
                        "Asia-Pacific",
                        "North\nAmerica",
                        "Latin\nAmerica",
                        "Middle East/\nAfrica",
                    ]),
                    values,
                    P.primary,
                )
                .value_labels(labels),
            ),
    )
}

pub fn risk_return() -> Figure {
    let mut sampler = NormalSampler::seeded(42);
    let n = 25;
    let green_risk = sampler.sample_vec(8.5, 1.5, n);
    let green_return = sampler.sample_vec(7.2, 1.2, n);
    let conv_risk = sampler.sample_vec(10.2, 1.8, n);
    let conv_return = sampler.sample_vec(7.0, 1.3, n);
    Figure::single(
        Panel::new()
            .title("Risk-Return Analysis\nGreen vs Conventional Assets")
            .x_label("Risk (Volatility %)")
            .y_label("Return (% p.a.)")
            .grid(GridAxis::Both)
            .scatter(Scatter::new(green_risk, green_return, P.success).label("Green Assets"))
            .scatter(Scatter::new(conv_risk, conv_return, P.neutral).label("Conventional Assets"))
            .legend(Legend::UpperLeft),
    )
}

pub fn yield_comparison() -> Figure {
    Figure::single(
        Panel::new()
            .title("Investment-Grade Bond Yields\nGreen vs Conventional (2019-2024)")
            .x_label("Year")
            .y_label("Yield (%)")
            .grid(GridAxis::Both)
            .line(
                Line::new(
                    years(2019, 2024),
                    vec![2.8, 1.9, 2.1, 3.5, 3.9, 3.6],
                    P.success,
                )
                .marker(Marker::Circle)
                .marker_size(6.0)
                .label("Green Bonds"),
            )
            .line(
                Line::new(
                    years(2019, 2024),
                    vec![3.0, 2.1, 2.3, 3.7, 4.1, 3.8],
                    P.neutral,
                )
                .marker(Marker::Square)
                .marker_size(5.0)
                .label("Conventional Bonds"),
            )
            .legend(Legend::UpperLeft),
    )
}

pub fn sector_allocation() -> Figure {
    let values = vec![38.0, 24.0, 18.0, 12.0, 5.0, 3.0];
    let labels: Vec<String> = values.iter().map(|v| format!("{v}%")).collect();
    Figure::single(
        Panel::new()
            .title("Green Finance by Economic Sector\n2024 Allocation")
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

pub fn market_growth_simple() -> Figure {
    let values = MARKET_VOLUMES.to_vec();
    let labels: Vec<String> = values.iter().map(|v| format!("${v}B")).collect();
    Figure::single(
        Panel::new()
            .title("Global Green Finance Market Growth\n2015-2024")
            .x_label("Year")
            .y_label("Volume (Billion USD)")
            .grid(GridAxis::Both)
            .line(
                Line::new(years(2015, 2024), values, GREEN_RAMP[0])
                    .marker(Marker::Circle)
                    .marker_size(6.0)
                    .label("Total Green Finance Volume")
                    .fill(0.3)
                    .point_labels(labels),
            )
            .legend(Legend::UpperLeft),
    )
}

pub fn instrument_breakdown() -> Figure {
    let instruments = strs(&[
        "Green Bonds",
        "Green Loans",
        "SL Bonds",
        "Green Equity",
        "Carbon Markets",
    ]);
    let volumes = vec![1600.0, 300.0, 500.0, 400.0, 850.0];
    let labels: Vec<String> = volumes.iter().map(|v| format!("${v}B")).collect();
    let ramp: Vec<String> = strs(&GREEN_RAMP);

    let pie = Panel::new()
        .title("Green Finance Instruments\nMarket Share (2024)")
        .pie(Pie::new(instruments.clone(), volumes.clone(), ramp.clone()));
    let bars = Panel::new()
        .title("Green Finance by Instrument Type")
        .y_label("Volume (Billion USD)")
        .grid(GridAxis::Y)
        .bars(
            Bars::new(instruments, volumes, P.success)
                .per_bar_colors(ramp)
                .value_labels(labels),
        );

    Figure {
        title: None,
        layout: Layout::TwoAcross,
        panels: vec![pie, bars],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greendeck_core::figure::Series;

    #[test]
    fn market_growth_labels_every_point() {
        let fig = market_growth();
        let svg = fig.render().unwrap();
        assert!(svg.contains("$300B"));
        assert!(svg.contains("$2100B"));
        // No legend on this chart, so the series label never appears.
        assert!(!svg.contains("Total Green Finance Volume"));
    }

    #[test]
    fn issuer_mix_shares_sum_to_hundred() {
        let fig = issuer_mix();
        let Series::Pie(pie) = &fig.panels[0].series[0] else {
            panic!("expected pie");
        };
        assert_eq!(pie.values.iter().sum::<f64>(), 100.0);
        let svg = fig.render().unwrap();
        assert!(svg.contains("42.0%"));
        assert!(svg.contains("USD 2.1T"));
    }

    #[test]
    fn risk_return_is_seeded() {
        let a = risk_return().render().unwrap();
        let b = risk_return().render().unwrap();
        assert_eq!(a, b);
        // 25 green + 25 conventional markers, plus two legend swatches.
        assert_eq!(a.matches("<circle").count(), 52);
    }

    #[test]
    fn instrument_breakdown_has_two_panels() {
        let fig = instrument_breakdown();
        assert_eq!(fig.panels.len(), 2);
        let svg = fig.render().unwrap();
        assert!(svg.contains("Market Share (2024)"));
        assert!(svg.contains("$1600B"));
    }
}
