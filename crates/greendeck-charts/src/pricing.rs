//! Pricing charts: the greenium in yields, over duration, in risk-return
//! space, and quarter by quarter.

use greendeck_core::figure::{Annotation, Figure, GridAxis, Legend, Line, Marker, Panel, Scatter};
use greendeck_core::numeric::{self, NormalSampler};
use greendeck_core::style::Palette;

const P: Palette = Palette::DEFAULT;

const GREEN_YIELDS: [f64; 6] = [2.93, 1.94, 2.15, 3.56, 3.97, 3.78];
const CONV_YIELDS: [f64; 6] = [3.00, 2.00, 2.20, 3.60, 4.00, 3.80];

pub fn greenium_yields() -> Figure {
    let years: Vec<f64> = (2019..=2024).map(f64::from).collect();
    let greenium_bps: Vec<f64> = CONV_YIELDS
        .iter()
        .zip(&GREEN_YIELDS)
        .map(|(c, g)| (c - g) * 100.0)
        .collect();
    let avg = numeric::mean(&greenium_bps);
    Figure::single(
        Panel::new()
            .title("Investment-Grade Yields\nGreen vs Conventional (2019-2024)")
            .x_label("Year")
            .y_label("Yield (%)")
            .grid(GridAxis::Both)
            .line(
                Line::new(years.clone(), GREEN_YIELDS.to_vec(), P.success)
                    .marker(Marker::Circle)
                    .marker_size(6.0)
                    .label("Green Bonds"),
            )
            .line(
                Line::new(years, CONV_YIELDS.to_vec(), P.neutral)
                    .marker(Marker::Square)
                    .marker_size(5.0)
                    .dashed()
                    .label("Conventional Bonds"),
            )
            .annotate(Annotation::Text {
                x: 2021.5,
                y: 4.5,
                text: format!("Greenium Range: 2-7 bps\nAverage: {avg:.1} bps"),
                color: "#333333".into(),
                boxed: Some(P.success.into()),
            })
            .legend(Legend::UpperLeft),
    )
}

pub fn duration_premium() -> Figure {
    let durations = vec![1.0, 3.0, 5.0, 7.0, 10.0, 15.0, 20.0, 30.0];
    // Price premium approximation: duration x greenium, in % of face value.
    let premium = |bps: f64| -> Vec<f64> {
        durations.iter().map(|d| d * bps / 10_000.0 * 100.0).collect()
    };
    Figure::single(
        Panel::new()
            .title("Green Premium vs Duration\nFor Different Greenium Levels")
            .x_label("Duration (Years)")
            .y_label("Price Premium (% of Face Value)")
            .grid(GridAxis::Both)
            .line(
                Line::new(durations.clone(), premium(3.0), P.light)
                    .marker(Marker::Circle)
                    .marker_size(5.0)
                    .label("3 bps greenium"),
            )
            .line(
                Line::new(durations.clone(), premium(5.0), P.secondary)
                    .marker(Marker::Square)
                    .marker_size(4.5)
                    .label("5 bps greenium"),
            )
            .line(
                Line::new(durations.clone(), premium(7.0), P.primary)
                    .marker(Marker::Triangle)
                    .marker_size(4.5)
                    .label("7 bps greenium"),
            )
            .legend(Legend::UpperLeft),
    )
}

pub fn risk_return_trend() -> Figure {
    let mut sampler = NormalSampler::seeded(42);
    let n = 30;
    let green_risk = sampler.sample_vec(8.2, 1.3, n);
    let green_return = sampler.sample_vec(7.3, 1.1, n);
    let conv_risk = sampler.sample_vec(10.5, 1.7, n);
    let conv_return = sampler.sample_vec(7.1, 1.4, n);

    let trend = |risk: &[f64], ret: &[f64], color: &str| -> Line {
        let (slope, intercept) = numeric::polyfit1(risk, ret);
        let lo = risk.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = risk.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let xs = numeric::linspace(lo, hi, 100);
        let ys: Vec<f64> = xs.iter().map(|x| slope * x + intercept).collect();
        Line::new(xs, ys, color).width(2.0).dashed()
    };

    Figure::single(
        Panel::new()
            .title("Risk-Return Analysis\nGreen vs Conventional Assets")
            .x_label("Risk (Volatility %)")
            .y_label("Return (% p.a.)")
            .grid(GridAxis::Both)
            .line(trend(&green_risk, &green_return, P.success))
            .line(trend(&conv_risk, &conv_return, P.neutral))
            .scatter(Scatter::new(green_risk, green_return, P.success).label("Green Assets"))
            .scatter(Scatter::new(conv_risk, conv_return, P.neutral).label("Conventional Assets"))
            .legend(Legend::UpperLeft),
    )
}

pub fn greenium_time() -> Figure {
    let quarters: Vec<f64> = (0..24).map(f64::from).collect();
    // Linear 7 -> 2 bps decline with seeded quarterly noise, clamped to a
    // plausible band.
    let mut greenium = numeric::linspace(7.0, 2.0, 24);
    let mut sampler = NormalSampler::seeded(42);
    for v in greenium.iter_mut() {
        *v += sampler.sample(0.0, 0.3);
    }
    numeric::clip(&mut greenium, 1.5, 8.0);
    let avg = numeric::mean(&greenium);

    let year_ticks: Vec<(f64, String)> = (0..6)
        .map(|i| ((i * 4) as f64, (2019 + i).to_string()))
        .collect();

    Figure::single(
        Panel::new()
            .title("Greenium Over Time\n2019-2024 (Quarterly)")
            .x_label("Time")
            .y_label("Greenium (basis points)")
            .grid(GridAxis::Both)
            .x_ticks(year_ticks)
            .line(
                Line::new(quarters, greenium, P.success)
                    .marker(Marker::Circle)
                    .marker_size(3.0)
                    .fill(0.3),
            )
            .annotate(Annotation::HSpan {
                y0: 2.0,
                y1: 5.0,
                color: P.primary.into(),
                opacity: 0.1,
                label: Some("Theoretical range".into()),
            })
            .annotate(Annotation::HLine {
                y: avg,
                color: P.primary.into(),
                dashed: true,
                label: Some(format!("Average: {avg:.1} bps")),
            })
            .legend(Legend::UpperRight),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_greenium_is_four_and_a_half_bps() {
        // Yearly spreads are exactly 7,6,5,4,3,2 bps.
        let svg = greenium_yields().render().unwrap();
        assert!(svg.contains("Average: 4.5 bps"));
    }

    #[test]
    fn duration_premium_scales_linearly() {
        let svg = duration_premium().render().unwrap();
        assert!(svg.contains("7 bps greenium"));
        // Three trend lines, three legend entries.
        assert!(svg.contains("3 bps greenium"));
    }

    #[test]
    fn trend_lines_are_fitted_over_the_cluster_span() {
        let fig = risk_return_trend();
        // 2 trend lines + 2 scatter clusters.
        assert_eq!(fig.panels[0].series.len(), 4);
        let a = fig.render().unwrap();
        let b = risk_return_trend().render().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn greenium_time_stays_in_band() {
        let svg = greenium_time().render().unwrap();
        assert!(svg.contains("Theoretical range"));
        assert!(svg.contains("Average: "));
        assert!(svg.contains("2019"));
        assert!(svg.contains("2024"));
    }
}
