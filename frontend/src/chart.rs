use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

pub const INGRESOS_COLOR: &str = "rgb(34,197,94)";
pub const GASTOS_COLOR: &str = "rgb(239,68,68)";
pub const CATEGORY_PALETTE: [&str; 5] = ["#60a5fa", "#34d399", "#fbbf24", "#f87171", "#a78bfa"];

/// Income and expense series for the line chart.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IncomeExpenseData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub ingresos: Vec<Decimal>,
    #[serde(default)]
    pub gastos: Vec<Decimal>,
}

impl IncomeExpenseData {
    pub fn total_ingresos(&self) -> Decimal {
        self.ingresos.iter().copied().sum()
    }

    pub fn total_gastos(&self) -> Decimal {
        self.gastos.iter().copied().sum()
    }

    pub fn balance(&self) -> Decimal {
        self.total_ingresos() - self.total_gastos()
    }

    /// Number of x positions: the longest of labels and both series.
    pub fn slots(&self) -> usize {
        self.labels
            .len()
            .max(self.ingresos.len())
            .max(self.gastos.len())
    }

    pub fn max_value(&self) -> f64 {
        self.ingresos
            .iter()
            .chain(self.gastos.iter())
            .filter_map(|v| v.to_f64())
            .fold(0.0, f64::max)
    }
}

/// Spending per category for the doughnut chart.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub valores: Vec<Decimal>,
}

/// Drawing area inside an SVG view box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plot {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Plot {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Maps a series onto `plot`. Points are spread evenly over `slots` positions
/// and scaled against `max`; a lone point sits in the middle.
pub fn polyline(values: &[Decimal], slots: usize, max: f64, plot: Plot) -> Vec<(f64, f64)> {
    let slots = slots.max(values.len());
    let step = if slots > 1 {
        plot.width / (slots - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if slots > 1 {
                plot.left + step * i as f64
            } else {
                plot.left + plot.width / 2.0
            };
            let v = v.to_f64().unwrap_or(0.0).max(0.0);
            let ratio = if max > 0.0 { (v / max).min(1.0) } else { 0.0 };
            (x, plot.bottom() - ratio * plot.height)
        })
        .collect()
}

pub fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One doughnut segment drawn as a dashed circle stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub label: String,
    pub color: &'static str,
    pub fraction: f64,
    /// Stroke length of the segment.
    pub dash: f64,
    /// Distance along the circumference where the segment starts.
    pub offset: f64,
}

/// Splits a circle of radius `radius` among the positive values. Zero or
/// negative values keep their legend color but get no arc.
pub fn doughnut_slices(data: &CategoryData, radius: f64) -> Vec<Slice> {
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let values: Vec<f64> = data
        .valores
        .iter()
        .map(|v| v.to_f64().unwrap_or(0.0).max(0.0))
        .collect();
    let total: f64 = values.iter().sum();

    let mut cumulative = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let fraction = if total > 0.0 { v / total } else { 0.0 };
            let slice = Slice {
                label: data
                    .labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", i + 1)),
                color: CATEGORY_PALETTE[i % CATEGORY_PALETTE.len()],
                fraction,
                dash: fraction * circumference,
                offset: cumulative * circumference,
            };
            cumulative += fraction;
            slice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const PLOT: Plot = Plot {
        left: 10.0,
        top: 0.0,
        width: 100.0,
        height: 50.0,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn polyline_spreads_points_and_scales() {
        let pts = polyline(&[dec!(0), dec!(50), dec!(100)], 3, 100.0, PLOT);
        assert_eq!(pts, vec![(10.0, 50.0), (60.0, 25.0), (110.0, 0.0)]);
    }

    #[test]
    fn shorter_series_uses_label_slots() {
        let pts = polyline(&[dec!(10)], 5, 10.0, PLOT);
        assert_eq!(pts, vec![(10.0, 0.0)]);
    }

    #[test]
    fn single_point_is_centered_and_zero_max_is_flat() {
        let pts = polyline(&[dec!(5)], 1, 0.0, PLOT);
        assert_eq!(pts, vec![(60.0, 50.0)]);
    }

    #[test]
    fn points_attr_formats_pairs() {
        assert_eq!(points_attr(&[(1.0, 2.26), (3.0, 4.0)]), "1.0,2.3 3.0,4.0");
    }

    #[test]
    fn totals_and_balance() {
        let data = IncomeExpenseData {
            labels: vec!["01/10".into(), "02/10".into()],
            ingresos: vec![dec!(1000), dec!(250.50)],
            gastos: vec![dec!(300)],
        };
        assert_eq!(data.total_ingresos(), dec!(1250.50));
        assert_eq!(data.balance(), dec!(950.50));
        assert_eq!(data.slots(), 2);
        assert!(close(data.max_value(), 1000.0));
    }

    #[test]
    fn doughnut_covers_the_circle() {
        let data = CategoryData {
            labels: vec!["Comida".into(), "Casa".into(), "Ocio".into()],
            valores: vec![dec!(50), dec!(0), dec!(150)],
        };
        let slices = doughnut_slices(&data, 10.0);
        let circumference = 20.0 * std::f64::consts::PI;
        assert_eq!(slices.len(), 3);
        assert!(close(slices[0].fraction, 0.25));
        assert!(close(slices[1].dash, 0.0));
        assert!(close(slices[2].offset, circumference * 0.25));
        let drawn: f64 = slices.iter().map(|s| s.dash).sum();
        assert!(close(drawn, circumference));
        assert_eq!(slices[2].color, "#fbbf24");
    }

    #[test]
    fn palette_cycles_and_missing_labels_are_numbered() {
        let data = CategoryData {
            labels: vec![],
            valores: vec![dec!(1); 6],
        };
        let slices = doughnut_slices(&data, 1.0);
        assert_eq!(slices[5].color, CATEGORY_PALETTE[0]);
        assert_eq!(slices[5].label, "#6");
    }

    #[test]
    fn empty_doughnut_draws_nothing() {
        let data = CategoryData {
            labels: vec!["Nada".into()],
            valores: vec![dec!(0)],
        };
        let slices = doughnut_slices(&data, 10.0);
        assert!(close(slices[0].dash, 0.0));
    }

    #[test]
    fn decodes_server_payload() {
        let data: IncomeExpenseData = serde_json::from_str(
            r#"{"labels": ["01/10"], "ingresos": [1500.0], "gastos": []}"#,
        )
        .unwrap();
        assert_eq!(data.ingresos, vec![dec!(1500)]);
        assert!(data.gastos.is_empty());
    }
}
