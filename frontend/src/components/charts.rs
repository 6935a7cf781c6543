use yew::prelude::*;

use crate::chart::{
    doughnut_slices, points_attr, polyline, CategoryData, IncomeExpenseData, Plot, GASTOS_COLOR,
    INGRESOS_COLOR,
};

const LINE_WIDTH: f64 = 600.0;
const LINE_HEIGHT: f64 = 300.0;
const LINE_PLOT: Plot = Plot {
    left: 48.0,
    top: 40.0,
    width: 532.0,
    height: 220.0,
};
const MAX_X_LABELS: usize = 8;

const RING_CENTER: f64 = 100.0;
const RING_RADIUS: f64 = 70.0;
const RING_WIDTH: f64 = 30.0;

fn legend_entry(x: f64, color: &'static str, label: &'static str) -> Html {
    html! {
        <g>
            <rect x={format!("{}", x)} y="10" width="14" height="4" fill={color} />
            <text x={format!("{}", x + 20.0)} y="16" font-size="12" fill="#374151">{ label }</text>
        </g>
    }
}

#[derive(Properties, PartialEq)]
pub struct IncomeExpenseChartProps {
    pub data: IncomeExpenseData,
}

/// Ingresos vs gastos over time.
#[function_component(IncomeExpenseChart)]
pub fn income_expense_chart(props: &IncomeExpenseChartProps) -> Html {
    let data = &props.data;
    let slots = data.slots();
    let max = data.max_value();
    let ingresos = polyline(&data.ingresos, slots, max, LINE_PLOT);
    let gastos = polyline(&data.gastos, slots, max, LINE_PLOT);

    let label_every = ((slots + MAX_X_LABELS - 1) / MAX_X_LABELS).max(1);
    let label_step = if slots > 1 {
        LINE_PLOT.width / (slots - 1) as f64
    } else {
        0.0
    };
    let grid = [0.0, 0.5, 1.0];

    html! {
        <svg viewBox={format!("0 0 {} {}", LINE_WIDTH, LINE_HEIGHT)} class="w-100" role="img" aria-label="Ingresos y gastos">
            { legend_entry(LINE_WIDTH / 2.0 - 90.0, INGRESOS_COLOR, "Ingresos") }
            { legend_entry(LINE_WIDTH / 2.0 + 10.0, GASTOS_COLOR, "Gastos") }

            { for grid.iter().map(|ratio| {
                let y = LINE_PLOT.bottom() - ratio * LINE_PLOT.height;
                html! {
                    <g>
                        <line x1={format!("{}", LINE_PLOT.left)} x2={format!("{}", LINE_PLOT.left + LINE_PLOT.width)}
                            y1={format!("{:.1}", y)} y2={format!("{:.1}", y)} stroke="#e5e7eb" />
                        <text x={format!("{}", LINE_PLOT.left - 6.0)} y={format!("{:.1}", y + 4.0)}
                            font-size="10" text-anchor="end" fill="#6b7280">{ format!("{:.0}", max * ratio) }</text>
                    </g>
                }
            }) }

            { for data.labels.iter().enumerate().filter(|(i, _)| i % label_every == 0).map(|(i, label)| {
                let x = if slots > 1 {
                    LINE_PLOT.left + label_step * i as f64
                } else {
                    LINE_PLOT.left + LINE_PLOT.width / 2.0
                };
                html! {
                    <text x={format!("{:.1}", x)} y={format!("{}", LINE_PLOT.bottom() + 18.0)}
                        font-size="10" text-anchor="middle" fill="#6b7280">{ label.clone() }</text>
                }
            }) }

            <polyline points={points_attr(&ingresos)} fill="none" stroke={INGRESOS_COLOR} stroke-width="2" stroke-linejoin="round" />
            <polyline points={points_attr(&gastos)} fill="none" stroke={GASTOS_COLOR} stroke-width="2" stroke-linejoin="round" />
        </svg>
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub data: CategoryData,
}

/// Gastos per category as a doughnut.
#[function_component(CategoryChart)]
pub fn category_chart(props: &CategoryChartProps) -> Html {
    let slices = doughnut_slices(&props.data, RING_RADIUS);
    let circumference = 2.0 * std::f64::consts::PI * RING_RADIUS;

    html! {
        <div class="category-chart">
            <svg viewBox="0 0 200 200" class="w-100" role="img" aria-label="Gastos por categoría">
                <circle cx={format!("{}", RING_CENTER)} cy={format!("{}", RING_CENTER)} r={format!("{}", RING_RADIUS)}
                    fill="none" stroke="#e5e7eb" stroke-width={format!("{}", RING_WIDTH)} />
                { for slices.iter().filter(|s| s.dash > 0.0).map(|s| html! {
                    <circle cx={format!("{}", RING_CENTER)} cy={format!("{}", RING_CENTER)} r={format!("{}", RING_RADIUS)}
                        fill="none" stroke={s.color} stroke-width={format!("{}", RING_WIDTH)}
                        stroke-dasharray={format!("{:.3} {:.3}", s.dash, circumference - s.dash)}
                        stroke-dashoffset={format!("{:.3}", -s.offset)}
                        transform={format!("rotate(-90 {} {})", RING_CENTER, RING_CENTER)}>
                        <title>{ format!("{}: {:.1}%", s.label, s.fraction * 100.0) }</title>
                    </circle>
                }) }
            </svg>
            <ul class="list-inline text-center small mt-2 mb-0">
                { for slices.iter().map(|s| html! {
                    <li class="list-inline-item">
                        <span class="d-inline-block me-1" style={format!("width:10px;height:10px;background:{}", s.color)}></span>
                        { s.label.clone() }
                    </li>
                }) }
            </ul>
        </div>
    }
}
