use rust_decimal::Decimal;
use yew::prelude::*;

use crate::chart::IncomeExpenseData;
use crate::components::icons::{icon_trending_down, icon_trending_up, icon_wallet};
use crate::money::format_currency;

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    Up,
    Down,
    Wallet,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub amount: Decimal,
    pub icon: StatIcon,
    pub currency_symbol: String,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let amount_class = if props.amount < Decimal::ZERO {
        "text-danger"
    } else {
        "text-body"
    };
    html! {
        <div class="card shadow-sm h-100">
            <div class="card-body d-flex justify-content-between align-items-start">
                <div>
                    <p class="text-muted small fw-bold mb-1 text-uppercase">{ props.title }</p>
                    <h3 class={classes!("fw-bold", "mb-0", amount_class)}>{ format_currency(props.amount, &props.currency_symbol) }</h3>
                </div>
                <div class="p-2 bg-light rounded">
                    {
                        match props.icon {
                            StatIcon::Up => icon_trending_up(),
                            StatIcon::Down => icon_trending_down(),
                            StatIcon::Wallet => icon_wallet(),
                        }
                    }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardStatsProps {
    pub data: IncomeExpenseData,
    pub currency_symbol: String,
}

/// Ingresos, gastos and balance cards.
#[function_component(DashboardStats)]
pub fn dashboard_stats(props: &DashboardStatsProps) -> Html {
    html! {
        <div class="row g-3">
            <div class="col-md-4">
                <StatCard title="Ingresos" amount={props.data.total_ingresos()} icon={StatIcon::Up} currency_symbol={props.currency_symbol.clone()} />
            </div>
            <div class="col-md-4">
                <StatCard title="Gastos" amount={props.data.total_gastos()} icon={StatIcon::Down} currency_symbol={props.currency_symbol.clone()} />
            </div>
            <div class="col-md-4">
                <StatCard title="Balance" amount={props.data.balance()} icon={StatIcon::Wallet} currency_symbol={props.currency_symbol.clone()} />
            </div>
        </div>
    }
}
