//! Finds the widget host elements the server rendered and mounts a Yew
//! component on each one. A page without a given host simply skips it.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::chart::{CategoryData, IncomeExpenseData};
use crate::components::charts::{
    CategoryChart, CategoryChartProps, IncomeExpenseChart, IncomeExpenseChartProps,
};
use crate::components::detalle_toggle::{DetalleToggle, DetalleToggleProps};
use crate::components::movements_table::{MovementsTable, MovementsTableProps};
use crate::components::split_form::{SplitForm, SplitFormProps};
use crate::components::stat_card::{DashboardStats, DashboardStatsProps};
use crate::money::AmountMode;
use crate::participant::{Estado, ParticipantSeed};
use crate::settings::{load_settings, AppSettings};

pub const INGRESOS_GASTOS_DATA: &str = "ingresosGastosData";
pub const CATEGORIAS_DATA: &str = "categoriasData";
pub const SPLIT_DATA: &str = "splitData";

const TOGGLE_SELECTOR: &str = "[data-detalle-toggle]";

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("data island #{id} is not valid JSON: {source}")]
    InvalidJson {
        id: String,
        source: serde_json::Error,
    },
}

/// Payload of the `splitData` island.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SplitData {
    #[serde(default)]
    pub mode: Option<AmountMode>,
    #[serde(default)]
    pub total: Option<String>,
    #[serde(default)]
    pub participants: Vec<ParticipantSeed>,
}

pub fn parse_data_island<T: DeserializeOwned>(id: &str, raw: &str) -> Result<T, BootError> {
    serde_json::from_str(raw).map_err(|source| BootError::InvalidJson {
        id: id.to_string(),
        source,
    })
}

/// Reads the JSON inside `<script type="application/json" id="{id}">`.
pub fn read_data_island<T: DeserializeOwned>(
    document: &Document,
    id: &str,
) -> Result<Option<T>, BootError> {
    let Some(el) = document.get_element_by_id(id) else {
        return Ok(None);
    };
    let raw = el.text_content().unwrap_or_default();
    parse_data_island(id, &raw).map(Some)
}

fn island_or_log<T: DeserializeOwned>(document: &Document, id: &str) -> Option<T> {
    match read_data_island(document, id) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            log::debug!("no #{} on this page", id);
            None
        }
        Err(err) => {
            log::error!("{}", err);
            None
        }
    }
}

/// Reads the detalle id and initial state of a toggle host. The state falls
/// back to the host's text, then to Debe.
pub fn parse_toggle_host(
    id_attr: Option<String>,
    estado_attr: Option<String>,
    text: Option<String>,
) -> Option<(u32, Estado)> {
    let detalle_id = id_attr?.trim().parse::<u32>().ok()?;
    let estado = estado_attr
        .as_deref()
        .and_then(Estado::parse)
        .or_else(|| text.as_deref().and_then(Estado::parse))
        .unwrap_or_default();
    Some((detalle_id, estado))
}

pub fn mount_all() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document available, nothing to mount");
        return;
    };
    let settings = load_settings();

    mount_charts(&document);
    mount_dashboard_stats(&document, &settings);
    mount_split_form(&document, &settings);
    mount_movements_table(&document);
    mount_detalle_toggles(&document);
}

fn take_host(document: &Document, id: &str) -> Option<Element> {
    let host = document.get_element_by_id(id)?;
    host.set_inner_html("");
    Some(host)
}

fn mount_charts(document: &Document) {
    if document.get_element_by_id("chartIngresosGastos").is_some() {
        if let Some(data) = island_or_log::<IncomeExpenseData>(document, INGRESOS_GASTOS_DATA) {
            if let Some(host) = take_host(document, "chartIngresosGastos") {
                yew::Renderer::<IncomeExpenseChart>::with_root_and_props(
                    host,
                    IncomeExpenseChartProps { data },
                )
                .render();
            }
        }
    }

    if document.get_element_by_id("chartCategorias").is_some() {
        if let Some(data) = island_or_log::<CategoryData>(document, CATEGORIAS_DATA) {
            if let Some(host) = take_host(document, "chartCategorias") {
                yew::Renderer::<CategoryChart>::with_root_and_props(
                    host,
                    CategoryChartProps { data },
                )
                .render();
            }
        }
    }
}

fn mount_dashboard_stats(document: &Document, settings: &AppSettings) {
    if document.get_element_by_id("dashboardStats").is_none() {
        return;
    }
    let Some(data) = island_or_log::<IncomeExpenseData>(document, INGRESOS_GASTOS_DATA) else {
        return;
    };
    if let Some(host) = take_host(document, "dashboardStats") {
        yew::Renderer::<DashboardStats>::with_root_and_props(
            host,
            DashboardStatsProps {
                data,
                currency_symbol: settings.currency_symbol.clone(),
            },
        )
        .render();
    }
}

fn mount_split_form(document: &Document, settings: &AppSettings) {
    if document.get_element_by_id("splitForm").is_none() {
        return;
    }
    let Some(data) = island_or_log::<SplitData>(document, SPLIT_DATA) else {
        return;
    };
    if let Some(host) = take_host(document, "splitForm") {
        log::debug!("split form with {} participants", data.participants.len());
        yew::Renderer::<SplitForm>::with_root_and_props(
            host,
            SplitFormProps {
                participants: data.participants,
                mode: data.mode.unwrap_or(settings.amount_mode),
                initial_total: data.total.unwrap_or_default(),
            },
        )
        .render();
    }
}

fn mount_movements_table(document: &Document) {
    let Some(host) = document.get_element_by_id("movimientosTable") else {
        return;
    };
    let initial_html = host.inner_html();
    let src = host
        .get_attribute("data-src")
        .filter(|s| !s.trim().is_empty());
    host.set_inner_html("");
    yew::Renderer::<MovementsTable>::with_root_and_props(
        host,
        MovementsTableProps { initial_html, src },
    )
    .render();
}

fn mount_detalle_toggles(document: &Document) {
    let hosts = match document.query_selector_all(TOGGLE_SELECTOR) {
        Ok(list) => list,
        Err(_) => {
            log::error!("invalid selector {}", TOGGLE_SELECTOR);
            return;
        }
    };
    for i in 0..hosts.length() {
        let Some(host) = hosts.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let parsed = parse_toggle_host(
            host.get_attribute("data-detalle-id"),
            host.get_attribute("data-estado"),
            host.text_content(),
        );
        let Some((detalle_id, estado)) = parsed else {
            log::warn!("toggle host without a valid data-detalle-id, skipping");
            continue;
        };
        host.set_inner_html("");
        yew::Renderer::<DetalleToggle>::with_root_and_props(
            host,
            DetalleToggleProps { detalle_id, estado },
        )
        .render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_split_island() {
        let data: SplitData = parse_data_island(
            SPLIT_DATA,
            r#"{"mode": "integer", "participants": [
                {"id": 1, "name": "Ana"},
                {"id": 2, "name": "Beto", "monto": 500, "estado": "Pagado"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(data.mode, Some(AmountMode::Integer));
        assert_eq!(data.total, None);
        assert_eq!(data.participants.len(), 2);
        assert_eq!(data.participants[1].estado, Estado::Pagado);
        assert_eq!(data.participants[0].estado, Estado::Debe);
    }

    #[test]
    fn broken_island_names_its_id() {
        let err = parse_data_island::<SplitData>(SPLIT_DATA, "{not json").unwrap_err();
        assert!(err.to_string().starts_with("data island #splitData is not valid JSON"));
    }

    #[test]
    fn toggle_host_attributes() {
        assert_eq!(
            parse_toggle_host(Some("12".into()), Some("Pagado".into()), None),
            Some((12, Estado::Pagado))
        );
        assert_eq!(
            parse_toggle_host(Some("12".into()), None, Some("\n  Pagado ".into())),
            Some((12, Estado::Pagado))
        );
        assert_eq!(
            parse_toggle_host(Some("5".into()), Some("??".into()), None),
            Some((5, Estado::Debe))
        );
        assert_eq!(parse_toggle_host(Some("x".into()), None, None), None);
        assert_eq!(parse_toggle_host(None, None, None), None);
    }
}
