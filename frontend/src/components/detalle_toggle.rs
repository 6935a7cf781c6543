use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::participant::Estado;

/// State to write once a toggle request settles. A failure writes nothing,
/// so whatever the button shows by then stays as it is.
pub fn settle_toggle(detalle_id: u32, result: Result<Estado, ApiError>) -> Option<Estado> {
    match result {
        Ok(estado) => Some(estado),
        Err(err) => {
            log::error!("toggle of detalle {} failed: {}", detalle_id, err);
            None
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct DetalleToggleProps {
    pub detalle_id: u32,
    pub estado: Estado,
}

/// Pagado/Debe button backed by `POST /api/detalle/{id}/toggle`.
#[function_component(DetalleToggle)]
pub fn detalle_toggle(props: &DetalleToggleProps) -> Html {
    let estado = use_state(|| props.estado);

    let onclick = {
        let estado = estado.clone();
        let detalle_id = props.detalle_id;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let estado = estado.clone();
            spawn_local(async move {
                let result = api::toggle_detalle(detalle_id).await;
                // last successful response wins when clicks overlap
                if let Some(next) = settle_toggle(detalle_id, result) {
                    estado.set(next);
                }
            });
        })
    };

    html! {
        <button type="button" class={classes!("btn", "btn-sm", estado.button_class())} {onclick}>
            { estado.label() }
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_takes_server_state() {
        let next = settle_toggle(3, Ok(Estado::Pagado)).unwrap();
        assert_eq!(next, Estado::Pagado);
        assert_eq!(next.label(), "Pagado");
        assert_eq!(next.button_class(), "btn-success");
        assert_ne!(next.button_class(), "btn-outline-secondary");
    }

    #[test]
    fn failure_writes_no_state() {
        let err = ApiError::Status {
            url: "/api/detalle/3/toggle".to_string(),
            status: 404,
        };
        assert_eq!(settle_toggle(3, Err(err)), None);
    }

    #[test]
    fn failed_click_after_a_successful_one_keeps_pagado() {
        // both clicks were issued while the button showed Debe
        let mut shown = Estado::Debe;
        let responses = vec![
            Ok(Estado::Pagado),
            Err(ApiError::Status {
                url: "/api/detalle/3/toggle".to_string(),
                status: 500,
            }),
        ];
        for result in responses {
            if let Some(next) = settle_toggle(3, result) {
                shown = next;
            }
        }
        assert_eq!(shown, Estado::Pagado);
    }
}
