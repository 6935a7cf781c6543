use rust_decimal::Decimal;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::money::{format_amount, AmountMode};
use crate::participant::{Participant, ParticipantSeed};
use crate::settings::{load_settings, save_settings};
use crate::split::{split_equal, split_selected, summarize};

/// Edits a single row of the form can receive.
#[derive(Clone, Debug, PartialEq)]
pub enum RowEdit {
    Share(String),
    Paid(String),
    ToggleEstado,
    Selected(bool),
    PaysAll(bool),
}

impl RowEdit {
    pub fn apply(self, participant: &mut Participant, mode: AmountMode) {
        match self {
            RowEdit::Share(text) => participant.set_share_text(text, mode),
            RowEdit::Paid(text) => participant.set_paid_text(text, mode),
            RowEdit::ToggleEstado => participant.toggle_estado(mode),
            RowEdit::Selected(selected) => participant.selected = selected,
            RowEdit::PaysAll(pays_all) => participant.pays_all = pays_all,
        }
    }
}

fn owed_class(owed: Decimal) -> &'static str {
    if owed > Decimal::ZERO {
        "text-danger"
    } else if owed < Decimal::ZERO {
        "text-warning"
    } else {
        "text-success"
    }
}

fn parse_mode(value: &str) -> AmountMode {
    match value {
        "integer" => AmountMode::Integer,
        _ => AmountMode::Decimal,
    }
}

#[derive(Properties, PartialEq)]
pub struct SplitFormProps {
    pub participants: Vec<ParticipantSeed>,
    pub mode: AmountMode,
    #[prop_or_default]
    pub initial_total: String,
}

/// Per-person split of a movement. Input names match what the movement form
/// posts (`monto_{id}`, `abonado_{id}`, `estado_{id}`, `pago_{id}`).
#[function_component(SplitForm)]
pub fn split_form(props: &SplitFormProps) -> Html {
    let mode = use_state(|| props.mode);
    let total = use_state(|| props.initial_total.clone());
    let participants = {
        let seeds = props.participants.clone();
        let mode = props.mode;
        use_state(move || {
            seeds
                .into_iter()
                .map(|seed| Participant::from_seed(seed, mode))
                .collect::<Vec<_>>()
        })
    };

    let update = {
        let participants = participants.clone();
        let mode = mode.clone();
        Callback::from(move |(idx, edit): (usize, RowEdit)| {
            let mut next = (*participants).clone();
            if let Some(p) = next.get_mut(idx) {
                edit.apply(p, *mode);
                participants.set(next);
            }
        })
    };

    let on_total = {
        let total = total.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            total.set(input.value());
        })
    };

    let on_mode = {
        let mode = mode.clone();
        let participants = participants.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let next_mode = parse_mode(&select.value());
            let mut next = (*participants).clone();
            for p in next.iter_mut() {
                p.change_mode(next_mode);
            }
            participants.set(next);
            mode.set(next_mode);

            let mut settings = load_settings();
            settings.amount_mode = next_mode;
            save_settings(&settings);
        })
    };

    let on_split_equal = {
        let participants = participants.clone();
        let total = total.clone();
        let mode = mode.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*participants).clone();
            if split_equal(&total, &mut next, *mode) {
                participants.set(next);
            }
        })
    };

    let on_split_selected = {
        let participants = participants.clone();
        let total = total.clone();
        let mode = mode.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*participants).clone();
            if split_selected(&total, &mut next, *mode) {
                participants.set(next);
            }
        })
    };

    let current_mode = *mode;
    let summary = summarize(&total, &participants);

    html! {
        <div class="split-form">
            <div class="row g-2 align-items-end mb-3">
                <div class="col-md-4">
                    <label class="form-label" for="montoTotal">{"Monto total"}</label>
                    <input id="montoTotal" name="monto" type="text" inputmode="decimal" class="form-control"
                        value={(*total).clone()} oninput={on_total} />
                </div>
                <div class="col-md-2">
                    <select class="form-select" onchange={on_mode}>
                        <option value="decimal" selected={current_mode == AmountMode::Decimal}>{"Con decimales"}</option>
                        <option value="integer" selected={current_mode == AmountMode::Integer}>{"Enteros"}</option>
                    </select>
                </div>
                <div class="col-md-6 d-flex gap-2">
                    <button type="button" class="btn btn-outline-primary" onclick={on_split_equal}>{"Dividir igual"}</button>
                    <button type="button" class="btn btn-outline-primary" onclick={on_split_selected}>{"Dividir entre seleccionados"}</button>
                </div>
            </div>

            <table class="table table-sm align-middle">
                <thead>
                    <tr>
                        <th></th>
                        <th>{"Persona"}</th>
                        <th>{"Monto"}</th>
                        <th>{"Abonado"}</th>
                        <th>{"Falta"}</th>
                        <th>{"Estado"}</th>
                        <th>{"Paga todo"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for participants.iter().enumerate().map(|(idx, p)| {
                        let on_select = {
                            let update = update.clone();
                            Callback::from(move |e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                update.emit((idx, RowEdit::Selected(input.checked())));
                            })
                        };
                        let on_share = {
                            let update = update.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                update.emit((idx, RowEdit::Share(input.value())));
                            })
                        };
                        let on_paid = {
                            let update = update.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                update.emit((idx, RowEdit::Paid(input.value())));
                            })
                        };
                        let on_estado = {
                            let update = update.clone();
                            Callback::from(move |_: MouseEvent| update.emit((idx, RowEdit::ToggleEstado)))
                        };
                        let on_pays_all = {
                            let update = update.clone();
                            Callback::from(move |e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                update.emit((idx, RowEdit::PaysAll(input.checked())));
                            })
                        };

                        html! {
                            <tr key={p.id}>
                                <td><input type="checkbox" class="form-check-input" checked={p.selected} onchange={on_select} /></td>
                                <td>{ p.name.clone() }</td>
                                <td>
                                    <input type="text" inputmode="decimal" class="form-control form-control-sm"
                                        name={format!("monto_{}", p.id)} value={p.share_text.clone()} oninput={on_share} />
                                </td>
                                <td>
                                    <input type="text" inputmode="decimal" class="form-control form-control-sm"
                                        name={format!("abonado_{}", p.id)} value={p.paid_text.clone()} oninput={on_paid} />
                                </td>
                                <td class={owed_class(p.owed)}>{ p.owed_text(current_mode) }</td>
                                <td>
                                    <input type="hidden" name={format!("estado_{}", p.id)} value={p.estado.label()} />
                                    <button type="button" class={classes!("btn", "btn-sm", p.estado.button_class())} onclick={on_estado}>
                                        { p.estado.label() }
                                    </button>
                                </td>
                                <td>
                                    <input type="checkbox" class="form-check-input" name={format!("pago_{}", p.id)} value="1"
                                        checked={p.pays_all} onchange={on_pays_all} />
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
                <tfoot>
                    <tr class="fw-bold">
                        <td></td>
                        <td>{"Total"}</td>
                        <td>{ format_amount(summary.assigned, current_mode) }</td>
                        <td>{ format_amount(summary.paid, current_mode) }</td>
                        <td>{ format_amount(summary.owed, current_mode) }</td>
                        <td colspan="2">
                            {
                                if summary.unassigned.is_zero() {
                                    html! {}
                                } else {
                                    html! {
                                        <span class="text-warning">
                                            { format!("Sin asignar: {}", format_amount(summary.unassigned, current_mode)) }
                                        </span>
                                    }
                                }
                            }
                        </td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}
