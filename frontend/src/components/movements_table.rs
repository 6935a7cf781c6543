use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use crate::api;

const PAGE_LINK_SELECTOR: &str = ".pagination a, a[data-ajax-page]";

/// What a click inside the table region means.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickAction {
    Paginate(String),
    Ignore,
}

/// Decides what to do with a click on a pagination link with the given
/// `href`. Placeholder links are left to the browser.
pub fn classify_link(href: Option<String>) -> ClickAction {
    match href {
        Some(href) => {
            let href = href.trim();
            if href.is_empty() || href == "#" || href.starts_with("javascript:") {
                ClickAction::Ignore
            } else {
                ClickAction::Paginate(href.to_string())
            }
        }
        None => ClickAction::Ignore,
    }
}

fn classify_click(target: &Element) -> ClickAction {
    match target.closest(PAGE_LINK_SELECTOR) {
        Ok(Some(link)) => classify_link(link.get_attribute("href")),
        _ => ClickAction::Ignore,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentState {
    pub html: String,
    pending: usize,
}

impl FragmentState {
    pub fn new(html: String) -> Self {
        FragmentState { html, pending: 0 }
    }

    pub fn loading(&self) -> bool {
        self.pending > 0
    }
}

pub enum FragmentAction {
    Started,
    Loaded(String),
    Failed,
}

impl Reducible for FragmentState {
    type Action = FragmentAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FragmentAction::Started => next.pending += 1,
            FragmentAction::Loaded(html) => {
                next.pending = next.pending.saturating_sub(1);
                next.html = html;
            }
            FragmentAction::Failed => next.pending = next.pending.saturating_sub(1),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct MovementsTableProps {
    /// Markup the server rendered into the host element.
    #[prop_or_default]
    pub initial_html: String,
    /// Loaded on mount when set.
    #[prop_or_default]
    pub src: Option<String>,
}

/// Paginated movements table whose pages are swapped in place.
#[function_component(MovementsTable)]
pub fn movements_table(props: &MovementsTableProps) -> Html {
    let state = {
        let initial = props.initial_html.clone();
        use_reducer(move || FragmentState::new(initial))
    };
    let region = use_node_ref();

    let load = {
        let state = state.clone();
        Callback::from(move |url: String| {
            let state = state.clone();
            state.dispatch(FragmentAction::Started);
            spawn_local(async move {
                match api::fetch_fragment(&url).await {
                    Ok(html) => state.dispatch(FragmentAction::Loaded(html)),
                    Err(err) => {
                        log::error!("could not load page {}: {}", url, err);
                        state.dispatch(FragmentAction::Failed);
                    }
                }
            });
        })
    };

    {
        let load = load.clone();
        let src = props.src.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(src) = src {
                    load.emit(src);
                }
                || ()
            },
            (),
        );
    }

    {
        let region = region.clone();
        use_effect_with_deps(
            move |html: &String| {
                if let Some(el) = region.cast::<Element>() {
                    el.set_inner_html(html);
                }
                || ()
            },
            state.html.clone(),
        );
    }

    let onclick = {
        let load = load.clone();
        let state = state.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(target) = e.target_dyn_into::<Element>() else {
                return;
            };
            if let ClickAction::Paginate(url) = classify_click(&target) {
                e.prevent_default();
                if state.loading() {
                    log::debug!("page request already in flight, loading {} anyway", url);
                }
                load.emit(url);
            }
        })
    };

    let loading = state.loading();
    html! {
        <div class="movimientos-table position-relative" {onclick}>
            <div class={classes!("text-center", "my-2", (!loading).then_some("d-none"))} role="status">
                <div class="spinner-border spinner-border-sm text-secondary"></div>
                <span class="ms-2 small text-muted">{"Cargando..."}</span>
            </div>
            <div
                ref={region}
                class={classes!("movimientos-region", loading.then_some("pe-none"), loading.then_some("opacity-50"))}
                aria-busy={if loading { "true" } else { "false" }}
            ></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reduce(state: FragmentState, actions: Vec<FragmentAction>) -> FragmentState {
        let mut state = Rc::new(state);
        for action in actions {
            state = state.reduce(action);
        }
        (*state).clone()
    }

    #[test]
    fn spinner_shows_while_loading() {
        let state = reduce(FragmentState::new("<p>1</p>".into()), vec![FragmentAction::Started]);
        assert!(state.loading());
        assert_eq!(state.html, "<p>1</p>");
    }

    #[test]
    fn success_replaces_content() {
        let state = reduce(
            FragmentState::new("<p>1</p>".into()),
            vec![
                FragmentAction::Started,
                FragmentAction::Loaded("<p>2</p>".into()),
            ],
        );
        assert!(!state.loading());
        assert_eq!(state.html, "<p>2</p>");
    }

    #[test]
    fn failure_restores_controls_and_keeps_content() {
        let state = reduce(
            FragmentState::new("<p>1</p>".into()),
            vec![FragmentAction::Started, FragmentAction::Failed],
        );
        assert!(!state.loading());
        assert_eq!(state.html, "<p>1</p>");
    }

    #[test]
    fn overlapping_loads_keep_spinner_until_last_settles() {
        let state = reduce(
            FragmentState::new(String::new()),
            vec![
                FragmentAction::Started,
                FragmentAction::Started,
                FragmentAction::Loaded("<p>2</p>".into()),
            ],
        );
        assert!(state.loading());
        let state = reduce(state, vec![FragmentAction::Failed]);
        assert!(!state.loading());
        assert_eq!(state.html, "<p>2</p>");
    }

    #[test]
    fn placeholder_links_are_ignored() {
        assert_eq!(classify_link(None), ClickAction::Ignore);
        assert_eq!(classify_link(Some("#".into())), ClickAction::Ignore);
        assert_eq!(classify_link(Some(" ".into())), ClickAction::Ignore);
        assert_eq!(
            classify_link(Some("javascript:void(0)".into())),
            ClickAction::Ignore
        );
        assert_eq!(
            classify_link(Some("/movimientos?page=3".into())),
            ClickAction::Paginate("/movimientos?page=3".into())
        );
    }
}
