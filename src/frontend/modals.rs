use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::dom::document;
use super::sections::ExternalLink;
use crate::content::{CALENDAR_URL, PROJECTS};

#[derive(Properties, PartialEq)]
struct ModalFrameProps {
    label: AttrValue,
    #[prop_or_default]
    class: Classes,
    on_close: Callback<()>,
    children: Html,
}

#[function_component(ModalFrame)]
fn modal_frame(props: &ModalFrameProps) -> Html {
    {
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            let listener = document().map(|document| {
                EventListener::new(&document, "keydown", move |event| {
                    let is_escape = event
                        .dyn_ref::<KeyboardEvent>()
                        .map(|event| event.key() == "Escape")
                        .unwrap_or(false);
                    if is_escape {
                        on_close.emit(());
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |event: MouseEvent| {
            if event.target() == event.current_target() {
                on_close.emit(());
            }
        })
    };

    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop}>
            <div
                class={classes!("modal", props.class.clone())}
                role="dialog"
                aria-modal="true"
                aria-label={props.label.clone()}
            >
                <button class="modal-close" type="button" aria-label="Close" onclick={on_close_button}>
                    {"×"}
                </button>
                { props.children.clone() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct ProjectModalProps {
    pub project: Option<usize>,
    pub on_close: Callback<()>,
}

#[function_component(ProjectModal)]
pub(super) fn project_modal(props: &ProjectModalProps) -> Html {
    let Some(project) = props.project.and_then(|index| PROJECTS.get(index)) else {
        return html! {};
    };

    html! {
        <ModalFrame label={project.title} on_close={props.on_close.clone()}>
            <h3 class="modal-title">{project.title}</h3>
            <p>{project.description}</p>
            <ul class="tag-list">
                { for project.tags.iter().map(|tag| html! { <li class="tag">{*tag}</li> }) }
            </ul>
        </ModalFrame>
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct CalendarModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
}

#[function_component(CalendarModal)]
pub(super) fn calendar_modal(props: &CalendarModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    html! {
        <ModalFrame label="Book a chat" class="modal-wide" on_close={props.on_close.clone()}>
            <h3 class="modal-title">{"Book a chat"}</h3>
            <iframe
                class="calendar-frame"
                src={CALENDAR_URL}
                title="Booking calendar"
                loading="lazy"
            />
            <p class="muted">
                {"Calendar not loading? "}
                <ExternalLink href={CALENDAR_URL} label="Open the booking page" />
            </p>
        </ModalFrame>
    }
}
