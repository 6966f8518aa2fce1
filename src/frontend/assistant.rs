use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::dom::scroll_to_section;
use crate::assistant::{AssistantAction, AssistantState, SHORTCUTS, TOAST_DURATION_MS};
use crate::mascot::{MascotInbox, MascotRequest};
use crate::sections::SectionId;

pub enum AssistantCommand {
    Toggle,
    ShowToast(&'static str),
    DismissToast(u32),
}

impl Reducible for AssistantState {
    type Action = AssistantCommand;

    fn reduce(self: Rc<Self>, command: AssistantCommand) -> Rc<Self> {
        let mut next = *self;
        match command {
            AssistantCommand::Toggle => next.toggle(),
            AssistantCommand::ShowToast(message) => {
                next.show_toast(message);
            }
            AssistantCommand::DismissToast(id) => next.dismiss_toast(id),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct AssistantOverlayProps {
    pub active: Option<SectionId>,
    pub inbox: MascotInbox,
    pub on_open_calendar: Callback<()>,
}

#[function_component(AssistantOverlay)]
pub(super) fn assistant_overlay(props: &AssistantOverlayProps) -> Html {
    let state = use_reducer_eq(AssistantState::default);
    let toast_id = state.toast.map(|toast| toast.id);

    {
        let dispatcher = state.dispatcher();
        use_effect_with(toast_id, move |toast_id| {
            let timeout = toast_id.map(|id| {
                Timeout::new(TOAST_DURATION_MS, move || {
                    dispatcher.dispatch(AssistantCommand::DismissToast(id))
                })
            });
            move || drop(timeout)
        });
    }

    let on_toggle = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(AssistantCommand::Toggle))
    };

    let run_action = {
        let active = props.active;
        let inbox = props.inbox.clone();
        let on_open_calendar = props.on_open_calendar.clone();
        let dispatcher = state.dispatcher();
        Callback::from(move |action: AssistantAction| {
            if let Some(section) = action.target_section(active) {
                scroll_to_section(section);
            }
            match action {
                AssistantAction::OpenCalendar => on_open_calendar.emit(()),
                AssistantAction::Emote(kind) => {
                    inbox.send(MascotRequest::Emote(kind));
                    dispatcher.dispatch(AssistantCommand::ShowToast(kind.toast()));
                }
                AssistantAction::Jump(_) | AssistantAction::NextSection => {}
            }
        })
    };

    let shortcuts = SHORTCUTS.iter().copied().map(|action| {
        let run_action = run_action.clone();
        html! {
            <li>
                <button
                    class="assistant-chip"
                    type="button"
                    onclick={Callback::from(move |_: MouseEvent| run_action.emit(action))}
                >
                    {action.label()}
                </button>
            </li>
        }
    });

    html! {
        <aside class={classes!("assistant", state.open.then_some("is-open"))} aria-label="Assistant">
            if let Some(toast) = state.toast {
                <p class="assistant-toast" role="status">{toast.message}</p>
            }
            if state.open {
                <div class="assistant-panel">
                    <p class="assistant-status">{AssistantState::status_line(props.active)}</p>
                    <ul class="assistant-shortcuts">{ for shortcuts }</ul>
                </div>
            }
            <button
                class="assistant-toggle"
                type="button"
                aria-expanded={state.open.to_string()}
                aria-label={if state.open { "Close assistant" } else { "Open assistant" }}
                onclick={on_toggle}
            >
                {if state.open { "×" } else { "💬" }}
            </button>
        </aside>
    }
}
