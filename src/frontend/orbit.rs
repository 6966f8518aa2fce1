use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent, PointerEvent};
use yew::prelude::*;

use super::sections::section_heading;
use crate::carousel::{CarouselKey, OrbitCarousel, Release};
use crate::content::PROJECTS;
use crate::sections::SectionId;

const CONTROL_SELECTOR: &str = "[data-orbit-control]";

pub enum OrbitAction {
    Down { x: f64, on_control: bool },
    Move(f64),
    Up,
    Cancel,
    Leave,
    Key(CarouselKey),
    Snap(usize),
}

impl Reducible for OrbitCarousel {
    type Action = OrbitAction;

    fn reduce(self: Rc<Self>, action: OrbitAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            OrbitAction::Down { x, on_control } => {
                next.pointer_down(x, on_control);
            }
            OrbitAction::Move(x) => next.pointer_move(x),
            OrbitAction::Up => log_release(next.pointer_up()),
            OrbitAction::Cancel => log_release(next.pointer_cancel()),
            OrbitAction::Leave => log_release(next.pointer_leave()),
            OrbitAction::Key(key) => next.key(key),
            OrbitAction::Snap(index) => next.snap_to_index(index as i64),
        }
        Rc::new(next)
    }
}

fn log_release(release: Option<Release>) {
    if let Some(release) = release {
        log::debug!(
            "orbit released on card {} (drag: {})",
            release.index,
            release.was_drag
        );
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn started_on_control(event: &Event) -> bool {
    event_element(event)
        .and_then(|element| element.closest(CONTROL_SELECTOR).ok().flatten())
        .is_some()
}

#[derive(Properties, PartialEq)]
pub(super) struct ProjectsSectionProps {
    pub on_select: Callback<usize>,
}

#[function_component(ProjectsSection)]
pub(super) fn projects_section(props: &ProjectsSectionProps) -> Html {
    let carousel = use_reducer_eq(|| OrbitCarousel::new(PROJECTS.len()));
    let suppress_click = use_mut_ref(|| false);

    let onpointerdown = {
        let carousel = carousel.clone();
        let suppress_click = suppress_click.clone();
        Callback::from(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            *suppress_click.borrow_mut() = false;
            carousel.dispatch(OrbitAction::Down {
                x: f64::from(event.client_x()),
                on_control: started_on_control(&event),
            });
        })
    };

    let onpointermove = {
        let carousel = carousel.clone();
        Callback::from(move |event: PointerEvent| {
            if !carousel.is_dragging() {
                return;
            }
            if carousel.is_drag_gesture() {
                if let Some(stage) = event
                    .current_target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                {
                    let _ = stage.set_pointer_capture(event.pointer_id());
                }
            }
            carousel.dispatch(OrbitAction::Move(f64::from(event.client_x())));
        })
    };

    let release = |cancelled: bool| {
        let carousel = carousel.clone();
        let suppress_click = suppress_click.clone();
        Callback::from(move |_: PointerEvent| {
            if carousel.is_dragging() {
                *suppress_click.borrow_mut() = carousel.is_drag_gesture();
                carousel.dispatch(if cancelled {
                    OrbitAction::Cancel
                } else {
                    OrbitAction::Up
                });
            }
        })
    };
    let onpointerup = release(false);
    let onpointercancel = release(true);
    let onlostpointercapture = release(true);

    let onpointerleave = {
        let carousel = carousel.clone();
        Callback::from(move |_: PointerEvent| {
            if carousel.is_dragging() && !carousel.is_drag_gesture() {
                carousel.dispatch(OrbitAction::Leave);
            }
        })
    };

    let onkeydown = {
        let carousel = carousel.clone();
        Callback::from(move |event: KeyboardEvent| {
            if let Some(key) = CarouselKey::from_key(&event.key()) {
                event.prevent_default();
                carousel.dispatch(OrbitAction::Key(key));
            }
        })
    };

    let on_previous = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.dispatch(OrbitAction::Key(CarouselKey::Previous)))
    };

    let on_next = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.dispatch(OrbitAction::Key(CarouselKey::Next)))
    };

    let front = carousel.index();
    let cards = PROJECTS.iter().enumerate().map(|(index, project)| {
        let visual = carousel.card_visual(index);
        let onclick = {
            let carousel = carousel.clone();
            let suppress_click = suppress_click.clone();
            let on_select = props.on_select.clone();
            Callback::from(move |_: MouseEvent| {
                if suppress_click.replace(false) || carousel.suppresses_click() {
                    return;
                }
                if carousel.index() == index {
                    on_select.emit(index);
                } else {
                    carousel.dispatch(OrbitAction::Snap(index));
                }
            })
        };

        html! {
            <article
                class={classes!("orbit-card", (index == front).then_some("is-front"))}
                style={visual.style()}
                aria-hidden={(index != front).to_string()}
                {onclick}
            >
                <h3>{project.title}</h3>
                <p>{project.description}</p>
                <ul class="tag-list">
                    { for project.tags.iter().map(|tag| html! { <li class="tag">{*tag}</li> }) }
                </ul>
            </article>
        }
    });

    let dots = (0..carousel.count()).map(|index| {
        let onclick = {
            let carousel = carousel.clone();
            Callback::from(move |_: MouseEvent| carousel.dispatch(OrbitAction::Snap(index)))
        };
        html! {
            <button
                class={classes!("orbit-dot", (index == front).then_some("is-active"))}
                type="button"
                data-orbit-control="true"
                aria-label={format!("Show project {}", index + 1)}
                aria-current={(index == front).then_some("true")}
                {onclick}
            />
        }
    });

    let status = PROJECTS
        .get(front)
        .map(|project| format!("Project {} of {}: {}", front + 1, PROJECTS.len(), project.title))
        .unwrap_or_default();

    let section = SectionId::Projects;
    html! {
        <section
            id={section.anchor()}
            class="section-block"
            aria-labelledby={format!("{}-heading", section.anchor())}
        >
            { section_heading(section) }
            <div
                class={classes!("orbit-stage", carousel.is_drag_gesture().then_some("is-dragging"))}
                tabindex="0"
                role="region"
                aria-roledescription="carousel"
                aria-label="Projects"
                {onpointerdown}
                {onpointermove}
                {onpointerup}
                {onpointercancel}
                {onpointerleave}
                {onlostpointercapture}
                {onkeydown}
            >
                <div class="orbit-ring">{ for cards }</div>
                <div class="orbit-controls">
                    <button class="orbit-arrow" type="button" data-orbit-control="true" aria-label="Previous project" onclick={on_previous}>
                        {"←"}
                    </button>
                    <div class="orbit-dots">{ for dots }</div>
                    <button class="orbit-arrow" type="button" data-orbit-control="true" aria-label="Next project" onclick={on_next}>
                        {"→"}
                    </button>
                </div>
            </div>
            <p class="sr-only" aria-live="polite">{status}</p>
        </section>
    }
}
