use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::window;
use yew::prelude::*;

use super::dom::{scroll_to_section, scroll_y};
use crate::content::OWNER_NAME;
use crate::scroll_nav::ScrollNav;
use crate::sections::SectionId;

impl Reducible for ScrollNav {
    type Action = f64;

    fn reduce(self: Rc<Self>, y: f64) -> Rc<Self> {
        let mut next = *self;
        next.sample(y);
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct NavBarProps {
    pub active: Option<SectionId>,
    pub on_book: Callback<()>,
}

#[function_component(NavBar)]
pub(super) fn nav_bar(props: &NavBarProps) -> Html {
    let nav = use_reducer_eq(ScrollNav::default);

    {
        let dispatcher = nav.dispatcher();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "scroll", move |_| dispatcher.dispatch(scroll_y()))
            });
            move || drop(listener)
        });
    }

    let on_book = {
        let on_book = props.on_book.clone();
        Callback::from(move |_: MouseEvent| on_book.emit(()))
    };

    let links = SectionId::ORDER.iter().copied().skip(1).map(|section| {
        let onclick = Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            scroll_to_section(section);
        });
        let current = props.active == Some(section);

        html! {
            <li>
                <a
                    class={classes!("nav-link", current.then_some("is-active"))}
                    href={format!("#{}", section.anchor())}
                    aria-current={current.then_some("location")}
                    {onclick}
                >
                    {section.label()}
                </a>
            </li>
        }
    });

    html! {
        <header class={classes!("site-nav", (!nav.is_visible()).then_some("is-hidden"))}>
            <a
                class="nav-brand"
                href="#hero"
                onclick={Callback::from(|event: MouseEvent| {
                    event.prevent_default();
                    scroll_to_section(SectionId::Hero);
                })}
            >
                {OWNER_NAME}
            </a>
            <nav aria-label="Sections">
                <ul class="nav-links">{ for links }</ul>
            </nav>
            <button class="button nav-cta" type="button" onclick={on_book}>{"Book a chat"}</button>
        </header>
    }
}
