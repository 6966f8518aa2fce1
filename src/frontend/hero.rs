use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;

use super::dom::{prefers_reduced_motion, scroll_to_section};
use super::mascot::MascotCanvas;
use crate::content::{GREETING, HEADLINE, OWNER_NAME};
use crate::loading::{LoadingProgress, LOADING_TICK_MS};
use crate::mascot::MascotInbox;
use crate::sections::SectionId;
use crate::typewriter::{CursorBlink, Typewriter, CURSOR_BLINK_MS, REVEAL_INTERVAL_MS};

impl Reducible for LoadingProgress {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        let mut next = *self;
        next.tick();
        Rc::new(next)
    }
}

impl Reducible for Typewriter {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        if self.is_finished() {
            return self;
        }
        let mut next = (*self).clone();
        next.tick();
        Rc::new(next)
    }
}

impl Reducible for CursorBlink {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        let mut next = *self;
        next.toggle();
        Rc::new(next)
    }
}

#[function_component(LoadingScreen)]
pub(super) fn loading_screen() -> Html {
    let progress = use_reducer_eq(LoadingProgress::default);

    {
        let dispatcher = progress.dispatcher();
        use_effect_with(progress.is_visible(), move |visible| {
            let interval = visible.then(|| {
                Interval::new(LOADING_TICK_MS, move || dispatcher.dispatch(()))
            });
            move || drop(interval)
        });
    }

    if !progress.is_visible() {
        return html! {};
    }

    let width = format!("width: {}%;", progress.value());
    html! {
        <div class="loading-screen" role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow={progress.value().to_string()}>
            <p class="loading-name">{OWNER_NAME}</p>
            <div class="loading-track">
                <div class="loading-fill" style={width}></div>
            </div>
            <p class="loading-value">{format!("{}%", progress.value())}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TypewriterProps {
    text: &'static str,
}

#[function_component(TypewriterLine)]
fn typewriter_line(props: &TypewriterProps) -> Html {
    let text = props.text;
    let typewriter = use_reducer_eq(move || {
        if prefers_reduced_motion() {
            Typewriter::completed(text)
        } else {
            Typewriter::new(text)
        }
    });
    let cursor = use_reducer_eq(CursorBlink::default);

    {
        let dispatcher = typewriter.dispatcher();
        use_effect_with(typewriter.is_finished(), move |finished| {
            let interval = (!finished).then(|| {
                Interval::new(REVEAL_INTERVAL_MS, move || dispatcher.dispatch(()))
            });
            move || drop(interval)
        });
    }

    {
        let dispatcher = cursor.dispatcher();
        use_effect_with((), move |_| {
            let interval = Interval::new(CURSOR_BLINK_MS, move || dispatcher.dispatch(()));
            move || drop(interval)
        });
    }

    html! {
        <p class="typewriter" aria-label={typewriter.full_text()}>
            <span aria-hidden="true">{typewriter.visible()}</span>
            <span
                class={classes!("typewriter-cursor", (!cursor.is_visible()).then_some("is-off"))}
                aria-hidden="true"
            >
                {"_"}
            </span>
        </p>
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct HeroProps {
    pub inbox: MascotInbox,
    pub on_book: Callback<()>,
}

#[function_component(Hero)]
pub(super) fn hero(props: &HeroProps) -> Html {
    let on_projects = Callback::from(|_: MouseEvent| scroll_to_section(SectionId::Projects));
    let on_book = {
        let on_book = props.on_book.clone();
        Callback::from(move |_: MouseEvent| on_book.emit(()))
    };

    html! {
        <section id={SectionId::Hero.anchor()} class="hero" aria-labelledby="hero-heading">
            <div class="hero-copy">
                <TypewriterLine text={GREETING} />
                <h1 id="hero-heading">{OWNER_NAME}</h1>
                <p class="hero-headline">{HEADLINE}</p>
                <div class="hero-actions">
                    <button class="button primary" type="button" onclick={on_projects}>
                        {"See projects"}
                    </button>
                    <button class="button" type="button" onclick={on_book}>
                        {"Book a chat"}
                    </button>
                </div>
                <p class="hint muted">{"Psst: try clicking the robot's chest."}</p>
            </div>
            <MascotCanvas inbox={props.inbox.clone()} />
        </section>
    }
}
