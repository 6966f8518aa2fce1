mod assistant;
mod dom;
mod hero;
mod mascot;
mod modals;
mod nav;
mod orbit;
mod sections;
mod three;

use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::content::OWNER_NAME;
use crate::mascot::MascotInbox;
use crate::sections::{ActiveSectionTracker, SectionId};
use assistant::AssistantOverlay;
use dom::{document, IntersectionWatch};
use hero::{Hero, LoadingScreen};
use modals::{CalendarModal, ProjectModal};
use nav::NavBar;
use orbit::ProjectsSection;
use sections::{AboutSection, ExperienceSection, PublicationsSection, SkillsSection};

const SECTION_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

fn watch_sections(on_active: Callback<Option<SectionId>>) -> Option<IntersectionWatch> {
    let document = document()?;
    let targets: Vec<_> = SectionId::ORDER
        .iter()
        .filter_map(|section| document.get_element_by_id(section.anchor()))
        .collect();

    let tracker = Rc::new(RefCell::new(ActiveSectionTracker::default()));
    let watch = IntersectionWatch::new(&targets, &SECTION_THRESHOLDS, move |entries| {
        let mut tracker = tracker.borrow_mut();
        for entry in entries {
            if let Some(section) = SectionId::from_anchor(&entry.target().id()) {
                tracker.observe(section, entry.is_intersecting(), entry.intersection_ratio());
            }
        }
        on_active.emit(tracker.active());
    });

    match watch {
        Ok(watch) => Some(watch),
        Err(error) => {
            log::warn!("section tracking unavailable: {error:?}");
            None
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let active_section = use_state_eq(|| None::<SectionId>);
    let selected_project = use_state_eq(|| None::<usize>);
    let calendar_open = use_state_eq(|| false);
    let inbox = use_memo((), |_| MascotInbox::default());

    {
        let active_section = active_section.clone();
        use_effect_with((), move |_| {
            let watch = watch_sections(Callback::from(move |section| active_section.set(section)));
            move || drop(watch)
        });
    }

    let on_open_calendar = {
        let calendar_open = calendar_open.clone();
        Callback::from(move |_| calendar_open.set(true))
    };

    let on_close_calendar = {
        let calendar_open = calendar_open.clone();
        Callback::from(move |_| calendar_open.set(false))
    };

    let on_select_project = {
        let selected_project = selected_project.clone();
        Callback::from(move |index: usize| selected_project.set(Some(index)))
    };

    let on_close_project = {
        let selected_project = selected_project.clone();
        Callback::from(move |_| selected_project.set(None))
    };

    html! {
        <>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <LoadingScreen />
            <NavBar active={*active_section} on_book={on_open_calendar.clone()} />

            <main id="content">
                <Hero inbox={(*inbox).clone()} on_book={on_open_calendar.clone()} />
                <AboutSection />
                <ExperienceSection />
                <ProjectsSection on_select={on_select_project} />
                <PublicationsSection />
                <SkillsSection />
            </main>

            <footer class="site-footer">
                <p class="muted">{format!("© {OWNER_NAME}. Built with Rust and WebAssembly.")}</p>
            </footer>

            <AssistantOverlay
                active={*active_section}
                inbox={(*inbox).clone()}
                on_open_calendar={on_open_calendar}
            />
            <ProjectModal project={*selected_project} on_close={on_close_project} />
            <CalendarModal open={*calendar_open} on_close={on_close_calendar} />
        </>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    let Some(root) = document().and_then(|d| d.get_element_by_id("app")) else {
        log::error!("missing #app mount point");
        return;
    };
    yew::Renderer::<App>::with_root(root).render();
}
