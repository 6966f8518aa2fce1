use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::sections::SectionId;

pub(crate) fn document() -> Option<Document> {
    window()?.document()
}

pub(crate) fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

pub(crate) fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub(crate) fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub(crate) fn device_pixel_ratio() -> f64 {
    window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

pub(crate) fn document_hidden() -> bool {
    document().map(|d| d.hidden()).unwrap_or(false)
}

pub(crate) fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub(crate) fn scroll_to_section(section: SectionId) {
    let Some(element) = document().and_then(|d| d.get_element_by_id(section.anchor())) else {
        log::debug!("missing section anchor #{}", section.anchor());
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(if prefers_reduced_motion() {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    });
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub(crate) struct IntersectionWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl IntersectionWatch {
    pub(crate) fn new(
        targets: &[Element],
        thresholds: &[f64],
        mut on_entries: impl FnMut(Vec<IntersectionObserverEntry>) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .collect();
                on_entries(entries);
            },
        );

        let threshold: Array = thresholds.iter().map(|value| JsValue::from_f64(*value)).collect();
        let options = IntersectionObserverInit::new();
        options.set_threshold(&threshold);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for target in targets {
            observer.observe(target);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for IntersectionWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
