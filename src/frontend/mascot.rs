//! Browser side of the mascot: owns the three.js stage, the
//! `requestAnimationFrame` loop and every listener that feeds it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Element, HtmlCanvasElement, MouseEvent, PointerEvent};
use yew::prelude::*;

use super::dom::{
    device_pixel_ratio, document, document_hidden, now_ms, prefers_reduced_motion,
    viewport_size, IntersectionWatch,
};
use super::three::{load_three, MascotStage};
use crate::mascot::frame::{
    idle_motion, normalized_device_coords, FrameGate, LoopCommand, PointerFollow, RunPolicy,
    ScrollQuality, Viewport,
};
use crate::mascot::scene::MascotBlueprint;
use crate::mascot::{MascotDirector, MascotInbox, MascotPose, MascotRequest};

const IN_VIEW_THRESHOLDS: [f64; 2] = [0.0, 0.15];

type FrameCallback = Closure<dyn FnMut(f64)>;

/// A `requestAnimationFrame` loop that can be stopped and restarted.
struct FrameLoop {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    request_id: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn new(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let request_id = Rc::new(Cell::new(None));

        let next_callback = Rc::downgrade(&callback);
        let next_request = request_id.clone();
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            next_request.set(None);
            on_frame(timestamp);

            let Some(callback) = next_callback.upgrade() else {
                return;
            };
            let callback = callback.borrow();
            if let (Some(win), Some(callback)) = (window(), callback.as_ref()) {
                if let Ok(id) = win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    next_request.set(Some(id));
                }
            }
        }));

        Self {
            callback,
            request_id,
        }
    }

    fn is_running(&self) -> bool {
        self.request_id.get().is_some()
    }

    fn start(&self) {
        if self.is_running() {
            return;
        }
        let callback = self.callback.borrow();
        if let (Some(win), Some(callback)) = (window(), callback.as_ref()) {
            if let Ok(id) = win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                self.request_id.set(Some(id));
            }
        }
    }

    fn stop(&self) {
        if let (Some(id), Some(win)) = (self.request_id.take(), window()) {
            let _ = win.cancel_animation_frame(id);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        self.callback.borrow_mut().take();
    }
}

struct MascotRuntime {
    stage: MascotStage,
    director: MascotDirector,
    gate: FrameGate,
    pointer: PointerFollow,
    quality: ScrollQuality,
    started_at: f64,
    reduced_motion: bool,
}

impl MascotRuntime {
    fn frame(&mut self, now: f64, inbox: &MascotInbox) {
        if !self.gate.admit(now) {
            return;
        }

        if let Some(request) = inbox.take() {
            self.director.submit(request, now);
        }
        self.director.tick(now);
        if let Some(ratio) = self.quality.settle(now) {
            self.stage.set_pixel_ratio(ratio);
        }

        let pointer = self.pointer.step();
        let motion = idle_motion((now - self.started_at) / 1_000.0, pointer, self.reduced_motion);
        let pose = MascotPose::compose(motion, self.director.joints(now));
        self.stage.apply(&pose);
        self.stage.render();
    }
}

struct Shared {
    runtime: RefCell<Option<MascotRuntime>>,
    policy: Cell<RunPolicy>,
    alive: Cell<bool>,
}

impl Shared {
    fn with_runtime(&self, f: impl FnOnce(&mut MascotRuntime)) {
        if let Some(runtime) = self.runtime.borrow_mut().as_mut() {
            f(runtime);
        }
    }

    fn update_policy(&self, change: impl FnOnce(&mut RunPolicy) -> LoopCommand) -> LoopCommand {
        let mut policy = self.policy.get();
        let command = change(&mut policy);
        self.policy.set(policy);
        command
    }
}

fn apply_command(shared: &Shared, frame_loop: &FrameLoop, command: LoopCommand) {
    match command {
        LoopCommand::Start => {
            let mut ready = false;
            shared.with_runtime(|runtime| {
                runtime.gate.reset();
                ready = true;
            });
            if ready {
                log::debug!("mascot loop resumed");
                frame_loop.start();
            }
        }
        LoopCommand::Stop => {
            log::debug!("mascot loop paused");
            frame_loop.stop();
        }
        LoopCommand::Keep => {}
    }
}

fn canvas_viewport(canvas: &HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Everything the mascot holds on to while mounted. Dropping it stops the
/// loop, detaches listeners and disposes GPU resources.
struct MascotSession {
    shared: Rc<Shared>,
    frame_loop: Rc<FrameLoop>,
    listeners: Vec<EventListener>,
    visibility: Option<IntersectionWatch>,
}

impl MascotSession {
    fn start(canvas: HtmlCanvasElement, inbox: MascotInbox) -> Self {
        let shared = Rc::new(Shared {
            runtime: RefCell::new(None),
            policy: Cell::new(RunPolicy::new(!document_hidden())),
            alive: Cell::new(true),
        });

        let frame_loop = Rc::new(FrameLoop::new({
            let shared = shared.clone();
            let inbox = inbox.clone();
            move |now| shared.with_runtime(|runtime| runtime.frame(now, &inbox))
        }));

        let mut listeners = Vec::new();

        if let Some(win) = window() {
            listeners.push(EventListener::new(&win, "pointermove", {
                let shared = shared.clone();
                move |event| {
                    let Some(event) = event.dyn_ref::<PointerEvent>() else {
                        return;
                    };
                    let (width, height) = viewport_size();
                    let viewport = Viewport {
                        left: 0.0,
                        top: 0.0,
                        width,
                        height,
                    };
                    if let Some((x, y)) = normalized_device_coords(
                        f64::from(event.client_x()),
                        f64::from(event.client_y()),
                        viewport,
                    ) {
                        shared.with_runtime(|runtime| runtime.pointer.aim(x, y));
                    }
                }
            }));

            listeners.push(EventListener::new(&win, "scroll", {
                let shared = shared.clone();
                move |_| {
                    shared.with_runtime(|runtime| {
                        if let Some(ratio) = runtime.quality.on_scroll(now_ms()) {
                            runtime.stage.set_pixel_ratio(ratio);
                        }
                    });
                }
            }));

            listeners.push(EventListener::new(&win, "resize", {
                let shared = shared.clone();
                let canvas = canvas.clone();
                move |_| shared.with_runtime(|runtime| runtime.stage.resize(&canvas))
            }));
        }

        if let Some(document) = document() {
            listeners.push(EventListener::new(&document, "visibilitychange", {
                let shared = shared.clone();
                let frame_loop = frame_loop.clone();
                move |_| {
                    let visible = !document_hidden();
                    let command = shared.update_policy(|policy| policy.set_tab_visible(visible));
                    apply_command(&shared, &frame_loop, command);
                }
            }));
        }

        listeners.push(EventListener::new(&canvas, "click", {
            let shared = shared.clone();
            let canvas = canvas.clone();
            move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(ndc) = normalized_device_coords(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    canvas_viewport(&canvas),
                ) else {
                    return;
                };

                let mut hit = false;
                shared.with_runtime(|runtime| hit = runtime.stage.hits_chest(ndc));
                if hit {
                    log::debug!("mascot chest clicked");
                    inbox.send(MascotRequest::Greet);
                }
            }
        }));

        let watched: Element = canvas
            .closest("section")
            .ok()
            .flatten()
            .unwrap_or_else(|| canvas.clone().into());
        let visibility = IntersectionWatch::new(&[watched], &IN_VIEW_THRESHOLDS, {
            let shared = shared.clone();
            let frame_loop = frame_loop.clone();
            move |entries| {
                let Some(entry) = entries.last() else {
                    return;
                };
                let in_view = entry.is_intersecting();
                let command = shared.update_policy(|policy| policy.set_in_view(in_view));
                apply_command(&shared, &frame_loop, command);
            }
        });
        let visibility = match visibility {
            Ok(watch) => Some(watch),
            Err(error) => {
                log::warn!("mascot visibility tracking unavailable: {error:?}");
                None
            }
        };

        spawn_local(mount_stage(canvas, shared.clone(), frame_loop.clone()));

        Self {
            shared,
            frame_loop,
            listeners,
            visibility,
        }
    }
}

async fn mount_stage(canvas: HtmlCanvasElement, shared: Rc<Shared>, frame_loop: Rc<FrameLoop>) {
    if let Err(error) = load_three().await {
        log::warn!("3D library unavailable, mascot disabled: {error:?}");
        return;
    }
    if !shared.alive.get() {
        return;
    }

    let blueprint = MascotBlueprint::humanoid();
    let quality = ScrollQuality::new(device_pixel_ratio());
    let stage = match MascotStage::build(&canvas, &blueprint, quality.default_ratio()) {
        Ok(stage) => stage,
        Err(error) => {
            log::warn!("mascot scene setup failed: {error:?}");
            return;
        }
    };

    *shared.runtime.borrow_mut() = Some(MascotRuntime {
        stage,
        director: MascotDirector::new(blueprint.rest_joints()),
        gate: FrameGate::default(),
        pointer: PointerFollow::default(),
        quality,
        started_at: now_ms(),
        reduced_motion: prefers_reduced_motion(),
    });
    log::info!("mascot ready with {} nodes", blueprint.nodes().len());

    if shared.policy.get().should_run() {
        frame_loop.start();
    }
}

impl Drop for MascotSession {
    fn drop(&mut self) {
        self.shared.alive.set(false);
        self.listeners.clear();
        self.visibility.take();
        self.frame_loop.stop();
        self.shared.runtime.borrow_mut().take();
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct MascotCanvasProps {
    pub inbox: MascotInbox,
}

#[function_component(MascotCanvas)]
pub(super) fn mascot_canvas(props: &MascotCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let inbox = props.inbox.clone();
        use_effect_with((), move |_| {
            let session = canvas_ref
                .cast::<HtmlCanvasElement>()
                .map(|canvas| MascotSession::start(canvas, inbox));
            move || drop(session)
        });
    }

    html! {
        <div class="mascot-stage">
            <canvas
                ref={canvas_ref}
                class="mascot-canvas"
                role="img"
                aria-label="Animated robot mascot. Click its chest to say hello."
            />
        </div>
    }
}
