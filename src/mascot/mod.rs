//! Mascot visual state.
//!
//! One [`MascotDirector`] owns every animated joint and the chest panel. Clicks
//! and assistant shortcuts never touch the scene directly: they post a
//! [`MascotRequest`] into the [`MascotInbox`], and the frame loop hands the
//! pending request to the director before sampling the pose for that frame.
//! The inbox holds one slot: a newer request overwrites an unclaimed one, and
//! an effect that replaces another one inherits the replaced effect's
//! baseline, so the resting pose is what gets restored.

pub mod emote;
pub mod frame;
pub mod scene;

use std::cell::Cell;
use std::rc::Rc;

use emote::{Emote, EmoteKind};
use frame::IdleMotion;
use scene::ChestFace;

pub const GREETING_MS: f64 = 3_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointState {
    pub head_yaw: f64,
    pub right_shoulder_x: f64,
    pub right_shoulder_z: f64,
    pub right_elbow_z: f64,
    pub chest_glow: f64,
    pub chest_face: ChestFace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MascotRequest {
    Greet,
    Emote(EmoteKind),
}

/// Single pending request shared between senders and the frame loop.
#[derive(Clone, Default)]
pub struct MascotInbox(Rc<Cell<Option<MascotRequest>>>);

impl MascotInbox {
    pub fn send(&self, request: MascotRequest) {
        if let Some(dropped) = self.0.replace(Some(request)) {
            log::debug!("mascot request {dropped:?} superseded before a frame ran");
        }
    }

    pub fn take(&self) -> Option<MascotRequest> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.get().is_none()
    }
}

impl PartialEq for MascotInbox {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Greeting {
    pub started_at: f64,
    pub baseline: JointState,
}

impl Greeting {
    fn is_complete(&self, now: f64) -> bool {
        now - self.started_at >= GREETING_MS
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Foreground {
    Idle,
    Greeting(Greeting),
    Emoting(Emote),
}

impl Foreground {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Greeting(_) => "greeting",
            Self::Emoting(emote) => emote.kind.as_str(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MascotDirector {
    foreground: Foreground,
    resting: JointState,
}

impl MascotDirector {
    pub fn new(resting: JointState) -> Self {
        Self {
            foreground: Foreground::Idle,
            resting,
        }
    }

    pub fn foreground(&self) -> &Foreground {
        &self.foreground
    }

    pub fn resting(&self) -> &JointState {
        &self.resting
    }

    fn baseline(&self) -> JointState {
        match &self.foreground {
            Foreground::Idle => self.resting,
            Foreground::Greeting(greeting) => greeting.baseline,
            Foreground::Emoting(emote) => emote.baseline,
        }
    }

    pub fn submit(&mut self, request: MascotRequest, now: f64) {
        let baseline = self.baseline();
        let next = match request {
            MascotRequest::Greet => Foreground::Greeting(Greeting {
                started_at: now,
                baseline,
            }),
            MascotRequest::Emote(kind) => Foreground::Emoting(Emote::start(kind, now, baseline)),
        };

        if self.foreground != Foreground::Idle {
            log::debug!(
                "mascot {} replaced by {}",
                self.foreground.name(),
                next.name()
            );
        }
        self.foreground = next;
    }

    pub fn tick(&mut self, now: f64) -> Option<Foreground> {
        let complete = match &self.foreground {
            Foreground::Idle => false,
            Foreground::Greeting(greeting) => greeting.is_complete(now),
            Foreground::Emoting(emote) => emote.is_complete(now),
        };

        if !complete {
            return None;
        }

        self.resting = self.baseline();
        let finished = std::mem::replace(&mut self.foreground, Foreground::Idle);
        log::debug!("mascot {} finished", finished.name());
        Some(finished)
    }

    pub fn joints(&self, now: f64) -> JointState {
        match &self.foreground {
            Foreground::Idle => self.resting,
            Foreground::Greeting(greeting) => JointState {
                chest_face: ChestFace::Flower,
                ..greeting.baseline
            },
            Foreground::Emoting(emote) => emote.joints(now),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MascotPose {
    pub motion: IdleMotion,
    pub joints: JointState,
}

impl MascotPose {
    pub fn compose(motion: IdleMotion, joints: JointState) -> Self {
        Self { motion, joints }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene::MascotBlueprint;

    fn director() -> MascotDirector {
        MascotDirector::new(MascotBlueprint::humanoid().rest_joints())
    }

    #[test]
    fn greeting_shows_flower_for_three_seconds() {
        let mut director = director();
        let rest = *director.resting();

        director.submit(MascotRequest::Greet, 1_000.0);
        assert_eq!(director.joints(1_500.0).chest_face, ChestFace::Flower);
        assert_eq!(director.tick(3_999.0), None);

        let finished = director.tick(4_000.0).expect("greeting expires");
        assert!(matches!(finished, Foreground::Greeting(_)));
        assert_eq!(director.foreground(), &Foreground::Idle);
        assert_eq!(director.joints(4_000.0), rest);
    }

    #[test]
    fn newer_emote_replaces_the_running_one() {
        let mut director = director();
        let rest = *director.resting();

        director.submit(MascotRequest::Emote(EmoteKind::Wave), 0.0);
        let mid_wave = director.joints(1_100.0);
        assert_ne!(mid_wave, rest);

        director.submit(MascotRequest::Emote(EmoteKind::Heart), 1_100.0);
        match director.foreground() {
            Foreground::Emoting(emote) => {
                assert_eq!(emote.kind, EmoteKind::Heart);
                assert_eq!(emote.baseline, rest);
            }
            other => panic!("expected heart, got {other:?}"),
        }

        let during_heart = director.joints(1_500.0);
        assert_eq!(during_heart.head_yaw, rest.head_yaw);
        assert_eq!(during_heart.right_shoulder_z, rest.right_shoulder_z);

        // the wave would have finished at 2_200; only the heart is tracked
        assert_eq!(director.tick(2_300.0), None);

        let finished = director.tick(1_100.0 + EmoteKind::Heart.duration_ms());
        assert!(matches!(
            finished,
            Some(Foreground::Emoting(Emote {
                kind: EmoteKind::Heart,
                ..
            }))
        ));
        assert_eq!(director.joints(10_000.0), rest);
    }

    #[test]
    fn emote_during_greeting_does_not_leak_the_flower() {
        let mut director = director();
        let rest = *director.resting();

        director.submit(MascotRequest::Greet, 0.0);
        director.submit(MascotRequest::Emote(EmoteKind::Wave), 500.0);
        assert_eq!(director.joints(600.0).chest_face, ChestFace::Pattern);

        director.tick(500.0 + EmoteKind::Wave.duration_ms());
        assert_eq!(director.joints(5_000.0), rest);
        assert_eq!(director.tick(5_000.0), None);
    }

    #[test]
    fn pending_requests_resolve_to_the_newest() {
        let inbox = MascotInbox::default();
        inbox.send(MascotRequest::Emote(EmoteKind::Heart));
        inbox.send(MascotRequest::Greet);
        inbox.send(MascotRequest::Emote(EmoteKind::Wave));

        let mut director = director();
        let request = inbox.take().expect("one pending request");
        director.submit(request, 0.0);
        assert!(inbox.is_empty());
        assert_eq!(inbox.take(), None);
        assert!(matches!(
            director.foreground(),
            Foreground::Emoting(Emote {
                kind: EmoteKind::Wave,
                ..
            })
        ));
    }

    #[test]
    fn inbox_clones_share_one_queue() {
        let inbox = MascotInbox::default();
        let sender = inbox.clone();
        sender.send(MascotRequest::Greet);

        assert!(inbox == sender);
        assert!(inbox != MascotInbox::default());
        assert_eq!(inbox.take(), Some(MascotRequest::Greet));
        assert!(sender.is_empty());
    }

    #[test]
    fn paused_mascot_keeps_a_single_pending_request() {
        let inbox = MascotInbox::default();
        for _ in 0..10_000 {
            inbox.send(MascotRequest::Emote(EmoteKind::Wave));
        }
        inbox.send(MascotRequest::Greet);

        assert_eq!(inbox.take(), Some(MascotRequest::Greet));
        assert_eq!(inbox.take(), None);
    }

    #[test]
    fn idle_director_never_finishes() {
        let mut director = director();
        assert_eq!(director.tick(1e9), None);
    }
}
