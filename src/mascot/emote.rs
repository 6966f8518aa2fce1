use std::f64::consts::{PI, TAU};

use super::scene::ChestFace;
use super::JointState;

const WAVE_DURATION_MS: f64 = 2_200.0;
const HEART_DURATION_MS: f64 = 2_600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmoteKind {
    Wave,
    Heart,
}

impl EmoteKind {
    pub fn duration_ms(self) -> f64 {
        match self {
            Self::Wave => WAVE_DURATION_MS,
            Self::Heart => HEART_DURATION_MS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wave => "wave",
            Self::Heart => "heart",
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Wave => "👋 Say hi",
            Self::Heart => "💜 Send love",
        }
    }

    pub fn toast(self) -> &'static str {
        match self {
            Self::Wave => "Hey there! Thanks for stopping by.",
            Self::Heart => "Right back at you!",
        }
    }

    pub fn sample(self, progress: f64, baseline: &JointState) -> JointState {
        if progress >= 1.0 {
            return *baseline;
        }

        let progress = progress.max(0.0);
        let envelope = (progress * PI).sin();

        match self {
            Self::Wave => JointState {
                head_yaw: baseline.head_yaw + (progress * TAU * 2.0).sin() * 0.3 * envelope,
                right_shoulder_z: baseline.right_shoulder_z + 2.5 * envelope,
                right_shoulder_x: baseline.right_shoulder_x - 0.25 * envelope,
                right_elbow_z: baseline.right_elbow_z
                    + (progress * TAU * 3.0).sin() * 0.55 * envelope,
                ..*baseline
            },
            Self::Heart => JointState {
                chest_face: ChestFace::Heart,
                chest_glow: baseline.chest_glow + 1.4 * (progress * PI * 3.0).sin().abs(),
                ..*baseline
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emote {
    pub kind: EmoteKind,
    pub started_at: f64,
    pub duration_ms: f64,
    pub baseline: JointState,
}

impl Emote {
    pub fn start(kind: EmoteKind, now: f64, baseline: JointState) -> Self {
        Self {
            kind,
            started_at: now,
            duration_ms: kind.duration_ms(),
            baseline,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn joints(&self, now: f64) -> JointState {
        self.kind.sample(self.progress(now), &self.baseline)
    }
}
