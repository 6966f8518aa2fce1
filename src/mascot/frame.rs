pub const TARGET_FPS: f64 = 50.0;
pub const SCROLL_QUIET_MS: f64 = 140.0;
pub const SCROLL_PIXEL_RATIO: f64 = 1.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;
const POINTER_SMOOTHING: f64 = 0.08;

const BOB_AMPLITUDE: f64 = 0.08;
const BOB_SPEED: f64 = 1.6;
const SWAY_AMPLITUDE: f64 = 0.22;
const SWAY_SPEED: f64 = 0.4;
const FOLLOW_YAW: f64 = 0.45;
const FOLLOW_PITCH: f64 = 0.18;
const RING_SPIN_SPEED: f64 = 0.35;
const HALO_SPIN_SPEED: f64 = 0.9;
const IDLE_SPIN_SPEED: f64 = 0.12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGate {
    min_interval_ms: f64,
    last: Option<f64>,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::with_fps(TARGET_FPS)
    }
}

impl FrameGate {
    pub fn with_fps(fps: f64) -> Self {
        Self {
            min_interval_ms: 1_000.0 / fps,
            last: None,
        }
    }

    pub fn admit(&mut self, now: f64) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return true;
        };

        let elapsed = now - last;
        if elapsed < self.min_interval_ms {
            return false;
        }

        self.last = Some(now - elapsed % self.min_interval_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCommand {
    Start,
    Stop,
    Keep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunPolicy {
    in_view: bool,
    tab_visible: bool,
}

impl RunPolicy {
    pub fn new(tab_visible: bool) -> Self {
        Self {
            in_view: false,
            tab_visible,
        }
    }

    pub fn should_run(self) -> bool {
        self.in_view && self.tab_visible
    }

    pub fn set_in_view(&mut self, in_view: bool) -> LoopCommand {
        self.transition(|policy| policy.in_view = in_view)
    }

    pub fn set_tab_visible(&mut self, tab_visible: bool) -> LoopCommand {
        self.transition(|policy| policy.tab_visible = tab_visible)
    }

    fn transition(&mut self, change: impl FnOnce(&mut Self)) -> LoopCommand {
        let was_running = self.should_run();
        change(self);

        match (was_running, self.should_run()) {
            (false, true) => LoopCommand::Start,
            (true, false) => LoopCommand::Stop,
            _ => LoopCommand::Keep,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollQuality {
    default_ratio: f64,
    last_scroll: Option<f64>,
    degraded: bool,
}

impl ScrollQuality {
    pub fn new(device_pixel_ratio: f64) -> Self {
        Self {
            default_ratio: device_pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO),
            last_scroll: None,
            degraded: false,
        }
    }

    pub fn default_ratio(self) -> f64 {
        self.default_ratio
    }

    pub fn on_scroll(&mut self, now: f64) -> Option<f64> {
        self.last_scroll = Some(now);
        if self.degraded {
            return None;
        }

        self.degraded = true;
        Some(SCROLL_PIXEL_RATIO)
    }

    pub fn settle(&mut self, now: f64) -> Option<f64> {
        let last_scroll = self.last_scroll?;
        if !self.degraded || now - last_scroll < SCROLL_QUIET_MS {
            return None;
        }

        self.degraded = false;
        Some(self.default_ratio)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerFollow {
    target: (f64, f64),
    current: (f64, f64),
}

impl PointerFollow {
    pub fn aim(&mut self, x: f64, y: f64) {
        self.target = (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
    }

    pub fn step(&mut self) -> (f64, f64) {
        self.current.0 += (self.target.0 - self.current.0) * POINTER_SMOOTHING;
        self.current.1 += (self.target.1 - self.current.1) * POINTER_SMOOTHING;
        self.current
    }

    pub fn current(self) -> (f64, f64) {
        self.current
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub fn normalized_device_coords(client_x: f64, client_y: f64, viewport: Viewport) -> Option<(f64, f64)> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }

    let x = ((client_x - viewport.left) / viewport.width) * 2.0 - 1.0;
    let y = -((client_y - viewport.top) / viewport.height) * 2.0 + 1.0;
    Some((x, y))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleMotion {
    pub bob_y: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub ring_spin: f64,
    pub halo_spin: f64,
}

pub fn idle_motion(elapsed_s: f64, pointer: (f64, f64), reduced_motion: bool) -> IdleMotion {
    let follow_yaw = pointer.0 * FOLLOW_YAW;
    let follow_pitch = -pointer.1 * FOLLOW_PITCH;

    if reduced_motion {
        return IdleMotion {
            bob_y: 0.0,
            yaw: follow_yaw,
            pitch: follow_pitch,
            ring_spin: 0.0,
            halo_spin: 0.0,
        };
    }

    // wrapped so the yaw stays small over long sessions
    let spin = (elapsed_s * IDLE_SPIN_SPEED).rem_euclid(std::f64::consts::TAU);
    IdleMotion {
        bob_y: (elapsed_s * BOB_SPEED).sin() * BOB_AMPLITUDE,
        yaw: follow_yaw + spin + (elapsed_s * SWAY_SPEED).sin() * SWAY_AMPLITUDE,
        pitch: follow_pitch,
        ring_spin: elapsed_s * RING_SPIN_SPEED,
        halo_spin: elapsed_s * HALO_SPIN_SPEED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_caps_a_sixty_hertz_display_near_fifty_fps() {
        let mut gate = FrameGate::default();
        let frame = 1_000.0 / 60.0;
        let admitted = (0..60)
            .map(|index| index as f64 * frame)
            .filter(|now| gate.admit(*now))
            .count();

        assert!(admitted <= 51, "admitted {admitted}");
        assert!(admitted >= 45, "admitted {admitted}");
    }

    #[test]
    fn gate_rejects_frames_inside_the_interval() {
        let mut gate = FrameGate::default();
        assert!(gate.admit(1_000.0));
        assert!(!gate.admit(1_010.0));
        assert!(gate.admit(1_020.0));

        gate.reset();
        assert!(gate.admit(1_021.0));
    }

    #[test]
    fn loop_runs_only_when_in_view_and_visible() {
        let mut policy = RunPolicy::new(true);
        assert!(!policy.should_run());

        assert_eq!(policy.set_in_view(true), LoopCommand::Start);
        assert_eq!(policy.set_in_view(true), LoopCommand::Keep);
        assert_eq!(policy.set_tab_visible(false), LoopCommand::Stop);
        assert_eq!(policy.set_in_view(false), LoopCommand::Keep);
        assert_eq!(policy.set_tab_visible(true), LoopCommand::Keep);
        assert_eq!(policy.set_in_view(true), LoopCommand::Start);
    }

    #[test]
    fn scroll_burst_drops_ratio_until_quiet() {
        let mut quality = ScrollQuality::new(2.0);

        assert_eq!(quality.on_scroll(0.0), Some(SCROLL_PIXEL_RATIO));
        assert_eq!(quality.on_scroll(60.0), None);
        assert_eq!(quality.on_scroll(120.0), None);

        assert_eq!(quality.settle(200.0), None);
        assert_eq!(quality.settle(260.0), Some(2.0));
        assert_eq!(quality.settle(400.0), None);
    }

    #[test]
    fn default_ratio_is_capped() {
        assert_eq!(ScrollQuality::new(3.0).default_ratio(), MAX_PIXEL_RATIO);
        assert_eq!(ScrollQuality::new(0.5).default_ratio(), 1.0);
    }

    #[test]
    fn settle_without_scroll_is_a_no_op() {
        let mut quality = ScrollQuality::new(1.5);
        assert_eq!(quality.settle(10_000.0), None);
    }

    #[test]
    fn pointer_follow_converges_on_target() {
        let mut follow = PointerFollow::default();
        follow.aim(4.0, -0.5);

        let first = follow.step();
        assert!(first.0 > 0.0 && first.0 < 1.0);

        for _ in 0..200 {
            follow.step();
        }
        let (x, y) = follow.current();
        assert!((x - 1.0).abs() < 1e-3);
        assert!((y + 0.5).abs() < 1e-3);
    }

    #[test]
    fn device_coords_span_the_canvas() {
        let viewport = Viewport {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 200.0,
        };

        assert_eq!(normalized_device_coords(100.0, 50.0, viewport), Some((-1.0, 1.0)));
        assert_eq!(normalized_device_coords(300.0, 150.0, viewport), Some((0.0, 0.0)));
        assert_eq!(normalized_device_coords(500.0, 250.0, viewport), Some((1.0, -1.0)));

        let collapsed = Viewport {
            width: 0.0,
            ..viewport
        };
        assert_eq!(normalized_device_coords(0.0, 0.0, collapsed), None);
    }

    #[test]
    fn idle_motion_bobs_and_spins() {
        let rest = idle_motion(0.0, (0.0, 0.0), false);
        assert_eq!(rest.bob_y, 0.0);
        assert_eq!(rest.ring_spin, 0.0);

        let later = idle_motion(2.0, (0.0, 0.0), false);
        assert!(later.bob_y.abs() <= BOB_AMPLITUDE);
        assert!(later.ring_spin > 0.0);

        let still = idle_motion(2.0, (1.0, 0.0), true);
        assert_eq!(still.bob_y, 0.0);
        assert_eq!(still.yaw, FOLLOW_YAW);
    }

    #[test]
    fn body_keeps_turning_beyond_the_sway() {
        // sample on whole sway periods so only the spin differs
        let period = std::f64::consts::TAU / SWAY_SPEED;
        let first = idle_motion(period, (0.0, 0.0), false);
        let second = idle_motion(2.0 * period, (0.0, 0.0), false);

        let turned = second.yaw - first.yaw;
        assert!((turned - period * IDLE_SPIN_SPEED).abs() < 1e-9, "turned {turned}");
        assert!(turned > SWAY_AMPLITUDE);

        let late = idle_motion(1e7, (0.0, 0.0), false);
        assert!(late.yaw.abs() <= std::f64::consts::TAU + SWAY_AMPLITUDE);
    }
}
