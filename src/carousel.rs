//! Orbit carousel: cards sit on a virtual ring and a single continuous angle
//! decides which card faces the viewer.
//!
//! The angle and the discrete index always agree at rest: the index is the
//! card nearest to the angle and snapping puts the angle on the exact multiple
//! of the per-card step for that index.

pub const DRAG_SENSITIVITY: f64 = 0.28;
pub const DRAG_THRESHOLD_PX: f64 = 6.0;
pub const RING_RADIUS_PX: f64 = 320.0;
pub const RING_DEPTH_PX: f64 = 220.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragGesture {
    start_x: f64,
    start_angle: f64,
    moved: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselKey {
    Previous,
    Next,
    First,
    Last,
}

impl CarouselKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Previous),
            "ArrowRight" => Some(Self::Next),
            "Home" => Some(Self::First),
            "End" => Some(Self::Last),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    pub was_drag: bool,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardVisual {
    pub offset_deg: f64,
    pub x_px: f64,
    pub depth_px: f64,
    pub lift_px: f64,
    pub scale: f64,
    pub opacity: f64,
    pub blur_px: f64,
    pub z_index: i32,
}

impl CardVisual {
    pub fn style(&self) -> String {
        format!(
            "transform: translate3d({:.2}px, {:.2}px, {:.2}px) scale({:.3}); opacity: {:.3}; filter: blur({:.2}px); z-index: {};",
            self.x_px, self.lift_px, self.depth_px, self.scale, self.opacity, self.blur_px, self.z_index
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCarousel {
    count: usize,
    angle: f64,
    index: usize,
    drag: Option<DragGesture>,
    suppress_click: bool,
}

impl OrbitCarousel {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            angle: 0.0,
            index: 0,
            drag: None,
            suppress_click: false,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_drag_gesture(&self) -> bool {
        self.drag.map(|drag| drag.moved).unwrap_or(false)
    }

    pub fn suppresses_click(&self) -> bool {
        self.suppress_click
    }

    pub fn step_deg(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }

        360.0 / self.count as f64
    }

    pub fn index_from_angle(&self, angle: f64) -> usize {
        let step = self.step_deg();
        if step == 0.0 {
            return 0;
        }

        let nearest = (-angle / step).round() as i64;
        nearest.rem_euclid(self.count as i64) as usize
    }

    pub fn snap_to_index(&mut self, index: i64) {
        if self.count == 0 {
            return;
        }

        self.index = index.rem_euclid(self.count as i64) as usize;
        self.angle = -(self.index as f64) * self.step_deg();
    }

    pub fn pointer_down(&mut self, x: f64, on_control: bool) -> bool {
        if on_control || self.count == 0 {
            return false;
        }

        self.suppress_click = false;
        self.drag = Some(DragGesture {
            start_x: x,
            start_angle: self.angle,
            moved: false,
        });
        true
    }

    pub fn pointer_move(&mut self, x: f64) {
        let Some(mut drag) = self.drag else {
            return;
        };

        let delta = x - drag.start_x;
        if delta.abs() > DRAG_THRESHOLD_PX {
            drag.moved = true;
        }

        self.angle = drag.start_angle + delta * DRAG_SENSITIVITY;
        self.index = self.index_from_angle(self.angle);
        self.drag = Some(drag);
    }

    pub fn pointer_up(&mut self) -> Option<Release> {
        let drag = self.drag.take()?;

        if drag.moved {
            let nearest = self.index_from_angle(self.angle);
            self.snap_to_index(nearest as i64);
        } else {
            self.snap_to_index(self.index as i64);
        }

        self.suppress_click = drag.moved;
        Some(Release {
            was_drag: drag.moved,
            index: self.index,
        })
    }

    /// A cancelled gesture settles exactly like a release.
    pub fn pointer_cancel(&mut self) -> Option<Release> {
        self.pointer_up()
    }

    /// The stage only captures the pointer once a gesture turns into a drag,
    /// so a press that wanders off the stage before that never sees its
    /// `pointerup`. Such a press is settled here; a captured drag keeps going.
    pub fn pointer_leave(&mut self) -> Option<Release> {
        match self.drag {
            Some(drag) if !drag.moved => self.pointer_cancel(),
            _ => None,
        }
    }

    pub fn key(&mut self, key: CarouselKey) {
        if self.count == 0 {
            return;
        }

        let current = self.index as i64;
        match key {
            CarouselKey::Previous => self.snap_to_index(current - 1),
            CarouselKey::Next => self.snap_to_index(current + 1),
            CarouselKey::First => self.snap_to_index(0),
            CarouselKey::Last => self.snap_to_index(self.count as i64 - 1),
        }
    }

    pub fn card_visual(&self, card: usize) -> CardVisual {
        let offset_deg = signed_degrees(card as f64 * self.step_deg() + self.angle);
        let radians = offset_deg.to_radians();
        let facing = (1.0 + radians.cos()) / 2.0;

        CardVisual {
            offset_deg,
            x_px: radians.sin() * RING_RADIUS_PX,
            depth_px: (radians.cos() - 1.0) * RING_DEPTH_PX,
            lift_px: -18.0 * facing,
            scale: 0.62 + 0.38 * facing,
            opacity: 0.18 + 0.82 * facing.powf(1.6),
            blur_px: (1.0 - facing) * 5.0,
            z_index: (facing * 100.0).round() as i32,
        }
    }
}

fn signed_degrees(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_drag_still_snaps() {
        let mut carousel = OrbitCarousel::new(6);
        assert!(carousel.pointer_down(100.0, false));
        carousel.pointer_move(100.0 - 70.0 / DRAG_SENSITIVITY);

        let release = carousel.pointer_cancel().expect("gesture was active");
        assert!(release.was_drag);
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.angle(), -60.0);
        assert!(carousel.suppresses_click());
        assert_eq!(carousel.pointer_cancel(), None);
    }

    fn drag_to_angle(carousel: &mut OrbitCarousel, target_angle: f64) -> Option<Release> {
        let start = carousel.angle();
        assert!(carousel.pointer_down(0.0, false));
        carousel.pointer_move((target_angle - start) / DRAG_SENSITIVITY);
        carousel.pointer_up()
    }

    #[test]
    fn four_cards_drag_past_ninety_snaps_to_second_card() {
        let mut carousel = OrbitCarousel::new(4);
        assert_eq!(carousel.step_deg(), 90.0);
        assert_eq!(carousel.index(), 0);

        let release = drag_to_angle(&mut carousel, -95.0).expect("gesture was active");
        assert!(release.was_drag);
        assert_eq!(release.index, 1);
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.angle(), -90.0);
        assert!(carousel.suppresses_click());
    }

    #[test]
    fn snap_normalizes_any_integer() {
        let mut carousel = OrbitCarousel::new(5);
        for requested in [-11_i64, -5, -1, 0, 3, 5, 7, 42] {
            carousel.snap_to_index(requested);
            let expected = ((requested % 5) + 5) % 5;
            assert_eq!(carousel.index() as i64, expected);
            assert_eq!(carousel.angle(), -(expected as f64) * 72.0);
        }
    }

    #[test]
    fn drags_always_settle_on_nearest_card() {
        for count in 1..=8 {
            let mut carousel = OrbitCarousel::new(count);
            let step = carousel.step_deg();
            for target in [-725.0, -400.0, -133.0, -44.0, 17.0, 91.0, 260.0, 599.0] {
                let release = drag_to_angle(&mut carousel, target).expect("gesture was active");
                let nearest = carousel.index_from_angle(carousel.angle());
                assert_eq!(release.index, nearest);
                assert_eq!(carousel.angle(), -(carousel.index() as f64) * step);
            }
        }
    }

    #[test]
    fn index_tracks_angle_live_while_dragging() {
        let mut carousel = OrbitCarousel::new(4);
        carousel.pointer_down(100.0, false);
        carousel.pointer_move(100.0 - 200.0 / DRAG_SENSITIVITY);
        assert_eq!(carousel.index(), 2);
        assert!(carousel.is_drag_gesture());
    }

    #[test]
    fn tap_resnaps_without_moving() {
        let mut carousel = OrbitCarousel::new(6);
        carousel.snap_to_index(2);
        carousel.pointer_down(50.0, false);
        carousel.pointer_move(53.0);
        assert!(!carousel.is_drag_gesture());

        let release = carousel.pointer_up().expect("gesture was active");
        assert!(!release.was_drag);
        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.angle(), -120.0);
        assert!(!carousel.suppresses_click());
    }

    #[test]
    fn press_leaving_the_stage_before_dragging_is_released() {
        let mut carousel = OrbitCarousel::new(6);
        carousel.snap_to_index(1);
        carousel.pointer_down(200.0, false);
        carousel.pointer_move(203.0);

        let release = carousel.pointer_leave().expect("press was pending");
        assert!(!release.was_drag);
        assert!(!carousel.is_dragging());
        assert_eq!(carousel.angle(), -60.0);

        // later hover moves no longer turn the ring
        carousel.pointer_move(600.0);
        assert_eq!(carousel.angle(), -60.0);
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn captured_drag_survives_leaving_the_stage() {
        let mut carousel = OrbitCarousel::new(6);
        carousel.pointer_down(200.0, false);
        carousel.pointer_move(200.0 - 40.0 / DRAG_SENSITIVITY);

        assert_eq!(carousel.pointer_leave(), None);
        assert!(carousel.is_drag_gesture());
        assert!(carousel.pointer_up().expect("drag still active").was_drag);
    }

    #[test]
    fn control_elements_do_not_start_a_drag() {
        let mut carousel = OrbitCarousel::new(4);
        assert!(!carousel.pointer_down(10.0, true));
        carousel.pointer_move(400.0);
        assert_eq!(carousel.angle(), 0.0);
        assert_eq!(carousel.pointer_up(), None);
    }

    #[test]
    fn new_press_clears_click_suppression() {
        let mut carousel = OrbitCarousel::new(4);
        drag_to_angle(&mut carousel, -95.0);
        assert!(carousel.suppresses_click());

        carousel.pointer_down(0.0, false);
        assert!(!carousel.suppresses_click());
    }

    #[test]
    fn keys_step_and_jump() {
        let mut carousel = OrbitCarousel::new(4);
        carousel.key(CarouselKey::Previous);
        assert_eq!(carousel.index(), 3);
        assert_eq!(carousel.angle(), -270.0);

        carousel.key(CarouselKey::Next);
        assert_eq!(carousel.index(), 0);

        carousel.key(CarouselKey::Last);
        assert_eq!(carousel.index(), 3);
        carousel.key(CarouselKey::First);
        assert_eq!(carousel.index(), 0);

        assert_eq!(CarouselKey::from_key("ArrowRight"), Some(CarouselKey::Next));
        assert_eq!(CarouselKey::from_key("Enter"), None);
    }

    #[test]
    fn front_card_is_largest_and_on_top() {
        let mut carousel = OrbitCarousel::new(6);
        carousel.snap_to_index(4);

        let front = carousel.card_visual(4);
        assert!(front.offset_deg.abs() < 1e-9);
        assert_eq!(front.z_index, 100);
        assert!((front.scale - 1.0).abs() < 1e-9);
        assert!(front.blur_px.abs() < 1e-9);

        let back = carousel.card_visual(1);
        assert!((back.offset_deg.abs() - 180.0).abs() < 1e-9);
        assert_eq!(back.z_index, 0);

        for card in [0, 1, 2, 3, 5] {
            let visual = carousel.card_visual(card);
            assert!(visual.scale < front.scale);
            assert!(visual.opacity < front.opacity);
        }
    }

    #[test]
    fn neighbours_are_mirrored() {
        let carousel = OrbitCarousel::new(4);
        let left = carousel.card_visual(3);
        let right = carousel.card_visual(1);
        assert!((left.x_px + right.x_px).abs() < 1e-9);
        assert_eq!(left.z_index, right.z_index);
    }

    #[test]
    fn empty_carousel_ignores_input() {
        let mut carousel = OrbitCarousel::new(0);
        assert_eq!(carousel.step_deg(), 0.0);
        assert_eq!(carousel.index_from_angle(-300.0), 0);
        assert!(!carousel.pointer_down(0.0, false));
        carousel.key(CarouselKey::Next);
        carousel.snap_to_index(3);
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.angle(), 0.0);
    }
}
