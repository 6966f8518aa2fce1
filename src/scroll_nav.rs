const HIDE_AFTER_Y: f64 = 120.0;
const MIN_DOWNWARD_DELTA: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollNav {
    last_y: f64,
    visible: bool,
}

impl Default for ScrollNav {
    fn default() -> Self {
        Self {
            last_y: 0.0,
            visible: true,
        }
    }
}

impl ScrollNav {
    pub fn sample(&mut self, y: f64) -> bool {
        let delta = y - self.last_y;

        if y > HIDE_AFTER_Y && delta > MIN_DOWNWARD_DELTA {
            self.visible = false;
        } else if delta < 0.0 {
            self.visible = true;
        }

        self.last_y = y;
        self.visible
    }

    pub fn is_visible(self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_on_downward_scroll_and_reappears_on_first_upward_sample() {
        let mut nav = ScrollNav::default();

        assert!(nav.sample(0.0));
        assert!(!nav.sample(130.0));
        assert!(!nav.sample(140.0));
        assert!(nav.sample(139.0));
    }

    #[test]
    fn stays_visible_near_the_top() {
        let mut nav = ScrollNav::default();
        assert!(nav.sample(60.0));
        assert!(nav.sample(118.0));
    }

    #[test]
    fn small_downward_jitter_keeps_current_state() {
        let mut nav = ScrollNav::default();
        nav.sample(300.0);
        nav.sample(250.0);
        assert!(nav.is_visible());

        assert!(nav.sample(251.5));
        assert!(!nav.sample(260.0));
        assert!(!nav.sample(261.0));
    }
}
