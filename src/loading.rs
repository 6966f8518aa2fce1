pub const LOADING_TICK_MS: u32 = 14;
const COMPLETE: u8 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadingProgress {
    value: u8,
}

impl LoadingProgress {
    pub fn tick(&mut self) {
        if self.value < COMPLETE {
            self.value += 1;
        }
    }

    pub fn value(self) -> u8 {
        self.value
    }

    pub fn is_visible(self) -> bool {
        self.value < COMPLETE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_is_visible_until_exactly_one_hundred() {
        let mut progress = LoadingProgress::default();
        assert_eq!(progress.value(), 0);

        for expected in 1..COMPLETE {
            assert!(progress.is_visible());
            progress.tick();
            assert_eq!(progress.value(), expected);
        }

        assert!(progress.is_visible());
        progress.tick();
        assert_eq!(progress.value(), 100);
        assert!(!progress.is_visible());
    }

    #[test]
    fn ticks_after_completion_are_ignored() {
        let mut progress = LoadingProgress::default();
        for _ in 0..250 {
            progress.tick();
        }
        assert_eq!(progress.value(), 100);
    }
}
