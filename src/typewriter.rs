pub const REVEAL_INTERVAL_MS: u32 = 90;
pub const CURSOR_BLINK_MS: u32 = 530;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typewriter {
    text: &'static str,
    revealed: usize,
    total: usize,
}

impl Typewriter {
    pub fn new(text: &'static str) -> Self {
        Self {
            text,
            revealed: 0,
            total: text.chars().count(),
        }
    }

    pub fn completed(text: &'static str) -> Self {
        let mut typewriter = Self::new(text);
        typewriter.revealed = typewriter.total;
        typewriter
    }

    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        self.revealed += 1;
        true
    }

    pub fn is_finished(&self) -> bool {
        self.revealed >= self.total
    }

    pub fn visible(&self) -> &'static str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map(|(byte_index, _)| byte_index)
            .unwrap_or(self.text.len());

        &self.text[..end]
    }

    pub fn full_text(&self) -> &'static str {
        self.text
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorBlink {
    visible: bool,
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl CursorBlink {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(self) -> bool {
        self.visible
    }
}
