use crate::mascot::emote::EmoteKind;
use crate::sections::SectionId;

pub const TOAST_DURATION_MS: u32 = 2_400;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistantAction {
    Jump(SectionId),
    NextSection,
    OpenCalendar,
    Emote(EmoteKind),
}

pub const SHORTCUTS: &[AssistantAction] = &[
    AssistantAction::Jump(SectionId::About),
    AssistantAction::Jump(SectionId::Experience),
    AssistantAction::Jump(SectionId::Projects),
    AssistantAction::Jump(SectionId::Publications),
    AssistantAction::Jump(SectionId::Skills),
    AssistantAction::NextSection,
    AssistantAction::OpenCalendar,
    AssistantAction::Emote(EmoteKind::Wave),
    AssistantAction::Emote(EmoteKind::Heart),
];

impl AssistantAction {
    pub fn label(self) -> String {
        match self {
            Self::Jump(section) => format!("Show me {}", section.label().to_lowercase()),
            Self::NextSection => "Next section →".to_string(),
            Self::OpenCalendar => "📅 Book a chat".to_string(),
            Self::Emote(kind) => kind.button_label().to_string(),
        }
    }

    pub fn target_section(self, active: Option<SectionId>) -> Option<SectionId> {
        match self {
            Self::Jump(section) => Some(section),
            Self::NextSection => Some(SectionId::next_after(active)),
            Self::OpenCalendar | Self::Emote(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub message: &'static str,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssistantState {
    pub open: bool,
    pub toast: Option<Toast>,
    next_toast_id: u32,
}

impl AssistantState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn show_toast(&mut self, message: &'static str) -> u32 {
        self.next_toast_id = self.next_toast_id.wrapping_add(1);
        self.toast = Some(Toast {
            id: self.next_toast_id,
            message,
        });
        self.next_toast_id
    }

    pub fn dismiss_toast(&mut self, id: u32) {
        if self.toast.map(|toast| toast.id) == Some(id) {
            self.toast = None;
        }
    }

    pub fn status_line(active: Option<SectionId>) -> String {
        match active {
            Some(section) => format!("You're viewing: {}", section.label()),
            None => "Scroll around, I'll keep track.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_section_follows_the_active_one() {
        assert_eq!(
            AssistantAction::NextSection.target_section(Some(SectionId::Projects)),
            Some(SectionId::Publications)
        );
        assert_eq!(
            AssistantAction::Jump(SectionId::Skills).target_section(Some(SectionId::Hero)),
            Some(SectionId::Skills)
        );
        assert_eq!(AssistantAction::OpenCalendar.target_section(None), None);
    }

    #[test]
    fn newer_toast_survives_older_dismissal() {
        let mut state = AssistantState::default();
        let first = state.show_toast(EmoteKind::Wave.toast());
        let second = state.show_toast(EmoteKind::Heart.toast());

        state.dismiss_toast(first);
        assert_eq!(state.toast.map(|toast| toast.message), Some(EmoteKind::Heart.toast()));

        state.dismiss_toast(second);
        assert_eq!(state.toast, None);
    }

    #[test]
    fn toggle_flips_open_state() {
        let mut state = AssistantState::default();
        state.toggle();
        assert!(state.open);
        state.toggle();
        assert!(!state.open);
    }

    #[test]
    fn shortcuts_cover_every_jump_target_except_home() {
        let jumps = SHORTCUTS
            .iter()
            .filter_map(|action| match action {
                AssistantAction::Jump(section) => Some(*section),
                _ => None,
            })
            .count();
        assert_eq!(jumps, SectionId::ORDER.len() - 1);
        assert_eq!(AssistantAction::Jump(SectionId::About).label(), "Show me about");
    }

    #[test]
    fn status_line_names_active_section() {
        assert_eq!(
            AssistantState::status_line(Some(SectionId::Experience)),
            "You're viewing: Experience"
        );
    }
}
