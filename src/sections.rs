use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Hero,
    About,
    Experience,
    Projects,
    Publications,
    Skills,
}

impl SectionId {
    pub const ORDER: [SectionId; 6] = [
        Self::Hero,
        Self::About,
        Self::Experience,
        Self::Projects,
        Self::Publications,
        Self::Skills,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Publications => "publications",
            Self::Skills => "skills",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::About => "About",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
            Self::Publications => "Publications",
            Self::Skills => "Skills",
        }
    }

    pub fn from_anchor(anchor: &str) -> Option<Self> {
        Self::ORDER
            .into_iter()
            .find(|section| section.anchor() == anchor)
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    pub fn next_after(current: Option<Self>) -> Self {
        let current = current.unwrap_or(Self::Hero);
        Self::ORDER[(current.position() + 1) % Self::ORDER.len()]
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActiveSectionTracker {
    ratios: HashMap<SectionId, f64>,
    last_active: Option<SectionId>,
}

impl ActiveSectionTracker {
    pub fn observe(&mut self, section: SectionId, intersecting: bool, ratio: f64) {
        if intersecting {
            self.ratios.insert(section, ratio);
        } else {
            self.ratios.remove(&section);
        }
    }

    pub fn active(&mut self) -> Option<SectionId> {
        let best = self
            .ratios
            .iter()
            .max_by(|(left_id, left), (right_id, right)| {
                left.total_cmp(right)
                    .then_with(|| right_id.position().cmp(&left_id.position()))
            })
            .map(|(section, _)| *section);

        if let Some(section) = best {
            if self.last_active != Some(section) {
                log::debug!("active section -> {}", section.anchor());
            }
            self.last_active = Some(section);
        }

        self.last_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_round_trip_through_lookup() {
        assert_eq!(SectionId::from_anchor("publications"), Some(SectionId::Publications));
        assert_eq!(SectionId::from_anchor("contact"), None);
    }

    #[test]
    fn next_section_cycles_in_document_order() {
        assert_eq!(SectionId::next_after(None), SectionId::About);
        assert_eq!(SectionId::next_after(Some(SectionId::About)), SectionId::Experience);
        assert_eq!(SectionId::next_after(Some(SectionId::Skills)), SectionId::Hero);
    }

    #[test]
    fn most_visible_section_wins() {
        let mut tracker = ActiveSectionTracker::default();
        tracker.observe(SectionId::About, true, 0.35);
        tracker.observe(SectionId::Experience, true, 0.6);
        assert_eq!(tracker.active(), Some(SectionId::Experience));

        tracker.observe(SectionId::Experience, false, 0.0);
        assert_eq!(tracker.active(), Some(SectionId::About));
    }

    #[test]
    fn exact_ties_prefer_earlier_section() {
        let mut tracker = ActiveSectionTracker::default();
        tracker.observe(SectionId::Skills, true, 0.5);
        tracker.observe(SectionId::Projects, true, 0.5);
        assert_eq!(tracker.active(), Some(SectionId::Projects));
    }

    #[test]
    fn keeps_last_active_when_nothing_intersects() {
        let mut tracker = ActiveSectionTracker::default();
        assert_eq!(tracker.active(), None);

        tracker.observe(SectionId::Hero, true, 1.0);
        assert_eq!(tracker.active(), Some(SectionId::Hero));

        tracker.observe(SectionId::Hero, false, 0.0);
        assert_eq!(tracker.active(), Some(SectionId::Hero));
    }
}
