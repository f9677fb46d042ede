/// Vertical extent of a page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Header modifier derived from the active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    Hero,
    Section,
}

impl HeaderMode {
    pub fn class(self) -> &'static str {
        match self {
            HeaderMode::Hero => "hero-active",
            HeaderMode::Section => "section-active",
        }
    }
}

/// Follows which linked section sits under the top of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTracker {
    lookahead: f64,
    /// Section ids that have a navigation link pointing at them.
    linked: Vec<String>,
    active: Option<String>,
}

impl SectionTracker {
    pub fn new(lookahead: f64, linked: Vec<String>) -> Self {
        Self {
            lookahead,
            linked,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recomputes the active section for `scroll_y`. The first linked section
    /// in document order containing the lookahead point wins; with no match
    /// the previous section stays active, or the first section on first run.
    pub fn update(&mut self, scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
        let position = scroll_y + self.lookahead;
        let hit = sections
            .iter()
            .find(|section| section.contains(position) && self.is_linked(&section.id));
        match hit {
            Some(section) => self.active = Some(section.id.clone()),
            None if self.active.is_none() => {
                self.active = sections.first().map(|section| section.id.clone());
            }
            None => {}
        }
        self.active()
    }

    fn is_linked(&self, id: &str) -> bool {
        self.linked.iter().any(|linked| linked == id)
    }

    pub fn header_mode(&self) -> HeaderMode {
        match self.active() {
            Some("hero") => HeaderMode::Hero,
            _ => HeaderMode::Section,
        }
    }

    /// Whether a link with this `href` should carry the active marker.
    pub fn is_active_href(&self, href: &str) -> bool {
        match (self.active(), href.strip_prefix('#')) {
            (Some(active), Some(target)) => active == target,
            _ => false,
        }
    }
}

/// Section id a navigation `href` points at, if it is an in-page anchor.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
