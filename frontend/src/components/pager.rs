//! Geometry-based paging for a horizontally scrolling card strip.
//!
//! A page is as many cards as fit side by side in the container. The state is
//! rebuilt from scratch whenever the layout changes and is never patched.

/// Card width assumed when the first card reports no width yet.
pub const FALLBACK_CARD_WIDTH: f64 = 320.0;

/// Read-only view of the carousel layout.
pub trait CarouselGeometry {
    fn container_width(&self) -> f64;
    /// Full scrollable width of the container's content.
    fn scroll_width(&self) -> f64;
    fn gap(&self) -> f64;
    /// Width of the first card.
    fn card_width(&self) -> f64;
    /// `offsetLeft` of every card, in document order.
    fn card_offsets(&self) -> Vec<f64>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagerState {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_offsets: Vec<f64>,
    pub visible_count: usize,
    pub max_scroll: f64,
}

/// Enabled state of the prev/next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub left: f64,
    pub smooth: bool,
}

impl Default for PagerState {
    fn default() -> Self {
        Self {
            current_page: 0,
            total_pages: 1,
            page_offsets: vec![0.0],
            visible_count: 1,
            max_scroll: 0.0,
        }
    }
}

impl PagerState {
    pub fn build(geometry: &impl CarouselGeometry) -> Self {
        let container_width = positive_or(geometry.container_width(), 1.0);
        let gap = geometry.gap().max(0.0);
        let card_width = positive_or(geometry.card_width(), FALLBACK_CARD_WIDTH);
        let offsets = geometry.card_offsets();
        let card_count = offsets.len();

        let per_page = ((container_width + gap) / (card_width + gap).max(1.0)).floor();
        let visible_count = (per_page as usize).max(1);
        let total_pages = card_count.div_ceil(visible_count).max(1);
        let max_scroll = (geometry.scroll_width() - container_width).max(0.0);

        let mut page_offsets: Vec<f64> = (0..total_pages)
            .map(|page| {
                // The last page shows the final `visible_count` cards.
                let first = (page * visible_count).min(card_count.saturating_sub(visible_count));
                offsets.get(first).copied().unwrap_or(0.0).min(max_scroll)
            })
            .collect();
        if max_scroll > 0.0 {
            if let Some(last) = page_offsets.last_mut() {
                *last = max_scroll;
            }
        }

        Self {
            current_page: 0,
            total_pages,
            page_offsets,
            visible_count,
            max_scroll,
        }
    }

    /// Rebuilds for a new layout, keeping the current page when it still
    /// exists and otherwise landing on the new last page.
    pub fn rebuild(&self, geometry: &impl CarouselGeometry) -> Self {
        let mut next = Self::build(geometry);
        next.current_page = self.current_page.min(next.total_pages - 1);
        next
    }

    pub fn clamp_page(&self, index: isize) -> usize {
        index.clamp(0, self.last_page() as isize) as usize
    }

    pub fn last_page(&self) -> usize {
        self.total_pages - 1
    }

    /// Moves to `index` (clamped). Returns where the container should scroll,
    /// or `None` when there is only one page.
    pub fn go_to_page(&mut self, index: isize, animated: bool) -> Option<ScrollRequest> {
        if self.total_pages <= 1 {
            self.current_page = 0;
            return None;
        }
        self.current_page = self.clamp_page(index);
        Some(self.scroll_request(animated))
    }

    /// Next page, wrapping from the last page back to the first.
    pub fn next_wrapping(&self) -> usize {
        if self.current_page < self.last_page() {
            self.current_page + 1
        } else {
            0
        }
    }

    pub fn scroll_request(&self, animated: bool) -> ScrollRequest {
        ScrollRequest {
            left: self.page_offsets.get(self.current_page).copied().unwrap_or(0.0),
            smooth: animated,
        }
    }

    pub fn controls(&self) -> Controls {
        Controls {
            prev_disabled: self.current_page == 0,
            next_disabled: self.current_page >= self.last_page(),
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::CarouselGeometry;

    /// Cards of equal width laid out left to right with a fixed gap.
    #[derive(Debug, Clone)]
    pub(crate) struct Strip {
        pub container: f64,
        pub card: f64,
        pub gap: f64,
        pub cards: usize,
    }

    impl CarouselGeometry for Strip {
        fn container_width(&self) -> f64 {
            self.container
        }

        fn scroll_width(&self) -> f64 {
            if self.cards == 0 {
                return self.container;
            }
            let content = self.cards as f64 * self.card + (self.cards - 1) as f64 * self.gap;
            content.max(self.container)
        }

        fn gap(&self) -> f64 {
            self.gap
        }

        fn card_width(&self) -> f64 {
            self.card
        }

        fn card_offsets(&self) -> Vec<f64> {
            (0..self.cards)
                .map(|i| i as f64 * (self.card + self.gap))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::Strip;
    use super::*;
    use pretty_assertions::assert_eq;

    fn strip(cards: usize) -> Strip {
        // 3 cards of 300px with 20px gaps fit in 960px.
        Strip {
            container: 960.0,
            card: 300.0,
            gap: 20.0,
            cards,
        }
    }

    #[test]
    fn seven_cards_three_per_page() {
        let state = PagerState::build(&strip(7));
        assert_eq!(state.visible_count, 3);
        assert_eq!(state.total_pages, 3);
        // 7 * 300 + 6 * 20 - 960
        assert_eq!(state.max_scroll, 1260.0);
        assert_eq!(state.page_offsets, vec![0.0, 960.0, 1260.0]);
        assert_eq!(state.page_offsets[2], state.max_scroll);
    }

    #[test]
    fn page_count_matches_ceiling_for_many_layouts() {
        for cards in 0..20 {
            for container in [1.0, 200.0, 320.0, 640.0, 960.0, 1280.0, 1920.0] {
                let geometry = Strip {
                    container,
                    card: 300.0,
                    gap: 20.0,
                    cards,
                };
                let state = PagerState::build(&geometry);
                assert!(state.visible_count >= 1);
                assert_eq!(
                    state.total_pages,
                    cards.div_ceil(state.visible_count).max(1),
                    "cards={} container={}",
                    cards,
                    container
                );
                assert_eq!(state.page_offsets.len(), state.total_pages);
                if state.max_scroll > 0.0 {
                    assert_eq!(*state.page_offsets.last().unwrap(), state.max_scroll);
                }
                assert!(state.page_offsets.iter().all(|o| *o <= state.max_scroll));
            }
        }
    }

    #[test]
    fn no_cards_is_a_single_inert_page() {
        let mut state = PagerState::build(&strip(0));
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.go_to_page(1, true), None);
        assert_eq!(state.go_to_page(-1, true), None);
        assert_eq!(state.current_page, 0);
        assert_eq!(
            state.controls(),
            Controls {
                prev_disabled: true,
                next_disabled: true
            }
        );
    }

    #[test]
    fn zero_widths_do_not_divide_by_zero() {
        let geometry = Strip {
            container: 0.0,
            card: 0.0,
            gap: 0.0,
            cards: 4,
        };
        let state = PagerState::build(&geometry);
        assert_eq!(state.visible_count, 1);
        assert_eq!(state.total_pages, 4);
    }

    #[test]
    fn go_to_page_clamps_and_is_idempotent() {
        let mut state = PagerState::build(&strip(7));
        let first = state.go_to_page(9, true);
        let first_controls = state.controls();
        let second = state.go_to_page(9, true);
        assert_eq!(first, second);
        assert_eq!(state.current_page, 2);
        assert_eq!(state.controls(), first_controls);
        assert_eq!(
            first_controls,
            Controls {
                prev_disabled: false,
                next_disabled: true
            }
        );

        let request = state.go_to_page(-3, false).unwrap();
        assert_eq!(request, ScrollRequest { left: 0.0, smooth: false });
        assert!(state.controls().prev_disabled);
    }

    #[test]
    fn next_wrapping_returns_to_start() {
        let mut state = PagerState::build(&strip(7));
        state.go_to_page(1, true);
        assert_eq!(state.next_wrapping(), 2);
        state.go_to_page(2, true);
        assert_eq!(state.next_wrapping(), 0);
    }

    #[test]
    fn rebuild_keeps_page_within_new_range() {
        let mut state = PagerState::build(&strip(7));
        state.go_to_page(2, false);
        let wider = Strip {
            container: 2300.0,
            ..strip(7)
        };
        let rebuilt = state.rebuild(&wider);
        assert_eq!(rebuilt.visible_count, 7);
        assert_eq!(rebuilt.total_pages, 1);
        assert_eq!(rebuilt.current_page, 0);

        let narrower = Strip {
            container: 640.0,
            ..strip(7)
        };
        let rebuilt = state.rebuild(&narrower);
        assert_eq!(rebuilt.visible_count, 2);
        assert_eq!(rebuilt.total_pages, 4);
        assert_eq!(rebuilt.current_page, 2);
    }
}
