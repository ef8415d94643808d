//! Which affordances a pagination row shows, and which of them are live

use std::fmt;

/// One position in the pagination row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    First,
    Previous,
    Page(i64),
    /// Stands for a run of hidden pages
    Ellipsis,
    Next,
    Last,
}

impl Affordance {
    /// Text drawn inside the affordance's button
    pub fn label(&self) -> String {
        match self {
            Affordance::First => "«".to_string(),
            Affordance::Previous => "‹".to_string(),
            Affordance::Page(page) => page.to_string(),
            Affordance::Ellipsis => "…".to_string(),
            Affordance::Next => "›".to_string(),
            Affordance::Last => "»".to_string(),
        }
    }
}

/// An affordance together with its target and availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub affordance: Affordance,
    /// Page this slot navigates to; always within bounds when present
    pub target: Option<i64>,
    /// Whether activating the slot would commit a page change
    pub enabled: bool,
    /// Whether this slot is the displayed page
    pub current: bool,
}

impl Slot {
    fn nav(affordance: Affordance, target: i64, enabled: bool) -> Self {
        Self {
            affordance,
            target: Some(target),
            enabled,
            current: false,
        }
    }
}

/// How many numbered pages stay visible around the edges and the current page
///
/// The full range is shown when it fits in [`PageWindow::budget`] numbered
/// slots; otherwise hidden runs collapse into ellipses. `min`, `max` and the
/// current page are always visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Pages pinned at each end (at least 1)
    pub boundaries: u16,
    /// Pages on each side of the current page
    pub siblings: u16,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            boundaries: 1,
            siblings: 1,
        }
    }
}

/// Inclusive range, empty when `start > end`
fn span(start: i128, end: i128) -> impl Iterator<Item = i128> {
    start..=end
}

impl PageWindow {
    pub fn new(boundaries: u16, siblings: u16) -> Self {
        Self {
            boundaries: boundaries.max(1),
            siblings,
        }
    }

    /// Numbered slots the row holds before truncating
    pub fn budget(&self) -> i128 {
        let b = i128::from(self.boundaries.max(1));
        let s = i128::from(self.siblings);
        2 * b + 2 * s + 3
    }

    /// Page numbers and ellipses for `value` within `[min, max]`
    ///
    /// Expects `min <= value <= max`.
    pub fn items(&self, value: i64, min: i64, max: i64) -> Vec<Affordance> {
        let b = i128::from(self.boundaries.max(1));
        let s = i128::from(self.siblings);
        let base = i128::from(min);
        // 1-based position within the range
        let count = i128::from(max) - base + 1;
        let page = i128::from(value) - base + 1;
        let to_page = |position: i128| Affordance::Page((base + position - 1) as i64);

        if count <= self.budget() {
            return span(1, count).map(to_page).collect();
        }

        let start_end = b.min(count);
        let end_start = (count - b + 1).max(b + 1);
        let siblings_start = (page - s).min(count - b - 2 * s - 1).max(b + 2);
        let siblings_end = (page + s).max(b + 2 * s + 2).min(end_start - 2);

        let mut items: Vec<Affordance> = span(1, start_end).map(to_page).collect();

        if siblings_start > b + 2 {
            items.push(Affordance::Ellipsis);
        } else if b + 1 < count - b {
            items.push(to_page(b + 1));
        }

        items.extend(span(siblings_start, siblings_end).map(to_page));

        if siblings_end < count - b - 1 {
            items.push(Affordance::Ellipsis);
        } else if count - b > b {
            items.push(to_page(count - b));
        }

        items.extend(span(end_start, count).map(to_page));
        items
    }
}

/// Props that break the `min <= value <= max` contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractViolation {
    /// `min > max`
    InvertedBounds { min: i64, max: i64 },
    /// `value` outside `[min, max]`
    ValueOutOfRange { value: i64, min: i64, max: i64 },
}

impl ContractViolation {
    /// Check pagination props
    pub fn check(value: i64, min: i64, max: i64) -> Option<Self> {
        if min > max {
            Some(ContractViolation::InvertedBounds { min, max })
        } else if value < min || value > max {
            Some(ContractViolation::ValueOutOfRange { value, min, max })
        } else {
            None
        }
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::InvertedBounds { min, max } => {
                write!(f, "pagination bounds are inverted: min {min} > max {max}")
            }
            ContractViolation::ValueOutOfRange { value, min, max } => {
                write!(f, "pagination value {value} is outside [{min}, {max}]")
            }
        }
    }
}

impl std::error::Error for ContractViolation {}

/// The row to draw for one set of props
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub slots: Vec<Slot>,
    /// Page drawn as current, clamped into bounds
    pub shown: i64,
    pub violation: Option<ContractViolation>,
}

impl PageLayout {
    /// Lay out the row for `value` within `[min, max]`
    ///
    /// With `interactive == false` (a commit is in flight) every slot is
    /// disabled. Inverted bounds disable everything and show only `value`.
    pub fn new(value: i64, min: i64, max: i64, window: PageWindow, interactive: bool) -> Self {
        let violation = ContractViolation::check(value, min, max);

        if let Some(ContractViolation::InvertedBounds { .. }) = violation {
            return Self {
                slots: vec![
                    Slot::nav(Affordance::First, value, false),
                    Slot::nav(Affordance::Previous, value, false),
                    Slot {
                        affordance: Affordance::Page(value),
                        target: None,
                        enabled: false,
                        current: true,
                    },
                    Slot::nav(Affordance::Next, value, false),
                    Slot::nav(Affordance::Last, value, false),
                ],
                shown: value,
                violation,
            };
        }

        let shown = value.clamp(min, max);
        let can_back = interactive && shown > min;
        let can_forward = interactive && shown < max;

        let mut slots = Vec::with_capacity(window.budget() as usize + 4);
        slots.push(Slot::nav(Affordance::First, min, can_back));
        slots.push(Slot::nav(Affordance::Previous, shown.saturating_sub(1).max(min), can_back));

        for item in window.items(shown, min, max) {
            slots.push(match item {
                Affordance::Page(page) => Slot {
                    affordance: item,
                    target: Some(page),
                    enabled: interactive && page != shown,
                    current: page == shown,
                },
                _ => Slot {
                    affordance: item,
                    target: None,
                    enabled: false,
                    current: false,
                },
            });
        }

        slots.push(Slot::nav(Affordance::Next, shown.saturating_add(1).min(max), can_forward));
        slots.push(Slot::nav(Affordance::Last, max, can_forward));

        Self {
            slots,
            shown,
            violation,
        }
    }

    /// Slot for an affordance, if the row has one
    pub fn slot(&self, affordance: Affordance) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.affordance == affordance)
    }

    /// Index of an affordance in the row
    pub fn position(&self, affordance: Affordance) -> Option<usize> {
        self.slots.iter().position(|slot| slot.affordance == affordance)
    }

    /// Target of an enabled slot
    pub fn enabled_target(&self, affordance: Affordance) -> Option<i64> {
        self.slot(affordance)
            .filter(|slot| slot.enabled)
            .and_then(|slot| slot.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(items: &[Affordance]) -> String {
        items
            .iter()
            .map(Affordance::label)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_small_range_shows_every_page() {
        let window = PageWindow::default();
        assert_eq!(pages(&window.items(3, 1, 7)), "1 2 3 4 5 6 7");
        assert_eq!(pages(&window.items(1, 1, 1)), "1");
    }

    #[test]
    fn test_truncation_near_edges() {
        let window = PageWindow::default();
        assert_eq!(pages(&window.items(1, 1, 10)), "1 2 3 4 5 … 10");
        assert_eq!(pages(&window.items(10, 1, 10)), "1 … 6 7 8 9 10");
    }

    #[test]
    fn test_truncation_in_the_middle() {
        let window = PageWindow::default();
        assert_eq!(pages(&window.items(5, 1, 10)), "1 … 4 5 6 … 10");
        assert_eq!(pages(&window.items(4, 1, 10)), "1 2 3 4 5 … 10");
    }

    #[test]
    fn test_offset_ranges() {
        let window = PageWindow::default();
        assert_eq!(pages(&window.items(0, 0, 9)), "0 1 2 3 4 … 9");
        assert_eq!(pages(&window.items(-3, -10, 10)), "-10 … -4 -3 -2 … 10");
    }

    #[test]
    fn test_window_always_contains_edges_and_current() {
        for window in [PageWindow::default(), PageWindow::new(2, 0), PageWindow::new(1, 3)] {
            for (min, max) in [(1, 10), (1, 50), (-5, 30), (0, 8)] {
                for value in min..=max {
                    let items = window.items(value, min, max);
                    for needed in [min, max, value] {
                        assert!(
                            items.contains(&Affordance::Page(needed)),
                            "{window:?} value={value} [{min},{max}] missing {needed}: {}",
                            pages(&items)
                        );
                    }
                    let numbered = items
                        .iter()
                        .filter(|i| matches!(i, Affordance::Page(_)))
                        .count() as i128;
                    assert!(numbered <= window.budget());
                }
            }
        }
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let items = PageWindow::default().items(0, i64::MIN, i64::MAX);
        assert!(items.contains(&Affordance::Page(i64::MIN)));
        assert!(items.contains(&Affordance::Page(i64::MAX)));
        assert!(items.contains(&Affordance::Page(0)));
    }

    #[test]
    fn test_boundary_disabling() {
        let at_min = PageLayout::new(1, 1, 10, PageWindow::default(), true);
        assert_eq!(at_min.enabled_target(Affordance::First), None);
        assert_eq!(at_min.enabled_target(Affordance::Previous), None);
        assert_eq!(at_min.enabled_target(Affordance::Next), Some(2));
        assert_eq!(at_min.enabled_target(Affordance::Last), Some(10));

        let at_max = PageLayout::new(10, 1, 10, PageWindow::default(), true);
        assert_eq!(at_max.enabled_target(Affordance::Previous), Some(9));
        assert_eq!(at_max.enabled_target(Affordance::Next), None);
        assert_eq!(at_max.enabled_target(Affordance::Last), None);

        let single = PageLayout::new(4, 4, 4, PageWindow::default(), true);
        assert!(single.slots.iter().all(|slot| !slot.enabled));
        assert!(single.slot(Affordance::Page(4)).is_some_and(|s| s.current));
    }

    #[test]
    fn test_current_page_is_not_enabled() {
        let layout = PageLayout::new(3, 1, 10, PageWindow::default(), true);
        let current = layout.slot(Affordance::Page(3)).expect("current page slot");
        assert!(current.current);
        assert!(!current.enabled);
        assert!(layout.slot(Affordance::Page(2)).is_some_and(|s| s.enabled));
    }

    #[test]
    fn test_non_interactive_disables_everything() {
        let layout = PageLayout::new(3, 1, 10, PageWindow::default(), false);
        assert!(layout.slots.iter().all(|slot| !slot.enabled));
    }

    #[test]
    fn test_value_out_of_range_is_clamped() {
        let layout = PageLayout::new(42, 1, 10, PageWindow::default(), true);
        assert_eq!(
            layout.violation,
            Some(ContractViolation::ValueOutOfRange {
                value: 42,
                min: 1,
                max: 10
            })
        );
        assert_eq!(layout.shown, 10);
        assert_eq!(layout.enabled_target(Affordance::Next), None);
        assert_eq!(layout.enabled_target(Affordance::Previous), Some(9));
    }

    #[test]
    fn test_inverted_bounds_disable_everything() {
        let layout = PageLayout::new(5, 10, 1, PageWindow::default(), true);
        assert_eq!(
            layout.violation,
            Some(ContractViolation::InvertedBounds { min: 10, max: 1 })
        );
        assert!(layout.slots.iter().all(|slot| !slot.enabled));
        let numbered: Vec<_> = layout
            .slots
            .iter()
            .filter(|s| matches!(s.affordance, Affordance::Page(_)))
            .collect();
        assert_eq!(numbered.len(), 1);
        assert_eq!(numbered[0].affordance, Affordance::Page(5));
    }

    #[test]
    fn test_targets_stay_in_bounds() {
        for value in 1..=10 {
            let layout = PageLayout::new(value, 1, 10, PageWindow::default(), true);
            for slot in &layout.slots {
                if let Some(target) = slot.target {
                    assert!((1..=10).contains(&target), "{slot:?}");
                }
            }
        }
    }
}
