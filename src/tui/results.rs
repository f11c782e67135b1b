//! Result tab and selection state
//!
//! Selection is a cursor into the flattened list of the active tab.
//! Arrow keys wrap around; switching tabs or committing a new query
//! always drops the selection.

use crate::api::types::ResultKind;

/// Active tab plus selection/scroll state
pub struct ResultsState {
    pub active_tab: ResultKind,
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub visible_rows: usize,
}

impl Default for ResultsState {
    fn default() -> Self {
        Self {
            active_tab: ResultKind::Restaurant,
            selected: None,
            scroll_offset: 0,
            visible_rows: 20,
        }
    }
}

impl ResultsState {
    /// Move down, wrapping from the last row to the first
    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) if i + 1 < total => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    /// Move up, wrapping from the first row to the last
    pub fn select_prev(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(0) | None => total - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    /// Drop the selection (new query or tab change)
    pub fn reset_selection(&mut self) {
        self.selected = None;
        self.scroll_offset = 0;
    }

    /// Advance to the next category tab
    pub fn next_tab(&mut self) {
        self.set_tab(Self::neighbor(self.active_tab, 1));
    }

    /// Go back to the previous category tab
    pub fn prev_tab(&mut self) {
        self.set_tab(Self::neighbor(self.active_tab, ResultKind::ALL.len() - 1));
    }

    fn set_tab(&mut self, tab: ResultKind) {
        if tab != self.active_tab {
            self.active_tab = tab;
            self.reset_selection();
        }
    }

    fn neighbor(tab: ResultKind, step: usize) -> ResultKind {
        let idx = ResultKind::ALL.iter().position(|k| *k == tab).unwrap_or(0);
        ResultKind::ALL[(idx + step) % ResultKind::ALL.len()]
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_from_no_selection_picks_first() {
        let mut view = ResultsState::default();
        view.select_next(3);
        assert_eq!(view.selected, Some(0));
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut view = ResultsState::default();
        view.select_next(2);
        view.select_next(2);
        assert_eq!(view.selected, Some(1));
        view.select_next(2);
        assert_eq!(view.selected, Some(0));

        view.select_prev(2);
        assert_eq!(view.selected, Some(1));
    }

    #[test]
    fn up_from_no_selection_picks_last() {
        let mut view = ResultsState::default();
        view.select_prev(4);
        assert_eq!(view.selected, Some(3));
    }

    #[test]
    fn empty_list_keeps_no_selection() {
        let mut view = ResultsState::default();
        view.select_next(0);
        view.select_prev(0);
        assert_eq!(view.selected, None);
    }

    #[test]
    fn tab_switch_resets_selection() {
        let mut view = ResultsState::default();
        view.select_next(5);
        assert_eq!(view.selected, Some(0));

        view.next_tab();
        assert_eq!(view.active_tab, ResultKind::List);
        assert_eq!(view.selected, None);

        // Next Down selects index 0 again, not 1
        view.select_next(5);
        assert_eq!(view.selected, Some(0));
    }

    #[test]
    fn tabs_cycle_through_all_four() {
        let mut view = ResultsState::default();
        for expected in [
            ResultKind::List,
            ResultKind::Post,
            ResultKind::User,
            ResultKind::Restaurant,
        ] {
            view.next_tab();
            assert_eq!(view.active_tab, expected);
        }
        view.prev_tab();
        assert_eq!(view.active_tab, ResultKind::User);
    }
}
