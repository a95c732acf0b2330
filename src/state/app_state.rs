use crate::app::MenuItem;
use crate::state::form::FormSession;
use bb_league::prompt::PromptInputs;

// ---------------------------------------------------------------------------
// Per-collection list view state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CollectionView {
    /// Selected row index into the collection.
    pub selected: usize,
    /// Vertical scroll offset for when rows exceed terminal height.
    pub scroll: u16,
}

impl CollectionView {
    pub fn move_down(&mut self, len: usize) {
        let max = len.saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Re-clamp after a delete so the marker never points past the end.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        if len == 0 {
            self.selected = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt tab state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PromptState {
    pub inputs: PromptInputs,
    /// Last generated prompt text, empty until `g` is pressed.
    pub text: String,
    pub scroll: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_intro: bool,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// One-line outcome of the last operation (saves, renames, deletions).
    pub status: Option<String>,
    /// Active modal form, if any. While set, all keys go to the form.
    pub form: Option<FormSession>,
    /// Index pending deletion in the active tab, awaiting `y`.
    pub pending_delete: Option<usize>,
    pub teams: CollectionView,
    pub players: CollectionView,
    pub matches: CollectionView,
    pub injuries: CollectionView,
    pub narratives: CollectionView,
    pub prompt: PromptState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            show_intro: true,
            ..Self::default()
        }
    }

    pub fn view(&self, tab: MenuItem) -> Option<&CollectionView> {
        match tab {
            MenuItem::Teams => Some(&self.teams),
            MenuItem::Players => Some(&self.players),
            MenuItem::Matches => Some(&self.matches),
            MenuItem::Injuries => Some(&self.injuries),
            MenuItem::Narratives => Some(&self.narratives),
            _ => None,
        }
    }

    pub fn view_mut(&mut self, tab: MenuItem) -> Option<&mut CollectionView> {
        match tab {
            MenuItem::Teams => Some(&mut self.teams),
            MenuItem::Players => Some(&mut self.players),
            MenuItem::Matches => Some(&mut self.matches),
            MenuItem::Injuries => Some(&mut self.injuries),
            MenuItem::Narratives => Some(&mut self.narratives),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_inside_bounds() {
        let mut view = CollectionView::default();
        view.move_up(); // empty list, no panic
        view.move_down(0);
        assert_eq!(view.selected, 0);

        view.move_down(3);
        view.move_down(3);
        view.move_down(3); // capped at len - 1
        assert_eq!(view.selected, 2);
    }

    #[test]
    fn clamp_after_delete() {
        let mut view = CollectionView {
            selected: 2,
            scroll: 0,
        };
        view.clamp(2);
        assert_eq!(view.selected, 1);
        view.clamp(0);
        assert_eq!(view.selected, 0);
    }
}
