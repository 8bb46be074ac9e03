use crate::catalog;
use crate::state::expand::ExpandSet;

/// What a regenerate action covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenTarget {
    Unit(String),
    All,
}

/// State of the important questions screen
#[derive(Debug, Clone)]
pub struct QuestionsState {
    expanded: ExpandSet<String>,
    regenerating: Option<RegenTarget>,
    cursor: usize,
}

impl Default for QuestionsState {
    fn default() -> Self {
        Self {
            expanded: ExpandSet::with_open(["1".to_string()]),
            regenerating: None,
            cursor: 0,
        }
    }
}

impl QuestionsState {
    pub fn is_expanded(&self, unit_id: &str) -> bool {
        self.expanded.is_expanded(&unit_id.to_string())
    }

    pub fn toggle(&mut self, unit_id: &str) {
        self.expanded.toggle(unit_id.to_string());
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let count = catalog::question_bank().len();
        self.cursor = if forward {
            (self.cursor + 1).min(count.saturating_sub(1))
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    pub fn focused_unit(&self) -> Option<&'static str> {
        catalog::question_bank().get(self.cursor).map(|u| u.unit_id)
    }

    pub fn toggle_focused(&mut self) {
        if let Some(id) = self.focused_unit() {
            self.toggle(id);
        }
    }

    pub fn regenerating(&self) -> Option<&RegenTarget> {
        self.regenerating.as_ref()
    }

    /// Whether the control for `target` is disabled right now.
    pub fn is_regenerating(&self, target: &RegenTarget) -> bool {
        match &self.regenerating {
            Some(RegenTarget::All) => true,
            Some(current) => current == target,
            None => false,
        }
    }

    /// Start regenerating. A disabled control does nothing; another unit
    /// takes over the indicator.
    pub fn begin_regenerate(&mut self, target: RegenTarget) -> bool {
        if self.is_regenerating(&target) {
            return false;
        }
        self.regenerating = Some(target);
        true
    }

    /// Clear the indicator if it still belongs to `target`.
    pub fn finish_regenerate(&mut self, target: &RegenTarget) {
        if self.regenerating.as_ref() == Some(target) {
            self.regenerating = None;
        }
    }
}
