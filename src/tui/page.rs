use crate::state::chat::ChatState;
use crate::state::insights::InsightsState;
use crate::state::login::LoginState;
use crate::state::questions::QuestionsState;
use crate::state::upload::UploadState;
use crate::state::{Route, ThemePreference};

/// Dashboard quick actions, in display order
pub const QUICK_ACTIONS: [(&str, &str, &str); 3] = [
    (
        "Upload Syllabus",
        "Upload your course syllabus PDF to get started",
        "/syllabus-upload",
    ),
    (
        "AI Assistant",
        "Ask exam-oriented questions about your syllabus",
        "/ai-assistant",
    ),
    (
        "Important Questions",
        "Generate exam-oriented questions by unit",
        "/important-questions",
    ),
];

/// Cursor over a fixed-length list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
}

impl ListCursor {
    pub fn at(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn step(&mut self, forward: bool, len: usize) {
        if len == 0 {
            return;
        }
        self.index = if forward {
            (self.index + 1).min(len - 1)
        } else {
            self.index.saturating_sub(1)
        };
    }
}

/// The mounted screen and its state. Replaced wholesale on navigation.
#[derive(Debug)]
pub enum Page {
    Login(LoginState),
    Dashboard(ListCursor),
    Upload(UploadState),
    Assistant(ChatState),
    Questions(QuestionsState),
    Insights(InsightsState),
    Settings(ListCursor),
    NotFound,
}

impl Page {
    pub fn mount(route: Route, theme: ThemePreference) -> Self {
        match route {
            Route::Login => Page::Login(LoginState::default()),
            Route::Dashboard => Page::Dashboard(ListCursor::default()),
            Route::SyllabusUpload => Page::Upload(UploadState::default()),
            Route::AiAssistant => Page::Assistant(ChatState::new()),
            Route::ImportantQuestions => Page::Questions(QuestionsState::default()),
            Route::FacultyInsights => Page::Insights(InsightsState::default()),
            Route::Settings => {
                let current = ThemePreference::ALL
                    .iter()
                    .position(|t| *t == theme)
                    .unwrap_or(0);
                Page::Settings(ListCursor::at(current))
            }
            Route::NotFound => Page::NotFound,
        }
    }

    /// Whether the page has a text field reachable with `e`.
    pub fn has_text_input(&self) -> bool {
        matches!(self, Page::Upload(_) | Page::Assistant(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_matches_route() {
        assert!(matches!(
            Page::mount(Route::Login, ThemePreference::System),
            Page::Login(_)
        ));
        assert!(matches!(
            Page::mount(Route::NotFound, ThemePreference::System),
            Page::NotFound
        ));
        match Page::mount(Route::Settings, ThemePreference::Dark) {
            Page::Settings(cursor) => assert_eq!(cursor.index(), 1),
            other => panic!("unexpected page {:?}", other),
        }
    }

    #[test]
    fn test_cursor_clamps() {
        let mut cursor = ListCursor::default();
        cursor.step(false, 3);
        assert_eq!(cursor.index(), 0);
        for _ in 0..5 {
            cursor.step(true, 3);
        }
        assert_eq!(cursor.index(), 2);
    }
}
