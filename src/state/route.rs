use std::fmt;

/// Every screen the shell can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    SyllabusUpload,
    AiAssistant,
    ImportantQuestions,
    FacultyInsights,
    Settings,
    NotFound,
}

impl Route {
    /// Routes with a literal path, in table order.
    pub const KNOWN: [Route; 7] = [
        Route::Login,
        Route::Dashboard,
        Route::SyllabusUpload,
        Route::AiAssistant,
        Route::ImportantQuestions,
        Route::FacultyInsights,
        Route::Settings,
    ];

    /// Resolve a path. Anything outside the table is `NotFound`.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        Self::KNOWN
            .into_iter()
            .find(|route| route.path() == Some(path))
            .unwrap_or(Route::NotFound)
    }

    /// Literal path, `None` for the catch-all.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Route::Login => Some("/"),
            Route::Dashboard => Some("/dashboard"),
            Route::SyllabusUpload => Some("/syllabus-upload"),
            Route::AiAssistant => Some("/ai-assistant"),
            Route::ImportantQuestions => Some("/important-questions"),
            Route::FacultyInsights => Some("/faculty-insights"),
            Route::Settings => Some("/settings"),
            Route::NotFound => None,
        }
    }

    /// Whether the page is drawn inside the sidebar layout.
    pub fn in_layout(&self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::SyllabusUpload => "Syllabus Upload",
            Route::AiAssistant => "AI Assistant",
            Route::ImportantQuestions => "Important Questions",
            Route::FacultyInsights => "Faculty Insights",
            Route::Settings => "Settings",
            Route::NotFound => "Not Found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().unwrap_or("*"))
    }
}

/// Current location plus the path that produced it
#[derive(Debug, Clone)]
pub struct Router {
    route: Route,
    path: String,
}

impl Router {
    pub fn new(path: &str) -> Self {
        Self {
            route: Route::parse(path),
            path: path.trim().to_string(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// The path as requested, which differs from the route path on a miss.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Move to `path`, returning the route that was left when it changed.
    pub fn navigate(&mut self, path: &str) -> Option<Route> {
        let next = Route::parse(path);
        let previous = self.route;
        self.route = next;
        self.path = path.trim().to_string();
        tracing::info!(from = %previous, to = %self.path, "navigate");
        (previous != next).then_some(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_round_trip() {
        for route in Route::KNOWN {
            let path = route.path().unwrap();
            assert_eq!(Route::parse(path), route);
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Route::parse("/nope"), Route::NotFound);
        assert_eq!(Route::parse("/dashboard/extra"), Route::NotFound);
        assert_eq!(Route::parse(""), Route::NotFound);
    }

    #[test]
    fn test_login_and_not_found_are_outside_layout() {
        assert!(!Route::Login.in_layout());
        assert!(!Route::NotFound.in_layout());
        assert!(Route::Dashboard.in_layout());
        assert!(Route::Settings.in_layout());
    }

    #[test]
    fn test_navigate_reports_left_route() {
        let mut router = Router::new("/");
        assert_eq!(router.navigate("/dashboard"), Some(Route::Login));
        assert_eq!(router.navigate("/dashboard"), None);
        assert_eq!(router.navigate("/missing"), Some(Route::Dashboard));
        assert_eq!(router.route(), Route::NotFound);
        assert_eq!(router.path(), "/missing");
    }
}
