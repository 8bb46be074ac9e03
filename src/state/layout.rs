use crate::state::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

pub const MAIN_NAV: [NavItem; 5] = [
    NavItem { label: "Dashboard", path: "/dashboard", icon: "▦" },
    NavItem { label: "Syllabus Upload", path: "/syllabus-upload", icon: "⇪" },
    NavItem { label: "AI Assistant", path: "/ai-assistant", icon: "◉" },
    NavItem { label: "Important Questions", path: "/important-questions", icon: "?" },
    NavItem { label: "Faculty Insights", path: "/faculty-insights", icon: "▥" },
];

pub const BOTTOM_NAV: [NavItem; 1] = [NavItem { label: "Settings", path: "/settings", icon: "⚙" }];

/// All sidebar entries, main group first.
pub fn nav_items() -> impl Iterator<Item = &'static NavItem> {
    MAIN_NAV.iter().chain(BOTTOM_NAV.iter())
}

/// Sidebar state. The highlighted entry is derived from the route on every
/// draw and never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebar {
    collapsed: bool,
}

impl Sidebar {
    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
        tracing::debug!(collapsed = self.collapsed, "sidebar toggled");
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn width(&self) -> u16 {
        if self.collapsed {
            5
        } else {
            26
        }
    }

    pub fn active_item(&self, route: Route) -> Option<&'static NavItem> {
        let path = route.path()?;
        nav_items().find(|item| item.path == path)
    }
}
