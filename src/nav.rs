//! Sidebar navigation model.
//!
//! The entry list is static; the only derived state is which entry is active
//! for the current path.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

/// Icon identifiers; the UI layer maps these to its icon set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    Package,
    ChefHat,
    TrendingUp,
    BarChart,
    ShoppingCart,
    Truck,
    Plug,
    Settings,
}

impl NavIcon {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Package => "package",
            Self::ChefHat => "chef-hat",
            Self::TrendingUp => "trending-up",
            Self::BarChart => "bar-chart",
            Self::ShoppingCart => "shopping-cart",
            Self::Truck => "truck",
            Self::Plug => "plug",
            Self::Settings => "settings",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub route: &'static str,
    pub icon: NavIcon,
}

/// A nav entry plus whether it matches the current path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub entry: NavEntry,
    pub active: bool,
}

pub const NAV_ENTRIES: &[NavEntry] = &[
    NavEntry { label: "Dashboard", route: "/", icon: NavIcon::Dashboard },
    NavEntry { label: "Inventory", route: "/inventory", icon: NavIcon::Package },
    NavEntry { label: "Menu & Recipes", route: "/menu", icon: NavIcon::ChefHat },
    NavEntry { label: "Sales", route: "/sales", icon: NavIcon::TrendingUp },
    NavEntry { label: "Forecasting", route: "/forecasting", icon: NavIcon::BarChart },
    NavEntry { label: "Ordering", route: "/ordering", icon: NavIcon::ShoppingCart },
    NavEntry { label: "Suppliers", route: "/suppliers", icon: NavIcon::Truck },
    NavEntry { label: "Integrations", route: "/integrations", icon: NavIcon::Plug },
    NavEntry { label: "Settings", route: "/settings", icon: NavIcon::Settings },
];

/// Produce the ordered nav list for `path`, flagging at most one entry active.
#[must_use]
pub fn nav_items(path: &str) -> Vec<NavItem> {
    let active = active_route(path);
    NAV_ENTRIES
        .iter()
        .map(|entry| NavItem { entry: *entry, active: Some(entry.route) == active })
        .collect()
}

/// The route of the entry matching `path`, preferring the most specific one.
#[must_use]
pub fn active_route(path: &str) -> Option<&'static str> {
    let path = normalize(path);
    NAV_ENTRIES
        .iter()
        .filter(|entry| route_matches(entry.route, path))
        .max_by_key(|entry| entry.route.len())
        .map(|entry| entry.route)
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn route_matches(route: &str, path: &str) -> bool {
    if route == "/" {
        return path == "/";
    }
    path == route || path.strip_prefix(route).is_some_and(|rest| rest.starts_with('/'))
}
