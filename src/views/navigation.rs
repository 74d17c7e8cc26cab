//! Sidebar navigation shell.

use serde::Serialize;

use crate::domain::auth::AuthenticatedUser;
use crate::{SERVICE_ADMIN_ROLE, SERVICE_HAIRSTYLIST_ROLE};

/// Path of the dashboard landing page.
pub const ROOT_DASHBOARD_PATH: &str = "/";
/// Target of the logout action rendered under the menu.
pub const LOGOUT_PATH: &str = "/logout";

/// One configured sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub title: &'static str,
    pub path: &'static str,
    /// Bootstrap icon class.
    pub icon: &'static str,
}

impl MenuItem {
    pub const fn new(title: &'static str, path: &'static str, icon: &'static str) -> Self {
        Self { title, path, icon }
    }
}

const DASHBOARD: MenuItem = MenuItem::new("Dashboard", ROOT_DASHBOARD_PATH, "bi-speedometer2");

pub const HAIRSTYLIST_MENU: &[MenuItem] = &[
    DASHBOARD,
    MenuItem::new("My members", "/members", "bi-people"),
];

pub const ADMIN_MENU: &[MenuItem] = &[
    DASHBOARD,
    MenuItem::new("All members", "/members/all", "bi-person-lines-fill"),
    MenuItem::new("Hairstylists", "/hairstylists", "bi-scissors"),
];

/// Exact-match rule: the root item is active only on the root path, every
/// other item only on its own path. Prefixes never match.
pub fn is_active(item_path: &str, current_path: &str) -> bool {
    if item_path == ROOT_DASHBOARD_PATH {
        current_path == ROOT_DASHBOARD_PATH
    } else {
        item_path == current_path
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub title: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Template-ready sidebar.
#[derive(Clone, Debug, Serialize)]
pub struct NavigationView {
    pub entries: Vec<NavEntry>,
    pub logout_path: &'static str,
}

#[derive(Clone, Debug, Default)]
pub struct NavigationShell {
    items: Vec<MenuItem>,
}

impl NavigationShell {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Hairstylist entries first, then admin entries, without duplicate paths.
    pub fn for_user(user: &AuthenticatedUser) -> Self {
        let mut items: Vec<MenuItem> = Vec::new();
        let mut push_all = |menu: &[MenuItem]| {
            for item in menu {
                if !items.iter().any(|existing| existing.path == item.path) {
                    items.push(item.clone());
                }
            }
        };

        let is_hairstylist = user.has_role(SERVICE_HAIRSTYLIST_ROLE);
        let is_admin = user.has_role(SERVICE_ADMIN_ROLE);

        if is_hairstylist {
            push_all(HAIRSTYLIST_MENU);
        }
        if is_admin {
            push_all(ADMIN_MENU);
        }
        if !is_hairstylist && !is_admin {
            push_all(&[DASHBOARD]);
        }

        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn render(&self, current_path: &str) -> NavigationView {
        let entries = self
            .items
            .iter()
            .map(|item| NavEntry {
                title: item.title,
                path: item.path,
                icon: item.icon,
                active: is_active(item.path, current_path),
            })
            .collect();

        NavigationView {
            entries,
            logout_path: LOGOUT_PATH,
        }
    }
}
