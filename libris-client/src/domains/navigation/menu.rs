use libris_model::Rank;

use crate::domains::auth::has_at_least;

/// A navigation destination and the least rank that may see it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub required: Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCategory {
    pub title: &'static str,
    pub entries: &'static [MenuEntry],
}

const fn entry(label: &'static str, required: Rank) -> MenuEntry {
    MenuEntry { label, required }
}

pub const MENU: &[MenuCategory] = &[
    MenuCategory {
        title: "Catalog",
        entries: &[entry("Items", Rank::User), entry("Employees", Rank::Admin)],
    },
    MenuCategory {
        title: "System",
        entries: &[entry("Settings", Rank::User)],
    },
    MenuCategory {
        title: "Developer Tools",
        entries: &[
            entry("Analytics", Rank::Manager),
            entry("Performance", Rank::Dev),
            entry("Test Lab", Rank::Dev),
        ],
    },
];

/// A category with only the entries the rank may see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleCategory {
    pub title: &'static str,
    pub entries: Vec<&'static str>,
}

/// Menu as shown to `rank`. Categories left without entries are omitted.
pub fn visible_menu(rank: Rank) -> Vec<VisibleCategory> {
    MENU.iter()
        .filter_map(|category| {
            let entries: Vec<&'static str> = category
                .entries
                .iter()
                .filter(|entry| has_at_least(rank, entry.required))
                .map(|entry| entry.label)
                .collect();
            (!entries.is_empty()).then_some(VisibleCategory {
                title: category.title,
                entries,
            })
        })
        .collect()
}
