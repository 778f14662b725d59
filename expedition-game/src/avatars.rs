use serde::Serialize;

use crate::constants::DEFAULT_AVATAR_ICON;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Avatar {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub palette: &'static str,
}

pub static AVATARS: [Avatar; 6] = [
    Avatar {
        id: "beaver",
        name: "Buddy the Beaver",
        icon: "🦫",
        description: "Hardworking and fast!",
        palette: "amber",
    },
    Avatar {
        id: "moose",
        name: "Monty the Moose",
        icon: "🫎",
        description: "Strong and steady.",
        palette: "orange",
    },
    Avatar {
        id: "polarbear",
        name: "Pip the Polar Bear",
        icon: "🐻‍❄️",
        description: "Cool and collected.",
        palette: "blue",
    },
    Avatar {
        id: "loon",
        name: "Luna the Loon",
        icon: "🦆",
        description: "Wise and elegant.",
        palette: "slate",
    },
    Avatar {
        id: "goose",
        name: "Gary the Goose",
        icon: "🪿",
        description: "Determined and loud!",
        palette: "gray",
    },
    Avatar {
        id: "raccoon",
        name: "Rick the Raccoon",
        icon: "🦝",
        description: "Clever and curious.",
        palette: "zinc",
    },
];

#[must_use]
pub fn avatar_by_id(id: &str) -> Option<&'static Avatar> {
    AVATARS.iter().find(|avatar| avatar.id == id)
}

/// Icon for `id`, falling back to the maple leaf for unknown ids.
#[must_use]
pub fn icon_for(id: &str) -> &'static str {
    avatar_by_id(id).map_or(DEFAULT_AVATAR_ICON, |avatar| avatar.icon)
}

/// Avatar offered to a freshly added setup slot; cycles through the catalog.
#[must_use]
pub fn default_avatar_for_slot(slot: usize) -> &'static Avatar {
    &AVATARS[slot % AVATARS.len()]
}
