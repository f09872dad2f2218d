use macroquad::prelude::*;

pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub color: Color,
    pub unlocked: bool,
}

pub const DEFAULT_SKIN: &str = "default";

pub fn skin_catalog() -> Vec<Skin> {
    vec![
        Skin {
            id: "default",
            name: "Classic White",
            color: WHITE,
            unlocked: true,
        },
        Skin {
            id: "red",
            name: "Red Knight",
            color: Color::new(1.0, 0.0, 0.0, 1.0),
            unlocked: true,
        },
        Skin {
            id: "blue",
            name: "Blue Hero",
            color: Color::new(0.0, 0.0, 1.0, 1.0),
            unlocked: true,
        },
        Skin {
            id: "green",
            name: "Green Ranger",
            color: Color::new(0.0, 1.0, 0.0, 1.0),
            unlocked: false,
        },
        Skin {
            id: "yellow",
            name: "Golden Star",
            color: Color::new(1.0, 0.84, 0.0, 1.0),
            unlocked: false,
        },
        Skin {
            id: "purple",
            name: "Purple Wizard",
            color: Color::new(0.61, 0.35, 0.71, 1.0),
            unlocked: false,
        },
    ]
}

/// Returns the new selection, or the old one when the pick is locked or
/// unknown.
pub fn select_skin<'a>(catalog: &[Skin], current: &'a str, pick: &'a str) -> &'a str {
    match catalog.iter().find(|s| s.id == pick) {
        Some(skin) if skin.unlocked => pick,
        _ => current,
    }
}

pub fn skin_color(catalog: &[Skin], id: &str) -> Color {
    catalog
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.color)
        .unwrap_or(WHITE)
}
