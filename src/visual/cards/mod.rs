pub mod animations;
pub mod components;

use bevy::prelude::*;

use crate::card::CardView;

pub use animations::{animate_cards, sync_card_visuals};
pub use components::{Card, CardLeft, CardOverlay};

/// Z layer for cards; overlays sit just above their card
pub const CARD_Z: f32 = 1.0;
const OVERLAY_Z: f32 = 0.1;

/// Spawn a card entity with one overlay child per configured edge
pub fn spawn_card(commands: &mut Commands, view: CardView<Color>, color: Color) -> Entity {
    let size = view.frame().size();
    let center = view.center();
    let overlays: Vec<_> = view
        .overlays()
        .iter()
        .filter_map(|(direction, overlay)| overlay.as_ref().map(|color| (direction, *color)))
        .collect();

    commands
        .spawn((
            Sprite::from_color(color, size),
            Transform::from_translation(center.extend(CARD_Z)),
            Card::new(view),
        ))
        .with_children(|parent| {
            for (direction, overlay_color) in overlays {
                parent.spawn((
                    Sprite::from_color(overlay_color.with_alpha(0.0), size),
                    Transform::from_xyz(0.0, 0.0, OVERLAY_Z),
                    CardOverlay(direction),
                ));
            }
        })
        .id()
}
