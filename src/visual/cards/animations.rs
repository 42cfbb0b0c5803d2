use bevy::prelude::*;

use crate::card::CardEvent;
use crate::visual::cards::{CARD_Z, Card, CardLeft, CardOverlay};

/// System: Advance card animations and report cards that left the screen
pub fn animate_cards(
    time: Res<Time>,
    mut cards: Query<(Entity, &mut Card)>,
    mut left: MessageWriter<CardLeft>,
) {
    let dt = time.delta_secs();

    for (entity, mut card) in &mut cards {
        // Skip the change-detection write for idle cards
        if !card.view.is_animating() {
            continue;
        }
        match card.view.tick(dt) {
            Some(CardEvent::Left(direction)) => {
                info!("Card {entity} left through the {direction} edge");
                left.write(CardLeft { entity, direction });
            }
            Some(CardEvent::DemoFinished(direction)) => {
                info!("Demo {direction} finished - press R to reset");
            }
            Some(CardEvent::Returned) => debug!("Card {entity} back at rest"),
            Some(CardEvent::Shown) => debug!("Card {entity} shown"),
            None => {}
        }
    }
}

/// System: Copy each card's offset, rotation and opacity onto its sprites
pub fn sync_card_visuals(
    mut cards: Query<(&Card, &mut Transform, &mut Sprite), Changed<Card>>,
    mut overlays: Query<(&CardOverlay, &ChildOf, &mut Sprite), Without<Card>>,
) {
    for (card, mut transform, mut sprite) in &mut cards {
        let visuals = card.view.visuals();

        transform.translation = card.view.center().extend(CARD_Z);
        transform.rotation = Quat::from_rotation_z(visuals.rotation);
        sprite.color.set_alpha(visuals.opacity);
    }

    for (overlay, child_of, mut sprite) in &mut overlays {
        // Only cards that changed this frame match the filter
        let Ok((card, _, _)) = cards.get(child_of.parent()) else {
            continue;
        };
        sprite
            .color
            .set_alpha(*card.view.visuals().overlays.get(overlay.0));
    }
}
