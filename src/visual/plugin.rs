use crate::visual::cards::{Card, CardLeft, animate_cards, sync_card_visuals};
use crate::visual::interactions::{DragState, handle_pointer_input};
use bevy::prelude::*;

pub struct CardPlugin;

impl Plugin for CardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>()
            .add_message::<CardLeft>()
            .add_systems(
                Update,
                (
                    release_dead_grab,
                    // Input before ticking so a grab stops any animation first
                    handle_pointer_input,
                    animate_cards,
                    // Visual updates
                    sync_card_visuals,
                )
                    .chain(),
            );
    }
}

/// Drop the grab if the held card was despawned mid-drag
fn release_dead_grab(mut drag_state: ResMut<DragState>, cards: Query<(), With<Card>>) {
    let Some(grab) = drag_state.grabbed else {
        return;
    };
    if cards.get(grab.entity).is_err() {
        info!("Grabbed card is gone - releasing pointer");
        drag_state.grabbed = None;
    }
}
