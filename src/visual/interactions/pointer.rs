use bevy::prelude::*;

use crate::{
    camera::MainCamera,
    card::Release,
    input::{PointerEvent, PointerEventType},
    visual::cards::Card,
};

/// Which card (if any) the active pointer is holding
#[derive(Resource, Default)]
pub struct DragState {
    pub grabbed: Option<Grab>,
}

#[derive(Debug, Clone, Copy)]
pub struct Grab {
    pub entity: Entity,
    pub pointer_id: u64,
}

/// System: Route pointer input to the card under the pointer
pub fn handle_pointer_input(
    mut pointer_events: MessageReader<PointerEvent>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut cards: Query<(Entity, &mut Card, &Transform)>,
    mut drag_state: ResMut<DragState>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for event in pointer_events.read() {
        let Some(world_pos) = event.to_world_position(camera, camera_transform) else {
            continue;
        };

        match event.event_type {
            PointerEventType::Down => {
                if drag_state.grabbed.is_some() {
                    // Single-touch: ignore extra fingers
                    continue;
                }
                // Topmost card under the pointer
                let hit = cards
                    .iter()
                    .filter(|(_, card, _)| card.view.contains(world_pos))
                    .max_by(|(_, _, a), (_, _, b)| a.translation.z.total_cmp(&b.translation.z))
                    .map(|(entity, _, _)| entity);

                let Some(entity) = hit else {
                    continue;
                };
                let Ok((_, mut card, _)) = cards.get_mut(entity) else {
                    continue;
                };
                if card.view.pointer_down(world_pos, event.time) {
                    drag_state.grabbed = Some(Grab {
                        entity,
                        pointer_id: event.id,
                    });
                }
            }

            PointerEventType::Move => {
                let Some(grab) = held_by(&drag_state, event.id) else {
                    continue;
                };
                if let Ok((_, mut card, _)) = cards.get_mut(grab.entity) {
                    card.view.pointer_move(world_pos, event.time);
                }
            }

            PointerEventType::Up => {
                let Some(grab) = held_by(&drag_state, event.id) else {
                    continue;
                };
                drag_state.grabbed = None;
                if let Ok((_, mut card, _)) = cards.get_mut(grab.entity) {
                    match card.view.pointer_up(world_pos, event.time) {
                        Some(Release::Leave(direction)) => {
                            info!("Released past the {direction} edge")
                        }
                        Some(Release::RubberBand) => debug!("Released short of an edge"),
                        None => {}
                    }
                }
            }

            PointerEventType::Cancel => {
                let Some(grab) = held_by(&drag_state, event.id) else {
                    continue;
                };
                drag_state.grabbed = None;
                if let Ok((_, mut card, _)) = cards.get_mut(grab.entity) {
                    warn!("Pointer cancelled mid-drag - returning card");
                    card.view.pointer_cancel();
                }
            }
        }
    }
}

fn held_by(drag_state: &DragState, pointer_id: u64) -> Option<Grab> {
    drag_state
        .grabbed
        .filter(|grab| grab.pointer_id == pointer_id)
}
