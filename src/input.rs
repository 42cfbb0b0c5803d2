use bevy::input::InputSystems;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .add_message::<PointerEvent>()
            .add_systems(
                PreUpdate,
                // just_pressed/just_released are only valid after the input update
                (track_cursor_pos, collect_pointer_events)
                    .chain()
                    .after(InputSystems),
            );
    }
}

#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Window (logical) coordinates
    pub position: Vec2,
    pub event_type: PointerEventType,
    /// 0 = mouse, >0 = touch id
    pub id: u64,
    /// Seconds since startup, for release velocity
    pub time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
    /// The platform took the touch away (e.g. a system gesture)
    Cancel,
}

impl PointerEvent {
    /// Convert window coords to 2D world space using a camera
    pub fn to_world_position(
        &self,
        camera: &Camera,
        camera_transform: &GlobalTransform,
    ) -> Option<Vec2> {
        camera
            .viewport_to_world_2d(camera_transform, self.position)
            .ok()
    }
}

#[derive(Resource, Default, Debug, Clone, Copy)]
struct CursorPos(pub Option<Vec2>);

fn track_cursor_pos(mut ev_cursor: MessageReader<CursorMoved>, mut pos: ResMut<CursorPos>) {
    for e in ev_cursor.read() {
        // last event wins
        pos.0 = Some(e.position);
    }
}

fn collect_pointer_events(
    time: Res<Time>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorPos>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    let now = time.elapsed_secs_f64();

    if let Some(p) = cursor.0 {
        let mouse = |event_type| PointerEvent {
            position: p,
            event_type,
            id: 0,
            time: now,
        };
        if mouse_buttons.just_pressed(MouseButton::Left) {
            out.write(mouse(PointerEventType::Down));
        }
        if mouse_buttons.pressed(MouseButton::Left) {
            out.write(mouse(PointerEventType::Move));
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            out.write(mouse(PointerEventType::Up));
        }
    }

    for ev in touch_events.read() {
        let event_type = match ev.phase {
            TouchPhase::Started => PointerEventType::Down,
            TouchPhase::Moved => PointerEventType::Move,
            TouchPhase::Ended => PointerEventType::Up,
            TouchPhase::Canceled => PointerEventType::Cancel,
        };
        out.write(PointerEvent {
            position: ev.position,
            event_type,
            // offset so touch ids never collide with the mouse
            id: ev.id + 1,
            time: now,
        });
    }
}
