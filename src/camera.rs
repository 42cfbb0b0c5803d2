use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .add_systems(Startup, setup_camera);
    }
}

const BACKGROUND: Color = Color::srgb(0.09, 0.09, 0.11);

#[derive(Component)]
pub struct MainCamera;

/// 2D camera centered on the origin; one world unit is one logical pixel,
/// +Y points up on screen
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}
