use bevy::prelude::*;
use bevy::window::WindowResolution;
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use swipe_card::camera::CameraPlugin;
use swipe_card::input::InputPlugin;
use swipe_card::{
    Card, CardConfig, CardDelegate, CardFactory, CardLeft, CardPlugin, CardView, Direction,
    spawn_card,
};

const CARD_CONFIG_JSON: &str = include_str!("../assets/card_config.json");
/// Point this at a JSON file to override the embedded config
const CONFIG_ENV_VAR: &str = "SWIPE_CARD_CONFIG";

const CARD_SIZE: Vec2 = Vec2::new(280.0, 400.0);
const CARD_COLOR: Color = Color::srgb(0.93, 0.91, 0.86);

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Swipe Card".into(),
            resolution: WindowResolution::new(720, 1280),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(CardPlugin)
    .add_systems(Startup, setup_card)
    .add_systems(Update, (keyboard_controls, reshow_departed_cards));

    app.run();
}

/// Counts edge exits; logs a running tally
#[derive(Default)]
struct LeaveTally {
    counts: [AtomicU32; 4],
}

impl LeaveTally {
    fn record(&self, direction: Direction) {
        let index = Direction::ALL
            .iter()
            .position(|d| *d == direction)
            .unwrap_or_default();
        let total = self.counts[index].fetch_add(1, Ordering::Relaxed) + 1;
        info!("Left {direction} edge {total} time(s)");
    }
}

impl CardDelegate<Color> for LeaveTally {
    fn card_did_leave_top_edge(&self, _card: &CardView<Color>) {
        self.record(Direction::Up);
    }
    fn card_did_leave_bottom_edge(&self, _card: &CardView<Color>) {
        self.record(Direction::Down);
    }
    fn card_did_leave_left_edge(&self, _card: &CardView<Color>) {
        self.record(Direction::Left);
    }
    fn card_did_leave_right_edge(&self, _card: &CardView<Color>) {
        self.record(Direction::Right);
    }
}

/// Keeps the delegate alive; cards only hold a weak handle
#[derive(Resource)]
struct Tally(Arc<LeaveTally>);

fn load_config() -> CardConfig {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        match CardConfig::load(&path) {
            Ok(config) => {
                info!("Loaded card config from {path}");
                return config;
            }
            Err(err) => warn!("{err} - falling back to the built-in config"),
        }
    }
    CardConfig::from_json(CARD_CONFIG_JSON).unwrap_or_else(|err| {
        error!("Embedded card config is broken: {err}");
        CardConfig::default()
    })
}

fn setup_card(mut commands: Commands) {
    let factory = CardFactory::new()
        .with_frame(Rect::from_center_size(Vec2::ZERO, CARD_SIZE))
        .with_overlays(
            Some(Color::srgb(0.85, 0.25, 0.25)),
            Some(Color::srgb(0.25, 0.75, 0.35)),
            Some(Color::srgb(0.25, 0.5, 0.9)),
            None,
        )
        .with_config(load_config());

    let mut view = match factory.create() {
        Ok(view) => view,
        Err(err) => {
            error!("Could not create card: {err}");
            return;
        }
    };

    let tally = Arc::new(LeaveTally::default());
    view.set_delegate(&tally);
    view.set_allow(Direction::Down, false);
    view.show_from_bottom();

    spawn_card(&mut commands, view, CARD_COLOR);
    commands.insert_resource(Tally(tally));

    info!("Drag the card, or: arrows = demo, R = reset, A/D/W/S = leave, 1-4 = show");
}

fn keyboard_controls(keys: Res<ButtonInput<KeyCode>>, mut cards: Query<&mut Card>) {
    // Touching the cards mutably marks them changed, so bail early on idle frames
    if keys.get_just_pressed().next().is_none() {
        return;
    }
    for mut card in &mut cards {
        let view = &mut card.view;

        if keys.just_pressed(KeyCode::ArrowLeft) {
            view.demo_left();
        }
        if keys.just_pressed(KeyCode::ArrowRight) {
            view.demo_right();
        }
        if keys.just_pressed(KeyCode::ArrowUp) {
            view.demo_up();
        }
        if keys.just_pressed(KeyCode::ArrowDown) {
            view.demo_down();
        }
        if keys.just_pressed(KeyCode::KeyR) {
            view.demo_reset();
        }

        if keys.just_pressed(KeyCode::KeyA) {
            view.leave_left();
        }
        if keys.just_pressed(KeyCode::KeyD) {
            view.leave_right();
        }
        if keys.just_pressed(KeyCode::KeyW) {
            view.leave_top();
        }
        if keys.just_pressed(KeyCode::KeyS) {
            view.leave_bottom();
        }

        if keys.just_pressed(KeyCode::Digit1) {
            view.show_from_left();
        }
        if keys.just_pressed(KeyCode::Digit2) {
            view.show_from_right();
        }
        if keys.just_pressed(KeyCode::Digit3) {
            view.show_from_top();
        }
        if keys.just_pressed(KeyCode::Digit4) {
            view.show_from_bottom();
        }
    }
}

/// Bring a card that left back in from the opposite side with a fresh tint
fn reshow_departed_cards(
    mut left: MessageReader<CardLeft>,
    mut cards: Query<(&mut Card, &mut Sprite)>,
) {
    let mut rng = rand::rng();

    for event in left.read() {
        let Ok((mut card, mut sprite)) = cards.get_mut(event.entity) else {
            continue;
        };
        let hue = rng.random_range(0.0..360.0);
        sprite.color = Color::hsl(hue, 0.45, 0.82);
        card.view.show_from(event.direction.opposite());
    }
}
