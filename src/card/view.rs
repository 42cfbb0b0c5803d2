//! The card itself: offset, state machine and the public operations.

use super::animation::{Animation, AnimationFrame};
use super::config::CardConfig;
use super::delegate::{CardDelegate, DelegateHandle};
use super::direction::{AllowedDirections, Direction, DirectionMap};
use super::edge::{Release, evaluate_release};
use super::gesture::GestureTracker;
use super::visuals::{CardVisuals, VisualMapper};
use bevy::math::{Rect, Vec2};
use std::sync::Arc;

/// Where a card is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    AtRest,
    Dragging,
    RubberBanding,
    Leaving(Direction),
    /// Scripted demo move toward an edge
    DemoMoving(Direction),
    /// Entrance animation from an edge
    Showing(Direction),
    /// Off screen after leaving; only `show_from_*` or `demo_reset` bring it back
    Departed(Direction),
}

/// Reported by [`CardView::tick`] when an animation completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    /// Rubber band finished; the card is at rest
    Returned,
    Shown,
    /// Left through an edge after a drag or a `leave_*` call
    Left(Direction),
    /// A demo move finished off screen
    DemoFinished(Direction),
}

/// A draggable card that rotates and fades with its drag offset and either
/// springs back or leaves through an edge when released.
///
/// Created through [`CardFactory`](super::CardFactory). All positions are
/// offsets from the rest frame, so `(0, 0)` is always the resting position.
#[derive(Debug)]
pub struct CardView<O = ()> {
    frame: Rect,
    overlays: Arc<DirectionMap<Option<O>>>,
    config: Arc<CardConfig>,
    allowed: AllowedDirections,
    delegate: DelegateHandle<O>,

    offset: Vec2,
    state: CardState,
    animation: Option<Animation>,
    gesture: GestureTracker,
    visuals: CardVisuals,
}

impl<O> CardView<O> {
    pub(super) fn new(
        frame: Rect,
        overlays: Arc<DirectionMap<Option<O>>>,
        config: Arc<CardConfig>,
    ) -> Self {
        CardView {
            frame,
            overlays,
            config,
            allowed: AllowedDirections::all(),
            delegate: DelegateHandle::default(),
            offset: Vec2::ZERO,
            state: CardState::AtRest,
            animation: None,
            gesture: GestureTracker::new(),
            visuals: CardVisuals::REST,
        }
    }

    // === Queries ===

    /// The rest frame shared by every card from the same factory
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Current center, rest center plus offset
    pub fn center(&self) -> Vec2 {
        self.frame.center() + self.offset
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn visuals(&self) -> &CardVisuals {
        &self.visuals
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn overlay(&self, direction: Direction) -> Option<&O> {
        self.overlays.get(direction).as_ref()
    }

    pub fn overlays(&self) -> &DirectionMap<Option<O>> {
        &self.overlays
    }

    pub fn allowed(&self) -> AllowedDirections {
        self.allowed
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Hit test against the card's current (unrotated) bounds
    pub fn contains(&self, point: Vec2) -> bool {
        Rect::from_center_size(self.center(), self.frame.size()).contains(point)
    }

    // === Configuration ===

    pub fn set_allowed(&mut self, allowed: AllowedDirections) {
        self.allowed = allowed;
        self.refresh_visuals(None);
    }

    pub fn set_allow(&mut self, direction: Direction, allow: bool) {
        *self.allowed.get_mut(direction) = allow;
        self.refresh_visuals(None);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate.clear();
    }

    // === Dragging ===

    /// Start a drag. Interrupts a rubber band, entrance or demo in flight.
    /// Returns false while leaving or departed.
    ///
    /// The visuals of an interrupted animation (fade, rotation override) stay
    /// as they are until the first [`drag_by`](Self::drag_by), which maps them
    /// from the offset again.
    pub fn begin_drag(&mut self) -> bool {
        match self.state {
            CardState::Dragging => true,
            CardState::AtRest
            | CardState::RubberBanding
            | CardState::Showing(_)
            | CardState::DemoMoving(_) => {
                self.animation = None;
                self.set_state(CardState::Dragging);
                true
            }
            CardState::Leaving(_) | CardState::Departed(_) => {
                log::debug!("ignoring drag while {:?}", self.state);
                false
            }
        }
    }

    /// Move the card by `delta` while dragging
    pub fn drag_by(&mut self, delta: Vec2) -> bool {
        if self.state != CardState::Dragging {
            return false;
        }
        self.offset += delta;
        self.refresh_visuals(None);
        true
    }

    /// Let go of the card. Returns what it decided to do, or `None` if no
    /// drag was in progress.
    pub fn end_drag(&mut self, velocity: Option<Vec2>) -> Option<Release> {
        if self.state != CardState::Dragging {
            return None;
        }
        let release = evaluate_release(self.offset, velocity, &self.allowed, &self.config);
        match release {
            Release::Leave(direction) => self.start_leave(direction),
            Release::RubberBand => self.start_rubber_band(),
        }
        Some(release)
    }

    /// Abandon the drag; the card always springs back
    pub fn cancel_drag(&mut self) {
        self.gesture.cancel();
        if self.state == CardState::Dragging {
            self.start_rubber_band();
        }
    }

    // === Pointer input ===

    pub fn pointer_down(&mut self, position: Vec2, time: f64) -> bool {
        if !self.begin_drag() {
            return false;
        }
        self.gesture.begin(position, time);
        true
    }

    pub fn pointer_move(&mut self, position: Vec2, time: f64) -> bool {
        match self.gesture.move_to(position, time) {
            Some(delta) => self.drag_by(delta),
            None => false,
        }
    }

    pub fn pointer_up(&mut self, position: Vec2, time: f64) -> Option<Release> {
        let release = self.gesture.end(position, time)?;
        self.drag_by(release.delta);
        self.end_drag(release.velocity)
    }

    pub fn pointer_cancel(&mut self) {
        self.cancel_drag();
    }

    // === Animation ===

    /// Advance the running animation by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Option<CardEvent> {
        let animation = self.animation.as_mut()?;
        let finished = animation.advance(dt);
        let frame = animation.sample();
        self.offset = frame.offset;
        self.refresh_visuals(Some(frame));

        if !finished {
            return None;
        }
        self.animation = None;
        self.finish_animation()
    }

    fn finish_animation(&mut self) -> Option<CardEvent> {
        match self.state {
            CardState::RubberBanding => {
                self.settle();
                Some(CardEvent::Returned)
            }
            CardState::Showing(_) => {
                self.settle();
                Some(CardEvent::Shown)
            }
            CardState::Leaving(direction) => {
                self.set_state(CardState::Departed(direction));
                self.delegate.notify(self, direction);
                Some(CardEvent::Left(direction))
            }
            CardState::DemoMoving(direction) => {
                self.set_state(CardState::Departed(direction));
                if self.config.demo_notifies_delegate {
                    self.delegate.notify(self, direction);
                }
                Some(CardEvent::DemoFinished(direction))
            }
            CardState::AtRest | CardState::Dragging | CardState::Departed(_) => None,
        }
    }

    fn start_rubber_band(&mut self) {
        match Animation::rubber_band(self.offset, &self.config) {
            Some(animation) => {
                self.set_state(CardState::RubberBanding);
                self.run(animation);
            }
            None => self.settle(),
        }
    }

    fn start_leave(&mut self, direction: Direction) {
        let animation = Animation::leave(self.offset, direction, self.frame.size(), &self.config);
        self.set_state(CardState::Leaving(direction));
        self.run(animation);
    }

    fn run(&mut self, animation: Animation) {
        let frame = animation.sample();
        self.animation = Some(animation);
        self.offset = frame.offset;
        self.refresh_visuals(Some(frame));
    }

    /// Snap to rest with no animation
    fn settle(&mut self) {
        self.animation = None;
        self.offset = Vec2::ZERO;
        self.set_state(CardState::AtRest);
        self.refresh_visuals(None);
    }

    // === Entrances ===

    /// Present the card from the left: fades in and unwinds from the start rotation
    pub fn show_from_left(&mut self) -> bool {
        self.show_from(Direction::Left)
    }

    pub fn show_from_right(&mut self) -> bool {
        self.show_from(Direction::Right)
    }

    /// Present the card from the top, fading in
    pub fn show_from_top(&mut self) -> bool {
        self.show_from(Direction::Up)
    }

    pub fn show_from_bottom(&mut self) -> bool {
        self.show_from(Direction::Down)
    }

    /// Only valid at rest or after the card has departed
    pub fn show_from(&mut self, direction: Direction) -> bool {
        if !matches!(self.state, CardState::AtRest | CardState::Departed(_)) {
            log::warn!("cannot show card from {} while {:?}", direction, self.state);
            return false;
        }
        let animation = Animation::show(direction, self.frame.size(), &self.config);
        self.set_state(CardState::Showing(direction));
        self.run(animation);
        true
    }

    // === Demo ===

    pub fn demo_up(&mut self) -> bool {
        self.demo(Direction::Up)
    }

    pub fn demo_down(&mut self) -> bool {
        self.demo(Direction::Down)
    }

    pub fn demo_left(&mut self) -> bool {
        self.demo(Direction::Left)
    }

    pub fn demo_right(&mut self) -> bool {
        self.demo(Direction::Right)
    }

    /// Play the drag-and-leave motion toward `direction` as if a user did it.
    ///
    /// Call [`demo_reset`](Self::demo_reset) first: the demo always starts
    /// from rest. Allow flags are ignored. The delegate is only told when
    /// `demo_notifies_delegate` is set.
    pub fn demo(&mut self, direction: Direction) -> bool {
        if matches!(
            self.state,
            CardState::Dragging | CardState::Leaving(_) | CardState::DemoMoving(_)
        ) {
            log::warn!("cannot demo {} while {:?}", direction, self.state);
            return false;
        }
        let animation = Animation::demo(direction, self.frame.size(), &self.config);
        self.set_state(CardState::DemoMoving(direction));
        self.run(animation);
        true
    }

    /// Put the card back at rest immediately
    pub fn demo_reset(&mut self) {
        self.gesture.cancel();
        self.settle();
    }

    // === Programmatic exits ===

    pub fn leave_left(&mut self) -> bool {
        self.leave(Direction::Left)
    }

    pub fn leave_right(&mut self) -> bool {
        self.leave(Direction::Right)
    }

    pub fn leave_top(&mut self) -> bool {
        self.leave(Direction::Up)
    }

    pub fn leave_bottom(&mut self) -> bool {
        self.leave(Direction::Down)
    }

    /// Send the card off through `direction`, skipping thresholds and allow
    /// flags. The delegate is always notified when it finishes.
    pub fn leave(&mut self, direction: Direction) -> bool {
        match self.state {
            CardState::AtRest | CardState::Dragging | CardState::RubberBanding => {
                self.gesture.cancel();
                self.start_leave(direction);
                true
            }
            _ => {
                log::warn!("cannot leave {} while {:?}", direction, self.state);
                false
            }
        }
    }

    // === Internals ===

    fn set_state(&mut self, next: CardState) {
        if self.state != next {
            log::debug!("card {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn mapper(&self) -> VisualMapper<'_> {
        VisualMapper::new(
            &self.config,
            self.frame.size(),
            self.allowed,
            self.overlays.map(|_, overlay| overlay.is_some()),
        )
    }

    fn refresh_visuals(&mut self, frame: Option<AnimationFrame>) {
        let mut visuals = self.mapper().map(self.offset);
        if let Some(frame) = frame {
            visuals.opacity *= frame.opacity_scale;
            if let Some(rotation) = frame.rotation {
                visuals.rotation = rotation;
            }
        }
        self.visuals = visuals;
    }
}

impl<O: 'static> CardView<O> {
    /// Attach a listener for edge exits. Only a weak handle is kept.
    pub fn set_delegate<D: CardDelegate<O> + 'static>(&mut self, delegate: &Arc<D>) {
        self.delegate.set(delegate);
    }
}

#[cfg(test)]
mod tests {
    use super::super::delegate::testing::RecordingDelegate;
    use super::super::factory::CardFactory;
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn card() -> CardView {
        CardFactory::new()
            .with_frame(Rect::new(-150.0, -200.0, 150.0, 200.0))
            .create()
            .unwrap()
    }

    /// Tick until the animation ends, collecting every event
    fn settle(card: &mut CardView) -> Vec<CardEvent> {
        let mut events = Vec::new();
        for _ in 0..1_000 {
            if !card.is_animating() {
                break;
            }
            events.extend(card.tick(DT));
        }
        events
    }

    fn drag(card: &mut CardView, offset: Vec2) -> Option<Release> {
        assert!(card.begin_drag());
        assert!(card.drag_by(offset));
        card.end_drag(None)
    }

    #[test]
    fn test_sub_threshold_release_returns_exactly_to_rest() {
        for offset in [
            Vec2::new(64.0, 0.0),
            Vec2::new(-30.0, 50.0),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.0, -64.9),
        ] {
            let mut card = card();
            assert_eq!(drag(&mut card, offset), Some(Release::RubberBand));
            assert_eq!(card.state(), CardState::RubberBanding);

            let events = settle(&mut card);

            assert_eq!(events, vec![CardEvent::Returned]);
            assert_eq!(card.state(), CardState::AtRest);
            assert_eq!(card.offset(), Vec2::ZERO);
            assert_eq!(*card.visuals(), CardVisuals::REST);
        }
    }

    #[test]
    fn test_horizontal_release_leaves_with_precedence() {
        let mut card = card();
        let release = drag(&mut card, Vec2::new(-80.0, 200.0));

        assert_eq!(release, Some(Release::Leave(Direction::Left)));
        assert_eq!(card.state(), CardState::Leaving(Direction::Left));
        assert_eq!(settle(&mut card), vec![CardEvent::Left(Direction::Left)]);
        assert_eq!(card.state(), CardState::Departed(Direction::Left));
        assert_eq!(card.visuals().opacity, 0.0);
    }

    #[test]
    fn test_disallowed_left_always_rubber_bands() {
        let mut card = card();
        card.set_allow(Direction::Left, false);

        assert_eq!(
            drag(&mut card, Vec2::new(-5_000.0, 0.0)),
            Some(Release::RubberBand)
        );
        settle(&mut card);
        assert_eq!(card.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_delegate_fires_once_per_leave_and_never_for_rubber_band() {
        let delegate = Arc::new(RecordingDelegate::default());
        let mut card = card();
        card.set_delegate(&delegate);

        drag(&mut card, Vec2::new(20.0, 0.0));
        settle(&mut card);
        assert!(delegate.calls().is_empty());

        drag(&mut card, Vec2::new(0.0, 100.0));
        settle(&mut card);
        // Extra ticks after departure must not repeat the callback
        for _ in 0..10 {
            assert_eq!(card.tick(DT), None);
        }
        assert_eq!(delegate.calls(), vec![Direction::Up]);
    }

    #[test]
    fn test_programmatic_leave_notifies_delegate() {
        let delegate = Arc::new(RecordingDelegate::default());
        let mut card = card();
        card.set_allow(Direction::Down, false);
        card.set_delegate(&delegate);

        assert!(card.leave_bottom());
        settle(&mut card);

        assert_eq!(delegate.calls(), vec![Direction::Down]);
        assert!(!card.leave_left(), "departed card cannot leave again");
    }

    #[test]
    fn test_dropped_delegate_is_a_no_op() {
        let mut card = card();
        {
            let delegate = Arc::new(RecordingDelegate::default());
            card.set_delegate(&delegate);
        }
        card.leave_right();
        assert_eq!(settle(&mut card), vec![CardEvent::Left(Direction::Right)]);
    }

    #[test]
    fn test_new_drag_interrupts_rubber_band() {
        let mut card = card();
        drag(&mut card, Vec2::new(40.0, 0.0));
        card.tick(DT * 3.0);
        let mid_flight = card.offset();
        assert_ne!(mid_flight, Vec2::ZERO);

        assert!(card.begin_drag());
        assert_eq!(card.state(), CardState::Dragging);
        assert!(!card.is_animating());
        assert_eq!(card.offset(), mid_flight);
        assert_eq!(card.tick(DT), None);
    }

    #[test]
    fn test_drag_ignored_while_leaving() {
        let mut card = card();
        card.leave_top();
        assert!(!card.begin_drag());
        assert!(!card.drag_by(Vec2::ONE));
        assert_eq!(card.end_drag(None), None);
    }

    #[test]
    fn test_demo_left_ignores_allow_flags_and_delegate() {
        let delegate = Arc::new(RecordingDelegate::default());
        let mut card = card();
        card.set_allowed(AllowedDirections::splat(false));
        card.set_delegate(&delegate);

        card.demo_reset();
        assert!(card.demo_left());
        assert_eq!(card.state(), CardState::DemoMoving(Direction::Left));

        assert_eq!(
            settle(&mut card),
            vec![CardEvent::DemoFinished(Direction::Left)]
        );
        assert_eq!(card.state(), CardState::Departed(Direction::Left));
        assert!(card.offset().x < -card.frame().width());
        assert!(delegate.calls().is_empty());

        card.demo_reset();
        assert_eq!(card.state(), CardState::AtRest);
        assert_eq!(card.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_demo_notifies_delegate_when_configured() {
        let delegate = Arc::new(RecordingDelegate::default());
        let mut card: CardView = CardFactory::new()
            .with_frame(Rect::new(0.0, 0.0, 200.0, 300.0))
            .with_config(CardConfig::default().with_demo_notifies_delegate(true))
            .create()
            .unwrap();
        card.set_delegate(&delegate);

        card.demo_down();
        settle(&mut card);

        assert_eq!(delegate.calls(), vec![Direction::Down]);
    }

    #[test]
    fn test_show_from_right_returns_to_rest() {
        let mut card = card();
        card.leave_left();
        settle(&mut card);

        assert!(card.show_from_right());
        assert!(card.offset().x > 0.0);
        assert_eq!(card.visuals().opacity, 0.0);
        assert!(card.visuals().rotation < 0.0);

        assert_eq!(settle(&mut card), vec![CardEvent::Shown]);
        assert_eq!(card.state(), CardState::AtRest);
        assert_eq!(*card.visuals(), CardVisuals::REST);
    }

    #[test]
    fn test_pointer_stream_drives_drag() {
        let mut card = card();
        let start = card.center();

        assert!(card.pointer_down(start, 0.0));
        assert!(card.pointer_move(start + Vec2::new(30.0, 0.0), 0.05));
        assert_eq!(card.offset(), Vec2::new(30.0, 0.0));
        assert!(card.visuals().rotation < 0.0);

        let release = card.pointer_up(start + Vec2::new(90.0, 0.0), 0.1);
        assert_eq!(release, Some(Release::Leave(Direction::Right)));
    }

    #[test]
    fn test_fast_short_drag_springs_back_with_shipped_config() {
        let json = include_str!("../../assets/card_config.json");
        let mut card: CardView = CardFactory::new()
            .with_frame(Rect::new(-150.0, -200.0, 150.0, 200.0))
            .with_config(CardConfig::from_json(json).unwrap())
            .create()
            .unwrap();

        // 20px in 20ms is 1000 px/s at release
        assert!(card.pointer_down(Vec2::ZERO, 0.0));
        assert!(card.pointer_move(Vec2::new(10.0, 0.0), 0.01));
        let release = card.pointer_up(Vec2::new(20.0, 0.0), 0.02);

        assert_eq!(release, Some(Release::RubberBand));
        assert_eq!(settle(&mut card), vec![CardEvent::Returned]);
        assert_eq!(card.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_leave_during_drag_ends_the_gesture() {
        let delegate = Arc::new(RecordingDelegate::default());
        let mut card = card();
        card.set_delegate(&delegate);

        assert!(card.pointer_down(Vec2::ZERO, 0.0));
        assert!(card.pointer_move(Vec2::new(-30.0, 0.0), 0.05));
        assert!(card.leave_left());
        assert_eq!(card.state(), CardState::Leaving(Direction::Left));

        // The finger lifting afterwards belongs to a gesture that no longer exists
        assert_eq!(card.pointer_up(Vec2::new(-40.0, 0.0), 0.1), None);
        assert_eq!(card.state(), CardState::Leaving(Direction::Left));

        assert_eq!(settle(&mut card), vec![CardEvent::Left(Direction::Left)]);
        assert_eq!(card.state(), CardState::Departed(Direction::Left));
        assert_eq!(delegate.calls(), vec![Direction::Left]);
    }

    #[test]
    fn test_grabbing_an_entrance_keeps_its_fade_until_moved() {
        let mut card = card();
        assert!(card.show_from_left());
        card.tick(DT * 6.0);
        let fading = *card.visuals();
        assert!(fading.opacity < 1.0);

        assert!(card.begin_drag());
        assert_eq!(*card.visuals(), fading);

        assert!(card.drag_by(Vec2::new(1.0, 0.0)));
        assert!(card.offset().x < 0.0);
        assert!(card.visuals().opacity > fading.opacity);
    }

    #[test]
    fn test_pointer_cancel_springs_back() {
        let mut card = card();
        card.pointer_down(Vec2::ZERO, 0.0);
        card.pointer_move(Vec2::new(-300.0, 0.0), 0.1);
        card.pointer_cancel();

        assert_eq!(card.state(), CardState::RubberBanding);
        settle(&mut card);
        assert_eq!(card.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_contains_follows_offset() {
        let mut card = card();
        assert!(card.contains(Vec2::ZERO));
        card.begin_drag();
        card.drag_by(Vec2::new(400.0, 0.0));
        assert!(!card.contains(Vec2::ZERO));
        assert!(card.contains(Vec2::new(400.0, 0.0)));
    }
}
