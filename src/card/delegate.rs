use super::direction::Direction;
use super::view::CardView;
use std::fmt;
use std::sync::{Arc, Weak};

/// Listener told when a card has left the screen.
///
/// Cards only hold a weak handle to their delegate; keep the `Arc` alive
/// for as long as you want callbacks.
pub trait CardDelegate<O>: Send + Sync {
    fn card_did_leave_top_edge(&self, card: &CardView<O>);
    fn card_did_leave_bottom_edge(&self, card: &CardView<O>);
    fn card_did_leave_left_edge(&self, card: &CardView<O>);
    fn card_did_leave_right_edge(&self, card: &CardView<O>);
}

/// Non-owning slot for a card's delegate
pub struct DelegateHandle<O> {
    delegate: Option<Weak<dyn CardDelegate<O>>>,
}

impl<O> Default for DelegateHandle<O> {
    fn default() -> Self {
        DelegateHandle { delegate: None }
    }
}

impl<O: 'static> DelegateHandle<O> {
    pub fn set<D: CardDelegate<O> + 'static>(&mut self, delegate: &Arc<D>) {
        let weak: Weak<dyn CardDelegate<O>> = Arc::downgrade(delegate) as Weak<D>;
        self.delegate = Some(weak);
    }
}

impl<O> DelegateHandle<O> {
    pub fn clear(&mut self) {
        self.delegate = None;
    }

    /// True while a delegate is set and still alive
    pub fn is_attached(&self) -> bool {
        self.delegate
            .as_ref()
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Call the callback for `direction`. Missing or dropped delegates are a no-op.
    pub fn notify(&self, card: &CardView<O>, direction: Direction) {
        let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) else {
            log::debug!("card left {} edge with no delegate attached", direction);
            return;
        };
        match direction {
            Direction::Left => delegate.card_did_leave_left_edge(card),
            Direction::Right => delegate.card_did_leave_right_edge(card),
            Direction::Up => delegate.card_did_leave_top_edge(card),
            Direction::Down => delegate.card_did_leave_bottom_edge(card),
        }
    }
}

impl<O> fmt::Debug for DelegateHandle<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}
