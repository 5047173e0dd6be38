use super::state::SheetState;

/// What kind of change a dispatch produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Change {
    Cells,
    Structure,
    Selection,
    Editing,
    Load,
    Undo,
    Redo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked after every dispatch that changed the state view.
pub type Listener = Box<dyn FnMut(&SheetState, Change)>;

#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, state: &SheetState, change: Change) {
        for (_, listener) in &mut self.listeners {
            listener(state, change);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
