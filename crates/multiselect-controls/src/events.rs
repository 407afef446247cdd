//! Selection notifications and the listener registry

use uuid::Uuid;

/// Notification emitted on every selection change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Select { object: Uuid },
    Deselect { object: Uuid },
}

impl SelectionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SelectionEvent::Select { .. } => EventKind::Select,
            SelectionEvent::Deselect { .. } => EventKind::Deselect,
        }
    }

    pub fn object(&self) -> Uuid {
        match self {
            SelectionEvent::Select { object } | SelectionEvent::Deselect { object } => *object,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Select,
    Deselect,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Select => "select",
            EventKind::Deselect => "deselect",
        }
    }
}

/// Handle returned by [`Listeners::add`], used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(&SelectionEvent) + Send>;

struct Entry {
    id: ListenerId,
    kind: EventKind,
    handler: Handler,
}

/// Registry of selection listeners, notified in registration order
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for one kind of notification.
    pub fn add<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&SelectionEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Unregisters a handler. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver an event to every handler registered for its kind
    pub fn dispatch(&mut self, event: &SelectionEvent) {
        tracing::debug!("Dispatch {} for {}", event.kind().name(), event.object());
        let kind = event.kind();
        for entry in self.entries.iter_mut().filter(|e| e.kind == kind) {
            (entry.handler)(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_dispatch_filters_by_kind() {
        let mut listeners = Listeners::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        listeners.add(EventKind::Select, move |e| sink.lock().push(*e));

        let object = Uuid::new_v4();
        listeners.dispatch(&SelectionEvent::Select { object });
        listeners.dispatch(&SelectionEvent::Deselect { object });

        assert_eq!(*seen.lock(), vec![SelectionEvent::Select { object }]);
    }

    #[test]
    fn test_remove_listener() {
        let mut listeners = Listeners::new();
        let count = Arc::new(Mutex::new(0));

        let sink = count.clone();
        let id = listeners.add(EventKind::Deselect, move |_| *sink.lock() += 1);
        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));

        listeners.dispatch(&SelectionEvent::Deselect {
            object: Uuid::new_v4(),
        });
        assert_eq!(*count.lock(), 0);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_event_accessors() {
        let object = Uuid::new_v4();
        let event = SelectionEvent::Deselect { object };
        assert_eq!(event.kind(), EventKind::Deselect);
        assert_eq!(event.object(), object);
        assert_eq!(event.kind().name(), "deselect");
    }
}
