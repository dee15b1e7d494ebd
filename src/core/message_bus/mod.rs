//=========================================================================
// Message Bus
//=========================================================================
//
// Type-keyed per-frame message queues shared by systems and scenes.
//
// Architecture:
//   Systems/Scenes → push<M>() → HashMap<TypeId, Vec<M>>
//                                     ↓
//   Multiple consumers ← read<M>() (shared) / drain<M>() (owning)
//                                     ↓
//   GlobalSystems ──────→ clear<M>() at tick boundary
//
// Carries pressed/held actions (input → scenes), scene transitions and
// input-context requests (scenes → systems).
//
//=========================================================================

//=== Module Declarations =================================================

mod message_queue;

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can be sent through the MessageBus.
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=========================================================================

/// Type-safe message queues, one per message type.
#[derive(Default)]
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    /// Creates a new empty message bus.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Message Operations -----------------------------------------------

    /// Pushes a message into the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        self.queue_mut::<M>().push(msg);
    }

    /// Returns all messages of type M currently queued.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns all messages of type M.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if there are any messages of type M queued.
    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    /// Returns the number of messages of type M currently queued.
    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map(Vec::len).unwrap_or(0)
    }

    /// Clears all messages of type M, preserving allocated capacity.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, preserving capacity.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }

    fn queue_mut<M: Message>(&mut self) -> &mut Vec<M> {
        let entry = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        // The entry for TypeId::of::<M>() is only ever created as Vec<M>.
        match entry.as_any_mut().downcast_mut::<Vec<M>>() {
            Some(queue) => queue,
            None => unreachable!("message queue stored under the wrong TypeId"),
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Clone)]
    struct Cue(&'static str);

    #[derive(Debug, PartialEq, Clone)]
    struct Score(u32);

    #[test]
    fn new_bus_is_empty() {
        let bus = MessageBus::new();
        assert!(!bus.has_messages::<Cue>());
        assert_eq!(bus.count::<Cue>(), 0);
        assert!(bus.read::<Cue>().is_empty());
    }

    #[test]
    fn push_and_read_preserve_order() {
        let mut bus = MessageBus::new();
        bus.push(Score(1));
        bus.push(Score(2));
        bus.push(Score(3));

        assert_eq!(bus.read::<Score>(), &[Score(1), Score(2), Score(3)]);
        // Reading does not consume
        assert_eq!(bus.count::<Score>(), 3);
    }

    #[test]
    fn separate_queues_per_type() {
        let mut bus = MessageBus::new();
        bus.push(Cue("ping"));
        bus.push(Score(7));

        assert_eq!(bus.read::<Cue>(), &[Cue("ping")]);
        assert_eq!(bus.read::<Score>(), &[Score(7)]);
    }

    #[test]
    fn drain_empties_only_that_type() {
        let mut bus = MessageBus::new();
        bus.push(Cue("ping"));
        bus.push(Cue("shot"));
        bus.push(Score(1));

        assert_eq!(bus.drain::<Cue>(), vec![Cue("ping"), Cue("shot")]);
        assert!(!bus.has_messages::<Cue>());
        assert_eq!(bus.count::<Score>(), 1);
    }

    #[test]
    fn drain_of_unknown_type_is_empty() {
        let mut bus = MessageBus::new();
        assert!(bus.drain::<Cue>().is_empty());
    }

    #[test]
    fn clear_and_clear_all() {
        let mut bus = MessageBus::new();
        bus.push(Cue("ping"));
        bus.push(Score(1));

        bus.clear::<Cue>();
        assert_eq!(bus.count::<Cue>(), 0);
        assert_eq!(bus.count::<Score>(), 1);

        bus.clear_all();
        assert_eq!(bus.count::<Score>(), 0);
    }
}
