//=========================================================================
// Message Queue Trait
//=========================================================================
//
// Type-erased view of a `Vec<M>` so the bus can store queues of every
// message type in one map and still clear them without knowing `M`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::Message;

//=========================================================================

pub(super) trait MessageQueue: Send {
    /// Clears all messages while preserving allocated capacity.
    fn clear_queue(&mut self);

    /// Number of messages currently queued.
    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_queue_preserves_capacity() {
        let mut queue: Vec<u32> = Vec::with_capacity(64);
        queue.extend(0..32);
        let capacity = queue.capacity();

        let erased: &mut dyn MessageQueue = &mut queue;
        erased.clear_queue();
        assert_eq!(erased.len(), 0);

        assert_eq!(queue.capacity(), capacity);
    }

    #[test]
    fn downcast_round_trips_to_concrete_vec() {
        let mut queue: Vec<&'static str> = vec!["ping"];
        let erased: &mut dyn MessageQueue = &mut queue;

        let concrete = erased
            .as_any_mut()
            .downcast_mut::<Vec<&'static str>>()
            .expect("same type");
        concrete.push("shot");

        assert_eq!(queue, vec!["ping", "shot"]);
    }
}
