//=========================================================================
// Audio Cues
//=========================================================================
//
// Scenes request sound effects by name; nothing is mixed or played here.
// The orchestrator drains the queue each tick and logs what was asked for.
//
//=========================================================================

/// Pending named sound cues for the current tick.
#[derive(Debug, Clone, Default)]
pub struct AudioQueue {
    cues: Vec<&'static str>,
}

impl AudioQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a cue by name.
    pub fn play(&mut self, cue: &'static str) {
        self.cues.push(cue);
    }

    /// Cues requested since the last drain, oldest first.
    pub fn pending(&self) -> &[&'static str] {
        &self.cues
    }

    /// How many times `cue` is pending.
    pub fn count(&self, cue: &str) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }

    pub fn drain(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.cues)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_then_drain() {
        let mut audio = AudioQueue::new();
        audio.play("numkey");
        audio.play("ping");
        audio.play("numkey");

        assert_eq!(audio.count("numkey"), 2);
        assert_eq!(audio.drain(), vec!["numkey", "ping", "numkey"]);
        assert!(audio.pending().is_empty());
    }
}
