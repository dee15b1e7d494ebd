//=========================================================================
// Text Labels
//=========================================================================
//
// Named on-screen text owned by the active scene.
//
// The engine has no text renderer; the orchestrator composes the labels
// into the window title whenever the board changes.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Label ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Vec2,
    pub text: String,
}

//=== LabelBoard ==========================================================

/// Ordered set of labels with change tracking.
#[derive(Debug, Clone, Default)]
pub struct LabelBoard {
    labels: Vec<(&'static str, Label)>,
    changed: bool,
}

impl LabelBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a label.
    pub fn set(&mut self, key: &'static str, position: Vec2, text: impl Into<String>) {
        let label = Label { position, text: text.into() };
        match self.labels.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) if *existing == label => return,
            Some((_, existing)) => *existing = label,
            None => self.labels.push((key, label)),
        }
        self.changed = true;
    }

    /// Updates the text of an existing label. Returns `false` if there is
    /// no label under `key`.
    pub fn set_text(&mut self, key: &str, text: impl Into<String>) -> bool {
        let text = text.into();
        let Some((_, label)) = self.labels.iter_mut().find(|(k, _)| *k == key) else {
            return false;
        };
        if label.text != text {
            label.text = text;
            self.changed = true;
        }
        true
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).map(|label| label.text.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Label> {
        self.labels.iter().find(|(k, _)| *k == key).map(|(_, label)| label)
    }

    pub fn remove(&mut self, key: &str) -> Option<Label> {
        let index = self.labels.iter().position(|(k, _)| *k == key)?;
        self.changed = true;
        Some(self.labels.remove(index).1)
    }

    pub fn clear(&mut self) {
        if !self.labels.is_empty() {
            self.labels.clear();
            self.changed = true;
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    //--- Presentation -----------------------------------------------------

    /// All label texts in creation order, joined for a single-line display.
    pub fn compose(&self) -> String {
        self.labels
            .iter()
            .map(|(_, label)| label.text.as_str())
            .collect::<Vec<_>>()
            .join("  |  ")
    }

    /// Returns the composed text if anything changed since the last call.
    pub fn take_changed(&mut self) -> Option<String> {
        if std::mem::take(&mut self.changed) {
            Some(self.compose())
        } else {
            None
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
