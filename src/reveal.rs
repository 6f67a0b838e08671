/// Class added by script to every watched section; hides and offsets it.
pub const PENDING_CLASS: &str = "fade-in";

/// Class that settles a section in place. Never removed once added.
pub const REVEALED_CLASS: &str = "visible";

/// Attribute linking a section element to its tracker slot.
pub const INDEX_ATTRIBUTE: &str = "data-reveal-index";

#[derive(Clone, Debug, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the section that must be visible.
    pub threshold: f64,
    /// Negative bottom margin shrinks the trigger area.
    pub root_margin: String,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// Observed-once bookkeeping for page sections.
#[derive(Debug, Default)]
pub struct RevealTracker {
    sections: Vec<RevealState>,
}

impl RevealTracker {
    /// Starts watching one more section and returns its index.
    pub fn track(&mut self) -> usize {
        self.sections.push(RevealState::Pending);
        self.sections.len() - 1
    }

    /// Returns true only for the intersection that reveals the section.
    pub fn observe_intersection(&mut self, index: usize, is_intersecting: bool) -> bool {
        match self.sections.get_mut(index) {
            Some(state) if is_intersecting && *state == RevealState::Pending => {
                *state = RevealState::Revealed;
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.sections.get(index) == Some(&RevealState::Revealed)
    }

    pub fn pending(&self) -> usize {
        self.sections
            .iter()
            .filter(|state| **state == RevealState::Pending)
            .count()
    }

    pub fn tracked(&self) -> usize {
        self.sections.len()
    }
}
