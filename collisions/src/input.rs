use bitflags::bitflags;

bitflags! {
    /// Directional and action intents a host can report for the hero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Intents: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const JUMP = 1 << 4;
    }
}

/// Answers "is this intent active right now". Polled once per frame from the
/// hero's pre-motion hook. Edge-triggering (e.g. jump only on press) is up
/// to the implementation.
pub trait InputSource {
    fn is_active(&self, intent: Intents) -> bool;
}

// A plain set of held intents
impl InputSource for Intents {
    fn is_active(&self, intent: Intents) -> bool {
        self.contains(intent)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_intents_as_input_source() {
        let held = Intents::LEFT | Intents::JUMP;
        assert!(held.is_active(Intents::LEFT));
        assert!(held.is_active(Intents::JUMP));
        assert!(!held.is_active(Intents::RIGHT));
        assert!(!Intents::empty().is_active(Intents::DOWN));
    }
}
