use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// One of the two phases a traffic signal alternates between.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SignalPhase {
    /// Traffic must stop. Every signal starts out red.
    #[default]
    Red,

    /// Traffic may proceed.
    Green,
}

impl SignalPhase {
    /// Returns the phase the signal moves to on the next toggle.
    pub fn toggled(&self) -> SignalPhase {
        match self {
            SignalPhase::Red => SignalPhase::Green,
            SignalPhase::Green => SignalPhase::Red,
        }
    }
}

impl fmt::Display for SignalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
        }
    }
}

/// Raw encoding of [`SignalPhase::Red`] inside a [`PhaseCell`].
const RED: u8 = 0;

/// Raw encoding of [`SignalPhase::Green`] inside a [`PhaseCell`].
const GREEN: u8 = 1;

/// Shared holder of a signal's current phase.
///
/// The cycle worker stores a new phase on every toggle while any number of
/// tasks load concurrently, so the phase lives in an atomic rather than a
/// plain field.
#[derive(Debug)]
pub struct PhaseCell {
    value: AtomicU8,
}

impl PhaseCell {
    /// Creates a cell holding `phase`.
    pub fn new(phase: SignalPhase) -> Self {
        Self {
            value: AtomicU8::new(encode(phase)),
        }
    }

    /// Returns the phase currently held by the cell.
    pub fn load(&self) -> SignalPhase {
        // Ordering: Acquire — pairs with the Release in `store` so a reader that
        // observes a new phase also observes everything published before it.
        decode(self.value.load(Ordering::Acquire))
    }

    /// Overwrites the phase held by the cell.
    ///
    /// Called only by the cycle worker when the signal toggles.
    pub fn store(&self, phase: SignalPhase) {
        self.value.store(encode(phase), Ordering::Release);
    }
}

fn encode(phase: SignalPhase) -> u8 {
    match phase {
        SignalPhase::Red => RED,
        SignalPhase::Green => GREEN,
    }
}

fn decode(raw: u8) -> SignalPhase {
    match raw {
        GREEN => SignalPhase::Green,
        _ => SignalPhase::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_is_red() {
        assert_eq!(SignalPhase::default(), SignalPhase::Red);
    }

    #[test]
    fn test_toggle_alternates() {
        assert_eq!(SignalPhase::Red.toggled(), SignalPhase::Green);
        assert_eq!(SignalPhase::Green.toggled(), SignalPhase::Red);
        assert_eq!(SignalPhase::Red.toggled().toggled(), SignalPhase::Red);
    }

    #[test]
    fn test_display_uses_lowercase_names() {
        assert_eq!(SignalPhase::Red.to_string(), "red");
        assert_eq!(SignalPhase::Green.to_string(), "green");
    }

    #[test]
    fn test_phase_cell_round_trips() {
        let cell = PhaseCell::new(SignalPhase::Red);
        assert_eq!(cell.load(), SignalPhase::Red);

        cell.store(SignalPhase::Green);
        assert_eq!(cell.load(), SignalPhase::Green);

        cell.store(SignalPhase::Red);
        assert_eq!(cell.load(), SignalPhase::Red);
    }
}
