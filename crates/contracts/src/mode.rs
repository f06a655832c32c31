//! Mode - lifecycle phase carried on the bus

use serde::Serialize;

/// Lifecycle phase of the whole pipeline.
///
/// The executor drives `Init -> Run -> Terminate`. `Terminate` is absorbing:
/// once entered, no transition leads out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Exactly one pass: plugins parse configuration and acquire resources
    #[default]
    Init,
    /// One pass per tick
    Run,
    /// Final pass: plugins release resources
    Terminate,
}

impl Mode {
    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Staying in the same phase is always legal, except that nothing leaves
    /// `Terminate`.
    pub fn can_transition_to(self, next: Mode) -> bool {
        match (self, next) {
            (Mode::Terminate, Mode::Terminate) => true,
            (Mode::Terminate, _) => false,
            (Mode::Run, Mode::Init) => false,
            _ => true,
        }
    }

    pub fn is_init(self) -> bool {
        self == Mode::Init
    }

    pub fn is_run(self) -> bool {
        self == Mode::Run
    }

    pub fn is_terminate(self) -> bool {
        self == Mode::Terminate
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Init => "init",
            Mode::Run => "run",
            Mode::Terminate => "terminate",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminate_is_absorbing() {
        assert!(!Mode::Terminate.can_transition_to(Mode::Init));
        assert!(!Mode::Terminate.can_transition_to(Mode::Run));
        assert!(Mode::Terminate.can_transition_to(Mode::Terminate));
    }

    #[test]
    fn test_forward_transitions() {
        assert!(Mode::Init.can_transition_to(Mode::Run));
        assert!(Mode::Init.can_transition_to(Mode::Terminate));
        assert!(Mode::Run.can_transition_to(Mode::Terminate));
        assert!(!Mode::Run.can_transition_to(Mode::Init));
    }
}
