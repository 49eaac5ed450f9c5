use core::fmt;

/// The engine's closed error taxonomy. [`EngineError::IllFormedInput`] is
/// the only variant that crosses the engine façade boundary; conditions the
/// belief/sampler/simulator layers can recover from are handled internally
/// rather than surfaced as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A caller violated a precondition the rules module assumes, e.g.
    /// asking for the first-trick lead from a hand without the Two of
    /// Clubs, or the winner of an empty trick. Fatal to the calling
    /// decision.
    IllFormedInput(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::IllFormedInput(message) => write!(f, "ill-formed input: {message}"),
        }
    }
}

impl std::error::Error for EngineError {}
