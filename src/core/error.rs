use thiserror::Error;

/// Errors raised by the matching engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no archetypes available to match against")]
    NoArchetypesAvailable,

    #[error("cannot hybridize archetype '{id}' with itself")]
    IdenticalArchetypes { id: String },

    #[error("unknown archetype: {id}")]
    UnknownArchetype { id: String },
}
