use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PintyError {
    #[error("No variable context provided to resolve variable names")]
    MissingVariableContext,

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Invalid aggregator configuration: {0}")]
    InvalidConfig(String),

    #[error("Bin state not initialized for variable: {0} (was init_temporal called?)")]
    BinStateNotInitialized(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
