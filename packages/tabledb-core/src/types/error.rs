/// Error type for column type parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("Unknown column type '{name}'")]
    UnknownType { name: String },
}
