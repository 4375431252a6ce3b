use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompositorError {
    #[error("metadata has no Attributes map")]
    MissingAttributes,

    #[error("attribute category `{0}` is not in the dictionary")]
    UnknownCategory(String),

    #[error("unknown trait `{trait_name}` in category `{category}`")]
    UnknownTrait {
        category: String,
        trait_name: String,
    },

    #[error("attribute `{category}` is not a string: {value}")]
    InvalidAttribute {
        category: String,
        value: serde_json::Value,
    },

    #[error(transparent)]
    Client(#[from] recursive_client::ClientError),
}
