use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Some hierarchy annotations form a loop (`A::B` on one rule, `B::A` on another).
    #[error("class hierarchy contains a cycle through: {}", classes.join(", "))]
    CyclicHierarchy { classes: Vec<String> },

    /// Only raised in strict mode; by default reserved names are skipped.
    #[error("class `{class_name}` collides with a {language} built-in")]
    ReservedName { class_name: String, language: String },

    /// Strict mode only: a class would redeclare the imported root type.
    #[error("class `{class_name}` shadows the imported base type `{base_type}`")]
    ShadowsBaseType { class_name: String, base_type: String },

    #[error("invalid base type `{0}`")]
    InvalidBaseType(String),

    #[error("at JSON path {path} → {message}")]
    Json { path: String, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
