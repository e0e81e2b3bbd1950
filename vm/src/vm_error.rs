use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VmError {
    #[error("class not found: {0}")]
    ClassNotFoundException(String),

    #[error("class already loaded: {0}")]
    ClassAlreadyLoaded(String),

    #[error("validation exception - invalid class file")]
    ValidationException,

    #[error("too many classes loaded")]
    TooManyClasses,
}
