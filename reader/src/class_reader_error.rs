use std::{
    error::Error,
    fmt::{Display, Formatter},
};

#[derive(Debug, PartialEq, Eq)]
pub enum ClassReaderError {
    InvalidTypeDescriptor(String),
}

impl Display for ClassReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassReaderError::InvalidTypeDescriptor(descriptor) => {
                write!(f, "invalid type descriptor: {descriptor}")
            }
        }
    }
}

impl Error for ClassReaderError {}

pub type Result<T> = std::result::Result<T, ClassReaderError>;
