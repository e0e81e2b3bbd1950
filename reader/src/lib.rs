#[macro_use]
extern crate bitflags;

pub mod basic_type;
pub mod class_file;
pub mod class_file_field;
pub mod class_reader_error;
pub mod field_flags;
pub mod field_type;
