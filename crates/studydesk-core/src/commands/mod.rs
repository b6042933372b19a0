//! Admin back-office edits to the curriculum.
//!
//! Each edit is a `ContentCommand` applied to an immutable `Subject`;
//! applying it returns a new subject and leaves the input untouched.

pub mod command;
pub mod error;

pub use command::{apply_command, ContentCommand};
pub use error::CommandError;
