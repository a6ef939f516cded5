//! Small shared helpers.

pub mod labels;
