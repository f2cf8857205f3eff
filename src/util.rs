//! Small shared helpers.

pub mod levenshtein;
