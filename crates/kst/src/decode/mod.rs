//! Decoding pipeline: separators and the recursive record scanner.

pub mod scanner;
pub mod separator;
