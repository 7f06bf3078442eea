//! Shared front-end types for jnade: byte spans, the line index used to map
//! nodes onto source lines, the token vocabulary, and lexer errors.

pub mod error;
pub mod span;
pub mod token;
