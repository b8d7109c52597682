pub mod emotion;
pub mod language;

pub use emotion::*;
pub use language::*;
