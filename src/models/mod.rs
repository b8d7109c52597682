pub mod aggregate;
pub mod analysis;
pub mod emotion;
pub mod language;
pub mod request;

pub use aggregate::*;
pub use analysis::*;
pub use emotion::*;
pub use language::*;
pub use request::*;
