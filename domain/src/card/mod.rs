//! Card domain
//!
//! - [`entities::Card`]: an immutable card record keyed by [`entities::CardId`]
//! - [`color::ColorSet`]: color identity as a five-bit set
//! - [`type_line::TypeLine`]: a parsed type line
//! - [`catalog::CardCatalog`]: the in-memory catalog every stage reads from

pub mod catalog;
pub mod color;
pub mod entities;
pub mod type_line;

pub use catalog::CardCatalog;
pub use color::{Color, ColorSet};
pub use entities::{Card, CardId};
pub use type_line::{CardType, TypeLine};
