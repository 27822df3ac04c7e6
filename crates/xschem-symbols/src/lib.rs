//! Symbol library: loaded symbol definitions, the attribute-string engine
//! instances and geometry items use for their extra data, and polymorphic
//! symbol expansion.
//!
//! This crate has no notion of a sheet or a document; it only knows how to
//! store and look up symbols and how to manipulate the attribute strings
//! attached to them. `xschem-state` builds the document model on top of
//! it, referencing symbols by cache index rather than owning a copy of
//! their geometry per instance.

pub mod attr;
pub mod cache;
pub mod polymorphic;
pub mod symbol;

pub use attr::{GetMode, derive_rect_flags, get, set, str_replace, subst};
pub use cache::{NoopSymbolSource, SymbolCache, SymbolSource};
pub use polymorphic::PolymorphicExpander;
pub use symbol::{Symbol, SymbolFlags, SymbolKind, SymbolText};
