//! Canonical, collision-resistant keys for overloaded named operations.
//!
//! An operation is a (name, signature) pair; several operations may share a
//! name and differ only in argument types. Each pair reduces to one
//! composite key — the name followed by the decimal digits of a
//! deterministic signature hash — so requirement declarations and
//! implementation declarations land on the same dispatch-table slot without
//! ever mentioning each other. The receiver argument is excluded from the
//! hash, which lets requirements spell it with the [`This`] placeholder and
//! implementations spell it with a concrete type.
//!
//! ```
//! use opkey::{Concept, ConceptMap, Mut, Ref, This, Val, name};
//!
//! struct Square;
//!
//! fn draw_square(_square: &Square, out: &mut String) {
//!     out.push_str("Square");
//! }
//!
//! fn draw_square_at(_square: &Square, x: i32, out: &mut String) {
//!     out.push_str(&x.to_string());
//!     out.push_str("Square");
//! }
//!
//! # fn main() -> opkey::Result<()> {
//! let drawable = Concept::build([
//!     name!("draw").requires::<fn(Ref<This>, Mut<String>)>(),
//!     name!("draw").requires::<fn(Ref<This>, Val<i32>, Mut<String>)>(),
//! ])?;
//!
//! let square_map = ConceptMap::build([
//!     name!("draw").implement::<fn(Ref<Square>, Mut<String>)>(draw_square),
//!     name!("draw").implement::<fn(Ref<Square>, Val<i32>, Mut<String>)>(draw_square_at),
//! ])?;
//!
//! for requirement in drawable.iter() {
//!     assert!(square_map.get(requirement.key()).is_some());
//! }
//! # Ok(())
//! # }
//! ```

pub mod canon;
pub mod clause;
pub mod concept;
pub mod defer;
pub mod fingerprint;
pub mod key;
pub mod name;
pub mod registry;
pub mod sig;

pub type Result<T> = anyhow::Result<T>;

pub use clause::{Implementation, Requirement};
pub use concept::{Concept, ConceptMap};
pub use defer::{ArgList, DeferredCall};
pub use key::{Key, synthesize};
pub use name::Name;
pub use registry::key_for;
pub use sig::{ArgMode, Mut, Ref, Signature, SignatureSpec, This, Val};
