//! Operation name tokens and the clause builders hanging off them.

use std::fmt;

use crate::clause::{Implementation, Requirement};
use crate::defer::DeferredCall;
use crate::registry;
use crate::sig::SignatureSpec;

/// Immutable operation name; the declaration and implementation entry point.
///
/// Identity is the character content: two tokens built from equal text are
/// equal and synthesize equal keys, whether they came from the [`name!`]
/// literal form or from [`Name::new`] on a non-literal `&'static str`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Name(&'static str);

impl Name {
    pub const fn new(text: &'static str) -> Self {
        Name(text)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }

    /// Declare a required operation with the given signature.
    ///
    /// Spell the receiver slot with the [`This`](crate::sig::This)
    /// placeholder: `name.requires::<fn(Ref<This>, Mut<Sink>)>()`.
    pub fn requires<S: SignatureSpec>(self) -> Requirement {
        Requirement::from_parts(registry::key_for::<S>(self), S::signature())
    }

    /// Provide an implementation for this name under the given signature.
    ///
    /// `callable` must coerce to the signature's function-pointer type;
    /// free functions and non-capturing closures do, capturing closures are
    /// rejected at compile time. The resulting clause's key equals the key
    /// of a requirement with a matching signature, receiver excluded.
    pub fn implement<S: SignatureSpec>(self, callable: S::Fn) -> Implementation {
        Implementation::from_parts(
            registry::key_for::<S>(self),
            S::signature(),
            Box::new(callable),
        )
    }

    /// Capture an invocation's arguments without executing anything.
    ///
    /// The result is a single-use value to be consumed by the enclosing
    /// declaration expression; it must not be stored or reused.
    pub fn call<Args>(self, args: Args) -> DeferredCall<Args> {
        DeferredCall::new(self, args)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Build a [`Name`] from a string literal.
#[macro_export]
macro_rules! name {
    ($text:literal) => {
        $crate::Name::new($text)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key;
    use crate::sig::{Mut, Ref, SignatureSpec, This, Val};

    const DRAW: Name = Name::new("draw");

    #[test]
    fn literal_and_wrapper_paths_agree() {
        let text: &'static str = "draw";
        let wrapped = Name::new(text);
        assert_eq!(name!("draw"), wrapped);

        let via_macro = name!("draw").requires::<fn(Ref<This>, Mut<String>)>();
        let via_wrapper = wrapped.requires::<fn(Ref<This>, Mut<String>)>();
        assert_eq!(via_macro.key(), via_wrapper.key());
    }

    #[test]
    fn matching_declarations_share_a_key() {
        let first = DRAW.requires::<fn(Ref<This>, Mut<String>)>();
        let second = DRAW.requires::<fn(Ref<This>, Mut<String>)>();
        assert_eq!(first.key(), second.key());
        assert_eq!(first.signature(), second.signature());
    }

    #[test]
    fn overloads_get_distinct_keys() {
        let plain = DRAW.requires::<fn(Ref<This>, Mut<String>)>();
        let indexed = DRAW.requires::<fn(Ref<This>, Val<i32>, Mut<String>)>();
        assert_ne!(plain.key(), indexed.key());
    }

    #[test]
    fn same_signature_under_other_name_differs() {
        let draw = DRAW.requires::<fn(Ref<This>, Mut<String>)>();
        let fill = Name::new("fill").requires::<fn(Ref<This>, Mut<String>)>();
        assert_ne!(draw.key(), fill.key());
    }

    #[test]
    fn implementation_key_is_synthesized_from_the_callable_signature() {
        struct Square;

        fn draw_square(_square: &Square, out: &mut String) {
            out.push_str("Square");
        }

        type Impl = fn(Ref<Square>, Mut<String>);
        let clause = DRAW.implement::<Impl>(draw_square);

        let expected = key::synthesize(DRAW, Impl::signature().hash64());
        assert_eq!(clause.key(), &expected);

        // Receiver exclusion pairs it with the placeholder requirement.
        let requirement = DRAW.requires::<fn(Ref<This>, Mut<String>)>();
        assert_eq!(clause.key(), requirement.key());
    }

    #[test]
    fn noncapturing_closures_register_and_run() {
        struct Circle;

        type Impl = fn(Ref<Circle>, Mut<String>);
        let clause = DRAW.implement::<Impl>(|_circle, out| out.push_str("Circle"));

        let callable = clause
            .callable::<<Impl as SignatureSpec>::Fn>()
            .expect("stored at the descriptor's callable type");
        let mut out = String::new();
        callable(&Circle, &mut out);
        assert_eq!(out, "Circle");
    }

    #[test]
    fn callable_downcast_rejects_other_types() {
        struct Circle;

        type Impl = fn(Ref<Circle>, Mut<String>);
        let clause = DRAW.implement::<Impl>(|_circle, _out| ());
        assert!(clause.callable::<fn()>().is_none());
    }
}
