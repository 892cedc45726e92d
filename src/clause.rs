//! Requirement and implementation clauses: a composite key paired with its
//! payload. The two payload kinds are distinct types, so a collection of one
//! can never be polluted with the other.

use std::any::Any;
use std::fmt;

use crate::key::Key;
use crate::sig::Signature;

/// A declared operation: key plus signature descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement {
    key: Key,
    signature: Signature,
}

impl Requirement {
    pub(crate) fn from_parts(key: Key, signature: Signature) -> Self {
        Self { key, signature }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// A provided operation: key, signature descriptor, and the callable.
///
/// The callable is stored type-erased. It is always a plain function
/// reference (the builders only accept `SignatureSpec::Fn` values), so the
/// clause itself carries no per-instance state.
pub struct Implementation {
    key: Key,
    signature: Signature,
    callable: Box<dyn Any + Send + Sync>,
}

impl Implementation {
    pub(crate) fn from_parts(
        key: Key,
        signature: Signature,
        callable: Box<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            key,
            signature,
            callable,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Recover the callable at its concrete function-pointer type.
    ///
    /// Callers name the type via the descriptor that produced the clause,
    /// `<S as SignatureSpec>::Fn`; any other type yields `None`.
    pub fn callable<F: Copy + 'static>(&self) -> Option<F> {
        self.callable.downcast_ref::<F>().copied()
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("key", &self.key)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
