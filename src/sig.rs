//! Signature descriptors: the argument types of an operation, receiver
//! excluded, reduced to canonical atoms.
//!
//! A descriptor is spelled as a function-pointer type over argument-mode
//! markers, e.g. `fn(Ref<This>, Mut<Sink>)` for an operation taking its
//! receiver by shared reference and a sink by mutable reference. The first
//! parameter is always the receiver slot and never contributes to the
//! canonical form; that is what lets a requirement spelled with the [`This`]
//! placeholder and an implementation spelled with a concrete type agree on
//! one key. Return types are part of the spelling but are not hashed.

use std::any::type_name;
use std::marker::PhantomData;

use anyhow::bail;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::Result;
use crate::canon::{push_array, push_text};
use crate::fingerprint;

/// Placeholder for the receiver type in a requirement signature.
pub struct This;

/// Shared-reference argument mode: the callable takes `&T`.
pub struct Ref<T: ?Sized>(PhantomData<T>);

/// Mutable-reference argument mode: the callable takes `&mut T`.
pub struct Mut<T: ?Sized>(PhantomData<T>);

/// By-value argument mode: the callable takes `T`.
pub struct Val<T>(PhantomData<T>);

/// One argument slot of a signature descriptor.
///
/// `Param<'a>` is the concrete parameter type an implementation callable
/// must accept in that slot; `atom` is the canonical identifier string the
/// hasher sees. Atoms for reference modes are prefixed so that they agree
/// with `std::any::type_name`'s rendering of `&T` / `&mut T`, which keeps
/// the marker path and the value-derived path on the same canonical form.
pub trait ArgMode: 'static {
    type Param<'a>
    where
        Self: 'a;

    fn atom() -> String;
}

impl<T: ?Sized + 'static> ArgMode for Ref<T> {
    type Param<'a>
        = &'a T
    where
        Self: 'a;

    fn atom() -> String {
        format!("&{}", type_name::<T>())
    }
}

impl<T: ?Sized + 'static> ArgMode for Mut<T> {
    type Param<'a>
        = &'a mut T
    where
        Self: 'a;

    fn atom() -> String {
        format!("&mut {}", type_name::<T>())
    }
}

impl<T: 'static> ArgMode for Val<T> {
    type Param<'a>
        = T
    where
        Self: 'a;

    fn atom() -> String {
        type_name::<T>().to_string()
    }
}

/// Compile-time spelling of an operation signature.
///
/// Implemented for function-pointer types whose parameters are [`ArgMode`]
/// markers. `Fn` is the concrete callable type an implementation must
/// coerce to; only plain function references qualify, so a capturing
/// closure passed where a `Fn` is expected is rejected by the compiler
/// (closures can only be coerced to `fn` types if they do not capture).
pub trait SignatureSpec: 'static {
    /// Callable type for implementations of this signature.
    type Fn: Copy + Send + Sync + 'static;

    /// Canonical atoms of the arguments, receiver slot removed.
    fn atoms() -> SmallVec<[String; 4]>;

    /// Materialize the descriptor.
    fn signature() -> Signature {
        Signature { atoms: Self::atoms() }
    }
}

// Nullary form: no receiver at all. Hashes the empty sequence, same as a
// receiver-only member signature.
impl<R: 'static> SignatureSpec for fn() -> R {
    type Fn = fn() -> R;

    fn atoms() -> SmallVec<[String; 4]> {
        SmallVec::new()
    }
}

macro_rules! impl_signature_spec {
    ($($arg:ident),*) => {
        impl<R: 'static, Recv: ArgMode $(, $arg: ArgMode)*> SignatureSpec
            for fn(Recv $(, $arg)*) -> R
        {
            type Fn = for<'a> fn(Recv::Param<'a> $(, $arg::Param<'a>)*) -> R;

            fn atoms() -> SmallVec<[String; 4]> {
                SmallVec::from_iter([$($arg::atom()),*])
            }
        }
    };
}

impl_signature_spec!();
impl_signature_spec!(A1);
impl_signature_spec!(A1, A2);
impl_signature_spec!(A1, A2, A3);
impl_signature_spec!(A1, A2, A3, A4);
impl_signature_spec!(A1, A2, A3, A4, A5);
impl_signature_spec!(A1, A2, A3, A4, A5, A6);
impl_signature_spec!(A1, A2, A3, A4, A5, A6, A7);

/// Ordered argument-atom sequence of one operation, receiver excluded.
///
/// Equality is structural equality of the sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    atoms: SmallVec<[String; 4]>,
}

impl Signature {
    pub fn from_atoms(atoms: impl IntoIterator<Item = String>) -> Self {
        Self {
            atoms: atoms.into_iter().collect(),
        }
    }

    pub fn atoms(&self) -> &[String] {
        &self.atoms
    }

    /// Number of hashed arguments (receiver not counted).
    pub fn arity(&self) -> usize {
        self.atoms.len()
    }

    /// Encode into canonical CBOR: `["sig", [atom, ...]]`.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        push_array(&mut buf, 2);
        push_text(&mut buf, "sig");
        push_array(&mut buf, self.atoms.len() as u64);
        for atom in &self.atoms {
            push_text(&mut buf, atom);
        }
        buf
    }

    /// Decode a canonical signature encoding.
    ///
    /// External table builders use this to compare a stored clause's
    /// signature against a requirement when checking for mismatches.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let record: SigRecord = serde_cbor::from_slice(bytes)?;
        if record.0 != "sig" {
            bail!("object kind mismatch while decoding signature: {}", record.0);
        }
        Ok(Self {
            atoms: record.1.into_iter().collect(),
        })
    }

    /// Full 32-byte digest of the canonical encoding.
    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint::compute(&self.encode())
    }

    /// 64-bit hash fed to the key synthesizer.
    pub fn hash64(&self) -> u64 {
        fingerprint::hash64(&self.fingerprint())
    }
}

#[derive(Deserialize)]
struct SigRecord(String, Vec<String>);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_cbor::Value as CborValue;

    #[test]
    fn hashing_is_deterministic() {
        type S = fn(Ref<This>, Mut<String>);
        assert_eq!(S::signature().hash64(), S::signature().hash64());
        assert_eq!(S::signature().fingerprint(), S::signature().fingerprint());
    }

    #[test]
    fn receiver_slot_is_excluded() {
        struct Square;

        let req = <fn(Ref<This>, Mut<String>) as SignatureSpec>::signature();
        let imp = <fn(Ref<Square>, Mut<String>) as SignatureSpec>::signature();
        assert_eq!(req, imp);
        assert_eq!(req.hash64(), imp.hash64());
    }

    #[test]
    fn distinct_argument_sequences_hash_apart() {
        let short = <fn(Ref<This>, Mut<String>) as SignatureSpec>::signature();
        let long = <fn(Ref<This>, Val<i32>, Mut<String>) as SignatureSpec>::signature();
        assert_ne!(short, long);
        assert_ne!(short.hash64(), long.hash64());
    }

    #[test]
    fn zero_argument_forms_share_the_empty_sequence() {
        let nullary = <fn() as SignatureSpec>::signature();
        let receiver_only = <fn(Ref<This>) as SignatureSpec>::signature();
        assert_eq!(nullary.arity(), 0);
        assert_eq!(nullary, receiver_only);
    }

    #[test]
    fn reference_atoms_match_type_name_rendering() {
        assert_eq!(Ref::<str>::atom(), std::any::type_name::<&str>());
        assert_eq!(
            Mut::<String>::atom(),
            std::any::type_name::<&mut String>()
        );
        assert_eq!(Val::<i32>::atom(), std::any::type_name::<i32>());
    }

    #[test]
    fn encode_decode_roundtrip() -> crate::Result<()> {
        let sig = <fn(Ref<This>, Val<i32>, Mut<String>) as SignatureSpec>::signature();
        let decoded = Signature::decode(&sig.encode())?;
        assert_eq!(decoded, sig);
        Ok(())
    }

    #[test]
    fn encode_is_tagged_array() -> crate::Result<()> {
        let sig = <fn(Ref<This>, Val<i32>) as SignatureSpec>::signature();
        let value: CborValue = serde_cbor::from_slice(&sig.encode())?;
        let items = match value {
            CborValue::Array(items) => items,
            other => anyhow::bail!("signature did not encode as array: {other:?}"),
        };
        assert_eq!(items[0], CborValue::Text("sig".to_string()));
        assert_eq!(
            items[1],
            CborValue::Array(vec![CborValue::Text("i32".to_string())])
        );
        Ok(())
    }

    #[test]
    fn decode_rejects_foreign_kinds() {
        let mut buf = Vec::new();
        crate::canon::push_array(&mut buf, 2);
        crate::canon::push_text(&mut buf, "word");
        crate::canon::push_array(&mut buf, 0);
        assert!(Signature::decode(&buf).is_err());
    }
}
