//! Deferred call values: a name invocation captured, never executed.

use smallvec::SmallVec;

use crate::clause::Requirement;
use crate::key;
use crate::name::Name;
use crate::sig::Signature;

/// Single-use capture of a name token invocation's arguments.
///
/// Built only by [`Name::call`]; consumed by value within the enclosing
/// declaration expression. Not `Clone`, and intentionally useless to hold
/// on to: construct, consume once, discard.
#[must_use = "a deferred call must be consumed by the enclosing declaration"]
pub struct DeferredCall<Args> {
    name: Name,
    args: Args,
}

impl<Args> DeferredCall<Args> {
    pub(crate) fn new(name: Name, args: Args) -> Self {
        Self { name, args }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    /// Consume the capture, yielding the token identity and the forwarded
    /// arguments in their original order and types.
    pub fn into_parts(self) -> (Name, Args) {
        (self.name, self.args)
    }
}

impl<Args: ArgList> DeferredCall<Args> {
    /// Consume the capture into a requirement clause.
    ///
    /// The first captured argument stands for the receiver and is stripped;
    /// the remaining argument types become the signature atoms. The derived
    /// key equals the one a marker-spelled requirement with the same
    /// argument sequence produces.
    pub fn into_requirement(self) -> Requirement {
        let (name, args) = self.into_parts();
        let mut atoms = args.arg_atoms();
        if !atoms.is_empty() {
            atoms.remove(0);
        }
        let signature = Signature::from_atoms(atoms);
        let key = key::synthesize(name, signature.hash64());
        Requirement::from_parts(key, signature)
    }
}

/// Argument tuples whose element types can be reduced to canonical atoms.
pub trait ArgList {
    /// Atoms of every captured argument, receiver slot included.
    fn arg_atoms(&self) -> SmallVec<[String; 4]>;
}

macro_rules! impl_arg_list {
    ($($arg:ident),*) => {
        impl<$($arg),*> ArgList for ($($arg,)*) {
            fn arg_atoms(&self) -> SmallVec<[String; 4]> {
                SmallVec::from_iter([$(std::any::type_name::<$arg>().to_string()),*])
            }
        }
    };
}

impl_arg_list!();
impl_arg_list!(A0);
impl_arg_list!(A0, A1);
impl_arg_list!(A0, A1, A2);
impl_arg_list!(A0, A1, A2, A3);
impl_arg_list!(A0, A1, A2, A3, A4);
impl_arg_list!(A0, A1, A2, A3, A4, A5);
impl_arg_list!(A0, A1, A2, A3, A4, A5, A6);
impl_arg_list!(A0, A1, A2, A3, A4, A5, A6, A7);
