//! Symbolic values
//!
//! Raw integer fields are resolved against closed constant tables. A table
//! is a `SymbolKind`, usually generated with [`symbol_kind!`]. Plain kinds
//! resolve either strictly ([`resolve`]) or with a raw-integer fallback
//! ([`resolve_or_raw`]); flag kinds are `bitflags` types and resolve into a
//! [`FlagMatch`] that answers per-flag membership queries.

use crate::error::{ElfError, Result};
use bitflags::Flags;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A closed table of named integer constants.
pub trait SymbolKind: Copy + 'static {
    /// Name of the table, reported in resolution errors.
    const KIND: &'static str;

    fn from_raw(raw: u64) -> Option<Self>;

    fn raw(self) -> u64;

    fn name(self) -> &'static str;
}

/// Resolves `raw` against `K`, failing when no entry matches.
pub fn resolve<K: SymbolKind>(raw: u64) -> Result<K> {
    K::from_raw(raw).ok_or(ElfError::UnknownValue {
        kind: K::KIND,
        value: raw,
    })
}

/// Resolves `raw` against `K`, keeping the raw integer when no entry matches.
pub fn resolve_or_raw<K: SymbolKind>(raw: u64) -> Symbol<K> {
    match K::from_raw(raw) {
        Some(v) => Symbol::Known(v),
        None => {
            log::warn!("unknown {} value {:#x}, keeping raw value", K::KIND, raw);
            Symbol::Unknown(raw)
        }
    }
}

/// Resolves a flags field. Bits not covered by any known flag are retained.
#[inline]
pub fn resolve_flags<F: Flags + Copy>(raw: F::Bits) -> FlagMatch<F> {
    FlagMatch {
        flags: F::from_bits_retain(raw),
    }
}

/// Result of a fallback resolution.
///
/// Compares and hashes as its integer value, whether or not a name was found.
#[derive(Clone, Copy)]
pub enum Symbol<K> {
    Known(K),
    Unknown(u64),
}

impl<K: SymbolKind> Symbol<K> {
    #[inline]
    pub fn value(&self) -> u64 {
        match *self {
            Self::Known(v) => v.raw(),
            Self::Unknown(v) => v,
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            Self::Known(v) => Some(v.name()),
            Self::Unknown(_) => None,
        }
    }

    #[inline]
    pub fn known(&self) -> Option<K> {
        match *self {
            Self::Known(v) => Some(v),
            Self::Unknown(_) => None,
        }
    }
}

impl<K: SymbolKind> From<K> for Symbol<K> {
    #[inline]
    fn from(value: K) -> Self {
        Self::Known(value)
    }
}

impl<K: SymbolKind> From<Symbol<K>> for u64 {
    #[inline]
    fn from(value: Symbol<K>) -> Self {
        value.value()
    }
}

impl<K: SymbolKind> PartialEq for Symbol<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<K: SymbolKind> Eq for Symbol<K> {}

impl<K: SymbolKind> PartialEq<u64> for Symbol<K> {
    #[inline]
    fn eq(&self, other: &u64) -> bool {
        self.value() == *other
    }
}

impl<K: SymbolKind> PartialEq<K> for Symbol<K> {
    #[inline]
    fn eq(&self, other: &K) -> bool {
        self.value() == other.raw()
    }
}

impl<K: SymbolKind> Hash for Symbol<K> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state)
    }
}

impl<K: SymbolKind> fmt::Debug for Symbol<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => write!(f, "<{}.{}: {}>", K::KIND, v.name(), v.raw()),
            Self::Unknown(v) => write!(f, "{:#x}", v),
        }
    }
}

/// A flags field tagged with every known flag of its kind.
///
/// Membership is tested with [`FlagMatch::matches`], which checks whether a
/// flag's bits intersect the raw value rather than comparing for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagMatch<F> {
    flags: F,
}

impl<F: Flags + Copy> FlagMatch<F> {
    /// Raw value, including unknown bits.
    #[inline]
    pub fn bits(&self) -> F::Bits {
        self.flags.bits()
    }

    #[inline]
    pub fn flags(&self) -> F {
        self.flags
    }

    /// Returns whether any bit of `flag` is set. An empty flag never matches.
    #[inline]
    pub fn matches(&self, flag: F) -> bool {
        !flag.is_empty() && self.flags.intersects(flag)
    }

    /// Every known flag of this kind with its membership.
    pub fn known(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        F::FLAGS
            .iter()
            .map(move |flag| (flag.name(), self.matches(*flag.value())))
    }

    /// Bits that no known flag describes.
    #[inline]
    pub fn unknown_bits(&self) -> F::Bits {
        self.flags.difference(F::all()).bits()
    }
}

/// Declares a closed constant table as a `#[repr]` enum implementing
/// [`SymbolKind`](crate::symbol::SymbolKind).
///
/// Values compare equal to their raw integer type and hash as that integer.
#[macro_export]
macro_rules! symbol_kind {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $raw:ident => $kind:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:expr => $label:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[repr($raw)]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
            ::num_derive::FromPrimitive, ::num_derive::ToPrimitive,
        )]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )*
        }

        impl $crate::symbol::SymbolKind for $name {
            const KIND: &'static str = $kind;

            #[inline]
            fn from_raw(raw: u64) -> Option<Self> {
                <Self as ::num_traits::FromPrimitive>::from_u64(raw)
            }

            #[inline]
            fn raw(self) -> u64 {
                self as $raw as u64
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }
        }

        impl ::core::hash::Hash for $name {
            #[inline]
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash(&(*self as $raw), state)
            }
        }

        impl PartialEq<$raw> for $name {
            #[inline]
            fn eq(&self, other: &$raw) -> bool {
                *self as $raw == *other
            }
        }

        impl From<$name> for $raw {
            #[inline]
            fn from(value: $name) -> $raw {
                value as $raw
            }
        }
    };
}
