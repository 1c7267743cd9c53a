//! Error type shared by every decoder

use alloc::vec::Vec;
use thiserror::Error;

/// Everything that can go wrong while decoding or encoding ELF metadata.
///
/// Every variant is fatal for the parse that produced it; the crate never
/// attempts to recover internally.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ElfError {
    /// The first four bytes are not `\x7FELF`.
    #[error("not an ELF file (found {found:02x?})")]
    NotAnElf { found: Vec<u8> },

    /// The input ended before a fixed-size record was complete.
    #[error("unexpected end of input in {what}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    /// `e_ehsize` disagrees with the size implied by the file class.
    #[error("invalid e_ehsize, got `{found}` but was expecting `{expected}`")]
    InvalidHeaderSize { found: u16, expected: u16 },

    /// `e_shentsize` disagrees with the section header size of the file class.
    #[error("invalid e_shentsize, got `{found}` but was expecting `{expected}`")]
    InvalidSectionEntrySize { found: u16, expected: u16 },

    /// `e_phentsize` disagrees with the program header size of the file class.
    #[error("invalid e_phentsize, got `{found}` but was expecting `{expected}`")]
    InvalidProgramEntrySize { found: u16, expected: u16 },

    /// A strictly resolved field holds a value missing from its table.
    #[error("item not found for {value:#x} in {kind}")]
    UnknownValue { kind: &'static str, value: u64 },

    /// A header table does not fit inside the file.
    #[error("{table} table at offset {offset:#x} with size {size:#x} exceeds {available:#x} bytes")]
    OutOfRange {
        table: &'static str,
        offset: u64,
        size: u64,
        available: usize,
    },

    /// A value is too wide for the field it is written to.
    #[error("value {value:#x} does not fit in a {width}-byte field")]
    FieldOverflow { value: u64, width: usize },

    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, ElfError>;
