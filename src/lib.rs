//! ELF header codec
//!
//! Reads and writes the structural metadata of ELF files: the file header,
//! the section header table and the program header table, for both ELF32
//! and ELF64 in either byte order.
//!
//! ```no_run
//! # fn main() -> elfhdr::Result<()> {
//! let elf = elfhdr::Elf::open("a.out")?;
//! for ph in elf.program_headers() {
//!     if ph.is_load() {
//!         println!("{:#x} {:#x}", ph.p_vaddr, ph.p_memsz);
//!     }
//! }
//! assert_eq!(elfhdr::serialize(&elf)?, std::fs::read("a.out")?);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod symbol;

pub mod consts;
mod elf;
mod error;
mod header;
mod ident;
pub mod layout;
mod program;
mod section;

pub use crate::elf::*;
pub use crate::error::*;
pub use crate::header::*;
pub use crate::ident::*;
pub use crate::layout::Record;
pub use crate::program::*;
pub use crate::section::*;


use alloc::vec::Vec;

/// Parses a complete ELF image.
#[inline]
pub fn parse(bytes: &[u8]) -> Result<Elf> {
    Elf::from_bytes(bytes)
}

/// Serializes a parsed file back to bytes.
#[inline]
pub fn serialize(elf: &Elf) -> Result<Vec<u8>> {
    elf.to_bytes()
}
