//! ELF file header

use crate::consts::{ElfType, Machine, Version};
use crate::error::{ElfError, Result};
use crate::ident::Ident;
use crate::layout::{narrow, Field, Layout, Record};
use crate::program::ProgramHeader;
use crate::section::SectionHeader;
use crate::symbol::{resolve, resolve_or_raw, Symbol, SymbolKind};
use alloc::vec::Vec;

static FILE_HEADER: [Field; 13] = [
    Field::Half,   // e_type
    Field::Half,   // e_machine
    Field::Word,   // e_version
    Field::Native, // e_entry
    Field::Native, // e_phoff
    Field::Native, // e_shoff
    Field::Word,   // e_flags
    Field::Half,   // e_ehsize
    Field::Half,   // e_phentsize
    Field::Half,   // e_phnum
    Field::Half,   // e_shentsize
    Field::Half,   // e_shnum
    Field::Half,   // e_shstrndx
];

/// The ELF file header (`Elf32_Ehdr` / `Elf64_Ehdr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    pub e_ident: Ident,
    pub e_type: ElfType,
    pub e_machine: Machine,
    pub e_version: Symbol<Version>,
    pub e_entry: u64,
    pub e_phoff: u64,
    pub e_shoff: u64,
    pub e_flags: u32,
    pub e_ehsize: u16,
    pub e_phentsize: u16,
    pub e_phnum: u16,
    pub e_shentsize: u16,
    pub e_shnum: u16,
    pub e_shstrndx: u16,
}

impl Header {
    /// Decodes the identification block and the header that follows it.
    ///
    /// # Errors
    ///
    /// Besides malformed input, fails when `e_ehsize`, `e_shentsize` or (with
    /// a non-empty program header table) `e_phentsize` disagree with the
    /// sizes implied by the file class.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let ident = Ident::decode(bytes)?;
        let header = <Self as Record<13>>::decode(bytes, &ident)?;
        log::debug!(
            "ELF header: {:?} {:?} {} {} phnum {} shnum {}",
            ident.class(),
            ident.endian(),
            header.e_type.name(),
            header.e_machine.name(),
            header.e_phnum,
            header.e_shnum,
        );
        Ok(header)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        <Self as Record<13>>::encode(self, &self.e_ident)
    }

    /// Size of the header in bytes, 52 for ELF32 and 64 for ELF64.
    #[inline]
    pub fn len(&self) -> usize {
        Self::size_for(&self.e_ident)
    }

    #[inline]
    pub fn size_for(ident: &Ident) -> usize {
        Self::record_size(ident)
    }
}

impl Record<13> for Header {
    #[inline]
    fn layout(ident: &Ident) -> Layout<13> {
        Layout::new("file header", ident, &FILE_HEADER).with_prefix(Ident::SIZE)
    }

    fn from_fields(ident: &Ident, values: &[u64; 13]) -> Result<Self> {
        let [e_type, machine, version, entry, phoff, shoff, flags, ehsize, phentsize, phnum, shentsize, shnum, shstrndx] =
            *values;

        let e_ehsize = narrow(ehsize, 2)?;
        let expected = narrow(Self::record_size(ident) as u64, 2)?;
        if e_ehsize != expected {
            return Err(ElfError::InvalidHeaderSize {
                found: e_ehsize,
                expected,
            });
        }

        let e_shentsize = narrow(shentsize, 2)?;
        let expected = narrow(SectionHeader::record_size(ident) as u64, 2)?;
        if e_shentsize != expected {
            return Err(ElfError::InvalidSectionEntrySize {
                found: e_shentsize,
                expected,
            });
        }

        let e_phentsize = narrow(phentsize, 2)?;
        let e_phnum = narrow(phnum, 2)?;
        let expected = narrow(ProgramHeader::record_size(ident) as u64, 2)?;
        if e_phnum > 0 && e_phentsize != expected {
            return Err(ElfError::InvalidProgramEntrySize {
                found: e_phentsize,
                expected,
            });
        }

        Ok(Self {
            e_ident: *ident,
            e_type: resolve(e_type)?,
            e_machine: resolve(machine)?,
            e_version: resolve_or_raw(version),
            e_entry: entry,
            e_phoff: phoff,
            e_shoff: shoff,
            e_flags: narrow(flags, 4)?,
            e_ehsize,
            e_phentsize,
            e_phnum,
            e_shentsize,
            e_shnum: narrow(shnum, 2)?,
            e_shstrndx: narrow(shstrndx, 2)?,
        })
    }

    fn to_fields(&self, _ident: &Ident) -> [u64; 13] {
        [
            self.e_type.raw(),
            self.e_machine.raw(),
            self.e_version.value(),
            self.e_entry,
            self.e_phoff,
            self.e_shoff,
            self.e_flags as u64,
            self.e_ehsize as u64,
            self.e_phentsize as u64,
            self.e_phnum as u64,
            self.e_shentsize as u64,
            self.e_shnum as u64,
            self.e_shstrndx as u64,
        ]
    }

    fn encode_into(&self, ident: &Ident, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&ident.encode());
        Self::layout(ident).encode(&self.to_fields(ident), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{Class, Data, OsAbi};
    use crate::ident::Endian;

    fn ident(class: Class, data: Data) -> Ident {
        Ident::new(class, data, 1, OsAbi::SysV, 0)
    }

    /// ET_EXEC x86-64 header, 2 program headers at 0x40, 5 sections at 0x1000
    #[rustfmt::skip]
    const HEADER_64_LE: [u8; 64] = [
        0x7F, b'E', b'L', b'F', 2, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        2, 0,                                   // e_type
        62, 0,                                  // e_machine
        1, 0, 0, 0,                             // e_version
        0x00, 0x10, 0x40, 0, 0, 0, 0, 0,        // e_entry
        0x40, 0, 0, 0, 0, 0, 0, 0,              // e_phoff
        0x00, 0x10, 0, 0, 0, 0, 0, 0,           // e_shoff
        0, 0, 0, 0,                             // e_flags
        64, 0,                                  // e_ehsize
        56, 0,                                  // e_phentsize
        2, 0,                                   // e_phnum
        64, 0,                                  // e_shentsize
        5, 0,                                   // e_shnum
        4, 0,                                   // e_shstrndx
    ];

    /// ET_DYN MIPS header, no program headers, 3 sections at 0x200
    #[rustfmt::skip]
    const HEADER_32_BE: [u8; 52] = [
        0x7F, b'E', b'L', b'F', 1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 3,                                   // e_type
        0, 8,                                   // e_machine
        0, 0, 0, 1,                             // e_version
        0, 0, 0x04, 0x00,                       // e_entry
        0, 0, 0, 0,                             // e_phoff
        0, 0, 0x02, 0x00,                       // e_shoff
        0x70, 0, 0x10, 0x07,                    // e_flags
        0, 52,                                  // e_ehsize
        0, 0,                                   // e_phentsize
        0, 0,                                   // e_phnum
        0, 40,                                  // e_shentsize
        0, 3,                                   // e_shnum
        0, 2,                                   // e_shstrndx
    ];

    #[test]
    fn record_size() {
        for data in [Data::Lsb, Data::Msb] {
            assert_eq!(Header::size_for(&ident(Class::Elf32, data)), 52);
            assert_eq!(Header::size_for(&ident(Class::Elf64, data)), 64);
        }
    }

    #[test]
    fn decode_64_le() {
        let header = Header::decode(&HEADER_64_LE).unwrap();
        assert_eq!(header.e_ident.class(), Class::Elf64);
        assert_eq!(header.e_type, ElfType::Exec);
        assert_eq!(header.e_machine, Machine::X86_64);
        assert_eq!(header.e_version, Version::Current);
        assert_eq!(header.e_entry, 0x40_1000);
        assert_eq!(header.e_phoff, 0x40);
        assert_eq!(header.e_shoff, 0x1000);
        assert_eq!(header.e_phnum, 2);
        assert_eq!(header.e_shnum, 5);
        assert_eq!(header.e_shstrndx, 4);
        assert_eq!(header.len(), 64);
        assert_eq!(header.encode().unwrap(), HEADER_64_LE);
    }

    #[test]
    fn decode_32_be() {
        let header = Header::decode(&HEADER_32_BE).unwrap();
        assert_eq!(header.e_ident.endian(), Endian::Big);
        assert_eq!(header.e_type, ElfType::Dyn);
        assert_eq!(header.e_machine, Machine::Mips);
        assert_eq!(header.e_entry, 0x400);
        assert_eq!(header.e_shoff, 0x200);
        assert_eq!(header.e_flags, 0x7000_1007);
        assert_eq!(header.len(), 52);
        assert_eq!(header.encode().unwrap(), HEADER_32_BE);
    }

    #[test]
    #[should_panic(expected = "InvalidHeaderSize")]
    fn header_size_of_other_class() {
        let mut bytes = HEADER_64_LE;
        bytes[52] = 52;
        Header::decode(&bytes).unwrap();
    }

    #[test]
    fn section_entry_size_mismatch() {
        let mut bytes = HEADER_64_LE;
        bytes[58] = 40;
        match Header::decode(&bytes) {
            Err(ElfError::InvalidSectionEntrySize { found, expected }) => {
                assert_eq!(found, 40);
                assert_eq!(expected, 64);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn program_entry_size_mismatch() {
        let mut bytes = HEADER_64_LE;
        bytes[54] = 32;
        assert!(matches!(
            Header::decode(&bytes),
            Err(ElfError::InvalidProgramEntrySize {
                found: 32,
                expected: 56
            })
        ));
    }

    #[test]
    fn unknown_version_falls_back() {
        let mut bytes = HEADER_64_LE;
        bytes[20] = 0x2A;
        let header = Header::decode(&bytes).unwrap();
        assert_eq!(header.e_version, 0x2Au64);
        assert_eq!(header.e_version.name(), None);
        assert_eq!(header.encode().unwrap(), bytes);
    }

    #[test]
    fn unknown_machine_is_rejected() {
        let mut bytes = HEADER_64_LE;
        bytes[18] = 0xFE;
        bytes[19] = 0xCA;
        match Header::decode(&bytes) {
            Err(ElfError::UnknownValue { kind, value }) => {
                assert_eq!(kind, "EM");
                assert_eq!(value, 0xCAFE);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn truncated_header() {
        assert!(matches!(
            Header::decode(&HEADER_64_LE[..40]),
            Err(ElfError::UnexpectedEof {
                what: "file header",
                needed: 64,
                available: 40
            })
        ));
    }
}
