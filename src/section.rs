//! Section header

use crate::consts::{SectionFlags, SectionType};
use crate::error::Result;
use crate::ident::Ident;
use crate::layout::{narrow, Field, Layout, Record};
use crate::symbol::{resolve_flags, resolve_or_raw, FlagMatch, Symbol};
use core::ops::Range;

static SECTION_HEADER: [Field; 10] = [
    Field::Word,   // sh_name
    Field::Word,   // sh_type
    Field::Native, // sh_flags
    Field::Native, // sh_addr
    Field::Native, // sh_offset
    Field::Native, // sh_size
    Field::Word,   // sh_link
    Field::Word,   // sh_info
    Field::Native, // sh_addralign
    Field::Native, // sh_entsize
];

/// An entry of the section header table (`Elf32_Shdr` / `Elf64_Shdr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionHeader {
    pub sh_name: u32,
    pub sh_type: Symbol<SectionType>,
    pub sh_flags: FlagMatch<SectionFlags>,
    pub sh_addr: u64,
    pub sh_offset: u64,
    pub sh_size: u64,
    pub sh_link: u32,
    pub sh_info: u32,
    pub sh_addralign: u64,
    pub sh_entsize: u64,
}

impl SectionHeader {
    #[inline]
    pub fn is_alloc(&self) -> bool {
        self.sh_flags.matches(SectionFlags::ALLOC)
    }

    /// Bytes occupied in the file, or `None` for `SHT_NOBITS` sections and
    /// ranges that overflow.
    pub fn file_range(&self) -> Option<Range<u64>> {
        if self.sh_type == SectionType::NoBits {
            return None;
        }
        let end = self.sh_offset.checked_add(self.sh_size)?;
        Some(self.sh_offset..end)
    }
}

impl Record<10> for SectionHeader {
    #[inline]
    fn layout(ident: &Ident) -> Layout<10> {
        Layout::new("section header", ident, &SECTION_HEADER)
    }

    fn from_fields(_ident: &Ident, values: &[u64; 10]) -> Result<Self> {
        let [name, sh_type, flags, addr, offset, size, link, info, addralign, entsize] = *values;
        Ok(Self {
            sh_name: narrow(name, 4)?,
            sh_type: resolve_or_raw(sh_type),
            sh_flags: resolve_flags(flags),
            sh_addr: addr,
            sh_offset: offset,
            sh_size: size,
            sh_link: narrow(link, 4)?,
            sh_info: narrow(info, 4)?,
            sh_addralign: addralign,
            sh_entsize: entsize,
        })
    }

    fn to_fields(&self, _ident: &Ident) -> [u64; 10] {
        [
            self.sh_name as u64,
            self.sh_type.value(),
            self.sh_flags.bits(),
            self.sh_addr,
            self.sh_offset,
            self.sh_size,
            self.sh_link as u64,
            self.sh_info as u64,
            self.sh_addralign,
            self.sh_entsize,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{Class, Data, OsAbi};
    use crate::error::ElfError;
    use alloc::vec::Vec;

    fn ident(class: Class, data: Data) -> Ident {
        Ident::new(class, data, 1, OsAbi::SysV, 0)
    }

    #[test]
    fn record_size() {
        for data in [Data::Lsb, Data::Msb] {
            assert_eq!(SectionHeader::record_size(&ident(Class::Elf32, data)), 40);
            assert_eq!(SectionHeader::record_size(&ident(Class::Elf64, data)), 64);
        }
    }

    #[test]
    fn decode_elf32_big_endian() {
        let ident = ident(Class::Elf32, Data::Msb);
        #[rustfmt::skip]
        let bytes = [
            0, 0, 0, 0x1B,          // sh_name
            0, 0, 0, 1,             // SHT_PROGBITS
            0, 0, 0, 6,             // SHF_ALLOC | SHF_EXECINSTR
            0x08, 0x04, 0x80, 0x00, // sh_addr
            0, 0, 0x10, 0,          // sh_offset
            0, 0, 0, 0x40,          // sh_size
            0, 0, 0, 0,             // sh_link
            0, 0, 0, 0,             // sh_info
            0, 0, 0, 16,            // sh_addralign
            0, 0, 0, 0,             // sh_entsize
        ];
        let sh = SectionHeader::decode(&bytes, &ident).unwrap();
        assert_eq!(sh.sh_name, 0x1B);
        assert_eq!(sh.sh_type, SectionType::ProgBits);
        assert!(sh.is_alloc());
        assert!(sh.sh_flags.matches(SectionFlags::EXECINSTR));
        assert!(!sh.sh_flags.matches(SectionFlags::WRITE));
        assert_eq!(sh.sh_addr, 0x0804_8000);
        assert_eq!(sh.file_range(), Some(0x1000..0x1040));
        assert_eq!(sh.sh_addralign, 16);
        assert_eq!(sh.encode(&ident).unwrap(), bytes);
    }

    #[test]
    fn unknown_type_is_kept() {
        let ident = ident(Class::Elf64, Data::Lsb);
        let mut bytes = [0u8; 64];
        bytes[4..8].copy_from_slice(&0x6FFF_4700u32.to_le_bytes());
        let sh = SectionHeader::decode(&bytes, &ident).unwrap();
        assert_eq!(sh.sh_type, 0x6FFF_4700u64);
        assert_eq!(sh.sh_type.name(), None);
        assert_eq!(sh.encode(&ident).unwrap(), bytes);
    }

    #[test]
    fn nobits_has_no_file_range() {
        let ident = ident(Class::Elf64, Data::Lsb);
        let mut bytes = [0u8; 64];
        bytes[4] = 8;
        let sh = SectionHeader::decode(&bytes, &ident).unwrap();
        assert_eq!(sh.sh_type, SectionType::NoBits);
        assert_eq!(sh.file_range(), None);
    }

    #[test]
    fn decode_each_isolates_short_tail() {
        let ident = ident(Class::Elf64, Data::Lsb);
        let bytes = [0u8; 64 * 2 + 10];
        let results = SectionHeader::decode_each(&bytes, 3, &ident);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(matches!(
            results[2],
            Err(ElfError::UnexpectedEof { available: 10, .. })
        ));
        assert!(SectionHeader::decode_many(&bytes, 3, &ident).is_err());
        let headers: Vec<_> = SectionHeader::decode_many(&bytes, 2, &ident).unwrap();
        assert_eq!(headers.len(), 2);
    }
}
