//! Program header

use crate::consts::{Class, SegmentFlags, SegmentType};
use crate::error::Result;
use crate::ident::Ident;
use crate::layout::{narrow, Field, Layout, Record};
use crate::symbol::{resolve_flags, resolve_or_raw, FlagMatch, Symbol};
use core::ops::Range;

// ELF32 keeps p_flags next to p_align, ELF64 moves it up for alignment.
static PROGRAM_HEADER_32: [Field; 8] = [
    Field::Word,   // p_type
    Field::Native, // p_offset
    Field::Native, // p_vaddr
    Field::Native, // p_paddr
    Field::Native, // p_filesz
    Field::Native, // p_memsz
    Field::Word,   // p_flags
    Field::Native, // p_align
];

static PROGRAM_HEADER_64: [Field; 8] = [
    Field::Word,   // p_type
    Field::Word,   // p_flags
    Field::Native, // p_offset
    Field::Native, // p_vaddr
    Field::Native, // p_paddr
    Field::Native, // p_filesz
    Field::Native, // p_memsz
    Field::Native, // p_align
];

/// An entry of the program header table (`Elf32_Phdr` / `Elf64_Phdr`).
///
/// The field order is the same for both classes; only the wire order differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHeader {
    pub p_type: Symbol<SegmentType>,
    pub p_flags: FlagMatch<SegmentFlags>,
    pub p_offset: u64,
    pub p_vaddr: u64,
    pub p_paddr: u64,
    pub p_filesz: u64,
    pub p_memsz: u64,
    pub p_align: u64,
}

impl ProgramHeader {
    #[inline]
    pub fn is_load(&self) -> bool {
        self.p_type == SegmentType::Load
    }

    /// Bytes of the segment image stored in the file.
    pub fn file_range(&self) -> Option<Range<u64>> {
        let end = self.p_offset.checked_add(self.p_filesz)?;
        Some(self.p_offset..end)
    }
}

impl Record<8> for ProgramHeader {
    #[inline]
    fn layout(ident: &Ident) -> Layout<8> {
        let fields = match ident.class() {
            Class::Elf32 => &PROGRAM_HEADER_32,
            Class::Elf64 => &PROGRAM_HEADER_64,
        };
        Layout::new("program header", ident, fields)
    }

    fn from_fields(ident: &Ident, values: &[u64; 8]) -> Result<Self> {
        let (p_type, flags, offset, vaddr, paddr, filesz, memsz, align) = match ident.class() {
            Class::Elf32 => {
                let [p_type, offset, vaddr, paddr, filesz, memsz, flags, align] = *values;
                (p_type, flags, offset, vaddr, paddr, filesz, memsz, align)
            }
            Class::Elf64 => {
                let [p_type, flags, offset, vaddr, paddr, filesz, memsz, align] = *values;
                (p_type, flags, offset, vaddr, paddr, filesz, memsz, align)
            }
        };
        Ok(Self {
            p_type: resolve_or_raw(p_type),
            p_flags: resolve_flags(narrow::<u32>(flags, 4)?),
            p_offset: offset,
            p_vaddr: vaddr,
            p_paddr: paddr,
            p_filesz: filesz,
            p_memsz: memsz,
            p_align: align,
        })
    }

    fn to_fields(&self, ident: &Ident) -> [u64; 8] {
        let flags = self.p_flags.bits() as u64;
        match ident.class() {
            Class::Elf32 => [
                self.p_type.value(),
                self.p_offset,
                self.p_vaddr,
                self.p_paddr,
                self.p_filesz,
                self.p_memsz,
                flags,
                self.p_align,
            ],
            Class::Elf64 => [
                self.p_type.value(),
                flags,
                self.p_offset,
                self.p_vaddr,
                self.p_paddr,
                self.p_filesz,
                self.p_memsz,
                self.p_align,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{Data, OsAbi};
    use alloc::vec::Vec;

    fn ident(class: Class, data: Data) -> Ident {
        Ident::new(class, data, 1, OsAbi::SysV, 0)
    }

    fn words_le(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn record_size() {
        for data in [Data::Lsb, Data::Msb] {
            assert_eq!(ProgramHeader::record_size(&ident(Class::Elf32, data)), 32);
            assert_eq!(ProgramHeader::record_size(&ident(Class::Elf64, data)), 56);
        }
    }

    #[test]
    fn wire_order_differs_by_class() {
        // PT_LOAD, R+X, offset 0x1000, vaddr 0x401000, paddr 0x401000,
        // filesz 0x200, memsz 0x300, align 0x1000
        let elf32 = words_le(&[1, 0x1000, 0x40_1000, 0x40_1000, 0x200, 0x300, 5, 0x1000]);

        let mut elf64 = words_le(&[1, 5]);
        for v in [0x1000u64, 0x40_1000, 0x40_1000, 0x200, 0x300, 0x1000] {
            elf64.extend_from_slice(&v.to_le_bytes());
        }

        let ident32 = ident(Class::Elf32, Data::Lsb);
        let ident64 = ident(Class::Elf64, Data::Lsb);
        let ph32 = ProgramHeader::decode(&elf32, &ident32).unwrap();
        let ph64 = ProgramHeader::decode(&elf64, &ident64).unwrap();
        assert_eq!(ph32, ph64);

        assert!(ph32.is_load());
        assert!(ph32.p_flags.matches(SegmentFlags::READ));
        assert!(ph32.p_flags.matches(SegmentFlags::EXEC));
        assert!(!ph32.p_flags.matches(SegmentFlags::WRITE));
        assert_eq!(ph32.p_offset, 0x1000);
        assert_eq!(ph32.p_vaddr, 0x40_1000);
        assert_eq!(ph32.p_filesz, 0x200);
        assert_eq!(ph32.p_memsz, 0x300);
        assert_eq!(ph32.p_align, 0x1000);
        assert_eq!(ph32.file_range(), Some(0x1000..0x1200));

        assert_eq!(ph32.encode(&ident32).unwrap(), elf32);
        assert_eq!(ph64.encode(&ident64).unwrap(), elf64);
    }

    #[test]
    fn vendor_segment_type_is_kept() {
        let ident = ident(Class::Elf32, Data::Lsb);
        let bytes = words_le(&[0x6474_E551, 0, 0, 0, 0, 0, 6, 16]);
        let ph = ProgramHeader::decode(&bytes, &ident).unwrap();
        assert_eq!(ph.p_type.name(), Some("PT_GNU_STACK"));
        assert!(ph.p_flags.matches(SegmentFlags::WRITE));

        let bytes = words_le(&[0x6FFF_0001, 0, 0, 0, 0, 0, 0, 0]);
        let ph = ProgramHeader::decode(&bytes, &ident).unwrap();
        assert_eq!(ph.p_type, 0x6FFF_0001u64);
        assert_eq!(ph.p_type.name(), None);
    }
}
