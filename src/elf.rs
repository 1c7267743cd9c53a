//! ELF container

use crate::error::{ElfError, Result};
use crate::header::Header;
use crate::layout::Record;
use crate::program::ProgramHeader;
use crate::section::SectionHeader;
use alloc::vec::Vec;
use core::fmt;

/// `e_shstrndx` value meaning "the index is stored in `sh_link` of section 0"
pub const SHN_XINDEX: u16 = 0xFFFF;

/// A parsed ELF file.
///
/// The header and both header tables are decoded views. The bytes after the
/// header are kept untouched and are the only source used when serializing.
#[derive(Clone, PartialEq, Eq)]
pub struct Elf {
    header: Header,
    section_headers: Vec<SectionHeader>,
    program_headers: Vec<ProgramHeader>,
    body: Vec<u8>,
}

impl Elf {
    /// Parses a complete ELF image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, section_headers, program_headers) = Self::decode_image(bytes)?;
        Ok(Self {
            body: bytes[header.len()..].to_vec(),
            header,
            section_headers,
            program_headers,
        })
    }

    /// Parses a complete ELF image, reusing its buffer as the body.
    pub fn from_vec(mut bytes: Vec<u8>) -> Result<Self> {
        let (header, section_headers, program_headers) = Self::decode_image(&bytes)?;
        let body = bytes.split_off(header.len());
        Ok(Self {
            header,
            section_headers,
            program_headers,
            body,
        })
    }

    /// Reads the stream to its end and parses it.
    #[cfg(feature = "std")]
    pub fn from_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut blob = Vec::new();
        reader.read_to_end(&mut blob)?;
        Self::from_vec(blob)
    }

    #[cfg(feature = "std")]
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn decode_image(image: &[u8]) -> Result<(Header, Vec<SectionHeader>, Vec<ProgramHeader>)> {
        let header = Header::decode(image)?;
        let ident = &header.e_ident;

        let blob = table(image, "section header", header.e_shoff, header.e_shnum, header.e_shentsize)?;
        let section_headers = SectionHeader::decode_many(blob, header.e_shnum as usize, ident)?;
        log::trace!(
            "{} section headers at {:#x}",
            section_headers.len(),
            header.e_shoff
        );

        let blob = table(image, "program header", header.e_phoff, header.e_phnum, header.e_phentsize)?;
        let program_headers = ProgramHeader::decode_many(blob, header.e_phnum as usize, ident)?;
        log::trace!(
            "{} program headers at {:#x}",
            program_headers.len(),
            header.e_phoff
        );

        log::debug!(
            "ELF image: {} bytes, {} sections, {} segments",
            image.len(),
            section_headers.len(),
            program_headers.len()
        );
        Ok((header, section_headers, program_headers))
    }

    /// Re-encodes the header and appends the untouched body.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.len());
        self.header.encode_into(&self.header.e_ident, &mut out)?;
        out.extend_from_slice(&self.body);
        Ok(out)
    }

    #[inline]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    #[inline]
    pub fn section_headers(&self) -> &[SectionHeader] {
        self.section_headers.as_slice()
    }

    #[inline]
    pub fn program_headers(&self) -> &[ProgramHeader] {
        self.program_headers.as_slice()
    }

    /// Bytes following the header.
    #[inline]
    pub fn body(&self) -> &[u8] {
        self.body.as_slice()
    }

    /// Size of the whole file in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.header.len() + self.body.len()
    }

    /// The section header of the section name string table, if any.
    pub fn section_name_table(&self) -> Option<&SectionHeader> {
        let index = match self.header.e_shstrndx {
            0 => return None,
            SHN_XINDEX => self.section_headers.first()?.sh_link as usize,
            index => index as usize,
        };
        self.section_headers.get(index)
    }
}

impl fmt::Debug for Elf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elf")
            .field("header", &self.header)
            .field("section_headers", &self.section_headers)
            .field("program_headers", &self.program_headers)
            .field("body", &format_args!("<bytes: size={}>", self.body.len()))
            .finish()
    }
}

/// Locates a header table inside the file image.
fn table<'a>(
    image: &'a [u8],
    name: &'static str,
    offset: u64,
    count: u16,
    entry_size: u16,
) -> Result<&'a [u8]> {
    if count == 0 {
        return Ok(&[]);
    }
    let size = count as u64 * entry_size as u64;
    match offset.checked_add(size) {
        Some(end) if end <= image.len() as u64 => Ok(&image[offset as usize..end as usize]),
        _ => Err(ElfError::OutOfRange {
            table: name,
            offset,
            size,
            available: image.len(),
        }),
    }
}
