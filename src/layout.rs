//! Layout-parameterized record codec
//!
//! Every fixed-size ELF record describes its wire format as a [`Layout`]:
//! a list of field widths, resolved against the class and byte order of the
//! identification block. One generic routine decodes and encodes all of them.

use crate::consts::Class;
use crate::error::{ElfError, Result};
use crate::ident::{Endian, Ident};
use alloc::vec::Vec;
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Width token of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `Elf_Half`, always 2 bytes
    Half,
    /// `Elf_Word`, always 4 bytes
    Word,
    /// Address, offset or `Elf_Xword`: 4 bytes for ELF32, 8 bytes for ELF64
    Native,
}

impl Field {
    #[inline]
    pub const fn size(self, class: Class) -> usize {
        match self {
            Self::Half => 2,
            Self::Word => 4,
            Self::Native => class.native_size(),
        }
    }
}

/// Binary layout of a record for one class and byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout<const N: usize> {
    name: &'static str,
    endian: Endian,
    class: Class,
    prefix: usize,
    fields: &'static [Field; N],
}

impl<const N: usize> Layout<N> {
    #[inline]
    pub const fn new(name: &'static str, ident: &Ident, fields: &'static [Field; N]) -> Self {
        Self {
            name,
            endian: ident.endian(),
            class: ident.class(),
            prefix: 0,
            fields,
        }
    }

    /// Reserves `prefix` leading bytes that belong to another record.
    #[inline]
    pub const fn with_prefix(mut self, prefix: usize) -> Self {
        self.prefix = prefix;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    #[inline]
    pub const fn fields(&self) -> &'static [Field; N] {
        self.fields
    }

    /// Total size in bytes, prefix included.
    pub fn size(&self) -> usize {
        self.prefix
            + self
                .fields
                .iter()
                .map(|field| field.size(self.class))
                .sum::<usize>()
    }

    /// Decodes the fields from `bytes`, skipping the prefix.
    pub fn decode(&self, bytes: &[u8]) -> Result<[u64; N]> {
        let size = self.size();
        if bytes.len() < size {
            return Err(ElfError::UnexpectedEof {
                what: self.name,
                needed: size,
                available: bytes.len(),
            });
        }
        let bytes = &bytes[self.prefix..size];
        Ok(match self.endian {
            Endian::Little => self.decode_with::<LittleEndian>(bytes),
            Endian::Big => self.decode_with::<BigEndian>(bytes),
        })
    }

    fn decode_with<B: ByteOrder>(&self, bytes: &[u8]) -> [u64; N] {
        let mut values = [0; N];
        let mut position = 0;
        for (value, field) in values.iter_mut().zip(self.fields.iter()) {
            let size = field.size(self.class);
            let blob = &bytes[position..position + size];
            *value = match size {
                2 => B::read_u16(blob) as u64,
                4 => B::read_u32(blob) as u64,
                _ => B::read_u64(blob),
            };
            position += size;
        }
        values
    }

    /// Appends the fields to `out`. The prefix is not written.
    pub fn encode(&self, values: &[u64; N], out: &mut Vec<u8>) -> Result<()> {
        match self.endian {
            Endian::Little => self.encode_with::<LittleEndian>(values, out),
            Endian::Big => self.encode_with::<BigEndian>(values, out),
        }
    }

    fn encode_with<B: ByteOrder>(&self, values: &[u64; N], out: &mut Vec<u8>) -> Result<()> {
        let start = out.len();
        out.resize(start + self.size() - self.prefix, 0);
        let mut position = start;
        for (&value, field) in values.iter().zip(self.fields.iter()) {
            let size = field.size(self.class);
            let blob = &mut out[position..position + size];
            let result = match size {
                2 => narrow(value, size).map(|v| B::write_u16(blob, v)),
                4 => narrow(value, size).map(|v| B::write_u32(blob, v)),
                _ => Ok(B::write_u64(blob, value)),
            };
            if let Err(err) = result {
                out.truncate(start);
                return Err(err);
            }
            position += size;
        }
        Ok(())
    }
}

/// Converts a decoded field value to a narrower integer type.
#[inline]
pub fn narrow<T: TryFrom<u64>>(value: u64, width: usize) -> Result<T> {
    T::try_from(value).map_err(|_| ElfError::FieldOverflow { value, width })
}

/// A fixed-size record whose wire format depends on the identification block.
///
/// `N` is the number of fields in the layout. Implementors provide the
/// layout and the mapping between wire values and the record; decoding and
/// encoding are shared.
pub trait Record<const N: usize>: Sized {
    fn layout(ident: &Ident) -> Layout<N>;

    fn from_fields(ident: &Ident, values: &[u64; N]) -> Result<Self>;

    fn to_fields(&self, ident: &Ident) -> [u64; N];

    #[inline]
    fn record_size(ident: &Ident) -> usize {
        Self::layout(ident).size()
    }

    fn decode(bytes: &[u8], ident: &Ident) -> Result<Self> {
        let values = Self::layout(ident).decode(bytes)?;
        Self::from_fields(ident, &values)
    }

    /// Decodes `count` consecutive records, failing on the first bad one.
    fn decode_many(bytes: &[u8], count: usize, ident: &Ident) -> Result<Vec<Self>> {
        let size = Self::record_size(ident);
        (0..count)
            .map(|index| Self::decode(slot(bytes, index, size), ident))
            .collect()
    }

    /// Decodes `count` consecutive records independently of each other.
    fn decode_each(bytes: &[u8], count: usize, ident: &Ident) -> Vec<Result<Self>> {
        let size = Self::record_size(ident);
        (0..count)
            .map(|index| Self::decode(slot(bytes, index, size), ident))
            .collect()
    }

    fn encode_into(&self, ident: &Ident, out: &mut Vec<u8>) -> Result<()> {
        Self::layout(ident).encode(&self.to_fields(ident), out)
    }

    fn encode(&self, ident: &Ident) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(Self::record_size(ident));
        self.encode_into(ident, &mut out)?;
        Ok(out)
    }
}

/// The `index`th slice of `size` bytes, cut short at the end of `bytes`.
fn slot(bytes: &[u8], index: usize, size: usize) -> &[u8] {
    let start = index.saturating_mul(size).min(bytes.len());
    let end = start.saturating_add(size).min(bytes.len());
    &bytes[start..end]
}
