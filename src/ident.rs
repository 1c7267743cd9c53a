//! ELF identification (e_ident)

use crate::consts::*;
use crate::error::{ElfError, Result};
use crate::symbol::{resolve, SymbolKind};

/// Byte order of every multi-byte field in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Little,
    Big,
}

impl Class {
    /// Size in bytes of addresses and offsets for this class.
    #[inline]
    pub const fn native_size(self) -> usize {
        match self {
            Self::Elf32 => 4,
            Self::Elf64 => 8,
        }
    }
}

impl Data {
    #[inline]
    pub const fn endian(self) -> Endian {
        match self {
            Self::Lsb => Endian::Little,
            Self::Msb => Endian::Big,
        }
    }
}

/// The 16-byte identification block at the start of every ELF file.
///
/// It selects the layout of everything that follows and is passed by
/// reference to every record decoder. The padding bytes are not kept;
/// encoding writes them back as zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident {
    class: Class,
    data: Data,
    version: u8,
    os_abi: OsAbi,
    abi_version: u8,
}

impl Ident {
    pub const SIZE: usize = EI_NIDENT;

    #[inline]
    pub const fn new(class: Class, data: Data, version: u8, os_abi: OsAbi, abi_version: u8) -> Self {
        Self {
            class,
            data,
            version,
            os_abi,
            abi_version,
        }
    }

    /// Decodes the identification block from the start of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let magic = &bytes[..bytes.len().min(ELFMAG.len())];
        if magic != ELFMAG {
            return Err(ElfError::NotAnElf {
                found: magic.to_vec(),
            });
        }
        if bytes.len() < Self::SIZE {
            return Err(ElfError::UnexpectedEof {
                what: "e_ident",
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }

        Ok(Self {
            class: resolve(bytes[EI_CLASS] as u64)?,
            data: resolve(bytes[EI_DATA] as u64)?,
            version: bytes[EI_VERSION],
            os_abi: resolve(bytes[EI_OSABI] as u64)?,
            abi_version: bytes[EI_ABIVERSION],
        })
    }

    pub fn encode(&self) -> [u8; EI_NIDENT] {
        let mut bytes = [0; EI_NIDENT];
        bytes[..EI_CLASS].copy_from_slice(&ELFMAG);
        bytes[EI_CLASS] = self.class.raw() as u8;
        bytes[EI_DATA] = self.data.raw() as u8;
        bytes[EI_VERSION] = self.version;
        bytes[EI_OSABI] = self.os_abi.raw() as u8;
        bytes[EI_ABIVERSION] = self.abi_version;
        bytes
    }

    #[inline]
    pub const fn class(&self) -> Class {
        self.class
    }

    #[inline]
    pub const fn data(&self) -> Data {
        self.data
    }

    #[inline]
    pub const fn version(&self) -> u8 {
        self.version
    }

    #[inline]
    pub const fn os_abi(&self) -> OsAbi {
        self.os_abi
    }

    #[inline]
    pub const fn abi_version(&self) -> u8 {
        self.abi_version
    }

    #[inline]
    pub const fn endian(&self) -> Endian {
        self.data.endian()
    }

    #[inline]
    pub const fn native_size(&self) -> usize {
        self.class.native_size()
    }
}
