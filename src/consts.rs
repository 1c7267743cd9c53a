//! Executable and Linking Format constants

use bitflags::bitflags;

pub const EI_NIDENT: usize = 16;
pub const EI_CLASS: usize = 4;
pub const EI_DATA: usize = 5;
pub const EI_VERSION: usize = 6;
pub const EI_OSABI: usize = 7;
pub const EI_ABIVERSION: usize = 8;
pub const EI_PAD: usize = 9;

pub const ELFMAG: [u8; 4] = *b"\x7FELF";

crate::symbol_kind! {
    /// e_ident[EI_CLASS]
    pub enum Class: u8 => "ELFCLASS" {
        Elf32 = 1 => "ELFCLASS32",
        Elf64 = 2 => "ELFCLASS64",
    }
}

crate::symbol_kind! {
    /// e_ident[EI_DATA]
    pub enum Data: u8 => "ELFDATA" {
        /// 2's complement, little endian
        Lsb = 1 => "ELFDATA2LSB",
        /// 2's complement, big endian
        Msb = 2 => "ELFDATA2MSB",
    }
}

crate::symbol_kind! {
    /// e_ident[EI_OSABI]
    pub enum OsAbi: u8 => "OSABI" {
        SysV = 0 => "ELFOSABI_SYSV",
        HpUx = 1 => "ELFOSABI_HPUX",
        NetBsd = 2 => "ELFOSABI_NETBSD",
        Gnu = 3 => "ELFOSABI_GNU",
        Solaris = 6 => "ELFOSABI_SOLARIS",
        Aix = 7 => "ELFOSABI_AIX",
        Irix = 8 => "ELFOSABI_IRIX",
        FreeBsd = 9 => "ELFOSABI_FREEBSD",
        Tru64 = 10 => "ELFOSABI_TRU64",
        Modesto = 11 => "ELFOSABI_MODESTO",
        OpenBsd = 12 => "ELFOSABI_OPENBSD",
        ArmAeabi = 64 => "ELFOSABI_ARM_AEABI",
        Arm = 97 => "ELFOSABI_ARM",
        Standalone = 255 => "ELFOSABI_STANDALONE",
    }
}

crate::symbol_kind! {
    /// e_version
    pub enum Version: u32 => "EV" {
        None = 0 => "EV_NONE",
        Current = 1 => "EV_CURRENT",
    }
}

crate::symbol_kind! {
    /// e_type
    pub enum ElfType: u16 => "ET" {
        None = 0 => "ET_NONE",
        Rel = 1 => "ET_REL",
        Exec = 2 => "ET_EXEC",
        Dyn = 3 => "ET_DYN",
        Core = 4 => "ET_CORE",
        LoOs = 0xFE00 => "ET_LOOS",
        HiOs = 0xFEFF => "ET_HIOS",
        LoProc = 0xFF00 => "ET_LOPROC",
        HiProc = 0xFFFF => "ET_HIPROC",
    }
}

crate::symbol_kind! {
    /// e_machine
    #[allow(non_camel_case_types)]
    pub enum Machine: u16 => "EM" {
        None = 0 => "EM_NONE",
        /// AT&T WE 32100
        M32 = 1 => "EM_M32",
        /// SPARC
        Sparc = 2 => "EM_SPARC",
        /// Intel 80386
        I386 = 3 => "EM_386",
        /// Motorola 68000
        M68k = 4 => "EM_68K",
        /// Motorola 88000
        M88k = 5 => "EM_88K",
        /// Intel 80860
        I860 = 7 => "EM_860",
        /// MIPS R3000 (officially, big-endian only)
        Mips = 8 => "EM_MIPS",
        /// MIPS R3000 little-endian
        MipsRs3Le = 10 => "EM_MIPS_RS3_LE",
        /// HPPA
        Parisc = 15 => "EM_PARISC",
        /// Sun's "v8plus"
        Sparc32Plus = 18 => "EM_SPARC32PLUS",
        /// Intel 80960
        I960 = 19 => "EM_960",
        /// PowerPC
        Ppc = 20 => "EM_PPC",
        /// PowerPC64
        Ppc64 = 21 => "EM_PPC64",
        /// IBM S/390
        S390 = 22 => "EM_S390",
        /// Cell BE SPU
        Spu = 23 => "EM_SPU",
        /// NEC V800
        V800 = 36 => "EM_V800",
        /// ARM 32 bit
        Arm = 40 => "EM_ARM",
        /// SuperH
        Sh = 42 => "EM_SH",
        /// SPARC v9 64-bit
        SparcV9 = 43 => "EM_SPARCV9",
        /// Siemens Tricore
        Tricore = 44 => "EM_TRICORE",
        /// Renesas H8/300
        H8_300 = 46 => "EM_H8_300",
        /// HP/Intel IA-64
        Ia64 = 50 => "EM_IA_64",
        /// Motorola Coldfire
        Coldfire = 52 => "EM_COLDFIRE",
        /// AMD x86-64
        X86_64 = 62 => "EM_X86_64",
        /// DEC VAX
        Vax = 75 => "EM_VAX",
        /// Axis Communications 32-bit embedded processor
        Cris = 76 => "EM_CRIS",
        /// Atmel AVR 8-bit microcontroller
        Avr = 83 => "EM_AVR",
        /// Renesas M32R
        M32r = 88 => "EM_M32R",
        /// Panasonic/MEI MN10300, AM33
        Mn10300 = 89 => "EM_MN10300",
        /// OpenRISC 32-bit embedded processor
        OpenRisc = 92 => "EM_OPENRISC",
        /// ARCompact processor
        ArCompact = 93 => "EM_ARCOMPACT",
        /// Tensilica Xtensa Architecture
        Xtensa = 94 => "EM_XTENSA",
        /// TI MSP430
        Msp430 = 105 => "EM_MSP430",
        /// ADI Blackfin Processor
        Blackfin = 106 => "EM_BLACKFIN",
        /// UniCore-32
        Unicore = 110 => "EM_UNICORE",
        /// Altera Nios II soft-core processor
        AlteraNios2 = 113 => "EM_ALTERA_NIOS2",
        /// TI C6X DSPs
        TiC6000 = 140 => "EM_TI_C6000",
        /// QUALCOMM Hexagon
        Hexagon = 164 => "EM_HEXAGON",
        /// Andes Technology compact code size embedded RISC processor family
        Nds32 = 167 => "EM_NDS32",
        /// ARM 64 bit
        Aarch64 = 183 => "EM_AARCH64",
        /// Tilera TILEPro
        TilePro = 188 => "EM_TILEPRO",
        /// Xilinx MicroBlaze
        MicroBlaze = 189 => "EM_MICROBLAZE",
        /// Tilera TILE-Gx
        TileGx = 191 => "EM_TILEGX",
        /// ARCv2 Cores
        ArcV2 = 195 => "EM_ARCV2",
        /// AMD GPU
        AmdGpu = 224 => "EM_AMDGPU",
        /// RISC-V
        RiscV = 243 => "EM_RISCV",
        /// Linux BPF - in-kernel virtual machine
        Bpf = 247 => "EM_BPF",
        /// C-SKY
        Csky = 252 => "EM_CSKY",
        /// LoongArch
        LoongArch = 258 => "EM_LOONGARCH",
        /// Fujitsu FR-V
        Frv = 0x5441 => "EM_FRV",
        /// This is an interim value that we will use until the committee comes up with a final number.
        Alpha = 0x9026 => "EM_ALPHA",
        /// Bogus old m32r magic number, used by old tools.
        CygnusM32r = 0x9041 => "EM_CYGNUS_M32R",
        /// This is the old interim value for S/390 architecture
        S390Old = 0xA390 => "EM_S390_OLD",
        /// Also Panasonic/MEI MN10300, AM33
        CygnusMn10300 = 0xBEEF => "EM_CYGNUS_MN10300",
    }
}

crate::symbol_kind! {
    /// sh_type
    pub enum SectionType: u32 => "SHT" {
        Null = 0 => "SHT_NULL",
        ProgBits = 1 => "SHT_PROGBITS",
        SymTab = 2 => "SHT_SYMTAB",
        StrTab = 3 => "SHT_STRTAB",
        Rela = 4 => "SHT_RELA",
        Hash = 5 => "SHT_HASH",
        Dynamic = 6 => "SHT_DYNAMIC",
        Note = 7 => "SHT_NOTE",
        NoBits = 8 => "SHT_NOBITS",
        Rel = 9 => "SHT_REL",
        ShLib = 10 => "SHT_SHLIB",
        DynSym = 11 => "SHT_DYNSYM",
        InitArray = 14 => "SHT_INIT_ARRAY",
        FiniArray = 15 => "SHT_FINI_ARRAY",
        PreinitArray = 16 => "SHT_PREINIT_ARRAY",
        Group = 17 => "SHT_GROUP",
        SymTabShndx = 18 => "SHT_SYMTAB_SHNDX",
        LoOs = 0x6000_0000 => "SHT_LOOS",
        GnuAttributes = 0x6FFF_FFF5 => "SHT_GNU_ATTRIBUTES",
        GnuHash = 0x6FFF_FFF6 => "SHT_GNU_HASH",
        GnuLibList = 0x6FFF_FFF7 => "SHT_GNU_LIBLIST",
        Checksum = 0x6FFF_FFF8 => "SHT_CHECKSUM",
        GnuVerDef = 0x6FFF_FFFD => "SHT_GNU_VERDEF",
        GnuVerNeed = 0x6FFF_FFFE => "SHT_GNU_VERNEED",
        GnuVerSym = 0x6FFF_FFFF => "SHT_GNU_VERSYM",
        LoProc = 0x7000_0000 => "SHT_LOPROC",
        HiProc = 0x7FFF_FFFF => "SHT_HIPROC",
        LoUser = 0x8000_0000 => "SHT_LOUSER",
        HiUser = 0x8FFF_FFFF => "SHT_HIUSER",
    }
}

crate::symbol_kind! {
    /// p_type
    pub enum SegmentType: u32 => "PT" {
        Null = 0 => "PT_NULL",
        Load = 1 => "PT_LOAD",
        Dynamic = 2 => "PT_DYNAMIC",
        Interp = 3 => "PT_INTERP",
        Note = 4 => "PT_NOTE",
        ShLib = 5 => "PT_SHLIB",
        Phdr = 6 => "PT_PHDR",
        Tls = 7 => "PT_TLS",
        LoOs = 0x6000_0000 => "PT_LOOS",
        SunwUnwind = 0x6464_E550 => "PT_SUNW_UNWIND",
        GnuEhFrame = 0x6474_E550 => "PT_GNU_EH_FRAME",
        GnuStack = 0x6474_E551 => "PT_GNU_STACK",
        GnuRelro = 0x6474_E552 => "PT_GNU_RELRO",
        GnuProperty = 0x6474_E553 => "PT_GNU_PROPERTY",
        HiOs = 0x6FFF_FFFF => "PT_HIOS",
        LoProc = 0x7000_0000 => "PT_LOPROC",
        Aarch64MemtagMte = 0x7000_0002 => "PT_AARCH64_MEMTAG_MTE",
        HiProc = 0x7FFF_FFFF => "PT_HIPROC",
    }
}

bitflags! {
    /// sh_flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SectionFlags: u64 {
        const WRITE = 0x1;
        const ALLOC = 0x2;
        const EXECINSTR = 0x4;
        const MERGE = 0x10;
        const STRINGS = 0x20;
        const INFO_LINK = 0x40;
        const LINK_ORDER = 0x80;
        const OS_NONCONFORMING = 0x100;
        const GROUP = 0x200;
        const TLS = 0x400;
        const COMPRESSED = 0x800;
        const MASKOS = 0x0FF0_0000;
        const MASKPROC = 0xF000_0000;
    }
}

bitflags! {
    /// p_flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SegmentFlags: u32 {
        const EXEC = 0x1;
        const WRITE = 0x2;
        const READ = 0x4;
        const MASKOS = 0x0FF0_0000;
        const MASKPROC = 0xF000_0000;
    }
}
