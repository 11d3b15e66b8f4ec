//! Fixed byte patterns and layout constants of the header walk.
//!
//! Offsets and sizes follow the Microsoft PE/COFF specification. Signatures are kept as raw
//! byte arrays because they are compared byte-for-byte against the image, never decoded.

/// `MZ`, the first two bytes of every MS-DOS compatible image.
pub const DOS_SIGNATURE: [u8; 2] = *b"MZ";

/// Position of `e_lfanew`, the file offset of the PE signature, inside the DOS header.
pub const PE_POINTER_OFFSET: usize = 0x3C;

/// `PE\0\0`, marks the start of the PE header.
pub const PE_SIGNATURE: [u8; 4] = *b"PE\0\0";

/// `IMAGE_FILE_MACHINE_AMD64` as stored on disk (0x8664 little-endian).
pub const MACHINE_AMD64: [u8; 2] = [0x64, 0x86];

/// Optional header magic of a PE32 image (0x010B little-endian). Anything else is read as PE32+.
pub const PE32_MAGIC: [u8; 2] = [0x0B, 0x01];

/// COFF header bytes between `NumberOfSections` and `SizeOfOptionalHeader`:
/// `TimeDateStamp`, `PointerToSymbolTable` and `NumberOfSymbols`.
pub const COFF_SYMBOL_FIELDS_SIZE: usize = 12;

/// Size of the COFF `Characteristics` field that precedes the optional header.
pub const COFF_CHARACTERISTICS_SIZE: usize = 2;

/// Distance from the end of the PE32 magic to the first data directory (96 - 2).
pub const PE32_DATA_DIRECTORY_BASE: usize = 94;

/// Distance from the end of the PE32+ magic to the first data directory (112 - 2).
pub const PE32PLUS_DATA_DIRECTORY_BASE: usize = 110;

/// Index of the COM descriptor (CLR runtime header) entry in the data directory array.
pub const CLR_DIRECTORY_INDEX: usize = 14;

/// One data directory entry: 4-byte RVA followed by 4-byte size.
pub const DATA_DIRECTORY_ENTRY_SIZE: usize = 8;

/// Section name of the code section holding the CLR header.
pub const TEXT_SECTION_NAME: [u8; 8] = *b".text\0\0\0";

/// `VirtualSize`, `VirtualAddress` and `SizeOfRawData`, between the name and `PointerToRawData`.
pub const SECTION_NAME_TO_RAW_POINTER: usize = 12;

/// Bytes of a section table entry left after reading its 8-byte name.
pub const SECTION_ENTRY_TAIL: usize = 32;

/// Import address table stub in front of the CLR header on non-AMD64 images.
pub const LOADER_STUB_SIZE: usize = 8;

/// `cb` = 72 followed by runtime version 2.5, the start of every CLR 2.0+ runtime header.
pub const CLR_HEADER_PREAMBLE: [u8; 8] = [0x48, 0x00, 0x00, 0x00, 0x02, 0x00, 0x05, 0x00];
