//! Synthetic PE images for tests.
//!
//! No sample binaries ship with the crate; every image the tests need is assembled here with
//! the real PE/COFF layout: a 64-byte DOS header with `e_lfanew`, the 24-byte PE signature and
//! COFF header, a PE32 (224 byte) or PE32+ (240 byte) optional header with 16 data directories,
//! a section table, and 0x200-aligned raw section data. The `.text` section starts with the
//! 8-byte import address table stub on non-AMD64 machines, followed by the 72-byte CLR header.
//!
//! This file only depends on `std` so integration tests can pull it in with `#[path]`.
#![allow(dead_code)]

pub const MACHINE_I386: u16 = 0x014C;
pub const MACHINE_AMD64: u16 = 0x8664;
pub const MACHINE_ARM64: u16 = 0xAA64;

pub const CLR_HEADER_V2_5: [u8; 8] = [0x48, 0x00, 0x00, 0x00, 0x02, 0x00, 0x05, 0x00];

const FILE_ALIGNMENT: usize = 0x200;
const SECTION_ENTRY_SIZE: usize = 40;
const CLR_HEADER_SIZE: usize = 72;

/// Builder for minimal, structurally valid PE images.
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    pe_offset: u32,
    machine: u16,
    pe32_plus: bool,
    clr_directory: (u32, u32),
    sections: Vec<[u8; 8]>,
    clr_header: [u8; 8],
    loader_stub: Option<bool>,
}

impl ImageBuilder {
    /// A 32-bit (PE32, i386) CLR library with `.text`, `.rsrc` and `.reloc` sections.
    pub fn dll_x86() -> Self {
        ImageBuilder {
            pe_offset: 0x80,
            machine: MACHINE_I386,
            pe32_plus: false,
            clr_directory: (0x2008, CLR_HEADER_SIZE as u32),
            sections: vec![
                section_name(".text"),
                section_name(".rsrc"),
                section_name(".reloc"),
            ],
            clr_header: CLR_HEADER_V2_5,
            loader_stub: None,
        }
    }

    /// A 64-bit (PE32+, AMD64) CLR library with `.text` and `.rsrc` sections.
    pub fn dll_x64() -> Self {
        ImageBuilder {
            machine: MACHINE_AMD64,
            pe32_plus: true,
            clr_directory: (0x2000, CLR_HEADER_SIZE as u32),
            sections: vec![section_name(".text"), section_name(".rsrc")],
            ..Self::dll_x86()
        }
    }

    /// A native 32-bit executable: valid PE headers, no COM descriptor directory.
    pub fn native_x86() -> Self {
        ImageBuilder {
            clr_directory: (0, 0),
            sections: vec![
                section_name(".text"),
                section_name(".rdata"),
                section_name(".data"),
            ],
            ..Self::dll_x86()
        }
    }

    pub fn pe_offset(mut self, offset: u32) -> Self {
        self.pe_offset = offset;
        self
    }

    pub fn machine(mut self, machine: u16) -> Self {
        self.machine = machine;
        self
    }

    pub fn pe32_plus(mut self, pe32_plus: bool) -> Self {
        self.pe32_plus = pe32_plus;
        self
    }

    pub fn clr_directory(mut self, rva: u32, size: u32) -> Self {
        self.clr_directory = (rva, size);
        self
    }

    pub fn sections(mut self, names: &[&str]) -> Self {
        self.sections = names.iter().map(|name| section_name(name)).collect();
        self
    }

    pub fn clr_header(mut self, header: [u8; 8]) -> Self {
        self.clr_header = header;
        self
    }

    /// Forces the 8-byte stub in front of the CLR header on or off, regardless of machine.
    pub fn loader_stub(mut self, present: bool) -> Self {
        self.loader_stub = Some(present);
        self
    }

    pub fn optional_header_offset(&self) -> usize {
        self.pe_offset as usize + 24
    }

    pub fn optional_header_size(&self) -> usize {
        if self.pe32_plus {
            240
        } else {
            224
        }
    }

    /// File offset of data directory 14 (COM descriptor).
    pub fn clr_directory_offset(&self) -> usize {
        self.optional_header_offset() + if self.pe32_plus { 224 } else { 208 }
    }

    pub fn section_table_offset(&self) -> usize {
        self.optional_header_offset() + self.optional_header_size()
    }

    pub fn raw_data_offset(&self, index: usize) -> usize {
        let headers_end = self.section_table_offset() + self.sections.len() * SECTION_ENTRY_SIZE;
        align_up(headers_end, FILE_ALIGNMENT) + index * FILE_ALIGNMENT
    }

    fn has_loader_stub(&self) -> bool {
        self.loader_stub.unwrap_or(self.machine != MACHINE_AMD64)
    }

    fn text_index(&self) -> Option<usize> {
        let text = section_name(".text");
        self.sections.iter().position(|name| *name == text)
    }

    /// File offset of the CLR header inside `.text`, if the image has a `.text` section.
    pub fn clr_header_offset(&self) -> Option<usize> {
        let stub = if self.has_loader_stub() { 8 } else { 0 };
        self.text_index()
            .map(|index| self.raw_data_offset(index) + stub)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut image = vec![0_u8; self.raw_data_offset(self.sections.len())];

        // DOS header and stub message
        put(&mut image, 0, b"MZ");
        put(&mut image, 0x3C, &self.pe_offset.to_le_bytes());
        if self.pe_offset as usize >= 0x40 + 40 {
            put(&mut image, 0x40, b"This program cannot be run in DOS mode.");
        }

        // PE signature and COFF header
        let pe = self.pe_offset as usize;
        put(&mut image, pe, b"PE\0\0");
        put(&mut image, pe + 4, &self.machine.to_le_bytes());
        put(&mut image, pe + 6, &(self.sections.len() as u16).to_le_bytes());
        put(&mut image, pe + 20, &(self.optional_header_size() as u16).to_le_bytes());
        let characteristics: u16 = if self.pe32_plus { 0x2022 } else { 0x2102 };
        put(&mut image, pe + 22, &characteristics.to_le_bytes());

        // Optional header
        let optional = self.optional_header_offset();
        let (magic, rva_count_offset): (u16, usize) = if self.pe32_plus {
            (0x020B, 108)
        } else {
            (0x010B, 92)
        };
        put(&mut image, optional, &magic.to_le_bytes());
        put(&mut image, optional + 36, &(FILE_ALIGNMENT as u32).to_le_bytes());
        put(&mut image, optional + rva_count_offset, &16_u32.to_le_bytes());
        let clr_directory = self.clr_directory_offset();
        put(&mut image, clr_directory, &self.clr_directory.0.to_le_bytes());
        put(&mut image, clr_directory + 4, &self.clr_directory.1.to_le_bytes());

        // Section table
        for (index, name) in self.sections.iter().enumerate() {
            let entry = self.section_table_offset() + index * SECTION_ENTRY_SIZE;
            let virtual_address = 0x2000 + (index as u32) * 0x2000;
            put(&mut image, entry, name);
            put(&mut image, entry + 8, &(FILE_ALIGNMENT as u32).to_le_bytes());
            put(&mut image, entry + 12, &virtual_address.to_le_bytes());
            put(&mut image, entry + 16, &(FILE_ALIGNMENT as u32).to_le_bytes());
            put(&mut image, entry + 20, &(self.raw_data_offset(index) as u32).to_le_bytes());
        }

        // .text contents
        if let Some(index) = self.text_index() {
            let text = self.raw_data_offset(index);
            if self.has_loader_stub() {
                put(&mut image, text, &[0x00, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
            }
            if let Some(header) = self.clr_header_offset() {
                put(&mut image, header, &self.clr_header);
                // MetaData directory and COMIMAGE_FLAGS_ILONLY
                put(&mut image, header + 8, &0x2050_u32.to_le_bytes());
                put(&mut image, header + 12, &0x0100_u32.to_le_bytes());
                put(&mut image, header + 16, &1_u32.to_le_bytes());
            }
        }

        image
    }
}

pub fn section_name(name: &str) -> [u8; 8] {
    let mut raw = [0_u8; 8];
    let bytes = name.as_bytes();
    let len = bytes.len().min(8);
    raw[..len].copy_from_slice(&bytes[..len]);
    raw
}

fn put(image: &mut [u8], offset: usize, bytes: &[u8]) {
    image[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn align_up(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}
