use crate::endian::EndianNormalizer;
use crate::header::ExecutableHeader;
use crate::sections::{DolSection, SectionCatalog, SectionKind};
use crate::DolError;
use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt, BE};
use std::io::{self, Cursor, Read, Write};

/// Number of code (`text`) sections a DOL header describes.
pub const CODE_SECTION_COUNT: usize = 7;
/// Number of initialized data sections a DOL header describes.
pub const DATA_SECTION_COUNT: usize = 11;
/// Length of the combined address/size tables: code entries first, then data.
pub const SECTION_COUNT: usize = CODE_SECTION_COUNT + DATA_SECTION_COUNT;

/// Serialized size of the header. Everything after it is section payload.
pub const HEADER_SIZE: usize = 0x100;
/// Offset of the first byte after the entry point field.
pub const RESERVED_OFFSET: usize = 0xE4;
pub const RESERVED_LEN: usize = HEADER_SIZE - RESERVED_OFFSET;

/// Header of a DOL executable, the loader format used by GameCube and Wii
/// titles.
///
/// All integer fields are stored big-endian in the file. A `DolHeader` handed
/// out by this crate always holds them in host order; the values straight off
/// the wire are only reachable through [`RawDolHeader`].
///
/// Reference: <http://wiibrew.org/wiki/DOL>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DolHeader {
    /// File offsets of the code sections (`0x00`).
    pub code_offsets: [u32; CODE_SECTION_COUNT],

    /// File offsets of the data sections (`0x1C`).
    pub data_offsets: [u32; DATA_SECTION_COUNT],

    /// Load addresses (`0x48`).
    ///
    /// Indices `0..7` belong to the code sections, `7..18` to the data
    /// sections. Use [`DolHeader::code_section`] and
    /// [`DolHeader::data_section`] rather than indexing directly.
    pub load_addresses: [u32; SECTION_COUNT],

    /// Section sizes (`0x90`), split the same way as `load_addresses`.
    /// A size of zero marks an unused section.
    pub section_sizes: [u32; SECTION_COUNT],

    /// Load address of the zero-initialized region (`0xD8`).
    pub bss_address: u32,

    /// Size of the zero-initialized region (`0xDC`); zero means no BSS.
    pub bss_size: u32,

    /// Address execution starts at (`0xE0`).
    pub entrypoint: u32,

    /// Unused tail of the header (`0xE4..0x100`). Never interpreted or swapped.
    pub reserved: [u8; RESERVED_LEN],
}

/// A header exactly as it was read, with every integer field still in wire
/// order. The only way to get at the sections is to [`normalize`] it first.
///
/// [`normalize`]: RawDolHeader::normalize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDolHeader(DolHeader);

impl RawDolHeader {
    /// Converts every field to host order.
    pub fn normalize(self) -> DolHeader {
        EndianNormalizer::host().normalize(self)
    }

    /// Field values as stored in the file, reinterpreted in host order
    /// without any swapping.
    pub fn wire_fields(&self) -> &DolHeader {
        &self.0
    }

    pub(crate) fn into_inner(self) -> DolHeader {
        self.0
    }
}

impl DolHeader {
    /// Reads the first [`HEADER_SIZE`] bytes of `reader`.
    ///
    /// Nothing past the header is consumed. Fails with
    /// [`DolError::IncompleteHeader`] when the input ends early; no header is
    /// produced in that case.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<RawDolHeader, DolError> {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        let read = reader.take(HEADER_SIZE as u64).read_to_end(&mut buf)?;
        log::debug!("read {read} of {HEADER_SIZE} header bytes");

        Self::from_bytes(&buf)
    }

    /// Decodes a header from the start of `data`. Trailing bytes are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<RawDolHeader, DolError> {
        if data.len() < HEADER_SIZE {
            return Err(DolError::incomplete(data.len()));
        }
        let mut buf = [0u8; HEADER_SIZE];
        buf.copy_from_slice(&data[..HEADER_SIZE]);
        Ok(Self::decode_wire(&buf)?)
    }

    fn decode_wire(buf: &[u8; HEADER_SIZE]) -> io::Result<RawDolHeader> {
        let mut cur = Cursor::new(&buf[..]);
        let mut header = DolHeader::default();

        // Wire order is preserved here; EndianNormalizer does the conversion.
        cur.read_u32_into::<NativeEndian>(&mut header.code_offsets)?;
        cur.read_u32_into::<NativeEndian>(&mut header.data_offsets)?;
        cur.read_u32_into::<NativeEndian>(&mut header.load_addresses)?;
        cur.read_u32_into::<NativeEndian>(&mut header.section_sizes)?;
        header.bss_address = cur.read_u32::<NativeEndian>()?;
        header.bss_size = cur.read_u32::<NativeEndian>()?;
        header.entrypoint = cur.read_u32::<NativeEndian>()?;
        cur.read_exact(&mut header.reserved)?;

        Ok(RawDolHeader(header))
    }

    /// Serializes the header into its 256-byte big-endian file form.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for value in self.fields() {
            out.write_u32::<BE>(value)?;
        }
        out.write_all(&self.reserved)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    /// All integer fields in file order.
    pub fn fields(&self) -> impl Iterator<Item = u32> + '_ {
        self.code_offsets
            .iter()
            .chain(&self.data_offsets)
            .chain(&self.load_addresses)
            .chain(&self.section_sizes)
            .chain([&self.bss_address, &self.bss_size, &self.entrypoint])
            .copied()
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut u32> + '_ {
        self.code_offsets
            .iter_mut()
            .chain(self.data_offsets.iter_mut())
            .chain(self.load_addresses.iter_mut())
            .chain(self.section_sizes.iter_mut())
            .chain([
                &mut self.bss_address,
                &mut self.bss_size,
                &mut self.entrypoint,
            ])
    }

    /// Kind of the section at `index` in the combined 18-entry tables.
    pub fn section_kind(index: usize) -> Option<SectionKind> {
        match index {
            i if i < CODE_SECTION_COUNT => Some(SectionKind::Code),
            i if i < SECTION_COUNT => Some(SectionKind::Data),
            _ => None,
        }
    }

    pub fn code_section(&self, index: usize) -> Option<DolSection> {
        if index >= CODE_SECTION_COUNT {
            return None;
        }
        Some(DolSection {
            kind: SectionKind::Code,
            index,
            offset: Some(self.code_offsets[index]),
            size: self.section_sizes[index],
            address: self.load_addresses[index],
        })
    }

    /// Data section `index` (0-based among data sections, not in the
    /// combined tables).
    pub fn data_section(&self, index: usize) -> Option<DolSection> {
        if index >= DATA_SECTION_COUNT {
            return None;
        }
        let slot = CODE_SECTION_COUNT + index;
        Some(DolSection {
            kind: SectionKind::Data,
            index,
            offset: Some(self.data_offsets[index]),
            size: self.section_sizes[slot],
            address: self.load_addresses[slot],
        })
    }

    pub fn bss(&self) -> DolSection {
        DolSection {
            kind: SectionKind::Bss,
            index: 0,
            offset: None,
            size: self.bss_size,
            address: self.bss_address,
        }
    }

    pub fn catalog(&self) -> SectionCatalog<'_> {
        SectionCatalog::new(self)
    }
}

impl ExecutableHeader for DolHeader {
    fn entry_point(&self) -> u32 {
        self.entrypoint
    }

    fn format_name(&self) -> &'static str {
        "DOL"
    }
}
