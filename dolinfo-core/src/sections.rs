use std::fmt;

use crate::header::dol::{DolHeader, CODE_SECTION_COUNT, DATA_SECTION_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Code, // text0..text6
    Data, // data0..data10
    Bss,
}

impl SectionKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            SectionKind::Code => "text",
            SectionKind::Data => "data",
            SectionKind::Bss => "bss",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Code => "code",
            SectionKind::Data => "data",
            SectionKind::Bss => "bss",
        };
        write!(f, "{}", name)
    }
}

/// One entry of a DOL header, in a shape shared by code, data and BSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DolSection {
    pub kind: SectionKind,
    /// Position among sections of the same kind.
    pub index: usize,
    /// File offset; `None` for BSS, which has no file contents.
    pub offset: Option<u32>,
    pub size: u32,
    pub address: u32,
}

impl DolSection {
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Name as the loader tools print it: `text3`, `data0`, `bss`.
    pub fn name(&self) -> String {
        match self.kind {
            SectionKind::Bss => self.kind.prefix().to_string(),
            _ => format!("{}{}", self.kind.prefix(), self.index),
        }
    }
}

/// Read-only view of the sections of a normalized header.
///
/// Yields every section, empty or not: code sections in index order, then
/// data sections, then BSS.
#[derive(Debug, Clone, Copy)]
pub struct SectionCatalog<'a> {
    header: &'a DolHeader,
}

impl<'a> SectionCatalog<'a> {
    pub fn new(header: &'a DolHeader) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &'a DolHeader {
        self.header
    }

    pub fn code_sections(&self) -> impl Iterator<Item = DolSection> + 'a {
        let header = self.header;
        (0..CODE_SECTION_COUNT).filter_map(move |i| header.code_section(i))
    }

    pub fn data_sections(&self) -> impl Iterator<Item = DolSection> + 'a {
        let header = self.header;
        (0..DATA_SECTION_COUNT).filter_map(move |i| header.data_section(i))
    }

    pub fn bss(&self) -> DolSection {
        self.header.bss()
    }

    pub fn sections(&self) -> impl Iterator<Item = DolSection> + 'a {
        self.code_sections()
            .chain(self.data_sections())
            .chain(std::iter::once(self.bss()))
    }

    pub fn entry_point(&self) -> u32 {
        self.header.entrypoint
    }
}
