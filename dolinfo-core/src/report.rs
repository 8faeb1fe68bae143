use std::fmt::{self, Write};

use crate::sections::{DolSection, SectionCatalog};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Print sections of size zero too.
    pub show_all: bool,
}

impl ReportOptions {
    pub fn shows(&self, section: &DolSection) -> bool {
        !section.is_empty() || self.show_all
    }
}

/// Renders the section layout of one header as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ReportOptions {
        self.options
    }

    /// Sections that make it into a report, in catalog order.
    pub fn visible<'a>(
        &self,
        catalog: &SectionCatalog<'a>,
    ) -> impl Iterator<Item = DolSection> + 'a {
        let options = self.options;
        catalog.sections().filter(move |s| options.shows(s))
    }

    pub fn write_report<W: Write>(
        &self,
        out: &mut W,
        catalog: &SectionCatalog<'_>,
        name: &str,
    ) -> fmt::Result {
        writeln!(out, "Header of file '{name}':")?;
        writeln!(out, "{}", "=".repeat(49))?;
        writeln!(out)?;

        let mut printed = 0usize;
        for section in self.visible(catalog) {
            write_section(out, &section)?;
            printed += 1;
        }
        log::debug!("{name}: printed {printed} sections");

        writeln!(out)?;
        writeln!(out, "Entrypoint: 0x{:08x}", catalog.entry_point())?;
        writeln!(out)
    }

    pub fn render(&self, catalog: &SectionCatalog<'_>, name: &str) -> String {
        let mut out = String::new();
        // fmt::Write for String is infallible.
        let _ = self.write_report(&mut out, catalog, name);
        out
    }
}

fn write_section<W: Write>(out: &mut W, section: &DolSection) -> fmt::Result {
    writeln!(out, "Section {}:", section.name())?;
    if let Some(offset) = section.offset {
        writeln!(out, "\t Offset in file: {offset} (0x{offset:08x})")?;
    }
    writeln!(out, "\t Size: {} (0x{:08x})", section.size, section.size)?;
    writeln!(out, "\t Loading address: 0x{:08x}", section.address)
}
