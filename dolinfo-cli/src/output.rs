use anyhow::Result;
use clap::ValueEnum;
use dolinfo_core::{DolBinary, DolSection, ExecutableHeader, ReportFormatter};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Indented per-section blocks
    Text,
    /// One table row per section
    Table,
    /// Machine-readable JSON
    Json,
}

pub fn render(binary: &DolBinary, formatter: &ReportFormatter, format: Format) -> Result<String> {
    let catalog = binary.catalog();
    match format {
        Format::Text => Ok(formatter.render(&catalog, &binary.name)),
        Format::Table => {
            let rows: Vec<SectionRow> = formatter.visible(&catalog).map(SectionRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::psql());
            Ok(format!(
                "{} header of '{}':\n{}\nEntrypoint: 0x{:08x}\n\n",
                binary.header.format_name(),
                binary.name,
                table,
                binary.header.entry_point()
            ))
        }
        Format::Json => {
            let report = JsonReport {
                file: &binary.name,
                format: binary.header.format_name(),
                sections: formatter.visible(&catalog).map(JsonSection::from).collect(),
                entrypoint: binary.header.entry_point(),
            };
            Ok(serde_json::to_string_pretty(&report)? + "\n")
        }
    }
}

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Section")]
    name: String,
    #[tabled(rename = "Offset")]
    offset: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl From<DolSection> for SectionRow {
    fn from(s: DolSection) -> Self {
        SectionRow {
            name: s.name(),
            offset: s.offset.map(|o| format!("0x{o:08x}")).unwrap_or_else(|| "-".to_string()),
            size: format!("0x{:08x}", s.size),
            address: format!("0x{:08x}", s.address),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: &'a str,
    format: &'static str,
    sections: Vec<JsonSection>,
    entrypoint: u32,
}

#[derive(Serialize)]
struct JsonSection {
    name: String,
    kind: String,
    index: usize,
    offset: Option<u32>,
    size: u32,
    address: u32,
}

impl From<DolSection> for JsonSection {
    fn from(s: DolSection) -> Self {
        JsonSection {
            name: s.name(),
            kind: s.kind.to_string(),
            index: s.index,
            offset: s.offset,
            size: s.size,
            address: s.address,
        }
    }
}
