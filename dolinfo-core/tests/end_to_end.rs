use dolinfo_core::{DolBinary, DolHeader, ReportFormatter, ReportOptions, SectionKind};

fn boot_header() -> DolHeader {
    let mut header = DolHeader::default();
    header.entrypoint = 0x8000_3100;
    header.section_sizes[0] = 0x0000_1000;
    header.code_offsets[0] = 0x0000_0100;
    header.load_addresses[0] = 0x8000_3000;
    header
}

#[test]
fn single_text_section_report() {
    let mut bytes = boot_header().to_bytes();
    bytes.extend_from_slice(&[0u8; 0x1000]);

    let binary = DolBinary::from_reader("boot.dol", &mut &bytes[..]).unwrap();
    let catalog = binary.catalog();
    let formatter = ReportFormatter::new(ReportOptions { show_all: false });

    let visible: Vec<_> = formatter.visible(&catalog).collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].kind, SectionKind::Code);
    assert_eq!(visible[0].offset, Some(0x100));
    assert_eq!(visible[0].size, 0x1000);
    assert_eq!(visible[0].address, 0x8000_3000);

    let report = formatter.render(&catalog, &binary.name);
    assert!(report.contains("Section text0:\n"));
    assert!(report.contains("\t Offset in file: 256 (0x00000100)\n"));
    assert!(report.contains("\t Size: 4096 (0x00001000)\n"));
    assert!(report.contains("\t Loading address: 0x80003000\n"));
    assert!(report.contains("Entrypoint: 0x80003100\n"));
    assert!(!report.contains("Section data"));
    assert!(!report.contains("Section bss"));
}

#[test]
fn raw_wire_bytes_decode_big_endian() {
    let mut bytes = vec![0u8; 0x100];
    bytes[0xE0..0xE4].copy_from_slice(&[0x80, 0x00, 0x31, 0x00]);
    bytes[0x90..0x94].copy_from_slice(&[0x00, 0x00, 0x10, 0x00]);

    let header = DolHeader::from_bytes(&bytes).unwrap().normalize();
    assert_eq!(header.entrypoint, 0x8000_3100);
    assert_eq!(header.section_sizes[0], 0x1000);
}

#[test]
fn short_file_produces_no_report() {
    let bytes = boot_header().to_bytes();
    assert!(DolBinary::from_reader("cut.dol", &mut &bytes[..0xFF]).is_err());
}
