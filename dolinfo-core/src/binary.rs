use crate::endian::EndianNormalizer;
use crate::header::dol::DolHeader;
use crate::sections::SectionCatalog;
use crate::DolError;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// Where a header is read from. `-` on the command line selects stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    pub fn open(&self) -> Result<Box<dyn Read>, DolError> {
        match self {
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => {
                let file = File::open(path).map_err(DolError::SourceUnavailable)?;
                Ok(Box::new(file))
            }
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "-"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A DOL file whose header has been decoded and converted to host order.
#[derive(Debug, Clone)]
pub struct DolBinary {
    pub name: String,
    pub header: DolHeader,
}

impl DolBinary {
    pub fn open(source: &InputSource) -> Result<Self, DolError> {
        let mut reader = source.open()?;
        Self::from_reader(source.to_string(), &mut reader)
    }

    pub fn from_reader<R: Read>(name: impl Into<String>, reader: &mut R) -> Result<Self, DolError> {
        let name = name.into();
        let raw = DolHeader::from_reader(reader)?;

        let normalizer = EndianNormalizer::host();
        if normalizer.needs_swap() {
            log::debug!("{name}: swapping header fields to host order");
        }

        Ok(Self {
            name,
            header: normalizer.normalize(raw),
        })
    }

    pub fn catalog(&self) -> SectionCatalog<'_> {
        self.header.catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_means_stdin() {
        assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg("boot.dol"),
            InputSource::File(PathBuf::from("boot.dol"))
        );
        assert_eq!(InputSource::from_arg("-").to_string(), "-");
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let source = InputSource::File(PathBuf::from("/nonexistent/dir/boot.dol"));
        let err = DolBinary::open(&source).unwrap_err();
        assert!(matches!(err, DolError::SourceUnavailable(_)));
        assert!(err.is_source_error());
    }

    #[test]
    fn test_from_reader_normalizes() {
        let mut header = DolHeader::default();
        header.entrypoint = 0x8000_3100;
        header.bss_size = 0x20;
        let bytes = header.to_bytes();

        let binary = DolBinary::from_reader("mem", &mut &bytes[..]).unwrap();
        assert_eq!(binary.name, "mem");
        assert_eq!(binary.header, header);
        assert_eq!(binary.catalog().entry_point(), 0x8000_3100);
    }

    #[test]
    fn test_truncated_reader_yields_no_binary() {
        let bytes = DolHeader::default().to_bytes();
        let err = DolBinary::from_reader("short", &mut &bytes[..100]).unwrap_err();
        assert!(matches!(err, DolError::IncompleteHeader { read: 100, .. }));
        assert!(!err.is_source_error());
    }
}
