use std::io;

use thiserror::Error;

use crate::header::dol::HEADER_SIZE;

/// Failures while turning one input into a decoded header.
///
/// Every variant is local to a single input; callers processing a batch
/// report it and move on to the next file.
#[derive(Error, Debug)]
pub enum DolError {
    #[error("input could not be opened")]
    SourceUnavailable(#[source] io::Error),

    #[error("reading header failed")]
    Read(#[from] io::Error),

    #[error("incomplete header: got {read} of {expected} bytes (is this a DOL file?)")]
    IncompleteHeader { read: usize, expected: usize },
}

impl DolError {
    pub(crate) fn incomplete(read: usize) -> Self {
        DolError::IncompleteHeader {
            read,
            expected: HEADER_SIZE,
        }
    }

    /// True for errors caused by the input not being available at all,
    /// as opposed to a short or malformed header.
    pub fn is_source_error(&self) -> bool {
        matches!(self, DolError::SourceUnavailable(_) | DolError::Read(_))
    }
}
