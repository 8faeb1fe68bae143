pub mod binary;
pub mod endian;
pub mod error;
pub mod header;
pub mod report;
pub mod sections;

pub use binary::*;
pub use endian::*;
pub use error::*;
pub use header::dol::*;
pub use header::ExecutableHeader;
pub use report::*;
pub use sections::*;
