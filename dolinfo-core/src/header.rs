pub mod dol;

pub trait ExecutableHeader: std::fmt::Debug + Send + Sync {
    /// Returns the address execution starts at once the image is loaded.
    fn entry_point(&self) -> u32;

    /// Returns a short human-readable name, e.g. "DOL".
    fn format_name(&self) -> &'static str;
}
