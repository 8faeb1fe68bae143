//! Conversion from the big-endian wire order of DOL headers to host order.

use crate::header::dol::{DolHeader, RawDolHeader};

/// Whether the executing platform stores integers in a different order than
/// the file format does. Fixed at build time.
pub const HOST_NEEDS_SWAP: bool = cfg!(target_endian = "little");

/// Reverses the byte order of a 32-bit value.
pub fn swap_u32(x: u32) -> u32 {
    x.swap_bytes()
}

/// Applies one swap decision uniformly to every integer field of a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndianNormalizer {
    needs_swap: bool,
}

impl EndianNormalizer {
    /// Normalizer for the platform this binary was built for.
    pub const fn host() -> Self {
        Self {
            needs_swap: HOST_NEEDS_SWAP,
        }
    }

    pub const fn new(needs_swap: bool) -> Self {
        Self { needs_swap }
    }

    pub fn needs_swap(&self) -> bool {
        self.needs_swap
    }

    pub fn convert(&self, value: u32) -> u32 {
        if self.needs_swap {
            swap_u32(value)
        } else {
            value
        }
    }

    pub fn normalize(&self, raw: RawDolHeader) -> DolHeader {
        let mut header = raw.into_inner();
        for field in header.fields_mut() {
            *field = self.convert(*field);
        }
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::dol::RESERVED_LEN;

    #[test]
    fn test_swap_known_value() {
        assert_eq!(swap_u32(0x1234_5678), 0x7856_3412);
        assert_eq!(swap_u32(0x8000_0000), 0x0000_0080);
    }

    #[test]
    fn test_swap_is_involution() {
        let mut x: u32 = 0x9e37_79b9;
        for _ in 0..10_000 {
            assert_eq!(swap_u32(swap_u32(x)), x);
            assert_eq!(swap_u32(x).to_le_bytes(), x.to_be_bytes());
            x = x.wrapping_mul(0x0019_660d).wrapping_add(0x3c6e_f35f);
        }
        for x in [0, 1, u32::MAX, 0x00ff_ff00] {
            assert_eq!(swap_u32(swap_u32(x)), x);
        }
    }

    #[test]
    fn test_host_flag_matches_platform() {
        assert_eq!(EndianNormalizer::host().needs_swap(), 1u32.to_be() != 1u32);
    }

    #[test]
    fn test_identity_when_orders_match() {
        let mut header = DolHeader::default();
        header.code_offsets[1] = 0x0102_0304;
        header.entrypoint = 0x8000_3100;
        header.reserved[0] = 0x7f;
        let raw = DolHeader::from_bytes(&header.to_bytes()).unwrap();

        let unchanged = EndianNormalizer::new(false).normalize(raw);
        assert_eq!(&unchanged, raw.wire_fields());
    }

    #[test]
    fn test_swap_touches_every_field_but_padding() {
        let mut header = DolHeader::default();
        header.data_offsets[10] = 0x1122_3344;
        header.section_sizes[17] = 0x0000_0001;
        header.bss_size = 0xaabb_ccdd;
        header.reserved = [0x5a; RESERVED_LEN];
        let raw = DolHeader::from_bytes(&header.to_bytes()).unwrap();

        let swapped = EndianNormalizer::new(true).normalize(raw);
        let wire = raw.wire_fields();
        assert_eq!(swapped.data_offsets[10], swap_u32(wire.data_offsets[10]));
        assert_eq!(swapped.section_sizes[17], swap_u32(wire.section_sizes[17]));
        assert_eq!(swapped.bss_size, swap_u32(wire.bss_size));
        assert_eq!(swapped.reserved, header.reserved);
    }
}
