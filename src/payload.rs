use alloy::primitives::Bytes;
use rand::RngCore;
use std::fmt;

/// Largest payload the generator will attach to a transaction, in KB.
pub const MAX_DATA_SIZE_KB: u32 = 64;

/// Calldata size for each generated transaction, in KB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSize(u32);

impl DataSize {
    /// Small preset.
    pub const SMALL: Self = Self(1);
    /// Medium preset.
    pub const MEDIUM: Self = Self(10);
    /// Large preset.
    pub const LARGE: Self = Self(40);
    /// Max preset.
    pub const MAX: Self = Self(MAX_DATA_SIZE_KB);

    /// Create a size, clamped to [`MAX_DATA_SIZE_KB`].
    pub fn new(kb: u32) -> Self {
        Self(kb.min(MAX_DATA_SIZE_KB))
    }

    /// Parse operator input. Anything unparseable, or zero, falls back to
    /// 1 KB; oversized values are clamped.
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim().parse::<u32>() {
            Ok(kb) if kb > 0 => Self::new(kb),
            _ => Self::SMALL,
        }
    }

    /// Size in KB.
    pub const fn kb(self) -> u32 {
        self.0
    }

    /// Size in bytes.
    pub const fn bytes(self) -> usize {
        self.0 as usize * 1024
    }

    /// Fill a payload of this size with random bytes.
    pub fn generate(self) -> Bytes {
        if self.0 == 0 {
            return Bytes::new();
        }
        let mut buf = vec![0u8; self.bytes()];
        rand::thread_rng().fill_bytes(&mut buf);
        Bytes::from(buf)
    }
}

impl fmt::Display for DataSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}KB", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_max() {
        assert_eq!(DataSize::new(65).kb(), 64);
        assert_eq!(DataSize::new(1000), DataSize::MAX);
        assert_eq!(DataSize::MAX.bytes(), 65_536);
    }

    #[test]
    fn lenient_parsing() {
        assert_eq!(DataSize::parse_lenient("12"), DataSize::new(12));
        assert_eq!(DataSize::parse_lenient(" 8\n"), DataSize::new(8));
        assert_eq!(DataSize::parse_lenient("abc"), DataSize::SMALL);
        assert_eq!(DataSize::parse_lenient("0"), DataSize::SMALL);
        assert_eq!(DataSize::parse_lenient("-4"), DataSize::SMALL);
        assert_eq!(DataSize::parse_lenient("500"), DataSize::MAX);
    }

    #[test]
    fn generates_requested_length() {
        let payload = DataSize::new(2).generate();
        assert_eq!(payload.len(), 2048);

        assert!(DataSize::new(0).generate().is_empty());
    }

    #[test]
    fn payloads_are_random() {
        let a = DataSize::SMALL.generate();
        let b = DataSize::SMALL.generate();
        assert_ne!(a, b);
    }
}
