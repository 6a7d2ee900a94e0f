//! Fixed-width value types crossing the VM-host boundary.
//!
//! Both types are plain big-endian byte arrays, copied by value. Construction
//! from a native integer right-justifies it into the low-order bytes; no
//! implicit truncation happens between [`Bytes32`] and [`Address`], widening
//! and narrowing are explicit calls.

use core::fmt;

use derive_more::{AsRef, Deref, From, Into};

/// A 256-bit unsigned integer in big-endian byte order. Alias of [`Bytes32`].
pub type Uint256Be = Bytes32;

/// A 32-byte EVM word, big-endian when interpreted as an integer.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, AsRef, Deref, From, Into,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bytes32(pub [u8; 32]);

/// A 20-byte account address.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, AsRef, Deref, From, Into,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(pub [u8; 20]);

impl Bytes32 {
    /// The all-zero word.
    pub const ZERO: Self = Self([0; 32]);

    /// Wraps a raw byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Zero-extends `value` into the low-order (rightmost) bytes.
    pub const fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < be.len() {
            bytes[24 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Zero-extends a 20-byte address into the low-order bytes of a word.
    pub const fn from_address(address: &Address) -> Self {
        let mut bytes = [0u8; 32];
        let mut i = 0;
        while i < 20 {
            bytes[12 + i] = address.0[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns `true` iff every byte is zero. The boolean-truthiness view of
    /// a word is `!is_zero()`.
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < self.0.len() {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// The backing bytes, without copying.
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0; 20]);

    /// Wraps a raw byte array.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Zero-extends `value` into the low-order (rightmost) bytes.
    pub const fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        let be = value.to_be_bytes();
        let mut i = 0;
        while i < be.len() {
            bytes[12 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Truncates a word to its low-order 20 bytes. The explicit narrowing the
    /// caller opts into; nothing in this crate performs it implicitly.
    pub const fn from_word(word: &Bytes32) -> Self {
        let mut bytes = [0u8; 20];
        let mut i = 0;
        while i < 20 {
            bytes[i] = word.0[12 + i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns `true` iff every byte is zero. The boolean-truthiness view of
    /// an address is `!is_zero()`.
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < self.0.len() {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// The backing bytes, without copying.
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn fmt_hex(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("0x")?;
    for byte in bytes {
        write!(f, "{byte:02x}")?;
    }
    Ok(())
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(&self.0, f)
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(&self.0, f)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(&self.0, f)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u64_is_right_justified() {
        let word = Bytes32::from_u64(0x0102_0304_0506_0708);
        assert_eq!(&word.0[..24], &[0u8; 24]);
        assert_eq!(&word.0[24..], &[1, 2, 3, 4, 5, 6, 7, 8]);

        let addr = Address::from_u64(0xdead_beef);
        assert_eq!(&addr.0[..12], &[0u8; 12]);
        assert_eq!(&addr.0[12..], &[0, 0, 0, 0, 0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn truthiness_is_any_byte_nonzero() {
        assert!(Bytes32::ZERO.is_zero());
        assert!(Address::ZERO.is_zero());
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        assert!(!Bytes32::new(bytes).is_zero());
        assert!(!Address::from_u64(1).is_zero());
    }

    #[test]
    fn word_address_conversions_are_explicit() {
        let addr = Address::from_u64(0xabcd);
        let word = Bytes32::from_address(&addr);
        assert_eq!(word, Bytes32::from_u64(0xabcd));
        assert_eq!(Address::from_word(&word), addr);

        // Narrowing drops the high 12 bytes.
        let mut bytes = [0xff; 32];
        bytes[12..].copy_from_slice(&[0x11; 20]);
        assert_eq!(Address::from_word(&Bytes32::new(bytes)), Address::new([0x11; 20]));
    }

    #[test]
    fn hex_display() {
        assert_eq!(
            Address::from_u64(0xff01).to_string(),
            "0x000000000000000000000000000000000000ff01"
        );
        assert_eq!(format!("{:?}", Bytes32::from_u64(1)), format!("0x{}01", "00".repeat(31)));
    }
}
