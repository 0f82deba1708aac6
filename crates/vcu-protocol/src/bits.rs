//! Fixed-position field extraction

/// Read bit `position` (0 = LSB) of `byte`
#[inline]
pub fn bit(byte: u8, position: u8) -> bool {
    (byte >> position) & 0x01 != 0
}

/// Little-endian u16 at `offset`
#[inline]
pub fn u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Little-endian i16 at `offset`
#[inline]
pub fn i16_le(data: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Little-endian i32 at `offset`
#[inline]
pub fn i32_le(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits() {
        let byte = 0b1000_0101;
        assert!(bit(byte, 0));
        assert!(!bit(byte, 1));
        assert!(bit(byte, 2));
        assert!(bit(byte, 7));
    }

    #[test]
    fn test_little_endian() {
        let data = [0x0A, 0x00, 0xFF, 0xFF, 0x78, 0x56, 0x34, 0x12];
        assert_eq!(u16_le(&data, 0), 10);
        assert_eq!(i16_le(&data, 2), -1);
        assert_eq!(i32_le(&data, 4), 0x1234_5678);
    }
}
