//! 16-bit message integrity checksum shared with the door terminal
//! firmware.
//!
//! This is a keyless checksum, not a MAC: it detects accidental
//! corruption of the request in transit, nothing more. The bit sequence
//! must match the firmware implementation exactly.

/// Compute the request checksum over `card_id`, `door_id`, and `ts`.
///
/// Seeds a 16-bit accumulator with `0xBEEF`, folds in each byte of
/// `card_id` then `door_id` with an XOR followed by a 5-bit left
/// rotation, then folds in the four low bytes of `ts` (little-endian
/// order) with an XOR followed by a 3-bit left rotation.
pub fn simple_sig(card_id: &str, door_id: &str, ts: i64) -> u16 {
    let mut s: u16 = 0xBEEF;
    for &b in card_id.as_bytes() {
        s ^= u16::from(b);
        s = s.rotate_left(5);
    }
    for &b in door_id.as_bytes() {
        s ^= u16::from(b);
        s = s.rotate_left(5);
    }
    for i in 0..4 {
        s ^= ((ts >> (i * 8)) & 0xFF) as u16;
        s = s.rotate_left(3);
    }
    s
}
