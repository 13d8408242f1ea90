/// Largest value a 4-bit code can hold.
pub const MAX_CODE: u8 = 0x0F;

/// Pack two codes into a byte, `high` in the upper four bits.
#[inline(always)]
pub fn pack(high: u8, low: u8) -> u8 {
    debug_assert!(high <= MAX_CODE, "code {high} does not fit in a nibble");
    debug_assert!(low <= MAX_CODE, "code {low} does not fit in a nibble");
    (high << 4) | low
}

/// Split a byte into its high and low nibbles.
#[inline(always)]
pub fn unpack(byte: u8) -> (u8, u8) {
    (byte >> 4, byte & MAX_CODE)
}

/// Pack a code sequence two codes per byte.
///
/// An odd trailing code is paired with `filler`.
pub fn pack_codes(codes: &[u8], filler: u8) -> Vec<u8> {
    let iter = codes.chunks_exact(2);
    let rem = iter.remainder();
    let mut packed = Vec::with_capacity(codes.len().div_ceil(2));
    for pair in iter {
        packed.push(pack(pair[0], pair[1]));
    }
    if let [last] = rem {
        trace!("pad trailing code {last} with filler {filler}");
        packed.push(pack(*last, filler));
    }
    packed
}

/// Yield every code of a packed stream, high nibble first.
pub fn unpack_codes(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes.iter().flat_map(|&byte| {
        let (high, low) = unpack(byte);
        [high, low]
    })
}
