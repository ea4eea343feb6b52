/// Expand a value into LSB-first bits, `bits` per block.
///
/// The first block is always emitted; further blocks follow while higher bits
/// remain.
///
/// # Examples
/// ```
/// use wpancap_core::codec::dec_to_bit;
///
/// assert_eq!(
///     dec_to_bit(42, 8),
///     [false, true, false, true, false, true, false, false]
/// );
/// assert_eq!(dec_to_bit(256, 8).len(), 16);
/// ```
pub fn dec_to_bit(value: u64, bits: u32) -> Vec<bool> {
    let bits = bits.clamp(1, u64::BITS);
    let mut out = Vec::with_capacity(bits as usize);
    let mut rest = value;
    loop {
        out.extend((0..bits).map(|shift| (rest >> shift) & 1 == 1));
        rest = rest.checked_shr(bits).unwrap_or(0);
        if rest == 0 {
            break;
        }
    }
    out
}

/// Fold positional digits (least significant first) in `base`.
///
/// Returns `None` on overflow.
///
/// # Examples
/// ```
/// use wpancap_core::codec::val_to_dec;
///
/// assert_eq!(val_to_dec(&[3, 2, 1], 10), Some(123));
/// ```
pub fn val_to_dec(values: &[u64], base: u64) -> Option<u64> {
    values
        .iter()
        .rev()
        .try_fold(0u64, |acc, value| acc.checked_mul(base)?.checked_add(*value))
}

/// Fold LSB-first bits back into a value.
///
/// # Examples
/// ```
/// use wpancap_core::codec::bits_to_dec;
///
/// let bits = [false, false, false, false, false, false, false, true];
/// assert_eq!(bits_to_dec(&bits), Some(128));
/// ```
pub fn bits_to_dec(bits: &[bool]) -> Option<u64> {
    let values: Vec<u64> = bits.iter().map(|bit| u64::from(*bit)).collect();
    val_to_dec(&values, 2)
}
