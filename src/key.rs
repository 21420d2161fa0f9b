//! Key comparison and printable rendering of raw byte keys.

use core::fmt;

/// Byte-exact key equality. Keys of different lengths never match.
#[inline]
pub fn keys_equal(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a == b
}

// Longest hex rendering before the key is elided.
const MAX_HEX_BYTES: usize = 60;

/// Display adapter for a raw key.
///
/// Keys made entirely of printable ASCII render as `char key:[...]`,
/// anything else as `hex key:[0x...]`.
#[derive(Copy, Clone, Debug)]
pub struct PrintableKey<'a>(pub &'a [u8]);

impl fmt::Display for PrintableKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0;
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            f.write_str("char key:[")?;
            for &b in bytes {
                write!(f, "{}", b as char)?;
            }
            return f.write_str("]");
        }
        f.write_str("hex key:[0x")?;
        for b in bytes.iter().take(MAX_HEX_BYTES) {
            write!(f, "{:02x}", b)?;
        }
        if bytes.len() > MAX_HEX_BYTES {
            f.write_str("...")?;
        }
        f.write_str("]")
    }
}
