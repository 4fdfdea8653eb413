/// Redundant carry-save number.
///
/// The pair represents the 64-bit value `sum + carry` (wrapping), and every
/// operation producing a `CarrySave` preserves that equivalence. Keeping the
/// two words separate is what lets the recurrence update its accumulators
/// without a full carry propagation per step; carries ripple exactly once, in
/// [`resolve`](Self::resolve).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarrySave {
    pub sum: u64,
    pub carry: u64,
}

impl CarrySave {
    pub const ZERO: CarrySave = CarrySave { sum: 0, carry: 0 };

    /// Wrap an already-resolved binary value.
    pub fn from_binary(x: u64) -> Self {
        Self { sum: x, carry: 0 }
    }

    /// 3:2 compressor, a row of 64 full adders.
    ///
    /// Reduces three words to a sum/carry pair in constant depth:
    /// `compress3(x, y, z).resolve() == x + y + z` (mod 2^64).
    pub fn compress3(x: u64, y: u64, z: u64) -> Self {
        Self {
            sum: x ^ y ^ z,
            carry: ((x & y) | (x & z) | (y & z)) << 1,
        }
    }

    /// 4:2 compressor: merges two carry-save pairs plus two injected
    /// carry-in bits into one new pair.
    ///
    /// The engine's subtraction path feeds `!z`, `!o` with both carry-ins
    /// set, turning the one's-complement words into a two's-complement
    /// subtract of the pair (z, o). That trick is scoped to the operand
    /// ranges the exp/ln recurrence produces; do not lift it to other call
    /// sites without revalidating the carry structure it leaves behind.
    pub fn compress4(x: u64, y: u64, z: u64, o: u64, cin0: bool, cin1: bool) -> Self {
        let majority = (((x & y) | (y & z) | (x & z)) << 1).wrapping_add(cin0 as u64);
        let parity = x ^ y ^ z ^ o;
        let carry = (parity & majority).wrapping_add(!parity & o);
        Self {
            sum: parity ^ majority,
            carry: (carry << 1).wrapping_add(cin1 as u64),
        }
    }

    /// Shift both words right arithmetically, independently of each other.
    ///
    /// Shifting a redundant pair word-by-word is unsound in general: a carry
    /// bit straddling the shift boundary is lost unless it is re-propagated
    /// (Tenca et al. 2006, <https://doi.org/10.1109/TC.2006.70>). The exp/ln
    /// recurrence's operand ranges are assumed, not checked, to avoid the
    /// hazard; callers outside it must `resolve` first.
    pub fn shift_right(self, shift_by: u32) -> Self {
        // i64 sign-fill saturates past the word width
        let k = shift_by.min(63);
        Self {
            sum: ((self.sum as i64) >> k) as u64,
            carry: ((self.carry as i64) >> k) as u64,
        }
    }

    /// Shift both words left, independently. Shifts of 64 or more clear the
    /// pair.
    pub fn shift_left(self, shift_by: u32) -> Self {
        if shift_by >= 64 {
            return Self::ZERO;
        }
        Self {
            sum: self.sum << shift_by,
            carry: self.carry << shift_by,
        }
    }

    /// Collapse to a single two's-complement word. The one place a full
    /// 64-bit carry chain runs.
    pub fn resolve(self) -> u64 {
        self.sum.wrapping_add(self.carry)
    }
}
