use serde::{Deserialize, Serialize};

/// Which function the recurrence evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// exp(x); converges for x roughly in [-1.2, 0.86).
    Exp,
    /// ln(x); converges for x roughly in [0.4, 3.4).
    Log,
}

/// Select the next signed digit from the truncated window code.
///
/// `window` is the 4-bit code (3 integer + 1 fractional bit, two's
/// complement) resolved from the live accumulators. The code ranges below
/// overlap deliberately so that the up-to-1-ulp truncation error of the
/// window cannot push an in-domain computation onto a digit that breaks
/// convergence.
///
/// Returns `None` when the code falls outside every defined range. An
/// in-domain input never produces such a code; seeing one means the input
/// was out of domain or the accumulators are corrupt, and the caller must
/// surface it as an error rather than continue.
pub fn select_digit(mode: Mode, window: u8) -> Option<i8> {
    match mode {
        Mode::Exp => match window {
            0x0..=0x3 => Some(1),
            0xA..=0xD => Some(-1),
            0xE | 0xF => Some(0),
            _ => None,
        },
        Mode::Log => match window {
            0x0 | 0xF => Some(0),
            0xA..=0xE => Some(1),
            0x1..=0x9 => Some(-1),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exhaustive coverage: every 4-bit code maps to exactly one digit or to
    // a rejection, with no gap silently falling through.

    #[test]
    fn test_exp_selection_is_total() {
        for code in 0u8..16 {
            let expected = match code {
                0 | 1 | 2 | 3 => Some(1),
                10 | 11 | 12 | 13 => Some(-1),
                14 | 15 => Some(0),
                _ => None,
            };
            assert_eq!(select_digit(Mode::Exp, code), expected, "code {:#x}", code);
        }
    }

    #[test]
    fn test_log_selection_is_total() {
        for code in 0u8..16 {
            let expected = match code {
                0 | 15 => Some(0),
                10..=14 => Some(1),
                1..=9 => Some(-1),
                _ => unreachable!(),
            };
            assert_eq!(select_digit(Mode::Log, code), expected, "code {:#x}", code);
        }
    }

    #[test]
    fn test_codes_above_four_bits_are_rejected() {
        assert_eq!(select_digit(Mode::Exp, 16), None);
        assert_eq!(select_digit(Mode::Log, 16), None);
    }
}
