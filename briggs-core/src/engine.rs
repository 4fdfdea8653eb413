use briggs_math::{CarrySave, FixedFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selection::{select_digit, Mode};
use crate::tables::StepTables;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The truncated window produced a code outside every selection range.
    /// Signals an out-of-domain input or corrupt accumulators; the partial
    /// result is discarded rather than returned as valid.
    #[error("no digit for window code {window:#x} at iteration {iteration} in {mode:?} mode")]
    SelectionInvariant {
        mode: Mode,
        iteration: u32,
        window: u8,
    },
}

/// One recurrence step as recorded for an external presenter. Accumulator
/// values are resolved and decoded after the step's update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// 1-based step number (the first executed step is 1).
    pub step: u32,
    /// Decoded E accumulator, the running product Π(1 + d·2⁻ⁿ).
    pub result: f64,
    /// Decoded L accumulator, the running sum of ln(1 + d·2⁻ⁿ) terms.
    pub residual: f64,
    /// The digit selected this step: -1, 0, or +1.
    pub digit: i8,
}

/// Digit-recurrence evaluator for exp(x) and ln(x).
///
/// The engine itself is immutable: each invocation owns its accumulators
/// exclusively, step constants come from the shared static tables, and the
/// same inputs always produce bit-identical outputs. Instances may be shared
/// and invoked concurrently without synchronization.
///
/// Input domains (≈ [-1.2, 0.86) for Exp, ≈ [0.4, 3.4) for Log) are the
/// caller's responsibility. The engine does not validate them; out-of-domain
/// inputs either converge to an inaccurate value or trip
/// [`EngineError::SelectionInvariant`].
pub struct ExpLog {
    format: FixedFormat,
    tables: &'static StepTables,
}

impl Default for ExpLog {
    fn default() -> Self {
        Self::new(FixedFormat::default())
    }
}

impl ExpLog {
    pub fn new(format: FixedFormat) -> Self {
        Self {
            format,
            tables: StepTables::shared(),
        }
    }

    pub fn format(&self) -> FixedFormat {
        self.format
    }

    /// Run the recurrence on a fixed-point word and return the fixed-point
    /// result (E for Exp, L for Log), fully carry-propagated.
    ///
    /// `iterations` bounds the work deterministically; `iterations - 1`
    /// update steps execute (below 2, the initialization value is returned
    /// unchanged). Accuracy improves roughly geometrically with the
    /// iteration count until it saturates near the format's precision.
    pub fn compute(&self, x: u64, iterations: u32, mode: Mode) -> Result<u64, EngineError> {
        self.run(x, iterations, mode, None)
    }

    /// Same recurrence, additionally recording one [`TraceStep`] per
    /// executed iteration for diagnostic rendering. The trace is not part of
    /// the algorithmic contract.
    pub fn compute_traced(
        &self,
        x: u64,
        iterations: u32,
        mode: Mode,
    ) -> Result<(u64, Vec<TraceStep>), EngineError> {
        let mut trace = Vec::with_capacity(iterations.saturating_sub(1) as usize);
        let value = self.run(x, iterations, mode, Some(&mut trace))?;
        Ok((value, trace))
    }

    /// Convenience wrapper: encode, run in Exp mode, decode.
    pub fn exp(&self, x: f64, iterations: u32) -> Result<f64, EngineError> {
        let raw = self.compute(self.format.encode(x), iterations, Mode::Exp)?;
        Ok(self.format.decode(raw))
    }

    /// Convenience wrapper: encode, run in Log mode, decode.
    pub fn ln(&self, x: f64, iterations: u32) -> Result<f64, EngineError> {
        let raw = self.compute(self.format.encode(x), iterations, Mode::Log)?;
        Ok(self.format.decode(raw))
    }

    fn run(
        &self,
        x: u64,
        iterations: u32,
        mode: Mode,
        mut trace: Option<&mut Vec<TraceStep>>,
    ) -> Result<u64, EngineError> {
        let fraction_bits = self.format.fraction_bits();
        let mut state = RecurrenceState::init(x, mode, self.format);

        // Iteration 1 has no defined update (ln(1 - 2^0) does not exist), so
        // the loop starts at 2 and executes steps n = 1 .. iterations - 1.
        for i in 2..=iterations {
            let step = i - 1;
            let window = state.window_code(mode, step, fraction_bits);
            let digit = select_digit(mode, window).ok_or(EngineError::SelectionInvariant {
                mode,
                iteration: i,
                window,
            })?;

            match digit {
                1 => state.step_up(step, self.tables.positive_step(step as usize, fraction_bits)),
                -1 => state.step_down(step, self.tables.negative_step(step as usize, fraction_bits)),
                _ => {}
            }

            if let Some(steps) = trace.as_deref_mut() {
                steps.push(TraceStep {
                    step,
                    result: self.format.decode(state.exp_acc.resolve()),
                    residual: self.format.decode(state.log_acc.resolve()),
                    digit,
                });
            }
        }

        Ok(match mode {
            Mode::Exp => state.exp_acc.resolve(),
            Mode::Log => state.log_acc.resolve(),
        })
    }
}

/// The two live accumulators of one invocation.
///
/// `exp_acc` (E) carries the running product Π(1 + d·2⁻ⁿ); `log_acc` (L)
/// carries the running sum of the matching ln(1 + d·2⁻ⁿ) terms. In Exp mode
/// L starts at x and is driven to zero while E collects the answer; in Log
/// mode E starts at x and is driven to one while L collects it.
struct RecurrenceState {
    exp_acc: CarrySave,
    log_acc: CarrySave,
}

impl RecurrenceState {
    fn init(x: u64, mode: Mode, format: FixedFormat) -> Self {
        match mode {
            Mode::Exp => Self {
                exp_acc: CarrySave::from_binary(format.one()),
                log_acc: CarrySave::from_binary(x),
            },
            Mode::Log => Self {
                exp_acc: CarrySave::from_binary(x),
                log_acc: CarrySave::ZERO,
            },
        }
    }

    /// Truncated window of the live accumulators: the driven accumulator
    /// normalized by 2ⁿ, cut down to 3 integer + 1 fractional bits. Exp mode
    /// inspects L directly; Log mode inspects E - 1, formed in carry-save
    /// without resolving (the all-ones word is -1.0 in the fixed format).
    fn window_code(&self, mode: Mode, step: u32, fraction_bits: u32) -> u8 {
        let source = match mode {
            Mode::Exp => self.log_acc,
            Mode::Log => CarrySave::compress3(
                self.exp_acc.sum,
                self.exp_acc.carry,
                u64::MAX << fraction_bits,
            ),
        };
        let w = source.shift_left(step).shift_right(fraction_bits - 1);
        let code = CarrySave {
            sum: w.sum & 0xF,
            carry: w.carry & 0xF,
        }
        .resolve();
        (code & 0xF) as u8
    }

    /// d = +1: L absorbs -ln(1 + 2⁻ⁿ); E gains E·2⁻ⁿ, folded in through two
    /// 3:2 compressions.
    fn step_up(&mut self, step: u32, constant: u64) {
        self.log_acc = CarrySave::compress3(self.log_acc.sum, self.log_acc.carry, constant);
        let shifted = self.exp_acc.shift_right(step);
        let partial = CarrySave::compress3(self.exp_acc.sum, self.exp_acc.carry, shifted.sum);
        self.exp_acc = CarrySave::compress3(partial.sum, partial.carry, shifted.carry);
    }

    /// d = -1: L absorbs -ln(1 - 2⁻ⁿ); E loses E·2⁻ⁿ through the 4:2
    /// compressor's complement-and-carry subtraction path.
    fn step_down(&mut self, step: u32, constant: u64) {
        self.log_acc = CarrySave::compress3(self.log_acc.sum, self.log_acc.carry, constant);
        let shifted = self.exp_acc.shift_right(step);
        self.exp_acc = CarrySave::compress4(
            self.exp_acc.sum,
            self.exp_acc.carry,
            !shifted.sum,
            !shifted.carry,
            true,
            true,
        );
    }
}
