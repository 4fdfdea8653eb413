use anyhow::Result;
use briggs_core::{ExpLog, Mode};
use briggs_math::FixedFormat;
use clap::{Parser, ValueEnum};

/// Render the per-iteration trace of the carry-save exp/ln digit recurrence.
///
/// With no --value, reproduces the two classic demonstrations:
/// exp(0.5) and ln(1.5), 16 iterations each, trace on.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input value (runs both demonstrations when omitted)
    #[arg(long)]
    value: Option<f64>,

    /// Function to evaluate
    #[arg(long, value_enum, default_value_t = DemoMode::Exp)]
    mode: DemoMode,

    /// Iteration count (one less update step actually runs)
    #[arg(long, default_value_t = 16)]
    iterations: u32,

    /// Fractional bits of the working fixed-point format (1..=60)
    #[arg(long, default_value_t = 40)]
    fraction_bits: u32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DemoMode {
    Exp,
    Log,
}

impl From<DemoMode> for Mode {
    fn from(mode: DemoMode) -> Mode {
        match mode {
            DemoMode::Exp => Mode::Exp,
            DemoMode::Log => Mode::Log,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let format = FixedFormat::new(args.fraction_bits)?;
    let engine = ExpLog::new(format);

    match args.value {
        Some(x) => render(&engine, x, args.iterations, args.mode.into())?,
        None => {
            render(&engine, 0.5, args.iterations, Mode::Exp)?;
            render(&engine, 1.5, args.iterations, Mode::Log)?;
        }
    }
    Ok(())
}

fn render(engine: &ExpLog, x: f64, iterations: u32, mode: Mode) -> Result<()> {
    let format = engine.format();
    let encoded = format.encode(x);
    let rounded = format.decode(encoded);

    match mode {
        Mode::Exp => println!("Exponential of {:.6}", rounded),
        Mode::Log => println!("Logarithm of {:.6}", rounded),
    }
    println!("========================================================");
    println!(" i            E_n                    L_n            d ");

    // initial state before the first executed step
    let (e0, l0) = match mode {
        Mode::Exp => (1.0, rounded),
        Mode::Log => (rounded, 0.0),
    };
    println!(" 0 {:>23.20} {:>23.20} ", e0, l0);

    let (raw, trace) = engine.compute_traced(encoded, iterations, mode)?;
    for step in &trace {
        println!(
            "{:2} {:>23.20} {:>23.20} {:2} ",
            step.step, step.result, step.residual, step.digit
        );
    }

    let approx = format.decode(raw);
    let reference = match mode {
        Mode::Exp => rounded.exp(),
        Mode::Log => rounded.ln(),
    };

    println!();
    println!("Approximation:        {:>33.30} ", approx);
    println!("Double precision ref: {:>33.30} ", reference);
    println!("Abs. error:           {:>33.30} ", reference - approx);
    println!("Iterations performed: {:3} ", iterations);
    println!("Bits in the fraction: {:3} ", format.fraction_bits());
    println!("Machine epsilon:      {:>33.30} ", format.epsilon());
    println!("========================================================");
    println!();
    Ok(())
}
