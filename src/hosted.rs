//! Hosted runner: the firmware loop against a simulated C8051 port bank.
//!
//! The input sbit is driven from a stimulus string, one level per
//! iteration, and the output pin level is logged after every iteration.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use pin_mirror::c8051::{Port, SbitAddr, SfrBank, INPUT_SBIT, OUTPUT_SBIT};
use pin_mirror::drivers::sfr::{init_sfr, Sbit, SfrHandle};
use pin_mirror::drivers::{empty_cell, DriverCell};
use pin_mirror::{PinMirror, Running};

type Firmware = PinMirror<Sbit, Sbit, Running>;

static SFR: DriverCell<SfrBank> = empty_cell();

const INPUT_ADDR: SbitAddr = match SbitAddr::decode(INPUT_SBIT) {
    Ok(addr) => addr,
    Err(_) => panic!("INPUT_SBIT is not a port bit"),
};
const OUTPUT_ADDR: SbitAddr = match SbitAddr::decode(OUTPUT_SBIT) {
    Ok(addr) => addr,
    Err(_) => panic!("OUTPUT_SBIT is not a port bit"),
};

#[derive(Parser, Debug)]
#[command(version, about = "Run the pin mirror against a simulated C8051 port bank")]
struct Args {
    /// Input pin levels, one per iteration, e.g. `0110`
    #[arg(short, long, default_value = "0110")]
    stimulus: String,

    /// Iterations to run; the last stimulus level is held past its end
    #[arg(short = 'n', long)]
    iterations: Option<u64>,

    /// After the stimulus, keep mirroring until the process is killed
    #[arg(long, conflicts_with = "iterations")]
    forever: bool,
}

fn parse_stimulus(bits: &str) -> Result<Vec<bool>> {
    let levels = bits
        .chars()
        .enumerate()
        .map(|(pos, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => bail!("invalid stimulus level {other:?} at position {pos}"),
        })
        .collect::<Result<Vec<_>>>()?;
    if levels.is_empty() {
        bail!("stimulus must hold at least one level");
    }
    Ok(levels)
}

/// What a finite run left behind.
#[derive(Debug)]
struct Summary {
    levels: Vec<bool>,
    iterations: u64,
    latch_writes: u32,
    mode: u8,
}

/// Run `total` iterations, driving the input sbit from `stimulus` (holding
/// its last level past the end) and sampling the output pin after each one.
fn simulate(sfr: SfrHandle, mirror: &mut Firmware, stimulus: &[bool], total: u64) -> Summary {
    let hold = stimulus.last().copied().unwrap_or(false);
    let mut levels = Vec::new();
    let mut next = 0u64;

    let iterations = mirror.run_while(|| {
        if next > 0 {
            let level = sfr.with(|bank| bank.pin_level(OUTPUT_ADDR));
            info!("iteration {}: {OUTPUT_ADDR} = {}", next - 1, u8::from(level));
            levels.push(level);
        }
        if next == total {
            return false;
        }
        let level = stimulus.get(next as usize).copied().unwrap_or(hold);
        sfr.with(|bank| bank.drive_external(INPUT_ADDR, level));
        next += 1;
        true
    });

    let (latch_writes, mode) =
        sfr.with(|bank| (bank.latch_writes(Port::P0), bank.mode_register(Port::P0)));
    Summary {
        levels,
        iterations,
        latch_writes,
        mode,
    }
}

fn boot(sfr: SfrHandle) -> Result<Firmware> {
    let input = sfr.sbit(INPUT_SBIT)?;
    let output = sfr.sbit(OUTPUT_SBIT)?;
    info!("mirroring {} onto {}", input.addr(), output.addr());
    Ok(PinMirror::new(input, output).configure())
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let stimulus = parse_stimulus(&args.stimulus)?;

    let sfr = init_sfr(&SFR).context("installing SFR bank")?;
    let mut mirror = boot(sfr)?;

    let total = args.iterations.unwrap_or(stimulus.len() as u64);
    let summary = simulate(sfr, &mut mirror, &stimulus, total);
    info!(
        "{} iterations, {} P0 latch writes, P0MDOUT = {:#04x}",
        summary.iterations, summary.latch_writes, summary.mode
    );

    if args.forever {
        info!("stimulus consumed, mirroring until killed");
        mirror.run_forever();
    }
    Ok(())
}
