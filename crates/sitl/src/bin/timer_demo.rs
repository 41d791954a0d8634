//! Timestamp demo: conversion speed test plus a free-running polling loop.
//!
//! Reproduces the firmware demo on a workstation: calibrate the clock from
//! a configured CPU rate, time 10 000 timestamp captures, then run two
//! polling-loop timers (500 ms and 200 us) against wall-clock time.
//!
//! Usage:
//!   cargo run -p tickstamp-sitl --bin timer_demo -- [OPTIONS]
//!
//! Options:
//!   --rate-mhz <MHZ>      Simulated CPU rate in MHz (default: 240)
//!   --duration-ms <MS>    Free-loop run time, at most 8000 (default: 3000)

use std::env;
use std::hint::black_box;
use std::process;

use tickstamp_core::clock::{CpuFrequency, CLOCK};
use tickstamp_core::timestamp::{TimestampMicros, TimestampNanos};
use tickstamp_sitl::HostTicks;

struct Args {
    rate_mhz: u32,
    duration_ms: u32,
}

/// The demo's stand-in for the board's clock-frequency subsystem.
struct ConfiguredCpuFreq {
    mhz: u32,
}

impl CpuFrequency for ConfiguredCpuFreq {
    fn cpu_hz(&self) -> u32 {
        self.mhz.saturating_mul(1_000_000)
    }
}

fn parse_args() -> Args {
    let mut args = Args {
        rate_mhz: 240,
        duration_ms: 3_000,
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--rate-mhz" => {
                i += 1;
                args.rate_mhz = parse_u32_arg(&raw, i, "rate-mhz");
            }
            "--duration-ms" => {
                i += 1;
                args.duration_ms = parse_u32_arg(&raw, i, "duration-ms");
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if args.rate_mhz == 0 {
        eprintln!("Error: rate-mhz must be at least 1");
        process::exit(1);
    }

    // Past 8 s the 500 ms timer nears the +-2^31-tick comparability window
    // at 240 MHz, so longer runs would measure garbage
    if args.duration_ms == 0 || args.duration_ms > 8_000 {
        eprintln!("Error: duration-ms must be between 1 and 8000");
        process::exit(1);
    }

    args
}

fn parse_u32_arg(raw: &[String], i: usize, name: &str) -> u32 {
    raw.get(i)
        .unwrap_or_else(|| {
            eprintln!("Error: --{name} requires a value");
            process::exit(1);
        })
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("Error: invalid value for --{name}");
            process::exit(1);
        })
}

fn print_usage() {
    eprintln!(
        "Usage: timer_demo [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --rate-mhz <MHZ>    Simulated CPU rate in MHz (default: 240)\n\
         \x20 --duration-ms <MS>  Free-loop run time, at most 8000 (default: 3000)\n\
         \x20 -h, --help          Show this help"
    );
}

fn main() {
    let args = parse_args();

    println!("=== tickstamp timer demo ===");
    println!(
        "CPU rate: {} MHz, free-loop duration: {} ms",
        args.rate_mhz, args.duration_ms
    );
    println!();

    CLOCK.calibrate(&ConfiguredCpuFreq { mhz: args.rate_mhz });
    let ticks = match HostTicks::new(CLOCK.ticks_per_us()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    speed_test(&ticks);
    free_loop(&ticks, args.duration_ms);
}

/// Times timestamp capture and differencing over 10 000 iterations.
fn speed_test(ticks: &HostTicks) {
    const ITERATIONS: u32 = 10_000;

    let mut speed_timer = TimestampNanos::now(ticks);
    let mut current = TimestampMicros::new();
    for _ in 0..ITERATIONS {
        current = black_box(TimestampMicros::now(ticks));
    }
    let elapsed = speed_timer.elapsed(ticks);
    println!(
        "Capture:    {} ns per call ({ITERATIONS} iterations)",
        elapsed / ITERATIONS as i64
    );

    let reference = TimestampMicros::now(ticks);
    speed_timer.refresh(ticks);
    let mut over_threshold = 0u32;
    for _ in 0..ITERATIONS {
        if black_box(reference - current) > 500 {
            over_threshold += 1;
        }
    }
    let elapsed = speed_timer.elapsed(ticks);
    println!(
        "Difference: {} ns per call ({over_threshold} over threshold)",
        elapsed / ITERATIONS as i64
    );
    println!();
}

/// Free-running polling loop with a 500 ms timer and a 200 us timer.
fn free_loop(ticks: &HostTicks, duration_ms: u32) {
    let start = TimestampMicros::now(ticks);
    let mut timer_slow = TimestampMicros::now(ticks);
    let mut timer_fast = TimestampMicros::now(ticks);
    let mut slow_fires = 0u32;
    let mut fast_fires = 0u32;

    loop {
        let current = TimestampMicros::now(ticks);

        // 500 ms timer
        if current - timer_slow >= 500_000 {
            timer_slow.refresh(ticks);
            slow_fires += 1;
            println!(
                "slow timer fired: {} us since start",
                current.micros_since(&start)
            );
        }

        // 200 us timer
        if current - timer_fast >= 200 {
            timer_fast.refresh(ticks);
            fast_fires += 1;
        }

        if current.micros_since(&start) >= duration_ms as i32 * 1_000 {
            break;
        }
    }

    println!();
    println!("Free loop done: {slow_fires} slow fires, {fast_fires} fast fires");
}
