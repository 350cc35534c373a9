//! Intersection Simulation
//!
//! Replays a scripted sequence of switch-bus words through a phase engine,
//! the way a hardware test bench drives the controller's slider inputs.
//!
//! Key concepts:
//! - Evaluation on every input change (no clock)
//! - Switch-bus and LED-register views of the snapshots
//! - "NO" display for malformed requests, silent ignore for illegal ones
//! - Emergency override
//!
//! Run with: cargo run --example intersection_sim
//! Set TRAFFIC_PHASE_LOG=debug to see the engine's own events.

use traffic_phase::engine::PhaseEngine;
use traffic_phase::signals::{OutputSnapshot, SegmentCode};
use tracing_subscriber::EnvFilter;

const SW0: u16 = 1 << 0;
const SW1: u16 = 1 << 1;
const SW2: u16 = 1 << 2;
const SW3: u16 = 1 << 3;
const SW4: u16 = 1 << 4;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TRAFFIC_PHASE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn digits(output: &OutputSnapshot) -> String {
    output
        .digits
        .iter()
        .rev()
        .map(|code| match *code {
            SegmentCode::BLANK => "--".to_string(),
            code => format!("{:02X}", code.bits()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() {
    init_logging();

    println!("=== Intersection Simulation ===\n");

    let mut engine = PhaseEngine::new();
    println!("Initial phase: {}\n", engine.current_phase());

    let script = [
        ("Start", 0),
        ("Power on (SW0)", SW0),
        ("Request RedYellow (SW0 + SW2 + SW3)", SW0 | SW2 | SW3),
        ("Request Green (SW0 + SW4)", SW0 | SW4),
        ("Request Red while Green (SW0 + SW2)", SW0 | SW2),
        ("Malformed request (SW0 + SW3 + SW4)", SW0 | SW3 | SW4),
        ("Request Yellow (SW0 + SW3)", SW0 | SW3),
        ("Emergency (SW0 + SW1)", SW0 | SW1),
        ("Power off", 0),
    ];

    println!("{:<40} {:>10}  {:>10}  HEX5..HEX0", "step", "SW", "LEDS");
    for (label, word) in script {
        let output = engine.evaluate_word(word);
        println!(
            "{:<40} {:010b}  {:010b}  {}   -> {}",
            label,
            word,
            engine.led_word(),
            digits(&output),
            engine.current_phase()
        );
    }

    println!("\nCommitted transitions:");
    for transition in engine.history().transitions() {
        println!(
            "  #{:<3} {} -> {}",
            transition.evaluation, transition.from, transition.to
        );
    }

    println!("\n=== Simulation Complete ===");
}
