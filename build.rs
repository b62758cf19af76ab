use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Pass CPU frequency for timing calculations
    println!("cargo:rustc-env=MCU_FREQ_HZ=16000000");

    // Host builds only compile the portable core and its tests
    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        return;
    }

    // Configure for ATmega128A
    println!("cargo:rustc-link-arg=-mmcu=atmega128a");

    if env::var("CARGO_FEATURE_DEBUG").is_ok() {
        println!("cargo:warning=Building sampler firmware with debug diagnostics");
    }
}
