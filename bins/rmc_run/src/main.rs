mod config;

use anyhow::Context;
use clap::Parser;
use rmc_emulator::{Cpu, Memory};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Args, Config};

/// Start of a boot sector: a short jump over the BIOS parameter block to code that sets up a stack.
/// Execution stops at the `lds` at the end, which the core does not decode.
fn sample_boot_sector() -> Vec<u8> {
    let mut image = vec![0x00; 0x3E];
    image[..3].copy_from_slice(&[0xEB, 0x3C, 0x90]);
    image.extend_from_slice(&[
        0xFA, 0x33, 0xC0, 0x8E, 0xD0, 0xBC, 0x00, 0x7C, 0x16, 0x07, 0xBB, 0x78, 0x00, 0x36, 0xC5,
        0x37,
    ]);
    image
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_args(&args);

    let image = match &args.image {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Could not read boot image. ({})", path.display()))?,
        None => sample_boot_sector(),
    };

    let mut memory = Memory::new(config.memory_size);
    memory
        .write(config.load_segment, config.load_offset, &image)
        .with_context(|| {
            format!(
                "Boot image does not fit in memory. ({} bytes at {:04X}:{:04X})",
                image.len(),
                config.load_segment,
                config.load_offset
            )
        })?;

    info!(
        "Loaded {} bytes to {:04X}:{:04X}",
        image.len(),
        config.load_segment,
        config.load_offset
    );

    let mut cpu = Cpu::new(memory);
    cpu.set_reset_vector(config.load_segment, config.load_offset);

    info!("{}", cpu.dump_state());

    for _ in 0..config.max_steps {
        match cpu.step() {
            Ok(instruction) => info!("{:<20} {}", instruction.to_string(), cpu.dump_state()),
            Err(err) => {
                error!("CPU halted: {}", err);
                break;
            }
        }
    }

    Ok(())
}
