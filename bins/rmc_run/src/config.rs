use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use rmc_emulator::{DEFAULT_MEMORY_SIZE, RESET_IP};
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(name = "rmc-run", version, about = "Load a boot image and step the real mode CPU")]
pub struct Args {
    /// Boot image to load. The built-in sample boot sector is used if none is given.
    pub image: Option<PathBuf>,

    /// TOML file with emulator settings. Flags given on the command line take precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Size of the emulated memory in bytes.
    #[arg(long)]
    pub memory_size: Option<usize>,

    /// Segment the image is loaded to and execution starts in.
    #[arg(long, value_parser = parse_u16)]
    pub load_segment: Option<u16>,

    /// Offset the image is loaded to and execution starts at.
    #[arg(long, value_parser = parse_u16)]
    pub load_offset: Option<u16>,

    /// Stop after this many instructions.
    #[arg(short = 'n', long)]
    pub max_steps: Option<usize>,
}

/// Accepts decimal or `0x` prefixed hexadecimal.
fn parse_u16(value: &str) -> Result<u16, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|err| format!("{} ({})", err, value))
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub memory_size: usize,
    pub load_segment: u16,
    pub load_offset: u16,
    pub max_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            load_segment: 0x0000,
            load_offset: RESET_IP,
            max_steps: 1_000,
        }
    }
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file. ({})", path.display()))?;
        Self::from_toml(&source)
            .with_context(|| format!("Could not parse config file. ({})", path.display()))
    }

    /// Command line flags override whatever was read from the config file.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(memory_size) = args.memory_size {
            self.memory_size = memory_size;
        }
        if let Some(load_segment) = args.load_segment {
            self.load_segment = load_segment;
        }
        if let Some(load_offset) = args.load_offset {
            self.load_offset = load_offset;
        }
        if let Some(max_steps) = args.max_steps {
            self.max_steps = max_steps;
        }
        self
    }
}
