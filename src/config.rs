use std::fmt;
use std::path::PathBuf;

use crate::cpu::Variant;

pub const USAGE: &str = "\
Usage: emu6502 [options] IMAGE

Options:
  --mode 6502|6507     CPU variant (default 6502)
  --pc <hex>           Start at this address instead of the reset vector
  --debug              Log a trace line for every retired instruction
  --pause              Start with emulation paused
  --clock-hz <n>       Clock rate, 0 for unthrottled (default 0)
  --refresh-hz <n>     Register display refresh rate (default 30)
  --console            Read p/d/s/q commands from stdin
  --help               Show this menu
";

pub const DEFAULT_REFRESH_HZ: u32 = 30;

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    UnknownFlag(String),
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, value: String },
    MissingImage,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownFlag(flag) => write!(f, "Unknown option: {}", flag),
            ConfigError::MissingValue(flag) => write!(f, "Option {} needs a value", flag),
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "Invalid value for {}: {}", flag, value)
            }
            ConfigError::MissingImage => write!(f, "No memory image given"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Host-supplied settings, fixed at startup except for the pause and debug
/// toggles which the runner may flip while running.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub variant: Variant,
    pub pc_override: Option<u16>,
    pub debug: bool,
    pub paused: bool,
    pub clock_hz: u64,
    pub refresh_hz: u32,
    pub console: bool,
    pub image: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            variant: Variant::Mos6502,
            pc_override: None,
            debug: false,
            paused: false,
            clock_hz: 0,
            refresh_hz: DEFAULT_REFRESH_HZ,
            console: false,
            image: None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Parsed {
    Run(Config),
    Help,
}

fn parse_hex(flag: &'static str, value: &str) -> Result<u16, ConfigError> {
    let digits = value
        .trim_start_matches('$')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

fn parse_num<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

impl Config {
    /// Default log filter when `RUST_LOG` is unset. Trace lines go out at
    /// debug level, so asking for them (or for the console, which can turn
    /// them on later) lowers the filter to match.
    pub fn log_filter(&self) -> &'static str {
        if self.debug || self.console {
            "debug"
        } else {
            "info"
        }
    }

    /// Parse command-line arguments, program name already stripped.
    pub fn from_args<I>(args: I) -> Result<Parsed, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            // Accept both -flag and --flag.
            let flag = if arg.starts_with("--") { &arg[1..] } else { arg.as_str() };
            match flag {
                "-help" | "-h" => return Ok(Parsed::Help),
                "-debug" => config.debug = true,
                "-pause" => config.paused = true,
                "-console" => config.console = true,
                "-mode" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--mode"))?;
                    config.variant = match value.as_str() {
                        "6502" => Variant::Mos6502,
                        "6507" => Variant::Mos6507,
                        _ => return Err(ConfigError::InvalidValue { flag: "--mode", value }),
                    };
                }
                "-pc" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--pc"))?;
                    config.pc_override = Some(parse_hex("--pc", &value)?);
                }
                "-clock-hz" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--clock-hz"))?;
                    config.clock_hz = parse_num("--clock-hz", &value)?;
                }
                "-refresh-hz" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--refresh-hz"))?;
                    let hz: u32 = parse_num("--refresh-hz", &value)?;
                    if hz == 0 {
                        return Err(ConfigError::InvalidValue { flag: "--refresh-hz", value });
                    }
                    config.refresh_hz = hz;
                }
                _ if arg.starts_with('-') => return Err(ConfigError::UnknownFlag(arg)),
                _ => config.image = Some(PathBuf::from(arg)),
            }
        }

        if config.image.is_none() {
            return Err(ConfigError::MissingImage);
        }
        Ok(Parsed::Run(config))
    }
}
