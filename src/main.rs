use std::env;
use std::fs;
use std::process;

use env_logger::Env;

use emu6502::config::{Config, Parsed, USAGE};
use emu6502::frontend::{self, Stop};
use emu6502::machine::Machine;

fn main() {
    let config = match Config::from_args(env::args().skip(1)) {
        Ok(Parsed::Run(config)) => config,
        Ok(Parsed::Help) => {
            print!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            process::exit(1);
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_filter())).init();

    let Some(image_path) = config.image.clone() else {
        eprintln!("{}", USAGE);
        process::exit(1);
    };
    let image = fs::read(&image_path).unwrap_or_else(|e| {
        eprintln!("Failed to read image '{}': {}", image_path.display(), e);
        process::exit(1);
    });

    let mut machine = Machine::new(config);
    machine.initialize();
    if let Err(e) = machine.load_image(&image) {
        eprintln!("Failed to load image '{}': {}", image_path.display(), e);
        process::exit(1);
    }
    machine.reset();

    match frontend::run(&mut machine) {
        Ok(summary) => {
            match summary.stop {
                Stop::Trapped(pc) => println!("Trapped at ${:04X}", pc),
                Stop::Quit => println!("Stopped at ${:04X}", machine.cpu.pc),
            }
            println!(
                "{} instructions, {} cycles",
                summary.instructions, summary.cycles
            );
        }
        Err(e) => {
            log::error!("CPU fault: {}", e);
            eprintln!("CPU fault: {}", e);
            process::exit(2);
        }
    }
}
