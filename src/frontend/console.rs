use log::{info, warn};
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use super::Controls;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePause,
    ToggleDebug,
    Snapshot,
    Quit,
}

pub const HELP: &str = "p: pause/resume  d: debug trace  s: snapshot  q: quit";

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "p" | "pause" => Some(Command::TogglePause),
        "d" | "debug" => Some(Command::ToggleDebug),
        "s" | "snapshot" => Some(Command::Snapshot),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

pub fn apply(controls: &Controls, command: Command) {
    match command {
        Command::TogglePause => {
            controls.toggle_pause();
        }
        Command::ToggleDebug => {
            controls.toggle_debug();
        }
        Command::Snapshot => controls.request_snapshot(),
        Command::Quit => controls.request_quit(),
    }
}

/// Read commands from stdin on a detached thread until quit or EOF.
pub fn spawn(controls: Arc<Controls>) -> thread::JoinHandle<()> {
    info!("Console ready ({})", HELP);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Console read failed: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(command) => {
                    apply(&controls, command);
                    if command == Command::Quit {
                        break;
                    }
                }
                None => println!("{}", HELP),
            }
        }
    })
}
