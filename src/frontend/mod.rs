pub mod console;
pub mod display;

use crossbeam::channel::{self, Receiver, Sender};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::cpu::CpuError;
use crate::machine::{Machine, Snapshot, TickResult};

/// Ticks run between polls of the refresh timer when unthrottled.
const POLL_INTERVAL: u64 = 1024;
const SNAPSHOT_QUEUE: usize = 4;
const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Toggles shared between the clock loop and the console thread.
#[derive(Debug, Default)]
pub struct Controls {
    paused: AtomicBool,
    debug: AtomicBool,
    quit: AtomicBool,
    snapshot_requested: AtomicBool,
}

impl Controls {
    pub fn new(paused: bool, debug: bool) -> Self {
        Controls {
            paused: AtomicBool::new(paused),
            debug: AtomicBool::new(debug),
            ..Controls::default()
        }
    }

    pub fn paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    /// Flip pause and return the new state.
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.paused.fetch_xor(true, Ordering::Relaxed);
        info!("{}", if paused { "Paused" } else { "Resumed" });
        paused
    }

    /// Flip debug tracing and return the new state.
    pub fn toggle_debug(&self) -> bool {
        let debug = !self.debug.fetch_xor(true, Ordering::Relaxed);
        info!("Debug trace {}", if debug { "on" } else { "off" });
        debug
    }

    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Relaxed);
    }

    pub fn request_snapshot(&self) {
        self.snapshot_requested.store(true, Ordering::Relaxed);
    }

    fn take_snapshot_request(&self) -> bool {
        self.snapshot_requested.swap(false, Ordering::Relaxed)
    }
}

/// Why the clock loop stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stop {
    Quit,
    Trapped(u16),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub stop: Stop,
    pub cycles: u64,
    pub instructions: u64,
}

/// Run the machine until it traps, the console quits or the CPU faults.
/// Register snapshots go to a display thread at the configured refresh rate.
pub fn run(machine: &mut Machine) -> Result<RunSummary, CpuError> {
    let controls = Arc::new(Controls::new(machine.config.paused, machine.config.debug));
    if machine.config.console {
        let _console = console::spawn(Arc::clone(&controls));
    }
    run_with_controls(machine, &controls)
}

pub fn run_with_controls(machine: &mut Machine, controls: &Controls) -> Result<RunSummary, CpuError> {
    let (snapshot_tx, snapshot_rx) = channel::bounded(SNAPSHOT_QUEUE);
    let display = display::spawn(snapshot_rx);

    let refresh = channel::tick(Duration::from_secs(1) / machine.config.refresh_hz.max(1));
    let result = clock_loop(machine, controls, &refresh, &snapshot_tx);

    // Final state goes out whether we stopped cleanly or not.
    let _ = snapshot_tx.send(machine.snapshot());
    drop(snapshot_tx);
    let _ = display.join();
    result
}

/// Ticks per throttle batch and the wall time one batch should take.
fn batch_timing(clock_hz: u64) -> (u64, Option<Duration>) {
    if clock_hz == 0 {
        return (POLL_INTERVAL, None);
    }
    // Aim for roughly millisecond batches.
    let ticks = (clock_hz / 1000).clamp(1, POLL_INTERVAL);
    let nanos = (ticks as u128 * 1_000_000_000 / clock_hz as u128) as u64;
    (ticks, Some(Duration::from_nanos(nanos)))
}

fn publish(
    machine: &Machine,
    controls: &Controls,
    refresh: &Receiver<Instant>,
    snapshots: &Sender<Snapshot>,
) {
    if refresh.try_recv().is_ok() {
        // The display may lag; a dropped refresh is harmless.
        let _ = snapshots.try_send(machine.snapshot());
    }
    if controls.take_snapshot_request() {
        let _ = snapshots.send(machine.snapshot());
    }
}

fn clock_loop(
    machine: &mut Machine,
    controls: &Controls,
    refresh: &Receiver<Instant>,
    snapshots: &Sender<Snapshot>,
) -> Result<RunSummary, CpuError> {
    let (batch, batch_duration) = batch_timing(machine.config.clock_hz);
    let mut next_batch_time = Instant::now();
    let mut ticks = 0u64;
    let mut instructions = 0u64;

    let stop = loop {
        if controls.quit_requested() {
            break Stop::Quit;
        }
        machine.config.paused = controls.paused();
        machine.config.debug = controls.debug();

        match machine.tick()? {
            TickResult::Paused => {
                publish(machine, controls, refresh, snapshots);
                thread::sleep(IDLE_SLEEP);
                next_batch_time = Instant::now();
                continue;
            }
            TickResult::Busy => {}
            TickResult::Retired { pc, .. } => {
                instructions += 1;
                if machine.cpu.pc == pc {
                    info!("Trapped at ${:04X}", pc);
                    break Stop::Trapped(pc);
                }
            }
        }

        ticks += 1;
        if ticks % batch != 0 {
            continue;
        }
        publish(machine, controls, refresh, snapshots);

        if let Some(duration) = batch_duration {
            next_batch_time += duration;
            let now = Instant::now();
            if next_batch_time > now {
                thread::sleep(next_batch_time - now);
            } else if now - next_batch_time > duration * 8 {
                // Fell well behind; don't try to catch up.
                next_batch_time = now;
            }
        }
    };

    Ok(RunSummary {
        stop,
        cycles: machine.cpu.cycles,
        instructions,
    })
}
