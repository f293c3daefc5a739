use crossbeam::channel::Receiver;
use std::thread;

use crate::cpu::CpuFlags;
use crate::machine::Snapshot;

const FLAG_ORDER: [(CpuFlags, char); 8] = [
    (CpuFlags::NEGATIVE, 'N'),
    (CpuFlags::OVERFLOW, 'V'),
    (CpuFlags::UNUSED, '-'),
    (CpuFlags::BREAK, 'B'),
    (CpuFlags::DECIMAL, 'D'),
    (CpuFlags::IRQ_DIS, 'I'),
    (CpuFlags::ZERO, 'Z'),
    (CpuFlags::CARRY, 'C'),
];

/// Set flags by letter, clear ones as '.'.
pub fn flag_text(snap: &Snapshot) -> String {
    FLAG_ORDER
        .iter()
        .map(|&(flag, letter)| if snap.flag(flag) { letter } else { '.' })
        .collect()
}

pub fn format_snapshot(snap: &Snapshot) -> String {
    format!(
        "PC:{:04X} OP:{:02X} T:{} A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} P:{} CYC:{}",
        snap.pc,
        snap.opcode,
        snap.ticks_elapsed,
        snap.a,
        snap.x,
        snap.y,
        snap.sp,
        flag_text(snap),
        snap.cycles
    )
}

/// Print snapshots as they arrive until every sender is gone.
pub fn spawn(snapshots: Receiver<Snapshot>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for snap in snapshots.iter() {
            println!("{}", format_snapshot(&snap));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(status: CpuFlags) -> Snapshot {
        Snapshot {
            pc: 0x8004,
            sp: 0xFD,
            a: 0x42,
            x: 0x01,
            y: 0xFF,
            status,
            opcode: 0xA9,
            ticks_elapsed: 2,
            cycles: 1234,
        }
    }

    #[test]
    fn test_flag_text() {
        assert_eq!(flag_text(&snapshot(CpuFlags::UNUSED)), "..-.....");
        let all = snapshot(CpuFlags::all());
        assert_eq!(flag_text(&all), "NV-BDIZC");
        let some = snapshot(CpuFlags::UNUSED | CpuFlags::NEGATIVE | CpuFlags::CARRY);
        assert_eq!(flag_text(&some), "N.-....C");
    }

    #[test]
    fn test_format_snapshot() {
        let line = format_snapshot(&snapshot(CpuFlags::UNUSED | CpuFlags::ZERO));
        assert_eq!(
            line,
            "PC:8004 OP:A9 T:2 A:42 X:01 Y:FF SP:FD P:..-...Z. CYC:1234"
        );
    }
}
