use std::fmt::Write as _;
use std::thread;
use std::time::Duration;

use hal::{Delay, Display};

// 128x64 panel with a 6x8 font
const ROWS: usize = 8;
const COLUMNS: usize = 21;
const GLYPH_WIDTH: u8 = 6;

const CPU_CLOCK_HZ: u32 = 32_000_000;

/// Text-mode stand-in for the OLED panel
pub struct TerminalDisplay {
    cells: [[char; COLUMNS]; ROWS],
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self {
            cells: [[' '; COLUMNS]; ROWS],
        }
    }
}

impl TerminalDisplay {
    pub fn row(&self, y: usize) -> String {
        self.cells[y].iter().collect::<String>().trim_end().to_string()
    }

    /// The whole panel framed for printing
    pub fn frame(&self) -> String {
        let border = format!("+{}+", "-".repeat(COLUMNS));
        let mut out = String::new();
        let _ = writeln!(out, "{}", border);
        for row in &self.cells {
            let _ = writeln!(out, "|{}|", row.iter().collect::<String>());
        }
        out.push_str(&border);
        out
    }

    fn put(&mut self, x: u8, y: u8, text: &str) {
        let Some(row) = self.cells.get_mut(usize::from(y)) else {
            return;
        };
        let start = usize::from(x / GLYPH_WIDTH);
        for (cell, ch) in row.iter_mut().skip(start).zip(text.chars()) {
            *cell = ch;
        }
    }
}

impl Display for TerminalDisplay {
    fn clear(&mut self) {
        self.cells = [[' '; COLUMNS]; ROWS];
    }

    fn clear_line(&mut self, y: u8) {
        if let Some(row) = self.cells.get_mut(usize::from(y)) {
            *row = [' '; COLUMNS];
        }
    }

    fn write_str(&mut self, x: u8, y: u8, text: &str) {
        self.put(x, y, text);
    }

    fn write_number(&mut self, x: u8, y: u8, value: f32) {
        self.put(x, y, &format!("{:.1}", value));
    }
}

/// Busy-wait replaced by a sleep of the same length, or skipped entirely
pub struct HostDelay {
    realtime: bool,
}

impl HostDelay {
    pub fn new(realtime: bool) -> Self {
        Self { realtime }
    }
}

impl Delay for HostDelay {
    fn cpu_clock_hz(&self) -> u32 {
        CPU_CLOCK_HZ
    }

    fn delay_cycles(&mut self, cycles: u32) {
        if self.realtime {
            let nanos = u64::from(cycles) * 1_000_000_000 / u64::from(CPU_CLOCK_HZ);
            thread::sleep(Duration::from_nanos(nanos));
        }
    }
}
