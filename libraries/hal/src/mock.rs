//! Mock hardware for host tests
//!
//! Every mock records how often it was driven so tests can assert that a
//! degraded driver stopped touching the bus.

use crate::{Delay, Display, InterruptMask, MotionSource, RawMotion, RegisterBus};
use std::collections::VecDeque;
use std::string::{String, ToString};
use std::vec::Vec;

/// Register bus that plays back scripted bytes.
///
/// Once the script is exhausted every read returns `fallback`.
#[derive(Debug)]
pub struct MockBus {
    script: VecDeque<u8>,
    fallback: u8,
    reads: usize,
    writes: Vec<(u8, u8, u8)>,
    last_read: Option<(u8, u8)>,
}

impl MockBus {
    /// A bus whose every read returns `value`
    pub fn constant(value: u8) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: value,
            reads: 0,
            writes: Vec::new(),
            last_read: None,
        }
    }

    /// A bus with nothing attached (reads float high)
    pub fn floating() -> Self {
        Self::constant(0xFF)
    }

    /// Queue bytes to return before falling back
    pub fn with_script(mut self, bytes: &[u8]) -> Self {
        self.script.extend(bytes.iter().copied());
        self
    }

    pub fn set_fallback(&mut self, value: u8) {
        self.fallback = value;
    }

    /// Number of `read` calls seen so far
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn writes(&self) -> &[(u8, u8, u8)] {
        &self.writes
    }

    /// Address and register of the most recent read
    pub fn last_read(&self) -> Option<(u8, u8)> {
        self.last_read
    }
}

impl RegisterBus for MockBus {
    fn write(&mut self, address: u8, register: u8, value: u8) {
        self.writes.push((address, register, value));
    }

    fn read(&mut self, address: u8, register: u8) -> u8 {
        self.reads += 1;
        self.last_read = Some((address, register));
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

/// Motion source that plays back scripted samples and init results.
#[derive(Debug)]
pub struct MockMotion {
    samples: VecDeque<RawMotion>,
    fallback: RawMotion,
    init_results: VecDeque<bool>,
    init_fallback: bool,
    reads: usize,
    inits: usize,
}

impl MockMotion {
    /// A source that always returns `sample` and initializes successfully
    pub fn constant(sample: RawMotion) -> Self {
        Self {
            samples: VecDeque::new(),
            fallback: sample,
            init_results: VecDeque::new(),
            init_fallback: true,
            reads: 0,
            inits: 0,
        }
    }

    /// A source whose reads all come back zeroed and whose init never acks
    pub fn dead() -> Self {
        let mut motion = Self::constant(RawMotion::default());
        motion.init_fallback = false;
        motion
    }

    /// Queue samples to return before falling back
    pub fn with_samples(mut self, samples: &[RawMotion]) -> Self {
        self.samples.extend(samples.iter().copied());
        self
    }

    /// Queue init results to return before falling back
    pub fn with_init_results(mut self, results: &[bool]) -> Self {
        self.init_results.extend(results.iter().copied());
        self
    }

    pub fn set_fallback(&mut self, sample: RawMotion) {
        self.fallback = sample;
    }

    pub fn set_init_fallback(&mut self, ok: bool) {
        self.init_fallback = ok;
    }

    /// Number of `read_motion` calls seen so far
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Number of `initialize` calls seen so far
    pub fn inits(&self) -> usize {
        self.inits
    }
}

impl MotionSource for MockMotion {
    fn initialize(&mut self) -> bool {
        self.inits += 1;
        self.init_results.pop_front().unwrap_or(self.init_fallback)
    }

    fn read_motion(&mut self) -> RawMotion {
        self.reads += 1;
        self.samples.pop_front().unwrap_or(self.fallback)
    }
}

/// Interrupt mask that tracks nesting instead of touching hardware
#[derive(Debug, Default)]
pub struct SpyMask {
    depth: u32,
    disables: usize,
    restores: usize,
}

impl SpyMask {
    pub fn is_masked(&self) -> bool {
        self.depth > 0
    }

    pub fn disables(&self) -> usize {
        self.disables
    }

    pub fn restores(&self) -> usize {
        self.restores
    }
}

impl InterruptMask for SpyMask {
    type State = u32;

    fn disable(&mut self) -> u32 {
        let previous = self.depth;
        self.depth += 1;
        self.disables += 1;
        previous
    }

    fn restore(&mut self, state: u32) {
        self.depth = state;
        self.restores += 1;
    }
}

/// A single call made against a [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    ClearLine(u8),
    Text { x: u8, y: u8, text: String },
    Number { x: u8, y: u8, value: f32 },
}

/// Display that records every draw call
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    calls: Vec<DrawCall>,
}

impl RecordingDisplay {
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// True if `text` was drawn anywhere
    pub fn shows(&self, text: &str) -> bool {
        self.calls
            .iter()
            .any(|call| matches!(call, DrawCall::Text { text: t, .. } if t == text))
    }

    /// The last number drawn at `(x, y)`
    pub fn number_at(&self, x: u8, y: u8) -> Option<f32> {
        self.calls.iter().rev().find_map(|call| match call {
            DrawCall::Number { x: cx, y: cy, value } if *cx == x && *cy == y => Some(*value),
            _ => None,
        })
    }

    /// The last string drawn at `(x, y)`
    pub fn text_at(&self, x: u8, y: u8) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            DrawCall::Text { x: cx, y: cy, text } if *cx == x && *cy == y => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Display for RecordingDisplay {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn clear_line(&mut self, y: u8) {
        self.calls.push(DrawCall::ClearLine(y));
    }

    fn write_str(&mut self, x: u8, y: u8, text: &str) {
        self.calls.push(DrawCall::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn write_number(&mut self, x: u8, y: u8, value: f32) {
        self.calls.push(DrawCall::Number { x, y, value });
    }
}

/// Delay that returns immediately and totals the cycles requested
#[derive(Debug, Default)]
pub struct NoDelay {
    cycles: u64,
}

impl NoDelay {
    pub fn total_cycles(&self) -> u64 {
        self.cycles
    }
}

impl Delay for NoDelay {
    fn cpu_clock_hz(&self) -> u32 {
        32_000_000
    }

    fn delay_cycles(&mut self, cycles: u32) {
        self.cycles += u64::from(cycles);
    }
}
