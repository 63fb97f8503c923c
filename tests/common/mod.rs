//! Common test utilities and setup for embedded tests
//!
//! This module provides shared functionality for all defmt-test based tests:
//! - Critical section implementation
//! - Global heap for proptest
//! - Recording servo output and counting delay

#![allow(dead_code)]

// Re-export commonly used items for tests (except conflicting macros)
pub use defmt_rtt as _; // global logger
pub use embassy_executor as _;
// nrf-softdevice provides both interrupt vectors and critical section
pub use nrf_softdevice as _;
pub use panic_probe as _; // panic handler
pub use {embassy_nrf as _, embassy_sync as _, embassy_time as _};

// Global allocator for proptest (required for alloc feature in no_std)
pub extern crate alloc;
#[allow(unused)]
pub use alloc::vec;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal_async::delay::DelayNs;
pub use embedded_alloc::LlffHeap as Heap;
use heapless::Vec;
use servo_arm_firmware::core::pose::Joint;
use servo_arm_firmware::servo::{ServoError, ServoOutput};

#[global_allocator]
pub static HEAP: Heap = Heap::empty();

// 8KB heap for proptest shrinking
pub static mut HEAP_MEM: [u8; 8192] = [0; 8192];

// Global flag to ensure heap is only initialized once
static HEAP_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Ensure heap is initialized exactly once (thread-safe)
pub fn ensure_heap_initialized() {
    if !HEAP_INITIALIZED.swap(true, Ordering::Relaxed) {
        unsafe {
            let ptr = core::ptr::addr_of_mut!(HEAP_MEM) as *mut u8;
            HEAP.init(ptr as usize, 8192);
        }
    }
}

/// Largest number of writes a single test records
pub const MAX_WRITES: usize = 1024;

/// Servo output that records every write and can be told to fail
pub struct RecordingOutput {
    pub writes: Vec<(Joint, u16), MAX_WRITES>,
    /// Fail once this many writes have succeeded
    pub fail_after: Option<usize>,
    /// Last duty written per channel
    pub channels: [Option<u16>; 4],
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            fail_after: None,
            channels: [None; 4],
        }
    }

    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::new()
        }
    }

    /// Number of writes that targeted `joint`
    pub fn writes_to(&self, joint: Joint) -> usize {
        self.writes.iter().filter(|(j, _)| *j == joint).count()
    }
}

impl ServoOutput for RecordingOutput {
    fn set_duty(&mut self, joint: Joint, duty: u16) -> Result<(), ServoError> {
        if let Some(limit) = self.fail_after {
            if self.writes.len() >= limit {
                return Err(ServoError::DutyOutOfRange { joint, duty, max: 0 });
            }
        }
        // Overflowing the log is a test bug; keep going so the assertion shows it
        let _ = self.writes.push((joint, duty));
        self.channels[joint.channel()] = Some(duty);
        Ok(())
    }
}

/// Delay that returns immediately and tallies what was asked for
#[derive(Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_ms: u32,
    pub last_ms: Option<u32>,
}

impl DelayNs for CountingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ms += ns / 1_000_000;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += ms;
        self.last_ms = Some(ms);
    }
}
