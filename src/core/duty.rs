//! Angle to PWM duty mapping
//!
//! Hobby servos read the width of a pulse repeated every 20 ms: roughly
//! 500 µs for 0° and 2500 µs for 180°. The mapping is linear and done in
//! integer arithmetic so it matches the classic `map()` helper bit for bit.

use defmt::Format;

use crate::core::pose::{clamp_angle, MAX_ANGLE};

/// Linear angle → compare value table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct DutyMapping {
    /// Compare value at 0°
    pub min_duty: u16,
    /// Compare value at 180°
    pub max_duty: u16,
}

impl DutyMapping {
    /// 16-bit timer at 50 Hz (period = 65536 counts)
    pub const LEDC_16BIT: DutyMapping = DutyMapping::new(1638, 8192);

    pub const fn new(min_duty: u16, max_duty: u16) -> Self {
        Self { min_duty, max_duty }
    }

    /// Table for a counter ticking every `tick_us` microseconds.
    ///
    /// Tick counts beyond `u16::MAX` saturate.
    pub const fn from_pulse_range(min_pulse_us: u32, max_pulse_us: u32, tick_us: u32) -> Self {
        let tick_us = if tick_us == 0 { 1 } else { tick_us };
        Self {
            min_duty: saturate_ticks(min_pulse_us / tick_us),
            max_duty: saturate_ticks(max_pulse_us / tick_us),
        }
    }

    /// Compare value for `angle` degrees (clamped to 180)
    pub const fn duty_for(&self, angle: u8) -> u16 {
        let angle = clamp_angle(angle) as i32;
        let min = self.min_duty as i32;
        let max = self.max_duty as i32;
        (angle * (max - min) / MAX_ANGLE as i32 + min) as u16
    }
}

const fn saturate_ticks(ticks: u32) -> u16 {
    if ticks > u16::MAX as u32 {
        u16::MAX
    } else {
        ticks as u16
    }
}
