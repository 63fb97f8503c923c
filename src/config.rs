//! Firmware Configuration
//!
//! Compile-time settings for the radio, the PWM timing and the motion
//! profile, plus the builders for the Embassy and SoftDevice configuration.

use embassy_nrf::interrupt::Priority;
use embassy_time::Duration;
use nrf_softdevice::raw;

use crate::core::duty::DutyMapping;

/// Advertised complete local name (the touch-screen client connects by name)
pub const DEVICE_NAME: &str = "ESP32_BRAÇO_BLE";

/// Arm control service UUID (12345678-1234-5678-1234-56789abcdef0), little-endian as it goes on air
pub const ARM_SERVICE_UUID_LE: [u8; 16] = [
    0xf0, 0xde, 0xbc, 0x9a, 0x78, 0x56, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12,
];

/// Command characteristic UUID (abcdef01-2345-6789-abcd-0123456789ab), little-endian
pub const COMMAND_CHAR_UUID_LE: [u8; 16] = [
    0xab, 0x89, 0x67, 0x45, 0x23, 0x01, 0xcd, 0xab, 0x89, 0x67, 0x45, 0x23, 0x01, 0xef, 0xcd, 0xab,
];

/// Largest command write accepted by the characteristic
pub const COMMAND_MAX_LEN: usize = 20;

/// Commands buffered between the BLE callback and the motion task
pub const COMMAND_QUEUE_DEPTH: usize = 4;

/// PWM clock divider (16 MHz / 16 = 1 MHz)
pub const PWM_PRESCALER_DIV: u16 = 16;

/// PWM counter top: 20 000 ticks at 1 MHz = 20 ms = 50 Hz
pub const PWM_TOP_TICKS: u16 = 20_000;

/// Microseconds per PWM tick
pub const PWM_TICK_US: u32 = 1;

/// Pulse width at 0°
pub const SERVO_MIN_PULSE_US: u32 = 500;

/// Pulse width at 180°
pub const SERVO_MAX_PULSE_US: u32 = 2500;

/// Angle → compare value table for the configured PWM timing
pub const SERVO_DUTY: DutyMapping =
    DutyMapping::from_pulse_range(SERVO_MIN_PULSE_US, SERVO_MAX_PULSE_US, PWM_TICK_US);

/// Interval between heartbeat log lines
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);

/// Back-off after a failed advertising attempt
pub const ADVERTISING_RETRY: Duration = Duration::from_secs(1);

/// Step timing for the two movement primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct MotionConfig {
    /// Delay after each one-degree step of a full-pose move
    pub pose_step_delay_ms: u32,
    /// Delay after each one-degree step of a gripper-only move
    pub gripper_step_delay_ms: u32,
}

impl MotionConfig {
    pub const fn new() -> Self {
        Self {
            pose_step_delay_ms: 15,
            gripper_step_delay_ms: 10,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Embassy HAL configuration
pub fn embassy_config() -> embassy_nrf::config::Config {
    let mut config = embassy_nrf::config::Config::default();
    // Interrupt priorities must avoid the SoftDevice reserved levels (0, 1, 4)
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    config
}

/// SoftDevice configuration: one peripheral link, RC low-frequency clock
pub fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 247 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: 1408,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: Default::default(),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { ::core::mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}
