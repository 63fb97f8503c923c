//! Command Processing Module
//!
//! A BLE client drives the arm by writing one ASCII character:
//!
//! | byte        | action                                  |
//! |-------------|-----------------------------------------|
//! | `'0'..='7'` | move to preset pose 0..7                |
//! | `'8'`       | ease the gripper closed (60°)           |
//! | `'9'`       | ease the gripper open (120°)            |
//!
//! Only the first byte of a write is looked at. Writes are parsed in the
//! BLE callback, queued, and executed one at a time by the motion task.

use defmt::{debug, error, info, warn, Format};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embedded_hal_async::delay::DelayNs;

use crate::config::COMMAND_QUEUE_DEPTH;
use crate::core::motion::Arm;
use crate::core::pose::{self, Pose, GRIPPER_CLOSED_ANGLE, GRIPPER_OPEN_ANGLE, PRESET_COUNT};
use crate::servo::{ServoError, ServoOutput};

/// Command processing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum CommandError {
    /// Zero-length write
    Empty,
    /// First byte is outside the command space
    Unknown(u8),
    /// Motion task is behind; the command was dropped
    QueueFull,
    Servo(ServoError),
}

impl From<ServoError> for CommandError {
    fn from(err: ServoError) -> Self {
        CommandError::Servo(err)
    }
}

/// Arm commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Command {
    /// Move to `PRESET_POSES[index]`
    Preset(u8),
    GripperClose,
    GripperOpen,
}

impl Command {
    /// Decode a single command byte
    pub fn from_byte(byte: u8) -> Result<Self, CommandError> {
        match byte {
            b'0'..=b'7' => Ok(Command::Preset(byte - b'0')),
            b'8' => Ok(Command::GripperClose),
            b'9' => Ok(Command::GripperOpen),
            other => Err(CommandError::Unknown(other)),
        }
    }

    /// Decode a characteristic write; trailing bytes are ignored
    pub fn parse(payload: &[u8]) -> Result<Self, CommandError> {
        let first = payload.first().copied().ok_or(CommandError::Empty)?;
        Self::from_byte(first)
    }

    /// ASCII byte that selects this command
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Preset(index) => b'0'.wrapping_add(index),
            Command::GripperClose => b'8',
            Command::GripperOpen => b'9',
        }
    }

    /// Pose the arm ends up in when this command runs from `current`
    pub fn target(self, current: Pose) -> Pose {
        match self {
            Command::Preset(index) => pose::preset(index as usize).unwrap_or(current),
            Command::GripperClose => current.with(pose::Joint::Gripper, GRIPPER_CLOSED_ANGLE),
            Command::GripperOpen => current.with(pose::Joint::Gripper, GRIPPER_OPEN_ANGLE),
        }
    }
}

/// Run one command to completion; returns the steps taken
pub async fn execute<S, D>(command: Command, arm: &mut Arm<S>, delay: &mut D) -> Result<u16, CommandError>
where
    S: ServoOutput,
    D: DelayNs,
{
    debug!("Executing {:?} from {}", command, arm.pose());

    let steps = match command {
        Command::Preset(index) if (index as usize) < PRESET_COUNT => {
            arm.move_to(command.target(arm.pose()), delay).await?
        }
        Command::Preset(index) => return Err(CommandError::Unknown(b'0'.wrapping_add(index))),
        Command::GripperClose => arm.move_gripper_to(GRIPPER_CLOSED_ANGLE, delay).await?,
        Command::GripperOpen => arm.move_gripper_to(GRIPPER_OPEN_ANGLE, delay).await?,
    };

    Ok(steps)
}

/// Commands waiting for the motion task
static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH> = Channel::new();

/// Parse a characteristic write and queue it for execution
pub fn submit(payload: &[u8]) -> Result<Command, CommandError> {
    let command = match Command::parse(payload) {
        Ok(command) => command,
        Err(CommandError::Unknown(byte)) => {
            warn!("Invalid command: {=u8:#x} ({})", byte, byte as char);
            return Err(CommandError::Unknown(byte));
        }
        Err(e) => return Err(e),
    };

    if COMMAND_CHANNEL.try_send(command).is_err() {
        warn!("Command {:?} dropped - queue full", command);
        return Err(CommandError::QueueFull);
    }

    info!("Command queued: {:?}", command);
    Ok(command)
}

/// Receiving end of the command queue
pub fn command_receiver() -> Receiver<'static, CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH> {
    COMMAND_CHANNEL.receiver()
}

/// Drop any commands still queued
pub fn clear_queue() {
    COMMAND_CHANNEL.clear();
}

/// Execute queued commands forever, one at a time, in arrival order
pub async fn process_commands<S, D>(arm: &mut Arm<S>, delay: &mut D) -> !
where
    S: ServoOutput,
    D: DelayNs,
{
    let receiver = command_receiver();
    loop {
        let command = receiver.receive().await;
        if let Err(e) = execute(command, arm, delay).await {
            error!("Command {:?} failed: {:?}", command, e);
        }
    }
}
