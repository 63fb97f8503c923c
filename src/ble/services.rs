//! GATT Server Services Module
//!
//! One primary service with a single write-only characteristic. Every write
//! is handed to the command queue; nothing is ever sent back to the client.

use defmt::{debug, info, warn, Format};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, RegisterError, WriteOp};
use nrf_softdevice::ble::{Connection, Uuid};
use nrf_softdevice::Softdevice;

use crate::commands::{self, Command, CommandError};
use crate::config::{ARM_SERVICE_UUID_LE, COMMAND_CHAR_UUID_LE, COMMAND_MAX_LEN};

/// Events surfaced to the connection loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum ArmServiceEvent {
    /// A write was parsed and queued for the motion task
    CommandQueued(Command),
}

/// Main GATT Server implementation
pub struct Server {
    command_handle: u16,
}

impl Server {
    /// Register the arm control service with the SoftDevice
    pub fn new(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut sb = ServiceBuilder::new(sd, Uuid::new_128(&ARM_SERVICE_UUID_LE))?;

        let attr = Attribute::new(&[0u8]).variable_len(COMMAND_MAX_LEN as u16);
        let metadata = Metadata::new(Properties::new().write());
        let handles = sb
            .add_characteristic(Uuid::new_128(&COMMAND_CHAR_UUID_LE), attr, metadata)?
            .build();
        let _service = sb.build();

        info!("Arm control service registered, command handle {}", handles.value_handle);

        Ok(Self {
            command_handle: handles.value_handle,
        })
    }
}

impl gatt_server::Server for Server {
    type Event = ArmServiceEvent;

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        if handle != self.command_handle {
            debug!("Write to unknown handle {}", handle);
            return None;
        }
        handle_command_write(data).map(ArmServiceEvent::CommandQueued)
    }
}

/// Queue the command carried by a characteristic write
pub fn handle_command_write(data: &[u8]) -> Option<Command> {
    match commands::submit(data) {
        Ok(command) => Some(command),
        Err(CommandError::Empty) => {
            debug!("Ignoring empty command write");
            None
        }
        // Already logged by the queue
        Err(CommandError::Unknown(_)) | Err(CommandError::QueueFull) => None,
        Err(e) => {
            warn!("Command write rejected: {:?}", e);
            None
        }
    }
}
