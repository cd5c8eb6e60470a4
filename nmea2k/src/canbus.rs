//! SocketCAN helpers for NMEA2000 traffic.
use std::io;
use std::time::Duration;

use socketcan::{CanSocket, EmbeddedFrame, ExtendedId, Id, Socket};
use tracing::info;

use crate::can_id::CanId;
use crate::frame::CanFrame;

/// Read timeout applied to NMEA2000 sockets.
pub const READ_TIMEOUT: Duration = Duration::from_millis(500);

/// Opens a CAN socket
///
/// # Arguments
/// * `interface` - Name of the CAN interface (e.g., "can0", "vcan0")
pub fn open_can_socket(interface: &str) -> io::Result<CanSocket> {
    let socket = CanSocket::open(interface)?;
    info!("Successfully opened CAN interface: {}", interface);
    Ok(socket)
}

/// Configures a CAN socket with NMEA2000-specific settings
///
/// The read timeout keeps reader loops responsive to shutdown requests
/// even when the bus is silent.
pub fn configure_nmea2k_socket(socket: &CanSocket) -> io::Result<()> {
    socket.set_read_timeout(READ_TIMEOUT)?;
    Ok(())
}

/// Reads one frame from the socket
///
/// # Returns
/// `Ok(Some(frame))` for extended data frames, `Ok(None)` for frames that
/// cannot carry NMEA2000 (standard IDs, remote and error frames).
pub fn read_nmea2k_frame(socket: &CanSocket) -> io::Result<Option<CanFrame>> {
    let frame = socket.read_frame()?;
    let socketcan::CanFrame::Data(data_frame) = frame else {
        return Ok(None);
    };
    let Id::Extended(extended_id) = data_frame.id() else {
        return Ok(None);
    };
    let Ok(id) = CanId::from_raw(extended_id.as_raw()) else {
        return Ok(None);
    };
    Ok(CanFrame::new(id, data_frame.data()))
}

/// Writes one NMEA2000 frame to the socket
pub fn write_nmea2k_frame(socket: &CanSocket, frame: &CanFrame) -> io::Result<()> {
    let invalid = |what: &str| io::Error::new(io::ErrorKind::InvalidInput, what.to_string());
    let id = ExtendedId::new(frame.id.as_raw()).ok_or_else(|| invalid("invalid NMEA2000 CAN ID"))?;
    let out = socketcan::CanFrame::new(id, frame.data()).ok_or_else(|| invalid("invalid CAN frame payload"))?;
    socket.write_frame(&out)
}

/// Whether a read error only means the timeout elapsed without traffic.
pub fn is_timeout(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
