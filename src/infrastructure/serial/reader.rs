use crate::core::relay::LineStream;
use crate::domain::error::{EchoError, EchoResult};
use crate::domain::message::SerialMessage;
use crate::infrastructure::serial::framer::LineFramer;
use serialport::SerialPort;
use std::io::{ErrorKind, Read};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

const READ_TIMEOUT: Duration = Duration::from_millis(100);
const READ_BUFFER_SIZE: usize = 1024;

/// An opened serial device that yields newline-delimited lines.
pub struct SerialLineReader {
    device: String,
    port: Box<dyn SerialPort>,
}

impl SerialLineReader {
    /// Open `device` at `baudrate` (8N1, no flow control).
    pub fn open(device: &str, baudrate: u32) -> EchoResult<Self> {
        let port = serialport::new(device, baudrate)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .flow_control(serialport::FlowControl::None)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| EchoError::DeviceOpen {
                device: device.to_string(),
                source,
            })?;

        info!("Serial port {} opened at {} baud", device, baudrate);

        Ok(Self {
            device: device.to_string(),
            port,
        })
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Start the blocking read loop and return the stream of lines it produces.
    ///
    /// The stream ends with a single `Err` item when the device fails or
    /// closes; it is never restarted.
    pub fn into_lines(self) -> LineStream {
        let (sender, receiver) = mpsc::unbounded_channel();
        let Self { device, port } = self;

        tokio::task::spawn_blocking(move || pump_lines(port, &device, &sender));

        receiver
    }
}

/// Read from `reader` until it fails, forwarding each framed line to `lines`.
pub fn pump_lines<R: Read>(
    mut reader: R,
    device: &str,
    lines: &mpsc::UnboundedSender<EchoResult<SerialMessage>>,
) {
    let mut framer = LineFramer::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => {
                error!("Serial device {} closed", device);
                let _ = lines.send(Err(EchoError::DeviceClosed {
                    device: device.to_string(),
                }));
                return;
            }
            Ok(n) => {
                debug!("Received {} bytes over serial", n);

                for line in framer.push(&buffer[..n]) {
                    if lines.send(Ok(SerialMessage::new(line))).is_err() {
                        debug!("Line receiver dropped, stopping serial reader");
                        return;
                    }
                }
            }
            Err(ref e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {
                if lines.is_closed() {
                    debug!("Line receiver dropped, stopping serial reader");
                    return;
                }
            }
            Err(source) => {
                error!("Failed to read from serial port {}: {}", device, source);
                let _ = lines.send(Err(EchoError::DeviceStream {
                    device: device.to_string(),
                    source,
                }));
                return;
            }
        }
    }
}
