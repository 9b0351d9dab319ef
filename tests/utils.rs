use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Turns on logging for a test. Defaults to `Trace` so a failing decode can be followed byte
/// by byte; set `RUST_LOG` to override.
pub fn enable_logging() {
    LOGGING.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .filter_level(LevelFilter::Trace)
            .format(|formatter, record| {
                writeln!(
                    formatter,
                    "{} [{}] {}: {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .is_test(true);
        let _ = builder.try_init();
    });
}

/// Builds a MIDI file from a 6-byte header payload and the given track chunk payloads.
pub fn file_bytes(header_payload: [u8; 6], track_payloads: &[&[u8]]) -> Vec<u8> {
    let mut bytes = b"MThd".to_vec();
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&header_payload);
    for payload in track_payloads {
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        bytes.extend_from_slice(payload);
    }
    bytes
}

/// The header payload for a metrical file: format, track count, ticks per quarter note.
pub fn header_payload(format: u16, ntracks: u16, division: u16) -> [u8; 6] {
    let mut payload = [0u8; 6];
    payload[..2].copy_from_slice(&format.to_be_bytes());
    payload[2..4].copy_from_slice(&ntracks.to_be_bytes());
    payload[4..].copy_from_slice(&division.to_be_bytes());
    payload
}
