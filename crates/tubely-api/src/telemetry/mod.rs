mod init;

pub use init::{init_telemetry, json_logs_requested};
