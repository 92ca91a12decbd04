//! In-memory log capture shared by the logging tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use covid_cli::logging::{LogConfig, init_logging_with_writer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
pub struct CapturedLog {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLog {
    /// Install the global subscriber at debug level, writing here.
    pub fn install(log_data: bool) -> Self {
        let captured = Self::default();
        let config = LogConfig::default()
            .with_level(LevelFilter::DEBUG)
            .with_ansi(false)
            .with_log_data(log_data);
        init_logging_with_writer(&config, captured.clone());
        captured
    }

    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

pub struct CapturedLogGuard {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for CapturedLogGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLog {
    type Writer = CapturedLogGuard;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedLogGuard {
            buffer: Arc::clone(&self.buffer),
        }
    }
}
