use flume::Receiver;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use super::fifo::FifoReader;
use crate::config::Config;
use crate::errors::AppResult;
use crate::notify::{DispatchStats, Dispatcher, NotificationClient};
use crate::syslog::{BufferProcessor, LineBuffer, MarkupFilter};

/// Pause after an empty read when no wait time is configured
const IDLE_WAIT: Duration = Duration::from_secs(1);

/// The read loop: FIFO → line buffer → processor → dispatcher
pub struct SyslogDaemon {
    reader: FifoReader,
    buffer: LineBuffer,
    processor: BufferProcessor,
    dispatcher: Dispatcher,
    shutdown_receiver: Receiver<()>,
    wait: Duration,
}

impl SyslogDaemon {
    pub fn new(
        reader: FifoReader,
        config: &Config,
        filter: MarkupFilter,
        client: Arc<dyn NotificationClient>,
        shutdown_receiver: Receiver<()>,
    ) -> Self {
        Self {
            reader,
            buffer: LineBuffer::new(config.daemon.max_message_size),
            processor: BufferProcessor::from_config(config, filter),
            dispatcher: Dispatcher::new(client, config),
            shutdown_receiver,
            wait: Duration::from_secs(config.daemon.wait_secs),
        }
    }

    /// Run until shutdown is requested or a dispatch failure ends the loop
    pub async fn run(mut self) -> AppResult<DispatchStats> {
        info!("Listening on FIFO {}", self.reader.path().display());

        let mut chunk = vec![0u8; self.buffer.capacity()];
        let result = loop {
            let spare = self.buffer.spare_capacity();

            let read = tokio::select! {
                _ = self.shutdown_receiver.recv_async() => {
                    info!("Received shutdown signal, stopping read loop");
                    break Ok(());
                }
                read = self.reader.read(&mut chunk[..spare]) => read,
            };

            let n = match read {
                Ok(n) => n,
                Err(e) => break Err(e),
            };

            if n == 0 {
                // No writer attached; wait for one
                let idle = if self.wait.is_zero() { IDLE_WAIT } else { self.wait };
                if self.pause(idle).await {
                    break Ok(());
                }
                continue;
            }

            debug!(
                "Read {} bytes ({} carried over): {}",
                n,
                self.buffer.len(),
                String::from_utf8_lossy(&chunk[..n]).trim_end()
            );
            if let Err(e) = self.buffer.extend(&chunk[..n]) {
                break Err(e);
            }
            if let Err(e) = self.process_pending().await {
                break Err(e);
            }

            if !self.wait.is_zero() && self.pause(self.wait).await {
                break Ok(());
            }
        };

        let stats = self.dispatcher.stats().clone();
        info!(
            "Read loop stopped: {} notifications sent, {} failed",
            stats.sent, stats.failed
        );
        result.map(|()| stats)
    }

    /// Dispatch every complete line currently buffered
    async fn process_pending(&mut self) -> AppResult<()> {
        let region = self.buffer.complete_region();
        if region.is_empty() {
            return Ok(());
        }

        let consumed = region.len();
        let events = self.processor.process(region);
        self.buffer.consume(consumed);
        self.dispatcher.dispatch_all(&events).await
    }

    /// Sleep unless shutdown arrives first; true means stop
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.shutdown_receiver.recv_async() => {
                info!("Received shutdown signal while waiting");
                true
            }
            _ = sleep(duration) => false,
        }
    }
}
