//! Request/response loop for a single client

use super::ClientSession;
use crate::connection_error::{ConnectionError, log_connection_error};
use crate::constants::buffer::{LINE, READER_CAPACITY};
use crate::protocol::{Evaluation, evaluate};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// Per-session request totals, logged when the session closes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub requests: u64,
    pub errors: u64,
}

impl SessionSummary {
    fn record(&mut self, evaluation: &Evaluation) {
        self.requests += 1;
        if evaluation.outcome.is_err() {
            self.errors += 1;
        }
    }
}

impl ClientSession {
    /// Serve requests until the peer disconnects or an I/O error occurs
    ///
    /// Never fails: errors are logged here and the connection is released on
    /// every path. Requests are answered strictly in arrival order.
    pub async fn handle<S>(&self, stream: S) -> SessionSummary
    where
        S: AsyncRead + AsyncWrite,
    {
        let _active = self.stats.connection_opened();
        let session_id = self.client_id.short();

        let (read_half, mut write_half) = tokio::io::split(stream);
        let mut reader = BufReader::with_capacity(READER_CAPACITY, read_half);
        let mut summary = SessionSummary::default();

        debug!("Client {} [{}] session loop starting", self.client_addr, session_id);

        match self.serve(&mut reader, &mut write_half, &mut summary).await {
            Ok(()) => {
                debug!("Client {} [{}] disconnected", self.client_addr, session_id);
            }
            Err(e) => {
                log_connection_error(
                    format_args!("Client {} [{}] session ended", self.client_addr, session_id),
                    &e,
                );
            }
        }

        if let Err(e) = write_half.shutdown().await {
            debug!(
                "Client {} [{}] shutdown after close: {}",
                self.client_addr, session_id, e
            );
        }

        info!(
            client = %self.client_addr,
            session = %session_id,
            requests = summary.requests,
            errors = summary.errors,
            "Session closed {} [{}]: {} requests, {} errors",
            self.client_addr,
            session_id,
            summary.requests,
            summary.errors
        );

        summary
    }

    async fn serve<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
        summary: &mut SessionSummary,
    ) -> Result<(), ConnectionError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        // Reuse line buffer to avoid per-iteration allocations
        let mut line = Vec::with_capacity(LINE);

        loop {
            line.clear();
            let n = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(ConnectionError::Read)?;
            if n == 0 {
                return Ok(());
            }

            let text = String::from_utf8_lossy(&line);
            let request = text.trim_end_matches(['\r', '\n']);

            self.stats.record_request();
            let evaluation = evaluate(request);
            self.stats.record_evaluation(&evaluation);
            summary.record(&evaluation);

            match &evaluation.outcome {
                Ok(value) => debug!("Client {} {:?} = {}", self.client_addr, request, value),
                Err(e) => debug!("Client {} {:?} = ERROR ({})", self.client_addr, request, e),
            }

            writer
                .write_all(evaluation.response_line().as_bytes())
                .await
                .map_err(ConnectionError::Write)?;
            writer.flush().await.map_err(ConnectionError::Write)?;
        }
    }
}
