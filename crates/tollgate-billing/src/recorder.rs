use tokio::sync::mpsc;

use crate::{BillingError, Charge, LedgerClient, UsageLogEntry};

/// Writes the billing debit for a completed request
///
/// The ledger write happens after the upstream call and before the
/// response; its failure is fatal to the request so a charge is never
/// silently lost.
#[derive(Clone, Debug)]
pub struct LedgerRecorder {
    client: LedgerClient,
}

impl LedgerRecorder {
    pub const fn new(client: LedgerClient) -> Self {
        Self { client }
    }

    /// Append the debit entry for a billed request
    ///
    /// # Errors
    ///
    /// Returns `LedgerWriteFailed` when the insert does not succeed; at
    /// that point no credits have been deducted
    pub async fn record_charge(&self, charge: &Charge) -> Result<(), BillingError> {
        self.client
            .insert_ledger_entry(charge)
            .await
            .map_err(BillingError::LedgerWriteFailed)?;

        tracing::debug!(
            account_id = %charge.account_id,
            amount = charge.amount,
            model = %charge.metadata.model,
            "ledger debit recorded"
        );

        Ok(())
    }
}

/// Best-effort usage-log writer that dispatches entries to a background
/// task
///
/// Entries are sent over an unbounded channel and written
/// asynchronously so analytics recording never blocks the response.
/// Failures are logged and dropped; they do not affect billing.
#[derive(Clone)]
pub struct UsageLogRecorder {
    tx: mpsc::UnboundedSender<UsageLogEntry>,
}

impl UsageLogRecorder {
    /// Create a new recorder and spawn its background processing task
    ///
    /// The background task runs until the sender is dropped
    #[must_use]
    pub fn new(client: LedgerClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(process_entries(rx, client));

        Self { tx }
    }

    /// Enqueue a usage-log entry for background recording
    ///
    /// Non-blocking and fire-and-forget. If the channel is closed the
    /// entry is silently dropped.
    pub fn record(&self, entry: UsageLogEntry) {
        if let Err(e) = self.tx.send(entry) {
            tracing::warn!(
                error = %e,
                "failed to enqueue usage-log entry, channel closed"
            );
        }
    }
}

impl std::fmt::Debug for UsageLogRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageLogRecorder").finish_non_exhaustive()
    }
}

/// Background task that writes usage-log entries
async fn process_entries(mut rx: mpsc::UnboundedReceiver<UsageLogEntry>, client: LedgerClient) {
    while let Some(entry) = rx.recv().await {
        if let Err(e) = client.insert_usage_log(&entry).await {
            tracing::warn!(
                error = %e,
                account_id = %entry.account_id,
                modality = %entry.modality,
                "failed to record usage-log entry"
            );
        }
    }

    tracing::debug!("usage-log recorder shutting down");
}
