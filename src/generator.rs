use crate::{config::TxSettings, provider::LoadGenProvider};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use eyre::Result;
use init4_bin_base::deps::{
    metrics::{counter, histogram},
    tracing::{debug, error, info, instrument},
};
use std::{
    future::Future,
    io::Write,
    time::{Duration, Instant},
};
use tokio::time::sleep;

/// Something that can sign and broadcast a transaction request.
pub trait TxSubmitter {
    /// Submit `tx`, returning its hash once the node has accepted it.
    fn submit(&self, tx: TransactionRequest) -> impl Future<Output = Result<TxHash>> + Send;
}

impl TxSubmitter for LoadGenProvider {
    async fn submit(&self, tx: TransactionRequest) -> Result<TxHash> {
        let pending = self.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }
}

/// Build the request every iteration submits. The gas limit is attached
/// later, once estimated.
pub fn build_template(sender: Address, settings: &TxSettings, payload: Bytes) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(sender)
        .with_to(settings.recipient(sender))
        .with_value(settings.value)
        .with_gas_price(settings.gas_price)
        .with_input(payload)
}

/// Facts gathered from the endpoint before the loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preflight {
    /// Chain id reported by the endpoint.
    pub chain_id: u64,
    /// Sender balance, in wei.
    pub balance: U256,
    /// Gas estimate for the template, used as the limit for every submission.
    pub gas_limit: u64,
}

/// Query chain id and balance, then estimate gas for `template` once.
#[instrument(skip_all, fields(sender = %sender))]
pub async fn preflight<P: Provider>(
    provider: &P,
    sender: Address,
    template: &TransactionRequest,
) -> Result<Preflight> {
    let chain_id = provider.get_chain_id().await?;
    let balance = provider.get_balance(sender).await?;
    debug!(chain_id, %balance, "fetched account state");

    let gas_limit = provider.estimate_gas(template.clone()).await?;
    info!(gas_limit, "estimated gas for transaction template");

    Ok(Preflight {
        chain_id,
        balance,
        gas_limit,
    })
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Transactions accepted by the node.
    pub sent: u64,
    /// Submissions that returned an error.
    pub failed: u64,
}

impl RunSummary {
    /// Every submission made, successful or not.
    pub const fn attempts(&self) -> u64 {
        self.sent + self.failed
    }
}

/// Submits the same transaction over and over with a fixed pause.
#[derive(Debug)]
pub struct LoadGenerator<S> {
    submitter: S,
    tx: TransactionRequest,
    delay: Duration,
    limit: Option<u64>,
}

impl<S: TxSubmitter> LoadGenerator<S> {
    /// Create a generator sending `template` with the estimated `gas_limit`.
    pub fn new(submitter: S, template: TransactionRequest, gas_limit: u64, delay: Duration) -> Self {
        Self {
            submitter,
            tx: template.with_gas_limit(gas_limit),
            delay,
            limit: None,
        }
    }

    /// Stop after `limit` submissions instead of running until shut down.
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    fn limit_reached(&self, summary: &RunSummary) -> bool {
        self.limit.is_some_and(|limit| summary.attempts() >= limit)
    }

    /// Submit until `shutdown` resolves or the limit is hit.
    ///
    /// Each accepted transaction is written to `out` as `<n>. <hash>`.
    /// Failures go to stderr and are skipped. The delay applies after every
    /// attempt either way. A submission already in flight when `shutdown`
    /// resolves is awaited and counted before the loop exits.
    pub async fn run<W, F>(&self, out: &mut W, shutdown: F) -> Result<RunSummary>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut summary = RunSummary::default();

        while !self.limit_reached(&summary) {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = std::future::ready(()) => {}
            }

            // an in-flight submission always completes; shutdown is only
            // observed between attempts
            let start = Instant::now();
            match self.submitter.submit(self.tx.clone()).await {
                Ok(tx_hash) => {
                    summary.sent += 1;
                    counter!("tx_load_gen.tx_sent").increment(1);
                    histogram!("tx_load_gen.send_time_ms")
                        .record(start.elapsed().as_millis() as f64);
                    debug!(%tx_hash, n = summary.sent, "transaction sent");
                    writeln!(out, "{}. {tx_hash}", summary.sent)?;
                }
                Err(e) => {
                    summary.failed += 1;
                    counter!("tx_load_gen.tx_failed").increment(1);
                    error!(error = %e, "failed to send transaction");
                    eprintln!("❌ TX Error: {e}");
                }
            }

            if self.limit_reached(&summary) {
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = sleep(self.delay) => {}
            }
        }

        info!(sent = summary.sent, failed = summary.failed, "load generation stopped");
        Ok(summary)
    }
}
