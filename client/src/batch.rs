//! Batched earnings claims.
//!
//! Claiming one land is one program instruction, and one transaction fits
//! at most [`MAX_CLAIMS_PER_BUNDLE`](crate::config::MAX_CLAIMS_PER_BUNDLE)
//! of them under the compute ceiling. [`BatchClaimer`] runs in two phases:
//!
//! ```text
//! land ids
//!    │
//!    ▼ (1) snapshot: pending_earnings() fan-out, bounded, joined
//!    │
//!    ▼ (2) chunks of <= max_claims_per_bundle, one at a time:
//!    │        build_claim() per id ── error ─→ id failed
//!    │        submit(bundle)
//!    │          ├─ Declined ─────────────→ Err(Cancelled), stop
//!    │          ├─ Rejected ─────────────→ batch failed
//!    │          └─ Receipt → poll confirmation until timeout
//!    │                 ├─ Confirmed ─────→ batch succeeded
//!    │                 └─ Failed/timeout →  batch failed
//!    ▼
//! BatchClaimResult
//! ```
//!
//! The snapshot is taken before any claim lands because a confirmed claim
//! zeroes the land's pending amount on-chain.

use std::collections::{HashMap, HashSet};
use std::fmt;

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::BatchConfig;
use crate::{Error, Result};

// ════════════════════════════════════════════════════════════════════════════════
// TYPES
// ════════════════════════════════════════════════════════════════════════════════

/// One `claim_earnings` instruction, ready to be bundled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimProposal {
    pub land_id: u16,
    /// LandData PDA of `land_id`.
    pub land_data: Pubkey,
    /// Signer claiming the earnings.
    pub owner: Pubkey,
}

/// One transaction worth of claims.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimBundle {
    /// Position of this bundle in the batch sequence.
    pub index: usize,
    pub claims: Vec<ClaimProposal>,
    pub compute_unit_limit: u32,
}

impl ClaimBundle {
    pub fn land_ids(&self) -> Vec<u16> {
        self.claims.iter().map(|claim| claim.land_id).collect()
    }
}

/// Opaque submission handle (a transaction signature on a real cluster).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Receipt(pub String);

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Polled status of a submitted bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Pending,
    Confirmed,
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The signer refused to authorize the bundle.
    #[error("submission declined by signer")]
    Declined,
    #[error("submission rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("land #{0} not found")]
    NotFound(u16),
    #[error("read failed: {0}")]
    Backend(String),
}

/// Progress after each batch, for UIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchProgress {
    pub batch_index: usize,
    pub total_batches: usize,
    pub lands_processed: usize,
    pub total_lands: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchClaimResult {
    /// Lands whose bundle confirmed, in request order.
    pub successful: Vec<u16>,
    /// Lands that must be retried, in request order.
    pub failed: Vec<u16>,
    /// Sum of snapshot amounts over `successful`.
    pub total_claimed: u64,
    /// Receipts of confirmed bundles.
    pub receipts: Vec<Receipt>,
    /// Receipts that never confirmed within the timeout. Their lands are
    /// reported failed even though the bundle may still have landed.
    pub unconfirmed: Vec<Receipt>,
}

// ════════════════════════════════════════════════════════════════════════════════
// TRANSPORT TRAITS
// ════════════════════════════════════════════════════════════════════════════════

/// Read access to land accounts.
#[async_trait]
pub trait LandReader: Send + Sync {
    /// Pending earnings of a land right now.
    async fn pending_earnings(&self, land_id: u16) -> std::result::Result<u64, ReadError>;

    /// Build the claim instruction for a land.
    async fn build_claim(&self, land_id: u16) -> std::result::Result<ClaimProposal, ReadError>;
}

/// Signs, sends and tracks bundles.
///
/// Implementations MUST return [`SubmitError::Declined`] only when the
/// signer refused, never for processing errors.
#[async_trait]
pub trait BundleSubmitter: Send + Sync {
    async fn submit(&self, bundle: &ClaimBundle) -> std::result::Result<Receipt, SubmitError>;

    async fn confirmation(&self, receipt: &Receipt) -> std::result::Result<Confirmation, ReadError>;
}

// ════════════════════════════════════════════════════════════════════════════════
// ORCHESTRATOR
// ════════════════════════════════════════════════════════════════════════════════

enum BundleOutcome {
    Confirmed(Receipt),
    Failed(String),
    TimedOut(Receipt),
}

type ProgressFn = Box<dyn Fn(BatchProgress) + Send + Sync>;

pub struct BatchClaimer<R, S> {
    reader: R,
    submitter: S,
    config: BatchConfig,
    on_progress: Option<ProgressFn>,
}

impl<R: LandReader, S: BundleSubmitter> BatchClaimer<R, S> {
    pub fn new(reader: R, submitter: S, config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            submitter,
            config,
            on_progress: None,
        })
    }

    /// Report [`BatchProgress`] after every batch.
    pub fn with_progress(mut self, on_progress: impl Fn(BatchProgress) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Claim every land in `land_ids`, bundle by bundle.
    ///
    /// Each distinct id ends in exactly one of `successful` / `failed`.
    /// Returns [`Error::Cancelled`] as soon as the signer declines a bundle;
    /// earlier confirmed bundles stay applied.
    pub async fn claim_all(&self, land_ids: &[u16]) -> Result<BatchClaimResult> {
        let land_ids = dedup_preserving_order(land_ids);
        let snapshot = self.snapshot(&land_ids).await;

        let batches: Vec<&[u16]> = land_ids.chunks(self.config.max_claims_per_bundle).collect();
        let total_batches = batches.len();
        let mut succeeded: HashSet<u16> = HashSet::new();
        let mut receipts = Vec::new();
        let mut unconfirmed = Vec::new();
        let mut lands_processed = 0;

        for (batch_index, batch) in batches.into_iter().enumerate() {
            let mut claims = Vec::with_capacity(batch.len());
            for &land_id in batch {
                match self.reader.build_claim(land_id).await {
                    Ok(claim) => claims.push(claim),
                    Err(err) => warn!(land_id, %err, "failed to build claim"),
                }
            }

            if claims.is_empty() {
                debug!(batch_index, "no buildable claims, skipping batch");
            } else {
                let bundle = ClaimBundle {
                    index: batch_index,
                    compute_unit_limit: self.config.compute_budget(claims.len()),
                    claims,
                };

                match self.submit_bundle(&bundle).await? {
                    BundleOutcome::Confirmed(receipt) => {
                        debug!(batch_index, %receipt, claims = bundle.claims.len(), "batch confirmed");
                        succeeded.extend(bundle.claims.iter().map(|claim| claim.land_id));
                        receipts.push(receipt);
                    }
                    BundleOutcome::Failed(reason) => {
                        warn!(batch_index, %reason, "batch failed");
                    }
                    BundleOutcome::TimedOut(receipt) => {
                        warn!(batch_index, %receipt, "batch confirmation timed out");
                        unconfirmed.push(receipt);
                    }
                }
            }

            lands_processed += batch.len();
            if let Some(on_progress) = &self.on_progress {
                on_progress(BatchProgress {
                    batch_index,
                    total_batches,
                    lands_processed,
                    total_lands: land_ids.len(),
                });
            }
        }

        let (successful, failed): (Vec<u16>, Vec<u16>) =
            land_ids.iter().copied().partition(|land_id| succeeded.contains(land_id));
        let total_claimed = successful
            .iter()
            .map(|land_id| snapshot.get(land_id).copied().unwrap_or(0))
            .fold(0u64, u64::saturating_add);

        info!(
            successful = successful.len(),
            failed = failed.len(),
            total_claimed,
            "batch claim finished"
        );

        Ok(BatchClaimResult {
            successful,
            failed,
            total_claimed,
            receipts,
            unconfirmed,
        })
    }

    /// Pending amount per land before any claim is sent. Unreadable lands
    /// are recorded as zero.
    async fn snapshot(&self, land_ids: &[u16]) -> HashMap<u16, u64> {
        stream::iter(land_ids.iter().copied())
            .map(|land_id| async move {
                let pending = match self.reader.pending_earnings(land_id).await {
                    Ok(pending) => pending,
                    Err(err) => {
                        warn!(land_id, %err, "failed to read pending earnings");
                        0
                    }
                };
                (land_id, pending)
            })
            .buffer_unordered(self.config.snapshot_concurrency)
            .collect()
            .await
    }

    async fn submit_bundle(&self, bundle: &ClaimBundle) -> Result<BundleOutcome> {
        let receipt = match self.submitter.submit(bundle).await {
            Ok(receipt) => receipt,
            Err(SubmitError::Declined) => {
                warn!(batch_index = bundle.index, "signer declined, cancelling remaining batches");
                return Err(Error::Cancelled {
                    batch_index: bundle.index,
                });
            }
            Err(SubmitError::Rejected(reason)) => return Ok(BundleOutcome::Failed(reason)),
        };

        let outcome = tokio::time::timeout(self.config.confirmation_timeout(), self.poll(&receipt)).await;
        Ok(match outcome {
            Ok(Ok(())) => BundleOutcome::Confirmed(receipt),
            Ok(Err(reason)) => BundleOutcome::Failed(reason),
            Err(_) => BundleOutcome::TimedOut(receipt),
        })
    }

    /// Poll until the bundle settles. Read errors are retried until the
    /// caller's timeout fires.
    async fn poll(&self, receipt: &Receipt) -> std::result::Result<(), String> {
        loop {
            match self.submitter.confirmation(receipt).await {
                Ok(Confirmation::Confirmed) => return Ok(()),
                Ok(Confirmation::Failed(reason)) => return Err(reason),
                Ok(Confirmation::Pending) => {}
                Err(err) => debug!(%receipt, %err, "confirmation read failed"),
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }
}

fn dedup_preserving_order(land_ids: &[u16]) -> Vec<u16> {
    let mut seen = HashSet::with_capacity(land_ids.len());
    land_ids.iter().copied().filter(|land_id| seen.insert(*land_id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(dedup_preserving_order(&[5, 3, 5, 1, 3]), vec![5, 3, 1]);
        assert!(dedup_preserving_order(&[]).is_empty());
    }

    #[test]
    fn test_bundle_land_ids() {
        let owner = Pubkey::new_unique();
        let bundle = ClaimBundle {
            index: 0,
            claims: [4u16, 9]
                .iter()
                .map(|&land_id| ClaimProposal {
                    land_id,
                    land_data: Pubkey::new_unique(),
                    owner,
                })
                .collect(),
            compute_unit_limit: 1,
        };
        assert_eq!(bundle.land_ids(), vec![4, 9]);
    }
}
