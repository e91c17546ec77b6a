//! Off-chain client for the colony program.
//!
//! - [`BatchClaimer`] claims earnings for many lands, splitting them into
//!   bundles that each settle as one transaction.
//! - [`address`] derives the program's PDAs.
//! - [`status`] renders accounts into serializable views.
//! - [`LocalLedger`] executes the program's state transitions in memory.

pub mod address;
pub mod batch;
pub mod config;
pub mod simulator;
pub mod status;

pub use batch::{
    BatchClaimResult, BatchClaimer, BatchProgress, BundleSubmitter, ClaimBundle, ClaimProposal, Confirmation,
    LandReader, ReadError, Receipt, SubmitError,
};
pub use config::BatchConfig;
pub use simulator::{LedgerError, LedgerSession, LocalLedger};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("batch {batch_index} cancelled: signer declined")]
    Cancelled { batch_index: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("program error: {0}")]
    Program(#[from] anchor_lang::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
