//! In-memory colony ledger.
//!
//! [`LocalLedger`] runs the program's state transitions (the same
//! `GameState` / `LandData` / `UserProfile` methods the instruction handlers
//! call) against plain maps. Every operation works on a copy of the accounts
//! and commits only if it succeeds, and a submitted [`ClaimBundle`] commits
//! or fails as a whole, like a transaction.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use colony::{
    validate_balance, validate_land_id, ColonyError, GameState, LandData, UpgradeReceipt, UserProfile,
    LAND_PRICE_TOKENS, MINING_START_TIME,
};
use thiserror::Error;
use tracing::debug;

use crate::address;
use crate::batch::{BundleSubmitter, ClaimBundle, ClaimProposal, Confirmation, LandReader, ReadError, Receipt, SubmitError};
use crate::config::MAX_COMPUTE_UNITS;
use crate::status::{GameStatus, LandStatus, UserStatus};

/// Compute units one claim instruction consumes locally.
pub const CLAIM_COMPUTE_UNITS: u32 = 100_000;

#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error(transparent)]
    Program(#[from] anchor_lang::error::Error),
    #[error("account already in use")]
    AccountInUse,
    #[error("account not found")]
    AccountNotFound,
    #[error("compute budget exceeded: {used} > {limit}")]
    ComputeBudgetExceeded { used: u32, limit: u32 },
}

impl From<ColonyError> for LedgerError {
    fn from(err: ColonyError) -> Self {
        Self::Program(err.into())
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ════════════════════════════════════════════════════════════════════════════════
// ACCOUNTS
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
struct Accounts {
    game: Option<GameState>,
    lands: BTreeMap<u16, LandData>,
    profiles: HashMap<Pubkey, UserProfile>,
    /// Token balances keyed by (mint, owner).
    balances: HashMap<(Pubkey, Pubkey), u64>,
    /// Token vault of the current mint.
    vault: u64,
}

impl Accounts {
    fn game(&self) -> LedgerResult<&GameState> {
        self.game.as_ref().ok_or(LedgerError::AccountNotFound)
    }

    fn game_mut(&mut self) -> LedgerResult<&mut GameState> {
        self.game.as_mut().ok_or(LedgerError::AccountNotFound)
    }

    fn balance(&self, owner: &Pubkey) -> u64 {
        self.game
            .as_ref()
            .and_then(|game| self.balances.get(&(game.token_mint, *owner)))
            .copied()
            .unwrap_or(0)
    }

    fn credit(&mut self, owner: &Pubkey, amount: u64) -> LedgerResult<()> {
        let mint = self.game()?.token_mint;
        let balance = self.balances.entry((mint, *owner)).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(ColonyError::Overflow)?;
        Ok(())
    }

    fn burn(&mut self, owner: &Pubkey, amount: u64) -> LedgerResult<()> {
        let mint = self.game()?.token_mint;
        let balance = self.balances.entry((mint, *owner)).or_insert(0);
        validate_balance(*balance, amount)?;
        *balance -= amount;
        Ok(())
    }

    fn buy_land(&mut self, program_id: &Pubkey, buyer: Pubkey, land_id: u16, now: i64) -> LedgerResult<()> {
        validate_land_id(land_id)?;
        self.game()?.ensure_active()?;
        if self.lands.contains_key(&land_id) {
            return Err(LedgerError::AccountInUse);
        }

        let (_, profile_bump) = address::user_profile(program_id, &buyer);
        let mut profile = self.profiles.get(&buyer).cloned().unwrap_or_default();
        profile.register_land(buyer, profile_bump)?;

        self.burn(&buyer, LAND_PRICE_TOKENS)?;
        profile.token_balance = self.balance(&buyer);

        let (_, land_bump) = address::land_data(program_id, land_id);
        let land = LandData::new(land_id, buyer, now, land_bump)?;
        self.game_mut()?.record_land_sold()?;

        self.profiles.insert(buyer, profile);
        self.lands.insert(land_id, land);
        Ok(())
    }

    fn claim_earnings(&mut self, caller: Pubkey, land_id: u16, now: i64) -> LedgerResult<u64> {
        validate_land_id(land_id)?;
        let vault = self.vault;
        let land = self.lands.get_mut(&land_id).ok_or(LedgerError::AccountNotFound)?;
        let earnings = land.settle_claim(&caller, now, vault)?;

        self.vault = vault.checked_sub(earnings).ok_or(ColonyError::InsufficientTreasury)?;
        self.credit(&caller, earnings)?;
        Ok(earnings)
    }

    fn upgrade_land(&mut self, caller: Pubkey, land_id: u16, now: i64) -> LedgerResult<UpgradeReceipt> {
        validate_land_id(land_id)?;
        let balance = self.balance(&caller);
        let land = self.lands.get_mut(&land_id).ok_or(LedgerError::AccountNotFound)?;
        let receipt = land.apply_upgrade(&caller, now, balance)?;

        self.burn(&caller, receipt.cost)?;
        Ok(receipt)
    }

    fn close_land(&mut self, authority: Pubkey, land_id: u16, now: i64) -> LedgerResult<u64> {
        self.game()?.ensure_authority(&authority)?;
        let land = self.lands.remove(&land_id).ok_or(LedgerError::AccountNotFound)?;
        let forfeited = land.pending_earnings(now)?;

        self.profiles
            .get_mut(&land.owner)
            .ok_or(LedgerError::AccountNotFound)?
            .release_land()?;
        self.game_mut()?.record_land_closed()?;
        Ok(forfeited)
    }

    fn close_user_profile(&mut self, authority: Pubkey, owner: Pubkey) -> LedgerResult<()> {
        self.game()?.ensure_authority(&authority)?;
        self.profiles
            .get(&owner)
            .ok_or(LedgerError::AccountNotFound)?
            .ensure_empty()?;
        self.profiles.remove(&owner);
        Ok(())
    }

    fn withdraw_tokens(&mut self, authority: Pubkey) -> LedgerResult<u64> {
        self.game()?.ensure_authority(&authority)?;
        let amount = self.vault;
        if amount == 0 {
            return Err(ColonyError::InsufficientBalance.into());
        }
        self.vault = 0;
        self.credit(&authority, amount)?;
        Ok(amount)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// LEDGER
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct BundleLog {
    submitted: Vec<Vec<u16>>,
    confirmations: HashMap<Receipt, Confirmation>,
}

#[derive(Default)]
struct Faults {
    declined: HashSet<usize>,
    rejected: HashMap<usize, String>,
    withheld: HashSet<usize>,
    unbuildable: HashSet<u16>,
    unreadable: HashSet<u16>,
}

pub struct LocalLedger {
    program_id: Pubkey,
    accounts: Mutex<Accounts>,
    clock: AtomicI64,
    bundles: Mutex<BundleLog>,
    faults: Mutex<Faults>,
}

impl Default for LocalLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalLedger {
    /// Empty ledger for the colony program, clock at mining start.
    pub fn new() -> Self {
        Self {
            program_id: colony::ID,
            accounts: Mutex::new(Accounts::default()),
            clock: AtomicI64::new(MINING_START_TIME),
            bundles: Mutex::new(BundleLog::default()),
            faults: Mutex::new(Faults::default()),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn now(&self) -> i64 {
        self.clock.load(Ordering::SeqCst)
    }

    pub fn set_time(&self, unix_timestamp: i64) {
        self.clock.store(unix_timestamp, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.clock.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Run `op` on a working copy; commit only on success.
    fn transact<T>(&self, op: impl FnOnce(&mut Accounts, i64) -> LedgerResult<T>) -> LedgerResult<T> {
        let now = self.now();
        let mut accounts = lock(&self.accounts);
        let mut working = accounts.clone();
        let value = op(&mut working, now)?;
        *accounts = working;
        Ok(value)
    }

    // ─── operations ───────────────────────────────────────────────────────────

    pub fn initialize(&self, authority: Pubkey) -> LedgerResult<()> {
        let program_id = self.program_id;
        self.transact(|accounts, _| {
            if accounts.game.is_some() {
                return Err(LedgerError::AccountInUse);
            }
            let (_, bump) = address::game_state(&program_id);
            let (_, vault_bump) = address::sol_vault(&program_id);
            accounts.game = Some(GameState::new(authority, bump, vault_bump));
            Ok(())
        })
    }

    /// Credit `amount` of the current mint to `owner`.
    pub fn mint_to(&self, owner: Pubkey, amount: u64) -> LedgerResult<()> {
        self.transact(|accounts, _| accounts.credit(&owner, amount))
    }

    /// Deposit `amount` into the token vault.
    pub fn fund_vault(&self, amount: u64) -> LedgerResult<()> {
        self.transact(|accounts, _| {
            accounts.vault = accounts.vault.checked_add(amount).ok_or(ColonyError::Overflow)?;
            Ok(())
        })
    }

    pub fn buy_land(&self, buyer: Pubkey, land_id: u16) -> LedgerResult<()> {
        let program_id = self.program_id;
        self.transact(|accounts, now| accounts.buy_land(&program_id, buyer, land_id, now))
    }

    pub fn claim_earnings(&self, caller: Pubkey, land_id: u16) -> LedgerResult<u64> {
        self.transact(|accounts, now| accounts.claim_earnings(caller, land_id, now))
    }

    pub fn upgrade_land(&self, caller: Pubkey, land_id: u16) -> LedgerResult<UpgradeReceipt> {
        self.transact(|accounts, now| accounts.upgrade_land(caller, land_id, now))
    }

    /// Returns the forfeited pending earnings.
    pub fn admin_close_land(&self, authority: Pubkey, land_id: u16) -> LedgerResult<u64> {
        self.transact(|accounts, now| accounts.close_land(authority, land_id, now))
    }

    pub fn admin_close_user_profile(&self, authority: Pubkey, owner: Pubkey) -> LedgerResult<()> {
        self.transact(|accounts, _| accounts.close_user_profile(authority, owner))
    }

    pub fn set_game_active(&self, authority: Pubkey, is_active: bool) -> LedgerResult<()> {
        self.transact(|accounts, _| Ok(accounts.game_mut()?.set_active(&authority, is_active)?))
    }

    pub fn set_token_mint(&self, authority: Pubkey, mint: Pubkey) -> LedgerResult<()> {
        self.transact(|accounts, _| Ok(accounts.game_mut()?.set_token_mint(&authority, mint)?))
    }

    pub fn withdraw_tokens(&self, authority: Pubkey) -> LedgerResult<u64> {
        self.transact(|accounts, _| accounts.withdraw_tokens(authority))
    }

    /// Apply every claim of a bundle as a single transaction.
    fn execute_bundle(&self, signer: Pubkey, bundle: &ClaimBundle) -> LedgerResult<u64> {
        let used = CLAIM_COMPUTE_UNITS.saturating_mul(bundle.claims.len() as u32);
        if used > bundle.compute_unit_limit {
            return Err(LedgerError::ComputeBudgetExceeded {
                used,
                limit: bundle.compute_unit_limit,
            });
        }

        let program_id = self.program_id;
        self.transact(|accounts, now| {
            let mut total = 0u64;
            for claim in &bundle.claims {
                if claim.land_data != address::land_data(&program_id, claim.land_id).0 {
                    return Err(LedgerError::AccountNotFound);
                }
                let earnings = accounts.claim_earnings(signer, claim.land_id, now)?;
                total = total.checked_add(earnings).ok_or(ColonyError::Overflow)?;
            }
            Ok(total)
        })
    }

    // ─── views ────────────────────────────────────────────────────────────────

    pub fn game_state(&self) -> Option<GameState> {
        lock(&self.accounts).game.clone()
    }

    pub fn land(&self, land_id: u16) -> Option<LandData> {
        lock(&self.accounts).lands.get(&land_id).cloned()
    }

    pub fn lands(&self) -> Vec<LandData> {
        lock(&self.accounts).lands.values().cloned().collect()
    }

    pub fn profile(&self, owner: &Pubkey) -> Option<UserProfile> {
        lock(&self.accounts).profiles.get(owner).cloned()
    }

    pub fn balance(&self, owner: &Pubkey) -> u64 {
        lock(&self.accounts).balance(owner)
    }

    pub fn vault_balance(&self) -> u64 {
        lock(&self.accounts).vault
    }

    pub fn game_status(&self) -> Option<GameStatus> {
        self.game_state().as_ref().map(GameStatus::from)
    }

    pub fn land_status(&self, land_id: u16) -> crate::Result<Option<LandStatus>> {
        self.land(land_id)
            .map(|land| LandStatus::at(&land, self.now()))
            .transpose()
    }

    pub fn user_status(&self, owner: &Pubkey) -> crate::Result<UserStatus> {
        let accounts = lock(&self.accounts);
        UserStatus::collect(owner, accounts.profiles.get(owner), accounts.lands.values(), self.now())
    }

    /// Land ids of every bundle submitted so far, in submission order.
    pub fn submitted_bundles(&self) -> Vec<Vec<u16>> {
        lock(&self.bundles).submitted.clone()
    }

    // ─── fault injection ──────────────────────────────────────────────────────

    /// The signer refuses bundle `index`.
    pub fn decline_bundle(&self, index: usize) {
        lock(&self.faults).declined.insert(index);
    }

    /// Bundle `index` is refused at submission with `reason`.
    pub fn reject_bundle(&self, index: usize, reason: impl Into<String>) {
        lock(&self.faults).rejected.insert(index, reason.into());
    }

    /// Bundle `index` executes but its confirmation never arrives.
    pub fn withhold_confirmation(&self, index: usize) {
        lock(&self.faults).withheld.insert(index);
    }

    pub fn fail_build_for(&self, land_id: u16) {
        lock(&self.faults).unbuildable.insert(land_id);
    }

    pub fn fail_read_for(&self, land_id: u16) {
        lock(&self.faults).unreadable.insert(land_id);
    }

    /// Client view of the ledger signing as `signer`.
    pub fn session(self: &Arc<Self>, signer: Pubkey) -> LedgerSession {
        LedgerSession {
            ledger: Arc::clone(self),
            signer,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// SESSION
// ════════════════════════════════════════════════════════════════════════════════

/// A wallet connected to a [`LocalLedger`].
#[derive(Clone)]
pub struct LedgerSession {
    ledger: Arc<LocalLedger>,
    signer: Pubkey,
}

impl LedgerSession {
    pub fn signer(&self) -> Pubkey {
        self.signer
    }

    pub fn ledger(&self) -> &LocalLedger {
        &self.ledger
    }
}

#[async_trait]
impl LandReader for LedgerSession {
    async fn pending_earnings(&self, land_id: u16) -> std::result::Result<u64, ReadError> {
        if lock(&self.ledger.faults).unreadable.contains(&land_id) {
            return Err(ReadError::Backend(format!("land #{land_id} unavailable")));
        }
        let land = self.ledger.land(land_id).ok_or(ReadError::NotFound(land_id))?;
        land.pending_earnings(self.ledger.now())
            .map_err(|err| ReadError::Backend(err.to_string()))
    }

    async fn build_claim(&self, land_id: u16) -> std::result::Result<ClaimProposal, ReadError> {
        if lock(&self.ledger.faults).unbuildable.contains(&land_id) {
            return Err(ReadError::Backend(format!("cannot build claim for land #{land_id}")));
        }
        if self.ledger.land(land_id).is_none() {
            return Err(ReadError::NotFound(land_id));
        }
        Ok(ClaimProposal {
            land_id,
            land_data: address::land_data(&self.ledger.program_id, land_id).0,
            owner: self.signer,
        })
    }
}

#[async_trait]
impl BundleSubmitter for LedgerSession {
    async fn submit(&self, bundle: &ClaimBundle) -> std::result::Result<Receipt, SubmitError> {
        let withheld = {
            let faults = lock(&self.ledger.faults);
            if faults.declined.contains(&bundle.index) {
                return Err(SubmitError::Declined);
            }
            if let Some(reason) = faults.rejected.get(&bundle.index) {
                return Err(SubmitError::Rejected(reason.clone()));
            }
            faults.withheld.contains(&bundle.index)
        };
        if bundle.compute_unit_limit > MAX_COMPUTE_UNITS {
            return Err(SubmitError::Rejected(format!(
                "compute unit limit {} above {MAX_COMPUTE_UNITS}",
                bundle.compute_unit_limit
            )));
        }

        let outcome = self.ledger.execute_bundle(self.signer, bundle);
        let confirmation = match outcome {
            Ok(total) => {
                debug!(index = bundle.index, total, "bundle executed");
                Confirmation::Confirmed
            }
            Err(err) => {
                debug!(index = bundle.index, %err, "bundle failed");
                Confirmation::Failed(err.to_string())
            }
        };

        let mut log = lock(&self.ledger.bundles);
        log.submitted.push(bundle.land_ids());
        let receipt = Receipt(format!("local-{}", log.submitted.len()));
        let visible = if withheld { Confirmation::Pending } else { confirmation };
        log.confirmations.insert(receipt.clone(), visible);
        Ok(receipt)
    }

    async fn confirmation(&self, receipt: &Receipt) -> std::result::Result<Confirmation, ReadError> {
        lock(&self.ledger.bundles)
            .confirmations
            .get(receipt)
            .cloned()
            .ok_or_else(|| ReadError::Backend(format!("unknown receipt {receipt}")))
    }
}
