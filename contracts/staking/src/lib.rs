#![no_std]

pub mod accrual;
pub mod events;
pub mod reserve;
pub mod tiers;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

use tiers::Tier;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const TIERS: Symbol = symbol_short!("TIERS");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const TOTAL_PAID: Symbol = symbol_short!("TOT_PAID");

// Per-account persistent storage uses tuple keys:  (prefix, account_address)
const ACCOUNT: Symbol = symbol_short!("ACCT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientPrincipal = 5,
    InvalidScheduleOrder = 6,
    InvalidTierIndex = 7,
    InsufficientReserve = 8,
    TransferFailed = 9,
    ClockRegression = 10,
    TokensIdentical = 11,
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Per-account ledger record.
///
/// Implicitly all-zero before the account's first interaction and never
/// deleted afterwards; `principal` can return to zero but
/// `cumulative_reward` only ever grows.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub principal: i128,
    pub last_accrual_time: u64,
    pub cumulative_reward: i128,
}

/// Snapshot of a staking position returned by `get_position`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PositionInfo {
    pub principal: i128,
    pub tier: u32,
    pub annual_rate: u32,
    pub pending_reward: i128,
    pub cumulative_reward: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `admin`        – the only identity allowed to replace the tier schedule.
    /// * `stake_token`  – SAC address of the token users lock.
    /// * `reward_token` – SAC address of the token paid out as rewards.
    ///
    /// The tier schedule starts empty, so every account sits in tier 0
    /// (rate 0) until the admin calls `configure_tiers`.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        // TIERS, TOTAL_STAKED, and TOTAL_PAID start empty/zero;
        // unwrap_or handles absent keys, so no explicit init needed.

        events::publish_initialized(&env, admin, stake_token, reward_token);

        Ok(())
    }

    // ── Tier schedule ───────────────────────────────────────────────────────

    /// Replace the tier schedule wholesale.
    ///
    /// Thresholds must be strictly ascending (and the lowest positive) or
    /// the call fails with `InvalidScheduleOrder`. Only the admin may call
    /// this. The new schedule takes effect immediately for every account,
    /// including intervals already elapsed: there is no forced accrual
    /// checkpoint at the moment of replacement.
    pub fn configure_tiers(
        env: Env,
        caller: Address,
        schedule: Vec<Tier>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        tiers::validate(&schedule)?;

        env.storage().instance().set(&TIERS, &schedule);

        events::publish_tiers_configured(&env, schedule.len());

        Ok(())
    }

    // ── Deposit ─────────────────────────────────────────────────────────────

    /// Lock `amount` stake tokens and settle the reward owed so far.
    ///
    /// The accrual for the elapsed interval is computed at the tier the
    /// account held *before* this deposit, so pushing the balance into a
    /// higher tier never applies the higher rate retroactively. Returns the
    /// reward paid out.
    pub fn deposit(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // 1. Settle rewards for the pre-deposit principal at its old tier.
        let mut account = Self::load_account(&env, &staker);
        let reward_paid = Self::settle_reward(&env, &staker, &mut account)?;

        // 2. Pull the stake from the depositor into the contract.
        let stake_token = Self::stake_token(&env)?;
        match token::Client::new(&env, &stake_token).try_transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        ) {
            Ok(Ok(())) => {}
            _ => return Err(ContractError::TransferFailed),
        }

        // 3. Apply the new principal and update the global total.
        account.principal = account.principal.saturating_add(amount);
        Self::store_account(&env, &staker, &account);

        let prev_total: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
        let new_total = prev_total.saturating_add(amount);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        events::publish_deposited(
            &env,
            staker,
            amount,
            reward_paid,
            account.principal,
            new_total,
        );

        Ok(reward_paid)
    }

    // ── Withdraw / claim ────────────────────────────────────────────────────

    /// Return `amount` stake tokens and settle the reward owed so far.
    ///
    /// `amount == 0` is a valid claim-only call: it pays the accrued reward
    /// and resets the accrual clock without moving any stake. There is no
    /// separate claim entry point. The accrual uses the tier the account
    /// held *before* the withdrawal, so dropping to a lower tier never
    /// penalizes time already elapsed. Returns the reward paid out.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut account = Self::load_account(&env, &staker);
        if amount > account.principal {
            return Err(ContractError::InsufficientPrincipal);
        }

        // 1. Settle rewards for the pre-withdrawal principal at its old tier.
        let reward_paid = Self::settle_reward(&env, &staker, &mut account)?;

        // 2. Return the requested stake, if any.
        if amount > 0 {
            let stake_token = Self::stake_token(&env)?;
            match token::Client::new(&env, &stake_token).try_transfer(
                &env.current_contract_address(),
                &staker,
                &amount,
            ) {
                Ok(Ok(())) => {}
                _ => return Err(ContractError::TransferFailed),
            }

            account.principal = account.principal.saturating_sub(amount);

            let prev_total: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
            env.storage()
                .instance()
                .set(&TOTAL_STAKED, &prev_total.saturating_sub(amount));
        }

        Self::store_account(&env, &staker, &account);

        let new_total: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
        events::publish_withdrawn(
            &env,
            staker,
            amount,
            reward_paid,
            account.principal,
            new_total,
        );

        Ok(reward_paid)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Current tier index for an account (0 = below the lowest threshold).
    pub fn current_tier(env: Env, id: Address) -> u32 {
        let schedule = Self::schedule(&env);
        let account = Self::load_account(&env, &id);
        tiers::tier_of(&schedule, account.principal)
    }

    /// Current annual rate (percent) for an account.
    pub fn current_rate(env: Env, id: Address) -> u32 {
        let schedule = Self::schedule(&env);
        let account = Self::load_account(&env, &id);
        let tier = tiers::tier_of(&schedule, account.principal);
        // tier_of output is always a valid index for its schedule
        tiers::rate_of(&schedule, tier).unwrap_or(0)
    }

    /// Annual rate (percent) configured for a tier index.
    pub fn tier_rate(env: Env, index: u32) -> Result<u32, ContractError> {
        tiers::rate_of(&Self::schedule(&env), index)
    }

    /// Reward the account would receive from `withdraw(0)` right now.
    ///
    /// Read-only projection of the same formula the mutating path uses, so
    /// the displayed value matches an immediate claim exactly.
    pub fn pending_reward(env: Env, id: Address) -> Result<i128, ContractError> {
        let account = Self::load_account(&env, &id);
        Self::accrued_since(&env, &account)
    }

    /// Lifetime total reward ever credited to an account.
    pub fn cumulative_reward_issued(env: Env, id: Address) -> i128 {
        Self::load_account(&env, &id).cumulative_reward
    }

    /// Currently staked amount for an account.
    pub fn get_principal(env: Env, id: Address) -> i128 {
        Self::load_account(&env, &id).principal
    }

    /// Combined position snapshot for an account.
    ///
    /// Reads the account record once instead of once per field.
    pub fn get_position(env: Env, id: Address) -> Result<PositionInfo, ContractError> {
        let schedule = Self::schedule(&env);
        let account = Self::load_account(&env, &id);

        let tier = tiers::tier_of(&schedule, account.principal);
        let annual_rate = tiers::rate_of(&schedule, tier)?;
        let pending_reward = Self::accrued_since(&env, &account)?;

        Ok(PositionInfo {
            principal: account.principal,
            tier,
            annual_rate,
            pending_reward,
            cumulative_reward: account.cumulative_reward,
        })
    }

    /// The currently configured tier schedule (empty until configured).
    pub fn get_tiers(env: Env) -> Vec<Tier> {
        Self::schedule(&env)
    }

    /// Reward tokens held by the contract and available to pay out.
    pub fn reserve_balance(env: Env) -> Result<i128, ContractError> {
        let reward_token = Self::reward_token(&env)?;
        Ok(reserve::available(&env, &reward_token))
    }

    /// Sum of all currently staked tokens.
    pub fn total_staked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    /// Lifetime sum of all rewards ever paid out.
    pub fn total_reward_paid(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_PAID).unwrap_or(0)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin. The proposed address must call `accept_admin`
    /// to complete the handover.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept a pending admin transfer. Only the proposed address may call.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::Unauthorized)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin may call.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::Unauthorized)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    /// The pending admin address, if a transfer is in flight.
    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn schedule(env: &Env) -> Vec<Tier> {
        env.storage()
            .instance()
            .get(&TIERS)
            .unwrap_or(Vec::new(env))
    }

    fn stake_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn reward_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_account(env: &Env, id: &Address) -> Account {
        let key = (ACCOUNT, id.clone());
        match env.storage().persistent().get(&key) {
            Some(account) => {
                env.storage()
                    .persistent()
                    .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
                account
            }
            None => Account {
                principal: 0,
                last_accrual_time: 0,
                cumulative_reward: 0,
            },
        }
    }

    fn store_account(env: &Env, id: &Address, account: &Account) {
        let key = (ACCOUNT, id.clone());
        env.storage().persistent().set(&key, account);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    /// Reward owed for the interval since the account was last touched,
    /// computed with the principal and tier as they stood during that
    /// interval (never the post-mutation values).
    fn accrued_since(env: &Env, account: &Account) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();
        if now < account.last_accrual_time {
            // A backwards clock is environment corruption, not a zero-reward
            // interval; it must never be silently clamped.
            return Err(ContractError::ClockRegression);
        }

        let schedule = Self::schedule(env);
        let tier = tiers::tier_of(&schedule, account.principal);
        let rate = tiers::rate_of(&schedule, tier)?;

        Ok(accrual::accrue(
            account.principal,
            rate,
            now - account.last_accrual_time,
        ))
    }

    /// Accrue, authorize against the reserve, and pay out in one step.
    ///
    /// Mutates `account` in memory only (cumulative total and accrual
    /// clock); the caller persists it after applying its own balance
    /// change. Any error here aborts the whole invocation, so a partial
    /// accrual is never observable.
    fn settle_reward(
        env: &Env,
        beneficiary: &Address,
        account: &mut Account,
    ) -> Result<i128, ContractError> {
        let owed = Self::accrued_since(env, account)?;

        let reward_token = Self::reward_token(env)?;
        reserve::pay(env, &reward_token, beneficiary, owed)?;

        account.cumulative_reward = account.cumulative_reward.saturating_add(owed);
        account.last_accrual_time = env.ledger().timestamp();

        if owed > 0 {
            let paid: i128 = env.storage().instance().get(&TOTAL_PAID).unwrap_or(0);
            env.storage()
                .instance()
                .set(&TOTAL_PAID, &paid.saturating_add(owed));
        }

        Ok(owed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
