//! Reward-asset reserve guard.
//!
//! The reserve is the contract's own reward-token balance: it grows only by
//! external transfers in (replenishment) and shrinks only through [`pay`].
//! Every payout is authorized against the live balance first, so the ledger
//! can never promise more than it holds.

use soroban_sdk::{token, Address, Env};

use crate::ContractError;

/// Reward tokens currently held by the contract and available to pay out.
pub fn available(env: &Env, reward_token: &Address) -> i128 {
    token::Client::new(env, reward_token).balance(&env.current_contract_address())
}

/// Refuse any payout larger than the held reserve.
pub fn authorize(env: &Env, reward_token: &Address, amount: i128) -> Result<(), ContractError> {
    if amount > available(env, reward_token) {
        return Err(ContractError::InsufficientReserve);
    }
    Ok(())
}

/// Authorize `amount` against the reserve and push it to `to`.
///
/// The authorization and the decrement are the same atomic act: the transfer
/// itself reduces the contract's balance, and a failed transfer unwinds the
/// whole invocation. A zero amount is a no-op, so claim-only calls with
/// nothing accrued never touch the token contract.
pub fn pay(
    env: &Env,
    reward_token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }

    authorize(env, reward_token, amount)?;

    let client = token::Client::new(env, reward_token);
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}
