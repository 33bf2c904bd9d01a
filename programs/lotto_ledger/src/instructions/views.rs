use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{Pool, Position, SetStatus, StakeHistory};
use crate::utils::{pending_reward as pending_of, read_account};
use crate::{
    GetNumTickets, GetNumUsers, GetNumUsersOf, GetSetUserCount, PendingRewardView, HISTORY_SEED,
    POOL_SEED, POSITION_SEED,
};

/// ticketsAt: floor-lookup of the beneficiary's balance at `time`, scaled by
/// the pool multiplier and capped by the scaled live balance. Accounts that
/// were never created read as zero.
pub fn get_num_tickets(ctx: Context<GetNumTickets>, pool_id: u64, time: i64) -> Result<u64> {
    let pool = &ctx.accounts.pool;
    let beneficiary = ctx.accounts.beneficiary.key();
    let pool_id_le = pool_id.to_le_bytes();

    let (expected_position, _) = Pubkey::find_program_address(
        &[POSITION_SEED, &pool_id_le, beneficiary.as_ref()],
        ctx.program_id,
    );
    require_keys_eq!(
        expected_position,
        ctx.accounts.position.key(),
        LedgerError::PositionPdaMismatch
    );

    let (expected_history, _) = Pubkey::find_program_address(
        &[HISTORY_SEED, &pool_id_le, beneficiary.as_ref()],
        ctx.program_id,
    );
    require_keys_eq!(
        expected_history,
        ctx.accounts.history.key(),
        LedgerError::HistoryPdaMismatch
    );

    let position_ai = ctx.accounts.position.to_account_info();
    let history_ai = ctx.accounts.history.to_account_info();
    if position_ai.data_is_empty() || history_ai.data_is_empty() {
        return Ok(0);
    }

    let position: Position = read_account(&position_ai)?;
    let history: StakeHistory = read_account(&history_ai)?;
    pool.tickets_at(&history, position.staked_amount, time)
}

/// As-of-now pending reward. Applies the accrual formula without persisting
/// it, so the view never lags behind the next mutating call.
pub fn pending_reward(ctx: Context<PendingRewardView>, _pool_id: u64) -> Result<u64> {
    let cfg = &ctx.accounts.config;
    let pool = &ctx.accounts.pool;
    let position = &ctx.accounts.position;

    let current_slot = Clock::get()?.slot;
    let acc = pool.simulated_acc(current_slot, cfg.reward_per_slot, cfg.total_reward_weight)?;

    pending_of(position.staked_amount, acc, position.reward_debt)
}

pub fn get_num_users_of(ctx: Context<GetNumUsersOf>, _pool_id: u64) -> Result<u64> {
    Ok(ctx.accounts.pool.participants.len() as u64)
}

pub fn get_num_users(ctx: Context<GetNumUsers>) -> Result<u64> {
    Ok(ctx.accounts.user_registry.users.len() as u64)
}

/// Distinct-participant tally over the user-count set's pools. The count is
/// per (pool, beneficiary) position, matching the registry semantics of the
/// pools themselves.
///
/// remaining_accounts: the set's Pool accounts, in set order.
pub fn get_set_user_count<'info>(
    ctx: Context<'_, '_, 'info, 'info, GetSetUserCount<'info>>,
) -> Result<u64> {
    let set = &ctx.accounts.user_count_set;
    set.require_status(SetStatus::Active)?;

    require!(
        ctx.remaining_accounts.len() == set.pools.len(),
        LedgerError::RemainingAccountsMismatch
    );

    let mut total: u64 = 0;
    for (i, pool_id) in set.pools.iter().enumerate() {
        let pool_ai = &ctx.remaining_accounts[i];

        let pool_id_le = pool_id.to_le_bytes();
        let (expected_pool, _) =
            Pubkey::find_program_address(&[POOL_SEED, &pool_id_le], ctx.program_id);
        require_keys_eq!(expected_pool, *pool_ai.key, LedgerError::PoolPdaMismatch);

        let pool: Pool = read_account(pool_ai)?;
        total = total
            .checked_add(pool.participants.len() as u64)
            .ok_or(LedgerError::MathOverflow)?;
    }

    Ok(total)
}
