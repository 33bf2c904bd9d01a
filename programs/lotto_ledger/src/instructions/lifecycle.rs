use anchor_lang::prelude::*;

use crate::errors::LedgerError;
use crate::state::{SetStatus, StakeHistory};
use crate::{MutateSet, Prune, HISTORY_SEED};

pub fn clear_set(ctx: Context<MutateSet>, _kind: u8) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(
        cfg.controller,
        ctx.accounts.controller.key(),
        LedgerError::NotController
    );

    ctx.accounts.registration_set.clear();
    Ok(())
}

pub fn set_set_status(ctx: Context<MutateSet>, _kind: u8, status: u8) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(
        cfg.controller,
        ctx.accounts.controller.key(),
        LedgerError::NotController
    );

    let next = SetStatus::from_u8(status).ok_or(LedgerError::InvalidStatus)?;
    ctx.accounts.registration_set.transition(next)
}

pub fn add_to_set(ctx: Context<MutateSet>, _kind: u8, pool_id: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(
        cfg.controller,
        ctx.accounts.controller.key(),
        LedgerError::NotController
    );

    ctx.accounts.registration_set.add_pool(pool_id, cfg.pool_count)
}

/// Compaction pass over `[user_start, user_end)` of the global participant
/// index, for every pool in the frozen prize set. Batchable: sub-ranges may
/// arrive in any order, overlap, or run past the registry end (clamped), as
/// long as the set stays in Added. For a fixed `time`, ticket queries return
/// identical values before and after any partition of the range.
///
/// remaining_accounts: one StakeHistory PDA per (user, pool-in-set) pair in
/// user-major order. Users who never touched a pool pass the (empty) PDA.
pub fn prune<'info>(
    ctx: Context<'_, '_, 'info, 'info, Prune<'info>>,
    time: i64,
    user_start: u64,
    user_end: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);
    require_keys_eq!(
        cfg.controller,
        ctx.accounts.controller.key(),
        LedgerError::NotController
    );

    let set = &mut ctx.accounts.prize_set;
    set.require_status(SetStatus::Added)?;
    set.pin_round_time(time)?;

    let registry = &ctx.accounts.user_registry;
    let user_count = registry.users.len() as u64;

    // Out-of-range bounds clamp instead of erroring so overlapping batches
    // stay idempotent.
    let end = user_end.min(user_count);
    let start = user_start.min(end);

    let pools_per_user = set.pools.len();
    let expected = (end - start) as usize * pools_per_user;
    require!(
        ctx.remaining_accounts.len() == expected,
        LedgerError::RemainingAccountsMismatch
    );

    let mut cursor = 0usize;
    for user_index in start..end {
        let user = registry.users[user_index as usize];

        for pool_id in set.pools.iter() {
            let history_ai = &ctx.remaining_accounts[cursor];
            cursor += 1;

            let pool_id_le = pool_id.to_le_bytes();
            let (expected_pda, _bump) = Pubkey::find_program_address(
                &[HISTORY_SEED, &pool_id_le, user.as_ref()],
                ctx.program_id,
            );
            require_keys_eq!(
                expected_pda,
                *history_ai.key,
                LedgerError::HistoryPdaMismatch
            );

            // No history for this (user, pool): nothing to compact.
            if history_ai.data_is_empty() {
                continue;
            }
            require_keys_eq!(
                *history_ai.owner,
                *ctx.program_id,
                LedgerError::HistoryNotOwnedByProgram
            );

            let mut history = {
                let data = history_ai
                    .try_borrow_data()
                    .map_err(|_| error!(LedgerError::AccountBorrowFailed))?;
                let mut slice: &[u8] = &data;
                StakeHistory::try_deserialize(&mut slice)?
            };

            history.prune_before(time);

            // The cursor only moves forward and the vec never grows here,
            // so the serialized form always fits the existing allocation.
            let mut data = history_ai
                .try_borrow_mut_data()
                .map_err(|_| error!(LedgerError::AccountBorrowFailed))?;
            let mut writer = std::io::Cursor::new(&mut data[..]);
            history.try_serialize(&mut writer)?;
        }
    }

    Ok(())
}
