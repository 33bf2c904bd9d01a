use anchor_lang::prelude::*;

use anchor_spl::token::{self, Transfer};

use crate::errors::LedgerError;
use crate::state::{Position, SetStatus, StakeHistory};
use crate::utils::{self, read_account};
use crate::{FindWinner, TransferPrize, CONFIG_SEED, HISTORY_SEED, POSITION_SEED};

/// Maps a drawn ticket number to a participant by cumulative-weight search
/// over the pool's registration order, at the round's frozen time. A pool
/// with zero total tickets resolves to None — an empty fill, not an error.
///
/// remaining_accounts: a (Position, StakeHistory) PDA pair per participant,
/// in `pool.participants` order.
pub fn find_winner<'info>(
    ctx: Context<'_, '_, 'info, 'info, FindWinner<'info>>,
    pool_id: u64,
    ticket_number: u64,
) -> Result<Option<Pubkey>> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(
        cfg.controller,
        ctx.accounts.controller.key(),
        LedgerError::NotController
    );

    let set = &ctx.accounts.prize_set;
    set.require_status(SetStatus::Active)?;
    require!(set.pools.contains(&pool_id), LedgerError::PoolNotInSet);

    let pool = &ctx.accounts.pool;
    let round_time = set.round_time;
    let pool_id_le = pool_id.to_le_bytes();

    require!(
        ctx.remaining_accounts.len() == 2 * pool.participants.len(),
        LedgerError::RemainingAccountsMismatch
    );

    let mut weights: Vec<(Pubkey, u64)> = Vec::with_capacity(pool.participants.len());
    for (i, participant) in pool.participants.iter().enumerate() {
        let position_ai = &ctx.remaining_accounts[2 * i];
        let history_ai = &ctx.remaining_accounts[2 * i + 1];

        let (expected_position, _) = Pubkey::find_program_address(
            &[POSITION_SEED, &pool_id_le, participant.as_ref()],
            ctx.program_id,
        );
        require_keys_eq!(
            expected_position,
            *position_ai.key,
            LedgerError::PositionPdaMismatch
        );

        let (expected_history, _) = Pubkey::find_program_address(
            &[HISTORY_SEED, &pool_id_le, participant.as_ref()],
            ctx.program_id,
        );
        require_keys_eq!(
            expected_history,
            *history_ai.key,
            LedgerError::HistoryPdaMismatch
        );

        // Registered participants always have both accounts; read an
        // absent one as zero tickets rather than failing the draw.
        let tickets = if position_ai.data_is_empty() || history_ai.data_is_empty() {
            0
        } else {
            let position: Position = read_account(position_ai)?;
            let history: StakeHistory = read_account(history_ai)?;
            pool.tickets_at(&history, position.staked_amount, round_time)?
        };

        weights.push((*participant, tickets));
    }

    let winner = utils::find_winner(&weights, ticket_number);
    match winner {
        Some(pubkey) => msg!("pool {} ticket {} -> {}", pool_id, ticket_number, pubkey),
        None => msg!("pool {} has no eligible winner", pool_id),
    }

    Ok(winner)
}

/// Prize payout, gated to the round controller. Double-payment prevention
/// belongs to the controller, not this ledger.
pub fn transfer_prize(
    ctx: Context<TransferPrize>,
    pool_id: u64,
    ticket_number: u64,
    amount: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(
        cfg.controller,
        ctx.accounts.controller.key(),
        LedgerError::NotController
    );
    require!(amount > 0, LedgerError::InvalidAmount);

    let seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[cfg.bump]]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.prize_vault.to_account_info(),
                to: ctx.accounts.destination.to_account_info(),
                authority: cfg.to_account_info(),
            },
            seeds,
        ),
        amount,
    )?;

    msg!(
        "prize of {} paid for pool {} ticket {}",
        amount,
        pool_id,
        ticket_number
    );

    Ok(())
}
