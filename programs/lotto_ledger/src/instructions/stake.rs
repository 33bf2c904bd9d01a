use anchor_lang::prelude::*;

use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::errors::LedgerError;
use crate::state::Config;
use crate::utils::{pending_reward, reward_debt};
use crate::{Deposit, Harvest, Withdraw, CONFIG_SEED, POOL_SEED};

/// Ceiling-checked reward payout. The config PDA is the mint authority, so
/// every reward that ever exists passes through `reserve_mint`.
fn mint_reward<'info>(
    config: &mut Account<'info, Config>,
    reward_mint: &Account<'info, Mint>,
    destination: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    config.reserve_mint(amount)?;

    let seeds: &[&[&[u8]]] = &[&[CONFIG_SEED, &[config.bump]]];

    token::mint_to(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            MintTo {
                mint: reward_mint.to_account_info(),
                to: destination.to_account_info(),
                authority: config.to_account_info(),
            },
            seeds,
        ),
        amount,
    )
}

pub fn deposit(ctx: Context<Deposit>, pool_id: u64, amount: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);

    let beneficiary = ctx.accounts.beneficiary.key();
    require!(
        !ctx.accounts.blacklist.contains(&beneficiary),
        LedgerError::Blacklisted
    );

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;
    let history = &mut ctx.accounts.history;
    let funder_key = ctx.accounts.funder.key();

    // init_if_needed: a freshly created position carries defaults.
    if position.beneficiary == Pubkey::default() {
        position.pool_id = pool_id;
        position.beneficiary = beneficiary;
        position.bump = ctx.bumps.position;
    }
    if history.beneficiary == Pubkey::default() {
        history.pool_id = pool_id;
        history.beneficiary = beneficiary;
        history.bump = ctx.bumps.history;
    }

    // Zero amount is only the auto-harvest path on an already-live position.
    if amount == 0 {
        require!(position.staked_amount > 0, LedgerError::InvalidAmount);
    }
    position.check_deposit_funder(&funder_key)?;

    let clock = Clock::get()?;
    pool.accrue(clock.slot, cfg.reward_per_slot, cfg.total_reward_weight)?;

    // Auto-harvest before the balance changes.
    let pending = pending_reward(
        position.staked_amount,
        pool.acc_reward_per_share,
        position.reward_debt,
    )?;
    mint_reward(
        cfg,
        &ctx.accounts.reward_mint,
        &ctx.accounts.beneficiary_reward_account,
        &ctx.accounts.token_program,
        pending,
    )?;

    if amount > 0 {
        // Stake moves into the pool vault; a failed transfer aborts the
        // whole instruction, keeping the books aligned with the vault.
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.funder_stake_account.to_account_info(),
                    to: ctx.accounts.stake_vault.to_account_info(),
                    authority: ctx.accounts.funder.to_account_info(),
                },
            ),
            amount,
        )?;

        position.apply_deposit(funder_key, amount)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;

        pool.register_participant(beneficiary)?;
        ctx.accounts.user_registry.register(beneficiary)?;

        history.append(clock.unix_timestamp, position.staked_amount)?;
    }

    position.reward_debt = reward_debt(position.staked_amount, pool.acc_reward_per_share)?;

    Ok(())
}

pub fn withdraw(ctx: Context<Withdraw>, pool_id: u64, amount: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);
    require!(amount > 0, LedgerError::InvalidAmount);

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;
    let history = &mut ctx.accounts.history;
    let funder_key = ctx.accounts.funder.key();

    position.check_withdraw(&funder_key, amount)?;

    let clock = Clock::get()?;
    pool.accrue(clock.slot, cfg.reward_per_slot, cfg.total_reward_weight)?;

    let pending = pending_reward(
        position.staked_amount,
        pool.acc_reward_per_share,
        position.reward_debt,
    )?;
    mint_reward(
        cfg,
        &ctx.accounts.reward_mint,
        &ctx.accounts.beneficiary_reward_account,
        &ctx.accounts.token_program,
        pending,
    )?;

    // Principal returns to the funder.
    let pool_id_le = pool_id.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[POOL_SEED, &pool_id_le, &[pool.bump]]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.stake_vault.to_account_info(),
                to: ctx.accounts.funder_stake_account.to_account_info(),
                authority: pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    position.apply_withdraw(amount)?;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(LedgerError::MathOverflow)?;

    position.reward_debt = reward_debt(position.staked_amount, pool.acc_reward_per_share)?;
    history.append(clock.unix_timestamp, position.staked_amount)?;

    Ok(())
}

pub fn harvest(ctx: Context<Harvest>, _pool_id: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;

    let clock = Clock::get()?;
    pool.accrue(clock.slot, cfg.reward_per_slot, cfg.total_reward_weight)?;

    let pending = pending_reward(
        position.staked_amount,
        pool.acc_reward_per_share,
        position.reward_debt,
    )?;
    mint_reward(
        cfg,
        &ctx.accounts.reward_mint,
        &ctx.accounts.beneficiary_reward_account,
        &ctx.accounts.token_program,
        pending,
    )?;

    position.reward_debt = reward_debt(position.staked_amount, pool.acc_reward_per_share)?;

    Ok(())
}
