use anchor_lang::prelude::*;

use anchor_spl::token::{self, SetAuthority};
use anchor_spl::token::spl_token::instruction::AuthorityType;

use crate::constants::*;
use crate::errors::LedgerError;
use crate::state::{AdapterKind, Config, SetStatus};
use crate::{
    AdminConfig, CreatePool, InitializeConfig, InitializeRegistrationSet, SetPoolWeight,
    UpdateBlacklist,
};

pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    reward_per_slot: u64,
    mint_ceiling: u64,
) -> Result<()> {
    let cfg: &mut Account<Config> = &mut ctx.accounts.config;

    cfg.admin = ctx.accounts.admin.key();
    cfg.bump = ctx.bumps.config;

    // The admin drives rounds until a dedicated controller is appointed.
    cfg.controller = ctx.accounts.admin.key();

    cfg.reward_mint = ctx.accounts.reward_mint.key();
    cfg.prize_vault = ctx.accounts.prize_vault.key();
    cfg.prize_vault_bump = ctx.bumps.prize_vault;

    cfg.reward_per_slot = reward_per_slot;
    cfg.total_reward_weight = 0;
    cfg.pool_count = 0;
    cfg.multiplier_denominator = DEFAULT_MULTIPLIER_DENOMINATOR;

    cfg.minted_rewards = 0;
    cfg.mint_ceiling = mint_ceiling;

    cfg.paused = false;
    cfg.version = INITIAL_VERSION;

    let registry = &mut ctx.accounts.user_registry;
    registry.bump = ctx.bumps.user_registry;

    let blacklist = &mut ctx.accounts.blacklist;
    blacklist.bump = ctx.bumps.blacklist;

    // Move the reward mint authority to the config PDA so every payout is a
    // ceiling-checked mint by this program.
    {
        let cpi_program = ctx.accounts.token_program.to_account_info();
        let cpi_accounts = SetAuthority {
            account_or_mint: ctx.accounts.reward_mint.to_account_info(),
            current_authority: ctx.accounts.admin.to_account_info(),
        };

        token::set_authority(
            CpiContext::new(cpi_program, cpi_accounts),
            AuthorityType::MintTokens,
            Some(cfg.key()),
        )?;
    }

    Ok(())
}

pub fn set_pause(ctx: Context<AdminConfig>, paused: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    cfg.paused = paused;
    Ok(())
}

pub fn set_controller(ctx: Context<AdminConfig>, controller: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    cfg.controller = controller;
    Ok(())
}

pub fn set_reward_per_slot(ctx: Context<AdminConfig>, reward_per_slot: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    cfg.reward_per_slot = reward_per_slot;
    Ok(())
}

/// Default denominator for pools created afterwards; existing pools keep the
/// denominator they were created with.
pub fn set_multiplier_denominator(ctx: Context<AdminConfig>, denominator: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    require!(denominator > 0, LedgerError::InvalidMultiplier);
    cfg.multiplier_denominator = denominator;
    Ok(())
}

pub fn set_pool_weight(ctx: Context<SetPoolWeight>, _pool_id: u64, weight: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);

    let pool = &mut ctx.accounts.pool;

    // Settle the pool under the old weight before the split changes.
    let current_slot = Clock::get()?.slot;
    pool.accrue(current_slot, cfg.reward_per_slot, cfg.total_reward_weight)?;

    cfg.total_reward_weight = cfg
        .total_reward_weight
        .checked_sub(pool.reward_weight)
        .ok_or(LedgerError::MathOverflow)?
        .checked_add(weight)
        .ok_or(LedgerError::MathOverflow)?;
    pool.reward_weight = weight;

    Ok(())
}

pub fn add_to_blacklist(ctx: Context<UpdateBlacklist>, beneficiary: Pubkey) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    ctx.accounts.blacklist.add(beneficiary)
}

pub fn remove_from_blacklist(ctx: Context<UpdateBlacklist>, beneficiary: Pubkey) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    ctx.accounts.blacklist.remove(&beneficiary)
}

pub fn create_pool(
    ctx: Context<CreatePool>,
    adapter_kind: u8,
    reward_weight: u64,
    ticket_multiplier: u64,
) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require!(!cfg.paused, LedgerError::Paused);
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);

    let kind = AdapterKind::from_u8(adapter_kind).ok_or(LedgerError::UnknownAdapterKind)?;
    require!(kind != AdapterKind::RewardSink, LedgerError::RewardSinkAdapter);
    require!(reward_weight > 0, LedgerError::InvalidWeight);
    require!(ticket_multiplier > 0, LedgerError::InvalidMultiplier);

    // init_if_needed leaves an existing record populated: one adapter, one
    // pool, forever.
    let record = &mut ctx.accounts.adapter_record;
    require!(
        record.stake_adapter == Pubkey::default(),
        LedgerError::AdapterAlreadyRegistered
    );
    record.stake_adapter = ctx.accounts.stake_adapter.key();
    record.pool_id = cfg.pool_count;
    record.bump = ctx.bumps.adapter_record;

    let pool = &mut ctx.accounts.pool;
    pool.pool_id = cfg.pool_count;
    pool.bump = ctx.bumps.pool;

    pool.stake_adapter = ctx.accounts.stake_adapter.key();
    pool.adapter_kind = adapter_kind;

    pool.stake_mint = ctx.accounts.stake_mint.key();
    pool.stake_vault = ctx.accounts.stake_vault.key();
    pool.stake_vault_bump = ctx.bumps.stake_vault;

    pool.reward_weight = reward_weight;
    pool.acc_reward_per_share = 0;
    pool.last_accrual_slot = Clock::get()?.slot;

    pool.ticket_multiplier = ticket_multiplier;
    pool.multiplier_denominator = cfg.multiplier_denominator;

    pool.total_staked = 0;
    pool.participants = Vec::new();

    cfg.total_reward_weight = cfg
        .total_reward_weight
        .checked_add(reward_weight)
        .ok_or(LedgerError::MathOverflow)?;
    cfg.pool_count = cfg
        .pool_count
        .checked_add(1)
        .ok_or(LedgerError::MathOverflow)?;

    Ok(())
}

pub fn initialize_registration_set(ctx: Context<InitializeRegistrationSet>, kind: u8) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), LedgerError::Unauthorized);
    require!(
        kind == SET_KIND_PRIZE || kind == SET_KIND_USER_COUNT,
        LedgerError::UnknownSetKind
    );

    let set = &mut ctx.accounts.registration_set;
    set.kind = kind;
    set.bump = ctx.bumps.registration_set;
    set.status = SetStatus::Idle as u8;
    set.round_time = 0;
    set.round_time_set = false;
    set.pools = Vec::new();

    Ok(())
}
