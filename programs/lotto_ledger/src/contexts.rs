// programs/lotto_ledger/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::LedgerError;
use crate::state::{
    AdapterRecord, Blacklist, Config, Pool, Position, RegistrationSet, StakeHistory, UserRegistry,
};

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    /// Reward SPL mint (created off-chain); its mint authority is handed to
    /// the config PDA here.
    #[account(mut)]
    pub reward_mint: Account<'info, Mint>,

    /// Prize vault: reward-mint TokenAccount PDA, authority = config.
    #[account(
        init,
        payer = admin,
        seeds = [crate::PRIZE_VAULT_SEED],
        bump,
        token::mint = reward_mint,
        token::authority = config
    )]
    pub prize_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = admin,
        space = 8 + UserRegistry::INIT_SPACE,
        seeds = [crate::USER_REGISTRY_SEED],
        bump
    )]
    pub user_registry: Account<'info, UserRegistry>,

    #[account(
        init,
        payer = admin,
        space = 8 + Blacklist::INIT_SPACE,
        seeds = [crate::BLACKLIST_SEED],
        bump
    )]
    pub blacklist: Account<'info, Blacklist>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct AdminConfig<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct SetPoolWeight<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct UpdateBlacklist<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::BLACKLIST_SEED],
        bump = blacklist.bump
    )]
    pub blacklist: Account<'info, Blacklist>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// External stake-adapter identity backing the new pool.
    /// CHECK: identity only; never read or written.
    pub stake_adapter: UncheckedAccount<'info>,

    pub stake_mint: Account<'info, Mint>,

    /// One record per adapter. Re-registering an adapter finds the record
    /// already populated and fails in the handler.
    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + AdapterRecord::INIT_SPACE,
        seeds = [crate::ADAPTER_SEED, stake_adapter.key().as_ref()],
        bump
    )]
    pub adapter_record: Account<'info, AdapterRecord>,

    #[account(
        init,
        payer = admin,
        space = 8 + Pool::INIT_SPACE,
        seeds = [crate::POOL_SEED, config.pool_count.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = admin,
        seeds = [crate::STAKE_VAULT_SEED, config.pool_count.to_le_bytes().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
#[instruction(kind: u8)]
pub struct InitializeRegistrationSet<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + RegistrationSet::INIT_SPACE,
        seeds = [crate::SET_SEED, &[kind]],
        bump
    )]
    pub registration_set: Account<'info, RegistrationSet>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

// ----------------------------
// Staking entry points
// ----------------------------

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Deposit<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// The account credited with the stake; may differ from the funder.
    /// CHECK: identity only; rewards go to its reward token account below.
    pub beneficiary: UncheckedAccount<'info>,

    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        init_if_needed,
        payer = funder,
        space = 8 + Position::INIT_SPACE,
        seeds = [crate::POSITION_SEED, pool_id.to_le_bytes().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(
        init_if_needed,
        payer = funder,
        space = 8 + StakeHistory::INIT_SPACE,
        seeds = [crate::HISTORY_SEED, pool_id.to_le_bytes().as_ref(), beneficiary.key().as_ref()],
        bump
    )]
    pub history: Account<'info, StakeHistory>,

    #[account(
        mut,
        seeds = [crate::USER_REGISTRY_SEED],
        bump = user_registry.bump
    )]
    pub user_registry: Account<'info, UserRegistry>,

    #[account(
        seeds = [crate::BLACKLIST_SEED],
        bump = blacklist.bump
    )]
    pub blacklist: Account<'info, Blacklist>,

    #[account(
        mut,
        constraint = funder_stake_account.mint == pool.stake_mint @ LedgerError::InvalidStakeAccount
    )]
    pub funder_stake_account: Account<'info, TokenAccount>,

    #[account(mut, address = pool.stake_vault)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut, address = config.reward_mint)]
    pub reward_mint: Account<'info, Mint>,

    /// The funder signs, so the auto-harvest destination is pinned to the
    /// beneficiary: yield is theirs no matter who moves the principal.
    #[account(
        mut,
        constraint = beneficiary_reward_account.mint == config.reward_mint @ LedgerError::InvalidRewardAccount,
        constraint = beneficiary_reward_account.owner == beneficiary.key() @ LedgerError::InvalidRewardAccount
    )]
    pub beneficiary_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: identity only.
    pub beneficiary: UncheckedAccount<'info>,

    /// Must match the position's stored funder; principal returns to it.
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [crate::POSITION_SEED, pool_id.to_le_bytes().as_ref(), beneficiary.key().as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        seeds = [crate::HISTORY_SEED, pool_id.to_le_bytes().as_ref(), beneficiary.key().as_ref()],
        bump = history.bump
    )]
    pub history: Account<'info, StakeHistory>,

    #[account(
        mut,
        constraint = funder_stake_account.mint == pool.stake_mint @ LedgerError::InvalidStakeAccount
    )]
    pub funder_stake_account: Account<'info, TokenAccount>,

    #[account(mut, address = pool.stake_vault)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut, address = config.reward_mint)]
    pub reward_mint: Account<'info, Mint>,

    /// The funder signs, so the auto-harvest destination is pinned to the
    /// beneficiary: yield is theirs no matter who moves the principal.
    #[account(
        mut,
        constraint = beneficiary_reward_account.mint == config.reward_mint @ LedgerError::InvalidRewardAccount,
        constraint = beneficiary_reward_account.owner == beneficiary.key() @ LedgerError::InvalidRewardAccount
    )]
    pub beneficiary_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Harvest<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// Yield-only access: the beneficiary harvests even when it is not the
    /// funder. Principal never moves here.
    pub beneficiary: Signer<'info>,

    #[account(
        mut,
        seeds = [crate::POSITION_SEED, pool_id.to_le_bytes().as_ref(), beneficiary.key().as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

    #[account(mut, address = config.reward_mint)]
    pub reward_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = beneficiary_reward_account.mint == config.reward_mint @ LedgerError::InvalidRewardAccount
    )]
    pub beneficiary_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Round lifecycle (registration sets)
// ----------------------------

#[derive(Accounts)]
#[instruction(kind: u8)]
pub struct MutateSet<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::SET_SEED, &[kind]],
        bump = registration_set.bump
    )]
    pub registration_set: Account<'info, RegistrationSet>,

    pub controller: Signer<'info>,
}

#[derive(Accounts)]
pub struct Prune<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::SET_SEED, &[crate::SET_KIND_PRIZE]],
        bump = prize_set.bump
    )]
    pub prize_set: Account<'info, RegistrationSet>,

    #[account(
        seeds = [crate::USER_REGISTRY_SEED],
        bump = user_registry.bump
    )]
    pub user_registry: Account<'info, UserRegistry>,

    pub controller: Signer<'info>,
    // remaining_accounts: one StakeHistory per (user in range, pool in set),
    // user-major order.
}

// ----------------------------
// Winner resolution / prize flow
// ----------------------------

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct FindWinner<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::SET_SEED, &[crate::SET_KIND_PRIZE]],
        bump = prize_set.bump
    )]
    pub prize_set: Account<'info, RegistrationSet>,

    #[account(
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    pub controller: Signer<'info>,
    // remaining_accounts: (Position, StakeHistory) pair per participant, in
    // the pool's registration order.
}

#[derive(Accounts)]
pub struct TransferPrize<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut, address = config.prize_vault)]
    pub prize_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == config.reward_mint @ LedgerError::InvalidRewardAccount
    )]
    pub destination: Account<'info, TokenAccount>,

    pub controller: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

// ----------------------------
// Views
// ----------------------------

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct GetNumTickets<'info> {
    #[account(
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: identity only; position/history PDAs derive from it.
    pub beneficiary: UncheckedAccount<'info>,

    /// CHECK: validated against the position PDA in the handler; an empty
    /// account reads as zero stake.
    pub position: UncheckedAccount<'info>,

    /// CHECK: validated against the history PDA in the handler; an empty
    /// account reads as no checkpoints.
    pub history: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct PendingRewardView<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: identity only.
    pub beneficiary: UncheckedAccount<'info>,

    #[account(
        seeds = [crate::POSITION_SEED, pool_id.to_le_bytes().as_ref(), beneficiary.key().as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct GetNumUsersOf<'info> {
    #[account(
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
pub struct GetNumUsers<'info> {
    #[account(
        seeds = [crate::USER_REGISTRY_SEED],
        bump = user_registry.bump
    )]
    pub user_registry: Account<'info, UserRegistry>,
}

#[derive(Accounts)]
pub struct GetSetUserCount<'info> {
    #[account(
        seeds = [crate::SET_SEED, &[crate::SET_KIND_USER_COUNT]],
        bump = user_count_set.bump
    )]
    pub user_count_set: Account<'info, RegistrationSet>,
    // remaining_accounts: one Pool per id in the set, in set order.
}
