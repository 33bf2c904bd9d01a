use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod contexts;
pub mod constants;

pub use utils::*;
pub use instructions::*;
pub use state::*;
pub use errors::*;
pub use contexts::*;
pub use constants::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "Lotto Ledger",
    project_url: "https://github.com/lotto-ledger/lotto-ledger",
    contacts: "link:https://github.com/lotto-ledger/lotto-ledger/issues",
    policy: "https://github.com/lotto-ledger/lotto-ledger/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/lotto-ledger/lotto-ledger"
}

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod lotto_ledger {
    use super::*;
    use crate::instructions::{admin, lifecycle, stake, views, winner};

    // ----------------------------
    // Admin
    // ----------------------------
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        reward_per_slot: u64,
        mint_ceiling: u64,
    ) -> Result<()> {
        admin::initialize_config(ctx, reward_per_slot, mint_ceiling)
    }

    pub fn set_pause(ctx: Context<AdminConfig>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    pub fn set_controller(ctx: Context<AdminConfig>, controller: Pubkey) -> Result<()> {
        admin::set_controller(ctx, controller)
    }

    pub fn set_reward_per_slot(ctx: Context<AdminConfig>, reward_per_slot: u64) -> Result<()> {
        admin::set_reward_per_slot(ctx, reward_per_slot)
    }

    pub fn set_multiplier_denominator(ctx: Context<AdminConfig>, denominator: u64) -> Result<()> {
        admin::set_multiplier_denominator(ctx, denominator)
    }

    pub fn set_pool_weight(ctx: Context<SetPoolWeight>, pool_id: u64, weight: u64) -> Result<()> {
        admin::set_pool_weight(ctx, pool_id, weight)
    }

    pub fn add_to_blacklist(ctx: Context<UpdateBlacklist>, beneficiary: Pubkey) -> Result<()> {
        admin::add_to_blacklist(ctx, beneficiary)
    }

    pub fn remove_from_blacklist(ctx: Context<UpdateBlacklist>, beneficiary: Pubkey) -> Result<()> {
        admin::remove_from_blacklist(ctx, beneficiary)
    }

    pub fn create_pool(
        ctx: Context<CreatePool>,
        adapter_kind: u8,
        reward_weight: u64,
        ticket_multiplier: u64,
    ) -> Result<()> {
        admin::create_pool(ctx, adapter_kind, reward_weight, ticket_multiplier)
    }

    pub fn initialize_registration_set(
        ctx: Context<InitializeRegistrationSet>,
        kind: u8,
    ) -> Result<()> {
        admin::initialize_registration_set(ctx, kind)
    }

    // ----------------------------
    // Staking (called by adapters/funders on behalf of beneficiaries)
    // ----------------------------
    pub fn deposit(ctx: Context<Deposit>, pool_id: u64, amount: u64) -> Result<()> {
        stake::deposit(ctx, pool_id, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, pool_id: u64, amount: u64) -> Result<()> {
        stake::withdraw(ctx, pool_id, amount)
    }

    pub fn harvest(ctx: Context<Harvest>, pool_id: u64) -> Result<()> {
        stake::harvest(ctx, pool_id)
    }

    // ----------------------------
    // Round lifecycle (controller-driven)
    // ----------------------------
    pub fn clear_set(ctx: Context<MutateSet>, kind: u8) -> Result<()> {
        lifecycle::clear_set(ctx, kind)
    }

    pub fn set_set_status(ctx: Context<MutateSet>, kind: u8, status: u8) -> Result<()> {
        lifecycle::set_set_status(ctx, kind, status)
    }

    pub fn add_to_set(ctx: Context<MutateSet>, kind: u8, pool_id: u64) -> Result<()> {
        lifecycle::add_to_set(ctx, kind, pool_id)
    }

    pub fn prune<'info>(
        ctx: Context<'_, '_, 'info, 'info, Prune<'info>>,
        time: i64,
        user_start: u64,
        user_end: u64,
    ) -> Result<()> {
        lifecycle::prune(ctx, time, user_start, user_end)
    }

    // ----------------------------
    // Winner resolution / prize flow
    // ----------------------------
    pub fn find_winner<'info>(
        ctx: Context<'_, '_, 'info, 'info, FindWinner<'info>>,
        pool_id: u64,
        ticket_number: u64,
    ) -> Result<Option<Pubkey>> {
        winner::find_winner(ctx, pool_id, ticket_number)
    }

    pub fn transfer_prize(
        ctx: Context<TransferPrize>,
        pool_id: u64,
        ticket_number: u64,
        amount: u64,
    ) -> Result<()> {
        winner::transfer_prize(ctx, pool_id, ticket_number, amount)
    }

    // ----------------------------
    // Views
    // ----------------------------
    pub fn get_num_tickets(ctx: Context<GetNumTickets>, pool_id: u64, time: i64) -> Result<u64> {
        views::get_num_tickets(ctx, pool_id, time)
    }

    pub fn pending_reward(ctx: Context<PendingRewardView>, pool_id: u64) -> Result<u64> {
        views::pending_reward(ctx, pool_id)
    }

    pub fn get_num_users_of(ctx: Context<GetNumUsersOf>, pool_id: u64) -> Result<u64> {
        views::get_num_users_of(ctx, pool_id)
    }

    pub fn get_num_users(ctx: Context<GetNumUsers>) -> Result<u64> {
        views::get_num_users(ctx)
    }

    pub fn get_set_user_count<'info>(
        ctx: Context<'_, '_, 'info, 'info, GetSetUserCount<'info>>,
    ) -> Result<u64> {
        views::get_set_user_count(ctx)
    }
}
