use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LedgerError;
use crate::utils::{scale_tickets, slots_reward};

#[account]
#[derive(InitSpace)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,

    /// Round controller allowed to drive set lifecycles, pruning and prizes.
    pub controller: Pubkey,

    /// Reward SPL mint; mint authority is this config PDA.
    pub reward_mint: Pubkey,

    /// Prize vault (reward-mint TokenAccount PDA, authority = config).
    pub prize_vault: Pubkey,
    pub prize_vault_bump: u8,

    /// Global reward emission per slot, split across pools by weight.
    pub reward_per_slot: u64,

    /// Sum of `reward_weight` over all pools.
    pub total_reward_weight: u64,

    /// Next pool id; pool ids are dense and never reused.
    pub pool_count: u64,

    /// Default denominator applied to new pools' ticket multipliers.
    pub multiplier_denominator: u64,

    /// Rewards minted so far, capped by `mint_ceiling`.
    pub minted_rewards: u64,
    pub mint_ceiling: u64,

    pub paused: bool,
    pub version: u16,
}

impl Config {
    /// Reserve `amount` of mint headroom or fail. Called before every
    /// reward mint so the ceiling can never be crossed mid-payout.
    pub fn reserve_mint(&mut self, amount: u64) -> Result<()> {
        let minted = self
            .minted_rewards
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        require!(minted <= self.mint_ceiling, LedgerError::MintCeilingExceeded);
        self.minted_rewards = minted;
        Ok(())
    }
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AdapterKind {
    /// Yield-bearing vault strategy.
    Vault = 0,
    /// Lending-market strategy.
    Lending = 1,
    /// Non-functional adapter: provides no yield, used purely as a reward
    /// sink. Must never back a pool.
    RewardSink = 2,
}

impl AdapterKind {
    pub fn from_u8(v: u8) -> Option<AdapterKind> {
        match v {
            0 => Some(AdapterKind::Vault),
            1 => Some(AdapterKind::Lending),
            2 => Some(AdapterKind::RewardSink),
            _ => None,
        }
    }
}

#[account]
#[derive(InitSpace)]
pub struct Pool {
    /// Array-style id: assigned from `config.pool_count`, never reused.
    pub pool_id: u64,
    pub bump: u8,

    /// External stake-adapter identity backing this pool.
    pub stake_adapter: Pubkey,
    pub adapter_kind: u8,

    pub stake_mint: Pubkey,
    /// Stake TokenAccount PDA, authority = pool.
    pub stake_vault: Pubkey,
    pub stake_vault_bump: u8,

    /// Share of the global reward emission.
    pub reward_weight: u64,

    /// Fixed-point reward-per-share accumulator (ACC_PRECISION scale).
    pub acc_reward_per_share: u128,
    pub last_accrual_slot: u64,

    pub ticket_multiplier: u64,
    pub multiplier_denominator: u64,

    pub total_staked: u64,

    /// Beneficiaries in first-deposit order. Never removed: positions are
    /// emptied, not deleted, and winner resolution walks this order.
    #[max_len(MAX_POOL_PARTICIPANTS)]
    pub participants: Vec<Pubkey>,
}

impl Pool {
    /// Lazy accrual. Idempotent within a slot; with nothing staked it only
    /// advances the accrual slot so no emission accumulates out of thin air.
    pub fn accrue(
        &mut self,
        current_slot: u64,
        reward_per_slot: u64,
        total_reward_weight: u64,
    ) -> Result<()> {
        if current_slot <= self.last_accrual_slot {
            return Ok(());
        }
        if self.total_staked == 0 || total_reward_weight == 0 {
            self.last_accrual_slot = current_slot;
            return Ok(());
        }

        let elapsed = current_slot - self.last_accrual_slot;
        let reward = slots_reward(
            elapsed,
            reward_per_slot,
            self.reward_weight,
            total_reward_weight,
        )?;
        let delta = reward
            .checked_mul(ACC_PRECISION)
            .ok_or(LedgerError::MathOverflow)?
            / self.total_staked as u128;

        self.acc_reward_per_share = self
            .acc_reward_per_share
            .checked_add(delta)
            .ok_or(LedgerError::MathOverflow)?;
        self.last_accrual_slot = current_slot;

        Ok(())
    }

    /// As-of-now accumulator for read paths. Applies the same formula as
    /// `accrue` without persisting, so views never lag a mutating call.
    pub fn simulated_acc(
        &self,
        current_slot: u64,
        reward_per_slot: u64,
        total_reward_weight: u64,
    ) -> Result<u128> {
        if current_slot <= self.last_accrual_slot
            || self.total_staked == 0
            || total_reward_weight == 0
        {
            return Ok(self.acc_reward_per_share);
        }

        let elapsed = current_slot - self.last_accrual_slot;
        let reward = slots_reward(
            elapsed,
            reward_per_slot,
            self.reward_weight,
            total_reward_weight,
        )?;
        let delta = reward
            .checked_mul(ACC_PRECISION)
            .ok_or(LedgerError::MathOverflow)?
            / self.total_staked as u128;

        self.acc_reward_per_share
            .checked_add(delta)
            .ok_or_else(|| error!(LedgerError::MathOverflow))
    }

    pub fn register_participant(&mut self, beneficiary: Pubkey) -> Result<()> {
        if self.participants.contains(&beneficiary) {
            return Ok(());
        }
        require!(
            self.participants.len() < MAX_POOL_PARTICIPANTS,
            LedgerError::ParticipantLimitReached
        );
        self.participants.push(beneficiary);
        Ok(())
    }

    /// Anti-gaming ticket count at `time`: the lesser of the historical
    /// balance at `time` and the live balance, both multiplier-scaled.
    pub fn tickets_at(&self, history: &StakeHistory, current_staked: u64, time: i64) -> Result<u64> {
        let historical = scale_tickets(
            history.amount_at(time),
            self.ticket_multiplier,
            self.multiplier_denominator,
        )?;
        let current = scale_tickets(
            current_staked,
            self.ticket_multiplier,
            self.multiplier_denominator,
        )?;
        Ok(historical.min(current))
    }
}

/// One record per stake adapter; its `init` constraint is what makes a
/// second registration of the same adapter fail.
#[account]
#[derive(InitSpace)]
pub struct AdapterRecord {
    pub stake_adapter: Pubkey,
    pub pool_id: u64,
    pub bump: u8,
}

#[account]
#[derive(InitSpace)]
pub struct Position {
    pub pool_id: u64,
    pub beneficiary: Pubkey,
    pub bump: u8,

    pub staked_amount: u64,
    /// ACC_PRECISION-scaled debt against `acc_reward_per_share`.
    pub reward_debt: u128,

    /// Set on the first deposit into an empty position, cleared to None on
    /// full withdrawal so a new funder may reopen the position.
    pub funder: Option<Pubkey>,
}

impl Position {
    /// "Bad funder" rule: while the position holds stake, only the original
    /// funder may add to it.
    pub fn check_deposit_funder(&self, caller: &Pubkey) -> Result<()> {
        if self.staked_amount > 0 {
            if let Some(funder) = self.funder {
                require_keys_eq!(funder, *caller, LedgerError::BadFunder);
            }
        }
        Ok(())
    }

    /// Only the stored funder may move principal out.
    pub fn check_withdraw(&self, caller: &Pubkey, amount: u64) -> Result<()> {
        match self.funder {
            Some(funder) => require_keys_eq!(funder, *caller, LedgerError::NotFunder),
            None => return Err(error!(LedgerError::NotFunder)),
        }
        require!(amount <= self.staked_amount, LedgerError::ExceedsStake);
        Ok(())
    }

    pub fn apply_deposit(&mut self, caller: Pubkey, amount: u64) -> Result<()> {
        self.staked_amount = self
            .staked_amount
            .checked_add(amount)
            .ok_or(LedgerError::MathOverflow)?;
        if self.funder.is_none() {
            self.funder = Some(caller);
        }
        Ok(())
    }

    pub fn apply_withdraw(&mut self, amount: u64) -> Result<()> {
        self.staked_amount = self
            .staked_amount
            .checked_sub(amount)
            .ok_or(LedgerError::ExceedsStake)?;
        if self.staked_amount == 0 {
            self.funder = None;
        }
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Checkpoint {
    pub timestamp: i64,
    /// Running balance after the event, not the event delta.
    pub staked_after: u64,
}

/// Append-only balance history with a compaction cursor. Pruning never
/// shrinks the vec; it advances `first_live`, so re-serialization can never
/// outgrow the original allocation.
#[account]
#[derive(InitSpace)]
pub struct StakeHistory {
    pub pool_id: u64,
    pub beneficiary: Pubkey,
    pub bump: u8,

    /// Index of the oldest checkpoint still reachable by queries.
    pub first_live: u32,

    #[max_len(MAX_CHECKPOINTS)]
    pub checkpoints: Vec<Checkpoint>,
}

impl StakeHistory {
    pub fn live(&self) -> &[Checkpoint] {
        &self.checkpoints[self.first_live as usize..]
    }

    pub fn append(&mut self, timestamp: i64, staked_after: u64) -> Result<()> {
        if let Some(last) = self.checkpoints.last() {
            require!(timestamp >= last.timestamp, LedgerError::TimestampRegression);
        }
        require!(
            self.checkpoints.len() < MAX_CHECKPOINTS,
            LedgerError::CheckpointHistoryFull
        );
        self.checkpoints.push(Checkpoint {
            timestamp,
            staked_after,
        });
        Ok(())
    }

    /// Absolute index of the newest live checkpoint with timestamp <= time.
    pub fn floor_index(&self, time: i64) -> Option<usize> {
        let live = self.live();
        let mut lo = 0usize;
        let mut hi = live.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if live[mid].timestamp <= time {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo == 0 {
            None
        } else {
            Some(self.first_live as usize + lo - 1)
        }
    }

    /// Balance held at `time`; 0 when no checkpoint precedes it.
    pub fn amount_at(&self, time: i64) -> u64 {
        self.floor_index(time)
            .map(|i| self.checkpoints[i].staked_after)
            .unwrap_or(0)
    }

    /// Compaction: keep the floor entry at `time` and everything newer.
    /// With no floor entry, nothing is older than the boundary and the
    /// history is left untouched.
    pub fn prune_before(&mut self, time: i64) {
        if let Some(idx) = self.floor_index(time) {
            self.first_live = idx as u32;
        }
    }
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SetStatus {
    Idle = 0,
    Adding = 1,
    Added = 2,
    Active = 3,
}

impl SetStatus {
    pub fn from_u8(v: u8) -> Option<SetStatus> {
        match v {
            0 => Some(SetStatus::Idle),
            1 => Some(SetStatus::Adding),
            2 => Some(SetStatus::Added),
            3 => Some(SetStatus::Active),
            _ => None,
        }
    }
}

/// One lifecycle-gated pool set. Instantiated twice (prize-pool set and
/// user-count set) so both follow the identical state machine without
/// duplicated transition logic.
#[account]
#[derive(InitSpace)]
pub struct RegistrationSet {
    /// SET_KIND_PRIZE or SET_KIND_USER_COUNT; part of the PDA seeds.
    pub kind: u8,
    pub bump: u8,

    pub status: u8,

    /// Reference time frozen by the first prune call of the round. Only
    /// meaningful while `round_time_set` holds; any i64 is a valid time.
    pub round_time: i64,
    pub round_time_set: bool,

    #[max_len(MAX_SET_POOLS)]
    pub pools: Vec<u64>,
}

impl RegistrationSet {
    pub fn status(&self) -> Result<SetStatus> {
        SetStatus::from_u8(self.status).ok_or_else(|| error!(LedgerError::InvalidStatus))
    }

    /// Reset to Idle with an empty set; valid from any state.
    pub fn clear(&mut self) {
        self.status = SetStatus::Idle as u8;
        self.round_time = 0;
        self.round_time_set = false;
        self.pools.clear();
    }

    /// Forward-only transitions: Idle -> Adding -> Added -> Active.
    pub fn transition(&mut self, next: SetStatus) -> Result<()> {
        let current = self.status()?;
        let valid = matches!(
            (current, next),
            (SetStatus::Idle, SetStatus::Adding)
                | (SetStatus::Adding, SetStatus::Added)
                | (SetStatus::Added, SetStatus::Active)
        );
        require!(valid, LedgerError::InvalidStatusTransition);
        self.status = next as u8;
        Ok(())
    }

    pub fn require_status(&self, expected: SetStatus) -> Result<()> {
        if self.status()? == expected {
            return Ok(());
        }
        Err(match expected {
            SetStatus::Adding => error!(LedgerError::SetNotAdding),
            SetStatus::Added => error!(LedgerError::SetNotAdded),
            SetStatus::Active => error!(LedgerError::SetNotActive),
            SetStatus::Idle => error!(LedgerError::InvalidStatusTransition),
        })
    }

    pub fn add_pool(&mut self, pool_id: u64, pool_count: u64) -> Result<()> {
        self.require_status(SetStatus::Adding)?;
        require!(pool_id < pool_count, LedgerError::UnknownPool);
        require!(!self.pools.contains(&pool_id), LedgerError::DuplicatePool);
        require!(self.pools.len() < MAX_SET_POOLS, LedgerError::SetFull);
        self.pools.push(pool_id);
        Ok(())
    }

    /// Freeze or re-check the round's reference time during pruning.
    pub fn pin_round_time(&mut self, time: i64) -> Result<()> {
        if !self.round_time_set {
            self.round_time = time;
            self.round_time_set = true;
        } else {
            require!(self.round_time == time, LedgerError::PruneTimeMismatch);
        }
        Ok(())
    }
}

/// Global participant index in first-ever-deposit order. Prune batches
/// address users by their index here.
#[account]
#[derive(InitSpace)]
pub struct UserRegistry {
    pub bump: u8,

    #[max_len(MAX_USERS)]
    pub users: Vec<Pubkey>,
}

impl UserRegistry {
    pub fn register(&mut self, beneficiary: Pubkey) -> Result<()> {
        if self.users.contains(&beneficiary) {
            return Ok(());
        }
        require!(self.users.len() < MAX_USERS, LedgerError::UserRegistryFull);
        self.users.push(beneficiary);
        Ok(())
    }
}

/// Beneficiaries barred from initiating new deposits. Existing balances,
/// withdrawals and harvests are unaffected.
#[account]
#[derive(InitSpace)]
pub struct Blacklist {
    pub bump: u8,

    #[max_len(MAX_BLACKLIST)]
    pub banned: Vec<Pubkey>,
}

impl Blacklist {
    pub fn add(&mut self, beneficiary: Pubkey) -> Result<()> {
        require!(!self.banned.contains(&beneficiary), LedgerError::Blacklisted);
        require!(self.banned.len() < MAX_BLACKLIST, LedgerError::BlacklistFull);
        self.banned.push(beneficiary);
        Ok(())
    }

    pub fn remove(&mut self, beneficiary: &Pubkey) -> Result<()> {
        let pos = self
            .banned
            .iter()
            .position(|b| b == beneficiary)
            .ok_or(LedgerError::NotBlacklisted)?;
        self.banned.remove(pos);
        Ok(())
    }

    pub fn contains(&self, beneficiary: &Pubkey) -> bool {
        self.banned.contains(beneficiary)
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    fn config_with_ceiling(mint_ceiling: u64) -> Config {
        Config {
            admin: Pubkey::new_unique(),
            bump: 255,
            controller: Pubkey::new_unique(),
            reward_mint: Pubkey::new_unique(),
            prize_vault: Pubkey::new_unique(),
            prize_vault_bump: 255,
            reward_per_slot: 0,
            total_reward_weight: 0,
            pool_count: 0,
            multiplier_denominator: DEFAULT_MULTIPLIER_DENOMINATOR,
            minted_rewards: 0,
            mint_ceiling,
            paused: false,
            version: INITIAL_VERSION,
        }
    }

    #[test]
    fn reserve_mint_accumulates_up_to_the_ceiling() {
        let mut c = config_with_ceiling(100);
        c.reserve_mint(60).unwrap();
        assert_eq!(c.minted_rewards, 60);
        // Exactly to the ceiling is still a valid payout.
        c.reserve_mint(40).unwrap();
        assert_eq!(c.minted_rewards, 100);
        assert!(c.reserve_mint(1).is_err());
    }

    #[test]
    fn crossing_the_ceiling_leaves_the_tally_unchanged() {
        let mut c = config_with_ceiling(100);
        c.reserve_mint(90).unwrap();
        assert!(c.reserve_mint(11).is_err());
        assert_eq!(c.minted_rewards, 90);
        // Headroom that still fits goes through afterwards.
        c.reserve_mint(10).unwrap();
        assert_eq!(c.minted_rewards, 100);
    }

    #[test]
    fn reserve_mint_survives_u64_wraparound_attempts() {
        let mut c = config_with_ceiling(u64::MAX);
        c.reserve_mint(u64::MAX - 1).unwrap();
        assert!(c.reserve_mint(2).is_err());
        assert_eq!(c.minted_rewards, u64::MAX - 1);
    }
}

#[cfg(test)]
mod adapter_tests {
    use super::*;

    #[test]
    fn adapter_kind_round_trips_and_rejects_unknown_bytes() {
        assert_eq!(AdapterKind::from_u8(0), Some(AdapterKind::Vault));
        assert_eq!(AdapterKind::from_u8(1), Some(AdapterKind::Lending));
        assert_eq!(AdapterKind::from_u8(2), Some(AdapterKind::RewardSink));
        assert_eq!(AdapterKind::from_u8(3), None);
        assert_eq!(AdapterKind::from_u8(255), None);
    }
}

#[cfg(test)]
mod history_tests {
    use super::*;

    fn history() -> StakeHistory {
        StakeHistory {
            pool_id: 0,
            beneficiary: Pubkey::new_unique(),
            bump: 255,
            first_live: 0,
            checkpoints: vec![],
        }
    }

    #[test]
    fn amount_at_is_zero_before_any_checkpoint() {
        let mut h = history();
        assert_eq!(h.amount_at(100), 0);
        h.append(50, 10).unwrap();
        assert_eq!(h.amount_at(49), 0);
        assert_eq!(h.amount_at(50), 10);
        assert_eq!(h.amount_at(51), 10);
    }

    #[test]
    fn equal_timestamps_resolve_to_the_running_balance() {
        // Two deposits in the same second: the floor lookup must land on the
        // last event, which already carries the summed running balance.
        let mut h = history();
        h.append(10, 1).unwrap();
        h.append(10, 3).unwrap();
        assert_eq!(h.amount_at(10), 3);
        assert_eq!(h.amount_at(11), 3);
    }

    #[test]
    fn append_rejects_timestamp_regression() {
        let mut h = history();
        h.append(10, 1).unwrap();
        assert!(h.append(9, 2).is_err());
        // Equal timestamp is fine (same-second events).
        assert!(h.append(10, 2).is_ok());
    }

    #[test]
    fn floor_lookup_across_many_entries() {
        let mut h = history();
        for i in 0..20i64 {
            h.append(i * 10, (i as u64 + 1) * 100).unwrap();
        }
        assert_eq!(h.amount_at(0), 100);
        assert_eq!(h.amount_at(95), 1000);
        assert_eq!(h.amount_at(190), 2000);
        assert_eq!(h.amount_at(-1), 0);
    }

    #[test]
    fn prune_keeps_the_boundary_and_everything_newer() {
        let mut h = history();
        h.append(10, 100).unwrap();
        h.append(20, 200).unwrap();
        h.append(30, 300).unwrap();
        h.append(40, 400).unwrap();

        let t = 25;
        let before = h.amount_at(t);
        h.prune_before(t);
        assert_eq!(h.first_live, 1);
        assert_eq!(h.live().len(), 3);
        assert_eq!(h.amount_at(t), before);
        // Newer queries still work off the retained tail.
        assert_eq!(h.amount_at(40), 400);
    }

    #[test]
    fn prune_is_idempotent() {
        let mut h = history();
        h.append(10, 100).unwrap();
        h.append(20, 200).unwrap();
        h.append(30, 300).unwrap();

        h.prune_before(20);
        let cursor = h.first_live;
        h.prune_before(20);
        assert_eq!(h.first_live, cursor);
        assert_eq!(h.amount_at(20), 200);
    }

    #[test]
    fn prune_with_no_floor_entry_is_a_no_op() {
        let mut h = history();
        h.append(100, 5).unwrap();
        h.prune_before(50);
        assert_eq!(h.first_live, 0);
        assert_eq!(h.amount_at(100), 5);
    }

    #[test]
    fn appends_continue_after_prune() {
        let mut h = history();
        h.append(10, 100).unwrap();
        h.append(20, 200).unwrap();
        h.prune_before(20);
        h.append(30, 50).unwrap();
        assert_eq!(h.amount_at(29), 200);
        assert_eq!(h.amount_at(30), 50);
    }
}

#[cfg(test)]
mod position_tests {
    use super::*;

    fn position() -> Position {
        Position {
            pool_id: 0,
            beneficiary: Pubkey::new_unique(),
            bump: 255,
            staked_amount: 0,
            reward_debt: 0,
            funder: None,
        }
    }

    #[test]
    fn first_depositor_becomes_the_funder() {
        let funder = Pubkey::new_unique();
        let mut p = position();
        p.check_deposit_funder(&funder).unwrap();
        p.apply_deposit(funder, 100).unwrap();
        assert_eq!(p.funder, Some(funder));
        assert_eq!(p.staked_amount, 100);
    }

    #[test]
    fn second_funder_is_rejected_while_position_is_live() {
        let funder_a = Pubkey::new_unique();
        let funder_c = Pubkey::new_unique();
        let mut p = position();
        p.apply_deposit(funder_a, 100).unwrap();

        assert!(p.check_deposit_funder(&funder_c).is_err());
        // The original funder may keep adding.
        assert!(p.check_deposit_funder(&funder_a).is_ok());
    }

    #[test]
    fn only_the_funder_withdraws() {
        let funder = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let mut p = position();
        p.apply_deposit(funder, 100).unwrap();

        assert!(p.check_withdraw(&other, 10).is_err());
        assert!(p.check_withdraw(&funder, 101).is_err());
        assert!(p.check_withdraw(&funder, 100).is_ok());
    }

    #[test]
    fn full_withdrawal_clears_the_funder_and_allows_reopen() {
        let funder_a = Pubkey::new_unique();
        let funder_b = Pubkey::new_unique();
        let mut p = position();
        p.apply_deposit(funder_a, 100).unwrap();
        p.apply_withdraw(100).unwrap();
        assert_eq!(p.funder, None);

        // A different funder may now open the position again.
        p.check_deposit_funder(&funder_b).unwrap();
        p.apply_deposit(funder_b, 50).unwrap();
        assert_eq!(p.funder, Some(funder_b));
    }

    #[test]
    fn partial_withdrawal_keeps_the_funder() {
        let funder = Pubkey::new_unique();
        let mut p = position();
        p.apply_deposit(funder, 100).unwrap();
        p.apply_withdraw(40).unwrap();
        assert_eq!(p.funder, Some(funder));
        assert_eq!(p.staked_amount, 60);
    }
}



#[cfg(test)]
mod scenario_tests {
    use super::*;
    use crate::constants::{DEFAULT_MULTIPLIER_DENOMINATOR, SET_KIND_PRIZE};
    use crate::utils::find_winner;

    fn pool(pool_id: u64) -> Pool {
        Pool {
            pool_id,
            bump: 255,
            stake_adapter: Pubkey::new_unique(),
            adapter_kind: AdapterKind::Vault as u8,
            stake_mint: Pubkey::new_unique(),
            stake_vault: Pubkey::new_unique(),
            stake_vault_bump: 255,
            reward_weight: 1,
            acc_reward_per_share: 0,
            last_accrual_slot: 0,
            ticket_multiplier: DEFAULT_MULTIPLIER_DENOMINATOR,
            multiplier_denominator: DEFAULT_MULTIPLIER_DENOMINATOR,
            total_staked: 0,
            participants: vec![],
        }
    }

    fn empty_history(pool_id: u64, beneficiary: Pubkey) -> StakeHistory {
        StakeHistory {
            pool_id,
            beneficiary,
            bump: 255,
            first_live: 0,
            checkpoints: vec![],
        }
    }

    /// Two pools, two users, 100 units each at the same instant; the full
    /// clear -> Adding -> add -> Added -> prune -> Active drive must leave
    /// every ticket query unchanged.
    #[test]
    fn two_pool_round_survives_the_snapshot_protocol() {
        let user_a = Pubkey::new_unique();
        let user_b = Pubkey::new_unique();
        let t0 = 1_000i64;

        let mut pool0 = pool(0);
        let mut pool1 = pool(1);
        let mut hist_a0 = empty_history(0, user_a);
        let mut hist_b1 = empty_history(1, user_b);

        // Deposits at t0.
        pool0.total_staked = 100;
        pool0.register_participant(user_a).unwrap();
        hist_a0.append(t0, 100).unwrap();

        pool1.total_staked = 100;
        pool1.register_participant(user_b).unwrap();
        hist_b1.append(t0, 100).unwrap();

        let empty_a1 = empty_history(1, user_a);
        let empty_b0 = empty_history(0, user_b);

        let query = |p: &Pool, h: &StakeHistory, staked: u64| p.tickets_at(h, staked, t0).unwrap();

        assert_eq!(query(&pool0, &hist_a0, 100), 100);
        assert_eq!(query(&pool1, &hist_b1, 100), 100);
        // Cross queries are zero.
        assert_eq!(query(&pool1, &empty_a1, 0), 0);
        assert_eq!(query(&pool0, &empty_b0, 0), 0);

        // Round controller drive.
        let mut prize_set = RegistrationSet {
            kind: SET_KIND_PRIZE,
            bump: 255,
            status: SetStatus::Idle as u8,
            round_time: 0,
            round_time_set: false,
            pools: vec![],
        };
        prize_set.clear();
        prize_set.transition(SetStatus::Adding).unwrap();
        prize_set.add_pool(0, 2).unwrap();
        prize_set.add_pool(1, 2).unwrap();
        prize_set.transition(SetStatus::Added).unwrap();

        prize_set.pin_round_time(t0).unwrap();
        for h in [&mut hist_a0, &mut hist_b1] {
            h.prune_before(t0);
        }
        prize_set.transition(SetStatus::Active).unwrap();

        assert_eq!(query(&pool0, &hist_a0, 100), 100);
        assert_eq!(query(&pool1, &hist_b1, 100), 100);
        assert_eq!(query(&pool1, &empty_a1, 0), 0);
        assert_eq!(query(&pool0, &empty_b0, 0), 0);
    }

    /// ticketsAt at a fixed time is invariant under pruning, however the
    /// user range is partitioned into batches.
    #[test]
    fn prune_partitions_do_not_change_ticket_queries() {
        let t = 500i64;
        let users: Vec<Pubkey> = (0..6).map(|_| Pubkey::new_unique()).collect();
        let p = pool(0);

        let build = |seed: i64| {
            let mut h = empty_history(0, Pubkey::new_unique());
            h.append(100 + seed, 10).unwrap();
            h.append(300 + seed, 40).unwrap();
            h.append(450 + seed, 25).unwrap();
            h.append(600 + seed, 90).unwrap();
            h
        };

        let mut histories: Vec<StakeHistory> =
            (0..users.len()).map(|i| build(i as i64)).collect();
        let current: Vec<u64> = histories
            .iter()
            .map(|h| h.checkpoints.last().unwrap().staked_after)
            .collect();

        let before: Vec<u64> = histories
            .iter()
            .zip(&current)
            .map(|(h, c)| p.tickets_at(h, *c, t).unwrap())
            .collect();

        // Partition [0, 6) as [4, 6), [0, 2), [2, 4): order must not matter,
        // and a repeated overlapping batch must be harmless.
        for range in [4..6usize, 0..2, 2..4, 0..6] {
            for i in range {
                histories[i].prune_before(t);
            }
        }

        let after: Vec<u64> = histories
            .iter()
            .zip(&current)
            .map(|(h, c)| p.tickets_at(h, *c, t).unwrap())
            .collect();
        assert_eq!(before, after);

        // Winner resolution sees identical weights either way.
        let weights: Vec<(Pubkey, u64)> = users.iter().copied().zip(after.iter().copied()).collect();
        let total: u64 = after.iter().sum();
        for k in 0..total {
            assert!(find_winner(&weights, k).is_some());
        }
    }
}
