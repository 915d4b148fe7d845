use soroban_sdk::{contracttype, Address, Env};

use crate::claims::{Claim, VoteRecord};

// ==================== Claim Submission Functions ====================

pub trait ClaimSubmission {
    /// File a claim against an owned cover
    ///
    /// # Parameters
    /// - `claimant`: Account filing the claim, must own the cover
    /// - `cover_id`: Cover the claim is filed against
    /// - `requested_amount`: Payout requested, at most the cover amount
    ///
    /// A deposit proportional to the requested amount is pulled from the
    /// claimant in the cover's payout asset and held until redemption.
    ///
    /// Returns the id of the stored claim
    fn submit_claim(env: Env, claimant: Address, cover_id: u32, requested_amount: i128) -> u32;
}

// ==================== Assessment Functions ====================

pub trait Assessment {
    /// Lock mutual tokens as assessment stake
    fn deposit_stake(env: Env, assessor: Address, amount: i128);

    /// Release assessment stake back to the assessor
    ///
    /// Stake stays locked until the cooldown after the latest poll the
    /// assessor voted in has elapsed.
    fn withdraw_stake(env: Env, assessor: Address, amount: i128);

    /// Vote on an open claim poll
    ///
    /// The vote weight is the assessor's stake at the time of voting.
    /// One vote per assessor per claim.
    fn cast_vote(env: Env, assessor: Address, claim_id: u32, accept: bool);
}

// ==================== Redemption Functions ====================

pub trait Redemption {
    /// Pay out an accepted claim
    ///
    /// Callable by anyone once the poll has closed and the cooldown has
    /// passed, within the redemption window. Sends the claimed amount from
    /// the capital pool to the cover owner and refunds the deposit.
    fn redeem_claim_payout(env: Env, claim_id: u32);
}

// ==================== Query Functions ====================

pub trait ClaimQuery {
    /// Get a stored claim record
    fn claim(env: Env, claim_id: u32) -> Claim;

    /// Number of claims filed so far
    fn claim_count(env: Env) -> u32;

    /// Current assessment stake of an account
    fn stake_of(env: Env, assessor: Address) -> i128;

    /// Vote an assessor cast on a claim, if any
    fn vote_of(env: Env, claim_id: u32, assessor: Address) -> Option<VoteRecord>;

    /// Earliest timestamp at which the assessor may withdraw stake
    ///
    /// Zero when the assessor has never voted.
    fn stake_unlock_time(env: Env, assessor: Address) -> u64;
}

pub trait ConfigQuery {
    fn get_admin(env: Env) -> Address;
    fn get_cover_contract(env: Env) -> Address;
    fn get_capital_pool(env: Env) -> Address;
    fn get_mutual_token(env: Env) -> Address;
    fn get_deposit_ratio(env: Env) -> i128;
    fn get_voting_period(env: Env) -> u64;
    fn get_payout_cooldown(env: Env) -> u64;
    fn get_redemption_window(env: Env) -> u64;
}

// ==================== Management Functions ====================

pub trait AdminManagement {
    /// Update the claim deposit ratio (admin only)
    fn set_deposit_ratio_by_admin(env: Env, deposit_ratio: i128);
}

// ==================== Event Definitions ====================

/// Claim submitted event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimSubmittedEvent {
    pub claimant: Address,
    pub cover_id: u32,
    pub amount: i128,
    pub deposit: i128,
    pub poll_end: u64,
}

/// Stake deposited event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeDepositedEvent {
    pub assessor: Address,
    pub amount: i128,
    pub total_stake: i128,
}

/// Stake withdrawn event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeWithdrawnEvent {
    pub assessor: Address,
    pub amount: i128,
    pub remaining_stake: i128,
}

/// Vote cast event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub assessor: Address,
    pub accept: bool,
    pub weight: i128,
}

/// Claim payout redeemed event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimRedeemedEvent {
    pub claimant: Address,
    pub cover_id: u32,
    pub amount: i128,
    pub deposit: i128,
}

/// Deposit ratio updated event
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRatioUpdatedEvent {
    pub admin: Address,
    pub deposit_ratio: i128,
}
