use soroban_sdk::Env;

use crate::legacy_mcr::CapitalMetrics;

// ==================== Trait Definitions ====================

/// Bonding curve pricing trait
pub trait PricingCurve {
    /// Get the spot token price at the given pool state
    fn spot_price(env: Env, total_value: i128, mcr_eth: i128) -> i128;

    /// Get the token amount minted for a purchase
    ///
    /// The purchase is split into four steps and each step is priced at
    /// the curve value where the step starts.
    fn tokens_for_purchase(env: Env, purchase_value: i128, total_value: i128, mcr_eth: i128)
        -> i128;
}

/// Capital assessment trait
pub trait CapitalAssessment {
    /// Get the capital position derived from pool value and requirement
    fn capital_metrics(env: Env, total_value: i128, mcr_eth: i128) -> CapitalMetrics;
}
