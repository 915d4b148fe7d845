use soroban_sdk::Env;

use crate::mcr::CapitalMetrics;

// ==================== Trait Definitions ====================

/// Bonding curve pricing trait
pub trait PricingCurve {
    /// Get the spot token price at the given pool state
    ///
    /// # Parameters
    /// - `total_value`: Pool value backing the token, in asset base units
    /// - `mcr_eth`: Minimum capital requirement, in asset base units
    ///
    /// # Returns
    /// Price of one whole token, in asset base units per 1e18 token units
    fn spot_price(env: Env, total_value: i128, mcr_eth: i128) -> i128;

    /// Get the token amount minted for a purchase
    ///
    /// The purchase is split into slices and each slice is priced at the
    /// curve value of its midpoint, so the result tracks the integral of
    /// the price function over the purchase range.
    ///
    /// # Parameters
    /// - `purchase_value`: Asset amount spent, in base units
    /// - `total_value`: Pool value before the purchase
    /// - `mcr_eth`: Minimum capital requirement
    ///
    /// # Returns
    /// Token amount minted, in 1e18 token units
    fn tokens_for_purchase(env: Env, purchase_value: i128, total_value: i128, mcr_eth: i128)
        -> i128;
}

/// Capital assessment trait
pub trait CapitalAssessment {
    /// Get the capital position derived from pool value and requirement
    fn capital_metrics(env: Env, total_value: i128, mcr_eth: i128) -> CapitalMetrics;
}
