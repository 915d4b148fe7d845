use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, panic_with_error, Env, U256,
};

pub use crate::traits::{CapitalAssessment, PricingCurve};

// ==================== Constants Definition ====================

/// Capital ratio precision (1/10000, i.e., 10000 = 100%)
const RATIO_PRECISION: i128 = 10000;

/// Fourth power of the ratio precision, scales the quartic curve term
const RATIO_PRECISION_4TH: u128 = 10_000_000_000_000_000;

/// Curve offset, price floor in asset base units (0.01028 per token)
const CURVE_A: i128 = 10_280_000_000_000_000;

/// Curve steepness divisor
const CURVE_C: u128 = 5_800_000;

/// One whole token in base units
const TOKEN_PRECISION: i128 = 1_000_000_000_000_000_000;

/// Number of slices a purchase is split into for pricing
const PRICE_SLICES: i128 = 32;

// Contract metadata
contractmeta!(
    key = "Description",
    val = "Capital requirement engine pricing mutual tokens on a quartic bonding curve"
);

// ==================== Error Type Definition ====================

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum McrError {
    // Invalid argument
    InvalidArgument = 1,
    // Arithmetic overflow during curve evaluation
    CalculationOverflow = 2,
}

// ==================== Data Type Definition ====================

/// Capital position derived from pool value and the capital requirement
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CapitalMetrics {
    // Pool value backing the token, in asset base units
    pub total_value: i128,
    // Minimum capital requirement, in asset base units
    pub mcr_eth: i128,
    // Coverage ratio in 1/10000 units (10000 = 100%)
    pub mcr_ratio: i128,
}

// ==================== Contract Definition ====================

#[contract]
pub struct McrEngine;

// ==================== Contract Implementation ====================

#[contractimpl]
impl PricingCurve for McrEngine {
    fn spot_price(env: Env, total_value: i128, mcr_eth: i128) -> i128 {
        Self::require_valid_state(&env, total_value, mcr_eth);
        Self::spot_price_internal(&env, total_value, mcr_eth)
    }

    fn tokens_for_purchase(
        env: Env,
        purchase_value: i128,
        total_value: i128,
        mcr_eth: i128,
    ) -> i128 {
        Self::require_valid_state(&env, total_value, mcr_eth);
        if purchase_value <= 0 {
            panic_with_error!(&env, McrError::InvalidArgument);
        }

        let slice = purchase_value / PRICE_SLICES;
        let mut cursor = total_value;
        let mut tokens: i128 = 0;

        for i in 0..PRICE_SLICES {
            // Remainder from the integer split is folded into the last slice
            let part = if i == PRICE_SLICES - 1 {
                purchase_value - slice * (PRICE_SLICES - 1)
            } else {
                slice
            };
            if part == 0 {
                continue;
            }

            // Each slice is priced at the curve value of its midpoint
            let price = Self::spot_price_internal(&env, cursor + part / 2, mcr_eth);
            let minted = Self::tokens_at_price(&env, part, price);

            tokens = tokens
                .checked_add(minted)
                .unwrap_or_else(|| panic_with_error!(&env, McrError::CalculationOverflow));
            cursor += part;
        }

        tokens
    }
}

#[contractimpl]
impl CapitalAssessment for McrEngine {
    fn capital_metrics(env: Env, total_value: i128, mcr_eth: i128) -> CapitalMetrics {
        Self::require_valid_state(&env, total_value, mcr_eth);
        CapitalMetrics {
            total_value,
            mcr_eth,
            mcr_ratio: Self::mcr_ratio_internal(&env, total_value, mcr_eth),
        }
    }
}

// ==================== Internal Helper Functions ====================

impl McrEngine {
    /// Validate pool state arguments
    fn require_valid_state(env: &Env, total_value: i128, mcr_eth: i128) {
        if total_value < 0 || mcr_eth <= 0 {
            panic_with_error!(env, McrError::InvalidArgument);
        }
    }

    /// Coverage ratio in 1/10000 units
    fn mcr_ratio_internal(env: &Env, total_value: i128, mcr_eth: i128) -> i128 {
        let scaled = total_value
            .checked_mul(RATIO_PRECISION)
            .unwrap_or_else(|| panic_with_error!(env, McrError::CalculationOverflow));
        scaled / mcr_eth
    }

    /// Evaluate the bonding curve at the given pool value
    ///
    /// price = CURVE_A + mcr_eth * ratio^4 / CURVE_C / RATIO_PRECISION_4TH
    ///
    /// The quartic term exceeds i128 range for realistic pool sizes, so the
    /// intermediate product is carried in U256.
    fn spot_price_internal(env: &Env, total_value: i128, mcr_eth: i128) -> i128 {
        let ratio = Self::mcr_ratio_internal(env, total_value, mcr_eth);

        let ratio_4th = U256::from_u128(env, ratio as u128).pow(4);
        let term = U256::from_u128(env, mcr_eth as u128)
            .mul(&ratio_4th)
            .div(&U256::from_u128(env, CURVE_C))
            .div(&U256::from_u128(env, RATIO_PRECISION_4TH));

        let term_u128 = term
            .to_u128()
            .unwrap_or_else(|| panic_with_error!(env, McrError::CalculationOverflow));
        let term_i128 = i128::try_from(term_u128)
            .unwrap_or_else(|_| panic_with_error!(env, McrError::CalculationOverflow));

        CURVE_A
            .checked_add(term_i128)
            .unwrap_or_else(|| panic_with_error!(env, McrError::CalculationOverflow))
    }

    /// Token amount bought with `value` at a fixed price, in 1e18 token units
    fn tokens_at_price(env: &Env, value: i128, price: i128) -> i128 {
        let scaled = U256::from_u128(env, value as u128)
            .mul(&U256::from_u128(env, TOKEN_PRECISION as u128));
        let minted = scaled.div(&U256::from_u128(env, price as u128));

        let minted_u128 = minted
            .to_u128()
            .unwrap_or_else(|| panic_with_error!(env, McrError::CalculationOverflow));
        i128::try_from(minted_u128)
            .unwrap_or_else(|_| panic_with_error!(env, McrError::CalculationOverflow))
    }
}
