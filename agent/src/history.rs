//! Client-side aggregation of the faucet's claim history

use cosmwasm_std::Uint128;
use mystery_box_faucet::msg::ClaimResponse;

/// Totals over a window of recent claims, plus one user's share of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsSummary {
    pub recent_count: usize,
    pub recent_total: Uint128,
    pub user_count: usize,
    pub user_total: Uint128,
    pub user_average: Uint128,
    /// Timestamp of the user's earliest claim in the window
    pub user_first_claim: Option<u64>,
    /// Timestamp of the user's latest claim in the window
    pub user_last_claim: Option<u64>,
}

impl ClaimsSummary {
    pub fn from_claims(claims: &[ClaimResponse], user: Option<&str>) -> Self {
        let mut summary = Self {
            recent_count: claims.len(),
            ..Default::default()
        };

        for claim in claims {
            summary.recent_total += claim.amount;

            if user != Some(claim.claimer.as_str()) {
                continue;
            }
            summary.user_count += 1;
            summary.user_total += claim.amount;
            summary.user_first_claim = Some(
                summary
                    .user_first_claim
                    .map_or(claim.timestamp, |t| t.min(claim.timestamp)),
            );
            summary.user_last_claim = Some(
                summary
                    .user_last_claim
                    .map_or(claim.timestamp, |t| t.max(claim.timestamp)),
            );
        }

        if summary.user_count > 0 {
            summary.user_average = summary
                .user_total
                .multiply_ratio(1u128, summary.user_count as u128);
        }

        summary
    }
}

/// Render a base-unit amount with the token's decimals, truncated to 4 places.
///
/// Works on the decimal digits directly, so any `decimals` a token reports is
/// accepted without overflowing a power of ten.
pub fn format_amount(amount: Uint128, decimals: u8) -> String {
    let decimals = decimals as usize;
    let digits = format!("{:0>width$}", amount.u128(), width = decimals + 1);
    let (whole, frac) = digits.split_at(digits.len() - decimals);

    let frac_4: String = frac.chars().chain(std::iter::repeat('0')).take(4).collect();
    format!("{}.{}", whole, frac_4)
}
