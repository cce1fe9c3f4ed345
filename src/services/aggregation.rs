//! Aggregation Service
//!
//! Percentage-of-total and grouped distributions for the dashboard and
//! charts. Percentages are always derived from the caller's current active
//! asset set, never stored, so a delete or an amount change is reflected in
//! the very next read.
//!
//! Groups are sorted by key before colors are assigned, which keeps the
//! fallback palette stable across requests regardless of row order.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::db::Asset;

/// Fixed colors for well-known group keys (asset names and risk levels)
const COLOR_TABLE: &[(&str, &str)] = &[
    ("STOCKS", "#FF6384"),
    ("MUTUAL FUND", "#36A2EB"),
    ("FD", "#FFCE56"),
    ("SAVING", "#4BC0C0"),
    ("EPF", "#9966FF"),
    ("PF", "#FF9F40"),
    ("Low", "#4CAF50"),
    ("Moderate", "#FFC107"),
    ("High", "#F44336"),
];

/// Cycled through for asset names with no fixed color
const FALLBACK_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6B6B", "#4ECDC4",
];

const DEFAULT_COLOR: &str = "#999999";

/// Which categorical key a distribution groups on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    InvestmentType,
    /// Asset names are upper-cased before grouping
    AssetName,
    RiskCategory,
}

/// One pie chart segment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    pub color: String,
}

/// Share of `total` that `amount` represents, in percent, half-up rounded to
/// two decimals. Zero when the total is zero.
pub fn percentage(amount: Decimal, total: Decimal) -> Decimal {
    if total > Decimal::ZERO {
        (amount / total * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    }
}

/// Group active assets by a categorical key and reduce each group to a
/// summed amount, percentage of the grand total, and a display color.
///
/// Groups come back sorted by key. Individually rounded group percentages
/// may not sum to exactly 100; that is accepted, not corrected.
pub fn distribution(assets: &[Asset], group_by: GroupBy) -> Vec<PieSlice> {
    let total: Decimal = assets.iter().map(|a| a.amount).sum();

    let mut groups: BTreeMap<String, Decimal> = BTreeMap::new();
    for asset in assets {
        let key = match group_by {
            GroupBy::InvestmentType => asset.investment_type.clone(),
            GroupBy::AssetName => asset.name.to_uppercase(),
            GroupBy::RiskCategory => asset.risk_category.clone(),
        };
        *groups.entry(key).or_default() += asset.amount;
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| PieSlice {
            percentage: percentage(value, total),
            color: color_for(group_by, &name, index).to_string(),
            name,
            value,
        })
        .collect()
}

fn color_for(group_by: GroupBy, key: &str, index: usize) -> &'static str {
    match group_by {
        GroupBy::InvestmentType => match key {
            "Invested" => "#4CAF50",
            "Liquid" => "#2196F3",
            _ => DEFAULT_COLOR,
        },
        GroupBy::AssetName => lookup_color(key)
            .unwrap_or_else(|| FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()]),
        GroupBy::RiskCategory => lookup_color(key).unwrap_or(DEFAULT_COLOR),
    }
}

fn lookup_color(key: &str) -> Option<&'static str> {
    COLOR_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn asset(name: &str, amount: Decimal, investment_type: &str, risk: &str) -> Asset {
        Asset {
            id: 0,
            user_id: 1,
            name: name.to_string(),
            amount,
            target_amount: None,
            investment_type: investment_type.to_string(),
            risk_category: risk.to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_percentage_basic() {
        assert_eq!(percentage(dec!(700), dec!(1000)), dec!(70.00));
        assert_eq!(percentage(dec!(300), dec!(1000)), dec!(30.00));
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(dec!(0), dec!(0)), dec!(0));
        assert_eq!(percentage(dec!(100), dec!(0)), dec!(0));
    }

    #[test]
    fn test_percentage_single_asset_is_full_share() {
        assert_eq!(percentage(dec!(123.45), dec!(123.45)), dec!(100.00));
    }

    #[test]
    fn test_percentage_zero_amount_nonzero_total() {
        // adding a zero asset leaves the others untouched
        assert_eq!(percentage(dec!(0), dec!(1000)), dec!(0.00));
        assert_eq!(percentage(dec!(700), dec!(1000)), dec!(70.00));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 1.25 / 1000 = 0.125% -> 0.13, not banker's 0.12
        assert_eq!(percentage(dec!(1.25), dec!(1000)), dec!(0.13));
    }

    #[test]
    fn test_percentages_sum_near_100() {
        let assets = vec![
            asset("A", dec!(100), "Liquid", "Low"),
            asset("B", dec!(100), "Liquid", "Low"),
            asset("C", dec!(100), "Liquid", "Low"),
        ];
        let total: Decimal = assets.iter().map(|a| a.amount).sum();
        let sum: Decimal = assets.iter().map(|a| percentage(a.amount, total)).sum();

        // 33.33 * 3 = 99.99; independent rounding keeps it near 100
        assert!((sum - dec!(100)).abs() <= dec!(0.05));
    }

    #[test]
    fn test_distribution_by_investment_type() {
        let assets = vec![
            asset("Stocks", dec!(600), "Invested", "High"),
            asset("Saving", dec!(300), "Liquid", "Low"),
            asset("FD", dec!(100), "Invested", "Low"),
        ];

        let dist = distribution(&assets, GroupBy::InvestmentType);

        assert_eq!(dist.len(), 2);
        // sorted by key: Invested before Liquid
        assert_eq!(dist[0].name, "Invested");
        assert_eq!(dist[0].value, dec!(700));
        assert_eq!(dist[0].percentage, dec!(70.00));
        assert_eq!(dist[0].color, "#4CAF50");
        assert_eq!(dist[1].name, "Liquid");
        assert_eq!(dist[1].value, dec!(300));
        assert_eq!(dist[1].percentage, dec!(30.00));
        assert_eq!(dist[1].color, "#2196F3");
    }

    #[test]
    fn test_distribution_unknown_investment_type_gets_default_color() {
        let assets = vec![asset("Loan", dec!(100), "Lend", "Moderate")];
        let dist = distribution(&assets, GroupBy::InvestmentType);
        assert_eq!(dist[0].color, "#999999");
    }

    #[test]
    fn test_distribution_by_asset_name_uppercases_and_merges() {
        let assets = vec![
            asset("stocks", dec!(400), "Invested", "High"),
            asset("Stocks", dec!(200), "Invested", "High"),
            asset("Gold", dec!(400), "Invested", "Moderate"),
        ];

        let dist = distribution(&assets, GroupBy::AssetName);

        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].name, "GOLD");
        assert_eq!(dist[0].percentage, dec!(40.00));
        assert_eq!(dist[1].name, "STOCKS");
        assert_eq!(dist[1].value, dec!(600));
        // STOCKS has a fixed color regardless of position
        assert_eq!(dist[1].color, "#FF6384");
    }

    #[test]
    fn test_distribution_fallback_palette_is_stable() {
        // Unknown names take palette colors by sorted position, so the same
        // set always colors the same way
        let assets = vec![
            asset("Zebra", dec!(100), "Liquid", "Low"),
            asset("Alpha", dec!(100), "Liquid", "Low"),
        ];

        let dist = distribution(&assets, GroupBy::AssetName);

        assert_eq!(dist[0].name, "ALPHA");
        assert_eq!(dist[0].color, FALLBACK_PALETTE[0]);
        assert_eq!(dist[1].name, "ZEBRA");
        assert_eq!(dist[1].color, FALLBACK_PALETTE[1]);
    }

    #[test]
    fn test_distribution_by_risk() {
        let assets = vec![
            asset("A", dec!(500), "Invested", "High"),
            asset("B", dec!(300), "Liquid", "Low"),
            asset("C", dec!(200), "Liquid", "Moderate"),
        ];

        let dist = distribution(&assets, GroupBy::RiskCategory);

        assert_eq!(dist.len(), 3);
        let high = dist.iter().find(|s| s.name == "High").unwrap();
        assert_eq!(high.color, "#F44336");
        assert_eq!(high.percentage, dec!(50.00));
        let low = dist.iter().find(|s| s.name == "Low").unwrap();
        assert_eq!(low.color, "#4CAF50");
        let moderate = dist.iter().find(|s| s.name == "Moderate").unwrap();
        assert_eq!(moderate.color, "#FFC107");
    }

    #[test]
    fn test_distribution_empty_set() {
        let dist = distribution(&[], GroupBy::InvestmentType);
        assert!(dist.is_empty());
    }

    #[test]
    fn test_distribution_zero_amounts() {
        let assets = vec![asset("A", dec!(0), "Liquid", "Low")];
        let dist = distribution(&assets, GroupBy::AssetName);
        assert_eq!(dist[0].percentage, dec!(0));
    }
}
