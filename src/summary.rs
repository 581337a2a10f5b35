//! Cart summary returned by the coupon endpoints

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use crate::domain::evaluator::EvaluationResult;

const MONEY_DP: u32 = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Cart total before discount
    pub total_price: Decimal,
    pub tax: Decimal,
    /// Discount as a percentage of `total_price`
    pub discount: Decimal,
    pub discount_value: Decimal,
    /// `total_price - discount_value + tax`
    pub final_price: Decimal,
}

impl CartSummary {
    pub fn new(total_price: Decimal, tax: Decimal, discount_percent: Decimal) -> Self {
        let discount_value = total_price * discount_percent / Decimal::ONE_HUNDRED;
        Self {
            total_price: round(total_price),
            tax: round(tax),
            discount: round(discount_percent),
            discount_value: round(discount_value),
            final_price: round(total_price - discount_value + tax),
        }
    }

    pub fn without_discount(total_price: Decimal, tax: Decimal) -> Self { Self::new(total_price, tax, Decimal::ZERO) }
}

impl From<&EvaluationResult> for CartSummary {
    fn from(result: &EvaluationResult) -> Self { Self::new(result.total_price, result.tax, result.discount_percent) }
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}
