//! Sale reconciliation between a seller and its contadores.
//!
//! A seller's list holds every sale it is commissioned on; a contador's
//! list holds the subset routed through that contador. Direct sales are
//! the seller's sales not claimed by any contador, matched on order id.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::models::{ContadorInfo, SaleInfo, SellerInfo};

/// Returns the seller's sales that no contador claims, in the seller's order.
///
/// Runs in time linear in the number of sales under the seller.
pub fn direct_sales(seller: &SellerInfo) -> Vec<&SaleInfo> {
    let claimed: HashSet<&str> = seller
        .contadores
        .iter()
        .flat_map(|c| c.sales.iter().map(|s| s.order_id.as_str()))
        .collect();

    seller
        .sales
        .iter()
        .filter(|s| !claimed.contains(s.order_id.as_str()))
        .collect()
}

/// Maps order id to the commission the seller earns on that order.
pub fn seller_commission_index(seller: &SellerInfo) -> HashMap<&str, Decimal> {
    seller
        .sales
        .iter()
        .map(|s| (s.order_id.as_str(), s.commission))
        .collect()
}

/// Sum of the seller's commissions on the orders routed through `contador`.
pub fn seller_commission_on(seller: &SellerInfo, contador: &ContadorInfo) -> Decimal {
    let orders: HashSet<&str> = contador.sales.iter().map(|s| s.order_id.as_str()).collect();
    seller
        .sales
        .iter()
        .filter(|s| orders.contains(s.order_id.as_str()))
        .map(|s| s.commission)
        .sum()
}

/// Looks up the seller's commission for one order; a miss counts as zero.
pub(crate) fn lookup_seller_commission(index: &HashMap<&str, Decimal>, order_id: &str) -> Decimal {
    match index.get(order_id) {
        Some(commission) => *commission,
        None => {
            tracing::debug!(order_id, "order missing from seller list, using zero commission");
            Decimal::ZERO
        }
    }
}

/// Aggregates shown on a seller's "Vendas Diretas" node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectSalesSummary {
    pub count: usize,
    pub total_value: Decimal,
    pub total_commission: Decimal,
    /// Summed over renewal sales only.
    pub total_renewal_commission: Decimal,
}

impl DirectSalesSummary {
    /// Computes the direct-sales aggregates of a seller.
    pub fn of(seller: &SellerInfo) -> Self {
        Self::from_sales(&direct_sales(seller))
    }

    pub(crate) fn from_sales(sales: &[&SaleInfo]) -> Self {
        sales.iter().fold(Self::default(), |mut acc, sale| {
            acc.count += 1;
            acc.total_value += sale.value;
            acc.total_commission += sale.commission;
            acc.total_renewal_commission += sale.effective_renewal_commission();
            acc
        })
    }
}
