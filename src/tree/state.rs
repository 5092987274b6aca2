//! Expand/collapse state of the tree browser.

use std::collections::HashSet;

use crate::models::{ComissaoResponse, SellerInfo};
use crate::reconcile::direct_sales;

use super::identity::{NodeRef, Subtree};

/// Set of expanded nodes. Owned by the browser; the row projections never
/// read it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandState {
    expanded: HashSet<NodeRef>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: &NodeRef) -> bool {
        self.expanded.contains(key)
    }

    pub fn toggle(&mut self, key: NodeRef) {
        if !self.expanded.remove(&key) {
            tracing::debug!(%key, "expand");
            self.expanded.insert(key);
        }
    }

    /// Expands every seller and the renewal partner, plus each direct-sales
    /// and contador node that has at least one sale.
    pub fn expand_all(&mut self, report: &ComissaoResponse) {
        self.expanded = expandable_keys(report);
    }

    /// Expands the renewal partner and every seller, leaving direct-sales
    /// and contador nodes collapsed.
    pub fn expand_top_level(&mut self, report: &ComissaoResponse) {
        let mut keys: HashSet<NodeRef> = report
            .sellers
            .iter()
            .map(|s| Subtree::TopLevel.seller(s))
            .collect();
        if let Some(partner) = &report.renewal_partner {
            keys.insert(NodeRef::RenewalPartner);
            keys.extend(partner.sellers.iter().map(|s| Subtree::Renewal.seller(s)));
        }
        self.expanded = keys;
    }

    /// State right after a report loads: top-level sellers and the renewal
    /// partner. Sellers nested under the partner stay collapsed.
    pub fn expand_initial(&mut self, report: &ComissaoResponse) {
        let mut keys: HashSet<NodeRef> = report
            .sellers
            .iter()
            .map(|s| Subtree::TopLevel.seller(s))
            .collect();
        if report.renewal_partner.is_some() {
            keys.insert(NodeRef::RenewalPartner);
        }
        self.expanded = keys;
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &NodeRef> {
        self.expanded.iter()
    }
}

fn expandable_keys(report: &ComissaoResponse) -> HashSet<NodeRef> {
    let mut keys = HashSet::new();
    for seller in &report.sellers {
        insert_seller_keys(&mut keys, seller, Subtree::TopLevel);
    }
    if let Some(partner) = &report.renewal_partner {
        keys.insert(NodeRef::RenewalPartner);
        for seller in &partner.sellers {
            insert_seller_keys(&mut keys, seller, Subtree::Renewal);
        }
    }
    keys
}

fn insert_seller_keys(keys: &mut HashSet<NodeRef>, seller: &SellerInfo, subtree: Subtree) {
    keys.insert(subtree.seller(seller));
    if !direct_sales(seller).is_empty() {
        keys.insert(subtree.direct_sales(seller));
    }
    for contador in &seller.contadores {
        if !contador.sales.is_empty() {
            keys.insert(subtree.contador(seller, contador));
        }
    }
}
