//! Flattening of the tree into the lines currently visible.

use rust_decimal::Decimal;

use crate::collate;
use crate::models::{ComissaoResponse, ContadorInfo, RenewalPartnerInfo, SaleInfo, SellerInfo};
use crate::reconcile::{
    DirectSalesSummary, direct_sales, lookup_seller_commission, seller_commission_index,
};
use crate::rows::{RenewalVisibility, Scope};

use super::identity::{NodeRef, Subtree};
use super::state::ExpandState;

#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode<'a> {
    RenewalPartner(&'a RenewalPartnerInfo),
    Seller(&'a SellerInfo),
    DirectSales {
        seller: &'a SellerInfo,
        summary: DirectSalesSummary,
    },
    Contador {
        seller: &'a SellerInfo,
        contador: &'a ContadorInfo,
    },
    /// `seller_commission` is set for sales listed under a contador, where
    /// the sale's own commission belongs to the contador.
    Sale {
        sale: &'a SaleInfo,
        seller_commission: Option<Decimal>,
    },
}

impl<'a> TreeNode<'a> {
    /// The export scope a node stands for, if it can be exported.
    pub fn scope(&self) -> Option<Scope<'a>> {
        match *self {
            TreeNode::RenewalPartner(partner) => Some(Scope::RenewalPartner(partner)),
            TreeNode::Seller(seller) => Some(Scope::Seller(seller)),
            TreeNode::Contador { seller, contador } => Some(Scope::Contador { seller, contador }),
            TreeNode::DirectSales { .. } | TreeNode::Sale { .. } => None,
        }
    }
}

/// One row of the tree browser.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeLine<'a> {
    pub depth: usize,
    pub node: TreeNode<'a>,
    /// `None` for sale leaves.
    pub key: Option<NodeRef>,
    pub has_children: bool,
    pub expanded: bool,
    pub renewal: RenewalVisibility,
}

impl<'a> TreeLine<'a> {
    fn branch(
        depth: usize,
        node: TreeNode<'a>,
        key: NodeRef,
        has_children: bool,
        state: &ExpandState,
        renewal: RenewalVisibility,
    ) -> Self {
        let expanded = has_children && state.is_expanded(&key);
        Self {
            depth,
            node,
            key: Some(key),
            has_children,
            expanded,
            renewal,
        }
    }
}

/// Lines visible under `state`: the renewal partner first, then top-level
/// sellers in collated name order.
pub fn visible_lines<'a>(report: &'a ComissaoResponse, state: &ExpandState) -> Vec<TreeLine<'a>> {
    let mut lines = Vec::new();

    if let Some(partner) = &report.renewal_partner {
        let line = TreeLine::branch(
            0,
            TreeNode::RenewalPartner(partner),
            NodeRef::RenewalPartner,
            !partner.sellers.is_empty(),
            state,
            RenewalVisibility::Shown,
        );
        let expanded = line.expanded;
        lines.push(line);
        if expanded {
            for seller in &partner.sellers {
                push_seller(&mut lines, seller, Subtree::Renewal, 1, state);
            }
        }
    }

    let mut sellers: Vec<&SellerInfo> = report.sellers.iter().collect();
    collate::sort_by_name(&mut sellers, |s| s.name.as_str());
    for seller in sellers {
        push_seller(&mut lines, seller, Subtree::TopLevel, 0, state);
    }

    lines
}

fn push_seller<'a>(
    lines: &mut Vec<TreeLine<'a>>,
    seller: &'a SellerInfo,
    subtree: Subtree,
    depth: usize,
    state: &ExpandState,
) {
    let renewal = subtree.renewal_visibility();
    let direct = direct_sales(seller);
    let has_children = !direct.is_empty() || !seller.contadores.is_empty();

    let line = TreeLine::branch(
        depth,
        TreeNode::Seller(seller),
        subtree.seller(seller),
        has_children,
        state,
        renewal,
    );
    let expanded = line.expanded;
    lines.push(line);
    if !expanded {
        return;
    }

    if !direct.is_empty() {
        let line = TreeLine::branch(
            depth + 1,
            TreeNode::DirectSales {
                seller,
                summary: DirectSalesSummary::from_sales(&direct),
            },
            subtree.direct_sales(seller),
            true,
            state,
            renewal,
        );
        let expanded = line.expanded;
        lines.push(line);
        if expanded {
            lines.extend(direct.into_iter().map(|sale| TreeLine {
                depth: depth + 2,
                node: TreeNode::Sale {
                    sale,
                    seller_commission: None,
                },
                key: None,
                has_children: false,
                expanded: false,
                renewal,
            }));
        }
    }

    let index = seller_commission_index(seller);
    for contador in &seller.contadores {
        let line = TreeLine::branch(
            depth + 1,
            TreeNode::Contador { seller, contador },
            subtree.contador(seller, contador),
            !contador.sales.is_empty(),
            state,
            renewal,
        );
        let expanded = line.expanded;
        lines.push(line);
        if expanded {
            lines.extend(contador.sales.iter().map(|sale| TreeLine {
                depth: depth + 2,
                node: TreeNode::Sale {
                    sale,
                    seller_commission: Some(lookup_seller_commission(&index, &sale.order_id)),
                },
                key: None,
                has_children: false,
                expanded: false,
                renewal,
            }));
        }
    }
}
