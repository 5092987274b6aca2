//! Stable keys for nodes of the commission tree.

use std::fmt;

use crate::models::{ContadorInfo, SellerInfo};
use crate::rows::RenewalVisibility;

/// How a seller is identified: by document id when it has one, otherwise
/// by name.
///
/// Two sellers with the same name and no document id share an identity;
/// the variants keep that case distinguishable from a document-id match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identity {
    DocumentId(String),
    NameFallback(String),
}

impl Identity {
    pub fn of(seller: &SellerInfo) -> Self {
        match &seller.document_id {
            Some(doc) => Identity::DocumentId(doc.clone()),
            None => Identity::NameFallback(seller.name.clone()),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::DocumentId(s) | Identity::NameFallback(s) => f.write_str(s),
        }
    }
}

/// An expandable node of the tree. Top-level and renewal-nested nodes are
/// distinct variants and never compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Seller(Identity),
    DirectSales(Identity),
    /// Seller identity and contador document id.
    Intermediary(Identity, String),
    RenewalPartner,
    RenewalSeller(Identity),
    RenewalDirect(Identity),
    RenewalIntermediary(Identity, String),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Seller(id) => write!(f, "seller:{id}"),
            NodeRef::DirectSales(id) => write!(f, "direct:{id}"),
            NodeRef::Intermediary(id, doc) => write!(f, "contador:{id}:{doc}"),
            NodeRef::RenewalPartner => f.write_str("renewal-partner"),
            NodeRef::RenewalSeller(id) => write!(f, "rp-seller:{id}"),
            NodeRef::RenewalDirect(id) => write!(f, "rp-direct:{id}"),
            NodeRef::RenewalIntermediary(id, doc) => write!(f, "rp-contador:{id}:{doc}"),
        }
    }
}

/// Which copy of the seller tree a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subtree {
    TopLevel,
    Renewal,
}

impl Subtree {
    pub fn seller(self, seller: &SellerInfo) -> NodeRef {
        let id = Identity::of(seller);
        match self {
            Subtree::TopLevel => NodeRef::Seller(id),
            Subtree::Renewal => NodeRef::RenewalSeller(id),
        }
    }

    pub fn direct_sales(self, seller: &SellerInfo) -> NodeRef {
        let id = Identity::of(seller);
        match self {
            Subtree::TopLevel => NodeRef::DirectSales(id),
            Subtree::Renewal => NodeRef::RenewalDirect(id),
        }
    }

    pub fn contador(self, seller: &SellerInfo, contador: &ContadorInfo) -> NodeRef {
        let id = Identity::of(seller);
        let doc = contador.document_id.clone();
        match self {
            Subtree::TopLevel => NodeRef::Intermediary(id, doc),
            Subtree::Renewal => NodeRef::RenewalIntermediary(id, doc),
        }
    }

    /// Renewal figures are only shown inside the renewal partner subtree.
    pub fn renewal_visibility(self) -> RenewalVisibility {
        match self {
            Subtree::TopLevel => RenewalVisibility::Hidden,
            Subtree::Renewal => RenewalVisibility::Shown,
        }
    }
}
