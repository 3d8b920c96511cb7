//! Pipeline failures.

use thiserror::Error;

use orderflow_core::Sku;

use crate::ports::CollaboratorError;

/// Why an order could not be processed.
///
/// A declined payment is not here: it is a normal [`crate::OrderOutcome`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FulfillmentError {
    /// A line item failed its stock check. Nothing after the check ran.
    #[error("product not available: {sku}")]
    StockUnavailable { sku: Sku },

    /// A collaborator failed; the error is exactly what the collaborator returned.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl FulfillmentError {
    pub fn stock_unavailable(sku: Sku) -> Self {
        Self::StockUnavailable { sku }
    }

    /// The sku whose stock check failed, if that is what happened.
    pub fn unavailable_sku(&self) -> Option<&Sku> {
        match self {
            Self::StockUnavailable { sku } => Some(sku),
            Self::Collaborator(_) => None,
        }
    }

    /// The collaborator failure, if that is what happened.
    pub fn collaborator(&self) -> Option<&CollaboratorError> {
        match self {
            Self::Collaborator(err) => Some(err),
            Self::StockUnavailable { .. } => None,
        }
    }
}
