use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::Money;
use orderflow_fulfillment::{CollaboratorError, PaymentAuthorizer};

/// An approved hold against a customer's credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub email: String,
    pub amount: Money,
    pub authorized_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Accounts {
    available: HashMap<String, Money>,
    authorizations: Vec<Authorization>,
}

/// Authorizes against per-customer credit limits.
///
/// Unknown customers and amounts above the remaining credit are declined. Each
/// approval reduces the remaining credit by the authorized amount.
#[derive(Debug, Default)]
pub struct CreditLimitAuthorizer {
    accounts: Mutex<Accounts>,
}

impl CreditLimitAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the available credit for a customer.
    pub fn set_limit(&self, email: impl Into<String>, limit: Money) -> Result<(), CollaboratorError> {
        let mut accounts = self.lock()?;
        accounts.available.insert(email.into(), limit);
        Ok(())
    }

    pub fn available(&self, email: &str) -> Result<Option<Money>, CollaboratorError> {
        Ok(self.lock()?.available.get(email).copied())
    }

    /// Approved authorizations, oldest first.
    pub fn authorizations(&self) -> Result<Vec<Authorization>, CollaboratorError> {
        Ok(self.lock()?.authorizations.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Accounts>, CollaboratorError> {
        self.accounts
            .lock()
            .map_err(|_| CollaboratorError::internal("payment accounts lock poisoned"))
    }
}

impl PaymentAuthorizer for CreditLimitAuthorizer {
    fn authorize(&self, amount: Money, email: &str) -> Result<bool, CollaboratorError> {
        let mut accounts = self.lock()?;

        let Some(available) = accounts.available.get_mut(email) else {
            tracing::info!(%amount, "authorization declined: unknown customer");
            return Ok(false);
        };

        let Some(remaining) = available.checked_sub(amount) else {
            tracing::info!(%amount, available = %*available, "authorization declined: over limit");
            return Ok(false);
        };

        *available = remaining;
        accounts.authorizations.push(Authorization {
            email: email.to_string(),
            amount,
            authorized_at: Utc::now(),
        });

        tracing::info!(%amount, "authorization approved");
        Ok(true)
    }
}
