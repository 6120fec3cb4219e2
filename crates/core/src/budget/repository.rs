//! Budget persistence contract and the in-memory reference store.

use std::future::Future;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use pocketbook_shared::types::{BudgetId, UserId};

use super::error::BudgetError;
use super::types::Budget;

/// Repository trait for budget persistence.
///
/// Each call either fully succeeds or fails with no visible partial write.
pub trait BudgetRepository: Send + Sync {
    /// Loads every budget owned by `owner_id`, in any order.
    fn load_for_owner(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<Vec<Budget>, BudgetError>> + Send;

    /// Finds one budget, scoped to its owner.
    fn find_by_id(
        &self,
        owner_id: UserId,
        id: BudgetId,
    ) -> impl Future<Output = Result<Option<Budget>, BudgetError>> + Send;

    /// Persists a new budget.
    fn save(&self, budget: Budget) -> impl Future<Output = Result<(), BudgetError>> + Send;

    /// Deletes a budget owned by `owner_id`. Returns false if nothing was removed.
    fn delete(
        &self,
        owner_id: UserId,
        id: BudgetId,
    ) -> impl Future<Output = Result<bool, BudgetError>> + Send;
}

/// Process-local budget store.
#[derive(Debug, Default)]
pub struct InMemoryBudgetRepository {
    budgets: DashMap<BudgetId, Budget>,
}

impl InMemoryBudgetRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `budgets`.
    #[must_use]
    pub fn with_budgets(budgets: impl IntoIterator<Item = Budget>) -> Self {
        Self {
            budgets: budgets.into_iter().map(|b| (b.id(), b)).collect(),
        }
    }

    /// Number of stored budgets across all owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    /// True when the store holds no budgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

impl BudgetRepository for InMemoryBudgetRepository {
    async fn load_for_owner(&self, owner_id: UserId) -> Result<Vec<Budget>, BudgetError> {
        Ok(self
            .budgets
            .iter()
            .filter(|entry| entry.owner_id() == owner_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_id(
        &self,
        owner_id: UserId,
        id: BudgetId,
    ) -> Result<Option<Budget>, BudgetError> {
        Ok(self
            .budgets
            .get(&id)
            .filter(|entry| entry.owner_id() == owner_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, budget: Budget) -> Result<(), BudgetError> {
        match self.budgets.entry(budget.id()) {
            Entry::Occupied(entry) => Err(BudgetError::Storage(format!(
                "budget {} already exists",
                entry.key()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(budget);
                Ok(())
            }
        }
    }

    async fn delete(&self, owner_id: UserId, id: BudgetId) -> Result<bool, BudgetError> {
        Ok(self
            .budgets
            .remove_if(&id, |_, budget| budget.owner_id() == owner_id)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::clock::FixedClock;
    use crate::budget::types::RawBudgetInput;
    use crate::budget::BudgetValidator;
    use chrono::Utc;

    fn budget(owner: UserId) -> Budget {
        let raw = RawBudgetInput {
            income: Some("1000".into()),
            ..RawBudgetInput::default()
        };
        let input = BudgetValidator::default().validate(&raw).unwrap();
        Budget::create(Some(owner), input, &FixedClock(Utc::now())).unwrap()
    }

    #[tokio::test]
    async fn test_load_is_scoped_to_owner() {
        let alice = UserId::new();
        let bob = UserId::new();
        let repo = InMemoryBudgetRepository::with_budgets([budget(alice), budget(alice), budget(bob)]);

        assert_eq!(repo.load_for_owner(alice).await.unwrap().len(), 2);
        assert_eq!(repo.load_for_owner(bob).await.unwrap().len(), 1);
        assert!(repo.load_for_owner(UserId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_and_delete_check_owner() {
        let owner = UserId::new();
        let b = budget(owner);
        let id = b.id();
        let repo = InMemoryBudgetRepository::new();
        repo.save(b).await.unwrap();

        assert!(repo.find_by_id(UserId::new(), id).await.unwrap().is_none());
        assert!(!repo.delete(UserId::new(), id).await.unwrap());
        assert_eq!(repo.len(), 1);

        assert!(repo.find_by_id(owner, id).await.unwrap().is_some());
        assert!(repo.delete(owner, id).await.unwrap());
        assert!(repo.is_empty());
        assert!(!repo.delete(owner, id).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_id() {
        let b = budget(UserId::new());
        let repo = InMemoryBudgetRepository::new();
        repo.save(b.clone()).await.unwrap();
        assert!(matches!(repo.save(b).await, Err(BudgetError::Storage(_))));
    }
}
