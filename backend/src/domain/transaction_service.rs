//! Transaction service: create, list, search, update, and delete
//! transactions.

use anyhow::{anyhow, Result};
use chrono::{Local, Utc};
use shared::{
    CreateTransactionRequest, GroupedTransactionsResponse, Transaction, TransactionFilter,
    TransactionListResponse, DEFAULT_PAYMENT_METHOD,
};
use tracing::info;

use crate::domain::filters::filter_transactions;
use crate::domain::grouping::group_transactions_by_date;
use crate::domain::session::Session;
use crate::storage::{DbConnection, TransactionRepository};

const MAX_DESCRIPTION_LENGTH: usize = 256;

#[derive(Clone)]
pub struct TransactionService {
    transaction_repository: TransactionRepository,
}

impl TransactionService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            transaction_repository: TransactionRepository::new(db),
        }
    }

    /// Record a new transaction for the caller
    pub async fn create_transaction(
        &self,
        session: &Session,
        request: CreateTransactionRequest,
    ) -> Result<Transaction> {
        let description = request.description.trim();
        if description.is_empty() || description.len() > MAX_DESCRIPTION_LENGTH {
            return Err(anyhow!(
                "Description must be between 1 and {} characters",
                MAX_DESCRIPTION_LENGTH
            ));
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(anyhow!("Amount must be a positive number"));
        }
        let category = request.category.trim();
        if category.is_empty() {
            return Err(anyhow!("Category must not be empty"));
        }

        let now = Utc::now();
        let payment_method = request
            .payment_method
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

        let transaction = Transaction {
            id: 0,
            user_id: session.user_id().to_string(),
            amount: request.amount,
            description: description.to_string(),
            kind: request.kind,
            category: category.to_string(),
            payment_method,
            occurred_at: request.occurred_at.unwrap_or(now),
            created_at: now,
        };

        let id = self.transaction_repository.store_transaction(&transaction).await?;
        info!("Recorded transaction {} for user {}", id, session.user_id());

        Ok(Transaction { id, ..transaction })
    }

    /// List the caller's transactions, newest first
    pub async fn list_transactions(&self, session: &Session) -> Result<TransactionListResponse> {
        let transactions = self
            .transaction_repository
            .list_transactions(session.user_id())
            .await?;

        Ok(TransactionListResponse { transactions })
    }

    /// Filter the caller's transactions and bucket the matches by date
    pub async fn search_transactions(
        &self,
        session: &Session,
        filter: TransactionFilter,
    ) -> Result<GroupedTransactionsResponse> {
        let transactions = self
            .transaction_repository
            .list_transactions(session.user_id())
            .await?;

        let matching = filter_transactions(&transactions, &filter);
        let matching_count = matching.len();
        let groups = group_transactions_by_date(&matching, Local::now().date_naive());

        info!(
            "Search for user {} matched {} of {} transactions",
            session.user_id(),
            matching_count,
            transactions.len()
        );

        Ok(GroupedTransactionsResponse {
            groups,
            matching_count,
        })
    }

    /// Replace the recorded fields of one of the caller's transactions.
    /// Returns None when the transaction does not exist (or belongs to
    /// someone else). An absent date keeps the original one.
    pub async fn update_transaction(
        &self,
        session: &Session,
        transaction_id: i64,
        request: CreateTransactionRequest,
    ) -> Result<Option<Transaction>> {
        let description = request.description.trim();
        if description.is_empty() || description.len() > MAX_DESCRIPTION_LENGTH {
            return Err(anyhow!(
                "Description must be between 1 and {} characters",
                MAX_DESCRIPTION_LENGTH
            ));
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(anyhow!("Amount must be a positive number"));
        }
        let category = request.category.trim();
        if category.is_empty() {
            return Err(anyhow!("Category must not be empty"));
        }

        let existing = match self
            .transaction_repository
            .get_transaction(session.user_id(), transaction_id)
            .await?
        {
            Some(existing) => existing,
            None => return Ok(None),
        };

        let payment_method = request
            .payment_method
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or(existing.payment_method);

        let updated = Transaction {
            id: existing.id,
            user_id: existing.user_id,
            amount: request.amount,
            description: description.to_string(),
            kind: request.kind,
            category: category.to_string(),
            payment_method,
            occurred_at: request.occurred_at.unwrap_or(existing.occurred_at),
            created_at: existing.created_at,
        };

        if !self.transaction_repository.update_transaction(&updated).await? {
            return Ok(None);
        }

        info!(
            "Updated transaction {} for user {}",
            transaction_id,
            session.user_id()
        );

        Ok(Some(updated))
    }

    /// Delete one of the caller's transactions.
    /// Returns false when the transaction does not exist (or belongs to
    /// someone else).
    pub async fn delete_transaction(&self, session: &Session, transaction_id: i64) -> Result<bool> {
        let deleted = self
            .transaction_repository
            .delete_transaction(session.user_id(), transaction_id)
            .await?;

        if deleted {
            info!(
                "Deleted transaction {} for user {}",
                transaction_id,
                session.user_id()
            );
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::TransactionKind;

    async fn create_test_service() -> TransactionService {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        TransactionService::new(db)
    }

    fn session() -> Session {
        Session::new("test-user").unwrap()
    }

    fn request(amount: f64, description: &str) -> CreateTransactionRequest {
        CreateTransactionRequest {
            amount,
            description: description.to_string(),
            kind: TransactionKind::Expense,
            category: "Comida".to_string(),
            payment_method: None,
            occurred_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_transaction_basic() {
        let service = create_test_service().await;

        let transaction = service
            .create_transaction(&session(), request(12.5, "Almuerzo"))
            .await
            .unwrap();

        assert!(transaction.id > 0);
        assert_eq!(transaction.amount, 12.5);
        assert_eq!(transaction.description, "Almuerzo");
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.payment_method, "Efectivo");
        assert_eq!(transaction.user_id, "test-user");
    }

    #[tokio::test]
    async fn test_create_transaction_validation() {
        let service = create_test_service().await;

        assert!(service
            .create_transaction(&session(), request(10.0, ""))
            .await
            .is_err());
        assert!(service
            .create_transaction(&session(), request(0.0, "Zero amount"))
            .await
            .is_err());
        assert!(service
            .create_transaction(&session(), request(-5.0, "Negative amount"))
            .await
            .is_err());

        let mut no_category = request(10.0, "Missing category");
        no_category.category = "  ".to_string();
        assert!(service
            .create_transaction(&session(), no_category)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_create_transaction_with_explicit_date_and_payment() {
        let service = create_test_service().await;
        let occurred_at = Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap();

        let mut custom = request(40.0, "Libros");
        custom.payment_method = Some("Tarjeta Crédito".to_string());
        custom.occurred_at = Some(occurred_at);

        let transaction = service.create_transaction(&session(), custom).await.unwrap();

        assert_eq!(transaction.occurred_at, occurred_at);
        assert_eq!(transaction.payment_method, "Tarjeta Crédito");
    }

    #[tokio::test]
    async fn test_list_transactions_scoped_to_session() {
        let service = create_test_service().await;
        let alice = Session::new("alice").unwrap();
        let bob = Session::new("bob").unwrap();

        service.create_transaction(&alice, request(10.0, "Alice expense")).await.unwrap();
        service.create_transaction(&bob, request(20.0, "Bob expense")).await.unwrap();

        let listed = service.list_transactions(&alice).await.unwrap();

        assert_eq!(listed.transactions.len(), 1);
        assert_eq!(listed.transactions[0].description, "Alice expense");
    }

    #[tokio::test]
    async fn test_search_transactions_filters_and_groups() {
        let service = create_test_service().await;

        service.create_transaction(&session(), request(12.0, "Almuerzo")).await.unwrap();
        let mut income = request(800.0, "Salario");
        income.kind = TransactionKind::Income;
        income.category = "Trabajo".to_string();
        service.create_transaction(&session(), income).await.unwrap();

        let filter = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            ..Default::default()
        };
        let response = service.search_transactions(&session(), filter).await.unwrap();

        assert_eq!(response.matching_count, 1);
        // Both were created just now, so the single match lands in "Today"
        assert_eq!(response.groups.len(), 1);
        assert_eq!(response.groups[0].label, "Today");
        assert_eq!(response.groups[0].transactions[0].description, "Almuerzo");
    }

    #[tokio::test]
    async fn test_search_with_empty_filter_keeps_everything() {
        let service = create_test_service().await;

        service.create_transaction(&session(), request(12.0, "Almuerzo")).await.unwrap();
        service.create_transaction(&session(), request(3.0, "Café")).await.unwrap();

        let response = service
            .search_transactions(&session(), TransactionFilter::default())
            .await
            .unwrap();

        assert_eq!(response.matching_count, 2);
        let grouped: usize = response.groups.iter().map(|g| g.transactions.len()).sum();
        assert_eq!(grouped, 2);
    }

    #[tokio::test]
    async fn test_update_transaction() {
        let service = create_test_service().await;

        let original = service
            .create_transaction(&session(), request(10.0, "Almuerzo"))
            .await
            .unwrap();

        let mut changes = request(14.0, "Almuerzo con postre");
        changes.payment_method = Some("Tarjeta Débito".to_string());

        let updated = service
            .update_transaction(&session(), original.id, changes)
            .await
            .unwrap()
            .expect("Transaction should exist");

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.amount, 14.0);
        assert_eq!(updated.description, "Almuerzo con postre");
        assert_eq!(updated.payment_method, "Tarjeta Débito");
        // The original timestamps survive the update
        assert_eq!(updated.occurred_at, original.occurred_at);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_transaction_is_none() {
        let service = create_test_service().await;

        let result = service
            .update_transaction(&session(), 999, request(14.0, "Nothing here"))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_transaction_validation() {
        let service = create_test_service().await;

        let original = service
            .create_transaction(&session(), request(10.0, "Almuerzo"))
            .await
            .unwrap();

        assert!(service
            .update_transaction(&session(), original.id, request(0.0, "Zero"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_delete_transaction() {
        let service = create_test_service().await;

        let transaction = service
            .create_transaction(&session(), request(10.0, "To delete"))
            .await
            .unwrap();

        assert!(service.delete_transaction(&session(), transaction.id).await.unwrap());
        assert!(!service.delete_transaction(&session(), transaction.id).await.unwrap());
        assert!(service.list_transactions(&session()).await.unwrap().transactions.is_empty());
    }

    #[tokio::test]
    async fn test_delete_other_users_transaction_reports_not_found() {
        let service = create_test_service().await;
        let alice = Session::new("alice").unwrap();
        let bob = Session::new("bob").unwrap();

        let transaction = service
            .create_transaction(&alice, request(10.0, "Alice expense"))
            .await
            .unwrap();

        assert!(!service.delete_transaction(&bob, transaction.id).await.unwrap());
        assert_eq!(service.list_transactions(&alice).await.unwrap().transactions.len(), 1);
    }
}
