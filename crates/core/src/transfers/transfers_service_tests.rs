//! Tests for the transfer workflow.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::accounts::{Account, AccountType};
    use crate::categories::{CategoryService, CategoryType};
    use crate::errors::Error;
    use crate::fx::{FixedRateSource, FxError, FxService};
    use crate::testing::{
        InMemoryAccountRepository, InMemoryCategoryRepository, InMemoryTransactionRepository,
    };
    use crate::transactions::TransactionType;
    use crate::transfers::{TransferError, TransferRequest, TransferService};

    const USER: &str = "user-1";

    struct Fixture {
        service: TransferService,
        accounts: Arc<InMemoryAccountRepository>,
        categories: Arc<InMemoryCategoryRepository>,
        transactions: Arc<InMemoryTransactionRepository>,
    }

    fn fixture() -> Fixture {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let transactions = Arc::new(InMemoryTransactionRepository::new());
        let category_service = Arc::new(CategoryService::new(
            categories.clone(),
            transactions.clone(),
        ));
        let fx_service = Arc::new(FxService::new(Arc::new(FixedRateSource::default())));
        Fixture {
            service: TransferService::new(
                accounts.clone(),
                category_service,
                transactions.clone(),
                fx_service,
            ),
            accounts,
            categories,
            transactions,
        }
    }

    fn account(id: &str, currency: &str) -> Account {
        let now = Utc::now().naive_utc();
        Account {
            id: id.to_string(),
            user_id: USER.to_string(),
            name: format!("Conta {id}"),
            currency: currency.to_string(),
            color: None,
            account_type: AccountType::Expense,
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn request(amount: i64) -> TransferRequest {
        TransferRequest {
            user_id: USER.to_string(),
            source_account_id: "acc-a".to_string(),
            destination_account_id: "acc-b".to_string(),
            amount,
            description: "Transferência mensal".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            competence_date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            is_paid: true,
            observation: None,
            is_recurring: false,
            recurring_type: None,
            installments: 1,
            current_installment: 1,
            parent_transaction_id: None,
            manual_rate: None,
        }
    }

    #[tokio::test]
    async fn same_currency_transfer_creates_a_linked_pair() {
        let fixture = fixture();
        fixture.accounts.insert(account("acc-a", "BRL"));
        fixture.accounts.insert(account("acc-b", "BRL"));

        let outcome = fixture.service.create_transfer(request(10_000)).await.unwrap();

        assert_eq!(outcome.debit_transaction.amount, 10_000);
        assert_eq!(outcome.credit_transaction.amount, 10_000);
        assert_eq!(
            outcome.debit_transaction.transaction_type,
            TransactionType::Expense
        );
        assert_eq!(
            outcome.credit_transaction.transaction_type,
            TransactionType::Income
        );
        assert_eq!(outcome.debit_transaction.account_id, "acc-a");
        assert_eq!(outcome.credit_transaction.account_id, "acc-b");

        // Both sides share the same fresh transfer id.
        assert!(!outcome.transfer_id.is_empty());
        assert_eq!(
            outcome.debit_transaction.transfer_id.as_deref(),
            Some(outcome.transfer_id.as_str())
        );
        assert_eq!(
            outcome.credit_transaction.transfer_id.as_deref(),
            Some(outcome.transfer_id.as_str())
        );

        // Both sides are tagged with the system transfer category.
        let categories = fixture.categories.all_rows();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category_type, CategoryType::Transfer);
        assert_eq!(outcome.debit_transaction.category_id, categories[0].id);
        assert_eq!(outcome.credit_transaction.category_id, categories[0].id);

        assert!(outcome.exchange_info.is_none());
        assert!(outcome.debit_transaction.observation.is_none());
    }

    #[tokio::test]
    async fn manual_rate_transfer_converts_and_annotates() {
        let fixture = fixture();
        fixture.accounts.insert(account("acc-a", "BRL"));
        fixture.accounts.insert(account("acc-b", "USD"));

        let mut req = request(10_000); // 100.00 BRL
        req.manual_rate = Some(dec!(0.20));
        let outcome = fixture.service.create_transfer(req).await.unwrap();

        assert_eq!(outcome.debit_transaction.amount, 10_000);
        assert_eq!(outcome.credit_transaction.amount, 2_000);

        let info = outcome.exchange_info.expect("conversion metadata expected");
        assert_eq!(info.from_currency, "BRL");
        assert_eq!(info.to_currency, "USD");
        assert_eq!(info.exchange_rate, dec!(0.20));
        assert_eq!(info.original_amount, 10_000);
        assert_eq!(info.converted_amount, 2_000);

        let observation = outcome.debit_transaction.observation.unwrap();
        assert!(observation.contains("Câmbio: 0.2000 BRL/USD"));
        assert_eq!(
            outcome.credit_transaction.observation.as_deref(),
            Some(observation.as_str())
        );
    }

    #[tokio::test]
    async fn user_observation_is_kept_ahead_of_the_note() {
        let fixture = fixture();
        fixture.accounts.insert(account("acc-a", "BRL"));
        fixture.accounts.insert(account("acc-b", "USD"));

        let mut req = request(5_000);
        req.observation = Some("Reserva de viagem".to_string());
        req.manual_rate = Some(dec!(0.25));
        let outcome = fixture.service.create_transfer(req).await.unwrap();

        assert_eq!(
            outcome.debit_transaction.observation.as_deref(),
            Some("Reserva de viagem | Câmbio: 0.2500 BRL/USD")
        );
    }

    #[tokio::test]
    async fn lookup_rate_is_used_without_manual_override() {
        let fixture = fixture();
        fixture.accounts.insert(account("acc-a", "USD"));
        fixture.accounts.insert(account("acc-b", "BRL"));

        let outcome = fixture.service.create_transfer(request(1_000)).await.unwrap();

        // 10.00 USD at the fixed 5.00 table rate.
        assert_eq!(outcome.credit_transaction.amount, 5_000);
        assert_eq!(
            outcome.exchange_info.unwrap().exchange_rate,
            dec!(5.00)
        );
    }

    #[tokio::test]
    async fn unresolvable_pair_persists_nothing() {
        let fixture = fixture();
        fixture.accounts.insert(account("acc-a", "BRL"));
        fixture.accounts.insert(account("acc-b", "CHF"));

        let err = fixture.service.create_transfer(request(1_000)).await.unwrap_err();
        assert!(matches!(err, Error::Fx(FxError::RateNotFound(_))));
        assert!(fixture.transactions.all_rows().is_empty());
    }

    #[tokio::test]
    async fn missing_origin_account_is_reported() {
        let fixture = fixture();
        fixture.accounts.insert(account("acc-b", "BRL"));

        let err = fixture.service.create_transfer(request(1_000)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transfer(TransferError::OriginAccountNotFound(_))
        ));
    }

    #[tokio::test]
    async fn missing_destination_account_is_reported() {
        let fixture = fixture();
        fixture.accounts.insert(account("acc-a", "BRL"));

        let err = fixture.service.create_transfer(request(1_000)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transfer(TransferError::DestinationAccountNotFound(_))
        ));
        assert!(fixture.transactions.all_rows().is_empty());
    }

    #[tokio::test]
    async fn accounts_of_another_user_are_invisible() {
        let fixture = fixture();
        let mut foreign = account("acc-a", "BRL");
        foreign.user_id = Uuid::new_v4().to_string();
        fixture.accounts.insert(foreign);
        fixture.accounts.insert(account("acc-b", "BRL"));

        let err = fixture.service.create_transfer(request(1_000)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transfer(TransferError::OriginAccountNotFound(_))
        ));
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_before_any_lookup() {
        let fixture = fixture();
        let err = fixture.service.create_transfer(request(-1)).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
