//! Tests for the category service and deletion workflow.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::categories::{
        CategoryError, CategoryService, CategoryServiceTrait, CategoryType, CategoryUpdate,
        NewCategory, TRANSFER_CATEGORY_COLOR, TRANSFER_CATEGORY_NAME,
    };
    use crate::errors::Error;
    use crate::testing::{InMemoryCategoryRepository, InMemoryTransactionRepository};
    use crate::transactions::{NewTransaction, TransactionRepositoryTrait, TransactionType};

    const USER: &str = "user-1";

    fn service() -> (
        CategoryService,
        Arc<InMemoryCategoryRepository>,
        Arc<InMemoryTransactionRepository>,
    ) {
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let transactions = Arc::new(InMemoryTransactionRepository::new());
        (
            CategoryService::new(categories.clone(), transactions.clone()),
            categories,
            transactions,
        )
    }

    fn new_category(name: &str, category_type: CategoryType) -> NewCategory {
        NewCategory {
            id: None,
            user_id: Some(USER.to_string()),
            name: name.to_string(),
            description: String::new(),
            category_type,
            color: "#FF0000".to_string(),
            icon: "tag".to_string(),
            parent_id: None,
            visible: Some(true),
        }
    }

    async fn tag_transaction(
        transactions: &InMemoryTransactionRepository,
        category_id: &str,
    ) {
        transactions
            .create(NewTransaction {
                id: None,
                user_id: USER.to_string(),
                description: "Lanche".to_string(),
                amount: 500,
                transaction_type: TransactionType::Expense,
                category_id: category_id.to_string(),
                account_id: "acc-1".to_string(),
                due_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                competence_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                is_paid: true,
                observation: None,
                is_recurring: false,
                recurring_type: None,
                installments: 1,
                current_installment: 1,
                parent_transaction_id: None,
                transfer_id: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn subcategory_with_mismatched_type_is_rejected() {
        let (service, categories, _transactions) = service();
        let parent = service
            .create_category(new_category("Alimentação", CategoryType::Expense))
            .await
            .unwrap();

        let mut child = new_category("Salário Extra", CategoryType::Income);
        child.parent_id = Some(parent.id.clone());
        let err = service.create_category(child).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Category(CategoryError::ParentTypeMismatch(_))
        ));
        // Nothing besides the parent may have been persisted.
        assert_eq!(categories.all_rows().len(), 1);
    }

    #[tokio::test]
    async fn subcategory_under_missing_parent_is_rejected() {
        let (service, _categories, _transactions) = service();
        let mut child = new_category("Snacks", CategoryType::Expense);
        child.parent_id = Some("ghost".to_string());
        let err = service.create_category(child).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Category(CategoryError::ParentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn root_color_change_propagates_to_children() {
        let (service, categories, _transactions) = service();
        let root = service
            .create_category(new_category("Food", CategoryType::Expense))
            .await
            .unwrap();
        let mut child = new_category("Snacks", CategoryType::Expense);
        child.parent_id = Some(root.id.clone());
        child.color = "#00FF00".to_string();
        let child = service.create_category(child).await.unwrap();

        service
            .update_category(CategoryUpdate {
                id: Some(root.id.clone()),
                user_id: USER.to_string(),
                name: root.name.clone(),
                description: root.description.clone(),
                color: "#123456".to_string(),
                icon: root.icon.clone(),
                is_active: None,
                visible: None,
            })
            .await
            .unwrap();

        let rows = categories.all_rows();
        let stored_child = rows.iter().find(|c| c.id == child.id).unwrap();
        assert_eq!(stored_child.color, "#123456");
    }

    #[tokio::test]
    async fn deleting_a_category_with_transactions_is_blocked() {
        let (service, categories, transactions) = service();
        let root = service
            .create_category(new_category("Food", CategoryType::Expense))
            .await
            .unwrap();
        tag_transaction(&transactions, &root.id).await;

        let err = service.delete_category(&root.id, USER).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Category(CategoryError::HasTransactions { .. })
        ));
        // The cascade must not have touched any row.
        assert!(categories.all_rows().iter().all(|c| c.deleted_at.is_none()));
    }

    #[tokio::test]
    async fn deleting_names_the_blocking_subcategory() {
        let (service, categories, transactions) = service();
        let food = service
            .create_category(new_category("Food", CategoryType::Expense))
            .await
            .unwrap();
        let mut snacks = new_category("Snacks", CategoryType::Expense);
        snacks.parent_id = Some(food.id.clone());
        let snacks = service.create_category(snacks).await.unwrap();
        tag_transaction(&transactions, &snacks.id).await;

        let err = service.delete_category(&food.id, USER).await.unwrap_err();
        match err {
            Error::Category(CategoryError::SubcategoryHasTransactions {
                category,
                subcategory,
            }) => {
                assert_eq!(category, "Food");
                assert_eq!(subcategory, "Snacks");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(categories.all_rows().iter().all(|c| c.deleted_at.is_none()));
    }

    #[tokio::test]
    async fn deletion_cascades_to_children() {
        let (service, categories, _transactions) = service();
        let food = service
            .create_category(new_category("Food", CategoryType::Expense))
            .await
            .unwrap();
        let mut snacks = new_category("Snacks", CategoryType::Expense);
        snacks.parent_id = Some(food.id.clone());
        service.create_category(snacks).await.unwrap();

        service.delete_category(&food.id, USER).await.unwrap();

        assert!(categories.all_rows().iter().all(|c| c.deleted_at.is_some()));
    }

    #[tokio::test]
    async fn transfer_category_is_created_once() {
        let (service, categories, _transactions) = service();
        let first = service.get_or_create_transfer_category().await.unwrap();
        let second = service.get_or_create_transfer_category().await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.name, TRANSFER_CATEGORY_NAME);
        assert_eq!(first.color, TRANSFER_CATEGORY_COLOR);
        assert_eq!(first.user_id, None);
        assert!(!first.visible);
        assert_eq!(categories.all_rows().len(), 1);
    }

    #[tokio::test]
    async fn seeding_defaults_is_idempotent() {
        let (service, categories, _transactions) = service();
        service.seed_default_categories(USER).await.unwrap();
        let seeded = categories.all_rows().len();
        assert!(seeded > 0);

        service.seed_default_categories(USER).await.unwrap();
        assert_eq!(categories.all_rows().len(), seeded);

        assert!(service
            .get_category_by_name("Outras Receitas", CategoryType::Income, USER)
            .unwrap()
            .is_some());
        assert!(service
            .get_category_by_name("Outros", CategoryType::Expense, USER)
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn listing_groups_subcategories_under_roots() {
        let (service, _categories, _transactions) = service();
        let food = service
            .create_category(new_category("Food", CategoryType::Expense))
            .await
            .unwrap();
        let mut snacks = new_category("Snacks", CategoryType::Expense);
        snacks.parent_id = Some(food.id.clone());
        service.create_category(snacks).await.unwrap();

        let grouped = service
            .list_with_subcategories(USER, CategoryType::Expense)
            .unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].category.id, food.id);
        assert_eq!(grouped[0].subcategories.len(), 1);
        assert_eq!(grouped[0].subcategories[0].name, "Snacks");
    }
}
