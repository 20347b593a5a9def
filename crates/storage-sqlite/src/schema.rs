// Table definitions mirroring the embedded migrations.

diesel::table! {
    users (id) {
        id -> Text,
        name -> Text,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    accounts (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        currency -> Text,
        color -> Nullable<Text>,
        #[sql_name = "type"]
        account_type -> Text,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        deleted_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    categories (id) {
        id -> Text,
        user_id -> Nullable<Text>,
        name -> Text,
        description -> Text,
        #[sql_name = "type"]
        category_type -> Text,
        color -> Text,
        icon -> Text,
        parent_id -> Nullable<Text>,
        is_active -> Bool,
        visible -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        deleted_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    transactions (id) {
        id -> Text,
        user_id -> Text,
        description -> Text,
        amount -> BigInt,
        #[sql_name = "type"]
        transaction_type -> Text,
        category_id -> Text,
        account_id -> Text,
        due_date -> Date,
        competence_date -> Date,
        is_paid -> Bool,
        observation -> Nullable<Text>,
        is_recurring -> Bool,
        recurring_type -> Nullable<Text>,
        installments -> Integer,
        current_installment -> Integer,
        parent_transaction_id -> Nullable<Text>,
        transfer_id -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
        deleted_at -> Nullable<Timestamp>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(accounts, categories, transactions, users);
