use super::categories_model::CategoryType;

/// Display name of the shared system category backing transfers.
pub const TRANSFER_CATEGORY_NAME: &str = "Transferência";

/// Fixed color assigned to the system transfer category.
pub const TRANSFER_CATEGORY_COLOR: &str = "#6B7280";

/// Fixed icon assigned to the system transfer category.
pub const TRANSFER_CATEGORY_ICON: &str = "transfer";

pub const TRANSFER_CATEGORY_DESCRIPTION: &str = "Categoria para transferências entre contas";

/// Stock categories seeded for every user at first login.
///
/// "Outras Receitas" and "Outros" are load-bearing: the account opening
/// balance bootstrap resolves its category through them by name.
pub const DEFAULT_CATEGORIES: &[(&str, CategoryType, &str, &str)] = &[
    ("Salário", CategoryType::Income, "#22C55E", "briefcase"),
    ("Outras Receitas", CategoryType::Income, "#10B981", "plus-circle"),
    ("Alimentação", CategoryType::Expense, "#F97316", "utensils"),
    ("Moradia", CategoryType::Expense, "#3B82F6", "home"),
    ("Transporte", CategoryType::Expense, "#8B5CF6", "car"),
    ("Lazer", CategoryType::Expense, "#EC4899", "gamepad"),
    ("Saúde", CategoryType::Expense, "#EF4444", "heart-pulse"),
    ("Outros", CategoryType::Expense, "#6B7280", "ellipsis"),
];
