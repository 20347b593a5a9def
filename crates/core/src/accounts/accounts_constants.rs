/// Marker description of the synthetic transaction seeded at account
/// creation. The opening-balance lookup matches on this exact string.
pub const OPENING_BALANCE_DESCRIPTION: &str = "Saldo Inicial";

/// Category resolved by convention for income-typed accounts.
pub const DEFAULT_INCOME_CATEGORY: &str = "Outras Receitas";

/// Category resolved by convention for every other account type.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "Outros";
