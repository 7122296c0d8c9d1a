//! Shared data types for the spendwise application.
//!
//! Every type in this crate crosses the REST boundary: requests and
//! responses exchanged with clients, plus the derived report shapes the
//! backend computes from stored records. Derived types are never persisted;
//! each response is recomputed in full from the current data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payment methods offered as suggestions when recording a transaction.
/// The field itself is free text and is not constrained to this list.
pub const SUGGESTED_PAYMENT_METHODS: &[&str] = &[
    "Efectivo",
    "Tarjeta Débito",
    "Tarjeta Crédito",
    "Transferencia",
    "Billetera Digital",
];

/// Payment method recorded when a transaction does not specify one.
pub const DEFAULT_PAYMENT_METHOD: &str = "Efectivo";

/// Icon stored on a budget when the client does not pick one.
pub const DEFAULT_BUDGET_ICON: &str = "💰";

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Stable string form used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }

    /// Parse the stored string form back into a kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INCOME" => Some(TransactionKind::Income),
            "EXPENSE" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// A single income or expense record owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Opaque uid from the identity provider; partitions all data.
    pub user_id: String,
    /// Amount in the account currency; always recorded non-negative,
    /// the kind carries the sign.
    pub amount: f64,
    pub description: String,
    pub kind: TransactionKind,
    /// Free-text category label, e.g. "Comida".
    pub category: String,
    pub payment_method: String,
    /// When the income/expense actually happened.
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub description: String,
    pub kind: TransactionKind,
    pub category: String,
    /// Defaults to [`DEFAULT_PAYMENT_METHOD`] when absent.
    pub payment_method: Option<String>,
    /// Defaults to the current time when absent.
    pub occurred_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
}

/// Optional filter clauses applied as a conjunction; every unset or empty
/// clause is vacuously true. Amount bounds arrive as raw strings so that
/// unparseable input degrades to "no constraint" instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub payment_methods: Vec<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub min_amount: Option<String>,
    #[serde(default)]
    pub max_amount: Option<String>,
}

/// One labeled bucket of the date-grouped transaction view.
/// The label is "Today", "Yesterday", or a `dd/mm/yyyy` date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionGroup {
    pub label: String,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedTransactionsResponse {
    pub groups: Vec<TransactionGroup>,
    /// Number of transactions that matched the filter.
    pub matching_count: usize,
}

/// A monthly spending cap for one category. One logical budget exists per
/// (user, category, month, year); setting it again replaces the prior one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: String,
    pub category: String,
    pub amount: f64,
    /// 1-12
    pub month: u32,
    pub year: i32,
    /// Display glyph, e.g. "🍽️".
    pub icon: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBudgetRequest {
    pub category: String,
    pub amount: f64,
    /// Defaults to the current month when absent.
    pub month: Option<u32>,
    /// Defaults to the current year when absent.
    pub year: Option<i32>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetListResponse {
    pub budgets: Vec<Budget>,
}

/// Per-category expense total with its share of all expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total_amount: f64,
    /// `total_amount / sum(all totals) * 100`; 0 when the sum is 0.
    pub percentage: f64,
}

/// A budget joined against the actual spend of its period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: String,
    pub budget_amount: f64,
    pub actual_amount: f64,
    /// Always finite; 0 when the budget amount is 0.
    pub usage_percentage: f64,
    pub over_budget: bool,
}

/// Month-scoped report assembled for the reports screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub category_breakdown: Vec<CategoryBreakdown>,
    /// The five largest expenses of the month, largest first.
    pub top_expenses: Vec<Transaction>,
    pub budget_comparisons: Vec<BudgetComparison>,
    /// Percentage of budgets whose spend stayed within the cap; 0 when
    /// there are no budgets.
    pub compliance_ratio: f64,
}

/// All-time balance figures for the home screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub available_balance: f64,
    pub total_income: f64,
    pub total_expenses: f64,
}

/// Threshold-crossing warning for a budget at 50% usage or more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: FinancialSummary,
    pub alerts: Vec<BudgetAlert>,
}

/// Locally cached profile for a user known to the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identity-provider uid.
    pub id: String,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    /// Free text, e.g. "1er Semestre".
    pub semester: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub photo_url: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub semester: Option<String>,
}

/// One article from the financial news feed. Field names follow the feed's
/// wire format, including its `pfd_uri` spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: i64,
    pub headline: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub body: String,
    pub author: String,
    pub section: String,
    pub date: String,
    pub article_uri: String,
    #[serde(rename = "pfd_uri")]
    pub pdf_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub news: Vec<NewsArticle>,
    pub count: u32,
    pub next: Option<u32>,
    pub eof: bool,
}
