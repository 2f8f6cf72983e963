//! Monthly summary routes: the budget allocation calculator over live data.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::AuthUser, routes::app_error_response};
use fintrack_core::allocation::AllocationService;
use fintrack_db::repositories::preferences::PreferencesRepository;
use fintrack_db::repositories::summary::{BreakdownRow, SummaryRepository};
use fintrack_shared::{AppError, Period};

/// Number of months covered by the history endpoint.
const HISTORY_MONTHS: usize = 12;

/// Creates the summary routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/summary/history", get(get_history))
        .route("/summary/breakdown", get(get_breakdown))
}

/// Month/year query, defaulting to the current month.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Month (1-12).
    pub month: Option<u32>,
    /// Calendar year.
    pub year: Option<i32>,
}

impl PeriodQuery {
    /// Resolves the query into a validated period.
    fn resolve(&self) -> Result<Period, axum::response::Response> {
        let current = Period::current();
        let month = self.month.unwrap_or(current.month);
        let year = self.year.unwrap_or(current.year);
        Period::new(month, year)
            .map_err(|e| app_error_response(&AppError::Validation(e.to_string())))
    }
}

/// GET `/summary` - Monthly summary with ideal-vs-actual per budget group.
async fn get_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let period = match query.resolve() {
        Ok(period) => period,
        Err(response) => return response,
    };

    let summary_repo = SummaryRepository::new((*state.db).clone());
    let prefs_repo = PreferencesRepository::new((*state.db).clone());
    let user_id = auth.user_id();

    let split = match prefs_repo.split_or_default(user_id).await {
        Ok(split) => split,
        Err(e) => {
            error!(error = %e, "Failed to load split");
            return crate::routes::internal_error();
        }
    };

    let aggregates = async {
        let income_total = summary_repo.income_total(user_id, period).await?;
        let expense_total = summary_repo.expense_total(user_id, period).await?;
        let actuals = summary_repo.group_actuals(user_id, period).await?;
        let net_worth = summary_repo.net_worth(user_id).await?;
        Ok::<_, fintrack_db::repositories::summary::SummaryError>((
            income_total,
            expense_total,
            actuals,
            net_worth,
        ))
    }
    .await;

    match aggregates {
        Ok((income_total, expense_total, actuals, net_worth)) => {
            let summary = AllocationService::monthly_summary(
                period,
                income_total,
                expense_total,
                actuals,
                net_worth,
                &split,
            );
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to compute summary");
            crate::routes::internal_error()
        }
    }
}

/// GET `/summary/history` - Income/expense/balance for the last 12 months.
async fn get_history(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let summary_repo = SummaryRepository::new((*state.db).clone());
    let periods = Period::current().last_n(HISTORY_MONTHS);

    match summary_repo
        .monthly_history(auth.user_id(), &periods)
        .await
    {
        Ok(totals) => {
            let rows: Vec<serde_json::Value> = totals
                .into_iter()
                .map(|t| {
                    json!({
                        "month": t.period.short_month_name(),
                        "month_num": t.period.month,
                        "year": t.period.year,
                        "income": t.income,
                        "expenses": t.expenses,
                        "balance": AllocationService::remaining_balance(t.income, t.expenses)
                    })
                })
                .collect();

            (StatusCode::OK, Json(json!({ "history": rows }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to load history");
            crate::routes::internal_error()
        }
    }
}

/// GET `/summary/breakdown` - Per-group, per-category expense totals.
async fn get_breakdown(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let period = match query.resolve() {
        Ok(period) => period,
        Err(response) => return response,
    };

    let summary_repo = SummaryRepository::new((*state.db).clone());

    match summary_repo
        .expense_breakdown(auth.user_id(), period)
        .await
    {
        Ok(rows) => (StatusCode::OK, Json(group_breakdown(rows))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load breakdown");
            crate::routes::internal_error()
        }
    }
}

/// Folds flat category rows into one object per group.
fn group_breakdown(rows: Vec<BreakdownRow>) -> serde_json::Value {
    use fintrack_core::allocation::ExpenseGroup;
    use rust_decimal::Decimal;

    struct GroupEntry {
        group: ExpenseGroup,
        total: Decimal,
        categories: Vec<serde_json::Value>,
    }

    let mut groups: Vec<GroupEntry> = Vec::new();
    for row in rows {
        let category = json!({ "category": row.category, "amount": row.total });
        if let Some(entry) = groups.iter_mut().find(|g| g.group == row.group) {
            entry.total += row.total;
            entry.categories.push(category);
        } else {
            groups.push(GroupEntry {
                group: row.group,
                total: row.total,
                categories: vec![category],
            });
        }
    }

    let rendered: Vec<serde_json::Value> = groups
        .into_iter()
        .map(|g| {
            json!({
                "group": g.group.to_string(),
                "total": g.total,
                "categories": g.categories
            })
        })
        .collect();
    json!(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::allocation::ExpenseGroup;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_breakdown_folds_categories() {
        let rows = vec![
            BreakdownRow {
                group: ExpenseGroup::Essentials,
                category: "rent".to_string(),
                total: dec!(1200),
            },
            BreakdownRow {
                group: ExpenseGroup::Essentials,
                category: "food".to_string(),
                total: dec!(430),
            },
            BreakdownRow {
                group: ExpenseGroup::Leisure,
                category: "streaming".to_string(),
                total: dec!(30),
            },
        ];

        let value = group_breakdown(rows);
        let groups = value.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["group"], "essentials");
        assert_eq!(
            groups[0]["categories"].as_array().unwrap().len(),
            2
        );
        assert_eq!(groups[1]["group"], "leisure");
    }
}
