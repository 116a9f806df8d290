use crate::entities::transactions;
use crate::error::{AppError, AppResult};
use crate::models::{CreateTransactionRequest, TransactionResponse, TransactionStatsResponse};
use crate::utils::{kobo_to_naira, naira_to_kobo};
use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

#[derive(Clone)]
pub struct TransactionService {
    pool: DatabaseConnection,
}

impl TransactionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Validate the amount, convert it to kobo and persist the record.
    ///
    /// Validation happens before conversion: an unparseable amount never
    /// reaches storage.
    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> AppResult<TransactionResponse> {
        let naira = request.amount.as_naira().ok_or_else(|| {
            AppError::ValidationError("amount must be a number".to_string())
        })?;

        if naira < 0.0 {
            return Err(AppError::ValidationError(
                "amount must be non-negative".to_string(),
            ));
        }

        let transaction = transactions::ActiveModel {
            amount: Set(naira_to_kobo(naira)),
            description: Set(request.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(TransactionResponse::from(transaction))
    }

    /// All transactions, newest first.
    pub async fn list_transactions(&self) -> AppResult<Vec<TransactionResponse>> {
        let transactions = transactions::Entity::find()
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        Ok(transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect())
    }

    /// Count, kobo sum and rounded kobo average over all transactions.
    pub async fn get_stats(&self) -> AppResult<TransactionStatsResponse> {
        #[derive(Debug, sea_orm::FromQueryResult)]
        struct StatsRow {
            total: i64,
            total_kobo: Option<i64>,
        }

        // SUM(bigint) comes back as NUMERIC on Postgres, so cast it down
        let row: Option<StatsRow> = transactions::Entity::find()
            .select_only()
            .column_as(Expr::val(1).count(), "total")
            .column_as(
                Expr::col(transactions::Column::Amount)
                    .sum()
                    .cast_as(Alias::new("BIGINT")),
                "total_kobo",
            )
            .into_model::<StatsRow>()
            .one(&self.pool)
            .await?;

        let total = row.as_ref().map(|r| r.total).unwrap_or(0);
        let total_kobo = row.and_then(|r| r.total_kobo).unwrap_or(0);
        let average = average_kobo(total, total_kobo);

        Ok(TransactionStatsResponse {
            total,
            total_amount_kobo: total_kobo,
            total_amount_naira: kobo_to_naira(total_kobo),
            average_amount_kobo: average,
            average_amount_naira: kobo_to_naira(average),
        })
    }
}

/// Mean kobo amount rounded to the nearest kobo; zero rows average to zero.
fn average_kobo(total: i64, total_kobo: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total_kobo as f64 / total as f64).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_kobo() {
        assert_eq!(average_kobo(3, 600), 200);
        assert_eq!(average_kobo(3, 100), 33);
        assert_eq!(average_kobo(2, 101), 51);
    }

    #[test]
    fn test_average_kobo_empty() {
        assert_eq!(average_kobo(0, 0), 0);
    }
}
