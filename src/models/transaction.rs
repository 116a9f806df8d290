use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::transactions;
use crate::utils::kobo_to_naira;

/// An amount in naira as supplied by the client, either as a JSON number or
/// a numeric string ("19.99"). Parsed and validated before it reaches
/// storage.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// The amount as a finite naira value, or `None` when the input does
    /// not parse as a number.
    pub fn as_naira(&self) -> Option<f64> {
        match self {
            AmountInput::Number(n) if n.is_finite() => Some(*n),
            AmountInput::Number(_) => None,
            AmountInput::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub amount: AmountInput,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i64,
    /// Stored amount in kobo
    pub amount: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Display value in naira, two decimals
    pub amount_naira: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(transaction: transactions::Model) -> Self {
        Self {
            id: transaction.id,
            amount_naira: kobo_to_naira(transaction.amount),
            amount: transaction.amount,
            description: transaction.description,
            created_at: transaction.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatsResponse {
    pub total: i64,
    pub total_amount_kobo: i64,
    pub total_amount_naira: String,
    pub average_amount_kobo: i64,
    pub average_amount_naira: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_input_from_number() {
        let input: AmountInput = serde_json::from_str("19.99").unwrap();
        assert_eq!(input.as_naira(), Some(19.99));
    }

    #[test]
    fn test_amount_input_from_string() {
        let input: AmountInput = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(input.as_naira(), Some(19.99));
    }

    #[test]
    fn test_amount_input_rejects_garbage() {
        let input: AmountInput = serde_json::from_str("\"lunch\"").unwrap();
        assert_eq!(input.as_naira(), None);

        let input: AmountInput = serde_json::from_str("\"NaN\"").unwrap();
        assert_eq!(input.as_naira(), None);

        let input: AmountInput = serde_json::from_str("\"inf\"").unwrap();
        assert_eq!(input.as_naira(), None);
    }

    #[test]
    fn test_transaction_response_field_names() {
        let response = TransactionResponse::from(transactions::Model {
            id: 1,
            amount: 1999,
            description: Some("lunch".to_string()),
            created_at: chrono::Utc::now(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["amount"], 1999);
        assert_eq!(json["amountNaira"], "19.99");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_stats_response_field_names() {
        let response = TransactionStatsResponse {
            total: 3,
            total_amount_kobo: 600,
            total_amount_naira: "6.00".to_string(),
            average_amount_kobo: 200,
            average_amount_naira: "2.00".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalAmountKobo"], 600);
        assert_eq!(json["totalAmountNaira"], "6.00");
        assert_eq!(json["averageAmountKobo"], 200);
        assert_eq!(json["averageAmountNaira"], "2.00");
    }
}
