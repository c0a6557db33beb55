// ABOUTME: Progress report type definitions
// ABOUTME: Kind-tagged payload variants validated at the write boundary

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Financial entry type that counts toward budget realization.
pub const ENTRY_TYPE_EXPENDITURE: &str = "expenditure";
/// Financial entry type for incoming funds; never counts toward realization.
pub const ENTRY_TYPE_DONATION: &str = "donation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    Financial,
    NonFinancial,
}

/// A stored progress report. `payload` is kept as raw JSON; shape is
/// guaranteed by validation at creation time, not by this struct.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub id: String,
    pub program_id: String,
    pub kind: ReportKind,
    pub payload: serde_json::Value,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Report row joined with its author's display name, as listed to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportWithAuthor {
    #[serde(flatten)]
    pub report: ProgressReport,
    pub author_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEntry {
    pub entry_type: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeEntry {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiaries: Option<i64>,
}

/// Validated report payload. Construction goes through [`ReportPayload::from_parts`]
/// so that a stored payload always matches its kind tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportPayload {
    Financial(FinancialEntry),
    Narrative(NarrativeEntry),
}

impl ReportPayload {
    /// Parse a raw JSON payload against the declared kind. Fails when the
    /// payload does not have the shape the kind requires.
    pub fn from_parts(
        kind: ReportKind,
        payload: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        match kind {
            ReportKind::Financial => {
                serde_json::from_value::<FinancialEntry>(payload).map(ReportPayload::Financial)
            }
            ReportKind::NonFinancial => {
                serde_json::from_value::<NarrativeEntry>(payload).map(ReportPayload::Narrative)
            }
        }
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            ReportPayload::Financial(_) => ReportKind::Financial,
            ReportPayload::Narrative(_) => ReportKind::NonFinancial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn financial_payload_parses_with_numeric_amount() {
        let payload = ReportPayload::from_parts(
            ReportKind::Financial,
            json!({"entryType": "expenditure", "amount": 500}),
        )
        .unwrap();

        match payload {
            ReportPayload::Financial(entry) => {
                assert_eq!(entry.entry_type, ENTRY_TYPE_EXPENDITURE);
                assert_eq!(entry.amount, Decimal::from(500));
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn financial_payload_parses_with_string_amount() {
        let payload = ReportPayload::from_parts(
            ReportKind::Financial,
            json!({"entryType": "donation", "amount": "1250.75"}),
        )
        .unwrap();

        match payload {
            ReportPayload::Financial(entry) => {
                assert_eq!(entry.amount.to_string(), "1250.75");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn financial_payload_rejects_missing_amount() {
        let result = ReportPayload::from_parts(
            ReportKind::Financial,
            json!({"entryType": "expenditure"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn narrative_payload_rejects_financial_shape() {
        let result = ReportPayload::from_parts(
            ReportKind::NonFinancial,
            json!({"entryType": "expenditure", "amount": 500}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn payload_serializes_without_enum_wrapper() {
        let payload = ReportPayload::Financial(FinancialEntry {
            entry_type: ENTRY_TYPE_EXPENDITURE.to_string(),
            amount: Decimal::new(12345, 2),
            description: None,
        });

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["entryType"], "expenditure");
        assert_eq!(value["amount"], "123.45");
    }
}
