//! Schema migration for the groups document
//!
//! Version 1 is the legacy layout: a bare array of groups (or an object
//! without `schema_version`) with camelCase keys, decimal amounts and a
//! `paidBy` that is either a member name or a list of payments. Version 2
//! stores cents and always-explicit payment lists.
//!
//! Migration runs once when the document is loaded; everything past this
//! module only ever sees the current shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::{SplitError, SplitResult};
use crate::models::{Expense, ExpenseCategory, ExpenseId, Group, GroupId, Money, PaidBy, Payment};

/// Schema version written by this build
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// The on-disk groups document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupsDocument {
    pub schema_version: u32,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Default for GroupsDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            groups: Vec::new(),
        }
    }
}

/// Bring a raw groups document up to the current schema
pub fn migrate(raw: Value) -> SplitResult<GroupsDocument> {
    let version = match &raw {
        Value::Array(_) => 1,
        Value::Object(map) => match map.get("schema_version") {
            None => 1,
            Some(v) => v
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    SplitError::Migration(format!("Invalid schema_version: {}", v))
                })?,
        },
        other => {
            return Err(SplitError::Migration(format!(
                "Expected a groups document, found {}",
                json_kind(other)
            )))
        }
    };

    match version {
        1 => {
            let groups = migrate_v1(raw)?;
            info!(
                groups = groups.len(),
                from = 1,
                to = CURRENT_SCHEMA_VERSION,
                "Migrated groups document"
            );
            Ok(GroupsDocument {
                schema_version: CURRENT_SCHEMA_VERSION,
                groups,
            })
        }
        CURRENT_SCHEMA_VERSION => serde_json::from_value(raw)
            .map_err(|e| SplitError::Migration(format!("Invalid groups document: {}", e))),
        unknown => Err(SplitError::Migration(format!(
            "Unsupported schema version {} (newest known is {})",
            unknown, CURRENT_SCHEMA_VERSION
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Deserialize)]
struct LegacyDocument {
    #[serde(default)]
    groups: Vec<LegacyGroup>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyGroup {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    members: Vec<String>,
    #[serde(default)]
    expenses: Vec<LegacyExpense>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyExpense {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    description: String,
    amount: LegacyAmount,
    paid_by: LegacyPaidBy,
    #[serde(default)]
    involved_members: Option<Vec<String>>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyAmount {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyPaidBy {
    Single(String),
    Split(Vec<LegacyPayment>),
}

#[derive(Deserialize)]
struct LegacyPayment {
    member: String,
    amount: LegacyAmount,
}

impl LegacyAmount {
    fn to_money(&self) -> SplitResult<Money> {
        match self {
            LegacyAmount::Number(value) => Ok(Money::from_decimal(*value)),
            LegacyAmount::Text(text) => Money::parse(text)
                .map_err(|e| SplitError::Migration(format!("Invalid amount '{}': {}", text, e))),
        }
    }
}

fn migrate_v1(raw: Value) -> SplitResult<Vec<Group>> {
    let legacy = match raw {
        Value::Array(_) => LegacyDocument {
            groups: serde_json::from_value(raw)
                .map_err(|e| SplitError::Migration(format!("Invalid legacy groups: {}", e)))?,
        },
        other => serde_json::from_value(other)
            .map_err(|e| SplitError::Migration(format!("Invalid legacy document: {}", e)))?,
    };

    legacy.groups.into_iter().map(migrate_group).collect()
}

fn migrate_group(legacy: LegacyGroup) -> SplitResult<Group> {
    let expenses = legacy
        .expenses
        .into_iter()
        .map(migrate_expense)
        .collect::<SplitResult<Vec<_>>>()?;

    Ok(Group {
        id: legacy
            .id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id).ok())
            .map(GroupId::from)
            .unwrap_or_default(),
        name: legacy.name,
        members: legacy.members,
        expenses,
        created_at: legacy
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_default(),
    })
}

fn migrate_expense(legacy: LegacyExpense) -> SplitResult<Expense> {
    let amount = legacy.amount.to_money()?;
    let paid_by = match legacy.paid_by {
        LegacyPaidBy::Single(member) => PaidBy::Single(member),
        LegacyPaidBy::Split(payments) => PaidBy::Split(
            payments
                .into_iter()
                .map(|p| -> SplitResult<Payment> {
                    Ok(Payment::new(p.member, p.amount.to_money()?))
                })
                .collect::<SplitResult<Vec<_>>>()?,
        ),
    }
    .normalize(amount);

    let timestamp = legacy.date.as_deref().and_then(parse_timestamp);
    let date = legacy
        .date
        .as_deref()
        .and_then(parse_date)
        .unwrap_or_else(|| DateTime::<Utc>::default().date_naive());
    let created_at = legacy
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .or(timestamp)
        .unwrap_or_default();

    Ok(Expense {
        id: legacy
            .id
            .as_deref()
            .and_then(|id| Uuid::parse_str(id).ok())
            .map(ExpenseId::from)
            .unwrap_or_default(),
        description: legacy.description,
        amount,
        paid_by,
        involved_members: legacy.involved_members.unwrap_or_default(),
        date,
        category: legacy
            .category
            .as_deref()
            .and_then(ExpenseCategory::parse)
            .unwrap_or_default(),
        created_at,
        updated_at: created_at,
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_timestamp(s)
        .map(|dt| dt.date_naive())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}
