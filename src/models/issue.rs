//! Issue model

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use validator::{Validate, ValidationError};

use crate::classifier::{Category, ClassificationResult, Severity};

/// Length of the hex id handed out per issue
const ID_LEN: usize = 12;

/// Day prefix of a stored timestamp ("2024-05-01")
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Mixed into every id so identical text in the same instant still differs
static ISSUE_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub id: String,
    pub raw_text: String,
    pub category: Category,
    pub severity: Severity,
    pub entities: BTreeSet<String>,
    pub timestamp: DateTime<Utc>,
}

/// Row as stored; enums and entities are text columns
#[derive(Debug, FromRow)]
struct IssueRow {
    id: String,
    raw_text: String,
    category: String,
    severity: String,
    entities: String,
    timestamp: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateIssueRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct IssueListResponse {
    pub issues: Vec<Issue>,
    pub count: usize,
}

#[derive(Debug, Deserialize, Default, Validate)]
pub struct IssueFilter {
    pub category: Option<String>,
    pub severity: Option<String>,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<i64>,
}

/// Parsed listing query handed to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueQuery {
    pub category: Option<Category>,
    pub severity: Option<Severity>,
    pub limit: i64,
}

/// Column an aggregate count groups on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Category,
    Severity,
}

impl Dimension {
    fn column(&self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Severity => "severity",
        }
    }
}

fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("Issue text cannot be empty"));
        return Err(err);
    }
    Ok(())
}

/// Stored form: fixed-width UTC so text order is time order
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_err<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

impl TryFrom<IssueRow> for Issue {
    type Error = sqlx::Error;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(decode_err)?
            .with_timezone(&Utc);

        Ok(Issue {
            id: row.id,
            raw_text: row.raw_text,
            category: row.category.parse().map_err(decode_err)?,
            severity: row.severity.parse().map_err(decode_err)?,
            entities: serde_json::from_str(&row.entities).map_err(decode_err)?,
            timestamp,
        })
    }
}

impl Issue {
    /// Wrap an engine result with identity and timestamp
    pub fn assemble(text: &str, result: ClassificationResult, now: DateTime<Utc>) -> Self {
        let timestamp = now.trunc_subsecs(6);
        let seq = ISSUE_SEQ.fetch_add(1, Ordering::Relaxed);

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(format_timestamp(&timestamp).as_bytes());
        hasher.update(seq.to_le_bytes());
        let mut id = format!("{:x}", hasher.finalize());
        id.truncate(ID_LEN);

        Issue {
            id,
            raw_text: text.to_string(),
            category: result.category,
            severity: result.severity,
            entities: result.entities,
            timestamp,
        }
    }

    pub async fn create(pool: &SqlitePool, issue: &Issue) -> Result<(), sqlx::Error> {
        let entities = serde_json::to_string(&issue.entities)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        sqlx::query(
            r#"
            INSERT INTO issues (id, raw_text, category, severity, entities, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&issue.id)
        .bind(&issue.raw_text)
        .bind(issue.category.as_str())
        .bind(issue.severity.as_str())
        .bind(entities)
        .bind(format_timestamp(&issue.timestamp))
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, IssueRow>("SELECT * FROM issues WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Issue::try_from)
            .transpose()
    }

    /// Newest first, optionally narrowed by category and severity
    pub async fn list(pool: &SqlitePool, query: &IssueQuery) -> Result<Vec<Self>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, raw_text, category, severity, entities, timestamp FROM issues WHERE 1=1",
        );

        if let Some(category) = query.category {
            builder.push(" AND category = ").push_bind(category.as_str());
        }
        if let Some(severity) = query.severity {
            builder.push(" AND severity = ").push_bind(severity.as_str());
        }

        builder
            .push(" ORDER BY timestamp DESC, rowid DESC LIMIT ")
            .push_bind(query.limit);

        let rows: Vec<IssueRow> = builder.build_query_as().fetch_all(pool).await?;
        rows.into_iter().map(Issue::try_from).collect()
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM issues")
            .fetch_one(pool)
            .await
    }

    pub async fn count_by(
        pool: &SqlitePool,
        dimension: Dimension,
    ) -> Result<BTreeMap<String, i64>, sqlx::Error> {
        let column = dimension.column();
        let sql = format!("SELECT {column}, COUNT(*) FROM issues GROUP BY {column}");

        let rows: Vec<(String, i64)> = sqlx::query_as(&sql).fetch_all(pool).await?;
        Ok(rows.into_iter().collect())
    }

    /// Issues per calendar day (UTC) for `start..=end`; days without issues are absent
    pub async fn count_per_day(
        pool: &SqlitePool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BTreeMap<NaiveDate, i64>, sqlx::Error> {
        let end_exclusive = end.checked_add_days(Days::new(1)).unwrap_or(end);

        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT substr(timestamp, 1, 10) AS day, COUNT(*) AS count
            FROM issues
            WHERE timestamp >= ? AND timestamp < ?
            GROUP BY day
            ORDER BY day
            "#
        )
        .bind(start.format(DAY_FORMAT).to_string())
        .bind(end_exclusive.format(DAY_FORMAT).to_string())
        .fetch_all(pool)
        .await?;

        rows.into_iter()
            .map(|(day, count)| {
                NaiveDate::parse_from_str(&day, DAY_FORMAT)
                    .map(|date| (date, count))
                    .map_err(decode_err)
            })
            .collect()
    }
}
