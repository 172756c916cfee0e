//! Analytics handlers

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;

use crate::{AppState, AppResult};
use crate::models::{Dimension, Issue};

#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    pub total_issues: i64,
    pub by_category: BTreeMap<String, i64>,
    pub by_severity: BTreeMap<String, i64>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: i64,
}

/// Totals, breakdowns and the daily trend ending today (UTC)
pub async fn summary(
    State(state): State<AppState>,
) -> AppResult<Json<AnalyticsReport>> {
    let total_issues = Issue::count(&state.pool).await?;
    let by_category = Issue::count_by(&state.pool, Dimension::Category).await?;
    let by_severity = Issue::count_by(&state.pool, Dimension::Severity).await?;

    let today = Utc::now().date_naive();
    let days = state.config.trend_days;
    let counts = Issue::count_per_day(&state.pool, trend_start(today, days), today).await?;

    Ok(Json(AnalyticsReport {
        total_issues,
        by_category,
        by_severity,
        trend: build_trend(&counts, today, days),
    }))
}

/// First day of a `days`-long window ending at `end`
fn trend_start(end: NaiveDate, days: u32) -> NaiveDate {
    end.checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN)
}

/// One point per day, oldest first, zero-filled
pub fn build_trend(counts: &BTreeMap<NaiveDate, i64>, end: NaiveDate, days: u32) -> Vec<TrendPoint> {
    (0..days)
        .rev()
        .filter_map(|offset| end.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| TrendPoint {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
