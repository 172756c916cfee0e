//! Issues handlers

use axum::{extract::{State, Path}, Json};
use chrono::Utc;
use validator::Validate;

use crate::{AppState, AppResult, AppError};
use crate::extract::{AppJson, AppQuery};
use crate::classifier::{self, Category, ClassificationResult, Severity};
use crate::models::{CreateIssueRequest, Issue, IssueFilter, IssueListResponse, IssueQuery};

/// Classify, store and return a new issue
pub async fn create(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateIssueRequest>,
) -> AppResult<Json<Issue>> {
    req.validate()?;

    let text = req.text.trim();
    let issue = Issue::assemble(text, classifier::classify(text), Utc::now());
    Issue::create(&state.pool, &issue).await?;

    tracing::info!(
        "Issue {} classified as {} / {} ({} entities)",
        issue.id, issue.category, issue.severity, issue.entities.len()
    );

    Ok(Json(issue))
}

/// Run the classifier without storing anything
pub async fn classify(
    AppJson(req): AppJson<CreateIssueRequest>,
) -> AppResult<Json<ClassificationResult>> {
    req.validate()?;
    Ok(Json(classifier::classify(req.text.trim())))
}

/// List issues, newest first
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<IssueFilter>,
) -> AppResult<Json<IssueListResponse>> {
    filter.validate()?;

    let query = IssueQuery {
        category: non_empty(filter.category.as_deref())
            .map(str::parse::<Category>)
            .transpose()
            .map_err(|e| AppError::ValidationError(e.to_string()))?,
        severity: non_empty(filter.severity.as_deref())
            .map(str::parse::<Severity>)
            .transpose()
            .map_err(|e| AppError::ValidationError(e.to_string()))?,
        limit: state.config.list_limit(filter.limit),
    };

    let issues = Issue::list(&state.pool, &query).await?;
    Ok(Json(IssueListResponse {
        count: issues.len(),
        issues,
    }))
}

/// Get single issue
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Issue>> {
    let issue = Issue::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;

    Ok(Json(issue))
}

/// `?category=` is treated as no filter
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
