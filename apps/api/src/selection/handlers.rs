//! Axum route handlers — the thin interactive shell over the pipelines.
//!
//! Handlers collect requirement text, sheet selection and cohort flags,
//! drive the core in sequence, and hand back JSON for display. Ranking is
//! blocked on empty tables and empty requirement text here; the core itself
//! treats an empty table as a valid value.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::ranking::{RankingRole, RatedEntity};
use crate::selection::pipeline::{candidate_table, interviewer_table};
use crate::state::AppState;
use crate::table::cohort::CohortFlags;
use crate::table::CompetencyTable;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CandidateTableRequest {
    pub department: String,
    pub sheet: String,
    #[serde(default)]
    pub include_staffing: bool,
    #[serde(default)]
    pub include_laboratory: bool,
}

#[derive(Debug, Deserialize)]
pub struct CandidateRankRequest {
    pub requirements: String,
    #[serde(flatten)]
    pub table: CandidateTableRequest,
}

#[derive(Debug, Deserialize)]
pub struct InterviewerTableRequest {
    pub department: String,
    pub sheet: String,
    #[serde(default)]
    pub include_consultant: bool,
}

#[derive(Debug, Deserialize)]
pub struct InterviewerRankRequest {
    pub requirements: String,
    #[serde(flatten)]
    pub table: InterviewerTableRequest,
}

/// A table preview: the structured form for rendering plus the markdown
/// serialization that would be embedded into the ranking prompt.
#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub markdown: String,
}

impl From<CompetencyTable> for TableResponse {
    fn from(table: CompetencyTable) -> Self {
        let markdown = table.to_markdown();
        Self {
            columns: table.columns,
            rows: table.rows,
            markdown,
        }
    }
}

/// The ordered ranking exactly as the model returned it.
#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub rating: Vec<RatedEntity>,
}

#[derive(Debug, Serialize)]
pub struct DepartmentsResponse {
    pub departments: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SheetsResponse {
    pub sheets: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/departments
pub async fn handle_list_departments(
    State(state): State<AppState>,
) -> Json<DepartmentsResponse> {
    Json(DepartmentsResponse {
        departments: state
            .config
            .departments
            .iter()
            .map(|d| d.name.clone())
            .collect(),
    })
}

/// GET /api/v1/departments/:department/sheets
///
/// Sheet titles of a department's competency spreadsheet, in document order.
pub async fn handle_department_sheets(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Result<Json<SheetsResponse>, AppError> {
    let spreadsheet_id = state
        .config
        .department_spreadsheet(&department)
        .ok_or_else(|| AppError::Validation(format!("Unknown department '{department}'")))?;
    let sheets = state.sheets.sheet_titles(spreadsheet_id).await?;
    Ok(Json(SheetsResponse { sheets }))
}

/// GET /api/v1/interviewers/sheets
pub async fn handle_interviewer_sheets(
    State(state): State<AppState>,
) -> Result<Json<SheetsResponse>, AppError> {
    let sheets = state
        .sheets
        .sheet_titles(&state.config.interviewer_spreadsheet_id)
        .await?;
    Ok(Json(SheetsResponse { sheets }))
}

/// POST /api/v1/candidates/table
pub async fn handle_candidate_table(
    State(state): State<AppState>,
    Json(request): Json<CandidateTableRequest>,
) -> Result<Json<TableResponse>, AppError> {
    let table = candidate_table(
        state.sheets.as_ref(),
        &state.config,
        &request.department,
        &request.sheet,
        candidate_flags(&request),
    )
    .await?;
    Ok(Json(table.into()))
}

/// POST /api/v1/candidates/rank
pub async fn handle_candidate_rank(
    State(state): State<AppState>,
    Json(request): Json<CandidateRankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    validate_requirements(&request.requirements)?;
    let table = candidate_table(
        state.sheets.as_ref(),
        &state.config,
        &request.table.department,
        &request.table.sheet,
        candidate_flags(&request.table),
    )
    .await?;
    rank_table(&state, &request.requirements, table, RankingRole::Candidates).await
}

/// POST /api/v1/interviewers/table
pub async fn handle_interviewer_table(
    State(state): State<AppState>,
    Json(request): Json<InterviewerTableRequest>,
) -> Result<Json<TableResponse>, AppError> {
    let table = interviewer_table(
        state.sheets.as_ref(),
        &state.config,
        &request.department,
        &request.sheet,
        interviewer_flags(&request),
    )
    .await?;
    Ok(Json(table.into()))
}

/// POST /api/v1/interviewers/rank
pub async fn handle_interviewer_rank(
    State(state): State<AppState>,
    Json(request): Json<InterviewerRankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    validate_requirements(&request.requirements)?;
    let table = interviewer_table(
        state.sheets.as_ref(),
        &state.config,
        &request.table.department,
        &request.table.sheet,
        interviewer_flags(&request.table),
    )
    .await?;
    rank_table(&state, &request.requirements, table, RankingRole::Interviewers).await
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pieces
// ────────────────────────────────────────────────────────────────────────────

fn candidate_flags(request: &CandidateTableRequest) -> CohortFlags {
    CohortFlags {
        staffing: request.include_staffing,
        laboratory: request.include_laboratory,
        consultant: false,
    }
}

fn interviewer_flags(request: &InterviewerTableRequest) -> CohortFlags {
    CohortFlags {
        staffing: false,
        laboratory: false,
        consultant: request.include_consultant,
    }
}

fn validate_requirements(requirements: &str) -> Result<(), AppError> {
    if requirements.trim().is_empty() {
        return Err(AppError::Validation(
            "requirements cannot be empty".to_string(),
        ));
    }
    Ok(())
}

async fn rank_table(
    state: &AppState,
    requirements: &str,
    table: CompetencyTable,
    role: RankingRole,
) -> Result<Json<RankResponse>, AppError> {
    if table.is_empty() {
        return Err(AppError::Validation(
            "the selected sheet produced an empty table, nothing to rank".to_string(),
        ));
    }
    let rating = state
        .llm
        .rank(requirements, &table.to_markdown(), role)
        .await?;
    Ok(Json(RankResponse { rating }))
}
