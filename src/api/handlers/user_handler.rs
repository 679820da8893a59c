//! Account handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_self, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    AccountResponse, AccountView, ChangePassword, CreateAccount, PasswordUpdated, UpdateAccount,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Routes open to anonymous callers
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_account))
}

/// Routes that require a bearer token
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts))
        .route("/paginate", get(list_accounts_paginated))
        .route("/password", put(change_password))
        .route(
            "/:id",
            get(get_account).put(update_account).delete(delete_account),
        )
}

/// Create an account and its role-specific profile
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateAccount,
    responses(
        (status = 201, description = "Account created with its profile", body = AccountView),
        (status = 400, description = "VALIDATION_ERROR or USER_CREATION_ERROR"),
        (status = 500, description = "SERVER_ERROR")
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccount>,
) -> AppResult<Created<AccountView>> {
    let view = state.accounts.create_account(payload).await?;
    Ok(Created(view))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of all accounts", body = Vec<AccountResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_accounts(State(state): State<AppState>) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state.accounts.list_accounts().await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// List accounts one page at a time
#[utoipa::path(
    get,
    path = "/users/paginate",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of accounts under `data` with pagination `meta`"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_accounts_paginated(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<AccountResponse>>> {
    let page = state.accounts.list_accounts_paginated(params).await?;
    Ok(Json(page.map(AccountResponse::from)))
}

/// Get an account together with its profile
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account with its profile", body = AccountView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AccountView>> {
    let view = state.accounts.get_account(id).await?;
    Ok(Json(view))
}

/// Update own account details
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccount,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Can only update own account"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn update_account(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAccount>,
) -> AppResult<Json<AccountResponse>> {
    require_self(&current_user, id)?;
    let account = state.accounts.update_account(id, payload).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// Delete own account and its profile
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Can only delete own account"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_self(&current_user, id)?;
    state.accounts.delete_account(id).await?;
    Ok(NoContent)
}

/// Rotate the password of the authenticated account
#[utoipa::path(
    put,
    path = "/users/password",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ChangePassword,
    responses(
        (status = 200, description = "Password replaced", body = PasswordUpdated),
        (status = 400, description = "PASSWORD_UPDATE_ERROR or VALIDATION_ERROR"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn change_password(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChangePassword>,
) -> AppResult<Json<PasswordUpdated>> {
    let result = state
        .credentials
        .change_password(current_user.id, payload)
        .await?;
    Ok(Json(result))
}
