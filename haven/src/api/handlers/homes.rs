use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        homes::{CreateHomeRequest, HomeResponse, ListHomesQuery, UpdateHomeRequest},
        messages::{HomeMessageResponse, InquireRequest, MessageResponse},
        users::{CurrentUser, UserType},
    },
    auth::permissions::{require_ownership, require_role},
    db::{
        handlers::{HomeFilter, Homes, Messages, Repository, Users},
        models::{
            homes::{HomeCreateDBRequest, HomeUpdateDBRequest},
            messages::MessageCreateDBRequest,
            users::UserDBResponse,
        },
    },
    errors::Error,
    types::{HomeId, UserId},
};

/// Load the requester's account row inside the current transaction.
async fn load_requester(conn: &mut sqlx::PgConnection, id: UserId) -> Result<UserDBResponse, Error> {
    let mut user_repo = Users::new(conn);
    user_repo.get_by_id(id).await?.ok_or(Error::Unauthenticated { message: None })
}

/// List homes matching the query
#[utoipa::path(
    get,
    path = "/home",
    tag = "homes",
    params(ListHomesQuery),
    responses(
        (status = 200, description = "Matching homes", body = Vec<HomeResponse>),
        (status = 404, description = "No homes match the query"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_homes(State(state): State<AppState>, Query(query): Query<ListHomesQuery>) -> Result<Json<Vec<HomeResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut home_repo = Homes::new(&mut conn);

    let homes = home_repo.list(&HomeFilter::from(query)).await?;
    if homes.is_empty() {
        return Err(Error::NotFound {
            resource: "homes matching the query".to_string(),
        });
    }

    Ok(Json(homes.into_iter().map(HomeResponse::from).collect()))
}

/// Get a single home
#[utoipa::path(
    get,
    path = "/home/{id}",
    tag = "homes",
    params(("id" = i64, Path, description = "Home id")),
    responses(
        (status = 200, description = "The home", body = HomeResponse),
        (status = 404, description = "No such home"),
    )
)]
#[tracing::instrument(skip_all, fields(home_id = id))]
pub async fn get_home(State(state): State<AppState>, Path(id): Path<HomeId>) -> Result<Json<HomeResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut home_repo = Homes::new(&mut conn);

    let home = home_repo.get_by_id(id).await?.ok_or(Error::NotFound {
        resource: format!("home {id}"),
    })?;

    Ok(Json(HomeResponse::from(home)))
}

/// Create a listing
#[utoipa::path(
    post,
    path = "/home",
    request_body = CreateHomeRequest,
    tag = "homes",
    responses(
        (status = 201, description = "Listing created", body = HomeResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Requester is not a realtor"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(realtor_id = current_user.id))]
pub async fn create_home(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<CreateHomeRequest>,
) -> Result<(StatusCode, Json<HomeResponse>), Error> {
    request.validate()?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let requester = load_requester(&mut tx, current_user.id).await?;
    require_role(&requester, UserType::Realtor, "home listings")?;

    let mut home_repo = Homes::new(&mut tx);
    let home = home_repo.create(&HomeCreateDBRequest::from((request, requester.id))).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(HomeResponse::from(home))))
}

/// Update a listing owned by the requester
#[utoipa::path(
    put,
    path = "/home/{id}",
    request_body = UpdateHomeRequest,
    tag = "homes",
    params(("id" = i64, Path, description = "Home id")),
    responses(
        (status = 200, description = "Updated listing", body = HomeResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Requester does not own this listing"),
        (status = 403, description = "Requester is not a realtor"),
        (status = 404, description = "No such home"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(home_id = id))]
pub async fn update_home(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<HomeId>,
    Json(request): Json<UpdateHomeRequest>,
) -> Result<Json<HomeResponse>, Error> {
    request.validate()?;

    // Ownership check and mutation share one transaction
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let requester = load_requester(&mut tx, current_user.id).await?;
    require_role(&requester, UserType::Realtor, "home listings")?;

    let mut home_repo = Homes::new(&mut tx);
    let owner = home_repo.get_home_realtor(id).await?.ok_or(Error::NotFound {
        resource: format!("home {id}"),
    })?;
    require_ownership(owner.id, requester.id)?;

    let home = home_repo.update(id, &HomeUpdateDBRequest::from(request)).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(HomeResponse::from(home)))
}

/// Delete a listing owned by the requester
#[utoipa::path(
    delete,
    path = "/home/{id}",
    tag = "homes",
    params(("id" = i64, Path, description = "Home id")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Requester does not own this listing"),
        (status = 403, description = "Requester is not a realtor"),
        (status = 404, description = "No such home"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(home_id = id))]
pub async fn delete_home(State(state): State<AppState>, current_user: CurrentUser, Path(id): Path<HomeId>) -> Result<StatusCode, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let requester = load_requester(&mut tx, current_user.id).await?;
    require_role(&requester, UserType::Realtor, "home listings")?;

    let mut home_repo = Homes::new(&mut tx);
    let owner = home_repo.get_home_realtor(id).await?.ok_or(Error::NotFound {
        resource: format!("home {id}"),
    })?;
    require_ownership(owner.id, requester.id)?;

    // Images and messages cascade with the row
    home_repo.delete(id).await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Send an inquiry about a listing to its realtor
#[utoipa::path(
    post,
    path = "/home/{id}/inquire",
    request_body = InquireRequest,
    tag = "homes",
    params(("id" = i64, Path, description = "Home id")),
    responses(
        (status = 201, description = "Inquiry sent", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Requester is not a buyer"),
        (status = 404, description = "No such home"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(home_id = id, buyer_id = current_user.id))]
pub async fn inquire(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<HomeId>,
    Json(request): Json<InquireRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), Error> {
    request.validate()?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let requester = load_requester(&mut tx, current_user.id).await?;
    require_role(&requester, UserType::Buyer, "inquiries")?;

    let mut home_repo = Homes::new(&mut tx);
    let realtor = home_repo.get_home_realtor(id).await?.ok_or(Error::NotFound {
        resource: format!("home {id}"),
    })?;

    let mut message_repo = Messages::new(&mut tx);
    let message = message_repo
        .create(&MessageCreateDBRequest {
            message: request.message,
            home_id: id,
            buyer_id: requester.id,
            realtor_id: realtor.id,
        })
        .await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// List inquiries for a listing owned by the requester
#[utoipa::path(
    get,
    path = "/home/{id}/messages",
    tag = "homes",
    params(("id" = i64, Path, description = "Home id")),
    responses(
        (status = 200, description = "Inquiries with buyer contact details", body = Vec<HomeMessageResponse>),
        (status = 401, description = "Requester does not own this listing"),
        (status = 403, description = "Requester is not a realtor"),
        (status = 404, description = "No such home"),
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip_all, fields(home_id = id))]
pub async fn list_home_messages(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<HomeId>,
) -> Result<Json<Vec<HomeMessageResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let requester = load_requester(&mut conn, current_user.id).await?;
    require_role(&requester, UserType::Realtor, "inquiries")?;

    let mut home_repo = Homes::new(&mut conn);
    let owner = home_repo.get_home_realtor(id).await?.ok_or(Error::NotFound {
        resource: format!("home {id}"),
    })?;
    require_ownership(owner.id, requester.id)?;

    let mut message_repo = Messages::new(&mut conn);
    let messages = message_repo.list_by_home(id).await?;

    Ok(Json(messages.into_iter().map(HomeMessageResponse::from).collect()))
}
