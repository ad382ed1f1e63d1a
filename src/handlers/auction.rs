use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::models::auction::{Auction, CreateAuctionRequest, ErrorResponse};
use crate::services::auction_store::AuctionStore;
use crate::AppState;

/// Handler for POST /auction
/// Creates an auction and arms its automatic closure
pub async fn create_auction(
    State(state): State<AppState>,
    Json(request): Json<CreateAuctionRequest>,
) -> Result<(StatusCode, Json<Auction>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(e) = request.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })));
    }

    let auction = state
        .scheduler
        .create_and_schedule(request.into_auction())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error trying to create auction: {}", e),
                }),
            )
        })?;

    Ok((StatusCode::CREATED, Json(auction)))
}

/// Handler for GET /auction/{id}
/// Returns the stored auction, whose status is authoritative
pub async fn get_auction(
    State(state): State<AppState>,
    Path(auction_id): Path<String>,
) -> Result<Json<Auction>, (StatusCode, Json<ErrorResponse>)> {
    let auction = state
        .scheduler
        .store()
        .find_by_id(&auction_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Database error: {}", e),
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Auction {} not found", auction_id),
                }),
            )
        })?;

    Ok(Json(auction))
}
