use axum::Json;
use giftigo_core::sector::Sector;

use crate::response::DataResponse;

/// GET /api/v1/sectors
pub async fn list() -> Json<DataResponse<[Sector; 10]>> {
    Json(DataResponse { data: Sector::ALL })
}
