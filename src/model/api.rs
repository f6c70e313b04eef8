use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Deserializes a nullable field of a partial update.
///
/// Used with `#[serde(default)]`: an absent field stays `None`, `null` becomes
/// `Some(None)` and a value becomes `Some(Some(value))`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

/// Returned after a row has been deleted.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DeletedDto {
    pub message: String,
    pub id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PaginationDto {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl PaginationDto {
    /// Builds pagination metadata, rounding the page count up.
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// One page of rows plus pagination metadata.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PaginatedDto<T> {
    pub data: Vec<T>,
    pub pagination: PaginationDto,
}

/// Unpaginated list wrapper.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DataDto<T> {
    pub data: Vec<T>,
}
