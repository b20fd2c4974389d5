use crate::application_port::ServiceError;
use uuid::Uuid;

// UUIDs live in BINARY(16) columns.

#[inline]
pub(crate) fn uuid_as_bytes(id: &Uuid) -> &[u8] {
    id.as_bytes()
}

#[inline]
pub(crate) fn uuid_from_bytes(bytes: &[u8]) -> Result<Uuid, ServiceError> {
    Uuid::from_slice(bytes).map_err(|e| ServiceError::Store(e.to_string()))
}

#[inline]
pub(crate) fn store_err<E: std::fmt::Display>(e: E) -> ServiceError {
    ServiceError::Store(e.to_string())
}
