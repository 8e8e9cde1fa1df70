//! Response bodies shared by the handlers.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Literal acknowledgement returned by the delete endpoints.
pub const ACK: &str = "ok";

/// `{"id": n}` returned by create, update and approve/reject.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdBody {
    pub id: i64,
}

pub fn id_body(id: i64) -> Json<IdBody> {
    Json(IdBody { id })
}

pub fn ack() -> Json<&'static str> {
    Json(ACK)
}
