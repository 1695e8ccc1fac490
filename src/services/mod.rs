pub mod account;
pub mod admin;
pub mod coupons;
pub mod orders;

use crate::error::{ApiResult, MutationResult};
use crate::response::ApiResponse;

/// Collapse a gateway call into the standardized mutation outcome: the
/// server's `message` travels through both arms, and no error escapes the
/// view-model boundary. For endpoints whose success payload is the updated
/// record; a 2xx without one is a broken contract and callers never get a
/// phantom snapshot.
pub(crate) fn into_mutation<T>(resp: ApiResult<ApiResponse<T>>) -> MutationResult<T> {
    match resp {
        Ok(envelope) => match envelope.data {
            Some(data) => MutationResult::Success {
                data,
                message: envelope.message,
            },
            None => MutationResult::Failure {
                message: envelope.message,
            },
        },
        Err(err) => MutationResult::Failure {
            message: err.user_message(),
        },
    }
}

/// Collapse for mutations whose success carries no payload (deletes,
/// moderation acks). Success is decided by the HTTP status alone, so a 2xx
/// with `data: null` is still a success.
pub(crate) fn into_ack(resp: ApiResult<ApiResponse<serde_json::Value>>) -> MutationResult<()> {
    match resp {
        Ok(envelope) => MutationResult::Success {
            data: (),
            message: envelope.message,
        },
        Err(err) => MutationResult::Failure {
            message: err.user_message(),
        },
    }
}
