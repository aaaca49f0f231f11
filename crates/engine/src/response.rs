//! Maps generator replies into [`RequestResult`]s.
//!
//! Server failures only ever fill the generic message; field errors come
//! from local validation alone.

use api_types::qr::ErrorBody;

use crate::{
    client::{ClientError, HttpReply},
    result::{GENERATION_FAILED, QrImage, RequestErrors, RequestResult},
};

pub fn map_reply(reply: Result<HttpReply, ClientError>) -> RequestResult {
    match reply {
        Ok(reply) if reply.is_success() => {
            if reply.body.is_empty() {
                tracing::warn!(status = reply.status, "generator returned an empty body");
                return RequestResult::Failed(RequestErrors::generic(GENERATION_FAILED));
            }
            RequestResult::Success(QrImage::new(reply.body, reply.content_type))
        }
        Ok(reply) => {
            tracing::warn!(status = reply.status, "generator rejected the request");
            RequestResult::Failed(RequestErrors::generic(failure_message(&reply.body)))
        }
        Err(err) => {
            tracing::warn!("generator unreachable: {err}");
            RequestResult::Failed(RequestErrors::generic(GENERATION_FAILED))
        }
    }
}

/// Default message, enriched with the server's error descriptions when the
/// body parses. Invalid UTF-8 is decoded as replacement characters; bodies
/// that still do not parse leave the default untouched.
fn failure_message(body: &[u8]) -> String {
    let mut message = GENERATION_FAILED.to_string();

    let text = String::from_utf8_lossy(body);
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(&text) else {
        return message;
    };

    for description in parsed.errors.into_iter().filter_map(|err| err.description) {
        message.push(' ');
        message.push_str(&description);
    }
    message
}
