//! Type conversions between Chatbox and Gemini formats.

use crate::gemini::dto::{
    ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfigDto, Part,
};
use chatbox_core::{GenerateRequest, Role};
use chatbox_error::{ChatboxResult, UpstreamError, UpstreamErrorKind};
use tracing::debug;

/// Gemini's label for a role.
pub fn gemini_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

/// Builds the request body for a windowed conversation.
pub fn to_generate_content_request(request: &GenerateRequest) -> GenerateContentRequest {
    let generation = request.generation();
    let contents = request
        .turns()
        .iter()
        .map(|turn| Content {
            role: Some(gemini_role(*turn.role()).to_string()),
            parts: vec![Part {
                text: Some(turn.content().clone()),
            }],
        })
        .collect();

    GenerateContentRequest {
        contents,
        generation_config: GenerationConfigDto {
            temperature: *generation.temperature(),
            top_p: *generation.top_p(),
            top_k: *generation.top_k(),
            max_output_tokens: *generation.max_output_tokens(),
        },
    }
}

/// Extracts the text fragment carried by one streamed event.
///
/// Returns `Ok(None)` for events without text (e.g. a bare finish reason).
pub fn fragment_from_event(data: &str) -> ChatboxResult<Option<String>> {
    let response: GenerateContentResponse = serde_json::from_str(data)
        .map_err(|e| UpstreamError::new(UpstreamErrorKind::Decode(e.to_string())))?;

    if let Some(error) = response.error {
        return Err(UpstreamError::new(UpstreamErrorKind::Stream(error.message)).into());
    }

    let candidate = response.candidates.first();
    if let Some(reason) = candidate.and_then(|c| c.finish_reason.as_deref()) {
        debug!(finish_reason = reason, "Upstream candidate finished");
    }

    let text: String = candidate
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    Ok((!text.is_empty()).then_some(text))
}

/// Pulls the message out of an error response body, if it has the usual shape.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
}
