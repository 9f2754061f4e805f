//! Voice assistant service
//!
//! Forwards the recent conversation to the language model and always produces
//! a reply: when the model is unavailable a canned, keyword-matched answer in
//! the caller's language is returned instead.

use chrono::Utc;
use serde::Deserialize;
use shared::{
    agriculture_system_prompt, ChatErrorKind, ChatMessage, ChatReply, ChatRole, FallbackTopic,
    Language,
};

use crate::external::{LlmMessage, PerplexityClient};

/// Number of trailing conversation entries sent to the model
pub const CONTEXT_WINDOW: usize = 5;

/// Number of citations appended to a reply
pub const MAX_CITATIONS: usize = 2;

pub const POWERED_BY: &str = "Perplexity AI";

/// Request body for `POST /api/voice`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    #[serde(default)]
    pub conversation: serde_json::Value,
    #[serde(default)]
    pub from_lang: Option<String>,
    #[serde(default)]
    pub to_lang: Option<String>,
}

/// A request the assistant cannot answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceRejection {
    pub kind: ChatErrorKind,
    pub language: Language,
}

impl VoiceRejection {
    pub fn error(&self) -> &'static str {
        match self.kind {
            ChatErrorKind::InvalidFormat => "Invalid conversation format",
            ChatErrorKind::NoMessage => "No user message found",
            ChatErrorKind::ServerError => "Server error",
        }
    }

    pub fn reply(&self) -> &'static str {
        self.kind.reply(self.language)
    }
}

#[derive(Clone)]
pub struct VoiceService {
    llm: Option<PerplexityClient>,
}

/// Parse conversation entries; malformed entries are kept as unknown-role blanks
fn parse_conversation(raw: &[serde_json::Value]) -> Vec<ChatMessage> {
    raw.iter()
        .map(|value| {
            serde_json::from_value::<ChatMessage>(value.clone()).unwrap_or(ChatMessage {
                role: ChatRole::Unknown,
                text: String::new(),
            })
        })
        .collect()
}

/// System prompt plus the trailing window of user/assistant turns
pub fn build_prompt(language: Language, conversation: &[ChatMessage]) -> Vec<LlmMessage> {
    let start = conversation.len().saturating_sub(CONTEXT_WINDOW);
    let recent = conversation[start..].iter().filter_map(|msg| {
        let role = match msg.role {
            ChatRole::User => "user",
            ChatRole::Ai | ChatRole::Assistant => "assistant",
            ChatRole::System | ChatRole::Unknown => return None,
        };
        let content = msg.text.trim();
        (!content.is_empty()).then(|| LlmMessage {
            role,
            content: content.to_string(),
        })
    });

    std::iter::once(LlmMessage {
        role: "system",
        content: agriculture_system_prompt(language).to_string(),
    })
    .chain(recent)
    .collect()
}

/// Append up to two source links to a model reply
pub fn with_citations(reply: String, citations: &[String]) -> String {
    if citations.is_empty() {
        return reply;
    }
    let sources: Vec<&str> = citations
        .iter()
        .take(MAX_CITATIONS)
        .map(String::as_str)
        .collect();
    format!("{}\n\n📚 Sources: {}", reply, sources.join(", "))
}

impl VoiceService {
    pub fn new(llm: Option<PerplexityClient>) -> Self {
        Self { llm }
    }

    /// Answer the last user message of a conversation
    pub async fn respond(&self, request: VoiceRequest) -> Result<ChatReply, VoiceRejection> {
        let language = Language::from_code_or_default(request.from_lang.as_deref().unwrap_or("en"));
        let reject = |kind| VoiceRejection { kind, language };

        let serde_json::Value::Array(raw) = &request.conversation else {
            return Err(reject(ChatErrorKind::InvalidFormat));
        };
        let conversation = parse_conversation(raw);

        let Some(last) = conversation.last().filter(|m| m.role == ChatRole::User) else {
            return Err(reject(ChatErrorKind::NoMessage));
        };
        let query = last.text.trim().to_lowercase();
        tracing::debug!(
            from = %language,
            to = request.to_lang.as_deref().unwrap_or("en"),
            turns = conversation.len(),
            "Voice query"
        );

        let reply = self.generate_reply(&query, language, &conversation).await;

        let mut conversation = conversation;
        conversation.push(ChatMessage::ai(reply.clone()));

        Ok(ChatReply {
            reply,
            conversation,
            timestamp: Utc::now(),
            powered_by: POWERED_BY.to_string(),
        })
    }

    async fn generate_reply(
        &self,
        query: &str,
        language: Language,
        conversation: &[ChatMessage],
    ) -> String {
        let fallback = || FallbackTopic::detect(query).reply(language).to_string();

        let Some(llm) = &self.llm else {
            return fallback();
        };

        let messages = build_prompt(language, conversation);
        match llm.complete(&messages).await {
            Ok(completion) => with_citations(completion.content, &completion.citations),
            Err(e) => {
                tracing::warn!("Using fallback voice reply: {}", e);
                fallback()
            }
        }
    }
}
