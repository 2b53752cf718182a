//! 답변 생성 모듈
//!
//! 검색된 청크로 프롬프트를 구성하고 채팅 모델에 전달합니다.
//! 모델 호출 자체는 [`ChatModel`] 트레이트 뒤에 있습니다.

mod gemini;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::knowledge::ChunkRecord;

pub use gemini::{get_api_key, has_api_key, GeminiChat};

/// 시스템 프롬프트
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions based on \
the provided document context. If the context doesn't contain relevant information, say so clearly.";

// ============================================================================
// Messages
// ============================================================================

/// 메시지 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// 채팅 메시지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ============================================================================
// Prompt Assembly
// ============================================================================

/// 검색된 청크로 컨텍스트 블록 구성
///
/// 청크는 순위 순서대로 `Document N (파일명):` 머리와 함께 나열됩니다.
/// 검색 결과가 없으면 빈 문자열입니다.
pub fn build_context(chunks: &[&ChunkRecord]) -> String {
    if chunks.is_empty() {
        return String::new();
    }

    let mut context = String::from("Based on the following information from your documents:\n\n");

    for (i, chunk) in chunks.iter().enumerate() {
        context.push_str(&format!(
            "Document {} ({}):\n{}\n\n",
            i + 1,
            chunk.file_name(),
            chunk.content
        ));
    }

    context
}

/// 시스템 메시지 + 컨텍스트/질문 사용자 메시지
pub fn build_messages(chunks: &[&ChunkRecord], question: &str) -> Vec<ChatMessage> {
    let context = build_context(chunks);
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!("{}\n\nQuestion: {}", context, question)),
    ]
}

// ============================================================================
// Stats
// ============================================================================

/// 생성 통계
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub elapsed: Duration,
    /// 공백 기준 단어 수
    pub tokens: usize,
    pub tokens_per_second: f64,
}

impl GenerationStats {
    pub fn measure(content: &str, elapsed: Duration) -> Self {
        let tokens = content.split_whitespace().count();
        let secs = elapsed.as_secs_f64();
        let tokens_per_second = if secs > 0.0 { tokens as f64 / secs } else { 0.0 };

        Self {
            elapsed,
            tokens,
            tokens_per_second,
        }
    }
}

// ============================================================================
// Chat Model Trait
// ============================================================================

/// 채팅 모델 트레이트
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// 메시지 목록에 대한 응답 생성
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// 모델 이름
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_context_format() {
        let a = ChunkRecord::new("alpha content".to_string(), "a.txt", "txt", 0);
        let b = ChunkRecord::new("beta content".to_string(), "b.pdf", "pdf", 3);

        let context = build_context(&[&a, &b]);
        assert_eq!(
            context,
            "Based on the following information from your documents:\n\n\
             Document 1 (a.txt):\nalpha content\n\n\
             Document 2 (b.pdf):\nbeta content\n\n"
        );
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[]), "");
        let messages = build_messages(&[], "anything?");
        assert_eq!(messages[1].content, "\n\nQuestion: anything?");
    }

    #[test]
    fn test_build_messages() {
        let a = ChunkRecord::new("alpha".to_string(), "a.txt", "txt", 0);
        let messages = build_messages(&[&a], "what is alpha?");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.ends_with("\n\nQuestion: what is alpha?"));
        assert!(messages[1].content.contains("Document 1 (a.txt):\nalpha"));
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_generation_stats() {
        let stats = GenerationStats::measure("one two  three\nfour", Duration::from_secs(2));
        assert_eq!(stats.tokens, 4);
        assert!((stats.tokens_per_second - 2.0).abs() < f64::EPSILON);

        let stats = GenerationStats::measure("fast", Duration::ZERO);
        assert_eq!(stats.tokens_per_second, 0.0);
    }
}
