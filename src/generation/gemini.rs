//! Gemini 채팅 모델
//!
//! generateContent API로 답변을 생성합니다.
//! source: https://ai.google.dev/api/generate-content

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, ChatModel, Role};
use crate::config::Settings;

/// Gemini API 베이스 URL
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// 최대 재시도 횟수 (429)
const MAX_RETRIES: u32 = 3;
/// 초기 백오프 (ms)
const INITIAL_BACKOFF_MS: u64 = 2000;
/// 최대 출력 토큰
const MAX_OUTPUT_TOKENS: u32 = 8192;
/// API 키 환경변수 (우선순위 순)
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_AI_API_KEY"];

// ============================================================================
// Gemini Chat
// ============================================================================

/// Gemini 채팅 모델
pub struct GeminiChat {
    api_key: String,
    client: reqwest::Client,
    model: String,
    temperature: f32,
}

impl GeminiChat {
    /// 새 인스턴스 생성
    ///
    /// # Arguments
    /// * `api_key` - Google AI API 키
    /// * `model` - 모델 ID (예: gemini-2.0-flash)
    pub fn new(api_key: String, model: impl Into<String>, temperature: f32) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_key,
            client,
            model: model.into(),
            temperature,
        })
    }

    /// 환경변수의 API 키와 설정값으로 생성
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = get_api_key()?;
        Self::new(api_key, settings.model.clone(), settings.temperature)
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model)
    }

    /// 메시지 목록을 요청 본문으로 변환
    ///
    /// 시스템 메시지는 `systemInstruction`으로, 어시스턴트는 `model` 역할로 보냅니다.
    fn build_request(&self, messages: &[ChatMessage]) -> GenerateRequest {
        let system_text: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();

        let system_instruction = if system_text.is_empty() {
            None
        } else {
            Some(Content {
                role: None,
                parts: vec![Part {
                    text: system_text.join("\n\n"),
                }],
            })
        };

        let contents = messages
            .iter()
            .filter_map(|m| {
                let role = match m.role {
                    Role::System => return None,
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                Some(Content {
                    role: Some(role.to_string()),
                    parts: vec![Part {
                        text: m.content.clone(),
                    }],
                })
            })
            .collect();

        GenerateRequest {
            system_instruction,
            contents,
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[async_trait]
impl ChatModel for GeminiChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = self.build_request(messages);
        let url = self.endpoint();

        let mut last_error: Option<anyhow::Error> = None;

        // 재시도 루프 (429 에러 시 지수 백오프)
        for attempt in 0..=MAX_RETRIES {
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&request)
                .send()
                .await
                .context("Failed to send generateContent request")?;

            let status = response.status();
            let body = response
                .text()
                .await
                .context("Failed to read response body")?;

            if status.is_success() {
                let parsed: GenerateResponse =
                    serde_json::from_str(&body).context("Failed to parse generateContent response")?;
                return parsed.into_text();
            }

            if status.as_u16() == 429 {
                let backoff = Duration::from_millis(INITIAL_BACKOFF_MS * 2u64.pow(attempt));
                tracing::warn!(
                    "Rate limit hit (429), backing off {:?} (attempt {}/{})",
                    backoff,
                    attempt + 1,
                    MAX_RETRIES
                );
                last_error = Some(anyhow::anyhow!("Rate limit exceeded (429)"));

                if attempt < MAX_RETRIES {
                    tokio::time::sleep(backoff).await;
                    continue;
                }
            } else {
                if let Ok(error) = serde_json::from_str::<GeminiError>(&body) {
                    anyhow::bail!(
                        "Gemini API error ({}): {}",
                        error.error.status,
                        error.error.message
                    );
                }
                anyhow::bail!("Gemini API error ({}): {}", status, body);
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("Generation failed after {} retries", MAX_RETRIES)))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// 첫 후보의 텍스트 파트 연결
    fn into_text(self) -> Result<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .context("Gemini response contained no candidates")?;

        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini API 에러 응답
#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
    #[serde(default)]
    status: String,
}

// ============================================================================
// API Key Management
// ============================================================================

/// API 키 로드 (환경변수에서)
///
/// 우선순위:
/// 1. `GEMINI_API_KEY` 환경변수
/// 2. `GOOGLE_AI_API_KEY` 환경변수
pub fn get_api_key() -> Result<String> {
    api_key_from(|name| std::env::var(name).ok())
}

/// API 키 존재 여부 확인
pub fn has_api_key() -> bool {
    get_api_key().is_ok()
}

/// 조회 함수로 API 키 결정 (빈 값은 건너뜀)
fn api_key_from<F>(lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    for name in API_KEY_VARS {
        if let Some(key) = lookup(name).filter(|k| !k.is_empty()) {
            tracing::debug!("Using API key from {}", name);
            return Ok(key);
        }
    }

    anyhow::bail!(
        "API key not found. Set GEMINI_API_KEY or GOOGLE_AI_API_KEY environment variable.\n\
         Get your API key at: https://aistudio.google.com/app/apikey"
    )
}

// ============================================================================
// Tests
// ============================================================================
