//! 설정 모듈
//!
//! 파이프라인 파라미터(청크 크기, 스캔 PDF 판정 기준, top-k)와
//! 외부 도구(tesseract, pdftoppm), 생성 모델 설정을 관리합니다.
//! 기본값 → `DOCRAG_*` 환경변수 → CLI 인자 순으로 덮어씁니다.

use std::str::FromStr;

use anyhow::{Context, Result};

use crate::knowledge::ChunkConfig;
pub use crate::knowledge::DEFAULT_TOP_K;

// ============================================================================
// Defaults
// ============================================================================

/// 청크 당 단어 수
pub const DEFAULT_CHUNK_SIZE: usize = 500;
/// 청크 간 중첩 단어 수
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;
/// 이 글자 수 미만이면 스캔 PDF로 판정
pub const DEFAULT_SCANNED_THRESHOLD: usize = 100;
/// pdftoppm 렌더링 해상도
pub const DEFAULT_RENDER_DPI: u32 = 150;
/// 기본 생성 모델
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

// ============================================================================
// Settings
// ============================================================================

/// 전체 설정
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub scanned_threshold: usize,
    pub top_k: usize,
    /// tesseract 실행 파일
    pub tesseract_bin: String,
    /// tesseract 언어 (`-l`)
    pub ocr_language: String,
    /// pdftoppm 실행 파일
    pub pdftoppm_bin: String,
    pub render_dpi: u32,
    /// 생성 모델 ID
    pub model: String,
    pub temperature: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            scanned_threshold: DEFAULT_SCANNED_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            tesseract_bin: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            pdftoppm_bin: "pdftoppm".to_string(),
            render_dpi: DEFAULT_RENDER_DPI,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
        }
    }
}

impl Settings {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로부터 설정 로드
    ///
    /// 빈 값은 설정되지 않은 것으로 취급합니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(v) = get("DOCRAG_CHUNK_SIZE") {
            settings.chunk_size = parse_var("DOCRAG_CHUNK_SIZE", &v)?;
        }
        if let Some(v) = get("DOCRAG_CHUNK_OVERLAP") {
            settings.chunk_overlap = parse_var("DOCRAG_CHUNK_OVERLAP", &v)?;
        }
        if let Some(v) = get("DOCRAG_SCANNED_THRESHOLD") {
            settings.scanned_threshold = parse_var("DOCRAG_SCANNED_THRESHOLD", &v)?;
        }
        if let Some(v) = get("DOCRAG_TOP_K") {
            settings.top_k = parse_var("DOCRAG_TOP_K", &v)?;
        }
        if let Some(v) = get("DOCRAG_TESSERACT_BIN") {
            settings.tesseract_bin = v;
        }
        if let Some(v) = get("DOCRAG_OCR_LANGUAGE") {
            settings.ocr_language = v;
        }
        if let Some(v) = get("DOCRAG_PDFTOPPM_BIN") {
            settings.pdftoppm_bin = v;
        }
        if let Some(v) = get("DOCRAG_RENDER_DPI") {
            settings.render_dpi = parse_var("DOCRAG_RENDER_DPI", &v)?;
        }
        if let Some(v) = get("DOCRAG_MODEL") {
            settings.model = v;
        }
        if let Some(v) = get("DOCRAG_TEMPERATURE") {
            settings.temperature = parse_var("DOCRAG_TEMPERATURE", &v)?;
        }

        Ok(settings)
    }

    /// 청크 설정 (size/overlap 검증 포함)
    pub fn chunk_config(&self) -> Result<ChunkConfig> {
        ChunkConfig::new(self.chunk_size, self.chunk_overlap)
            .context("Invalid chunk settings")
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value for {}: {:?}", key, value))
}

// ============================================================================
// Tests
// ============================================================================
