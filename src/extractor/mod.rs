//! 콘텐츠 추출 모듈
//!
//! 다양한 파일 형식에서 텍스트 콘텐츠를 추출합니다.
//! - 텍스트 파일: UTF-8 엄격 디코딩
//! - DOCX: 본문 문단
//! - XLSX: 시트별 표 렌더링
//! - PDF: pdf-extract 텍스트 레이어 (스캔 문서는 [`ScannedDocumentFallback`])
//! - 이미지: OCR 엔진

mod docx;
mod image;
mod pdf;
mod scanned;
mod text;
mod xlsx;

use std::collections::HashMap;
use std::sync::Arc;

use crate::collector::FileType;
use crate::ocr::{OcrEngine, RasterizeError};

pub use docx::DocxExtractor;
pub use image::{ImageExtractor, OCR_ERROR_PREFIX};
pub use pdf::{extract_pdf_pages, PdfTextExtractor};
pub use scanned::{failed_pages, render_pages, PageError, PageOutcome, ScannedDocumentFallback};
pub use text::PlainTextExtractor;
pub use xlsx::{render_table, XlsxExtractor};

// ============================================================================
// Errors
// ============================================================================

/// 추출 오류
///
/// 파일 하나의 추출 실패이며, 세션 전체를 중단시키지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("text file is not valid UTF-8: {0}")]
    Decoding(#[from] std::string::FromUtf8Error),
    #[error("failed to read DOCX: {0}")]
    Docx(String),
    #[error("failed to read XLSX: {0}")]
    Xlsx(String),
    #[error("failed to read PDF: {0}")]
    Pdf(String),
    #[error("failed to rasterize PDF: {0}")]
    Rasterize(#[from] RasterizeError),
    #[error("no extractor registered for {0}")]
    Unsupported(FileType),
}

// ============================================================================
// Extract Trait
// ============================================================================

/// 형식별 추출기 트레이트
pub trait Extract: Send + Sync {
    /// 원본 바이트에서 텍스트 추출
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError>;

    /// 추출기 이름
    fn name(&self) -> &'static str;
}

// ============================================================================
// Content Extractor
// ============================================================================

/// 콘텐츠 추출기 (형식 → 추출기 레지스트리)
pub struct ContentExtractor {
    extractors: HashMap<FileType, Box<dyn Extract>>,
}

impl ContentExtractor {
    /// 빈 레지스트리
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// 기본 추출기 등록
    ///
    /// 이미지 추출은 주어진 OCR 엔진을 사용합니다.
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        let mut registry = Self::empty();
        registry.register(FileType::Text, Box::new(PlainTextExtractor));
        registry.register(FileType::Docx, Box::new(DocxExtractor));
        registry.register(FileType::Xlsx, Box::new(XlsxExtractor));
        registry.register(FileType::Pdf, Box::new(PdfTextExtractor));
        registry.register(FileType::Image, Box::new(ImageExtractor::new(ocr)));
        registry
    }

    /// 추출기 등록 (기존 추출기 반환)
    pub fn register(
        &mut self,
        file_type: FileType,
        extractor: Box<dyn Extract>,
    ) -> Option<Box<dyn Extract>> {
        self.extractors.insert(file_type, extractor)
    }

    /// 지원 여부
    pub fn supports(&self, file_type: FileType) -> bool {
        self.extractors.contains_key(&file_type)
    }

    /// 바이트에서 콘텐츠 추출
    pub fn extract(&self, data: &[u8], file_type: FileType) -> Result<String, ExtractionError> {
        let extractor = self
            .extractors
            .get(&file_type)
            .ok_or(ExtractionError::Unsupported(file_type))?;

        tracing::debug!("Extracting {} ({} bytes)", extractor.name(), data.len());
        extractor.extract(data)
    }
}

// ============================================================================
// Tests
// ============================================================================
