//! 이미지 텍스트 추출 모듈
//!
//! OCR 엔진으로 이미지에서 텍스트를 추출합니다.

use std::sync::Arc;

use super::{Extract, ExtractionError};
use crate::ocr::OcrEngine;

/// OCR 실패 시 반환 텍스트의 접두사
pub const OCR_ERROR_PREFIX: &str = "Error during OCR: ";

/// 이미지 추출기
///
/// OCR 실패는 오류가 아니라 `Error during OCR: ...` 텍스트로 반환되어
/// 일반 콘텐츠처럼 청킹됩니다.
pub struct ImageExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl ImageExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }
}

impl Extract for ImageExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        match self.ocr.recognize(data) {
            Ok(text) => {
                if text.trim().is_empty() {
                    tracing::warn!("No text recognized in image ({} bytes)", data.len());
                }
                Ok(text)
            }
            Err(e) => {
                tracing::warn!("OCR failed with {}: {}", self.ocr.name(), e);
                Ok(format!("{}{}", OCR_ERROR_PREFIX, e))
            }
        }
    }

    fn name(&self) -> &'static str {
        "image"
    }
}
