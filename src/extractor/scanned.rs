//! 스캔 PDF 폴백
//!
//! 텍스트 레이어가 기준 미만인 PDF를 페이지별로 래스터화한 뒤 OCR합니다.
//! 페이지 하나의 실패는 해당 페이지만 비우고 나머지는 계속 처리합니다.

use std::sync::Arc;

use super::ExtractionError;
use crate::ocr::{OcrEngine, OcrError, PageRasterizer, RasterizeError};

// ============================================================================
// Page Outcome
// ============================================================================

/// 페이지 단위 실패
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("render failed: {0}")]
    Rasterize(RasterizeError),
    #[error("OCR failed: {0}")]
    Ocr(OcrError),
}

/// 페이지별 OCR 결과
#[derive(Debug)]
pub struct PageOutcome {
    /// 페이지 번호 (1부터 시작)
    pub page: usize,
    pub result: Result<String, PageError>,
}

impl PageOutcome {
    /// 인식된 텍스트 (실패 시 빈 문자열)
    pub fn text(&self) -> &str {
        self.result.as_deref().unwrap_or("")
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// 실패한 페이지 수
pub fn failed_pages(outcomes: &[PageOutcome]) -> usize {
    outcomes.iter().filter(|o| !o.is_ok()).count()
}

/// 페이지 결과를 `--- Page N ---` 구분자로 연결
pub fn render_pages(outcomes: &[PageOutcome]) -> String {
    let mut text = String::new();
    for outcome in outcomes {
        text.push_str(&format!("\n--- Page {} ---\n", outcome.page));
        text.push_str(outcome.text());
    }
    text
}

// ============================================================================
// Fallback
// ============================================================================

/// 스캔 문서 폴백
pub struct ScannedDocumentFallback {
    rasterizer: Arc<dyn PageRasterizer>,
    ocr: Arc<dyn OcrEngine>,
    /// 이 글자 수 미만이면 스캔 문서로 판정
    threshold: usize,
}

impl ScannedDocumentFallback {
    pub fn new(rasterizer: Arc<dyn PageRasterizer>, ocr: Arc<dyn OcrEngine>, threshold: usize) -> Self {
        Self {
            rasterizer,
            ocr,
            threshold,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// 앞뒤 공백을 제외한 글자 수가 기준 미만인지
    pub fn is_scanned(&self, native_text: &str) -> bool {
        native_text.trim().chars().count() < self.threshold
    }

    /// 전체 페이지 OCR 후 구분자와 함께 연결
    ///
    /// 문서 전체를 래스터화할 수 없으면 오류입니다.
    pub fn recover(&self, pdf: &[u8]) -> Result<String, ExtractionError> {
        let outcomes = self.ocr_pages(pdf)?;

        let failed = failed_pages(&outcomes);
        if failed > 0 && failed == outcomes.len() {
            tracing::warn!(
                "All {} pages failed OCR; output contains only page markers",
                failed
            );
        } else if failed > 0 {
            tracing::warn!("{} of {} pages failed OCR", failed, outcomes.len());
        }

        Ok(render_pages(&outcomes))
    }

    /// 페이지별 OCR 결과
    pub fn ocr_pages(&self, pdf: &[u8]) -> Result<Vec<PageOutcome>, ExtractionError> {
        let images = self.rasterizer.rasterize(pdf)?;
        tracing::info!(
            "OCR fallback: {} pages via {} + {}",
            images.len(),
            self.rasterizer.name(),
            self.ocr.name()
        );

        let outcomes = images
            .into_iter()
            .enumerate()
            .map(|(i, image)| {
                let page = i + 1;
                let result = image
                    .map_err(PageError::Rasterize)
                    .and_then(|bytes| self.ocr.recognize(&bytes).map_err(PageError::Ocr));

                if let Err(e) = &result {
                    tracing::warn!("Page {} skipped: {}", page, e);
                }

                PageOutcome { page, result }
            })
            .collect();

        Ok(outcomes)
    }
}

// ============================================================================
// Tests
// ============================================================================
