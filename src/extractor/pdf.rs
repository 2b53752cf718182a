//! PDF 텍스트 추출 모듈
//!
//! pdf-extract 크레이트로 텍스트 레이어를 읽습니다.
//! 텍스트 레이어가 부족한 스캔 문서 처리는 `scanned` 모듈이 담당합니다.

use std::panic::{self, AssertUnwindSafe};

use super::{Extract, ExtractionError};

/// PDF 텍스트 레이어 추출기
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl Extract for PdfTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        // 텍스트가 없는 페이지는 빈 문자열이므로 그대로 이어붙임
        Ok(extract_pdf_pages(data)?.concat())
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

/// 페이지 순서대로 텍스트 추출
///
/// pdf-extract는 일부 손상된 문서에서 panic하므로 오류로 변환합니다.
pub fn extract_pdf_pages(data: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));

    match result {
        Ok(Ok(pages)) => {
            tracing::debug!("Extracted text layer from {} PDF pages", pages.len());
            Ok(pages)
        }
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf("PDF parser panicked".to_string())),
    }
}
