//! OCR 및 PDF 래스터화 모듈
//!
//! 외부 도구를 프로세스로 호출합니다.
//! - tesseract: 이미지 → 텍스트
//! - pdftoppm (poppler-utils): PDF 페이지 → PNG
//!
//! 두 호출 모두 블로킹이며 내부 타임아웃이 없습니다.

mod pdftoppm;
mod tesseract;

use std::process::Command;

pub use pdftoppm::{page_count, PdftoppmRasterizer};
pub use tesseract::TesseractOcr;

// ============================================================================
// Errors
// ============================================================================

/// OCR 오류
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("I/O error during OCR: {0}")]
    Io(#[from] std::io::Error),
}

/// 래스터화 오류
#[derive(Debug, thiserror::Error)]
pub enum RasterizeError {
    /// 문서를 열 수 없음 (손상, 암호화, 페이지 없음)
    #[error("cannot open PDF: {0}")]
    Open(String),
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} failed on page {page}: {stderr}")]
    Page {
        program: String,
        page: usize,
        stderr: String,
    },
    #[error("I/O error during rasterization: {0}")]
    Io(#[from] std::io::Error),
}

/// 페이지 이미지 (페이지 단위 실패 포함)
pub type PageImage = Result<Vec<u8>, RasterizeError>;

// ============================================================================
// Traits
// ============================================================================

/// OCR 엔진 트레이트
pub trait OcrEngine: Send + Sync {
    /// 이미지 바이트(PNG, JPEG 등)에서 텍스트 인식
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;

    /// 엔진 이름
    fn name(&self) -> &'static str;
}

/// PDF 래스터화 트레이트
pub trait PageRasterizer: Send + Sync {
    /// 페이지 순서대로 페이지당 이미지 하나를 렌더링
    ///
    /// 문서 단위 실패는 `Err`, 페이지 단위 실패는 해당 항목의 `Err`.
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<PageImage>, RasterizeError>;

    /// 래스터라이저 이름
    fn name(&self) -> &'static str;
}

// ============================================================================
// Tool Detection
// ============================================================================

/// 외부 도구 실행 가능 여부
///
/// 일부 도구(pdftoppm -v)는 버전을 stderr로 출력하고 0이 아닌 코드로
/// 종료하므로 실행 자체만 확인합니다.
pub fn tool_available(program: &str, version_arg: &str) -> bool {
    Command::new(program)
        .arg(version_arg)
        .output()
        .is_ok()
}

// ============================================================================
// Tests
// ============================================================================
