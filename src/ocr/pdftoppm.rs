//! pdftoppm 기반 PDF 래스터라이저
//!
//! 페이지 수는 lopdf로 확인하고, 페이지마다 pdftoppm을 따로 실행해
//! 한 페이지의 실패가 다른 페이지에 영향을 주지 않도록 합니다.
//! 설치: apt install poppler-utils

use std::path::Path;
use std::process::Command;

use super::{tool_available, PageImage, PageRasterizer, RasterizeError};

use crate::config::DEFAULT_RENDER_DPI;

/// pdftoppm 래스터라이저
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    program: String,
    dpi: u32,
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new("pdftoppm", DEFAULT_RENDER_DPI)
    }
}

impl PdftoppmRasterizer {
    pub fn new(program: impl Into<String>, dpi: u32) -> Self {
        Self {
            program: program.into(),
            dpi,
        }
    }

    /// 설치 여부 확인
    pub fn is_available(&self) -> bool {
        tool_available(&self.program, "-v")
    }

    /// 한 페이지를 PNG로 렌더링 (1부터 시작)
    fn render_page(&self, pdf_path: &Path, work_dir: &Path, page: usize) -> PageImage {
        let prefix = work_dir.join(format!("page-{}", page));
        let page_arg = page.to_string();

        let output = Command::new(&self.program)
            .arg("-png")
            .args(["-r", &self.dpi.to_string()])
            .args(["-f", &page_arg, "-l", &page_arg])
            .arg("-singlefile")
            .arg(pdf_path)
            .arg(&prefix)
            .output()
            .map_err(|source| RasterizeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RasterizeError::Page {
                program: self.program.clone(),
                page,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // -singlefile: <prefix>.png
        Ok(std::fs::read(prefix.with_extension("png"))?)
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<PageImage>, RasterizeError> {
        let pages = page_count(pdf)?;

        let work_dir = tempfile::Builder::new().prefix("docrag-raster").tempdir()?;
        let pdf_path = work_dir.path().join("input.pdf");
        std::fs::write(&pdf_path, pdf)?;

        let mut images = Vec::with_capacity(pages);
        for page in 1..=pages {
            match self.render_page(&pdf_path, work_dir.path(), page) {
                // 실행 파일이 없으면 문서 전체 실패
                Err(e @ RasterizeError::Spawn { .. }) => return Err(e),
                result => images.push(result),
            }
        }

        tracing::debug!("Rasterized {} pages at {} dpi", images.len(), self.dpi);
        Ok(images)
    }

    fn name(&self) -> &'static str {
        "pdftoppm"
    }
}

/// PDF 페이지 수 (lopdf)
pub fn page_count(pdf: &[u8]) -> Result<usize, RasterizeError> {
    let doc = lopdf::Document::load_mem(pdf).map_err(|e| RasterizeError::Open(e.to_string()))?;
    let count = doc.get_pages().len();

    if count == 0 {
        return Err(RasterizeError::Open("document has no pages".to_string()));
    }

    Ok(count)
}

// ============================================================================
// Tests
// ============================================================================
