//! 수집 파이프라인
//!
//! 파일 하나를 형식별로 추출하고, 스캔 PDF는 OCR 폴백을 거친 뒤
//! 단어 윈도우로 청킹하여 [`ChunkRecord`] 목록을 만듭니다.
//!
//! ```text
//! SourceFile → ContentExtractor ─┬→ Chunker → Vec<ChunkRecord>
//!                  (pdf, 부족) ──→ ScannedDocumentFallback ┘
//! ```

use std::sync::Arc;

use anyhow::Result;

use crate::collector::{FileType, SourceFile};
use crate::config::Settings;
use crate::extractor::{ContentExtractor, ExtractionError, ScannedDocumentFallback};
use crate::knowledge::{ChunkRecord, Chunker, WordWindowChunker};
use crate::ocr::{OcrEngine, PdftoppmRasterizer, TesseractOcr};

/// 수집 파이프라인
pub struct IngestionPipeline {
    extractor: ContentExtractor,
    fallback: ScannedDocumentFallback,
    chunker: Box<dyn Chunker>,
}

impl IngestionPipeline {
    pub fn new(
        extractor: ContentExtractor,
        fallback: ScannedDocumentFallback,
        chunker: Box<dyn Chunker>,
    ) -> Self {
        Self {
            extractor,
            fallback,
            chunker,
        }
    }

    /// 설정으로 파이프라인 구성 (tesseract + pdftoppm)
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let ocr: Arc<dyn OcrEngine> = Arc::new(TesseractOcr::new(
            settings.tesseract_bin.clone(),
            settings.ocr_language.clone(),
        ));
        let rasterizer = Arc::new(PdftoppmRasterizer::new(
            settings.pdftoppm_bin.clone(),
            settings.render_dpi,
        ));

        let extractor = ContentExtractor::new(Arc::clone(&ocr));
        let fallback = ScannedDocumentFallback::new(rasterizer, ocr, settings.scanned_threshold);
        let chunker = Box::new(WordWindowChunker::new(settings.chunk_config()?));

        Ok(Self::new(extractor, fallback, chunker))
    }

    /// 파일 하나 처리
    ///
    /// 알 수 없는 형식 태그나 내용 없는 파일은 빈 목록입니다.
    /// 추출 오류는 이 파일에만 해당하며 호출자가 보고합니다.
    pub fn process(
        &self,
        file: &SourceFile,
        declared_type: &str,
    ) -> Result<Vec<ChunkRecord>, ExtractionError> {
        let Some(file_type) = FileType::from_tag(declared_type) else {
            tracing::debug!("Skipping {}: unsupported type '{}'", file.name, declared_type);
            return Ok(Vec::new());
        };

        let text = self.extract_text(file, file_type)?;

        if text.trim().is_empty() {
            tracing::info!("No content extracted from {}", file.name);
            return Ok(Vec::new());
        }

        let records: Vec<ChunkRecord> = self
            .chunker
            .chunk(&text)
            .into_iter()
            .enumerate()
            .map(|(chunk_id, content)| ChunkRecord::new(content, &file.name, declared_type, chunk_id))
            .collect();

        tracing::info!(
            "Processed {} ({}): {} chars → {} chunks [{}]",
            file.name,
            file_type,
            text.len(),
            records.len(),
            self.chunker.name()
        );

        Ok(records)
    }

    /// 형식별 텍스트 추출 (PDF는 스캔 판정 포함)
    pub fn extract_text(&self, file: &SourceFile, file_type: FileType) -> Result<String, ExtractionError> {
        match file_type {
            FileType::Pdf => self.extract_pdf(&file.bytes),
            other => self.extractor.extract(&file.bytes, other),
        }
    }

    fn extract_pdf(&self, data: &[u8]) -> Result<String, ExtractionError> {
        // 텍스트 레이어를 읽을 수 없으면 스캔 문서와 같이 취급
        let native = match self.extractor.extract(data, FileType::Pdf) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Native PDF extraction failed, trying OCR: {}", e);
                String::new()
            }
        };

        if !self.fallback.is_scanned(&native) {
            return Ok(native);
        }

        tracing::info!(
            "PDF text layer below {} chars, treating as scanned",
            self.fallback.threshold()
        );
        self.fallback.recover(data)
    }
}

// ============================================================================
// Tests
// ============================================================================
