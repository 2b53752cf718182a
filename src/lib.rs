//! docrag - 문서 기반 질의응답
//!
//! txt, pdf, docx, xlsx, 이미지에서 텍스트를 추출하고(스캔 PDF는 OCR),
//! 단어 윈도우로 청킹한 뒤 키워드 오버랩으로 질문과 관련된 청크를 골라
//! 생성 모델의 컨텍스트로 사용합니다.

pub mod cli;
pub mod collector;
pub mod config;
pub mod extractor;
pub mod generation;
pub mod knowledge;
pub mod ocr;
pub mod pipeline;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use collector::{FileType, SourceFile};
pub use config::Settings;
pub use extractor::{ContentExtractor, Extract, ExtractionError, ScannedDocumentFallback};
pub use generation::{ChatMessage, ChatModel, GeminiChat, Role, get_api_key, has_api_key};
pub use knowledge::{
    ChunkConfig, ChunkRecord, Chunker, Corpus, RelevanceRanker, WordWindowChunker, chunk_text,
    rank,
};
pub use ocr::{OcrEngine, PageRasterizer, PdftoppmRasterizer, TesseractOcr};
pub use pipeline::IngestionPipeline;
pub use session::{IngestOutcome, Session};
