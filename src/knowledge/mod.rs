//! Knowledge 모듈 - 청킹, 코퍼스, 키워드 랭킹
//!
//! - Chunker: 단어 윈도우 텍스트 분할
//! - Corpus: 세션 동안 누적되는 청크 레코드
//! - Ranker: 키워드 오버랩 점수로 상위 K개 선택

mod chunker;
mod corpus;
mod ranker;

// Re-exports
pub use chunker::{
    chunk_text, default_chunker, ChunkConfig, ChunkConfigError, Chunker, WordWindowChunker,
};
pub use corpus::{ChunkMetadata, ChunkRecord, Corpus, FileSummary};
pub use ranker::{
    query_words, rank, relevance_score, search, RelevanceRanker, ScoredChunk, DEFAULT_TOP_K,
};
