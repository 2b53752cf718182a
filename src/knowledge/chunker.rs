//! Text Chunking Module
//!
//! 단어 단위 슬라이딩 윈도우 청킹을 제공합니다.
//! 공백으로 단어를 나누고, `size` 단어 윈도우를 `size - overlap` 간격으로 이동합니다.

// ============================================================================
// Chunk Configuration
// ============================================================================

/// 청크 설정 오류
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkConfigError {
    /// overlap이 size 이상이면 윈도우가 전진하지 않음
    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    OverlapTooLarge { size: usize, overlap: usize },
}

/// 청킹 설정 (단어 수 기준)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    size: usize,
    overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: 500,
            overlap: 50,
        }
    }
}

impl ChunkConfig {
    /// 설정 생성
    ///
    /// `size - overlap >= 1` 이어야 합니다.
    pub fn new(size: usize, overlap: usize) -> Result<Self, ChunkConfigError> {
        if overlap >= size {
            return Err(ChunkConfigError::OverlapTooLarge { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    /// 윈도우 크기 (단어 수)
    pub fn size(&self) -> usize {
        self.size
    }

    /// 중첩 단어 수
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// 윈도우 이동 간격
    pub fn step(&self) -> usize {
        self.size - self.overlap
    }
}

// ============================================================================
// Chunker Trait
// ============================================================================

/// 텍스트 청킹 전략 트레이트
pub trait Chunker: Send + Sync {
    /// 텍스트를 청크로 분할
    fn chunk(&self, text: &str) -> Vec<String>;

    /// 청커 이름
    fn name(&self) -> &'static str;
}

// ============================================================================
// WordWindowChunker
// ============================================================================

/// 단어 윈도우 청커
///
/// - 연속 공백은 하나로 취급, 구두점은 단어에 붙은 채로 유지
/// - 각 윈도우는 단일 공백으로 연결
/// - 마지막 윈도우는 `size`보다 짧을 수 있음
pub struct WordWindowChunker {
    config: ChunkConfig,
}

impl WordWindowChunker {
    /// 설정으로 생성
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// 기본 설정(500/50)으로 생성
    pub fn with_defaults() -> Self {
        Self::new(ChunkConfig::default())
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }
}

impl Chunker for WordWindowChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        window_words(&words, self.config.size, self.config.step())
    }

    fn name(&self) -> &'static str {
        "WordWindowChunker"
    }
}

/// 텍스트를 단어 윈도우 청크로 분할
///
/// # Arguments
/// * `text` - 분할할 텍스트
/// * `size` - 청크 당 단어 수
/// * `overlap` - 청크 간 중첩 단어 수
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<String>, ChunkConfigError> {
    let config = ChunkConfig::new(size, overlap)?;
    Ok(WordWindowChunker::new(config).chunk(text))
}

fn window_words(words: &[&str], size: usize, step: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;

    // start가 단어 수에 도달할 때까지 반복 (마지막 짧은 윈도우도 포함)
    while start < words.len() {
        let end = (start + size).min(words.len());
        chunks.push(words[start..end].join(" "));
        start += step;
    }

    chunks
}

// ============================================================================
// Factory Functions
// ============================================================================

/// 기본 청커 생성
pub fn default_chunker() -> Box<dyn Chunker> {
    Box::new(WordWindowChunker::with_defaults())
}

// ============================================================================
// Tests
// ============================================================================
