//! 키워드 오버랩 랭킹
//!
//! 쿼리 단어가 청크 내용에 부분 문자열로 등장하는지 세어 점수를 매기고
//! 상위 K개를 고릅니다. 임베딩 기반 시맨틱 검색이 아닌 단순 어휘 매칭입니다.

use super::corpus::{ChunkRecord, Corpus};

/// 기본 결과 개수
pub const DEFAULT_TOP_K: usize = 3;

// ============================================================================
// Types
// ============================================================================

/// 점수가 매겨진 청크
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk<'a> {
    pub record: &'a ChunkRecord,
    /// 청크에 등장한 쿼리 단어 수
    pub score: usize,
}

// ============================================================================
// RelevanceRanker
// ============================================================================

/// 키워드 오버랩 랭커
#[derive(Debug, Clone, Copy)]
pub struct RelevanceRanker {
    top_k: usize,
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl RelevanceRanker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// 설정된 top-k로 검색
    pub fn search<'a>(&self, query: &str, corpus: &'a Corpus) -> Vec<ScoredChunk<'a>> {
        search(query, corpus, self.top_k)
    }

    /// 설정된 top-k로 랭킹 (레코드만)
    pub fn rank<'a>(&self, query: &str, corpus: &'a Corpus) -> Vec<&'a ChunkRecord> {
        rank(query, corpus, self.top_k)
    }
}

/// 쿼리 토큰화 (소문자 + 공백 분리)
pub fn query_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// 관련도 점수
///
/// 쿼리 단어마다 (반복 포함) 내용에 한 번이라도 등장하면 1점.
/// 내용에서의 등장 횟수는 세지 않습니다.
pub fn relevance_score(words: &[String], content: &str) -> usize {
    let content = content.to_lowercase();
    words
        .iter()
        .filter(|word| content.contains(word.as_str()))
        .count()
}

/// 점수 포함 검색
///
/// 점수 0인 청크는 제외, 점수 내림차순 정렬.
/// 동점이면 코퍼스 순서 유지 (stable sort).
pub fn search<'a>(query: &str, corpus: &'a Corpus, k: usize) -> Vec<ScoredChunk<'a>> {
    let words = query_words(query);
    if words.is_empty() || k == 0 {
        return vec![];
    }

    let mut scored: Vec<ScoredChunk<'a>> = corpus
        .iter()
        .filter_map(|record| {
            let score = relevance_score(&words, &record.content);
            (score > 0).then_some(ScoredChunk { record, score })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(k);

    tracing::debug!(
        "Ranked {} chunks for query {:?} (top {})",
        scored.len(),
        query,
        k
    );

    scored
}

/// 상위 k개 청크 레코드
pub fn rank<'a>(query: &str, corpus: &'a Corpus, k: usize) -> Vec<&'a ChunkRecord> {
    search(query, corpus, k)
        .into_iter()
        .map(|scored| scored.record)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
