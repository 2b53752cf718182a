//! 대화 세션
//!
//! 세션 동안 누적되는 코퍼스와 대화 기록을 보관합니다.
//! 같은 이름의 파일은 한 번만 수집합니다.

use std::time::Instant;

use anyhow::Result;

use crate::collector::SourceFile;
use crate::extractor::ExtractionError;
use crate::generation::{build_messages, ChatMessage, ChatModel, GenerationStats};
use crate::knowledge::{ChunkRecord, Corpus, FileSummary, RelevanceRanker};
use crate::pipeline::IngestionPipeline;

/// 파일 수집 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// 청크 N개 추가
    Added(usize),
    /// 추출된 내용 없음
    Empty,
    /// 이미 처리된 파일 이름
    AlreadyProcessed,
}

/// 질문 응답 결과
#[derive(Debug, Clone)]
pub struct Answer {
    pub content: String,
    /// 컨텍스트로 사용된 청크 수
    pub chunks_used: usize,
    pub stats: GenerationStats,
}

/// 대화 세션
#[derive(Debug, Default)]
pub struct Session {
    corpus: Corpus,
    history: Vec<ChatMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// 파일 수집
    ///
    /// 이미 처리한 이름이면 추출하지 않습니다.
    pub fn ingest(
        &mut self,
        pipeline: &IngestionPipeline,
        file: &SourceFile,
        declared_type: &str,
    ) -> Result<IngestOutcome, ExtractionError> {
        if self.corpus.contains_file(&file.name) {
            tracing::debug!("{} already processed, skipping", file.name);
            return Ok(IngestOutcome::AlreadyProcessed);
        }

        let records = pipeline.process(file, declared_type)?;
        if records.is_empty() {
            return Ok(IngestOutcome::Empty);
        }

        let added = records.len();
        self.corpus.extend(records);
        Ok(IngestOutcome::Added(added))
    }

    /// 질문과 관련된 청크 검색
    pub fn retrieve(&self, ranker: &RelevanceRanker, query: &str) -> Vec<&ChunkRecord> {
        ranker.rank(query, &self.corpus)
    }

    /// 질문에 답변
    ///
    /// 질문은 모델 호출 전에 기록되고, 답변은 성공 시에만 기록됩니다.
    pub async fn ask(
        &mut self,
        model: &dyn ChatModel,
        ranker: &RelevanceRanker,
        question: &str,
    ) -> Result<Answer> {
        if self.corpus.is_empty() {
            anyhow::bail!("No documents processed yet. Ingest some files first.");
        }

        self.history.push(ChatMessage::user(question));

        let (messages, chunks_used) = {
            let chunks = ranker.rank(question, &self.corpus);
            (build_messages(&chunks, question), chunks.len())
        };

        tracing::debug!(
            "Asking {} with {} context chunks",
            model.name(),
            chunks_used
        );

        let started = Instant::now();
        let content = model.complete(&messages).await?;
        let stats = GenerationStats::measure(&content, started.elapsed());

        self.history.push(ChatMessage::assistant(content.clone()));

        Ok(Answer {
            content,
            chunks_used,
            stats,
        })
    }

    /// 파일별 청크 수
    pub fn file_summary(&self) -> Vec<FileSummary> {
        self.corpus.file_summary()
    }

    /// 대화 기록 초기화
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// 수집된 파일 초기화
    pub fn clear_files(&mut self) {
        self.corpus.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
