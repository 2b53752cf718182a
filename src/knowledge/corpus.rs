//! Corpus - 세션 동안 누적되는 청크 레코드 저장소
//!
//! 파일 처리 순서, 그리고 파일 내 청크 순서대로 레코드를 보관합니다.
//! 파이프라인 관점에서는 추가 전용이며, 호출자가 전체를 비울 수 있습니다.

use serde::{Deserialize, Serialize};

// ============================================================================
// Types
// ============================================================================

/// 청크 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// 원본 파일 이름
    pub file_name: String,
    /// 선언된 파일 타입 태그 (txt, pdf, docx, xlsx, image)
    pub file_type: String,
    /// 파일 내 청크 순번 (0부터)
    pub chunk_id: usize,
}

/// 청크 레코드 (검색 단위)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub content: String,
    pub metadata: ChunkMetadata,
}

impl ChunkRecord {
    pub fn new(content: String, file_name: &str, file_type: &str, chunk_id: usize) -> Self {
        Self {
            content,
            metadata: ChunkMetadata {
                file_name: file_name.to_string(),
                file_type: file_type.to_string(),
                chunk_id,
            },
        }
    }

    pub fn file_name(&self) -> &str {
        &self.metadata.file_name
    }
}

/// 파일별 청크 수 요약
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file_name: String,
    pub chunk_count: usize,
}

// ============================================================================
// Corpus
// ============================================================================

/// 누적 청크 코퍼스
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<ChunkRecord>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 한 파일의 레코드를 순서대로 추가
    pub fn extend(&mut self, records: Vec<ChunkRecord>) {
        self.records.extend(records);
    }

    /// 전체 삭제
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChunkRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    /// 이미 처리된 파일인지 확인
    pub fn contains_file(&self, file_name: &str) -> bool {
        self.records.iter().any(|r| r.file_name() == file_name)
    }

    /// 파일별 청크 수 (처음 등장한 순서)
    pub fn file_summary(&self) -> Vec<FileSummary> {
        let mut summary: Vec<FileSummary> = Vec::new();

        for record in &self.records {
            match summary.iter_mut().find(|s| s.file_name == record.file_name()) {
                Some(entry) => entry.chunk_count += 1,
                None => summary.push(FileSummary {
                    file_name: record.file_name().to_string(),
                    chunk_count: 1,
                }),
            }
        }

        summary
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a ChunkRecord;
    type IntoIter = std::slice::Iter<'a, ChunkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ChunkRecord> for Corpus {
    fn from_iter<I: IntoIterator<Item = ChunkRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
