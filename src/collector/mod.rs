//! 파일 수집 모듈
//!
//! 로컬 파일 및 폴더를 수집하여 파이프라인에 전달합니다.
//! .gitignore 패턴을 존중하고, 지원하는 확장자만 수집합니다.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

// ============================================================================
// File Types
// ============================================================================

/// 지원하는 파일 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// 텍스트 파일 (UTF-8)
    Text,
    /// PDF 파일 (네이티브 추출, 스캔본은 OCR)
    Pdf,
    /// Word 문서
    Docx,
    /// Excel 스프레드시트
    Xlsx,
    /// 이미지 파일 (OCR)
    Image,
}

impl FileType {
    /// 모든 타입 (선언 순서)
    pub const ALL: [FileType; 5] = [
        FileType::Text,
        FileType::Pdf,
        FileType::Docx,
        FileType::Xlsx,
        FileType::Image,
    ];

    /// 확장자로 파일 타입 결정
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "txt" => Some(FileType::Text),
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            "xlsx" => Some(FileType::Xlsx),
            "png" | "jpg" | "jpeg" => Some(FileType::Image),
            _ => None,
        }
    }

    /// 파일 경로(또는 이름)에서 타입 결정
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// 선언된 타입 태그 파싱 (txt, pdf, docx, xlsx, image)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// 타입 태그
    pub fn tag(&self) -> &'static str {
        match self {
            FileType::Text => "txt",
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Xlsx => "xlsx",
            FileType::Image => "image",
        }
    }

    /// 출력용 짧은 라벨
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Text => "TXT",
            FileType::Pdf => "PDF",
            FileType::Docx => "DOCX",
            FileType::Xlsx => "XLSX",
            FileType::Image => "IMG",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ============================================================================
// Source File
// ============================================================================

/// 수집 대상 원본 파일 (이름 + 바이트)
///
/// 수집(ingestion) 동안에만 존재합니다.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// 파일 이름 (경로 제외)
    pub name: String,
    /// 원본 바이트
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 디스크에서 읽기
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self { name, bytes })
    }
}

// ============================================================================
// Collected File
// ============================================================================

/// 수집된 파일 정보
#[derive(Debug, Clone)]
pub struct CollectedFile {
    /// 파일 절대 경로
    pub path: PathBuf,
    /// 파일 타입
    pub file_type: FileType,
    /// 파일 크기 (바이트)
    pub size: u64,
}

impl CollectedFile {
    /// 파일에서 CollectedFile 생성
    pub fn from_path(path: PathBuf) -> Result<Option<Self>> {
        // 파일 타입 확인
        let file_type = match FileType::from_path(&path) {
            Some(ft) => ft,
            None => return Ok(None), // 지원하지 않는 확장자
        };

        // 메타데이터 읽기
        let metadata = std::fs::metadata(&path)
            .with_context(|| format!("Failed to read metadata: {:?}", path))?;

        if !metadata.is_file() {
            return Ok(None);
        }

        Ok(Some(Self {
            path,
            file_type,
            size: metadata.len(),
        }))
    }

    /// 파일 이름
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
    }

    /// 내용 읽기
    pub fn load(&self) -> Result<SourceFile> {
        SourceFile::read(&self.path)
    }
}

// ============================================================================
// File Collector
// ============================================================================

/// 파일 수집기 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// .gitignore 패턴 존중 여부
    pub respect_gitignore: bool,
    /// 숨김 파일 포함 여부
    pub include_hidden: bool,
    /// 최대 파일 크기 (바이트, 0이면 제한 없음)
    pub max_file_size: u64,
    /// 이미지 파일 건너뛰기
    pub skip_images: bool,
    /// PDF 파일 건너뛰기
    pub skip_pdfs: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            respect_gitignore: true,
            include_hidden: false,
            max_file_size: 50 * 1024 * 1024, // 50MB
            skip_images: false,
            skip_pdfs: false,
        }
    }
}

/// 파일 수집기
pub struct FileCollector {
    config: CollectorConfig,
}

impl FileCollector {
    /// 새 수집기 생성
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// 기본 설정으로 수집기 생성
    pub fn with_defaults() -> Self {
        Self::new(CollectorConfig::default())
    }

    /// 단일 파일 수집
    ///
    /// 지원하지 않는 확장자이거나 필터에 걸리면 `None`.
    pub fn collect_file(&self, path: &Path) -> Result<Option<CollectedFile>> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        if !abs_path.exists() {
            anyhow::bail!("File not found: {:?}", abs_path);
        }

        if !abs_path.is_file() {
            anyhow::bail!("Not a file: {:?}", abs_path);
        }

        let file = CollectedFile::from_path(abs_path)?;

        // 필터 적용
        Ok(file.filter(|f| self.should_include(f)))
    }

    /// 폴더 재귀 수집 (경로순 정렬)
    pub fn collect_directory(&self, path: &Path) -> Result<Vec<CollectedFile>> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        if !abs_path.exists() {
            anyhow::bail!("Directory not found: {:?}", abs_path);
        }

        if !abs_path.is_dir() {
            anyhow::bail!("Not a directory: {:?}", abs_path);
        }

        let mut files = Vec::new();

        // ignore 크레이트로 .gitignore 지원
        let walker = WalkBuilder::new(&abs_path)
            .hidden(!self.config.include_hidden)
            .git_ignore(self.config.respect_gitignore)
            .git_global(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read entry: {}", e);
                    continue;
                }
            };

            // 파일만 처리
            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }

            match CollectedFile::from_path(entry.path().to_path_buf()) {
                Ok(Some(file)) => {
                    if self.should_include(&file) {
                        files.push(file);
                    }
                }
                Ok(None) => {} // 지원하지 않는 확장자
                Err(e) => {
                    tracing::warn!("Failed to collect file: {}", e);
                }
            }
        }

        // 파일 처리 순서 = 코퍼스 순서이므로 결정적으로 정렬
        files.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::info!("Collected {} files from {:?}", files.len(), abs_path);
        Ok(files)
    }

    /// 파일이 필터 조건을 만족하는지 확인
    fn should_include(&self, file: &CollectedFile) -> bool {
        // 파일 크기 제한
        if self.config.max_file_size > 0 && file.size > self.config.max_file_size {
            tracing::debug!("Skipping large file: {:?} ({} bytes)", file.path, file.size);
            return false;
        }

        // 이미지 건너뛰기
        if self.config.skip_images && file.file_type == FileType::Image {
            return false;
        }

        // PDF 건너뛰기
        if self.config.skip_pdfs && file.file_type == FileType::Pdf {
            return false;
        }

        true
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// 수집 통계
#[derive(Debug, Default)]
pub struct CollectionStats {
    pub total_files: usize,
    pub text_files: usize,
    pub pdf_files: usize,
    pub docx_files: usize,
    pub xlsx_files: usize,
    pub image_files: usize,
    pub total_size: u64,
}

impl CollectionStats {
    /// 수집된 파일 목록에서 통계 계산
    pub fn from_files(files: &[CollectedFile]) -> Self {
        let mut stats = Self::default();

        for file in files {
            stats.total_files += 1;
            stats.total_size += file.size;

            match file.file_type {
                FileType::Text => stats.text_files += 1,
                FileType::Pdf => stats.pdf_files += 1,
                FileType::Docx => stats.docx_files += 1,
                FileType::Xlsx => stats.xlsx_files += 1,
                FileType::Image => stats.image_files += 1,
            }
        }

        stats
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("txt"), Some(FileType::Text));
        assert_eq!(FileType::from_extension("PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("docx"), Some(FileType::Docx));
        assert_eq!(FileType::from_extension("xlsx"), Some(FileType::Xlsx));
        assert_eq!(FileType::from_extension("png"), Some(FileType::Image));
        assert_eq!(FileType::from_extension("JPEG"), Some(FileType::Image));
        assert_eq!(FileType::from_extension("wav"), None);
        assert_eq!(FileType::from_extension("doc"), None);
    }

    #[test]
    fn test_file_type_tags_round_trip() {
        for file_type in FileType::ALL {
            assert_eq!(FileType::from_tag(file_type.tag()), Some(file_type));
        }
        assert_eq!(FileType::from_tag("audio"), None);
        assert_eq!(FileType::from_tag("TXT"), None);
        assert_eq!(FileType::Image.to_string(), "image");
    }

    #[test]
    fn test_collect_directory_filters_and_sorts() {
        let dir = tempfile::Builder::new().prefix("docrag").tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "beta").unwrap();
        std::fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        std::fs::write(dir.path().join("scan.png"), [0u8; 4]).unwrap();
        std::fs::write(dir.path().join("song.wav"), [0u8; 4]).unwrap();

        let files = FileCollector::with_defaults()
            .collect_directory(dir.path())
            .unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "scan.png"]);

        let stats = CollectionStats::from_files(&files);
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.text_files, 2);
        assert_eq!(stats.image_files, 1);

        let no_images = FileCollector::new(CollectorConfig {
            skip_images: true,
            ..Default::default()
        })
        .collect_directory(dir.path())
        .unwrap();
        assert_eq!(no_images.len(), 2);
    }

    #[test]
    fn test_collect_file_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let collector = FileCollector::with_defaults();
        let file = collector.collect_file(&path).unwrap().unwrap();
        assert_eq!(file.file_type, FileType::Text);

        let source = file.load().unwrap();
        assert_eq!(source.name, "notes.txt");
        assert_eq!(source.bytes, b"hello");

        assert!(collector
            .collect_file(&dir.path().join("missing.txt"))
            .is_err());
    }
}
