//! CLI 모듈
//!
//! docrag CLI 명령어 정의 및 구현

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::collector::{CollectedFile, CollectionStats, CollectorConfig, FileCollector};
use crate::config::Settings;
use crate::generation::{has_api_key, GeminiChat};
use crate::knowledge::RelevanceRanker;
use crate::ocr::{PdftoppmRasterizer, TesseractOcr};
use crate::pipeline::IngestionPipeline;
use crate::session::{IngestOutcome, Session};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "docrag")]
#[command(version, about = "문서 기반 질의응답 (txt, pdf, docx, xlsx, 이미지)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 수집 대상 파일 인자
#[derive(Args, Debug, Clone, Default)]
pub struct FileArgs {
    /// 수집할 파일 경로 (여러 번 지정 가능)
    #[arg(short, long = "file")]
    pub files: Vec<PathBuf>,

    /// 수집할 폴더 경로 (재귀)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// 이미지 파일 건너뛰기
    #[arg(long)]
    pub skip_images: bool,

    /// PDF 파일 건너뛰기
    #[arg(long)]
    pub skip_pdfs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 파일 또는 폴더를 처리하여 청크 생성
    Ingest {
        #[command(flatten)]
        files: FileArgs,

        /// 청크 레코드를 JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 문서 검색 (키워드 오버랩)
    Query {
        /// 검색 쿼리
        query: String,

        #[command(flatten)]
        files: FileArgs,

        /// 결과 개수
        #[arg(short)]
        k: Option<usize>,
    },

    /// 문서 기반 대화
    Chat {
        #[command(flatten)]
        files: FileArgs,

        /// 생성 모델 ID
        #[arg(short, long)]
        model: Option<String>,

        /// 컨텍스트 청크 개수
        #[arg(short)]
        k: Option<usize>,
    },

    /// 상태 확인
    Status,
}

// ============================================================================
// CLI Runner
// ============================================================================

/// CLI 명령어 실행
pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env().context("설정 로드 실패")?;

    match cli.command {
        Commands::Ingest { files, json } => cmd_ingest(settings, files, json),
        Commands::Query { query, files, k } => cmd_query(settings, &query, files, k),
        Commands::Chat { files, model, k } => cmd_chat(settings, files, model, k).await,
        Commands::Status => cmd_status(&settings),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// 수집 명령어 (ingest)
fn cmd_ingest(settings: Settings, files: FileArgs, json: bool) -> Result<()> {
    let session = ingest_files(&settings, &files)?;

    if json {
        let output = serde_json::to_string_pretty(session.corpus().records())
            .context("청크 직렬화 실패")?;
        println!("{}", output);
    }

    Ok(())
}

/// 검색 명령어 (query)
fn cmd_query(mut settings: Settings, query: &str, files: FileArgs, k: Option<usize>) -> Result<()> {
    if let Some(k) = k {
        settings.top_k = k;
    }

    let session = ingest_files(&settings, &files)?;
    if session.corpus().is_empty() {
        bail!("처리된 문서가 없습니다. --file 또는 --dir로 문서를 지정하세요.");
    }

    println!("[*] 검색 중: \"{}\"", query);

    let ranker = RelevanceRanker::new(settings.top_k);
    let results = ranker.search(query, session.corpus());

    if results.is_empty() {
        println!("\n[!] 검색 결과가 없습니다.");
        return Ok(());
    }

    println!("\n[OK] 검색 결과 ({} 건):\n", results.len());

    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. [점수: {}] {} (청크 #{})",
            i + 1,
            result.score,
            result.record.file_name(),
            result.record.metadata.chunk_id
        );
        println!("   내용: {}", truncate_text(&result.record.content, 200));
        println!();
    }

    Ok(())
}

/// 대화 명령어 (chat)
async fn cmd_chat(
    mut settings: Settings,
    files: FileArgs,
    model: Option<String>,
    k: Option<usize>,
) -> Result<()> {
    if let Some(model) = model {
        settings.model = model;
    }
    if let Some(k) = k {
        settings.top_k = k;
    }

    if !has_api_key() {
        bail!(
            "API 키가 설정되지 않았습니다.\n\n\
             설정 방법:\n  \
             export GEMINI_API_KEY=your-api-key\n  \
             또는\n  \
             export GOOGLE_AI_API_KEY=your-api-key\n\n\
             API 키 발급: https://aistudio.google.com/app/apikey"
        );
    }

    let chat_model = GeminiChat::from_settings(&settings)?;
    let ranker = RelevanceRanker::new(settings.top_k);
    let mut session = ingest_files(&settings, &files)?;

    println!();
    println!("[*] 대화 시작 (모델: {})", settings.model);
    println!("    /files 파일 목록, /clear 대화 초기화, /reset 파일 초기화, /quit 종료");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();

        match question {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear_history();
                println!("[OK] 대화 기록을 초기화했습니다.");
            }
            "/reset" => {
                session.clear_files();
                println!("[OK] 처리된 파일을 초기화했습니다.");
            }
            "/files" => print_file_summary(&session),
            _ => match session.ask(&chat_model, &ranker, question).await {
                Ok(answer) => {
                    println!("\n{}", answer.content);
                    println!(
                        "\n    ({:.2}초, {} 토큰, {:.2} 토큰/초, 컨텍스트 청크 {})",
                        answer.stats.elapsed.as_secs_f64(),
                        answer.stats.tokens,
                        answer.stats.tokens_per_second,
                        answer.chunks_used
                    );
                }
                Err(e) => println!("[!] {:#}", e),
            },
        }
    }

    Ok(())
}

/// 상태 확인 명령어 (status)
fn cmd_status(settings: &Settings) -> Result<()> {
    println!("docrag v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("[*] 설정");
    println!(
        "    청크: {} 단어 (중첩 {})",
        settings.chunk_size, settings.chunk_overlap
    );
    println!("    스캔 PDF 기준: {} 자 미만", settings.scanned_threshold);
    println!("    검색 결과 수: {}", settings.top_k);
    println!("    모델: {} (temperature {})", settings.model, settings.temperature);
    println!();

    let tesseract = TesseractOcr::new(settings.tesseract_bin.clone(), settings.ocr_language.clone());
    if tesseract.is_available() {
        println!("[OK] tesseract: {} (언어: {})", settings.tesseract_bin, settings.ocr_language);
    } else {
        println!("[!] tesseract: 없음 (이미지/스캔 PDF OCR 불가)");
        println!("    설치: apt install tesseract-ocr");
    }

    let rasterizer = PdftoppmRasterizer::new(settings.pdftoppm_bin.clone(), settings.render_dpi);
    if rasterizer.is_available() {
        println!("[OK] pdftoppm: {} ({} dpi)", settings.pdftoppm_bin, settings.render_dpi);
    } else {
        println!("[!] pdftoppm: 없음 (스캔 PDF OCR 불가)");
        println!("    설치: apt install poppler-utils");
    }

    if has_api_key() {
        println!("[OK] API 키: 설정됨");
    } else {
        println!("[!] API 키: 미설정");
        println!("    설정: export GEMINI_API_KEY=your-key");
    }

    Ok(())
}

// ============================================================================
// Ingestion
// ============================================================================

/// 파일 수집 후 세션에 적재
///
/// 파일별 실패는 보고만 하고 다음 파일로 진행합니다.
fn ingest_files(settings: &Settings, args: &FileArgs) -> Result<Session> {
    let files = collect_files(args)?;
    let pipeline = IngestionPipeline::from_settings(settings)?;
    let mut session = Session::new();

    if files.is_empty() {
        println!("[!] 수집할 파일이 없습니다.");
        return Ok(session);
    }

    let stats = CollectionStats::from_files(&files);
    println!("[*] 수집 대상: {} 파일", stats.total_files);
    println!(
        "    텍스트: {}, PDF: {}, DOCX: {}, XLSX: {}, 이미지: {}",
        stats.text_files, stats.pdf_files, stats.docx_files, stats.xlsx_files, stats.image_files
    );
    println!("    총 크기: {}", format_bytes(stats.total_size as usize));
    println!();

    let mut success_count = 0;
    let mut error_count = 0;

    for (i, collected) in files.iter().enumerate() {
        print!(
            "[{}/{}] [{}] {}... ",
            i + 1,
            files.len(),
            collected.file_type.label(),
            collected.file_name()
        );
        std::io::stdout().flush()?;

        let source = match collected.load() {
            Ok(source) => source,
            Err(e) => {
                println!("실패: {:#}", e);
                error_count += 1;
                continue;
            }
        };

        match session.ingest(&pipeline, &source, collected.file_type.tag()) {
            Ok(IngestOutcome::Added(n)) => {
                println!("완료 ({} 청크)", n);
                success_count += 1;
            }
            Ok(IngestOutcome::Empty) => println!("내용 없음"),
            Ok(IngestOutcome::AlreadyProcessed) => println!("이미 처리됨"),
            Err(e) => {
                tracing::warn!("Failed to process {}: {}", source.name, e);
                println!("실패: {}", e);
                error_count += 1;
            }
        }
    }

    println!();
    println!("[OK] 완료: 성공 {}, 실패 {}", success_count, error_count);
    print_file_summary(&session);

    Ok(session)
}

/// --file / --dir 인자로 파일 수집
fn collect_files(args: &FileArgs) -> Result<Vec<CollectedFile>> {
    if args.files.is_empty() && args.dir.is_none() {
        bail!("--file 또는 --dir를 지정해야 합니다");
    }

    let collector = FileCollector::new(CollectorConfig {
        skip_images: args.skip_images,
        skip_pdfs: args.skip_pdfs,
        ..Default::default()
    });

    let mut files = Vec::new();
    for path in &args.files {
        match collector.collect_file(path)? {
            Some(file) => files.push(file),
            None => println!("[!] 지원하지 않는 파일 형식: {:?}", path),
        }
    }

    if let Some(ref dir) = args.dir {
        files.extend(collector.collect_directory(dir)?);
    }

    Ok(files)
}

fn print_file_summary(session: &Session) {
    let summary = session.file_summary();
    if summary.is_empty() {
        println!("[!] 처리된 파일이 없습니다.");
        return;
    }

    println!("[*] 처리된 파일 ({} 개):", summary.len());
    for entry in summary {
        println!("    {} ({} 청크)", entry.file_name, entry.chunk_count);
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// 텍스트 자르기 (UTF-8 안전)
fn truncate_text(text: &str, max_chars: usize) -> String {
    let cleaned = text.replace('\n', " ").replace('\r', "");
    let cleaned = cleaned.trim();

    if cleaned.chars().count() <= max_chars {
        cleaned.to_string()
    } else {
        let truncated: String = cleaned.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

/// 바이트 크기 포맷팅
fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        assert_eq!(truncate_text("hello\nworld", 20), "hello world");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
    }

    #[test]
    fn test_truncate_unicode() {
        let korean = "안녕하세요 세계";
        let truncated = truncate_text(korean, 5);
        assert_eq!(truncated, "안녕하세요...");
    }

    #[test]
    fn test_parse_ingest_multiple_files() {
        let cli = Cli::parse_from([
            "docrag", "ingest", "--file", "a.txt", "-f", "b.pdf", "--skip-images", "--json",
        ]);
        match cli.command {
            Commands::Ingest { files, json } => {
                assert_eq!(files.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.pdf")]);
                assert!(files.skip_images);
                assert!(!files.skip_pdfs);
                assert!(json);
            }
            _ => panic!("expected ingest"),
        }
    }

    #[test]
    fn test_parse_query_and_chat() {
        let cli = Cli::parse_from(["docrag", "query", "due date", "--dir", "docs", "-k", "5"]);
        match cli.command {
            Commands::Query { query, files, k } => {
                assert_eq!(query, "due date");
                assert_eq!(files.dir, Some(PathBuf::from("docs")));
                assert_eq!(k, Some(5));
            }
            _ => panic!("expected query"),
        }

        let cli = Cli::parse_from(["docrag", "chat", "-f", "a.txt", "--model", "gemini-1.5-pro"]);
        match cli.command {
            Commands::Chat { files, model, k } => {
                assert_eq!(files.files.len(), 1);
                assert_eq!(model.as_deref(), Some("gemini-1.5-pro"));
                assert_eq!(k, None);
            }
            _ => panic!("expected chat"),
        }
    }

    #[test]
    fn test_collect_files_requires_input() {
        let err = collect_files(&FileArgs::default()).unwrap_err();
        assert!(err.to_string().contains("--file"));
    }
}
