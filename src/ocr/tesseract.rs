//! tesseract CLI OCR 엔진
//!
//! 이미지를 stdin으로 전달하고 stdout으로 텍스트를 받습니다.
//! 설치: apt install tesseract-ocr

use std::io::Write;
use std::process::{Command, Stdio};

use super::{tool_available, OcrEngine, OcrError};

/// tesseract OCR 엔진
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    program: String,
    language: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

impl TesseractOcr {
    /// 실행 파일과 언어(`-l`)를 지정하여 생성
    pub fn new(program: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            language: language.into(),
        }
    }

    /// 설치 여부 확인
    pub fn is_available(&self) -> bool {
        tool_available(&self.program, "--version")
    }

    fn args(&self) -> [&str; 4] {
        ["stdin", "stdout", "-l", &self.language]
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let mut child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| OcrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stdin은 쓰기 후 drop되어야 tesseract가 입력 끝을 인식
        // 쓰기 실패(조기 종료로 인한 broken pipe)는 종료 상태 확인 뒤에 보고
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(image),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(OcrError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        written?;

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!("tesseract recognized {} chars", text.len());
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tesseract_args() {
        let ocr = TesseractOcr::new("tesseract", "kor+eng");
        assert_eq!(ocr.args(), ["stdin", "stdout", "-l", "kor+eng"]);
    }

    #[test]
    fn test_tesseract_missing_binary_is_spawn_error() {
        let ocr = TesseractOcr::new("docrag-no-such-tesseract", "eng");
        let err = ocr.recognize(b"\x89PNG\r\n\x1a\n").unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }));
        assert!(!ocr.is_available());
    }

    /// 지정한 셸 스크립트를 tesseract 대신 실행
    #[cfg(unix)]
    fn scripted_ocr(dir: &tempfile::TempDir, script: &str) -> TesseractOcr {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-tesseract");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        TesseractOcr::new(path.to_string_lossy().into_owned(), "eng")
    }

    /// 방금 쓴 스크립트 실행 시 ETXTBSY가 날 수 있어 재시도
    #[cfg(unix)]
    fn recognize_with_retry(ocr: &TesseractOcr, image: &[u8]) -> Result<String, OcrError> {
        for _ in 0..10 {
            match ocr.recognize(image) {
                Err(OcrError::Spawn { source, .. }) if source.raw_os_error() == Some(26) => {
                    std::thread::sleep(std::time::Duration::from_millis(50));
                }
                result => return result,
            }
        }
        ocr.recognize(image)
    }

    #[cfg(unix)]
    #[test]
    fn test_tesseract_early_exit_keeps_stderr() {
        let dir = tempfile::Builder::new().prefix("docrag").tempdir().unwrap();
        let ocr = scripted_ocr(
            &dir,
            "echo 'Error in pixReadMem: unknown format' >&2\nexit 1",
        );

        // 파이프 버퍼보다 큰 입력으로 쓰기 실패를 유도
        let image = vec![0u8; 4 * 1024 * 1024];
        let err = recognize_with_retry(&ocr, &image).unwrap_err();

        match err {
            OcrError::Failed { stderr, .. } => {
                assert_eq!(stderr, "Error in pixReadMem: unknown format")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_tesseract_stdout_is_text() {
        let dir = tempfile::Builder::new().prefix("docrag").tempdir().unwrap();
        let ocr = scripted_ocr(&dir, "cat > /dev/null\necho 'INVOICE 42'");

        let text = recognize_with_retry(&ocr, b"fake image bytes").unwrap();
        assert_eq!(text, "INVOICE 42\n");
    }
}
