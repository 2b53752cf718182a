//! 텍스트 파일 추출

use super::{Extract, ExtractionError};

/// 일반 텍스트 추출기
///
/// 잘못된 UTF-8 바이트는 대체 문자로 바꾸지 않고 오류로 처리합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl Extract for PlainTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        Ok(String::from_utf8(data.to_vec())?)
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_verbatim() {
        let text = PlainTextExtractor.extract("줄 하나\n  second line \n".as_bytes()).unwrap();
        assert_eq!(text, "줄 하나\n  second line \n");
    }

    #[test]
    fn test_text_empty() {
        assert_eq!(PlainTextExtractor.extract(b"").unwrap(), "");
    }

    #[test]
    fn test_text_invalid_utf8() {
        let err = PlainTextExtractor.extract(&[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ExtractionError::Decoding(_)));
    }
}
