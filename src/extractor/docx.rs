//! DOCX 텍스트 추출 (docx-rs)
//!
//! 본문 최상위 문단만 읽습니다. 표, 머리글/바닥글, 각주는 제외합니다.

use docx_rs::{DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};

use super::{Extract, ExtractionError};

/// DOCX 추출기
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl Extract for DocxExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let docx = docx_rs::read_docx(data).map_err(|e| ExtractionError::Docx(e.to_string()))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}

/// 문단 내 런 텍스트 연결 (하이퍼링크, 변경 추적 삽입 포함)
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&paragraph.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            _ => {}
        }
    }
}
