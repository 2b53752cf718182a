//! XLSX 텍스트 추출 (calamine)
//!
//! 시트마다 `Sheet: <이름>` 줄 다음에 표를 렌더링합니다.
//! 첫 행은 머리글, 이후 행은 0부터 시작하는 행 번호 열을 붙입니다.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use super::{Extract, ExtractionError};

/// 열 사이 간격
const COLUMN_GAP: &str = "  ";

/// XLSX 추출기
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExtractor;

impl Extract for XlsxExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let mut workbook: Xlsx<_> =
            Xlsx::new(Cursor::new(data)).map_err(|e| ExtractionError::Xlsx(e.to_string()))?;

        let mut blocks = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| ExtractionError::Xlsx(format!("sheet '{}': {}", sheet_name, e)))?;

            blocks.push(format!("Sheet: {}\n{}", sheet_name, render_table(&sheet_rows(&range))));
        }

        Ok(blocks.join("\n"))
    }

    fn name(&self) -> &'static str {
        "xlsx"
    }
}

/// 셀 범위를 문자열 행으로 변환
fn sheet_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // f64 Display는 정수 값을 소수점 없이 출력
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}

/// 행들을 우측 정렬 표로 렌더링
///
/// 첫 행이 머리글입니다. 빈 시트는 빈 문자열입니다.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let index_labels: Vec<String> = (0..body.len()).map(|i| i.to_string()).collect();
    let index_width = index_labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len());
    lines.push(render_row("", index_width, header, &widths));
    for (label, row) in index_labels.iter().zip(body) {
        lines.push(render_row(label, index_width, row, &widths));
    }

    lines.join("\n")
}

fn render_row(label: &str, index_width: usize, row: &[String], widths: &[usize]) -> String {
    let mut line = format!("{:>width$}", label, width = index_width);

    for (col, width) in widths.iter().enumerate() {
        let cell = row.get(col).map(String::as_str).unwrap_or("");
        line.push_str(COLUMN_GAP);
        line.push_str(&format!("{:>width$}", cell, width = *width));
    }

    line.trim_end().to_string()
}
