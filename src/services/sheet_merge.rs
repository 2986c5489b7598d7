use log::warn;
use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::model::sheet::{Cell, Sheet};
use crate::model::snapshot::{ExportPolicy, FormSnapshot};

/// 헤더로 읽는 행 번호. 표의 두 번째 행이 실제 열 이름이다.
pub const HEADER_ROW: usize = 1;

/// 이름 없는 열에 외부 도구가 붙이는 접두사. 이걸로 시작하면 이름 없는 열로 본다.
pub const UNNAMED_PREFIX: &str = "Unnamed";

/// 참조사전이 들어가는 열의 이름.
pub const DICTIONARY_COLUMN: &str = "사전";

/// 새로 붙이는 행의 최소 너비. 기존 양식의 고정 칸 수에 맞춘다.
pub const EXPORT_ROW_MIN_WIDTH: usize = 39;

/// 행 추가 한 번의 결과. 못 실은 값을 호출 쪽까지 전한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeReport {
    pub row_index: usize,
    pub width: usize,
    pub dropped_fields: Vec<&'static str>,
    pub skipped_dictionaries: Vec<String>,
}

/// 입력 폼 한 벌을 표 끝에 새 행으로 붙인다.
///
/// 헤더 행에서 이름 있는 열의 위치를 왼쪽부터 차례로 세고, n번째 필드를
/// n번째 이름 있는 열에 놓는다. 열 이름은 보지 않으므로 배치가 기대와
/// 어긋나면 그건 양식 파일 쪽 문제다. 기존 행은 한 칸도 건드리지 않고,
/// 같은 표에 다시 내보내면 행이 하나 더 붙는다.
pub fn append_entry_row(
    sheet: &mut Sheet,
    snapshot: &FormSnapshot,
    policy: ExportPolicy,
) -> Result<MergeReport> {
    if sheet.rows.len() <= HEADER_ROW {
        return Err(CoreError::schema(
            "헤더 행(두 번째 행)이 없어 열 배치를 정할 수 없습니다",
        ));
    }

    let header = &sheet.rows[HEADER_ROW];
    let named: Vec<usize> = header
        .iter()
        .enumerate()
        .filter(|(_, cell)| is_named(cell))
        .map(|(idx, _)| idx)
        .collect();

    let width = sheet.max_width().max(EXPORT_ROW_MIN_WIDTH);
    let mut row = vec![Cell::Empty; width];

    let mut dropped: Vec<&'static str> = Vec::new();
    for (i, (field, value)) in field_values(snapshot).into_iter().enumerate() {
        match named.get(i) {
            Some(&col) => row[col] = Cell::Text(policy.value_or(value).to_string()),
            None => dropped.push(field),
        }
    }
    if !dropped.is_empty() {
        warn!("이름 있는 열이 모자라 싣지 못한 필드: {dropped:?}");
    }

    // 참조사전: 이름이 정확히 "사전"인 열을 왼쪽부터 차례로 채운다
    let dictionary_cols: Vec<usize> = named
        .iter()
        .copied()
        .filter(|&idx| matches!(&header[idx], Cell::Text(s) if s == DICTIONARY_COLUMN))
        .collect();

    let mut skipped: Vec<String> = Vec::new();
    for (k, dictionary) in snapshot.dictionaries.iter().enumerate() {
        match dictionary_cols.get(k) {
            Some(&col) => match &mut row[col] {
                // 위치 계약이 꼬여 이미 값이 실린 칸이면 덮지 않고 이어 적는다
                Cell::Text(existing) if !existing.is_empty() => {
                    existing.push_str(", ");
                    existing.push_str(dictionary);
                }
                cell => *cell = Cell::text(dictionary.clone()),
            },
            None => skipped.push(dictionary.clone()),
        }
    }
    if !skipped.is_empty() {
        warn!("사전 열이 모자라 싣지 못한 참조사전: {skipped:?}");
    }

    sheet.rows.push(row);

    Ok(MergeReport {
        row_index: sheet.rows.len() - 1,
        width,
        dropped_fields: dropped,
        skipped_dictionaries: skipped,
    })
}

/// 이름 있는 열: 다듬어도 비지 않는 문자열이고 Unnamed 접두사가 아니어야 한다.
fn is_named(cell: &Cell) -> bool {
    matches!(cell, Cell::Text(s) if !s.trim().is_empty() && !s.starts_with(UNNAMED_PREFIX))
}

/// 폼의 고정 17개 필드를 내보내는 순서대로 늘어놓는다.
fn field_values(s: &FormSnapshot) -> [(&'static str, &str); 17] {
    [
        ("entry_id", s.entry_id.as_str()),
        ("document_name", &s.document_name),
        ("entry_name", &s.entry_name),
        ("pronunciation", &s.pronunciation),
        ("attribute", &s.attribute),
        ("definition", &s.definition),
        ("definition_detail", &s.definition_detail),
        ("citation1.identifier", &s.citation1.identifier),
        ("citation1.reference_id", &s.citation1.reference_id),
        ("citation1.reference_label", &s.citation1.reference_label),
        ("citation1.source_text", &s.citation1.source_text),
        ("citation1.translated_text", &s.citation1.translated_text),
        ("citation2.identifier", &s.citation2.identifier),
        ("citation2.reference_id", &s.citation2.reference_id),
        ("citation2.reference_label", &s.citation2.reference_label),
        ("citation2.source_text", &s.citation2.source_text),
        ("citation2.translated_text", &s.citation2.translated_text),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::snapshot::{CitationSlot, Fallback};

    fn snapshot() -> FormSnapshot {
        FormSnapshot {
            entry_id: "I_jti_1h02_1".to_string(),
            document_name: "論語注疏".to_string(),
            entry_name: "吾".to_string(),
            pronunciation: "오".to_string(),
            attribute: "용어".to_string(),
            definition: "나".to_string(),
            definition_detail: "일인칭".to_string(),
            citation1: CitationSlot {
                identifier: "E001".to_string(),
                reference_id: "R1".to_string(),
                reference_label: "論語 學而".to_string(),
                source_text: "吾日三省吾身".to_string(),
                translated_text: "나는 날마다 살핀다".to_string(),
            },
            citation2: CitationSlot::default(),
            dictionaries: vec!["漢韓大辭典".to_string(), "其他辭典".to_string()],
        }
    }

    /// 제목 행 + 열 이름 헤더 행을 갖춘 양식 표.
    fn template(header: Vec<Cell>) -> Sheet {
        Sheet {
            rows: vec![vec![Cell::text("어휘 정리 양식")], header],
        }
    }

    fn wide_header() -> Vec<Cell> {
        // 17개 필드 열 + 사전 열 둘, 사이에 이름 없는 열이 끼어 있다
        let mut header = vec![Cell::Empty];
        for i in 0..17 {
            header.push(Cell::text(format!("칸{i}")));
        }
        header.push(Cell::text(format!("{UNNAMED_PREFIX}: 18")));
        header.push(Cell::text(DICTIONARY_COLUMN));
        header.push(Cell::text(DICTIONARY_COLUMN));
        header
    }

    #[test]
    fn test_fields_land_on_named_columns_in_order() {
        let mut sheet = template(wide_header());
        let report = append_entry_row(&mut sheet, &snapshot(), ExportPolicy::default()).unwrap();

        assert_eq!(report.row_index, 2);
        let row = &sheet.rows[2];
        // 0열은 이름이 없으니 비고, 1열부터 필드가 순서대로 실린다
        assert_eq!(row[0], Cell::Empty);
        assert_eq!(row[1], Cell::text("I_jti_1h02_1"));
        assert_eq!(row[2], Cell::text("論語注疏"));
        assert_eq!(row[7], Cell::text("일인칭"));
        assert_eq!(row[11], Cell::text("吾日三省吾身"));
        // Unnamed 열은 건너뛴다
        assert_eq!(row[18], Cell::Empty);
        assert!(report.dropped_fields.is_empty());
    }

    #[test]
    fn test_dictionaries_fill_dictionary_columns_left_to_right() {
        let mut sheet = template(wide_header());
        let report = append_entry_row(&mut sheet, &snapshot(), ExportPolicy::default()).unwrap();

        let row = &sheet.rows[2];
        assert_eq!(row[19], Cell::text("漢韓大辭典"));
        assert_eq!(row[20], Cell::text("其他辭典"));
        assert!(report.skipped_dictionaries.is_empty());
    }

    #[test]
    fn test_single_dictionary_leaves_second_column_blank() {
        let mut sheet = template(wide_header());
        let mut s = snapshot();
        s.dictionaries = vec!["大漢和辭典".to_string()];
        append_entry_row(&mut sheet, &s, ExportPolicy::default()).unwrap();

        let row = &sheet.rows[2];
        assert_eq!(row[19], Cell::text("大漢和辭典"));
        assert_eq!(row[20], Cell::Empty);
    }

    #[test]
    fn test_excess_dictionaries_reported_not_written() {
        let header = vec![Cell::text("식별자"), Cell::text(DICTIONARY_COLUMN)];
        let mut sheet = template(header);

        // 빈 폼이라 사전 열 자리도 비어 있다
        let mut s = FormSnapshot::default();
        s.dictionaries = vec!["가".to_string(), "나".to_string(), "다".to_string()];
        let report = append_entry_row(&mut sheet, &s, ExportPolicy::default()).unwrap();

        assert_eq!(report.skipped_dictionaries, vec!["나".to_string(), "다".to_string()]);
        let row = sheet.rows.last().unwrap();
        assert_eq!(row[1], Cell::text("가"));
    }

    #[test]
    fn test_dictionary_column_collision_appends() {
        // 사전 열이 두 번째 이름 있는 열이라 document_name 필드와 겹친다
        let header = vec![Cell::text("식별자"), Cell::text(DICTIONARY_COLUMN)];
        let mut sheet = template(header);
        let mut s = snapshot();
        s.dictionaries = vec!["漢語大詞典".to_string()];
        append_entry_row(&mut sheet, &s, ExportPolicy::default()).unwrap();

        let row = sheet.rows.last().unwrap();
        assert_eq!(row[1], Cell::text("論語注疏, 漢語大詞典"));
    }

    #[test]
    fn test_dictionary_name_match_is_exact() {
        let header = vec![
            Cell::text("식별자"),
            Cell::text("사전 "),
            Cell::text("참조사전"),
        ];
        let mut sheet = template(header);
        let mut s = snapshot();
        s.dictionaries = vec!["漢韓大辭典".to_string()];
        let report = append_entry_row(&mut sheet, &s, ExportPolicy::default()).unwrap();

        // "사전 "도 "참조사전"도 사전 열이 아니다
        assert_eq!(report.skipped_dictionaries, vec!["漢韓大辭典".to_string()]);
    }

    #[test]
    fn test_missing_header_row_is_an_error() {
        let mut sheet = Sheet {
            rows: vec![vec![Cell::text("제목뿐")]],
        };
        let err = append_entry_row(&mut sheet, &snapshot(), ExportPolicy::default()).unwrap_err();
        assert!(matches!(err, CoreError::Schema(_)));
        assert_eq!(sheet.rows.len(), 1);

        let mut empty = Sheet::default();
        assert!(append_entry_row(&mut empty, &snapshot(), ExportPolicy::default()).is_err());
    }

    #[test]
    fn test_prior_rows_untouched() {
        let mut sheet = template(wide_header());
        sheet.rows.push(vec![Cell::text("기존 행"), Cell::Number(1.0)]);
        let before = sheet.rows.clone();

        append_entry_row(&mut sheet, &snapshot(), ExportPolicy::default()).unwrap();

        assert_eq!(sheet.rows.len(), before.len() + 1);
        assert_eq!(&sheet.rows[..before.len()], &before[..]);
    }

    #[test]
    fn test_appending_twice_adds_two_rows() {
        let mut sheet = template(wide_header());
        let s = snapshot();
        let first = append_entry_row(&mut sheet, &s, ExportPolicy::default()).unwrap();
        let second = append_entry_row(&mut sheet, &s, ExportPolicy::default()).unwrap();

        assert_eq!(first.row_index, 2);
        assert_eq!(second.row_index, 3);
        assert_eq!(sheet.rows[2], sheet.rows[3]);
    }

    #[test]
    fn test_row_width_covers_template_and_long_rows() {
        let mut sheet = template(wide_header());
        let report = append_entry_row(&mut sheet, &snapshot(), ExportPolicy::default()).unwrap();
        assert_eq!(report.width, EXPORT_ROW_MIN_WIDTH.max(wide_header().len()));

        let mut long = template(wide_header());
        long.rows.push(vec![Cell::Empty; 60]);
        let report = append_entry_row(&mut long, &snapshot(), ExportPolicy::default()).unwrap();
        assert_eq!(report.width, 60);
        assert_eq!(long.rows.last().unwrap().len(), 60);
    }

    #[test]
    fn test_short_header_drops_tail_fields() {
        // 이름 있는 열이 셋뿐이면 네 번째 이후 필드는 실리지 못한다
        let header = vec![
            Cell::text("식별자"),
            Cell::text("문헌명"),
            Cell::text("항목"),
        ];
        let mut sheet = template(header);
        let report = append_entry_row(&mut sheet, &snapshot(), ExportPolicy::default()).unwrap();

        assert_eq!(report.dropped_fields.len(), 14);
        assert_eq!(report.dropped_fields[0], "pronunciation");
        let row = sheet.rows.last().unwrap();
        assert_eq!(row[2], Cell::text("吾"));
    }

    #[test]
    fn test_null_fallback_fills_blank_fields() {
        let mut sheet = template(wide_header());
        let mut s = snapshot();
        s.citation2 = CitationSlot::default();
        let policy = ExportPolicy {
            fallback: Fallback::Null,
            always_emit_detail: false,
        };
        append_entry_row(&mut sheet, &s, policy).unwrap();

        let row = sheet.rows.last().unwrap();
        // citation2.identifier 필드 자리(13번째 필드 → 13번 열)
        assert_eq!(row[13], Cell::text("NULL"));
    }

    #[test]
    fn test_default_policy_keeps_blank_fields_empty_text() {
        let mut sheet = template(wide_header());
        let s = snapshot();
        append_entry_row(&mut sheet, &s, ExportPolicy::default()).unwrap();
        let row = sheet.rows.last().unwrap();
        assert_eq!(row[13], Cell::text(""));
    }
}
