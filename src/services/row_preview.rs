use serde::Serialize;

use crate::model::snapshot::FormSnapshot;

/// 고정 배치 한 줄 내보내기의 헤더. 값 줄과 같은 18칸이다.
pub const PREVIEW_HEADER: [&str; 18] = [
    "식별자",
    "문헌명",
    "항목",
    "음가",
    "속성",
    "어의",
    "어의보충",
    "용례식별자1",
    "출전정보식별자1",
    "출전정보1",
    "원문1",
    "번역문1",
    "용례식별자2",
    "출전정보식별자2",
    "출전정보2",
    "원문2",
    "번역문2",
    "참조사전",
];

/// 클립보드로 옮겨 붙일 한 줄 미리보기.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPreview {
    pub header: Vec<&'static str>,
    pub row: Vec<String>,
    /// 값 줄을 탭으로 이은 문자열.
    pub text: String,
}

/// 폼 값을 고정 배치 한 줄로 늘어놓는다. 값은 다듬고, 빈 칸은 빈 칸으로
/// 남긴다. 참조사전은 마지막 칸에 "; "로 이어 적는다.
pub fn build(snapshot: &FormSnapshot) -> RowPreview {
    let t = |value: &str| value.trim().to_string();

    let mut row = vec![
        t(&snapshot.entry_id),
        t(&snapshot.document_name),
        t(&snapshot.entry_name),
        t(&snapshot.pronunciation),
        t(&snapshot.attribute),
        t(&snapshot.definition),
        t(&snapshot.definition_detail),
        t(&snapshot.citation1.identifier),
        t(&snapshot.citation1.reference_id),
        t(&snapshot.citation1.reference_label),
        t(&snapshot.citation1.source_text),
        t(&snapshot.citation1.translated_text),
        t(&snapshot.citation2.identifier),
        t(&snapshot.citation2.reference_id),
        t(&snapshot.citation2.reference_label),
        t(&snapshot.citation2.source_text),
        t(&snapshot.citation2.translated_text),
    ];
    row.push(snapshot.dictionaries.join("; "));

    let text = row.join("\t");
    RowPreview {
        header: PREVIEW_HEADER.to_vec(),
        row,
        text,
    }
}
