use serde::{Deserialize, Serialize};

/// 화면의 참조사전 체크박스 목록. 내보내기 열 배정도 이 순서를 따른다.
pub const DICTIONARIES: [&str; 4] = ["漢韓大辭典", "漢語大詞典", "大漢和辭典", "其他辭典"];

/// 문헌명 기본값.
pub const DEFAULT_DOCUMENT_NAME: &str = "論語注疏";

/// 내보내기 시점의 입력 폼 전체 값. 코어는 이 값을 읽기만 하고 되쓰지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSnapshot {
    pub entry_id: String,
    pub document_name: String,
    pub entry_name: String,
    pub pronunciation: String,
    pub attribute: String,
    pub definition: String,
    pub definition_detail: String,
    pub citation1: CitationSlot,
    pub citation2: CitationSlot,
    /// 선택된 참조사전. 체크박스 순서 그대로 온다.
    pub dictionaries: Vec<String>,
}

/// 용례 입력 한 벌. 폼은 두 벌까지 받는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationSlot {
    pub identifier: String,
    pub reference_id: String,
    pub reference_label: String,
    pub source_text: String,
    pub translated_text: String,
}

/// 빈 칸을 내보낼 때 대신 쓰는 문구.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// 빈 문자열 그대로 둔다.
    Empty,
    /// 글자 그대로 "NULL"을 적는다. 옛 자료와의 호환용.
    Null,
}

impl Fallback {
    pub fn text(self) -> &'static str {
        match self {
            Fallback::Empty => "",
            Fallback::Null => "NULL",
        }
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Fallback::Empty
    }
}

/// 내보내기 동작의 조절값. 같은 폼이라도 산출물 요구에 따라 달리 내보낼 수 있다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportPolicy {
    pub fallback: Fallback,
    /// 어의보충이 비어도 요소를 항상 넣는다.
    pub always_emit_detail: bool,
}

impl ExportPolicy {
    /// 값이 비면 대체 문구를, 아니면 값 그대로를 돌려준다.
    pub fn value_or<'a>(self, value: &'a str) -> &'a str {
        if value.is_empty() {
            self.fallback.text()
        } else {
            value
        }
    }
}
