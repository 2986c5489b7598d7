use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::error::{CoreError, Result};
use crate::model::citation::{
    Citation, MISSING_LINK, MISSING_REFERENCE_ID, MISSING_REFERENCE_LABEL, MISSING_SOURCE,
    MISSING_TAGGED_SOURCE, MISSING_TRANSLATION,
};
use crate::model::sheet::{Cell, Sheet};

pub const COL_IDENTIFIER: &str = "용례식별자";
pub const COL_SOURCE: &str = "원문";
pub const COL_TRANSLATION: &str = "번역문";
pub const COL_TAGGED_SOURCE: &str = "태깅원문";
pub const COL_LINK: &str = "링크";
pub const COL_REFERENCE_ID: &str = "출전정보식별자";
pub const COL_REFERENCE_LABEL: &str = "출전정보";

/// 링크가 URL이 아닐 때 검색어를 넘길 외부 검색 주소.
pub const SEARCH_URL: &str = "https://db.cyberseodang.or.kr/front/usecase/search.do";

/// 용례식별자 → 용례 색인. 적재할 때마다 통째로 새로 만든다.
#[derive(Debug, Default)]
pub struct CitationIndex {
    map: HashMap<String, Citation>,
}

impl CitationIndex {
    /// 외부에서 해석해 넘어온 표로 색인을 만든다.
    ///
    /// 첫 행이 헤더이고 용례식별자 열은 반드시 있어야 한다. 나머지 열은
    /// 없어도 되며 그 값들은 자리표시 문구가 된다. 식별자가 빈 행은
    /// 건너뛰고, 식별자가 겹치면 뒤 행이 이긴다.
    pub fn from_sheet(sheet: &Sheet) -> Result<Self> {
        let header = sheet
            .rows
            .first()
            .ok_or_else(|| CoreError::parse("용례 표가 비어 있습니다"))?;

        let id_col = Sheet::column_position(header, COL_IDENTIFIER).ok_or_else(|| {
            CoreError::parse(format!("{COL_IDENTIFIER} 열을 찾을 수 없습니다"))
        })?;

        let cols = Columns {
            source: Sheet::column_position(header, COL_SOURCE),
            translation: Sheet::column_position(header, COL_TRANSLATION),
            tagged_source: Sheet::column_position(header, COL_TAGGED_SOURCE),
            link: Sheet::column_position(header, COL_LINK),
            reference_id: Sheet::column_position(header, COL_REFERENCE_ID),
            reference_label: Sheet::column_position(header, COL_REFERENCE_LABEL),
        };

        let mut map = HashMap::new();
        for row in sheet.rows.iter().skip(1) {
            let key = cell(row, Some(id_col)).as_text();
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            map.insert(key.to_string(), parse_row(row, &cols));
        }

        Ok(Self { map })
    }

    /// 식별자 정확 일치 조회. 앞뒤 공백만 무시하고 대소문자는 가린다.
    pub fn lookup(&self, identifier: &str) -> Result<&Citation> {
        let identifier = identifier.trim();
        self.map
            .get(identifier)
            .ok_or_else(|| CoreError::LookupMiss(identifier.to_string()))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

struct Columns {
    source: Option<usize>,
    translation: Option<usize>,
    tagged_source: Option<usize>,
    link: Option<usize>,
    reference_id: Option<usize>,
    reference_label: Option<usize>,
}

fn cell(row: &[Cell], col: Option<usize>) -> &Cell {
    static EMPTY: Cell = Cell::Empty;
    col.and_then(|c| row.get(c)).unwrap_or(&EMPTY)
}

fn parse_row(row: &[Cell], cols: &Columns) -> Citation {
    Citation {
        source_text: text_or(cell(row, cols.source), MISSING_SOURCE),
        translated_text: text_or(cell(row, cols.translation), MISSING_TRANSLATION),
        tagged_source_text: text_or(cell(row, cols.tagged_source), MISSING_TAGGED_SOURCE),
        link: extract_link(cell(row, cols.link))
            .unwrap_or_else(|| MISSING_LINK.to_string()),
        reference_id: text_or(cell(row, cols.reference_id), MISSING_REFERENCE_ID),
        reference_label: text_or(cell(row, cols.reference_label), MISSING_REFERENCE_LABEL),
    }
}

/// 다듬은 값이 비면 자리표시 문구로 바꾼다. 칸이 없는 것과 빈 것을 같게 본다.
fn text_or(cell: &Cell, placeholder: &str) -> String {
    let text = cell.as_text();
    let text = text.trim();
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text.to_string()
    }
}

/// 링크 셀 해석. 문자열이면 다듬어 쓰고, 링크 객체면 대상 주소를 꺼낸다.
/// 어느 쪽이든 빈 값은 없는 것으로 본다.
fn extract_link(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Cell::Link(link) => link.resolve().filter(|s| !s.is_empty()),
        _ => None,
    }
}

/// 저장된 링크를 실제 이동 주소로 바꾼다.
///
/// 절대 http(s) URL이면 그대로 쓰고, 그 밖의 문자열은 검색어로 보아
/// 외부 검색 주소에 백분율 부호화로 끼운다. 다듬어 빈 값이면 None.
pub fn resolve_link(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }
    if absolute_url_pattern().is_match(link) {
        return Some(link.to_string());
    }

    let mut url = Url::parse(SEARCH_URL).expect("고정 검색 주소");
    url.query_pairs_mut().append_pair("word", link);
    Some(url.into())
}

fn absolute_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^https?://").expect("고정 URL 패턴"))
}
