use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::model::entry::TAG_NAMES;

/// 의미 태그를 화면용 span으로 바꾼다.
///
/// `<nation>漢</nation>` → `<span class="tag tag-nation">漢</span>`.
/// 목록에 없는 태그는 문자 그대로 남고, 같은 태그끼리는 비탐욕 매칭이라
/// 가장 안쪽부터 닫히는 쌍이 잡힌다.
pub fn style_tags(text: &str) -> String {
    let mut out = text.to_string();
    for (tag, pattern) in tag_patterns() {
        let replacement = format!(r#"<span class="tag tag-{tag}">$1</span>"#);
        out = pattern.replace_all(&out, replacement.as_str()).into_owned();
    }
    out
}

fn tag_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        TAG_NAMES
            .iter()
            .map(|tag| {
                let pattern =
                    Regex::new(&format!("<{tag}>(.*?)</{tag}>")).expect("고정 태그 패턴");
                (*tag, pattern)
            })
            .collect()
    })
}

/// 괄호 삽입 결과. 삽입하지 않았으면 입력이 그대로 돌아온다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketEdit {
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

/// 선택 구간을 `[=…]`로 감싼다.
///
/// 선택을 다듬은 문자열이 비면 아무것도 하지 않고, 같은 `[=…]` 표기가
/// 이미 본문 어딘가에 있으면 중복으로 보고 건너뛴다. 삽입되면 선택
/// 시작/끝이 여는 괄호 길이(2바이트)만큼 오른쪽으로 밀린다.
pub fn apply_brackets(text: &str, selection_start: usize, selection_end: usize) -> BracketEdit {
    let unchanged = BracketEdit {
        text: text.to_string(),
        selection_start,
        selection_end,
    };

    let Some(selected) = text.get(selection_start..selection_end) else {
        return unchanged;
    };
    let selected = selected.trim();
    if selected.is_empty() {
        return unchanged;
    }

    let marker = format!("[={selected}]");
    if text.contains(&marker) {
        return unchanged;
    }

    let mut edited = String::with_capacity(text.len() + marker.len());
    edited.push_str(&text[..selection_start]);
    edited.push_str(&marker);
    edited.push_str(&text[selection_end..]);

    BracketEdit {
        text: edited,
        selection_start: selection_start + 2,
        selection_end: selection_end + 2,
    }
}
