use std::collections::HashMap;

use crate::model::entry::{AttributeTag, Entry};

/// 검색 결과 표시 상한.
pub const SEARCH_LIMIT: usize = 10;

/// 어휘 항목 목록과 수정 태깅(속성 덮어쓰기) 맵.
///
/// 적재는 목록을 통째로 교체하지만 수정 태깅은 id 기준이라 남겨 둔다.
/// 같은 파일을 다시 올리면 id가 같은 순서로 다시 붙으므로 수정이 이어진다.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
    overrides: HashMap<String, AttributeTag>,
}

impl Catalog {
    /// 항목 전체 교체. 수정 태깅은 지우지 않는다.
    pub fn reset(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// 표제어 부분일치 검색. 대소문자를 가리지 않는다.
    ///
    /// 검색어로 시작하는 항목이 앞에 오고 각 묶음 안에서는 문서 순서가
    /// 유지된다. 빈 검색어는 빈 결과.
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&query))
            .collect();
        matches.sort_by_key(|e| !e.name.to_lowercase().starts_with(&query));
        matches.truncate(SEARCH_LIMIT);
        matches
    }

    /// 수정 태깅 저장. 같은 id는 덮어쓴다.
    pub fn update_override(&mut self, id: impl Into<String>, tag: AttributeTag) {
        self.overrides.insert(id.into(), tag);
    }

    /// 화면과 내보내기에 쓸 속성. 수정 태깅이 있으면 그쪽이 우선하되,
    /// 빈 값으로 덮어쓴 것은 없는 셈 친다.
    pub fn resolve_attribute<'a>(&'a self, entry: &'a Entry) -> &'a AttributeTag {
        self.overrides
            .get(&entry.id)
            .filter(|tag| !tag.label().is_empty())
            .unwrap_or(&entry.attribute)
    }
}
