use serde::{Deserialize, Serialize};

pub const MISSING_SOURCE: &str = "(원문 없음)";
pub const MISSING_TRANSLATION: &str = "(번역문 없음)";
pub const MISSING_TAGGED_SOURCE: &str = "(태깅 원문 없음)";
pub const MISSING_LINK: &str = "(링크 없음)";
pub const MISSING_REFERENCE_ID: &str = "(출전정보 식별자 없음)";
pub const MISSING_REFERENCE_LABEL: &str = "(출전정보 없음)";

/// 번역용례 한 건. 표에서 비었거나 아예 없던 칸은 자리표시 문구로 채워져 있어
/// 조회 결과만 보고는 둘을 구분할 수 없다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// 원문.
    pub source_text: String,
    /// 번역문.
    pub translated_text: String,
    /// 의미 태그가 섞인 원문.
    pub tagged_source_text: String,
    /// 출전 링크. URL일 수도, 검색어일 수도 있다.
    pub link: String,
    /// 출전정보식별자.
    pub reference_id: String,
    /// 출전정보.
    pub reference_label: String,
}
