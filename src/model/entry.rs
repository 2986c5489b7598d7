use serde::{Deserialize, Serialize};

/// 의미 태그의 영문 이름. 입력 XML의 요소명과 태깅원문의 인라인 태그가 이 표기를 쓴다.
pub const TAG_NAMES: [&str; 11] = [
    "nation", "person", "place", "era", "book", "position", "term", "canon", "object",
    "building", "family",
];

/// 어휘 항목의 의미 속성. 영문 태그명과 화면의 한글 명칭을 상호 변환한다.
///
/// 변환표에 없는 이름은 `Other`로 감싸 원문 그대로 통과시킨다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttributeTag {
    Nation,
    Person,
    Place,
    Era,
    Book,
    Position,
    Term,
    Canon,
    Object,
    Building,
    Family,
    Other(String),
}

impl AttributeTag {
    /// 고정 11종. 화면의 속성 목록 순서와 같다.
    pub const FIXED: [AttributeTag; 11] = [
        AttributeTag::Nation,
        AttributeTag::Person,
        AttributeTag::Place,
        AttributeTag::Era,
        AttributeTag::Book,
        AttributeTag::Position,
        AttributeTag::Term,
        AttributeTag::Canon,
        AttributeTag::Object,
        AttributeTag::Building,
        AttributeTag::Family,
    ];

    /// 영문 태그명 → 속성. 표에 없으면 이름 그대로 유지한다.
    pub fn from_tag_name(name: &str) -> Self {
        match name {
            "nation" => AttributeTag::Nation,
            "person" => AttributeTag::Person,
            "place" => AttributeTag::Place,
            "era" => AttributeTag::Era,
            "book" => AttributeTag::Book,
            "position" => AttributeTag::Position,
            "term" => AttributeTag::Term,
            "canon" => AttributeTag::Canon,
            "object" => AttributeTag::Object,
            "building" => AttributeTag::Building,
            "family" => AttributeTag::Family,
            other => AttributeTag::Other(other.to_string()),
        }
    }

    /// 한글 명칭 → 속성. 목록 밖의 입력은 그대로 유지한다(자유 입력 허용).
    pub fn from_label(label: &str) -> Self {
        match label {
            "국가" => AttributeTag::Nation,
            "인명" => AttributeTag::Person,
            "지명" => AttributeTag::Place,
            "연호" => AttributeTag::Era,
            "서명" => AttributeTag::Book,
            "관직" => AttributeTag::Position,
            "용어" => AttributeTag::Term,
            "경전" => AttributeTag::Canon,
            "물명" => AttributeTag::Object,
            "건물" => AttributeTag::Building,
            "가문" => AttributeTag::Family,
            other => AttributeTag::Other(other.to_string()),
        }
    }

    /// 화면과 내보내기에 쓰는 한글 명칭.
    pub fn label(&self) -> &str {
        match self {
            AttributeTag::Nation => "국가",
            AttributeTag::Person => "인명",
            AttributeTag::Place => "지명",
            AttributeTag::Era => "연호",
            AttributeTag::Book => "서명",
            AttributeTag::Position => "관직",
            AttributeTag::Term => "용어",
            AttributeTag::Canon => "경전",
            AttributeTag::Object => "물명",
            AttributeTag::Building => "건물",
            AttributeTag::Family => "가문",
            AttributeTag::Other(name) => name,
        }
    }

    pub fn is_fixed(&self) -> bool {
        !matches!(self, AttributeTag::Other(_))
    }
}

impl From<String> for AttributeTag {
    fn from(s: String) -> Self {
        AttributeTag::from_label(&s)
    }
}

impl From<AttributeTag> for String {
    fn from(tag: AttributeTag) -> Self {
        tag.label().to_string()
    }
}

/// 색인된 어휘 항목 하나. id는 적재 시 문서 순서대로 부여된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub attribute: AttributeTag,
}
