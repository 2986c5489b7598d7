use serde::{Deserialize, Serialize};

use crate::model::entry::AttributeTag;
use crate::model::snapshot::FormSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// 내보내기 전에 입력 폼을 점검한다. 모두 안내일 뿐 내보내기를 막지는 않는다.
pub fn run(snapshot: &FormSnapshot) -> Vec<QaIssue> {
    let mut issues: Vec<QaIssue> = Vec::new();

    if snapshot.entry_id.trim().is_empty() {
        issues.push(issue(
            "entry_id",
            "ENTRY_ID_EMPTY",
            "항목 식별자가 비어 있습니다",
        ));
    }

    if snapshot.entry_name.trim().is_empty() {
        issues.push(issue(
            "entry_name",
            "ENTRY_NAME_EMPTY",
            "표제어가 비어 있습니다",
        ));
    }

    if snapshot.definition.trim().is_empty() {
        issues.push(issue(
            "definition",
            "DEFINITION_EMPTY",
            "어의가 비어 있습니다",
        ));
    }

    // 속성은 자유 입력이 되는 칸이라 목록 밖 값은 오타일 가능성이 높다
    let attribute = snapshot.attribute.trim();
    if !attribute.is_empty() && !AttributeTag::from_label(attribute).is_fixed() {
        issues.push(issue(
            "attribute",
            "ATTRIBUTE_UNLISTED",
            "속성이 고정 목록에 없습니다",
        ));
    }

    if snapshot.citation1.source_text.trim().is_empty()
        && !snapshot.citation2.source_text.trim().is_empty()
    {
        issues.push(issue(
            "citation2",
            "CITATION_ORDER",
            "용례 1이 비어 있는데 용례 2만 채워져 있습니다",
        ));
    }

    for (field, slot) in [
        ("citation1", &snapshot.citation1),
        ("citation2", &snapshot.citation2),
    ] {
        if !slot.identifier.trim().is_empty() && slot.source_text.trim().is_empty() {
            issues.push(issue(
                field,
                "CITATION_INCOMPLETE",
                "용례 식별자만 있고 원문이 없습니다",
            ));
        }
    }

    if snapshot.dictionaries.is_empty() {
        issues.push(issue(
            "dictionaries",
            "DICTIONARY_NONE",
            "참조사전이 하나도 선택되지 않았습니다",
        ));
    }

    issues
}

fn issue(field: &str, code: &str, message: &str) -> QaIssue {
    QaIssue {
        field: field.to_string(),
        code: code.to_string(),
        message: message.to_string(),
    }
}
