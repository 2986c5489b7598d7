use crate::model::snapshot::{CitationSlot, ExportPolicy, FormSnapshot};

/// 입력 폼 한 벌을 어휘항목 XML 문서로 적는다.
///
/// 요소 순서와 들여쓰기는 고정이라 같은 입력이면 바이트까지 같은 문서가
/// 나온다. 값 안에 의미 태그가 섞여 있을 수 있으므로 이 층에서는
/// 이스케이프하지 않고 그대로 적는다.
pub fn serialize(snapshot: &FormSnapshot, policy: ExportPolicy) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "  <어휘항목 식별자=\"{}\">\n",
        policy.value_or(&snapshot.entry_id)
    ));
    xml.push_str(&format!(
        "    <문헌명>{}</문헌명>\n",
        policy.value_or(&snapshot.document_name)
    ));
    xml.push_str(&format!(
        "    <항목>{}</항목>\n",
        policy.value_or(&snapshot.entry_name)
    ));
    xml.push_str(&format!(
        "    <음가>{}</음가>\n",
        policy.value_or(&snapshot.pronunciation)
    ));
    xml.push_str(&format!(
        "    <속성>{}</속성>\n",
        policy.value_or(&snapshot.attribute)
    ));
    xml.push_str(&format!(
        "    <어의>{}</어의>\n",
        policy.value_or(&snapshot.definition)
    ));

    // 어의보충은 값이 있을 때만 넣는다
    let detail = snapshot.definition_detail.trim();
    if !detail.is_empty() {
        xml.push_str(&format!("    <어의보충>{detail}</어의보충>\n"));
    } else if policy.always_emit_detail {
        xml.push_str(&format!(
            "    <어의보충>{}</어의보충>\n",
            policy.fallback.text()
        ));
    }

    xml.push_str("    <번역용례>\n");
    push_citation(&mut xml, &snapshot.citation1, policy);
    // 두 번째 용례는 원문이 있을 때만 나간다
    if !snapshot.citation2.source_text.trim().is_empty() {
        push_citation(&mut xml, &snapshot.citation2, policy);
    }
    xml.push_str("    </번역용례>\n");

    xml.push_str("    <참조사전>\n");
    for dictionary in &snapshot.dictionaries {
        xml.push_str(&format!("      <사전>{dictionary}</사전>\n"));
    }
    xml.push_str("    </참조사전>\n");

    xml.push_str("  </어휘항목>\n");
    xml
}

fn push_citation(xml: &mut String, slot: &CitationSlot, policy: ExportPolicy) {
    xml.push_str(&format!(
        "      <용례 식별자=\"{}\">\n",
        policy.value_or(&slot.identifier)
    ));
    xml.push_str(&format!(
        "        <출전정보 식별자=\"{}\">{}</출전정보>\n",
        policy.value_or(&slot.reference_id),
        policy.value_or(&slot.reference_label)
    ));
    xml.push_str(&format!(
        "        <원문>{}</원문>\n",
        policy.value_or(&slot.source_text)
    ));
    xml.push_str(&format!(
        "        <번역문>{}</번역문>\n",
        policy.value_or(&slot.translated_text)
    ));
    xml.push_str("      </용례>\n");
}
