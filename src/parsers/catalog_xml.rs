use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{CoreError, Result};
use crate::model::entry::{AttributeTag, Entry};

/// 적재 시 부여하는 항목 식별자의 접두사. 뒤에 1부터 시작하는 순번이 붙고,
/// 순번은 적재할 때마다 처음부터 다시 센다.
pub const ENTRY_ID_PREFIX: &str = "I_jti_1h02_";

/// 항목들을 담는 컨테이너 요소 이름.
pub const ROOT_ELEMENT: &str = "DOC";

/// 업로드된 XML에서 어휘 항목 목록을 뽑는다.
///
/// 문서 안 첫 번째 `DOC` 요소를 찾아 그 직계 자식을 문서 순서대로 항목으로
/// 만든다. 자식의 요소명이 속성이 되고, 자식 안의 모든 텍스트를 이어 다듬은
/// 것이 표제어가 된다. `DOC` 밖의 내용과 두 번째 이후의 `DOC`은 무시한다.
pub fn parse(text: &str) -> Result<Vec<Entry>> {
    let mut reader = Reader::from_str(text);

    let mut entries: Vec<Entry> = Vec::new();
    let mut counter = 1usize;

    let mut found_root = false;
    // 수집 중인 직계 자식: (요소명, 텍스트 버퍼). depth는 자식 안의 중첩 깊이.
    let mut current: Option<(String, String)> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if !found_root {
                    if name == ROOT_ELEMENT {
                        found_root = true;
                    }
                } else if current.is_none() {
                    current = Some((name, String::new()));
                    depth = 0;
                } else {
                    // 자식 안의 중첩 요소는 텍스트만 취한다
                    depth += 1;
                }
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if !found_root {
                    if name == ROOT_ELEMENT {
                        // 비어 있는 DOC: 항목 없음
                        found_root = true;
                        break;
                    }
                } else if current.is_none() {
                    push_entry(&mut entries, &mut counter, name, "");
                }
            }
            Ok(Event::Text(t)) => {
                if let Some((_, buf)) = current.as_mut() {
                    let text = t.unescape().map_err(|e| {
                        CoreError::parse(format!(
                            "XML 텍스트를 해석할 수 없습니다 (위치 {}): {e}",
                            reader.error_position()
                        ))
                    })?;
                    buf.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(t.as_ref()));
                }
            }
            Ok(Event::End(_)) => {
                if found_root {
                    match current.take() {
                        Some((name, text)) => {
                            if depth == 0 {
                                push_entry(&mut entries, &mut counter, name, &text);
                            } else {
                                depth -= 1;
                                current = Some((name, text));
                            }
                        }
                        // 직계 자식 밖의 End는 DOC 자신의 종료. 첫 DOC만 읽는다.
                        None => break,
                    }
                }
            }
            Ok(Event::Eof) => break,
            // 선언, 주석, DOCTYPE 등은 건너뛴다
            Ok(_) => {}
            Err(e) => {
                return Err(CoreError::parse(format!(
                    "XML 구문 오류 (위치 {}): {e}",
                    reader.error_position()
                )));
            }
        }
    }

    if !found_root {
        return Err(CoreError::parse(format!(
            "{ROOT_ELEMENT} 요소를 찾을 수 없습니다"
        )));
    }

    Ok(entries)
}

fn push_entry(entries: &mut Vec<Entry>, counter: &mut usize, tag_name: String, text: &str) {
    entries.push(Entry {
        id: format!("{ENTRY_ID_PREFIX}{counter}"),
        name: text.trim().to_string(),
        attribute: AttributeTag::from_tag_name(&tag_name),
    });
    *counter += 1;
}
