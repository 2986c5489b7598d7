use serde_json::{json, Value};

use crate::error::CoreError;
use crate::model::entry::{AttributeTag, Entry, TAG_NAMES};
use crate::model::sheet::Sheet;
use crate::model::snapshot::{ExportPolicy, FormSnapshot, DEFAULT_DOCUMENT_NAME, DICTIONARIES};
use crate::parsers::catalog_xml;
use crate::services::catalog::Catalog;
use crate::services::citations::{self, CitationIndex};
use crate::services::session::Session;
use crate::services::{annotate, encoding, qa, row_preview, sheet_merge, xml_export};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

/// 코어 오류를 응답으로 바꾼다. 조회 실패는 일상이라 debug, 나머지는 warn.
fn core_err(id: Value, e: CoreError) -> String {
    match &e {
        CoreError::LookupMiss(identifier) => log::debug!("용례 조회 실패: {identifier}"),
        other => log::warn!("{other}"),
    }
    err(id, e.to_string())
}

fn parse_snapshot(payload: &Value) -> Result<FormSnapshot, String> {
    let value = payload.get("snapshot").cloned().unwrap_or(Value::Null);
    if value.is_null() {
        return Err("payload.snapshot is required".to_string());
    }
    serde_json::from_value(value).map_err(|e| format!("invalid payload.snapshot: {e}"))
}

fn parse_sheet(payload: &Value) -> Result<Sheet, String> {
    let value = payload.get("sheet").cloned().unwrap_or(Value::Null);
    if value.is_null() {
        return Err("payload.sheet is required".to_string());
    }
    serde_json::from_value(value).map_err(|e| format!("invalid payload.sheet: {e}"))
}

fn parse_policy(payload: &Value) -> Result<ExportPolicy, String> {
    match payload.get("policy") {
        None | Some(Value::Null) => Ok(ExportPolicy::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| format!("invalid payload.policy: {e}")),
    }
}

/// 응답에 싣는 항목 모양. 속성은 수정 태깅을 반영한 값이다.
fn entry_json(catalog: &Catalog, entry: &Entry) -> Value {
    json!({
        "id": entry.id,
        "name": entry.name,
        "attribute": catalog.resolve_attribute(entry).label(),
    })
}

pub fn handle(session: &mut Session, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let payload = get_payload(&req);

    match Command::from(get_cmd(&req)) {
        Command::Ping => ok(id, json!({ "message": "eohwi-core alive" })),

        Command::Meta => ok(
            id,
            json!({
                "attributes": AttributeTag::FIXED.iter().map(|t| t.label()).collect::<Vec<_>>(),
                "tags": TAG_NAMES,
                "dictionaries": DICTIONARIES,
                "default_document_name": DEFAULT_DOCUMENT_NAME,
            }),
        ),

        Command::CatalogLoad => {
            // text(셸이 이미 복호한 문자열) 또는 path(코어가 읽어 복호) 중 하나
            let text_arg = payload.get("text").and_then(|v| v.as_str());
            let path_arg = payload.get("path").and_then(|v| v.as_str()).unwrap_or("");

            let (text, detected) = match text_arg {
                Some(t) => (t.to_string(), None),
                None if !path_arg.is_empty() => {
                    let decoded =
                        match encoding::read_text_file(std::path::Path::new(path_arg)) {
                            Ok(d) => d,
                            Err(e) => return core_err(id, e),
                        };
                    (decoded.text, Some(decoded.report))
                }
                None => return err(id, "payload.text or payload.path is required"),
            };

            match catalog_xml::parse(&text) {
                Ok(entries) => {
                    session.catalog.reset(entries);
                    let count = session.catalog.len();
                    log::info!("어휘 목록 적재: {count}개 항목");
                    ok(id, json!({ "count": count, "decoding": detected }))
                }
                Err(e) => core_err(id, e),
            }
        }

        Command::CatalogSearch => {
            let query = payload.get("query").and_then(|v| v.as_str()).unwrap_or("");
            let entries: Vec<Value> = session
                .catalog
                .search(query)
                .into_iter()
                .map(|e| entry_json(&session.catalog, e))
                .collect();
            ok(id, json!({ "entries": entries }))
        }

        Command::CatalogSelect => {
            let entry_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
            if entry_id.is_empty() {
                return err(id, "payload.id is required");
            }
            if session.catalog.is_empty() {
                return err(id, "적재된 어휘 항목이 없습니다");
            }
            match session.catalog.find(entry_id) {
                Some(entry) => {
                    let entry = entry_json(&session.catalog, entry);
                    ok(id, json!({ "entry": entry }))
                }
                None => err(id, format!("해당 항목이 없습니다: {entry_id}")),
            }
        }

        Command::CatalogOverride => {
            let entry_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
            let attribute = payload
                .get("attribute")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            if entry_id.is_empty() {
                return err(id, "payload.id is required");
            }

            let tag = AttributeTag::from_label(attribute);
            session.catalog.update_override(entry_id, tag.clone());
            ok(id, json!({ "id": entry_id, "attribute": tag.label() }))
        }

        Command::CitationsLoad => {
            let sheet = match parse_sheet(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };
            match CitationIndex::from_sheet(&sheet) {
                Ok(index) => {
                    let count = index.len();
                    // 실패한 적재가 기존 색인을 지우지 않도록 성공 후에만 교체한다
                    session.citations = index;
                    log::info!("번역용례 적재: {count}건");
                    ok(id, json!({ "count": count }))
                }
                Err(e) => core_err(id, e),
            }
        }

        Command::CitationsFetch => {
            let identifier = payload
                .get("identifier")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            if session.citations.is_empty() {
                return err(id, "적재된 번역용례가 없습니다");
            }
            match session.citations.lookup(identifier) {
                Ok(citation) => ok(
                    id,
                    json!({
                        "citation": citation,
                        "styled_source": annotate::style_tags(&citation.tagged_source_text),
                        "link": citations::resolve_link(&citation.link),
                    }),
                ),
                Err(e) => core_err(id, e),
            }
        }

        Command::AnnotateStyle => {
            let text = payload.get("text").and_then(|v| v.as_str()).unwrap_or("");
            ok(id, json!({ "html": annotate::style_tags(text) }))
        }

        Command::AnnotateBracket => {
            let text = payload.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let start = payload
                .get("selection_start")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as usize;
            let end = payload
                .get("selection_end")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as usize;

            ok(id, json!(annotate::apply_brackets(text, start, end)))
        }

        Command::ExportXml => {
            let snapshot = match parse_snapshot(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };
            let policy = match parse_policy(payload) {
                Ok(p) => p,
                Err(e) => return err(id, e),
            };
            ok(id, json!({ "xml": xml_export::serialize(&snapshot, policy) }))
        }

        Command::ExportRow => {
            let snapshot = match parse_snapshot(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };
            let policy = match parse_policy(payload) {
                Ok(p) => p,
                Err(e) => return err(id, e),
            };
            let mut sheet = match parse_sheet(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };

            match sheet_merge::append_entry_row(&mut sheet, &snapshot, policy) {
                Ok(report) => {
                    let mut out = json!(report);
                    out["sheet"] = json!(sheet);
                    ok(id, out)
                }
                Err(e) => core_err(id, e),
            }
        }

        Command::ExportRowPreview => {
            let snapshot = match parse_snapshot(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };
            ok(id, json!(row_preview::build(&snapshot)))
        }

        Command::QaRun => {
            let snapshot = match parse_snapshot(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };
            ok(id, json!({ "issues": qa::run(&snapshot) }))
        }

        Command::Unknown => err(id, "unknown command"),
    }
}
