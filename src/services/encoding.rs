use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

use crate::error::Result;

/// 복호 판정 근거. 적재 응답에 그대로 실린다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeReport {
    pub encoding: String,
    pub confidence: f32,
    pub had_errors: bool,
}

/// 복호된 업로드 텍스트와 판정 근거.
#[derive(Debug)]
pub struct DecodedText {
    pub text: String,
    pub report: DecodeReport,
}

/// 파일을 읽어 인코딩을 추정해 복호한다. 오래된 정리 파일은 EUC-KR로
/// 저장된 경우가 있어 UTF-8 고정으로 읽으면 깨진다.
pub fn read_text_file(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path)?;
    Ok(decode(&bytes))
}

pub fn decode(bytes: &[u8]) -> DecodedText {
    // BOM UTF-8 (EF BB BF)
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        let (text, _, had_errors) = UTF_8.decode(&bytes[3..]);
        return DecodedText {
            text: text.into_owned(),
            report: DecodeReport {
                encoding: "utf-8-sig".into(),
                confidence: 0.99,
                had_errors,
            },
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    let confidence = estimate_confidence(bytes, encoding);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("복호 중 대체 문자가 생겼습니다 (추정 인코딩 {})", used.name());
    }

    DecodedText {
        text: text.into_owned(),
        report: DecodeReport {
            encoding: used.name().to_lowercase(),
            confidence,
            had_errors,
        },
    }
}

fn estimate_confidence(bytes: &[u8], encoding: &'static Encoding) -> f32 {
    let (text, _, had_errors) = encoding.decode(bytes);

    if had_errors {
        return 0.35;
    }

    let len = text.len();
    if len < 64 {
        0.55
    } else if len < 512 {
        0.70
    } else if len < 4096 {
        0.82
    } else {
        0.90
    }
}
