use crate::services::catalog::Catalog;
use crate::services::citations::CitationIndex;

/// 세션 동안 살아 있는 상태 전부. 프로토콜 처리기에 명시적으로 넘겨 쓰며,
/// 프로세스를 끝내면 같이 사라진다.
#[derive(Debug, Default)]
pub struct Session {
    pub catalog: Catalog,
    pub citations: CitationIndex,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
