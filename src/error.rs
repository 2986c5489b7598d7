use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// 코어 전역 오류. 모두 사용자에게 보여줄 수 있는 한국어 문구로 표현된다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 업로드된 문서나 표를 해석할 수 없음. 진행 중이던 적재만 중단된다.
    #[error("적재할 수 없습니다: {0}")]
    Parse(String),

    /// 내보내기 대상 표의 모양이 계약과 다름. 내보내기만 중단된다.
    #[error("내보낼 수 없습니다: {0}")]
    Schema(String),

    /// 용례 식별자가 색인에 없음.
    #[error("해당 식별자의 데이터가 없습니다: {0}")]
    LookupMiss(String),

    #[error("파일을 읽을 수 없습니다: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn parse(msg: impl Into<String>) -> Self {
        CoreError::Parse(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        CoreError::Schema(msg.into())
    }
}
