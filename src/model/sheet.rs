use serde::{Deserialize, Serialize};

/// 외부 셸의 엑셀 코덱이 해석해 넘긴 표. 행 × 열의 셀 배열 그대로 주고받는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sheet {
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// 가장 긴 행의 길이.
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// 헤더 행에서 이름이 정확히 일치하는 첫 열의 위치.
    pub fn column_position(header: &[Cell], name: &str) -> Option<usize> {
        header
            .iter()
            .position(|cell| matches!(cell, Cell::Text(s) if s == name))
    }
}

/// 표의 셀 하나. JSON에서는 null / 불리언 / 숫자 / 문자열 / 링크 객체 중 하나로 나타난다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    Link(LinkCell),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// 셀의 표시 문자열. 숫자는 정수면 소수점 없이 적는다.
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.clone(),
            Cell::Link(_) => String::new(),
        }
    }
}

/// 정수 값이 "15.0"으로 적히지 않게 한다. 열람용 표시는 엑셀 쪽 표기를 따른다.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// 링크 셀. 두 가지 역사적 모양(중첩 `l.Target`, 직접 `Target`)을 모두 받는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkCell {
    #[serde(alias = "l")]
    pub link: Option<LinkTarget>,
    #[serde(alias = "Target")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkTarget {
    #[serde(alias = "Target")]
    pub target: Option<String>,
    #[serde(alias = "Tooltip")]
    pub tooltip: Option<String>,
}

impl LinkCell {
    /// 이동 대상 주소. 중첩 링크가 있으면 비어 있어도 그쪽을 우선한다.
    pub fn resolve(&self) -> Option<String> {
        match &self.link {
            Some(inner) => inner.target.clone(),
            None => self.target.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_shapes_from_json() {
        let row: Vec<Cell> = serde_json::from_str(
            r#"[null, 15, "원문", {"Target": "https://example.com"}, {"l": {"Target": "x"}}]"#,
        )
        .unwrap();
        assert_eq!(row[0], Cell::Empty);
        assert_eq!(row[1], Cell::Number(15.0));
        assert_eq!(row[2], Cell::Text("원문".to_string()));
        assert!(matches!(&row[3], Cell::Link(l) if l.resolve().as_deref() == Some("https://example.com")));
        assert!(matches!(&row[4], Cell::Link(l) if l.resolve().as_deref() == Some("x")));
    }

    #[test]
    fn test_numbers_render_without_trailing_zero() {
        assert_eq!(Cell::Number(15.0).as_text(), "15");
        assert_eq!(Cell::Number(3.5).as_text(), "3.5");
        assert_eq!(Cell::Number(-2.0).as_text(), "-2");
    }

    #[test]
    fn test_nested_link_wins_even_when_blank() {
        let cell: LinkCell =
            serde_json::from_str(r#"{"l": {"Tooltip": "설명"}, "Target": "https://a"}"#).unwrap();
        assert_eq!(cell.resolve(), None);
    }

    #[test]
    fn test_unrecognized_object_behaves_like_no_link() {
        let cell: Cell = serde_json::from_str(r#"{"Style": "bold"}"#).unwrap();
        match cell {
            Cell::Link(link) => assert_eq!(link.resolve(), None),
            other => panic!("unexpected cell: {other:?}"),
        }
    }

    #[test]
    fn test_max_width_over_jagged_rows() {
        let sheet = Sheet {
            rows: vec![
                vec![Cell::Empty; 3],
                vec![Cell::Empty; 7],
                vec![Cell::Empty; 5],
            ],
        };
        assert_eq!(sheet.max_width(), 7);
        assert_eq!(Sheet::default().max_width(), 0);
    }

    #[test]
    fn test_column_position_is_exact_match() {
        let header = vec![Cell::text("번호"), Cell::text("용례식별자"), Cell::text("원문")];
        assert_eq!(Sheet::column_position(&header, "용례식별자"), Some(1));
        assert_eq!(Sheet::column_position(&header, "용례식별자 "), None);
        assert_eq!(Sheet::column_position(&header, "링크"), None);
    }
}
