#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Meta,
    CatalogLoad,
    CatalogSearch,
    CatalogSelect,
    CatalogOverride,
    CitationsLoad,
    CitationsFetch,
    AnnotateStyle,
    AnnotateBracket,
    ExportXml,
    ExportRow,
    ExportRowPreview,
    QaRun,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "meta" => Command::Meta,
            "catalog.load" => Command::CatalogLoad,
            "catalog.search" => Command::CatalogSearch,
            "catalog.select" => Command::CatalogSelect,
            "catalog.override" => Command::CatalogOverride,
            "citations.load" => Command::CitationsLoad,
            "citations.fetch" => Command::CitationsFetch,
            "annotate.style" => Command::AnnotateStyle,
            "annotate.bracket" => Command::AnnotateBracket,
            "export.xml" => Command::ExportXml,
            "export.row" => Command::ExportRow,
            "export.row_preview" => Command::ExportRowPreview,
            "qa.run" => Command::QaRun,
            _ => Command::Unknown,
        }
    }
}
