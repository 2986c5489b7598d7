pub mod annotate;
pub mod catalog;
pub mod citations;
pub mod encoding;
pub mod qa;
pub mod row_preview;
pub mod session;
pub mod sheet_merge;
pub mod xml_export;
