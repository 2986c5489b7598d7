pub mod catalog_xml;
