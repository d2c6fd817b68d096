pub mod result_xml;

pub use result_xml::ResultXmlSink;
