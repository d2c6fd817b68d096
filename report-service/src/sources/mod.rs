pub mod generator_xml_file;
pub mod reference_xml_file;

pub use generator_xml_file::parse_generators;
pub use reference_xml_file::load_reference_data;
