pub mod decoder;
pub mod parser;
pub mod reader;

pub use decoder::LineDecoder;
pub use parser::parse_line;
pub use reader::run_device_reader;
