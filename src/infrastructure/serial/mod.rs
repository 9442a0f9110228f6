// Serial module - Device reading and line framing
pub mod framer;
pub mod reader;

pub use framer::LineFramer;
pub use reader::SerialLineReader;
