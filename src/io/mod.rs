//! Byte sources and the byte-order aware reader built on top of them.

mod byte_reader;
mod range_reader;
mod stream_buffer;

pub use byte_reader::{ByteOrder, ByteReader};
pub use range_reader::{FileReader, MemoryReader, RangeReader};
pub use stream_buffer::StreamBuffer;
