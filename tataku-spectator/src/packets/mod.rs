mod stream_packet;

pub use stream_packet::*;
