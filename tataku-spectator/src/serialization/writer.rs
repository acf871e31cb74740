use crate::serialization::*;

#[derive(Default)]
pub struct SerializationWriter {
    data: Vec<u8>
}
impl SerializationWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(self) -> Vec<u8> {
        self.data
    }

    pub fn write<S:Serializable>(&mut self, s: &S) {
        s.write(self);
    }

    pub fn write_raw_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }
}

/// helper for inline-writing data, mostly used to pack several packets into one message
#[derive(Default)]
pub struct SimpleWriter {
    writer: SerializationWriter
}
impl SimpleWriter {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn done(self) -> Vec<u8> {
        self.writer.data()
    }

    pub fn write<W:Serializable>(mut self, s: &W) -> Self {
        self.writer.write(s);
        self
    }
}
