use crate::serialization::*;

pub struct SerializationReader {
    data: Vec<u8>,
    offset: usize,
    /// names of everything currently being read, outermost first
    path: Vec<&'static str>,
}
impl SerializationReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            offset: 0,
            path: Vec::new(),
        }
    }

    pub fn push_parent(&mut self, name: &'static str) {
        self.path.push(name);
    }
    pub fn pop_parent(&mut self) {
        self.path.pop();
    }

    pub fn read<R:Serializable>(&mut self, name: &'static str) -> SerializationResult<R> {
        self.path.push(name);
        let result = R::read(self).map_err(|e| e.with_stack(&self.path));
        self.path.pop();
        result
    }

    pub fn can_read(&self) -> bool {
        self.remaining() > 0
    }
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn read_slice(&mut self, size: usize) -> SerializationResult<&[u8]> {
        if self.remaining() < size {
            return Err(SerializationError::from(SerializationErrorKind::OutOfBounds {
                wanted: size,
                remaining: self.remaining(),
            }).with_stack(&self.path))
        }

        let slice = &self.data[self.offset..self.offset + size];
        self.offset += size;
        Ok(slice)
    }
}
