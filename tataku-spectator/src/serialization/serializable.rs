use crate::serialization::*;

pub trait Serializable: core::fmt::Debug {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> where Self: Sized;
    fn write(&self, sw: &mut SerializationWriter);
}

macro_rules! impl_for_num {
    ($($t:ty),+) => { $(
        impl Serializable for $t {
            fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
                let mut bytes = [0u8; std::mem::size_of::<$t>()];
                bytes.copy_from_slice(sr.read_slice(std::mem::size_of::<$t>())?);
                Ok(Self::from_le_bytes(bytes))
            }

            fn write(&self, sw: &mut SerializationWriter) {
                sw.write_raw_bytes(&self.to_le_bytes())
            }
        } )+
    }
}
impl_for_num![u8, i8, u16, i16, u32, i32, u64, i64, f32, f64];

// usize is read as a u64
impl Serializable for usize {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        u64::read(sr).map(|n| n as usize)
    }

    fn write(&self, sw: &mut SerializationWriter) {
        (*self as u64).write(sw)
    }
}

impl Serializable for bool {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        Ok(u8::read(sr)? & 1 == 1)
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write::<u8>(&(*self as u8));
    }
}

impl Serializable for String {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        let len = usize::read(sr)?;
        let bytes = sr.read_slice(len)?.to_vec();
        Ok(String::from_utf8(bytes)?)
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.len());
        sw.write_raw_bytes(self.as_bytes());
    }
}

impl<T:Serializable> Serializable for Vec<T> {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        let count = usize::read(sr)?;

        // dont trust the length prefix with the allocation
        let mut out = Vec::with_capacity(count.min(sr.remaining()));
        for _ in 0..count { out.push(sr.read("item")?) }
        Ok(out)
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.len());
        for i in self.iter() {
            sw.write(i)
        }
    }
}

impl<T:Serializable> Serializable for Option<T> {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        if bool::read(sr)? {
            Ok(Some(T::read(sr)?))
        } else {
            Ok(None)
        }
    }

    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.is_some());
        if let Some(t) = self { sw.write(t) }
    }
}
