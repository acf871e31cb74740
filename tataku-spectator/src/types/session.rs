use crate::prelude::*;

/// distinguishes one play attempt from the next one by the same user.
/// a retry always comes with a new token
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionToken(pub u64);
impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
impl Serializable for SessionToken {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        Ok(Self(sr.read("token")?))
    }
    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.0)
    }
}

/// id of the map being played
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentId(pub i32);
impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
impl Serializable for ContentId {
    fn read(sr: &mut SerializationReader) -> SerializationResult<Self> {
        Ok(Self(sr.read("content_id")?))
    }
    fn write(&self, sw: &mut SerializationWriter) {
        sw.write(&self.0)
    }
}

/// what a user is currently playing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionInfo {
    pub token: SessionToken,
    pub content_id: ContentId,
}
impl SessionInfo {
    pub fn new(token: SessionToken, content_id: ContentId) -> Self {
        Self { token, content_id }
    }
}
