use crate::prelude::*;

/// wire form of [`StreamEvent`]. a single message can hold any number of these back to back
#[derive(Clone, Debug, PartialEq)]
#[allow(non_camel_case_types)]
#[derive(PacketSerialization)]
#[packet(type="u16")]
pub enum StreamPacket {
    // ======= Playing users =======
    /// these users started playing
    #[packet(id=400)]
    Server_PlayingUsersAdded {
        user_ids: Vec<u32>
    },

    /// these users stopped playing
    #[packet(id=401)]
    Server_PlayingUsersRemoved {
        user_ids: Vec<u32>
    },

    /// forget every playing user, the server will re-send the ones still playing
    #[packet(id=402)]
    Server_PlayingUsersReset,

    // ======= Sessions =======
    /// user started a map. a retry is sent as a new session with a new token
    #[packet(id=410)]
    Server_SessionStarted {
        user_id: u32,
        token: SessionToken,
        /// the map being played
        content_id: ContentId,
    },

    /// user finished, failed, or quit
    #[packet(id=411)]
    Server_SessionEnded {
        user_id: u32,
        token: SessionToken,
    },

    /// frames for the session with this token
    #[packet(id=412)]
    Server_SpectatorFrames {
        user_id: u32,
        token: SessionToken,
        frames: Vec<Frame>,
    },
}

impl From<StreamPacket> for StreamEvent {
    fn from(packet: StreamPacket) -> Self {
        match packet {
            StreamPacket::Server_PlayingUsersAdded { user_ids } => Self::Membership(MembershipChange::Added(user_ids)),
            StreamPacket::Server_PlayingUsersRemoved { user_ids } => Self::Membership(MembershipChange::Removed(user_ids)),
            StreamPacket::Server_PlayingUsersReset => Self::Membership(MembershipChange::Reset),
            StreamPacket::Server_SessionStarted { user_id, token, content_id } => Self::SessionStarted {
                user_id,
                info: SessionInfo::new(token, content_id)
            },
            StreamPacket::Server_SessionEnded { user_id, token } => Self::SessionEnded { user_id, token },
            StreamPacket::Server_SpectatorFrames { user_id, token, frames } => Self::Frames { user_id, token, frames },
        }
    }
}
impl From<StreamEvent> for StreamPacket {
    fn from(event: StreamEvent) -> Self {
        match event {
            StreamEvent::Membership(MembershipChange::Added(user_ids)) => Self::Server_PlayingUsersAdded { user_ids },
            StreamEvent::Membership(MembershipChange::Removed(user_ids)) => Self::Server_PlayingUsersRemoved { user_ids },
            StreamEvent::Membership(MembershipChange::Reset) => Self::Server_PlayingUsersReset,
            StreamEvent::SessionStarted { user_id, info } => Self::Server_SessionStarted {
                user_id,
                token: info.token,
                content_id: info.content_id
            },
            StreamEvent::SessionEnded { user_id, token } => Self::Server_SessionEnded { user_id, token },
            StreamEvent::Frames { user_id, token, frames } => Self::Server_SpectatorFrames { user_id, token, frames },
        }
    }
}

/// pack events into a single message
pub fn encode_events(events: impl IntoIterator<Item = StreamEvent>) -> Vec<u8> {
    let mut writer = SerializationWriter::new();
    for event in events {
        writer.write(&StreamPacket::from(event));
    }
    writer.data()
}

/// read every packet in a message. if any of it is malformed, none of it is used
pub fn decode_message(data: Vec<u8>) -> SerializationResult<Vec<StreamEvent>> {
    let mut reader = SerializationReader::new(data);
    let mut events = Vec::new();

    while reader.can_read() {
        let packet: StreamPacket = reader.read("packet")?;
        events.push(packet.into());
    }

    Ok(events)
}
