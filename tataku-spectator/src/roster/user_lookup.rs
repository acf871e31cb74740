use crate::prelude::*;
use std::future::Future;

/// resolves a user id into something we can show.
///
/// completions may come back late, twice, or for users who are long gone,
/// the roster deals with all of that.
pub trait UserLookup: Send + Sync + 'static {
    /// None if the user couldn't be found
    fn lookup(&self, user_id: UserId) -> impl Future<Output = Option<OnlineUser>> + Send;
}

/// user id that [`TestUserLookup`] can never find
pub const UNKNOWN_TEST_USER: UserId = 13;

const TEST_USERNAMES: [&str; 16] = [
    "fieryrage",
    "Kerensa",
    "MillhioreF",
    "Player01",
    "smoogipoo",
    "Ephemeral",
    "BTMC",
    "Cilvery",
    "m980",
    "HappyStick",
    "LittleEndu",
    "frenzibyte",
    "Zallius",
    "BanchoBot",
    "rocketminer210",
    "pishifat",
];

/// offline lookup for tests and the simulator. knows everyone except [`UNKNOWN_TEST_USER`]
#[derive(Copy, Clone, Debug, Default)]
pub struct TestUserLookup;
impl TestUserLookup {
    pub fn username(user_id: UserId) -> Option<&'static str> {
        if user_id == UNKNOWN_TEST_USER { return None }
        Some(TEST_USERNAMES[user_id as usize % TEST_USERNAMES.len()])
    }
}
impl UserLookup for TestUserLookup {
    async fn lookup(&self, user_id: UserId) -> Option<OnlineUser> {
        Self::username(user_id).map(|name| OnlineUser::new(user_id, name))
    }
}
