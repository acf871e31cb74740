pub type UserId = u32;

/// display identity of a user, as returned by a user lookup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OnlineUser {
    pub user_id: UserId,
    pub username: String,
}
impl OnlineUser {
    pub fn new(user_id: UserId, username: impl ToString) -> Self {
        Self {
            user_id,
            username: username.to_string(),
        }
    }
}
