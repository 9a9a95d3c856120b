use super::{ProjectRoster, Role, UserId};

/// Identity of the caller for the duration of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: UserId,
}

impl RequestContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn role_in(&self, roster: &ProjectRoster) -> Option<Role> {
        roster.role_of(&self.user_id)
    }
}
