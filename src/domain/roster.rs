use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Role, RosterError, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub role: Role,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}

impl ProjectMember {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Add,
    Remove,
    Update,
}

/// One entry of a bulk team change. `role` is required for `add` and
/// `update` and ignored for `remove`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberChangeOperation {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub operation: OperationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl MemberChangeOperation {
    pub fn add(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            operation: OperationKind::Add,
            role: Some(role),
        }
    }

    pub fn remove(user_id: UserId) -> Self {
        Self {
            user_id,
            operation: OperationKind::Remove,
            role: None,
        }
    }

    pub fn update(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            operation: OperationKind::Update,
            role: Some(role),
        }
    }

    fn required_role(&self) -> Result<Role, RosterError> {
        self.role.ok_or_else(|| {
            RosterError::InvalidOperation(format!(
                "a role is required to {} user {}",
                match self.operation {
                    OperationKind::Add => "add",
                    _ => "update",
                },
                self.user_id
            ))
        })
    }
}

/// Ordered project team, unique by user.
///
/// Every operation is pure: it borrows the current roster and returns a new
/// one, so a rejected change can never leave a half-applied team behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectRoster {
    members: Vec<ProjectMember>,
}

impl ProjectRoster {
    pub fn new(members: Vec<ProjectMember>) -> Result<Self, RosterError> {
        let mut roster = Self::default();
        for member in members {
            if roster.contains(&member.user_id) {
                return Err(RosterError::DuplicateMember(member.user_id));
            }
            roster.members.push(member);
        }
        Ok(roster)
    }

    pub fn members(&self) -> &[ProjectMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.position(user_id).is_some()
    }

    pub fn get(&self, user_id: &UserId) -> Option<&ProjectMember> {
        self.members.iter().find(|m| &m.user_id == user_id)
    }

    pub fn role_of(&self, user_id: &UserId) -> Option<Role> {
        self.get(user_id).map(|m| m.role)
    }

    pub fn product_owner_count(&self) -> usize {
        self.count_where(|role| *role == Role::ProductOwner)
    }

    pub fn scrum_role_count(&self) -> usize {
        self.count_where(Role::counts_as_scrum_role)
    }

    pub fn developer_count(&self) -> usize {
        self.count_where(Role::counts_as_developer_role)
    }

    fn position(&self, user_id: &UserId) -> Option<usize> {
        self.members.iter().position(|m| &m.user_id == user_id)
    }

    fn count_where(&self, predicate: impl Fn(&Role) -> bool) -> usize {
        self.members.iter().filter(|m| predicate(&m.role)).count()
    }

    fn others_where(
        &self,
        user_id: &UserId,
        predicate: impl Fn(&Role) -> bool,
    ) -> usize {
        self.members
            .iter()
            .filter(|m| &m.user_id != user_id && predicate(&m.role))
            .count()
    }

    pub fn add_member(
        &self,
        user_id: UserId,
        role: Role,
    ) -> Result<Self, RosterError> {
        if self.contains(&user_id) {
            return Err(RosterError::DuplicateMember(user_id));
        }
        if role == Role::ProductOwner && self.product_owner_count() > 0 {
            return Err(product_owner_taken());
        }
        if role.counts_as_scrum_role() && self.scrum_role_count() > 0 {
            return Err(scrum_role_taken());
        }

        let mut next = self.clone();
        next.members.push(ProjectMember::new(user_id, role));
        Ok(next)
    }

    pub fn remove_member(&self, user_id: &UserId) -> Result<Self, RosterError> {
        let index = self
            .position(user_id)
            .ok_or(RosterError::NotFound(*user_id))?;
        let role = self.members[index].role;

        if self.len() == 1 {
            return Err(RosterError::LastMemberViolation(
                "The last member of a project cannot be removed".to_string(),
            ));
        }
        if role == Role::ProductOwner {
            return Err(RosterError::ProductOwnerRequired(
                "The Product Owner cannot be removed, assign a new Product Owner first"
                    .to_string(),
            ));
        }
        if role.counts_as_scrum_role() && self.scrum_role_count() <= 1 {
            return Err(RosterError::ScrumRoleRequired(
                "The only Scrum Master cannot be removed, assign a new Scrum Master first"
                    .to_string(),
            ));
        }
        if role.counts_as_developer_role() && self.developer_count() <= 1 {
            return Err(developer_required());
        }

        let mut next = self.clone();
        next.members.remove(index);
        Ok(next)
    }

    pub fn update_member_role(
        &self,
        user_id: &UserId,
        new_role: Role,
    ) -> Result<Self, RosterError> {
        let index = self
            .position(user_id)
            .ok_or(RosterError::NotFound(*user_id))?;
        let current = self.members[index].role;

        if current == new_role {
            return Ok(self.clone());
        }
        if current == Role::ProductOwner
            && self.others_where(user_id, |r| *r == Role::ProductOwner) == 0
        {
            return Err(RosterError::ProductOwnerRequired(
                "The Product Owner cannot change role, assign a new Product Owner first"
                    .to_string(),
            ));
        }
        if new_role == Role::ProductOwner
            && self.others_where(user_id, |r| *r == Role::ProductOwner) > 0
        {
            return Err(product_owner_taken());
        }
        if new_role.counts_as_scrum_role()
            && !current.counts_as_scrum_role()
            && self.others_where(user_id, Role::counts_as_scrum_role) > 0
        {
            return Err(scrum_role_taken());
        }
        if current.counts_as_scrum_role()
            && !new_role.counts_as_scrum_role()
            && self.others_where(user_id, Role::counts_as_scrum_role) == 0
        {
            return Err(RosterError::ScrumRoleRequired(
                "The only Scrum Master cannot change role, assign a new Scrum Master first"
                    .to_string(),
            ));
        }
        if current.counts_as_developer_role()
            && !new_role.counts_as_developer_role()
            && self.developer_count() <= 1
        {
            return Err(developer_required());
        }

        let mut next = self.clone();
        next.members[index].role = new_role;
        Ok(next)
    }

    /// Applies a whole batch to a working copy and validates only the final
    /// team. Intermediate states may break the role rules, which is what
    /// allows swapping the Product Owner or Scrum Master in one request.
    pub fn apply_bulk(
        &self,
        operations: &[MemberChangeOperation],
    ) -> Result<Self, RosterError> {
        let mut working = self.clone();

        for op in operations {
            match op.operation {
                OperationKind::Add => {
                    let role = op.required_role()?;
                    if working.contains(&op.user_id) {
                        return Err(RosterError::DuplicateMember(op.user_id));
                    }
                    working.members.push(ProjectMember::new(op.user_id, role));
                }
                OperationKind::Remove => {
                    let index = working
                        .position(&op.user_id)
                        .ok_or(RosterError::NotFound(op.user_id))?;
                    working.members.remove(index);
                }
                OperationKind::Update => {
                    let role = op.required_role()?;
                    let index = working
                        .position(&op.user_id)
                        .ok_or(RosterError::NotFound(op.user_id))?;
                    working.members[index].role = role;
                }
            }
        }

        working.validate()?;
        Ok(working)
    }

    /// Checks the four team rules in a fixed order and reports the first one
    /// that does not hold.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.is_empty() {
            return Err(RosterError::LastMemberViolation(
                "A project must have at least one member".to_string(),
            ));
        }
        match self.product_owner_count() {
            0 => {
                return Err(RosterError::ProductOwnerRequired(
                    "A project must have exactly one Product Owner".to_string(),
                ))
            }
            1 => (),
            _ => {
                return Err(RosterError::RoleConflict(
                    "A project can only have one Product Owner".to_string(),
                ))
            }
        }
        match self.scrum_role_count() {
            0 => {
                return Err(RosterError::ScrumRoleRequired(
                    "A project must have a Scrum Master or Scrum Dev"
                        .to_string(),
                ))
            }
            1 => (),
            _ => {
                return Err(RosterError::RoleConflict(
                    "A project can only have one Scrum Master or Scrum Dev"
                        .to_string(),
                ))
            }
        }
        if self.developer_count() == 0 {
            return Err(developer_required());
        }
        Ok(())
    }
}

fn product_owner_taken() -> RosterError {
    RosterError::RoleConflict(
        "This project already has a Product Owner".to_string(),
    )
}

fn scrum_role_taken() -> RosterError {
    RosterError::RoleConflict(
        "This project already has a Scrum Master or Scrum Dev".to_string(),
    )
}

fn developer_required() -> RosterError {
    RosterError::DeveloperRequired(
        "A project must keep at least one Developer or Scrum Dev".to_string(),
    )
}
