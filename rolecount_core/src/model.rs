use std::collections::HashMap;
use std::fmt;

/// Opaque role identifier as handed out by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(pub u64);

/// Opaque member (user) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub u64);

impl RoleId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl MemberId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Higher is more senior.
    pub position: i32,
    /// Assigned by the platform itself, e.g. integration roles of bots.
    pub managed: bool,
}

impl Role {
    pub fn new(id: u64, name: impl Into<String>, position: i32) -> Self {
        Self {
            id: RoleId(id),
            name: name.into(),
            position,
            managed: false,
        }
    }

    pub fn managed(mut self, managed: bool) -> Self {
        self.managed = managed;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub is_bot: bool,
    pub roles: Vec<RoleId>,
}

impl Member {
    pub fn new(id: u64, roles: impl IntoIterator<Item = u64>) -> Self {
        Self {
            id: MemberId(id),
            is_bot: false,
            roles: roles.into_iter().map(RoleId).collect(),
        }
    }

    pub fn bot(mut self, is_bot: bool) -> Self {
        self.is_bot = is_bot;
        self
    }

    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }
}

/// Every role that exists in the guild, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleCatalogue {
    roles: HashMap<RoleId, Role>,
}

impl RoleCatalogue {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        roles.into_iter().collect()
    }

    pub fn get(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }

    pub fn contains(&self, id: RoleId) -> bool {
        self.roles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl FromIterator<Role> for RoleCatalogue {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self {
            roles: iter.into_iter().map(|role| (role.id, role)).collect(),
        }
    }
}

/// Read-only view of the guild's members and roles, taken at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildSnapshot {
    pub members: Vec<Member>,
    pub roles: RoleCatalogue,
}

impl GuildSnapshot {
    pub fn new(members: Vec<Member>, roles: RoleCatalogue) -> Self {
        Self { members, roles }
    }
}
