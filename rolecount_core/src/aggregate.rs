use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::model::{GuildSnapshot, Member, MemberId, RoleId};
use crate::resolve::{resolve, ResolutionPolicy};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Never credited as an effective role. `None` ignores nothing.
    pub ignored_role: Option<RoleId>,
    /// Required for a member to count as verified. `None` treats every member as verified.
    pub verified_role: Option<RoleId>,
    pub policy: ResolutionPolicy,
}

/// Share of the non-bot member total. Always finite; zero when there are no members.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    pub fn of(part: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0.0);
        }

        Self(part as f64 / total as f64 * 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleCount {
    pub role: RoleId,
    pub name: String,
    pub count: usize,
    pub percentage: Percentage,
}

/// Non-fatal conditions noticed during a pass. None of them abort it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    #[error("The snapshot contains no non-bot members")]
    EmptyMemberSet,

    #[error("Tracked role {0} does not exist in the guild")]
    UnknownTrackedRole(RoleId),

    /// Resolved with the lowest-role-id tie-break
    #[error("Member {member} holds more than one role at position {position}")]
    AmbiguousHighestRole { member: MemberId, position: i32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationResult {
    pub total_members: usize,
    pub verified_members: usize,
    pub unverified_members: usize,
    /// One entry per known tracked role, in the order the roles were requested.
    pub per_role: Vec<RoleCount>,
    /// Verified members whose effective role is not tracked, or who have none.
    pub unaccounted_members: usize,
    pub conditions: Vec<Condition>,
}

impl AggregationResult {
    pub fn verified_percentage(&self) -> Percentage {
        Percentage::of(self.verified_members, self.total_members)
    }

    pub fn unverified_percentage(&self) -> Percentage {
        Percentage::of(self.unverified_members, self.total_members)
    }

    pub fn unaccounted_percentage(&self) -> Percentage {
        Percentage::of(self.unaccounted_members, self.total_members)
    }

    pub fn attributed_members(&self) -> usize {
        self.per_role.iter().map(|entry| entry.count).sum()
    }

    pub fn count_for(&self, role: RoleId) -> Option<&RoleCount> {
        self.per_role.iter().find(|entry| entry.role == role)
    }

    pub fn skipped_roles(&self) -> impl Iterator<Item = RoleId> + '_ {
        self.conditions.iter().filter_map(|condition| match condition {
            Condition::UnknownTrackedRole(role) => Some(*role),
            _ => None,
        })
    }

    /// `unverified + attributed + unaccounted == total`
    pub fn reconciles(&self) -> bool {
        self.unverified_members + self.attributed_members() + self.unaccounted_members
            == self.total_members
    }
}

fn is_verified(member: &Member, verified_role: Option<RoleId>) -> bool {
    match verified_role {
        Some(role) => member.has_role(role),
        None => true,
    }
}

/// Counts the snapshot's non-bot members in total, by verification status and per tracked role.
///
/// Only verified members are credited to a tracked role, and only through their effective
/// role. A member is claimed by at most one tracked role per call. Tracked roles that do not
/// exist in the snapshot's catalogue are skipped and reported as [`Condition::UnknownTrackedRole`].
pub fn aggregate(
    snapshot: &GuildSnapshot,
    tracked: &[RoleId],
    options: &AggregateOptions,
) -> AggregationResult {
    let mut conditions = Vec::new();
    let mut total = 0;
    let mut unverified = 0;
    let mut by_role: HashMap<RoleId, Vec<MemberId>> = HashMap::new();

    for member in snapshot.members.iter().filter(|member| !member.is_bot) {
        total += 1;

        if !is_verified(member, options.verified_role) {
            unverified += 1;
            continue;
        }

        let resolution = resolve(
            member,
            &snapshot.roles,
            options.ignored_role,
            options.policy,
        );

        let Some(role) = resolution.role else {
            continue;
        };

        if resolution.tied {
            conditions.push(Condition::AmbiguousHighestRole {
                member: member.id,
                position: role.position,
            });
        }

        by_role.entry(role.id).or_default().push(member.id);
    }

    if total == 0 {
        conditions.insert(0, Condition::EmptyMemberSet);
    }

    let mut claimed = HashSet::new();
    let mut per_role = Vec::with_capacity(tracked.len());

    for &role_id in tracked {
        let Some(role) = snapshot.roles.get(role_id) else {
            debug!("Skipping tracked role {role_id}: not found in role catalogue");
            conditions.push(Condition::UnknownTrackedRole(role_id));
            continue;
        };

        let count = by_role
            .get(&role_id)
            .map(|members| {
                members
                    .iter()
                    .filter(|member| claimed.insert(**member))
                    .count()
            })
            .unwrap_or(0);

        per_role.push(RoleCount {
            role: role_id,
            name: role.name.clone(),
            count,
            percentage: Percentage::of(count, total),
        });
    }

    let attributed: usize = per_role.iter().map(|entry| entry.count).sum();

    AggregationResult {
        total_members: total,
        verified_members: total - unverified,
        unverified_members: unverified,
        per_role,
        unaccounted_members: total - unverified - attributed,
        conditions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, RoleCatalogue};

    const VERIFIED: u64 = 900;
    const IGNORED: u64 = 901;
    const ROLE_X: u64 = 1;
    const ROLE_Y: u64 = 2;
    const ROLE_Z: u64 = 3;

    fn catalogue() -> RoleCatalogue {
        RoleCatalogue::new([
            Role::new(VERIFIED, "Verified", 1),
            Role::new(IGNORED, "Booster", 50),
            Role::new(ROLE_X, "Holder", 10),
            Role::new(ROLE_Y, "Whale", 20),
            Role::new(ROLE_Z, "Moderator", 30),
        ])
    }

    fn options() -> AggregateOptions {
        AggregateOptions {
            ignored_role: Some(RoleId(IGNORED)),
            verified_role: Some(RoleId(VERIFIED)),
            policy: ResolutionPolicy::STRICT,
        }
    }

    #[test]
    fn counts_example_scenario() {
        // Arrange
        let snapshot = GuildSnapshot::new(
            vec![
                Member::new(1, [VERIFIED, ROLE_X]),
                Member::new(2, [VERIFIED, IGNORED, ROLE_Y]),
                Member::new(3, [ROLE_X]).bot(true),
            ],
            catalogue(),
        );

        // Act
        let result = aggregate(&snapshot, &[RoleId(ROLE_X), RoleId(ROLE_Y)], &options());

        // Assert
        assert_eq!(result.total_members, 2);
        assert_eq!(result.unverified_members, 0);
        assert_eq!(result.per_role.len(), 2);
        assert_eq!(result.per_role[0].role, RoleId(ROLE_X));
        assert_eq!(result.per_role[0].count, 1);
        assert_eq!(result.per_role[0].percentage.value(), 50.0);
        assert_eq!(result.per_role[1].role, RoleId(ROLE_Y));
        assert_eq!(result.per_role[1].count, 1);
        assert_eq!(result.per_role[1].percentage.to_string(), "50.00%");
        assert!(result.conditions.is_empty());
        assert!(result.reconciles());
    }

    #[test]
    fn unverified_members_only_count_in_unverified_bucket() {
        let snapshot = GuildSnapshot::new(
            vec![
                Member::new(1, [ROLE_X]),
                Member::new(2, [VERIFIED, ROLE_X]),
                Member::new(3, []),
            ],
            catalogue(),
        );

        let result = aggregate(&snapshot, &[RoleId(ROLE_X)], &options());

        assert_eq!(result.total_members, 3);
        assert_eq!(result.verified_members, 1);
        assert_eq!(result.unverified_members, 2);
        assert_eq!(result.per_role[0].count, 1);
        assert_eq!(result.unaccounted_members, 0);
        assert_eq!(result.unverified_percentage().to_string(), "66.67%");
        assert!(result.reconciles());
    }

    #[test]
    fn missing_verified_role_treats_everyone_as_verified() {
        let snapshot = GuildSnapshot::new(vec![Member::new(1, [ROLE_X])], catalogue());
        let options = AggregateOptions {
            verified_role: None,
            ..options()
        };

        let result = aggregate(&snapshot, &[RoleId(ROLE_X)], &options);

        assert_eq!(result.unverified_members, 0);
        assert_eq!(result.per_role[0].count, 1);
    }

    #[test]
    fn member_is_credited_only_to_effective_role() {
        let snapshot = GuildSnapshot::new(
            vec![Member::new(1, [VERIFIED, ROLE_X, ROLE_Y, ROLE_Z])],
            catalogue(),
        );
        let tracked = [RoleId(ROLE_X), RoleId(ROLE_Y), RoleId(ROLE_Z)];

        let result = aggregate(&snapshot, &tracked, &options());

        let counts: Vec<_> = result.per_role.iter().map(|entry| entry.count).collect();
        assert_eq!(counts, vec![0, 0, 1]);
        assert_eq!(result.attributed_members(), 1);
    }

    #[test]
    fn repeated_tracked_role_cannot_claim_twice() {
        let snapshot = GuildSnapshot::new(
            vec![
                Member::new(1, [VERIFIED, ROLE_X]),
                Member::new(2, [VERIFIED, ROLE_X]),
            ],
            catalogue(),
        );

        let result = aggregate(&snapshot, &[RoleId(ROLE_X), RoleId(ROLE_X)], &options());

        assert_eq!(result.per_role[0].count, 2);
        assert_eq!(result.per_role[1].count, 0);
        assert!(result.reconciles());
    }

    #[test]
    fn untracked_effective_roles_are_unaccounted() {
        let snapshot = GuildSnapshot::new(
            vec![
                Member::new(1, [VERIFIED, ROLE_Z]),
                Member::new(2, [VERIFIED, ROLE_X]),
                Member::new(3, [VERIFIED]),
            ],
            catalogue(),
        );

        let result = aggregate(&snapshot, &[RoleId(ROLE_X)], &options());

        assert_eq!(result.attributed_members(), 1);
        assert_eq!(result.unaccounted_members, 2);
        assert!(result.attributed_members() + result.unverified_members < result.total_members);
        assert!(result.reconciles());
    }

    #[test]
    fn unknown_tracked_role_is_skipped() {
        let snapshot = GuildSnapshot::new(vec![Member::new(1, [VERIFIED, ROLE_X])], catalogue());

        let result = aggregate(&snapshot, &[RoleId(777), RoleId(ROLE_X)], &options());

        assert_eq!(result.per_role.len(), 1);
        assert_eq!(result.per_role[0].role, RoleId(ROLE_X));
        assert!(result.count_for(RoleId(777)).is_none());
        assert_eq!(result.skipped_roles().collect::<Vec<_>>(), vec![RoleId(777)]);
        assert!(result.reconciles());
    }

    #[test]
    fn empty_member_set_yields_zero_percentages() {
        let snapshot = GuildSnapshot::new(vec![Member::new(1, [ROLE_X]).bot(true)], catalogue());

        let result = aggregate(&snapshot, &[RoleId(ROLE_X), RoleId(ROLE_Y)], &options());

        assert_eq!(result.total_members, 0);
        assert_eq!(result.conditions, vec![Condition::EmptyMemberSet]);
        for entry in &result.per_role {
            assert_eq!(entry.count, 0);
            assert_eq!(entry.percentage.value(), 0.0);
        }
        assert_eq!(result.verified_percentage().value(), 0.0);
        assert_eq!(result.unverified_percentage().to_string(), "0.00%");
        assert!(result.reconciles());
    }

    #[test]
    fn tied_highest_role_is_reported() {
        let catalogue = RoleCatalogue::new([
            Role::new(VERIFIED, "Verified", 1),
            Role::new(ROLE_X, "Left", 10),
            Role::new(ROLE_Y, "Right", 10),
        ]);
        let snapshot =
            GuildSnapshot::new(vec![Member::new(7, [VERIFIED, ROLE_Y, ROLE_X])], catalogue);

        let result = aggregate(&snapshot, &[RoleId(ROLE_X), RoleId(ROLE_Y)], &options());

        assert_eq!(result.per_role[0].count, 1);
        assert_eq!(result.per_role[1].count, 0);
        assert_eq!(
            result.conditions,
            vec![Condition::AmbiguousHighestRole {
                member: MemberId(7),
                position: 10,
            }]
        );
    }

    #[test]
    fn aggregation_is_deterministic() {
        let snapshot = GuildSnapshot::new(
            (0..50)
                .map(|id| match id % 4 {
                    0 => Member::new(id, [VERIFIED, ROLE_X]),
                    1 => Member::new(id, [VERIFIED, IGNORED, ROLE_Y]),
                    2 => Member::new(id, [ROLE_Z]),
                    _ => Member::new(id, [VERIFIED, ROLE_Z]).bot(true),
                })
                .collect(),
            catalogue(),
        );
        let tracked = [RoleId(ROLE_Y), RoleId(ROLE_X), RoleId(404)];

        let first = aggregate(&snapshot, &tracked, &options());
        let second = aggregate(&snapshot, &tracked, &options());

        assert_eq!(first, second);
        assert!(first.reconciles());
    }
}
