use std::cmp::Ordering;

use crate::model::{Member, Role, RoleCatalogue, RoleId};

/// Which roles are stepped over when looking for a member's effective role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// Fall through the ignored role when it is the member's highest role.
    pub skip_ignored: bool,
    /// While falling through, also step over platform-managed roles.
    pub skip_managed: bool,
}

impl ResolutionPolicy {
    pub const LENIENT: Self = Self {
        skip_ignored: true,
        skip_managed: false,
    };

    pub const STRICT: Self = Self {
        skip_ignored: true,
        skip_managed: true,
    };
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Outcome of a resolution, including whether the winner shared its position with another role.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolution<'a> {
    pub role: Option<&'a Role>,
    pub tied: bool,
}

/// Returns the single role that represents `member` for counting purposes.
///
/// The member's highest role by position wins, ties going to the lowest role id.
/// When that role is `ignored`, the highest of the remaining roles is used instead.
/// Role ids missing from `catalogue` are disregarded.
pub fn resolve_effective_role(
    member: &Member,
    catalogue: &RoleCatalogue,
    ignored: Option<RoleId>,
    policy: ResolutionPolicy,
) -> Option<RoleId> {
    resolve(member, catalogue, ignored, policy)
        .role
        .map(|role| role.id)
}

pub(crate) fn resolve<'a>(
    member: &'a Member,
    catalogue: &'a RoleCatalogue,
    ignored: Option<RoleId>,
    policy: ResolutionPolicy,
) -> Resolution<'a> {
    let top = highest(held_roles(member, catalogue));

    let ignored = match ignored {
        Some(ignored) if policy.skip_ignored => ignored,
        _ => return top,
    };

    match top.role {
        Some(role) if role.id == ignored => highest(
            held_roles(member, catalogue)
                .filter(|role| role.id != ignored && !(policy.skip_managed && role.managed)),
        ),
        _ => top,
    }
}

fn held_roles<'a>(
    member: &'a Member,
    catalogue: &'a RoleCatalogue,
) -> impl Iterator<Item = &'a Role> + 'a {
    member.roles.iter().filter_map(|id| catalogue.get(*id))
}

fn highest<'a>(roles: impl Iterator<Item = &'a Role>) -> Resolution<'a> {
    let mut best: Option<&Role> = None;
    let mut tied = false;

    for role in roles {
        let Some(current) = best else {
            best = Some(role);
            continue;
        };

        match role.position.cmp(&current.position) {
            Ordering::Greater => {
                best = Some(role);
                tied = false;
            }
            Ordering::Equal if role.id != current.id => {
                tied = true;
                if role.id < current.id {
                    best = Some(role);
                }
            }
            _ => {}
        }
    }

    Resolution { role: best, tied }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IGNORED: u64 = 10;

    fn catalogue() -> RoleCatalogue {
        RoleCatalogue::new([
            Role::new(1, "A", 5),
            Role::new(IGNORED, "Ignored", 10),
            Role::new(2, "B", 3),
            Role::new(3, "Integration", 7).managed(true),
            Role::new(4, "Twin low", 4),
            Role::new(5, "Twin high", 4),
        ])
    }

    fn resolve_for(roles: &[u64], policy: ResolutionPolicy) -> Option<RoleId> {
        let member = Member::new(100, roles.iter().copied());
        resolve_effective_role(&member, &catalogue(), Some(RoleId(IGNORED)), policy)
    }

    #[test]
    fn member_without_roles_has_no_effective_role() {
        assert_eq!(resolve_for(&[], ResolutionPolicy::STRICT), None);
    }

    #[test]
    fn highest_position_wins_regardless_of_order() {
        assert_eq!(resolve_for(&[2, 1], ResolutionPolicy::STRICT), Some(RoleId(1)));
        assert_eq!(resolve_for(&[1, 2], ResolutionPolicy::STRICT), Some(RoleId(1)));
    }

    #[test]
    fn ignored_role_falls_through_to_next_highest() {
        assert_eq!(
            resolve_for(&[1, IGNORED, 2], ResolutionPolicy::STRICT),
            Some(RoleId(1))
        );
    }

    #[test]
    fn ignored_role_alone_resolves_to_none() {
        assert_eq!(resolve_for(&[IGNORED], ResolutionPolicy::STRICT), None);
        assert_eq!(resolve_for(&[IGNORED], ResolutionPolicy::LENIENT), None);
    }

    #[test]
    fn strict_policy_steps_over_managed_roles_after_ignored() {
        assert_eq!(
            resolve_for(&[IGNORED, 3, 2], ResolutionPolicy::STRICT),
            Some(RoleId(2))
        );
        assert_eq!(
            resolve_for(&[IGNORED, 3, 2], ResolutionPolicy::LENIENT),
            Some(RoleId(3))
        );
    }

    #[test]
    fn managed_role_counts_when_it_is_the_nominal_highest() {
        assert_eq!(resolve_for(&[3, 2], ResolutionPolicy::STRICT), Some(RoleId(3)));
    }

    #[test]
    fn unset_ignored_role_never_matches() {
        let member = Member::new(100, [IGNORED, 1]);
        let resolved =
            resolve_effective_role(&member, &catalogue(), None, ResolutionPolicy::STRICT);

        assert_eq!(resolved, Some(RoleId(IGNORED)));
    }

    #[test]
    fn disabled_skip_ignored_credits_the_ignored_role() {
        let policy = ResolutionPolicy {
            skip_ignored: false,
            skip_managed: true,
        };

        assert_eq!(resolve_for(&[IGNORED, 1], policy), Some(RoleId(IGNORED)));
    }

    #[test]
    fn tie_goes_to_lowest_role_id_and_is_reported() {
        let catalogue = catalogue();

        for roles in [[5, 4], [4, 5]] {
            let member = Member::new(100, roles);
            let resolution = resolve(&member, &catalogue, None, ResolutionPolicy::STRICT);

            assert_eq!(resolution.role.map(|role| role.id), Some(RoleId(4)));
            assert!(resolution.tied);
        }
    }

    #[test]
    fn roles_missing_from_catalogue_are_disregarded() {
        assert_eq!(resolve_for(&[999, 2], ResolutionPolicy::STRICT), Some(RoleId(2)));
        assert_eq!(resolve_for(&[999], ResolutionPolicy::STRICT), None);
    }
}
