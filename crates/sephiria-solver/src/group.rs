//! Classification of the flat item pool into placement groups.
//!
//! Rules run in a fixed order and each removes the items it claims from the
//! pool:
//!
//! 1. every hourglass takes the next free spellbook ([`GroupKind::PairedEffect`]);
//! 2. every devotion badge takes up to five devoted units ([`GroupKind::RowCluster`]);
//! 3. every line tablet becomes its own group ([`GroupKind::PriorityTablet`]);
//! 4. everything left becomes a [`GroupKind::Single`].
//!
//! Groups are then stably sorted by priority, highest first.

use sephiria_core::{ArtifactFlags, GRID_WIDTH, Item, ItemId, Tablet};
use tinyvec::ArrayVec;

/// Priority of an hourglass and spellbook pair.
pub const PAIRED_EFFECT_PRIORITY: u8 = 100;
/// Priority of a devotion badge row.
pub const ROW_CLUSTER_PRIORITY: u8 = 90;
/// Priority of a line tablet.
pub const PRIORITY_TABLET_PRIORITY: u8 = 50;
/// Priority of an ordinary single item.
pub const SINGLE_PRIORITY: u8 = 10;

/// Members of a group; a group never spans more than one grid row.
pub type GroupMembers = ArrayVec<[ItemId; GRID_WIDTH]>;

/// How a group is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum GroupKind {
    /// An hourglass followed by the spellbook it affects, side by side.
    #[display("paired effect")]
    PairedEffect,
    /// A devotion badge followed by its units, in one row.
    #[display("row cluster")]
    RowCluster,
    /// A tablet with line-shaped or UNLOCK directions.
    #[display("priority tablet")]
    PriorityTablet,
    /// Any other single item.
    #[display("single")]
    Single,
}

/// A set of items that must be placed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    kind: GroupKind,
    members: GroupMembers,
    priority: u8,
}

impl Group {
    fn new(kind: GroupKind, members: GroupMembers, priority: u8) -> Self {
        debug_assert!(!members.is_empty());
        Self {
            kind,
            members,
            priority,
        }
    }

    fn single(kind: GroupKind, id: ItemId, priority: u8) -> Self {
        let mut members = GroupMembers::new();
        members.push(id);
        Self::new(kind, members, priority)
    }

    /// Returns the placement kind.
    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Returns the members in placement order.
    #[must_use]
    pub fn members(&self) -> &[ItemId] {
        &self.members
    }

    /// Returns the processing priority; higher goes first.
    #[must_use]
    pub fn priority(&self) -> u8 {
        self.priority
    }
}

/// Partitions `items` into groups, highest priority first.
///
/// Equal priorities keep the order in which the rules produced them, so the
/// result only depends on the order of `items`.
///
/// # Examples
///
/// ```
/// use sephiria_core::{Artifact, ArtifactFlags, Item};
/// use sephiria_solver::{GroupKind, classify};
///
/// let items: Vec<Item> = vec![
///     Artifact::new("Tome", 3).with_flags(ArtifactFlags::SPELL).into(),
///     Artifact::new("Shining Hourglass", 3).with_flags(ArtifactFlags::HOURGLASS).into(),
///     Artifact::new("Ring", 3).into(),
/// ];
/// let groups = classify(&items);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].kind(), GroupKind::PairedEffect);
/// assert_eq!(groups[0].members()[0].index(), 1);
/// ```
#[must_use]
pub fn classify(items: &[Item]) -> Vec<Group> {
    let mut pool: Vec<ItemId> = (0..items.len()).map(ItemId::new).collect();
    let mut groups = Vec::new();

    take_paired_effects(items, &mut pool, &mut groups);
    take_row_clusters(items, &mut pool, &mut groups);
    take_singles(items, &pool, &mut groups);

    groups.sort_by(|a, b| b.priority.cmp(&a.priority));
    log::debug!(
        "classified {} item(s) into {} group(s)",
        items.len(),
        groups.len()
    );
    groups
}

fn has_flags(items: &[Item], id: ItemId, flags: ArtifactFlags) -> bool {
    items[id.index()]
        .as_artifact()
        .is_some_and(|artifact| artifact.flags.contains(flags))
}

fn take_paired_effects(items: &[Item], pool: &mut Vec<ItemId>, groups: &mut Vec<Group>) {
    let hourglasses: Vec<ItemId> = pool
        .iter()
        .copied()
        .filter(|&id| has_flags(items, id, ArtifactFlags::HOURGLASS))
        .collect();

    for hourglass in hourglasses {
        // Already claimed as the spell of an earlier hourglass.
        if !pool.contains(&hourglass) {
            continue;
        }
        let Some(spell) = pool
            .iter()
            .copied()
            .find(|&id| id != hourglass && has_flags(items, id, ArtifactFlags::SPELL))
        else {
            continue;
        };

        pool.retain(|&id| id != hourglass && id != spell);
        let members = [hourglass, spell].into_iter().collect();
        groups.push(Group::new(
            GroupKind::PairedEffect,
            members,
            PAIRED_EFFECT_PRIORITY,
        ));
    }
}

fn take_row_clusters(items: &[Item], pool: &mut Vec<ItemId>, groups: &mut Vec<Group>) {
    let badges: Vec<ItemId> = pool
        .iter()
        .copied()
        .filter(|id| {
            items[id.index()]
                .as_artifact()
                .is_some_and(sephiria_core::Artifact::is_devotion_badge)
        })
        .collect();

    for badge in badges {
        // Already claimed as a unit of an earlier badge.
        if !pool.contains(&badge) {
            continue;
        }
        let units: Vec<ItemId> = pool
            .iter()
            .copied()
            .filter(|&id| id != badge && has_flags(items, id, ArtifactFlags::DEVOTION))
            .take(GRID_WIDTH - 1)
            .collect();
        if units.is_empty() {
            continue;
        }

        pool.retain(|id| *id != badge && !units.contains(id));
        let members = std::iter::once(badge).chain(units).collect();
        groups.push(Group::new(
            GroupKind::RowCluster,
            members,
            ROW_CLUSTER_PRIORITY,
        ));
    }
}

fn take_singles(items: &[Item], pool: &[ItemId], groups: &mut Vec<Group>) {
    let (line_tablets, others): (Vec<ItemId>, Vec<ItemId>) = pool.iter().partition(|id| {
        items[id.index()]
            .as_tablet()
            .is_some_and(Tablet::is_line_tablet)
    });

    for id in line_tablets {
        groups.push(Group::single(
            GroupKind::PriorityTablet,
            id,
            PRIORITY_TABLET_PRIORITY,
        ));
    }
    for id in others {
        groups.push(Group::single(
            GroupKind::Single,
            id,
            single_priority(&items[id.index()]),
        ));
    }
}

/// Each check overwrites the previous one; the last matching rule wins.
fn single_priority(item: &Item) -> u8 {
    let Some(artifact) = item.as_artifact() else {
        return SINGLE_PRIORITY;
    };
    let mut priority = SINGLE_PRIORITY;
    if artifact.priority {
        priority = 30;
    }
    if artifact.is_chalcedony_key() {
        priority = 40;
    }
    if artifact.has_harmony() {
        priority = 35;
    }
    if artifact.scale_position.is_some() {
        priority = 40;
    }
    priority
}

#[cfg(test)]
mod tests {
    use sephiria_core::{CHALCEDONY_KEY, DEVOTION_BADGE, HARMONY_TAG, Keyword, ScaleSide};

    use super::*;
    use crate::testing::{artifact, line_tablet, offset_tablet};

    fn ids(group: &Group) -> Vec<usize> {
        group.members().iter().map(|id| id.index()).collect()
    }

    #[test]
    fn test_empty_pool() {
        assert!(classify(&[]).is_empty());
    }

    #[test]
    fn test_hourglasses_pair_with_spells_in_input_order() {
        let items: Vec<Item> = vec![
            artifact("Tome A").with_flags(ArtifactFlags::SPELL).into(),
            artifact("Hourglass A").with_flags(ArtifactFlags::HOURGLASS).into(),
            artifact("Tome B").with_flags(ArtifactFlags::SPELL).into(),
            artifact("Hourglass B").with_flags(ArtifactFlags::HOURGLASS).into(),
            artifact("Hourglass C").with_flags(ArtifactFlags::HOURGLASS).into(),
        ];
        let groups = classify(&items);
        assert_eq!(groups[0].kind(), GroupKind::PairedEffect);
        assert_eq!(ids(&groups[0]), [1, 0]);
        assert_eq!(ids(&groups[1]), [3, 2]);
        // The unmatched hourglass falls through as a single.
        assert_eq!(groups[2].kind(), GroupKind::Single);
        assert_eq!(ids(&groups[2]), [4]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn test_hourglass_spell_pairs_as_spell() {
        let items: Vec<Item> = vec![
            artifact("Hourglass A").with_flags(ArtifactFlags::HOURGLASS).into(),
            artifact("Hourglass B")
                .with_flags(ArtifactFlags::HOURGLASS | ArtifactFlags::SPELL)
                .into(),
        ];
        let groups = classify(&items);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind(), GroupKind::PairedEffect);
        assert_eq!(ids(&groups[0]), [0, 1]);
    }

    #[test]
    fn test_unmatched_hourglass_spell_waits_for_later_hourglass() {
        let items: Vec<Item> = vec![
            artifact("Hourglass A")
                .with_flags(ArtifactFlags::HOURGLASS | ArtifactFlags::SPELL)
                .into(),
            artifact("Hourglass B").with_flags(ArtifactFlags::HOURGLASS).into(),
        ];
        let groups = classify(&items);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), [1, 0]);
    }

    #[test]
    fn test_paired_spell_is_not_paired_again() {
        let items: Vec<Item> = vec![
            artifact("Hourglass A").with_flags(ArtifactFlags::HOURGLASS).into(),
            artifact("Hourglass B")
                .with_flags(ArtifactFlags::HOURGLASS | ArtifactFlags::SPELL)
                .into(),
            artifact("Tome").with_flags(ArtifactFlags::SPELL).into(),
        ];
        let groups = classify(&items);
        assert_eq!(ids(&groups[0]), [0, 1]);
        assert_eq!(groups[1].kind(), GroupKind::Single);
        assert_eq!(ids(&groups[1]), [2]);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_badge_collects_at_most_five_units() {
        let mut items: Vec<Item> = vec![artifact(DEVOTION_BADGE).into()];
        for i in 0..7 {
            items.push(
                artifact(&format!("Unit {i}"))
                    .with_flags(ArtifactFlags::UNIT | ArtifactFlags::DEVOTION)
                    .into(),
            );
        }
        let groups = classify(&items);
        assert_eq!(groups[0].kind(), GroupKind::RowCluster);
        assert_eq!(groups[0].priority(), ROW_CLUSTER_PRIORITY);
        assert_eq!(ids(&groups[0]), [0, 1, 2, 3, 4, 5]);
        assert_eq!(groups.len(), 3);
        assert!(groups[1..].iter().all(|g| g.kind().is_single()));
    }

    #[test]
    fn test_badge_claimed_as_unit_starts_no_row() {
        let mut items: Vec<Item> = vec![
            artifact(DEVOTION_BADGE).into(),
            artifact(DEVOTION_BADGE)
                .with_flags(ArtifactFlags::DEVOTION)
                .into(),
        ];
        for i in 0..6 {
            items.push(
                artifact(&format!("Unit {i}"))
                    .with_flags(ArtifactFlags::DEVOTION)
                    .into(),
            );
        }
        let groups = classify(&items);
        assert_eq!(ids(&groups[0]), [0, 1, 2, 3, 4, 5]);
        assert!(groups[1..].iter().all(|g| g.kind().is_single()));

        let mut members: Vec<usize> = groups.iter().flat_map(ids).collect();
        members.sort_unstable();
        assert_eq!(members, (0..items.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_badge_without_units_is_single() {
        let items: Vec<Item> = vec![artifact(DEVOTION_BADGE).into()];
        let groups = classify(&items);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind(), GroupKind::Single);
        assert_eq!(groups[0].priority(), SINGLE_PRIORITY);
    }

    #[test]
    fn test_line_tablets_precede_singles() {
        let items: Vec<Item> = vec![
            offset_tablet("Arrow", 1, 0, 2, true),
            line_tablet("Beam", Keyword::Row, false),
            line_tablet("Side", Keyword::Top, false),
            line_tablet("Cross", Keyword::BackSlash, true),
        ];
        let groups = classify(&items);
        let kinds: Vec<_> = groups.iter().map(Group::kind).collect();
        assert_eq!(
            kinds,
            [
                GroupKind::PriorityTablet,
                GroupKind::PriorityTablet,
                GroupKind::Single,
                GroupKind::Single,
            ]
        );
        assert_eq!(ids(&groups[0]), [1]);
        assert_eq!(ids(&groups[1]), [3]);
        assert_eq!(ids(&groups[2]), [0]);
        assert_eq!(ids(&groups[3]), [2]);
    }

    #[test]
    fn test_single_priority_overrides_in_order() {
        let items: Vec<Item> = vec![
            artifact("Plain").into(),
            artifact("Wanted").with_priority(true).into(),
            artifact(CHALCEDONY_KEY).with_priority(true).into(),
            artifact("Chime")
                .with_priority(true)
                .with_constraint([HARMONY_TAG])
                .into(),
            artifact(CHALCEDONY_KEY).with_constraint([HARMONY_TAG]).into(),
            artifact("Scale")
                .with_constraint([HARMONY_TAG])
                .with_scale(Some(ScaleSide::Left))
                .into(),
        ];
        let priorities: Vec<_> = items.iter().map(single_priority).collect();
        // A harmony key drops from 40 to 35: later checks overwrite.
        assert_eq!(priorities, [10, 30, 40, 35, 35, 40]);

        let groups = classify(&items);
        let order: Vec<_> = groups.iter().map(|g| g.members()[0].index()).collect();
        assert_eq!(order, [2, 5, 3, 4, 1, 0]);
    }
}
