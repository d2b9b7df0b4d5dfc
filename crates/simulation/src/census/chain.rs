//! Name and ownership-chain predicates used by the census.

use bevy::prelude::*;

use crate::config::SCOOTER_NAME_PREFIXES;

/// Walk `start` and its owners, at most `max_depth` nodes, looking for a node
/// that satisfies `is_anchor`. Cycles and over-deep chains end the walk with
/// `false`.
pub fn anchor_in_chain(
    start: Entity,
    max_depth: usize,
    is_anchor: impl Fn(Entity) -> bool,
    owner_of: impl Fn(Entity) -> Option<Entity>,
) -> bool {
    let mut current = start;
    for _ in 0..max_depth {
        if current == Entity::PLACEHOLDER {
            return false;
        }
        if is_anchor(current) {
            return true;
        }
        match owner_of(current) {
            Some(next) => current = next,
            None => return false,
        }
    }
    false
}

/// Scooter subtype inside the light-vehicle group (case-insensitive prefix).
pub fn is_scooter_name(name: &str) -> bool {
    SCOOTER_NAME_PREFIXES.iter().any(|prefix| {
        name.len() >= prefix.len()
            && name.is_char_boundary(prefix.len())
            && name[..prefix.len()].eq_ignore_ascii_case(prefix)
    })
}
