use bevy::prelude::*;

/// Upward ownership edge. Chains of owners form a forest in well-formed data,
/// but nothing guarantees acyclicity; walks must be depth-bounded.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub Entity);

impl Owner {
    /// `None` for the null owner.
    pub fn get(&self) -> Option<Entity> {
        (self.0 != Entity::PLACEHOLDER).then_some(self.0)
    }
}

/// Pending removal; never retuned nor counted.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Deleted;

/// Tool preview entity; never retuned nor counted.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Temp;

/// Edge whose lane speeds are set by hand; lane propagation leaves it alone.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Overridden;

/// Wrecked instance; never counted.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Destroyed;
