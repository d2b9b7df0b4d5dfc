use bevy::prelude::*;

use super::cache::StatusCache;
use super::systems::refresh_status;
use super::templates::StatusTemplates;

pub struct StatusPlugin;

impl Plugin for StatusPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatusCache>()
            .init_resource::<StatusTemplates>()
            .add_systems(Update, refresh_status);
    }
}
