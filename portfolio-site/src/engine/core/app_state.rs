use bevy::prelude::*;

/// Top-level lifecycle. Views are resolved only once the catalog has settled,
/// successfully or not.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum SiteState {
    #[default]
    Loading,
    Ready,
}

pub fn announce_ready() {
    info!("→ Catalog settled, site ready");
}
