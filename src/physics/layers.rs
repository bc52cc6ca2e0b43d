use avian3d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Player character
    Player,
    /// Static world geometry
    World,
    /// Decorative volumes that rays and the player pass through
    Passable,
}

/// Mask matching the surfaces a traversal probe can land on: everything
/// except the player's own collision volume and passable dressing.
pub fn solid_surfaces() -> LayerMask {
    LayerMask(LayerMask::ALL.0 & !GameLayer::Player.to_bits() & !GameLayer::Passable.to_bits())
}
