//! Collision layer system for filtering collision detection
//!
//! Every hitbox sits on one or more layers and carries a mask of the layers
//! it is willing to collide with. Two hitboxes are tested only when each
//! one's layer is in the other's mask.

bitflags::bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Enemy character layer
        const ENEMY = 1 << 1;
        /// Projectiles
        const PROJECTILE = 1 << 2;
        /// Static environment geometry
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes
        const TRIGGER = 1 << 4;
        /// Pickups and collectibles
        const PICKUP = 1 << 5;
        /// Every layer, including user-defined bits
        const ALL = u32::MAX;
    }
}

impl CollisionLayers {
    /// User-defined layer `index` (0-based, bits 8 and up)
    ///
    /// Returns `None` if the index does not fit in the 24 custom bits.
    pub fn custom(index: u32) -> Option<Self> {
        (index < 24).then(|| Self::from_bits_retain(1 << (index + 8)))
    }

    /// Check if two hitboxes should be tested against each other
    ///
    /// A's layer must be in B's mask AND B's layer must be in A's mask.
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::ALL
    }
}
