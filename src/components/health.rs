use bevy_ecs::prelude::Component;

/// Integer hit points. An entity at `<= 0` is destroyed (or ends the round if
/// it is the player).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Health(pub i32);

impl Health {
    pub fn is_depleted(&self) -> bool {
        self.0 <= 0
    }

    /// Subtract `amount` and report whether the entity is now depleted.
    pub fn damage(&mut self, amount: i32) -> bool {
        self.0 -= amount;
        self.is_depleted()
    }
}
