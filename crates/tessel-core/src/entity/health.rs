use serde::{Deserialize, Serialize};

/// Health component for entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    /// Create a new health component with the specified max health
    pub fn new(max: i32) -> Self {
        Health { current: max, max }
    }

    /// Deal damage to this entity
    /// Returns true if the entity died (health <= 0)
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.current = (self.current - amount.max(0)).max(0);
        self.is_dead()
    }

    /// Heal this entity
    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount.max(0)).min(self.max);
    }

    /// Check if the entity is dead
    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Stamina pool spent on deliberate actions, refilled over time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamina {
    pub current: i32,
    pub max: i32,
    /// Ticks between each point of recharge
    pub recharge_delay: u32,
    recharge_timer: u32,
}

impl Stamina {
    pub fn new(max: i32, recharge_delay: u32) -> Self {
        Stamina {
            current: max,
            max,
            recharge_delay,
            recharge_timer: 0,
        }
    }

    /// Spend `cost` points. Returns false (and changes nothing) if not enough.
    pub fn pay(&mut self, cost: i32) -> bool {
        if cost > self.current {
            return false;
        }
        self.current -= cost.max(0);
        true
    }

    /// Advance one tick of recharge
    pub fn update(&mut self) {
        if self.current >= self.max {
            self.recharge_timer = 0;
            return;
        }
        self.recharge_timer += 1;
        if self.recharge_timer >= self.recharge_delay {
            self.recharge_timer = 0;
            self.current += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_take_damage() {
        let mut health = Health::new(10);
        assert!(!health.take_damage(4));
        assert_eq!(health.current, 6);
        assert!(health.take_damage(20));
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_health_heal_caps_at_max() {
        let mut health = Health::new(10);
        health.take_damage(3);
        health.heal(100);
        assert!(health.is_full());
    }

    #[test]
    fn test_stamina_pay_and_refuse() {
        let mut stamina = Stamina::new(5, 10);
        assert!(stamina.pay(4));
        assert!(!stamina.pay(2));
        assert_eq!(stamina.current, 1);
    }

    #[test]
    fn test_stamina_recharge() {
        let mut stamina = Stamina::new(5, 3);
        stamina.pay(2);
        for _ in 0..3 {
            stamina.update();
        }
        assert_eq!(stamina.current, 4);
        for _ in 0..10 {
            stamina.update();
        }
        assert_eq!(stamina.current, 5);
    }
}
