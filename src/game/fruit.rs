use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cosmetic variety for the food cell. Has no effect on the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Cherry,
    Lemon,
    Grape,
}

impl FruitKind {
    pub const ALL: [FruitKind; 4] = [
        FruitKind::Apple,
        FruitKind::Cherry,
        FruitKind::Lemon,
        FruitKind::Grape,
    ];

    /// Pick a kind uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Cherry => "cherry",
            FruitKind::Lemon => "lemon",
            FruitKind::Grape => "grape",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_covers_every_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(FruitKind::random(&mut rng));
        }
        assert_eq!(seen.len(), FruitKind::ALL.len());
    }

    #[test]
    fn test_names() {
        assert_eq!(FruitKind::Apple.name(), "apple");
        assert_eq!(FruitKind::Grape.name(), "grape");
    }
}
