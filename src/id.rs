use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::Mutex;

/// Length of every generated image identifier.
pub const ID_LENGTH: usize = 10;

/// URL-safe alphabet, the same 64 symbols nanoid uses.
const ALPHABET: &[u8; 64] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

pub trait IdGenerator: Send + Sync + 'static {
    fn generate(&self) -> String;
}

/// Draws identifiers from a [`StdRng`].
pub struct RandomIdGenerator {
    rng: Mutex<StdRng>,
}

impl RandomIdGenerator {
    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic sequence, for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        // A poisoned lock still holds a usable rng.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (0..ID_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
