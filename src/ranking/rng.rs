use rand::rngs::ThreadRng;
use rand::Rng;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        // Reducing the seed mod the LCG modulus is congruent with seeding raw
        // and keeps the multiply inside u64 range.
        Self {
            state: seed % LCG_MODULUS,
        }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

pub enum JitterRng {
    Seeded(SeededRandom),
    System(ThreadRng),
}

impl JitterRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => JitterRng::Seeded(SeededRandom::new(seed)),
            None => JitterRng::System(rand::thread_rng()),
        }
    }

    pub fn next_f64(&mut self) -> f64 {
        match self {
            JitterRng::Seeded(rng) => rng.next_f64(),
            JitterRng::System(rng) => rng.gen::<f64>(),
        }
    }
}

pub fn shuffle<T: Clone>(items: &[T], rng: &mut JitterRng) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        shuffled.swap(i, j.min(i));
    }
    shuffled
}
