//! Contestant descriptions parsed from the command line, and the seeded
//! single-layer network used for `net:<seed>` contestants.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use lightcycle_core::pilot::NETWORK_OUTPUTS;
use lightcycle_core::{Idle, Network, NetworkPilot, PERCEPT_LEN, Pilot, Wanderer};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Turn chance used for `wander:<seed>` contestants.
const WANDER_TURN_PERCENT: u8 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PilotKind {
    Idle,
    Wander { seed: u64 },
    Net { seed: u64 },
}

impl PilotKind {
    pub fn build(&self) -> Box<dyn Pilot> {
        match *self {
            Self::Idle => Box::new(Idle),
            Self::Wander { seed } => Box::new(Wanderer::new(seed, WANDER_TURN_PERCENT)),
            Self::Net { seed } => Box::new(NetworkPilot::new(LinearNetwork::seeded(seed))),
        }
    }
}

impl FromStr for PilotKind {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = match text.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (text, None),
        };
        let seed = || -> anyhow::Result<u64> {
            let arg = arg.ok_or_else(|| anyhow!("`{kind}` needs a seed, as in `{kind}:7`"))?;
            arg.parse().with_context(|| format!("invalid seed `{arg}`"))
        };
        match kind {
            "idle" if arg.is_none() => Ok(Self::Idle),
            "wander" => Ok(Self::Wander { seed: seed()? }),
            "net" => Ok(Self::Net { seed: seed()? }),
            _ => bail!("unknown pilot `{text}` (expected idle, wander:<seed> or net:<seed>)"),
        }
    }
}

impl fmt::Display for PilotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Wander { seed } => write!(f, "wander:{seed}"),
            Self::Net { seed } => write!(f, "net:{seed}"),
        }
    }
}

/// Percepts in, one sigmoid activation per network output.
#[derive(Clone, Debug)]
pub struct LinearNetwork {
    weights: [[f32; PERCEPT_LEN]; NETWORK_OUTPUTS.len()],
    biases: [f32; NETWORK_OUTPUTS.len()],
}

impl LinearNetwork {
    /// Weights and biases drawn uniformly from `[-1, 1)`.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut draw = || (rng.next_u64() >> 40) as f32 / (1u64 << 23) as f32 - 1.0;
        let mut weights = [[0.0; PERCEPT_LEN]; NETWORK_OUTPUTS.len()];
        for row in &mut weights {
            for weight in row.iter_mut() {
                *weight = draw();
            }
        }
        let mut biases = [0.0; NETWORK_OUTPUTS.len()];
        for bias in &mut biases {
            *bias = draw();
        }
        Self { weights, biases }
    }
}

impl Network for LinearNetwork {
    fn activate(&mut self, inputs: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(self.biases)
            .map(|(row, bias)| {
                let sum: f32 = row.iter().zip(inputs).map(|(w, x)| w * x).sum::<f32>() + bias;
                1.0 / (1.0 + (-sum).exp())
            })
            .collect()
    }
}
