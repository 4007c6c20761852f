use anyhow::{Result, bail};
use clap::Parser;
use lightcycle_core::{GameState, MatchConfig, Side, Simulation, Wanderer};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 100)]
    matches: u32,
    #[arg(short, long, default_value_t = 400)]
    grid_size: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = MatchConfig::with_grid(args.grid_size, 4);
    config.validate()?;

    println!("Starting Fuzz harness on seed {} for {} matches...", args.seed, args.matches);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for round in 0..args.matches {
        let turn_percent = (rng.next_u64() % 101) as u8;
        let mut sim = Simulation::new(
            config.clone(),
            Box::new(Wanderer::new(rng.next_u64(), turn_percent)),
            Box::new(Wanderer::new(rng.next_u64(), turn_percent)),
        )?;

        let mut occupied = sim.grid().occupied_count();
        while !sim.state().is_terminal() {
            let state = sim.tick();
            let now = sim.grid().occupied_count();
            if now < occupied {
                bail!("Invariant failed: occupancy shrank in match {round}");
            }
            if state == GameState::Ongoing {
                for side in [Side::Red, Side::Blue] {
                    let head = sim.agent(side).pos;
                    if !sim.grid().contains(head) {
                        bail!(
                            "Invariant failed: live head {head:?} off the lattice in match {round}"
                        );
                    }
                }
            }
            occupied = now;
        }

        let frozen = sim.snapshot_hash();
        if sim.tick() != sim.state() || sim.snapshot_hash() != frozen {
            bail!("Invariant failed: terminal match kept changing in match {round}");
        }
        println!("Match {round}: {:?} after {} ticks", sim.state(), sim.current_tick());
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
