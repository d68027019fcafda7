//! Run a coloured automaton on a toroidal grid and write every generation
//! as a PNG frame.
//!
//! Usage: cargo run --example grid_automaton -- [gh|cyclic] [generations] [out_dir]

use std::ops::ControlFlow;

use surface_automata::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rule = args.next().unwrap_or_else(|| "gh".to_string());
    let generations: usize = args
        .next()
        .map(|s| s.parse::<usize>())
        .transpose()
        .map_err(|e| AutomataError::InvalidConfig(format!("bad generation count: {}", e)))?
        .unwrap_or(50);
    let out_dir = args.next().unwrap_or_else(|| "frames".to_string());

    let builder = AutomatonConfigBuilder::new()
        .seed(42)
        .dimensions(100, 100)?
        .colors(6)?
        .max_iterations(generations);
    let config = match rule.as_str() {
        "cyclic" => builder.cyclic().build()?,
        _ => builder.greenberg_hastings().build()?,
    };

    println!(
        "Running {} on a {}x{} torus for {} generations",
        config.rule.name(),
        config.width,
        config.height,
        generations
    );

    let map = build_grid_adjacency(config.width, config.height);
    let initial = State::random(&map, config.colors, config.seed);
    let mut automaton = Automaton::new(map, initial, config.rule.clone())?;

    std::fs::create_dir_all(&out_dir)?;
    let palette = Palette::random(config.colors, config.palette_seed);
    let mut frames = PngSequence::new(&out_dir, "gen", config.width, config.height, &palette)
        .with_scale(4);

    let summary = automaton.run(config.max_iterations, &mut frames)?;
    let written = frames.finish()?;
    println!("Wrote {} frames to {}", written.len(), out_dir);

    // Population per state after the run
    let histogram = automaton.state().histogram(config.colors);
    for (value, count) in histogram.iter().enumerate() {
        println!("  state {}: {} cells", value, count);
    }

    // A closure works as a sink too: stop once the board goes quiet
    let mut quiet_after = None;
    let extra = automaton.run(Some(500), &mut |generation: usize, state: &State<GridCell>| {
        if state.population() == 0 {
            quiet_after = Some(generation);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;
    match quiet_after {
        Some(generation) => println!("Board went quiet at generation {}", generation),
        None => println!(
            "Still active after {} more generations ({} total)",
            extra.generations,
            summary.generations + extra.generations
        ),
    }

    Ok(())
}
