//! Classic Life patterns on a small torus, printed as text
//!
//! Shows Conway's glider and the HighLife replicator side by side.

use surface_automata::*;

const WIDTH: usize = 16;
const HEIGHT: usize = 12;

fn seeded(map: &AdjacencyMap<GridCell>, live: &[(usize, usize)]) -> State<GridCell> {
    let mut state = State::uniform(map, 0);
    for &(x, y) in live {
        state.set(GridCell::new(x, y), 1);
    }
    state
}

fn print_board(state: &State<GridCell>) {
    for y in 0..HEIGHT {
        let row: String = (0..WIDTH)
            .map(|x| match state.get(&GridCell::new(x, y)) {
                Some(0) | None => '.',
                Some(_) => '#',
            })
            .collect();
        println!("{}", row);
    }
}

fn show(name: &str, rule: Rule, live: &[(usize, usize)], generations: usize) -> Result<()> {
    let map = build_grid_adjacency(WIDTH, HEIGHT);
    let initial = seeded(&map, live);
    let mut automaton = Automaton::new(map, initial, rule)?;

    println!("=== {} ===", name);
    print_board(automaton.state());
    for _ in 0..generations {
        automaton.step();
        println!(
            "-- generation {} (population {})",
            automaton.generation(),
            automaton.state().population()
        );
        print_board(automaton.state());
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    show("Conway glider", Rule::conway(), &glider, 4)?;

    let replicator = [(5, 4), (6, 4), (7, 4), (4, 5), (7, 5), (3, 6), (7, 6), (3, 7), (6, 7), (3, 8), (4, 8), (5, 8)];
    show("HighLife replicator", Rule::highlife(), &replicator, 6)?;

    let custom = Rule::life_gen([3, 6, 7, 8], [0, 1, 2, 5]);
    let blob = [(6, 5), (7, 5), (8, 5), (6, 6), (8, 6), (6, 7), (7, 7), (8, 7)];
    show("Day & Night", custom, &blob, 3)?;

    Ok(())
}
