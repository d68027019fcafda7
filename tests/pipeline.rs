//! End-to-end: OBJ text in, automaton over faces, textured OBJ out

use std::ops::ControlFlow;
use surface_automata::*;

const OCTAHEDRON: &str = "\
# octahedron
v 1 0 0
v -1 0 0
v 0 1 0
v 0 -1 0
v 0 0 1
v 0 0 -1
vn 0 0 1
f 1 3 5
f 3 2 5
f 2 4 5
f 4 1 5
f 3 1 6
f 2 3 6
f 4 2 6
f 1 4 6
";

fn octahedron() -> MeshSurface {
    let mesh = parse_obj(OCTAHEDRON.as_bytes(), ObjLoadOptions::default()).unwrap();
    MeshSurface::from_mesh(mesh).unwrap()
}

#[test]
fn octahedron_faces_have_three_neighbours() {
    let surface = octahedron();
    assert_eq!(surface.face_count(), 8);
    for (_, neighbors) in surface.adjacency().iter() {
        assert_eq!(neighbors.len(), 3);
    }
    // 8 faces x 3 neighbours, each link counted from both sides
    assert_eq!(surface.adjacency().link_count(), 24);
}

#[test]
fn textured_export_round_trips() {
    let surface = octahedron();
    let initial = surface.random_state(3, 99);
    let mut automaton = Automaton::new(surface.shared_adjacency(), initial, Rule::cyclic(3)).unwrap();
    let summary = automaton
        .run(Some(4), &mut |_: usize, _: &State<FaceId>| ControlFlow::Continue(()))
        .unwrap();
    assert_eq!(summary.generations, 4);

    let colors = surface.face_colors(automaton.state(), &Palette::random(3, 99));
    let atlas = surface.build_atlas(&colors, 32.0).unwrap();
    assert_eq!(atlas.cells_per_side, 3);
    assert_eq!(atlas.uv_count(), 24);

    let options = ExportOptions::default();
    let mut buffer = Vec::new();
    write_textured_obj(&mut buffer, surface.mesh(), &atlas.uvs, &options).unwrap();

    let reparsed = parse_obj(buffer.as_slice(), ObjLoadOptions::default()).unwrap();
    assert_eq!(reparsed.vertex_count(), surface.mesh().vertex_count());
    for (a, b) in reparsed.vertices.iter().zip(&surface.mesh().vertices) {
        assert!((*a - *b).length() < 1e-9);
    }
    for (original, exported) in surface.mesh().faces.iter().zip(&reparsed.faces) {
        assert_eq!(original.vertices, exported.vertices);
        assert_eq!(exported.tex_coords.len(), original.len());
    }
    let uvs: Vec<DVec2> = atlas.uvs.iter().flatten().copied().collect();
    for (a, b) in reparsed.tex_coords.iter().zip(&uvs) {
        assert!((*a - *b).length() < 1e-9);
    }
}

#[test]
fn life_on_a_torus_matches_preset() {
    // A block is a still life under both Conway and HighLife
    let map = build_grid_adjacency(6, 6);
    let mut state = State::uniform(&map, 0);
    for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
        state.set(GridCell::new(x, y), 1);
    }
    for rule in [Rule::conway(), Rule::highlife()] {
        let next = step(&map, &state, &rule).unwrap();
        assert_eq!(next, state, "{} should keep the block", rule.name());
    }
}

#[test]
fn step_rejects_partial_state() {
    let map = build_grid_adjacency(3, 3);
    let state = State::from_values(vec![(GridCell::new(0, 0), 1)]);
    assert!(matches!(
        step(&map, &state, &Rule::conway()),
        Err(AutomataError::MissingRegion(_))
    ));
}
