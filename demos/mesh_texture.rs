//! Run an automaton over the faces of a mesh and bake the result into a
//! textured OBJ.
//!
//! Usage: cargo run --example mesh_texture -- [model.obj] [generations]
//!
//! Without a model, a cube tessellated into 8x8 quads per side is used.

use std::collections::HashMap;

use surface_automata::*;

/// Cube with `n` x `n` quads per side, sharing vertices along seams
fn tessellated_cube(n: usize) -> ObjMesh {
    let mut vertices = Vec::new();
    let mut lookup: HashMap<[usize; 3], usize> = HashMap::new();
    let mut vertex = |p: [usize; 3]| -> usize {
        *lookup.entry(p).or_insert_with(|| {
            vertices.push(DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64) / n as f64);
            vertices.len() - 1
        })
    };

    let mut faces = Vec::new();
    // (fixed axis, fixed value) for each side
    for axis in 0..3 {
        for side in [0, n] {
            let u_axis = (axis + 1) % 3;
            let v_axis = (axis + 2) % 3;
            for u in 0..n {
                for v in 0..n {
                    let corner = |du: usize, dv: usize| {
                        let mut p = [0; 3];
                        p[axis] = side;
                        p[u_axis] = u + du;
                        p[v_axis] = v + dv;
                        p
                    };
                    faces.push(vec![
                        vertex(corner(0, 0)),
                        vertex(corner(1, 0)),
                        vertex(corner(1, 1)),
                        vertex(corner(0, 1)),
                    ]);
                }
            }
        }
    }

    ObjMesh::new(vertices, faces)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let model = args.next();
    let generations = args
        .next()
        .map(|s| s.parse::<usize>())
        .transpose()
        .map_err(|e| AutomataError::InvalidConfig(format!("bad generation count: {}", e)))?
        .unwrap_or(30);

    let surface = match &model {
        Some(path) => MeshSurface::load(path, ObjLoadOptions::default())?,
        None => MeshSurface::from_mesh(tessellated_cube(8))?,
    };
    println!(
        "Mesh: {} vertices, {} faces, {} adjacency links",
        surface.mesh().vertex_count(),
        surface.face_count(),
        surface.adjacency().link_count()
    );

    let config = AutomatonConfigBuilder::new()
        .seed(7)
        .colors(5)?
        .cyclic()
        .threshold(1)
        .max_iterations(generations)
        .build()?;

    let initial = surface.random_state(config.colors, config.seed);
    let mut automaton = Automaton::new(surface.shared_adjacency(), initial, config.rule.clone())?;
    let summary = automaton.run(config.max_iterations, &mut |_: usize, _: &State<FaceId>| {
        std::ops::ControlFlow::Continue(())
    })?;
    println!("Ran {} generations of {}", summary.generations, config.rule.name());

    #[cfg(feature = "spatial-index")]
    {
        let above = DVec3::new(0.5, 0.5, 10.0);
        if let Some(face) = surface.find_face_at(above) {
            println!("Face nearest {:?}: {} (centroid {:?})", above, face, surface.face_centroid(face));
        }
    }

    let palette = Palette::random(config.colors, config.palette_seed);
    let colors = surface.face_colors(automaton.state(), &palette);

    let out_dir = std::path::Path::new("mesh_output");
    std::fs::create_dir_all(out_dir)?;
    let files = surface.export(out_dir, "surface", &colors, 64.0)?;

    println!("Exported:");
    println!("  {}", files.obj.display());
    println!("  {}", files.material.display());
    println!("  {}", files.texture.display());

    Ok(())
}
