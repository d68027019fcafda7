use proptest::prelude::*;
use surface_automata::*;

fn coord() -> impl Strategy<Value = f64> {
    -100.0f64..100.0
}

fn arb_point() -> impl Strategy<Value = DVec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

/// Triangles whose corners are well separated and not close to collinear
fn arb_triangle() -> impl Strategy<Value = [DVec3; 3]> {
    (arb_point(), arb_point(), arb_point()).prop_filter("non-degenerate", |(a, b, c)| {
        let area = (*a - *b).cross(*b - *c).length();
        (*a - *b).length() > 1e-2 && (*b - *c).length() > 1e-2 && (*c - *a).length() > 1e-2 && area > 1e-1
    })
    .prop_map(|(a, b, c)| [a, b, c])
}

fn triangle_mesh(t: [DVec3; 3]) -> ObjMesh {
    ObjMesh::new(t.to_vec(), vec![vec![0, 1, 2]])
}

proptest! {
    // Perfect square bounds: n <= s < (floor(sqrt n) + 1)^2, s a square
    #[test]
    fn next_square_bounds(n in 0usize..100_000) {
        let s = next_perfect_square(n);
        let root = (s as f64).sqrt().round() as usize;
        prop_assert_eq!(root * root, s);
        prop_assert!(s >= n);
        if s > n {
            prop_assert!((root - 1) * (root - 1) < n);
        }
    }

    // Rotation basis is orthonormal and sends the normal to +Z
    #[test]
    fn rotation_is_orthonormal(t in arb_triangle()) {
        let mesh = triangle_mesh(t);
        let normal = face_normal(&mesh, 0).unwrap();
        let rotation = flat_rotation(0, t[0] - t[1], normal).unwrap();
        prop_assert!((rotation.determinant() - 1.0).abs() < 1e-9);
        prop_assert!((rotation * rotation.transpose()).abs_diff_eq(glam::DMat3::IDENTITY, 1e-9));
        let z = rotation * normal.normalize();
        prop_assert!(z.abs_diff_eq(DVec3::Z, 1e-9));
    }

    // Flattening keeps every side length
    #[test]
    fn flatten_preserves_lengths(t in arb_triangle()) {
        let mesh = triangle_mesh(t);
        let flat = flatten_face(&mesh, 0).unwrap();
        for i in 0..3 {
            let j = (i + 1) % 3;
            let original = (t[i] - t[j]).length();
            let flattened = (flat[i] - flat[j]).length();
            prop_assert!((original - flattened).abs() <= 1e-9 * original.max(1.0));
        }
    }

    // UVs land in the unit square for any layout
    #[test]
    fn atlas_uvs_in_unit_square(
        triangles in prop::collection::vec(arb_triangle(), 1..12),
        scale in 0.01f64..0.2,
    ) {
        let faces = triangles
            .iter()
            .map(|t| flatten_face(&triangle_mesh(*t), 0).unwrap())
            .collect::<Vec<_>>();
        let colors = vec![[200u8, 10, 10]; faces.len()];
        let atlas = synthesize_scaled(&faces, &colors, scale).unwrap();

        prop_assert_eq!(atlas.uvs.len(), faces.len());
        prop_assert_eq!(atlas.cells_per_side as usize * atlas.cells_per_side as usize,
            next_perfect_square(faces.len()));
        for uv in atlas.uvs.iter().flatten() {
            prop_assert!((0.0..=1.0).contains(&uv.x), "u = {}", uv.x);
            prop_assert!((0.0..=1.0).contains(&uv.y), "v = {}", uv.y);
        }
    }
}
