use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

/// Edges longer than this fraction of the shortest edge are diagonals.
const EDGE_TOLERANCE: f32 = 1.01;

/// The 20 vertices of a regular dodecahedron with circumradius `radius`.
///
/// Cube corners `(±1, ±1, ±1)` plus the cyclic permutations of
/// `(0, ±1/φ, ±φ)`, all at distance √3 before scaling.
pub fn dodecahedron_vertices(radius: f32) -> Vec<Vec3> {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let inv = 1.0 / phi;
    let mut vertices = Vec::with_capacity(20);

    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                vertices.push(Vec3::new(x, y, z));
            }
        }
    }
    for a in [-inv, inv] {
        for b in [-phi, phi] {
            vertices.push(Vec3::new(0.0, a, b));
            vertices.push(Vec3::new(a, b, 0.0));
            vertices.push(Vec3::new(b, 0.0, a));
        }
    }

    let scale = radius / 3.0_f32.sqrt();
    vertices.into_iter().map(|v| v * scale).collect()
}

/// Index pairs of the 30 edges: every vertex pair at the shortest distance.
pub fn dodecahedron_edges(vertices: &[Vec3]) -> Vec<(usize, usize)> {
    let shortest = vertices
        .iter()
        .enumerate()
        .flat_map(|(i, a)| vertices[i + 1..].iter().map(move |b| a.distance(*b)))
        .fold(f32::INFINITY, f32::min);

    let mut edges = Vec::new();
    for (i, a) in vertices.iter().enumerate() {
        for (j, b) in vertices.iter().enumerate().skip(i + 1) {
            if a.distance(*b) <= shortest * EDGE_TOLERANCE {
                edges.push((i, j));
            }
        }
    }
    edges
}

/// Open frame of a dodecahedron: one radial strip per edge, from the edge
/// out to `thickness` times the radius. Faces are left open.
pub fn edge_frame_mesh(radius: f32, thickness: f32) -> Mesh {
    let vertices = dodecahedron_vertices(radius);
    let edges = dodecahedron_edges(&vertices);

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(edges.len() * 4);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(edges.len() * 4);
    let mut indices: Vec<u32> = Vec::with_capacity(edges.len() * 6);

    for (a, b) in edges {
        let base = positions.len() as u32;
        let (inner_a, inner_b) = (vertices[a], vertices[b]);
        positions.extend([
            inner_a.to_array(),
            inner_b.to_array(),
            (inner_a * thickness).to_array(),
            (inner_b * thickness).to_array(),
        ]);
        uvs.extend([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        indices.extend([base, base + 1, base + 2, base + 1, base + 3, base + 2]);
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
        .with_duplicated_vertices()
        .with_computed_flat_normals()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_lie_on_the_circumsphere() {
        let vertices = dodecahedron_vertices(2.0);
        assert_eq!(vertices.len(), 20);
        for v in &vertices {
            assert!((v.length() - 2.0).abs() < 1e-5, "{v} off the sphere");
        }
    }

    #[test]
    fn every_vertex_joins_three_edges() {
        let vertices = dodecahedron_vertices(1.0);
        let edges = dodecahedron_edges(&vertices);
        assert_eq!(edges.len(), 30);

        let mut degree = [0; 20];
        for (a, b) in edges {
            degree[a] += 1;
            degree[b] += 1;
        }
        assert!(degree.iter().all(|d| *d == 3));
    }

    #[test]
    fn frame_mesh_has_two_triangles_per_edge() {
        let mesh = edge_frame_mesh(2.0, 1.05);
        assert_eq!(mesh.count_vertices(), 30 * 6);
        assert!(mesh.contains_attribute(Mesh::ATTRIBUTE_NORMAL));
        assert!(mesh.contains_attribute(Mesh::ATTRIBUTE_UV_0));
    }
}
