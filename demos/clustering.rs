//! K-means on a simple 2D dataset.

use lloyd::Kmeans;

fn main() {
    // Three well-separated clusters in 2D.
    let data: Vec<Vec<f32>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];

    let model = Kmeans::new(3).with_seed(42).fit(&data).unwrap();

    println!("=== K-means (k=3) ===");
    println!(
        "converged: {} (after {} iterations)",
        model.converged(),
        model.iterations()
    );
    for (i, label) in model.labels().iter().enumerate() {
        println!(
            "  point {:2} ({:5.1}, {:5.1}) => cluster {}",
            i, data[i][0], data[i][1], label
        );
    }
    for (i, centroid) in model.centroids().iter().enumerate() {
        println!("  centroid {} => ({:5.2}, {:5.2})", i, centroid[0], centroid[1]);
    }
}
