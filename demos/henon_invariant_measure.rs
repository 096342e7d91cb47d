use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use transferoperator::estimators::approaches::{
    BoundaryCondition, InvariantMeasure, RectangularBinning, SolverOptions,
};
use transferoperator::estimators::Probabilities;

fn main() -> transferoperator::Result<()> {
    // Orbit of the Hénon map on its strange attractor
    let n = 20_000;
    let (mut x, mut y) = (0.1, 0.1);
    for _ in 0..1000 {
        (x, y) = (1.0 - 1.4 * x * x + y, 0.3 * x);
    }
    let mut data = Array2::zeros((n, 2));
    for i in 0..n {
        data[[i, 0]] = x;
        data[[i, 1]] = y;
        (x, y) = (1.0 - 1.4 * x * x + y, 0.3 * x);
    }

    let options = SolverOptions::default().with_max_iterations(5000);
    let mut rng = StdRng::seed_from_u64(1234);

    println!("cells | visited bins | iterations | converged | H(invariant) | H(visits)");
    for k in [4, 8, 16, 32, 64] {
        let im = InvariantMeasure::from_trajectory(
            data.view(),
            &RectangularBinning::CellCount(k),
            BoundaryCondition::Circular,
            &options,
            &mut rng,
        )?;
        let visits = Probabilities::from_counts(im.operator().visit_counts())?;
        println!(
            "{k:>5} | {:>12} | {:>10} | {:>9} | {:>12.6} | {:>9.6}",
            im.bins().len(),
            im.iterations(),
            im.converged(),
            im.probabilities().shannon_entropy(),
            visits.shannon_entropy(),
        );
    }

    // The heaviest bins of a moderately fine partition
    let im = InvariantMeasure::from_trajectory(
        data.view(),
        &RectangularBinning::CellCount(16),
        BoundaryCondition::Circular,
        &options,
        &mut rng,
    )?;
    let corners = im.bin_corners();
    let mut order: Vec<usize> = (0..im.bins().len()).collect();
    order.sort_by(|&a, &b| im.probabilities()[b].total_cmp(&im.probabilities()[a]));
    println!("\nheaviest bins (lower corner, mass):");
    for &i in order.iter().take(5) {
        println!(
            "  ({:+.4}, {:+.4})  {:.5}",
            corners[[i, 0]],
            corners[[i, 1]],
            im.probabilities()[i]
        );
    }
    Ok(())
}
