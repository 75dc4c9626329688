use faultscape_core::{FaultFormation2D, HeightGrid, Weathering2D, normalize_symmetric};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> faultscape_core::Result<()> {
    // 16×16 grid, 40 faults from seed 2025
    let mut map = HeightGrid::new(16)?;
    let mut rng = StdRng::seed_from_u64(2025);
    FaultFormation2D::new(40).apply(&mut map, &mut rng);
    normalize_symmetric(&mut map);

    // 3 weathering passes
    Weathering2D::new(3).apply(&mut map);

    for row in map.rows() {
        for h in row {
            print!("{:>7.3} ", h);
        }
        println!();
    }
    println!("variance {:.5}", map.variance());
    Ok(())
}
