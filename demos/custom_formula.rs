//! A custom-formula session: compile once, query many times, and sample the
//! surface and its tangent plane for visualization.

use colored::Colorize;
use terrain_analyzer::{analyze_with_domain, SamplingDomain};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let formula = "20 * exp(-(x^2 + y^2) / 8) + sin(x) * cos(y)";
    let domain = SamplingDomain {
        x_range: (-4.0, 4.0),
        y_range: (-4.0, 4.0),
        resolution: (80, 80),
    };

    println!("{}", "=== Custom Terrain ===".bright_blue().bold());
    println!("formula: {formula}");

    let bundle = analyze_with_domain(formula, 1.0, 0.5, &domain)?;

    println!("\nf(x,y) = {}", bundle.expression);
    println!("df/dx  = {}", bundle.dx_expression);
    println!("df/dy  = {}", bundle.dy_expression);

    println!(
        "\nat (1, 0.5): z = {:.4} m, grad = <{:.4}, {:.4}>",
        bundle.z0, bundle.fx0, bundle.fy0
    );

    // the elevation grid a plotting layer would consume
    let z = &bundle.grid.z;
    let (min, max) = z.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    println!(
        "grid: {:?} samples, elevation range [{min:.2}, {max:.2}] m",
        z.dim()
    );

    // the construction overlay around the surveyor position
    let patch = bundle.tangent_patch();
    println!(
        "tangent patch: {:?} samples around ({}, {})",
        patch.z.dim(),
        bundle.x0,
        bundle.y0
    );

    // malformed and out-of-domain formulas fail with one message each
    for bad in ["x +* y", "log(x - 10)"] {
        match analyze_with_domain(bad, 1.0, 0.5, &domain) {
            Ok(_) => unreachable!("{bad} should not analyze"),
            Err(e) => println!("\n{} {e}", format!("{bad:?} rejected:").red()),
        }
    }

    Ok(())
}
