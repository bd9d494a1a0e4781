//! Walks the two preset terrain archetypes through the analysis pipeline.
//!
//! The presets are configuration constants of the caller, not part of the
//! core API: a symmetrical hill for basic run-off analysis and a mountain
//! pass whose saddle point matters for route planning.

use colored::Colorize;
use terrain_analyzer::{analyze, SlopePolicy, TerrainClass};

const PRESETS: [(&str, &str); 2] = [
    ("Symmetrical Hill (Dome)", "100 - x^2 - y^2"),
    ("Mountain Pass (Saddle)", "x^2 - y^2 + 50"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let positions = [(1.0, 1.0), (0.0, 0.0), (4.0, -3.0)];

    // highway policy and the conservative drainage variant
    let highway = SlopePolicy::default();
    let drainage = SlopePolicy {
        critical_gradient: 0.1,
        max_construction_slope: 0.10,
    };

    for (name, formula) in PRESETS {
        println!("\n{}", format!("=== {name} ===").bright_blue().bold());
        println!("formula: {formula}");

        for (x0, y0) in positions {
            let bundle = analyze(formula, x0, y0)?;

            println!(
                "\nat ({x0}, {y0}): z = {:.2} m, grad = <{:.2}, {:.2}>, |grad| = {:.2}",
                bundle.z0,
                bundle.fx0,
                bundle.fy0,
                bundle.gradient_magnitude()
            );
            println!("  df/dx = {}", bundle.dx_expression);
            println!("  df/dy = {}", bundle.dy_expression);

            describe("highway policy", bundle.classify(&highway));
            describe("drainage policy", bundle.classify(&drainage));
        }
    }

    Ok(())
}

fn describe(policy: &str, class: TerrainClass) {
    match class {
        TerrainClass::CriticalPoint => {
            println!("  {policy}: {}", "critical point".yellow());
        }
        TerrainClass::Sloped { buildable: true } => {
            println!("  {policy}: {}", "buildable slope".green());
        }
        TerrainClass::Sloped { buildable: false } => {
            println!("  {policy}: {}", "too steep".red());
        }
    }
}
