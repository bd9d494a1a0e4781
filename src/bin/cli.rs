use clap::Parser;
use colored::Colorize;
use std::process;
use terrain_analyzer::{analyze, parser::compile, prelude::Axis, SlopePolicy, TerrainClass};

#[derive(Parser)]
#[command(name = "terrain-analyzer")]
#[command(about = "Analyze a two-variable terrain formula at a surveyor position")]
#[command(version)]
struct Args {
    /// Terrain formula over x and y, e.g. "100 - x^2 - y^2"
    formula: String,

    /// X coordinate of the surveyor position
    #[arg(default_value_t = 1.0)]
    x: f64,

    /// Y coordinate of the surveyor position
    #[arg(default_value_t = 1.0)]
    y: f64,

    /// Largest per-axis slope still considered buildable
    #[arg(long, default_value_t = 2.0)]
    max_slope: f64,

    /// Gradient magnitude below which the point counts as a critical point
    #[arg(long, default_value_t = 0.1)]
    critical: f64,
}

fn main() {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = analyze(&args.formula, args.x, args.y)?;
    let policy = SlopePolicy {
        critical_gradient: args.critical,
        max_construction_slope: args.max_slope,
    };

    println!("{}", "Terrain Analysis".cyan().bold());
    println!("  f(x,y)   = {}", bundle.expression);
    println!("  df/dx    = {}", bundle.dx_expression);
    println!("  df/dy    = {}", bundle.dy_expression);
    println!();
    println!(
        "{} ({}, {})",
        "Surveyor Position".cyan().bold(),
        args.x,
        args.y
    );
    println!("  elevation = {:.2} m", bundle.z0);
    println!("  slope x   = {:.2}", bundle.fx0);
    println!("  slope y   = {:.2}", bundle.fy0);
    println!(
        "  gradient  = <{:.2}, {:.2}>  |grad| = {:.2}",
        bundle.fx0,
        bundle.fy0,
        bundle.gradient_magnitude()
    );

    let expr = compile(&args.formula)?;
    for axis in [Axis::X, Axis::Y] {
        if !expr.depends_on(axis) {
            println!("  note: terrain is flat along {axis}");
        }
    }

    println!();
    match bundle.classify(&policy) {
        TerrainClass::CriticalPoint => {
            println!(
                "{}",
                "CRITICAL POINT: peak, valley, or saddle (gradient ~ 0)"
                    .yellow()
                    .bold()
            );
        }
        TerrainClass::Sloped { buildable: true } => {
            println!("{}", "Slope acceptable for construction".green());
            if let Some((dx, dy)) = bundle.descent_direction() {
                println!("  drainage direction: <{dx:.2}, {dy:.2}>");
            }
        }
        TerrainClass::Sloped { buildable: false } => {
            println!(
                "{}",
                "Steep slope warning: grade exceeds the construction limit".red()
            );
            if let Some((dx, dy)) = bundle.descent_direction() {
                println!("  drainage direction: <{dx:.2}, {dy:.2}>");
            }
        }
    }

    Ok(())
}
