//! # Fenestra CLI Application
//!
//! Runs opening calculations, irregular-outline glazing and project
//! conversions described in a JSON job file and prints a summary followed
//! by the JSON results.
//!
//! ```text
//! calc_cli job.json     # run a job file
//! calc_cli              # run the built-in 1500 x 1200 demo
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`). Logs go to stderr,
//! the summary and JSON results to stdout.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use calc_core::calculations::cost::{PriceSnapshot, PriceTable, ProfilePrice};
use calc_core::calculations::glass::{checked_polygon_glass, GlassResult};
use calc_core::calculations::unit::{calculate, UnitResult};
use calc_core::geometry::Polygon;
use calc_core::opening::{GlazingComposition, OpeningSpec};
use calc_core::{
    CalcSettings, Computed, Conversion, DesignProject, DesignUnit, SystemCatalog, SystemConfig,
    SystemRules,
};

/// Contents of a job file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Job {
    settings: CalcSettings,
    systems: Vec<SystemConfig>,
    prices: PriceSnapshot,
    openings: Vec<OpeningSpec>,
    /// Outlines of irregular openings, glazed from their bounding box
    outlines: Vec<Polygon>,
    project: Option<DesignProject>,
}

impl Job {
    fn catalog(&self) -> SystemCatalog {
        self.systems.iter().map(|s| (s.id.clone(), s.clone())).collect()
    }
}

/// JSON printed after the summary
#[derive(Debug, Serialize)]
struct JobOutput {
    openings: Vec<Computed<UnitResult>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    approximate_panes: Vec<GlassResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversion: Option<Computed<Conversion>>,
}

fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(())
}

fn load_job(path: &Path) -> anyhow::Result<Job> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn demo_job() -> Job {
    let system = SystemConfig::new("demo", "Demo 45° system")
        .with_rules(SystemRules::new(45.0, 100.0, 100.0));

    let mut profiles = PriceTable::new();
    profiles.insert("FRAME_PROFILE".to_string(), ProfilePrice::per_kg(15.0, 1.2));

    let mut project = DesignProject::new("Demo project", "Demo client", "1 Demo Street");
    project.add_unit(
        DesignUnit::new("W-1", 1500.0, 1200.0, "demo")
            .with_quantity(2)
            .with_glazing(GlazingComposition::Simple),
    );
    project.add_unit(DesignUnit::new("D-1", 900.0, 2100.0, "demo"));

    Job {
        settings: CalcSettings::default(),
        systems: vec![system],
        prices: PriceSnapshot::new(profiles, 45.0),
        openings: vec![OpeningSpec::new(1500.0, 1200.0, "demo").with_label("W-1")],
        outlines: vec![Polygon::from(vec![(0.0, 0.0), (800.0, 0.0), (400.0, 600.0)])],
        project: Some(project),
    }
}

fn print_unit(result: &Computed<UnitResult>, settings: &CalcSettings) {
    let unit = &result.value;
    let money = |v: f64| settings.format_money(v);

    println!("═══════════════════════════════════════");
    println!("  OPENING {} ({} × {})", unit.label, unit.system_name, unit.quantity);
    println!("═══════════════════════════════════════");
    println!("Cuts (per unit):");
    for cut in &unit.cuts {
        println!(
            "  {:<18} {:>7.1} mm  x{}  {}°/{}°  [{}]",
            cut.label,
            cut.length_mm,
            cut.quantity,
            cut.angle_start_deg,
            cut.angle_end_deg,
            cut.profile_code
        );
    }
    println!("Glass (per unit):");
    println!(
        "  {} {:.1} × {:.1} mm  x{}",
        unit.glass.composition_label, unit.glass.width_mm, unit.glass.height_mm, unit.glass.quantity
    );
    println!("Cost (all units):");
    for item in &unit.cost.line_items {
        println!(
            "  {:<40} x{:<3} {:>10} {:>10}",
            item.description,
            item.quantity,
            money(item.unit_cost),
            money(item.total_cost)
        );
    }
    println!("  Profiles:    {:>10}", money(unit.cost.profiles_cost));
    println!("  Glass:       {:>10}", money(unit.cost.glass_cost));
    println!("  Accessories: {:>10}", money(unit.cost.accessories_cost));
    println!("  TOTAL:       {:>10}", money(unit.cost.total_cost));
    print_fallbacks(&result.fallbacks);
    println!();
}

fn print_conversion(result: &Computed<Conversion>) {
    let conversion = &result.value;
    println!("═══════════════════════════════════════");
    println!("  ORDER for {} ({})", conversion.order.project_name, conversion.order.client);
    println!("═══════════════════════════════════════");
    for record in &conversion.cut_records {
        println!(
            "  {:>7.1} × {:>7.1} mm  x{:<3} {:<10} {}",
            record.width_mm,
            record.height_mm,
            record.quantity,
            record.composition.tag(),
            record.note
        );
    }
    println!(
        "  {} record(s), {} pane(s), {:.3} m², {} unit(s) skipped",
        conversion.cut_records.len(),
        conversion.total_panes(),
        conversion.total_glass_area().0,
        conversion.skipped_units.len()
    );
    print_fallbacks(&result.fallbacks);
    println!();
}

fn print_fallbacks(fallbacks: &[calc_core::Fallback]) {
    for fallback in fallbacks {
        println!("  [WARN] {}", fallback);
    }
}

fn run(job: &Job) -> anyhow::Result<JobOutput> {
    let catalog = job.catalog();

    let mut openings = Vec::with_capacity(job.openings.len());
    for opening in &job.openings {
        let result = calculate(opening, &catalog, &job.prices, &job.settings)
            .with_context(|| format!("calculating opening '{}'", opening.label))?;
        print_unit(&result, &job.settings);
        openings.push(result);
    }

    let mut approximate_panes = Vec::with_capacity(job.outlines.len());
    for (i, outline) in job.outlines.iter().enumerate() {
        let pane = checked_polygon_glass(outline, &job.settings)
            .with_context(|| format!("glazing outline #{}", i + 1))?;
        println!(
            "Outline #{}: {} {:.1} × {:.1} mm",
            i + 1,
            pane.composition_label,
            pane.width_mm,
            pane.height_mm
        );
        approximate_panes.push(pane);
    }
    if !approximate_panes.is_empty() {
        println!();
    }

    let conversion = match &job.project {
        Some(project) => {
            let result = project
                .to_order(&catalog, &job.settings)
                .with_context(|| format!("converting project '{}'", project.meta.name))?;
            print_conversion(&result);
            Some(result)
        }
        None => None,
    };

    Ok(JobOutput {
        openings,
        approximate_panes,
        conversion,
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    println!("Fenestra CLI - Window & Door Carpentry Calculator");
    println!("=================================================");
    println!();

    let job = match std::env::args().nth(1) {
        Some(path) => load_job(Path::new(&path))?,
        None => {
            println!("No job file given. Running demo...");
            println!();
            demo_job()
        }
    };

    let output = run(&job)?;

    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
