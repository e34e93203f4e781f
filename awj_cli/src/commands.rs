//! CLI command implementations.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use serde_json::json;

use awj_core::calculations::{
    run_batch, BatchRequest, CalculationInput, DEFAULT_ABRASIVE_FLOW, DEFAULT_FOCUS_DIAMETER, DEFAULT_FOCUS_LENGTH,
    DEFAULT_NOZZLE_DIAMETER,
};
use awj_core::file_io::load_json;
use awj_core::materials::abrasive::DEFAULT_MESH;
use awj_core::materials::{MaterialType, MESH_SIZES};
use awj_core::optimization::{optimize_with_settings, OptimizationRequest, OptimizationTarget};
use awj_core::settings::EngineSettings;
use awj_core::{perform_full_calculation, CalcError, CalcResult, CalculationRecord, CalculationResult};

const RULE: &str = "═══════════════════════════════════════";

/// Arguments for `awj calculate`
#[derive(Args)]
pub struct CalculateArgs {
    /// Read all parameters from a JSON file instead of flags.
    #[arg(short, long, conflicts_with_all = ["thickness", "pressure"])]
    pub input: Option<PathBuf>,

    /// Workpiece material (steel, aluminum, titanium, granite, glass, ceramic, composite).
    #[arg(short, long, default_value = "steel")]
    pub material: String,

    /// Workpiece thickness (mm).
    #[arg(short, long)]
    pub thickness: Option<f64>,

    /// Pump pressure (MPa).
    #[arg(short, long)]
    pub pressure: Option<f64>,

    /// Orifice diameter (mm).
    #[arg(long, default_value_t = DEFAULT_NOZZLE_DIAMETER)]
    pub nozzle: f64,

    /// Focus tube diameter (mm).
    #[arg(long, default_value_t = DEFAULT_FOCUS_DIAMETER)]
    pub focus: f64,

    /// Focus tube length (mm).
    #[arg(long, default_value_t = DEFAULT_FOCUS_LENGTH)]
    pub focus_length: f64,

    /// Abrasive mass flow (g/s).
    #[arg(short, long, default_value_t = DEFAULT_ABRASIVE_FLOW)]
    pub abrasive: f64,

    /// Abrasive mesh size.
    #[arg(long, default_value_t = DEFAULT_MESH)]
    pub mesh: u32,

    /// Wrap the result in a timestamped record with an id.
    #[arg(long)]
    pub record: bool,
}

impl CalculateArgs {
    fn to_input(&self) -> CalcResult<CalculationInput> {
        if let Some(path) = &self.input {
            let input: CalculationInput = load_json(path)?;
            tracing::debug!(path = %path.display(), material = input.material_type.key(), "input file loaded");
            return Ok(input);
        }
        let thickness = self
            .thickness
            .ok_or_else(|| CalcError::invalid_input("thickness", "missing", "Required unless --input is given"))?;
        let pressure = self
            .pressure
            .ok_or_else(|| CalcError::invalid_input("pressure", "missing", "Required unless --input is given"))?;

        let mut input = CalculationInput::new(MaterialType::from_name(&self.material), thickness, pressure)
            .with_head(self.nozzle, self.focus)
            .with_abrasive_flow(self.abrasive)
            .with_mesh_size(self.mesh);
        input.focus_length = self.focus_length;
        Ok(input)
    }
}

/// Configured prices apply wherever the input carries none of its own.
fn apply_settings(input: &mut CalculationInput, settings: &EngineSettings) {
    if input.cost_rates.is_none() {
        tracing::debug!("using configured cost rates");
        input.cost_rates = Some(settings.cost_rates);
    }
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_header(title: &str) {
    println!("{}", RULE);
    println!("  {}", title);
    println!("{}", RULE);
    println!();
}

fn print_input(input: &CalculationInput) {
    println!("Input:");
    println!("  Material:  {}", input.material_type);
    println!("  Thickness: {:.1} mm", input.thickness);
    println!("  Pressure:  {:.0} MPa", input.pressure);
    println!("  Head:      {:.2} mm orifice / {:.2} mm focus", input.nozzle_diameter, input.focus_diameter);
    println!("  Abrasive:  {:.1} g/s, {} mesh", input.abrasive_flow, input.mesh_size);
}

fn print_result(result: &CalculationResult) {
    println!("Results:");
    println!("  Water flow:        {:.2} l/min", result.water_flow);
    println!("  Hydraulic power:   {:.2} kW", result.hydraulic_power);
    println!("  Cutting speed:     {:.1} mm/min", result.cutting_speed);
    println!("  Cut depth:         {:.2} mm", result.cut_depth);
    println!("  Surface roughness: {:.2} μm Ra", result.surface_roughness);
    println!("  Cost per meter:    {}", result.cost_per_meter);
    println!();
    println!("Diagnostics:");
    println!("  Jet velocity:      {:.2} m/s", result.extended.water_velocity);
    println!("  Kinetic energy:    {:.0} J/m³", result.extended.kinetic_energy);
    println!("  Mass flow:         {:.4} kg/s", result.extended.mass_flow_rate);
    println!("  Abrasive ratio:    {:.3}", result.extended.abrasive_ratio);
    println!("  Specific energy:   {:.2} J/mm", result.extended.specific_energy);
}

/// Run one calculation.
pub fn calculate(args: &CalculateArgs, settings: &EngineSettings, json: bool) -> CalcResult<()> {
    let mut input = args.to_input()?;
    apply_settings(&mut input, settings);
    input.validate()?;

    if args.record {
        let record = CalculationRecord::compute(input)?;
        if json {
            return print_json(&record);
        }
        print_header("AWJ CALCULATION RECORD");
        println!("Id:       {}", record.id);
        println!("Created:  {}", record.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("Duration: {:.3} ms", record.calculation_time_ms);
        println!();
        print_input(&record.input);
        println!();
        print_result(&record.result);
        return Ok(());
    }

    let result = perform_full_calculation(&input)?;
    if json {
        return print_json(&result);
    }
    print_header("AWJ CALCULATION RESULTS");
    print_input(&input);
    println!();
    print_result(&result);
    Ok(())
}

/// Run a batch comparison from a JSON file.
pub fn batch(path: &Path, settings: &EngineSettings, json: bool) -> CalcResult<()> {
    let mut request: BatchRequest = load_json(path)?;
    tracing::debug!(path = %path.display(), variations = request.variations.len(), "batch file loaded");
    apply_settings(&mut request.base_parameters, settings);

    let report = run_batch(&request)?;
    if json {
        return print_json(&report);
    }

    print_header("AWJ BATCH COMPARISON");
    println!(
        "{:<14} {:>9} {:>7} {:>9} {:>11} {:>9} {:>9}",
        "Variant", "Material", "t (mm)", "P (MPa)", "v (mm/min)", "Ra (μm)", "Cost/m"
    );
    for entry in &report.results {
        println!(
            "{:<14} {:>9} {:>7.1} {:>9.0} {:>11.1} {:>9.2} {:>9}",
            entry.variant,
            entry.parameters.material_type.key(),
            entry.parameters.thickness,
            entry.parameters.pressure,
            entry.results.cutting_speed,
            entry.results.surface_roughness,
            entry.results.cost_per_meter,
        );
    }
    println!();
    println!("{} variants computed", report.total_variants);
    Ok(())
}

/// Search for the best pressure and abrasive flow.
pub fn optimize(
    material: &str,
    thickness: f64,
    target: &str,
    min_speed: Option<f64>,
    settings: &EngineSettings,
    json: bool,
) -> CalcResult<()> {
    let target: OptimizationTarget = target.parse()?;
    let mut request = OptimizationRequest::new(MaterialType::from_name(material), thickness, target);
    request.min_speed = min_speed;

    let outcome = optimize_with_settings(&request, settings)?;
    if json {
        return print_json(&outcome);
    }

    print_header("AWJ PARAMETER OPTIMIZATION");
    println!("Target:    {}", outcome.target);
    println!("Material:  {}", outcome.material_type);
    println!("Thickness: {:.1} mm", outcome.thickness);
    if target == OptimizationTarget::MinCost {
        let floor = min_speed.unwrap_or(settings.optimization.default_min_speed);
        println!("Min speed: {:.1} mm/min", floor);
    }
    println!();

    match &outcome.optimized_parameters {
        Some(best) => {
            println!("Best parameters:");
            println!("  Pressure:      {:.1} MPa", best.pressure);
            println!("  Abrasive flow: {:.1} g/s", best.abrasive_flow);
            println!("  Speed:         {:.1} mm/min", best.expected_speed);
            if let Some(cost) = best.expected_cost {
                println!("  Cost per m:    {}", cost);
            }
        }
        None => {
            println!("No feasible parameters: no grid point reaches the minimum speed.");
        }
    }
    Ok(())
}

/// List the material table.
pub fn materials(json: bool) -> CalcResult<()> {
    if json {
        let list: Vec<_> = MaterialType::ALL
            .iter()
            .map(|m| json!({ "key": m.key(), "name": m.display_name(), "properties": m.properties() }))
            .collect();
        return print_json(&list);
    }

    print_header("MATERIALS");
    println!(
        "{:<11} {:<11} {:>8} {:>12} {:>10} {:>10}",
        "Key", "Name", "k", "ρ (kg/m³)", "σ (MPa)", "Roughness"
    );
    for material in MaterialType::ALL {
        let props = material.properties();
        println!(
            "{:<11} {:<11} {:>8.2} {:>12.0} {:>10.0} {:>10.2}",
            material.key(),
            material.display_name(),
            props.k_factor,
            props.density,
            props.tensile_strength,
            props.roughness_factor,
        );
    }
    Ok(())
}

/// List the abrasive mesh catalog.
pub fn mesh_sizes(json: bool) -> CalcResult<()> {
    if json {
        return print_json(&MESH_SIZES);
    }
    print_header("ABRASIVE MESH SIZES");
    for size in &MESH_SIZES {
        println!("  {}", size.label());
    }
    Ok(())
}
