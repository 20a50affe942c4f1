use cscm::base::{CebFip, MaterialConstants, ParamCscm, Revision};
use cscm::material::{Plotter, Settings, UniaxialIntegrator};
use cscm::StrError;
use plotpy::linspace;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "cscm_curve",
    about = "Computes the CSCM constants of concrete and its uniaxial compression response"
)]
struct Options {
    /// Compressive strength fc (MPa)
    #[structopt(long, default_value = "35")]
    strength: f64,

    /// Maximum aggregate size (mm)
    #[structopt(long, default_value = "19")]
    aggregate: f64,

    /// Revision of the parameter fits (1, 2, or 3)
    #[structopt(long, default_value = "3")]
    revision: u8,

    /// Number of points of the strain ramp
    #[structopt(long, default_value = "1000")]
    points: usize,

    /// Final strain of the ramp (positive in compression)
    #[structopt(long, default_value = "0.01")]
    max_strain: f64,

    /// JSON file with all parameters (replaces strength, aggregate, and revision)
    #[structopt(long)]
    param: Option<String>,

    /// Output JSON file with the keyword fields
    #[structopt(long)]
    keyword: Option<String>,

    /// Output JSON file with the stress-strain curve
    #[structopt(long)]
    curve: Option<String>,

    /// Output SVG file with the stress-strain figure
    #[structopt(long)]
    plot: Option<String>,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // parameters
    let param = match &options.param {
        Some(path) => ParamCscm::read_json(path)?,
        None => ParamCscm {
            strength: options.strength,
            aggregate_size: options.aggregate,
            revision: Revision::try_from(options.revision)?,
            ..ParamCscm::new()
        },
    };
    if let Some(msg) = param.validate() {
        println!("ERROR: {}", msg);
        return Err("cannot compute the constants because param.validate() failed");
    }
    if options.points < 2 {
        return Err("the number of points must be ≥ 2");
    }

    // constants
    let provider = CebFip::new();
    let mat = MaterialConstants::from_provider(&provider, &param)?;
    let keyword = mat.keyword(&param);

    // uniaxial compression
    let integrator = UniaxialIntegrator::new(&mat, Settings::from_param(&param))?;
    let strains = linspace(0.0, options.max_strain, options.points);
    let curve = match integrator.run(&strains) {
        Ok(curve) => curve,
        Err(err) => {
            println!("ERROR: {}", err);
            if let Some(path) = &options.curve {
                err.partial.write_json(path)?;
            }
            return Err(err.reason);
        }
    };

    // summary
    let thin_line = format!("{:─^1$}", "", 48);
    println!("\n{}", thin_line);
    println!("CSCM constants ({}, fc = {} MPa, dmax = {} mm)", param.revision, param.strength, param.aggregate_size);
    println!("{}", thin_line);
    println!("{}", keyword);
    println!("{}", thin_line);
    if let Some((index, peak)) = curve.peak() {
        println!("peak stress    = {:.4} MPa", peak.stress);
        println!("peak strain    = {:.6}", peak.strain);
        println!("peak index     = {}", index);
        println!("damage at peak = {:.4}", peak.damage);
    }
    println!("plastic steps  = {}", curve.nplastic());
    println!("{}\n", thin_line);

    // outputs
    if let Some(path) = &options.keyword {
        keyword.write_json(path)?;
        println!("keyword fields written to {}", path);
    }
    if let Some(path) = &options.curve {
        curve.write_json(path)?;
        println!("stress-strain curve written to {}", path);
    }
    if let Some(path) = &options.plot {
        let mut plotter = Plotter::new();
        plotter.draw_2x2_mosaic(&curve.states, |_, _, _| {});
        plotter.save_2x2_mosaic(path, |_, _, _, _| {})?;
        println!("figure written to {}", path);
    }
    Ok(())
}
