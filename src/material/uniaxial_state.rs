use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Holds one (strain, stress) pair of a uniaxial curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressStrainSample {
    /// Total axial strain (positive in compression)
    pub strain: f64,

    /// Reported (damaged) axial stress (negative in compression)
    pub stress: f64,
}

/// Holds the state recorded at one step of a uniaxial integration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniaxialState {
    /// Total axial strain ε
    pub strain: f64,

    /// Reported stress σ = (1 - d) σ̄
    pub stress: f64,

    /// Undamaged (effective) stress σ̄
    pub effective_stress: f64,

    /// Elastic strain εe
    pub elastic_strain: f64,

    /// Accumulated plastic strain εp
    pub plastic_strain: f64,

    /// Cap position κ
    pub kappa: f64,

    /// Accumulated plastic volume strain εv_p
    pub eps_v_p: f64,

    /// Scalar damage d
    pub damage: f64,

    /// Yield function evaluated at the trial stress
    pub yield_value: f64,

    /// Indicates that the step did not require a plastic correction
    pub elastic: bool,
}

/// Holds the ordered sequence of states produced by a uniaxial integration
///
/// The order follows the strain history (it is not sorted by value).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UniaxialCurve {
    /// All recorded states
    pub states: Vec<UniaxialState>,

    /// Indicates that the whole strain history has been processed
    ///
    /// A curve returned with an integration error is truncated at the failing step.
    pub complete: bool,
}

impl UniaxialCurve {
    /// Allocates a new (incomplete) instance with a given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        UniaxialCurve {
            states: Vec::with_capacity(capacity),
            complete: false,
        }
    }

    /// Returns the number of recorded states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Indicates that no state has been recorded
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the (strain, stress) samples
    pub fn samples(&self) -> Vec<StressStrainSample> {
        self.states
            .iter()
            .map(|s| StressStrainSample {
                strain: s.strain,
                stress: s.stress,
            })
            .collect()
    }

    /// Returns all total strains
    pub fn strains(&self) -> Vector {
        Vector::from(&self.states.iter().map(|s| s.strain).collect::<Vec<_>>())
    }

    /// Returns all reported stresses
    pub fn stresses(&self) -> Vector {
        Vector::from(&self.states.iter().map(|s| s.stress).collect::<Vec<_>>())
    }

    /// Returns all damage values
    pub fn damages(&self) -> Vector {
        Vector::from(&self.states.iter().map(|s| s.damage).collect::<Vec<_>>())
    }

    /// Returns the number of steps with a plastic correction
    pub fn nplastic(&self) -> usize {
        self.states.iter().filter(|s| !s.elastic).count()
    }

    /// Returns the index and the state with the largest stress magnitude
    ///
    /// The first occurrence wins in case of ties.
    pub fn peak(&self) -> Option<(usize, &UniaxialState)> {
        let mut res: Option<(usize, &UniaxialState)> = None;
        for (i, state) in self.states.iter().enumerate() {
            match res {
                Some((_, best)) if f64::abs(state.stress) <= f64::abs(best.stress) => (),
                _ => res = Some((i, state)),
            }
        }
        res
    }

    /// Writes a JSON file with the recorded states
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let file = File::create(&path).map_err(|_| "cannot create file")?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }

    /// Reads a JSON file with the recorded states
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "file not found")?;
        let reader = BufReader::new(file);
        let data = serde_json::from_reader(reader).map_err(|_| "deserialize failed")?;
        Ok(data)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
