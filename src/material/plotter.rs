use super::{Axis, UniaxialState};
use crate::StrError;
use plotpy::{Curve, Plot};
use std::collections::HashMap;
use std::ffi::OsStr;

/// Plots the results of uniaxial integrations
pub struct Plotter {
    /// Do not draw the grid lines
    pub no_grid: bool,

    /// Holds all curves
    curves: HashMap<(Axis, Axis), Vec<Curve>>,
}

impl Plotter {
    /// Allocates a new instance
    pub fn new() -> Self {
        Plotter {
            no_grid: false,
            curves: HashMap::new(),
        }
    }

    /// Draws a curve
    ///
    /// # Input
    ///
    /// * `x_axis` -- the quantity along the x-axis
    /// * `y_axis` -- the quantity along the y-axis
    /// * `states` -- the recorded states
    /// * `config` -- a function `|curve| {}` to configure the curve
    pub fn draw<F>(&mut self, x_axis: Axis, y_axis: Axis, states: &[UniaxialState], mut config: F)
    where
        F: FnMut(&mut Curve),
    {
        let x = x_axis.calc(states);
        let y = y_axis.calc(states);
        let mut curve = Curve::new();
        config(&mut curve);
        curve.draw(&x, &y);
        self.curves.entry((x_axis, y_axis)).or_insert_with(Vec::new).push(curve);
    }

    /// Saves the curves of an (x_axis, y_axis) pair
    ///
    /// **Note:** Call this function after [Plotter::draw()].
    ///
    /// # Input
    ///
    /// * `x_axis` -- the key of the x-axis already drawn with `draw`
    /// * `y_axis` -- the key of the y-axis already drawn with `draw`
    /// * `filepath` -- may be a String, &str, or Path
    /// * `extra` -- is a function `|plot, before| {}` to perform some {pre,post}-drawing on the plot area.
    ///   **true** indicates that the function is being called before adding the curves;
    ///   **false** indicates that it is being called just before `save`.
    pub fn save<P, F>(&self, x_axis: Axis, y_axis: Axis, filepath: &P, mut extra: F) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
        F: FnMut(&mut Plot, bool),
    {
        let all = self
            .curves
            .get(&(x_axis, y_axis))
            .ok_or("(x_axis, y_axis) curve is not available")?;
        let mut plot = Plot::new();
        extra(&mut plot, true);
        for curve in all {
            plot.add(curve);
        }
        extra(&mut plot, false);
        self.set_labels(&mut plot, x_axis, y_axis);
        plot.save(filepath)
    }

    /// Saves a grid of curves
    ///
    /// **Note:** Call this function after [Plotter::draw()].
    ///
    /// # Input
    ///
    /// * `axes` -- the keys of the (x-axis,y-axis) already drawn with `draw`
    /// * `filepath` -- may be a String, &str, or Path
    /// * `extra` -- is a function `|plot, row, col, before| {}` to perform some {pre,post}-drawing
    ///   on each sub-plot area. For example, use `|_, _, _, _| {}` to do nothing.
    pub fn save_grid<P, F>(&self, axes: &Vec<Vec<(Axis, Axis)>>, filepath: &P, mut extra: F) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
        F: FnMut(&mut Plot, usize, usize, bool),
    {
        let nrow = axes.len();
        if nrow < 1 {
            return Err("there are no rows in the axes array");
        }
        let ncol = axes[0].len();
        if ncol < 1 {
            return Err("there are no columns in the axes array");
        }
        let handle = "grid";
        let mut plot = Plot::new();
        plot.set_gridspec(handle, nrow, ncol, "wspace=0.38,hspace=0.35");
        for row in 0..nrow {
            if axes[row].len() != ncol {
                return Err("the number of columns is inconsistent");
            }
            for col in 0..ncol {
                let (x_axis, y_axis) = axes[row][col];
                let all = self
                    .curves
                    .get(&(x_axis, y_axis))
                    .ok_or("(x_axis, y_axis) curve is not available")?;
                plot.set_subplot_grid(handle, format!("{}", row).as_str(), format!("{}", col).as_str());
                extra(&mut plot, row, col, true);
                for curve in all {
                    plot.add(curve);
                }
                extra(&mut plot, row, col, false);
                self.set_labels(&mut plot, x_axis, y_axis);
            }
        }
        let (width, height) = (300.0 * ncol as f64, 250.0 * nrow as f64);
        plot.set_figure_size_points(width, height).save(filepath)
    }

    /// Draws the stress-strain, damage, and cap curves of a compression test
    pub fn draw_2x2_mosaic<F>(&mut self, states: &[UniaxialState], mut extra: F)
    where
        F: FnMut(&mut Curve, usize, usize),
    {
        let axes = Plotter::mosaic_axes();
        for row in 0..2 {
            for col in 0..2 {
                let (x_axis, y_axis) = axes[row][col];
                self.draw(x_axis, y_axis, states, |curve| extra(curve, row, col));
            }
        }
    }

    /// Saves the 2x2 mosaic
    ///
    /// **Note:** Call this function after [Plotter::draw_2x2_mosaic()].
    pub fn save_2x2_mosaic<P, F>(&self, filepath: &P, extra: F) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
        F: FnMut(&mut Plot, usize, usize, bool),
    {
        self.save_grid(&Plotter::mosaic_axes(), filepath, extra)
    }

    fn mosaic_axes() -> Vec<Vec<(Axis, Axis)>> {
        let percent = true;
        let negative = true;
        vec![
            vec![
                (Axis::Strain(percent), Axis::Stress(negative)),
                (Axis::Strain(percent), Axis::EffectiveStress(negative)),
            ],
            vec![(Axis::Strain(percent), Axis::Damage), (Axis::Index, Axis::Yield)],
        ]
    }

    fn set_labels(&self, plot: &mut Plot, x_axis: Axis, y_axis: Axis) {
        let x = x_axis.label();
        let y = y_axis.label();
        if self.no_grid {
            plot.set_label_x(&x);
            plot.set_label_y(&y);
        } else {
            plot.grid_and_labels(&x, &y);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
