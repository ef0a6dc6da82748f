use crate::Utils::logger::{elapsed_time, save_grid_to_csv, save_grid_to_file, save_trace_to_csv};
use crate::Utils::plots::{plot_grid, plot_grid_gnuplot};
use crate::numerical::Simpson::Simpson_problems::KnownIntegral;
use crate::numerical::Simpson::Simpson_rule::{
    ClosureIntegrand, Integrand, runge_estimate, simpson_rule,
};
use chrono::Local;
use log::{error, info, warn};
use nalgebra::DVector;
use simplelog::*;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::time::Instant;
use tabled::{builder::Builder, settings::Style};

/// Default ceiling on the number of sub-intervals. The refinement loop aborts
/// once doubling pushes n above this bound, so a tolerance that cannot be met
/// never hangs the caller.
pub const MAX_PARTITIONS_DEFAULT: usize = 10_000;

/// Error types for the adaptive quadrature driver
#[derive(Debug, Clone)]
pub enum QuadratureError {
    InvalidInput(String),
    Divergence { n_last: usize, error_last: f64 },
    NumericInstability { n: usize, value: f64 },
}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            QuadratureError::Divergence { n_last, error_last } => write!(
                f,
                "Maximum number of partitions exceeded: n = {}, last runge error = {:.3e}",
                n_last, error_last
            ),
            QuadratureError::NumericInstability { n, value } => {
                write!(f, "Non-finite Simpson sum at n = {}: I = {}", n, value)
            }
        }
    }
}

impl std::error::Error for QuadratureError {}

//////////////////////////////////RESULT AND CONFIG STRUCTURES/////////////////////////////////

/// One row of the refinement trace. The first row carries no Runge estimate,
/// there is nothing to compare the initial approximation against.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    pub iteration: usize,
    pub n: usize,
    pub approximation: f64,
    pub runge_error: Option<f64>,
    pub converged: bool,
}

/// Result structure for the adaptive quadrature driver
#[derive(Debug, Clone)]
pub struct QuadratureResult {
    pub value: f64,
    pub n: usize,
    pub error_estimate: f64,
    pub x_grid: DVector<f64>,
    pub y_grid: DVector<f64>,
    pub trace: Vec<IterationRecord>,
}

/// Configuration for the adaptive quadrature driver
#[derive(Debug, Clone)]
pub struct QuadConfig {
    pub eps: f64,
    pub n0: usize,
    pub max_partitions: usize,
    pub trap_nonfinite: bool,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            eps: 1e-3,
            n0: 4,
            max_partitions: MAX_PARTITIONS_DEFAULT,
            trap_nonfinite: true,
        }
    }
}

//////////////////////////////////MAIN SOLVER STRUCTURE/////////////////////////////////

pub struct SimpsonQuad {
    pub integrand: Box<dyn Integrand>, // function to be integrated
    pub a: f64,                        // lower bound
    pub b: f64,                        // upper bound
    pub config: QuadConfig,

    pub i: usize,         // iteration counter
    pub fun_evals: usize, // total number of integrand evaluations
    pub trace: Vec<IterationRecord>,
    pub result: Option<QuadratureResult>,
    pub exact: Option<f64>, // closed-form reference for reporting, never used by the loop

    pub status: String,
    pub message: Option<String>,
    pub loglevel: Option<String>,
    pub log_to_file: Option<String>,
    calc_statistics: HashMap<String, usize>,
}

impl SimpsonQuad {
    pub fn new() -> SimpsonQuad {
        // defaults reproduce the classic demo task: sin(x)^2 over [-pi/2, pi/2]
        let problem = KnownIntegral::SinSquared;
        let (a, b) = problem.span(None, None);
        SimpsonQuad {
            integrand: problem.integrand(),
            a,
            b,
            config: QuadConfig::default(),
            i: 0,
            fun_evals: 0,
            trace: Vec::new(),
            result: None,
            exact: Some(problem.exact_integral(a, b)),
            status: "initialized".to_string(),
            message: None,
            loglevel: Some("info".to_string()),
            log_to_file: None,
            calc_statistics: HashMap::new(),
        }
    }

    pub fn with_config(config: QuadConfig) -> SimpsonQuad {
        let mut solver = SimpsonQuad::new();
        solver.config = config;
        solver
    }
    ////////////////////////////SETTERS///////////////////////////////////////////////////////////////////
    /// Set a custom integrand and the integration bounds
    pub fn set_problem(&mut self, integrand: Box<dyn Integrand>, a: f64, b: f64) {
        assert!(
            a.is_finite() && b.is_finite(),
            "integration bounds must be finite"
        );
        assert!(a <= b, "lower bound must not exceed upper bound");
        self.integrand = integrand;
        self.a = a;
        self.b = b;
        self.exact = None;
    }

    /// Set a problem from the catalogue of integrands with known closed forms,
    /// the closed-form value is kept for the final report
    pub fn set_known_problem(
        &mut self,
        problem: KnownIntegral,
        start: Option<f64>,
        end: Option<f64>,
    ) {
        let (a, b) = problem.span(start, end);
        let integrand = problem.integrand();
        let exact = problem.exact_integral(a, b);
        self.set_problem(integrand, a, b);
        self.exact = Some(exact);
    }

    pub fn set_tolerance(&mut self, eps: f64) {
        assert!(
            eps > 0.0 && eps.is_finite(),
            "tolerance must be positive and finite"
        );
        self.config.eps = eps;
    }

    pub fn set_initial_partitions(&mut self, n0: usize) {
        assert!(n0 >= 1, "initial number of sub-intervals must be at least 1");
        self.config.n0 = n0;
    }

    pub fn set_solver_params(
        &mut self,
        loglevel: Option<String>,
        max_partitions: Option<usize>,
        trap_nonfinite: Option<bool>,
    ) {
        self.loglevel = if let Some(level) = loglevel {
            assert!(
                level == "debug"
                    || level == "info"
                    || level == "warn"
                    || level == "error"
                    || level == "none"
                    || level == "off",
                "loglevel must be debug/info/warn/error or none/off"
            );
            Some(level.to_string())
        } else {
            self.loglevel.clone()
        };
        self.config.max_partitions = if let Some(ceiling) = max_partitions {
            assert!(ceiling >= 1, "partition ceiling must be at least 1");
            ceiling
        } else {
            self.config.max_partitions
        };
        self.config.trap_nonfinite = if let Some(flag) = trap_nonfinite {
            flag
        } else {
            self.config.trap_nonfinite
        };
    }

    /// Enable logging into a file, a timestamped name is generated when none is given
    pub fn set_log_file(&mut self, filename: Option<String>) {
        let filename = if let Some(filename) = filename {
            filename
        } else {
            let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
            format!("log_{}.txt", date_and_time)
        };
        self.log_to_file = Some(filename);
    }
    /////////////////////////////////////////////////////////////////////////////////////////////
    //                ITERATIONS
    /////////////////////////////////////////////////////////////////////////////////////////////
    fn validate(&self) -> Result<(), QuadratureError> {
        if !self.a.is_finite() || !self.b.is_finite() {
            return Err(QuadratureError::InvalidInput(format!(
                "integration bounds must be finite, got a = {}, b = {}",
                self.a, self.b
            )));
        }
        if self.a > self.b {
            return Err(QuadratureError::InvalidInput(format!(
                "lower bound must not exceed upper bound, got a = {}, b = {}",
                self.a, self.b
            )));
        }
        if !(self.config.eps > 0.0) || !self.config.eps.is_finite() {
            return Err(QuadratureError::InvalidInput(format!(
                "tolerance must be positive and finite, got eps = {}",
                self.config.eps
            )));
        }
        if self.config.n0 == 0 {
            return Err(QuadratureError::InvalidInput(
                "initial number of sub-intervals must be at least 1".to_string(),
            ));
        }
        if self.config.max_partitions == 0 {
            return Err(QuadratureError::InvalidInput(
                "partition ceiling must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn refine(&self, n: usize) -> (f64, DVector<f64>, DVector<f64>) {
        simpson_rule(&|x: f64| self.integrand.evaluate(x), self.a, self.b, n)
    }

    /// main function: doubling refinement of the composite Simpson sum until
    /// the Runge estimate |I_2n - I_n| / 15 drops below the tolerance
    pub fn main_loop(&mut self) -> Result<QuadratureResult, QuadratureError> {
        match self.validate() {
            Ok(()) => {}
            Err(e) => {
                self.status = "failed".to_string();
                self.message = Some(e.to_string());
                return Err(e);
            }
        }
        self.status = "running".to_string();
        self.message = None;
        self.result = None;
        self.trace = Vec::new();
        self.fun_evals = 0;
        let eps = self.config.eps;

        let (mut I_n, x0, _y0) = self.refine(self.config.n0);
        // the evaluator bumps an odd n0 to the next even number, the actual
        // count is recovered from the grid length
        let mut n = x0.len() - 1;
        self.fun_evals += x0.len();
        self.i = 1;
        if self.config.trap_nonfinite && !I_n.is_finite() {
            self.status = "failed".to_string();
            error!("Non-finite Simpson sum at n = {}, aborting", n);
            let err = QuadratureError::NumericInstability { n, value: I_n };
            self.message = Some(err.to_string());
            return Err(err);
        }
        self.trace.push(IterationRecord {
            iteration: 1,
            n,
            approximation: I_n,
            runge_error: None,
            converged: false,
        });
        info!("iteration = 1, n = {}, I = {:.10}, runge error = none", n, I_n);

        let mut last_estimate: Option<f64> = None;
        loop {
            let n_new = 2 * n;
            let (I_2n, x_2n, y_2n) = self.refine(n_new);
            self.fun_evals += x_2n.len();
            let e = runge_estimate(I_n, I_2n);
            self.i += 1;
            if self.config.trap_nonfinite && (!I_2n.is_finite() || !e.is_finite()) {
                self.status = "failed".to_string();
                error!("Non-finite Simpson sum at n = {}, aborting", n_new);
                let err = QuadratureError::NumericInstability {
                    n: n_new,
                    value: I_2n,
                };
                self.message = Some(err.to_string());
                return Err(err);
            }
            let converged = e < eps;
            self.trace.push(IterationRecord {
                iteration: self.i,
                n: n_new,
                approximation: I_2n,
                runge_error: Some(e),
                converged,
            });
            info!(
                "iteration = {}, n = {}, I = {:.10}, runge error = {:.3e}",
                self.i, n_new, I_2n, e
            );
            if let Some(prev) = last_estimate {
                if e > prev {
                    warn!("Runge estimate is increasing");
                }
            }
            last_estimate = Some(e);

            if converged {
                let result = QuadratureResult {
                    value: I_2n,
                    n: n_new,
                    error_estimate: e,
                    x_grid: x_2n,
                    y_grid: y_2n,
                    trace: self.trace.clone(),
                };
                self.status = "finished".to_string();
                self.result = Some(result.clone());
                return Ok(result);
            }

            I_n = I_2n;
            n = n_new;
            // the ceiling check mirrors the classic behavior: the doubled grid
            // is evaluated first, so the reported n is the first doubling that
            // went past the ceiling
            if n > self.config.max_partitions {
                self.status = "failed".to_string();
                error!(
                    "Maximum number of partitions reached. No convergence achieved: n = {}, runge error = {:.3e}",
                    n, e
                );
                let err = QuadratureError::Divergence {
                    n_last: n,
                    error_last: e,
                };
                self.message = Some(err.to_string());
                return Err(err);
            }
        }
    }
    ////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
    //                                       main functions to start the solver and caclulate statistics
    ////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

    pub fn solver(&mut self) -> Result<QuadratureResult, QuadratureError> {
        let begin = Instant::now();
        let res = self.main_loop();
        let end = begin.elapsed();
        elapsed_time(end);
        let time = end.as_millis() as usize;

        self.calc_statistics
            .insert("time elapsed, ms".to_string(), time);
        self.calc_statistics();

        res
    }

    // wrapper around solver function to implement logging
    pub fn solve(&mut self) -> Result<QuadratureResult, QuadratureError> {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if is_logging_disabled {
            self.solver()
        } else {
            let loglevel = self.loglevel.clone();
            let log_option = if let Some(level) = loglevel {
                match level.as_str() {
                    "debug" => LevelFilter::Debug,
                    "info" => LevelFilter::Info,
                    "warn" => LevelFilter::Warn,
                    "error" => LevelFilter::Error,
                    _ => panic!("loglevel must be debug, info, warn or error"),
                }
            } else {
                LevelFilter::Info
            };
            println!(" \n \n Program started with loglevel: {}", log_option);
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                log_option,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )];
            if let Some(ref filename) = self.log_to_file {
                if let Ok(file) = File::create(filename) {
                    loggers.push(WriteLogger::new(log_option, Config::default(), file));
                }
            }
            let logger_instance = CombinedLogger::init(loggers);

            match logger_instance {
                Ok(()) => {
                    let res = self.solver();
                    info!(" \n \n Program ended");
                    res
                }
                Err(_) => {
                    let res = self.solver();
                    res
                } //end Error
            }
        }
    }

    fn calc_statistics(&self) {
        let mut stats = self.calc_statistics.clone();
        stats.insert("number of iterations".to_string(), self.i);
        stats.insert("integrand evaluations".to_string(), self.fun_evals);
        if let Some(last) = self.trace.last() {
            stats.insert("final number of sub-intervals".to_string(), last.n);
        }
        let mut table = Builder::from(stats).build();
        table.with(Style::modern_rounded());
        info!("\n \n CALC STATISTICS \n \n {}", table.to_string());
    }
    ////////////////////////////GETTERS AND REPORTING/////////////////////////////////////////////////////

    pub fn get_result(&self) -> Option<QuadratureResult> {
        self.result.clone()
    }

    pub fn get_trace(&self) -> Vec<IterationRecord> {
        self.trace.clone()
    }

    pub fn get_status(&self) -> &String {
        &self.status
    }

    /// Render the refinement trace as a pretty table, one row per iteration,
    /// a dash in the error column of the first row
    pub fn trace_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["iteration", "n", "I(n)", "runge error", "converged"]);
        for record in &self.trace {
            let error_entry = match record.runge_error {
                Some(e) => format!("{:.3e}", e),
                None => "-".to_string(),
            };
            let converged_entry = if record.runge_error.is_none() {
                "-".to_string()
            } else if record.converged {
                "yes".to_string()
            } else {
                "no".to_string()
            };
            builder.push_record([
                record.iteration.to_string(),
                record.n.to_string(),
                format!("{:.10}", record.approximation),
                error_entry,
                converged_entry,
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    pub fn print_trace(&self) {
        info!("\n \n ITERATION TRACE \n \n {}", self.trace_table());
    }

    /// Final results block: converged value, grid size, error estimate and,
    /// when the problem came from the catalogue, the deviation from the
    /// closed-form value
    pub fn report(&self) -> String {
        match &self.result {
            Some(result) => {
                let mut out = String::new();
                out.push_str(&format!(
                    "integral of {} over [{}, {}]\n",
                    self.integrand.name(),
                    self.a,
                    self.b
                ));
                out.push_str(&format!("I = {:.10}\n", result.value));
                out.push_str(&format!("sub-intervals: {}\n", result.n));
                out.push_str(&format!(
                    "runge error estimate: {:.3e}\n",
                    result.error_estimate
                ));
                out.push_str(&format!("iterations: {}\n", result.trace.len()));
                if let Some(exact) = self.exact {
                    out.push_str(&format!("closed-form value: {:.10}\n", exact));
                    out.push_str(&format!(
                        "absolute deviation: {:.3e}\n",
                        (result.value - exact).abs()
                    ));
                }
                out
            }
            None => "no result yet, run solve() first".to_string(),
        }
    }
    ////////////////////////////PLOTTING AND SAVING/////////////////////////////////////////////////////

    pub fn plot_result(&self) {
        if let Some(ref result) = self.result {
            if self.a == self.b {
                warn!("zero-width interval, nothing to plot");
                return;
            }
            let (curve_x, curve_y) = self.dense_curve(200);
            plot_grid(
                self.integrand.name().to_string(),
                "x".to_string(),
                &curve_x,
                &curve_y,
                &result.x_grid,
                &result.y_grid,
            );
            info!("Simpson result plotted");
        } else {
            warn!("no result to plot, run solve() first");
        }
    }

    pub fn plot_result_gnuplot(&self) {
        if let Some(ref result) = self.result {
            if self.a == self.b {
                warn!("zero-width interval, nothing to plot");
                return;
            }
            let (curve_x, curve_y) = self.dense_curve(200);
            plot_grid_gnuplot(
                self.integrand.name().to_string(),
                "x".to_string(),
                &curve_x,
                &curve_y,
                &result.x_grid,
                &result.y_grid,
            );
            info!("Simpson result plotted");
        } else {
            warn!("no result to plot, run solve() first");
        }
    }

    // dense resampling of the integrand for the smooth curve on the plots
    fn dense_curve(&self, num_values: usize) -> (DVector<f64>, DVector<f64>) {
        let step = (self.b - self.a) / ((num_values - 1) as f64);
        let x = DVector::from_fn(num_values, |i, _| self.a + (i as f64) * step);
        let y = x.map(|xi| self.integrand.evaluate(xi));
        (x, y)
    }

    /// Save the final grid (tab-separated text and csv) and the trace (csv)
    /// into the current directory
    pub fn save_result(&self) -> Result<(), Box<dyn std::error::Error>> {
        match &self.result {
            Some(result) => {
                let varname = self.integrand.name().to_string();
                save_grid_to_file(
                    &result.y_grid,
                    &varname,
                    "result.txt",
                    &result.x_grid,
                    &"x".to_string(),
                )?;
                save_grid_to_csv(
                    &result.y_grid,
                    &varname,
                    "result.csv",
                    &result.x_grid,
                    &"x".to_string(),
                )?;
                save_trace_to_csv(&result.trace, "result_trace.csv")?;
                info!("Simpson result saved");
                Ok(())
            }
            None => {
                warn!("no result to save, run solve() first");
                Ok(())
            }
        }
    }
}

impl Default for SimpsonQuad {
    fn default() -> Self {
        Self::new()
    }
}

// Convenience function for quick usage
pub fn integrate<F>(
    f: F,
    a: f64,
    b: f64,
    eps: f64,
    n0: usize,
) -> Result<QuadratureResult, QuadratureError>
where
    F: Fn(f64) -> f64 + 'static,
{
    let mut solver = SimpsonQuad::new();
    solver.integrand = Box::new(ClosureIntegrand::new(f, "integrand".to_string()));
    solver.a = a;
    solver.b = b;
    solver.exact = None;
    solver.config.eps = eps;
    solver.config.n0 = n0;
    solver.main_loop()
}
