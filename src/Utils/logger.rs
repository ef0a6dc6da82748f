use crate::numerical::Simpson::Simpson_main::IterationRecord;
use csv::Writer;
use log::info;
use nalgebra::DVector;
use std::fs::File;
use std::io::{self, Write};
use std::time::Duration;

pub fn save_grid_to_file(
    y: &DVector<f64>,
    varname: &String,
    filename: &str,
    x_mesh: &DVector<f64>,
    arg: &String,
) -> io::Result<()> {
    let mut file = File::create(filename)?;
    // Write headers
    writeln!(file, "{}\t{}", arg, varname)?;
    for (i, yi) in y.iter().enumerate() {
        writeln!(file, "{}\t{}", x_mesh[i], yi)?;
    }

    Ok(())
}

pub fn save_grid_to_csv(
    y: &DVector<f64>,
    varname: &String,
    filename: &str,
    x_mesh: &DVector<f64>,
    arg: &String,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(&[arg.clone(), varname.clone()])?;

    // Write data rows
    for (i, yi) in y.iter().enumerate() {
        writer.write_record(&[x_mesh[i].to_string(), yi.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Dump the refinement trace as csv, an empty error cell on the first row
pub fn save_trace_to_csv(trace: &Vec<IterationRecord>, filename: &str) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(&["iteration", "n", "approximation", "runge_error", "converged"])?;
    for record in trace {
        let error_entry = match record.runge_error {
            Some(e) => e.to_string(),
            None => String::new(),
        };
        writer.write_record(&[
            record.iteration.to_string(),
            record.n.to_string(),
            record.approximation.to_string(),
            error_entry,
            record.converged.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn elapsed_time(elapsed: Duration) -> (String, f64) {
    let time = elapsed.as_millis();
    if time < 1000 {
        info!("Elapsed {} ms", time);
        (" ms ".to_string(), time as f64)
    } else if time >= 1000 && time < 60_000 {
        info!("Elapsed {} s", elapsed.as_secs());
        (" s".to_string(), elapsed.as_secs() as f64)
    } else if time >= 60_000 && time < 3600_000 {
        info!("Elapsed {} min", elapsed.as_secs() / 60);
        (" min".to_string(), elapsed.as_secs() as f64 / 60.0)
    } else {
        info!("Elapsed {} h", elapsed.as_secs() / 3600);
        (" h".to_string(), elapsed.as_secs() as f64 / 3600.0)
    }
}
