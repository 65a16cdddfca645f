//! landings-parser — fetch the meteorite landings dataset and write
//! cleaned CSV extracts:
//!
//!   all.csv    every valid landing
//!   fell.csv   landings observed falling
//!   found.csv  landings found later
//!
//! Records with missing or malformed coordinates, mass or year are
//! dropped and counted.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
};

use meteorite_map::load;

const ALL_CSV: &str = "all.csv";
const FELL_CSV: &str = "fell.csv";
const FOUND_CSV: &str = "found.csv";

const CSV_HEADER: &str = "name, year, mass_g, fall";

fn main() -> anyhow::Result<()> {
    let landings = load::load_landings()?;
    eprintln!("[*] Got {} landings.", landings.len());

    // Write to temp files then atomically rename.
    let all_tmp = format!("{}.tmp", ALL_CSV);
    let fell_tmp = format!("{}.tmp", FELL_CSV);
    let found_tmp = format!("{}.tmp", FOUND_CSV);

    let mut skipped = 0usize;
    {
        let mut all_w = csv_writer(&all_tmp)?;
        let mut fell_w = csv_writer(&fell_tmp)?;
        let mut found_w = csv_writer(&found_tmp)?;

        for landing in &landings {
            if !landing.is_valid() {
                skipped += 1;
                continue;
            }
            let row = landing.to_csv_row();
            writeln!(all_w, "{}", row)?;
            if landing.is_fell() {
                writeln!(fell_w, "{}", row)?;
            }
            if landing.is_found() {
                writeln!(found_w, "{}", row)?;
            }
        }

        all_w.flush()?;
        fell_w.flush()?;
        found_w.flush()?;
    }

    fs::rename(&all_tmp, ALL_CSV)?;
    fs::rename(&fell_tmp, FELL_CSV)?;
    fs::rename(&found_tmp, FOUND_CSV)?;

    eprintln!("[*] Skipped {skipped} records with missing or malformed fields.");
    eprintln!("[*] Done — wrote {}, {}, {}.", ALL_CSV, FELL_CSV, FOUND_CSV);
    Ok(())
}

fn csv_writer(path: &str) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    writeln!(w, "{}", CSV_HEADER)?;
    Ok(w)
}
