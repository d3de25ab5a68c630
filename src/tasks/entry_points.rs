/* ********************************************************************** **
**  This file is part of springnet.                                       **
**                                                                        **
**  springnet is free software: you can redistribute it and/or modify it  **
**  under the terms of the GNU General Public License as published by the **
**  Free Software Foundation, either version 3 of the License, or (at     **
**  your option) any later version.                                       **
**                                                                        **
**      http://www.gnu.org/licenses/                                      **
**                                                                        **
** Do note that, while the whole of springnet is licensed under the GPL,  **
** many parts of it are licensed under more permissive terms.             **
** ********************************************************************** */

use crate::{FailResult, GlobalLogger};
use crate::system::{build_params, initial_positions};
use crate::relaxation::relax;

use springnet_tasks_config::{YamlRead, ValidatedSettings, StructureInput};

use clap::{App, Arg};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        } else {
            error!("\
                (If you found the above error message to be particularly lacking in \
                detail, try again with RUST_BACKTRACE=1)\
            ");
        }
        std::process::exit(1);
    });
}

fn read_yaml<T: YamlRead>(path: &Path) -> FailResult<T> {
    let file = File::open(path).map_err(|e| format_err!("{}: {}", path.display(), e))?;
    T::from_reader(BufReader::new(file))
        .map_err(|e| format_err!("{}: {}", path.display(), e))
}

pub fn relax_main() {
    let matches = App::new("springnet-relax")
        .version(crate_version!())
        .about("Relax a periodic network of harmonic springs.")
        .args(&[
            Arg::with_name("config")
                .short("c").long("config")
                .value_name("CONFIG").takes_value(true).required(true)
                .help("settings file (YAML)"),
            Arg::with_name("structure")
                .value_name("STRUCTURE").required(true)
                .help("sites and their neighbours (YAML)"),
            Arg::with_name("output")
                .short("o").long("output")
                .value_name("OUTPUT").takes_value(true)
                .help("write the JSON report here instead of to stdout"),
            Arg::with_name("log")
                .long("log")
                .value_name("FILE").takes_value(true)
                .help("also write the log to this file"),
            Arg::with_name("verbose")
                .short("v").long("verbose").multiple(true)
                .help("log every minimizer step"),
        ])
        .get_matches();

    wrap_result_main(|| {
        let mut logger = GlobalLogger::default();
        logger.verbosity(matches.occurrences_of("verbose") as i32);
        if let Some(path) = matches.value_of_os("log") {
            logger.path(path);
        }
        logger.apply()?;

        // both are required args
        let config = Path::new(matches.value_of_os("config").unwrap_or_default());
        let structure = Path::new(matches.value_of_os("structure").unwrap_or_default());

        let ValidatedSettings(settings) = read_yaml(config)?;
        let input: StructureInput = read_yaml(structure)?;

        let params = build_params(&settings, &input)?;
        let positions = initial_positions(&input);
        let relaxed = relax(&params, &positions, &settings.cg)?;

        let report = json!({
            "value": relaxed.value,
            "termination": relaxed.termination,
            "iterations": relaxed.termination.iterations(),
            "positions": relaxed.positions.iter().map(|v| v.0).collect::<Vec<_>>(),
            "cell": params.lattice().matrix().into_array(),
        });

        match matches.value_of_os("output") {
            Some(path) => {
                let mut w = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(&mut w, &report)?;
                writeln!(w)?;
            },
            None => {
                let stdout = io::stdout();
                let mut w = stdout.lock();
                serde_json::to_writer_pretty(&mut w, &report)?;
                writeln!(w)?;
            },
        }
        Ok(())
    });
}
