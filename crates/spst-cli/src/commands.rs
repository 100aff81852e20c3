use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use spst_format::{SpstReaderOptions, SpstWriterOptions, read_spst_with_options};
use spst_host::{ExportReport, ImportReport, MemoryDatabase, export_structures, import_structures};

use crate::cli::{InspectArgs, InspectFormatArg, LoadArgs, ProduceArgs};
use spst_cli::listing::render_listing;
use spst_cli::summary::structure_table;

pub fn run_produce(args: &ProduceArgs) -> Result<ExportReport> {
    let span = info_span!("produce", database = %args.database.display());
    let _guard = span.enter();

    let db = MemoryDatabase::load_json(&args.database)
        .with_context(|| format!("load database {}", args.database.display()))?;
    info!(structures = db.len(), "loaded database");

    let options = SpstWriterOptions::new().with_sync(!args.no_sync);
    export_structures(&db, &args.output, &options)
        .with_context(|| format!("write snapshot {}", args.output.display()))
}

pub fn run_load(args: &LoadArgs) -> Result<ImportReport> {
    let span = info_span!("load", input = %args.input.display());
    let _guard = span.enter();

    let mut db = if args.database.exists() {
        MemoryDatabase::load_json(&args.database)
            .with_context(|| format!("load database {}", args.database.display()))?
    } else {
        debug!(database = %args.database.display(), "database missing, starting empty");
        MemoryDatabase::new()
    };

    let report = import_structures(&mut db, &args.input, &reader_options(args.skip_checksum))
        .with_context(|| format!("load snapshot {}", args.input.display()))?;
    db.save_json(&args.database)
        .with_context(|| format!("save database {}", args.database.display()))?;
    Ok(report)
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let structures = read_spst_with_options(&args.input, reader_options(args.skip_checksum))
        .with_context(|| format!("read snapshot {}", args.input.display()))?;
    match args.format {
        InspectFormatArg::Table => println!("{}", structure_table(&structures, args.members)),
        InspectFormatArg::Text => print!("{}", render_listing(&structures, args.members)),
    }
    Ok(())
}

fn reader_options(skip_checksum: bool) -> SpstReaderOptions {
    if skip_checksum {
        SpstReaderOptions::new().without_checksum()
    } else {
        SpstReaderOptions::new()
    }
}
