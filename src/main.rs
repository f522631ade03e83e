use anyhow::Context;
use clap::Parser;
use log::info;

use sbm_bench::config::{GenArgs, SweepConfig};
use sbm_bench::generator::{generate, make_rng};
use sbm_bench::logger::init_logger;
use sbm_bench::sink::{BlobSink, LocalSink, SshSink};

fn main() -> anyhow::Result<()> {
    let args = GenArgs::parse();
    args.validate()?;
    init_logger();

    let sweep = match &args.sweep_config {
        Some(path) => SweepConfig::from_yaml_file(path)?,
        None => SweepConfig::default(),
    };

    let mut sink: Box<dyn BlobSink> = match &args.remote {
        Some(host) => {
            info!("Saving graphs on remote host {host}");
            Box::new(SshSink::new(host.clone()))
        }
        None => Box::new(LocalSink),
    };

    let mut rng = make_rng(args.seed);
    generate(&args, &sweep, sink.as_mut(), &mut rng).context("graph generation failed")?;
    Ok(())
}
