use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use asar_pack::archive::{pack_archive, ArchiveMember, HeaderSizes, PackOptions, PackOptionsOverrides};

use super::args::Cli;
use crate::exit_codes;

/// Resolve pack options: defaults, then the config file, then flags.
fn load_options(cli: &Cli) -> anyhow::Result<PackOptions> {
    let mut options = PackOptions::default();

    if let Some(path) = &cli.config {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let overrides: PackOptionsOverrides = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config: {}", path.display()))?;
        options = options.apply(overrides);
    }

    options = options.apply(PackOptionsOverrides {
        integrity: cli.no_integrity.then_some(false),
        max_archive_bytes: cli.max_archive_bytes,
    });

    Ok(options)
}

fn read_members(base: &Path, names: &[String]) -> anyhow::Result<Vec<Vec<u8>>> {
    names
        .iter()
        .map(|name| {
            let path = base.join(name);
            std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
}

pub fn run(cli: Cli) -> anyhow::Result<i32> {
    let options = load_options(&cli)?;
    let contents = read_members(&cli.base, &cli.files)?;

    let members = cli
        .files
        .iter()
        .zip(&contents)
        .map(|(name, data)| ArchiveMember::new(name.as_str(), data));

    let archive = match pack_archive(members, &options) {
        Ok(archive) => archive,
        Err(e) => {
            eprintln!("error: {e} ({})", e.code());
            return Ok(e.exit_code());
        }
    };

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    archive
        .write_to(BufWriter::new(file))
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    tracing::info!(
        members = cli.files.len(),
        bytes = archive.total_len(),
        output = %cli.output.display(),
        "wrote archive"
    );

    if cli.verbose {
        if let Some(sizes) = HeaderSizes::parse(archive.header()) {
            eprintln!(
                "header: {} bytes ({} directory + {} padding)",
                sizes.header_len(),
                sizes.directory_len(),
                sizes.padding()
            );
        }
        eprintln!(
            "archive: {} members, {} bytes, integrity {}",
            cli.files.len(),
            archive.total_len(),
            if options.integrity { "on" } else { "off" }
        );
    }

    Ok(exit_codes::SUCCESS)
}
