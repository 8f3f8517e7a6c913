//! tiffwalk - Walk the directories of a TIFF or BigTIFF file.
//!
//! Prints the header and every field of the main directory chain, optionally
//! followed by the Exif directories and the image configuration.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiffwalk::{
    config::Config, parse_exif, ByteReader, ClassicDialect, Container, Directory, FileReader,
    HandlerRegistry, Registry, TiffError,
};

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), TiffError> {
    let registry = Registry::with_options(&config.registry_options());
    if config.tiff85 {
        registry
            .versions()
            .register(Arc::new(ClassicDialect::tiff85()));
    }

    let reader = if config.reads_stdin() {
        ByteReader::from_stream(std::io::stdin())
    } else {
        ByteReader::new(Arc::new(FileReader::open(&config.path)?))
    };
    debug!(source = reader.identifier(), "Opened source");

    let container = Container::parse(reader, &registry, &config.parse_options())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_container(&mut out, &container, config.full).map_err(output_error)?;

    if config.exif {
        let exif = parse_exif(&container)?;
        print_directory(&mut out, "Exif", &exif.exif, config.full).map_err(output_error)?;
        if let Some(gps) = &exif.gps {
            print_directory(&mut out, "GPS", gps, config.full).map_err(output_error)?;
        }
        if let Some(interop) = &exif.interop {
            print_directory(&mut out, "Interoperability", interop, config.full)
                .map_err(output_error)?;
        }
    }

    if config.image {
        let decoder = HandlerRegistry::new().decoder(&container)?;
        let image = decoder.config()?;
        writeln!(out).map_err(output_error)?;
        writeln!(
            out,
            "Image: {}x{}, {} samples {:?} bits, compression {}, {:?}",
            image.width,
            image.height,
            image.samples_per_pixel,
            image.bits_per_sample,
            image.compression,
            image.color_model
        )
        .map_err(output_error)?;
    }

    Ok(())
}

fn print_container(
    out: &mut impl Write,
    container: &Container,
    full: bool,
) -> std::io::Result<()> {
    let header = container.header();
    writeln!(out, "Source: {}", container.reader().identifier())?;
    writeln!(out, "Byte order: {}", header.byte_order)?;
    writeln!(
        out,
        "Version: {} ({:?}, {}-byte offsets)",
        header.version, header.layout, header.offset_size
    )?;
    writeln!(out, "First IFD: {}", header.first_ifd_offset)?;

    for (index, directory) in container.directories().iter().enumerate() {
        print_directory(out, &format!("IFD {}", index), directory, full)?;
    }
    Ok(())
}

fn print_directory(
    out: &mut impl Write,
    label: &str,
    directory: &Directory,
    full: bool,
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} at {} ({} entries, next {})",
        label,
        directory.offset(),
        directory.entry_count(),
        directory.next_offset()
    )?;
    for field in directory.fields() {
        if full {
            writeln!(out, "  {:#}", field)?;
        } else {
            writeln!(out, "  {}", field)?;
        }
    }
    Ok(())
}

fn output_error(e: std::io::Error) -> TiffError {
    TiffError::Io(tiffwalk::IoError::Source {
        offset: 0,
        message: format!("stdout: {}", e),
    })
}

/// Initialize the tracing subscriber.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tiffwalk=debug"
    } else {
        "tiffwalk=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
