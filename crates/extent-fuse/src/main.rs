#![warn(missing_docs)]
//! fuse-extent mount helper: resolves session options from the command line.

use anyhow::Context;
use extent_fuse::diag::diagnostic_line;
use extent_fuse::{Parsed, SessionOptions, VERSION_BANNER};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let debug = args.iter().any(|a| a == "-d" || a == "--debug");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let session = match SessionOptions::from_args(args) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("failed to parse options: {}", e);
            std::process::exit(e.to_errno());
        }
    };

    if session.cmd.version {
        println!("{}", VERSION_BANNER);
    }

    tracing::debug!(
        "resolved session: {}",
        serde_json::to_string(&session).context("failed to encode session")?
    );

    let mount_point = session
        .cmd
        .mount_point
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    tracing::info!(
        "mount point {} ({} via {}, legacy {}), fusermount options `{}`",
        mount_point,
        session.mount.fs_type(),
        session.mount.source(),
        session.mount.legacy_source(),
        session.mount.fusermount_options()
    );

    for line in [
        diagnostic_line(&Parsed {
            options: session.cmd.clone(),
            leftover: session.unknown.clone(),
        }),
        diagnostic_line(&Parsed {
            options: session.mount.clone(),
            leftover: session.unknown.clone(),
        }),
        diagnostic_line(&Parsed {
            options: session.conn.clone(),
            leftover: session.unknown.clone(),
        }),
    ] {
        println!("{}", line);
    }

    Ok(())
}
