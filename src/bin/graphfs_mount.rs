//! Entry point for the `graphfs-mount` binary: parses CLI flags, resolves
//! configuration, constructs the selected [`graphfs::graph::GraphGateway`]
//! backend, and mounts [`graphfs::fs_ops::GraphFs`] via `fuser::mount2`
//! (§10.4), single-threaded and in the foreground per §5.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use fuser::MountOption;
use graphfs::cli::Cli;
use graphfs::config::BackendKind;
use graphfs::fs_ops::GraphFs;
use graphfs::graph::in_memory::InMemoryGateway;
use graphfs::graph::neo4j::Neo4jGateway;
use graphfs::graph::GraphGateway;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match cli.resolve() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("graphfs-mount: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("graphfs-mount: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let graph: Arc<dyn GraphGateway> = match runtime.block_on(build_backend(&config.backend)) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("graphfs-mount: failed to connect to graph backend: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(mountpoint = %config.mountpoint.display(), "mounting graphfs");

    let options = vec![
        MountOption::FSName("graphfs".to_string()),
        MountOption::DefaultPermissions,
    ];

    // Single-threaded, foreground: matches §5's "no worker threads" model.
    if let Err(e) = fuser::mount2(GraphFs::new(graph), &config.mountpoint, &options) {
        eprintln!("graphfs-mount: mount failed: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn build_backend(backend: &BackendKind) -> Result<Arc<dyn GraphGateway>, String> {
    match backend {
        BackendKind::InMemory => Ok(Arc::new(InMemoryGateway::new())),
        BackendKind::Neo4j { uri, user, password } => {
            let password = password.clone().unwrap_or_default();
            let gateway = Neo4jGateway::connect(uri, user, &password)
                .await
                .map_err(|e| e.to_string())?;
            Ok(Arc::new(gateway))
        }
    }
}
