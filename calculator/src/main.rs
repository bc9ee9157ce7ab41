use std::any::Any;
use std::panic;
use std::process::ExitCode;

use calculator::Calculator;
use tagcli::{DispatchConfig, Dispatcher};
use tracing::debug;

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Downstream closed the pipe (e.g. `calculate | head -1`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn main() -> ExitCode {
    install_broken_pipe_handler();

    let root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = match DispatchConfig::discover(&root) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("[calculate][error] {err}");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.parse().unwrap_or_default()),
        )
        .init();

    debug!(?config, "starting calculate v{}", env!("CARGO_PKG_VERSION"));

    let dispatcher = Dispatcher::new(Calculator, config);
    match dispatcher.run(std::env::args_os()) {
        Ok(outcome) => {
            print!("{}", outcome.rendered);
            ExitCode::from(outcome.exit_code() as u8)
        }
        Err(err) => {
            eprintln!("[calculate][error] {err}");
            ExitCode::from(2)
        }
    }
}
