//! Shared binary entry points: logging setup and the wire dispatch loop.

use std::process::ExitCode;

use tokio::io::AsyncReadExt;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use infrar_engine::Plugin;
use infrar_proto::{Request, Response, COMMAND_GENERATE};

/// Initialize logging to stderr.
///
/// Stdout carries the wire response, so diagnostics must never go there.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive("infrar_engine=info".parse().unwrap())
                .add_directive("infrar_template=info".parse().unwrap())
                .add_directive("infrar_gcp=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();
}

/// Process one serialized request.
///
/// Returns the response to write and the process exit code: 0 for a
/// successful exchange, 1 for a fatal error (malformed input, unknown
/// command, or a leaf-local failure).
pub async fn dispatch(plugin: &dyn Plugin, input: &str) -> (Response, u8) {
    let request = match Request::from_json(input) {
        Ok(request) => request,
        Err(err) => {
            return (Response::failure(format!("failed to parse input: {err}")), 1);
        }
    };

    match request.command.as_str() {
        COMMAND_GENERATE => match plugin.generate(&request).await {
            Ok(response) => (response, 0),
            Err(err) => (Response::failure(err.to_string()), 1),
        },
        other => (Response::failure(format!("unknown command: {other}")), 1),
    }
}

/// Full plugin run: read the request from stdin, dispatch, write the
/// response to stdout.
pub async fn run_plugin(plugin: &dyn Plugin) -> ExitCode {
    let mut input = String::new();
    if let Err(err) = tokio::io::stdin().read_to_string(&mut input).await {
        return respond_error(format!("failed to read input: {err}"));
    }

    debug!("Received {} bytes of input", input.len());
    let (response, code) = dispatch(plugin, &input).await;
    write_response(&response);
    ExitCode::from(code)
}

/// Report a fatal error as a wire response and a non-zero exit.
pub fn respond_error(message: impl Into<String>) -> ExitCode {
    write_response(&Response::failure(message));
    ExitCode::from(1)
}

fn write_response(response: &Response) {
    match response.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to encode response: {err}"),
    }
}
