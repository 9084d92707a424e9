//! FILENAME: app/cli/src/main.rs
// PURPOSE: Command-line entry point.
// FORMAT: seq|level|category|message (stderr), result line on stdout

fn main() -> std::process::ExitCode {
    app_lib::run()
}
