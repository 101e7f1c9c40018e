use curlscope::core;
use curlscope::status::ExitStatus;

/// Entry point - runs one analysis cycle via core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    let args: Vec<String> = std::env::args().collect();
    core::run(args)
}
