use std::process::ExitCode;

use hello_triangle::abs::App;
use hello_triangle::settings::Settings;

fn main() -> ExitCode {
    let (settings, settings_error) = Settings::load();
    if let Err(e) = hello_triangle::logging::init(&settings) {
        eprintln!("WARNING: could not install logger: {e}");
    }
    if let Some(e) = settings_error {
        log::warn!("{e}; using default settings");
    }

    let result = hello_triangle::run(&settings, App::open);
    if let Err(e) = &result {
        log::error!("{e}");
    }
    ExitCode::from(hello_triangle::exit_status(&result))
}
