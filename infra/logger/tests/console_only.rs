use autoapi_domain::settings::LoggingSettings;
use autoapi_logger::Logger;

#[test]
fn settings_without_path_log_to_console_only() {
    let settings = LoggingSettings { level: "debug".to_owned(), ..LoggingSettings::default() };

    let logger = Logger::from_settings("integration-console-only", &settings, 0)
        .expect("logger should initialize");

    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
