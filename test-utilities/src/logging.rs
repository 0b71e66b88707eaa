use crate::DEFAULT_FILTER;

#[ctor::ctor(anonymous)]
fn install_test_logger() {
    // Another logger may already be installed by `test_log::test`.
    let _ = env_logger::builder()
        .parse_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .format_level(true)
        .format_module_path(true)
        .format_timestamp(None)
        // Keep log lines on stdout, apart from panic messages on stderr.
        .target(env_logger::Target::Stdout)
        .is_test(true)
        .try_init();
}
