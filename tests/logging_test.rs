use eclipse_ngin::flow::init_logger;

#[test]
fn logger_installs_once() {
    init_logger();
    init_logger();
    log::error!("logger is installed");
    assert!(log::log_enabled!(log::Level::Error));
}
