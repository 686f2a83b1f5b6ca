#[cfg(unix)]
fn main() -> std::io::Result<()> {
    use portal_drawer::platform::install_signal_handlers;
    use portal_drawer::{build_demo, DemoRuntime, EnvConfig, ProcessTerminal};

    let config = EnvConfig::from_env();
    let host = build_demo(&config);
    let terminal = ProcessTerminal::new(config.write_log.clone());
    let mut runtime = DemoRuntime::new(terminal, Box::new(host));

    let stop = runtime.render_handle();
    let _signals = install_signal_handlers(move || stop.request_stop())?;

    runtime.start()?;
    runtime.run();
    runtime.stop()
}

#[cfg(not(unix))]
fn main() {
    eprintln!("portal_drawer needs a unix terminal");
    std::process::exit(1);
}
