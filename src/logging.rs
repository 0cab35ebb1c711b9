use log::LevelFilter;
use once_cell::sync::OnceCell;

static INIT: OnceCell<()> = OnceCell::new();

// Every entry point may be the first one the host calls,
// so each of them calls this. Only the first call counts.
// RUST_LOG overrides the default level.
pub fn init_once() {
    INIT.get_or_init(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(LevelFilter::Info);
        builder.parse_default_env();
        if builder.try_init().is_err() {
            // Someone else (a test harness, the host) already installed one.
            return;
        }
        log::debug!("logging initialized");
    });
}
