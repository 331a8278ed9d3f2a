use std::future::Future;
use std::sync::Once;

pub type Instant = web_time::Instant;

static LOGGER_INIT: Once = Once::new();

pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(fut);
}

/// Console logging plus a panic hook that reports to the console.
/// The argument is ignored in the browser; it mirrors the native signature.
pub fn init_logging(_log_file: &str) -> anyhow::Result<()> {
    LOGGER_INIT.call_once(|| {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    });
    Ok(())
}
