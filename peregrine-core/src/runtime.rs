use anyhow::Result;
use log::debug;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

static GLOBAL_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Process-wide runtime for callers that arrive without one, such as
/// foreign-language bindings.
pub fn global_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = GLOBAL_RUNTIME.get() {
        return Ok(runtime);
    }

    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);
    let threads = std::cmp::max(threads, 2);
    debug!("Initializing global runtime with {} threads", threads);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .thread_name("peregrine-worker")
        .enable_all()
        .build()?;

    // A concurrent initializer may have won; its runtime is kept and ours dropped.
    Ok(GLOBAL_RUNTIME.get_or_init(|| runtime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_is_shared() {
        let first = global_runtime().unwrap() as *const Runtime;
        let second = global_runtime().unwrap() as *const Runtime;
        assert_eq!(first, second);
        assert_eq!(global_runtime().unwrap().block_on(async { 2 + 2 }), 4);
    }
}
