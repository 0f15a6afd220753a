#![allow(dead_code, unused_macros)]

use tracing_subscriber::EnvFilter;

/// Installs a test writer subscriber filtered by `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Collects the elements a traversal visits into a `Vec`.
macro_rules! collect {
    ($tree:ident . $walk:ident) => {{
        let mut out = Vec::new();
        let _ = $tree.$walk(|x| {
            out.push(x.clone());
            ::std::ops::ControlFlow::<()>::Continue(())
        });
        out
    }};
}
