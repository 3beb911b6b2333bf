#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    eclipse_ngin::flow::init_logger();
    let config = eclipse_ngin::SceneConfig::from_env()?;
    eclipse_ngin::run(Some(config))
}

// the web build starts from `flow::run_web`
#[cfg(target_arch = "wasm32")]
fn main() {}
