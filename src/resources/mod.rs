//! Loading of external files: the star sprite and, on the web, the scene
//! configuration. Native builds read from `./assets`, web builds fetch from
//! `<origin>/assets`.

pub mod texture;

use crate::config::{DEFAULT_CONFIG_FILE, SceneConfig};

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("no origin: {:?}", e))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        std::fs::read_to_string(path)?
    };

    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url)
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        std::fs::read(path)?
    };

    Ok(data)
}

/// Scene configuration shipped next to the other assets. A missing file
/// yields the defaults; an invalid one is logged and ignored.
pub async fn load_config() -> SceneConfig {
    match load_string(DEFAULT_CONFIG_FILE).await {
        Ok(source) => SceneConfig::from_toml_str(&source).unwrap_or_else(|e| {
            log::error!("ignoring {}: {}", DEFAULT_CONFIG_FILE, e);
            SceneConfig::default()
        }),
        Err(e) => {
            log::debug!("{} not loaded ({}), using defaults", DEFAULT_CONFIG_FILE, e);
            SceneConfig::default()
        }
    }
}
