//! Stats command - renders the ambulance summary the way the dashboard does

use anyhow::Result;
use hospital_ui::stats::render_response;
use hospital_ui::FetchError;
use serde_json::Value;

pub fn run(base_url: &str, path: &str) -> Result<()> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), path);

    tokio::runtime::Runtime::new()?.block_on(async {
        log::info!("GET {url}");
        let response = fetch(&url).await;
        if let Err(error) = &response {
            log::error!("{error}");
        }
        println!("{}", render_response(&response));
        Ok(())
    })
}

async fn fetch(url: &str) -> Result<Value, FetchError> {
    let response = reqwest::get(url).await.map_err(|error| FetchError::Transport {
        url: url.to_string(),
        reason: error.to_string(),
    })?;
    log::info!("Status {}", response.status());
    response
        .json::<Value>()
        .await
        .map_err(|error| FetchError::InvalidJson {
            url: url.to_string(),
            reason: error.to_string(),
        })
}
