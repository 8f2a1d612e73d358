use eyre::Result;
use gsmarena_scraper::export::{self, ExportPaths};
use gsmarena_scraper::{FetchConfig, Fetcher, KeyFields, PhoneDetails, Url};
use tracing::warn;

const PHONE_URLS: &[&str] = &[
    "https://www.gsmarena.com/samsung_galaxy_s23_ultra-12024.php",
    "https://www.gsmarena.com/xiaomi_13t_pro-12388.php",
    "https://www.gsmarena.com/google_pixel_8_pro-12545.php",
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let paths = ExportPaths::default();
    let fetcher = Fetcher::new(&FetchConfig::default())?;

    let mut phones = Vec::with_capacity(PHONE_URLS.len());
    let mut keys = Vec::with_capacity(PHONE_URLS.len());

    for &url in PHONE_URLS {
        println!("[+] Fetching: {url}");
        let (html, final_url) = fetcher.fetch(Url::parse(url)?).await?;
        if final_url.as_str() != url {
            println!("    [i] Redirected to: {final_url}");
        }

        let phone = PhoneDetails::parse(&html, &final_url);
        if phone.model_mismatch() {
            warn!(model = ?phone.model, url = %final_url, "parsed model may not match URL");
        }

        let key = KeyFields::from_details(&phone);
        println!("    -> model: {}", key.model.as_deref().unwrap_or("-"));
        println!("    -> chipset: {}", key.chipset.as_deref().unwrap_or("-"));
        println!("    -> battery: {}", key.battery.as_deref().unwrap_or("-"));
        println!();

        phones.push(phone);
        keys.push(key);
    }

    export::export_all(&paths, &phones, &keys)?;

    println!("[OK] Export completed:");
    for path in [&paths.full_json, &paths.key_fields_json, &paths.key_fields_csv] {
        println!(" - {}", path.display());
    }
    Ok(())
}
