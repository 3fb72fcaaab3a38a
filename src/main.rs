use claimer::claim_for_all;
use config::Config;
use credentials::load_credentials;
use error::Error;

use logger::init_default_logger;

mod api;
mod claimer;
mod config;
mod constants;
mod credentials;
mod error;
mod logger;
mod utils;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _guard = init_default_logger();

    let config = Config::read_default().await?;

    let credentials =
        match load_credentials(config.credential_kind, config.credentials_path()).await {
            Ok(credentials) => credentials,
            Err(e) => {
                tracing::error!("{e}");
                if matches!(e, Error::FileMissing(_)) {
                    tracing::error!(
                        "Pastikan Anda telah membuat file tersebut dan mengisinya dengan kredensial akun."
                    );
                }
                return Ok(());
            }
        };

    claim_for_all(&config, credentials).await?;

    Ok(())
}
