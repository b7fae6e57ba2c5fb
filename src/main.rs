use waitlist_mailer::{config::AppConfig, App, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        waitlist_mailer::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        waitlist_mailer::init_dbg_tracing();
    }

    let config = AppConfig::load()?;
    let app = App::build_from_config(config).await?;

    waitlist_mailer::serve(app).await?;

    Ok(())
}
