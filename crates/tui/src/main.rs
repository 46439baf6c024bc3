mod app;
mod client;
mod config;
mod error;
mod feed;
mod logging;
mod session;
mod ui;

use crate::{error::Result, session::Session};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;

    let transfers = Session::load(&config.session)?.into_controller()?;
    let mut app = app::App::new(&config, transfers)?;
    app.run().await?;
    Ok(())
}
