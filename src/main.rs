use std::{
    sync::Arc,
    env,
};

use dotenv;
use tokio::sync::mpsc;

pub mod shared_state;
pub mod price_map;
pub mod price_feed;
pub mod quote;
pub mod validate;
pub mod balances;
pub mod settlement;
pub mod swap_form;
pub mod format;
pub mod frontend;

use shared_state::SharedState;
use price_feed::{
    AsyncPriceFeed,
    FeedResult,
};
use frontend::terminal::Terminal;



const DEFAULT_PRICE_URL: &str = "https://interview.switcheo.com/prices.json";



#[tokio::main]
async fn main() {
    // .env is optional, the price URL has a built-in default.
    let _ = dotenv::from_path(".env");

    let url = match env::var("PRICE_URL") {
        Ok(url) => url,
        Err(..) => DEFAULT_PRICE_URL.to_string(),
    };

    let state = Arc::new(SharedState::default());

    // Exactly one fetch outcome ever travels this channel.
    let (tx, rx) = mpsc::channel::<FeedResult>(1);

    let feed = AsyncPriceFeed::new(&url, tx);
    let terminal = Terminal::new(rx);

    let feed_h = tokio::spawn(price_feed::main(feed, state.clone()));

    let state_signal = state.clone();
    let sig_h = tokio::spawn(async move {
        if let Ok(..) = tokio::signal::ctrl_c().await {
            state_signal.shut_down();
        }
    });

    // The frontend owns the interaction, so it runs on the main task. When
    // it returns, whether by quit or load failure, the process is done.
    frontend::main(terminal, state.clone()).await;
    state.shut_down();

    let _ = feed_h.await;

    // The signal task blocks until ctrl-c, which may never arrive.
    sig_h.abort();
    let _ = sig_h.await;
}
