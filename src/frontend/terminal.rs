//! Interactive terminal rendition of the swap form.
//!
//! The form is driven by a line-oriented command loop instead of DOM
//! events, but the behavior per change is the same: every accepted edit
//! recomputes the quote and the validation list, then redraws the card.



use std::sync::Arc;

use tokio::{
    io::{
        AsyncBufReadExt,
        BufReader,
    },
    sync::mpsc,
};

use async_trait::async_trait;

use crate::{
    balances::BalanceMap,
    format::{
        format_amount,
        icon_url,
    },
    frontend::Frontend,
    price_feed::FeedResult,
    price_map::PriceMap,
    settlement::Settlement,
    shared_state::SharedState,
    swap_form::SwapForm,
};



pub struct Terminal {
    rx: mpsc::Receiver<FeedResult>,
}



impl Terminal {
    pub fn new(rx: mpsc::Receiver<FeedResult>) -> Self {
        Self {
            rx,
        }
    }
}



/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    From(String),
    To(String),
    Amount(String),
    Slippage(String),
    Switch,
    Max,
    Tokens,
    Balances,
    Swap,
    Help,
    Quit,
    Unknown(String),
}



impl Command {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        if line.is_empty() {
            return None
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let cmd = match word {
            "from" => Command::From(rest.to_string()),
            "to" => Command::To(rest.to_string()),
            "amount" => Command::Amount(rest.to_string()),
            "slippage" => Command::Slippage(rest.to_string()),
            "switch" => Command::Switch,
            "max" => Command::Max,
            "tokens" => Command::Tokens,
            "balances" => Command::Balances,
            "swap" => Command::Swap,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(word.to_string()),
        };

        Some(cmd)
    }
}



fn print_help() {
    println!(concat!("Commands:\n",
        "  from <TOKEN>       select source token\n",
        "  to <TOKEN>         select destination token\n",
        "  amount <VALUE>     set the amount to swap\n",
        "  slippage <PCT>     slippage tolerance, 0.1 to 2.0\n",
        "  switch             swap source and destination\n",
        "  max                amount := full source balance\n",
        "  tokens             list known tokens\n",
        "  balances           list balances\n",
        "  swap               submit\n",
        "  quit               leave"
    ));
}



/// Redraw the swap card: inputs, rate line, summary, inline errors and
/// submit availability.
fn render(form: &SwapForm, prices: &PriceMap, balances: &BalanceMap) {
    let view = form.view(prices, balances);

    let amount = if form.amount.is_empty() {
        "0.00"
    }
    else {
        form.amount.as_str()
    };

    println!();
    println!("  From      {:6} amount: {}", form.from, amount);
    println!("            balance: {} {}",
        format_amount(view.balance, 6), form.from,
    );

    if view.quote.rate > 0.0 {
        println!("  To        {:6} rate: 1 {} ≈ {} {}",
            form.to, form.from, format_amount(view.quote.rate, 8), form.to,
        );
    }
    else {
        println!("  To        {:6} rate: —", form.to);
    }

    println!("  Slippage  {:.1}%", form.slippage);
    println!("  Estimated receive        {} {}",
        format_amount(view.quote.estimated_receive, 6), form.to,
    );
    println!("  Fee (0.3%)               {} {}",
        format_amount(view.quote.fee, 6), form.to,
    );
    println!("  Min. received (slippage) {} {}",
        format_amount(view.quote.min_received, 6), form.to,
    );

    for error in &view.validation.errors {
        println!("  ! {}", error);
    }

    if view.validation.ok {
        println!("  [ swap to submit ]");
    }
    else {
        println!("  [ submit disabled ]");
    }
}



#[async_trait]
impl Frontend for Terminal {
    async fn main(mut self, shared_state: Arc<SharedState>) {
        // The single load-time fetch. If the feed task is gone without
        // sending anything, there is no form to run.
        let Some(result) = self.rx.recv().await else {
            return
        };

        let prices = match result {
            Ok(prices) => prices,
            Err(e) => {
                // Load failure disables the form, there is nothing to
                // interact with.
                println!("{}", e);
                return
            }
        };

        let mut balances = BalanceMap::mock();
        let mut form = SwapForm::new(&prices);

        print_help();
        render(&form, &prices, &balances);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Ok(Some(line)) = lines.next_line().await {
            if shared_state.is_shut_down() {
                return
            }

            let Some(cmd) = Command::parse(&line) else {
                render(&form, &prices, &balances);
                continue;
            };

            match cmd {
                Command::From(sym) => {
                    if !form.from_select(&sym, &prices) {
                        println!("Unknown token: {}", sym);
                    }
                }

                Command::To(sym) => {
                    if !form.to_select(&sym, &prices) {
                        println!("Unknown token: {}", sym);
                    }
                }

                Command::Amount(text) => {
                    if !form.amount_input(&text) {
                        println!(concat!("Ignored: amounts are digits with",
                            " at most one decimal point."
                        ));
                    }
                }

                Command::Slippage(text) => {
                    let accepted = match text.parse() {
                        Ok(pct) => form.slippage_set(pct),
                        Err(..) => false,
                    };

                    if !accepted {
                        println!("Ignored: slippage is a number, 0.1 to 2.0.");
                    }
                }

                Command::Switch => {
                    form.switch_direction();
                }

                Command::Max => {
                    form.amount_set_max(&balances);
                }

                Command::Tokens => {
                    for (sym, price) in &prices {
                        println!("  {:8} {:>14}  {}",
                            sym, format_amount(*price, 6), icon_url(sym),
                        );
                    }

                    continue;
                }

                Command::Balances => {
                    for (sym, bal) in balances.iter() {
                        println!("  {:8} {}", sym, format_amount(bal, 6));
                    }

                    continue;
                }

                Command::Swap => {
                    let view = form.view(&prices, &balances);

                    if !view.validation.ok {
                        println!("Cannot submit, fix the errors first.");
                        render(&form, &prices, &balances);
                        continue;
                    }

                    let settlement = Settlement::prepare(
                        &form.from,
                        &form.to,
                        form.amount_value(),
                        form.slippage,
                        &view.quote,
                    );

                    // Submission is locked until settlement finishes; the
                    // loop does not read further commands meanwhile.
                    println!("Submitting...");
                    settlement.execute(&mut balances).await;

                    println!("{}", settlement.toast());
                    form.amount.clear();
                }

                Command::Help => {
                    print_help();
                    continue;
                }

                Command::Quit => {
                    return
                }

                Command::Unknown(word) => {
                    println!("Unknown command: {} (try \"help\")", word);
                    continue;
                }
            }

            render(&form, &prices, &balances);
        }
    }
}
