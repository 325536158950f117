use groqchat::cli;

#[tokio::main]
async fn main() {
    // Failures are rendered, never turned into a non-zero exit.
    if let Err(e) = cli::run().await {
        let mut presenter = cli::ux::Presenter::stdout();
        if presenter.error(&e).is_err() {
            eprintln!("ERROR: {e:#}");
        }
    }
}
