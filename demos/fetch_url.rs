use guarded_fetch::{guarded_fetch, FetchOptions, GuardedResult};

/// Fetches the URL given on the command line through the default guarded fetch.
///
/// ```text
/// RUST_LOG=debug cargo run --example fetch_url -- https://example.com/
/// ```
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let url = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: fetch_url <url>"))?;

    let options = FetchOptions::new().header("accept", "text/html,*/*;q=0.8");

    // The guarded call never fails by itself, both outcomes come back as data.
    match guarded_fetch(url.as_str(), Some(options)).await {
        GuardedResult::Success(resp) => {
            println!("{} {} ({})", resp.status, resp.status_text, resp.url);
            if !resp.ok() {
                println!("note: server answered with a non-2xx status");
            }
            for (name, value) in resp.headers.iter() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
            println!();
            println!("{}", resp.text());
        }
        GuardedResult::Failure(failure) => {
            eprintln!("fetch failed: {failure}");
            std::process::exit(1);
        }
    }

    Ok(())
}
