use clap::Parser;
use lms_video_links::output;

mod args;
use args::{Args, build_extractor};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let extractor = match build_extractor(&args) {
        Ok(extractor) => extractor,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    println!("Note: extraction drives a browser through a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using {}",
        extractor.config().webdriver_url
    );

    let start_time = std::time::Instant::now();
    let mut sinks = extractor.sinks();
    match extractor.run_with_sinks(&mut sinks).await {
        Ok(summary) => {
            println!("=== Direct Video Links ===");
            for link in &summary.links {
                println!("{}", link);
            }
            ::log::info!(
                "Extraction complete - {} links from {} sub-pages ({} skipped, {} failed) in {:.2} seconds",
                summary.links.len(),
                summary.candidates,
                summary.skipped,
                summary.failed,
                start_time.elapsed().as_secs_f64()
            );
            output::finish_sinks(&mut sinks);
        }
        Err(e) => {
            ::log::error!("Extraction failed: {}", e);
            std::process::exit(1);
        }
    }
}
