use clap::Parser;
use lms_video_links::Extractor;
use lms_video_links::ui::Locale;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lms-video-links")]
#[command(about = "Extracts direct MP4 links from an LMS video table and copies them to the clipboard")]
#[command(version)]
pub struct Args {
    /// Course page holding the video table (overrides page_url from --config)
    pub uri: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// URL of the WebDriver server
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Also write the links to this file (e.g. links.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not copy the links to the clipboard
    #[arg(long)]
    pub no_clipboard: bool,

    /// Show the button and progress readout inside the page
    #[arg(long)]
    pub overlay: bool,

    /// Inject the button and start when it is clicked (implies --overlay)
    #[arg(long)]
    pub wait_for_click: bool,

    /// Language of notifications
    #[arg(short, long, value_enum)]
    pub locale: Option<Locale>,

    /// Milliseconds before the "copied" label resets
    #[arg(long)]
    pub reset_delay_ms: Option<u64>,

    /// CSS selector of the video table body
    #[arg(long)]
    pub table_selector: Option<String>,
}

/// Build an Extractor from the config file (if any) and the CLI overrides
pub fn build_extractor(args: &Args) -> Result<Extractor, Box<dyn Error>> {
    let mut extractor = match (&args.config, &args.uri) {
        (Some(path), _) => Extractor::new("").with_config_file(path)?,
        (None, Some(uri)) => Extractor::new(uri),
        (None, None) => return Err("a page URL or --config is required".into()),
    };

    // WEBDRIVER_URL beats the config file, --webdriver-url beats both
    extractor = extractor.with_webdriver_env(std::env::var("WEBDRIVER_URL").ok());

    if let Some(uri) = &args.uri {
        extractor = extractor.with_page_url(uri);
    }
    if let Some(url) = &args.webdriver_url {
        extractor = extractor.with_webdriver_url(url);
    }
    if let Some(path) = &args.output {
        extractor = extractor.with_output_file(path);
    }
    if args.no_clipboard {
        extractor = extractor.without_clipboard();
    }
    if args.overlay {
        extractor = extractor.with_overlay();
    }
    if args.wait_for_click {
        extractor = extractor.wait_for_click();
    }
    if let Some(locale) = args.locale {
        extractor = extractor.with_locale(locale);
    }
    if let Some(millis) = args.reset_delay_ms {
        extractor = extractor.with_reset_delay_ms(millis);
    }
    if let Some(selector) = &args.table_selector {
        extractor = extractor.with_table_selector(selector);
    }

    Ok(extractor)
}
