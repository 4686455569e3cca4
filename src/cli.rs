//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

use firecrawl_client::{
    ApiVersion, CrawlOptions, MIN_POLL_INTERVAL_SECS, MapOptions, Operation, PollOptions,
    ScrapeFormat, ScrapeOptions,
};

/// Scrape, crawl and map websites through the Firecrawl API.
///
/// Results are printed to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "firecrawl")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// API key (defaults to FIRECRAWL_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL (defaults to FIRECRAWL_API_URL, then the production endpoint)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API schema version (v0 or v1)
    #[arg(long, default_value = "v1", global = true)]
    pub api_version: ApiVersion,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape a single page
    Scrape {
        url: String,

        /// Output format to request (repeatable): markdown, html, rawHtml, links, screenshot
        #[arg(short, long = "format")]
        formats: Vec<ScrapeFormat>,

        /// Only return the main content of the page
        #[arg(long)]
        only_main_content: bool,
    },

    /// Crawl a site, waiting for the job to finish unless --no-wait is given
    Crawl {
        url: String,

        /// Maximum number of pages to crawl
        #[arg(long)]
        limit: Option<u32>,

        /// Maximum link depth from the start URL
        #[arg(long)]
        max_depth: Option<u32>,

        /// Seconds between status polls (minimum 2)
        #[arg(long, default_value_t = MIN_POLL_INTERVAL_SECS)]
        poll_interval: u64,

        /// Key the service uses to deduplicate resubmissions
        #[arg(long)]
        idempotency_key: Option<String>,

        /// Submit the job and print its id without waiting
        #[arg(long)]
        no_wait: bool,
    },

    /// Show the current status of a crawl job
    Status { id: String },

    /// Cancel a crawl job
    Cancel { id: String },

    /// List the links of a site
    Map {
        url: String,

        /// Only return links relevant to this query
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of links to return
        #[arg(long)]
        limit: Option<u32>,

        /// Include links on subdomains
        #[arg(long)]
        include_subdomains: bool,
    },
}

impl Command {
    /// Translates the parsed command into a client operation.
    pub fn into_operation(self) -> Operation {
        match self {
            Self::Scrape {
                url,
                formats,
                only_main_content,
            } => {
                let options = ScrapeOptions {
                    formats: (!formats.is_empty()).then_some(formats),
                    only_main_content: only_main_content.then_some(true),
                    ..ScrapeOptions::default()
                };
                Operation::Scrape {
                    url,
                    options: (options != ScrapeOptions::default()).then_some(options),
                }
            }
            Self::Crawl {
                url,
                limit,
                max_depth,
                poll_interval,
                idempotency_key,
                no_wait,
            } => {
                let options = CrawlOptions {
                    limit,
                    max_depth,
                    ..CrawlOptions::default()
                };
                let options = (options != CrawlOptions::default()).then_some(options);
                if no_wait {
                    Operation::SubmitCrawl {
                        url,
                        options,
                        idempotency_key,
                    }
                } else {
                    Operation::Crawl {
                        url,
                        options,
                        idempotency_key,
                        poll: PollOptions::with_interval(poll_interval),
                    }
                }
            }
            Self::Status { id } => Operation::CrawlStatus { id },
            Self::Cancel { id } => Operation::CancelCrawl { id },
            Self::Map {
                url,
                search,
                limit,
                include_subdomains,
            } => {
                let options = MapOptions {
                    search,
                    limit,
                    include_subdomains: include_subdomains.then_some(true),
                    ..MapOptions::default()
                };
                Operation::Map {
                    url,
                    options: (options != MapOptions::default()).then_some(options),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_scrape_parses_formats() {
        let args = Args::try_parse_from([
            "firecrawl",
            "scrape",
            "https://example.com",
            "-f",
            "markdown",
            "--format",
            "links",
        ])
        .unwrap();
        let op = args.command.into_operation();
        assert_eq!(
            op,
            Operation::Scrape {
                url: "https://example.com".to_string(),
                options: Some(ScrapeOptions {
                    formats: Some(vec![ScrapeFormat::Markdown, ScrapeFormat::Links]),
                    ..ScrapeOptions::default()
                }),
            }
        );
    }

    #[test]
    fn test_cli_scrape_without_flags_sends_no_options() {
        let args = Args::try_parse_from(["firecrawl", "scrape", "https://example.com"]).unwrap();
        assert_eq!(
            args.command.into_operation(),
            Operation::Scrape {
                url: "https://example.com".to_string(),
                options: None,
            }
        );
    }

    #[test]
    fn test_cli_crawl_defaults_to_waiting() {
        let args = Args::try_parse_from(["firecrawl", "crawl", "https://example.com"]).unwrap();
        match args.command.into_operation() {
            Operation::Crawl { poll, options, .. } => {
                assert_eq!(poll.interval_secs, 2);
                assert!(options.is_none());
            }
            other => panic!("expected crawl, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_crawl_no_wait_submits_only() {
        let args = Args::try_parse_from([
            "firecrawl",
            "crawl",
            "https://example.com",
            "--no-wait",
            "--limit",
            "5",
            "--idempotency-key",
            "key-1",
        ])
        .unwrap();
        match args.command.into_operation() {
            Operation::SubmitCrawl {
                options,
                idempotency_key,
                ..
            } => {
                assert_eq!(options.unwrap().limit, Some(5));
                assert_eq!(idempotency_key.as_deref(), Some("key-1"));
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "firecrawl",
            "status",
            "job-9",
            "-vv",
            "--api-version",
            "v0",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.api_version, ApiVersion::V0);
        assert_eq!(
            args.command.into_operation(),
            Operation::CrawlStatus {
                id: "job-9".to_string()
            }
        );
    }

    #[test]
    fn test_cli_rejects_unknown_version_and_format() {
        assert!(Args::try_parse_from(["firecrawl", "--api-version", "v9", "status", "x"]).is_err());
        assert!(Args::try_parse_from(["firecrawl", "scrape", "https://e.com", "-f", "pdf"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = Args::try_parse_from(["firecrawl"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["firecrawl", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
