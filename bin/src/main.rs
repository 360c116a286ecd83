use std::{env, process::exit, sync::Arc};

use log::{error, warn};
use pipeline::{AnalysisReport, AnalysisRequest, AnalysisRunner, Fetcher};
use settings::{get_config_location, read_config, write_default_config};
use textstats::JiebaSegmenter;
use www::server;

const DEFAULT_LOG_FILTERS: &str =
    "warn,cipin=info,www=info,pipeline=info,render=info,charts=info,textstats=info,settings=info";

enum Mode {
    Serve,
    Analyze(AnalysisRequest),
}

#[tokio::main]
async fn main() {
    init_logging();
    let args = env::args().skip(1).collect::<Vec<String>>();
    let mut mode = Mode::Serve;
    let mut port = None;
    let mut min_freq = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "-v" | "--version" => return print_version(),
            "-h" | "--help" => return print_help(),
            "-i" | "--init" => return init(),
            "-a" | "--analyze" => {
                let url = expect_value(arg, iter.next());
                mode = Mode::Analyze(AnalysisRequest::new(url.as_str()));
            }
            "-m" | "--min-freq" => min_freq = Some(parse_value::<usize>(arg, iter.next())),
            "-p" | "--port" => port = Some(parse_value::<u16>(arg, iter.next())),
            _ => {
                eprintln!("unknown option: {}", arg);
                exit(1);
            }
        }
    }
    if min_freq.is_some() && matches!(mode, Mode::Serve) {
        warn!("--min-freq only applies with --analyze, ignoring it");
    }
    let mut config = match read_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    };
    if let Some(port) = port {
        config.general.port = port;
    }
    match mode {
        Mode::Serve => {
            if let Err(e) = server(config).await {
                error!("{}", e);
                exit(1);
            }
        }
        Mode::Analyze(mut request) => {
            request.min_freq = min_freq;
            let fetcher = match Fetcher::spawn(config.fetch).await {
                Ok(fetcher) => fetcher,
                Err(e) => {
                    error!("{}", e);
                    exit(1);
                }
            };
            let runner = AnalysisRunner::new(Arc::new(fetcher), Arc::new(JiebaSegmenter::new()));
            match runner.run_blocking(request).await {
                Ok(report) => print_report(&report),
                Err(e) => {
                    eprintln!("发生错误: {}", e);
                    exit(1);
                }
            }
        }
    }
}

fn init_logging() {
    let filters = env::var("RUST_LOG").unwrap_or_else(|_| String::from(DEFAULT_LOG_FILTERS));
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

fn expect_value<'a>(flag: &str, value: Option<&'a String>) -> &'a String {
    match value {
        Some(value) => value,
        None => {
            eprintln!("{} needs a value", flag);
            exit(1);
        }
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    let value = expect_value(flag, value);
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            eprintln!("invalid value for {}: {}", flag, value);
            exit(1);
        }
    }
}

fn init() {
    match write_default_config() {
        Ok(path) => println!("Config written to {:?}", path),
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}

fn print_report(report: &AnalysisReport) {
    let analysis = &report.analysis;
    println!(
        "{} Han words, {} distinct, min_freq {} (range {}..={})",
        analysis.table.total(),
        analysis.table.len(),
        analysis.min_freq,
        analysis.bounds.0,
        analysis.bounds.1
    );
    println!("词频排名前20的词汇:");
    for (idx, entry) in analysis.top_words.iter().enumerate() {
        println!("{:>3}  {:<12}{:>6}", idx + 1, entry.word, entry.count);
    }
}

fn print_version() {
    println!("cipin v{}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    let config_location = get_config_location()
        .map(|(_, file)| format!("{:?}", file))
        .unwrap_or_else(|e| e.to_string());
    println!(
        "\nConfig file found at {}\n",
        format!("\x1b[38;5;47m{}\x1b[0m", config_location)
    );
    print!(
        "Usage: cipin [options]
        Options:
        -i, --init                   Write the default config file
        -a, --analyze <url>          Print the top 20 words of a page and exit
        -m, --min-freq <n>           Minimum word count used with --analyze
        -p, --port <port>            Listen on <port> instead of the configured one
        -v, --version                Print version.
        -h, --help                   Show this message.
        ",
    );
}
