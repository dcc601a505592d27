//! dictlink CLI
//!
//! Command-line lookups against DICT servers.

use clap::{Parser, Subcommand};
use dictlink::{
    Body, ClientConfig, Connection, Definition, DictError, MatchResult, Result, ALL_DATABASES,
    DEFAULT_PORT, DEFAULT_STRATEGY,
};
use tracing_subscriber::{fmt, EnvFilter};

/// dictlink CLI
#[derive(Parser, Debug)]
#[command(name = "dictlink")]
#[command(about = "Look up words on DICT (RFC 2229) servers")]
#[command(version)]
struct Args {
    /// Server to try; repeat to give fallbacks, tried in order
    #[arg(short = 'H', long = "host", default_value = "dict.org")]
    hosts: Vec<String>,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Connect/read/write timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    /// Client identification sent with CLIENT [default: dictlink <version>]
    #[arg(short, long)]
    client: Option<String>,

    /// User name for AUTH
    #[arg(short, long, requires = "secret")]
    user: Option<String>,

    /// Shared secret for AUTH
    #[arg(short, long, requires = "user")]
    secret: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Trace every line sent and received
    #[arg(long)]
    debug: bool,

    /// Report connection progress
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Define a word
    Define {
        /// The word to define
        word: String,

        /// Database to search (`*` all, `!` first hit)
        #[arg(short, long, default_value = ALL_DATABASES)]
        database: String,
    },

    /// Find words matching a pattern
    Match {
        /// The pattern to match
        word: String,

        /// Database to search (`*` all, `!` first hit)
        #[arg(short, long, default_value = ALL_DATABASES)]
        database: String,

        /// Match strategy (`.` server default)
        #[arg(short = 'S', long, default_value = DEFAULT_STRATEGY)]
        strategy: String,
    },

    /// List databases
    Databases,

    /// List match strategies
    Strategies,

    /// Show information about a database
    Info {
        /// Database name
        database: String,
    },

    /// Show server information
    Server,

    /// Show server status
    Status,

    /// Show the server's command summary (HELP)
    #[command(name = "server-help")]
    ServerHelp,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        tracing::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: &Args) -> Result<()> {
    let config = ClientConfig::builder()
        .hosts(args.hosts.iter().cloned())
        .port(args.port)
        .debug(args.debug)
        .verbose(args.verbose)
        .connect_timeout_ms(args.timeout_ms)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let mut conn = Connection::open(&config)?;
    let client_info = args
        .client
        .clone()
        .unwrap_or_else(|| format!("dictlink {}", dictlink::VERSION));
    conn.client(&client_info)?;

    if let (Some(user), Some(secret)) = (&args.user, &args.secret) {
        if conn.auth(user, secret)?.is_error() {
            return Err(DictError::protocol_from(&conn));
        }
    }

    match &args.command {
        Commands::Define { word, database } => {
            let definitions = conn
                .define(database, word)?
                .ok_or_else(|| DictError::protocol_from(&conn))?;
            print_definitions(&definitions, args.json)?;
        }
        Commands::Match {
            word,
            database,
            strategy,
        } => {
            let matches = conn
                .match_word(database, strategy, word)?
                .ok_or_else(|| DictError::protocol_from(&conn))?;
            print_matches(&matches, args.json)?;
        }
        Commands::Databases => {
            let body = conn.show_db()?.ok_or_else(|| DictError::protocol_from(&conn))?;
            print_body(&body, args.json)?;
        }
        Commands::Strategies => {
            let body = conn
                .show_strat()?
                .ok_or_else(|| DictError::protocol_from(&conn))?;
            print_body(&body, args.json)?;
        }
        Commands::Info { database } => {
            let body = conn
                .show_info(database)?
                .ok_or_else(|| DictError::protocol_from(&conn))?;
            print_body(&body, args.json)?;
        }
        Commands::Server => {
            let body = conn
                .show_server()?
                .ok_or_else(|| DictError::protocol_from(&conn))?;
            print_body(&body, args.json)?;
        }
        Commands::Status => {
            let message = conn.status()?;
            if args.json {
                println!("{}", to_json(&message)?);
            } else {
                println!("{}", message);
            }
        }
        Commands::ServerHelp => {
            let body = conn.help()?.ok_or_else(|| DictError::protocol_from(&conn))?;
            print_body(&body, args.json)?;
        }
    }

    conn.disconnect()
}

fn print_definitions(definitions: &[Definition], json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(definitions)?);
        return Ok(());
    }
    for d in definitions {
        println!("From {} [{}]:\n", d.description, d.database);
        for line in &d.lines {
            println!("{}", line);
        }
        println!();
    }
    Ok(())
}

fn print_matches(matches: &MatchResult, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(matches)?);
        return Ok(());
    }
    for (database, words) in matches {
        println!("{}: {}", database, words.join("  "));
    }
    Ok(())
}

fn print_body(body: &Body, json: bool) -> Result<()> {
    if json {
        println!("{}", to_json(body)?);
        return Ok(());
    }
    match body {
        Body::Text(text) => print!("{}", text),
        Body::Pairs(pairs) => {
            let width = pairs.keys().map(String::len).max().unwrap_or(0);
            for (name, values) in pairs {
                for value in values {
                    println!("{:width$}  {}", name, value, width = width);
                }
            }
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| DictError::Parse(e.to_string()))
}
