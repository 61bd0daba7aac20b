#[macro_use]
extern crate tracing;

use hash_assets::{
    digest_bytes,
    digest_file,
};
use crate::ms_uptime::MsUptime;
use std::{
    env::args,
    process::exit,
};
use tracing_subscriber::{
    prelude::*,
    Registry,
    EnvFilter,
    fmt,
};


mod ms_uptime {
    use std::{
        fmt::Result,
        time::Instant,
    };
    use tracing_subscriber::fmt::{
        format::Writer,
        time::FormatTime,
    };

    #[derive(Debug, Clone)]
    pub struct MsUptime(Instant);

    impl MsUptime {
        pub fn new() -> Self {
            MsUptime(Instant::now())
        }
    }

    impl FormatTime for MsUptime {
        fn format_time(&self, w: &mut Writer) -> Result {
            let elapsed = self.0.elapsed();
            write!(w, "{:.3}s", elapsed.as_millis() as f32 / 1000.0)
        }
    }
}


const CLI_HELP: &'static str = r#"Print SHA-256 digests of asset files.

Examples:

    [this command] sound/click.ogg terrain.png
    Print one `<digest>  <path>` line per given file.

    [this command] --text=hello
    Digest the literal text instead of a file's contents.

Env var examples:
    RUST_LOG=hash_assets=trace
    Changes logging levels"#;


#[tokio::main]
async fn main() {
    // initialize logging
    let format = fmt::format()
        .compact()
        .with_timer(MsUptime::new())
        .with_line_number(true);
    let stdout_log = fmt::layer()
        .event_format(format);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(stdout_log);
    tracing::subscriber::set_global_default(subscriber)
        .expect("unable to install log subscriber");

    let args = args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args.iter().any(|arg| arg == "--help") {
        println!("{}", CLI_HELP);
        return;
    }

    let mut unreadable = false;
    for arg in &args {
        if let Some(text) = arg.strip_prefix("--text=") {
            println!("{}  {}", digest_bytes(text.as_bytes()), text);
        } else {
            match digest_file(arg).await {
                Ok(digest) => println!("{}  {}", digest, arg),
                Err(e) => {
                    error!(%e, path = %arg, "error reading input");
                    unreadable = true;
                }
            }
        }
    }
    if unreadable {
        exit(2);
    }
}
