use std::io::{BufRead, Read, Write};
use std::net::TcpStream;

use anyhow::{Context, Result};
use clap::Parser;

/// Single-read buffer, matching the server's unframed protocol: responses
/// beyond this size arrive truncated.
const BUFFER_SIZE: usize = 4096;

/// Thin terminal front end for the scour search service.
///
/// Reads one query per line from stdin and prints the server's response.
/// Queries look like `apple AND banana` or `filetype:txt,pdf keyword`;
/// `exit` ends the session.
#[derive(Parser, Debug)]
#[command(name = "scour")]
struct Args {
    /// Server address, host:port.
    #[arg(long, default_value = "127.0.0.1:12345")]
    server: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut stream = TcpStream::connect(&args.server)
        .with_context(|| format!("connecting to {}", args.server))?;
    eprintln!("connected to {}; enter a query, or 'exit' to quit", args.server);

    let stdin = std::io::stdin();
    let mut buf = vec![0u8; BUFFER_SIZE];

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        stream
            .write_all(query.as_bytes())
            .context("sending query")?;
        if query == "exit" {
            break;
        }

        let n = stream.read(&mut buf).context("reading response")?;
        if n == 0 {
            eprintln!("server closed the connection");
            break;
        }
        println!("{}", String::from_utf8_lossy(&buf[..n]));
    }

    Ok(())
}
