use clap::Parser;
use log::*;
use std::io::{self, BufRead};
use std::process;

use ipv4_net::{Address, AddressOptions, EnumerateOptions, Result};

/// Inspect IPv4 addresses and CIDR networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Addresses or CIDR blocks. Read from stdin, one per line, when omitted
    targets: Vec<String>,

    /// List the usable hosts of each network
    #[arg(long, default_value_t = false)]
    hosts: bool,

    /// Give listed hosts the network prefix instead of /32
    #[arg(long, default_value_t = false)]
    keep_prefix: bool,

    /// Accept addresses whose first octet is 0
    #[arg(long, default_value_t = false)]
    allow_zero_octet: bool,

    /// Report whether each network contains this address
    #[arg(short, long)]
    contains: Option<String>,

    /// Log more, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn address_options(&self) -> AddressOptions {
        AddressOptions {
            prefix: None,
            allow_zero_octet: self.allow_zero_octet,
        }
    }
}

fn initialize_logger(verbose: u8) {
    let level = match verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    if let Err(e) = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("logger unavailable: {}", e);
    }
}

fn class(address: &Address) -> &'static str {
    if address.is_private() {
        "private"
    } else if address.is_loopback() {
        "loopback"
    } else if address.is_link_local() {
        "link-local"
    } else if address.is_multicast() {
        "multicast"
    } else if address.is_reserved() {
        "reserved"
    } else {
        "public"
    }
}

fn or_dash(address: Option<Address>) -> String {
    address.map_or_else(|| "-".to_owned(), |a| a.address())
}

fn describe(address: &Address, args: &Args) -> Result<String> {
    let network = address.network();
    let mut lines = vec![
        format!("address:    {}", address.address_with_cidr()),
        format!("network:    {}", network),
        format!("netmask:    {}", network.netmask()),
        format!("hostmask:   {}", network.hostmask()),
        format!("broadcast:  {}", network.broadcast()),
        format!("first host: {}", or_dash(network.first_host())),
        format!("last host:  {}", or_dash(network.last_host())),
        format!("hosts:      {}", network.host_count()),
        format!("size:       {}", network.size()),
        format!("class:      {}", class(address)),
        format!("hex:        {}", address.to_hex()),
        format!("binary:     {}", address.to_binary_address()),
        format!("ptr:        {}", address.reverse_pointer()),
    ];
    if let Some(other) = &args.contains {
        let contained = network.contains(other.as_str())?;
        lines.push(format!("contains {}: {}", other, if contained { "yes" } else { "no" }));
    }
    if args.hosts {
        let options = EnumerateOptions {
            keep_prefix: args.keep_prefix,
        };
        lines.extend(network.hosts(options).map(|h| h.address_with_cidr()));
    }
    Ok(lines.join("\n"))
}

/// Reads one target per line, returning the lines and how many could not be read.
fn read_targets<R: BufRead>(reader: R) -> (Vec<String>, usize) {
    let mut lines = Vec::new();
    let mut unreadable = 0;
    for line in reader.lines() {
        match line {
            Ok(l) => lines.push(l),
            Err(e) => {
                warn!("unreadable input line: {}", e);
                unreadable += 1;
            }
        }
    }
    (lines, unreadable)
}

fn main() {
    let args = Args::parse();
    initialize_logger(args.verbose);
    info!("configuration: {:?}", args);

    let mut failed = 0;
    let targets = if args.targets.is_empty() {
        let (lines, unreadable) = read_targets(io::stdin().lock());
        failed += unreadable;
        lines
    } else {
        args.targets.clone()
    };

    for target in targets.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        let described = Address::with_options(target, args.address_options())
            .and_then(|a| describe(&a, &args));
        match described {
            Ok(text) => println!("{}\n", text),
            Err(e) => {
                eprintln!("{}: {}", target, e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        warn!("{} inputs rejected", failed);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("ipv4-net").chain(extra.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn describes_network() {
        let args = parse(&["192.168.178.1/24"]);
        let out = describe(&Address::new("192.168.178.1/24").unwrap(), &args).unwrap();
        assert!(out.contains("network:    192.168.178.0/24"));
        assert!(out.contains("netmask:    255.255.255.0"));
        assert!(out.contains("hostmask:   0.0.0.255"));
        assert!(out.contains("hosts:      254"));
        assert!(out.contains("class:      private"));
        assert!(out.contains("hex:        C0A8B201"));
        assert!(out.contains("ptr:        1.178.168.192.in-addr.arpa"));
    }

    #[test]
    fn lists_hosts() {
        let args = parse(&["--hosts", "--keep-prefix", "-c", "10.0.0.9", "10.0.0.0/30"]);
        let out = describe(&Address::new("10.0.0.0/30").unwrap(), &args).unwrap();
        assert!(out.contains("contains 10.0.0.9: no"));
        assert!(out.ends_with("10.0.0.1/30\n10.0.0.2/30"));

        let args = parse(&["--hosts", "8.8.8.8"]);
        let out = describe(&Address::new("8.8.8.8").unwrap(), &args).unwrap();
        assert!(out.contains("first host: -"));
        assert!(out.contains("class:      public"));
        assert!(out.ends_with("ptr:        8.8.8.8.in-addr.arpa"));
    }

    #[test]
    fn rejects_bad_contains() {
        let args = parse(&["-c", "300.1.1.1", "10.0.0.0/8"]);
        assert!(describe(&Address::new("10.0.0.0/8").unwrap(), &args).is_err());
    }

    #[test]
    fn counts_unreadable_lines() {
        let input: &[u8] = b"10.0.0.0/8\n\xff\xfe\n192.168.1.1\n";
        let (lines, unreadable) = read_targets(input);
        assert_eq!(vec!["10.0.0.0/8", "192.168.1.1"], lines);
        assert_eq!(1, unreadable);

        let (lines, unreadable) = read_targets(&b"8.8.8.8"[..]);
        assert_eq!(vec!["8.8.8.8"], lines);
        assert_eq!(0, unreadable);
    }

    #[test]
    fn zero_octet_flag() {
        assert!(!parse(&[]).address_options().allow_zero_octet);
        assert!(parse(&["--allow-zero-octet"]).address_options().allow_zero_octet);
    }
}
