use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser};

use gpu_sha256::{host, DigestMode, HashVerifier, LaunchShape, VerifierConfig};

#[derive(Parser, Debug)]
#[command(name = "sha256-verify")]
#[command(about = "Compare a CUDA SHA-256 kernel against the host digest", version)]
#[command(group(ArgGroup::new("key").required(true).args(["hex", "text", "file"])))]
struct Cli {
    /// Key as hex bytes
    #[arg(long)]
    hex: Option<String>,

    /// Key as UTF-8 text
    #[arg(long)]
    text: Option<String>,

    /// Read the key bytes from a file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Hash twice (sha256d)
    #[arg(long)]
    double: bool,

    /// Number of work-items to dispatch
    #[arg(long, default_value_t = 1, env = "GPU_SHA256_WORK_ITEMS")]
    work_items: u32,

    /// Work-items per block
    #[arg(long, default_value_t = 1, env = "GPU_SHA256_BLOCK_SIZE")]
    block_size: u32,

    /// CUDA device ordinal
    #[arg(long, default_value_t = 0, env = "GPU_SHA256_DEVICE")]
    device: usize,

    /// Also print version || key || checksum for this version byte (e.g. 41)
    #[arg(long)]
    checksum_version: Option<String>,
}

fn read_key(cli: &Cli) -> anyhow::Result<Vec<u8>> {
    if let Some(hex_key) = &cli.hex {
        return hex::decode(hex_key.trim()).context("key is not valid hex");
    }
    if let Some(text) = &cli.text {
        return Ok(text.as_bytes().to_vec());
    }
    if let Some(path) = &cli.file {
        return std::fs::read(path).with_context(|| format!("reading key from {}", path.display()));
    }
    bail!("no key given")
}

fn parse_version(s: &str) -> anyhow::Result<u8> {
    let bytes = hex::decode(s).context("checksum version is not valid hex")?;
    match bytes.as_slice() {
        [v] => Ok(*v),
        _ => bail!("checksum version must be a single byte, got {} bytes", bytes.len()),
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let key = read_key(&cli)?;
    let checksum_version = cli
        .checksum_version
        .as_deref()
        .map(parse_version)
        .transpose()?;
    let mode = if cli.double {
        DigestMode::Double
    } else {
        DigestMode::Single
    };

    let config = VerifierConfig {
        device_ordinal: cli.device,
        launch: LaunchShape::new(cli.work_items, cli.block_size)?,
        mode,
    };

    let verifier = HashVerifier::new(config)?;
    let result = verifier
        .verify(&key)
        .with_context(|| format!("verifying on CUDA device {}", cli.device))?;

    println!("key:    {}", hex::encode(&key));
    if let Some(version) = checksum_version {
        println!("check:  {}", hex::encode(host::checksummed_payload(version, &key)));
    }
    println!("host:   {}", result.host_digest);
    println!("device: {}", result.device_digest);

    if !result.replicas_consistent() {
        let divergent = result
            .replicas
            .iter()
            .filter(|d| **d != result.device_digest)
            .count();
        println!("{} of {} work-items disagree with work-item 0", divergent, result.replicas.len());
    }

    let matched = result.is_match();
    println!("{}", if matched { "MATCH" } else { "MISMATCH" });
    Ok(matched)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
