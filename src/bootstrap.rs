// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Process entry: environment configuration, provider construction, output

use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, BlockNumber};
use alloy_provider::Provider;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::constants::{DEFAULT_END_BLOCK, DEFAULT_START_BLOCK, DEFAULT_TOKEN_ADDRESS};
use crate::config::{LiquidityStrategy, ReplayConfig, ReplayConfigBuilder};
use crate::errors::{ConfigError, TradescanError};
use crate::extract::VolumeDenomination;
use crate::provider::{create_http_provider, ProviderConfig};
use crate::replay::{HistoricalReplay, ReplayReport};
use crate::source::{AnyNetworkLogAdapter, RpcChainSource};

/// How records are written once the replay finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON array on stdout
    #[default]
    Json,
    /// One `info!` event per record
    Log,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "log" | "logs" => Ok(Self::Log),
            other => Err(ConfigError::invalid("OUTPUT", other, "expected json or log")),
        }
    }
}

/// Everything the binary reads from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub provider: ProviderConfig,
    pub token: Address,
    pub start_block: BlockNumber,
    /// `None` replays through the chain head
    pub end_block: Option<BlockNumber>,
    pub replay: ReplayConfig,
    pub output: OutputFormat,
}

impl Settings {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Read settings through `lookup`; unset and empty variables are treated alike.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());

        let rpc_url = get("RPC_URL").ok_or(ConfigError::missing("RPC_URL"))?;
        let rate_limit = parse_opt::<u32>(&get, "RPC_RATE_LIMIT")?;

        let token = parse_opt::<Address>(&get, "TOKEN_ADDRESS")?.unwrap_or(DEFAULT_TOKEN_ADDRESS);
        let start_block = parse_opt::<BlockNumber>(&get, "START_BLOCK")?.unwrap_or(DEFAULT_START_BLOCK);
        let end_block = match get("END_BLOCK") {
            None => Some(DEFAULT_END_BLOCK),
            Some(v) if v.trim().eq_ignore_ascii_case("latest") => None,
            Some(v) => Some(
                v.trim()
                    .parse()
                    .map_err(|e| ConfigError::invalid("END_BLOCK", v.clone(), e))?,
            ),
        };

        let liquidity = match get("LIQUIDITY_STRATEGY") {
            None => Some(LiquidityStrategy::LogReplay),
            Some(v) if v.trim().eq_ignore_ascii_case("none") => None,
            Some(v) => Some(v.parse::<LiquidityStrategy>()?),
        };

        let mut builder = ReplayConfigBuilder::with_defaults()
            .liquidity(liquidity)
            .volume(parse_bool(&get, "INCLUDE_VOLUME")?.unwrap_or(true))
            .price(parse_bool(&get, "INCLUDE_PRICE")?.unwrap_or(true));
        if let Some(max) = parse_opt::<usize>(&get, "MAX_CONCURRENCY")? {
            builder = builder.max_concurrency(max);
        }
        if let Some(blocks) = parse_opt::<u64>(&get, "CHUNK_SIZE")? {
            builder = builder.chunk_size(blocks);
        }
        if let Some(denomination) = get("VOLUME_DENOMINATION") {
            builder = builder.volume_denomination(denomination.parse::<VolumeDenomination>()?);
        }
        if let Some(decimals) = parse_opt::<u8>(&get, "DISPLAY_DECIMALS")? {
            builder = builder.display_decimals(decimals);
        }

        let output = match get("OUTPUT") {
            Some(v) => v.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            provider: ProviderConfig::new(rpc_url).with_rate_limit_opt(rate_limit),
            token,
            start_block,
            end_block,
            replay: builder.build(),
            output,
        })
    }
}

fn parse_opt<T>(
    get: &impl Fn(&'static str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(name)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::invalid(name, v.clone(), e))
        })
        .transpose()
}

fn parse_bool(
    get: &impl Fn(&'static str) -> Option<String>,
    name: &'static str,
) -> Result<Option<bool>, ConfigError> {
    get(name)
        .map(|v| match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::invalid(name, v.clone(), "expected true or false")),
        })
        .transpose()
}

/// Build the provider and source for `settings` and run the replay.
pub async fn replay(settings: &Settings) -> Result<ReplayReport, TradescanError> {
    let provider = create_http_provider(settings.provider.clone())?;

    match provider.get_chain_id().await {
        Ok(id) => match NamedChain::try_from(id) {
            Ok(chain) => info!(chain_id = id, chain = %chain, "Connected to RPC endpoint"),
            Err(_) => info!(chain_id = id, "Connected to RPC endpoint"),
        },
        Err(e) => warn!(error = %e, "Could not query chain id"),
    }

    let source = Arc::new(RpcChainSource::new(provider, AnyNetworkLogAdapter));
    let replay = HistoricalReplay::new(source, settings.token, settings.replay.clone());
    Ok(replay.run(settings.start_block, settings.end_block).await?)
}

/// Write the report in the configured format.
pub fn emit(report: &ReplayReport, settings: &Settings) -> anyhow::Result<()> {
    let decimals = settings.replay.display_decimals;
    let display = report.to_display(decimals);

    match settings.output {
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &display)?;
            writeln!(out)?;
        }
        OutputFormat::Log => {
            for record in &display {
                info!(
                    block_number = record.block_number,
                    datetime = record.datetime.as_deref().unwrap_or("-"),
                    volume = %record.volume,
                    liquidity = %record.liquidity,
                    price = %record.price,
                    missing = record.missing,
                    "Block"
                );
            }
        }
    }

    let totals = report.totals();
    info!(
        range = %report.range(),
        volume = %totals.volume.scaled_string(decimals),
        liquidity = %totals.liquidity.scaled_string(decimals),
        missing_blocks = report.missing_blocks(),
        unavailable_readings = report.unavailable_readings(),
        "Totals"
    );
    Ok(())
}

/// Whether `LOG_FORMAT` asks for JSON log lines.
pub fn json_logs<F>(lookup: F) -> bool
where
    F: Fn(&'static str) -> Option<String>,
{
    lookup("LOG_FORMAT").is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

/// Load `.env`, then install the stderr subscriber.
///
/// `.env` is read first so `RUST_LOG` and `LOG_FORMAT` set there apply.
pub fn init_tracing() {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json_logs(|name| dotenvy::var(name).ok()) {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let settings = Settings::from_env()?;
    info!(
        token = %settings.token,
        start_block = settings.start_block,
        end_block = ?settings.end_block,
        metrics = ?settings.replay.metrics,
        "Loaded settings"
    );

    let report = replay(&settings).await?;
    emit(&report, &settings)
}
