use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::agents::Entropy;

/// Resolves the first candidate variable that is set.
fn read_env(candidates: &[&'static str]) -> Option<String> {
    read_with(&|key| env::var(key).ok(), candidates)
}

fn read_with(
    lookup: &dyn Fn(&str) -> Option<String>,
    candidates: &[&'static str],
) -> Option<String> {
    candidates
        .iter()
        .find_map(|key| lookup(key).filter(|value| !value.trim().is_empty()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentConfig {
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Option<Duration>,
    /// Ceiling, in characters, for each section embedded in the prompt.
    pub max_section_chars: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            timeout: None,
            max_section_chars: Self::DEFAULT_MAX_SECTION_CHARS,
        }
    }
}

impl EnrichmentConfig {
    pub const DEFAULT_MODEL: &'static str = "@cf/meta/llama-3.3-70b-instruct-fp8-fast";
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;
    pub const DEFAULT_MAX_SECTION_CHARS: usize = 4000;

    const MODEL_VARS: [&'static str; 1] = ["ENRICH_MODEL"];
    const MAX_TOKENS_VARS: [&'static str; 1] = ["ENRICH_MAX_TOKENS"];
    const TIMEOUT_VARS: [&'static str; 1] = ["ENRICH_TIMEOUT_MS"];
    const SECTION_VARS: [&'static str; 1] = ["ENRICH_MAX_SECTION_CHARS"];

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let max_tokens = read_with(lookup, &Self::MAX_TOKENS_VARS)
            .map(|raw| raw.parse::<u32>().context("ENRICH_MAX_TOKENS must be a positive integer"))
            .transpose()?
            .unwrap_or(Self::DEFAULT_MAX_TOKENS);
        let timeout = read_with(lookup, &Self::TIMEOUT_VARS)
            .map(|raw| raw.parse::<u64>().context("ENRICH_TIMEOUT_MS must be milliseconds"))
            .transpose()?
            .map(Duration::from_millis);
        let max_section_chars = read_with(lookup, &Self::SECTION_VARS)
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(Self::DEFAULT_MAX_SECTION_CHARS);

        Ok(Self {
            model: read_with(lookup, &Self::MODEL_VARS)
                .unwrap_or_else(|| Self::DEFAULT_MODEL.to_string()),
            max_tokens: max_tokens.max(1),
            timeout,
            max_section_chars: max_section_chars.max(1),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: String,
    pub base_url: String,
    pub http_timeout_ms: u64,
}

impl WorkersAiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.cloudflare.com/client/v4";

    const ACCOUNT_VARS: [&'static str; 2] = ["CLOUDFLARE_ACCOUNT_ID", "CF_ACCOUNT_ID"];
    const TOKEN_VARS: [&'static str; 2] = ["CLOUDFLARE_API_TOKEN", "CF_API_TOKEN"];
    const BASE_URL_VARS: [&'static str; 1] = ["WORKERS_AI_BASE_URL"];
    const TIMEOUT_VARS: [&'static str; 1] = ["WORKERS_AI_HTTP_TIMEOUT_MS"];

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let account_id = read_with(lookup, &Self::ACCOUNT_VARS)
            .context("Set CLOUDFLARE_ACCOUNT_ID to use the Workers AI runtime")?;
        let api_token = read_with(lookup, &Self::TOKEN_VARS)
            .context("Set CLOUDFLARE_API_TOKEN (or CF_API_TOKEN) to use the Workers AI runtime")?;
        let http_timeout_ms = read_with(lookup, &Self::TIMEOUT_VARS)
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(30_000);

        Ok(Self {
            account_id,
            api_token,
            base_url: read_with(lookup, &Self::BASE_URL_VARS)
                .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            http_timeout_ms,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: Option<String>,
}

impl OpenAiSettings {
    const KEY_VARS: [&'static str; 1] = ["OPENAI_API_KEY"];
    const BASE_URL_VARS: [&'static str; 1] = ["OPENAI_BASE_URL"];

    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            api_key: read_env(&Self::KEY_VARS)
                .context("Set OPENAI_API_KEY to use the OpenAI-compatible runtime")?,
            base_url: read_env(&Self::BASE_URL_VARS),
        })
    }
}

/// Engine-level knobs. A fixed seed makes every leaf reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub rng_seed: Option<u64>,
}

impl EngineConfig {
    const SEED_VARS: [&'static str; 1] = ["AGENT_RNG_SEED"];

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let rng_seed = read_with(lookup, &Self::SEED_VARS)
            .map(|raw| raw.trim().parse::<u64>().context("AGENT_RNG_SEED must be a u64"))
            .transpose()?;
        Ok(Self { rng_seed })
    }

    pub fn entropy(&self) -> Entropy {
        self.rng_seed.map_or(Entropy::Os, Entropy::Seeded)
    }
}
