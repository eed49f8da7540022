//! CycleForge CLI Library
//!
//! Roster CSV → plan → Plan CSV (+ SHA256 메타데이터)

use anyhow::{Context, Result};
use cf_core::config::config_from_env;
use cf_core::roster::write_roster_csv;
use cf_core::{
    default_roster, plan_cycle, plan_to_csv_string, read_roster_csv, validate_roster,
    AssignStrategy, BracketKey, CyclePlan, PlannerConfig, ValidatedRoster,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// 플랜 메타데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub bracket: String,
    pub energy_cap: u32,
    pub strategy: String,
    /// 플랜 행 수 (로스터 선수 수)
    pub rows: usize,
    /// SHA256 체크섬 (hex 문자열)
    pub checksum: String,
    /// CSV 크기 (bytes)
    pub csv_size: u64,
    /// 생성 시각 (RFC3339 형식)
    pub created_at: String,
}

/// Command-line overrides on top of the file/env config
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bracket: Option<String>,
    pub energy_cap: Option<u32>,
    pub strategy: Option<String>,
}

/// Resolve the planner config: explicit file > `CYCLEFORGE_CONFIG_PATH` > defaults,
/// then flags on top.
pub fn resolve_config(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<PlannerConfig> {
    let mut config = match config_file {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            PlannerConfig::from_json(&json).context("Failed to parse config JSON")?
        }
        None => config_from_env()?.unwrap_or_default(),
    };

    if let Some(bracket) = &overrides.bracket {
        config.bracket = bracket.parse::<BracketKey>()?;
    }
    if let Some(energy_cap) = overrides.energy_cap {
        config.energy_cap = energy_cap;
    }
    if let Some(strategy) = &overrides.strategy {
        config.strategy = strategy.parse::<AssignStrategy>()?;
    }

    config.validate()?;
    Ok(config)
}

/// Read and validate a roster CSV file
pub fn load_roster(path: &Path) -> Result<ValidatedRoster> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open roster CSV: {}", path.display()))?;
    let raw = read_roster_csv(file)
        .with_context(|| format!("Failed to parse roster CSV: {}", path.display()))?;
    let roster = validate_roster(&raw)?;
    Ok(roster)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write the plan CSV and return its metadata
pub fn write_plan(plan: &CyclePlan, out: &Path) -> Result<PlanMetadata> {
    let csv = plan_to_csv_string(plan.rows()).context("Failed to render plan CSV")?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(out, csv.as_bytes())
        .with_context(|| format!("Failed to write plan CSV: {}", out.display()))?;

    Ok(PlanMetadata {
        bracket: plan.config.bracket.to_string(),
        energy_cap: plan.config.energy_cap,
        strategy: plan.config.strategy.to_string(),
        rows: plan.rows().len(),
        checksum: sha256_hex(csv.as_bytes()),
        csv_size: csv.len() as u64,
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// 플랜 파일의 무결성 검증
pub fn verify_plan_file(path: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read plan file: {}", path.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

/// Roster file → plan (no output written)
pub fn plan_from_file(roster_csv: &Path, config: &PlannerConfig) -> Result<(ValidatedRoster, CyclePlan)> {
    let roster = load_roster(roster_csv)?;
    let plan = plan_cycle(&roster.players, config)?;
    Ok((roster, plan))
}

/// Write the default ten-row placeholder roster
pub fn write_template(out: &Path) -> Result<usize> {
    let players = default_roster();
    let file = fs::File::create(out)
        .with_context(|| format!("Failed to create roster template: {}", out.display()))?;
    write_roster_csv(&players, file)?;
    Ok(players.len())
}
